use inkpost_core::{ErrorBody, ErrorSource, PaginationMeta};
use inkpost_models::{
    AuthorInfo, BlogResponse, CreateBlogDto, LoginRequest, LoginResponse, RegisterUserDto,
    RegisteredUser, UpdateBlogDto, User, UserRole,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::blogs::controller::create_blog,
        crate::modules::blogs::controller::get_all_blogs,
        crate::modules::blogs::controller::update_blog,
        crate::modules::blogs::controller::delete_blog,
        crate::modules::admin::controller::block_user,
        crate::modules::admin::controller::delete_blog,
    ),
    components(
        schemas(
            User,
            UserRole,
            RegisterUserDto,
            RegisteredUser,
            LoginRequest,
            LoginResponse,
            AuthorInfo,
            BlogResponse,
            CreateBlogDto,
            UpdateBlogDto,
            PaginationMeta,
            ErrorBody,
            ErrorSource,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration and login"),
        (name = "Blogs", description = "Public listing and author-owned blog management"),
        (name = "Admin", description = "Moderation endpoints for administrators")
    ),
    info(
        title = "Inkpost API",
        version = "0.1.0",
        description = "A blogging REST API built with Rust, Axum, and PostgreSQL.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
