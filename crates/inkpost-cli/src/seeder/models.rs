use uuid::Uuid;

/// Seeded accounts all live under this domain so they can be cleared later.
pub const SEED_EMAIL_DOMAIN: &str = "seed.inkpost.dev";

/// Password shared by every seeded user.
pub const SEED_PASSWORD: &str = "password123";

pub struct UserSeed {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

pub struct BlogSeed {
    pub title: String,
    pub content: String,
    pub author_id: Uuid,
    pub is_published: bool,
}

#[derive(Clone, Debug)]
pub struct SeedConfig {
    pub users: usize,
    pub blogs_per_user: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            users: 20,
            blogs_per_user: 5,
        }
    }
}

impl SeedConfig {
    pub fn new(users: usize) -> Self {
        Self {
            users,
            ..Default::default()
        }
    }

    pub fn with_blogs_per_user(mut self, blogs_per_user: usize) -> Self {
        self.blogs_per_user = blogs_per_user;
        self
    }

    pub fn total_blogs(&self) -> usize {
        self.users * self.blogs_per_user
    }
}
