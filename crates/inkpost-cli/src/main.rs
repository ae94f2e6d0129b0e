use anyhow::Context;
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use inkpost_cli::admin::create_admin;
use inkpost_cli::seeder::{self, SeedConfig};
use inkpost_config::DatabaseConfig;
use inkpost_db::{PgPool, init_db_pool};

#[derive(Parser)]
#[command(name = "inkpost-cli")]
#[command(about = "Inkpost CLI - Administrative tools for Inkpost", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new administrator account
    CreateAdmin {
        /// Display name of the admin
        #[arg(short = 'n', long)]
        name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Seed the database with fake users and blogs
    Seed {
        /// Number of users to create
        #[arg(short = 'u', long, default_value = "20")]
        users: usize,

        /// Number of blogs per user
        #[arg(short = 'b', long, default_value = "5")]
        blogs_per_user: usize,
    },
    /// Clear all seeded users and their blogs (keeps real accounts)
    ClearSeed,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let cli = Cli::parse();

    let database = DatabaseConfig::from_env()?;
    let pool = init_db_pool(&database)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::CreateAdmin {
            name,
            email,
            password,
        } => handle_create_admin(&pool, name, email, password).await,
        Commands::Seed {
            users,
            blogs_per_user,
        } => seeder::seed_all(&pool, SeedConfig::new(users).with_blogs_per_user(blogs_per_user)).await,
        Commands::ClearSeed => seeder::clear_all(&pool).await,
    }
}

async fn handle_create_admin(
    pool: &PgPool,
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
) -> anyhow::Result<()> {
    let name = match name {
        Some(name) => name,
        None => Input::new()
            .with_prompt("Name")
            .interact_text()
            .context("Failed to read name")?,
    };

    let email = match email {
        Some(email) => email,
        None => Input::new()
            .with_prompt("Email address")
            .interact_text()
            .context("Failed to read email")?,
    };

    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
            .context("Failed to read password")?,
    };

    if password.len() < 6 {
        anyhow::bail!("Password must be at least 6 characters long");
    }

    let id = create_admin(pool, &name, &email, &password).await?;

    println!("\n✅ Admin created successfully!");
    println!("   Id: {id}");
    println!("   Email: {email}");
    println!("   Name: {name}");
    Ok(())
}
