//! # Inkpost CLI
//!
//! Administrative and seeding utilities for Inkpost.
//!
//! ## Usage
//!
//! ```ignore
//! use inkpost_cli::seeder::{seed_all, SeedConfig};
//!
//! let config = SeedConfig::new(50).with_blogs_per_user(4);
//! seed_all(&pool, config).await?;
//! ```

pub mod admin;
pub mod seeder;
