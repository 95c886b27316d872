//! # Arrest CLI
//!
//! Administrative operations that have no HTTP route, such as creating the
//! first `ADMIN` account.
//!
//! ```ignore
//! use arrest_cli::admin::create_admin;
//!
//! let id = create_admin(&pool, "root", "root@example.com", "s3cret-pass").await?;
//! ```

pub mod admin;
