//! Test helpers shared across crates in the workspace.
//!
//! - [`env`]: guards for mutating process environment variables.
//! - [`jail`]: running setup code inside a [`figment::Jail`].
//! - [`fixtures`]: scratch directories holding property files.

pub mod env;
pub mod fixtures;
pub mod jail;
