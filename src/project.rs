//! Access to project boards on the remote project-tracking API.
pub mod config;
pub mod filter;
pub mod github;
pub mod graphql;
pub mod traits;
pub mod types;
