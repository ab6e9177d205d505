//! Generates markdown release notes from the issues of a GitHub project
//! board tagged with a release version, and links them from the
//! project's documentation.
pub mod cli;
pub mod command;
pub mod docs;
pub mod error;
pub mod inputs;
pub mod notes;
pub mod project;
pub mod result;
pub mod summary;

pub use cli::Args;
pub use result::Result;

#[cfg(test)]
pub mod test_helpers;
