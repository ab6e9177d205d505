//! Result type shared across release-scribe.
//!
//! Every fallible function returns [`Result`], an alias for the
//! `color-eyre` report type. Typed failures from [`crate::error`]
//! convert into it through `?`, and each pipeline stage adds context
//! with `.wrap_err()` so the final diagnostic reads as a single chain:
//!
//! ```rust,ignore
//! use color_eyre::eyre::WrapErr;
//! use crate::result::Result;
//!
//! async fn load(api: &dyn ProjectApi, id: &str) -> Result<FieldMap> {
//!     api.list_fields(id)
//!         .await
//!         .wrap_err("failed to list project fields")
//! }
//! ```

use color_eyre::eyre::Result as EyreResult;

/// Standard result type used throughout release-scribe.
pub type Result<T> = EyreResult<T>;
