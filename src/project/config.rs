//! Configuration for connecting to the project-tracking GraphQL API.
use secrecy::SecretString;
use url::Url;

use crate::inputs::InvocationInputs;

/// Maximum number of field definitions fetched for a project.
pub const FIELDS_PAGE_SIZE: i64 = 50;
/// Maximum number of items fetched for a project. Only one page is read.
pub const ITEMS_PAGE_SIZE: i64 = 100;
/// Maximum number of field values walked per item.
pub const FIELD_VALUES_PAGE_SIZE: i64 = 20;
/// Maximum number of labels fetched per issue.
pub const LABELS_PAGE_SIZE: i64 = 10;
/// Maximum number of pull requests fetched per linked pull request value.
pub const PULL_REQUESTS_PAGE_SIZE: i64 = 10;

/// Display name of the field holding the release version.
pub const VERSION_FIELD: &str = "Version";
/// Display name of the field holding the workflow status.
pub const STATUS_FIELD: &str = "Status";
/// Display name of the built-in linked pull requests field.
pub const LINKED_PRS_FIELD: &str = "Linked pull requests";

/// Remote API connection settings.
#[derive(Debug, Clone)]
pub struct ProjectConfig {
    /// GraphQL endpoint receiving every query.
    pub api_url: Url,
    /// Bearer token for authentication.
    pub token: SecretString,
}

impl From<&InvocationInputs> for ProjectConfig {
    fn from(inputs: &InvocationInputs) -> Self {
        Self {
            api_url: inputs.api_url.clone(),
            token: inputs.token.clone(),
        }
    }
}
