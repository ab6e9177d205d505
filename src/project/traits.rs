//! Traits related to the remote project-tracking API
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::{
    inputs::OwnerKind,
    project::types::{FieldMap, IssueRecord, ProjectIdentity},
    result::Result,
};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ProjectApi {
    /// Look up the board `number` owned by `owner`. Fails with
    /// [`crate::error::ScribeError::ProjectNotFound`] when the owner has no
    /// such board.
    async fn resolve_project(
        &self,
        kind: OwnerKind,
        owner: &str,
        number: u64,
    ) -> Result<ProjectIdentity>;

    /// Resolve the Version, Status and Linked pull requests fields of a
    /// board. Missing fields are not an error.
    async fn list_fields(&self, project_id: &str) -> Result<FieldMap>;

    /// Issues on the board whose version equals `version`, in board order.
    async fn list_items(
        &self,
        project_id: &str,
        fields: &FieldMap,
        version: &str,
    ) -> Result<Vec<IssueRecord>>;
}
