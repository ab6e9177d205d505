use serde::Serialize;

/// Identity of a project board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectIdentity {
    /// Opaque node id used by later queries
    pub id: String,
    pub title: String,
}

/// The version field of a board and its allowed option labels. Options
/// are empty when the field is free text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionField {
    pub id: String,
    pub options: Vec<String>,
}

/// Resolved identifiers of the board fields release notes care about.
/// Fields the board does not define are left as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap {
    pub version: Option<VersionField>,
    pub status: Option<String>,
    pub linked_prs: Option<String>,
}

impl FieldMap {
    pub fn version_id(&self) -> Option<&str> {
        self.version.as_ref().map(|f| f.id.as_str())
    }

    /// (logical name, field id) pairs for every resolved field.
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        let mut entries = vec![];

        if let Some(id) = self.version_id() {
            entries.push(("version", id));
        }
        if let Some(id) = self.status.as_deref() {
            entries.push(("status", id));
        }
        if let Some(id) = self.linked_prs.as_deref() {
            entries.push(("linked_prs", id));
        }

        entries
    }
}

/// Pull request linked to an issue through the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PullRequestRef {
    pub number: u64,
    pub url: String,
    pub merged: bool,
    /// `owner/name` of the repository holding the pull request
    pub repository_full_name: String,
}

/// Issue on the board whose version matches the requested one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueRecord {
    pub id: String,
    pub number: u64,
    pub title: String,
    pub url: String,
    pub status: Option<String>,
    pub labels: Vec<String>,
    pub linked_pull_requests: Vec<PullRequestRef>,
}
