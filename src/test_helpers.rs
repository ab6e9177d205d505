//! Shared fixtures for unit tests.
use secrecy::SecretString;
use serde_json::{Value, json};
use url::Url;

use crate::{
    inputs::{InvocationInputs, OwnerKind},
    project::types::{FieldMap, IssueRecord, PullRequestRef, VersionField},
};

pub const VERSION_FIELD_ID: &str = "PVTSSF_version";
pub const STATUS_FIELD_ID: &str = "PVTSSF_status";
pub const LINKED_PRS_FIELD_ID: &str = "PVTF_linked_prs";

/// Inputs for organization `acme`, board 12.
pub fn test_inputs(version: &str) -> InvocationInputs {
    InvocationInputs {
        project_url: "https://github.com/orgs/acme/projects/12".into(),
        version: version.into(),
        token: SecretString::from("test-token".to_string()),
        kind: OwnerKind::Organization,
        owner: "acme".into(),
        project_number: 12,
        api_url: Url::parse("https://api.github.com/graphql").unwrap(),
        template: None,
    }
}

pub fn test_field_map() -> FieldMap {
    FieldMap {
        version: Some(VersionField {
            id: VERSION_FIELD_ID.into(),
            options: vec!["1.0".into(), "1.2".into(), "1.3".into()],
        }),
        status: Some(STATUS_FIELD_ID.into()),
        linked_prs: Some(LINKED_PRS_FIELD_ID.into()),
    }
}

pub fn pr_url(repo: &str, number: u64) -> String {
    format!("https://github.com/{repo}/pull/{number}")
}

pub fn issue_url(number: u64) -> String {
    format!("https://github.com/acme/app/issues/{number}")
}

/// Raw `content` node of an issue as returned by the items query.
pub fn issue_content(number: u64, title: &str, labels: &[&str]) -> Value {
    let labels: Vec<Value> =
        labels.iter().map(|name| json!({ "name": name })).collect();

    json!({
        "__typename": "Issue",
        "id": format!("I_{number}"),
        "number": number,
        "title": title,
        "url": issue_url(number),
        "labels": { "nodes": labels }
    })
}

/// Raw project item node linked to an issue with version, status and
/// linked pull request values.
pub fn issue_item(
    number: u64,
    title: &str,
    version: &str,
    status: Option<&str>,
    labels: &[&str],
    prs: &[(u64, bool, &str)],
) -> Value {
    let mut values = vec![json!({
        "__typename": "ProjectV2ItemFieldSingleSelectValue",
        "name": version,
        "field": { "id": VERSION_FIELD_ID }
    })];

    if let Some(status) = status {
        values.push(json!({
            "__typename": "ProjectV2ItemFieldSingleSelectValue",
            "name": status,
            "field": { "id": STATUS_FIELD_ID }
        }));
    }

    if !prs.is_empty() {
        let nodes: Vec<Value> = prs
            .iter()
            .map(|(number, merged, repo)| {
                json!({
                    "number": number,
                    "url": pr_url(repo, *number),
                    "merged": merged,
                    "repository": { "nameWithOwner": repo }
                })
            })
            .collect();

        values.push(json!({
            "__typename": "ProjectV2ItemFieldPullRequestValue",
            "pullRequests": { "nodes": nodes },
            "field": { "id": LINKED_PRS_FIELD_ID }
        }));
    }

    json!({
        "content": issue_content(number, title, labels),
        "fieldValues": { "nodes": values }
    })
}

pub fn issue_record(
    number: u64,
    title: &str,
    status: Option<&str>,
    labels: &[&str],
    prs: &[(u64, bool, &str)],
) -> IssueRecord {
    IssueRecord {
        id: format!("I_{number}"),
        number,
        title: title.into(),
        url: issue_url(number),
        status: status.map(String::from),
        labels: labels.iter().map(|l| l.to_string()).collect(),
        linked_pull_requests: prs
            .iter()
            .map(|(number, merged, repo)| PullRequestRef {
                number: *number,
                url: pr_url(repo, *number),
                merged: *merged,
                repository_full_name: repo.to_string(),
            })
            .collect(),
    }
}
