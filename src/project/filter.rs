//! Projects raw board items into the issues released with a version.
use log::*;

use crate::project::{
    graphql::{FieldValueNode, ItemContent, ItemNode},
    types::{FieldMap, IssueRecord, PullRequestRef},
};

/// Reduce raw board items to the issues whose version field equals
/// `version` exactly. Item order, label order and pull request order are
/// preserved as returned by the API.
pub fn project_issues(
    items: Vec<Option<ItemNode>>,
    fields: &FieldMap,
    version: &str,
) -> Vec<IssueRecord> {
    items
        .into_iter()
        .flatten()
        .filter_map(|item| project_item(item, fields))
        .filter(|(item_version, _)| item_version.as_deref() == Some(version))
        .map(|(_, issue)| issue)
        .collect()
}

/// Builds the issue record of a single item along with its version value.
/// Items without a linked issue yield `None`.
fn project_item(
    item: ItemNode,
    fields: &FieldMap,
) -> Option<(Option<String>, IssueRecord)> {
    let issue = match item.content {
        Some(ItemContent::Issue(issue)) => issue,
        _ => {
            debug!("skipping project item without a linked issue");
            return None;
        }
    };

    let labels: Vec<String> = issue
        .labels
        .map(|conn| conn.nodes.into_iter().flatten().map(|l| l.name).collect())
        .unwrap_or_default();

    let mut version = None;
    let mut status = None;
    let mut linked_pull_requests = vec![];

    let values = item
        .field_values
        .map(|conn| conn.nodes)
        .unwrap_or_default();

    for value in values.into_iter().flatten() {
        let Some(field_id) = value.field_id() else {
            continue;
        };

        if fields.version_id() == Some(field_id) {
            match text_value(&value) {
                Some(text) => version = Some(text.to_string()),
                None => debug!(
                    "issue #{}: ignoring version value with unexpected shape",
                    issue.number
                ),
            }
        }

        if fields.status.as_deref() == Some(field_id) {
            match text_value(&value) {
                Some(text) => status = Some(text.to_string()),
                None => debug!(
                    "issue #{}: ignoring status value with unexpected shape",
                    issue.number
                ),
            }
        }

        if fields.linked_prs.as_deref() == Some(field_id) {
            match &value {
                FieldValueNode::PullRequests {
                    pull_requests: Some(conn),
                    ..
                } => {
                    linked_pull_requests.extend(
                        conn.nodes.iter().flatten().map(|pr| PullRequestRef {
                            number: pr.number,
                            url: pr.url.clone(),
                            merged: pr.merged,
                            repository_full_name: pr
                                .repository
                                .name_with_owner
                                .clone(),
                        }),
                    );
                }
                _ => debug!(
                    "issue #{}: ignoring linked pull requests value with unexpected shape",
                    issue.number
                ),
            }
        }
    }

    let record = IssueRecord {
        id: issue.id,
        number: issue.number,
        title: issue.title,
        url: issue.url,
        status,
        labels,
        linked_pull_requests,
    };

    Some((version, record))
}

/// Textual content of a single-select or text value.
fn text_value(value: &FieldValueNode) -> Option<&str> {
    match value {
        FieldValueNode::SingleSelect { name, .. } => name.as_deref(),
        FieldValueNode::Text { text, .. } => text.as_deref(),
        _ => None,
    }
}
