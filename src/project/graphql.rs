use graphql_client::{GraphQLQuery, QueryBody};
use serde::{Deserialize, Serialize};

const ORGANIZATION_PROJECT_QUERY: &str = r#"
query ResolveOrganizationProject($login: String!, $number: Int!) {
  owner: organization(login: $login) {
    projectV2(number: $number) {
      id
      title
    }
  }
}"#;

const USER_PROJECT_QUERY: &str = r#"
query ResolveUserProject($login: String!, $number: Int!) {
  owner: user(login: $login) {
    projectV2(number: $number) {
      id
      title
    }
  }
}"#;

const PROJECT_FIELDS_QUERY: &str = r#"
query ListProjectFields($projectId: ID!, $first: Int!) {
  node(id: $projectId) {
    ... on ProjectV2 {
      fields(first: $first) {
        nodes {
          __typename
          ... on ProjectV2FieldCommon {
            id
            name
            dataType
          }
          ... on ProjectV2SingleSelectField {
            options {
              id
              name
            }
          }
        }
      }
    }
  }
}"#;

const PROJECT_ITEMS_QUERY: &str = r#"
query ListProjectItems(
  $projectId: ID!
  $first: Int!
  $fieldValues: Int!
  $labels: Int!
  $pullRequests: Int!
) {
  node(id: $projectId) {
    ... on ProjectV2 {
      items(first: $first) {
        nodes {
          content {
            __typename
            ... on Issue {
              id
              number
              title
              url
              labels(first: $labels) {
                nodes {
                  name
                }
              }
            }
          }
          fieldValues(first: $fieldValues) {
            nodes {
              __typename
              ... on ProjectV2ItemFieldSingleSelectValue {
                name
                field {
                  ... on ProjectV2FieldCommon {
                    id
                  }
                }
              }
              ... on ProjectV2ItemFieldTextValue {
                text
                field {
                  ... on ProjectV2FieldCommon {
                    id
                  }
                }
              }
              ... on ProjectV2ItemFieldPullRequestValue {
                pullRequests(first: $pullRequests) {
                  nodes {
                    number
                    url
                    merged
                    repository {
                      nameWithOwner
                    }
                  }
                }
                field {
                  ... on ProjectV2FieldCommon {
                    id
                  }
                }
              }
            }
          }
        }
      }
    }
  }
}"#;

// Project resolution

#[derive(Debug, Serialize)]
pub struct ResolveProjectVars {
    pub login: String,
    pub number: i64,
}

#[derive(Debug, Deserialize)]
pub struct ProjectNode {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct ProjectOwner {
    #[serde(rename = "projectV2")]
    pub project: Option<ProjectNode>,
}

#[derive(Debug, Deserialize)]
pub struct ResolveProjectResponse {
    pub owner: Option<ProjectOwner>,
}

pub struct OrganizationProjectQuery {}

impl GraphQLQuery for OrganizationProjectQuery {
    type ResponseData = ResolveProjectResponse;
    type Variables = ResolveProjectVars;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: ORGANIZATION_PROJECT_QUERY,
            operation_name: "ResolveOrganizationProject",
        }
    }
}

pub struct UserProjectQuery {}

impl GraphQLQuery for UserProjectQuery {
    type ResponseData = ResolveProjectResponse;
    type Variables = ResolveProjectVars;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: USER_PROJECT_QUERY,
            operation_name: "ResolveUserProject",
        }
    }
}

// Field definitions

#[derive(Debug, Serialize)]
pub struct ProjectFieldsVars {
    #[serde(rename = "projectId")]
    pub project_id: String,
    pub first: i64,
}

#[derive(Debug, Deserialize)]
pub struct FieldOption {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct FieldNode {
    pub id: Option<String>,
    pub name: Option<String>,
    pub options: Option<Vec<FieldOption>>,
}

#[derive(Debug, Deserialize)]
pub struct FieldConnection {
    #[serde(default)]
    pub nodes: Vec<Option<FieldNode>>,
}

#[derive(Debug, Deserialize)]
pub struct FieldsProject {
    pub fields: Option<FieldConnection>,
}

#[derive(Debug, Deserialize)]
pub struct ProjectFieldsResponse {
    pub node: Option<FieldsProject>,
}

pub struct ProjectFieldsQuery {}

impl GraphQLQuery for ProjectFieldsQuery {
    type ResponseData = ProjectFieldsResponse;
    type Variables = ProjectFieldsVars;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: PROJECT_FIELDS_QUERY,
            operation_name: "ListProjectFields",
        }
    }
}

// Items

#[derive(Debug, Serialize)]
pub struct ProjectItemsVars {
    #[serde(rename = "projectId")]
    pub project_id: String,
    pub first: i64,
    #[serde(rename = "fieldValues")]
    pub field_values: i64,
    pub labels: i64,
    #[serde(rename = "pullRequests")]
    pub pull_requests: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LabelNode {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LabelConnection {
    #[serde(default)]
    pub nodes: Vec<Option<LabelNode>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IssueContent {
    pub id: String,
    pub number: u64,
    pub title: String,
    pub url: String,
    pub labels: Option<LabelConnection>,
}

/// Content linked to a board item. Only issues carry release notes.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "__typename")]
pub enum ItemContent {
    Issue(IssueContent),
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FieldRef {
    pub id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryRef {
    #[serde(rename = "nameWithOwner")]
    pub name_with_owner: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestNode {
    pub number: u64,
    pub url: String,
    pub merged: bool,
    pub repository: RepositoryRef,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestConnection {
    #[serde(default)]
    pub nodes: Vec<Option<PullRequestNode>>,
}

/// Value an item holds for one board field.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "__typename")]
pub enum FieldValueNode {
    #[serde(rename = "ProjectV2ItemFieldSingleSelectValue")]
    SingleSelect {
        name: Option<String>,
        field: Option<FieldRef>,
    },
    #[serde(rename = "ProjectV2ItemFieldTextValue")]
    Text {
        text: Option<String>,
        field: Option<FieldRef>,
    },
    #[serde(rename = "ProjectV2ItemFieldPullRequestValue")]
    PullRequests {
        #[serde(rename = "pullRequests")]
        pull_requests: Option<PullRequestConnection>,
        field: Option<FieldRef>,
    },
    #[serde(other)]
    Other,
}

impl FieldValueNode {
    /// Id of the board field this value belongs to.
    pub fn field_id(&self) -> Option<&str> {
        let field = match self {
            Self::SingleSelect { field, .. } => field,
            Self::Text { field, .. } => field,
            Self::PullRequests { field, .. } => field,
            Self::Other => return None,
        };

        field.as_ref().and_then(|f| f.id.as_deref())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FieldValueConnection {
    #[serde(default)]
    pub nodes: Vec<Option<FieldValueNode>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ItemNode {
    pub content: Option<ItemContent>,
    #[serde(rename = "fieldValues")]
    pub field_values: Option<FieldValueConnection>,
}

#[derive(Debug, Deserialize)]
pub struct ItemConnection {
    #[serde(default)]
    pub nodes: Vec<Option<ItemNode>>,
}

#[derive(Debug, Deserialize)]
pub struct ItemsProject {
    pub items: Option<ItemConnection>,
}

#[derive(Debug, Deserialize)]
pub struct ProjectItemsResponse {
    pub node: Option<ItemsProject>,
}

pub struct ProjectItemsQuery {}

impl GraphQLQuery for ProjectItemsQuery {
    type ResponseData = ProjectItemsResponse;
    type Variables = ProjectItemsVars;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: PROJECT_ITEMS_QUERY,
            operation_name: "ListProjectItems",
        }
    }
}
