//! Implements the ProjectApi trait for GitHub Projects
use async_trait::async_trait;
use graphql_client::GraphQLQuery;
use log::*;
use reqwest::{
    Client, StatusCode, Url,
    header::{AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT},
};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;

use crate::{
    error::ScribeError,
    inputs::OwnerKind,
    project::{
        config::{
            FIELD_VALUES_PAGE_SIZE, FIELDS_PAGE_SIZE, ITEMS_PAGE_SIZE,
            LABELS_PAGE_SIZE, LINKED_PRS_FIELD, PULL_REQUESTS_PAGE_SIZE,
            ProjectConfig, STATUS_FIELD, VERSION_FIELD,
        },
        filter::project_issues,
        graphql::{
            FieldNode, OrganizationProjectQuery, ProjectFieldsQuery,
            ProjectFieldsResponse, ProjectFieldsVars, ProjectItemsQuery,
            ProjectItemsResponse, ProjectItemsVars, ResolveProjectResponse,
            ResolveProjectVars, UserProjectQuery,
        },
        traits::ProjectApi,
        types::{FieldMap, IssueRecord, ProjectIdentity, VersionField},
    },
    result::Result,
};

const CLIENT_USER_AGENT: &str =
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// GitHub Projects implementation using reqwest to post GraphQL queries.
/// Requests are never retried and carry no timeout.
pub struct GithubProjects {
    api_url: Url,
    client: Client,
}

impl GithubProjects {
    /// Create a client sending the bearer token with every request.
    pub fn new(config: ProjectConfig) -> Result<Self> {
        let token = config.token.expose_secret();

        let mut headers = HeaderMap::new();

        let token_value =
            HeaderValue::from_str(format!("Bearer {}", token).as_str())?;

        headers.append(AUTHORIZATION, token_value);
        headers.append(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            api_url: config.api_url,
            client,
        })
    }

    async fn query<Q: GraphQLQuery>(
        &self,
        variables: Q::Variables,
    ) -> Result<Q::ResponseData> {
        let body = Q::build_query(variables);

        debug!("sending query {} to {}", body.operation_name, self.api_url);

        let request = self.client.post(self.api_url.clone()).json(&body).build()?;
        let response = self.client.execute(request).await?;
        let status = response.status();
        let text = response.text().await?;

        decode_response(status, &text)
    }
}

#[async_trait]
impl ProjectApi for GithubProjects {
    async fn resolve_project(
        &self,
        kind: OwnerKind,
        owner: &str,
        number: u64,
    ) -> Result<ProjectIdentity> {
        let vars = ResolveProjectVars {
            login: owner.to_string(),
            number: i64::try_from(number).map_err(|_| {
                ScribeError::invalid_input(format!(
                    "project number out of range: {number}"
                ))
            })?,
        };

        let data = match kind {
            OwnerKind::Organization => {
                self.query::<OrganizationProjectQuery>(vars).await?
            }
            OwnerKind::User => self.query::<UserProjectQuery>(vars).await?,
        };

        project_identity(data, kind, owner, number)
    }

    async fn list_fields(&self, project_id: &str) -> Result<FieldMap> {
        let vars = ProjectFieldsVars {
            project_id: project_id.to_string(),
            first: FIELDS_PAGE_SIZE,
        };

        let data = self.query::<ProjectFieldsQuery>(vars).await?;

        fields_from(data, project_id)
    }

    async fn list_items(
        &self,
        project_id: &str,
        fields: &FieldMap,
        version: &str,
    ) -> Result<Vec<IssueRecord>> {
        match &fields.version {
            None => warn!(
                "project has no '{VERSION_FIELD}' field: no issue can match version {version}"
            ),
            Some(field)
                if !field.options.is_empty()
                    && !field.options.iter().any(|o| o == version) =>
            {
                warn!(
                    "version {version} is not one of the '{VERSION_FIELD}' options: {:?}",
                    field.options
                )
            }
            Some(_) => {}
        }

        let vars = ProjectItemsVars {
            project_id: project_id.to_string(),
            first: ITEMS_PAGE_SIZE,
            field_values: FIELD_VALUES_PAGE_SIZE,
            labels: LABELS_PAGE_SIZE,
            pull_requests: PULL_REQUESTS_PAGE_SIZE,
        };

        let data = self.query::<ProjectItemsQuery>(vars).await?;

        issues_from(data, project_id, fields, version)
    }
}

/// Identity of the resolved project. A missing owner or project maps to
/// [`ScribeError::ProjectNotFound`].
pub fn project_identity(
    data: ResolveProjectResponse,
    kind: OwnerKind,
    owner: &str,
    number: u64,
) -> Result<ProjectIdentity> {
    let project = data.owner.and_then(|o| o.project).ok_or_else(|| {
        ScribeError::ProjectNotFound {
            kind,
            owner: owner.to_string(),
            number,
        }
    })?;

    Ok(ProjectIdentity {
        id: project.id,
        title: project.title,
    })
}

pub fn fields_from(
    data: ProjectFieldsResponse,
    project_id: &str,
) -> Result<FieldMap> {
    let fields = data.node.and_then(|n| n.fields).ok_or_else(|| {
        ScribeError::missing_data(format!(
            "no fields returned for project {project_id}"
        ))
    })?;

    Ok(build_field_map(fields.nodes))
}

/// Issues of `version` among the returned project items.
pub fn issues_from(
    data: ProjectItemsResponse,
    project_id: &str,
    fields: &FieldMap,
    version: &str,
) -> Result<Vec<IssueRecord>> {
    let items = data.node.and_then(|n| n.items).ok_or_else(|| {
        ScribeError::missing_data(format!(
            "no items returned for project {project_id}"
        ))
    })?;

    Ok(project_issues(items.nodes, fields, version))
}

/// Decode a GraphQL response body. Non-success statuses and `errors`
/// payloads fail with the raw body attached.
pub fn decode_response<T: DeserializeOwned>(
    status: StatusCode,
    body: &str,
) -> Result<T> {
    if !status.is_success() {
        return Err(ScribeError::Http {
            status: status.as_u16(),
            body: body.to_string(),
        }
        .into());
    }

    let response: graphql_client::Response<T> = serde_json::from_str(body)?;

    if let Some(errors) = response.errors
        && !errors.is_empty()
    {
        return Err(ScribeError::GraphQL {
            body: body.to_string(),
        }
        .into());
    }

    response
        .data
        .ok_or_else(|| ScribeError::missing_data("response has no data").into())
}

/// Match field definitions by exact display name.
pub fn build_field_map(nodes: Vec<Option<FieldNode>>) -> FieldMap {
    let mut map = FieldMap::default();

    for node in nodes.into_iter().flatten() {
        let (Some(id), Some(name)) = (node.id, node.name) else {
            continue;
        };

        match name.as_str() {
            VERSION_FIELD => {
                map.version = Some(VersionField {
                    id,
                    options: node
                        .options
                        .unwrap_or_default()
                        .into_iter()
                        .map(|o| o.name)
                        .collect(),
                })
            }
            STATUS_FIELD => map.status = Some(id),
            LINKED_PRS_FIELD => map.linked_prs = Some(id),
            _ => {}
        }
    }

    map
}
