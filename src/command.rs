//! Release notes generation pipeline.
use color_eyre::eyre::WrapErr;
use log::*;
use std::path::PathBuf;
use tokio::fs;

use crate::{
    docs,
    inputs::InvocationInputs,
    notes::{self, Renderer},
    project::{
        traits::ProjectApi,
        types::{FieldMap, IssueRecord},
    },
    result::Result,
    summary::Summary,
};

/// Where a run writes its artifacts.
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Directory receiving the release notes file
    pub out_dir: PathBuf,
    /// Documentation file to link the release notes from
    pub docs_path: PathBuf,
    pub summary: Summary,
}

/// Generate the release notes for `inputs.version` and return the path of
/// the written file.
///
/// Stages run strictly in order and the first failure aborts the run.
pub async fn execute(
    api: &dyn ProjectApi,
    inputs: &InvocationInputs,
    ctx: &RunContext,
) -> Result<PathBuf> {
    let renderer = load_renderer(inputs)
        .await
        .wrap_err("failed to load release notes template")?;

    let project = api
        .resolve_project(inputs.kind, &inputs.owner, inputs.project_number)
        .await
        .wrap_err("failed to resolve project")?;

    info!("project id: {}", project.id);
    info!("project title: {}", project.title);

    let fields = api
        .list_fields(&project.id)
        .await
        .wrap_err("failed to list project fields")?;

    log_fields(&fields);

    let issues = api
        .list_items(&project.id, &fields, &inputs.version)
        .await
        .wrap_err("failed to list project items")?;

    log_issues(&issues, &inputs.version);

    let text = renderer
        .render(&issues, &inputs.version, &project.title)
        .wrap_err("failed to render release notes")?;

    let notes_path = notes::save(&ctx.out_dir, &text, &inputs.version)
        .await
        .wrap_err("failed to save release notes")?;

    ctx.summary
        .publish(&text)
        .await
        .wrap_err("failed to publish release notes to summary")?;

    let target = docs::link_target(&ctx.docs_path, &notes_path);

    docs::patch(&ctx.docs_path, &inputs.version, &target)
        .await
        .wrap_err_with(|| {
            format!(
                "failed to update documentation file: {}",
                ctx.docs_path.display()
            )
        })?;

    Ok(notes_path)
}

async fn load_renderer(inputs: &InvocationInputs) -> Result<Renderer> {
    match &inputs.template {
        Some(path) => {
            info!("using release notes template: {}", path.display());
            let template = fs::read_to_string(path).await?;
            Renderer::new(Some(&template))
        }
        None => Renderer::new(None),
    }
}

fn log_fields(fields: &FieldMap) {
    let entries = fields.entries();

    if entries.is_empty() {
        warn!("none of the release notes fields were found on the project");
        return;
    }

    let width = entries.iter().map(|(name, _)| name.len()).max().unwrap_or(0);

    info!("relevant field ids:");
    for (name, id) in entries {
        info!("  {name:<width$}: {id}");
    }
}

fn log_issues(issues: &[IssueRecord], version: &str) {
    info!("issues filtered by version '{version}': {}", issues.len());

    for issue in issues {
        info!(
            "- Issue #{}: {} (Estado: {})",
            issue.number,
            issue.title,
            issue.status.as_deref().unwrap_or(notes::MISSING_STATUS)
        );

        for pr in issue.linked_pull_requests.iter() {
            let state = if pr.merged { "MERGEADA" } else { "ABIERTA" };
            info!(
                "    - PR #{} [{state}]: {} ({})",
                pr.number, pr.repository_full_name, pr.url
            );
        }
    }
}
