//! Renders release notes markdown from the issues of a version.
use log::*;
use serde::Serialize;
use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};
use tokio::fs;

use crate::{
    error::ScribeError,
    project::types::{IssueRecord, PullRequestRef},
    result::Result,
};

/// Built-in release notes template. Receives `title`, `version`,
/// `issues` and `repositories`.
pub const DEFAULT_TEMPLATE: &str = r#"# {{ title }} - {{ version }}

## Listado de mejoras, correcciones y nuevas funcionalidades

{% for issue in issues -%}
- [Issue #{{ issue.number }}]({{ issue.url }}): {{ issue.title }} _(Estado: {{ issue.status }})_{% if issue.labels %} [labels: {{ issue.labels | join(sep=", ") }}]{% endif %}
{% for pr in issue.linked_pull_requests %}  - [PR #{{ pr.number }}]({{ pr.url }}) ({{ pr.repository_full_name }}) {% if pr.merged %}✅{% else %}🟡{% endif %}
{% endfor -%}
{% endfor -%}
{% if repositories %}
## Repositorios asociados a las Pull Requests

{% for repository in repositories -%}
- {{ repository }}
{% endfor -%}
{% endif -%}
"#;

/// Rendered in place of a missing status.
pub const MISSING_STATUS: &str = "Sin estado";

const TEMPLATE_NAME: &str = "release_notes.md";

#[derive(Debug, Serialize)]
struct IssueView<'a> {
    number: u64,
    url: &'a str,
    title: &'a str,
    status: &'a str,
    labels: &'a [String],
    linked_pull_requests: &'a [PullRequestRef],
}

#[derive(Debug, Serialize)]
struct NotesContext<'a> {
    title: &'a str,
    version: &'a str,
    issues: Vec<IssueView<'a>>,
    repositories: Vec<&'a str>,
}

/// Compiled release notes template.
pub struct Renderer {
    tera: tera::Tera,
    builtin: bool,
}

impl Renderer {
    /// Compile `template`, falling back to [`DEFAULT_TEMPLATE`].
    pub fn new(template: Option<&str>) -> Result<Self> {
        let mut tera = tera::Tera::default();
        tera.add_raw_template(
            TEMPLATE_NAME,
            template.unwrap_or(DEFAULT_TEMPLATE),
        )?;
        Ok(Self {
            tera,
            builtin: template.is_none(),
        })
    }

    pub fn render(
        &self,
        issues: &[IssueRecord],
        version: &str,
        project_title: &str,
    ) -> Result<String> {
        let context = NotesContext {
            title: project_title,
            version,
            issues: issues
                .iter()
                .map(|issue| IssueView {
                    number: issue.number,
                    url: &issue.url,
                    title: &issue.title,
                    status: issue.status.as_deref().unwrap_or(MISSING_STATUS),
                    labels: &issue.labels,
                    linked_pull_requests: &issue.linked_pull_requests,
                })
                .collect(),
            repositories: repositories(issues),
        };

        let context = tera::Context::from_serialize(&context)?;
        let rendered = self.tera.render(TEMPLATE_NAME, &context)?;

        let mut notes = rendered.trim_end_matches('\n').to_string();

        // the built-in layout keeps the newline of the last heading when
        // there is nothing listed below it
        if self.builtin && issues.is_empty() {
            notes.push('\n');
        }

        Ok(notes)
    }
}

/// Render release notes with the built-in template.
pub fn render(
    issues: &[IssueRecord],
    version: &str,
    project_title: &str,
) -> Result<String> {
    Renderer::new(None)?.render(issues, version, project_title)
}

/// Distinct repositories of every linked pull request, sorted.
pub fn repositories(issues: &[IssueRecord]) -> Vec<&str> {
    issues
        .iter()
        .flat_map(|issue| issue.linked_pull_requests.iter())
        .map(|pr| pr.repository_full_name.as_str())
        .collect::<BTreeSet<&str>>()
        .into_iter()
        .collect()
}

/// Name of the release notes file for `version`.
pub fn notes_filename(version: &str) -> String {
    format!("RELEASE_NOTES_{version}.md")
}

/// Write `text` to the release notes file of `version` inside `dir`,
/// replacing any previous file of that name.
pub async fn save(dir: &Path, text: &str, version: &str) -> Result<PathBuf> {
    if version.contains(['/', '\\']) {
        return Err(ScribeError::invalid_input(format!(
            "version cannot be used as a file name: {version}"
        ))
        .into());
    }

    let path = dir.join(notes_filename(version));

    fs::write(&path, text).await?;

    info!("release notes written to: {}", path.display());

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    #[test]
    fn renders_issue_with_pull_request_and_repositories() {
        let issues = vec![issue_record(
            12,
            "Fix bug",
            Some("Done"),
            &["bug"],
            &[(99, true, "org/app")],
        )];

        let notes = render(&issues, "1.2", "Roadmap").unwrap();

        let expected = [
            "# Roadmap - 1.2",
            "",
            "## Listado de mejoras, correcciones y nuevas funcionalidades",
            "",
            "- [Issue #12](https://github.com/acme/app/issues/12): Fix bug _(Estado: Done)_ [labels: bug]",
            "  - [PR #99](https://github.com/org/app/pull/99) (org/app) ✅",
            "",
            "## Repositorios asociados a las Pull Requests",
            "",
            "- org/app",
        ]
        .join("\n");

        assert_eq!(notes, expected);
    }

    #[test]
    fn empty_issue_list_renders_only_headings() {
        let notes = render(&[], "0.1", "Board").unwrap();

        assert_eq!(
            notes,
            "# Board - 0.1\n\n## Listado de mejoras, correcciones y nuevas funcionalidades\n"
        );
        assert!(!notes.contains("- [Issue #"));
        assert!(!notes.contains("Repositorios asociados"));
    }

    #[test]
    fn omits_labels_and_marks_open_pull_requests() {
        let issues = vec![
            issue_record(1, "No labels", None, &[], &[(5, false, "org/api")]),
            issue_record(2, "Two labels", Some("In progress"), &["ui", "ux"], &[]),
        ];

        let notes = render(&issues, "2.0", "Board").unwrap();
        let lines: Vec<&str> = notes.lines().collect();

        assert!(lines.contains(
            &"- [Issue #1](https://github.com/acme/app/issues/1): No labels _(Estado: Sin estado)_"
        ));
        assert!(lines.contains(
            &"  - [PR #5](https://github.com/org/api/pull/5) (org/api) 🟡"
        ));
        assert!(lines.contains(
            &"- [Issue #2](https://github.com/acme/app/issues/2): Two labels _(Estado: In progress)_ [labels: ui, ux]"
        ));
    }

    #[test]
    fn issue_line_count_matches_input() {
        let issues: Vec<IssueRecord> = (1..=7)
            .map(|n| issue_record(n, &format!("Issue {n}"), Some("Done"), &[], &[]))
            .collect();

        let notes = render(&issues, "3.0", "Board").unwrap();

        let count = notes
            .lines()
            .filter(|line| line.starts_with("- [Issue #"))
            .count();
        assert_eq!(count, issues.len());
        assert!(!notes.contains("Repositorios asociados"));
    }

    #[test]
    fn repositories_are_sorted_and_unique() {
        let issues = vec![
            issue_record(1, "a", None, &[], &[(1, true, "zeta/z"), (2, true, "alpha/a")]),
            issue_record(2, "b", None, &[], &[(3, false, "zeta/z"), (4, true, "mid/m")]),
            issue_record(3, "c", None, &[], &[(5, true, "alpha/a")]),
        ];

        assert_eq!(repositories(&issues), vec!["alpha/a", "mid/m", "zeta/z"]);

        let notes = render(&issues, "1.0", "Board").unwrap();
        let (_, section) = notes
            .split_once("## Repositorios asociados a las Pull Requests\n\n")
            .unwrap();
        assert_eq!(section, "- alpha/a\n- mid/m\n- zeta/z");
    }

    #[test]
    fn markdown_in_titles_is_not_escaped() {
        let issues = vec![issue_record(4, "Use <b> & \"quotes\"", None, &[], &[])];

        let notes = render(&issues, "1.0", "R&D").unwrap();

        assert!(notes.starts_with("# R&D - 1.0"));
        assert!(notes.contains("Use <b> & \"quotes\""));
    }

    #[test]
    fn custom_template_receives_context() {
        let renderer = Renderer::new(Some(
            "{{ title }} {{ version }}: {{ issues | length }} issues, {{ repositories | join(sep=\",\") }}",
        ))
        .unwrap();

        let issues = vec![issue_record(1, "a", None, &[], &[(1, true, "org/app")])];

        let notes = renderer.render(&issues, "1.0", "Board").unwrap();

        assert_eq!(notes, "Board 1.0: 1 issues, org/app");
    }

    #[test]
    fn only_empty_issue_list_ends_with_newline() {
        let issues = vec![issue_record(1, "a", None, &[], &[])];

        let notes = render(&issues, "1.0", "Board").unwrap();
        assert!(notes.ends_with("_(Estado: Sin estado)_"));

        let custom = Renderer::new(Some("{{ title }}\n")).unwrap();
        assert_eq!(custom.render(&[], "1.0", "Board").unwrap(), "Board");
    }

    #[test]
    fn invalid_custom_template_fails() {
        assert!(Renderer::new(Some("{% for %}")).is_err());
    }

    #[test]
    fn filename_uses_version_verbatim() {
        assert_eq!(notes_filename("1.2"), "RELEASE_NOTES_1.2.md");
        assert_eq!(notes_filename("v2.0-rc.1"), "RELEASE_NOTES_v2.0-rc.1.md");
    }

    #[tokio::test]
    async fn save_overwrites_existing_file() {
        let dir = TempDir::new().unwrap();

        let first = save(dir.path(), "old", "1.2").await.unwrap();
        let second = save(dir.path(), "new", "1.2").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(second, dir.path().join("RELEASE_NOTES_1.2.md"));
        assert_eq!(std::fs::read_to_string(second).unwrap(), "new");
    }

    #[tokio::test]
    async fn save_rejects_path_separators() {
        let dir = TempDir::new().unwrap();

        assert!(save(dir.path(), "text", "../1.2").await.is_err());
    }
}
