//! Links generated release notes from the project's documentation file.
use log::*;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::result::Result;

/// Heading of the documentation section holding release note links.
pub const RELEASE_NOTES_SECTION: &str = "## Release Notes";

pub const ACTIONS_ENV: &str = "GITHUB_ACTIONS";
/// Documentation file when running inside GitHub Actions (repository root).
pub const ACTIONS_DOCS_PATH: &str = "README.md";
/// Documentation file when running locally from a sub-directory.
pub const LOCAL_DOCS_PATH: &str = "../README.md";

/// Documentation file selected by the `GITHUB_ACTIONS` variable.
pub fn docs_path<F>(env: F) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    if env(ACTIONS_ENV).as_deref() == Some("true") {
        PathBuf::from(ACTIONS_DOCS_PATH)
    } else {
        PathBuf::from(LOCAL_DOCS_PATH)
    }
}

/// List entry linking the release notes of `version`. Targets with
/// whitespace or parentheses use the angle bracket form so the link stays
/// intact.
pub fn link_line(version: &str, target: &str) -> String {
    if target.contains(|c: char| c.is_whitespace() || c == '(' || c == ')') {
        format!("- [Release Notes {version}](<{target}>)")
    } else {
        format!("- [Release Notes {version}]({target})")
    }
}

/// Path of `notes_path` relative to the directory of `doc_path`, using
/// forward slashes. Falls back to the bare file name when either path
/// cannot be resolved or the notes live outside the docs directory.
pub fn link_target(doc_path: &Path, notes_path: &Path) -> String {
    let file_name = notes_path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();

    let doc_dir = doc_path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or(Path::new("."));

    match (doc_dir.canonicalize(), notes_path.canonicalize()) {
        (Ok(dir), Ok(notes)) => notes
            .strip_prefix(&dir)
            .map(|rel| rel.to_string_lossy().replace('\\', "/"))
            .unwrap_or(file_name),
        _ => file_name,
    }
}

/// Insert `link` into the release notes section of `content`.
///
/// Returns `None` when the link is already listed. Without a section, a
/// new one is appended at the end of the document. Otherwise the link is
/// added after the run of `- ` entries directly below the heading. The
/// document's line ending (`\r\n` or `\n`) is preserved.
pub fn patch_content(content: &str, link: &str) -> Option<String> {
    let eol = if content.contains("\r\n") { "\r\n" } else { "\n" };
    let lines: Vec<&str> = content.lines().collect();

    let heading = lines.iter().position(|line| {
        line.trim().eq_ignore_ascii_case(RELEASE_NOTES_SECTION)
    });

    let Some(heading) = heading else {
        let body = content.trim_end();
        let separator = if body.is_empty() {
            String::new()
        } else {
            eol.repeat(2)
        };
        return Some(format!(
            "{body}{separator}{RELEASE_NOTES_SECTION}{eol}{eol}{link}{eol}"
        ));
    };

    let mut idx = heading + 1;

    while idx < lines.len() && lines[idx].trim().is_empty() {
        idx += 1;
    }

    while idx < lines.len() && lines[idx].starts_with("- ") {
        if lines[idx].trim_end() == link {
            return None;
        }
        idx += 1;
    }

    let mut patched = lines;
    patched.insert(idx, link);

    let mut output = patched.join(eol);
    if content.ends_with('\n') {
        output.push_str(eol);
    }

    Some(output)
}

/// Add a link to the release notes of `version` in `doc_path`.
///
/// A missing documentation file is not an error. Returns whether the file
/// was modified.
pub async fn patch(
    doc_path: &Path,
    version: &str,
    link_target: &str,
) -> Result<bool> {
    if !fs::try_exists(doc_path).await? {
        info!(
            "documentation file not found: {}: skipping release notes link",
            doc_path.display()
        );
        return Ok(false);
    }

    let content = fs::read_to_string(doc_path).await?;
    let link = link_line(version, link_target);

    match patch_content(&content, &link) {
        Some(patched) => {
            fs::write(doc_path, patched).await?;
            info!("added release notes link to {}", doc_path.display());
            Ok(true)
        }
        None => {
            info!(
                "release notes link already present in {}",
                doc_path.display()
            );
            Ok(false)
        }
    }
}
