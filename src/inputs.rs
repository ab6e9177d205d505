//! Resolves the invocation inputs from command-line flags and the
//! environment.
use color_eyre::eyre::WrapErr;
use regex::Regex;
use secrecy::SecretString;
use std::{fmt, path::PathBuf};
use url::Url;

use crate::{cli::Args, error::ScribeError, result::Result};

pub const PROJECT_URL_ENV: &str = "INPUT_PROJECT_URL";
pub const VERSION_ENV: &str = "INPUT_VERSION";
pub const TOKEN_ENV: &str = "TOKEN";
pub const API_URL_ENV: &str = "INPUT_API_URL";
pub const TEMPLATE_ENV: &str = "INPUT_TEMPLATE";

/// Host of the public GitHub instance; its API lives on a separate host.
const PUBLIC_HOST: &str = "github.com";
const PUBLIC_API_URL: &str = "https://api.github.com/graphql";

const PROJECT_URL_PATTERN: &str =
    r"^https://([^/]+)/(users|orgs)/([^/]+)/projects/(\d+)(?:[/?#].*)?$";

const EXPECTED_URL_FORMAT: &str =
    "https://<host>/{users|orgs}/<owner>/projects/<number>";

/// Kind of account owning a project board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerKind {
    User,
    Organization,
}

impl OwnerKind {
    /// Parses the path segment used in project URLs.
    pub fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "users" => Some(Self::User),
            "orgs" => Some(Self::Organization),
            _ => None,
        }
    }

    /// Path segment used in project URLs.
    pub fn segment(&self) -> &'static str {
        match self {
            Self::User => "users",
            Self::Organization => "orgs",
        }
    }
}

impl fmt::Display for OwnerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Organization => write!(f, "organization"),
        }
    }
}

/// Coordinates of a project board extracted from its URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLocator {
    pub host: String,
    pub kind: OwnerKind,
    pub owner: String,
    pub number: u64,
}

/// Fully validated inputs for a single run.
#[derive(Debug, Clone)]
pub struct InvocationInputs {
    pub project_url: String,
    pub version: String,
    pub token: SecretString,
    pub kind: OwnerKind,
    pub owner: String,
    pub project_number: u64,
    pub api_url: Url,
    pub template: Option<PathBuf>,
}

impl InvocationInputs {
    /// Human-aligned table of the resolved inputs. The token is masked.
    pub fn table(&self) -> String {
        let rows = [
            ("Project URL", self.project_url.clone()),
            ("Version", self.version.clone()),
            ("Project Type", self.kind.segment().to_string()),
            ("Owner", self.owner.clone()),
            ("Project Number", self.project_number.to_string()),
            ("API URL", self.api_url.to_string()),
            ("Token", "****".to_string()),
        ];

        let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);

        rows.iter()
            .map(|(label, value)| format!("{label:<width$}: {value}"))
            .collect::<Vec<String>>()
            .join("\n")
    }
}

/// Extracts host, owner kind, owner and project number from a project
/// board URL, rejecting anything that does not match
/// `https://<host>/(users|orgs)/<owner>/projects/<number>`.
pub fn parse_project_url(project_url: &str) -> Result<ProjectLocator> {
    let re = Regex::new(PROJECT_URL_PATTERN)?;

    let invalid = || {
        ScribeError::invalid_input(format!(
            "{PROJECT_URL_ENV} is not well formed: '{project_url}', expected format: {EXPECTED_URL_FORMAT}"
        ))
    };

    let caps = re.captures(project_url).ok_or_else(invalid)?;

    let kind = OwnerKind::from_segment(&caps[2]).ok_or_else(invalid)?;
    let number = caps[4].parse::<u64>().map_err(|_| invalid())?;

    Ok(ProjectLocator {
        host: caps[1].to_string(),
        kind,
        owner: caps[3].to_string(),
        number,
    })
}

/// GraphQL endpoint for a forge host: the public instance serves it from
/// `api.github.com`, enterprise servers from `/api/graphql`.
pub fn default_api_url(host: &str) -> Result<Url> {
    let url = if host == PUBLIC_HOST {
        PUBLIC_API_URL.to_string()
    } else {
        format!("https://{host}/api/graphql")
    };

    Url::parse(&url).wrap_err_with(|| format!("invalid api url: {url}"))
}

/// Resolve the invocation inputs.
///
/// When `interactive` is true, command-line flags take precedence over
/// their environment variables. Otherwise only the environment is read.
pub fn resolve<F>(args: &Args, interactive: bool, env: F) -> Result<InvocationInputs>
where
    F: Fn(&str) -> Option<String>,
{
    let lookup = |flag: &Option<String>, var: &str| -> Option<String> {
        flag.clone()
            .filter(|v| interactive && !v.is_empty())
            .or_else(|| env(var))
            .filter(|v| !v.is_empty())
    };

    if !interactive && args.has_inputs() {
        log::warn!(
            "not running in an interactive terminal: ignoring command-line inputs"
        );
    }

    let project_url = lookup(&args.project_url, PROJECT_URL_ENV)
        .ok_or_else(|| ScribeError::invalid_input(format!("{PROJECT_URL_ENV} is not set")))?;

    let version = lookup(&args.version, VERSION_ENV)
        .ok_or_else(|| ScribeError::invalid_input(format!("{VERSION_ENV} is not set")))?;

    let token = lookup(&args.token, TOKEN_ENV)
        .ok_or_else(|| ScribeError::invalid_input(format!("{TOKEN_ENV} is not set")))?;

    let locator = parse_project_url(&project_url)?;

    let api_url = match lookup(&args.api_url, API_URL_ENV) {
        Some(url) => Url::parse(&url).map_err(|err| {
            ScribeError::invalid_input(format!("{API_URL_ENV} is not a valid url: {err}"))
        })?,
        None => default_api_url(&locator.host)?,
    };

    let template = lookup(&args.template, TEMPLATE_ENV).map(PathBuf::from);

    Ok(InvocationInputs {
        project_url,
        version,
        token: SecretString::from(token),
        kind: locator.kind,
        owner: locator.owner,
        project_number: locator.number,
        api_url,
        template,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn full_env() -> impl Fn(&str) -> Option<String> {
        env_from(&[
            (PROJECT_URL_ENV, "https://github.com/orgs/acme/projects/12"),
            (VERSION_ENV, "1.2"),
            (TOKEN_ENV, "env-token"),
        ])
    }

    fn downcast(err: color_eyre::Report) -> ScribeError {
        err.downcast::<ScribeError>().unwrap()
    }

    #[test]
    fn parses_organization_url() {
        let locator =
            parse_project_url("https://github.com/orgs/acme/projects/12").unwrap();

        assert_eq!(
            locator,
            ProjectLocator {
                host: "github.com".into(),
                kind: OwnerKind::Organization,
                owner: "acme".into(),
                number: 12,
            }
        );
    }

    #[test]
    fn parses_user_url_with_view_suffix() {
        let locator = parse_project_url(
            "https://github.example.com/users/octocat/projects/3/views/1",
        )
        .unwrap();

        assert_eq!(locator.host, "github.example.com");
        assert_eq!(locator.kind, OwnerKind::User);
        assert_eq!(locator.owner, "octocat");
        assert_eq!(locator.number, 3);
    }

    #[test]
    fn rejects_malformed_urls() {
        let bad = [
            "",
            "github.com/orgs/acme/projects/1",
            "http://github.com/orgs/acme/projects/1",
            "https://github.com/teams/acme/projects/1",
            "https://github.com/orgs/acme/projects/",
            "https://github.com/orgs/acme/projects/abc",
            "https://github.com/orgs//projects/1",
            "https://github.com/acme/repo",
            "https://github.com/orgs/acme/projects/12abc",
        ];

        for url in bad {
            let err = parse_project_url(url).unwrap_err();
            assert!(
                matches!(downcast(err), ScribeError::InvalidInput(_)),
                "expected rejection for {url}"
            );
        }
    }

    #[test]
    fn derives_api_url_from_host() {
        assert_eq!(
            default_api_url("github.com").unwrap().as_str(),
            "https://api.github.com/graphql"
        );
        assert_eq!(
            default_api_url("git.example.com").unwrap().as_str(),
            "https://git.example.com/api/graphql"
        );
    }

    #[test]
    fn resolves_from_environment() {
        let inputs = resolve(&Args::default(), false, full_env()).unwrap();

        assert_eq!(inputs.version, "1.2");
        assert_eq!(inputs.token.expose_secret(), "env-token");
        assert_eq!(inputs.kind, OwnerKind::Organization);
        assert_eq!(inputs.owner, "acme");
        assert_eq!(inputs.project_number, 12);
        assert_eq!(inputs.api_url.as_str(), "https://api.github.com/graphql");
        assert!(inputs.template.is_none());
    }

    #[test]
    fn flags_override_environment_when_interactive() {
        let args = Args {
            version: Some("2.0".into()),
            token: Some("flag-token".into()),
            ..Args::default()
        };

        let inputs = resolve(&args, true, full_env()).unwrap();

        assert_eq!(inputs.version, "2.0");
        assert_eq!(inputs.token.expose_secret(), "flag-token");
        assert_eq!(inputs.owner, "acme");
    }

    #[test]
    fn flags_ignored_when_not_interactive() {
        let args = Args {
            version: Some("2.0".into()),
            ..Args::default()
        };

        let inputs = resolve(&args, false, full_env()).unwrap();

        assert_eq!(inputs.version, "1.2");
    }

    #[test]
    fn missing_inputs_are_rejected() {
        for missing in [PROJECT_URL_ENV, VERSION_ENV, TOKEN_ENV] {
            let base = full_env();
            let env = move |key: &str| {
                if key == missing { None } else { base(key) }
            };

            let err = resolve(&Args::default(), false, env).unwrap_err();
            let err = downcast(err);
            assert!(matches!(err, ScribeError::InvalidInput(_)));
            assert!(err.to_string().contains(missing));
        }
    }

    #[test]
    fn empty_values_count_as_missing() {
        let env = env_from(&[
            (PROJECT_URL_ENV, "https://github.com/orgs/acme/projects/12"),
            (VERSION_ENV, ""),
            (TOKEN_ENV, "token"),
        ]);

        let err = resolve(&Args::default(), false, env).unwrap_err();
        assert!(matches!(downcast(err), ScribeError::InvalidInput(_)));
    }

    #[test]
    fn empty_flag_falls_back_to_environment() {
        let args = Args {
            version: Some(String::new()),
            ..Args::default()
        };

        let inputs = resolve(&args, true, full_env()).unwrap();

        assert_eq!(inputs.version, "1.2");
    }

    #[test]
    fn api_url_and_template_overrides() {
        let env = env_from(&[
            (PROJECT_URL_ENV, "https://github.com/users/octocat/projects/1"),
            (VERSION_ENV, "0.1"),
            (TOKEN_ENV, "token"),
            (API_URL_ENV, "http://localhost:8080/graphql"),
            (TEMPLATE_ENV, "notes.md.tera"),
        ]);

        let inputs = resolve(&Args::default(), false, env).unwrap();

        assert_eq!(inputs.api_url.as_str(), "http://localhost:8080/graphql");
        assert_eq!(inputs.template, Some(PathBuf::from("notes.md.tera")));
    }

    #[test]
    fn table_masks_token_and_aligns_labels() {
        let inputs = resolve(&Args::default(), false, full_env()).unwrap();
        let table = inputs.table();

        assert!(!table.contains("env-token"));
        assert!(table.contains("Token         : ****"));
        assert!(table.contains("Project Number: 12"));
        assert!(table.contains("Project Type  : orgs"));
        assert_eq!(table.lines().count(), 7);
    }
}
