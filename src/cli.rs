//! CLI argument parsing.
use clap::Parser;

/// Generate markdown release notes from the issues of a GitHub project
/// board that carry a given version.
///
/// Every input can also be supplied through the environment, which is
/// the only source consulted when the tool is not driven from a
/// terminal.
#[derive(Parser, Debug, Default, Clone)]
#[command(about, long_about = None, disable_version_flag = true)]
pub struct Args {
    #[arg(long)]
    /// Project board URL (https://github.com/{users|orgs}/owner/projects/N).
    /// Overrides INPUT_PROJECT_URL.
    pub project_url: Option<String>,

    #[arg(long)]
    /// Release version to collect issues for. Overrides INPUT_VERSION.
    pub version: Option<String>,

    #[arg(long)]
    /// Access token used against the GraphQL API. Overrides TOKEN.
    pub token: Option<String>,

    #[arg(long)]
    /// GraphQL endpoint. Derived from the project URL host when omitted.
    /// Overrides INPUT_API_URL.
    pub api_url: Option<String>,

    #[arg(long)]
    /// Custom tera template used to render the release notes.
    /// Overrides INPUT_TEMPLATE.
    pub template: Option<String>,

    #[arg(long, default_value_t = false)]
    /// Enable debug logging.
    pub debug: bool,
}

impl Args {
    /// True when any of the input flags was passed.
    pub fn has_inputs(&self) -> bool {
        self.project_url.is_some()
            || self.version.is_some()
            || self.token.is_some()
            || self.api_url.is_some()
            || self.template.is_some()
    }
}
