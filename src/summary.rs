//! Append-only run summary consumed by the surrounding automation.
use log::*;
use std::path::{Path, PathBuf};
use tokio::{fs::OpenOptions, io::AsyncWriteExt};

use crate::result::Result;

pub const SUMMARY_ENV: &str = "GITHUB_STEP_SUMMARY";

/// Summary sink. Every operation is a no-op when no file is configured.
#[derive(Debug, Clone, Default)]
pub struct Summary {
    path: Option<PathBuf>,
}

impl Summary {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    /// Sink configured by [`SUMMARY_ENV`], if set and non-empty.
    pub fn from_env<F>(env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = env(SUMMARY_ENV)
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);

        Self { path }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Append `text` followed by a newline.
    pub async fn publish(&self, text: &str) -> Result<()> {
        let Some(path) = self.path.as_ref() else {
            debug!("no summary file configured: skipping summary output");
            return Ok(());
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await?;

        file.write_all(format!("{text}\n").as_bytes()).await?;
        file.flush().await?;

        Ok(())
    }

    /// Record a fatal diagnostic. Failing to write the summary is only
    /// logged and never replaces the diagnostic itself.
    pub async fn report_error(&self, message: &str) {
        if let Err(err) = self.publish(&format!("❌ {message}")).await {
            error!("failed to write error to summary: {err:#}");
        }
    }
}
