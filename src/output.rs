//! Import document rendering

use crate::resource::{ResourceDescriptor, PROVIDER};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Serialization format of the import document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

/// Everything discovered in one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportDocument {
    pub provider: String,
    pub generated_at: DateTime<Utc>,
    pub resources: Vec<ResourceDescriptor>,
}

impl ImportDocument {
    pub fn new(resources: Vec<ResourceDescriptor>) -> Self {
        Self {
            provider: PROVIDER.to_string(),
            generated_at: Utc::now(),
            resources,
        }
    }

    /// Render in the requested format
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => {
                let mut out = serde_json::to_string_pretty(self).context("Failed to render JSON")?;
                out.push('\n');
                Ok(out)
            }
            OutputFormat::Yaml => serde_yaml::to_string(self).context("Failed to render YAML"),
        }
    }

    /// Write to `path`, or to stdout when no path is given
    pub fn write(&self, format: OutputFormat, path: Option<&Path>) -> Result<()> {
        let rendered = self.render(format)?;
        match path {
            Some(path) => std::fs::write(path, rendered)
                .with_context(|| format!("Failed to write {:?}", path)),
            None => {
                use std::io::Write;
                let mut stdout = std::io::stdout().lock();
                stdout
                    .write_all(rendered.as_bytes())
                    .context("Failed to write to stdout")
            }
        }
    }
}
