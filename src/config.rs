use medreport_layout::Theme;
use medreport_types::PageGeometry;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_NAME: &str = "medreport";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub title: String,
    pub output_dir: PathBuf,
    pub page: PageGeometry,
    pub advisory: AdvisoryConfig,
    pub theme: Theme,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AdvisoryConfig {
    pub enabled: bool,
    pub endpoint: String,
    pub model: String,
    pub timeout_ms: u64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: "Medical Diagnostic Report".to_string(),
            output_dir: PathBuf::from("./reports"),
            page: PageGeometry::a4(),
            advisory: AdvisoryConfig::default(),
            theme: Theme::default(),
        }
    }
}

impl Default for AdvisoryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: "http://localhost:11434/api/generate".to_string(),
            model: "llama3".to_string(),
            timeout_ms: 15_000,
        }
    }
}

impl AdvisoryConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl ReportConfig {
    /// Loads configuration from `path` (or `medreport.toml` in the working
    /// directory when present), then layers `MEDREPORT__*` environment
    /// variables on top, e.g. `MEDREPORT__ADVISORY__MODEL=mistral`.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();

        builder = match path {
            Some(path) => builder.add_source(config::File::from(path).required(true)),
            None => {
                builder.add_source(config::File::with_name(DEFAULT_CONFIG_NAME).required(false))
            }
        };

        builder = builder.add_source(
            config::Environment::with_prefix("MEDREPORT")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config: ReportConfig = builder.build()?.try_deserialize()?;
        log::debug!(
            "Loaded configuration: page {}x{}, advisory enabled: {}",
            config.page.width(),
            config.page.height(),
            config.advisory.enabled
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_toml(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_apply_without_a_file() {
        let config = ReportConfig::default();
        assert_eq!(config.title, "Medical Diagnostic Report");
        assert_eq!(config.page, PageGeometry::a4());
        assert_eq!(config.advisory.timeout(), Duration::from_secs(15));
        assert!(config.advisory.enabled);
    }

    #[test]
    fn file_overrides_selected_values() {
        let file = write_toml(
            r#"
title = "Clinic Report"

[advisory]
enabled = false
timeout_ms = 500

[page]
width = 612.0
height = 792.0
margin = 36.0
"#,
        );
        let config = ReportConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.title, "Clinic Report");
        assert!(!config.advisory.enabled);
        assert_eq!(config.advisory.timeout_ms, 500);
        assert_eq!(config.advisory.model, "llama3");
        assert_eq!(config.page.margin(), 36.0);
        assert_eq!(config.output_dir, PathBuf::from("./reports"));
    }

    #[test]
    fn invalid_margin_is_rejected() {
        let file = write_toml("[page]\nwidth = 100.0\nheight = 100.0\nmargin = 60.0\n");
        assert!(ReportConfig::load(Some(file.path())).is_err());
    }
}
