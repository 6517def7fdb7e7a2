use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::dashboards::d400_sales_analytics::filter::EndBoundary;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory with a built UI, served for every non-API path
    #[serde(default)]
    pub static_dir: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatasetConfig {
    pub path: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DashboardConfig {
    /// Row limit of the "top N" tables
    pub top_n: usize,
    pub currency_symbol: String,
    pub end_boundary: EndBoundary,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            top_n: 10,
            currency_symbol: "$".to_string(),
            end_boundary: EndBoundary::default(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub dir: String,
    /// Used when `RUST_LOG` is not set
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: "logs".to_string(),
            filter: "info".to_string(),
        }
    }
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
host = "127.0.0.1"
port = 3000

[dataset]
path = "data/ecommerce_data.csv"
"#;

/// Configuration together with where it came from
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    /// File the config was read from, None for the embedded default
    pub source: Option<PathBuf>,
}

impl LoadedConfig {
    pub fn dataset_path(&self) -> PathBuf {
        resolve_path(&working_dir(), &self.config.dataset.path)
    }

    pub fn log_dir(&self) -> PathBuf {
        resolve_path(&working_dir(), &self.config.logging.dir)
    }

    pub fn static_dir(&self) -> Option<PathBuf> {
        self.config
            .server
            .static_dir
            .as_deref()
            .map(|dir| resolve_path(&working_dir(), dir))
    }
}

/// Relative paths in the config are relative to the working directory, not
/// to the config file (build.rs places a copy next to the binary).
fn working_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_default()
}

/// Load configuration from config.toml
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Current working directory
/// 3. Falls back to embedded default config
///
/// Runs before tracing is set up, so nothing is logged here.
pub fn load_config() -> anyhow::Result<LoadedConfig> {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));
    let candidates = exe_dir
        .into_iter()
        .chain(std::env::current_dir().ok())
        .map(|dir| dir.join("config.toml"));

    for config_path in candidates {
        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            let config = parse_config(&contents)?;
            return Ok(LoadedConfig {
                config,
                source: Some(config_path),
            });
        }
    }

    Ok(LoadedConfig {
        config: parse_config(DEFAULT_CONFIG)?,
        source: None,
    })
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let config: Config = toml::from_str(contents)?;
    if config.dashboard.top_n == 0 {
        anyhow::bail!("dashboard.top_n must be at least 1");
    }
    Ok(config)
}

/// Absolute paths are used as is, relative ones are joined to `base`
fn resolve_path(base: &Path, path: &str) -> PathBuf {
    let path = Path::new(path);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.dataset.path, "data/ecommerce_data.csv");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.dashboard, DashboardConfig::default());
        assert_eq!(config.logging.dir, "logs");
    }

    #[test]
    fn test_dashboard_section_overrides() {
        let config = parse_config(
            r#"
            [server]
            host = "0.0.0.0"
            port = 8080
            static_dir = "dist"

            [dataset]
            path = "/srv/data/sales.csv"

            [dashboard]
            top_n = 5
            end_boundary = "start_of_day"
            "#,
        )
        .unwrap();

        assert_eq!(config.dashboard.top_n, 5);
        assert_eq!(config.dashboard.currency_symbol, "$");
        assert_eq!(config.dashboard.end_boundary, EndBoundary::StartOfDay);
        assert_eq!(config.server.static_dir.as_deref(), Some("dist"));
    }

    #[test]
    fn test_zero_top_n_rejected() {
        let result = parse_config(
            r#"
            [server]
            host = "127.0.0.1"
            port = 3000
            [dataset]
            path = "data.csv"
            [dashboard]
            top_n = 0
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_path_resolution() {
        let base = Path::new("/opt/dashboard");
        assert_eq!(
            resolve_path(base, "data/ecommerce_data.csv"),
            PathBuf::from("/opt/dashboard/data/ecommerce_data.csv")
        );
        assert_eq!(
            resolve_path(base, "/srv/sales.csv"),
            PathBuf::from("/srv/sales.csv")
        );

        let loaded = LoadedConfig {
            config: parse_config(DEFAULT_CONFIG).unwrap(),
            source: None,
        };
        assert!(loaded.dataset_path().ends_with("data/ecommerce_data.csv"));
        assert_eq!(loaded.static_dir(), None);
    }
}
