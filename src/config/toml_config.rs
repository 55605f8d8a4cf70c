use crate::config::{validate_recon_config, DEFAULT_SPLIT_PATTERN};
use crate::core::report::DEFAULT_SHEET_NAME;
use crate::core::{ConfigProvider, ReportFormat};
use crate::utils::error::{ReconError, Result};
use crate::utils::validation::{validate_non_empty_string, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub sources: SourcesConfig,
    pub cloud: CloudConfig,
    pub mainframe: MainframeConfig,
    pub report: ReportConfig,
    pub monitoring: Option<MonitoringConfig>,
    pub server: Option<ServerConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    pub cloud_file_path: String,
    pub mainframe_file_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloudConfig {
    pub filter_pattern: String,
    pub split_pattern: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MainframeConfig {
    pub filter_column: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    pub output_path: String,
    pub format: Option<ReportFormat>,
    pub sheet_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind_address: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ReconError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ReconError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${LOG_DIR})，未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ReconError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    pub fn sheet_name(&self) -> &str {
        self.report.sheet_name.as_deref().unwrap_or(DEFAULT_SHEET_NAME)
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    pub fn bind_address(&self) -> &str {
        self.server
            .as_ref()
            .and_then(|s| s.bind_address.as_deref())
            .unwrap_or(DEFAULT_BIND_ADDRESS)
    }
}

impl ConfigProvider for TomlConfig {
    fn cloud_file_path(&self) -> &str {
        &self.sources.cloud_file_path
    }

    fn mainframe_file_path(&self) -> &str {
        &self.sources.mainframe_file_path
    }

    fn cloud_filter_pattern(&self) -> &str {
        &self.cloud.filter_pattern
    }

    fn cloud_split_pattern(&self) -> &str {
        self.cloud
            .split_pattern
            .as_deref()
            .unwrap_or(DEFAULT_SPLIT_PATTERN)
    }

    fn mainframe_filter_column(&self) -> &str {
        &self.mainframe.filter_column
    }

    fn report_output_path(&self) -> &str {
        &self.report.output_path
    }

    fn report_format(&self) -> ReportFormat {
        self.report.format.unwrap_or_default()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_recon_config(self)?;
        validate_non_empty_string("report.sheet_name", self.sheet_name())?;
        if let Some(server) = &self.server {
            if let Some(addr) = &server.bind_address {
                addr.parse::<std::net::SocketAddr>().map_err(|e| {
                    ReconError::InvalidConfigValueError {
                        field: "server.bind_address".to_string(),
                        value: addr.clone(),
                        reason: e.to_string(),
                    }
                })?;
            }
        }
        Ok(())
    }
}
