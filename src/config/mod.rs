pub mod local;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_file_extension, validate_non_empty_string, validate_path, validate_pattern,
};

pub const DEFAULT_SPLIT_PATTERN: &str = r"\|";
pub const DEFAULT_OUTPUT_PATH: &str = "log_comparison.xlsx";

/// 所有設定來源共用的檢查
pub fn validate_recon_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<()> {
    validate_path("cloud_file_path", config.cloud_file_path())?;
    validate_path("mainframe_file_path", config.mainframe_file_path())?;
    validate_non_empty_string("cloud_filter_pattern", config.cloud_filter_pattern())?;
    validate_pattern("cloud_split_pattern", config.cloud_split_pattern())?;
    validate_path("report_output_path", config.report_output_path())?;

    let format = config.report_format();
    validate_file_extension(
        "report_output_path",
        config.report_output_path(),
        &[format.extension()],
    )?;

    // 空字串前綴代表接受所有第 12 欄
    if config.mainframe_filter_column().is_empty() {
        tracing::warn!("mainframe_filter_column is empty, every 12th field will be accepted");
    }

    Ok(())
}

#[cfg(feature = "cli")]
mod cli {
    use super::*;
    use crate::core::ReportFormat;
    use crate::utils::validation::Validate;
    use clap::Parser;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize, Deserialize, Parser)]
    #[command(name = "log-recon")]
    #[command(about = "Reconcile cloud and mainframe transaction logs")]
    pub struct CliConfig {
        /// Path to the cloud log
        #[arg(long)]
        pub cloud_file_path: String,

        /// Path to the pipe-delimited mainframe log
        #[arg(long)]
        pub mainframe_file_path: String,

        /// Substring required in a cloud line, also bounds the identifier
        #[arg(long)]
        pub cloud_filter_pattern: String,

        /// Regular expression splitting a cloud line into fields
        #[arg(long, default_value = DEFAULT_SPLIT_PATTERN)]
        pub cloud_split_pattern: String,

        /// Required prefix of the mainframe identifier field
        #[arg(long)]
        pub mainframe_filter_column: String,

        #[arg(long, default_value = DEFAULT_OUTPUT_PATH)]
        pub excel_output_path: String,

        #[arg(long, value_enum, default_value_t = ReportFormat::Xlsx)]
        pub format: ReportFormat,

        #[arg(long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Log CPU and memory usage per phase")]
        pub monitor: bool,

        #[arg(long, help = "Print the summary as JSON")]
        pub json: bool,
    }

    impl ConfigProvider for CliConfig {
        fn cloud_file_path(&self) -> &str {
            &self.cloud_file_path
        }

        fn mainframe_file_path(&self) -> &str {
            &self.mainframe_file_path
        }

        fn cloud_filter_pattern(&self) -> &str {
            &self.cloud_filter_pattern
        }

        fn cloud_split_pattern(&self) -> &str {
            &self.cloud_split_pattern
        }

        fn mainframe_filter_column(&self) -> &str {
            &self.mainframe_filter_column
        }

        fn report_output_path(&self) -> &str {
            &self.excel_output_path
        }

        fn report_format(&self) -> ReportFormat {
            self.format
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validate_recon_config(self)
        }
    }

}

#[cfg(feature = "cli")]
pub use cli::CliConfig;
