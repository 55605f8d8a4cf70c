use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReconError {
    #[error("Failed to read {source_name} log '{path}': {source}")]
    SourceReadError {
        source_name: String,
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write report '{path}': {source}")]
    ReportWriteError {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Spreadsheet error: {0}")]
    XlsxError(#[from] rust_xlsxwriter::XlsxError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid pattern '{pattern}': {source}")]
    PatternError {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    SourceRead,
    ReportWrite,
    Processing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ReconError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ReconError::SourceReadError { .. } => ErrorCategory::SourceRead,
            ReconError::ReportWriteError { .. } | ReconError::XlsxError(_) => {
                ErrorCategory::ReportWrite
            }
            ReconError::IoError(_) | ReconError::CsvError(_) | ReconError::SerializationError(_) => {
                ErrorCategory::Processing
            }
            ReconError::PatternError { .. }
            | ReconError::ConfigError { .. }
            | ReconError::ConfigValidationError { .. }
            | ReconError::InvalidConfigValueError { .. }
            | ReconError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::SourceRead => ErrorSeverity::High,
            ErrorCategory::ReportWrite => ErrorSeverity::Critical,
            ErrorCategory::Processing => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => "檢查設定檔或命令列參數是否正確",
            ErrorCategory::SourceRead => "確認 log 檔案路徑存在且有讀取權限",
            ErrorCategory::ReportWrite => "確認報表輸出目錄存在且有寫入權限",
            ErrorCategory::Processing => "請使用 --verbose 重新執行以取得更多資訊",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ReconError::SourceReadError {
                source_name, path, ..
            } => format!("無法讀取 {} log: {}", source_name, path),
            ReconError::ReportWriteError { path, .. } => format!("無法寫入報表: {}", path),
            ReconError::MissingConfigError { field } => format!("缺少必要設定: {}", field),
            other => other.to_string(),
        }
    }

    pub(crate) fn report_write(
        path: &str,
        cause: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        ReconError::ReportWriteError {
            path: path.to_string(),
            source: cause.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReconError>;
