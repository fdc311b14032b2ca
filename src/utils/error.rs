use thiserror::Error;

#[derive(Error, Debug)]
pub enum AirfareError {
    /// 價格供應商回傳非成功狀態碼
    #[error("API Error {status}: {body}")]
    Fetch { status: u16, body: String },

    /// 正規化後沒有任何有效的 (日期, 價格) 資料
    #[error("No valid data returned by API.")]
    NoData,

    #[error("API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfig { field: String },

    #[error("Validation error: {message}")]
    Validation { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Provider,
    Data,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl AirfareError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AirfareError::Fetch { .. } | AirfareError::Transport(_) => ErrorCategory::Provider,
            AirfareError::NoData
            | AirfareError::Csv(_)
            | AirfareError::Serialization(_)
            | AirfareError::Validation { .. } => ErrorCategory::Data,
            AirfareError::Config { .. }
            | AirfareError::ConfigValidation { .. }
            | AirfareError::InvalidConfigValue { .. }
            | AirfareError::MissingConfig { .. } => ErrorCategory::Configuration,
            AirfareError::Io(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 供應商暫時性錯誤，使用者可以稍後再試
            AirfareError::Fetch { status, .. } if *status >= 500 => ErrorSeverity::Medium,
            AirfareError::Transport(_) => ErrorSeverity::Medium,
            AirfareError::Io(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            AirfareError::Fetch { status, .. } => {
                format!("The pricing provider rejected the request (HTTP {})", status)
            }
            AirfareError::NoData => "No prices are available for this route".to_string(),
            AirfareError::Transport(_) => "Could not reach the pricing provider".to_string(),
            AirfareError::Io(e) => format!("File system error: {}", e),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Provider => match self {
                AirfareError::Fetch { status: 401 | 403, .. } => {
                    "Check that the provider token is valid (TRAVELPAYOUTS_TOKEN)"
                }
                _ => "Retry later or check network connectivity to the provider endpoint",
            },
            ErrorCategory::Data => "Try a different origin/destination pair",
            ErrorCategory::Configuration => "Review the TOML configuration file and environment variables",
            ErrorCategory::System => "Check file permissions and available disk space",
        }
    }
}

pub type Result<T> = std::result::Result<T, AirfareError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_display_carries_status_and_body() {
        let err = AirfareError::Fetch {
            status: 503,
            body: "Service Unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "API Error 503: Service Unavailable");
        assert_eq!(err.category(), ErrorCategory::Provider);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
    }

    #[test]
    fn test_no_data_display() {
        let err = AirfareError::NoData;
        assert_eq!(err.to_string(), "No valid data returned by API.");
        assert_eq!(err.category(), ErrorCategory::Data);
        assert_eq!(err.severity(), ErrorSeverity::High);
    }

    #[test]
    fn test_unauthorized_suggests_token() {
        let err = AirfareError::Fetch {
            status: 401,
            body: String::new(),
        };
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.recovery_suggestion().contains("token"));
    }

    #[test]
    fn test_config_errors_are_configuration_category() {
        let err = AirfareError::MissingConfig {
            field: "provider.token".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert!(err.user_friendly_message().contains("provider.token"));
    }
}
