use crate::core::ConfigProvider;
use crate::domain::model::{Airport, Route};
use crate::utils::error::{AirfareError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

pub const DEFAULT_ENDPOINT: &str = "https://api.travelpayouts.com/v1/prices/monthly";
pub const DEFAULT_CURRENCY: &str = "AUD";
pub const VALID_OUTPUT_FORMATS: [&str; 3] = ["csv", "tsv", "json"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub route: RouteConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default = "default_airports")]
    pub airports: Vec<Airport>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub endpoint: Option<String>,
    pub token: Option<String>,
    pub currency: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouteConfig {
    pub default_origin: Option<String>,
    pub default_destination: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    pub addr: Option<SocketAddr>,
    pub request_timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: Option<String>,
    pub formats: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
}

fn default_airports() -> Vec<Airport> {
    [
        ("SYD", "Sydney"),
        ("MEL", "Melbourne"),
        ("BNE", "Brisbane"),
        ("PER", "Perth"),
        ("ADL", "Adelaide"),
        ("OOL", "Gold Coast"),
        ("CBR", "Canberra"),
        ("HBA", "Hobart"),
        ("CNS", "Cairns"),
        ("DRW", "Darwin"),
    ]
    .into_iter()
    .map(|(code, name)| Airport {
        code: code.to_string(),
        name: name.to_string(),
    })
    .collect()
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            provider: ProviderConfig::default(),
            route: RouteConfig::default(),
            server: ServerConfig::default(),
            output: OutputConfig::default(),
            logging: LoggingConfig::default(),
            airports: default_airports(),
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AirfareError::Io)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| AirfareError::ConfigValidation {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${TRAVELPAYOUTS_TOKEN})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| AirfareError::Config {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.provider.token = Some(token.into());
        self
    }

    pub fn with_output_path(mut self, path: impl Into<String>) -> Self {
        self.output.path = Some(path.into());
        self
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("provider.endpoint", self.api_endpoint())?;

        let token = validation::validate_required_field("provider.token", &self.provider.token)?;
        validation::validate_non_empty_string("provider.token", token)?;
        if token.starts_with("${") {
            // 環境變數沒有設定，替換後仍是原字串
            return Err(AirfareError::MissingConfig {
                field: format!("provider.token ({})", token),
            });
        }

        validation::validate_non_empty_string("provider.currency", self.currency())?;
        validation::validate_positive_number("provider.timeout_seconds", self.timeout_seconds(), 1)?;
        validation::validate_positive_number(
            "server.request_timeout_seconds",
            self.request_timeout_seconds(),
            1,
        )?;

        validation::validate_path("output.path", self.output_path())?;
        validation::validate_allowed_values(
            "output.formats",
            self.output_formats(),
            &VALID_OUTPUT_FORMATS,
        )?;

        let route = self.default_route();
        validation::validate_non_empty_string("route.default_origin", &route.origin)?;
        validation::validate_non_empty_string("route.default_destination", &route.destination)?;

        if self.airports.is_empty() {
            return Err(AirfareError::ConfigValidation {
                field: "airports".to_string(),
                message: "at least one airport is required".to_string(),
            });
        }
        for airport in &self.airports {
            validation::validate_non_empty_string("airports.code", &airport.code)?;
        }

        Ok(())
    }

    pub fn default_route(&self) -> Route {
        Route::new(
            self.route.default_origin.as_deref().unwrap_or("SYD"),
            self.route.default_destination.as_deref().unwrap_or("MEL"),
        )
    }

    pub fn server_addr(&self) -> SocketAddr {
        self.server
            .addr
            .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 5000)))
    }

    pub fn request_timeout_seconds(&self) -> u64 {
        self.server.request_timeout_seconds.unwrap_or(60)
    }

    pub fn log_format(&self) -> LogFormat {
        self.logging.format
    }

    pub fn airports(&self) -> &[Airport] {
        &self.airports
    }
}

impl ConfigProvider for TomlConfig {
    fn api_endpoint(&self) -> &str {
        self.provider.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT)
    }

    fn api_token(&self) -> &str {
        self.provider.token.as_deref().unwrap_or_default()
    }

    fn currency(&self) -> &str {
        self.provider.currency.as_deref().unwrap_or(DEFAULT_CURRENCY)
    }

    fn timeout_seconds(&self) -> u64 {
        self.provider.timeout_seconds.unwrap_or(30)
    }

    fn output_path(&self) -> &str {
        self.output.path.as_deref().unwrap_or("./output")
    }

    fn output_formats(&self) -> &[String] {
        static DEFAULT_FORMATS: std::sync::OnceLock<Vec<String>> = std::sync::OnceLock::new();
        match &self.output.formats {
            Some(formats) => formats,
            None => DEFAULT_FORMATS.get_or_init(|| vec!["csv".to_string(), "json".to_string()]),
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
