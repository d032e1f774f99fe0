//! Panel configuration from the environment.

use content_admin_client::ApiClientConfig;
use content_admin_core::CompanyId;
use content_admin_observability::{LogFormat, UnknownLogFormat};
use content_admin_products::DEFAULT_PAGE_SIZE;
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "http://www.braincoach.kr";
pub const DEFAULT_COMPANY_ID: &str = "89d2e726-383e-448d-ba26-70fb7f77c6c3";
pub const DEFAULT_UPLOAD_COMPANY_ID: &str = "HaneulM";

pub const ENV_API_URL: &str = "CONTENT_ADMIN_API_URL";
pub const ENV_TOKEN: &str = "CONTENT_ADMIN_TOKEN";
pub const ENV_COMPANY_ID: &str = "CONTENT_ADMIN_COMPANY_ID";
pub const ENV_UPLOAD_COMPANY_ID: &str = "CONTENT_ADMIN_UPLOAD_COMPANY_ID";
pub const ENV_IMAGE_BASE_URL: &str = "CONTENT_ADMIN_IMAGE_BASE_URL";
pub const ENV_PAGE_SIZE: &str = "CONTENT_ADMIN_PAGE_SIZE";
pub const ENV_LOG_FORMAT: &str = "CONTENT_ADMIN_LOG_FORMAT";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a positive integer, got `{value}`")]
    InvalidNumber { var: &'static str, value: String },

    #[error("{var} must be an http(s) URL, got `{value}`")]
    InvalidUrl { var: &'static str, value: String },

    #[error("{var}: {source}")]
    InvalidLogFormat {
        var: &'static str,
        #[source]
        source: UnknownLogFormat,
    },
}

/// Everything the panel needs to reach the API and file new records.
#[derive(Clone, PartialEq, Eq)]
pub struct PanelConfig {
    pub api_url: String,
    pub token: Option<String>,
    /// Owner written into created records.
    pub company_id: CompanyId,
    /// Passed as `companyId` on image uploads.
    pub upload_company_id: CompanyId,
    pub image_base_url: String,
    pub page_size: usize,
    pub log_format: LogFormat,
}

impl core::fmt::Debug for PanelConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PanelConfig")
            .field("api_url", &self.api_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("company_id", &self.company_id)
            .field("upload_company_id", &self.upload_company_id)
            .field("image_base_url", &self.image_base_url)
            .field("page_size", &self.page_size)
            .field("log_format", &self.log_format)
            .finish()
    }
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: None,
            company_id: CompanyId::from_raw(DEFAULT_COMPANY_ID),
            upload_company_id: CompanyId::from_raw(DEFAULT_UPLOAD_COMPANY_ID),
            image_base_url: DEFAULT_API_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            log_format: LogFormat::default(),
        }
    }
}

impl PanelConfig {
    /// Read the process environment. Loading `.env` is the caller's job.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_url = match get(ENV_API_URL) {
            Some(url) => validate_url(ENV_API_URL, url)?,
            None => DEFAULT_API_URL.to_string(),
        };

        let image_base_url = match get(ENV_IMAGE_BASE_URL) {
            Some(url) => validate_url(ENV_IMAGE_BASE_URL, url)?,
            None => api_url.clone(),
        };

        let page_size = match get(ENV_PAGE_SIZE) {
            Some(raw) => match raw.parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::InvalidNumber {
                        var: ENV_PAGE_SIZE,
                        value: raw,
                    });
                }
            },
            None => DEFAULT_PAGE_SIZE,
        };

        let log_format = match get(ENV_LOG_FORMAT) {
            Some(raw) => raw
                .parse()
                .map_err(|source| ConfigError::InvalidLogFormat {
                    var: ENV_LOG_FORMAT,
                    source,
                })?,
            None => LogFormat::default(),
        };

        Ok(Self {
            api_url,
            token: get(ENV_TOKEN),
            company_id: CompanyId::from_raw(
                get(ENV_COMPANY_ID).unwrap_or_else(|| DEFAULT_COMPANY_ID.to_string()),
            ),
            upload_company_id: CompanyId::from_raw(
                get(ENV_UPLOAD_COMPANY_ID).unwrap_or_else(|| DEFAULT_UPLOAD_COMPANY_ID.to_string()),
            ),
            image_base_url,
            page_size,
            log_format,
        })
    }

    pub fn api_client_config(&self) -> ApiClientConfig {
        ApiClientConfig {
            base_url: self.api_url.clone(),
            upload_company_id: self.upload_company_id.clone(),
        }
    }
}

fn validate_url(var: &'static str, value: String) -> Result<String, ConfigError> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(value.trim_end_matches('/').to_string())
    } else {
        Err(ConfigError::InvalidUrl { var, value })
    }
}
