//! Read-only description of how the panel is wired up.

use content_admin_auth::TokenStore;

use crate::config::PanelConfig;

/// What the panel can do, as listed on the settings screen.
pub const FEATURES: [&str; 5] = [
    "Paginated product list",
    "Product creation with image upload",
    "Product editing and deletion",
    "Form validation and error handling",
    "Bearer token authentication",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsView {
    pub api_base_url: String,
    pub image_base_url: String,
    pub upload_company_id: String,
    pub page_size: usize,
    pub bearer_auth: bool,
}

impl SettingsView {
    pub fn new(config: &PanelConfig, tokens: &dyn TokenStore) -> Self {
        Self {
            api_base_url: config.api_url.clone(),
            image_base_url: config.image_base_url.clone(),
            upload_company_id: config.upload_company_id.to_string(),
            page_size: config.page_size,
            bearer_auth: tokens.is_authenticated(),
        }
    }

    pub fn auth_description(&self) -> &'static str {
        if self.bearer_auth {
            "Bearer token authentication is enabled for all API requests."
        } else {
            "No bearer token is configured; API requests are sent anonymously."
        }
    }

    pub fn features(&self) -> &'static [&'static str] {
        &FEATURES
    }
}
