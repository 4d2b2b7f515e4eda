//! Storefront configuration.
//!
//! Loaded from `tans.toml` (or a `.json` file), then overlaid with
//! `TANS_*` environment variables so EmailJS keys can stay out of the file.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::checkout::is_valid_email;
use crate::delivery::DEFAULT_ENDPOINT;
use crate::money::Currency;

/// Environment variables read by [`StorefrontConfig::apply_env`].
pub const ENV_SERVICE_ID: &str = "TANS_EMAILJS_SERVICE_ID";
pub const ENV_TEMPLATE_ID: &str = "TANS_EMAILJS_TEMPLATE_ID";
pub const ENV_PUBLIC_KEY: &str = "TANS_EMAILJS_PUBLIC_KEY";
pub const ENV_PRIVATE_KEY: &str = "TANS_EMAILJS_PRIVATE_KEY";
pub const ENV_RECIPIENT: &str = "TANS_RECIPIENT_EMAIL";

/// Errors loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    Parse { path: String, message: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StorefrontConfig {
    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub email: EmailConfig,

    #[serde(default)]
    pub checkout: CheckoutConfig,
}

impl StorefrontConfig {
    /// Load config from a file; JSON if the extension is `.json`, TOML otherwise.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: display.clone(),
            source,
        })?;

        let parsed = if path.extension().is_some_and(|e| e == "json") {
            serde_json::from_str(&content).map_err(|e| e.to_string())
        } else {
            toml::from_str(&content).map_err(|e| e.to_string())
        };

        parsed.map_err(|message| ConfigError::Parse {
            path: display,
            message,
        })
    }

    /// Overlay `TANS_*` environment variables.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    /// Overlay values from an arbitrary lookup. Empty values are ignored.
    pub fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get(ENV_SERVICE_ID) {
            self.email.service_id = Some(v);
        }
        if let Some(v) = get(ENV_TEMPLATE_ID) {
            self.email.template_id = Some(v);
        }
        if let Some(v) = get(ENV_PUBLIC_KEY) {
            self.email.public_key = Some(v);
        }
        if let Some(v) = get(ENV_PRIVATE_KEY) {
            self.email.private_key = Some(v);
        }
        if let Some(v) = get(ENV_RECIPIENT) {
            self.store.recipient_email = v;
        }
    }

    /// Check values that serde cannot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store.name.trim().is_empty() {
            return Err(ConfigError::Invalid("store.name must not be empty".into()));
        }
        if !is_valid_email(self.store.recipient_email.trim()) {
            return Err(ConfigError::Invalid(format!(
                "store.recipient_email is not a valid address: {:?}",
                self.store.recipient_email
            )));
        }
        if !(1..=28).contains(&self.checkout.quota_resume_day) {
            return Err(ConfigError::Invalid(format!(
                "checkout.quota_resume_day must be between 1 and 28, got {}",
                self.checkout.quota_resume_day
            )));
        }
        if !(self.email.endpoint.starts_with("https://") || self.email.endpoint.starts_with("http://")) {
            return Err(ConfigError::Invalid(format!(
                "email.endpoint must be an http(s) URL, got {:?}",
                self.email.endpoint
            )));
        }
        if self.email.timeout_secs == 0 {
            return Err(ConfigError::Invalid("email.timeout_secs must be positive".into()));
        }
        Ok(())
    }
}

/// Store identity and order routing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreConfig {
    /// Shop name used in the order email.
    #[serde(default = "default_store_name")]
    pub name: String,

    /// Where order emails are sent.
    #[serde(default = "default_recipient")]
    pub recipient_email: String,

    /// Order email subject.
    #[serde(default = "default_subject")]
    pub subject: String,

    #[serde(default)]
    pub currency: Currency,

    /// JSON product file; the built-in range is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<PathBuf>,
}

fn default_store_name() -> String {
    "TansGallery".to_string()
}

fn default_recipient() -> String {
    "orders@tansgallery.com".to_string()
}

fn default_subject() -> String {
    "From TansGallery".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            name: default_store_name(),
            recipient_email: default_recipient(),
            subject: default_subject(),
            currency: Currency::default(),
            catalog_path: None,
        }
    }
}

/// EmailJS credentials and transport settings.
#[derive(Clone, Serialize, Deserialize, PartialEq)]
pub struct EmailConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,

    /// EmailJS public key (sent as `user_id`). Read from config, never written back out.
    #[serde(default, skip_serializing)]
    pub public_key: Option<String>,

    /// Optional private key (sent as `accessToken`). Read from config, never written back out.
    #[serde(default, skip_serializing)]
    pub private_key: Option<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl EmailConfig {
    /// Service, template and public key are all present.
    pub fn is_configured(&self) -> bool {
        [&self.service_id, &self.template_id, &self.public_key]
            .iter()
            .all(|v| v.as_deref().is_some_and(|s| !s.trim().is_empty()))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            service_id: None,
            template_id: None,
            public_key: None,
            private_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailConfig")
            .field("endpoint", &self.endpoint)
            .field("service_id", &self.service_id)
            .field("template_id", &self.template_id)
            .field("public_key", &self.public_key.as_ref().map(|_| "<set>"))
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Checkout timing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckoutConfig {
    /// How long the success state shows before the cart is cleared.
    #[serde(default = "default_clear_delay_ms")]
    pub success_clear_delay_ms: u64,

    /// Day of next month on which orders resume after a quota error.
    #[serde(default = "default_quota_resume_day")]
    pub quota_resume_day: u32,
}

fn default_clear_delay_ms() -> u64 {
    3000
}

fn default_quota_resume_day() -> u32 {
    6
}

impl CheckoutConfig {
    pub fn success_clear_delay(&self) -> Duration {
        Duration::from_millis(self.success_clear_delay_ms)
    }
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            success_clear_delay_ms: default_clear_delay_ms(),
            quota_resume_day: default_quota_resume_day(),
        }
    }
}

/// Generate a starter `tans.toml`.
pub fn generate_default_config(store_name: &str) -> String {
    format!(
        r#"# TansGallery storefront configuration

[store]
name = "{store_name}"
recipient_email = "orders@tansgallery.com"
subject = "From {store_name}"
currency = "USD"
# catalog_path = "products.json"

[email]
endpoint = "{DEFAULT_ENDPOINT}"
# Keys may also come from {ENV_SERVICE_ID}, {ENV_TEMPLATE_ID},
# {ENV_PUBLIC_KEY} and {ENV_PRIVATE_KEY}.
# service_id = "service_xxx"
# template_id = "template_xxx"
# public_key = "xxxxxxxx"
timeout_secs = 10

[checkout]
success_clear_delay_ms = 3000
quota_resume_day = 6
"#
    )
}
