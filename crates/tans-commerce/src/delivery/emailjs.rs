//! EmailJS REST client.

use async_trait::async_trait;
use serde::Serialize;
use tracing::instrument;

use super::classify::{classify_failure, classify_transport};
use super::{DeliveryError, DeliveryReceipt, DeliveryService, OrderEmail};
use crate::config::EmailConfig;

/// EmailJS send endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";

#[derive(Clone)]
struct Credentials {
    service_id: String,
    template_id: String,
    public_key: String,
    private_key: Option<String>,
}

impl Credentials {
    fn from_config(config: &EmailConfig) -> Option<Self> {
        if !config.is_configured() {
            return None;
        }
        Some(Self {
            service_id: config.service_id.clone()?,
            template_id: config.template_id.clone()?,
            public_key: config.public_key.clone()?,
            private_key: config.private_key.clone().filter(|k| !k.trim().is_empty()),
        })
    }
}

#[derive(Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    #[serde(rename = "accessToken", skip_serializing_if = "Option::is_none")]
    access_token: Option<&'a str>,
    template_params: &'a OrderEmail,
}

/// Sends order emails through the EmailJS REST API.
///
/// EmailJS rejects server-side callers with a 403 until "API access from
/// non-browser environments" is enabled for the account. That refusal is
/// reported as a generic failure, not as quota.
#[derive(Clone)]
pub struct EmailJsClient {
    client: reqwest::Client,
    endpoint: String,
    credentials: Option<Credentials>,
}

impl EmailJsClient {
    /// Build a client from config.
    ///
    /// Missing keys are not an error here; [`deliver`](DeliveryService::deliver)
    /// reports them so checkout can show its usual failure message.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &EmailConfig) -> Result<Self, DeliveryError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| DeliveryError::failed(format!("Could not build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            credentials: Credentials::from_config(config),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.credentials.is_some()
    }
}

#[async_trait]
impl DeliveryService for EmailJsClient {
    #[instrument(skip_all, fields(order = %email.order_reference, endpoint = %self.endpoint))]
    async fn deliver(&self, email: &OrderEmail) -> Result<DeliveryReceipt, DeliveryError> {
        let Some(creds) = &self.credentials else {
            tracing::error!("EmailJS service, template or public key is missing");
            return Err(DeliveryError::failed(
                "EmailJS is not configured. Please check your environment variables.",
            ));
        };

        let body = SendRequest {
            service_id: &creds.service_id,
            template_id: &creds.template_id,
            user_id: &creds.public_key,
            access_token: creds.private_key.as_deref(),
            template_params: email,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| classify_transport(&e))?;

        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), body = %text, "EmailJS rejected the request");
            return Err(classify_failure(Some(status.as_u16()), &text));
        }

        tracing::info!(status = status.as_u16(), "order email sent");
        Ok(DeliveryReceipt {
            status: status.as_u16(),
            body: text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> EmailConfig {
        EmailConfig {
            service_id: Some("service_1".into()),
            template_id: Some("template_1".into()),
            public_key: Some("pk".into()),
            ..EmailConfig::default()
        }
    }

    #[test]
    fn test_configuration_detection() {
        assert!(!EmailJsClient::new(&EmailConfig::default()).unwrap().is_configured());
        assert!(EmailJsClient::new(&configured()).unwrap().is_configured());

        let mut blank = configured();
        blank.template_id = Some("  ".into());
        assert!(!EmailJsClient::new(&blank).unwrap().is_configured());
    }

    #[test]
    fn test_request_body_shape() {
        let email = OrderEmail {
            to_email: "orders@tansgallery.com".into(),
            reply_to: "a@b.co".into(),
            customer_name: "A".into(),
            customer_email: "a@b.co".into(),
            subject: "From TansGallery".into(),
            message: String::new(),
            html_message: String::new(),
            order_items: String::new(),
            total_price: "$1.00".into(),
            order_date: String::new(),
            order_reference: "ORD-1".into(),
            customization_message: "None".into(),
        };

        let body = SendRequest {
            service_id: "s",
            template_id: "t",
            user_id: "u",
            access_token: None,
            template_params: &email,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["user_id"], "u");
        assert!(json.get("accessToken").is_none());
        assert_eq!(json["template_params"]["total_price"], "$1.00");

        let body = SendRequest {
            access_token: Some("secret"),
            ..body
        };
        assert_eq!(serde_json::to_value(&body).unwrap()["accessToken"], "secret");
    }

    #[tokio::test]
    async fn test_unconfigured_client_fails_without_network() {
        let client = EmailJsClient::new(&EmailConfig::default()).unwrap();
        let email = OrderEmail {
            to_email: String::new(),
            reply_to: String::new(),
            customer_name: String::new(),
            customer_email: String::new(),
            subject: String::new(),
            message: String::new(),
            html_message: String::new(),
            order_items: String::new(),
            total_price: String::new(),
            order_date: String::new(),
            order_reference: "ORD-1".into(),
            customization_message: String::new(),
        };

        let err = client.deliver(&email).await.unwrap_err();
        assert_eq!(err.kind(), crate::delivery::DeliveryErrorKind::Generic);
        assert!(err.detail().contains("not configured"));
    }
}
