//! Order email delivery.
//!
//! Checkout hands a rendered [`OrderEmail`] to a [`DeliveryService`]. The
//! production implementation is [`EmailJsClient`]; [`DryRunDelivery`] records
//! emails without sending them.

mod classify;
mod dry_run;
mod email;
mod emailjs;

pub use classify::classify_failure;
pub use dry_run::DryRunDelivery;
pub use email::OrderEmail;
pub use emailjs::{EmailJsClient, DEFAULT_ENDPOINT};

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// Successful hand-off to the email provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryReceipt {
    /// HTTP status returned by the provider.
    pub status: u16,
    /// Response body, usually `OK`.
    pub body: String,
}

/// Coarse failure category used by checkout to pick a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryErrorKind {
    QuotaExceeded,
    Generic,
}

/// Errors returned by a [`DeliveryService`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DeliveryError {
    /// The provider's monthly send allowance is used up.
    #[error("Monthly email limit reached ({detail})")]
    QuotaExceeded { detail: String },

    /// Anything else: bad config, network, server errors.
    #[error("Failed to send email. {detail}")]
    Failed { detail: String },
}

impl DeliveryError {
    pub fn kind(&self) -> DeliveryErrorKind {
        match self {
            DeliveryError::QuotaExceeded { .. } => DeliveryErrorKind::QuotaExceeded,
            DeliveryError::Failed { .. } => DeliveryErrorKind::Generic,
        }
    }

    pub fn detail(&self) -> &str {
        match self {
            DeliveryError::QuotaExceeded { detail } | DeliveryError::Failed { detail } => detail,
        }
    }

    pub(crate) fn failed(detail: impl Into<String>) -> Self {
        DeliveryError::Failed {
            detail: detail.into(),
        }
    }
}

/// Sends order emails.
#[async_trait]
pub trait DeliveryService: Send + Sync {
    /// Deliver one order email. Called once per submission; never retried.
    async fn deliver(&self, email: &OrderEmail) -> Result<DeliveryReceipt, DeliveryError>;
}

#[async_trait]
impl<T: DeliveryService + ?Sized> DeliveryService for std::sync::Arc<T> {
    async fn deliver(&self, email: &OrderEmail) -> Result<DeliveryReceipt, DeliveryError> {
        (**self).deliver(email).await
    }
}
