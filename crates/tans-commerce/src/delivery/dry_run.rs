use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use super::{DeliveryError, DeliveryReceipt, DeliveryService, OrderEmail};

/// Logs order emails instead of sending them, keeping a copy of each.
#[derive(Debug, Default)]
pub struct DryRunDelivery {
    outbox: Mutex<Vec<OrderEmail>>,
}

impl DryRunDelivery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emails "sent" so far, oldest first.
    pub fn sent(&self) -> Vec<OrderEmail> {
        self.outbox
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl DeliveryService for DryRunDelivery {
    async fn deliver(&self, email: &OrderEmail) -> Result<DeliveryReceipt, DeliveryError> {
        tracing::info!(
            order = %email.order_reference,
            to = %email.to_email,
            total = %email.total_price,
            "dry run: order email not sent"
        );
        tracing::debug!(message = %email.message);

        self.outbox
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(email.clone());

        Ok(DeliveryReceipt {
            status: 200,
            body: "dry-run".to_string(),
        })
    }
}
