//! Checkout flow state machine.
//!
//! ```text
//! Idle ──begin──▶ Submitting ──finish──▶ Confirmed ──run_due──▶ Idle
//!                                   ├──▶ QuotaPaused
//!                                   └──▶ Failed ──begin──▶ Submitting
//! ```
//!
//! The flow never owns the cart. `begin` reads it, and only `run_due` clears
//! it once the post-confirmation delay has passed.

use std::time::Instant;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use thiserror::Error;
use tracing::instrument;

use crate::cart::CartStore;
use crate::checkout::{ContactForm, DeferredClear, OrderSubmission, ValidationErrors};
use crate::config::{CheckoutConfig, StoreConfig, StorefrontConfig};
use crate::delivery::{DeliveryError, DeliveryReceipt, DeliveryService, OrderEmail};

/// Reasons a checkout attempt is refused before anything is sent.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("An order is already being submitted")]
    SubmissionInFlight,

    #[error("This order was already sent; the cart is about to be cleared")]
    AlreadyConfirmed,

    #[error("Orders are paused until {}", format_resume_date(.resume_on))]
    OrdersPaused { resume_on: NaiveDate },

    #[error("Your cart is empty")]
    EmptyCart,

    #[error("{0}")]
    Invalid(ValidationErrors),
}

/// Where the checkout currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutState {
    Idle,
    Submitting {
        reference: String,
    },
    /// Order sent; the cart clears at `clear_due_at`.
    Confirmed {
        reference: String,
        clear_due_at: Instant,
    },
    /// The email provider's monthly allowance is exhausted.
    QuotaPaused {
        resume_on: NaiveDate,
    },
    /// Delivery failed; the customer may retry.
    Failed {
        message: String,
    },
}

/// Result of one delivery attempt, as shown to the customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    Confirmed { reference: String },
    QuotaExceeded { resume_on: NaiveDate },
    Failed { message: String },
}

impl CheckoutOutcome {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, CheckoutOutcome::Confirmed { .. })
    }

    pub fn message(&self) -> String {
        match self {
            CheckoutOutcome::Confirmed { reference } => {
                format!("Order {reference} sent! We will get back to you soon.")
            }
            CheckoutOutcome::QuotaExceeded { resume_on } => format!(
                "We have reached our order limit for this month. Orders will resume on {}.",
                format_resume_date(resume_on)
            ),
            CheckoutOutcome::Failed { message } => message.clone(),
        }
    }
}

/// Drives one session's checkout.
#[derive(Debug, Clone)]
pub struct CheckoutFlow {
    store: StoreConfig,
    settings: CheckoutConfig,
    state: CheckoutState,
    modal_open: bool,
    pending_clear: Option<DeferredClear>,
}

impl Default for CheckoutFlow {
    fn default() -> Self {
        Self::new(StoreConfig::default(), CheckoutConfig::default())
    }
}

impl CheckoutFlow {
    pub fn new(store: StoreConfig, settings: CheckoutConfig) -> Self {
        Self {
            store,
            settings,
            state: CheckoutState::Idle,
            modal_open: false,
            pending_clear: None,
        }
    }

    pub fn from_config(config: &StorefrontConfig) -> Self {
        Self::new(config.store.clone(), config.checkout.clone())
    }

    pub fn state(&self) -> &CheckoutState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        self.modal_open
    }

    /// Show the contact modal.
    pub fn open(&mut self) {
        self.modal_open = true;
    }

    /// Hide the contact modal. Refused while an order is in flight.
    pub fn dismiss(&mut self) -> Result<(), CheckoutError> {
        if self.is_submitting() {
            return Err(CheckoutError::SubmissionInFlight);
        }
        self.modal_open = false;
        if matches!(self.state, CheckoutState::Failed { .. }) {
            self.state = CheckoutState::Idle;
        }
        Ok(())
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.state, CheckoutState::Submitting { .. })
    }

    /// Whether the submit action should be enabled today.
    pub fn can_submit(&self) -> bool {
        self.can_submit_on(Utc::now().date_naive())
    }

    /// Whether the submit action should be enabled on `today`.
    ///
    /// Agrees with `begin`: a quota pause holds until `resume_on`.
    pub fn can_submit_on(&self, today: NaiveDate) -> bool {
        let paused = matches!(
            self.state,
            CheckoutState::QuotaPaused { resume_on } if today < resume_on
        );
        !self.is_submitting() && self.pending_clear.is_none() && !paused
    }

    /// Validate and snapshot the order, entering `Submitting`.
    ///
    /// The cart is only read. On error the state is unchanged.
    pub fn begin(
        &mut self,
        cart: &CartStore,
        form: &ContactForm,
        placed_at: DateTime<Utc>,
    ) -> Result<OrderSubmission, CheckoutError> {
        match &self.state {
            CheckoutState::Submitting { .. } => return Err(CheckoutError::SubmissionInFlight),
            CheckoutState::QuotaPaused { resume_on } if placed_at.date_naive() < *resume_on => {
                return Err(CheckoutError::OrdersPaused {
                    resume_on: *resume_on,
                })
            }
            _ => {}
        }
        if self.pending_clear.is_some() {
            return Err(CheckoutError::AlreadyConfirmed);
        }
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        let contact = form.validate().map_err(CheckoutError::Invalid)?;

        let submission = OrderSubmission::new(cart, contact, placed_at);
        tracing::info!(
            order = %submission.reference,
            items = submission.item_count(),
            total = %submission.total,
            "submitting order"
        );
        self.state = CheckoutState::Submitting {
            reference: submission.reference.clone(),
        };
        Ok(submission)
    }

    /// Apply the delivery result for a submission started with `begin`.
    pub fn finish(
        &mut self,
        submission: &OrderSubmission,
        result: Result<DeliveryReceipt, DeliveryError>,
        now: Instant,
    ) -> CheckoutOutcome {
        if !self.is_submitting() {
            tracing::warn!(order = %submission.reference, "finish called with no submission in flight");
        }

        match result {
            Ok(receipt) => {
                let clear = DeferredClear::after(now, self.settings.success_clear_delay());
                tracing::info!(order = %submission.reference, status = receipt.status, "order confirmed");
                self.pending_clear = Some(clear);
                self.state = CheckoutState::Confirmed {
                    reference: submission.reference.clone(),
                    clear_due_at: clear.due_at(),
                };
                CheckoutOutcome::Confirmed {
                    reference: submission.reference.clone(),
                }
            }
            Err(err @ DeliveryError::QuotaExceeded { .. }) => {
                let resume_on = quota_resume_date(
                    submission.placed_at.date_naive(),
                    self.settings.quota_resume_day,
                );
                tracing::warn!(
                    order = %submission.reference,
                    detail = err.detail(),
                    %resume_on,
                    "email quota exhausted"
                );
                self.state = CheckoutState::QuotaPaused { resume_on };
                CheckoutOutcome::QuotaExceeded { resume_on }
            }
            Err(err) => {
                tracing::error!(order = %submission.reference, error = %err, "order email failed");
                let message = format!("{err} Please try again or contact us directly.");
                self.state = CheckoutState::Failed {
                    message: message.clone(),
                };
                CheckoutOutcome::Failed { message }
            }
        }
    }

    /// `begin`, deliver, `finish`, stamped with the current time.
    pub async fn submit(
        &mut self,
        cart: &CartStore,
        form: &ContactForm,
        delivery: &dyn DeliveryService,
    ) -> Result<CheckoutOutcome, CheckoutError> {
        self.submit_at(cart, form, delivery, Utc::now()).await
    }

    #[instrument(skip_all, fields(items = cart.total_items()))]
    pub async fn submit_at(
        &mut self,
        cart: &CartStore,
        form: &ContactForm,
        delivery: &dyn DeliveryService,
        placed_at: DateTime<Utc>,
    ) -> Result<CheckoutOutcome, CheckoutError> {
        let submission = self.begin(cart, form, placed_at)?;
        let email = OrderEmail::from_submission(&submission, &self.store);
        let result = delivery.deliver(&email).await;
        Ok(self.finish(&submission, result, Instant::now()))
    }

    /// Run the post-confirmation clear if it is due.
    ///
    /// Returns true exactly once per confirmed order.
    pub fn run_due(&mut self, cart: &mut CartStore, form: &mut ContactForm, now: Instant) -> bool {
        match self.pending_clear {
            Some(clear) if clear.is_due(now) => {
                self.pending_clear = None;
                cart.clear();
                form.reset();
                self.state = CheckoutState::Idle;
                self.modal_open = false;
                tracing::debug!("cart cleared after confirmed order");
                true
            }
            _ => false,
        }
    }

    /// Drop a scheduled clear, e.g. when the customer leaves the page.
    pub fn cancel_pending(&mut self) -> bool {
        let cancelled = self.pending_clear.take().is_some();
        if cancelled {
            self.state = CheckoutState::Idle;
            self.modal_open = false;
        }
        cancelled
    }

    pub fn clear_due_at(&self) -> Option<Instant> {
        self.pending_clear.map(|c| c.due_at())
    }
}

/// Day `day` of the month after `placed_on`.
pub fn quota_resume_date(placed_on: NaiveDate, day: u32) -> NaiveDate {
    let (year, month) = match placed_on.month() {
        12 => (placed_on.year() + 1, 1),
        m => (placed_on.year(), m + 1),
    };
    NaiveDate::from_ymd_opt(year, month, day.clamp(1, 28)).unwrap_or(placed_on)
}

fn format_resume_date(date: &NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}
