//! Checkout module.
//!
//! Contact form validation, order snapshots and the submit/confirm flow.

mod contact;
mod deferred;
mod flow;
mod order;

pub use contact::{is_valid_email, ContactField, ContactForm, FieldError, ValidContact, ValidationErrors};
pub use deferred::DeferredClear;
pub use flow::{quota_resume_date, CheckoutError, CheckoutFlow, CheckoutOutcome, CheckoutState};
pub use order::OrderSubmission;
