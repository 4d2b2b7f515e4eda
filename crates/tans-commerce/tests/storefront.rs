//! End-to-end storefront behavior through the public API.
//!
//! Delivery is replaced with in-process doubles; nothing here touches the network.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};
use tans_commerce::delivery::{classify_failure, DeliveryReceipt};
use tans_commerce::prelude::*;

/// Answers every send with a canned result and counts calls.
struct Scripted {
    status: Option<u16>,
    text: &'static str,
    calls: AtomicUsize,
}

impl Scripted {
    fn ok() -> Self {
        Self::replying(None, "OK")
    }

    fn replying(status: Option<u16>, text: &'static str) -> Self {
        Self {
            status,
            text,
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DeliveryService for Scripted {
    async fn deliver(&self, _email: &OrderEmail) -> Result<DeliveryReceipt, DeliveryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.status {
            None => Ok(DeliveryReceipt {
                status: 200,
                body: self.text.to_string(),
            }),
            Some(status) => Err(classify_failure(Some(status), self.text)),
        }
    }
}

fn filled_cart(catalog: &Catalog) -> CartStore {
    let mut cart = CartStore::new(Currency::USD);
    for id in [1, 2, 2, 5] {
        cart.add_item(catalog.require(ProductId::new(id)).unwrap());
    }
    cart
}

fn contact() -> ContactForm {
    ContactForm::new("Priya Shah", "priya@example.com", "Please add our initials")
}

fn placed_at() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap()
}

#[test]
fn cart_totals_follow_catalog_prices() {
    let catalog = Catalog::builtin();
    let cart = filled_cart(&catalog);

    assert_eq!(cart.line_count(), 3);
    assert_eq!(cart.total_items(), 4);

    let expected: i64 = [1, 2, 2, 5]
        .iter()
        .map(|id| catalog.get(ProductId::new(*id)).unwrap().price.amount_cents)
        .sum();
    assert_eq!(cart.total_price().amount_cents, expected);

    let pricing = cart.pricing();
    assert_eq!(pricing.grand_total, cart.total_price());
    assert_eq!(pricing.shipping_label(), "Free");
}

#[test]
fn quantity_controls_and_removal() {
    let catalog = Catalog::builtin();
    let mut cart = filled_cart(&catalog);
    let birthday = ProductId::new(2);

    assert!(cart.update_quantity(birthday, 5).unwrap());
    assert_eq!(cart.line(birthday).unwrap().quantity, 5);

    assert!(cart.update_quantity(birthday, 0).unwrap());
    assert!(!cart.contains(birthday));

    let wedding = ProductId::new(1);
    cart.decrement(wedding).unwrap();
    assert!(!cart.contains(wedding));

    assert!(cart.update_quantity(ProductId::new(5), i64::from(MAX_QUANTITY_PER_ITEM) + 1).is_err());
    assert_eq!(cart.total_items(), 1);
}

#[test]
fn subscribers_observe_mutations() {
    let catalog = Catalog::builtin();
    let mut cart = CartStore::default();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    cart.subscribe(move |event| sink.lock().unwrap().push(*event));

    let card = catalog.require(ProductId::new(3)).unwrap();
    cart.add_item(card);
    cart.remove_item(ProductId::new(99));
    cart.clear();

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    assert!(matches!(seen[0], CartEvent::ItemAdded { .. }));
    assert!(matches!(seen[1], CartEvent::Cleared));
}

#[test]
fn category_filter_narrows_catalog() {
    let catalog = Catalog::builtin();
    let all = catalog.filter(CategoryFilter::All);
    assert_eq!(all.len(), catalog.len());

    let weddings = catalog.filter("wedding".parse().unwrap());
    assert!(!weddings.is_empty());
    assert!(weddings.iter().all(|p| p.category == Category::Wedding));
}

#[tokio::test]
async fn successful_checkout_clears_cart_after_delay() {
    let catalog = Catalog::builtin();
    let mut cart = filled_cart(&catalog);
    let mut form = contact();
    let mut flow = CheckoutFlow::default();
    let delivery = DryRunDelivery::new();

    let outcome = flow
        .submit_at(&cart, &form, &delivery, placed_at())
        .await
        .unwrap();
    assert!(outcome.is_confirmed());

    let sent = delivery.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].customer_name, "Priya Shah");
    assert_eq!(sent[0].customization_message, "Please add our initials");
    assert_eq!(sent[0].order_items.lines().count(), 3);

    // Still visible while the confirmation shows.
    assert_eq!(cart.total_items(), 4);

    let due = flow.clear_due_at().unwrap();
    assert!(flow.run_due(&mut cart, &mut form, due));
    assert!(cart.is_empty());
    assert!(form.name.is_empty());
}

#[tokio::test]
async fn navigating_away_cancels_the_clear() {
    let catalog = Catalog::builtin();
    let mut cart = filled_cart(&catalog);
    let mut form = contact();
    let mut flow = CheckoutFlow::default();

    flow.submit_at(&cart, &form, &Scripted::ok(), placed_at())
        .await
        .unwrap();
    flow.cancel_pending();

    let later = Instant::now() + Duration::from_secs(60);
    assert!(!flow.run_due(&mut cart, &mut form, later));
    assert_eq!(cart.total_items(), 4);
}

#[tokio::test]
async fn invalid_contact_never_reaches_delivery() {
    let catalog = Catalog::builtin();
    let cart = filled_cart(&catalog);
    let mut flow = CheckoutFlow::default();
    let delivery = Scripted::ok();

    let form = ContactForm::new("Priya", "priya@", "");
    let err = flow
        .submit_at(&cart, &form, &delivery, placed_at())
        .await
        .unwrap_err();

    let CheckoutError::Invalid(errors) = &err else {
        panic!("expected validation errors, got {err:?}");
    };
    assert_eq!(
        errors.for_field(tans_commerce::checkout::ContactField::Email),
        Some("Please enter a valid email address")
    );
    assert_eq!(delivery.calls(), 0);

    let err = flow
        .submit_at(&CartStore::default(), &contact(), &delivery, placed_at())
        .await
        .unwrap_err();
    assert_eq!(err, CheckoutError::EmptyCart);
    assert_eq!(delivery.calls(), 0);
}

#[tokio::test]
async fn quota_failure_pauses_until_next_month() {
    let catalog = Catalog::builtin();
    let cart = filled_cart(&catalog);
    let mut flow = CheckoutFlow::default();
    let delivery = Scripted::replying(Some(412), "");

    let outcome = flow
        .submit_at(&cart, &contact(), &delivery, placed_at())
        .await
        .unwrap();

    let resume_on = NaiveDate::from_ymd_opt(2025, 2, 6).unwrap();
    assert_eq!(outcome, CheckoutOutcome::QuotaExceeded { resume_on });
    assert_eq!(cart.total_items(), 4);
    assert!(!flow.can_submit_on(placed_at().date_naive()));
    assert!(flow.can_submit_on(resume_on));
}

#[tokio::test]
async fn quota_text_and_generic_failures() {
    let catalog = Catalog::builtin();
    let cart = filled_cart(&catalog);

    let mut flow = CheckoutFlow::default();
    let outcome = flow
        .submit_at(
            &cart,
            &contact(),
            &Scripted::replying(Some(400), "Monthly Quota exceeded"),
            placed_at(),
        )
        .await
        .unwrap();
    assert!(matches!(outcome, CheckoutOutcome::QuotaExceeded { .. }));

    let mut flow = CheckoutFlow::default();
    let delivery = Scripted::replying(Some(500), "Internal Server Error");
    let outcome = flow
        .submit_at(&cart, &contact(), &delivery, placed_at())
        .await
        .unwrap();
    assert!(matches!(outcome, CheckoutOutcome::Failed { ref message } if message.contains("Internal Server Error")));
    assert!(flow.can_submit());
    assert_eq!(cart.total_items(), 4);
}

#[tokio::test]
async fn december_quota_rolls_into_january() {
    let catalog = Catalog::builtin();
    let cart = filled_cart(&catalog);
    let mut flow = CheckoutFlow::default();

    let outcome = flow
        .submit_at(
            &cart,
            &contact(),
            &Scripted::replying(Some(429), ""),
            Utc.with_ymd_and_hms(2025, 12, 31, 23, 0, 0).unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        outcome,
        CheckoutOutcome::QuotaExceeded {
            resume_on: NaiveDate::from_ymd_opt(2026, 1, 6).unwrap()
        }
    );
}

#[test]
fn config_drives_the_flow() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tans.toml");
    std::fs::write(
        &path,
        "[store]\nname = \"Card Corner\"\nrecipient_email = \"shop@example.com\"\n\
         [checkout]\nsuccess_clear_delay_ms = 10\nquota_resume_day = 1\n",
    )
    .unwrap();

    let config = StorefrontConfig::load(&path).unwrap();
    config.validate().unwrap();
    assert_eq!(config.store.name, "Card Corner");

    let flow = CheckoutFlow::from_config(&config);
    assert_eq!(flow.state(), &CheckoutState::Idle);
}
