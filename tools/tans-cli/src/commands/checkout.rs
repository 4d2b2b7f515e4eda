//! Build a cart from the command line and place the order.

use std::str::FromStr;
use std::time::Instant;

use anyhow::{bail, Context as _, Result};
use chrono::NaiveDate;
use dialoguer::{Confirm, Input};
use serde::Serialize;
use tans_commerce::cart::{CartEvent, CartStore};
use tans_commerce::checkout::{
    CheckoutError, CheckoutFlow, CheckoutOutcome, ContactField, ContactForm,
};
use tans_commerce::config::StorefrontConfig;
use tans_commerce::delivery::{DeliveryService, DryRunDelivery, EmailJsClient};
use tans_commerce::ids::ProductId;

use super::CheckoutArgs;
use crate::context::Context;

/// One `--item` value: `ID` or `IDxQTY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ItemSpec {
    id: ProductId,
    quantity: u32,
}

impl FromStr for ItemSpec {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (id, quantity) = s
            .split_once(|c| c == 'x' || c == 'X')
            .unwrap_or((s, "1"));

        let id = id
            .parse()
            .with_context(|| format!("Invalid product ID in '{s}'"))?;
        let quantity: u32 = quantity
            .trim()
            .parse()
            .with_context(|| format!("Invalid quantity in '{s}'"))?;
        if quantity == 0 {
            bail!("Quantity must be at least 1 in '{s}'");
        }

        Ok(Self { id, quantity })
    }
}

#[derive(Serialize)]
struct CheckoutReport {
    status: &'static str,
    reference: Option<String>,
    message: String,
    items: u64,
    total: String,
    resume_on: Option<NaiveDate>,
    dry_run: bool,
}

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let mut flow = checkout_flow(&ctx.config)?;

    let specs = args
        .items
        .iter()
        .map(|s| s.parse::<ItemSpec>())
        .collect::<Result<Vec<_>>>()?;

    let mut cart = build_cart(&specs, ctx)?;
    if cart.take_notification() {
        ctx.output.success(&cart.notification_title());
    }
    print_summary(&cart, ctx);

    let interactive = !args.yes && !ctx.output.is_json();
    flow.open();

    let mut form = ContactForm::new(
        args.name.unwrap_or_default(),
        args.email.unwrap_or_default(),
        args.note.clone().unwrap_or_default(),
    );
    if interactive {
        prompt_contact(&mut form, args.note.is_none())?;

        let confirmed = Confirm::new()
            .with_prompt(format!("Send order for {}?", cart.total_price()))
            .default(true)
            .interact()?;
        if !confirmed {
            flow.dismiss()?;
            ctx.output.warn("Order cancelled");
            return Ok(());
        }
    }

    let delivery: Box<dyn DeliveryService> = if args.dry_run {
        Box::new(DryRunDelivery::new())
    } else {
        let client = EmailJsClient::new(&ctx.config.email)?;
        if !client.is_configured() {
            ctx.output
                .warn("EmailJS is not configured; set TANS_EMAILJS_* or pass --dry-run");
        }
        Box::new(client)
    };

    let spinner = ctx.output.spinner("Sending order...");
    let result = flow.submit(&cart, &form, delivery.as_ref()).await;
    spinner.finish_and_clear();

    let outcome = match result {
        Ok(outcome) => outcome,
        Err(CheckoutError::Invalid(errors)) => {
            for error in &errors.0 {
                ctx.output
                    .error(&format!("{}: {}", error.field.as_str(), error.message));
            }
            bail!("Please fix the contact details and try again");
        }
        Err(e) => return Err(e.into()),
    };

    if ctx.output.is_json() {
        ctx.output.json(&report(&outcome, &cart, args.dry_run));
    }

    match &outcome {
        CheckoutOutcome::Confirmed { .. } => {
            ctx.output.success(&outcome.message());
            wait_for_clear(&mut flow, &mut cart, &mut form, ctx).await;
            Ok(())
        }
        CheckoutOutcome::QuotaExceeded { .. } => {
            ctx.output.info(&format!(
                "You can still reach us directly at {}",
                ctx.config.store.recipient_email
            ));
            bail!(outcome.message())
        }
        CheckoutOutcome::Failed { .. } => bail!(outcome.message()),
    }
}

/// Build the flow from a config that has passed validation.
fn checkout_flow(config: &StorefrontConfig) -> Result<CheckoutFlow> {
    config
        .validate()
        .context("Invalid configuration; run `tans config validate` for details")?;
    Ok(CheckoutFlow::from_config(config))
}

fn build_cart(specs: &[ItemSpec], ctx: &Context) -> Result<CartStore> {
    let mut cart = CartStore::new(ctx.config.store.currency);
    cart.subscribe(|event: &CartEvent| tracing::debug!(?event, "cart changed"));

    for spec in specs {
        let product = ctx.catalog.require(spec.id)?;
        if !product.is_available() {
            bail!("{} is out of stock", product.name);
        }

        cart.add_item(product);
        if spec.quantity > 1 {
            let current = cart.line(spec.id).map_or(0, |l| l.quantity);
            let target = i64::from(current) + i64::from(spec.quantity) - 1;
            cart.update_quantity(spec.id, target)?;
        }
    }

    Ok(cart)
}

fn print_summary(cart: &CartStore, ctx: &Context) {
    let pricing = cart.pricing();

    ctx.output.header("Order Summary");
    let widths = [28, 5, 10, 10];
    ctx.output.table_row(&["Card", "Qty", "Price", "Total"], &widths);
    for line in &pricing.lines {
        ctx.output.table_row(
            &[
                &line.name,
                &line.quantity.to_string(),
                &line.unit_price.display(),
                &line.total.display(),
            ],
            &widths,
        );
    }

    ctx.output.blank();
    ctx.output.kv("Items", &cart.total_items().to_string());
    ctx.output.kv("Subtotal", &pricing.subtotal.display());
    ctx.output.kv("Shipping", &pricing.shipping_label());
    ctx.output.kv("Total", &pricing.grand_total.display());
    ctx.output.blank();
}

/// Ask for missing contact fields, re-asking until the form validates.
fn prompt_contact(form: &mut ContactForm, ask_note: bool) -> Result<()> {
    if form.name.trim().is_empty() {
        form.name = Input::new().with_prompt("Your name").interact_text()?;
    }
    if form.email.trim().is_empty() {
        form.email = Input::new().with_prompt("Your email").interact_text()?;
    }
    if ask_note {
        form.customization_note = Input::new()
            .with_prompt("Customization request (optional)")
            .allow_empty(true)
            .interact_text()?;
    }

    while let Err(errors) = form.validate() {
        for error in &errors.0 {
            let value: String = Input::new().with_prompt(&error.message).interact_text()?;
            match error.field {
                ContactField::Name => form.name = value,
                ContactField::Email => form.email = value,
            }
        }
    }

    Ok(())
}

/// Keep the confirmation up until the cart clears. Ctrl-C leaves the cart alone.
async fn wait_for_clear(
    flow: &mut CheckoutFlow,
    cart: &mut CartStore,
    form: &mut ContactForm,
    ctx: &Context,
) {
    let Some(due) = flow.clear_due_at() else {
        return;
    };

    tokio::select! {
        _ = tokio::time::sleep_until(tokio::time::Instant::from_std(due)) => {
            if flow.run_due(cart, form, Instant::now()) {
                ctx.output.info("Cart cleared");
            }
        }
        _ = tokio::signal::ctrl_c() => {
            flow.cancel_pending();
            ctx.output.warn("Interrupted; cart left as is");
        }
    }
}

fn report(outcome: &CheckoutOutcome, cart: &CartStore, dry_run: bool) -> CheckoutReport {
    let (status, reference, resume_on) = match outcome {
        CheckoutOutcome::Confirmed { reference } => ("confirmed", Some(reference.clone()), None),
        CheckoutOutcome::QuotaExceeded { resume_on } => ("quota_exceeded", None, Some(*resume_on)),
        CheckoutOutcome::Failed { .. } => ("failed", None, None),
    };

    CheckoutReport {
        status,
        reference,
        message: outcome.message(),
        items: cart.total_items(),
        total: cart.total_price().display(),
        resume_on,
        dry_run,
    }
}
