//! Order email rendering.

use std::fmt::Write;

use serde::Serialize;

use crate::cart::CartLine;
use crate::checkout::OrderSubmission;
use crate::config::StoreConfig;

/// Template parameters sent to the email provider.
///
/// Field names are the EmailJS template variable names.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct OrderEmail {
    /// Shop inbox that receives the order.
    pub to_email: String,
    /// Customer address, so the shop can reply directly.
    pub reply_to: String,
    pub customer_name: String,
    pub customer_email: String,
    pub subject: String,
    /// Plain-text version of the whole order.
    pub message: String,
    /// Item list only; the template supplies the surrounding layout.
    pub html_message: String,
    pub order_items: String,
    pub total_price: String,
    pub order_date: String,
    pub order_reference: String,
    /// Customer note, or `"None"`.
    pub customization_message: String,
}

impl OrderEmail {
    pub fn from_submission(submission: &OrderSubmission, store: &StoreConfig) -> Self {
        let contact = &submission.contact;
        let order_date = submission
            .placed_at
            .format("%B %-d, %Y %H:%M UTC")
            .to_string();
        let order_items = render_item_text(&submission.lines);
        let total_price = submission.total.display();

        let mut message = format!(
            "From {store}\n\n\
             Order Date: {order_date}\n\
             Customer: {name}\n\
             Email: {email}\n\n\
             Order Details:\n{order_items}\n\n\
             Total: {total_price}\n\n",
            store = store.name,
            name = contact.name,
            email = contact.email,
        );
        if let Some(note) = &contact.customization_note {
            let _ = write!(message, "Customization Request:\n{note}\n\n");
        }
        let _ = write!(
            message,
            "Thank you for purchasing from {}.\nWe will get back to you soon!",
            store.name
        );

        Self {
            to_email: store.recipient_email.clone(),
            reply_to: contact.email.clone(),
            customer_name: contact.name.clone(),
            customer_email: contact.email.clone(),
            subject: store.subject.clone(),
            message,
            html_message: render_item_html(&submission.lines),
            order_items,
            total_price,
            order_date,
            order_reference: submission.reference.clone(),
            customization_message: contact
                .customization_note
                .clone()
                .unwrap_or_else(|| "None".to_string()),
        }
    }
}

/// `1. Name (Category) - Qty: 2 - $25.98`, one line per item.
fn render_item_text(lines: &[CartLine]) -> String {
    lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            format!(
                "{}. {} ({}) - Qty: {} - {}",
                i + 1,
                line.name,
                line.category,
                line.quantity,
                line.line_total().display()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_item_html(lines: &[CartLine]) -> String {
    const TEXT: &str = "font-family: Arial, sans-serif;";
    let mut html = String::new();

    for (i, line) in lines.iter().enumerate() {
        let _ = write!(
            html,
            "<div style=\"margin-bottom: 20px; padding: 15px; border: 1px solid #e2e8f0; border-radius: 8px; background-color: #ffffff;\">\
             <h3 style=\"margin: 0 0 5px 0; color: #2d3748; {TEXT}\">{n}. {name}</h3>\
             <p style=\"margin: 0 0 5px 0; color: #718096; font-size: 14px; {TEXT}\">Category: {category}</p>\
             <p style=\"margin: 0 0 5px 0; color: #4a5568; {TEXT}\">Quantity: {qty}</p>\
             <p style=\"margin: 0; color: #667eea; font-weight: 600; font-size: 16px; {TEXT}\">{total}</p>\
             </div>",
            n = i + 1,
            name = escape_html(&line.name),
            category = escape_html(line.category.as_str()),
            qty = line.quantity,
            total = escape_html(&line.line_total().display()),
        );
    }

    html
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
