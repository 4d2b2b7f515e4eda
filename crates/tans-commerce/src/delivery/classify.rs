//! Maps provider failures onto [`DeliveryError`].

use super::DeliveryError;

/// Statuses EmailJS uses when an account is over its allowance.
const QUOTA_STATUSES: [u16; 3] = [403, 412, 429];

/// Substrings in a response body that mean the same thing.
const QUOTA_MARKERS: [&str; 2] = ["limit", "quota"];

/// EmailJS refuses server-side calls unless the account allows them. It
/// answers 403, which would otherwise read as quota.
const NON_BROWSER_MARKER: &str = "non-browser";

const NON_BROWSER_HINT: &str =
    "Enable API access for non-browser applications in the EmailJS account security settings.";

const FALLBACK_DETAIL: &str = "Please check your EmailJS configuration.";

/// Classify a failed send.
///
/// `status` is `None` when no HTTP response was received. A refusal of
/// non-browser callers is a generic failure whatever the status. Otherwise
/// quota is reported for a quota status or a body mentioning a limit, and
/// everything else is a generic failure.
pub fn classify_failure(status: Option<u16>, text: &str) -> DeliveryError {
    let text = text.trim();
    let lowered = text.to_lowercase();

    if lowered.contains(NON_BROWSER_MARKER) {
        return DeliveryError::Failed {
            detail: format!("{text} {NON_BROWSER_HINT}"),
        };
    }

    let quota_status = status.is_some_and(|s| QUOTA_STATUSES.contains(&s));
    let quota_text = QUOTA_MARKERS.iter().any(|m| lowered.contains(m));

    let detail = match (status, text.is_empty()) {
        (_, false) => text.to_string(),
        (Some(s), true) => format!("HTTP {s}. {FALLBACK_DETAIL}"),
        (None, true) => FALLBACK_DETAIL.to_string(),
    };

    if quota_status || quota_text {
        DeliveryError::QuotaExceeded { detail }
    } else {
        DeliveryError::Failed { detail }
    }
}

/// Classify a reqwest error raised before or while reading the response.
pub(crate) fn classify_transport(err: &reqwest::Error) -> DeliveryError {
    if err.is_timeout() {
        return DeliveryError::failed("The email service did not respond in time.");
    }
    classify_failure(err.status().map(|s| s.as_u16()), &err.to_string())
}
