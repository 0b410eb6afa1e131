use chrono::{Duration, NaiveDate};

use super::domain::{Document, Requirement};

/// Decide whether a document is expired as of `today`.
///
/// Three-tier waterfall, one tier per document: an explicit expiry date wins;
/// otherwise a matching requirement's validity window counts from the upload
/// date; otherwise the document never expires by rule. A document inside a
/// validity window but missing its upload date is assumed valid rather than
/// rejected.
pub fn is_expired(document: &Document, requirement: Option<&Requirement>, today: NaiveDate) -> bool {
    if let Some(expires_on) = document.expires_on {
        return expires_on < today;
    }

    if let Some(days) = requirement.and_then(|req| req.validity_days) {
        if let Some(uploaded_on) = document.uploaded_on {
            return match uploaded_on.checked_add_signed(Duration::days(i64::from(days))) {
                Some(limit) => limit < today,
                None => false,
            };
        }
        return false;
    }

    false
}

/// The date a document stops counting, when one can be computed.
pub fn effective_expiry(document: &Document, requirement: Option<&Requirement>) -> Option<NaiveDate> {
    if document.expires_on.is_some() {
        return document.expires_on;
    }

    let days = requirement.and_then(|req| req.validity_days)?;
    let uploaded_on = document.uploaded_on?;
    uploaded_on.checked_add_signed(Duration::days(i64::from(days)))
}
