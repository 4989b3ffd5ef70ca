// ABOUTME: WhatsApp deep-link message composer
// ABOUTME: Pure string formatting: pre-filled message text and wa.me link generation
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Outbound contact link generation.
//!
//! The contact form never sends mail; it composes a pre-filled WhatsApp
//! message and opens it against the site's configured number. Everything
//! here is deterministic string formatting.

use crate::errors::{AppError, AppResult};

/// Base URL for WhatsApp deep links
const WHATSAPP_BASE_URL: &str = "https://wa.me/";

/// Build the pre-filled message text, before percent-encoding
#[must_use]
pub fn compose_message(name: &str, email: &str, body: &str) -> String {
    format!("Halo, nama saya {name}.\n\nEmail: {email}\n\nPesan:\n{body}")
}

/// Normalize a contact number to digits only
#[must_use]
pub fn normalize_number(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Build the full wa.me deep link for a composed message
///
/// # Errors
///
/// Returns a validation error when the configured number contains no
/// digits at all.
pub fn whatsapp_link(number: &str, name: &str, email: &str, body: &str) -> AppResult<String> {
    let digits = normalize_number(number);
    if digits.is_empty() {
        return Err(AppError::validation(
            "contact number contains no digits; cannot build WhatsApp link",
        ));
    }

    let message = compose_message(name, email, body);
    let encoded = urlencoding::encode(&message);
    Ok(format!("{WHATSAPP_BASE_URL}{digits}?text={encoded}"))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_composed_message_exact() {
        let message = compose_message("Ana", "a@b.com", "Hi");
        assert_eq!(message, "Halo, nama saya Ana.\n\nEmail: a@b.com\n\nPesan:\nHi");
    }

    #[test]
    fn test_number_normalization() {
        assert_eq!(normalize_number("+62 812-3456-7890"), "6281234567890");
        assert_eq!(normalize_number("0812 3456 7890"), "081234567890");
        assert_eq!(normalize_number("abc"), "");
    }

    #[test]
    fn test_link_shape() {
        let link = whatsapp_link("+62 812-3456-7890", "Ana", "a@b.com", "Hi").unwrap();
        assert!(link.starts_with("https://wa.me/6281234567890?text="));
        // Newlines must be percent-encoded in the final link.
        assert!(link.contains("%0A"));
        assert!(!link.contains('\n'));
    }

    #[test]
    fn test_link_requires_digits() {
        assert!(whatsapp_link("tidak ada", "Ana", "a@b.com", "Hi").is_err());
    }
}
