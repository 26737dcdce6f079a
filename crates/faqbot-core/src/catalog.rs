//! Catalog sources: the built-in sample set and JSON/TOML files.

use figment::{
    providers::{Format, Toml},
    Figment,
};
use serde::Deserialize;
use std::path::Path;

use crate::config::CatalogSettings;
use crate::error::{Error, Result};
use crate::types::{Catalog, CatalogEntry};

const SAMPLE: &[(&str, &str)] = &[
    (
        "What is your return policy?",
        "We offer a 30-day return policy for most items. Items must be in original condition with all tags attached. Please contact our customer service team to initiate a return.",
    ),
    (
        "How can I contact customer support?",
        "You can contact our customer support team via email at support@company.com, phone at 1-800-123-4567, or through our live chat feature on our website.",
    ),
    (
        "What payment methods do you accept?",
        "We accept all major credit cards (Visa, MasterCard, American Express), PayPal, Apple Pay, Google Pay, and bank transfers for orders over $100.",
    ),
    (
        "How long does shipping take?",
        "Standard shipping typically takes 3-5 business days within the continental US. Express shipping (1-2 business days) is available for an additional fee.",
    ),
    (
        "Do you offer international shipping?",
        "Yes, we offer international shipping to most countries. Shipping times and costs vary by location. Please check our international shipping page for specific details.",
    ),
    (
        "What is your privacy policy?",
        "We are committed to protecting your privacy. We collect only necessary information to process your orders and improve our services. We never sell your personal information to third parties.",
    ),
    (
        "How can I track my order?",
        "You can track your order by logging into your account and visiting the 'My Orders' section, or by using the tracking number provided in your shipping confirmation email.",
    ),
    (
        "Do you have a mobile app?",
        "Yes, we have a mobile app available for both iOS and Android devices. You can download it from the App Store or Google Play Store.",
    ),
    (
        "What are your business hours?",
        "Our customer service team is available Monday through Friday, 9 AM to 6 PM EST. Our online store is open 24/7 for your convenience.",
    ),
    (
        "How can I reset my password?",
        "To reset your password, click on the 'Forgot Password' link on the login page. Enter your email address and follow the instructions sent to your email.",
    ),
    (
        "What if my item arrives damaged?",
        "If your item arrives damaged, please take photos of the damage and contact our customer service team within 48 hours of delivery. We'll arrange a replacement or refund.",
    ),
    (
        "Do you offer refunds?",
        "Yes, we offer refunds for items returned within our 30-day return window. Refunds are processed within 5-7 business days after we receive your return.",
    ),
    (
        "How can I create an account?",
        "You can create an account by clicking the 'Sign Up' button on our website. You'll need to provide your name, email address, and create a password.",
    ),
    (
        "What are your shipping costs?",
        "Standard shipping is free for orders over $50. For orders under $50, shipping costs $5.99. Express shipping costs $12.99 regardless of order value.",
    ),
    (
        "Do you have a loyalty program?",
        "Yes, we have a loyalty program called 'Rewards Plus'. Earn points on every purchase and redeem them for discounts on future orders. Sign up is free!",
    ),
];

/// The fifteen-entry storefront FAQ used when no catalog file is configured.
pub fn sample_catalog() -> Catalog {
    let entries = SAMPLE.iter().map(|(q, a)| CatalogEntry::new(*q, *a)).collect();
    Catalog { entries }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonCatalog {
    Bare(Vec<CatalogEntry>),
    Wrapped { entries: Vec<CatalogEntry> },
}

#[derive(Deserialize)]
struct TomlCatalog {
    entries: Vec<CatalogEntry>,
}

/// Loads a catalog from disk. `.toml` files use `[[entries]]` tables; anything
/// else is parsed as JSON, either a bare array or `{"entries": [...]}`.
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let content = std::fs::read_to_string(path)?;
    let is_toml = path.extension().and_then(|s| s.to_str()).is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
    let entries = if is_toml {
        Figment::from(Toml::string(&content))
            .extract::<TomlCatalog>()
            .map_err(|e| Error::Catalog(format!("{}: {}", path.display(), e)))?
            .entries
    } else {
        match serde_json::from_str::<JsonCatalog>(&content)
            .map_err(|e| Error::Catalog(format!("{}: {}", path.display(), e)))?
        {
            JsonCatalog::Bare(entries) | JsonCatalog::Wrapped { entries } => entries,
        }
    };
    Catalog::new(entries)
}

/// Loads the configured catalog file, or the sample set when none is configured.
pub fn catalog_from_settings(settings: &CatalogSettings, base: &Path) -> Result<Catalog> {
    match settings.resolved_path(base) {
        Some(path) => load_catalog(&path),
        None => Ok(sample_catalog()),
    }
}
