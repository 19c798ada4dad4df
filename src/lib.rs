//! Localize JSON records by picking the stored translation that best matches
//! a client's language preferences.

pub mod config;
pub mod i18n;
pub mod metrics;
pub mod security;
pub mod server;
