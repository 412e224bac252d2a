//! Configuration for legal-advisor
//!
//! Supports a TOML file at `.legal-advisor/config.toml` with `[provider]`,
//! `[analysis]`, `[expert]`, and `[logging]` sections.

pub mod config;

pub use config::*;
