//! Logging setup for embedding applications
//!
//! The advisor crates only emit `tracing` events. Installing a subscriber is
//! left to the host; `init_tracing` offers the default setup.

use std::io::IsTerminal;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is not set.
fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "legal_advisor=debug,advisor_llm=debug,advisor_extraction=debug,advisor_segmentation=debug,advisor_session=debug,info"
    } else {
        "legal_advisor=info,warn"
    }
}

/// Check if colored output should be used.
///
/// Returns true only if stderr is a terminal and `NO_COLOR` is not set.
fn use_color() -> bool {
    std::io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none()
}

/// Initialize a compact `tracing` subscriber writing to stderr.
///
/// `RUST_LOG` overrides the built-in filter. Verbose mode lowers the advisor
/// crates to `debug` so segmentation and provider diagnostics show up.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_tracing(verbose: bool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directives(verbose)))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(verbose)
                .with_ansi(use_color())
                .with_line_number(false)
                .with_file(false)
                .compact(),
        )
        .try_init()?;

    Ok(())
}

/// Mask an API key for display, keeping only the last four characters.
#[must_use]
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.trim().chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), tail)
}
