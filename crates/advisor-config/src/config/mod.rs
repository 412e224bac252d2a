//! Configuration model with discovery and validation
//!
//! Precedence: explicit file > discovered file > built-in defaults.

mod discovery;
mod model;
mod validation;

pub use discovery::{CONFIG_DIR, CONFIG_FILE};
pub use model::*;
pub use validation::{MIN_API_KEY_LEN, PLACEHOLDER_API_KEY};
