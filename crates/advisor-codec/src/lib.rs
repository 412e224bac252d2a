//! Session value obfuscation
//!
//! Values are serialized to JSON, percent-encoded, then Base64-encoded.
//!
//! **This is not encryption.** There is no key and no integrity check; any
//! reader of a token can recover its value. The transform exists only so
//! that session values are not stored as readable text, and stored tokens
//! must stay decodable, so it must not be swapped for real cryptography.
//!
//! Tokens written by older versions are plain JSON. [`decode`] accepts both
//! forms, and [`read_token`] picks the first decode path with the
//! [`looks_obfuscated`] heuristic.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde_json::Value;
use tracing::debug;

pub use advisor_utils::error::DecodeError;

/// Base64 of `{"`, the prefix of a Base64-wrapped raw JSON object.
pub const OBFUSCATED_OBJECT_PREFIX: &str = "eyJ";

/// Encode a value into a session token.
///
/// Strings are encoded as their raw text; every other value is serialized
/// as JSON first. Never fails: if serialization is impossible the plain
/// JSON text is returned unencoded, so callers must accept that a token
/// may be legacy-shaped.
#[must_use]
pub fn encode(value: &Value) -> String {
    match value {
        Value::String(text) => encode_text(text),
        other => match serde_json::to_string(other) {
            Ok(json) => encode_text(&json),
            Err(err) => {
                debug!(error = %err, "Token serialization failed, storing plain JSON");
                other.to_string()
            }
        },
    }
}

/// Encode raw text into a session token.
#[must_use]
pub fn encode_text(text: &str) -> String {
    STANDARD.encode(urlencoding::encode(text).as_bytes())
}

/// Decode a session token.
///
/// Tries Base64, then percent-decoding, then JSON. When unwrapping succeeds
/// but the text is not JSON, the text itself is returned as a string value;
/// this is how encoded plain strings come back. When unwrapping fails the
/// token is parsed directly as legacy JSON.
///
/// # Errors
///
/// Returns [`DecodeError`] when neither path recovers a value.
pub fn decode(token: &str) -> Result<Value, DecodeError> {
    let unwrapped = match unwrap_obfuscated(token) {
        Ok(text) => text,
        Err(obfuscated) => return decode_legacy(token, obfuscated),
    };

    match serde_json::from_str(&unwrapped) {
        Ok(value) => Ok(value),
        Err(_) => Ok(Value::String(unwrapped)),
    }
}

/// Whether a token should be read as obfuscated rather than legacy JSON.
///
/// A token is obfuscated if it starts with [`OBFUSCATED_OBJECT_PREFIX`] or
/// contains no `{` at all. A legacy JSON token whose text happens to lack a
/// brace (a bare number or string) is therefore classified as obfuscated;
/// [`decode`] still recovers it via the legacy fallback.
#[must_use]
pub fn looks_obfuscated(token: &str) -> bool {
    token.starts_with(OBFUSCATED_OBJECT_PREFIX) || !token.contains('{')
}

/// Read a stored token, choosing the decode path with [`looks_obfuscated`].
///
/// Obfuscated-looking tokens go through [`decode`]; anything else is parsed
/// as legacy JSON only.
///
/// # Errors
///
/// Returns [`DecodeError`] if the chosen path fails.
pub fn read_token(token: &str) -> Result<Value, DecodeError> {
    if looks_obfuscated(token) {
        decode(token)
    } else {
        debug!("Reading session token as legacy JSON");
        decode_legacy(token, "not attempted".to_string())
    }
}

fn unwrap_obfuscated(token: &str) -> Result<String, String> {
    let bytes = STANDARD
        .decode(token.trim())
        .map_err(|e| format!("base64: {e}"))?;
    let percent_encoded = String::from_utf8(bytes).map_err(|e| format!("utf-8: {e}"))?;
    urlencoding::decode(&percent_encoded)
        .map(std::borrow::Cow::into_owned)
        .map_err(|e| format!("percent-decoding: {e}"))
}

fn decode_legacy(token: &str, obfuscated: String) -> Result<Value, DecodeError> {
    serde_json::from_str(token).map_err(|e| DecodeError {
        obfuscated,
        legacy: e.to_string(),
    })
}
