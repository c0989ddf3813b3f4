//! Credential loader - service-account blob to structured credential
//!
//! The blob usually comes from an environment variable and shows up in one
//! of three shapes depending on how it was pasted into the host's settings:
//! plain JSON, JSON whose key still carries literal `\n` sequences (or the
//! whole document quoted once more as a JSON string), or base64 of the JSON.
//! Decoders run in a fixed order and each falls through to the next.

use base64::Engine;
use serde::Deserialize;

use crate::domain::result::{Error, Result};
use crate::domain::ServiceAccountCredential;

/// Environment variable holding the spreadsheet service account
pub const SERVICE_ACCOUNT_ENV: &str = "GOOGLE_SERVICE_ACCOUNT_JSON";

/// Shape the blob was decoded from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialFormat {
    PlainJson,
    EscapedJson,
    Base64Json,
}

impl CredentialFormat {
    pub const ORDER: [CredentialFormat; 3] = [
        CredentialFormat::PlainJson,
        CredentialFormat::EscapedJson,
        CredentialFormat::Base64Json,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CredentialFormat::PlainJson => "plain-json",
            CredentialFormat::EscapedJson => "escaped-json",
            CredentialFormat::Base64Json => "base64-json",
        }
    }

    fn decode(&self, blob: &str) -> Option<ServiceAccountCredential> {
        match self {
            CredentialFormat::PlainJson => parse_json(blob),
            CredentialFormat::EscapedJson => decode_escaped(blob),
            CredentialFormat::Base64Json => decode_base64(blob),
        }
    }
}

/// Result of a successful decode
#[derive(Debug, Clone)]
pub struct LoadedCredential {
    pub credential: ServiceAccountCredential,
    pub format: CredentialFormat,
}

/// Decode a credential blob, trying each format in order
///
/// The error never includes any part of the blob.
pub fn decode_credential(blob: &str) -> Result<LoadedCredential> {
    let blob = blob.trim();
    if blob.is_empty() {
        return Err(Error::Credential("service account credential is empty".to_string()));
    }

    CredentialFormat::ORDER
        .iter()
        .find_map(|format| {
            format.decode(blob).map(|credential| LoadedCredential {
                credential,
                format: *format,
            })
        })
        .ok_or_else(|| {
            Error::Credential(
                "service account credential is not valid JSON, escaped JSON or base64-encoded JSON \
                 with client_email and private_key"
                    .to_string(),
            )
        })
}

/// Read and decode the credential from `var`
pub fn load_from_env(var: &str) -> Result<LoadedCredential> {
    let blob = std::env::var(var).map_err(|_| Error::config(format!("Missing env {}", var)))?;
    decode_credential(&blob)
}

fn parse_json(text: &str) -> Option<ServiceAccountCredential> {
    let credential: ServiceAccountCredential = serde_json::from_str(text).ok()?;
    finish(credential)
}

fn decode_escaped(text: &str) -> Option<ServiceAccountCredential> {
    // A document quoted once more: "{\"client_email\": ...}"
    if text.starts_with('"') {
        if let Ok(inner) = serde_json::from_str::<String>(text) {
            if let Some(credential) = parse_json(inner.trim()) {
                return Some(credential);
            }
        }
    }

    parse_json(&escape_newlines_in_strings(text))
}

/// Escape raw line breaks that sit inside JSON string literals
///
/// A pasted key often carries real newlines, which JSON forbids inside
/// strings. Line breaks between tokens are left alone.
fn escape_newlines_in_strings(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_string = false;
    let mut escaped = false;

    for c in text.chars() {
        if in_string {
            match c {
                '\n' => out.push_str("\\n"),
                '\r' => {}
                '\\' if !escaped => {
                    escaped = true;
                    out.push(c);
                    continue;
                }
                '"' if !escaped => {
                    in_string = false;
                    out.push(c);
                }
                _ => out.push(c),
            }
            escaped = false;
        } else {
            if c == '"' {
                in_string = true;
            }
            out.push(c);
        }
    }
    out
}

fn decode_base64(text: &str) -> Option<ServiceAccountCredential> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    let engines = [
        base64::engine::general_purpose::STANDARD,
        base64::engine::general_purpose::URL_SAFE,
    ];
    engines.iter().find_map(|engine| {
        let bytes = engine.decode(compact.as_bytes()).ok()?;
        let json = String::from_utf8(bytes).ok()?;
        parse_json(json.trim()).or_else(|| decode_escaped(json.trim()))
    })
}

/// Validate the required fields and turn literal `\n` in the key into newlines
fn finish(mut credential: ServiceAccountCredential) -> Option<ServiceAccountCredential> {
    credential.client_email = credential.client_email.trim().to_string();
    credential.private_key = credential
        .private_key
        .replace("\\r\\n", "\n")
        .replace("\\n", "\n");

    if credential.client_email.is_empty() || credential.private_key.trim().is_empty() {
        return None;
    }
    Some(credential)
}

/// Only used to peek at the `type` field for diagnostics
#[derive(Deserialize)]
struct KeyType {
    #[serde(rename = "type")]
    key_type: Option<String>,
}

/// True when the blob declares itself a service account (or says nothing)
pub fn looks_like_service_account(blob: &str) -> bool {
    serde_json::from_str::<KeyType>(blob)
        .map(|k| k.key_type.map_or(true, |t| t == "service_account"))
        .unwrap_or(true)
}
