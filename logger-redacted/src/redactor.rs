#![allow(clippy::expect_used)]

use base64::{engine::general_purpose, Engine as _};
use lazy_static::lazy_static;
use regex::Regex;
use sha2::{Digest, Sha256};

lazy_static! {
    static ref EMAIL_REGEX: Regex =
        Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("email pattern");
    static ref BEARER_REGEX: Regex =
        Regex::new(r"(?i)\bbearer\s+[A-Za-z0-9\-_.~+/]+=*").expect("bearer pattern");
    static ref JWT_REGEX: Regex =
        Regex::new(r"\beyJ[A-Za-z0-9_-]*\.[A-Za-z0-9_-]+\.[A-Za-z0-9_-]+\b").expect("jwt pattern");
    static ref PHONE_REGEX: Regex = Regex::new(
        r"(?:\+1[-.\s]?)?\(?\b[0-9]{3}\)?[-.\s]?[0-9]{3}[-.\s]?[0-9]{4}\b"
    )
    .expect("phone pattern");
}

/// PII redaction configuration
#[derive(Debug, Clone)]
pub struct RedactionConfig {
    pub redact_emails: bool,
    pub redact_tokens: bool,
    pub redact_phones: bool,
    pub hash_for_correlation: bool,
}

impl Default for RedactionConfig {
    fn default() -> Self {
        Self {
            redact_emails: true,
            redact_tokens: true,
            redact_phones: true,
            hash_for_correlation: true,
        }
    }
}

/// PII redactor for log messages
#[derive(Debug, Clone, Default)]
pub struct PiiRedactor {
    config: RedactionConfig,
}

impl PiiRedactor {
    pub fn new(config: RedactionConfig) -> Self {
        Self { config }
    }

    pub fn redact(&self, text: &str) -> String {
        let mut result = text.to_string();

        // Tokens first: a JWT payload never contains '@' but bearer values can
        if self.config.redact_tokens {
            result = BEARER_REGEX
                .replace_all(&result, "Bearer [REDACTED]")
                .into_owned();
            result = JWT_REGEX.replace_all(&result, "JWT[REDACTED]").into_owned();
        }

        if self.config.redact_emails {
            result = self.redact_emails(&result);
        }

        if self.config.redact_phones {
            result = self.redact_phones(&result);
        }

        result
    }

    fn redact_emails(&self, text: &str) -> String {
        EMAIL_REGEX
            .replace_all(text, |caps: &regex::Captures| {
                let email = caps.get(0).map_or("", |m| m.as_str());
                if self.config.hash_for_correlation {
                    format!("EMAIL[{}]", hash_value(email))
                } else {
                    match email.split_once('@') {
                        Some((local, domain)) => {
                            format!("{}***@{}***", first_char(local), first_char(domain))
                        }
                        None => "***@***".to_string(),
                    }
                }
            })
            .into_owned()
    }

    fn redact_phones(&self, text: &str) -> String {
        PHONE_REGEX
            .replace_all(text, |caps: &regex::Captures| {
                if self.config.hash_for_correlation {
                    format!("PHONE[{}]", hash_value(caps.get(0).map_or("", |m| m.as_str())))
                } else {
                    "(***) ***-****".to_string()
                }
            })
            .into_owned()
    }
}

fn first_char(s: &str) -> &str {
    s.char_indices()
        .nth(1)
        .and_then(|(idx, _)| s.get(..idx))
        .unwrap_or(s)
}

/// Short, stable digest of a value (first 8 bytes of SHA-256, base64)
pub fn hash_value(value: &str) -> String {
    let digest = Sha256::digest(value.as_bytes());
    general_purpose::STANDARD.encode(digest.get(..8).unwrap_or_default())
}
