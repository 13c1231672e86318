pub mod redactor;

pub use redactor::*;

/// Redaction of personal data before it reaches log output
///
/// Patient and staff email addresses are the primary identifiers in this
/// system, so every log line that mentions a caller goes through
/// [`PiiRedactor`] first. Bearer tokens and raw JWTs are masked as well so a
/// captured log never contains a usable credential.
///
/// # Detected Data Types
///
/// - **Email Addresses**: jane@clinic.org → EMAIL[q2x...] or j***@c***
/// - **Bearer Tokens**: Bearer eyJ... → Bearer [REDACTED]
/// - **JWTs**: three dot-separated base64url segments → JWT[REDACTED]
/// - **Phone Numbers**: (555) 123-4567 → (***) ***-****
///
/// Hash-based redaction keeps log lines correlatable: the same email always
/// maps to the same short digest.
///
/// # Example
///
/// ```rust
/// use logger_redacted::{PiiRedactor, RedactionConfig};
///
/// let redactor = PiiRedactor::new(RedactionConfig {
///     hash_for_correlation: false,
///     ..Default::default()
/// });
/// let line = redactor.redact("login attempt for jane@clinic.org");
/// assert_eq!(line, "login attempt for j***@c***");
/// ```
pub fn redact(text: &str) -> String {
    PiiRedactor::default().redact(text)
}
