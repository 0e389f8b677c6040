use axum::body::Bytes;
use regex::Regex;
use serde::Deserialize;

use folio_mailer::{ContactMessage, MailerClient};

use crate::rate_limit::{RateDecision, RateLimiter};

/// Inbound contact-form body. Every field is checked by the pipeline, so
/// absent and `null` fields both land in the presence check instead of a
/// parse error.
#[derive(Debug, Deserialize)]
pub struct ContactPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, rename = "toEmail")]
    pub to_email: Option<String>,
}

/// Outcome of one relay attempt.
#[derive(Debug, PartialEq, Eq)]
pub enum RelayOutcome {
    /// The provider accepted the message; carries its delivery id.
    Delivered { id: String },
    /// No provider configured; carries a `mailto:` URI for the client.
    Fallback { mailto: String },
    RateLimited,
    Invalid { reason: &'static str },
    /// The provider rejected the send or was unreachable.
    UpstreamFailed,
}

/// Runs one submission through the relay: rate gate, then field checks,
/// then exactly one delivery attempt (or the `mailto:` fallback when no
/// provider is configured). Never retries.
///
/// The gate runs before the body is parsed, so garbage payloads still count
/// against the sender's window.
pub async fn handle_submission(
    limiter: &RateLimiter,
    mailer: Option<&MailerClient>,
    from_address: &str,
    source_key: &str,
    raw_body: &Bytes,
) -> RelayOutcome {
    if limiter.check_and_increment(source_key).await == RateDecision::Denied {
        return RelayOutcome::RateLimited;
    }

    let payload: ContactPayload = match serde_json::from_slice(raw_body) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::debug!(error = %e, "contact body failed to parse");
            return RelayOutcome::Invalid {
                reason: "Invalid request body",
            };
        }
    };

    let (message, to_email) = match validate(payload) {
        Ok(validated) => validated,
        Err(reason) => return RelayOutcome::Invalid { reason },
    };

    match mailer {
        Some(client) => match client
            .send_contact_message(from_address, &to_email, &message)
            .await
        {
            Ok(id) => RelayOutcome::Delivered { id },
            Err(e) => {
                tracing::error!(error = %e, "contact delivery failed");
                RelayOutcome::UpstreamFailed
            }
        },
        None => RelayOutcome::Fallback {
            mailto: message.mailto(&to_email),
        },
    }
}

/// Presence, length, and format checks, in that order. Length bounds apply
/// to the trimmed value; the delivered message keeps the submitted text.
fn validate(payload: ContactPayload) -> Result<(ContactMessage, String), &'static str> {
    let (Some(name), Some(email), Some(message), Some(to_email)) = (
        present(payload.name),
        present(payload.email),
        present(payload.message),
        present(payload.to_email),
    ) else {
        return Err("Missing required fields");
    };

    let name_len = name.trim().chars().count();
    if !(2..=100).contains(&name_len) {
        return Err("Name must be between 2 and 100 characters");
    }

    let message_len = message.trim().chars().count();
    if !(10..=2000).contains(&message_len) {
        return Err("Message must be between 10 and 2000 characters");
    }

    if !is_valid_email(&email) || !is_valid_email(&to_email) {
        return Err("Invalid email format");
    }

    Ok((
        ContactMessage {
            name,
            email,
            message,
        },
        to_email,
    ))
}

fn present(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.is_empty())
}

/// `local@domain.tld` shape: no whitespace or extra `@` on either side of
/// the `@`, at least one `.` after it.
fn is_valid_email(address: &str) -> bool {
    let re = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex");
    re.is_match(address)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;

    use super::*;

    fn payload(name: &str, email: &str, message: &str, to_email: &str) -> ContactPayload {
        ContactPayload {
            name: Some(name.to_owned()),
            email: Some(email.to_owned()),
            message: Some(message.to_owned()),
            to_email: Some(to_email.to_owned()),
        }
    }

    fn valid_body() -> Bytes {
        Bytes::from(
            json!({
                "name": "Jane",
                "email": "jane@example.com",
                "message": "Hello there, world!",
                "toEmail": "owner@example.com"
            })
            .to_string(),
        )
    }

    fn limiter() -> RateLimiter {
        RateLimiter::new(3, Duration::from_secs(60))
    }

    // -------------------------------------------------------------------------
    // Field validation
    // -------------------------------------------------------------------------

    #[test]
    fn two_char_name_is_accepted() {
        let result = validate(payload("Al", "a@b.co", "Hello there!", "o@b.co"));
        assert!(result.is_ok());
    }

    #[test]
    fn one_char_name_is_rejected() {
        let result = validate(payload("A", "a@b.co", "Hello there!", "o@b.co"));
        assert_eq!(result.unwrap_err(), "Name must be between 2 and 100 characters");
    }

    #[test]
    fn whitespace_only_name_fails_the_length_check() {
        let result = validate(payload("   ", "a@b.co", "Hello there!", "o@b.co"));
        assert_eq!(result.unwrap_err(), "Name must be between 2 and 100 characters");
    }

    #[test]
    fn hundred_and_one_char_name_is_rejected() {
        let long = "a".repeat(101);
        let result = validate(payload(&long, "a@b.co", "Hello there!", "o@b.co"));
        assert_eq!(result.unwrap_err(), "Name must be between 2 and 100 characters");
    }

    #[test]
    fn ten_char_message_is_accepted() {
        let result = validate(payload("Jane", "a@b.co", "0123456789", "o@b.co"));
        assert!(result.is_ok());
    }

    #[test]
    fn nine_char_message_is_rejected() {
        let result = validate(payload("Jane", "a@b.co", "012345678", "o@b.co"));
        assert_eq!(
            result.unwrap_err(),
            "Message must be between 10 and 2000 characters"
        );
    }

    #[test]
    fn over_long_message_is_rejected() {
        let long = "a".repeat(2001);
        let result = validate(payload("Jane", "a@b.co", &long, "o@b.co"));
        assert_eq!(
            result.unwrap_err(),
            "Message must be between 10 and 2000 characters"
        );
    }

    #[test]
    fn missing_recipient_is_a_presence_failure() {
        let payload = ContactPayload {
            name: Some("Jane".to_owned()),
            email: Some("a@b.co".to_owned()),
            message: Some("Hello there!".to_owned()),
            to_email: None,
        };
        assert_eq!(validate(payload).unwrap_err(), "Missing required fields");
    }

    #[test]
    fn empty_fields_count_as_missing() {
        let result = validate(payload("", "", "", ""));
        assert_eq!(result.unwrap_err(), "Missing required fields");
    }

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("a@b.c"));
        assert!(is_valid_email("first.last@sub.domain.org"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.d"));
        assert!(!is_valid_email("a@@b.c"));
        assert!(!is_valid_email("@b.c"));
    }

    #[test]
    fn invalid_recipient_address_is_rejected() {
        let result = validate(payload("Jane", "a@b.co", "Hello there!", "not-an-email"));
        assert_eq!(result.unwrap_err(), "Invalid email format");
    }

    #[test]
    fn delivered_message_keeps_untrimmed_text() {
        let (message, _) = validate(payload("  Jane  ", "a@b.co", "  Hello there!  ", "o@b.co"))
            .expect("valid");
        assert_eq!(message.name, "  Jane  ");
        assert_eq!(message.message, "  Hello there!  ");
    }

    // -------------------------------------------------------------------------
    // Pipeline ordering
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn fallback_returns_mailto_link() {
        let limiter = limiter();
        let outcome =
            handle_submission(&limiter, None, "from@example.com", "1.2.3.4", &valid_body()).await;
        match outcome {
            RelayOutcome::Fallback { mailto } => {
                assert!(mailto.starts_with("mailto:owner@example.com?subject="));
                assert!(mailto.contains("Portfolio%20contact%20from%20Jane"));
            }
            other => panic!("expected fallback, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_json_is_invalid_not_an_error() {
        let limiter = limiter();
        let body = Bytes::from_static(b"not json");
        let outcome =
            handle_submission(&limiter, None, "from@example.com", "1.2.3.4", &body).await;
        assert_eq!(
            outcome,
            RelayOutcome::Invalid {
                reason: "Invalid request body"
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn fourth_submission_in_window_is_rate_limited() {
        let limiter = limiter();
        for _ in 0..3 {
            let outcome =
                handle_submission(&limiter, None, "from@example.com", "1.2.3.4", &valid_body())
                    .await;
            assert!(matches!(outcome, RelayOutcome::Fallback { .. }));
        }
        let outcome =
            handle_submission(&limiter, None, "from@example.com", "1.2.3.4", &valid_body()).await;
        assert_eq!(outcome, RelayOutcome::RateLimited);
    }

    #[tokio::test(start_paused = true)]
    async fn submission_after_window_expiry_is_accepted() {
        let limiter = limiter();
        for _ in 0..4 {
            handle_submission(&limiter, None, "from@example.com", "1.2.3.4", &valid_body()).await;
        }
        tokio::time::advance(Duration::from_secs(61)).await;
        let outcome =
            handle_submission(&limiter, None, "from@example.com", "1.2.3.4", &valid_body()).await;
        assert!(matches!(outcome, RelayOutcome::Fallback { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn rate_gate_counts_garbage_bodies() {
        let limiter = limiter();
        let garbage = Bytes::from_static(b"{{{{");
        for _ in 0..3 {
            let outcome =
                handle_submission(&limiter, None, "from@example.com", "1.2.3.4", &garbage).await;
            assert!(matches!(outcome, RelayOutcome::Invalid { .. }));
        }
        // The 4th request is denied before its body is ever parsed.
        let outcome =
            handle_submission(&limiter, None, "from@example.com", "1.2.3.4", &garbage).await;
        assert_eq!(outcome, RelayOutcome::RateLimited);
    }

    #[tokio::test]
    async fn sources_are_limited_independently() {
        let limiter = limiter();
        for _ in 0..4 {
            handle_submission(&limiter, None, "from@example.com", "1.2.3.4", &valid_body()).await;
        }
        let outcome =
            handle_submission(&limiter, None, "from@example.com", "5.6.7.8", &valid_body()).await;
        assert!(matches!(outcome, RelayOutcome::Fallback { .. }));
    }
}
