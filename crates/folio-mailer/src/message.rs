//! Contact-message rendering: subject, HTML and plain-text bodies, and the
//! `mailto:` fallback link.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters kept verbatim in `mailto:` query components: ASCII
/// alphanumerics plus `-_.!~*'()`. Everything else is percent-encoded.
const MAILTO_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// A validated contact-form submission, ready to render into an email or a
/// `mailto:` link. Fields arrive already validated; rendering never fails.
#[derive(Debug, Clone)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactMessage {
    /// Subject line interpolating the submitter's name.
    #[must_use]
    pub fn subject(&self) -> String {
        format!("Portfolio contact from {}", self.name)
    }

    /// HTML body with message newlines converted to `<br>`.
    #[must_use]
    pub fn html_body(&self) -> String {
        format!(
            "<h2>New contact form submission</h2>\n\
             <p><strong>Name:</strong> {name}</p>\n\
             <p><strong>Email:</strong> <a href=\"mailto:{email}\">{email}</a></p>\n\
             <p><strong>Message:</strong></p>\n\
             <p>{message}</p>\n\
             <hr>\n\
             <p><small>You can reply directly to this email to respond to {name}.</small></p>",
            name = self.name,
            email = self.email,
            message = self.message.replace('\n', "<br>"),
        )
    }

    /// Plain-text body with the message verbatim.
    #[must_use]
    pub fn text_body(&self) -> String {
        format!(
            "New contact form submission\n\n\
             Name: {name}\n\
             Email: {email}\n\n\
             Message:\n\
             {message}\n\n\
             ---\n\
             You can reply directly to this email to respond to {name}.",
            name = self.name,
            email = self.email,
            message = self.message,
        )
    }

    /// Builds the `mailto:` fallback link for `recipient`, with the subject
    /// and a body reproducing the submission percent-encoded into the query.
    #[must_use]
    pub fn mailto(&self, recipient: &str) -> String {
        let subject = self.subject();
        let body = format!(
            "Name: {}\nEmail: {}\n\nMessage:\n{}",
            self.name, self.email, self.message
        );
        format!(
            "mailto:{recipient}?subject={}&body={}",
            utf8_percent_encode(&subject, MAILTO_SET),
            utf8_percent_encode(&body, MAILTO_SET),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message() -> ContactMessage {
        ContactMessage {
            name: "Jane".to_string(),
            email: "jane@example.com".to_string(),
            message: "Hello there, world!".to_string(),
        }
    }

    #[test]
    fn subject_interpolates_name() {
        assert_eq!(message().subject(), "Portfolio contact from Jane");
    }

    #[test]
    fn html_body_converts_newlines_to_breaks() {
        let mut msg = message();
        msg.message = "line one\nline two".to_string();
        let html = msg.html_body();
        assert!(html.contains("line one<br>line two"));
        assert!(html.contains("<a href=\"mailto:jane@example.com\">jane@example.com</a>"));
    }

    #[test]
    fn text_body_keeps_message_verbatim() {
        let mut msg = message();
        msg.message = "line one\nline two".to_string();
        let text = msg.text_body();
        assert!(text.contains("Message:\nline one\nline two"));
        assert!(text.contains("Name: Jane"));
    }

    #[test]
    fn mailto_encodes_subject_and_body() {
        let link = message().mailto("to@example.com");
        assert_eq!(
            link,
            "mailto:to@example.com?subject=Portfolio%20contact%20from%20Jane\
             &body=Name%3A%20Jane%0AEmail%3A%20jane%40example.com%0A%0AMessage%3A%0A\
             Hello%20there%2C%20world!"
        );
    }

    #[test]
    fn mailto_encodes_non_ascii_message() {
        let mut msg = message();
        msg.message = "Привіт".to_string();
        let link = msg.mailto("to@example.com");
        assert!(link.contains("%D0%9F"), "expected UTF-8 escapes, got: {link}");
    }
}
