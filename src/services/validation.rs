//! Input validation
//!
//! Pure validation rules, separated from persistence: these functions have
//! no side effects and return either normalized fields or per-field error
//! reasons. Repositories only ever see already-validated values.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex is valid"));

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub reason: &'static str,
}

/// All failures for one submission
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors(pub Vec<FieldError>);

impl FieldErrors {
    fn push(&mut self, field: &'static str, reason: &'static str) {
        self.0.push(FieldError { field, reason });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for e in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", e.field, e.reason)?;
            first = false;
        }
        Ok(())
    }
}

/// Normalized collaboration-request fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollaborateFields {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Syntactic email check
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Validate a collaboration request.
///
/// Name, email and message are all required (non-empty after trimming) and
/// the email must be syntactically valid.
pub fn validate_collaborate_request(
    name: &str,
    email: &str,
    message: &str,
) -> Result<CollaborateFields, FieldErrors> {
    let name = name.trim();
    let email = email.trim();
    let message = message.trim();

    let mut errors = FieldErrors::default();
    if name.is_empty() {
        errors.push("name", "This field is required");
    }
    if email.is_empty() {
        errors.push("email", "This field is required");
    } else if !is_valid_email(email) {
        errors.push("email", "Enter a valid email address");
    }
    if message.is_empty() {
        errors.push("message", "This field is required");
    }

    if errors.is_empty() {
        Ok(CollaborateFields {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        })
    } else {
        Err(errors)
    }
}

/// Validate a comment body: required, whitespace-only counts as empty.
pub fn validate_comment_body(body: &str) -> Result<String, FieldErrors> {
    let body = body.trim();
    if body.is_empty() {
        let mut errors = FieldErrors::default();
        errors.push("body", "This field is required");
        return Err(errors);
    }
    Ok(body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_valid_collaborate_request() {
        let fields = validate_collaborate_request(
            "Jo Smith",
            "jo@example.com",
            "I have a project for you.",
        )
        .expect("Should validate");
        assert_eq!(fields.name, "Jo Smith");
        assert_eq!(fields.email, "jo@example.com");
    }

    #[test]
    fn test_fields_are_trimmed() {
        let fields = validate_collaborate_request("  Jo  ", " jo@example.com ", " hi ")
            .expect("Should validate");
        assert_eq!(fields.name, "Jo");
        assert_eq!(fields.email, "jo@example.com");
        assert_eq!(fields.message, "hi");
    }

    #[test]
    fn test_missing_name_fails() {
        let errors = validate_collaborate_request("", "jo@example.com", "hi")
            .expect_err("Should fail");
        assert_eq!(errors.0.len(), 1);
        assert_eq!(errors.0[0].field, "name");
    }

    #[test]
    fn test_whitespace_only_message_fails() {
        let errors = validate_collaborate_request("Jo", "jo@example.com", "   \n\t")
            .expect_err("Should fail");
        assert_eq!(errors.0[0].field, "message");
    }

    #[test]
    fn test_malformed_email_fails() {
        for email in ["not-an-email", "a@b", "a b@c.com", "@example.com", "jo@"] {
            let errors =
                validate_collaborate_request("Jo", email, "hi").expect_err("Should fail");
            assert_eq!(errors.0[0].field, "email", "email {:?}", email);
        }
    }

    #[test]
    fn test_all_fields_missing_reports_each() {
        let errors = validate_collaborate_request("", "", "").expect_err("Should fail");
        let fields: Vec<_> = errors.0.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["name", "email", "message"]);
    }

    #[test]
    fn test_comment_body() {
        assert_eq!(
            validate_comment_body(" Comment body ").expect("Should validate"),
            "Comment body"
        );
        assert!(validate_comment_body("").is_err());
        assert!(validate_comment_body("   ").is_err());
    }

    proptest! {
        /// Validity is exactly the conjunction of the three field rules.
        #[test]
        fn prop_collaborate_verdict(
            name in "\\PC{0,30}",
            email in "\\PC{0,30}",
            message in "\\PC{0,30}",
        ) {
            let expected = !name.trim().is_empty()
                && is_valid_email(email.trim())
                && !message.trim().is_empty();
            prop_assert_eq!(
                validate_collaborate_request(&name, &email, &message).is_ok(),
                expected
            );
        }

        #[test]
        fn prop_comment_body_verdict(body in "\\s{0,5}\\PC{0,30}\\s{0,5}") {
            prop_assert_eq!(validate_comment_body(&body).is_ok(), !body.trim().is_empty());
        }

        #[test]
        fn prop_wellformed_emails_pass(
            local in "[a-z0-9.+-]{1,16}",
            domain in "[a-z0-9-]{1,12}",
            tld in "[a-z]{2,6}",
        ) {
            let email = format!("{}@{}.{}", local, domain, tld);
            prop_assert!(is_valid_email(&email));
        }
    }
}
