//! Synchronous contact-form validation. Every rule runs on every pass so the
//! user sees all invalid fields at once.

use shared::domain::{ContactField, ContactFields};

pub const NAME_REQUIRED: &str = "Name is required";
pub const NAME_TOO_SHORT: &str = "Name must be at least 2 characters";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Please enter a valid email";
pub const MESSAGE_REQUIRED: &str = "Message is required";
pub const MESSAGE_TOO_SHORT: &str = "Message must be at least 10 characters";

const NAME_MIN_CHARS: usize = 2;
const MESSAGE_MIN_CHARS: usize = 10;

/// Per-field validation messages. `None` means the field is valid (or has not
/// been re-validated since the user last edited it).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    name: Option<String>,
    email: Option<String>,
    message: Option<String>,
}

impl FieldErrors {
    pub fn get(&self, field: ContactField) -> Option<&str> {
        match field {
            ContactField::Name => self.name.as_deref(),
            ContactField::Email => self.email.as_deref(),
            ContactField::Message => self.message.as_deref(),
        }
    }

    pub fn clear(&mut self, field: ContactField) {
        match field {
            ContactField::Name => self.name = None,
            ContactField::Email => self.email = None,
            ContactField::Message => self.message = None,
        }
    }

    pub fn is_valid(&self) -> bool {
        ContactField::ALL
            .iter()
            .all(|field| self.get(*field).is_none())
    }

    fn set(&mut self, field: ContactField, message: &str) {
        let message = Some(message.to_string());
        match field {
            ContactField::Name => self.name = message,
            ContactField::Email => self.email = message,
            ContactField::Message => self.message = message,
        }
    }
}

/// Minimal `local@domain.tld` shape, deliberately not a full RFC validator:
/// no whitespace anywhere, exactly one `@` with a non-empty local part, and a
/// domain containing a dot with non-empty parts on both sides.
fn matches_email_shape(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Pure validation pass over the current field values.
pub fn validate(fields: &ContactFields) -> FieldErrors {
    let mut errors = FieldErrors::default();

    let name = fields.name.trim();
    if name.is_empty() {
        errors.set(ContactField::Name, NAME_REQUIRED);
    } else if name.chars().count() < NAME_MIN_CHARS {
        errors.set(ContactField::Name, NAME_TOO_SHORT);
    }

    // The shape check runs on the raw value; surrounding whitespace fails it.
    if fields.email.trim().is_empty() {
        errors.set(ContactField::Email, EMAIL_REQUIRED);
    } else if !matches_email_shape(&fields.email) {
        errors.set(ContactField::Email, EMAIL_INVALID);
    }

    let message = fields.message.trim();
    if message.is_empty() {
        errors.set(ContactField::Message, MESSAGE_REQUIRED);
    } else if message.chars().count() < MESSAGE_MIN_CHARS {
        errors.set(ContactField::Message, MESSAGE_TOO_SHORT);
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(name: &str, email: &str, message: &str) -> ContactFields {
        ContactFields {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    #[test]
    fn empty_fields_report_all_required() {
        let errors = validate(&fields("", "", ""));
        assert_eq!(errors.get(ContactField::Name), Some(NAME_REQUIRED));
        assert_eq!(errors.get(ContactField::Email), Some(EMAIL_REQUIRED));
        assert_eq!(errors.get(ContactField::Message), Some(MESSAGE_REQUIRED));
        assert!(!errors.is_valid());
    }

    #[test]
    fn whitespace_only_fields_count_as_empty() {
        let errors = validate(&fields("   ", " \t ", "  \n "));
        assert_eq!(errors.get(ContactField::Name), Some(NAME_REQUIRED));
        assert_eq!(errors.get(ContactField::Email), Some(EMAIL_REQUIRED));
        assert_eq!(errors.get(ContactField::Message), Some(MESSAGE_REQUIRED));
    }

    #[test]
    fn too_short_values_report_length_rules() {
        let errors = validate(&fields("A", "bad", "short"));
        assert_eq!(errors.get(ContactField::Name), Some(NAME_TOO_SHORT));
        assert_eq!(errors.get(ContactField::Email), Some(EMAIL_INVALID));
        assert_eq!(errors.get(ContactField::Message), Some(MESSAGE_TOO_SHORT));
    }

    #[test]
    fn trimmed_length_decides_length_rules() {
        let errors = validate(&fields("  B  ", "jane@example.com", "  123456789  "));
        assert_eq!(errors.get(ContactField::Name), Some(NAME_TOO_SHORT));
        assert_eq!(errors.get(ContactField::Message), Some(MESSAGE_TOO_SHORT));
    }

    #[test]
    fn valid_fields_produce_no_errors() {
        let errors = validate(&fields(
            "Jane Doe",
            "jane@example.com",
            "This is a sufficiently long message.",
        ));
        assert!(errors.is_valid());
        for field in ContactField::ALL {
            assert_eq!(errors.get(field), None);
        }
    }

    #[test]
    fn email_shape_accepts_minimal_local_domain_tld() {
        assert!(matches_email_shape("a@b.c"));
        assert!(matches_email_shape("first.last@mail.example.co"));
    }

    #[test]
    fn email_shape_rejects_malformed_addresses() {
        assert!(!matches_email_shape("plainaddress"));
        assert!(!matches_email_shape("@example.com"));
        assert!(!matches_email_shape("jane@example"));
        assert!(!matches_email_shape("jane@.com"));
        assert!(!matches_email_shape("jane@example."));
        assert!(!matches_email_shape("jane@@example.com"));
        assert!(!matches_email_shape("jane doe@example.com"));
        assert!(!matches_email_shape(" jane@example.com "));
    }

    #[test]
    fn validate_is_deterministic() {
        let input = fields("A", "bad", "short");
        assert_eq!(validate(&input), validate(&input));
    }
}
