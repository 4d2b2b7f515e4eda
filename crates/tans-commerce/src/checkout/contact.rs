//! Customer contact details collected at checkout.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Raw contact form input, exactly as typed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    /// Free-text customization request.
    pub customization_note: String,
}

impl ContactForm {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        customization_note: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            customization_note: customization_note.into(),
        }
    }

    /// Clear every field.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Validate all fields, collecting every field-level problem.
    pub fn validate(&self) -> Result<ValidContact, ValidationErrors> {
        let mut errors = Vec::new();

        let name = self.name.trim();
        if name.is_empty() {
            errors.push(FieldError::new(ContactField::Name, "Please enter your name"));
        }

        let email = self.email.trim();
        if email.is_empty() {
            errors.push(FieldError::new(ContactField::Email, "Please enter your email"));
        } else if !is_valid_email(email) {
            errors.push(FieldError::new(
                ContactField::Email,
                "Please enter a valid email address",
            ));
        }

        if !errors.is_empty() {
            return Err(ValidationErrors(errors));
        }

        let note = self.customization_note.trim();
        Ok(ValidContact {
            name: name.to_string(),
            email: email.to_string(),
            customization_note: (!note.is_empty()).then(|| note.to_string()),
        })
    }
}

/// Basic `local@domain.tld` shape check.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.find('.') {
        Some(_) => !domain.starts_with('.') && !domain.ends_with('.'),
        None => false,
    }
}

/// Contact details that passed validation. Fields are trimmed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidContact {
    pub name: String,
    pub email: String,
    pub customization_note: Option<String>,
}

/// Form field a validation message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactField {
    Name,
    Email,
}

impl ContactField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactField::Name => "name",
            ContactField::Email => "email",
        }
    }
}

/// One field-level validation message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: ContactField,
    pub message: String,
}

impl FieldError {
    fn new(field: ContactField, message: &str) -> Self {
        Self {
            field,
            message: message.to_string(),
        }
    }
}

/// Every validation failure found in a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    /// Message for one field, if it failed.
    pub fn for_field(&self, field: ContactField) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|e| format!("{}: {}", e.field.as_str(), e.message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_form_is_trimmed() {
        let form = ContactForm::new("  Priya  ", " priya@example.com ", "  gold foil please ");
        let contact = form.validate().unwrap();
        assert_eq!(contact.name, "Priya");
        assert_eq!(contact.email, "priya@example.com");
        assert_eq!(contact.customization_note.as_deref(), Some("gold foil please"));
    }

    #[test]
    fn test_blank_note_becomes_none() {
        let form = ContactForm::new("Priya", "priya@example.com", "   ");
        assert_eq!(form.validate().unwrap().customization_note, None);
    }

    #[test]
    fn test_errors_are_per_field() {
        let form = ContactForm::new("   ", "abc", "");
        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors.0.iter().map(|e| e.field).collect::<Vec<_>>(),
            vec![ContactField::Name, ContactField::Email]
        );
        assert_eq!(
            errors.for_field(ContactField::Email),
            Some("Please enter a valid email address")
        );
    }

    #[test]
    fn test_missing_email() {
        let errors = ContactForm::new("Priya", "", "").validate().unwrap_err();
        assert_eq!(errors.for_field(ContactField::Email), Some("Please enter your email"));
        assert_eq!(errors.for_field(ContactField::Name), None);
    }

    #[test]
    fn test_email_shapes() {
        for good in ["a@b.co", "first.last@mail.example.com", "x+tag@shop.in"] {
            assert!(is_valid_email(good), "{good} should be accepted");
        }
        for bad in ["abc", "@b.co", "a@", "a@b", "a@.com", "a@b.", "a b@c.com", "a@b@c.com"] {
            assert!(!is_valid_email(bad), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_reset() {
        let mut form = ContactForm::new("Priya", "priya@example.com", "note");
        form.reset();
        assert_eq!(form, ContactForm::default());
    }
}
