use serde::{Deserialize, Serialize};

/// Intake form record. Created empty at session start, overwritten by the
/// intake form, never deleted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub company: String,
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactField {
    Company,
    Name,
    Email,
    Phone,
}

impl ContactField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Company => "company",
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
        }
    }
}

/// Field-scoped validation failure, rendered inline by the host UI.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: ContactField,
    pub message: String,
}

impl FieldError {
    fn new(field: ContactField, message: impl Into<String>) -> Self {
        Self { field, message: message.into() }
    }
}

impl Contact {
    pub fn is_complete(&self) -> bool {
        validate(self).is_empty()
    }
}

/// Validate every field. An empty result means the contact may advance the
/// wizard; failures are data, not errors.
pub fn validate(contact: &Contact) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if contact.company.trim().is_empty() {
        errors.push(FieldError::new(ContactField::Company, "Company is required"));
    }
    if contact.name.trim().is_empty() {
        errors.push(FieldError::new(ContactField::Name, "Name is required"));
    }

    let email = contact.email.trim();
    if email.is_empty() {
        errors.push(FieldError::new(ContactField::Email, "Email is required"));
    } else if !is_valid_email(email) {
        errors.push(FieldError::new(ContactField::Email, "Enter a valid email address"));
    }

    let phone = contact.phone.trim();
    if phone.is_empty() {
        errors.push(FieldError::new(ContactField::Phone, "Phone is required"));
    } else if !is_valid_phone(phone) {
        errors.push(FieldError::new(ContactField::Phone, "Enter a valid phone number"));
    }

    errors
}

/// Single `@`, non-empty local part, dotted domain with non-empty labels.
pub fn is_valid_email(value: &str) -> bool {
    let mut parts = value.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() || domain.is_empty() {
        return false;
    }
    if value.chars().any(char::is_whitespace) {
        return false;
    }

    let mut labels = domain.split('.');
    let first = labels.next().unwrap_or_default();
    let mut rest = labels.peekable();
    if first.is_empty() || rest.peek().is_none() {
        return false;
    }
    rest.all(|label| !label.is_empty())
}

/// After trimming: digits, spaces, `+`, `(`, `)`, `-` only, at least 8
/// characters total.
pub fn is_valid_phone(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.len() >= 8
        && trimmed.chars().all(|c| c.is_ascii_digit() || matches!(c, ' ' | '+' | '(' | ')' | '-'))
}
