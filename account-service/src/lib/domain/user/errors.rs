use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Input field a validation rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    UserName,
    FirstName,
    LastName,
    Email,
    Password,
}

impl Field {
    fn label(self) -> &'static str {
        match self {
            Field::UserName => "Username",
            Field::FirstName => "Firstname",
            Field::LastName => "Lastname",
            Field::Email => "Email",
            Field::Password => "Password",
        }
    }
}

/// A single structural rule an input value broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    TooShort { min: usize },
    TooLong { max: usize },
    InvalidCharacters,
    InvalidFormat,
    MissingUppercase,
    MissingLowercase,
    MissingDigit,
    MissingSymbol,
}

/// Rule violation tagged with the field it was found on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Violation {
    pub field: Field,
    pub rule: Rule,
}

impl Violation {
    pub fn new(field: Field, rule: Rule) -> Self {
        Self { field, rule }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = self.field.label();
        match self.rule {
            Rule::TooShort { min } => write!(f, "{label} must be at least {min} characters"),
            Rule::TooLong { max } => write!(f, "{label} must be at most {max} characters"),
            Rule::InvalidCharacters => write!(
                f,
                "{label} can only contain letters, numbers, and underscores"
            ),
            Rule::InvalidFormat => write!(f, "Invalid {} format", label.to_lowercase()),
            Rule::MissingUppercase => {
                write!(f, "{label} must contain at least one uppercase letter")
            }
            Rule::MissingLowercase => {
                write!(f, "{label} must contain at least one lowercase letter")
            }
            Rule::MissingDigit => write!(f, "{label} must contain at least one number"),
            Rule::MissingSymbol => write!(f, "{label} must contain at least one special character"),
        }
    }
}

impl Serialize for Violation {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("Violation", 2)?;
        state.serialize_field("field", &self.field)?;
        state.serialize_field("reason", &self.to_string())?;
        state.end()
    }
}

/// Every violation found in one input record. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Validation failed")]
pub struct ValidationErrors(Vec<Violation>);

impl ValidationErrors {
    pub(crate) fn new(violations: Vec<Violation>) -> Self {
        debug_assert!(!violations.is_empty());
        Self(violations)
    }

    pub fn violations(&self) -> &[Violation] {
        &self.0
    }

    /// Whether `field` broke `rule`.
    pub fn contains(&self, field: Field, rule: Rule) -> bool {
        self.0.contains(&Violation::new(field, rule))
    }
}

/// Top-level error for all account operations
#[derive(Debug, Clone, Error)]
pub enum UserError {
    // Input errors
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    // Domain-level errors
    #[error("User already exists: {0}")]
    EmailAlreadyExists(String),

    #[error("User does not exist: {0}")]
    UnknownEmail(String),

    #[error("Password mismatch")]
    PasswordMismatch,

    #[error("User not found: {0}")]
    NotFound(String),

    #[error("No users exist")]
    NoUsers,

    // Infrastructure errors
    #[error("Password error: {0}")]
    Password(#[from] auth::PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] auth::TokenError),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for UserError {
    fn from(err: anyhow::Error) -> Self {
        UserError::Unknown(err.to_string())
    }
}
