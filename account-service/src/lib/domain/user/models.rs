use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use email_address::Options;
use uuid::Uuid;

use crate::domain::user::errors::Rule;

/// User aggregate entity.
///
/// Represents a registered account. The email is the identity bound into
/// access tokens and is unique across the store.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub email: EmailAddress,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

fn check_length(value: &str, min: usize, max: usize, broken: &mut Vec<Rule>) {
    let length = value.chars().count();
    if length < min {
        broken.push(Rule::TooShort { min });
    } else if length > max {
        broken.push(Rule::TooLong { max });
    }
}

fn into_result<T>(value: T, broken: Vec<Rule>) -> Result<T, Vec<Rule>> {
    if broken.is_empty() {
        Ok(value)
    } else {
        Err(broken)
    }
}

/// Username value type
///
/// 3-20 characters, ASCII letters, digits and underscore only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    pub const MIN_LENGTH: usize = 3;
    pub const MAX_LENGTH: usize = 20;

    /// Create a new valid username.
    ///
    /// # Errors
    /// Every rule the raw value breaks (`TooShort`, `TooLong`,
    /// `InvalidCharacters`)
    pub fn new(username: String) -> Result<Self, Vec<Rule>> {
        let mut broken = Vec::new();
        check_length(&username, Self::MIN_LENGTH, Self::MAX_LENGTH, &mut broken);

        if !username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            broken.push(Rule::InvalidCharacters);
        }

        into_result(Self(username), broken)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// First or last name, 3-20 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName(String);

impl PersonName {
    pub const MIN_LENGTH: usize = 3;
    pub const MAX_LENGTH: usize = 20;

    pub fn new(name: String) -> Result<Self, Vec<Rule>> {
        let mut broken = Vec::new();
        check_length(&name, Self::MIN_LENGTH, Self::MAX_LENGTH, &mut broken);
        into_result(Self(name), broken)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Email address type
///
/// Only the bare `local@domain` form is accepted: no display text, no
/// quoted local part, no IP-literal domain. The domain must end in an
/// alphabetic top-level label of at least two characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// `[Rule::InvalidFormat]` when the address does not parse
    pub fn new(email: String) -> Result<Self, Vec<Rule>> {
        let options = Options::default()
            .with_required_tld()
            .without_domain_literal()
            .without_display_text();

        match email_address::EmailAddress::parse_with_options(&email, options) {
            Ok(parsed)
                if parsed.as_str() == email
                    && !parsed.local_part().starts_with('"')
                    && Self::has_alphabetic_tld(parsed.domain()) =>
            {
                Ok(Self(email))
            }
            _ => Err(vec![Rule::InvalidFormat]),
        }
    }

    fn has_alphabetic_tld(domain: &str) -> bool {
        match domain.rsplit_once('.') {
            Some((rest, tld)) => {
                !rest.is_empty()
                    && tld.len() >= 2
                    && tld.chars().all(|c| c.is_ascii_alphabetic())
            }
            None => false,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password that satisfied the strength policy.
///
/// Lives only for the duration of a request. `Debug` is redacted so the
/// value cannot leak through logs or error chains.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    pub const MIN_LENGTH: usize = 8;
    pub const MAX_LENGTH: usize = 100;

    /// Apply the strength policy.
    ///
    /// Requires 8-100 characters with at least one ASCII uppercase letter,
    /// lowercase letter, digit, and one character that is not an ASCII
    /// letter or digit.
    pub fn new(password: String) -> Result<Self, Vec<Rule>> {
        let mut broken = Vec::new();
        check_length(&password, Self::MIN_LENGTH, Self::MAX_LENGTH, &mut broken);

        if !password.chars().any(|c| c.is_ascii_uppercase()) {
            broken.push(Rule::MissingUppercase);
        }
        if !password.chars().any(|c| c.is_ascii_lowercase()) {
            broken.push(Rule::MissingLowercase);
        }
        if !password.chars().any(|c| c.is_ascii_digit()) {
            broken.push(Rule::MissingDigit);
        }
        if !password.chars().any(|c| !c.is_ascii_alphanumeric()) {
            broken.push(Rule::MissingSymbol);
        }

        into_result(Self(password), broken)
    }

    /// Plaintext, for hashing or verification only.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password([redacted])")
    }
}

/// Validated registration request.
#[derive(Debug)]
pub struct RegisterUserCommand {
    pub username: Username,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub email: EmailAddress,
    pub password: Password,
}

/// Validated login request.
#[derive(Debug)]
pub struct LoginCommand {
    pub email: EmailAddress,
    pub password: Password,
}

/// Token issued by a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken(pub String);

impl AccessToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_rules() {
        assert!(Username::new("alice_01".to_string()).is_ok());
        assert_eq!(
            Username::new("al".to_string()),
            Err(vec![Rule::TooShort { min: 3 }])
        );
        assert_eq!(
            Username::new("a".repeat(21)),
            Err(vec![Rule::TooLong { max: 20 }])
        );
        assert_eq!(
            Username::new("alice-01".to_string()),
            Err(vec![Rule::InvalidCharacters])
        );
        assert_eq!(
            Username::new("a!".to_string()),
            Err(vec![Rule::TooShort { min: 3 }, Rule::InvalidCharacters])
        );
    }

    #[test]
    fn test_username_length_bounds_are_inclusive() {
        assert!(Username::new("abc".to_string()).is_ok());
        assert!(Username::new("a".repeat(20)).is_ok());
    }

    #[test]
    fn test_person_name_counts_characters_not_bytes() {
        assert!(PersonName::new("Zoë".to_string()).is_ok());
        assert!(PersonName::new("Éléonore-Françoise".to_string()).is_ok());
        assert_eq!(
            PersonName::new("Jo".to_string()),
            Err(vec![Rule::TooShort { min: 3 }])
        );
    }

    #[test]
    fn test_email_rules() {
        assert!(EmailAddress::new("alice@example.com".to_string()).is_ok());
        assert!(EmailAddress::new("alice.smith+tag@mail.example.org".to_string()).is_ok());

        for invalid in [
            "",
            "not-an-email",
            "alice@",
            "@example.com",
            "alice@localhost",
            "Alice <alice@example.com>",
            "alice@[127.0.0.1]",
            "a@b.c",
            "\"al ice\"@example.com",
            "alice@example.c0m",
            " alice@example.com",
        ] {
            assert_eq!(
                EmailAddress::new(invalid.to_string()),
                Err(vec![Rule::InvalidFormat]),
                "{invalid} should be rejected"
            );
        }
    }

    #[test]
    fn test_password_rules() {
        assert!(Password::new("Str0ng!Pass".to_string()).is_ok());
        assert!(Password::new("Str0ng_Pass".to_string()).is_ok());

        assert_eq!(
            Password::new("weak".to_string()),
            Err(vec![
                Rule::TooShort { min: 8 },
                Rule::MissingUppercase,
                Rule::MissingDigit,
                Rule::MissingSymbol,
            ])
        );
        assert_eq!(
            Password::new("str0ng!pass".to_string()),
            Err(vec![Rule::MissingUppercase])
        );
        assert_eq!(
            Password::new("STR0NG!PASS".to_string()),
            Err(vec![Rule::MissingLowercase])
        );
        assert_eq!(
            Password::new("Strong!Pass".to_string()),
            Err(vec![Rule::MissingDigit])
        );
        assert_eq!(
            Password::new("Str0ngPass".to_string()),
            Err(vec![Rule::MissingSymbol])
        );
        assert_eq!(
            Password::new(format!("Aa1!{}", "x".repeat(97))),
            Err(vec![Rule::TooLong { max: 100 }])
        );
    }

    #[test]
    fn test_password_debug_is_redacted() {
        let password = Password::new("Str0ng!Pass".to_string()).unwrap();

        assert_eq!(format!("{:?}", password), "Password([redacted])");
        assert_eq!(password.expose(), "Str0ng!Pass");
    }
}
