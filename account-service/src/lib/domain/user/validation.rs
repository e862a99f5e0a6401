//! Registration and login schemas.
//!
//! Each schema checks every field eagerly and reports all violations at
//! once; a command is only produced when the input is entirely clean.

use crate::domain::user::errors::Field;
use crate::domain::user::errors::Rule;
use crate::domain::user::errors::ValidationErrors;
use crate::domain::user::errors::Violation;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::Password;
use crate::domain::user::models::PersonName;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::Username;

/// Raw registration input, straight off the wire.
#[derive(Clone, Default)]
pub struct RegistrationInput {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// Raw login input, straight off the wire.
#[derive(Clone, Default)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

#[derive(Default)]
struct Violations(Vec<Violation>);

impl Violations {
    fn check<T>(&mut self, field: Field, result: Result<T, Vec<Rule>>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(rules) => {
                self.0
                    .extend(rules.into_iter().map(|rule| Violation::new(field, rule)));
                None
            }
        }
    }

    fn into_error(self) -> ValidationErrors {
        ValidationErrors::new(self.0)
    }
}

impl RegistrationInput {
    /// Apply the registration schema.
    ///
    /// # Errors
    /// Every violation across all five fields
    pub fn validate(self) -> Result<RegisterUserCommand, ValidationErrors> {
        let mut violations = Violations::default();

        let username = violations.check(Field::UserName, Username::new(self.username));
        let first_name = violations.check(Field::FirstName, PersonName::new(self.first_name));
        let last_name = violations.check(Field::LastName, PersonName::new(self.last_name));
        let email = violations.check(Field::Email, EmailAddress::new(self.email));
        let password = violations.check(Field::Password, Password::new(self.password));

        match (username, first_name, last_name, email, password) {
            (Some(username), Some(first_name), Some(last_name), Some(email), Some(password)) => {
                Ok(RegisterUserCommand {
                    username,
                    first_name,
                    last_name,
                    email,
                    password,
                })
            }
            _ => Err(violations.into_error()),
        }
    }
}

impl LoginInput {
    /// Apply the login schema.
    ///
    /// The password strength policy is applied here too, so malformed login
    /// payloads are rejected before the store is queried.
    ///
    /// # Errors
    /// Every violation across both fields
    pub fn validate(self) -> Result<LoginCommand, ValidationErrors> {
        let mut violations = Violations::default();

        let email = violations.check(Field::Email, EmailAddress::new(self.email));
        let password = violations.check(Field::Password, Password::new(self.password));

        match (email, password) {
            (Some(email), Some(password)) => Ok(LoginCommand { email, password }),
            _ => Err(violations.into_error()),
        }
    }
}
