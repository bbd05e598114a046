use crate::nice_display::NiceDisplay;
use actix_web::http::StatusCode;

pub const MAX_LENGTH: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName(String);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameError {
    Empty,
    TooLong,
    InvalidCharacters,
}

impl NiceDisplay for NameError {
    fn message(&self) -> String {
        match self {
            NameError::Empty => "Username cannot be empty.".to_string(),
            NameError::TooLong => format!(
                "Username is too long. Maximum length is {} characters.",
                MAX_LENGTH
            ),
            NameError::InvalidCharacters => {
                "Invalid username. Only letters are allowed.".to_string()
            }
        }
    }
}

impl NameError {
    pub fn status_hint(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }
}

// Evaluated in order; the first rule that matches decides the error.
const RULES: [(fn(&str) -> bool, NameError); 3] = [
    (is_empty, NameError::Empty),
    (is_too_long, NameError::TooLong),
    (has_non_letters, NameError::InvalidCharacters),
];

fn is_empty(name: &str) -> bool {
    name.is_empty()
}

fn is_too_long(name: &str) -> bool {
    name.chars().count() > MAX_LENGTH
}

fn has_non_letters(name: &str) -> bool {
    !name.chars().all(|c| c.is_ascii_alphabetic())
}

impl PersonName {
    pub fn parse(name: String) -> Result<Self, NameError> {
        match RULES.iter().find(|(breaks_rule, _)| breaks_rule(&name)) {
            Some((_, err)) => Err(*err),
            None => Ok(Self(name)),
        }
    }

    /// For names read back from the store, which were validated on the way in.
    pub fn from_stored(name: String) -> Self {
        Self(name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PersonName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
