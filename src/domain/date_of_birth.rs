use crate::nice_display::NiceDisplay;
use chrono::NaiveDate;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateOfBirth(NaiveDate);

#[derive(Debug, PartialEq, Eq)]
pub enum DateOfBirthError {
    Malformed(String),
    InTheFuture(NaiveDate),
}

impl NiceDisplay for DateOfBirthError {
    fn message(&self) -> String {
        "Date of birth must be before today and in YYYY-MM-DD format.".to_string()
    }
}

impl DateOfBirthError {
    pub fn reason(&self) -> String {
        match self {
            DateOfBirthError::Malformed(input) => format!("'{}' is not YYYY-MM-DD", input),
            DateOfBirthError::InTheFuture(date) => format!("{} is in the future", date),
        }
    }
}

impl DateOfBirth {
    /// Accepts only zero padded `YYYY-MM-DD` dates that are not after `today`.
    pub fn parse(s: &str, today: NaiveDate) -> Result<Self, DateOfBirthError> {
        let date = NaiveDate::parse_from_str(s, DATE_FORMAT)
            .ok()
            .filter(|date| date.format(DATE_FORMAT).to_string() == s)
            .ok_or_else(|| DateOfBirthError::Malformed(s.to_string()))?;

        if date > today {
            return Err(DateOfBirthError::InTheFuture(date));
        }

        Ok(Self(date))
    }

    pub fn from_naive_date(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn to_naive_date(&self) -> NaiveDate {
        self.0
    }
}

impl std::fmt::Display for DateOfBirth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}
