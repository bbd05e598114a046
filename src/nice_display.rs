use std::fmt::Display;

/// A human readable error, printed as-is when the process gives up.
#[derive(Debug)]
pub struct NiceError {
    content: String,
}

impl Display for NiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

pub trait NiceDisplay {
    fn message(&self) -> String;
    fn to_nice_error(&self) -> NiceError {
        NiceError {
            content: self.message(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::HttpPortError;

    #[test]
    fn nested_messages_are_kept_verbatim() {
        let err = HttpPortError::Parsing {
            value: "eighty".to_string(),
            err: "eighty".parse::<u16>().unwrap_err(),
        };

        assert_eq!(
            err.to_nice_error().to_string(),
            "PORT 'eighty' is not a valid port: invalid digit found in string"
        );
    }
}
