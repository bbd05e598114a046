pub mod clock;
pub mod person;
