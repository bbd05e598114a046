pub mod birthday;
pub mod date_of_birth;
pub mod person;
pub mod person_name;
pub mod person_uuid;
