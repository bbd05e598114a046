use crate::domain::{
    date_of_birth::DateOfBirth, person_name::PersonName, person_uuid::PersonUuid,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub uuid: PersonUuid,
    pub name: PersonName,
    pub date_of_birth: DateOfBirth,
}
