use crate::domain::{
    date_of_birth::DateOfBirth, person::Person, person_name::PersonName, person_uuid::PersonUuid,
};
use async_trait::async_trait;

pub struct NewPerson {
    pub person_uuid: PersonUuid,
    pub person_name: PersonName,
    pub date_of_birth: DateOfBirth,
}

#[derive(Debug)]
pub enum CreatePersonError {
    /// Another writer already stored a person with this name.
    NameTaken,
    Store(String),
}

#[async_trait]
pub trait PersonCapability {
    async fn get_person_by_name(&self, person_name: &PersonName)
        -> Result<Option<Person>, String>;
    async fn create_person(&self, new_person: NewPerson) -> Result<(), CreatePersonError>;
    async fn update_date_of_birth(
        &self,
        person: &Person,
        date_of_birth: DateOfBirth,
    ) -> Result<(), String>;
}
