use crate::capability::clock::ClockCapability;
use crate::capability::person::{CreatePersonError, NewPerson, PersonCapability};
use crate::domain::date_of_birth::DateOfBirth;
use crate::domain::person::Person;
use crate::domain::person_name::PersonName;
use crate::domain::person_uuid::PersonUuid;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// In-memory stand-in for `Worker`, pinned to 2024-07-25.
pub struct TestWorker {
    today: NaiveDate,
    persons: Mutex<HashMap<String, Person>>,
    // Stored by someone else right before our first create lands.
    concurrent_create: Mutex<Option<Person>>,
    creates: AtomicUsize,
    failing: bool,
    // Someone deletes the row between our lookup and our update.
    removing_before_update: bool,
}

fn person(name: &str, date_of_birth: &str) -> Person {
    Person {
        uuid: PersonUuid::new(),
        name: PersonName::from_stored(name.to_string()),
        date_of_birth: DateOfBirth::from_naive_date(
            NaiveDate::parse_from_str(date_of_birth, "%Y-%m-%d").unwrap(),
        ),
    }
}

impl TestWorker {
    pub fn new() -> Self {
        TestWorker {
            today: NaiveDate::from_ymd_opt(2024, 7, 25).unwrap(),
            persons: Mutex::new(HashMap::new()),
            concurrent_create: Mutex::new(None),
            creates: AtomicUsize::new(0),
            failing: false,
            removing_before_update: false,
        }
    }

    pub fn with_person(self, name: &str, date_of_birth: &str) -> Self {
        self.persons
            .lock()
            .unwrap()
            .insert(name.to_string(), person(name, date_of_birth));
        self
    }

    pub fn with_concurrent_create(self, name: &str, date_of_birth: &str) -> Self {
        *self.concurrent_create.lock().unwrap() = Some(person(name, date_of_birth));
        self
    }

    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    pub fn removing_before_update(mut self) -> Self {
        self.removing_before_update = true;
        self
    }

    pub fn person_count(&self) -> usize {
        self.persons.lock().unwrap().len()
    }

    pub fn create_count(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }

    pub fn stored_date_of_birth(&self, name: &str) -> Option<String> {
        self.persons
            .lock()
            .unwrap()
            .get(name)
            .map(|person| person.date_of_birth.to_string())
    }

    fn fail_if_asked(&self) -> Result<(), String> {
        if self.failing {
            Err("connection refused".to_string())
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl PersonCapability for TestWorker {
    async fn get_person_by_name(
        &self,
        person_name: &PersonName,
    ) -> Result<Option<Person>, String> {
        self.fail_if_asked()?;
        Ok(self.persons.lock().unwrap().get(person_name.as_str()).cloned())
    }

    async fn create_person(&self, new_person: NewPerson) -> Result<(), CreatePersonError> {
        self.fail_if_asked().map_err(CreatePersonError::Store)?;
        self.creates.fetch_add(1, Ordering::SeqCst);

        let mut persons = self.persons.lock().unwrap();

        if let Some(rival) = self.concurrent_create.lock().unwrap().take() {
            persons.insert(rival.name.as_str().to_string(), rival);
        }

        let name = new_person.person_name.as_str().to_string();
        if persons.contains_key(&name) {
            return Err(CreatePersonError::NameTaken);
        }

        persons.insert(
            name,
            Person {
                uuid: new_person.person_uuid,
                name: new_person.person_name,
                date_of_birth: new_person.date_of_birth,
            },
        );

        Ok(())
    }

    async fn update_date_of_birth(
        &self,
        person: &Person,
        date_of_birth: DateOfBirth,
    ) -> Result<(), String> {
        self.fail_if_asked()?;

        let mut persons = self.persons.lock().unwrap();
        if self.removing_before_update {
            persons.retain(|_, stored| stored.uuid != person.uuid);
        }

        let stored = persons
            .values_mut()
            .find(|stored| stored.uuid == person.uuid)
            .ok_or_else(|| format!("No person with uuid {}", person.uuid.to_uuid()))?;
        stored.date_of_birth = date_of_birth;

        Ok(())
    }
}

impl ClockCapability for TestWorker {
    fn today(&self) -> NaiveDate {
        self.today
    }
}
