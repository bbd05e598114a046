use crate::capability::person::{CreatePersonError, NewPerson, PersonCapability};
use crate::domain::date_of_birth::DateOfBirth;
use crate::domain::person::Person;
use crate::domain::person_name::PersonName;
use crate::domain::person_uuid::PersonUuid;
use crate::worker::Worker;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::Row;

// Dynamic queries with row getters, so building does not need a live database.
#[async_trait]
impl PersonCapability for Worker {
    async fn get_person_by_name(
        &self,
        person_name: &PersonName,
    ) -> Result<Option<Person>, String> {
        let maybe_row = sqlx::query(
            r#"
                SELECT uuid, name, date_of_birth
                FROM person
                WHERE name = $1::TEXT;
            "#,
        )
        .bind(person_name.as_str())
        .fetch_optional(&self.sqlx)
        .await
        .map_err(|err| format!("Error fetching person by name: {}", err))?;

        let row = match maybe_row {
            None => return Ok(None),
            Some(r) => r,
        };

        let uuid = row
            .try_get::<uuid::Uuid, _>("uuid")
            .map_err(|err| format!("Error reading uuid from row: {}", err))?;

        let name = row
            .try_get::<String, _>("name")
            .map_err(|err| format!("Error reading name from row: {}", err))?;

        let date_of_birth = row
            .try_get::<NaiveDate, _>("date_of_birth")
            .map_err(|err| format!("Error reading date_of_birth from row: {}", err))?;

        Ok(Some(Person {
            uuid: PersonUuid::from_uuid(uuid),
            name: PersonName::from_stored(name),
            date_of_birth: DateOfBirth::from_naive_date(date_of_birth),
        }))
    }

    async fn create_person(&self, new_person: NewPerson) -> Result<(), CreatePersonError> {
        sqlx::query(
            r#"
                INSERT INTO person (uuid, name, date_of_birth)
                VALUES ($1::UUID, $2::TEXT, $3::DATE);
            "#,
        )
        .bind(new_person.person_uuid.to_uuid())
        .bind(new_person.person_name.as_str())
        .bind(new_person.date_of_birth.to_naive_date())
        .execute(&self.sqlx)
        .await
        .map_err(|err| match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                CreatePersonError::NameTaken
            }
            _ => CreatePersonError::Store(format!("Error inserting new person: {}", err)),
        })?;

        Ok(())
    }

    async fn update_date_of_birth(
        &self,
        person: &Person,
        date_of_birth: DateOfBirth,
    ) -> Result<(), String> {
        let result = sqlx::query(
            r#"
                UPDATE person
                SET date_of_birth = $2::DATE,
                    updated_at = NOW()
                WHERE uuid = $1::UUID;
            "#,
        )
        .bind(person.uuid.to_uuid())
        .bind(date_of_birth.to_naive_date())
        .execute(&self.sqlx)
        .await
        .map_err(|err| format!("Error updating date of birth: {}", err))?;

        if result.rows_affected() == 0 {
            return Err(format!(
                "Person {} disappeared before its date of birth could be updated",
                person.name
            ));
        }

        Ok(())
    }
}
