use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PersonUuid(Uuid);

impl PersonUuid {
    pub fn from_uuid(u: Uuid) -> Self {
        Self(u)
    }

    pub fn to_uuid(&self) -> Uuid {
        self.0
    }

    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}
