use railbook_core::passenger::validate_fields;
use railbook_core::{FieldErrors, Passenger, PassengerClass, PassengerFields, PassengerId};

/// Known passengers of one session, in insertion order
#[derive(Debug, Clone, Default)]
pub struct PassengerRegistry {
    passengers: Vec<Passenger>,
}

impl PassengerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-seeded with the two demo contacts
    pub fn with_demo_passengers() -> Self {
        let demo = |id: &str, name: &str, national_id: &str, phone: &str| Passenger {
            id: PassengerId::from(id),
            name: name.to_string(),
            national_id: national_id.into(),
            phone: phone.into(),
            passenger_class: PassengerClass::Adult,
        };

        Self {
            passengers: vec![
                demo("1", "张三", "110101199001011234", "13800138000"),
                demo("2", "李四", "110101199501011234", "13800138001"),
            ],
        }
    }

    /// Validate and append a new passenger under a fresh id
    pub fn add(&mut self, fields: PassengerFields) -> Result<Passenger, RegistryError> {
        validate_fields(&fields)?;

        let mut id = PassengerId::generate();
        while self.get(&id).is_some() {
            id = PassengerId::generate();
        }

        let passenger = Passenger::from_fields(id, fields);
        tracing::debug!(passenger_id = %passenger.id, national_id = %passenger.national_id, "Passenger added");
        self.passengers.push(passenger.clone());
        Ok(passenger)
    }

    /// Insert a passenger with a caller-chosen id (seeding, imports)
    pub fn insert(&mut self, passenger: Passenger) -> Result<(), RegistryError> {
        if self.get(&passenger.id).is_some() {
            return Err(RegistryError::DuplicateId(passenger.id));
        }
        validate_fields(&passenger.fields())?;
        self.passengers.push(passenger);
        Ok(())
    }

    /// Replace every field of an existing passenger
    pub fn edit(&mut self, id: &PassengerId, fields: PassengerFields) -> Result<Passenger, RegistryError> {
        let position = self.position(id)?;
        validate_fields(&fields)?;

        let passenger = Passenger::from_fields(id.clone(), fields);
        self.passengers[position] = passenger.clone();
        tracing::debug!(passenger_id = %id, "Passenger edited");
        Ok(passenger)
    }

    pub fn remove(&mut self, id: &PassengerId) -> Result<Passenger, RegistryError> {
        let position = self.position(id)?;
        let removed = self.passengers.remove(position);
        tracing::debug!(passenger_id = %id, "Passenger removed");
        Ok(removed)
    }

    pub fn get(&self, id: &PassengerId) -> Option<&Passenger> {
        self.passengers.iter().find(|p| &p.id == id)
    }

    pub fn list(&self) -> &[Passenger] {
        &self.passengers
    }

    pub fn len(&self) -> usize {
        self.passengers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passengers.is_empty()
    }

    fn position(&self, id: &PassengerId) -> Result<usize, RegistryError> {
        self.passengers
            .iter()
            .position(|p| &p.id == id)
            .ok_or_else(|| RegistryError::NotFound(id.clone()))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Passenger not found: {0}")]
    NotFound(PassengerId),

    #[error("Passenger id already registered: {0}")]
    DuplicateId(PassengerId),

    #[error(transparent)]
    Invalid(#[from] FieldErrors),
}
