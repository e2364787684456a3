use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DomainError, DomainResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainType {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTrainType {
    pub name: String,
}

/// A train with its type joined in. Capacity is always derived, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Train {
    pub id: Uuid,
    pub name: String,
    pub cargo_count: i32,
    pub seats_per_cargo: i32,
    pub train_type: TrainType,
}

impl Train {
    pub fn capacity(&self) -> i32 {
        self.cargo_count * self.seats_per_cargo
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTrain {
    pub name: String,
    pub cargo_count: i32,
    pub seats_per_cargo: i32,
    pub train_type_id: Uuid,
}

impl NewTrain {
    pub fn validate(&self) -> DomainResult<()> {
        if self.cargo_count < 1 {
            return Err(DomainError::Validation(format!(
                "cargo_count: must be at least 1, got {}",
                self.cargo_count
            )));
        }
        if self.seats_per_cargo < 1 {
            return Err(DomainError::Validation(format!(
                "seats_per_cargo: must be at least 1, got {}",
                self.seats_per_cargo
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn train(cargo_count: i32, seats_per_cargo: i32) -> Train {
        Train {
            id: Uuid::new_v4(),
            name: "Intercity".to_string(),
            cargo_count,
            seats_per_cargo,
            train_type: TrainType {
                id: Uuid::new_v4(),
                name: "Express".to_string(),
            },
        }
    }

    #[test]
    fn capacity_is_cargo_times_seats() {
        assert_eq!(train(9, 45).capacity(), 405);
        assert_eq!(train(2, 2).capacity(), 4);
    }

    #[test]
    fn capacity_tracks_updates_to_either_factor() {
        let mut t = train(3, 10);
        assert_eq!(t.capacity(), 30);
        t.cargo_count = 4;
        assert_eq!(t.capacity(), 40);
        t.seats_per_cargo = 5;
        assert_eq!(t.capacity(), 20);
    }

    #[test]
    fn non_positive_dimensions_are_rejected() {
        let new = NewTrain {
            name: "Ghost".to_string(),
            cargo_count: 0,
            seats_per_cargo: 10,
            train_type_id: Uuid::new_v4(),
        };
        assert!(new.validate().is_err());

        let new = NewTrain {
            name: "Ghost".to_string(),
            cargo_count: 1,
            seats_per_cargo: -1,
            train_type_id: Uuid::new_v4(),
        };
        assert!(new.validate().is_err());
    }
}
