use parkade_shared::{ParkingSpace, SpaceType};
use serde::{Deserialize, Serialize};

/// The parking space catalog with per-space availability
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SpaceInventory {
    spaces: Vec<ParkingSpace>,
}

impl SpaceInventory {
    pub fn new(spaces: Vec<ParkingSpace>) -> Self {
        Self { spaces }
    }

    /// Two standard bays on row A (A2 occupied) and two premium bays on row B
    pub fn seeded() -> Self {
        Self::new(vec![
            ParkingSpace::new("S1", SpaceType::Standard, true, "A1"),
            ParkingSpace::new("S2", SpaceType::Standard, false, "A2"),
            ParkingSpace::new("P1", SpaceType::Premium, true, "B1"),
            ParkingSpace::new("P2", SpaceType::Premium, true, "B2"),
        ])
    }

    pub fn spaces(&self) -> &[ParkingSpace] {
        &self.spaces
    }

    pub fn get(&self, space_id: &str) -> Option<&ParkingSpace> {
        self.spaces.iter().find(|s| s.id == space_id)
    }

    /// All spaces of a type, in catalog order
    pub fn of_type(&self, space_type: SpaceType) -> Vec<&ParkingSpace> {
        self.spaces.iter().filter(|s| s.space_type == space_type).collect()
    }

    pub fn available_count(&self, space_type: SpaceType) -> usize {
        self.spaces
            .iter()
            .filter(|s| s.space_type == space_type && s.is_available)
            .count()
    }

    /// Mark a space as taken by a booking
    pub fn occupy(&mut self, space_id: &str) -> Result<&ParkingSpace, InventoryError> {
        let space = self.spaces.iter_mut()
            .find(|s| s.id == space_id)
            .ok_or_else(|| InventoryError::NotFound(space_id.to_string()))?;

        if !space.is_available {
            return Err(InventoryError::Unavailable(space_id.to_string()));
        }

        space.is_available = false;
        Ok(space)
    }

    /// Return a space to the pool. Unknown ids are ignored and reported as `false`.
    pub fn release(&mut self, space_id: &str) -> bool {
        match self.spaces.iter_mut().find(|s| s.id == space_id) {
            Some(space) => {
                space.is_available = true;
                true
            }
            None => false,
        }
    }
}

impl Default for SpaceInventory {
    fn default() -> Self {
        Self::seeded()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    #[error("Parking space not found: {0}")]
    NotFound(String),

    #[error("Parking space not available: {0}")]
    Unavailable(String),
}
