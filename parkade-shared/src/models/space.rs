use serde::{Deserialize, Serialize};
use std::fmt;

/// Parking space category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SpaceType {
    Standard,
    Premium,
}

impl SpaceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpaceType::Standard => "standard",
            SpaceType::Premium => "premium",
        }
    }
}

impl fmt::Display for SpaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A bookable parking space in the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ParkingSpace {
    pub id: String,
    #[serde(rename = "type")]
    pub space_type: SpaceType,
    pub is_available: bool,
    pub location: String,
}

impl ParkingSpace {
    pub fn new(id: &str, space_type: SpaceType, is_available: bool, location: &str) -> Self {
        Self {
            id: id.to_string(),
            space_type,
            is_available,
            location: location.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_wire_format() {
        let space = ParkingSpace::new("S1", SpaceType::Standard, true, "A1");
        let json = serde_json::to_value(&space).unwrap();

        assert_eq!(json["type"], "standard");
        assert_eq!(json["isAvailable"], true);
        assert_eq!(json["location"], "A1");
    }
}
