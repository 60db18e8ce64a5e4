use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The record kinds the import pipeline supports. Each entity type has its
/// own field catalog and required-field set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    /// Homeowner/community associations.
    Association,
    /// Physical properties belonging to an association.
    Property,
    /// Residents (owners or tenants) of a unit.
    Resident,
    /// Service vendors contracted by an association.
    Vendor,
}

impl EntityType {
    /// All supported entity types, in display order.
    pub const ALL: [EntityType; 4] = [
        EntityType::Association,
        EntityType::Property,
        EntityType::Resident,
        EntityType::Vendor,
    ];

    /// Canonical lowercase name used in configs and CLI arguments.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Association => "association",
            EntityType::Property => "property",
            EntityType::Resident => "resident",
            EntityType::Vendor => "vendor",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = crate::error::ImportError;

    /// Parse an entity type name (case-insensitive, plural forms accepted).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "association" | "associations" => Ok(EntityType::Association),
            "property" | "properties" => Ok(EntityType::Property),
            "resident" | "residents" => Ok(EntityType::Resident),
            "vendor" | "vendors" => Ok(EntityType::Vendor),
            _ => Err(crate::error::ImportError::UnknownEntityType(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitive_and_plural() {
        assert_eq!(
            "Resident".parse::<EntityType>().unwrap(),
            EntityType::Resident
        );
        assert_eq!("VENDORS".parse::<EntityType>().unwrap(), EntityType::Vendor);
        assert!(matches!(
            "unit".parse::<EntityType>(),
            Err(crate::error::ImportError::UnknownEntityType(_))
        ));
    }

    #[test]
    fn display_round_trips() {
        for entity in EntityType::ALL {
            assert_eq!(entity.as_str().parse::<EntityType>().unwrap(), entity);
        }
    }
}
