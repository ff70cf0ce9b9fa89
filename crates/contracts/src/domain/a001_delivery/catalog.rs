use std::collections::BTreeMap;

use super::aggregate::Building;

/// Which flat numbers exist in which building
///
/// Populated from configuration; `Default` carries the built-in table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatCatalog {
    flats: BTreeMap<Building, Vec<String>>,
}

impl FlatCatalog {
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Building, Vec<String>)>,
    {
        Self {
            flats: entries.into_iter().collect(),
        }
    }

    /// Flats of a building, empty when the building has none configured
    pub fn flats_for(&self, building: Building) -> &[String] {
        self.flats.get(&building).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, building: Building, flat: &str) -> bool {
        self.flats_for(building).iter().any(|f| f == flat)
    }

    /// Buildings that have at least one flat, in declaration order
    pub fn buildings(&self) -> Vec<Building> {
        self.flats
            .iter()
            .filter(|(_, flats)| !flats.is_empty())
            .map(|(b, _)| *b)
            .collect()
    }
}

impl Default for FlatCatalog {
    fn default() -> Self {
        let flats = |prefix: u32| (1..=3).map(|n| format!("{}{:02}", prefix, n)).collect();
        Self::from_entries([
            (Building::Requizza, flats(1)),
            (Building::Hydra, flats(2)),
            (Building::Hercules, flats(3)),
            (Building::Firenze, flats(4)),
            (Building::Brichwood, flats(5)),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let catalog = FlatCatalog::default();
        assert_eq!(catalog.flats_for(Building::Requizza), ["101", "102", "103"]);
        assert_eq!(catalog.flats_for(Building::Brichwood), ["501", "502", "503"]);
        assert_eq!(catalog.buildings(), Building::ALL.to_vec());
    }

    #[test]
    fn test_contains() {
        let catalog = FlatCatalog::default();
        assert!(catalog.contains(Building::Hydra, "203"));
        assert!(!catalog.contains(Building::Hydra, "303"));
    }

    #[test]
    fn test_unconfigured_building_has_no_flats() {
        let catalog = FlatCatalog::from_entries([(Building::Hydra, vec!["9".to_string()])]);
        assert!(catalog.flats_for(Building::Firenze).is_empty());
        assert!(!catalog.contains(Building::Firenze, "401"));
        assert_eq!(catalog.buildings(), vec![Building::Hydra]);
    }
}
