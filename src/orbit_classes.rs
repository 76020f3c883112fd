//! # Orbit-class lookup
//!
//! Map numeric orbit-class identifiers (as stored in a feature column) to their
//! human-readable classification fields. The catalog is an **explicitly-injected
//! lookup structure**: callers build one (in code or from a CSV file) and pass
//! it to [`OrbitClassCatalog::classify`], instead of relying on module-level
//! shared state.
//!
//! Unknown identifiers pass through unchanged (formatted as text), so partially
//! cataloged datasets still produce a label per row.
use camino::Utf8Path;
use serde::Deserialize;

use crate::constants::FastHashMap;
use crate::orbitset_errors::OrbitsetError;

/// Classification fields for one orbit-class identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrbitClass {
    /// Short display label (e.g. `"L1 Lyapunov"`).
    pub label: String,
    /// Orbit family (e.g. `"Lyapunov"`, `"Halo"`).
    pub family: String,
    /// Family refinement (e.g. `"Northern"`), empty when not applicable.
    pub subtype: String,
    /// Revolution direction (e.g. `"Prograde"`), empty when not applicable.
    pub direction: String,
}

/// One record of the catalog CSV: `Id,Label,Type,Subtype,Direction`.
#[derive(Debug, Deserialize)]
struct CatalogRecord {
    #[serde(rename = "Id")]
    id: i64,
    #[serde(rename = "Label")]
    label: String,
    #[serde(rename = "Type")]
    family: String,
    #[serde(rename = "Subtype", default)]
    subtype: String,
    #[serde(rename = "Direction", default)]
    direction: String,
}

/// Lookup from numeric class id to [`OrbitClass`] fields.
#[derive(Debug, Clone, Default)]
pub struct OrbitClassCatalog {
    classes: FastHashMap<i64, OrbitClass>,
}

impl OrbitClassCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) one class.
    pub fn insert(&mut self, id: i64, class: OrbitClass) {
        self.classes.insert(id, class);
    }

    /// Load a catalog from a CSV file with header `Id,Label,Type,Subtype,Direction`.
    pub fn from_csv(path: &Utf8Path) -> Result<Self, OrbitsetError> {
        let mut reader = csv::Reader::from_path(path)?;
        let mut catalog = Self::new();
        for record in reader.deserialize::<CatalogRecord>() {
            let record = record?;
            catalog.insert(
                record.id,
                OrbitClass {
                    label: record.label,
                    family: record.family,
                    subtype: record.subtype,
                    direction: record.direction,
                },
            );
        }
        Ok(catalog)
    }

    /// Look up one class by id.
    pub fn get(&self, id: i64) -> Option<&OrbitClass> {
        self.classes.get(&id)
    }

    /// Number of cataloged classes.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Resolve a column of numeric class ids to classes.
    ///
    /// A value matches only when it is an exact integer present in the catalog;
    /// anything else resolves to `None` at the matching position.
    pub fn classify(&self, values: &[f64]) -> Vec<Option<&OrbitClass>> {
        values
            .iter()
            .map(|&value| {
                if value.fract() == 0.0 {
                    self.get(value as i64)
                } else {
                    None
                }
            })
            .collect()
    }

    /// Substitute class ids with one classification field, passing unknown
    /// values through as formatted text.
    ///
    /// `field` selects which [`OrbitClass`] member to project.
    pub fn substitute<F>(&self, values: &[f64], field: F) -> Vec<String>
    where
        F: Fn(&OrbitClass) -> &str,
    {
        values
            .iter()
            .zip(self.classify(values))
            .map(|(&value, class)| match class {
                Some(class) => field(class).to_string(),
                None => format!("{value}"),
            })
            .collect()
    }

    /// Display labels for a column of class ids.
    pub fn labels(&self, values: &[f64]) -> Vec<String> {
        self.substitute(values, |c| &c.label)
    }

    /// Orbit families for a column of class ids.
    pub fn families(&self, values: &[f64]) -> Vec<String> {
        self.substitute(values, |c| &c.family)
    }

    /// Subtypes for a column of class ids.
    pub fn subtypes(&self, values: &[f64]) -> Vec<String> {
        self.substitute(values, |c| &c.subtype)
    }

    /// Revolution directions for a column of class ids.
    pub fn directions(&self, values: &[f64]) -> Vec<String> {
        self.substitute(values, |c| &c.direction)
    }
}

#[cfg(test)]
mod catalog_tests {
    use super::*;

    fn sample_catalog() -> OrbitClassCatalog {
        let mut catalog = OrbitClassCatalog::new();
        catalog.insert(
            1,
            OrbitClass {
                label: "L1 Lyapunov".into(),
                family: "Lyapunov".into(),
                subtype: String::new(),
                direction: "Prograde".into(),
            },
        );
        catalog.insert(
            2,
            OrbitClass {
                label: "L2 Halo North".into(),
                family: "Halo".into(),
                subtype: "Northern".into(),
                direction: "Prograde".into(),
            },
        );
        catalog
    }

    #[test]
    fn known_ids_resolve_unknown_pass_through() {
        let catalog = sample_catalog();
        let labels = catalog.labels(&[1.0, 9.0, 2.0]);
        assert_eq!(labels, vec!["L1 Lyapunov", "9", "L2 Halo North"]);
    }

    #[test]
    fn fractional_values_never_match() {
        let catalog = sample_catalog();
        assert_eq!(catalog.classify(&[1.5]), vec![None]);
    }

    #[test]
    fn field_projections_agree() {
        let catalog = sample_catalog();
        assert_eq!(catalog.families(&[2.0]), vec!["Halo"]);
        assert_eq!(catalog.subtypes(&[2.0]), vec!["Northern"]);
        assert_eq!(catalog.directions(&[1.0]), vec!["Prograde"]);
    }
}
