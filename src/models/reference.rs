//! Reference instruments and the catalog that holds them.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::error::{AcousticsError, Result};

/// A candidate instrument a hole can be matched against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceItem {
    /// Catalog key (e.g., "ROMAN_TUBA")
    pub name: String,
    /// Tube diameter in millimeters
    pub diameter_mm: f64,
    /// Fundamental frequency in Hz
    pub frequency_hz: f64,
    /// Culture the instrument belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub culture: Option<String>,
    /// How the instrument was used
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<String>,
    /// Tube length in meters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length_m: Option<f64>,
    /// Any other free-form attributes
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

impl ReferenceItem {
    /// Creates an item with just a name, diameter and frequency.
    pub fn new(name: impl Into<String>, diameter_mm: f64, frequency_hz: f64) -> Self {
        Self {
            name: name.into(),
            diameter_mm,
            frequency_hz,
            culture: None,
            usage: None,
            length_m: None,
            metadata: BTreeMap::new(),
        }
    }

    /// Sets the culture.
    #[must_use]
    pub fn with_culture(mut self, culture: impl Into<String>) -> Self {
        self.culture = Some(culture.into());
        self
    }

    /// Sets the usage.
    #[must_use]
    pub fn with_usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = Some(usage.into());
        self
    }

    /// Sets the tube length.
    #[must_use]
    pub fn with_length(mut self, length_m: f64) -> Self {
        self.length_m = Some(length_m);
        self
    }

    fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(AcousticsError::invalid_argument(
                "catalog item name cannot be empty",
            ));
        }
        if !self.diameter_mm.is_finite() || self.diameter_mm <= 0.0 {
            return Err(AcousticsError::invalid_argument(format!(
                "catalog item '{}' has invalid diameter {}",
                self.name, self.diameter_mm
            )));
        }
        if !self.frequency_hz.is_finite() || self.frequency_hz < 0.0 {
            return Err(AcousticsError::invalid_argument(format!(
                "catalog item '{}' has invalid frequency {}",
                self.name, self.frequency_hz
            )));
        }
        Ok(())
    }
}

/// Name-keyed collection of reference items.
///
/// Iteration follows insertion order, which is the order the matcher uses to
/// break ties between equally close items. Re-inserting an existing name
/// replaces the item in place and keeps its original position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    items: Vec<ReferenceItem>,
    lookup: HashMap<String, usize>,
}

impl Catalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from items, in the given order.
    pub fn from_items(items: impl IntoIterator<Item = ReferenceItem>) -> Result<Self> {
        let mut catalog = Self::new();
        for item in items {
            catalog.insert(item)?;
        }
        Ok(catalog)
    }

    /// Inserts or replaces an item.
    pub fn insert(&mut self, item: ReferenceItem) -> Result<()> {
        item.validate()?;

        if let Some(&idx) = self.lookup.get(&item.name) {
            self.items[idx] = item;
        } else {
            self.lookup.insert(item.name.clone(), self.items.len());
            self.items.push(item);
        }
        Ok(())
    }

    /// Gets an item by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ReferenceItem> {
        let idx = self.lookup.get(name)?;
        self.items.get(*idx)
    }

    /// Items in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ReferenceItem> {
        self.items.iter()
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the catalog holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
