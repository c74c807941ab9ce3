use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Correspondence between grid field names and chart property names.
///
/// Keys are grid fields and unique; inserting an existing key replaces its
/// property. Iteration follows insertion order, equality does not.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldMapping {
    entries: IndexMap<String, String>,
}

impl FieldMapping {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`FieldMapping::insert`].
    #[must_use]
    pub fn with(mut self, grid_field: impl Into<String>, chart_property: impl Into<String>) -> Self {
        self.insert(grid_field, chart_property);
        self
    }

    /// Maps `grid_field` to `chart_property`, returning the replaced property.
    pub fn insert(
        &mut self,
        grid_field: impl Into<String>,
        chart_property: impl Into<String>,
    ) -> Option<String> {
        self.entries.insert(grid_field.into(), chart_property.into())
    }

    pub fn remove(&mut self, grid_field: &str) -> Option<String> {
        self.entries.shift_remove(grid_field)
    }

    #[must_use]
    pub fn chart_property(&self, grid_field: &str) -> Option<&str> {
        self.entries.get(grid_field).map(String::as_str)
    }

    /// Reverse lookup. When several grid fields feed the same property the
    /// first inserted one wins.
    #[must_use]
    pub fn grid_field(&self, chart_property: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, property)| property.as_str() == chart_property)
            .map(|(field, _)| field.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(field, property)| (field.as_str(), property.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns this mapping with `overlay` entries applied on top.
    ///
    /// Base entries targeting a property that the overlay also targets are
    /// dropped, so each overlay property keeps a single source field.
    #[must_use]
    pub fn layered(&self, overlay: &FieldMapping) -> FieldMapping {
        let mut merged: FieldMapping = self
            .iter()
            .filter(|(_, property)| overlay.grid_field(property).is_none())
            .collect();
        merged.extend(
            overlay
                .iter()
                .map(|(field, property)| (field.to_owned(), property.to_owned())),
        );
        merged
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldMapping {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut mapping = Self::new();
        mapping.extend(iter);
        mapping
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for FieldMapping {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (field, property) in iter {
            self.insert(field, property);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::FieldMapping;

    #[test]
    fn duplicate_insert_keeps_last_write() {
        let mut mapping = FieldMapping::new().with("region", "x");
        let previous = mapping.insert("region", "category");
        assert_eq!(previous.as_deref(), Some("x"));
        assert_eq!(mapping.chart_property("region"), Some("category"));
        assert_eq!(mapping.len(), 1);
    }

    #[test]
    fn overlay_wins_and_base_entries_survive() {
        let base = FieldMapping::new().with("region", "x").with("sales", "y");
        let overlay = FieldMapping::new().with("sales", "size").with("id", "key");
        let merged = base.layered(&overlay);
        assert_eq!(merged.chart_property("region"), Some("x"));
        assert_eq!(merged.chart_property("sales"), Some("size"));
        assert_eq!(merged.chart_property("id"), Some("key"));
        assert_eq!(base.chart_property("sales"), Some("y"));
    }

    #[test]
    fn overlay_property_displaces_base_source_field() {
        let base = FieldMapping::new().with("region", "x").with("sales", "y");
        let overlay = FieldMapping::new().with("quarter", "x");
        let merged = base.layered(&overlay);
        assert_eq!(merged.chart_property("region"), None);
        assert_eq!(merged.chart_property("quarter"), Some("x"));
        assert_eq!(merged.grid_field("x"), Some("quarter"));
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn equality_ignores_insertion_order() {
        let a: FieldMapping = [("region", "x"), ("sales", "y")].into_iter().collect();
        let b: FieldMapping = [("sales", "y"), ("region", "x")].into_iter().collect();
        assert_eq!(a, b);
        assert_eq!(a.grid_field("y"), Some("sales"));
        assert_eq!(a.grid_field("missing"), None);
    }
}
