use indexmap::IndexMap;
use serde_json::{Map, Value};

use super::{DataPoint, FieldMapping};

/// Untyped grid row keyed by column field name.
pub type GridRow = IndexMap<String, Value>;

/// Field access for grid rows consumed by the default bridge.
///
/// Applications with typed rows implement this to expose the columns that a
/// [`FieldMapping`] can reference.
pub trait GridRecord {
    fn field(&self, name: &str) -> Option<Value>;
}

impl GridRecord for GridRow {
    fn field(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}

impl GridRecord for Map<String, Value> {
    fn field(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}

/// Projects one row through `mapping`. Returns `None` when no mapped field is present.
#[must_use]
pub fn project_row<T: GridRecord + ?Sized>(row: &T, mapping: &FieldMapping) -> Option<DataPoint> {
    let point: DataPoint = mapping
        .iter()
        .filter_map(|(field, property)| row.field(field).map(|value| (property, value)))
        .collect();
    (!point.is_empty()).then_some(point)
}

/// Returns `true` when every mapped property carried by `point` equals the
/// row's corresponding field. Points without any mapped property never match.
#[must_use]
pub fn row_matches_point<T: GridRecord + ?Sized>(
    row: &T,
    point: &DataPoint,
    mapping: &FieldMapping,
) -> bool {
    let mut compared = 0usize;
    for (field, property) in mapping.iter() {
        let Some(expected) = point.get(property) else {
            continue;
        };
        compared += 1;
        match row.field(field) {
            Some(actual) if &actual == expected => {}
            _ => return false,
        }
    }
    compared > 0
}
