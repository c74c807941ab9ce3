use crate::core::{DataPoint, FieldMapping, GridRecord, project_row, row_matches_point};

#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;

#[cfg(feature = "parallel-projection")]
const PARALLEL_PROJECTION_MIN_ROWS: usize = 4_096;

/// Projects rows into chart points, skipping rows with no mapped field.
#[must_use]
pub fn project_rows<T>(rows: &[T], mapping: &FieldMapping) -> Vec<DataPoint>
where
    T: GridRecord + Sync,
{
    #[cfg(feature = "parallel-projection")]
    if rows.len() >= PARALLEL_PROJECTION_MIN_ROWS {
        return rows
            .par_iter()
            .filter_map(|row| project_row(row, mapping))
            .collect();
    }

    rows.iter()
        .filter_map(|row| project_row(row, mapping))
        .collect()
}

/// Rows matching at least one point, in grid order.
#[must_use]
pub fn select_matching_rows<T>(rows: &[T], points: &[DataPoint], mapping: &FieldMapping) -> Vec<T>
where
    T: GridRecord + Clone,
{
    if points.is_empty() || mapping.is_empty() {
        return Vec::new();
    }
    rows.iter()
        .filter(|row| {
            points
                .iter()
                .any(|point| row_matches_point(*row, point, mapping))
        })
        .cloned()
        .collect()
}
