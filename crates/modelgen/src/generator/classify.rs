//! Partition of a table's columns into fillable and guarded sets.

use std::collections::HashSet;

use crate::core::schema::{ColumnInfo, TableProperties};

/// Primary key name that models get for free.
const DEFAULT_PRIMARY_KEY: &str = "id";

/// Classify columns against the guarded names.
///
/// Membership is an exact, case-sensitive match. Both output lists keep
/// the driver's column order. A primary key named `id` is dropped since
/// the generated model only declares non-default keys.
pub fn classify(
    columns: Vec<ColumnInfo>,
    primary_key: Option<String>,
    guarded_names: &[String],
    timestamps: bool,
) -> TableProperties {
    let guarded_set: HashSet<&str> = guarded_names.iter().map(String::as_str).collect();

    let mut properties = TableProperties {
        primary_key: primary_key.filter(|pk| pk != DEFAULT_PRIMARY_KEY),
        timestamps,
        ..TableProperties::default()
    };

    for column in columns {
        if guarded_set.contains(column.name.as_str()) {
            properties.guarded.push(column.name);
        } else {
            properties.fillable.push(column.name.clone());
            properties.fillable_columns.push(column);
        }
    }

    properties
}
