//! Column sorting for the dashboard table.

use std::cmp::Ordering;

use crate::core::classify::parse_blood_pressure;
use crate::models::PatientRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Name,
    Age,
    Room,
    BloodPressure,
    HeartRate,
    OxygenLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

/// Order `rows` by the given column. `None` performs no reordering.
///
/// The sort is stable: blood pressure compares by parsed systolic only, so
/// readings with equal systolic keep their relative input order. An
/// unparseable blood pressure sorts before every parseable one.
pub fn sort_rows<'a>(
    mut rows: Vec<&'a PatientRecord>,
    spec: Option<SortSpec>,
) -> Vec<&'a PatientRecord> {
    let Some(spec) = spec else {
        return rows;
    };
    rows.sort_by(|a, b| {
        let ordering = compare(a, b, spec.field);
        match spec.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
    rows
}

fn compare(a: &PatientRecord, b: &PatientRecord, field: SortField) -> Ordering {
    match field {
        SortField::Name => compare_text(&a.name, &b.name),
        SortField::Age => a.age.cmp(&b.age),
        SortField::Room => compare_text(&a.room, &b.room),
        SortField::BloodPressure => systolic(a).cmp(&systolic(b)),
        SortField::HeartRate => a.heart_rate.cmp(&b.heart_rate),
        SortField::OxygenLevel => a.oxygen_level.cmp(&b.oxygen_level),
    }
}

fn systolic(row: &PatientRecord) -> u32 {
    parse_blood_pressure(&row.blood_pressure)
        .map(|(sys, _)| sys)
        .unwrap_or(0)
}

// Case-insensitive ordering, falling back to the raw string so the result
// is still a total order when two names differ only in case.
fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
