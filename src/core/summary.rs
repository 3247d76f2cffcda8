//! Roll-up aggregates over the full, unfiltered row set.
//!
//! Summary counts are global context for the dashboard header cards; they
//! deliberately ignore the active filter and the current page.

use crate::core::classify::{is_clinical_high_bp, oxygen_category, VitalCategory};
use crate::core::filter::CardFilterKey;
use crate::models::{Gender, PatientRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub males: usize,
    pub females: usize,
    /// Rounded arithmetic mean; `None` when the roster is empty.
    pub avg_heart_rate: Option<u32>,
    /// Clinical hypertension count (sys > 140 or dia > 90).
    pub high_bp: usize,
    /// Desaturation count (oxygen < 92).
    pub low_o2: usize,
}

impl Summary {
    pub fn compute(rows: &[PatientRecord]) -> Self {
        let total = rows.len();
        let males = rows.iter().filter(|r| r.gender == Gender::Male).count();
        let females = rows.iter().filter(|r| r.gender == Gender::Female).count();
        let high_bp = rows
            .iter()
            .filter(|r| is_clinical_high_bp(&r.blood_pressure))
            .count();
        let low_o2 = rows
            .iter()
            .filter(|r| oxygen_category(r.oxygen_level) == VitalCategory::Low)
            .count();
        let avg_heart_rate = if total == 0 {
            None
        } else {
            let sum: u64 = rows.iter().map(|r| u64::from(r.heart_rate)).sum();
            Some(((sum as f64 / total as f64).round()) as u32)
        };
        Summary {
            total,
            males,
            females,
            avg_heart_rate,
            high_bp,
            low_o2,
        }
    }

    /// The aggregates that act as clickable quick-filters.
    pub fn filterable_cards() -> [CardFilterKey; 2] {
        [CardFilterKey::HighBp, CardFilterKey::LowO2]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: u64, gender: Gender, bp: &str, hr: u32, o2: u32) -> PatientRecord {
        PatientRecord {
            id,
            name: format!("Patient {id}"),
            age: 40,
            room: format!("{}A", 100 + id),
            gender,
            blood_pressure: bp.into(),
            heart_rate: hr,
            oxygen_level: o2,
        }
    }

    #[test]
    fn aggregates_over_full_row_set() {
        let rows = vec![
            row(0, Gender::Male, "150/90", 75, 96),
            row(1, Gender::Female, "120/80", 68, 91),
            row(2, Gender::Male, "135/85", 110, 97),
        ];
        let summary = Summary::compute(&rows);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.males, 2);
        assert_eq!(summary.females, 1);
        // 150/90 is the only clinically high reading; 135/85 is below 140/90.
        assert_eq!(summary.high_bp, 1);
        assert_eq!(summary.low_o2, 1);
        // (75 + 68 + 110) / 3 = 84.33 -> 84
        assert_eq!(summary.avg_heart_rate, Some(84));
    }

    #[test]
    fn mean_rounds_to_nearest() {
        let rows = vec![
            row(0, Gender::Male, "120/80", 70, 96),
            row(1, Gender::Male, "120/80", 71, 96),
        ];
        // 70.5 rounds up.
        assert_eq!(Summary::compute(&rows).avg_heart_rate, Some(71));
    }

    #[test]
    fn empty_roster_has_no_average() {
        let summary = Summary::compute(&[]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.avg_heart_rate, None);
    }

    #[test]
    fn diastolic_alone_can_trip_clinical_threshold() {
        let rows = vec![row(0, Gender::Female, "130/95", 70, 96)];
        assert_eq!(Summary::compute(&rows).high_bp, 1);
    }
}
