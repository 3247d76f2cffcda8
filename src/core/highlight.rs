//! Change detection and transient "just changed" highlight state.
//!
//! Highlights are tracked per (patient name, vital field) so expirations are
//! independent: a heart-rate highlight clearing must never take down a
//! still-fresh blood-pressure highlight on the same patient. Each entry
//! stores its own deadline; re-marking a still-highlighted field restarts a
//! fresh window from the second change.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::models::{PatientRecord, VitalField, VitalsReading};

/// How long a changed cell stays highlighted.
pub const HIGHLIGHT_TTL: Duration = Duration::from_millis(1000);

/// Deadline-keyed highlight map owned by the table view.
///
/// Callers pass `now` explicitly, which keeps expiry fully deterministic
/// under test; the dashboard loop feeds it the tokio clock.
#[derive(Debug, Default)]
pub struct Highlights {
    entries: HashMap<(String, VitalField), Instant>,
}

impl Highlights {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flag `fields` for `name`, each expiring `HIGHLIGHT_TTL` after `now`.
    pub fn mark(&mut self, name: &str, fields: &[VitalField], now: Instant) {
        for field in fields {
            self.entries
                .insert((name.to_owned(), *field), now + HIGHLIGHT_TTL);
        }
    }

    pub fn is_highlighted(&self, name: &str, field: VitalField, now: Instant) -> bool {
        self.entries
            .get(&(name.to_owned(), field))
            .is_some_and(|deadline| now < *deadline)
    }

    /// Drop entries whose window has elapsed. Expired entries are already
    /// invisible to [`is_highlighted`]; this just reclaims the slots.
    pub fn purge_expired(&mut self, now: Instant) {
        self.entries.retain(|_, deadline| now < *deadline);
    }

    /// Earliest pending deadline, for the render loop's wakeup timer.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries.values().min().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Apply `reading` to the matching record in `rows` and report which fields
/// actually changed.
///
/// Matching is by exact name against `subscribed` (the names handed to the
/// telemetry channel, normally the current page); a reading for any other
/// name is inert even if the roster contains it. Fields absent from the
/// reading are left untouched; fields equal to the current value produce no
/// change entry.
pub fn apply_reading(
    reading: &VitalsReading,
    rows: &mut [PatientRecord],
    subscribed: &[String],
) -> Vec<VitalField> {
    if !subscribed.iter().any(|name| name == &reading.name) {
        return Vec::new();
    }
    let Some(row) = rows.iter_mut().find(|row| row.name == reading.name) else {
        return Vec::new();
    };

    let mut changed = Vec::new();
    if let Some(bp) = &reading.blood_pressure {
        if &row.blood_pressure != bp {
            row.blood_pressure = bp.clone();
            changed.push(VitalField::BloodPressure);
        }
    }
    if let Some(hr) = reading.heart_rate {
        if row.heart_rate != hr {
            row.heart_rate = hr;
            changed.push(VitalField::HeartRate);
        }
    }
    if let Some(o2) = reading.oxygen_level {
        if row.oxygen_level != o2 {
            row.oxygen_level = o2;
            changed.push(VitalField::OxygenLevel);
        }
    }
    changed
}
