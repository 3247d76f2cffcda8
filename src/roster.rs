//! Synthetic roster derivation.
//!
//! The external roster provider is only trusted for an ordered sequence of
//! stable numeric ids; everything a row displays (name, age, room, gender,
//! initial vitals) is derived here. Names must be unique within the roster
//! because telemetry matching is by name, so the name pools are combined
//! positionally rather than by a shared index.

use rand::Rng;

use crate::models::{Gender, PatientRecord};

const FIRST_NAMES: [&str; 8] = [
    "John", "Sarah", "Michael", "Emma", "Robert", "Laura", "David", "Olivia",
];
const LAST_NAMES: [&str; 8] = [
    "Smith", "Johnson", "Brown", "Wilson", "Garcia", "Miller", "Davis", "Martinez",
];

/// Source of patient ids, standing in for the placeholder REST endpoint.
pub trait RosterProvider {
    fn patient_ids(&self) -> Vec<u64>;
}

/// Local id source for when no external endpoint is wired up.
#[derive(Debug, Clone, Copy)]
pub struct SequentialIds(pub usize);

impl RosterProvider for SequentialIds {
    fn patient_ids(&self) -> Vec<u64> {
        (1..=self.0 as u64).collect()
    }
}

/// Random initial vitals for a freshly rostered patient. The ranges are wider
/// than the telemetry ranges so the seeded table contains some clinically
/// high and low readings for the summary cards to count.
pub fn random_vitals<R: Rng>(rng: &mut R) -> (String, u32, u32) {
    let systolic = rng.gen_range(90..160);
    let diastolic = rng.gen_range(60..100);
    let heart_rate = rng.gen_range(60..130);
    let oxygen_level = rng.gen_range(85..100);
    (format!("{systolic}/{diastolic}"), heart_rate, oxygen_level)
}

/// Derive a full [`PatientRecord`] from a provider id and its roster index.
pub fn derive_patient<R: Rng>(id: u64, index: usize, rng: &mut R) -> PatientRecord {
    let first = FIRST_NAMES[index % FIRST_NAMES.len()];
    let last = LAST_NAMES[(index / FIRST_NAMES.len()) % LAST_NAMES.len()];
    // Beyond one full pass over both pools, suffix with the index to keep
    // names unique.
    let cycle = index / (FIRST_NAMES.len() * LAST_NAMES.len());
    let name = if cycle == 0 {
        format!("{first} {last}")
    } else {
        format!("{first} {last} {}", cycle + 1)
    };

    PatientRecord {
        id,
        name,
        age: rng.gen_range(25..75),
        room: format!("{}A", 100 + index),
        gender: if index % 2 == 0 { Gender::Male } else { Gender::Female },
        blood_pressure: String::new(),
        heart_rate: 0,
        oxygen_level: 0,
    }
    .with_vitals(rng)
}

impl PatientRecord {
    fn with_vitals<R: Rng>(mut self, rng: &mut R) -> Self {
        let (blood_pressure, heart_rate, oxygen_level) = random_vitals(rng);
        self.blood_pressure = blood_pressure;
        self.heart_rate = heart_rate;
        self.oxygen_level = oxygen_level;
        self
    }
}

/// Build the full roster from a provider.
pub fn build_roster<P: RosterProvider, R: Rng>(provider: &P, rng: &mut R) -> Vec<PatientRecord> {
    provider
        .patient_ids()
        .into_iter()
        .enumerate()
        .map(|(index, id)| derive_patient(id, index, rng))
        .collect()
}
