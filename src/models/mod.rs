//! Data models shared across the dashboard engine.

pub mod patient;

pub use patient::{Gender, PatientRecord, VitalField, VitalsReading};
