use serde::{Deserialize, Serialize};

/// One patient row in the dashboard.
///
/// `id` is assigned once by the roster provider and never reused. Telemetry
/// matching is by `name`, which is unique within the active roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientRecord {
    pub id: u64,
    pub name: String,
    pub age: u32,
    pub room: String,
    pub gender: Gender,
    /// "systolic/diastolic", both positive integers.
    pub blood_pressure: String,
    pub heart_rate: u32,
    /// Oxygen saturation percentage, 0-100.
    pub oxygen_level: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        })
    }
}

/// A transient vitals measurement for a named patient.
///
/// This is the wire shape for the echo channel in both directions: outbound
/// synthetic readings carry all three vitals, but inbound messages are only
/// required to name the patient; absent fields leave the record untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VitalsReading {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_pressure: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oxygen_level: Option<u32>,
}

/// The three vitals columns driven by the real-time feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VitalField {
    BloodPressure,
    HeartRate,
    OxygenLevel,
}

impl VitalField {
    pub fn as_str(self) -> &'static str {
        match self {
            VitalField::BloodPressure => "bloodPressure",
            VitalField::HeartRate => "heartRate",
            VitalField::OxygenLevel => "oxygenLevel",
        }
    }
}
