//! Categorical classification of vital values.
//!
//! All functions here are pure and total: malformed input classifies as
//! `Normal` rather than erroring, so a bad blood-pressure string can never
//! take the dashboard down.

use serde::{Deserialize, Serialize};

/// Ordinal category for a single vital dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VitalCategory {
    Low,
    Normal,
    High,
}

/// Age bands used by the age dropdown filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgeBand {
    #[serde(rename = "under18")]
    Under18,
    #[serde(rename = "18to30")]
    From18To30,
    #[serde(rename = "30to50")]
    From30To50,
    #[serde(rename = "over50")]
    Over50,
}

/// Parse a "systolic/diastolic" string. Both halves must be positive integers.
pub fn parse_blood_pressure(value: &str) -> Option<(u32, u32)> {
    let (sys, dia) = value.split_once('/')?;
    let sys: u32 = sys.trim().parse().ok()?;
    let dia: u32 = dia.trim().parse().ok()?;
    if sys == 0 || dia == 0 {
        return None;
    }
    Some((sys, dia))
}

/// Dropdown ("elevated") blood pressure category.
///
/// Note this is deliberately tighter than [`is_clinical_high_bp`]: the
/// dropdown flags elevated readings at >130/>85 while the summary card
/// counts clinical hypertension at >140/>90. Both thresholds are part of
/// the product behavior; do not unify them.
pub fn bp_category(blood_pressure: &str) -> VitalCategory {
    match parse_blood_pressure(blood_pressure) {
        Some((sys, dia)) if sys < 110 || dia < 70 => VitalCategory::Low,
        Some((sys, dia)) if sys > 130 || dia > 85 => VitalCategory::High,
        _ => VitalCategory::Normal,
    }
}

/// Clinical hypertension threshold used by the summary card and card filter.
pub fn is_clinical_high_bp(blood_pressure: &str) -> bool {
    match parse_blood_pressure(blood_pressure) {
        Some((sys, dia)) => sys > 140 || dia > 90,
        None => false,
    }
}

pub fn oxygen_category(oxygen_level: u32) -> VitalCategory {
    if oxygen_level < 92 {
        VitalCategory::Low
    } else if oxygen_level > 98 {
        VitalCategory::High
    } else {
        VitalCategory::Normal
    }
}

pub fn heart_rate_category(heart_rate: u32) -> VitalCategory {
    if heart_rate < 60 {
        VitalCategory::Low
    } else if heart_rate > 100 {
        VitalCategory::High
    } else {
        VitalCategory::Normal
    }
}

pub fn age_band(age: u32) -> AgeBand {
    if age < 18 {
        AgeBand::Under18
    } else if age <= 30 {
        AgeBand::From18To30
    } else if age <= 50 {
        AgeBand::From30To50
    } else {
        AgeBand::Over50
    }
}
