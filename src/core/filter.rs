//! Filter selection store and row filtering.
//!
//! The selection lives in a [`FilterState`] mutated only through
//! [`FilterCommand`]s, mirroring how the dashboard dispatches discrete filter
//! changes. Two families of filters exist and are mutually exclusive: the
//! per-column categorical dropdowns and the single-select summary card
//! filter. Setting any dropdown to a non-"all" value clears the card filter,
//! and selecting a card filter resets every dropdown back to "all".

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::core::classify::{
    age_band, bp_category, heart_rate_category, is_clinical_high_bp, oxygen_category, AgeBand,
    VitalCategory,
};
use crate::models::PatientRecord;

/// Quick-filter keys derived from the summary aggregates. Only `HighBp` and
/// `LowO2` are surfaced as clickable cards, but the store accepts any key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardFilterKey {
    #[serde(rename = "highBP")]
    HighBp,
    #[serde(rename = "lowO2")]
    LowO2,
    #[serde(rename = "normalO2")]
    NormalO2,
    #[serde(rename = "highO2")]
    HighO2,
    #[serde(rename = "lowHR")]
    LowHr,
    #[serde(rename = "normalHR")]
    NormalHr,
    #[serde(rename = "highHR")]
    HighHr,
}

/// Current filter selection. `None` in any field means "all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    card: Option<CardFilterKey>,
    bp: Option<VitalCategory>,
    o2: Option<VitalCategory>,
    hr: Option<VitalCategory>,
    age: Option<AgeBand>,
}

/// Discrete filter-change commands accepted by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterCommand {
    SetCard(Option<CardFilterKey>),
    SetBp(Option<VitalCategory>),
    SetO2(Option<VitalCategory>),
    SetHr(Option<VitalCategory>),
    SetAge(Option<AgeBand>),
    ResetAll,
}

impl FilterState {
    pub fn dispatch(&mut self, command: FilterCommand) {
        match command {
            FilterCommand::SetCard(key) => {
                self.card = key;
                // Dropdowns reset when a card filter becomes active.
                if key.is_some() {
                    self.bp = None;
                    self.o2 = None;
                    self.hr = None;
                    self.age = None;
                }
            }
            FilterCommand::SetBp(category) => {
                self.bp = category;
                if category.is_some() {
                    self.card = None;
                }
            }
            FilterCommand::SetO2(category) => {
                self.o2 = category;
                if category.is_some() {
                    self.card = None;
                }
            }
            FilterCommand::SetHr(category) => {
                self.hr = category;
                if category.is_some() {
                    self.card = None;
                }
            }
            FilterCommand::SetAge(band) => {
                self.age = band;
                if band.is_some() {
                    self.card = None;
                }
            }
            FilterCommand::ResetAll => *self = FilterState::default(),
        }
    }

    /// Clicking a summary card: activates the key, or deactivates it when it
    /// is already the active card.
    pub fn toggle_card(&mut self, key: CardFilterKey) {
        if self.card == Some(key) {
            self.dispatch(FilterCommand::SetCard(None));
        } else {
            self.dispatch(FilterCommand::SetCard(Some(key)));
        }
    }

    pub fn card(&self) -> Option<CardFilterKey> {
        self.card
    }

    pub fn bp(&self) -> Option<VitalCategory> {
        self.bp
    }

    pub fn o2(&self) -> Option<VitalCategory> {
        self.o2
    }

    pub fn hr(&self) -> Option<VitalCategory> {
        self.hr
    }

    pub fn age(&self) -> Option<AgeBand> {
        self.age
    }

    /// True when nothing narrows the row set.
    pub fn is_clear(&self) -> bool {
        *self == FilterState::default()
    }

    fn matches(&self, row: &PatientRecord) -> bool {
        if let Some(key) = self.card {
            if !card_matches(row, key) {
                return false;
            }
        }
        if let Some(category) = self.bp {
            if bp_category(&row.blood_pressure) != category {
                return false;
            }
        }
        if let Some(category) = self.o2 {
            if oxygen_category(row.oxygen_level) != category {
                return false;
            }
        }
        if let Some(category) = self.hr {
            if heart_rate_category(row.heart_rate) != category {
                return false;
            }
        }
        if let Some(band) = self.age {
            if age_band(row.age) != band {
                return false;
            }
        }
        true
    }
}

fn card_matches(row: &PatientRecord, key: CardFilterKey) -> bool {
    match key {
        // The card uses the clinical threshold, not the dropdown one.
        CardFilterKey::HighBp => is_clinical_high_bp(&row.blood_pressure),
        CardFilterKey::LowO2 => oxygen_category(row.oxygen_level) == VitalCategory::Low,
        CardFilterKey::NormalO2 => oxygen_category(row.oxygen_level) == VitalCategory::Normal,
        CardFilterKey::HighO2 => oxygen_category(row.oxygen_level) == VitalCategory::High,
        CardFilterKey::LowHr => heart_rate_category(row.heart_rate) == VitalCategory::Low,
        CardFilterKey::NormalHr => heart_rate_category(row.heart_rate) == VitalCategory::Normal,
        CardFilterKey::HighHr => heart_rate_category(row.heart_rate) == VitalCategory::High,
    }
}

/// Columns that take a free-text filter. The vitals and age columns use the
/// categorical dropdowns instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextColumn {
    Name,
    Room,
    Gender,
}

/// Case-insensitive substring filters, one per text column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextFilters(HashMap<TextColumn, String>);

impl TextFilters {
    /// An empty or whitespace-only value removes the filter for that column.
    pub fn set(&mut self, column: TextColumn, value: &str) {
        let value = value.trim();
        if value.is_empty() {
            self.0.remove(&column);
        } else {
            self.0.insert(column, value.to_lowercase());
        }
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn matches(&self, row: &PatientRecord) -> bool {
        self.0.iter().all(|(column, needle)| {
            let value = match column {
                TextColumn::Name => row.name.clone(),
                TextColumn::Room => row.room.clone(),
                TextColumn::Gender => row.gender.to_string(),
            };
            value.to_lowercase().contains(needle)
        })
    }
}

/// Apply the active selection to `rows`, producing the visible subset.
/// All filters are ANDed; input order is preserved and `rows` is not mutated.
pub fn visible_rows<'a>(
    rows: &'a [PatientRecord],
    filters: &FilterState,
    text: &TextFilters,
) -> Vec<&'a PatientRecord> {
    rows.iter()
        .filter(|row| filters.matches(row) && text.matches(row))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Gender;

    fn row(id: u64, name: &str, age: u32, bp: &str, hr: u32, o2: u32) -> PatientRecord {
        PatientRecord {
            id,
            name: name.into(),
            age,
            room: format!("{}A", 100 + id),
            gender: if id % 2 == 0 { Gender::Male } else { Gender::Female },
            blood_pressure: bp.into(),
            heart_rate: hr,
            oxygen_level: o2,
        }
    }

    fn sample_rows() -> Vec<PatientRecord> {
        vec![
            row(0, "John Smith", 42, "150/90", 75, 96),
            row(1, "Sarah Johnson", 29, "120/80", 68, 91),
            row(2, "Michael Brown", 63, "135/85", 110, 97),
        ]
    }

    #[test]
    fn card_filter_resets_dropdowns() {
        let mut state = FilterState::default();
        state.dispatch(FilterCommand::SetBp(Some(VitalCategory::High)));
        state.dispatch(FilterCommand::SetAge(Some(AgeBand::Over50)));
        state.dispatch(FilterCommand::SetCard(Some(CardFilterKey::LowO2)));

        assert_eq!(state.card(), Some(CardFilterKey::LowO2));
        assert_eq!(state.bp(), None);
        assert_eq!(state.age(), None);
    }

    #[test]
    fn dropdown_filter_clears_card() {
        let mut state = FilterState::default();
        state.dispatch(FilterCommand::SetCard(Some(CardFilterKey::HighBp)));
        state.dispatch(FilterCommand::SetO2(Some(VitalCategory::Low)));

        assert_eq!(state.card(), None);
        assert_eq!(state.o2(), Some(VitalCategory::Low));
    }

    #[test]
    fn clearing_a_dropdown_keeps_card() {
        // Setting a dropdown back to "all" is not an activation and must not
        // clear an active card filter.
        let mut state = FilterState::default();
        state.dispatch(FilterCommand::SetCard(Some(CardFilterKey::HighBp)));
        state.dispatch(FilterCommand::SetHr(None));
        assert_eq!(state.card(), Some(CardFilterKey::HighBp));
    }

    #[test]
    fn reset_all_returns_to_shared_clear_state() {
        let mut state = FilterState::default();
        state.dispatch(FilterCommand::SetHr(Some(VitalCategory::High)));
        state.dispatch(FilterCommand::ResetAll);
        assert!(state.is_clear());
    }

    #[test]
    fn toggle_card_is_on_off() {
        let mut state = FilterState::default();
        state.toggle_card(CardFilterKey::HighBp);
        assert_eq!(state.card(), Some(CardFilterKey::HighBp));
        state.toggle_card(CardFilterKey::LowO2);
        assert_eq!(state.card(), Some(CardFilterKey::LowO2));
        state.toggle_card(CardFilterKey::LowO2);
        assert_eq!(state.card(), None);
    }

    #[test]
    fn clear_selection_keeps_every_row_in_order() {
        let rows = sample_rows();
        let visible = visible_rows(&rows, &FilterState::default(), &TextFilters::default());
        assert_eq!(visible.len(), 3);
        assert!(visible.iter().zip(&rows).all(|(a, b)| a.id == b.id));
    }

    #[test]
    fn high_bp_card_uses_clinical_threshold() {
        // 150/90 exceeds sys>140; 135/85 only trips the dropdown threshold.
        let rows = sample_rows();
        let mut state = FilterState::default();
        state.dispatch(FilterCommand::SetCard(Some(CardFilterKey::HighBp)));
        let visible = visible_rows(&rows, &state, &TextFilters::default());
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].name, "John Smith");
    }

    #[test]
    fn bp_dropdown_high_is_looser_than_card() {
        let rows = sample_rows();
        let mut state = FilterState::default();
        state.dispatch(FilterCommand::SetBp(Some(VitalCategory::High)));
        let visible = visible_rows(&rows, &state, &TextFilters::default());
        assert_eq!(visible.len(), 2);
        assert_eq!(visible[0].name, "John Smith");
        assert_eq!(visible[1].name, "Michael Brown");
    }

    #[test]
    fn low_o2_filter_keeps_only_desaturated_row() {
        let rows = sample_rows();
        let mut state = FilterState::default();
        state.dispatch(FilterCommand::SetO2(Some(VitalCategory::Low)));
        let visible = visible_rows(&rows, &state, &TextFilters::default());
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].oxygen_level, 91);
    }

    #[test]
    fn high_hr_filter_keeps_only_tachycardic_row() {
        let rows = sample_rows();
        let mut state = FilterState::default();
        state.dispatch(FilterCommand::SetHr(Some(VitalCategory::High)));
        let visible = visible_rows(&rows, &state, &TextFilters::default());
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].heart_rate, 110);
    }

    #[test]
    fn filters_are_anded() {
        let rows = sample_rows();
        let mut state = FilterState::default();
        state.dispatch(FilterCommand::SetHr(Some(VitalCategory::High)));
        state.dispatch(FilterCommand::SetO2(Some(VitalCategory::Low)));
        assert!(visible_rows(&rows, &state, &TextFilters::default()).is_empty());
    }

    #[test]
    fn text_filter_is_case_insensitive_substring() {
        let rows = sample_rows();
        let mut text = TextFilters::default();
        text.set(TextColumn::Name, "JOHN");
        let visible = visible_rows(&rows, &FilterState::default(), &text);
        // Matches both "John Smith" and "Sarah Johnson".
        assert_eq!(visible.len(), 2);

        text.set(TextColumn::Gender, "fem");
        let visible = visible_rows(&rows, &FilterState::default(), &text);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].name, "Sarah Johnson");
    }

    #[test]
    fn blank_text_filter_removes_the_entry() {
        let mut text = TextFilters::default();
        text.set(TextColumn::Room, "101");
        text.set(TextColumn::Room, "   ");
        assert!(text.is_empty());
    }
}
