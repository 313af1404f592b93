// 📜 History Log
// Session-scoped, append-only record of successful calculations

use crate::engine::{BmiResult, Category, ValidatedInput};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Time-based entry id (Unix millis), strictly increasing within a log
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub i64);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: EntryId,
    /// 2 fractional digits
    pub bmi: String,
    pub category: Category,
    pub age: i32,
    /// `5'7"`
    pub height: String,
    /// `70 kg`
    pub weight: String,
    pub recorded_at: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(id: EntryId, input: &ValidatedInput, result: &BmiResult, recorded_at: DateTime<Utc>) -> Self {
        HistoryEntry {
            id,
            bmi: result.bmi_display(),
            category: result.category,
            age: input.age,
            height: format_height(input.feet, input.inches),
            weight: format_weight(input.weight_kg),
            recorded_at,
        }
    }

    /// One line for list rendering
    pub fn summary(&self) -> String {
        format!(
            "Age: {}, Height: {}, Weight: {}, BMI: {} ({})",
            self.age, self.height, self.weight, self.bmi, self.category
        )
    }
}

pub fn format_height(feet: i32, inches: i32) -> String {
    format!("{}'{}\"", feet, inches)
}

/// `{}` on f64 prints the shortest round-tripping form, so 70.0 shows as `70`
pub fn format_weight(weight_kg: f64) -> String {
    format!("{} kg", weight_kg)
}

// ============================================================================
// LOG
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct HistoryLog {
    entries: Vec<HistoryEntry>,
    // survives clear() so ids never repeat within a session
    last_id: Option<EntryId>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the log and return it with one more entry at the end
    pub fn append(mut self, input: &ValidatedInput, result: &BmiResult) -> Self {
        self.push(input, result);
        self
    }

    /// Append in place, returning the new entry
    pub fn push(&mut self, input: &ValidatedInput, result: &BmiResult) -> &HistoryEntry {
        self.push_at(input, result, Utc::now())
    }

    pub(crate) fn push_at(
        &mut self,
        input: &ValidatedInput,
        result: &BmiResult,
        now: DateTime<Utc>,
    ) -> &HistoryEntry {
        let id = self.next_id(now.timestamp_millis());
        self.entries.push(HistoryEntry::new(id, input, result, now));
        &self.entries[self.entries.len() - 1]
    }

    fn next_id(&mut self, millis: i64) -> EntryId {
        let id = match self.last_id {
            Some(EntryId(last)) if millis <= last => EntryId(last + 1),
            _ => EntryId(millis),
        };
        self.last_id = Some(id);
        id
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Value-returning form of `clear`
    pub fn cleared(mut self) -> Self {
        self.clear();
        self
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HistoryEntry> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a HistoryLog {
    type Item = &'a HistoryEntry;
    type IntoIter = std::slice::Iter<'a, HistoryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::compute_bmi;
    use chrono::TimeZone;

    fn sample(weight_kg: f64) -> (ValidatedInput, BmiResult) {
        let input = ValidatedInput { age: 30, feet: 5, inches: 7, weight_kg };
        let result = compute_bmi(&input).unwrap();
        (input, result)
    }

    #[test]
    fn test_entry_formatting() {
        let (input, result) = sample(70.0);
        let log = HistoryLog::new().append(&input, &result);
        let entry = log.last().unwrap();

        assert_eq!(entry.bmi, "24.17");
        assert_eq!(entry.category, Category::NormalWeight);
        assert_eq!(entry.age, 30);
        assert_eq!(entry.height, "5'7\"");
        assert_eq!(entry.weight, "70 kg");
        assert_eq!(
            entry.summary(),
            "Age: 30, Height: 5'7\", Weight: 70 kg, BMI: 24.17 (Normal weight)"
        );
    }

    #[test]
    fn test_weight_keeps_entered_precision() {
        assert_eq!(format_weight(70.25), "70.25 kg");
        assert_eq!(format_weight(0.1), "0.1 kg");
        assert_eq!(format_height(6, 0), "6'0\"");
    }

    #[test]
    fn test_append_order_and_distinct_ids() {
        let mut log = HistoryLog::new();
        for w in [60.0, 70.0, 80.0, 90.0, 100.0] {
            let (input, result) = sample(w);
            log = log.append(&input, &result);
        }

        assert_eq!(log.len(), 5);
        let weights: Vec<&str> = log.iter().map(|e| e.weight.as_str()).collect();
        assert_eq!(weights, ["60 kg", "70 kg", "80 kg", "90 kg", "100 kg"]);

        let ids: Vec<EntryId> = log.iter().map(|e| e.id).collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_ids_bump_when_clock_stalls() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let (input, result) = sample(70.0);
        let mut log = HistoryLog::new();

        let first = log.push_at(&input, &result, now).id;
        let second = log.push_at(&input, &result, now).id;
        assert_eq!(first, EntryId(now.timestamp_millis()));
        assert_eq!(second, EntryId(now.timestamp_millis() + 1));

        // clock going backwards still yields a larger id
        let earlier = Utc.with_ymd_and_hms(2024, 4, 30, 0, 0, 0).unwrap();
        let third = log.push_at(&input, &result, earlier).id;
        assert!(third > second);
    }

    #[test]
    fn test_clear_is_idempotent_and_ids_stay_unique() {
        let (input, result) = sample(70.0);
        let mut log = HistoryLog::new().append(&input, &result);
        let before = log.last().unwrap().id;

        log.clear();
        assert!(log.is_empty());
        log = log.cleared();
        assert!(log.is_empty());

        let after = log.push(&input, &result).id;
        assert!(after > before);
    }

    #[test]
    fn test_entry_serializes() {
        let (input, result) = sample(70.0);
        let log = HistoryLog::new().append(&input, &result);
        let json = serde_json::to_value(log.last().unwrap()).unwrap();

        assert_eq!(json["bmi"], "24.17");
        assert_eq!(json["category"], "Normal weight");
        assert_eq!(json["height"], "5'7\"");
        assert!(json["id"].is_i64());
    }
}
