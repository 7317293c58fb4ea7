//! In-memory score ledger.
//!
//! The ledger keeps one [`StudentRecord`] per student id in first-seen order.
//! Every mutation goes through [`Ledger::upsert`], [`Ledger::adjust`] or
//! [`Ledger::apply`], which keep each record's total equal to the sum of its
//! category scores.

mod entry;
mod record;

pub use entry::ScoreEntry;
pub use record::StudentRecord;

use std::collections::HashMap;

use strum::EnumCount;
use tracing::{debug, warn};

use crate::category::Category;
use crate::error::{Error, Result};
use crate::snapshot::SnapshotRecord;

/// A stored total that disagreed with the sum of the stored category scores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TotalMismatch {
    pub id: String,
    pub stored: i64,
    pub computed: i64,
}

/// Outcome of replacing the ledger content from serialized records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    pub total_mismatches: Vec<TotalMismatch>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    records: Vec<StudentRecord>,
    index: HashMap<String, usize>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ledger from serialized records.
    pub fn from_snapshot(records: Vec<SnapshotRecord>) -> Result<(Self, LoadReport)> {
        let mut ledger = Self::new();
        let mut report = LoadReport::default();

        for raw in records {
            let id = raw.id.trim().to_string();
            if id.is_empty() {
                return Err(Error::MalformedData(format!(
                    "record {} has an empty id",
                    report.loaded + 1
                )));
            }
            if ledger.index.contains_key(&id) {
                return Err(Error::MalformedData(format!("duplicate student id {}", id)));
            }
            let name = raw.name.trim();
            if name.is_empty() {
                return Err(Error::MalformedData(format!(
                    "student {} has an empty name",
                    id
                )));
            }

            let mut scores = [0i64; Category::COUNT];
            for category in Category::all() {
                scores[category.index()] = raw.score(category);
            }
            let record = StudentRecord::from_scores(id, name.to_string(), scores)?;

            if let Some(stored) = raw.total
                && stored != record.total()
            {
                warn!(
                    "Stored total for student {} is {}, recomputed {}",
                    record.id(),
                    stored,
                    record.total()
                );
                report.total_mismatches.push(TotalMismatch {
                    id: record.id().to_string(),
                    stored,
                    computed: record.total(),
                });
            }

            ledger.insert(record);
            report.loaded += 1;
        }

        Ok((ledger, report))
    }

    /// Replace the whole ledger with the given records.
    ///
    /// On error the current content is kept.
    pub fn load_from(&mut self, records: Vec<SnapshotRecord>) -> Result<LoadReport> {
        let (ledger, report) = Self::from_snapshot(records)?;
        *self = ledger;
        Ok(report)
    }

    /// Flat, ordered records suitable for a JSON snapshot.
    pub fn to_snapshot(&self) -> Vec<SnapshotRecord> {
        self.records.iter().map(SnapshotRecord::from).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&StudentRecord> {
        self.index.get(id.trim()).map(|&i| &self.records[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id.trim())
    }

    /// Records in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &StudentRecord> {
        self.records.iter()
    }

    /// Return the record for `id`, creating it with zero scores if absent.
    ///
    /// An existing record keeps its name.
    pub fn upsert(&mut self, id: &str, name: &str) -> Result<&StudentRecord> {
        let (id, name) = validate_identity(id, name)?;
        let position = match self.index.get(&id).copied() {
            Some(i) => {
                if self.records[i].name() != name {
                    debug!(
                        "Student {} keeps name {:?}, ignoring {:?}",
                        id,
                        self.records[i].name(),
                        name
                    );
                }
                i
            }
            None => self.insert(StudentRecord::new(id, name)),
        };
        Ok(&self.records[position])
    }

    /// Add `delta` to one category of an existing record. Returns the new total.
    pub fn adjust(&mut self, id: &str, category: Category, delta: i64) -> Result<i64> {
        let position = *self
            .index
            .get(id.trim())
            .ok_or_else(|| Error::NotFound(id.trim().to_string()))?;
        let record = &mut self.records[position];
        record.add(category, delta)?;
        Ok(record.total())
    }

    /// Upsert the entry's student and apply all of its deltas.
    ///
    /// Either every delta is applied or none is; a new student is only
    /// inserted when all deltas succeed.
    pub fn apply(&mut self, entry: &ScoreEntry) -> Result<&StudentRecord> {
        let (id, name) = validate_identity(&entry.id, &entry.name)?;
        let existing = self.index.get(&id).copied();

        let mut candidate = match existing {
            Some(i) => self.records[i].clone(),
            None => StudentRecord::new(id, name),
        };
        for (&category, &delta) in &entry.deltas {
            candidate.add(category, delta)?;
        }
        debug!(
            "Applied {} deltas to student {}, total {}",
            entry.deltas.len(),
            candidate.id(),
            candidate.total()
        );

        let position = match existing {
            Some(i) => {
                self.records[i] = candidate;
                i
            }
            None => self.insert(candidate),
        };
        Ok(&self.records[position])
    }

    fn insert(&mut self, record: StudentRecord) -> usize {
        let position = self.records.len();
        self.index.insert(record.id().to_string(), position);
        self.records.push(record);
        position
    }
}

fn validate_identity(id: &str, name: &str) -> Result<(String, String)> {
    let id = id.trim();
    let name = name.trim();
    if id.is_empty() || name.is_empty() {
        return Err(Error::Validation(
            "student id and name must not be empty".to_string(),
        ));
    }
    Ok((id.to_string(), name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice_entry() -> ScoreEntry {
        ScoreEntry::new("1001", "Alice")
            .with_delta(Category::Attendance, 5)
            .with_delta(Category::Hygiene, -2)
    }

    #[test]
    fn test_upsert_creates_zeroed_record() {
        let mut ledger = Ledger::new();
        let record = ledger.upsert("1001", "Alice").unwrap();
        assert_eq!(record.name(), "Alice");
        assert_eq!(record.total(), 0);
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_upsert_is_idempotent() {
        let mut ledger = Ledger::new();
        ledger.upsert("1001", "Alice").unwrap();
        ledger.upsert(" 1001 ", "Alice").unwrap();
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_upsert_keeps_existing_name() {
        let mut ledger = Ledger::new();
        ledger.upsert("1001", "Alice").unwrap();
        let record = ledger.upsert("1001", "Alicia").unwrap();
        assert_eq!(record.name(), "Alice");
    }

    #[test]
    fn test_upsert_rejects_empty_fields() {
        let mut ledger = Ledger::new();
        assert!(matches!(ledger.upsert("", "Alice"), Err(Error::Validation(_))));
        assert!(matches!(ledger.upsert("1001", "  "), Err(Error::Validation(_))));
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_adjust_unknown_student() {
        let mut ledger = Ledger::new();
        let err = ledger.adjust("404", Category::Homework, 1).unwrap_err();
        assert!(matches!(err, Error::NotFound(id) if id == "404"));
    }

    #[test]
    fn test_adjust_scenario() {
        let mut ledger = Ledger::new();
        ledger.upsert("1001", "Alice").unwrap();
        assert_eq!(ledger.adjust("1001", Category::Attendance, 5).unwrap(), 5);
        assert_eq!(ledger.adjust("1001", Category::Hygiene, -2).unwrap(), 3);
        assert_eq!(ledger.get("1001").unwrap().total(), 3);
    }

    #[test]
    fn test_adjust_by_zero() {
        let mut ledger = Ledger::new();
        ledger.apply(&alice_entry()).unwrap();
        assert_eq!(ledger.adjust("1001", Category::Classroom, 0).unwrap(), 3);
    }

    #[test]
    fn test_negative_total_not_clamped() {
        let mut ledger = Ledger::new();
        ledger.upsert("1001", "Alice").unwrap();
        assert_eq!(ledger.adjust("1001", Category::Grooming, -50).unwrap(), -50);
    }

    #[test]
    fn test_apply_matches_adjust() {
        let mut ledger = Ledger::new();
        let record = ledger.apply(&alice_entry()).unwrap();
        assert_eq!(record.score(Category::Attendance), 5);
        assert_eq!(record.score(Category::Hygiene), -2);
        assert_eq!(record.total(), 3);
    }

    #[test]
    fn test_apply_without_deltas_creates_record() {
        let mut ledger = Ledger::new();
        ledger.apply(&ScoreEntry::new("1002", "Bob")).unwrap();
        assert_eq!(ledger.get("1002").unwrap().total(), 0);
    }

    #[test]
    fn test_apply_overflow_is_atomic() {
        let mut ledger = Ledger::new();
        ledger.apply(&alice_entry()).unwrap();

        let entry = ScoreEntry::new("1001", "Alice")
            .with_delta(Category::Attendance, 1)
            .with_delta(Category::Homework, i64::MAX);
        assert!(matches!(ledger.apply(&entry), Err(Error::ScoreOverflow { .. })));

        let record = ledger.get("1001").unwrap();
        assert_eq!(record.score(Category::Attendance), 5);
        assert_eq!(record.total(), 3);

        let entry = ScoreEntry::new("1003", "Cy")
            .with_delta(Category::Attendance, i64::MAX)
            .with_delta(Category::Homework, 1);
        assert!(ledger.apply(&entry).is_err());
        assert!(!ledger.contains("1003"));
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut ledger = Ledger::new();
        for id in ["3", "1", "2"] {
            ledger.upsert(id, "x").unwrap();
        }
        ledger.upsert("1", "x").unwrap();
        let ids: Vec<&str> = ledger.iter().map(StudentRecord::id).collect();
        assert_eq!(ids, ["3", "1", "2"]);
    }

    #[test]
    fn test_load_from_recomputes_total() {
        let mut raw = SnapshotRecord::new("1001", "Alice");
        raw.set_score(Category::Homework, 4);
        raw.total = Some(99);

        let mut ledger = Ledger::new();
        let report = ledger.load_from(vec![raw]).unwrap();
        assert_eq!(report.loaded, 1);
        assert_eq!(
            report.total_mismatches,
            vec![TotalMismatch {
                id: "1001".to_string(),
                stored: 99,
                computed: 4,
            }]
        );
        assert_eq!(ledger.get("1001").unwrap().total(), 4);
    }

    #[test]
    fn test_load_from_rejects_duplicates_and_keeps_content() {
        let mut ledger = Ledger::new();
        ledger.apply(&alice_entry()).unwrap();

        let records = vec![SnapshotRecord::new("9", "A"), SnapshotRecord::new("9", "B")];
        assert!(matches!(ledger.load_from(records), Err(Error::MalformedData(_))));
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.get("1001").unwrap().total(), 3);
    }

    #[test]
    fn test_load_from_rejects_empty_id() {
        let mut ledger = Ledger::new();
        let err = ledger.load_from(vec![SnapshotRecord::new(" ", "A")]).unwrap_err();
        assert!(matches!(err, Error::MalformedData(_)));
    }

    #[test]
    fn test_load_from_rejects_blank_name_and_keeps_content() {
        let mut ledger = Ledger::new();
        ledger.apply(&alice_entry()).unwrap();

        let records = vec![SnapshotRecord::new("7", "Bo"), SnapshotRecord::new("8", "  ")];
        let err = ledger.load_from(records).unwrap_err();
        assert!(matches!(err, Error::MalformedData(ref m) if m.contains("student 8")));
        assert_eq!(ledger.len(), 1);
        assert!(!ledger.contains("7"));
    }
}
