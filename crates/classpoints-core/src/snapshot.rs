//! JSON snapshot of the whole ledger.
//!
//! A snapshot is an array of flat objects, one per student, in ledger order.
//! Legacy files use the Chinese column labels as keys; those are
//! accepted as aliases when reading.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};
use tracing::{info, warn};

use crate::category::Category;
use crate::error::{Error, Result};
use crate::ledger::{Ledger, LoadReport, StudentRecord};

/// One serialized student row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotRecord {
    #[serde(alias = "学号", deserialize_with = "deserialize_student_id")]
    pub id: String,
    #[serde(alias = "姓名")]
    pub name: String,
    #[serde(alias = "出勤")]
    pub attendance: i64,
    #[serde(alias = "仪容")]
    pub grooming: i64,
    #[serde(alias = "晨读")]
    pub morning_reading: i64,
    #[serde(alias = "课堂")]
    pub classroom: i64,
    #[serde(alias = "作业")]
    pub homework: i64,
    #[serde(alias = "两操")]
    pub exercises: i64,
    #[serde(alias = "午休")]
    pub midday_rest: i64,
    #[serde(alias = "自习")]
    pub self_study: i64,
    #[serde(alias = "卫生")]
    pub hygiene: i64,
    /// Stored total. Informational only: totals are recomputed on load.
    #[serde(alias = "总分", default, skip_serializing_if = "Option::is_none")]
    pub total: Option<i64>,
}

impl SnapshotRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            attendance: 0,
            grooming: 0,
            morning_reading: 0,
            classroom: 0,
            homework: 0,
            exercises: 0,
            midday_rest: 0,
            self_study: 0,
            hygiene: 0,
            total: None,
        }
    }

    pub fn score(&self, category: Category) -> i64 {
        match category {
            Category::Attendance => self.attendance,
            Category::Grooming => self.grooming,
            Category::MorningReading => self.morning_reading,
            Category::Classroom => self.classroom,
            Category::Homework => self.homework,
            Category::Exercises => self.exercises,
            Category::MiddayRest => self.midday_rest,
            Category::SelfStudy => self.self_study,
            Category::Hygiene => self.hygiene,
        }
    }

    pub fn set_score(&mut self, category: Category, value: i64) {
        let slot = match category {
            Category::Attendance => &mut self.attendance,
            Category::Grooming => &mut self.grooming,
            Category::MorningReading => &mut self.morning_reading,
            Category::Classroom => &mut self.classroom,
            Category::Homework => &mut self.homework,
            Category::Exercises => &mut self.exercises,
            Category::MiddayRest => &mut self.midday_rest,
            Category::SelfStudy => &mut self.self_study,
            Category::Hygiene => &mut self.hygiene,
        };
        *slot = value;
    }
}

impl From<&StudentRecord> for SnapshotRecord {
    fn from(record: &StudentRecord) -> Self {
        let mut raw = Self::new(record.id(), record.name());
        for (category, score) in record.scores() {
            raw.set_score(category, score);
        }
        raw.total = Some(record.total());
        raw
    }
}

/// Ids are text, but hand-edited files often store them as numbers.
#[derive(Deserialize)]
#[serde(untagged)]
enum StudentId {
    Text(String),
    Integer(i64),
}

pub(crate) fn deserialize_student_id<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match StudentId::deserialize(deserializer)? {
        StudentId::Text(text) => text,
        StudentId::Integer(number) => number.to_string(),
    })
}

/// Serialize records as a 4-space indented JSON array.
pub fn to_json(records: &[SnapshotRecord]) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    records.serialize(&mut serializer)?;
    String::from_utf8(buf).map_err(|e| Error::MalformedData(e.to_string()))
}

/// Parse snapshot content.
pub fn from_json(content: &str) -> Result<Vec<SnapshotRecord>> {
    serde_json::from_str(content).map_err(|e| Error::MalformedData(e.to_string()))
}

/// Write the whole ledger, replacing any previous snapshot at `path`.
pub fn save<P: AsRef<Path>>(path: P, ledger: &Ledger) -> Result<()> {
    let path = path.as_ref();
    let json = to_json(&ledger.to_snapshot())?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let staging = staging_path(path);
    fs::write(&staging, json)?;
    if let Err(e) = fs::rename(&staging, path) {
        if let Err(cleanup) = fs::remove_file(&staging) {
            warn!("Failed to remove {}: {}", staging.display(), cleanup);
        }
        return Err(e.into());
    }

    info!("Saved {} records to {}", ledger.len(), path.display());
    Ok(())
}

/// Read raw records from a snapshot file.
pub fn read_records<P: AsRef<Path>>(path: P) -> Result<Vec<SnapshotRecord>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::SnapshotNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = fs::read_to_string(path)?;
    from_json(&content).map_err(|e| match e {
        Error::MalformedData(detail) => {
            Error::MalformedData(format!("{}: {}", path.display(), detail))
        }
        other => other,
    })
}

/// Load a snapshot file into a new ledger.
pub fn load<P: AsRef<Path>>(path: P) -> Result<(Ledger, LoadReport)> {
    let records = read_records(&path)?;
    let (ledger, report) = Ledger::from_snapshot(records)?;
    info!(
        "Loaded {} records from {}",
        report.loaded,
        path.as_ref().display()
    );
    Ok((ledger, report))
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::ScoreEntry;
    use tempfile::TempDir;

    #[test]
    fn test_record_field_order() {
        let mut ledger = Ledger::new();
        ledger
            .apply(&ScoreEntry::new("1001", "Alice").with_delta(Category::Attendance, 5))
            .unwrap();
        let json = to_json(&ledger.to_snapshot()).unwrap();

        let keys = [
            "\"id\"",
            "\"name\"",
            "\"attendance\"",
            "\"grooming\"",
            "\"morning_reading\"",
            "\"classroom\"",
            "\"homework\"",
            "\"exercises\"",
            "\"midday_rest\"",
            "\"self_study\"",
            "\"hygiene\"",
            "\"total\"",
        ];
        let positions: Vec<usize> = keys.iter().map(|k| json.find(k).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(json.contains("\n    {"));
    }

    #[test]
    fn test_parse_legacy_keys_with_numeric_id() {
        let content = r#"[
            {"学号": 1001, "姓名": "张三", "出勤": 2, "仪容": 0, "晨读": 1, "课堂": 0,
             "作业": 0, "两操": 0, "午休": 0, "自习": 0, "卫生": -1, "总分": 2}
        ]"#;
        let records = from_json(content).unwrap();
        assert_eq!(records[0].id, "1001");
        assert_eq!(records[0].name, "张三");
        assert_eq!(records[0].score(Category::MorningReading), 1);
        assert_eq!(records[0].total, Some(2));
    }

    #[test]
    fn test_missing_total_is_accepted() {
        let content = r#"[{"id": "1", "name": "A", "attendance": 1, "grooming": 0,
            "morning_reading": 0, "classroom": 0, "homework": 0, "exercises": 0,
            "midday_rest": 0, "self_study": 0, "hygiene": 2}]"#;
        let records = from_json(content).unwrap();
        assert_eq!(records[0].total, None);
    }

    #[test]
    fn test_missing_category_is_malformed() {
        let content = r#"[{"id": "1", "name": "A", "attendance": 1}]"#;
        assert!(matches!(from_json(content), Err(Error::MalformedData(_))));
    }

    #[test]
    fn test_non_integer_score_is_malformed() {
        let content = r#"[{"id": "1", "name": "A", "attendance": 1.5, "grooming": 0,
            "morning_reading": 0, "classroom": 0, "homework": 0, "exercises": 0,
            "midday_rest": 0, "self_study": 0, "hygiene": 0}]"#;
        assert!(matches!(from_json(content), Err(Error::MalformedData(_))));

        let content = content.replace("1.5", "\"3\"");
        assert!(matches!(from_json(&content), Err(Error::MalformedData(_))));
    }

    #[test]
    fn test_save_replaces_file_and_leaves_no_staging() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("data").join("students.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "stale").unwrap();

        let mut ledger = Ledger::new();
        ledger.upsert("1", "A").unwrap();
        save(&path, &ledger).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with('['));
        assert!(!staging_path(&path).exists());
    }

    #[test]
    fn test_failed_replace_removes_staging() {
        let temp = TempDir::new().unwrap();
        // A directory in the way makes the final rename fail
        let path = temp.path().join("students.json");
        fs::create_dir_all(path.join("occupied")).unwrap();

        let mut ledger = Ledger::new();
        ledger.upsert("1", "A").unwrap();
        assert!(matches!(save(&path, &ledger), Err(Error::Io(_))));

        assert!(path.is_dir());
        assert!(!staging_path(&path).exists());
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = load(temp.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, Error::SnapshotNotFound { .. }));
    }

    #[test]
    fn test_load_garbage_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.json");
        fs::write(&path, "{not json").unwrap();
        let err = load(&path).unwrap_err();
        assert!(matches!(err, Error::MalformedData(detail) if detail.contains("bad.json")));
    }
}
