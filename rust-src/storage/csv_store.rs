//! CSV-backed, append-only store of health entries.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::error::{HealthError, Result};
use crate::models::HealthEntry;


/// Column header of the persisted table, in order.
pub const COLUMNS: [&str; 10] = [
    "Date",
    "Sleep",
    "Steps",
    "Water Intake",
    "Weight",
    "Height",
    "Screen Time",
    "Calories Intake",
    "BMI",
    "BMI_Category",
];


/// In-memory sequence of entries mirrored to one CSV file.
///
/// Entries are only ever appended. Every append rewrites the whole file.
#[derive(Debug)]
pub struct RecordStore {
    path: PathBuf,
    entries: Vec<HealthEntry>,
}


impl RecordStore {
    /// Open the store, loading any existing file.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = load_entries(&path)?;
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries(&self) -> &[HealthEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append an entry and persist the full sequence.
    ///
    /// On a failed write the entry is dropped again so memory matches disk.
    pub fn append(&mut self, entry: HealthEntry) -> Result<()> {
        self.entries.push(entry);

        if let Err(e) = save_entries(&self.path, &self.entries) {
            self.entries.pop();
            return Err(e);
        }

        tracing::info!(path = %self.path.display(), total = self.entries.len(), "entry appended");
        Ok(())
    }
}


/// Load all entries from a CSV file. A missing file is an empty dataset.
pub fn load_entries(path: &Path) -> Result<Vec<HealthEntry>> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "data file missing, starting empty");
        return Ok(Vec::new());
    }

    let file = File::open(path)?;
    let entries = read_entries(file)?;
    tracing::debug!(path = %path.display(), count = entries.len(), "entries loaded");

    Ok(entries)
}


/// Overwrite the CSV file with the given entries.
///
/// Writes a sibling temporary file first and renames it into place.
pub fn save_entries(path: &Path, entries: &[HealthEntry]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    let written = File::create(&tmp_path)
        .map_err(HealthError::from)
        .and_then(|mut file| {
            write_entries(&mut file, entries)?;
            file.sync_all()?;
            Ok(())
        })
        .and_then(|()| Ok(fs::rename(&tmp_path, path)?));

    if let Err(e) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }

    Ok(())
}


/// Decode entries from CSV, matching columns by header name.
pub fn read_entries<R: Read>(reader: R) -> Result<Vec<HealthEntry>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut entries = Vec::new();
    for row in csv_reader.deserialize() {
        entries.push(row?);
    }

    Ok(entries)
}


/// Encode entries as CSV. The header row is written even with no entries.
pub fn write_entries<W: Write>(writer: W, entries: &[HealthEntry]) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(COLUMNS)?;
    for entry in entries {
        csv_writer.serialize(entry)?;
    }
    csv_writer.flush()?;

    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;
    use crate::models::{BmiCategory, Measurements};

    fn create_test_entry(day: u32, sleep: f64) -> HealthEntry {
        HealthEntry::record(
            NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            Measurements {
                sleep,
                steps: 6500,
                water_intake: 1.8,
                weight: 82.0,
                height: 178.0,
                screen_time: 5.5,
                calories_intake: 2400.0,
            },
        )
        .unwrap()
    }

    #[test]
    fn test_missing_file_is_empty() {
        let tmp_dir = TempDir::new().unwrap();
        let store = RecordStore::open(tmp_dir.path().join("data.csv")).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_append_persists() {
        let tmp_dir = TempDir::new().unwrap();
        let path = tmp_dir.path().join("data.csv");

        let mut store = RecordStore::open(&path).unwrap();
        store.append(create_test_entry(1, 6.0)).unwrap();
        store.append(create_test_entry(2, 8.0)).unwrap();

        let reloaded = RecordStore::open(&path).unwrap();
        assert_eq!(reloaded.entries(), store.entries());
        assert_eq!(reloaded.entries()[1].sleep, 8.0);
    }

    #[test]
    fn test_failed_save_leaves_no_temp_file() {
        let tmp_dir = TempDir::new().unwrap();
        // A directory in the target's place makes the final rename fail.
        let path = tmp_dir.path().join("data.csv");
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("keep"), "x").unwrap();

        let mut store = RecordStore {
            path: path.clone(),
            entries: Vec::new(),
        };
        assert!(store.append(create_test_entry(1, 6.0)).is_err());

        assert!(store.is_empty());
        assert!(!tmp_dir.path().join("data.csv.tmp").exists());
    }

    #[test]
    fn test_round_trip_preserves_order() {
        let tmp_dir = TempDir::new().unwrap();
        let path = tmp_dir.path().join("data.csv");

        let entries = vec![
            create_test_entry(5, 7.0),
            create_test_entry(1, 6.5),
            create_test_entry(5, 9.0),
        ];
        save_entries(&path, &entries).unwrap();
        let first = load_entries(&path).unwrap();
        save_entries(&path, &first).unwrap();
        let second = load_entries(&path).unwrap();

        assert_eq!(first, entries);
        assert_eq!(second, entries);
    }

    #[test]
    fn test_header_written_for_empty_store() {
        let mut buf = Vec::new();
        write_entries(&mut buf, &[]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text.trim_end(),
            "Date,Sleep,Steps,Water Intake,Weight,Height,Screen Time,Calories Intake,BMI,BMI_Category"
        );
    }

    #[test]
    fn test_row_format() {
        let mut buf = Vec::new();
        write_entries(&mut buf, &[create_test_entry(9, 7.5)]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let row = text.lines().nth(1).unwrap();
        assert_eq!(row, "2024-03-09,7.5,6500,1.8,82.0,178.0,5.5,2400.0,25.9,Overweight");
    }

    #[test]
    fn test_reads_float_steps() {
        let data = "Date,Sleep,Steps,Water Intake,Weight,Height,Screen Time,Calories Intake,BMI,BMI_Category\n\
                    2024-01-15,6.0,8000.0,2.0,60.0,165.0,4.0,1800.0,22.0,Normal\n";
        let entries = read_entries(data.as_bytes()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].steps, 8000);
        assert_eq!(entries[0].bmi_category, BmiCategory::Normal);
    }

    #[test]
    fn test_rejects_fractional_steps() {
        let data = "Date,Sleep,Steps,Water Intake,Weight,Height,Screen Time,Calories Intake,BMI,BMI_Category\n\
                    2024-01-15,6.0,80.5,2.0,60.0,165.0,4.0,1800.0,22.0,Normal\n";
        assert!(read_entries(data.as_bytes()).is_err());
    }
}
