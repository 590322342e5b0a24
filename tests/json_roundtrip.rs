use std::fs;

use tempfile::TempDir;

use rollbook::{
    core::store::RecordStore,
    persist::{PersistError, RecordSink, json::JsonFile},
    student::StudentRecord,
    types::ErrorKind,
};

fn rec(roll: &str, name: &str, gpa: &str) -> StudentRecord {
    StudentRecord::parse(roll, name, gpa).unwrap()
}

#[test]
fn save_then_load_round_trips_records_and_order() {
    let tmp = TempDir::new().expect("tmp");
    let path = tmp.path().join("students.json");

    let mut store = RecordStore::new();
    store.add(rec("3", "Cy \"The\" Third", "2.25")).unwrap();
    store.add(rec("1", "Ann", "4.0")).unwrap();
    store.add(rec("x2", "Bø", "0")).unwrap();

    let file = JsonFile::new(&path);
    file.save(&store.to_vec()).expect("save");

    let loaded = JsonFile::new(&path).load().expect("load");
    assert_eq!(loaded.to_vec(), store.to_vec());
    assert!(loaded.check_consistency().is_ok());
}

#[test]
fn file_uses_roll_number_key_and_json_array() {
    let tmp = TempDir::new().expect("tmp");
    let path = tmp.path().join("students.json");

    JsonFile::new(&path)
        .save(&[rec("7", "Ann", "3.5")])
        .expect("save");

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(
        value,
        serde_json::json!([{ "rollNumber": "7", "name": "Ann", "gpa": 3.5 }])
    );
}

#[test]
fn missing_file_loads_empty_store() {
    let tmp = TempDir::new().expect("tmp");
    let store = JsonFile::new(tmp.path().join("absent.json")).load().expect("load");
    assert!(store.is_empty());
}

#[test]
fn malformed_file_is_invalid_format() {
    let tmp = TempDir::new().expect("tmp");
    let path = tmp.path().join("broken.json");
    fs::write(&path, "[{\"rollNumber\": \"1\", \"name\": \"A\"").unwrap();

    let err = JsonFile::new(&path).load().unwrap_err();
    assert!(matches!(err, PersistError::Json(_)));
    assert_eq!(err.kind(), ErrorKind::InvalidFormat);

    fs::write(&path, r#"[{"rollNumber": "1", "name": "A", "gpa": 9.5}]"#).unwrap();
    let err = JsonFile::new(&path).load().unwrap_err();
    assert!(matches!(err, PersistError::InvalidFormat { index: 0, .. }));
}

#[test]
fn atomic_save_replaces_file_without_leftovers() {
    let tmp = TempDir::new().expect("tmp");
    let path = tmp.path().join("students.json");
    let mut file = JsonFile::new(&path).with_pretty(false);

    file.write_records(&[rec("1", "A", "1.0"), rec("2", "B", "2.0")])
        .expect("first save");
    let n = file.write_records(&[rec("3", "C", "3.0")]).expect("second save");
    assert_eq!(n, 1);

    let loaded = file.load().expect("load");
    assert_eq!(loaded.to_vec(), [rec("3", "C", "3.0")]);

    let entries: Vec<_> = fs::read_dir(tmp.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
}
