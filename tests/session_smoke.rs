use std::fs;

use tempfile::TempDir;

use rollbook::{
    session::{Session, SessionConfig, SessionError},
    types::{ErrorKind, SortKey, SortOrder},
};

fn config(tmp: &TempDir) -> SessionConfig {
    SessionConfig {
        data_file: tmp.path().join("students.json"),
        ..SessionConfig::default()
    }
}

#[test]
fn mutations_autosave_and_reopen() {
    let tmp = TempDir::new().expect("tmp");

    let mut session = Session::open(config(&tmp)).expect("open");
    assert!(session.store().is_empty());

    session.add("cs-2", "Bob", "2.5").expect("add");
    session.add("cs-1", "Ann", "3.9").expect("add");
    session.update("CS-2", None, Some("3.1")).expect("update");
    session.add("cs-3", "Cy", "1.0").expect("add");
    session.delete(" cs-3").expect("delete");

    let reopened = Session::open(config(&tmp)).expect("reopen");
    let rows = reopened.view(None);
    let summary: Vec<_> = rows
        .iter()
        .map(|r| (r.roll.as_str(), r.name.as_str(), r.gpa.value()))
        .collect();
    assert_eq!(summary, [("CS-2", "Bob", 3.1), ("CS-1", "Ann", 3.9)]);
}

#[test]
fn errors_are_reported_with_their_kind() {
    let tmp = TempDir::new().expect("tmp");
    let mut session = Session::open(config(&tmp)).expect("open");
    session.add("1", "Ann", "3.0").expect("add");

    let dup = session.add("1", "Other", "2.0").unwrap_err();
    assert_eq!(dup.kind(), ErrorKind::DuplicateKey);

    let missing = session.delete("2").unwrap_err();
    assert_eq!(missing.kind(), ErrorKind::NotFound);
    assert!(session.search("2").is_err());

    let bad_gpa = session.add("3", "Cy", "four").unwrap_err();
    assert!(matches!(bad_gpa, SessionError::Field(_)));
    assert_eq!(bad_gpa.kind(), ErrorKind::InvalidFormat);

    let out_of_range = session.update("1", None, Some("4.5")).unwrap_err();
    assert_eq!(out_of_range.kind(), ErrorKind::InvalidFormat);
    assert_eq!(session.search("1").unwrap().gpa.value(), 3.0);
}

#[test]
fn blank_update_is_a_no_op_but_still_checks_roll() {
    let tmp = TempDir::new().expect("tmp");
    let mut session = Session::open(config(&tmp)).expect("open");
    session.add("1", "Ann", "3.0").expect("add");

    session.update("1", Some(""), None).expect("no-op");
    assert_eq!(session.search("1").unwrap().name, "Ann");

    let err = session.update("9", None, None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn autosave_off_leaves_file_untouched_until_save() {
    let tmp = TempDir::new().expect("tmp");
    let cfg = SessionConfig {
        autosave: false,
        ..config(&tmp)
    };
    let mut session = Session::open(cfg.clone()).expect("open");
    session.add("1", "Ann", "3.0").expect("add");
    assert!(!cfg.data_file.exists());

    session.save().expect("save");
    let reopened = Session::open(cfg).expect("reopen");
    assert_eq!(reopened.store().len(), 1);
}

#[test]
fn sort_in_place_persists_order_and_views_do_not() {
    let tmp = TempDir::new().expect("tmp");
    let mut session = Session::open(config(&tmp)).expect("open");
    session.add("1", "Ann", "3.5").expect("add");
    session.add("2", "Bob", "2.0").expect("add");
    session.add("3", "Cy", "4.0").expect("add");

    let view = session.view(Some((SortKey::Gpa, SortOrder::Descending)));
    let view_rolls: Vec<_> = view.iter().map(|r| r.roll.to_string()).collect();
    assert_eq!(view_rolls, ["3", "1", "2"]);
    let stored: Vec<_> = session.store().iter().map(|r| r.roll.to_string()).collect();
    assert_eq!(stored, ["1", "2", "3"]);

    session.sort_in_place(SortKey::Name, SortOrder::Descending).expect("sort");
    let reopened = Session::open(config(&tmp)).expect("reopen");
    let names: Vec<_> = reopened.store().iter().map(|r| r.name.clone()).collect();
    assert_eq!(names, ["Cy", "Bob", "Ann"]);
}

#[test]
fn export_writes_csv_with_header() {
    let tmp = TempDir::new().expect("tmp");
    let mut session = Session::open(config(&tmp)).expect("open");
    session.add("2", "Bob", "2").expect("add");
    session.add("1", "Ann", "3.456").expect("add");

    let csv_path = tmp.path().join("out.csv");
    let n = session
        .export_csv(&csv_path, Some((SortKey::Roll, SortOrder::Ascending)))
        .expect("export");
    assert_eq!(n, 2);
    assert_eq!(
        fs::read_to_string(&csv_path).unwrap(),
        "rollNumber,name,gpa\r\n1,Ann,3.46\r\n2,Bob,2.00\r\n"
    );
}
