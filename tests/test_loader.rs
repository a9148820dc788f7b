//! Tests for CSV export loading

use csv2kdbx::pipeline::{load_export, COL_GROUP_PARENT, COL_NOTES, COL_URL};

mod common;

#[test]
fn test_load_sample_export() {
    let (_dir, path) = common::create_temp_csv(common::SAMPLE_CSV);

    let export = load_export(&path).unwrap();

    assert_eq!(export.headers.len(), 9);
    assert_eq!(export.headers[0], "!group_id");
    assert_eq!(export.rows.len(), 7);
    assert_eq!(export.rows.iter().filter(|r| r.is_entry()).count(), 4);

    let banking = &export.rows[1];
    assert_eq!(banking.get(COL_GROUP_PARENT), Some("1"));

    let chase = &export.rows[3];
    assert_eq!(chase.title(), "Chase");
    assert_eq!(chase.get(COL_URL), Some("https://chase.com"));
    assert_eq!(chase.get(COL_NOTES), Some("checking"));
}

#[test]
fn test_load_header_only() {
    let (_dir, path) = common::create_temp_csv(&format!("{}\n", common::HEADER));

    let export = load_export(&path).unwrap();

    assert!(export.rows.is_empty());
    assert_eq!(export.headers.len(), 9);
}

#[test]
fn test_load_missing_file_names_path() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("does_not_exist.csv");

    let err = load_export(&path).unwrap_err();

    assert!(
        format!("{:#}", err).contains("does_not_exist.csv"),
        "Error should mention the file: {:#}",
        err
    );
}

#[test]
fn test_load_invalid_utf8_reports_line() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("bad.csv");
    let mut bytes = b"!type,title\nentry,ok\nentry,".to_vec();
    bytes.extend_from_slice(&[0xff, 0xfe, b'\n']);
    std::fs::write(&path, bytes).unwrap();

    let err = load_export(&path).unwrap_err();

    assert!(
        format!("{:#}", err).contains("line 3"),
        "Error should mention the line: {:#}",
        err
    );
}
