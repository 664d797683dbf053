//! Rotation, retention, and the documented boundary scenario.

use ember_logger::{Level, Logger};
use std::fs;
use std::path::{Path, PathBuf};

/// Archives for `stem` in `dir`, sorted by name (== by age).
fn archives(dir: &Path, stem: &str) -> Vec<PathBuf> {
    let prefix = format!("{stem}.");
    let mut found: Vec<PathBuf> = fs::read_dir(dir)
        .unwrap()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.starts_with(&prefix))
        })
        .map(|entry| entry.path())
        .collect();
    found.sort();
    found
}

#[test]
fn rotation_archives_and_resets_the_active_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.log");
    let logger = Logger::new();
    logger.set_max_file_size(200);
    logger.set_file(&path);

    // 50-byte records: 6-byte label prefix + 43-digit payload + newline.
    for seq in 0..5u32 {
        logger.emit(Level::Info, format_args!("{seq:043}")).unwrap();
    }
    logger.flush().unwrap();

    // Exactly one rotation: the fifth record would have made 250 > 200.
    let archived = archives(dir.path(), "app.log");
    assert_eq!(archived.len(), 1);

    // The archive is discoverable at its expected date-stamped name.
    let today = chrono::Local::now().date_naive().format("%Y-%m-%d");
    assert_eq!(
        archived[0],
        dir.path().join(format!("app.log.{today}"))
    );
    assert_eq!(fs::metadata(&archived[0]).unwrap().len(), 200);

    // The post-rotation active file started at size zero and holds only the
    // trigger record.
    assert_eq!(fs::metadata(&path).unwrap().len(), 50);
}

#[test]
fn boundary_scenario_rotates_on_the_fourth_record() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.log");
    let logger = Logger::new();
    logger.set_max_file_size(100);
    logger.set_remain_days(1);
    logger.set_file(&path);

    // Five 30-byte records against a 100-byte limit. The fourth append
    // pre-checks 90 + 30 > 100 and rotates before appending, so the archive
    // holds exactly the first three records.
    for seq in 0..5u32 {
        logger.emit(Level::Info, format_args!("{seq:023}")).unwrap();
    }
    logger.flush().unwrap();

    let archived = archives(dir.path(), "app.log");
    assert_eq!(archived.len(), 1);

    let old = fs::read_to_string(&archived[0]).unwrap();
    assert_eq!(old.len(), 90);
    assert_eq!(
        old.lines().collect::<Vec<_>>(),
        [
            "INFO  00000000000000000000000",
            "INFO  00000000000000000000001",
            "INFO  00000000000000000000002",
        ]
    );

    let active = fs::read_to_string(&path).unwrap();
    assert_eq!(active.len(), 60);
    assert_eq!(
        active.lines().collect::<Vec<_>>(),
        [
            "INFO  00000000000000000000003",
            "INFO  00000000000000000000004",
        ]
    );
}

#[test]
fn retention_keeps_only_the_newest_archives() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.log");
    let logger = Logger::new();
    logger.set_max_file_size(30);
    logger.set_remain_days(2);
    logger.set_file(&path);

    // Each 30-byte record fills a file, so every following append rotates.
    for seq in 0..6u32 {
        logger.emit(Level::Info, format_args!("{seq:023}")).unwrap();
    }
    logger.flush().unwrap();

    // Five rotations happened; only the two newest archives survive.
    let archived = archives(dir.path(), "app.log");
    assert_eq!(archived.len(), 2);
    assert_eq!(
        fs::read_to_string(&archived[0]).unwrap(),
        "INFO  00000000000000000000003\n"
    );
    assert_eq!(
        fs::read_to_string(&archived[1]).unwrap(),
        "INFO  00000000000000000000004\n"
    );
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "INFO  00000000000000000000005\n"
    );
}
