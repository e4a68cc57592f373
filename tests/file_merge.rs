use adiflog::{error::AdifError, file::AdifFile, record::AdifRecord};

fn record(fields: &[(&str, &str)]) -> AdifRecord {
    fields.iter().copied().collect()
}

fn example_record() -> AdifRecord {
    record(&[
        ("callsign", "n0foo"),
        ("qso_date", "20220401"),
        ("time_on", "181403"),
    ])
}

fn example_file() -> AdifFile {
    let mut records = vec![example_record()];
    for band in ["10m", "30m", "40m"] {
        records.push(record(&[
            ("callsign", "n0foo"),
            ("mode", "FT8"),
            ("band", band),
            ("qso_date", "20220401"),
            ("time_on", "131415"),
            ("time_off", "131545"),
        ]));
    }
    AdifFile::with_records(records)
}

#[test]
fn merging_empty_files_changes_nothing() {
    let mut file = AdifFile::new();
    file.merge(AdifFile::new()).unwrap();
    assert_eq!(file, AdifFile::new());

    let mut file = AdifFile::with_records(vec![example_record()]);
    file.merge(AdifFile::new()).unwrap();
    assert_eq!(file, AdifFile::with_records(vec![example_record()]));

    let mut empty = AdifFile::new();
    empty.merge(file.clone()).unwrap();
    assert_eq!(empty, file);
}

#[test]
fn merge_folds_duplicates_and_appends_new_records() {
    let mut file = example_file();
    let start_count = file.records.len();

    // Same contact as the example record, but later in the day.
    let mut new_record = example_record();
    new_record.set("time_on", "235000");
    assert_ne!(example_record(), new_record);

    let other = AdifFile::with_records(vec![example_record(), new_record.clone()]);

    file.merge(other.clone()).unwrap();
    assert!(file.records.contains(&new_record));
    assert_eq!(file.records.len(), start_count + 1);

    // Merging again adds nothing.
    file.merge(other).unwrap();
    assert_eq!(file.records.len(), start_count + 1);
}

#[test]
fn close_times_fold_into_the_existing_record() {
    let r1 = record(&[
        ("callsign", "n0foo"),
        ("mode", "FT8"),
        ("qso_date", "20220401"),
        ("time_on", "123400"),
    ]);

    // A few minutes earlier.
    let mut r2 = r1.clone();
    r2.set("time_on", "123000");
    let mut f1 = AdifFile::with_records(vec![r1.clone()]);
    f1.merge(AdifFile::with_records(vec![r2.clone()])).unwrap();
    assert_eq!(f1.records, vec![r1.clone()]);

    // A few minutes later.
    r2.set("time_on", "124000");
    let mut f1 = AdifFile::with_records(vec![r1.clone()]);
    f1.merge(AdifFile::with_records(vec![r2.clone()])).unwrap();
    assert_eq!(f1.records, vec![r1.clone()]);

    // Outside the window: both survive, in time order.
    r2.set("time_on", "125000");
    let mut f1 = AdifFile::with_records(vec![r1.clone()]);
    f1.merge(AdifFile::with_records(vec![r2.clone()])).unwrap();
    assert_eq!(f1.records, vec![r1, r2]);
}

#[test]
fn window_boundary_is_inclusive() {
    let base = record(&[
        ("callsign", "n0foo"),
        ("mode", "FT8"),
        ("qso_date", "20220401"),
        ("time_on", "120000"),
    ]);

    // Exactly 15 minutes out: still one QSO.
    let mut on_boundary = base.clone();
    on_boundary.set("time_on", "121500");
    let mut file = AdifFile::with_records(vec![base.clone()]);
    file.merge_within(AdifFile::with_records(vec![on_boundary]), 15)
        .unwrap();
    assert_eq!(file.records.len(), 1);

    // One minute past the window: two QSOs, ascending by time.
    let mut past_boundary = base.clone();
    past_boundary.set("time_on", "121600");
    let mut file = AdifFile::with_records(vec![base.clone()]);
    file.merge_within(AdifFile::with_records(vec![past_boundary.clone()]), 15)
        .unwrap();
    assert_eq!(file.records, vec![base, past_boundary]);
}

#[test]
fn merging_the_same_file_twice_is_idempotent() {
    let mut file = AdifFile::with_records(vec![example_record()]);
    let other = AdifFile::with_records(vec![example_record(), example_record()]);

    file.merge(other.clone()).unwrap();
    assert_eq!(file.records.len(), 1);
    assert_eq!(file, AdifFile::with_records(vec![example_record()]));

    file.merge(other).unwrap();
    assert_eq!(file, AdifFile::with_records(vec![example_record()]));
}

#[test]
fn records_with_unparseable_times_merge_idempotently() {
    let bad_time = record(&[
        ("callsign", "n0foo"),
        ("qso_date", "20220401"),
        ("time_on", "9999"),
    ]);

    let mut file = AdifFile::with_records(vec![bad_time.clone()]);
    let other = AdifFile::with_records(vec![bad_time.clone()]);

    file.merge(other.clone()).unwrap();
    assert_eq!(file.records.len(), 1);
    file.merge(other).unwrap();
    assert_eq!(file.records.len(), 1);
    assert_eq!(file.records, vec![bad_time]);
}

#[test]
fn exact_time_match_wins_over_window_scanning() {
    // Two existing contacts ten minutes apart; the incoming record's
    // time matches the first exactly, so it folds there even though the
    // second is also inside the window.
    let first = record(&[
        ("callsign", "n0foo"),
        ("mode", "FT8"),
        ("qso_date", "20220401"),
        ("time_on", "120000"),
    ]);
    let mut second = first.clone();
    second.set("time_on", "121000");

    let mut incoming = first.clone();
    incoming.set("rst_sent", "-10");

    let mut file = AdifFile::with_records(vec![first, second.clone()]);
    file.merge(AdifFile::with_records(vec![incoming])).unwrap();

    assert_eq!(file.records.len(), 2);
    assert_eq!(file.records[0].get("rst_sent"), Some("-10"));
    assert_eq!(file.records[1], second);
    assert_eq!(file.records[1].get("rst_sent"), None);
}

#[test]
fn merge_sorts_chronologically_with_undated_records_first() {
    let dated_early = record(&[
        ("callsign", "k1abc"),
        ("qso_date", "20220401"),
        ("time_on", "080000"),
    ]);
    let dated_late = record(&[
        ("callsign", "k2def"),
        ("qso_date", "20220402"),
        ("time_on", "080000"),
    ]);
    let undated = record(&[("callsign", "k3ghi")]);

    let mut file = AdifFile::with_records(vec![dated_late.clone()]);
    file.merge(AdifFile::with_records(vec![
        undated.clone(),
        dated_early.clone(),
    ]))
    .unwrap();

    assert_eq!(file.records, vec![undated, dated_early, dated_late]);
}

#[test]
fn match_key_collision_is_an_error() {
    // Different callsign casing derives the same match key but fails
    // the field-equality sanity check.
    let mut file = AdifFile::with_records(vec![record(&[
        ("callsign", "n0foo"),
        ("qso_date", "20220401"),
    ])]);
    let other = AdifFile::with_records(vec![record(&[
        ("callsign", "N0FOO"),
        ("qso_date", "20220401"),
    ])]);

    assert!(matches!(
        file.merge(other),
        Err(AdifError::MatchKeyCollision { .. })
    ));
}
