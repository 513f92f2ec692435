use std::io::Write;

use flate2::Compression;
use flate2::write::GzEncoder;
use kira_stagesqc::table::reader::{TableFormat, dataset_name, parse_dataset, read_dataset};
use kira_stagesqc::table::{NA_LABEL, parse_value};
use tempfile::TempDir;

#[test]
fn csv_with_quoted_fields() {
    let data = "gene,ratio_hr6_vs_0,note\nTP53,2.5,\"tumor, suppressor\"\nMAR-01,1,x\n";
    let ds = parse_dataset(data.as_bytes(), TableFormat::Csv, "plate1").unwrap();
    assert_eq!(ds.name, "plate1");
    assert_eq!(ds.index_name, "gene");
    assert_eq!(ds.columns, vec!["ratio_hr6_vs_0", "note"]);
    assert_eq!(ds.len(), 2);
    assert_eq!(ds.rows[0].values[1], "tumor, suppressor");
}

#[test]
fn ragged_row_is_rejected() {
    let data = "gene\ta\tb\nTP53\t1\n";
    let err = parse_dataset(data.as_bytes(), TableFormat::Tsv, "x").unwrap_err();
    assert!(format!("{:#}", err).contains("data line 2"));
}

#[test]
fn blank_lines_skipped_and_empty_table_rejected() {
    let data = "gene,a\n\n,\nTP53,1\n";
    let ds = parse_dataset(data.as_bytes(), TableFormat::Csv, "x").unwrap();
    assert_eq!(ds.len(), 1);

    let empty = "gene,a\n";
    assert!(parse_dataset(empty.as_bytes(), TableFormat::Csv, "x").is_err());
}

#[test]
fn format_detection_and_names() {
    let p = std::path::Path::new;
    assert_eq!(TableFormat::detect(p("a.csv")).unwrap(), TableFormat::Csv);
    assert_eq!(TableFormat::detect(p("a.TSV")).unwrap(), TableFormat::Tsv);
    assert_eq!(TableFormat::detect(p("a.txt.gz")).unwrap(), TableFormat::Tsv);
    assert!(TableFormat::detect(p("a.xlsx")).is_err());
    assert!(TableFormat::detect(p("a.json")).is_err());
    assert_eq!(dataset_name(p("/tmp/plate1.raw.csv.gz")), "plate1");
}

#[test]
fn reads_gzipped_tsv() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("run2.tsv.gz");
    let file = std::fs::File::create(&path).unwrap();
    let mut enc = GzEncoder::new(file, Compression::default());
    enc.write_all(b"gene\tratio_D1_vs_D0\nsept-3\t2\n").unwrap();
    enc.finish().unwrap();

    let mut ds = read_dataset(&path).unwrap();
    assert_eq!(ds.name, "run2");
    ds.normalize_labels();
    assert_eq!(ds.rows[0].label, "SEPT-3");
}

#[test]
fn value_parsing() {
    assert_eq!(parse_value(" 4.0 "), 4.0);
    assert!(parse_value("").is_nan());
    assert!(parse_value("NA").is_nan());
    assert!(parse_value(NA_LABEL).is_nan());
    assert!(parse_value("abc").is_nan());
    assert_eq!(parse_value("-inf"), f64::NEG_INFINITY);
}
