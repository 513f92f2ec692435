use kira_stagesqc::comparisons::{LogColumn, LogTable};
use kira_stagesqc::io::tsv_writer::write_log_table;
use tempfile::TempDir;

#[test]
fn log_table_formats_special_values() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("plate.log2fc.tsv");
    let table = LogTable {
        dataset: "plate".to_string(),
        index_name: "gene".to_string(),
        genes: vec!["A".to_string(), "B".to_string()],
        columns: vec![LogColumn {
            name: "log2FC_hr6".to_string(),
            values: vec![f64::NAN, f64::NEG_INFINITY],
        }, LogColumn {
            name: "negative_log_pval_hr6".to_string(),
            values: vec![2.0, f64::INFINITY],
        }],
        warnings: Vec::new(),
    };
    write_log_table(&path, &table).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "gene\tlog2FC_hr6\tnegative_log_pval_hr6");
    assert_eq!(lines[1], "A\tNA\t2.000000");
    assert_eq!(lines[2], "B\t-inf\tinf");
}

#[test]
fn ragged_log_table_is_rejected() {
    let dir = TempDir::new().unwrap();
    let table = LogTable {
        dataset: "plate".to_string(),
        index_name: "gene".to_string(),
        genes: vec!["A".to_string()],
        columns: vec![LogColumn {
            name: "log2FC_hr6".to_string(),
            values: vec![1.0, 2.0],
        }],
        warnings: Vec::new(),
    };
    assert!(write_log_table(&dir.path().join("x.tsv"), &table).is_err());
}
