use assert_cmd::Command;
use tempfile::TempDir;

#[test]
fn validate_reports_paths() {
    let dir = TempDir::new().unwrap();
    let a = dir.path().join("dates.csv");
    let b = dir.path().join("legacy.tsv");
    std::fs::write(&a, "gene,ratio_hr6_vs_0\nMAR-01,1\nTP53,2\n").unwrap();
    std::fs::write(&b, "gene\tratio_hr6_vs_0\nDEC1\t1\n").unwrap();

    let mut cmd = Command::cargo_bin("kira-stagesqc").unwrap();
    cmd.arg("validate").arg("--input").arg(&a).arg(&b);
    let out = cmd.assert().success().get_output().stdout.clone();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("kira-stagesqc validate ok"));
    assert!(text.contains("dates\t2 rows\t1 columns\tdate_symbols"));
    assert!(text.contains("legacy\t1 rows\t1 columns\tlegacy_symbols"));
}

#[test]
fn reference_show_looks_up_symbols() {
    let mut cmd = Command::cargo_bin("kira-stagesqc").unwrap();
    cmd.args(["reference", "show", "dec1", "TP53"]);
    let out = cmd.assert().success().get_output().stdout.clone();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("DEC1\tDELEC1"));
    assert!(text.contains("TP53\t(current)"));
}
