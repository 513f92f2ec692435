use std::path::{Path, PathBuf};

use kira_stagesqc::ctx::{Ctx, RunOptions};
use kira_stagesqc::pipeline::Pipeline;
use kira_stagesqc::schema::v1::DatasetStatus;
use kira_stagesqc::session::{DecisionKey, Session};
use kira_stagesqc::symbols::QcPathKind;
use tempfile::TempDir;

fn write_inputs(dir: &Path) -> Vec<PathBuf> {
    let plate = dir.join("plate1.csv");
    std::fs::write(
        &plate,
        "gene,ratio_hr6_vs_0,pval_hr6_vs_0,ratio_hr24_vs_0,pval_hr24_vs_0\n\
         MAR-01,2,0.01,1,0.5\n\
         mar-01,4,0.001,1,0.5\n\
         Sep-03,1,0.1,2,0.01\n\
         TP53,8,0.0001,0.5,0.05\n",
    )
    .unwrap();
    let legacy = dir.join("legacy.tsv");
    std::fs::write(
        &legacy,
        "gene\tratio_hr6_vs_0\tpval_hr6_vs_0\nDEC1\t2\t0.5\nTP53\t1\t1\n",
    )
    .unwrap();
    let clean = dir.join("clean.csv");
    std::fs::write(&clean, "gene,ratio_hr6_vs_0,pval_hr6_vs_0\nEGFR,2,0.1\n").unwrap();
    vec![plate, legacy, clean]
}

fn options() -> RunOptions {
    RunOptions {
        use_adjusted_pval: false,
        write_json: true,
        write_tsv: true,
    }
}

#[test]
fn full_pipeline_writes_outputs() {
    let dir = TempDir::new().unwrap();
    let inputs = write_inputs(dir.path());
    let out = dir.path().join("out");
    let session_path = dir.path().join("session.json");

    let mut session = Session::new();
    session.save(DecisionKey::FirstMar01, "MTARC1").unwrap();
    let mut ctx = Ctx::new(
        inputs,
        out.clone(),
        None,
        session,
        Some(session_path.clone()),
        options(),
        "0.0.0-test",
    );
    Pipeline::full().run(&mut ctx).unwrap();

    assert!(ctx.pending.is_empty());
    assert!(ctx.warnings.is_empty());
    let plate = ctx.qc_for("plate1").unwrap();
    assert_eq!(plate.path.kind(), QcPathKind::DateSymbols);
    assert_eq!(plate.status, DatasetStatus::Cleaned);
    let labels: Vec<&str> = plate.cleaned.as_ref().unwrap().labels().collect();
    assert_eq!(labels, ["MARCHF1", "MTARC1", "SEPTIN3", "TP53"]);

    let legacy = ctx.qc_for("legacy").unwrap();
    assert_eq!(legacy.path.kind(), QcPathKind::LegacySymbols);
    assert_eq!(legacy.renamed, [("DEC1".to_string(), "DELEC1".to_string())]);

    let clean = ctx.qc_for("clean").unwrap();
    assert_eq!(clean.status, DatasetStatus::Unchanged);

    assert!(ctx.is_time_series());
    assert_eq!(ctx.tokens.as_ref().unwrap().tokens, ["hr6", "hr24"]);

    let table = ctx.log_table_for("plate1").unwrap();
    let fc = table.value("MTARC1", "log2FC_hr6_vs_0").unwrap();
    assert!((fc - 1.0).abs() < 1e-9);
    assert!(table.column("negative_log_pval_hr24_vs_0").is_some());

    assert!(out.join("stagesqc.json").exists());
    assert!(out.join("plate1.cleaned.tsv").exists());
    assert!(out.join("plate1.log2fc.tsv").exists());
    assert!(out.join("legacy.log2fc.tsv").exists());
    assert!(session_path.exists());

    let tsv = std::fs::read_to_string(out.join("plate1.log2fc.tsv")).unwrap();
    let header = tsv.lines().next().unwrap();
    assert!(header.starts_with("gene\tlog2FC_hr6_vs_0\tnegative_log_pval_hr6_vs_0\tpval_hr6_vs_0"));
    assert_eq!(tsv.lines().count(), 5);
}

#[test]
fn undecided_family_leaves_dataset_pending() {
    let dir = TempDir::new().unwrap();
    let inputs = write_inputs(dir.path());
    let out = dir.path().join("out");

    let mut ctx = Ctx::new(inputs, out.clone(), None, Session::new(), None, options(), "0.0.0-test");
    Pipeline::full().run(&mut ctx).unwrap();

    assert_eq!(ctx.pending.len(), 1);
    assert_eq!(ctx.pending[0].key, DecisionKey::FirstMar01);
    let plate = ctx.qc_for("plate1").unwrap();
    assert!(plate.is_pending());
    assert!(plate.cleaned.is_none());
    assert!(ctx.log_table_for("plate1").is_none());

    // Other datasets still complete.
    assert!(ctx.log_table_for("legacy").is_some());
    assert!(!out.join("plate1.cleaned.tsv").exists());
    assert!(out.join("clean.cleaned.tsv").exists());
    assert_eq!(ctx.report.pending.len(), 1);
    assert_eq!(ctx.report.pending[0].flag, "--first-mar01");
    assert_eq!(
        ctx.report.warnings,
        ["plate1 is waiting on --first-mar01; its tables were not written"]
    );
}

#[test]
fn duplicate_dataset_names_are_rejected() {
    let dir = TempDir::new().unwrap();
    let a = dir.path().join("plate.csv");
    let b = dir.path().join("plate.tsv");
    std::fs::write(&a, "gene,ratio_hr6_vs_0\nTP53,1\n").unwrap();
    std::fs::write(&b, "gene\tratio_hr6_vs_0\nTP53\t1\n").unwrap();

    let mut ctx = Ctx::new(
        vec![a, b],
        dir.path().join("out"),
        None,
        Session::new(),
        None,
        RunOptions::default(),
        "0.0.0-test",
    );
    let err = Pipeline::full().run(&mut ctx).unwrap_err();
    assert!(err.to_string().contains("share the dataset name"));
}

#[test]
fn rerun_on_cleaned_table_is_a_no_op() {
    let dir = TempDir::new().unwrap();
    let inputs = write_inputs(dir.path());
    let first_out = dir.path().join("first");
    let mut session = Session::new();
    session.initialise_defaults();
    let mut ctx = Ctx::new(
        vec![inputs[0].clone()],
        first_out.clone(),
        None,
        session.clone(),
        None,
        options(),
        "0.0.0-test",
    );
    Pipeline::full().run(&mut ctx).unwrap();
    let cleaned = first_out.join("plate1.cleaned.tsv");

    let second_out = dir.path().join("second");
    let mut ctx = Ctx::new(
        vec![cleaned.clone()],
        second_out.clone(),
        None,
        session,
        None,
        options(),
        "0.0.0-test",
    );
    Pipeline::full().run(&mut ctx).unwrap();
    assert_eq!(ctx.qc_for("plate1").unwrap().status, DatasetStatus::Unchanged);
    assert_eq!(
        std::fs::read(&cleaned).unwrap(),
        std::fs::read(second_out.join("plate1.cleaned.tsv")).unwrap()
    );
}

#[test]
fn tables_without_comparison_columns_warn_once() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("plain.csv");
    std::fs::write(&input, "gene,score\nTP53,1\n").unwrap();

    let mut ctx = Ctx::new(
        vec![input],
        dir.path().join("out"),
        None,
        Session::new(),
        None,
        options(),
        "0.0.0-test",
    );
    Pipeline::full().run(&mut ctx).unwrap();
    assert_eq!(ctx.warnings.len(), 1);
    assert!(ctx.warnings[0].contains("no comparison tokens"));
    assert!(ctx.log_tables.is_empty());
}
