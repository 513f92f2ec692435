use kira_stagesqc::error::SymbolError;
use kira_stagesqc::session::{DecisionKey, Session, parse_choice};
use kira_stagesqc::symbols::corrections::{AmbiguousFamily, FamilyChoice};
use kira_stagesqc::symbols::{DateFormat, Granularity};
use tempfile::TempDir;

#[test]
fn initialise_sets_once_and_save_overwrites() {
    let mut session = Session::new();
    assert!(session.initialise(DecisionKey::FirstMar01, "MTARC1").unwrap());
    assert!(!session.initialise(DecisionKey::FirstMar01, "MARCHF1").unwrap());
    assert_eq!(session.get("any", DecisionKey::FirstMar01), Some("MTARC1"));

    session.save(DecisionKey::FirstMar01, "marchf1").unwrap();
    assert_eq!(session.get("any", DecisionKey::FirstMar01), Some("MARCHF1"));
}

#[test]
fn defaults_do_not_clobber_choices() {
    let mut session = Session::new();
    session.save(DecisionKey::Granularity, "month-year").unwrap();
    session.initialise_defaults();
    assert_eq!(session.granularity("d").unwrap(), Some(Granularity::MonthYear));
    assert_eq!(session.date_format("d").unwrap(), Some(DateFormat::YyyyDdMm));
    assert_eq!(
        session.family_choice("d", AmbiguousFamily::Mar02).unwrap(),
        Some(FamilyChoice::Mtarc2)
    );
}

#[test]
fn overrides_apply_to_one_dataset() {
    let mut session = Session::new();
    session.save(DecisionKey::DateFormat, "yyyy-mm-dd").unwrap();
    session
        .save_for("plate2", DecisionKey::DateFormat, "dd-mm-yyyy")
        .unwrap();
    assert_eq!(session.get("plate1", DecisionKey::DateFormat), Some("yyyy-mm-dd"));
    assert_eq!(session.get("plate2", DecisionKey::DateFormat), Some("dd-mm-yyyy"));
}

#[test]
fn invalid_values_are_rejected() {
    let mut session = Session::new();
    let err = session.save(DecisionKey::FirstMar01, "MTARC2").unwrap_err();
    assert!(matches!(err, SymbolError::InvalidChoice { .. }));
    assert!(session.save(DecisionKey::DateFormat, "yy-mm").is_err());
    assert!(session.save(DecisionKey::Granularity, "year").is_err());
    assert_eq!(session.get("x", DecisionKey::FirstMar01), None);
}

#[test]
fn choice_specs() {
    let (dataset, key, value) = parse_choice("plate2:first-mar01=MARCHF1").unwrap();
    assert_eq!(dataset, "plate2");
    assert_eq!(key, DecisionKey::FirstMar01);
    assert_eq!(value, "MARCHF1");

    assert!(parse_choice("plate2=MARCHF1").is_err());
    assert!(parse_choice(":date_format=yyyy-mm-dd").is_err());
    assert!(matches!(
        parse_choice("plate2:colour=red"),
        Err(SymbolError::UnknownDecisionKey(_))
    ));
}

#[test]
fn session_file_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");

    let mut session = Session::new();
    session.initialise_defaults();
    session
        .save_for("plate2", DecisionKey::FirstMar01, "MARCHF1")
        .unwrap();
    session.write(&path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("first_mar01"));

    let loaded = Session::load(&path).unwrap();
    assert_eq!(loaded, session);
}

#[test]
fn tampered_session_file_fails_to_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, r#"{"values":{"first_mar01":"MTARC2"}}"#).unwrap();
    assert!(Session::load(&path).is_err());
}
