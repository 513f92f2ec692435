use kira_stagesqc::symbols::ReferenceSymbolTable;
use tempfile::TempDir;

#[test]
fn builtin_table_maps_legacy_symbols() {
    let table = ReferenceSymbolTable::builtin().unwrap();
    assert!(!table.is_empty());
    assert_eq!(table.current_symbol("DEC1"), Some("DELEC1"));
    assert_eq!(table.current_symbol("march1"), Some("MARCHF1"));
    assert_eq!(table.current_symbol("SEPT7"), Some("SEPTIN7"));
    assert_eq!(table.current_symbol("TP53"), None);
    assert!(table.is_deprecated("C10orf2"));
}

#[test]
fn user_table_skips_banner_and_overrides_builtin() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("hgnc.csv");
    std::fs::write(
        &path,
        "Search performed 2024-01-01\nInput,Match type,Approved symbol,Approved name\n\
         DEC1,Previous symbol,CUSTOM1,custom\nFOO7,Previous symbol,BAR7,bar\nTP53,Approved symbol,TP53,tumor protein p53\n",
    )
    .unwrap();

    let user = ReferenceSymbolTable::load(&path).unwrap();
    assert_eq!(user.len(), 2);
    assert!(!user.is_deprecated("TP53"));

    let merged = ReferenceSymbolTable::builtin().unwrap().merge(user);
    assert_eq!(merged.current_symbol("DEC1"), Some("CUSTOM1"));
    assert_eq!(merged.current_symbol("FOO7"), Some("BAR7"));
    assert_eq!(merged.current_symbol("MARCH2"), Some("MARCHF2"));
    assert!(merged.source.contains("hgnc.csv"));
}

#[test]
fn first_entry_wins_for_repeated_inputs() {
    let table = ReferenceSymbolTable::from_pairs("test", [("OLD1", "NEW1"), ("old1", "OTHER")]);
    assert_eq!(table.current_symbol("OLD1"), Some("NEW1"));
    assert_eq!(table.len(), 1);
}

#[test]
fn empty_reference_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty.csv");
    std::fs::write(&path, "").unwrap();
    assert!(ReferenceSymbolTable::load(&path).is_err());
}
