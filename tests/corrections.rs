use kira_stagesqc::symbols::corrections::{
    AmbiguousFamily, DateLabel, FamilyChoice, Month, corrected_symbol, ordinal,
    unambiguous_symbol,
};

#[test]
fn either_month_order_maps_to_the_same_symbol() {
    assert_eq!(corrected_symbol("Sep-03_1st"), Some("SEPTIN3"));
    assert_eq!(corrected_symbol("03-Sep_1st"), Some("SEPTIN3"));
    assert_eq!(corrected_symbol("SEPT-15_1st"), Some("SELENOF"));
    assert_eq!(corrected_symbol("Dec-01_1st"), Some("DELEC1"));
}

#[test]
fn only_first_occurrences_and_unambiguous_labels_resolve() {
    assert_eq!(corrected_symbol("Sep-03_2nd"), None);
    assert_eq!(corrected_symbol("Mar-01_1st"), None);
    assert_eq!(corrected_symbol("Apr-01_1st"), None);
    assert_eq!(corrected_symbol("no-suffix"), None);
}

#[test]
fn date_label_parsing() {
    let parsed = DateLabel::parse("SEPT_3").unwrap();
    assert_eq!(parsed.month, Month::Sep);
    assert_eq!(parsed.day, 3);
    assert_eq!(parsed.formatted(), "SEPT-03");
    assert_eq!(parsed.family(), None);

    let mar = DateLabel::parse("2-Mar").unwrap();
    assert_eq!(mar.formatted(), "Mar-02");
    assert_eq!(mar.family(), Some(AmbiguousFamily::Mar02));

    assert!(DateLabel::parse("MAR").is_err());
    assert!(DateLabel::parse("JAN-01").is_err());
}

#[test]
fn ordinals() {
    let got: Vec<String> = [1, 2, 3, 4, 11, 12, 13, 21, 22, 101, 111].iter().map(|n| ordinal(*n)).collect();
    assert_eq!(
        got,
        ["1st", "2nd", "3rd", "4th", "11th", "12th", "13th", "21st", "22nd", "101st", "111th"]
    );
}

#[test]
fn family_choices() {
    assert_eq!(unambiguous_symbol(Month::Mar, 7), Some("MARCHF7"));
    assert_eq!(unambiguous_symbol(Month::Mar, 1), None);
    assert_eq!(FamilyChoice::Mtarc1.other(), FamilyChoice::Marchf1);
    assert_eq!(FamilyChoice::Marchf2.other().symbol(), "MTARC2");
    assert_eq!(
        "MARCHF1: membrane associated ring-CH-type finger 1".parse::<FamilyChoice>().unwrap(),
        FamilyChoice::Marchf1
    );
    assert!("MARCHF3".parse::<FamilyChoice>().is_err());
    assert_eq!(AmbiguousFamily::Mar01.options()[0], FamilyChoice::Mtarc1);
}
