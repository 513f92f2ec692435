use kira_stagesqc::comparisons::{TokenScanner, duration_token, extract_tokens, versus_tokens};

fn cols(headers: &[&str]) -> Vec<String> {
    headers.iter().map(|h| h.to_string()).collect()
}

#[test]
fn duration_headers_make_a_time_series() {
    let headers = cols(&["ratio_hr6_vs_0", "pval_hr6_vs_0", "ratio_hr24_vs_0", "pval_hr24_vs_0"]);
    let tokens = extract_tokens([headers.as_slice()]);
    assert_eq!(tokens.tokens, ["hr6", "hr24"]);
    assert!(tokens.is_time_series);
}

#[test]
fn versus_headers_fall_back_and_skip_adjusted_columns() {
    let headers = cols(&[
        "ratio_drugA_vs_placebo",
        "pval_drugA_vs_placebo",
        "adj_pval_drugA_vs_placebo",
    ]);
    let tokens = extract_tokens([headers.as_slice()]);
    assert_eq!(tokens.tokens, ["drugA_vs_placebo"]);
    assert!(!tokens.is_time_series);
}

#[test]
fn adj_prefix_never_starts_a_match() {
    assert_eq!(versus_tokens("adj_pval_drugA_vs_placebo"), ["drugA_vs_placebo"]);
    assert_eq!(versus_tokens("ratio_KO_vs_WT"), ["KO_vs_WT"]);
    assert!(versus_tokens("description").is_empty());
}

#[test]
fn duration_token_forms() {
    assert_eq!(duration_token("ratio_30min_vs_0").as_deref(), Some("30min"));
    assert_eq!(duration_token("ratio_min5_vs_0").as_deref(), Some("min5"));
    assert_eq!(duration_token("ratio_D1_vs_D0").as_deref(), Some("D1"));
    assert_eq!(duration_token("pval 2day vs 0").as_deref(), Some("2day"));
    assert_eq!(duration_token("ratio_cond1_vs_cond2"), None);
    assert_eq!(duration_token("ratio_drugA_vs_placebo"), None);
}

#[test]
fn first_evidence_decides_the_flag() {
    let first = cols(&["ratio_hr6_vs_0", "pval_hr6_vs_0"]);
    let second = cols(&["ratio_KO_vs_WT", "pval_KO_vs_WT"]);

    let mut scanner = TokenScanner::new();
    scanner.scan(&first);
    scanner.scan(&second);
    let tokens = scanner.finish();
    assert_eq!(tokens.tokens, ["hr6"]);
    assert!(tokens.is_time_series);

    let mut scanner = TokenScanner::new();
    scanner.scan(&second);
    assert!(!scanner.is_time_series());
    scanner.scan(&first);
    let tokens = scanner.finish();
    assert_eq!(tokens.tokens, ["KO_vs_WT", "hr6"]);
    assert!(!tokens.is_time_series);
}
