use mutscore::engines::streaming::classify_report;
use mutscore::types::EngineDetail;
use pretty_assertions::assert_eq;

/// 22 mutation points, 20 detected and 2 not detected
fn report(score_line: &str) -> String {
    format!(
        "Mutating fr.ufc.l3info.oprog.MaCaisse\n\
         Tests:    fr.ufc.l3info.oprog.TestCsv\n\
         Mutation points = 22, unit test time limit 2.02s\n\
         ..........\n\
         ....M FAIL: fr.ufc.l3info.oprog.MaCaisse:45: negated conditional\n\
         ....T\n\
         .M FAIL: fr.ufc.l3info.oprog.MaCaisse:88: 0 (zero) -> 1 (one)\n\
         {score_line}\n\
         \n\
         Jumbling took 14.312s\n"
    )
}

#[test]
fn test_consistent_report() {
    let summary = classify_report(&report("Score: 91%"));
    assert!(summary.is_measured());
    assert_eq!(summary.total(), 22);
    assert_eq!(summary.killed(), 20);
    assert_eq!(summary.diagnostics().len(), 2);
    assert_eq!(
        summary.diagnostics()[0],
        "FAIL: fr.ufc.l3info.oprog.MaCaisse:45: negated conditional"
    );
    assert_eq!(summary.result_string(), "..............S....T.S");
}

#[test]
fn test_sequence_wins_over_reported_score() {
    let summary = classify_report(&report("Score: 82%"));
    assert_eq!(summary.total(), 22);
    assert_eq!(summary.killed(), 20);
    assert_eq!(summary.diagnostics().len(), 2);
    let EngineDetail::Streaming {
        raw_sequence,
        reported_percent,
        reported_killed,
    } = summary.detail()
    else {
        panic!("expected streaming detail");
    };
    assert_eq!(raw_sequence, "..............M....T.M");
    assert_eq!(*reported_percent, 82);
    assert_eq!(*reported_killed, 18);
}

#[test]
fn test_missing_score_line_is_not_measured() {
    let text = "Mutation points = 3, unit test time limit 1.00s\n...\n";
    let summary = classify_report(text);
    assert!(!summary.is_measured());
    assert_eq!((summary.killed(), summary.total()), (0, 0));
    assert_eq!(summary.result_string(), "");
    assert!(summary.diagnostics()[0].contains("Score"));
}

#[test]
fn test_count_mismatch_is_not_measured() {
    let text = "Mutation points = 5, unit test time limit 1.00s\n..M FAIL: x\nScore: 66%\n";
    let summary = classify_report(text);
    assert!(!summary.is_measured());
    assert_eq!(summary.killed(), 0);
    assert_eq!(summary.total(), 0);
    assert_eq!(summary.result_string(), "");
    assert_eq!(summary.diagnostics().len(), 1);
    assert!(summary.diagnostics()[0].contains("announced 5"));
}

#[test]
fn test_no_announcement_is_not_measured() {
    let summary = classify_report("Exception in thread \"main\" java.lang.NoClassDefFoundError\n");
    assert!(!summary.is_measured());
    assert_eq!(summary.total(), 0);
}

#[test]
fn test_crlf_line_endings() {
    let text = "Mutation points = 2, x\r\n.M FAIL: y\r\nScore: 50%\r\n";
    let summary = classify_report(text);
    assert_eq!((summary.killed(), summary.total()), (1, 2));
    assert_eq!(summary.diagnostics(), ["FAIL: y".to_string()]);
}
