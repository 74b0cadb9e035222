use mutscore::engines::structured::{classify_records, mutant_identity, parse_report};
use mutscore::types::{EngineDetail, Verdict};
use pretty_assertions::assert_eq;

const REPORT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<mutations partial="false">
<mutation detected='true' status='KILLED' numberOfTestsRun='4'><sourceFile>Scanette.java</sourceFile><mutatedClass>fr.ufc.l3info.oprog.Scanette</mutatedClass><mutatedMethod>scanner</mutatedMethod><methodDescription>(J)I</methodDescription><lineNumber>42</lineNumber><mutator>org.pitest.mutationtest.engine.gregor.mutators.NegateConditionalsMutator</mutator><indexes><index>12</index></indexes><blocks><block>3</block></blocks><killingTest>fr.ufc.l3info.oprog.TestCsv.[engine:junit-vintage]</killingTest><description>negated conditional</description></mutation>
<mutation detected='false' status='NO_COVERAGE' numberOfTestsRun='0'><sourceFile>Scanette.java</sourceFile><mutatedClass>fr.ufc.l3info.oprog.Scanette</mutatedClass><mutatedMethod>abandon</mutatedMethod><methodDescription>()V</methodDescription><lineNumber>97</lineNumber><mutator>org.pitest.mutationtest.engine.gregor.mutators.VoidMethodCallMutator</mutator><indexes><index>5</index></indexes><blocks><block>0</block></blocks><killingTest/><description>removed call to java/util/Set::clear</description></mutation>
<mutation detected='false' status='SURVIVED' numberOfTestsRun='2'><sourceFile>Scanette.java</sourceFile><mutatedClass>fr.ufc.l3info.oprog.Scanette</mutatedClass><mutatedMethod>scanner</mutatedMethod><methodDescription>(J)I</methodDescription><lineNumber>42</lineNumber><mutator>org.pitest.mutationtest.engine.gregor.mutators.ConditionalsBoundaryMutator</mutator><indexes><index>14</index></indexes><blocks><block>3</block></blocks><killingTest/><description>changed conditional boundary</description></mutation>
</mutations>
"#;

#[test]
fn test_three_record_report() {
    let records = parse_report(REPORT).unwrap();
    let summary = classify_records(&records);
    assert_eq!(summary.killed(), 1);
    assert_eq!(summary.total(), 3);
    assert_eq!(summary.result_string(), ".NS");
    assert_eq!(
        summary.verdicts(),
        [Verdict::Killed, Verdict::NoCoverage, Verdict::Survived]
    );
}

#[test]
fn test_identities_follow_class_line_position() {
    let records = parse_report(REPORT).unwrap();
    let summary = classify_records(&records);
    let EngineDetail::Structured { identities } = summary.detail() else {
        panic!("expected structured detail");
    };
    assert_eq!(identities[2], "fr.ufc.l3info.oprog.Scanette:0042:001");
    assert_eq!(identities[2], mutant_identity("fr.ufc.l3info.oprog.Scanette", 42, 1));
}

#[test]
fn test_survivors_carry_descriptions() {
    let summary = classify_records(&parse_report(REPORT).unwrap());
    let notes: Vec<(&str, &str)> = summary
        .survivors()
        .iter()
        .map(|s| (s.identity.as_str(), s.description.as_str()))
        .collect();
    assert_eq!(
        notes,
        [
            (
                "fr.ufc.l3info.oprog.Scanette:0097:000",
                "removed call to java/util/Set::clear"
            ),
            (
                "fr.ufc.l3info.oprog.Scanette:0042:001",
                "changed conditional boundary"
            ),
        ]
    );
}

#[test]
fn test_reparse_is_identical() {
    let first = classify_records(&parse_report(REPORT).unwrap());
    let second = classify_records(&parse_report(REPORT).unwrap());
    assert_eq!(first, second);
}

#[test]
fn test_unknown_status_is_kept_as_unparseable() {
    let xml = REPORT.replace("status='KILLED'", "status='NON_VIABLE'");
    let summary = classify_records(&parse_report(&xml).unwrap());
    assert_eq!(summary.result_string(), "?NS");
    assert_eq!(summary.killed(), 0);
    assert_eq!(summary.total(), 3);
}
