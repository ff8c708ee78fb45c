mod common;

use mutation_check::Error;
use tempfile::TempDir;

#[test]
fn pipeline_scores_report_on_disk() {
    let dir = TempDir::new().unwrap();
    let path = common::write_report(dir.path(), common::PIT_REPORT);

    let result = mutation_check::run_pipeline(&path, 50).unwrap();
    assert_eq!(result.count, 5);
    assert_eq!(result.killed, 2);
    assert_eq!(result.survived, 2);
    assert_eq!(result.no_coverage, 1);
    assert_eq!(result.test_strength, 50);
    assert!(result.pass);

    let lines: Vec<_> = result.findings.iter().map(|f| f.line).collect();
    assert_eq!(lines, vec![197, 437, 452]);
}

#[test]
fn pipeline_stops_on_malformed_report() {
    let dir = TempDir::new().unwrap();
    let path = common::write_report(dir.path(), "not a report");

    let err = mutation_check::run_pipeline(&path, 50).unwrap_err();
    assert!(matches!(err, Error::MalformedReport { .. }));
}
