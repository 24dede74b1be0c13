use lcov_delta::commands::diff::{execute_diff, validate_args, DiffArgs};
use lcov_delta::output::read_report;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::{Path, PathBuf};

fn write_fixture(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn diff_args(reference: PathBuf, input: PathBuf, output: PathBuf) -> DiffArgs {
    DiffArgs {
        reference,
        input,
        output,
        report: None,
        print_summary: false,
    }
}

#[test]
fn test_diff_zeroes_reference_covered_lines() {
    let dir = tempfile::tempdir().unwrap();
    let reference = write_fixture(dir.path(), "ref.info", "SF:a.c\nDA:1,1\nDA:2,0\nend_of_record\n");
    let input = write_fixture(dir.path(), "in.info", "SF:a.c\nDA:1,5\nDA:2,3\nend_of_record\n");
    let output = dir.path().join("out.info");

    execute_diff(diff_args(reference, input, output.clone())).unwrap();

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "SF:a.c\nDA:1,0\nDA:2,3\nend_of_record\n"
    );
}

#[test]
fn test_diff_keys_on_source_file() {
    // A hit under b.c must not be zeroed by coverage of the same line
    // number in a.c
    let dir = tempfile::tempdir().unwrap();
    let reference = write_fixture(dir.path(), "ref.info", "SF:a.c\nDA:1,1\nDA:2,0\nend_of_record\n");
    let input = write_fixture(dir.path(), "in.info", "SF:b.c\nDA:1,5\nend_of_record\n");
    let output = dir.path().join("out.info");

    execute_diff(diff_args(reference, input, output.clone())).unwrap();

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "SF:b.c\nDA:1,5\nend_of_record\n"
    );
}

#[test]
fn test_diff_passes_unknown_directives_through() {
    let dir = tempfile::tempdir().unwrap();
    let reference = write_fixture(dir.path(), "ref.info", "SF:a.c\nDA:1,1\nend_of_record\n");
    let input_content =
        "TN:nightly\nSF:a.c\nFN:1,main\nFNDA:2,main\nDA:1,5\nDA:3,0\nLF:2\nLH:1\nend_of_record\n";
    let input = write_fixture(dir.path(), "in.info", input_content);
    let output = dir.path().join("out.info");

    execute_diff(diff_args(reference, input, output.clone())).unwrap();

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "TN:nightly\nSF:a.c\nFN:1,main\nFNDA:2,main\nDA:1,0\nDA:3,0\nLF:2\nLH:1\nend_of_record\n"
    );
}

#[test]
fn test_diff_malformed_entry_aborts_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let reference = write_fixture(dir.path(), "ref.info", "SF:a.c\nDA:1,1\nend_of_record\n");
    let input = write_fixture(dir.path(), "in.info", "SF:a.c\nDA:1\nend_of_record\n");
    let output = dir.path().join("out.info");

    let result = execute_diff(diff_args(reference, input, output.clone()));

    assert!(result.is_err());
    assert!(!output.exists());
}

#[test]
fn test_diff_malformed_reference_aborts() {
    let dir = tempfile::tempdir().unwrap();
    let reference = write_fixture(dir.path(), "ref.info", "SF:a.c\nDA:1\nend_of_record\n");
    let input = write_fixture(dir.path(), "in.info", "SF:a.c\nDA:1,5\nend_of_record\n");
    let output = dir.path().join("out.info");

    let result = execute_diff(diff_args(reference, input, output.clone()));

    assert!(result.is_err());
    assert!(!output.exists());
}

#[test]
fn test_diff_overwrites_existing_output() {
    let dir = tempfile::tempdir().unwrap();
    let reference = write_fixture(dir.path(), "ref.info", "SF:a.c\nDA:1,1\nend_of_record\n");
    let input = write_fixture(dir.path(), "in.info", "SF:a.c\nDA:1,5\nend_of_record\n");
    let output = write_fixture(dir.path(), "out.info", "stale previous contents\n");

    execute_diff(diff_args(reference, input, output.clone())).unwrap();

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "SF:a.c\nDA:1,0\nend_of_record\n"
    );
}

#[test]
fn test_diff_preserves_crlf_on_passthrough_lines() {
    // Substituted entries get a plain newline; untouched lines keep
    // their original terminators byte for byte.
    let dir = tempfile::tempdir().unwrap();
    let reference = write_fixture(dir.path(), "ref.info", "SF:a.c\nDA:1,1\nend_of_record\n");
    let input = write_fixture(
        dir.path(),
        "in.info",
        "SF:a.c\r\nDA:1,5\r\nDA:2,3\r\nend_of_record\r\n",
    );
    let output = dir.path().join("out.info");

    execute_diff(diff_args(reference, input, output.clone())).unwrap();

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "SF:a.c\r\nDA:1,0\nDA:2,3\r\nend_of_record\r\n"
    );
}

#[test]
fn test_diff_multiple_sections() {
    let dir = tempfile::tempdir().unwrap();
    let reference = write_fixture(
        dir.path(),
        "ref.info",
        "SF:a.c\nDA:1,1\nend_of_record\nSF:b.c\nDA:7,2\nend_of_record\n",
    );
    let input = write_fixture(
        dir.path(),
        "in.info",
        "SF:a.c\nDA:1,9\nDA:7,4\nend_of_record\nSF:b.c\nDA:1,4\nDA:7,9\nend_of_record\n",
    );
    let output = dir.path().join("out.info");

    execute_diff(diff_args(reference, input, output.clone())).unwrap();

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "SF:a.c\nDA:1,0\nDA:7,4\nend_of_record\nSF:b.c\nDA:1,4\nDA:7,0\nend_of_record\n"
    );
}

#[test]
fn test_diff_writes_report_when_requested() {
    let dir = tempfile::tempdir().unwrap();
    let reference = write_fixture(dir.path(), "ref.info", "SF:a.c\nDA:1,1\nDA:2,0\nend_of_record\n");
    let input = write_fixture(dir.path(), "in.info", "SF:a.c\nDA:1,5\nDA:2,3\nend_of_record\n");
    let output = dir.path().join("out.info");
    let report_path = dir.path().join("report.json");

    let mut args = diff_args(reference, input, output);
    args.report = Some(report_path.clone());
    execute_diff(args).unwrap();

    let report = read_report(&report_path).unwrap();
    assert_eq!(report.covered_lines, 1);
    assert_eq!(report.sections, 1);
    assert_eq!(report.entries_seen, 2);
    assert_eq!(report.entries_zeroed, 1);
}

#[test]
fn test_validate_args_rejects_missing_reference() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(dir.path(), "in.info", "SF:a.c\nDA:1,5\nend_of_record\n");
    let args = diff_args(
        dir.path().join("absent.info"),
        input,
        dir.path().join("out.info"),
    );

    assert!(validate_args(&args).is_err());
}
