//! Tests for the calibration driver.

use super::*;
use crate::config::{HEADER, Mode};
use crate::test_support::FakeCompiler;
use std::path::PathBuf;
use tempfile::TempDir;

const HOME: &str = "/opt/fortress";

fn context() -> CalibrationContext {
    CalibrationContext {
        fortress_home: PathBuf::from(HOME),
        executable: PathBuf::from("/opt/fortress/bin/fortress"),
        source_path: "/opt/fortress/Library".to_string(),
    }
}

fn write_test(dir: &TempDir, name: &str, body: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, body).unwrap();
    path
}

const HELLO_TEST: &str = "\
compile
tests=Hello
STATIC_TESTS_DIR=${FORTRESS_AUTOHOME}/ProjectFortress/static_tests
compile_out_equals=Hello\\n
compile_err_equals=
";

/// An empty expectation matches any output, so stderr tests need a stale one.
fn with_stale_stderr() -> String {
    HELLO_TEST.replace("compile_err_equals=", "compile_err_equals=stale")
}

#[test]
fn matching_output_leaves_file_untouched() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_test(&temp_dir, "Hello.test", HELLO_TEST);
    let compiler = FakeCompiler::new().with_output("Hello.fss", "Hello\n", "");
    let ctx = context();

    let outcome = Calibrator::new(&ctx, &compiler).calibrate_file(&path).unwrap();

    assert_eq!(outcome, Outcome::Unchanged);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), HELLO_TEST);
}

#[test]
fn trailing_output_after_expected_prefix_still_matches() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_test(&temp_dir, "Hello.test", HELLO_TEST);
    let compiler = FakeCompiler::new().with_output("Hello.fss", "Hello\nand more\n", "note\n");
    let ctx = context();

    let outcome = Calibrator::new(&ctx, &compiler).calibrate_file(&path).unwrap();

    assert_eq!(outcome, Outcome::Unchanged);
}

#[test]
fn differing_stdout_replaces_only_stdout_expectation() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_test(&temp_dir, "Hello.test", HELLO_TEST);
    let compiler = FakeCompiler::new().with_output("Hello.fss", "Goodbye\n", "");
    let ctx = context();

    let outcome = Calibrator::new(&ctx, &compiler).calibrate_file(&path).unwrap();

    assert_eq!(outcome, Outcome::Updated);
    let expected = format!(
        "{}compile\ntests=Hello\n\
         STATIC_TESTS_DIR=${{FORTRESS_AUTOHOME}}/ProjectFortress/static_tests\n\
         compile_out_equals=Goodbye\\n\n\
         compile_err_equals=\n",
        HEADER
    );
    assert_eq!(std::fs::read_to_string(&path).unwrap(), expected);
}

#[test]
fn differing_stderr_is_normalized_and_encoded() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_test(&temp_dir, "Hello.test", &with_stale_stderr());
    let compiler = FakeCompiler::new().with_output(
        "Hello.fss",
        "Hello\n",
        "/opt/fortress/ProjectFortress/static_tests/Hello.fss:3:5:\n    Unbound \"x\"\n",
    );
    let ctx = context();

    Calibrator::new(&ctx, &compiler).calibrate_file(&path).unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.first("compile_out_equals").unwrap().value.as_deref(), Some("Hello\\n"));
    assert_eq!(
        config.first("compile_err_equals").unwrap().value.as_deref(),
        Some("${STATIC_TESTS_DIR}/Hello.fss:3:5:\\n\\    Unbound \\\"x\\\"\\n")
    );
}

#[test]
fn second_run_reports_no_updates() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_test(&temp_dir, "Hello.test", &with_stale_stderr());
    let compiler = FakeCompiler::new().with_output(
        "Hello.fss",
        "Line one\n  indented  twice\n",
        "/opt/fortress/Library/Prelude.fss:10:1: warning\n   see /opt/fortress/etc\n",
    );
    let ctx = context();
    let calibrator = Calibrator::new(&ctx, &compiler);

    let first = calibrator.calibrate_all(&[&path]);
    let written = std::fs::read_to_string(&path).unwrap();
    let second = calibrator.calibrate_all(&[&path]);

    assert_eq!(first.updated, 1);
    assert_eq!(second.updated, 0);
    assert_eq!(second.unchanged, 1);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), written);
    assert!(written.contains("${FORTRESS_SOURCE_PATH}/Prelude.fss"));
    assert!(written.contains("${FORTRESS_AUTOHOME}/etc"));
}

#[test]
fn compile_wins_over_typecheck_and_extension_is_added() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_test(
        &temp_dir,
        "Both.test",
        "typecheck\ncompile\ntests=foo\nX_TESTS_DIR=/t\n\
         compile_out_equals=\ncompile_err_equals=\n",
    );
    let compiler = FakeCompiler::new().with_output("foo.fss", "", "");
    let ctx = context();

    let outcome = Calibrator::new(&ctx, &compiler).calibrate_file(&path).unwrap();

    assert_eq!(outcome, Outcome::Unchanged);
    assert_eq!(
        compiler.runs.borrow().as_slice(),
        &[(Mode::Compile, "foo.fss".to_string())]
    );
}

#[test]
fn typecheck_mode_uses_typecheck_keys() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_test(
        &temp_dir,
        "Api.test",
        "typecheck\ntests=Api.fsi\nX_TESTS_DIR=/t\n\
         compile_out_equals=ignored\n\
         typecheck_out_equals=\ntypecheck_err_equals=ok\n",
    );
    let compiler = FakeCompiler::new().with_output("Api.fsi", "", "not ok\n");
    let ctx = context();

    let outcome = Calibrator::new(&ctx, &compiler).calibrate_file(&path).unwrap();

    assert_eq!(outcome, Outcome::Updated);
    let config = Config::load(&path).unwrap();
    assert_eq!(config.first("typecheck_err_equals").unwrap().value.as_deref(), Some("not ok\\n"));
    assert_eq!(config.first("compile_out_equals").unwrap().value.as_deref(), Some("ignored"));
}

#[test]
fn missing_expectation_fails_without_writing() {
    let temp_dir = TempDir::new().unwrap();
    let body = "compile\ntests=Hello\nX_TESTS_DIR=/t\ncompile_out_equals=Hello\n";
    let path = write_test(&temp_dir, "Hello.test", body);
    let compiler = FakeCompiler::new().with_output("Hello.fss", "Different\n", "");
    let ctx = context();

    let err = Calibrator::new(&ctx, &compiler).calibrate_file(&path).unwrap_err();

    assert!(matches!(err, CalibrateError::MissingExpected { ref key } if key == "compile_err_equals"));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), body);
}

#[test]
fn missing_mode_fails() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_test(&temp_dir, "NoMode.test", "tests=Hello\nX_TESTS_DIR=/t\n");
    let compiler = FakeCompiler::new();
    let ctx = context();

    let err = Calibrator::new(&ctx, &compiler).calibrate_file(&path).unwrap_err();

    assert!(matches!(err, CalibrateError::MissingMode));
    assert!(compiler.runs.borrow().is_empty());
}

#[test]
fn missing_source_fails() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_test(&temp_dir, "NoSource.test", "compile\ntests\nX_TESTS_DIR=/t\n");
    let compiler = FakeCompiler::new();
    let ctx = context();

    let err = Calibrator::new(&ctx, &compiler).calibrate_file(&path).unwrap_err();

    assert!(matches!(err, CalibrateError::MissingSource));
}

#[test]
fn missing_tests_dir_fails_before_running_compiler() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_test(&temp_dir, "NoDir.test", "compile\ntests=Hello\n");
    let compiler = FakeCompiler::new();
    let ctx = context();

    let err = Calibrator::new(&ctx, &compiler).calibrate_file(&path).unwrap_err();

    assert!(matches!(err, CalibrateError::MissingTestsDir));
    assert!(compiler.runs.borrow().is_empty());
}

#[test]
fn batch_continues_past_failures() {
    let temp_dir = TempDir::new().unwrap();
    let broken = write_test(&temp_dir, "Broken.test", "compile\nthis is not a definition\n");
    let unterminated = write_test(&temp_dir, "Open.test", "compile_out_equals=abc\\\n");
    let missing = temp_dir.path().join("Missing.test");
    let good = write_test(&temp_dir, "Hello.test", HELLO_TEST);
    let compiler = FakeCompiler::new().with_output("Hello.fss", "Changed\n", "");
    let ctx = context();

    let summary =
        Calibrator::new(&ctx, &compiler).calibrate_all(&[broken, unterminated, missing, good]);

    assert_eq!(
        summary,
        Summary {
            updated: 1,
            unchanged: 0,
            failed: 3
        }
    );
    assert_eq!(summary.message(), "* updated 1 test");
}

#[test]
fn parse_failure_is_reported_as_parse_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_test(&temp_dir, "Broken.test", "compile\n= no key\n");
    let compiler = FakeCompiler::new();
    let ctx = context();

    let err = Calibrator::new(&ctx, &compiler).calibrate_file(&path).unwrap_err();

    match err {
        CalibrateError::Parse { path: p, source } => {
            assert_eq!(p, path);
            assert_eq!(source.line, 2);
        }
        other => panic!("expected parse error, got {:?}", other),
    }
}

#[test]
fn summary_message_pluralizes() {
    let summary = Summary {
        updated: 0,
        unchanged: 4,
        failed: 0,
    };
    assert_eq!(summary.message(), "* updated 0 tests");

    let summary = Summary {
        updated: 2,
        ..Summary::default()
    };
    assert_eq!(summary.message(), "* updated 2 tests");
}

#[test]
fn compare_outputs_judges_streams_independently() {
    let config = crate::config::parse_config(
        "compile_out_equals=a\\nb\ncompile_err_equals=err\n",
    )
    .unwrap();

    let both = compare_outputs(&config, Mode::Compile, "a\nb", "err").unwrap();
    assert!(both.all_match());

    let out_only = compare_outputs(&config, Mode::Compile, "a\nb", "other").unwrap();
    assert!(out_only.stdout_matches);
    assert!(!out_only.stderr_matches);
    assert!(!out_only.all_match());
}
