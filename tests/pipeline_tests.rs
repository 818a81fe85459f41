#![cfg(unix)]

use std::{
    fs,
    os::unix::fs::PermissionsExt,
    path::{Path, PathBuf},
};

use grade_runner::{
    config::{Environment, RuntimeConfig},
    grade,
    java::{LineFilter, ProjectPaths},
    report::RunOutcome,
};
use uuid::Uuid;

/// Creates `<tmp>/<id>/grader` (scaffold + submission) and
/// `<tmp>/<id>/hw1/config.ini`, with `gradlew` running `script`.
fn temp_grader(config: &str, script: &str) -> (PathBuf, PathBuf) {
    let base = std::env::temp_dir().join(format!("grade-runner-pipeline-{}", Uuid::new_v4()));
    let grader = base.join("grader");
    fs::create_dir_all(grader.join("submission")).unwrap();
    fs::create_dir_all(grader.join("src/main/java/staff")).unwrap();
    fs::create_dir_all(base.join("hw1")).unwrap();

    fs::write(base.join("hw1/config.ini"), config).unwrap();
    fs::write(grader.join("build.gradle"), "plugins { id 'application' }\n").unwrap();
    fs::write(grader.join("src/main/java/staff/Runner.java"), "package staff;\n").unwrap();

    let gradlew = grader.join("gradlew");
    fs::write(&gradlew, script).unwrap();
    fs::set_permissions(&gradlew, fs::Permissions::from_mode(0o755)).unwrap();

    (base, grader)
}

fn runtime(grader: &Path, environment: Environment) -> RuntimeConfig {
    RuntimeConfig::builder()
        .environment(environment)
        .paths(ProjectPaths::new(grader.to_path_buf()))
        .project_dir(Some("hw1".to_string()))
        .line_filter(LineFilter::Loose)
        .build()
}

const CONFIG: &str = "[submission]\npackage = student\nfiles = [Adder.java, AdderTest.java]\n\n\
                      [crosstests]\ntests = [AdderTest.java]\npackages = [buggy]\n";

#[test]
fn successful_run_reports_build_stdout() {
    let (base, grader) = temp_grader(
        CONFIG,
        "#!/bin/sh\nif [ \"$1 $2 $3\" != \"clean run --quiet\" ]; then echo \"bad args: $*\" >&2; \
         exit 2; fi\ntest -f src/main/java/buggy/AdderTest.java || exit 3\nprintf \
         '{\"score\": 10}'\n",
    );
    fs::write(grader.join("submission/Adder.java"), "package student;\nclass Adder {}\n").unwrap();
    fs::write(
        grader.join("submission/AdderTest.java"),
        "package student;\nclass AdderTest {}\n",
    )
    .unwrap();

    let output = grade(&runtime(&grader, Environment::Local)).expect("grade");
    assert_eq!(output, "{\"score\": 10}");

    let repackaged =
        fs::read_to_string(grader.join("working/src/main/java/buggy/AdderTest.java")).unwrap();
    assert_eq!(repackaged, "package buggy;\n\nimport student.*;\nclass AdderTest {}\n");
    assert!(grader.join("working/src/main/java/staff/Runner.java").is_file());

    let _ = fs::remove_dir_all(base);
}

#[test]
fn failing_build_reports_runtime_error_payload() {
    let (base, grader) = temp_grader(
        "[submission]\npackage = student\nfiles = [Adder.java]\n",
        "#!/bin/sh\nprintf 'compile error' >&2\nexit 1\n",
    );
    fs::write(grader.join("submission/Adder.java"), "package student;\nclass Adder {}\n").unwrap();

    let outcome = RunOutcome::from_result(grade(&runtime(&grader, Environment::Local)));
    assert_eq!(
        outcome.render().unwrap(),
        r#"{"score": 0, "output": "Runtime error: compile error"}"#
    );

    let _ = fs::remove_dir_all(base);
}

#[test]
fn config_errors_short_circuit_before_the_workspace_is_built() {
    let (base, grader) = temp_grader("[other]\nx = 1\n", "#!/bin/sh\nexit 0\n");

    let err = grade(&runtime(&grader, Environment::Local)).unwrap_err();
    assert!(err.to_string().starts_with("Did not find section 'submission'"));
    assert!(!grader.join("working").exists());

    let _ = fs::remove_dir_all(base);
}

#[test]
fn hosted_mode_reads_config_from_the_root_and_writes_results() {
    let (base, grader) = temp_grader("", "#!/bin/sh\nprintf 'ok'\n");
    fs::write(
        grader.join("config.ini"),
        "[submission]\npackage = student\nfiles = [Adder.java]\n",
    )
    .unwrap();
    fs::write(grader.join("submission/Adder.java"), "package student;\nclass Adder {}\n").unwrap();

    let outcome = grade_runner::run(&runtime(&grader, Environment::Hosted)).expect("run");
    assert_eq!(outcome, RunOutcome::Completed("ok".to_string()));
    assert_eq!(fs::read_to_string(grader.join("results/results.json")).unwrap(), "ok");

    let _ = fs::remove_dir_all(base);
}

#[test]
fn hosted_failure_is_persisted_as_zero_score() {
    let (base, grader) = temp_grader("", "#!/bin/sh\nexit 0\n");
    fs::write(
        grader.join("config.ini"),
        "[submission]\npackage = student\nfiles = [Missing.java]\n",
    )
    .unwrap();

    let outcome = grade_runner::run(&runtime(&grader, Environment::Hosted)).expect("run");
    assert!(matches!(outcome, RunOutcome::Failed(_)));

    let written = fs::read_to_string(grader.join("results/results.json")).unwrap();
    assert!(written.starts_with(r#"{"score": 0, "output": "File "#), "{written}");
    assert!(written.contains("Missing.java not found."), "{written}");

    let _ = fs::remove_dir_all(base);
}
