#![cfg(unix)]

use std::{ffi::OsString, fs, os::unix::fs::PermissionsExt, path::PathBuf};

use grade_runner::java::GradleCommand;
use uuid::Uuid;

fn temp_root() -> PathBuf {
    let root = std::env::temp_dir().join(format!("grade-runner-gradle-{}", Uuid::new_v4()));
    fs::create_dir_all(root.join("working")).expect("create working dir");
    fs::create_dir_all(root.join("bin")).expect("create bin dir");
    root
}

fn executable(path: &PathBuf, script: &str) {
    fs::write(path, script).unwrap();
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}

#[test]
fn wrapper_in_working_dir_is_preferred() {
    let root = temp_root();
    let working = root.join("working");
    executable(&working.join("gradlew"), "#!/bin/sh\n");
    executable(&root.join("bin").join("gradle"), "#!/bin/sh\n");

    let command =
        GradleCommand::resolve_with_path(&working, Some(root.join("bin").into_os_string()))
            .expect("resolve");

    assert!(command.program().is_absolute());
    assert_eq!(
        fs::canonicalize(command.program()).unwrap(),
        fs::canonicalize(working.join("gradlew")).unwrap()
    );
    assert_eq!(command.args(), ["clean", "run", "--quiet"].map(OsString::from));

    let _ = fs::remove_dir_all(root);
}

#[test]
fn falls_back_to_gradle_on_the_search_path() {
    let root = temp_root();
    let working = root.join("working");
    let gradle = root.join("bin").join("gradle");
    executable(&gradle, "#!/bin/sh\nprintf 'from path'\n");

    let command =
        GradleCommand::resolve_with_path(&working, Some(root.join("bin").into_os_string()))
            .expect("resolve");

    assert_eq!(
        fs::canonicalize(command.program()).unwrap(),
        fs::canonicalize(&gradle).unwrap()
    );
    assert_eq!(command.run(&working).unwrap(), "from path");

    let _ = fs::remove_dir_all(root);
}

#[test]
fn missing_wrapper_and_gradle_is_an_error() {
    let root = temp_root();
    let working = root.join("working");

    let err = GradleCommand::resolve_with_path(&working, Some(root.join("bin").into_os_string()))
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        format!(
            "Could not find the gradle wrapper {} or a gradle installation on PATH",
            working.join("gradlew").display()
        )
    );

    let _ = fs::remove_dir_all(root);
}

#[test]
fn non_zero_exit_reports_stderr() {
    let root = temp_root();
    let working = root.join("working");
    executable(&working.join("gradlew"), "#!/bin/sh\nprintf 'boom' >&2\nexit 3\n");

    let err = GradleCommand::resolve_with_path(&working, None)
        .and_then(|command| command.run(&working))
        .unwrap_err();
    assert_eq!(err.to_string(), "Runtime error: boom");

    let _ = fs::remove_dir_all(root);
}
