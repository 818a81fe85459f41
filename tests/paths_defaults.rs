use std::{fs, path::PathBuf};

use grade_runner::java::{JavaPackage, ProjectPaths};
use uuid::Uuid;

fn temp_root() -> PathBuf {
    let root = std::env::temp_dir().join(format!("grade-runner-paths-{}", Uuid::new_v4()));
    fs::create_dir_all(&root).expect("create temp root");
    root
}

#[test]
fn project_paths_defaults_are_consistent() {
    let root = temp_root();

    let via_new = ProjectPaths::new(root.clone());
    let via_parts = ProjectPaths::from_parts(root.clone(), None, None, None);
    assert_eq!(via_new, via_parts);

    assert_eq!(via_new.submission_dir(), root.join("submission"));
    assert_eq!(via_new.working_dir(), root.join("working"));
    assert_eq!(via_new.source_dir(), root.join("working/src/main/java"));
    assert_eq!(via_new.results_file(), root.join("results/results.json"));

    let _ = fs::remove_dir_all(root);
}

#[test]
fn overrides_move_the_source_root_with_the_working_dir() {
    let root = temp_root();
    let elsewhere = root.join("scratch");

    let paths = ProjectPaths::from_parts(root.clone(), None, Some(elsewhere.clone()), None);
    assert_eq!(paths.source_dir(), elsewhere.join("src/main/java"));
    assert_eq!(
        paths.package_dir(&JavaPackage::new("edu.hw1")),
        elsewhere.join("src/main/java/edu/hw1")
    );
    assert_eq!(paths.submission_dir(), root.join("submission"));

    let _ = fs::remove_dir_all(root);
}
