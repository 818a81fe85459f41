use std::{fs, path::PathBuf};

use grade_runner::{
    assignment::{AssignmentConfig, ConfigError, parse_list},
    gradescope::GradescopeFailure,
    java::JavaPackage,
};
use uuid::Uuid;

const PATH: &str = "hw/config.ini";

fn temp_root() -> PathBuf {
    let root = std::env::temp_dir().join(format!("grade-runner-config-{}", Uuid::new_v4()));
    fs::create_dir_all(&root).expect("create temp root");
    root
}

#[test]
fn loads_submission_and_crosstests() {
    let config = AssignmentConfig::parse(
        "[submission]\npackage = edu.hw1\nfiles = [Adder.java, AdderTest.java, data.txt]\n\n\
         [crosstests]\ntests = [AdderTest.java]\npackages = [buggy1, buggy2]\n",
        PATH,
    )
    .expect("valid config");

    assert_eq!(config.submission().package(), &JavaPackage::new("edu.hw1"));
    assert_eq!(config.submission().files(), ["Adder.java", "AdderTest.java", "data.txt"]);

    let crosstests = config.crosstests().expect("crosstests section");
    assert_eq!(crosstests.tests(), ["AdderTest.java"]);
    assert_eq!(crosstests.packages(), [JavaPackage::new("buggy1"), JavaPackage::new("buggy2")]);
}

#[test]
fn crosstests_section_is_optional() {
    let config =
        AssignmentConfig::parse("[submission]\npackage = p\nfiles = [A.java]\n", PATH).unwrap();
    assert!(config.crosstests().is_none());
}

#[test]
fn missing_submission_section_is_named() {
    let err = AssignmentConfig::parse("[crosstests]\ntests = [A]\npackages = [b]\n", PATH)
        .unwrap_err();
    assert!(matches!(err, ConfigError::MissingSection { .. }));
    assert_eq!(err.to_string(), "Did not find section 'submission' in hw/config.ini");
}

#[test]
fn unexpected_sections_are_listed() {
    let err = AssignmentConfig::parse(
        "[submission]\npackage = p\nfiles = [A.java]\n[extras]\nx = 1\n[more]\ny = 2\n",
        PATH,
    )
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Unexpected section(s) in hw/config.ini: ['extras', 'more']"
    );

    // A single stray section next to submission is still rejected.
    let err = AssignmentConfig::parse("[submission]\npackage = p\nfiles = [A]\n[x]\n", PATH)
        .unwrap_err();
    assert!(matches!(err, ConfigError::UnexpectedSections { ref sections, .. } if sections == &["x"]));
}

#[test]
fn missing_key_is_named() {
    let err = AssignmentConfig::parse("[submission]\npackage = p\n", PATH).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Did not find key 'files' in section 'submission' of hw/config.ini"
    );
}

#[test]
fn unexpected_keys_are_listed() {
    let err = AssignmentConfig::parse(
        "[submission]\npackage = p\nfiles = [A.java]\nteam = yes\n",
        PATH,
    )
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Unexpected key(s) in section 'submission' of hw/config.ini: ['team']"
    );

    let err = AssignmentConfig::parse(
        "[submission]\npackage = p\nfiles = [A.java]\n[crosstests]\ntests = [T]\npackages = \
         [q]\nextra = 1\n",
        PATH,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::UnexpectedKeys { ref section, .. } if section == "crosstests"));
}

#[test]
fn keys_inherited_from_default_count_as_unexpected() {
    let err = AssignmentConfig::parse(
        "[DEFAULT]\nowner = staff\n[submission]\npackage = p\nfiles = [A.java]\n",
        PATH,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::UnexpectedKeys { ref keys, .. } if keys == &["owner"]));
}

#[test]
fn crosstests_require_both_keys() {
    let err = AssignmentConfig::parse(
        "[submission]\npackage = p\nfiles = [A.java]\n[crosstests]\ntests = [T.java]\n",
        PATH,
    )
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Did not find key 'packages' in section 'crosstests' of hw/config.ini"
    );
}

#[test]
fn malformed_list_is_reported_with_its_value() {
    let err = AssignmentConfig::parse("[submission]\npackage = p\nfiles = A.java\n", PATH)
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Could not parse files value 'A.java' in 'hw/config.ini'"
    );
}

#[test]
fn empty_list_items_are_reported_as_such() {
    for files in ["[A.java,,B.java]", "[A.java,]", "[,]"] {
        let config = format!("[submission]\npackage = p\nfiles = {files}\n");
        let err = AssignmentConfig::parse(&config, PATH).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("Empty item in files value '{files}' in 'hw/config.ini'")
        );
    }
}

#[test]
fn empty_package_is_rejected() {
    let err =
        AssignmentConfig::parse("[submission]\npackage =\nfiles = [A.java]\n", PATH).unwrap_err();
    assert!(matches!(err, ConfigError::EmptyValue { .. }));
}

#[test]
fn list_values_may_span_lines() {
    let config = AssignmentConfig::parse(
        "[submission]\npackage = p\nfiles = [A.java,\n    B.java]\n",
        PATH,
    )
    .unwrap();
    assert_eq!(config.submission().files(), ["A.java", "B.java"]);
}

#[test]
fn list_parsing_trims_and_keeps_order() {
    assert_eq!(parse_list("[a, b, c]").unwrap(), ["a", "b", "c"]);
    assert_eq!(parse_list("[  c ,a,b  ]").unwrap(), ["c", "a", "b"]);
    assert_eq!(parse_list("[single]").unwrap(), ["single"]);
    assert_eq!(parse_list("[]").unwrap(), Vec::<String>::new());
}

#[test]
fn list_parsing_requires_brackets() {
    for value in ["", "[", "]", "a, b", "[a, b", "a, b]", "(a, b)", "[a,,b]"] {
        assert!(parse_list(value).is_none(), "{value:?} should not parse");
    }
}

#[test]
fn load_reports_unreadable_file() {
    let root = temp_root();
    let path = root.join("missing.ini");
    let err = AssignmentConfig::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Unreadable { .. }));
    assert!(err.to_string().starts_with("Unable to read configuration file"));

    // The zero-score payload carries only the message, not the OS error.
    let failure = GradescopeFailure::from_error(&anyhow::Error::from(err));
    assert_eq!(
        failure.output,
        format!("Unable to read configuration file {}", path.display())
    );
    let _ = fs::remove_dir_all(root);
}

#[test]
fn load_reads_file_from_disk() {
    let root = temp_root();
    let path = root.join("config.ini");
    fs::write(&path, "[submission]\npackage = student\nfiles = [Main.java]\n").unwrap();

    let config = AssignmentConfig::load(&path).expect("load config");
    assert_eq!(config.submission().package().name(), "student");

    let _ = fs::remove_dir_all(root);
}

#[test]
fn syntax_errors_name_the_line() {
    let err = AssignmentConfig::parse("[submission]\npackage = p\nnot an entry\n", PATH)
        .unwrap_err();
    assert!(matches!(err, ConfigError::Malformed { .. }));
    assert!(err.to_string().contains("line 3"));
}
