//! File-backed end-to-end tests for the `veil` runner: the happy path,
//! the documented header policy, and the discard-on-failure output policy.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use veil_cli::{run, Cli};
use veil_core::traits::ITableSource;
use veil_table::DelimitedTable;

const PATIENTS: &str = "\
age,zip,disease
21,94139,flu
23,94139,cold
33,94139,flu
34,94132,asthma
45,94132,flu
46,94139,cold
";

const AGE_CHAINS: &str = "\
21,20-29,*
23,20-29,*
33,30-39,*
34,30-39,*
45,40-49,*
46,40-49,*
";

const ZIP_CHAINS: &str = "\
94139,9413*,941**
94132,9413*,941**
";

struct Fixture {
    dir: tempfile::TempDir,
    input: PathBuf,
    age: PathBuf,
    zip: PathBuf,
    output: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let input = write(dir.path(), "patients.csv", PATIENTS);
        let age = write(dir.path(), "age.csv", AGE_CHAINS);
        let zip = write(dir.path(), "zip.csv", ZIP_CHAINS);
        let output = dir.path().join("out.csv");
        Self {
            dir,
            input,
            age,
            zip,
            output,
        }
    }

    fn cli(&self, k: usize) -> Cli {
        Cli {
            input: self.input.clone(),
            quasi_identifiers: vec!["age".into(), "zip".into()],
            hierarchies: vec![self.age.clone(), self.zip.clone()],
            k,
            output: self.output.clone(),
            report: None,
            verbose: 0,
        }
    }
}

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn anonymizes_a_table_end_to_end() {
    let fixture = Fixture::new();
    let summary = run(&fixture.cli(2)).unwrap();

    assert!(summary.suppressed_rows <= 2);
    assert_eq!(summary.output_rows + summary.suppressed_rows, 6);

    let table = DelimitedTable::open(&fixture.output).unwrap();
    assert_eq!(table.schema().names(), ["age", "zip", "disease"]);
    let mut sizes: HashMap<(String, String), usize> = HashMap::new();
    for row in table.rows() {
        let key = (row.values[0].clone(), row.values[1].clone());
        *sizes.entry(key).or_insert(0) += 1;
    }
    for (group, size) in sizes {
        assert!(size >= 2, "group {group:?} has only {size} rows");
    }
}

#[test]
fn output_starts_with_the_header_line() {
    let fixture = Fixture::new();
    run(&fixture.cli(2)).unwrap();

    let content = fs::read_to_string(&fixture.output).unwrap();
    assert!(
        content.starts_with("age,zip,disease\n"),
        "header must be re-emitted: {content}"
    );
}

#[test]
fn k_of_one_reproduces_the_data_rows() {
    let fixture = Fixture::new();
    let summary = run(&fixture.cli(1)).unwrap();

    assert_eq!(summary.rounds, 0);
    let content = fs::read_to_string(&fixture.output).unwrap();
    assert_eq!(content, PATIENTS);
}

#[test]
fn report_flag_writes_the_run_summary() {
    let fixture = Fixture::new();
    let report = fixture.dir.path().join("run.json");
    let mut cli = fixture.cli(2);
    cli.report = Some(report.clone());

    let summary = run(&cli).unwrap();

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&report).unwrap())
        .unwrap();
    assert_eq!(json["output_rows"], summary.output_rows);
    assert_eq!(json["suppressed_rows"], summary.suppressed_rows);
    assert_eq!(json["final_levels"][0][0], "age");
}

#[test]
fn unknown_attribute_leaves_no_output_file() {
    let fixture = Fixture::new();
    let nationality = write(fixture.dir.path(), "nationality.csv", "us,north-america\n");
    let mut cli = fixture.cli(2);
    cli.quasi_identifiers = vec!["age".into(), "nationality".into()];
    cli.hierarchies = vec![fixture.age.clone(), nationality];

    let err = run(&cli).unwrap_err();
    assert!(
        err.to_string().contains("nationality"),
        "diagnostic must name the attribute: {err:#}"
    );
    assert!(
        !fixture.output.exists(),
        "failed runs must not leave partial output"
    );
}

#[test]
fn exhausted_hierarchy_leaves_no_output_file() {
    let fixture = Fixture::new();
    // Roots only: no age can be generalized, and k = 5 cannot be met.
    write(fixture.dir.path(), "age.csv", "21\n23\n33\n34\n45\n46\n");
    let err = run(&fixture.cli(5)).unwrap_err();

    assert!(
        err.to_string().contains("age"),
        "diagnostic must name the attribute: {err:#}"
    );
    assert!(!fixture.output.exists());
}

#[test]
fn missing_hierarchy_file_is_reported_with_its_path() {
    let fixture = Fixture::new();
    let mut cli = fixture.cli(2);
    cli.hierarchies = vec![fixture.age.clone(), fixture.dir.path().join("absent.csv")];

    let err = run(&cli).unwrap_err();
    assert!(
        format!("{err:#}").contains("absent.csv"),
        "diagnostic must name the file: {err:#}"
    );
    assert!(!fixture.output.exists());
}

#[test]
fn hierarchy_count_mismatch_is_rejected() {
    let fixture = Fixture::new();
    let mut cli = fixture.cli(2);
    cli.hierarchies = vec![fixture.age.clone()];

    let err = run(&cli).unwrap_err();
    assert!(
        err.to_string().contains("one hierarchy file per quasi-identifier"),
        "got: {err:#}"
    );
}
