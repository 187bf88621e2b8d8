//! Session-level workflow tests.

use ras_ingest::{IngestOptions, ingest_upload};
use ras_model::{AscvdGroup, FieldKey, MesaGroup, PercentileThresholds, UploadedDataset};
use ras_wizard::{Step, StepBlock, WizardSession};

const COHORT_CSV: &str = "\
cacs,age,gender,total_chol,hdl,sbp,smoking,diabetes,bp_med
120,54,male,5.2,1.1,140,1,0,1
0,61,female,4.8,1.4,122,0,0,0
";

const ETHNIC_CSV: &str = "\
cacs,age,gender,total_chol,hdl,sbp,smoking,diabetes,bp_med,ethnicity
120,54,male,5.2,1.1,140,1,0,1,White
0,61,female,4.8,1.4,122,0,0,0,Chinese
34,58,male,6.0,0.9,151,1,1,1,White
";

fn ingest(csv: &str) -> UploadedDataset {
    ingest_upload(
        "cohort.csv",
        "https://files.example/cohort.csv",
        csv.as_bytes(),
        &IngestOptions::default(),
    )
    .unwrap()
}

fn session_at_mapping(csv: &str) -> WizardSession {
    let mut session = WizardSession::new();
    session.start();
    session.load_dataset(ingest(csv));
    session.try_advance().unwrap();
    assert_eq!(session.step(), Step::MapColumns);
    session
}

#[test]
fn upload_step_blocks_without_dataset() {
    let mut session = WizardSession::new();
    session.start();
    assert_eq!(session.step(), Step::Upload);
    assert_eq!(session.try_advance(), Err(vec![StepBlock::NoDataset]));
}

#[test]
fn mapping_step_blocks_until_required_fields_bound() {
    let mut session = session_at_mapping(COHORT_CSV);
    // Suggestions already bound all nine required fields for this header.
    assert!(session.mapping().is_complete());

    session.clear_column(FieldKey::Age);
    let blocks = session.try_advance().unwrap_err();
    assert_eq!(
        blocks,
        vec![StepBlock::MappingIncomplete {
            missing: vec![FieldKey::Age]
        }]
    );

    session.bind_column(FieldKey::Age, "age").unwrap();
    assert!(session.try_advance().is_ok());
}

#[test]
fn ethnicity_step_skips_when_no_column_bound() {
    let mut session = session_at_mapping(COHORT_CSV);
    assert!(!session.has_ethnicity_column());

    // Leaving the mapping step lands directly on settings.
    let step = session.try_advance().unwrap();
    assert_eq!(step, Step::Settings);
    // The skip marked the ethnicity step complete without user action.
    assert!(session.controller().is_complete(Step::Ethnicity));

    // Going back skips it in the other direction too.
    assert_eq!(session.go_back(), Step::MapColumns);
}

#[test]
fn ethnicity_step_runs_when_column_bound() {
    let mut session = session_at_mapping(ETHNIC_CSV);
    assert!(session.has_ethnicity_column());

    let step = session.try_advance().unwrap();
    assert_eq!(step, Step::Ethnicity);

    let raws: Vec<&str> = session
        .ethnicity()
        .entries()
        .iter()
        .map(|e| e.raw.as_str())
        .collect();
    assert_eq!(raws, vec!["White", "Chinese"]);

    session.assign_ascvd("White", AscvdGroup::White);
    session.assign_mesa("White", MesaGroup::White);
    session.assign_ascvd("Chinese", AscvdGroup::Other);
    session.assign_mesa("Chinese", MesaGroup::Chinese);

    assert_eq!(session.try_advance().unwrap(), Step::Settings);
    assert!(session.controller().is_complete(Step::Ethnicity));
}

#[test]
fn removing_ethnicity_binding_reinstates_the_skip() {
    let mut session = session_at_mapping(ETHNIC_CSV);
    session.try_advance().unwrap();
    assert_eq!(session.step(), Step::Ethnicity);

    // Back to mapping, unbind, forward again: the step must now skip.
    assert_eq!(session.go_back(), Step::MapColumns);
    session.clear_column(FieldKey::Ethnicity);
    assert!(session.ethnicity().is_empty());
    assert_eq!(session.try_advance().unwrap(), Step::Settings);
}

#[test]
fn rebinding_ethnicity_reenters_the_step() {
    let mut session = session_at_mapping(COHORT_CSV);
    session.try_advance().unwrap();
    assert_eq!(session.step(), Step::Settings);

    // Bind an ethnicity column after the step was skipped.
    session.go_back();
    assert_eq!(session.step(), Step::MapColumns);
    session.bind_column(FieldKey::Ethnicity, "gender").unwrap();
    assert_eq!(session.try_advance().unwrap(), Step::Ethnicity);
    // Distinct preview values of the bound column drive the grid.
    assert_eq!(session.ethnicity().entries().len(), 2);
}

#[test]
fn threshold_step_gates_on_ordering() {
    let mut session = session_at_mapping(COHORT_CSV);
    session.try_advance().unwrap(); // -> Settings (ethnicity skipped)
    session.try_advance().unwrap(); // -> Thresholds

    session.set_thresholds(PercentileThresholds {
        resilient: 20,
        reference_low: 10,
        reference_high: 60,
        susceptible: 80,
    });
    assert!(matches!(
        session.try_advance().unwrap_err()[0],
        StepBlock::ThresholdsInvalid { .. }
    ));

    session.set_thresholds(PercentileThresholds::default());
    assert_eq!(session.try_advance().unwrap(), Step::Results);
}

#[test]
fn results_step_still_retreats() {
    let mut session = session_at_mapping(COHORT_CSV);
    session.try_advance().unwrap();
    session.try_advance().unwrap();
    session.try_advance().unwrap();
    assert_eq!(session.step(), Step::Results);

    assert_eq!(session.go_back(), Step::Thresholds);
}

#[test]
fn new_upload_replaces_downstream_state() {
    let mut session = session_at_mapping(ETHNIC_CSV);
    session.try_advance().unwrap();
    session.assign_mesa("Chinese", MesaGroup::Chinese);

    // Re-upload a dataset without an ethnicity column.
    session.load_dataset(ingest(COHORT_CSV));
    assert!(!session.has_ethnicity_column());
    assert!(session.ethnicity().is_empty());
    // Suggestions re-ran for the new dataset.
    assert_eq!(session.mapping().get(FieldKey::Cacs), "cacs");
}

#[test]
fn headerless_upload_starts_unmapped() {
    let mut session = WizardSession::new();
    session.start();
    let dataset = ingest_upload(
        "raw.csv",
        "u",
        b"120,54,male\n0,61,female\n",
        &IngestOptions::default(),
    )
    .unwrap();
    session.load_dataset(dataset);
    session.try_advance().unwrap();

    assert!(!session.mapping().is_complete());
    let blocks = session.try_advance().unwrap_err();
    assert!(matches!(
        &blocks[0],
        StepBlock::MappingIncomplete { missing } if missing.len() == 9
    ));

    // Synthesized names are still bindable by hand.
    session.bind_column(FieldKey::Cacs, "Column 1").unwrap();
    assert_eq!(session.mapping().get(FieldKey::Cacs), "Column 1");
}
