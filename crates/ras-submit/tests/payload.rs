//! End-to-end: ingested CSV through the wizard to the final payload.

use ras_ingest::{IngestOptions, ingest_upload};
use ras_model::{AnalysisSettings, FieldKey, RiskScore};
use ras_submit::{AnalysisResponse, AnalysisService, Dispatch, RequestKey, SubmissionInputs};
use ras_wizard::{Step, StepBlock, WizardSession};

const SMALL_CSV: &str = "\
cacs_value,patient_age,sex
120,54,male
0,61,female
34,58,male
12,49,female
220,70,male
";

/// Drives a three-column, five-row CSV with a clear header through every
/// step and checks the assembled payload.
#[test]
fn csv_to_payload() -> anyhow::Result<()> {
    let mut session = WizardSession::new();
    session.start();

    let dataset = ingest_upload(
        "small.csv",
        "https://files.example/uploads/small.csv",
        SMALL_CSV.as_bytes(),
        &IngestOptions::default(),
    )?;
    assert_eq!(dataset.columns.len(), 3);
    assert_eq!(dataset.preview.len(), 5);
    session.load_dataset(dataset);
    session.try_advance().unwrap();
    assert_eq!(session.step(), Step::MapColumns);

    // Three real columns; the remaining required fields get placeholder
    // bindings so all nine entries are mapped.
    session.bind_column(FieldKey::Cacs, "cacs_value").unwrap();
    session.bind_column(FieldKey::Age, "patient_age").unwrap();
    session.bind_column(FieldKey::Gender, "sex").unwrap();
    for key in [
        FieldKey::TotalCholesterol,
        FieldKey::HdlCholesterol,
        FieldKey::SystolicBp,
        FieldKey::SmokingStatus,
        FieldKey::DiabetesStatus,
        FieldKey::BpMedication,
    ] {
        session.bind_column(key, "cacs_value").unwrap();
    }
    assert!(session.mapping().is_complete());

    // No ethnicity column: the ethnicity step skips straight to settings.
    assert_eq!(session.try_advance().unwrap(), Step::Settings);

    session.set_settings(AnalysisSettings {
        risk_scores: vec![RiskScore::Frs],
        min_scores: 1,
        ..AnalysisSettings::default()
    });
    assert_eq!(session.try_advance().unwrap(), Step::Thresholds);

    // Default thresholds are accepted as-is.
    assert_eq!(session.try_advance().unwrap(), Step::Results);

    let request = SubmissionInputs::gather(&session)
        .expect("all gates passed")
        .into_request();

    let json = serde_json::to_value(&request)?;
    assert_eq!(json["file_url"], "https://files.example/uploads/small.csv");
    assert_eq!(json["column_mappings"]["cacs"], "cacs_value");
    assert_eq!(json["column_mappings"]["age"], "patient_age");
    assert_eq!(json["column_mappings"]["ethnicity"], "");
    assert_eq!(json["cholesterol_unit"], "mmol/L");
    assert_eq!(
        json["settings"]["risk_scores"],
        serde_json::json!(["frs"])
    );
    assert_eq!(json["settings"]["ethnicity_mappings"], serde_json::json!({}));
    assert_eq!(json["settings"]["min_scores"], 1);
    assert_eq!(json["settings"]["percentile_thresholds"]["resilient"], 20);
    assert_eq!(json["settings"]["percentile_thresholds"]["susceptible"], 80);
    Ok(())
}

#[test]
fn gather_reports_every_failed_gate() {
    let mut session = WizardSession::new();
    session.start();
    session.set_settings(AnalysisSettings {
        risk_scores: Vec::new(),
        ..AnalysisSettings::default()
    });

    let blocks = SubmissionInputs::gather(&session).unwrap_err();
    assert!(blocks.contains(&StepBlock::NoDataset));
    assert!(blocks.iter().any(|b| matches!(b, StepBlock::MappingIncomplete { .. })));
    assert!(blocks.iter().any(|b| matches!(b, StepBlock::SettingsInvalid { .. })));
}

#[test]
fn settings_edits_invalidate_the_cache_key() -> anyhow::Result<()> {
    let mut session = WizardSession::new();
    session.start();
    let dataset = ingest_upload(
        "small.csv",
        "https://files.example/uploads/small.csv",
        SMALL_CSV.as_bytes(),
        &IngestOptions::default(),
    )?;
    session.load_dataset(dataset);
    for key in FieldKey::REQUIRED {
        session.bind_column(key, "cacs_value").unwrap();
    }

    let first = SubmissionInputs::gather(&session).unwrap().into_request();
    let mut service = AnalysisService::new();
    let Dispatch::Fetch(key) = service.begin(&first)? else {
        panic!("first request must fetch");
    };
    service.complete(
        key,
        AnalysisResponse {
            success: true,
            data: None,
            error: None,
        },
    );

    // Identical snapshot: served from cache, no second round-trip.
    let repeat = SubmissionInputs::gather(&session).unwrap().into_request();
    assert!(matches!(service.begin(&repeat)?, Dispatch::Cached(_)));

    // Any settings change produces a new key and a fresh fetch.
    let mut settings = session.settings().clone();
    settings.min_scores = 2;
    session.set_settings(settings);
    let changed = SubmissionInputs::gather(&session).unwrap().into_request();
    assert_ne!(
        RequestKey::for_request(&first)?,
        RequestKey::for_request(&changed)?
    );
    assert!(matches!(service.begin(&changed)?, Dispatch::Fetch(_)));
    Ok(())
}
