use chart_stack::ChartError;
use chart_stack::api::{
    ApplyOutcome, STACKING_DIAGNOSTICS_JSON_SCHEMA_V1, StackingDiagnostics,
};
use chart_stack::core::{AlignedDataset, StackedResult, stack_series};

#[test]
fn dataset_serializes_as_engine_rows() {
    let data = AlignedDataset::new(vec![0.0, 1.0], vec![vec![Some(1.5), None]])
        .expect("valid dataset");
    let json = data.to_json_string().expect("serialize");
    assert_eq!(json, "[[0.0,1.0],[1.5,null]]");

    let parsed = AlignedDataset::from_json_str(&json).expect("parse");
    assert_eq!(parsed, data);
}

#[test]
fn dataset_json_with_ragged_rows_is_rejected() {
    let err = AlignedDataset::from_json_str("[[0,1,2],[1,2]]").expect_err("ragged rows");
    assert!(matches!(err, ChartError::InvalidData(message) if message.contains("length mismatch")));
}

#[test]
fn dataset_json_with_null_x_is_rejected() {
    assert!(AlignedDataset::from_json_str("[[0,null],[1,2]]").is_err());
}

#[test]
fn stacked_result_carries_band_pairs() {
    let data = AlignedDataset::from_values(vec![0.0], vec![vec![1.0], vec![2.0]])
        .expect("valid dataset");
    let result = stack_series(&data, |_| false);
    let json = serde_json::to_value(&result).expect("serialize");

    assert_eq!(json["data"], serde_json::json!([[0.0], [3.0], [2.0]]));
    assert_eq!(json["bands"], serde_json::json!([{ "series": [1, 2] }]));

    let back: StackedResult = serde_json::from_value(json).expect("parse");
    assert_eq!(back, result);
}

#[test]
fn diagnostics_contract_is_versioned_and_compat_parses_bare_payload() {
    let mut diagnostics = StackingDiagnostics::default();
    diagnostics.record(ApplyOutcome::Applied { bands: 2 });
    diagnostics.record(ApplyOutcome::SkippedReentrant);
    diagnostics.record(ApplyOutcome::SkippedFocusOnly);

    let json = diagnostics.to_json_contract_v1_pretty().expect("serialize");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(
        value["schema_version"],
        serde_json::json!(STACKING_DIAGNOSTICS_JSON_SCHEMA_V1)
    );
    assert_eq!(StackingDiagnostics::from_json_compat_str(&json).expect("parse"), diagnostics);

    let bare = serde_json::to_string(&diagnostics).expect("serialize bare");
    assert_eq!(StackingDiagnostics::from_json_compat_str(&bare).expect("parse"), diagnostics);
    assert_eq!(diagnostics.skipped(), 2);
}

#[test]
fn diagnostics_contract_rejects_unknown_schema() {
    let payload = r#"{"schema_version": 9, "diagnostics": {"applied": 0, "skipped_inactive": 0,
        "skipped_reentrant": 0, "skipped_shape_mismatch": 0, "skipped_focus_only": 0}}"#;
    assert!(StackingDiagnostics::from_json_compat_str(payload).is_err());
}
