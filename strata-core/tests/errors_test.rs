use strata_core::errors::*;

#[test]
fn invalid_record_carries_id_and_reason() {
    let err = InputError::InvalidRecord {
        id: "rec-1".into(),
        reason: "record id is empty".into(),
    };
    let msg = err.to_string();
    assert!(msg.contains("rec-1"));
    assert!(msg.contains("record id is empty"));
}

#[test]
fn timeout_carries_task_and_budget() {
    let err = HostError::Timeout {
        task: "optimize".into(),
        timeout_ms: 250,
    };
    let msg = err.to_string();
    assert!(msg.contains("optimize"));
    assert!(msg.contains("250"));
}

#[test]
fn checksum_mismatch_carries_both_digests() {
    let err = TransformError::ChecksumMismatch {
        expected: "aaa".into(),
        actual: "bbb".into(),
    };
    let msg = err.to_string();
    assert!(msg.contains("aaa"));
    assert!(msg.contains("bbb"));
}

// --- From impls ---

#[test]
fn input_error_converts_to_strata_error() {
    let err: StrataError = InputError::DuplicateRecord { id: "x".into() }.into();
    assert!(matches!(err, StrataError::InputError(_)));
}

#[test]
fn host_error_converts_to_strata_error() {
    let err: StrataError = HostError::UnknownTask {
        kind: "bogus".into(),
    }
    .into();
    assert!(matches!(err, StrataError::HostError(_)));
    assert!(err.to_string().contains("bogus"));
}

#[test]
fn store_error_converts_to_strata_error() {
    let err: StrataError = StoreError::NotFound { id: "r9".into() }.into();
    assert!(matches!(err, StrataError::StoreError(_)));
}

#[test]
fn transform_error_converts_to_strata_error() {
    let err: StrataError = TransformError::Serialization {
        reason: "bad".into(),
    }
    .into();
    assert!(matches!(err, StrataError::TransformError(_)));
}

// --- Classification ---

#[test]
fn timeouts_and_unavailable_workers_are_resource_errors() {
    let timeout: StrataError = HostError::Timeout {
        task: "optimize".into(),
        timeout_ms: 1,
    }
    .into();
    let unavailable: StrataError = HostError::WorkerUnavailable {
        reason: "shut down".into(),
    }
    .into();
    let unknown: StrataError = HostError::UnknownTask { kind: "x".into() }.into();

    assert!(timeout.is_resource_error());
    assert!(unavailable.is_resource_error());
    assert!(!unknown.is_resource_error());
}

#[test]
fn optimization_in_progress_names_population() {
    let err = StrataError::OptimizationInProgress {
        population: "persona-7".into(),
    };
    assert!(err.to_string().contains("persona-7"));
    assert!(!err.is_resource_error());
}
