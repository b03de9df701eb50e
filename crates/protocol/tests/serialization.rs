use sky_protocol::*;

#[test]
fn test_search_params_deserialization() {
    let json_str = r#"
{
  "origin": "SFO",
  "destination": "NRT",
  "depart_date": "2026-10-01",
  "return_date": "2026-10-15",
  "cabin_class": "premium_economy",
  "passengers": 2
}
"#;

    let params: SearchParams = serde_json::from_str(json_str).expect("Failed to deserialize SearchParams");

    assert_eq!(params.origin, "SFO");
    assert_eq!(params.destination, "NRT");
    assert_eq!(params.cabin_class, CabinClass::PremiumEconomy);
    assert_eq!(params.passengers, 2);
    assert!(params.return_date.is_some());
}

#[test]
fn test_search_params_defaults() {
    // Optional fields may be omitted entirely on the wire
    let json_str = r#"
{
  "origin": "LAX",
  "destination": "HND",
  "depart_date": "2026-11-03"
}
"#;

    let params: SearchParams = serde_json::from_str(json_str).expect("Failed to deserialize SearchParams");

    assert_eq!(params.return_date, None);
    assert_eq!(params.cabin_class, CabinClass::Economy);
    assert_eq!(params.passengers, 1);
}

#[test]
fn test_task_status_serialization() {
    let status = TaskStatus::TimedOut;
    let json = serde_json::to_value(status).expect("Failed to serialize TaskStatus");

    assert_eq!(json, "TIMED_OUT");

    let deserialized: TaskStatus = serde_json::from_value(json).expect("Failed to deserialize TaskStatus");
    assert_eq!(deserialized, TaskStatus::TimedOut);
}

#[test]
fn test_task_status_classification() {
    assert!(TaskStatus::Completed.is_terminal());
    assert!(TaskStatus::Cancelled.is_terminal());
    assert!(!TaskStatus::Processing.is_terminal());
    assert!(TaskStatus::Submitting.is_active());
    assert!(!TaskStatus::Idle.is_active());
    assert!(!TaskStatus::Idle.is_terminal());
}

#[test]
fn test_backend_status_deserialization() {
    let status: BackendStatus =
        serde_json::from_value(serde_json::json!("PROCESSING")).expect("Failed to deserialize BackendStatus");
    assert_eq!(status, BackendStatus::Processing);
}

#[test]
fn test_submit_response_envelope() {
    // Shape as returned by the real backend
    let json_str = r#"{"success": true, "data": {"task_id": "abc"}}"#;
    let response: SubmitResponse = serde_json::from_str(json_str).expect("Failed to deserialize SubmitResponse");

    assert!(response.success);
    assert_eq!(response.data.map(|d| d.task_id), Some("abc".to_string()));

    let rejected = SubmitResponse::rejected("invalid airport code");
    let json = serde_json::to_string(&rejected).expect("Failed to serialize SubmitResponse");
    let roundtrip: SubmitResponse = serde_json::from_str(&json).expect("Failed to deserialize SubmitResponse");
    assert!(!roundtrip.success);
    assert!(roundtrip.data.is_none());
    assert_eq!(roundtrip.message, Some("invalid airport code".to_string()));
}

#[test]
fn test_status_response_with_partial_fields() {
    // progress/message/error are all optional in the status payload
    let json_str = r#"{"success": true, "data": {"status": "PENDING"}}"#;
    let response: StatusResponse = serde_json::from_str(json_str).expect("Failed to deserialize StatusResponse");

    let data = response.data.expect("Status data missing");
    assert_eq!(data.status, BackendStatus::Pending);
    assert_eq!(data.progress, None);
    assert_eq!(data.message, None);
    assert_eq!(data.error, None);
}

#[test]
fn test_search_task_serialization() {
    let task = SearchTask {
        task_id: Some("abc".to_string()),
        status: TaskStatus::Processing,
        progress: 40,
        message: "Scanning fare classes".to_string(),
        result: None,
        error: None,
        started_at: None,
    };

    let json = serde_json::to_value(&task).expect("Failed to serialize SearchTask");
    assert_eq!(json["status"], "PROCESSING");
    assert_eq!(json["progress"], 40);

    let deserialized: SearchTask = serde_json::from_value(json).expect("Failed to deserialize SearchTask");
    assert_eq!(deserialized.task_id, Some("abc".to_string()));
    assert_eq!(deserialized.status, TaskStatus::Processing);
}

#[test]
fn test_search_task_default_is_idle() {
    let task = SearchTask::default();
    assert_eq!(task.status, TaskStatus::Idle);
    assert!(task.task_id.is_none());
    assert!(task.result.is_none());
    assert!(task.error.is_none());
}

#[test]
fn test_event_tagged_serialization() {
    let event = Event::TaskStatusUpdate {
        task_id: "abc".to_string(),
        status: TaskStatus::Processing,
        progress: 40,
        message: "Optimizing connections".to_string(),
    };

    let json = serde_json::to_value(&event).expect("Failed to serialize Event");

    assert_eq!(json["type"], "taskStatusUpdate");
    assert_eq!(json["payload"]["task_id"], "abc");
    assert_eq!(json["payload"]["status"], "PROCESSING");

    let deserialized: Event = serde_json::from_value(json).expect("Failed to deserialize Event");
    assert!(matches!(deserialized, Event::TaskStatusUpdate { progress: 40, .. }));
}

#[test]
fn test_terminal_events_stay_distinct() {
    let timed_out = Event::TaskTimedOut {
        task_id: "abc".to_string(),
        error: "search timed out".to_string(),
    };
    let failed = Event::TaskFailed {
        task_id: "abc".to_string(),
        error: "no availability".to_string(),
    };

    let timed_out_json = serde_json::to_value(&timed_out).expect("Failed to serialize Event");
    let failed_json = serde_json::to_value(&failed).expect("Failed to serialize Event");

    assert_eq!(timed_out_json["type"], "taskTimedOut");
    assert_eq!(failed_json["type"], "taskFailed");
}
