use lifeline_core::{
    check_document, check_value, ConformanceError, ConformanceIssue, LifeEvent, Track,
    LIFE_EVENT_FIELDS,
};
use serde_json::{json, Value};

fn valid_record() -> Value {
    json!({
        "id": "evt-1",
        "track": "travel",
        "date": "2023-06-15",
        "title": "Trip to Lisbon",
        "text": "Flew out on a sunny morning."
    })
}

#[test]
fn valid_record_conforms() {
    let event = check_value(&valid_record()).unwrap();

    assert_eq!(
        event,
        LifeEvent::new(
            "evt-1",
            Track::Travel,
            "2023-06-15",
            "Trip to Lisbon",
            "Flew out on a sunny morning."
        )
    );
}

#[test]
fn every_track_label_conforms() {
    for label in ["career", "family", "travel"] {
        let mut record = valid_record();
        record["track"] = json!(label);
        assert!(check_value(&record).is_ok(), "track `{label}` should conform");
    }
}

#[test]
fn unknown_track_is_reported_with_its_value() {
    for label in ["hobby", "", "Career"] {
        let mut record = valid_record();
        record["track"] = json!(label);

        let issues = check_value(&record).unwrap_err();
        assert_eq!(
            issues,
            vec![ConformanceIssue::InvalidTrack {
                value: label.to_string()
            }]
        );
    }
}

#[test]
fn dropping_a_field_reports_it_missing() {
    for field in LIFE_EVENT_FIELDS {
        let mut record = valid_record();
        record.as_object_mut().unwrap().remove(field);

        let issues = check_value(&record).unwrap_err();
        assert_eq!(issues, vec![ConformanceIssue::MissingField { field }]);
    }
}

#[test]
fn non_string_fields_and_extra_keys_are_all_reported() {
    let record = json!({
        "id": 42,
        "track": null,
        "date": "2023-06-15",
        "title": ["a"],
        "text": "body",
        "mood": "happy"
    });

    let issues = check_value(&record).unwrap_err();
    assert_eq!(
        issues,
        vec![
            ConformanceIssue::NotAString {
                field: "id",
                found: "number"
            },
            ConformanceIssue::NotAString {
                field: "track",
                found: "null"
            },
            ConformanceIssue::NotAString {
                field: "title",
                found: "array"
            },
            ConformanceIssue::UnknownField {
                field: "mood".to_string()
            },
        ]
    );
}

#[test]
fn impossible_date_still_conforms() {
    let mut record = valid_record();
    record["date"] = json!("2023-13-45");

    let event = check_value(&record).unwrap();
    assert_eq!(event.date, "2023-13-45");
}

#[test]
fn checker_agrees_with_serde() {
    let candidates = [
        valid_record(),
        json!({"id": "a", "track": "family", "date": "", "title": "", "text": ""}),
        json!({"id": "a", "track": "Family", "date": "", "title": "", "text": ""}),
        json!({"id": "a", "track": "family", "date": "", "title": ""}),
        json!({"id": "a", "track": "family", "date": 1, "title": "", "text": ""}),
        json!({"id": "a", "track": "family", "date": "", "title": "", "text": "", "x": 1}),
        json!("evt-1"),
        json!([]),
    ];

    for candidate in candidates {
        let checked = check_value(&candidate).ok();
        let parsed = serde_json::from_value::<LifeEvent>(candidate.clone()).ok();
        assert_eq!(checked, parsed, "disagreement on {candidate}");
    }
}

#[test]
fn single_object_document_is_one_record() {
    let report = check_document(&valid_record().to_string()).unwrap();

    assert_eq!(report.records.len(), 1);
    assert!(report.is_conforming());
    assert_eq!(report.records[0].id.as_deref(), Some("evt-1"));
    assert_eq!(report.events().count(), 1);
}

#[test]
fn array_document_reports_each_record_in_order() {
    let document = json!([
        valid_record(),
        {"id": "evt-2", "track": "hobby", "date": "2024-01-01", "title": "t", "text": "b"},
        {"id": "evt-3", "track": "career", "date": "2024-02-01", "title": "Promotion", "text": "b"},
        7
    ]);

    let report = check_document(&document.to_string()).unwrap();

    assert_eq!(report.records.len(), 4);
    assert!(!report.is_conforming());
    assert_eq!(report.conforming_count(), 2);
    assert_eq!(report.non_conforming_count(), 2);

    let rejected = &report.records[1];
    assert_eq!(rejected.index, 1);
    assert_eq!(rejected.id.as_deref(), Some("evt-2"));
    assert!(rejected.event.is_none());
    assert_eq!(rejected.issues[0].code(), "invalid_track");

    assert_eq!(
        report.records[3].issues,
        vec![ConformanceIssue::NotAnObject { found: "number" }]
    );
    assert_eq!(report.records[3].id, None);

    let ids = report.events().map(|e| e.id.as_str()).collect::<Vec<_>>();
    assert_eq!(ids, vec!["evt-1", "evt-3"]);
}

#[test]
fn same_id_on_two_records_is_not_flagged() {
    let document = json!([valid_record(), valid_record()]);

    let report = check_document(&document.to_string()).unwrap();
    assert!(report.is_conforming());
    assert_eq!(report.conforming_count(), 2);
}

#[test]
fn empty_array_document_conforms() {
    let report = check_document("[]").unwrap();

    assert!(report.records.is_empty());
    assert!(report.is_conforming());
}

#[test]
fn scalar_document_is_one_non_object_record() {
    let report = check_document("\"career\"").unwrap();

    assert_eq!(report.records.len(), 1);
    assert_eq!(
        report.records[0].issues,
        vec![ConformanceIssue::NotAnObject { found: "string" }]
    );
}

#[test]
fn malformed_json_is_an_error() {
    let err = check_document("{\"id\": \"evt-1\",").unwrap_err();
    assert!(matches!(err, ConformanceError::Json(_)));
    assert!(err.to_string().starts_with("document is not valid JSON"));
}

#[test]
fn report_serializes_issue_kinds() {
    let report = check_document(r#"{"id": "evt-9", "track": "hobby"}"#).unwrap();
    let json = serde_json::to_value(&report).unwrap();

    let record = &json["records"][0];
    assert_eq!(record["index"], 0);
    assert_eq!(record["id"], "evt-9");
    assert_eq!(record["event"], Value::Null);
    assert_eq!(record["issues"][0]["kind"], "invalid_track");
    assert_eq!(record["issues"][0]["value"], "hobby");
    assert_eq!(record["issues"][1]["kind"], "missing_field");
    assert_eq!(record["issues"][1]["field"], "date");
}

#[test]
fn repeated_key_is_reported_instead_of_collapsed() {
    let text = r#"{"id": "a", "id": "b", "track": "career", "date": "2024-03-01", "title": "t", "text": "b"}"#;

    let report = check_document(text).unwrap();
    let record = &report.records[0];
    assert!(!report.is_conforming());
    assert!(record.event.is_none());
    assert_eq!(
        record.issues,
        vec![ConformanceIssue::DuplicateField {
            field: "id".to_string()
        }]
    );
    assert_eq!(record.issues[0].code(), "duplicate_field");
    assert_eq!(record.issues[0].to_string(), "duplicate field `id`");

    let err = serde_json::from_str::<LifeEvent>(text).unwrap_err();
    assert!(err.to_string().contains("duplicate field `id`"));
}

#[test]
fn repeated_keys_are_checked_per_record_in_arrays() {
    let text = r#"[
        {"id": "evt-1", "track": "travel", "date": "2023-06-15", "title": "t", "text": "b"},
        {"id": "evt-2", "track": "family", "track": "family", "date": "2023-06-16", "title": "t", "text": "b", "text": "c"}
    ]"#;

    let report = check_document(text).unwrap();
    assert!(report.records[0].is_conforming());
    assert_eq!(
        report.records[1].issues,
        vec![
            ConformanceIssue::DuplicateField {
                field: "track".to_string()
            },
            ConformanceIssue::DuplicateField {
                field: "text".to_string()
            },
        ]
    );
    assert_eq!(report.conforming_count(), 1);
}

#[test]
fn document_check_agrees_with_typed_parse_of_object_text() {
    let texts = [
        r#"{"id": "a", "track": "family", "date": "", "title": "", "text": ""}"#,
        r#"{"id": "a", "track": "family", "date": "", "title": "", "text": "", "id": "a"}"#,
        r#"{"id": "a", "track": "family", "track": "travel", "date": "", "title": "", "text": ""}"#,
        r#"{"id": "a", "track": "Family", "date": "", "title": "", "text": ""}"#,
        r#"{"id": "a", "track": "family", "date": "", "title": ""}"#,
        r#"{"id": "a", "track": "family", "date": "", "title": "", "text": "", "x": 1}"#,
    ];

    for text in texts {
        let checked = check_document(text).unwrap().records[0].event.clone();
        let parsed = serde_json::from_str::<LifeEvent>(text).ok();
        assert_eq!(checked, parsed, "disagreement on {text}");
    }
}
