//! End-to-end designer scenarios through the public API.

use std::sync::Arc;

use formforge_designer::{
    submission, DesignerDocument, DesignerError, Form, FormStatus, SchemaPayload,
    SubmissionValues,
};
use formforge_fields::{
    ChoiceConfig, FieldConfig, FieldRegistry, FieldTypeTag, FieldsError, TextConfig,
};
use rstest::rstest;

fn registry() -> Arc<FieldRegistry> {
    Arc::new(FieldRegistry::builtin())
}

/// `[TextField#A(required), CheckboxField#B(required)]`
fn consent_form() -> DesignerDocument {
    let payload = SchemaPayload::from_json(
        r#"{
            "schema_version": 1,
            "value_encoding": {"version": 1, "choice_delimiter": ","},
            "fields": [
                {"id": "A", "type": "TextField",
                 "configuration": {"label": "Name", "required": true}},
                {"id": "B", "type": "CheckboxField",
                 "configuration": {"label": "I agree", "required": true}}
            ]
        }"#,
    )
    .unwrap();
    DesignerDocument::deserialize(registry(), payload).unwrap()
}

#[rstest]
#[case("", "false", false, false)]
#[case("hello", "true", true, true)]
#[case("hello", "false", true, false)]
#[case("  ", "true", false, true)]
fn required_text_and_checkbox(
    #[case] a: &str,
    #[case] b: &str,
    #[case] a_valid: bool,
    #[case] b_valid: bool,
) {
    let doc = consent_form();
    let values = SubmissionValues::new().with("A", a).with("B", b);
    let report = submission::validate(&doc, &values);
    assert_eq!(report.is_valid("A"), Some(a_valid));
    assert_eq!(report.is_valid("B"), Some(b_valid));
    assert_eq!(report.all_valid, a_valid && b_valid);
}

#[test]
fn missing_keys_fail_required_fields() {
    let report = submission::validate(&consent_form(), &SubmissionValues::new());
    assert_eq!(report.invalid_fields().count(), 2);
    assert!(!report.all_valid);
}

#[test]
fn move_within_three_fields() {
    let payload = SchemaPayload::from_json(
        r#"{"schema_version": 1, "fields": [
            {"id": "A", "type": "TextField"},
            {"id": "B", "type": "EmailField"},
            {"id": "C", "type": "DateField"}
        ]}"#,
    )
    .unwrap();
    let doc = DesignerDocument::deserialize(registry(), payload).unwrap();

    let moved = doc.move_to("B", 0).unwrap();
    let order: Vec<_> = moved.instances().iter().map(|i| i.id().as_str()).collect();
    assert_eq!(order, vec!["B", "A", "C"]);

    assert!(matches!(
        doc.move_to("B", 5),
        Err(DesignerError::InvalidIndex { index: 5, len: 3 })
    ));
}

#[rstest]
#[case("", false)]
#[case("Option 1", true)]
fn checkbox_with_options(#[case] value: &str, #[case] expected: bool) {
    let doc = DesignerDocument::with_registry(registry());
    let (doc, id) = doc.insert(FieldTypeTag::Checkbox, None).unwrap();
    let doc = doc
        .update_configuration(
            id.as_str(),
            FieldConfig::Checkbox(ChoiceConfig {
                label: "Pick".into(),
                helper_text: String::new(),
                required: true,
                options: vec!["Option 1".into(), "Option 2".into()],
            }),
        )
        .unwrap();
    let report = submission::validate(&doc, &SubmissionValues::new().with(id.as_str(), value));
    assert_eq!(report.all_valid, expected);
}

#[test]
fn unknown_type_aborts_whole_load() {
    let payload = SchemaPayload::from_yaml(
        "schema_version: 1\nfields:\n  - id: A\n    type: TextField\n  - id: R\n    type: RatingField\n",
    )
    .unwrap();
    let err = DesignerDocument::deserialize(registry(), payload).unwrap_err();
    assert!(matches!(
        err,
        DesignerError::Field(FieldsError::UnknownFieldType { .. })
    ));
}

#[test]
fn missing_attributes_fall_back_to_defaults() {
    let payload = SchemaPayload::from_json(
        r#"{"schema_version": 1, "fields": [
            {"id": "T", "type": "TextAreaField", "configuration": {"label": "Notes"}}
        ]}"#,
    )
    .unwrap();
    let doc = DesignerDocument::deserialize(registry(), payload).unwrap();
    match doc.get("T").unwrap().configuration() {
        FieldConfig::TextArea(c) => {
            assert_eq!(c.label, "Notes");
            assert_eq!(c.rows, 3);
            assert!(!c.required);
        }
        other => panic!("unexpected configuration {other:?}"),
    }
}

#[test]
fn invalid_persisted_configuration_aborts_load() {
    let payload = SchemaPayload::from_json(
        r#"{"schema_version": 1, "fields": [
            {"id": "S", "type": "SpacerField", "configuration": {"height": 1000}}
        ]}"#,
    )
    .unwrap();
    let err = DesignerDocument::deserialize(registry(), payload).unwrap_err();
    assert_eq!(err.issues()[0].attribute, "height");
}

#[test]
fn full_lifecycle() {
    let mut form = Form::new("Feedback", registry());
    let name = form
        .edit_returning(|d| d.insert(FieldTypeTag::Text, None))
        .unwrap();
    form.edit(|d| {
        d.update_configuration(
            name.as_str(),
            FieldConfig::Text(TextConfig {
                label: "Your name".into(),
                placeholder: String::new(),
                helper_text: String::new(),
                required: true,
            }),
        )
    })
    .unwrap();
    form.edit_returning(|d| d.insert(FieldTypeTag::Paragraph, Some(0)))
        .unwrap();

    let schema = form.publish().unwrap();
    assert_eq!(form.status(), FormStatus::Published);

    let columns = schema.columns();
    assert_eq!(columns.len(), 1);
    assert_eq!(columns[0].label, "Your name");

    let ok = SubmissionValues::new().with(name.as_str(), "Ada");
    assert!(form.validate_submission(&ok).unwrap().all_valid);
    let missing = SubmissionValues::new();
    assert!(!form.validate_submission(&missing).unwrap().all_valid);

    form.archive().unwrap();
    assert!(form.validate_submission(&ok).is_err());
}

#[test]
fn published_schema_validates_across_threads() {
    let mut form = Form::new("Shared", registry());
    let id = form
        .edit_returning(|d| d.insert(FieldTypeTag::Number, None))
        .unwrap();
    let schema = form.publish().unwrap();

    let handles: Vec<_> = (0..4)
        .map(|n| {
            let schema = schema.clone();
            let id = id.clone();
            std::thread::spawn(move || {
                let values = SubmissionValues::new().with(id.as_str(), n.to_string());
                schema.validate(&values).all_valid
            })
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap());
    }
}
