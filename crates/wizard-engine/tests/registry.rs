use wizard_engine::{
    AnswerValue, RegistryError, StepDefinition, StepKind, StepRegistry, ValidationCode,
    validate_answer,
};

fn fixture(name: &str) -> &'static str {
    match name {
        "custom_steps" => include_str!("../tests/fixtures/custom_steps.json"),
        "duplicate_steps" => include_str!("../tests/fixtures/duplicate_steps.json"),
        _ => panic!("unknown fixture {}", name),
    }
}

#[test]
fn loads_every_kind_from_json() {
    let registry = StepRegistry::from_json(fixture("custom_steps")).expect("registry");
    let kinds: Vec<_> = registry.steps().iter().map(|step| step.kind.label()).collect();
    assert_eq!(kinds, ["text", "email", "multi", "choice", "textarea"]);
    assert_eq!(
        registry.find("handle").map(|step| &step.kind),
        Some(&StepKind::Text { min_len: 3 })
    );
    assert_eq!(registry.find("handle").map(|step| step.hint.as_str()), Some("Shown on your profile"));
}

#[test]
fn duplicate_ids_are_rejected_on_load() {
    let err = StepRegistry::from_json(fixture("duplicate_steps")).unwrap_err();
    assert!(matches!(err, RegistryError::DuplicateId(ref id) if id == "a"));
    assert_eq!(err.to_string(), "duplicate step id 'a'");
}

#[test]
fn unknown_kind_is_a_parse_error() {
    let err = StepRegistry::from_json(r#"[{"id":"x","title":"X","prompt":"?","type":"slider"}]"#)
        .unwrap_err();
    assert!(matches!(err, RegistryError::Parse(_)));
}

#[test]
fn serialized_steps_keep_the_type_tag() {
    let registry = StepRegistry::from_json(fixture("custom_steps")).expect("registry");
    let value = serde_json::to_value(registry.steps()).expect("serialize");
    assert_eq!(value[2]["type"], "multi");
    assert_eq!(value[2]["options"][0], "Rust");
    assert!(value[1].get("placeholder").is_none());
}

#[test]
fn custom_rules_apply_to_any_kind() {
    fn company_domain(value: &AnswerValue) -> Result<(), String> {
        match value.as_text() {
            Some(text) if text.ends_with("@example.com") => Ok(()),
            _ => Err("use your example.com address".into()),
        }
    }

    let step = StepDefinition::new("work_email", "Work email", StepKind::Email)
        .with_validator(company_domain);
    assert_eq!(
        validate_answer(&step, &"me@other.org".into()).unwrap_err().code,
        ValidationCode::Custom
    );
    assert_eq!(
        validate_answer(&step, &"nope".into()).unwrap_err().code,
        ValidationCode::EmailFormat
    );
    assert!(validate_answer(&step, &"me@example.com".into()).is_ok());
}
