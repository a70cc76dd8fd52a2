use pretty_assertions::assert_eq;

use wizard_engine::{
    AnswerStore, AnswerValue, InputType, SidebarState, StepRegistry, Transition, Widget, Wizard,
    WizardConfig, build_step_view, render_json_ui, render_progress, render_sidebar,
    render_sidebar_text, render_text,
};

fn fixture(name: &str) -> &'static str {
    match name {
        "custom_steps" => include_str!("../tests/fixtures/custom_steps.json"),
        _ => panic!("unknown fixture {}", name),
    }
}

fn registry() -> StepRegistry {
    StepRegistry::from_json(fixture("custom_steps")).expect("registry")
}

fn settle(wizard: &Wizard, transition: Transition) -> Transition {
    match transition.prompt_ticket() {
        Some(ticket) => wizard.deliver_prompt(transition.state, ticket),
        None => transition,
    }
}

#[test]
fn text_step_renders_focused_input_with_placeholder() {
    let registry = registry();
    let view = build_step_view(
        &registry,
        &WizardConfig::default(),
        0,
        &AnswerStore::new(),
        None,
        None,
    )
    .expect("view");

    assert_eq!(view.kind, "text");
    assert_eq!(
        view.widget,
        Widget::TextInput {
            input_type: InputType::Text,
            multiline: false,
            placeholder: Some("rustacean".into()),
            value: None,
            autofocus: true,
            submit_label: "送信".into(),
        }
    );
    assert!(!view.can_go_back);
    assert_eq!(view.progress.label(), "1 / 5");
    assert_eq!(view.progress.percent, 0.0);
}

#[test]
fn revisited_steps_are_prefilled() {
    let registry = registry();
    let config = WizardConfig::default();
    let mut answers = AnswerStore::new();
    answers.insert("contact", "me@example.com".into());
    answers.insert("stack", AnswerValue::Selection(vec!["Zig".into()]));

    let email = build_step_view(&registry, &config, 1, &answers, None, None).expect("view");
    match email.widget {
        Widget::TextInput {
            input_type, value, ..
        } => {
            assert_eq!(input_type, InputType::Email);
            assert_eq!(value.as_deref(), Some("me@example.com"));
        }
        other => panic!("unexpected widget {:?}", other),
    }

    let stack = build_step_view(&registry, &config, 2, &answers, None, None).expect("view");
    match &stack.widget {
        Widget::MultiSelect {
            options,
            confirm_label,
        } => {
            let flags: Vec<_> = options.iter().map(|option| option.selected).collect();
            assert_eq!(flags, [false, false, true]);
            assert_eq!(confirm_label, "選択を確定");
        }
        other => panic!("unexpected widget {:?}", other),
    }
}

#[test]
fn progress_and_sidebar_track_the_current_index() {
    let registry = registry();
    let progress = render_progress(&registry, 2);
    assert_eq!(progress.label(), "3 / 5");
    assert_eq!(progress.percent, 40.0);

    let done = render_progress(&registry, 5);
    assert_eq!(done.label(), "5 / 5");
    assert_eq!(done.percent, 100.0);

    let states: Vec<_> = render_sidebar(&registry, 2)
        .into_iter()
        .map(|entry| entry.state)
        .collect();
    assert_eq!(
        states,
        [
            SidebarState::Completed,
            SidebarState::Completed,
            SidebarState::Active,
            SidebarState::Pending,
            SidebarState::Pending,
        ]
    );
    let text = render_sidebar_text(&render_sidebar(&registry, 5));
    assert!(text.lines().all(|line| line.starts_with('✓')));
}

#[test]
fn json_ui_exposes_widget_structure() {
    let registry = registry();
    let view = build_step_view(
        &registry,
        &WizardConfig::default(),
        3,
        &AnswerStore::new(),
        None,
        Some("choose one of the listed options"),
    )
    .expect("view");

    let ui = render_json_ui(&view);
    assert_eq!(ui["step_id"], "pace");
    assert_eq!(ui["type"], "choice");
    assert_eq!(ui["widget"]["kind"], "quick_replies");
    assert_eq!(ui["widget"]["options"][1], "fast");
    assert_eq!(ui["error"], "choose one of the listed options");
    assert_eq!(ui["progress"]["label"], "4 / 5");
    assert_eq!(ui["sidebar"][3]["state"], "active");
    assert_eq!(ui["can_go_back"], true);
}

#[test]
fn text_render_lists_numbered_options_and_error() {
    let registry = registry();
    let view = build_step_view(
        &registry,
        &WizardConfig::default(),
        2,
        &AnswerStore::new(),
        Some(&["Go".to_string()][..]),
        Some("select at least one option"),
    )
    .expect("view");

    let text = render_text(&view);
    assert!(text.starts_with("[3 / 5] Stack"));
    assert!(text.contains("[ ] 1. Rust"));
    assert!(text.contains("[x] 2. Go"));
    assert!(text.contains("! select at least one option"));
}

#[test]
fn custom_registry_drives_the_wizard() {
    let wizard = Wizard::new(registry(), WizardConfig::default().without_pacing());
    let t = settle(&wizard, wizard.start());

    let t = wizard.submit(t.state, "ab");
    assert_eq!(
        t.inline_error().map(|error| error.message.as_str()),
        Some("enter at least 3 characters")
    );

    let t = settle(&wizard, wizard.submit(t.state, "ferris"));
    let t = settle(&wizard, wizard.submit(t.state, "ferris@rust-lang.org"));
    let t = wizard.toggle(t.state, "Rust");
    let view = wizard.render(&t.state).expect("live view");
    assert_eq!(view.step_id, "stack");
    let t = settle(&wizard, wizard.confirm_multi(t.state));
    let t = settle(&wizard, wizard.select(t.state, "fast"));
    let t = wizard.submit(t.state, "");

    let summary = t.summary().expect("summary");
    assert_eq!(
        summary.export_text(),
        "SmartLaunch Co-Founder 診断サマリー\nHandle: ferris\nContact: ferris@rust-lang.org\nStack: Rust\nPace: fast\nNotes: 未入力"
    );
    assert!(wizard.render(&t.state).is_none());
}
