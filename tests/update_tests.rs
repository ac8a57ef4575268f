use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use keypluck::extract::{Field, StatusLevel};
use keypluck::input::InputOrigin;
use keypluck::tea::{update, Command, Message, Model};
use std::path::PathBuf;
use std::time::{Duration, Instant};

fn key(code: KeyCode) -> Message {
    Message::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn ctrl(c: char) -> Message {
    Message::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
}

fn type_text(mut model: Model, text: &str) -> Model {
    for c in text.chars() {
        model = update(model, key(KeyCode::Char(c))).model;
    }
    model
}

fn status_text(model: &Model) -> &str {
    model.status.as_ref().map(|s| s.text.as_str()).unwrap_or("")
}

#[test]
fn test_typed_json_is_extracted_on_ctrl_r() {
    let model = type_text(Model::default(), r#"{"private_key": "test-private-key-123"}"#);
    let result = update(model, ctrl('r'));

    assert!(result.commands.is_empty());
    assert_eq!(result.model.value(Field::PrivateKey), Some("test-private-key-123"));
    assert!(status_text(&result.model).contains("Private Key extracted successfully!"));
}

#[test]
fn test_nested_structure_message() {
    let mut model = Model::default();
    model = update(
        model,
        Message::Paste(r#"{"metadata": {"credentials": {"private_key": "nested-private-key-456"}}}"#.to_string()),
    )
    .model;
    let model = update(model, ctrl('r')).model;

    assert_eq!(model.value(Field::PrivateKey), Some("nested-private-key-456"));
    assert!(status_text(&model).contains("Private Key extracted from nested structure!"));
}

#[test]
fn test_invalid_json_reports_parse_error_and_clears_results() {
    let model = update(Model::default(), Message::Paste(r#"{"private_key": "x"}"#.to_string())).model;
    let model = update(model, ctrl('r')).model;
    assert!(model.extraction.is_some());

    let model = update(model, ctrl('u')).model;
    let model = type_text(model, "{ invalid json }");
    let model = update(model, ctrl('r')).model;

    assert!(model.extraction.is_none());
    let status = model.status.as_ref().unwrap();
    assert_eq!(status.level, StatusLevel::Error);
    assert!(status.text.starts_with("Parse error"));
}

#[test]
fn test_missing_field_message() {
    let model = type_text(Model::default(), r#"{"hello": "world"}"#);
    let model = update(model, ctrl('r')).model;
    assert!(status_text(&model).contains("Could not find \"private_key\""));
}

#[test]
fn test_empty_input_warns() {
    let model = update(type_text(Model::default(), "   "), ctrl('r')).model;
    let status = model.status.as_ref().unwrap();
    assert_eq!(status.level, StatusLevel::Warning);
    assert_eq!(status.text, "Please enter JSON content first");
}

#[test]
fn test_copy_requires_an_extraction() {
    let result = update(Model::default(), ctrl('k'));
    assert!(result.commands.is_empty());
    assert_eq!(result.model.status.as_ref().unwrap().level, StatusLevel::Warning);
}

#[test]
fn test_copy_emits_command_and_badge_expires() {
    let model = update(
        Model::default(),
        Message::Loaded {
            origin: InputOrigin::Example("bundled".to_string()),
            content: r#"{"private_key": "pk", "client_email": "svc@p.iam.gserviceaccount.com"}"#.to_string(),
        },
    )
    .model;

    let result = update(model, ctrl('l'));
    assert_eq!(
        result.commands,
        vec![Command::Copy {
            field: Field::ClientEmail,
            text: "svc@p.iam.gserviceaccount.com".to_string()
        }]
    );

    let at = Instant::now();
    let model = update(result.model, Message::Copied { field: Field::ClientEmail, at }).model;
    assert!(model.is_copied(Field::ClientEmail));
    assert!(!model.is_copied(Field::PrivateKey));

    let model = update(model, Message::Tick(at + Duration::from_millis(500))).model;
    assert!(model.is_copied(Field::ClientEmail));

    let model = update(model, Message::Tick(at + Duration::from_secs(2))).model;
    assert!(!model.is_copied(Field::ClientEmail));
}

#[test]
fn test_copy_failure_message() {
    let model = update(
        Model::default(),
        Message::CopyFailed { field: Field::PrivateKey, error: "Clipboard not available".to_string() },
    )
    .model;
    assert!(status_text(&model).starts_with("Could not copy, select and copy manually"));
}

#[test]
fn test_dropped_file_requests_load() {
    let path = PathBuf::from("/tmp/key.json");
    let result = update(Model::default(), Message::FileDropped(path.clone()));
    assert!(result.model.loading);
    assert_eq!(
        result.commands,
        vec![Command::LoadFile { path: path.clone(), origin: InputOrigin::Dropped(path) }]
    );
}

#[test]
fn test_loaded_content_replaces_input_and_processes() {
    let model = type_text(Model::default(), "junk");
    let model = update(
        model,
        Message::Loaded {
            origin: InputOrigin::File(PathBuf::from("key.json")),
            content: r#"{"client_email": "a@b.c"}"#.to_string(),
        },
    )
    .model;

    assert_eq!(model.input.text(), r#"{"client_email": "a@b.c"}"#);
    assert_eq!(model.value(Field::ClientEmail), Some("a@b.c"));
    assert_eq!(model.status.as_ref().unwrap().level, StatusLevel::Warning);
}

#[test]
fn test_example_and_open_path_commands() {
    let result = update(Model::default(), ctrl('e'));
    assert_eq!(result.commands, vec![Command::LoadExample]);

    let result = update(Model::default(), ctrl('o'));
    assert!(result.commands.is_empty());

    let model = type_text(Model::default(), "~/keys/sa.json");
    let result = update(model, ctrl('o'));
    assert_eq!(result.commands, vec![Command::OpenPath("~/keys/sa.json".to_string())]);
}

#[test]
fn test_load_failure_is_shown() {
    let model = update(Model::default(), ctrl('e')).model;
    let model = update(
        model,
        Message::LoadFailed {
            origin: InputOrigin::Example("https://example.com/x.json".to_string()),
            error: "Could not load example: HTTP 404 Not Found".to_string(),
        },
    )
    .model;
    assert!(!model.loading);
    assert_eq!(status_text(&model), "Could not load example: HTTP 404 Not Found");
}

#[test]
fn test_quit_keys_and_release_events() {
    assert!(update(Model::default(), key(KeyCode::Esc)).model.should_quit);
    assert!(update(Model::default(), ctrl('c')).model.should_quit);

    let mut release = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
    release.kind = KeyEventKind::Release;
    let model = update(Model::default(), Message::Key(release)).model;
    assert!(model.input.is_empty());
}

#[test]
fn test_editing_keys() {
    let model = type_text(Model::default(), "ab");
    let model = update(model, key(KeyCode::Enter)).model;
    let model = update(model, key(KeyCode::Char('c'))).model;
    let model = update(model, key(KeyCode::Backspace)).model;
    assert_eq!(model.input.text(), "ab\n");
}

#[test]
fn test_new_document_clears_stale_copied_badge() {
    let loaded = |model: Model, content: &str| {
        update(
            model,
            Message::Loaded { origin: InputOrigin::Typed, content: content.to_string() },
        )
        .model
    };

    let model = loaded(Model::default(), r#"{"private_key": "first"}"#);
    let model = update(model, Message::Copied { field: Field::PrivateKey, at: Instant::now() }).model;
    assert!(model.is_copied(Field::PrivateKey));

    let model = loaded(model, r#"{"private_key": "first", "client_email": "a@b.c"}"#);
    assert!(model.is_copied(Field::PrivateKey));

    let model = loaded(model, r#"{"private_key": "second"}"#);
    assert!(!model.is_copied(Field::PrivateKey));
    assert_eq!(model.value(Field::PrivateKey), Some("second"));
}
