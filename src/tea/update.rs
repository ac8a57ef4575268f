/// Update function for the interactive mode
///
/// Handles every message and returns the updated model with any commands to
/// execute. No I/O happens here.

use crate::extract::{Field, Status};
use crate::input::InputOrigin;
use crate::tea::model::CopiedBadge;
use crate::tea::{Command, Message, Model, UpdateResult};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

pub fn update(model: Model, message: Message) -> UpdateResult<Model> {
    match message {
        Message::Key(key) => update_key(model, key),
        Message::Paste(text) => {
            let mut model = model;
            model.input.insert_str(&text);
            model.origin = InputOrigin::Typed;
            UpdateResult::just_model(model)
        }
        Message::FileDropped(path) => {
            let mut model = model;
            model.loading = true;
            model.status = Some(Status::info(format!("Loading {}...", path.display())));
            let origin = InputOrigin::Dropped(path.clone());
            UpdateResult::with_command(model, Command::LoadFile { path, origin })
        }
        Message::Tick(now) => {
            let mut model = model;
            if let Some(badge) = model.copied {
                if now.saturating_duration_since(badge.at) >= model.badge_duration {
                    model.copied = None;
                }
            }
            UpdateResult::just_model(model)
        }
        Message::Loaded { origin, content } => {
            let mut model = model;
            tracing::info!("Loaded {} bytes from {}", content.len(), origin);
            model.loading = false;
            model.input.set_text(content);
            model.origin = origin;
            UpdateResult::just_model(process(model))
        }
        Message::LoadFailed { origin, error } => {
            let mut model = model;
            tracing::warn!("Loading {} failed: {}", origin, error);
            model.loading = false;
            model.status = Some(Status::error(error));
            UpdateResult::just_model(model)
        }
        Message::Copied { field, at } => {
            let mut model = model;
            model.copied = Some(CopiedBadge { field, at });
            model.status = Some(Status::success(format!("Copied {} to clipboard", field.label())));
            UpdateResult::just_model(model)
        }
        Message::CopyFailed { field, error } => {
            let mut model = model;
            tracing::warn!("Copying {} failed: {}", field, error);
            model.copied = None;
            model.status = Some(Status::error(format!(
                "Could not copy, select and copy manually ({})",
                error
            )));
            UpdateResult::just_model(model)
        }
    }
}

fn update_key(mut model: Model, key: KeyEvent) -> UpdateResult<Model> {
    if key.kind == KeyEventKind::Release {
        return UpdateResult::just_model(model);
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => {
                model.should_quit = true;
                UpdateResult::just_model(model)
            }
            KeyCode::Char('r') => UpdateResult::just_model(process(model)),
            KeyCode::Char('e') => {
                model.loading = true;
                model.status = Some(Status::info("Loading example..."));
                UpdateResult::with_command(model, Command::LoadExample)
            }
            KeyCode::Char('o') => open_typed_path(model),
            KeyCode::Char('k') => copy_field(model, Field::PrivateKey),
            KeyCode::Char('l') => copy_field(model, Field::ClientEmail),
            KeyCode::Char('u') => {
                model.input.clear();
                model.origin = InputOrigin::Typed;
                model.extraction = None;
                model.copied = None;
                model.status = None;
                UpdateResult::just_model(model)
            }
            KeyCode::Char('v') => UpdateResult::with_command(model, Command::PasteClipboard),
            _ => UpdateResult::just_model(model),
        };
    }

    match key.code {
        KeyCode::Esc => model.should_quit = true,
        KeyCode::Enter => model.input.insert_char('\n'),
        KeyCode::Tab => model.input.insert_str("  "),
        KeyCode::Backspace => model.input.backspace(),
        KeyCode::Delete => model.input.delete(),
        KeyCode::Left => model.input.move_left(),
        KeyCode::Right => model.input.move_right(),
        KeyCode::Home => model.input.move_home(),
        KeyCode::End => model.input.move_end(),
        KeyCode::Char(c) => {
            model.input.insert_char(c);
            model.origin = InputOrigin::Typed;
        }
        _ => {}
    }
    UpdateResult::just_model(model)
}

/// Run the extractor over the input pane and record the outcome.
fn process(mut model: Model) -> Model {
    match model.extractor.extract(model.input.text()) {
        Ok(extraction) => {
            tracing::info!(
                "Extracted {} field(s) from {}, {} missing",
                extraction.matches.len(),
                model.origin,
                extraction.missing.len()
            );
            if let Some(badge) = model.copied {
                let before = model.value(badge.field).map(str::to_owned);
                let after = extraction.get(badge.field).map(|m| m.value.as_str());
                if before.as_deref() != after {
                    model.copied = None;
                }
            }
            model.status = Some(extraction.status());
            model.extraction = Some(extraction);
        }
        Err(err) => {
            tracing::info!("Extraction from {} failed: {}", model.origin, err);
            model.status = Some(err.status());
            model.extraction = None;
            model.copied = None;
        }
    }
    model
}

fn copy_field(mut model: Model, field: Field) -> UpdateResult<Model> {
    match model.value(field).map(str::to_owned) {
        Some(text) => UpdateResult::with_command(model, Command::Copy { field, text }),
        None => {
            model.status = Some(Status::warning(format!(
                "Nothing to copy: no \"{}\" extracted yet",
                field.key()
            )));
            UpdateResult::just_model(model)
        }
    }
}

fn open_typed_path(mut model: Model) -> UpdateResult<Model> {
    let typed = model.input.text().trim().to_string();
    if typed.is_empty() {
        model.status = Some(Status::warning("Type a file path first, then press Ctrl+O"));
        return UpdateResult::just_model(model);
    }
    model.loading = true;
    model.status = Some(Status::info(format!("Opening {}...", typed)));
    UpdateResult::with_command(model, Command::OpenPath(typed))
}
