use crate::clipboard::ClipboardManager;
use crate::config::Config;
use crate::error::{KeypluckError, KeypluckResult};
use crate::extract::Field;
use crate::input::{self, InputOrigin};
use crate::tea::{update, Command, CommandExecutor, Message, Model};
use crate::ui;
use crossterm::{
    event::{self, DisableBracketedPaste, EnableBracketedPaste, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::collections::VecDeque;
use std::io;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Interactive mode: owns the terminal, the clipboard and the model
pub struct App {
    model: Model,
    clipboard: ClipboardManager,
    executor: CommandExecutor,
    results: mpsc::UnboundedReceiver<Message>,
    in_flight: usize,
}

impl App {
    pub fn new(config: Config) -> KeypluckResult<Self> {
        Self::with_clipboard(config, ClipboardManager::new())
    }

    pub fn with_clipboard(config: Config, clipboard: ClipboardManager) -> KeypluckResult<Self> {
        let (sender, results) = mpsc::unbounded_channel();
        Ok(Self {
            model: Model::new(&config),
            clipboard,
            executor: CommandExecutor::new(sender, &config)?,
            results,
            in_flight: 0,
        })
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Number of background commands that have not reported back yet
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub async fn run(&mut self) -> KeypluckResult<()> {
        if !io::stdout().is_tty() {
            return Err(KeypluckError::terminal(
                "keypluck needs a terminal (TTY) for interactive mode. Use `keypluck extract` in scripts.",
            ));
        }

        enable_raw_mode().map_err(|e| {
            KeypluckError::terminal(format!(
                "Failed to enable raw mode: {}. Make sure you're running in a proper terminal.",
                e
            ))
        })?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)
            .map_err(|e| KeypluckError::terminal(format!("Failed to setup terminal: {}", e)))?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)
            .map_err(|e| KeypluckError::terminal(format!("Failed to create terminal: {}", e)))?;

        let result = self.run_loop(&mut terminal).await;

        disable_raw_mode()
            .map_err(|e| KeypluckError::terminal(format!("Failed to disable raw mode: {}", e)))?;
        execute!(terminal.backend_mut(), DisableBracketedPaste, LeaveAlternateScreen)
            .map_err(|e| KeypluckError::terminal(format!("Failed to restore terminal: {}", e)))?;
        terminal
            .show_cursor()
            .map_err(|e| KeypluckError::terminal(format!("Failed to show cursor: {}", e)))?;

        result
    }

    async fn run_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> KeypluckResult<()> {
        let tick_rate = Duration::from_millis(100);
        let mut last_tick = Instant::now();

        loop {
            terminal.draw(|f| ui::render(f, &self.model))?;

            let timeout = tick_rate
                .checked_sub(last_tick.elapsed())
                .unwrap_or_else(|| Duration::from_secs(0));

            if event::poll(timeout)? {
                let message = match event::read()? {
                    Event::Key(key) => Some(Message::Key(key)),
                    Event::Paste(text) => Some(match input::dropped_path(&text) {
                        Some(path) => Message::FileDropped(path),
                        None => Message::Paste(text),
                    }),
                    _ => None,
                };
                if let Some(message) = message {
                    self.dispatch(message);
                }
            }

            self.drain_results();

            if last_tick.elapsed() >= tick_rate {
                last_tick = Instant::now();
                self.dispatch(Message::Tick(last_tick));
            }

            if self.model.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Feed a message through update and hand off the resulting commands.
    ///
    /// Clipboard commands run inline and their messages are processed before
    /// returning. Loads are spawned; their messages arrive later through
    /// [`App::settle`] or the event loop.
    pub fn dispatch(&mut self, message: Message) {
        let mut queue = VecDeque::from([message]);

        while let Some(message) = queue.pop_front() {
            let model = std::mem::take(&mut self.model);
            let result = update(model, message);
            self.model = result.model;

            for command in result.commands {
                if command.uses_clipboard() {
                    queue.push_back(self.run_clipboard(command));
                } else {
                    self.in_flight += 1;
                    self.executor.spawn(command);
                }
            }
        }
    }

    /// Wait until every spawned command has reported back.
    pub async fn settle(&mut self) {
        while self.in_flight > 0 {
            match self.results.recv().await {
                Some(message) => {
                    self.in_flight -= 1;
                    self.dispatch(message);
                }
                None => break,
            }
        }
    }

    fn drain_results(&mut self) {
        while let Ok(message) = self.results.try_recv() {
            self.in_flight = self.in_flight.saturating_sub(1);
            self.dispatch(message);
        }
    }

    fn run_clipboard(&mut self, command: Command) -> Message {
        match command {
            Command::Copy { field, text } => self.copy(field, &text),
            _ => match self.clipboard.paste() {
                Ok(content) => match input::dropped_path(&content) {
                    Some(path) => Message::FileDropped(path),
                    None => Message::Loaded { origin: InputOrigin::Clipboard, content },
                },
                Err(e) => Message::LoadFailed {
                    origin: InputOrigin::Clipboard,
                    error: e.to_string(),
                },
            },
        }
    }

    fn copy(&mut self, field: Field, text: &str) -> Message {
        match self.clipboard.copy(text) {
            Ok(()) => Message::Copied { field, at: Instant::now() },
            Err(e) => Message::CopyFailed { field, error: e.to_string() },
        }
    }
}
