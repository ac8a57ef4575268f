/// The Elm Architecture (TEA) pattern for the interactive mode
///
/// All mutable UI state lives in the [`Model`]. [`update`] is a pure function
/// from model and message to a new model plus the commands to run; the app
/// loop owns the terminal and the clipboard and executes those commands.

pub mod command;
pub mod message;
pub mod model;
pub mod update;

pub use command::{Command, CommandExecutor};
pub use message::Message;
pub use model::Model;
pub use update::update;

/// Result of processing a TEA update cycle
pub struct UpdateResult<M> {
    pub model: M,
    pub commands: Vec<Command>,
}

impl<M> UpdateResult<M> {
    pub fn new(model: M, commands: Vec<Command>) -> Self {
        Self { model, commands }
    }

    pub fn just_model(model: M) -> Self {
        Self { model, commands: Vec::new() }
    }

    pub fn with_command(model: M, command: Command) -> Self {
        Self { model, commands: vec![command] }
    }
}
