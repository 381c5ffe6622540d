use crate::errors::ShellResult;
use crate::session::SessionState;
use once_cell::sync::Lazy;

/// Trait that all builtin commands must implement
pub trait BuiltinCommand: Send + Sync {
    /// The command name (e.g., "echo", "cd", "pwd")
    fn name(&self) -> &'static str;

    /// Help text / description for the command
    fn description(&self) -> &'static str;

    /// Execute the command with the given arguments and session state.
    /// args[0] is the command name itself. Returns the exit status; an Err
    /// is printed by the caller and becomes status 1.
    fn execute(&self, args: &[String], session: &mut SessionState) -> ShellResult<i32>;
}

/// Central registry for all builtin commands
pub struct BuiltinRegistry {
    commands: Vec<Box<dyn BuiltinCommand>>,
}

impl BuiltinRegistry {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    pub fn register<C: BuiltinCommand + 'static>(&mut self, cmd: C) {
        self.commands.push(Box::new(cmd));
    }

    /// Check if a command name is a builtin
    pub fn is_builtin(&self, name: &str) -> bool {
        self.commands.iter().any(|c| c.name() == name)
    }

    /// Get all builtin command names (for completion and the type command)
    pub fn builtin_names(&self) -> Vec<&'static str> {
        self.commands.iter().map(|c| c.name()).collect()
    }

    /// Execute a builtin command by name
    pub fn execute(
        &self,
        name: &str,
        args: &[String],
        session: &mut SessionState,
    ) -> Option<ShellResult<i32>> {
        self.commands
            .iter()
            .find(|c| c.name() == name)
            .map(|c| c.execute(args, session))
    }
}

impl Default for BuiltinRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Global registry instance
pub static BUILTINS: Lazy<BuiltinRegistry> = Lazy::new(|| {
    let mut registry = BuiltinRegistry::new();

    // Register all builtins here - SINGLE POINT OF REGISTRATION
    registry.register(super::builtins::EchoCommand);
    registry.register(super::builtins::ExitCommand);
    registry.register(super::builtins::TypeCommand);
    registry.register(super::builtins::PwdCommand);
    registry.register(super::builtins::CdCommand);
    registry.register(super::builtins::ExportCommand);
    registry.register(super::builtins::UnsetCommand);
    registry.register(super::builtins::EnvCommand);
    registry.register(super::builtins::HistoryCommand);
    registry.register(super::builtins::BookmarkCommand);
    registry.register(super::builtins::JumpCommand);
    registry.register(super::builtins::CalcCommand);
    registry.register(super::builtins::GitStatusCommand);
    registry.register(super::builtins::GitBranchCommand);
    registry.register(super::builtins::TimerCommand);

    registry
});
