mod bookmark;
mod calc;
mod cd;
mod echo;
mod env_cmd;
mod exit;
mod export;
mod git;
mod history;
mod jump;
mod pwd;
mod timer;
mod type_cmd;
mod unset;

pub use bookmark::BookmarkCommand;
pub use calc::CalcCommand;
pub use cd::CdCommand;
pub use echo::EchoCommand;
pub use env_cmd::EnvCommand;
pub use exit::ExitCommand;
pub use export::ExportCommand;
pub use git::{GitBranchCommand, GitStatusCommand};
pub use history::HistoryCommand;
pub use jump::JumpCommand;
pub use pwd::PwdCommand;
pub use timer::TimerCommand;
pub use type_cmd::TypeCommand;
pub use unset::UnsetCommand;
