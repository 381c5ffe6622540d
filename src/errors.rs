use std::io;
use thiserror::Error;

/// Comprehensive error type for shell operations
#[derive(Error, Debug)]
pub enum ShellError {
    #[error("{0}: command not found")]
    CommandNotFound(String),

    #[error("myshell: syntax error: unterminated quote")]
    UnterminatedQuote,

    #[error("myshell: syntax error: {0}")]
    Syntax(String),

    #[error("myshell: {0}")]
    Redirection(String),

    #[error("myshell: {0}")]
    Execution(String),

    #[error("{0}")]
    Builtin(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Input error: {0}")]
    Input(String),

    #[error("Interrupted")]
    Interrupted,
}

impl ShellError {
    /// Exit status a diagnosed error maps to (lex/syntax errors are 2,
    /// lookup failures 127, everything else 1).
    pub fn status(&self) -> i32 {
        match self {
            ShellError::UnterminatedQuote | ShellError::Syntax(_) => 2,
            ShellError::CommandNotFound(_) => 127,
            _ => 1,
        }
    }
}

pub type ShellResult<T> = Result<T, ShellError>;
