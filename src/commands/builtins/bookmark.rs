use crate::bookmarks;
use crate::commands::registry::BuiltinCommand;
use crate::errors::{ShellError, ShellResult};
use crate::session::SessionState;
use std::env;
use std::path::Path;

pub struct BookmarkCommand;

impl BuiltinCommand for BookmarkCommand {
    fn name(&self) -> &'static str {
        "bookmark"
    }

    fn description(&self) -> &'static str {
        "List directory bookmarks or record one"
    }

    fn execute(&self, args: &[String], session: &mut SessionState) -> ShellResult<i32> {
        if args.len() == 1 {
            for (name, path) in &session.bookmarks {
                println!("{}={}", name, path);
            }
            return Ok(0);
        }

        let name = &args[1];
        if !bookmarks::is_valid_bookmark_name(name) {
            return Err(ShellError::Builtin(format!(
                "bookmark: {}: invalid bookmark name",
                name
            )));
        }

        let path = match args.get(2) {
            Some(given) => {
                let p = Path::new(given);
                if p.is_absolute() {
                    p.to_path_buf()
                } else {
                    env::current_dir()?.join(p)
                }
            }
            None => env::current_dir()?,
        };

        session
            .bookmarks
            .insert(name.clone(), path.to_string_lossy().into_owned());
        bookmarks::save(&session.bookmarks)
            .map_err(|e| ShellError::Builtin(format!("bookmark: {}", e)))?;
        Ok(0)
    }
}
