//! Bookmark persistence: `$HOME/.myshell_bookmarks`, one `NAME=PATH`
//! record per line.

use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;

const BOOKMARK_FILE: &str = ".myshell_bookmarks";

fn bookmark_path() -> Option<PathBuf> {
    let home = std::env::var_os("HOME")?;
    Some(PathBuf::from(home).join(BOOKMARK_FILE))
}

/// Bookmark names may not contain `=` or a newline (the record format
/// reserves both).
pub fn is_valid_bookmark_name(name: &str) -> bool {
    !name.is_empty() && !name.contains('=') && !name.contains('\n')
}

/// Load bookmarks, best-effort: a missing or unreadable file is an empty
/// map, malformed lines are skipped.
pub fn load() -> BTreeMap<String, String> {
    let Some(path) = bookmark_path() else {
        return BTreeMap::new();
    };
    let Ok(content) = std::fs::read_to_string(path) else {
        return BTreeMap::new();
    };
    parse(&content)
}

fn parse(content: &str) -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();
    for line in content.lines() {
        if let Some((name, path)) = line.split_once('=') {
            if is_valid_bookmark_name(name) && !path.is_empty() {
                map.insert(name.to_string(), path.to_string());
            }
        }
    }
    map
}

/// Rewrite the bookmark file from the full map.
pub fn save(bookmarks: &BTreeMap<String, String>) -> io::Result<()> {
    let Some(path) = bookmark_path() else {
        return Err(io::Error::new(io::ErrorKind::NotFound, "HOME not set"));
    };
    let mut body = String::new();
    for (name, target) in bookmarks {
        body.push_str(name);
        body.push('=');
        body.push_str(target);
        body.push('\n');
    }
    std::fs::write(path, body)
}
