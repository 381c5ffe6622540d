//! History file I/O. The in-memory history and its append cursor live in
//! `SessionState`; these helpers only touch the plain-text file format
//! (one command per line, blank lines ignored on read).

use std::fs::OpenOptions;
use std::io::{self, Write};

/// Read history entries from a file, skipping blank lines.
pub fn read_entries(path: &str) -> io::Result<Vec<String>> {
    let content = std::fs::read_to_string(path)?;
    Ok(content
        .lines()
        .filter(|line| !line.is_empty())
        .map(|line| line.to_string())
        .collect())
}

/// Overwrite the file with the full history.
pub fn write_entries(path: &str, entries: &[String]) -> io::Result<()> {
    let mut body = String::new();
    for entry in entries {
        body.push_str(entry);
        body.push('\n');
    }
    std::fs::write(path, body)
}

/// Append entries to the file, creating it if needed.
pub fn append_entries(path: &str, entries: &[String]) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    for entry in entries {
        writeln!(file, "{}", entry)?;
    }
    Ok(())
}
