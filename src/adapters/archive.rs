//! Change-tracking archive of raw feed responses.
//!
//! The archive is a flat file with one response per line. A response is only
//! appended when it differs from the last recorded line. Multi-line responses
//! (pretty-printed JSON) are folded onto one line first: line breaks and the
//! indentation after them are dropped, which never touches JSON string content.

use crate::utils::error::Result;
use std::borrow::Cow;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Appends `data` to `target` unless it equals the last line. Returns
/// whether the archive changed. The file is created when missing.
pub fn add_to_archive(target: &Path, data: &[u8]) -> Result<bool> {
    let record = single_line(data);
    let record = record.as_ref();
    let existing = match fs::read(target) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
        Err(e) => return Err(e.into()),
    };

    if last_line(&existing) == Some(record) {
        tracing::debug!("Archive {} already ends with this data", target.display());
        return Ok(false);
    }

    let mut file = OpenOptions::new().create(true).append(true).open(target)?;
    if !existing.is_empty() && !existing.ends_with(b"\n") {
        file.write_all(b"\n")?;
    }
    file.write_all(record)?;
    file.write_all(b"\n")?;
    tracing::debug!("Appended {} bytes to {}", record.len(), target.display());
    Ok(true)
}

fn strip_newline(data: &[u8]) -> &[u8] {
    let data = data.strip_suffix(b"\n").unwrap_or(data);
    data.strip_suffix(b"\r").unwrap_or(data)
}

fn single_line(data: &[u8]) -> Cow<'_, [u8]> {
    let data = strip_newline(data);
    if !data.contains(&b'\n') {
        return Cow::Borrowed(data);
    }
    let mut line = Vec::with_capacity(data.len());
    for (i, part) in data.split(|&b| b == b'\n').enumerate() {
        let part = part.strip_suffix(b"\r").unwrap_or(part);
        let part = if i == 0 { part } else { part.trim_ascii_start() };
        line.extend_from_slice(part);
    }
    Cow::Owned(line)
}

fn last_line(contents: &[u8]) -> Option<&[u8]> {
    let trimmed = contents.strip_suffix(b"\n").unwrap_or(contents);
    if trimmed.is_empty() {
        return None;
    }
    let start = trimmed
        .iter()
        .rposition(|&b| b == b'\n')
        .map_or(0, |pos| pos + 1);
    Some(strip_newline(&trimmed[start..]))
}
