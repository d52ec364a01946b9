//! Deterministic local filenames for archived attachments.

use crate::models::file::File;
use chrono::{DateTime, Utc};

pub const SUBSTITUTE: char = '_';

const TITLE_CHARS: usize = 10;
const COMMENT_CHARS: usize = 30;

/// Characters that are unsafe or awkward in filenames on common filesystems.
pub fn is_blocked(c: char) -> bool {
    matches!(
        c as u32,
        0..=32 | 34 | 39 | 42..=47 | 58..=63 | 91..=94 | 96 | 123..=127
    )
}

/// Replaces every blocked character with [`SUBSTITUTE`].
pub fn sanitize(text: &str) -> String {
    text.chars()
        .map(|c| if is_blocked(c) { SUBSTITUTE } else { c })
        .collect()
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Splits `name` into stem and extension at the last dot. The extension keeps
/// its dot. Leading dots belong to the stem, so `.bashrc` has no extension.
pub fn split_extension(name: &str) -> (&str, &str) {
    let Some(dot) = name.rfind('.') else {
        return (name, "");
    };

    if name[..dot].chars().all(|c| c == '.') {
        return (name, "");
    }

    name.split_at(dot)
}

pub fn format_timestamp(timestamp: i64, pattern: &str) -> String {
    DateTime::<Utc>::from_timestamp(timestamp, 0)
        .unwrap_or_default()
        .format(pattern)
        .to_string()
}

/// `{YYYYmmddHHMMSS}-{id}-{uploader}-{title}[-{comment}]-{stem}{ext}`
pub fn archive_file_name(file: &File, uploader: &str) -> String {
    let (stem, extension) = split_extension(&file.name);

    let comment = file
        .comment()
        .map(|c| format!("-{}", truncate(&sanitize(c), COMMENT_CHARS)))
        .unwrap_or_default();

    format!(
        "{}-{}-{}-{}{}-{}{}",
        format_timestamp(file.timestamp, "%Y%m%d%H%M%S"),
        file.id,
        uploader,
        truncate(&sanitize(&file.title), TITLE_CHARS),
        comment,
        sanitize(stem),
        extension
    )
}
