pub const NOTE_EXTENSION: &str = ".md";

/// Canonical form of a note path: no leading separators, exactly one
/// trailing `.md` suffix. Total over any input; an empty string comes
/// back as the bare `".md"`, which callers should guard against before
/// handing it to storage.
pub fn normalize_note_path(raw: &str) -> String {
    let trimmed = raw.trim_start_matches('/');
    if trimmed.ends_with(NOTE_EXTENSION) {
        trimmed.to_string()
    } else {
        format!("{trimmed}{NOTE_EXTENSION}")
    }
}

/// Byte range of the editable file stem: after the last `/`, before the
/// trailing `.md` (end of string when the suffix is absent). Hosts use
/// this to pre-select the stem when a rename field gains focus.
pub fn file_name_selection(path: &str) -> (usize, usize) {
    let start = path.rfind('/').map(|ix| ix + 1).unwrap_or(0);
    let end = path.rfind(NOTE_EXTENSION).unwrap_or(path.len());
    (start, end.max(start))
}
