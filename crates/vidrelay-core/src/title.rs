//! Title rules for uploaded videos.

/// Maximum length of a caller-supplied title, in characters.
pub const MAX_OVERRIDE_TITLE_CHARS: usize = 100;
/// Maximum length of a title derived from a filename, in characters.
pub const MAX_DERIVED_TITLE_CHARS: usize = 95;
/// Used when neither an override nor a usable filename is available.
pub const FALLBACK_TITLE: &str = "video";

/// Normalize a raw `title` form value: trimmed, empty means absent.
pub fn normalize_override(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Title submitted for one file of a batch.
///
/// A present override is applied verbatim (truncated) to every file.
pub fn resolve_title(title_override: Option<&str>, file_name: Option<&str>) -> String {
    match title_override.map(str::trim).filter(|s| !s.is_empty()) {
        Some(title) => truncate_chars(title, MAX_OVERRIDE_TITLE_CHARS),
        None => title_from_file_name(file_name.unwrap_or_default()),
    }
}

/// Derive a display title from an uploaded file's name.
pub fn title_from_file_name(file_name: &str) -> String {
    let file_name = if file_name.is_empty() {
        FALLBACK_TITLE
    } else {
        file_name
    };
    let stem = file_stem(base_name(file_name));
    let collapsed = stem.split_whitespace().collect::<Vec<_>>().join(" ");
    let title = truncate_chars(&collapsed, MAX_DERIVED_TITLE_CHARS);

    if title.is_empty() {
        FALLBACK_TITLE.to_string()
    } else {
        title
    }
}

pub fn truncate_chars(value: &str, max_chars: usize) -> String {
    value.chars().take(max_chars).collect()
}

fn base_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

// Dotfiles such as ".mp4" keep their full name.
fn file_stem(base: &str) -> &str {
    match base.rfind('.') {
        Some(idx) if base[..idx].chars().any(|c| c != '.') => &base[..idx],
        _ => base,
    }
}
