//! Short symbol names from API page file names.

/// Derive the role name for an API page.
///
/// Takes the final path component, drops the extension and keeps the last
/// dot-separated segment, so `pkg/a.b.Outer.Inner.html` yields `Inner`.
pub fn symbol_name(relative_path: &str) -> &str {
    let file_name = relative_path
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(relative_path);
    let stem = match file_name.rfind('.') {
        Some(idx) if idx > 0 => &file_name[..idx],
        _ => file_name,
    };
    stem.rsplit('.').next().unwrap_or(stem)
}
