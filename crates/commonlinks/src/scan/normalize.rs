//! Absolute path to anchor-relative link target.

use std::path::Path;

/// Default anchor segment; link targets start here.
pub const DEFAULT_ANCHOR: &str = "apidocs";

/// Path text with `/` separators regardless of platform.
pub fn path_to_slash(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Everything from the last occurrence of `anchor` onward, or `None` if
/// the anchor does not appear.
pub fn relative_to_anchor(path: &Path, anchor: &str) -> Option<String> {
    let text = path_to_slash(path);
    text.rfind(anchor).map(|idx| text[idx..].to_string())
}

/// Like [`relative_to_anchor`], but falls back to the unchanged path text.
///
/// ```
/// use commonlinks::scan::normalize_path;
/// use std::path::Path;
///
/// let p = Path::new("/home/ci/docs/apidocs/veslo/pkg/Foo.html");
/// assert_eq!(normalize_path(p, "apidocs"), "apidocs/veslo/pkg/Foo.html");
/// assert_eq!(normalize_path(Path::new("/tmp/Foo.html"), "apidocs"), "/tmp/Foo.html");
/// ```
pub fn normalize_path(path: &Path, anchor: &str) -> String {
    relative_to_anchor(path, anchor).unwrap_or_else(|| path_to_slash(path))
}
