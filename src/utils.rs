use std::path::{Component, Path, PathBuf};

/// File-name suffixes that mark a file for aggregation. Matching is
/// case-sensitive and looks at the name only, never at the content.
pub const SOURCE_EXTENSIONS: [&str; 2] = [".h", ".cpp"];

pub fn is_source_file(path: &Path) -> bool {
    path.file_name().is_some_and(|name| {
        let name = name.as_encoded_bytes();
        SOURCE_EXTENSIONS
            .iter()
            .any(|ext| name.ends_with(ext.as_bytes()))
    })
}

/// Lexically normalizes a path: `.` components are dropped and `..` folds
/// into the preceding normal component. The filesystem is never consulted.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                // `/..` is `/`
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => normalized.push(".."),
            },
            other => normalized.push(other.as_os_str()),
        }
    }

    normalized
}

/// Relative path from `base` to `path`, climbing with `..` where the two
/// diverge. `None` when no relative path exists (different roots or drives,
/// or a `base` that itself climbs out with `..`).
pub fn relative_path(path: &Path, base: &Path) -> Option<PathBuf> {
    let path = normalize_path(path);
    let base = normalize_path(base);
    if path.is_absolute() != base.is_absolute() {
        return None;
    }

    let mut path_components = path.components().peekable();
    let mut base_components = base.components().peekable();
    while path_components.peek().is_some() && path_components.peek() == base_components.peek() {
        path_components.next();
        base_components.next();
    }

    let mut relative = PathBuf::new();
    for component in base_components {
        match component {
            Component::Normal(_) => relative.push(".."),
            _ => return None,
        }
    }
    for component in path_components {
        relative.push(component.as_os_str());
    }

    if relative.as_os_str().is_empty() {
        relative.push(".");
    }
    Some(relative)
}

/// Path shown in banners and progress lines: relative to `working_dir`,
/// always with forward slashes. Only a path with no relative form (another
/// drive, say) is shown in full.
pub fn display_path(path: &Path, working_dir: &Path) -> String {
    let shown = relative_path(path, working_dir).unwrap_or_else(|| normalize_path(path));

    shown.to_string_lossy().replace('\\', "/")
}

/// Decodes UTF-8, silently dropping any invalid byte sequences.
pub fn decode_permissive(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
    }
    text
}

/// Folds `\r\n` and lone `\r` line endings into `\n`.
pub fn normalize_newlines(text: String) -> String {
    if !text.contains('\r') {
        return text;
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}
