//! Types for defining routes: compiled [`RoutePattern`]s and the ordered [`RouteTable`] that holds
//! them.

mod parameter;
pub use parameter::*;

mod pattern;
pub use pattern::*;

mod table;
pub use table::*;

/// Normalize a prefix to start with `/` and not end with one. `""` and `"/"` mean no prefix.
pub(crate) fn normalize_prefix(prefix: &str) -> String {
    let prefix = prefix.trim().trim_end_matches('/');
    match prefix {
        "" => String::new(),
        p if p.starts_with('/') => p.to_string(),
        p => format!("/{p}"),
    }
}

/// Remove `prefix` from the start of `path` once, if `path` starts with it at a segment boundary.
pub(crate) fn strip_prefix<'a>(prefix: &str, path: &'a str) -> &'a str {
    if prefix.is_empty() {
        return path;
    }

    match path.strip_prefix(prefix) {
        Some(rest) if rest.is_empty() || rest.starts_with(['/', '?', '#']) => rest,
        _ => path,
    }
}

/// Split a path into its segments, ignoring one leading and one trailing `/`.
pub(crate) fn split_path(path: &str) -> impl Iterator<Item = &str> {
    let path = path.strip_prefix('/').unwrap_or(path);
    let path = path.strip_suffix('/').unwrap_or(path);
    (!path.is_empty())
        .then(|| path.split('/'))
        .into_iter()
        .flatten()
}
