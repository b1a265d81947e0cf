use std::borrow::Cow;
use std::path::{Component, Path, PathBuf};

pub(crate) fn parent(href: &str) -> &str {
    href.rfind('/')
        .map_or("", |index| if index == 0 { "/" } else { &href[..index] })
}

pub(crate) fn decode(encoded: &str) -> Cow<'_, str> {
    percent_encoding::percent_decode_str(encoded).decode_utf8_lossy()
}

/// Splits an href into its path and fragment (without `#`).
///
/// Any query component is discarded as it never addresses a container entry.
pub(crate) fn split_fragment(href: &str) -> (&str, Option<&str>) {
    let (path, fragment) = match href.find('#') {
        Some(position) => (&href[..position], Some(&href[position + 1..])),
        None => (href, None),
    };
    let path = path.find('?').map_or(path, |position| &path[..position]);

    (path, fragment.filter(|fragment| !fragment.is_empty()))
}

/// Returns `true` if the href points outside the container (e.g., `https://`).
pub(crate) fn has_scheme(href: &str) -> bool {
    let (path, _) = split_fragment(href);

    path.find(':').is_some_and(|colon| {
        path[..colon]
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
            && colon > 0
    })
}

/// Turns an href found within a container file into a container path.
///
/// The result is percent-decoded, normalized and relative to the container root
/// (`OEBPS/text/c1.xhtml`); the fragment is discarded.
pub(crate) fn to_container_path(parent_dir: &str, href: &str) -> String {
    let (path, _) = split_fragment(href);
    let decoded = decode(path);

    if let Some(absolute) = decoded.strip_prefix('/') {
        normalize(absolute)
    } else {
        normalize(&resolve(parent_dir, &decoded))
    }
}

pub(crate) fn normalize(href: &str) -> String {
    let mut buf = PathBuf::from(href);
    normalize_href_path(&mut buf);

    // 1: `buf` is UTF-8 as its data derives from `href`.
    // 2: Ensure separators are forward slashes.
    let normalized = buf.to_string_lossy().replace('\\', "/");
    match normalized.strip_prefix('/') {
        Some(relative) => relative.to_owned(),
        None => normalized,
    }
}

/// Resolve a child path against its parent, normalizing if necessary.
pub(crate) fn resolve<'a>(parent_dir: &str, relative: &'a str) -> Cow<'a, str> {
    if relative.starts_with('/') || has_scheme(relative) {
        // If the path is absolute or has a scheme,
        // it is most likely resolved already.
        return Cow::Borrowed(relative);
    }

    let mut buf = Path::new(parent_dir).join(relative);
    normalize_href_path(&mut buf);

    Cow::Owned(buf.to_string_lossy().replace('\\', "/"))
}

fn normalize_href_path(original: &mut PathBuf) {
    let mut stack = Vec::new();

    for component in original.components() {
        match component {
            Component::ParentDir => {
                if stack
                    .last()
                    // If the component is the root, disallow popping.
                    // No content must come before the root when present.
                    .is_some_and(|component| !matches!(component, Component::RootDir))
                {
                    stack.pop();
                }
            }
            Component::CurDir => {}
            _ => {
                stack.push(component);
            }
        }
    }

    *original = PathBuf::from_iter(stack);
}
