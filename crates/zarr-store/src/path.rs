const SCHEME_SEPARATOR: &str = "://";

/// Joins the parts of a path or URL with a single `/`.
///
/// Only the join boundaries are normalized: the first part loses its trailing slashes, every
/// other part loses its leading and trailing slashes, and parts that end up empty are dropped.
/// Repeated slashes *inside* a part are kept, so URL-like prefixes such as
/// `http://host//bucket` survive the join unchanged.
///
/// A first part that ends in a scheme separator (e.g. `file://`) keeps its `//` and the next part
/// is appended directly, so `join_url_parts(&["file://", "bucket"])` is `file://bucket`.
///
/// ```
/// use zarr_store::join_url_parts;
///
/// assert_eq!(join_url_parts(&["a/", "/b/", "c"]), "a/b/c");
/// assert_eq!(join_url_parts(&["file://", "bucket", "obj"]), "file://bucket/obj");
/// assert_eq!(join_url_parts(&["", "/"]), "");
/// ```
pub fn join_url_parts<S: AsRef<str>>(parts: &[S]) -> String {
    let mut joined = String::new();
    for (i, part) in parts.iter().enumerate() {
        let part = trim_whitespace(part.as_ref());
        let part = if i == 0 {
            trim_first_part(part)
        } else {
            part.trim_matches('/')
        };
        if part.is_empty() {
            continue;
        }
        if !joined.is_empty() && !joined.ends_with(SCHEME_SEPARATOR) {
            joined.push('/');
        }
        joined.push_str(part);
    }
    joined
}

// U+FEFF (byte order mark) is whitespace too
fn trim_whitespace(part: &str) -> &str {
    part.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

fn trim_first_part(part: &str) -> &str {
    let trimmed = part.trim_end_matches('/');
    let slashes = part.len() - trimmed.len();
    match trimmed.strip_suffix(':') {
        Some(scheme) if slashes >= 2 && is_scheme(scheme) => &part[..trimmed.len() + 2],
        _ => trimmed,
    }
}

// RFC 3986: ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )
fn is_scheme(scheme: &str) -> bool {
    let mut chars = scheme.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        _ => false,
    }
}
