use std::collections::HashSet;
use std::hash::Hash;
use std::sync::OnceLock;

use regex::Regex;

/// Checks whether a given boolean expression is true or false. If it is false, a
/// [`Violation`](crate::validation::Violation) at `$path` is logged as a warning and pushed to
/// `$violations`. Returns the result of the boolean expression.
///
/// `$path` and the message are only evaluated if the check fails.
macro_rules! warn_unless {
    ( $violations:expr, $path:expr, $condition:expr, $message:expr $(, $format_arg:expr)* $(,)? ) => {
        if $condition {
            true
        } else {
            let violation = $crate::validation::Violation::new($path, format!($message $(,$format_arg)*));
            log::warn!("{}", violation);
            $violations.push(violation);
            false
        }
    }
}

pub(crate) use warn_unless;

/// The NGFF version these documents are validated against.
pub const VERSION: &str = "0.4";

/// Location of the field `name` inside the object at `path`.
pub(crate) fn field(path: &str, name: &str) -> String {
    if path.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", path, name)
    }
}

/// Location of the `i`-th element of the array at `path`.
pub(crate) fn index(path: &str, i: usize) -> String {
    format!("{}[{}]", path, i)
}

pub(crate) fn is_alphanumeric_name(name: &str) -> bool {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX
        .get_or_init(|| Regex::new(r"^[A-Za-z0-9]+$").expect("Could not construct regex"))
        .is_match(name)
}

pub(crate) fn is_well_path(path: &str) -> bool {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX
        .get_or_init(|| {
            Regex::new(r"^[A-Za-z0-9]+/[A-Za-z0-9]+$").expect("Could not construct regex")
        })
        .is_match(path)
}

pub(crate) fn is_hex_color(color: &str) -> bool {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX
        .get_or_init(|| Regex::new(r"^[0-9a-fA-F]{6}$").expect("Could not construct regex"))
        .is_match(color)
}

/// Indices of all elements that are equal to an earlier element.
pub(crate) fn duplicate_indices<T, I>(values: I) -> Vec<usize>
where
    T: Eq + Hash,
    I: IntoIterator<Item = T>,
{
    let mut seen = HashSet::new();
    values
        .into_iter()
        .enumerate()
        .filter_map(|(i, v)| if seen.insert(v) { None } else { Some(i) })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths() {
        assert_eq!(field("", "plate"), "plate");
        assert_eq!(field("plate", "wells"), "plate.wells");
        assert_eq!(index(&field("plate", "wells"), 3), "plate.wells[3]");
    }

    #[test]
    fn names() {
        assert!(is_alphanumeric_name("A"));
        assert!(is_alphanumeric_name("03"));
        assert!(!is_alphanumeric_name(""));
        assert!(!is_alphanumeric_name("A-1"));
        assert!(!is_alphanumeric_name("A/1"));
    }

    #[test]
    fn well_paths() {
        assert!(is_well_path("B/03"));
        assert!(!is_well_path("B03"));
        assert!(!is_well_path("/B/03"));
        assert!(!is_well_path("B/03/0"));
    }

    #[test]
    fn colors() {
        assert!(is_hex_color("00FF7f"));
        assert!(!is_hex_color("#00FF7F"));
        assert!(!is_hex_color("red"));
    }

    #[test]
    fn duplicates() {
        assert_eq!(duplicate_indices(["a", "b", "a", "a"]), vec![2, 3]);
        assert!(duplicate_indices(Vec::<u8>::new()).is_empty());
    }
}
