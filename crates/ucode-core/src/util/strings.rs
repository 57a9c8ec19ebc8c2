use std::collections::HashSet;

/// Drop repeated values, keeping first occurrences in order.
///
/// Uniqueness is decided on the original spelling; `lowercase` only folds
/// the values written to the output.
pub fn remove_duplicate_strings<S: AsRef<str>>(items: &[S], lowercase: bool) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .iter()
        .map(AsRef::as_ref)
        .filter(|item| seen.insert(*item))
        .map(|item| {
            if lowercase {
                item.to_lowercase()
            } else {
                item.to_owned()
            }
        })
        .collect()
}

/// Exact membership test.
pub fn contains<S: AsRef<str>>(items: &[S], needle: &str) -> bool {
    items.iter().any(|item| item.as_ref() == needle)
}

/// True when `text` contains any of `patterns` as a substring.
pub fn contains_like<S: AsRef<str>>(patterns: &[S], text: &str) -> bool {
    patterns.iter().any(|p| text.contains(p.as_ref()))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn dedup_keeps_first_occurrence_order() {
        let out = remove_duplicate_strings(&["b", "a", "b", "c", "a"], false);
        assert_eq!(out, vec!["b", "a", "c"]);
    }

    #[test]
    fn dedup_folds_case_on_output_only() {
        let out = remove_duplicate_strings(&["Foo", "foo", "FOO", "Foo"], true);
        assert_eq!(out, vec!["foo", "foo", "foo"]);
    }

    #[test]
    fn contains_is_exact_and_contains_like_is_substring() {
        let list = ["[INFO]", "[ERROR]"];
        assert!(contains(&list, "[INFO]"));
        assert!(!contains(&list, "[INFO] started"));
        assert!(contains_like(&list, "[ERROR] sync >>> boom"));
        assert!(!contains_like(&list, "plain text"));
        assert!(!contains_like::<&str>(&[], "anything"));
    }
}
