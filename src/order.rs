//! Variable ordering used for canonical term placement.

use std::cmp::Ordering;
use std::collections::HashMap;

/// Split `x12` into `("x", "12")`: the trailing digits form the suffix.
fn split_name(name: &str) -> (&str, &str) {
    let cut = name
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map_or(name.len(), |(i, _)| i);
    name.split_at(cut)
}

fn suffix_cmp(a: &str, b: &str) -> Ordering {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        // numeric comparison of digit strings without parsing
        (false, false) => {
            let a = a.trim_start_matches('0');
            let b = b.trim_start_matches('0');
            a.len().cmp(&b.len()).then_with(|| a.cmp(b))
        }
    }
}

/// Group names by prefix in first-appearance order, sorting each group by
/// numeric suffix (an empty suffix first).
pub fn prefix_sort<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    let mut prefixes: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Vec<&str>> = HashMap::new();
    for name in names {
        let (prefix, suffix) = split_name(name.as_ref());
        if !groups.contains_key(prefix) {
            prefixes.push(prefix);
        }
        groups.entry(prefix).or_default().push(suffix);
    }

    let mut sorted = Vec::with_capacity(names.len());
    for prefix in prefixes {
        let mut suffixes = groups.remove(prefix).unwrap_or_default();
        suffixes.sort_by(|a, b| suffix_cmp(a, b));
        sorted.extend(suffixes.into_iter().map(|s| format!("{prefix}{s}")));
    }
    sorted
}

/// `prefix_sort` without duplicates.
pub fn prefix_unique<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    let mut sorted = prefix_sort(names);
    let mut seen = std::collections::HashSet::new();
    sorted.retain(|name| seen.insert(name.clone()));
    sorted
}

/// Total order over variable names.
///
/// Known names rank by position; unknown names rank after all known ones and
/// among themselves lexicographically.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VariableOrder {
    names: Vec<String>,
    rank: HashMap<String, usize>,
}

impl VariableOrder {
    pub fn new<S: AsRef<str>>(names: &[S]) -> Self {
        let mut order = Self::default();
        for name in names {
            order.push(name.as_ref());
        }
        order
    }

    /// Order derived from first appearance with prefix grouping.
    pub fn from_appearance<S: AsRef<str>>(names: &[S]) -> Self {
        Self::new(&prefix_unique(names))
    }

    /// Append a name if not already known.
    pub fn push(&mut self, name: &str) {
        if !self.rank.contains_key(name) {
            self.rank.insert(name.to_string(), self.names.len());
            self.names.push(name.to_string());
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rank.contains_key(name)
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match (self.rank.get(a), self.rank.get(b)) {
            (Some(x), Some(y)) => x.cmp(y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a.cmp(b),
        }
    }

    /// `a` must come after `b`.
    pub fn is_unsorted(&self, a: &str, b: &str) -> bool {
        self.compare(a, b) == Ordering::Greater
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_name_keeps_non_digit_prefix() {
        assert_eq!(split_name("x12"), ("x", "12"));
        assert_eq!(split_name("x"), ("x", ""));
        assert_eq!(split_name("x1y2"), ("x1y", "2"));
        assert_eq!(split_name("12"), ("", "12"));
    }

    #[test]
    fn prefix_sort_groups_by_first_appearance() {
        assert_eq!(prefix_sort(&["x1", "x2"]), ["x1", "x2"]);
        assert_eq!(prefix_sort(&["x2", "x1"]), ["x1", "x2"]);
        assert_eq!(prefix_sort(&["x2", "a1"]), ["x2", "a1"]);
        assert_eq!(
            prefix_sort(&["x2", "a1", "x", "a3", "y4", "y3", "z"]),
            ["x", "x2", "a1", "a3", "y3", "y4", "z"]
        );
        assert_eq!(prefix_sort(&["x10", "x9"]), ["x9", "x10"]);
    }

    #[test]
    fn prefix_unique_drops_repeats() {
        assert_eq!(prefix_unique(&["x2", "x1", "x1", "x2"]), ["x1", "x2"]);
        assert_eq!(prefix_unique(&["x2", "a1", "a1", "x2"]), ["x2", "a1"]);
    }

    #[test]
    fn from_appearance_orders_terms() {
        let order = VariableOrder::from_appearance(&["s1", "x2", "x1", "s1"]);
        assert_eq!(order.names(), ["s1", "x1", "x2"]);
        assert_eq!(order.compare("x1", "x2"), Ordering::Less);
        assert!(order.contains("x2"));
    }

    #[test]
    fn unknown_names_rank_last() {
        let order = VariableOrder::new(&["y", "x"]);
        assert!(order.is_unsorted("x", "y"));
        assert!(order.is_unsorted("a", "x"));
        assert!(order.is_unsorted("b", "a"));
        assert!(!order.is_unsorted("y", "y"));
    }
}
