use indexmap::IndexSet;

/// Distinct group names, normalized for tick-label matching.
///
/// Names are stored trimmed and lowercased in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupSet {
    names: IndexSet<String>,
}

impl GroupSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn normalize(text: &str) -> String {
        text.trim().to_lowercase()
    }

    /// Inserts one group name; blank names are skipped.
    pub fn insert(&mut self, name: &str) -> bool {
        let normalized = Self::normalize(name);
        if normalized.is_empty() {
            return false;
        }
        self.names.insert(normalized)
    }

    /// Tests whether a tick label denotes a group.
    ///
    /// A tick without text never matches.
    #[must_use]
    pub fn matches_label(&self, label: Option<&str>) -> bool {
        match label {
            Some(text) => self.names.contains(&Self::normalize(text)),
            None => false,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl<'a> FromIterator<&'a str> for GroupSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = Self::new();
        for name in iter {
            set.insert(name);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::GroupSet;

    #[test]
    fn matching_ignores_case_and_padding() {
        let groups: GroupSet = ["Age", " Sex "].into_iter().collect();
        assert!(groups.matches_label(Some("  age   ")));
        assert!(groups.matches_label(Some("SEX")));
        assert!(!groups.matches_label(Some("age group")));
    }

    #[test]
    fn missing_label_text_never_matches() {
        let groups: GroupSet = ["Age"].into_iter().collect();
        assert!(!groups.matches_label(None));
    }

    #[test]
    fn duplicate_and_blank_names_collapse() {
        let groups: GroupSet = ["Age", "age", "AGE ", "  "].into_iter().collect();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups.iter().collect::<Vec<_>>(), vec!["age"]);
    }
}
