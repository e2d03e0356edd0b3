use std::collections::BTreeSet;

/// Keyword → category, checked as lower-case substrings of a description.
const TAG_PATTERNS: &[(&str, &str)] = &[
    ("productivity", "productivity"),
    ("task", "productivity"),
    ("todo", "productivity"),
    ("kanban", "productivity"),
    ("theme", "theme"),
    ("css", "theme"),
    ("dark", "theme"),
    ("appearance", "theme"),
    ("calendar", "note-taking"),
    ("journal", "note-taking"),
    ("note", "note-taking"),
    ("markdown", "note-taking"),
    ("sync", "integration"),
    ("api", "integration"),
    ("integration", "integration"),
];

pub const FALLBACK_TAG: &str = "other";

/// Sorted, `;`-joined categories whose keywords occur in `description`, or
/// `other` when nothing matches.
pub fn infer_tags(description: &str) -> String {
    let lowered = description.to_lowercase();
    let tags: BTreeSet<&str> = TAG_PATTERNS
        .iter()
        .filter(|(keyword, _)| lowered.contains(keyword))
        .map(|(_, category)| *category)
        .collect();
    if tags.is_empty() {
        return FALLBACK_TAG.to_string();
    }
    tags.into_iter().collect::<Vec<_>>().join(";")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorted_and_deduplicated() {
        assert_eq!(infer_tags("A kanban and sync tool"), "integration;productivity");
        assert_eq!(infer_tags("todo list with tasks"), "productivity");
    }

    #[test]
    fn case_insensitive() {
        assert_eq!(infer_tags("DARK Theme"), "theme");
    }

    #[test]
    fn substring_match() {
        // "rapid" contains "api"
        assert_eq!(infer_tags("rapid"), "integration");
    }

    #[test]
    fn nothing_matched() {
        assert_eq!(infer_tags(""), "other");
        assert_eq!(infer_tags("a game"), "other");
    }

    #[test]
    fn all_categories() {
        assert_eq!(
            infer_tags("markdown notes, css themes, todo, api"),
            "integration;note-taking;productivity;theme"
        );
    }
}
