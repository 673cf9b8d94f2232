//! Project list filtering.
//!
//! A project matches when the lowercased term is a substring of its title,
//! description or technology list. An empty term matches everything.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectCard {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub technologies: Option<String>,
}

impl ProjectCard {
    pub fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self
                .technologies
                .as_deref()
                .is_some_and(|t| t.to_lowercase().contains(needle))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    /// Indexes into the input slice of the cards that stay visible.
    pub visible: Vec<usize>,
}

impl SearchResult {
    pub fn summary(&self) -> String {
        format!("{} project(s) found", self.visible.len())
    }
}

pub fn filter_projects(cards: &[ProjectCard], term: &str) -> SearchResult {
    let needle = term.to_lowercase();
    let visible = cards
        .iter()
        .enumerate()
        .filter(|(_, card)| card.matches(&needle))
        .map(|(i, _)| i)
        .collect();
    SearchResult { visible }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cards() -> Vec<ProjectCard> {
        vec![
            ProjectCard {
                title: "Weather Dashboard".into(),
                description: "Forecasts for any city".into(),
                technologies: Some("Flask, Chart.js".into()),
            },
            ProjectCard {
                title: "Recipe Book".into(),
                description: "Share family recipes".into(),
                technologies: None,
            },
        ]
    }

    #[test]
    fn matches_any_text_case_insensitively() {
        assert_eq!(filter_projects(&cards(), "WEATHER").visible, vec![0]);
        assert_eq!(filter_projects(&cards(), "family").visible, vec![1]);
        assert_eq!(filter_projects(&cards(), "chart.js").visible, vec![0]);
    }

    #[test]
    fn empty_term_shows_everything() {
        let result = filter_projects(&cards(), "");
        assert_eq!(result.visible, vec![0, 1]);
        assert_eq!(result.summary(), "2 project(s) found");
    }

    #[test]
    fn no_match() {
        let result = filter_projects(&cards(), "rust");
        assert!(result.visible.is_empty());
        assert_eq!(result.summary(), "0 project(s) found");
    }
}
