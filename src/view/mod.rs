// Presentation state for one set of recommendations

use crate::catalog::Recipe;

pub const RESULTS_HEADING: &str = "Top Recipe Recommendations";
pub const NO_MATCHES_MESSAGE: &str = "No matching recipes found.";

/// Which details panel is expanded. At most one is open at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Disclosure {
    #[default]
    Closed,
    Open(usize),
}

impl Disclosure {
    /// Toggle `panel`: an open panel closes, anything else opens it and
    /// closes whatever was open before.
    pub fn select(self, panel: usize) -> Self {
        match self {
            Disclosure::Open(open) if open == panel => Disclosure::Closed,
            _ => Disclosure::Open(panel),
        }
    }

    pub fn is_open(&self, panel: usize) -> bool {
        matches!(self, Disclosure::Open(open) if *open == panel)
    }

    pub fn open_panel(&self) -> Option<usize> {
        match self {
            Disclosure::Open(panel) => Some(*panel),
            Disclosure::Closed => None,
        }
    }
}

/// A rendered result set and its disclosure state.
///
/// Building a new view for every recommendation resets the disclosure, so a
/// panel opened for one query never stays open for the next.
#[derive(Debug, Clone)]
pub struct ResultsView {
    query: String,
    results: Vec<Recipe>,
    disclosure: Disclosure,
}

impl ResultsView {
    pub fn new(query: impl Into<String>, results: Vec<Recipe>) -> Self {
        Self {
            query: query.into(),
            results,
            disclosure: Disclosure::Closed,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[Recipe] {
        &self.results
    }

    pub fn disclosure(&self) -> Disclosure {
        self.disclosure
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Toggle the details panel of result `panel` (0-based).
    /// Returns false and leaves the state alone when there is no such result.
    pub fn select(&mut self, panel: usize) -> bool {
        if panel >= self.results.len() {
            return false;
        }
        self.disclosure = self.disclosure.select(panel);
        true
    }

    /// Plain-text rendering for the terminal
    pub fn render_text(&self) -> String {
        if self.is_empty() {
            return format!("⚠ {NO_MATCHES_MESSAGE}\n");
        }

        let mut out = format!("🔍 {RESULTS_HEADING}\n");
        for (panel, recipe) in self.results.iter().enumerate() {
            let marker = if self.disclosure.is_open(panel) { "▾" } else { "▸" };
            out.push_str(&format!("\n{marker} [{}] {}\n", panel + 1, recipe.name));

            if self.disclosure.is_open(panel) {
                out.push_str(&format!("\n    📋 Ingredients: {}\n", recipe.ingredients));
                out.push_str("\n    🍳 Procedure:\n");
                for line in recipe.procedure.lines() {
                    out.push_str(&format!("    {line}\n"));
                }
            }
        }

        out
    }
}
