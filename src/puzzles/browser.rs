//! Browser search for the scrambled station name.
//!
//! Not a true anagram check: the query and the clue are both uppercased
//! and stripped of whitespace, then compared exactly.

use serde::Serialize;

use crate::config::BrowserConfig;
use crate::error::Failure;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BrowserPage {
    Home,
    Results,
    Article,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    Found,
    NotFound,
}

#[derive(Clone, Debug)]
pub struct AnagramMatcher {
    clue: String,
    normalized_clue: String,
    solution: String,
    page: BrowserPage,
    error: Option<Failure>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BrowserSnapshot {
    pub page: BrowserPage,
    /// Heading for the results page.
    pub showing_results_for: Option<String>,
    pub error: Option<Failure>,
}

pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

impl AnagramMatcher {
    pub fn new(config: &BrowserConfig) -> Self {
        Self {
            clue: config.clue.clone(),
            normalized_clue: normalize(&config.clue),
            solution: config.solution.clone(),
            page: BrowserPage::Home,
            error: None,
        }
    }

    pub fn page(&self) -> BrowserPage {
        self.page
    }

    pub fn matches(&self, query: &str) -> bool {
        normalize(query) == self.normalized_clue
    }

    /// Run a search. A match opens the results page; anything else reports
    /// no results and leaves the page alone.
    pub fn search(&mut self, query: &str) -> SearchOutcome {
        if self.matches(query) {
            self.page = BrowserPage::Results;
            self.error = None;
            SearchOutcome::Found
        } else {
            self.error = Some(Failure::NoResults);
            SearchOutcome::NotFound
        }
    }

    pub fn open_article(&mut self) -> bool {
        if self.page != BrowserPage::Results {
            return false;
        }
        self.page = BrowserPage::Article;
        true
    }

    pub fn close_article(&mut self) -> bool {
        if self.page != BrowserPage::Article {
            return false;
        }
        self.page = BrowserPage::Results;
        true
    }

    /// The in-fiction anagram solver's answer. Only reachable from results.
    pub fn solver_hint(&self) -> Option<&str> {
        (self.page == BrowserPage::Results).then_some(self.solution.as_str())
    }

    pub fn snapshot(&self) -> BrowserSnapshot {
        BrowserSnapshot {
            page: self.page,
            showing_results_for: (self.page != BrowserPage::Home).then(|| self.clue.clone()),
            error: self.error,
        }
    }
}
