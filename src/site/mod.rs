//! Site-level facts derived once from the homepage
//!
//! - Language variants offered by a language switcher
//! - The site goal used as the relevance baseline for classification

mod goal;
mod language;

pub use goal::{extract_goal, MAX_GOAL_CHARS};
pub use language::{detect_languages, LanguageVersion, LANGUAGE_SELECTORS};
