use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// Fixed classification of spending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Food,
    Transport,
    Housing,
    Health,
    Entertainment,
    Education,
    Clothing,
    Other,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Food,
        Category::Transport,
        Category::Housing,
        Category::Health,
        Category::Entertainment,
        Category::Education,
        Category::Clothing,
        Category::Other,
    ];

    /// Stable key used on the command line and in serialized output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "food",
            Category::Transport => "transport",
            Category::Housing => "housing",
            Category::Health => "health",
            Category::Entertainment => "entertainment",
            Category::Education => "education",
            Category::Clothing => "clothing",
            Category::Other => "other",
        }
    }

    /// Human-readable name, also the default description of an expense.
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Housing => "Housing",
            Category::Health => "Health",
            Category::Entertainment => "Entertainment",
            Category::Education => "Education",
            Category::Clothing => "Clothing",
            Category::Other => "Other",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Category::Food => "🍔",
            Category::Transport => "🚌",
            Category::Housing => "🏠",
            Category::Health => "💊",
            Category::Entertainment => "🎬",
            Category::Education => "📚",
            Category::Clothing => "👕",
            Category::Other => "📦",
        }
    }
}

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == key)
            .ok_or_else(|| ParseCategoryError(s.trim().to_string()))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown category '{0}'")]
pub struct ParseCategoryError(pub String);
