use serde::{Deserialize, Serialize};

/// A recommendable catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub category: String,
    pub description: String,
}

impl Item {
    pub fn new(id: &str, name: &str, category: &str, description: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            category: category.to_string(),
            description: description.to_string(),
        }
    }
}

/// An item paired with its similarity to the current query.
#[derive(Debug, Clone, Copy)]
pub struct ScoredItem<'a> {
    pub item: &'a Item,
    pub score: f32,
}
