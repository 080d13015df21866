use crate::{
    config::Config,
    error::{ApiError, Result},
    models::Item,
};
use std::{collections::HashSet, fs, path::Path};
use tracing::info;

/// The fixed set of recommendable items, in insertion order.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<Item>,
}

impl Catalog {
    /// Catalog compiled into the service.
    pub fn builtin() -> Self {
        Self {
            items: vec![
                Item::new(
                    "item1",
                    "The Great Gatsby",
                    "Classic Literature",
                    "Classic novel about the American Dream, jazz age, wealth and love.",
                ),
                Item::new(
                    "item2",
                    "1984",
                    "Dystopian Fiction",
                    "Dystopian social science fiction novel by George Orwell, totalitarianism, surveillance.",
                ),
                Item::new(
                    "item3",
                    "To Kill a Mockingbird",
                    "Classic Literature",
                    "Classic of modern American literature, dealing with racism and injustice in the Deep South.",
                ),
                Item::new(
                    "item4",
                    "Dune",
                    "Science Fiction",
                    "Epic science fiction novel about politics, religion, ecology, and human evolution on a desert planet.",
                ),
                Item::new(
                    "item5",
                    "Pride and Prejudice",
                    "Classic Romance",
                    "Romantic novel of manners by Jane Austen, marriage, class and social expectations.",
                ),
                Item::new(
                    "item6",
                    "Foundation",
                    "Science Fiction",
                    "Science fiction series by Isaac Asimov, galactic empire, psychohistory and collapse.",
                ),
                Item::new(
                    "item7",
                    "Lord of the Rings",
                    "Fantasy",
                    "High fantasy novel by J. R. R. Tolkien, quest, good vs evil, magic, hobbits.",
                ),
                Item::new(
                    "item8",
                    "The Hitchhiker's Guide to the Galaxy",
                    "Science Fiction Comedy",
                    "Comic science fiction series by Douglas Adams, absurdity, space travel, alien encounters.",
                ),
            ],
        }
    }

    /// Builds a catalog, rejecting an empty list or repeated ids.
    pub fn from_items(items: Vec<Item>) -> Result<Self> {
        if items.is_empty() {
            return Err(ApiError::CatalogError("catalog contains no items".to_string()));
        }

        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.id.as_str()) {
                return Err(ApiError::CatalogError(format!(
                    "duplicate item id: {}",
                    item.id
                )));
            }
        }

        Ok(Self { items })
    }

    /// Parses a JSON array of items.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let items: Vec<Item> = serde_json::from_str(json)?;
        Self::from_items(items)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            ApiError::CatalogError(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&contents)
    }

    /// Loads the file named by `catalog_path`, or the built-in catalog.
    pub fn load(config: &Config) -> Result<Self> {
        let catalog = match &config.catalog_path {
            Some(path) => {
                info!("Loading catalog from {}", path);
                Self::from_file(path)?
            }
            None => Self::builtin(),
        };
        info!("Catalog ready with {} items", catalog.len());
        Ok(catalog)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Item descriptions, index-aligned with `items()`.
    pub fn descriptions(&self) -> Vec<String> {
        self.items
            .iter()
            .map(|item| item.description.clone())
            .collect()
    }
}
