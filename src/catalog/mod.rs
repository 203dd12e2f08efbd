// Recipe catalog: loaded once from CSV, read-only afterwards

pub mod models;

pub use models::Recipe;

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use models::{INGREDIENT_COLUMN, PROCEDURE_COLUMN, RECIPE_COLUMN};
use sha2::{Digest, Sha256};
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Ordered, immutable set of recipes. Insertion order is source order.
#[derive(Debug, Clone)]
pub struct Catalog {
    recipes: Vec<Recipe>,
    fingerprint: String,
    loaded_at: DateTime<Utc>,
}

impl Catalog {
    /// Load a catalog from a CSV file on disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let bytes = std::fs::read(path).map_err(|e| {
            Error::CatalogLoad(format!("Failed to read {}: {e}", path.display()))
        })?;

        let catalog = Self::from_bytes(&bytes)?;
        info!(
            "Loaded {} recipes from {:?} (sha256 {})",
            catalog.len(),
            path,
            catalog.fingerprint
        );

        Ok(catalog)
    }

    /// Load a catalog from any reader yielding CSV
    pub fn from_reader(mut reader: impl Read) -> Result<Self> {
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .map_err(|e| Error::CatalogLoad(format!("Failed to read catalog source: {e}")))?;

        Self::from_bytes(&bytes)
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .from_reader(bytes);

        let headers = reader
            .headers()
            .map_err(|e| Error::CatalogLoad(format!("Invalid header row: {e}")))?
            .clone();

        // Column names are matched after trimming, so " Ingredient " works too
        let column = |name: &str| -> Result<usize> {
            headers
                .iter()
                .position(|h| h.trim_start_matches('\u{feff}').trim() == name)
                .ok_or_else(|| Error::CatalogLoad(format!("Missing required column `{name}`")))
        };

        let name_idx = column(RECIPE_COLUMN)?;
        let ingredient_idx = column(INGREDIENT_COLUMN)?;
        let procedure_idx = column(PROCEDURE_COLUMN)?;

        let mut recipes = Vec::new();
        for (row, record) in reader.records().enumerate() {
            let record = record
                .map_err(|e| Error::CatalogLoad(format!("Malformed row {}: {e}", row + 1)))?;

            let field = |idx: usize| record.get(idx).unwrap_or_default().to_string();
            let recipe = Recipe {
                name: field(name_idx),
                ingredients: field(ingredient_idx),
                procedure: field(procedure_idx),
            };

            if recipe.ingredients.trim().is_empty() {
                debug!("Recipe {:?} at row {} has no ingredient text", recipe.name, row + 1);
            }

            recipes.push(recipe);
        }

        Ok(Self {
            recipes,
            fingerprint: format!("{:x}", Sha256::digest(bytes)),
            loaded_at: Utc::now(),
        })
    }

    /// Build a catalog directly from recipes, in the given order
    pub fn from_recipes(recipes: Vec<Recipe>) -> Self {
        let mut hasher = Sha256::new();
        for recipe in &recipes {
            hasher.update(recipe.name.as_bytes());
            hasher.update(recipe.ingredients.as_bytes());
            hasher.update(recipe.procedure.as_bytes());
        }

        Self {
            recipes,
            fingerprint: format!("{:x}", hasher.finalize()),
            loaded_at: Utc::now(),
        }
    }

    pub fn get(&self, index: usize) -> Option<&Recipe> {
        self.recipes.get(index)
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes.iter()
    }

    /// Ingredient text of every recipe, in catalog order
    pub fn ingredient_texts(&self) -> impl Iterator<Item = &str> {
        self.recipes.iter().map(|r| r.ingredients.as_str())
    }

    /// Hex SHA-256 of the source the catalog was built from
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}
