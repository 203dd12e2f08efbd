use serde::{Deserialize, Serialize};

/// A single catalog entry. Its identity is its position in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub name: String,
    pub ingredients: String,
    pub procedure: String,
}

impl Recipe {
    pub fn new(
        name: impl Into<String>,
        ingredients: impl Into<String>,
        procedure: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            ingredients: ingredients.into(),
            procedure: procedure.into(),
        }
    }
}

/// Required catalog column names, matched after trimming header whitespace.
pub const RECIPE_COLUMN: &str = "Recipe";
pub const INGREDIENT_COLUMN: &str = "Ingredient";
pub const PROCEDURE_COLUMN: &str = "Procedure";
