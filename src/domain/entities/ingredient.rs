//! Ingredient reference data.

use serde::Serialize;

/// An ingredient with its measurement unit.
///
/// Ingredients are immutable reference data loaded in bulk (see the `admin`
/// binary); recipes point at them through ingredient lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ingredient {
    pub id: i64,
    pub name: String,
    pub measurement_unit: String,
}

impl Ingredient {
    pub fn new(id: i64, name: String, measurement_unit: String) -> Self {
        Self {
            id,
            name,
            measurement_unit,
        }
    }
}

/// Input data for creating an ingredient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIngredient {
    pub name: String,
    pub measurement_unit: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ingredient_creation() {
        let ingredient = Ingredient::new(3, "flour".to_string(), "g".to_string());

        assert_eq!(ingredient.id, 3);
        assert_eq!(ingredient.name, "flour");
        assert_eq!(ingredient.measurement_unit, "g");
    }
}
