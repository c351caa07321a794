//! Ingredient search and bulk import.

use std::io::Read;
use std::sync::Arc;

use serde_json::json;
use tracing::info;

use crate::domain::entities::{Ingredient, NewIngredient};
use crate::domain::repositories::IngredientRepository;
use crate::error::AppError;

/// Maximum number of ingredients returned by a search.
pub const SEARCH_LIMIT: i64 = 100;

const IMPORT_BATCH_SIZE: usize = 1000;

pub struct IngredientService<I: IngredientRepository + ?Sized> {
    repository: Arc<I>,
}

impl<I: IngredientRepository + ?Sized> IngredientService<I> {
    pub fn new(repository: Arc<I>) -> Self {
        Self { repository }
    }

    /// Lists ingredients whose name starts with `prefix`, ignoring case.
    ///
    /// An empty prefix lists every ingredient. `limit` is clamped to
    /// `1..=SEARCH_LIMIT` and defaults to [`SEARCH_LIMIT`].
    pub async fn search(&self, prefix: &str, limit: Option<i64>) -> Result<Vec<Ingredient>, AppError> {
        let limit = limit.unwrap_or(SEARCH_LIMIT).clamp(1, SEARCH_LIMIT);
        self.repository.search(prefix.trim(), limit).await
    }

    /// Imports `name,measurement_unit` rows from CSV.
    ///
    /// A leading `name,measurement_unit` header row is skipped. Rows are
    /// validated up front so a bad file writes nothing. Returns the number of
    /// ingredients inserted.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] if a row is malformed or has an empty field
    /// - [`AppError::Internal`] on database errors
    pub async fn import_csv<Rd: Read>(&self, reader: Rd) -> Result<u64, AppError> {
        let ingredients = parse_ingredients(reader)?;

        let mut inserted = 0;
        let mut rest = ingredients;
        while !rest.is_empty() {
            let tail = rest.split_off(rest.len().min(IMPORT_BATCH_SIZE));
            inserted += self.repository.insert_many(rest).await?;
            rest = tail;
        }

        info!(inserted, "Ingredients imported");
        Ok(inserted)
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        self.repository.count().await
    }
}

fn parse_ingredients<Rd: Read>(reader: Rd) -> Result<Vec<NewIngredient>, AppError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut ingredients = Vec::new();
    for (index, record) in csv_reader.records().enumerate() {
        let line = index + 1;
        let record = record.map_err(|e| {
            AppError::bad_request(
                "Malformed CSV",
                json!({ "line": line, "reason": e.to_string() }),
            )
        })?;

        if record.len() != 2 {
            return Err(AppError::bad_request(
                "Expected two columns: name, measurement_unit",
                json!({ "line": line, "columns": record.len() }),
            ));
        }

        let (name, unit) = (&record[0], &record[1]);
        if line == 1
            && name.eq_ignore_ascii_case("name")
            && unit.eq_ignore_ascii_case("measurement_unit")
        {
            continue;
        }
        if name.is_empty() || unit.is_empty() {
            return Err(AppError::bad_request(
                "Ingredient name and measurement unit must not be empty",
                json!({ "line": line }),
            ));
        }

        ingredients.push(NewIngredient {
            name: name.to_string(),
            measurement_unit: unit.to_string(),
        });
    }

    Ok(ingredients)
}
