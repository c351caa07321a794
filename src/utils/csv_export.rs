//! CSV rendering of shopping lists.

use crate::domain::shopping_list::ShoppingList;
use crate::error::AppError;
use serde_json::json;

/// UTF-8 byte-order mark written before the first row so spreadsheet
/// applications detect the encoding.
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Renders a shopping list as CSV.
///
/// One row per aggregation key: `"<name>, <unit>",<total>`, CRLF-terminated,
/// with no header row. An empty list produces only the byte-order mark.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if the CSV writer fails.
pub fn render_shopping_list(list: &ShoppingList) -> Result<Vec<u8>, AppError> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(UTF8_BOM.to_vec());

    for (key, total) in list.iter() {
        writer
            .write_record([key.to_string(), total.to_string()])
            .map_err(csv_error)?;
    }

    writer
        .into_inner()
        .map_err(|e| csv_error(e.into_error().into()))
}

fn csv_error(e: csv::Error) -> AppError {
    AppError::internal("Failed to render CSV", json!({ "reason": e.to_string() }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::IngredientLine;

    #[test]
    fn test_empty_list_is_bom_only() {
        let body = render_shopping_list(&ShoppingList::default()).unwrap();
        assert_eq!(body, UTF8_BOM);
    }

    #[test]
    fn test_rows_are_quoted_keys_with_totals() {
        let lines = vec![
            IngredientLine::new(1, "flour", "g", 200),
            IngredientLine::new(2, "flour", "g", 100),
            IngredientLine::new(2, "milk", "ml", 50),
        ];
        let list = ShoppingList::aggregate(&lines);

        let body = render_shopping_list(&list).unwrap();

        assert!(body.starts_with(UTF8_BOM));
        let text = std::str::from_utf8(&body[UTF8_BOM.len()..]).unwrap();
        assert_eq!(text, "\"flour, g\",300\r\n\"milk, ml\",50\r\n");
    }

    #[test]
    fn test_quotes_inside_names_are_escaped() {
        let lines = vec![IngredientLine::new(1, "\"fancy\" salt", "g", 3)];
        let body = render_shopping_list(&ShoppingList::aggregate(&lines)).unwrap();

        let text = std::str::from_utf8(&body[UTF8_BOM.len()..]).unwrap();
        assert_eq!(text, "\"\"\"fancy\"\" salt, g\",3\r\n");
    }

    #[test]
    fn test_non_ascii_names_survive() {
        let lines = vec![IngredientLine::new(1, "мука", "г", 150)];
        let body = render_shopping_list(&ShoppingList::aggregate(&lines)).unwrap();

        let text = std::str::from_utf8(&body[UTF8_BOM.len()..]).unwrap();
        assert_eq!(text, "\"мука, г\",150\r\n");
    }
}
