//! Shopping list aggregation.
//!
//! Folds the ingredient lines of every recipe in a cart into one total per
//! (ingredient name, measurement unit). Units are opaque strings: `"g"` and
//! `"kg"` of the same ingredient stay separate rows.

use std::collections::HashMap;
use std::fmt;

use crate::domain::entities::IngredientLine;

/// Key under which ingredient amounts are merged.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AggregationKey {
    pub name: String,
    pub measurement_unit: String,
}

impl AggregationKey {
    pub fn new(name: impl Into<String>, measurement_unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            measurement_unit: measurement_unit.into(),
        }
    }
}

impl fmt::Display for AggregationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.name, self.measurement_unit)
    }
}

/// Summed ingredient amounts for a shopping cart.
///
/// Entries keep the order in which their key was first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShoppingList {
    entries: Vec<(AggregationKey, i64)>,
    index: HashMap<AggregationKey, usize>,
}

impl ShoppingList {
    /// Aggregates ingredient lines in a single pass.
    ///
    /// Amounts are summed exactly; nothing is sorted or rounded.
    pub fn aggregate<'a, I>(lines: I) -> Self
    where
        I: IntoIterator<Item = &'a IngredientLine>,
    {
        let mut list = Self::default();
        for line in lines {
            list.add(
                AggregationKey::new(line.name.as_str(), line.measurement_unit.as_str()),
                i64::from(line.amount),
            );
        }
        list
    }

    fn add(&mut self, key: AggregationKey, amount: i64) {
        match self.index.get(&key) {
            Some(&position) => self.entries[position].1 += amount,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, amount));
            }
        }
    }

    /// Total amount for a key, if any line contributed to it.
    pub fn total(&self, key: &AggregationKey) -> Option<i64> {
        self.index.get(key).map(|&position| self.entries[position].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AggregationKey, i64)> {
        self.entries.iter().map(|(key, total)| (key, *total))
    }

    /// Returns the totals as a plain map, discarding order.
    pub fn to_map(&self) -> HashMap<AggregationKey, i64> {
        self.entries.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn key(name: &str, unit: &str) -> AggregationKey {
        AggregationKey::new(name, unit)
    }

    #[test]
    fn test_empty_cart_yields_empty_list() {
        let list = ShoppingList::aggregate(&Vec::<IngredientLine>::new());
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
    }

    #[test]
    fn test_two_recipe_example() {
        let lines = vec![
            IngredientLine::new(1, "flour", "g", 200),
            IngredientLine::new(1, "egg", "pcs", 2),
            IngredientLine::new(2, "flour", "g", 100),
            IngredientLine::new(2, "egg", "pcs", 1),
            IngredientLine::new(2, "milk", "ml", 50),
        ];

        let list = ShoppingList::aggregate(&lines);

        let expected: HashMap<_, _> = [
            (key("flour", "g"), 300),
            (key("egg", "pcs"), 3),
            (key("milk", "ml"), 50),
        ]
        .into_iter()
        .collect();
        assert_eq!(list.to_map(), expected);
    }

    #[test]
    fn test_units_are_not_merged() {
        let lines = vec![
            IngredientLine::new(1, "flour", "g", 500),
            IngredientLine::new(2, "flour", "kg", 1),
        ];

        let list = ShoppingList::aggregate(&lines);

        assert_eq!(list.len(), 2);
        assert_eq!(list.total(&key("flour", "g")), Some(500));
        assert_eq!(list.total(&key("flour", "kg")), Some(1));
    }

    #[test]
    fn test_first_seen_order_is_kept() {
        let lines = vec![
            IngredientLine::new(1, "salt", "g", 5),
            IngredientLine::new(1, "butter", "g", 50),
            IngredientLine::new(2, "salt", "g", 2),
        ];

        let list = ShoppingList::aggregate(&lines);
        let keys: Vec<String> = list.iter().map(|(k, _)| k.to_string()).collect();

        assert_eq!(keys, vec!["salt, g", "butter, g"]);
    }

    #[test]
    fn test_key_display() {
        assert_eq!(key("milk", "ml").to_string(), "milk, ml");
    }

    #[test]
    fn test_large_amounts_do_not_overflow() {
        let lines = vec![
            IngredientLine::new(1, "rice", "g", i32::MAX),
            IngredientLine::new(2, "rice", "g", i32::MAX),
        ];

        let list = ShoppingList::aggregate(&lines);

        assert_eq!(list.total(&key("rice", "g")), Some(2 * i64::from(i32::MAX)));
    }

    fn arb_line() -> impl Strategy<Value = IngredientLine> {
        (
            1i64..5,
            prop::sample::select(vec!["flour", "egg", "milk", "sugar"]),
            prop::sample::select(vec!["g", "kg", "pcs"]),
            1i32..10_000,
        )
            .prop_map(|(recipe_id, name, unit, amount)| {
                IngredientLine::new(recipe_id, name, unit, amount)
            })
    }

    proptest! {
        #[test]
        fn prop_total_equals_sum_of_matching_lines(lines in prop::collection::vec(arb_line(), 0..64)) {
            let list = ShoppingList::aggregate(&lines);

            for (k, total) in list.iter() {
                let expected: i64 = lines
                    .iter()
                    .filter(|l| l.name == k.name && l.measurement_unit == k.measurement_unit)
                    .map(|l| i64::from(l.amount))
                    .sum();
                prop_assert_eq!(total, expected);
            }

            for line in &lines {
                prop_assert!(list.total(&key(&line.name, &line.measurement_unit)).is_some());
            }
        }

        #[test]
        fn prop_aggregation_is_repeatable(lines in prop::collection::vec(arb_line(), 0..64)) {
            prop_assert_eq!(ShoppingList::aggregate(&lines), ShoppingList::aggregate(&lines));
        }
    }
}
