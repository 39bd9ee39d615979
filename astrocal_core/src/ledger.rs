//! Daily intake ledger mutations.
//!
//! A `DayIntake` holds the servings logged for one calendar day. Every
//! mutation recomputes the cached `total_calories` before returning, so the
//! total and the item list can never be observed out of sync.

use crate::{DayIntake, Error, Food, GoalStatus, IntakeItem, Result};
use chrono::{NaiveDate, Utc};

impl DayIntake {
    /// An empty ledger for the given date
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            items: Vec::new(),
            total_calories: 0,
        }
    }

    /// Log one serving of a catalog food.
    ///
    /// A food already present gains one to its quantity; a new food is
    /// appended with quantity 1, copying name/calories/serving from the
    /// catalog entry as of now.
    pub fn add_serving(&mut self, food: &Food) {
        if let Some(item) = self.items.iter_mut().find(|i| i.food_id == food.id) {
            item.quantity += 1;
        } else {
            self.items.push(IntakeItem {
                food_id: food.id.clone(),
                food_name: food.name.clone(),
                calories: food.calories,
                serving: food.serving.clone(),
                quantity: 1,
                timestamp: Utc::now(),
            });
        }
        self.recompute_total();
    }

    /// Add one serving to an already-logged food
    pub fn increase(&mut self, food_id: &str) -> Result<()> {
        let item = self
            .items
            .iter_mut()
            .find(|i| i.food_id == food_id)
            .ok_or_else(|| Error::NotFound(format!("'{}' is not in today's intake", food_id)))?;
        item.quantity += 1;
        self.recompute_total();
        Ok(())
    }

    /// Remove one serving of an already-logged food.
    ///
    /// At quantity 1 the item is removed outright; a quantity-0 item never
    /// stays in the ledger.
    pub fn decrease(&mut self, food_id: &str) -> Result<()> {
        let idx = self
            .items
            .iter()
            .position(|i| i.food_id == food_id)
            .ok_or_else(|| Error::NotFound(format!("'{}' is not in today's intake", food_id)))?;

        if self.items[idx].quantity <= 1 {
            self.items.remove(idx);
        } else {
            self.items[idx].quantity -= 1;
        }
        self.recompute_total();
        Ok(())
    }

    /// Clear all items for the day. The day record itself stays addressable.
    pub fn reset(&mut self) {
        self.items.clear();
        self.recompute_total();
    }

    /// Total servings logged today, across all foods
    pub fn total_servings(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Refresh the cached total from the items it summarizes
    pub fn recompute_total(&mut self) {
        self.total_calories = self.items.iter().map(|i| i.calories * i.quantity).sum();
    }
}

/// Classify today's total against the daily target.
///
/// `Exact` requires a nonzero goal: 0 kcal logged against a 0 kcal goal is
/// not an achievement, it classifies as `Under { remaining: 0 }`.
pub fn goal_comparison(total: u32, goal: u32) -> GoalStatus {
    if total > goal {
        GoalStatus::Over {
            excess: total - goal,
        }
    } else if total == goal && goal > 0 {
        GoalStatus::Exact
    } else {
        GoalStatus::Under {
            remaining: goal - total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::build_default_catalog;
    use crate::Catalog;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn catalog() -> Catalog {
        build_default_catalog()
    }

    fn assert_total_consistent(day: &DayIntake) {
        let expected: u32 = day.items.iter().map(|i| i.calories * i.quantity).sum();
        assert_eq!(day.total_calories, expected);
    }

    #[test]
    fn test_add_new_food_starts_at_one_serving() {
        let catalog = catalog();
        let mut day = DayIntake::empty(today());

        day.add_serving(catalog.lookup("manzana").unwrap());

        assert_eq!(day.items.len(), 1);
        assert_eq!(day.items[0].quantity, 1);
        assert_eq!(day.items[0].food_name, "Manzana");
        assert_eq!(day.total_calories, 60);
        assert_total_consistent(&day);
    }

    #[test]
    fn test_add_existing_food_increments_instead_of_duplicating() {
        let catalog = catalog();
        let mut day = DayIntake::empty(today());
        let manzana = catalog.lookup("manzana").unwrap();

        day.add_serving(manzana);
        day.add_serving(manzana);

        assert_eq!(day.items.len(), 1);
        assert_eq!(day.items[0].quantity, 2);
        assert_eq!(day.total_calories, 120);
    }

    #[test]
    fn test_item_snapshots_catalog_values_at_add_time() {
        let mut day = DayIntake::empty(today());
        let mut food = build_default_catalog().lookup("huevo").unwrap().clone();
        day.add_serving(&food);

        // A later catalog change must not rewrite the logged entry
        food.calories = 999;
        assert_eq!(day.items[0].calories, 70);
        assert_eq!(day.total_calories, 70);
    }

    #[test]
    fn test_increase_requires_existing_item() {
        let catalog = catalog();
        let mut day = DayIntake::empty(today());

        let err = day.increase("manzana").unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        assert!(day.is_empty());

        day.add_serving(catalog.lookup("manzana").unwrap());
        day.increase("manzana").unwrap();
        assert_eq!(day.items[0].quantity, 2);
        assert_total_consistent(&day);
    }

    #[test]
    fn test_decrease_at_quantity_one_removes_item() {
        let catalog = catalog();
        let mut day = DayIntake::empty(today());
        day.add_serving(catalog.lookup("manzana").unwrap());

        day.decrease("manzana").unwrap();

        assert!(day.is_empty());
        assert_eq!(day.total_calories, 0);
        // No quantity-0 item may linger
        assert!(day.items.iter().all(|i| i.quantity >= 1));
    }

    #[test]
    fn test_decrease_above_one_decrements() {
        let catalog = catalog();
        let mut day = DayIntake::empty(today());
        let manzana = catalog.lookup("manzana").unwrap();
        day.add_serving(manzana);
        day.add_serving(manzana);
        day.add_serving(manzana);

        day.decrease("manzana").unwrap();

        assert_eq!(day.items[0].quantity, 2);
        assert_eq!(day.total_calories, 120);
    }

    #[test]
    fn test_decrease_missing_item_is_not_found() {
        let mut day = DayIntake::empty(today());
        let err = day.decrease("fantasma").unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_total_stays_consistent_across_mutation_sequence() {
        let catalog = catalog();
        let mut day = DayIntake::empty(today());
        let foods = ["manzana", "tortilla_maiz", "frijoles", "huevo"];

        for id in foods {
            day.add_serving(catalog.lookup(id).unwrap());
            assert_total_consistent(&day);
        }
        day.increase("tortilla_maiz").unwrap();
        assert_total_consistent(&day);
        day.increase("tortilla_maiz").unwrap();
        assert_total_consistent(&day);
        day.decrease("manzana").unwrap();
        assert_total_consistent(&day);
        day.decrease("frijoles").unwrap();
        assert_total_consistent(&day);

        // Insertion order preserved for the survivors
        let ids: Vec<_> = day.items.iter().map(|i| i.food_id.as_str()).collect();
        assert_eq!(ids, vec!["tortilla_maiz", "huevo"]);
    }

    #[test]
    fn test_reset_clears_items_but_day_stays_usable() {
        let catalog = catalog();
        let mut day = DayIntake::empty(today());
        day.add_serving(catalog.lookup("manzana").unwrap());
        day.add_serving(catalog.lookup("huevo").unwrap());

        day.reset();

        assert!(day.is_empty());
        assert_eq!(day.total_calories, 0);
        assert_eq!(day.date, today());

        // Still open for further logging after a reset
        day.add_serving(catalog.lookup("huevo").unwrap());
        assert_eq!(day.total_calories, 70);
    }

    #[test]
    fn test_total_servings() {
        let catalog = catalog();
        let mut day = DayIntake::empty(today());
        let manzana = catalog.lookup("manzana").unwrap();
        day.add_serving(manzana);
        day.add_serving(manzana);
        day.add_serving(catalog.lookup("huevo").unwrap());

        assert_eq!(day.total_servings(), 3);
    }

    #[test]
    fn test_goal_comparison_under() {
        assert_eq!(
            goal_comparison(1800, 2000),
            GoalStatus::Under { remaining: 200 }
        );
    }

    #[test]
    fn test_goal_comparison_exact_requires_nonzero_goal() {
        assert_eq!(goal_comparison(2000, 2000), GoalStatus::Exact);
        // The 0/0 boundary is deliberately not Exact
        assert_eq!(goal_comparison(0, 0), GoalStatus::Under { remaining: 0 });
    }

    #[test]
    fn test_goal_comparison_over() {
        assert_eq!(goal_comparison(2100, 2000), GoalStatus::Over { excess: 100 });
    }
}
