//! Built-in food catalog.
//!
//! Foods are "equivalents": each entry carries a fixed kcal count for one
//! serving together with a human-readable serving description. The catalog
//! is static reference data; ledger entries copy what they need at add time.

use crate::types::*;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Cached default catalog - built once and reused across all operations
static DEFAULT_CATALOG: Lazy<Catalog> = Lazy::new(build_default_catalog);

/// Get a reference to the cached default catalog
pub fn get_default_catalog() -> &'static Catalog {
    &DEFAULT_CATALOG
}

/// The complete catalog of foods, keyed by food id
#[derive(Clone, Debug)]
pub struct Catalog {
    foods: HashMap<String, Food>,
    /// Insertion order of ids, for stable listings
    order: Vec<String>,
}

/// Search/filter criteria for catalog listings
#[derive(Clone, Debug, Default)]
pub struct FoodFilter {
    /// Case-insensitive substring match on the food name
    pub search: Option<String>,
    pub category: Option<FoodCategory>,
    pub min_calories: Option<u32>,
    pub max_calories: Option<u32>,
}

impl Catalog {
    pub fn new(foods: Vec<Food>) -> Self {
        let order = foods.iter().map(|f| f.id.clone()).collect();
        let foods = foods.into_iter().map(|f| (f.id.clone(), f)).collect();
        Self { foods, order }
    }

    /// Look up a food by id
    pub fn lookup(&self, food_id: &str) -> Option<&Food> {
        self.foods.get(food_id)
    }

    pub fn len(&self) -> usize {
        self.foods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
    }

    /// All foods in catalog order
    pub fn iter(&self) -> impl Iterator<Item = &Food> {
        self.order.iter().filter_map(move |id| self.foods.get(id))
    }

    /// Foods matching the given filter, in catalog order
    pub fn filter(&self, filter: &FoodFilter) -> Vec<&Food> {
        let needle = filter.search.as_ref().map(|s| s.to_lowercase());
        self.iter()
            .filter(|food| {
                let matches_search = needle
                    .as_ref()
                    .map_or(true, |n| food.name.to_lowercase().contains(n));
                let matches_category = filter
                    .category
                    .map_or(true, |cat| food.category == cat);
                let matches_min = filter
                    .min_calories
                    .map_or(true, |min| min == 0 || food.calories >= min);
                let matches_max = filter
                    .max_calories
                    .map_or(true, |max| max == 0 || food.calories <= max);
                matches_search && matches_category && matches_min && matches_max
            })
            .collect()
    }

    /// Validate the catalog for consistency and completeness
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for (id, food) in &self.foods {
            if id.is_empty() || food.id.is_empty() {
                errors.push("Food has empty ID".to_string());
            }
            if id != &food.id {
                errors.push(format!(
                    "Food key '{}' doesn't match food.id '{}'",
                    id, food.id
                ));
            }
            if food.name.is_empty() {
                errors.push(format!("Food '{}' has empty name", id));
            }
            if food.serving.is_empty() {
                errors.push(format!("Food '{}' has empty serving description", id));
            }
            if food.calories == 0 {
                errors.push(format!("Food '{}' has zero calories", id));
            }
        }

        // Every category should be represented
        for category in FoodCategory::ALL {
            if !self.foods.values().any(|f| f.category == category) {
                errors.push(format!("Catalog has no foods in category {:?}", category));
            }
        }

        errors
    }
}

fn food(id: &str, name: &str, category: FoodCategory, calories: u32, serving: &str) -> Food {
    Food {
        id: id.into(),
        name: name.into(),
        category,
        calories,
        serving: serving.into(),
    }
}

/// Builds the default catalog with the built-in food equivalents
pub fn build_default_catalog() -> Catalog {
    use FoodCategory::*;

    Catalog::new(vec![
        // Frutas
        food("manzana", "Manzana", Frutas, 60, "1 pieza"),
        food("platano", "Plátano", Frutas, 105, "1 pieza"),
        food("naranja", "Naranja", Frutas, 62, "1 pieza"),
        food("papaya", "Papaya picada", Frutas, 55, "1 taza"),
        food("sandia", "Sandía picada", Frutas, 46, "1 taza"),
        // Verduras
        food("nopal", "Nopal cocido", Verduras, 22, "1 taza"),
        food("jitomate", "Jitomate", Verduras, 22, "1 pieza"),
        food("zanahoria", "Zanahoria", Verduras, 25, "1 pieza"),
        food("calabacita", "Calabacita cocida", Verduras, 27, "1 taza"),
        // Cereales
        food("tortilla_maiz", "Tortilla de maíz", Cereales, 64, "1 pieza"),
        food("bolillo", "Bolillo", Cereales, 120, "1/2 pieza"),
        food("arroz_cocido", "Arroz cocido", Cereales, 102, "1/2 taza"),
        food("avena", "Avena cocida", Cereales, 75, "1/2 taza"),
        food("pan_integral", "Pan integral", Cereales, 69, "1 rebanada"),
        // Leguminosas
        food("frijoles", "Frijoles cocidos", Leguminosas, 114, "1/2 taza"),
        food("lentejas", "Lentejas cocidas", Leguminosas, 115, "1/2 taza"),
        food("garbanzos", "Garbanzos cocidos", Leguminosas, 134, "1/2 taza"),
        // Origen animal
        food("pollo_pechuga", "Pechuga de pollo asada", OrigenAnimal, 140, "85 g"),
        food("huevo", "Huevo", OrigenAnimal, 70, "1 pieza"),
        food("atun_agua", "Atún en agua", OrigenAnimal, 100, "1/2 lata"),
        food("bistec_res", "Bistec de res", OrigenAnimal, 160, "85 g"),
        // Lácteos
        food("leche_descremada", "Leche descremada", Lacteos, 95, "1 taza"),
        food("yogur_natural", "Yogur natural", Lacteos, 100, "3/4 taza"),
        food("queso_panela", "Queso panela", Lacteos, 72, "40 g"),
        // Grasas
        food("aguacate", "Aguacate", Grasas, 77, "1/3 pieza"),
        food("almendras", "Almendras", Grasas, 84, "12 piezas"),
        food("aceite_oliva", "Aceite de oliva", Grasas, 45, "1 cucharadita"),
        // Azúcares
        food("azucar", "Azúcar", Azucares, 40, "2 cucharaditas"),
        food("miel", "Miel de abeja", Azucares, 64, "1 cucharada"),
        food("chocolate", "Chocolate de mesa", Azucares, 90, "1/4 tablilla"),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_loads() {
        let catalog = build_default_catalog();
        assert_eq!(catalog.len(), 30);
    }

    #[test]
    fn test_default_catalog_validates() {
        let catalog = build_default_catalog();
        let errors = catalog.validate();
        assert!(
            errors.is_empty(),
            "Default catalog has validation errors: {:?}",
            errors
        );
    }

    #[test]
    fn test_lookup_by_id() {
        let catalog = build_default_catalog();
        let tortilla = catalog.lookup("tortilla_maiz").unwrap();
        assert_eq!(tortilla.name, "Tortilla de maíz");
        assert_eq!(tortilla.calories, 64);
        assert_eq!(tortilla.serving, "1 pieza");

        assert!(catalog.lookup("no_such_food").is_none());
    }

    #[test]
    fn test_every_category_represented() {
        let catalog = build_default_catalog();
        for category in FoodCategory::ALL {
            assert!(
                catalog.iter().any(|f| f.category == category),
                "No foods in category {:?}",
                category
            );
        }
    }

    #[test]
    fn test_filter_by_search_is_case_insensitive() {
        let catalog = build_default_catalog();
        let filter = FoodFilter {
            search: Some("TORTILLA".into()),
            ..Default::default()
        };
        let matches = catalog.filter(&filter);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].id, "tortilla_maiz");
    }

    #[test]
    fn test_filter_by_category_and_calorie_range() {
        let catalog = build_default_catalog();
        let filter = FoodFilter {
            category: Some(FoodCategory::Frutas),
            min_calories: Some(60),
            max_calories: Some(110),
            ..Default::default()
        };
        let matches = catalog.filter(&filter);
        assert!(!matches.is_empty());
        for food in matches {
            assert_eq!(food.category, FoodCategory::Frutas);
            assert!(food.calories >= 60 && food.calories <= 110);
        }
    }

    #[test]
    fn test_zero_calorie_bound_is_ignored() {
        // A zero min/max behaves like "no bound", matching the search form
        let catalog = build_default_catalog();
        let filter = FoodFilter {
            min_calories: Some(0),
            max_calories: Some(0),
            ..Default::default()
        };
        assert_eq!(catalog.filter(&filter).len(), catalog.len());
    }

    #[test]
    fn test_iteration_is_stable() {
        let catalog = build_default_catalog();
        let first: Vec<_> = catalog.iter().map(|f| f.id.clone()).collect();
        let second: Vec<_> = catalog.iter().map(|f| f.id.clone()).collect();
        assert_eq!(first, second);
    }
}
