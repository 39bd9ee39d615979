//! Core domain types for AstroCal.
//!
//! This module defines the fundamental types used throughout the system:
//! - User profiles and their body metrics
//! - Catalog foods and categories
//! - Daily intake ledgers and their items
//! - Goal comparison states

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Profile Types
// ============================================================================

/// Biological sex, as used by the Mifflin-St Jeor formula
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
}

/// Physical activity level used to scale the basal metabolic rate
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
    VeryActive,
}

impl ActivityLevel {
    /// Multiplier applied to BMR for this activity level
    pub fn factor(self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
        }
    }
}

/// The complete set of attributes the energy model needs.
///
/// A `Profile` accumulates these as optionals; `Profile::metrics` only
/// yields a `BodyMetrics` once every field is present, so the energy model
/// itself never sees an incomplete input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyMetrics {
    pub sex: Sex,
    pub age: u32,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub activity: ActivityLevel,
}

/// A registered user profile
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub name: String,
    pub password_hash: String,
    pub sex: Option<Sex>,
    pub age: Option<u32>,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub activity: Option<ActivityLevel>,
    /// Cached daily energy target in kcal; present only once the
    /// profile is complete, refreshed whenever an attribute changes.
    pub tdee: Option<u32>,
    pub created_at: DateTime<Utc>,
}

impl Profile {
    /// Create a fresh profile with identity only
    pub fn new(name: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            password_hash: password_hash.into(),
            sex: None,
            age: None,
            weight_kg: None,
            height_cm: None,
            activity: None,
            tdee: None,
            created_at: Utc::now(),
        }
    }

    /// The complete metric set, or `IncompleteProfile` if any attribute
    /// is still missing.
    pub fn metrics(&self) -> crate::Result<BodyMetrics> {
        match (
            self.sex,
            self.age,
            self.weight_kg,
            self.height_cm,
            self.activity,
        ) {
            (Some(sex), Some(age), Some(weight_kg), Some(height_cm), Some(activity)) => {
                Ok(BodyMetrics {
                    sex,
                    age,
                    weight_kg,
                    height_cm,
                    activity,
                })
            }
            _ => Err(crate::Error::IncompleteProfile),
        }
    }
}

// ============================================================================
// Catalog Types
// ============================================================================

/// Food group of a catalog entry
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FoodCategory {
    Frutas,
    Verduras,
    Cereales,
    Leguminosas,
    OrigenAnimal,
    Lacteos,
    Grasas,
    Azucares,
}

impl FoodCategory {
    /// Display label as shown in the catalog listing
    pub fn label(self) -> &'static str {
        match self {
            FoodCategory::Frutas => "Frutas",
            FoodCategory::Verduras => "Verduras",
            FoodCategory::Cereales => "Cereales",
            FoodCategory::Leguminosas => "Leguminosas",
            FoodCategory::OrigenAnimal => "Origen animal",
            FoodCategory::Lacteos => "Lácteos",
            FoodCategory::Grasas => "Grasas",
            FoodCategory::Azucares => "Azúcares",
        }
    }

    pub const ALL: [FoodCategory; 8] = [
        FoodCategory::Frutas,
        FoodCategory::Verduras,
        FoodCategory::Cereales,
        FoodCategory::Leguminosas,
        FoodCategory::OrigenAnimal,
        FoodCategory::Lacteos,
        FoodCategory::Grasas,
        FoodCategory::Azucares,
    ];
}

/// A catalog food: fixed kcal per serving, not per weight.
///
/// Immutable reference data; ledger items copy what they need at add time.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Food {
    pub id: String,
    pub name: String,
    pub category: FoodCategory,
    /// kcal for exactly one serving
    pub calories: u32,
    /// Human-readable serving description (e.g. "1 pieza", "1/2 taza")
    pub serving: String,
}

// ============================================================================
// Ledger Types
// ============================================================================

/// One logged entry in a day's ledger.
///
/// Calories, serving and name are snapshots taken from the catalog when the
/// food was first added; later catalog changes do not rewrite history.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IntakeItem {
    pub food_id: String,
    pub food_name: String,
    pub calories: u32,
    pub serving: String,
    pub quantity: u32,
    pub timestamp: DateTime<Utc>,
}

/// One calendar day's intake ledger for a profile
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DayIntake {
    pub date: NaiveDate,
    pub items: Vec<IntakeItem>,
    /// Derived cache: always Σ (calories × quantity) over `items`.
    /// Recomputed after every mutation, never set independently.
    pub total_calories: u32,
}

/// Where today's total stands relative to the daily target
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GoalStatus {
    /// Below target; `remaining` kcal left to reach it
    Under { remaining: u32 },
    /// Exactly on target (only when the target is nonzero)
    Exact,
    /// Above target by `excess` kcal
    Over { excess: u32 },
}

// ============================================================================
// Session Type
// ============================================================================

/// The active login session.
///
/// Created at login, cleared at logout; commands that need a profile take
/// this explicitly rather than reading ambient global state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
    pub profile_id: Uuid,
    pub started_at: DateTime<Utc>,
}

impl Session {
    pub fn new(profile_id: Uuid) -> Self {
        Self {
            profile_id,
            started_at: Utc::now(),
        }
    }
}
