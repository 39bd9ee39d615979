//! Daily energy target computation (Mifflin-St Jeor).
//!
//! The model is a pure function over a complete `BodyMetrics`: BMR from the
//! Mifflin-St Jeor formula, scaled by a fixed activity factor, rounded to
//! the nearest kcal. Completeness is enforced upstream by
//! `Profile::metrics`, so this module never sees a partial profile.

use crate::{BodyMetrics, Error, Profile, Result, Sex};

/// Plausible attribute ranges, matching the registration form
pub const AGE_RANGE: (u32, u32) = (15, 100);
pub const WEIGHT_KG_RANGE: (f64, f64) = (30.0, 300.0);
pub const HEIGHT_CM_RANGE: (f64, f64) = (100.0, 250.0);

/// Basal metabolic rate in kcal, before the activity multiplier
pub fn basal_metabolic_rate(metrics: &BodyMetrics) -> f64 {
    let base = 10.0 * metrics.weight_kg + 6.25 * metrics.height_cm - 5.0 * f64::from(metrics.age);
    match metrics.sex {
        Sex::Male => base + 5.0,
        Sex::Female => base - 161.0,
    }
}

/// Total daily energy expenditure in kcal, rounded to the nearest integer.
///
/// Deterministic: identical metrics always yield an identical target.
pub fn daily_target(metrics: &BodyMetrics) -> u32 {
    let tdee = basal_metabolic_rate(metrics) * metrics.activity.factor();
    // Validated metrics keep BMR well above zero; clamp guards the cast only.
    tdee.round().max(0.0) as u32
}

/// Check that a metric set lies within the plausible ranges
pub fn validate_metrics(metrics: &BodyMetrics) -> Result<()> {
    if metrics.age < AGE_RANGE.0 || metrics.age > AGE_RANGE.1 {
        return Err(Error::InvalidAttribute(format!(
            "age {} outside {}-{}",
            metrics.age, AGE_RANGE.0, AGE_RANGE.1
        )));
    }
    if metrics.weight_kg < WEIGHT_KG_RANGE.0 || metrics.weight_kg > WEIGHT_KG_RANGE.1 {
        return Err(Error::InvalidAttribute(format!(
            "weight {} kg outside {}-{}",
            metrics.weight_kg, WEIGHT_KG_RANGE.0, WEIGHT_KG_RANGE.1
        )));
    }
    if metrics.height_cm < HEIGHT_CM_RANGE.0 || metrics.height_cm > HEIGHT_CM_RANGE.1 {
        return Err(Error::InvalidAttribute(format!(
            "height {} cm outside {}-{}",
            metrics.height_cm, HEIGHT_CM_RANGE.0, HEIGHT_CM_RANGE.1
        )));
    }
    Ok(())
}

impl Profile {
    /// Refresh the cached daily target from the current attributes.
    ///
    /// Fails with `IncompleteProfile` while any attribute is missing and
    /// with `InvalidAttribute` when one is outside its plausible range;
    /// the cache is only written on success.
    pub fn recompute_tdee(&mut self) -> Result<u32> {
        let metrics = self.metrics()?;
        validate_metrics(&metrics)?;
        let target = daily_target(&metrics);
        self.tdee = Some(target);
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ActivityLevel;

    fn metrics(sex: Sex, age: u32, weight_kg: f64, height_cm: f64, activity: ActivityLevel) -> BodyMetrics {
        BodyMetrics {
            sex,
            age,
            weight_kg,
            height_cm,
            activity,
        }
    }

    #[test]
    fn test_reference_male_moderate() {
        // round((10*70 + 6.25*175 - 5*25 + 5) * 1.55) = round(1673.75 * 1.55) = round(2594.3125)
        let m = metrics(Sex::Male, 25, 70.0, 175.0, ActivityLevel::Moderate);
        assert_eq!(daily_target(&m), 2594);
    }

    #[test]
    fn test_reference_female_sedentary() {
        // round((10*60 + 6.25*165 - 5*30 - 161) * 1.2) = round(1320.25 * 1.2) = round(1584.3)
        let m = metrics(Sex::Female, 30, 60.0, 165.0, ActivityLevel::Sedentary);
        assert_eq!(daily_target(&m), 1584);
    }

    #[test]
    fn test_deterministic() {
        let m = metrics(Sex::Female, 42, 68.5, 170.0, ActivityLevel::Active);
        assert_eq!(daily_target(&m), daily_target(&m));
    }

    #[test]
    fn test_activity_factors() {
        let base = metrics(Sex::Male, 25, 70.0, 175.0, ActivityLevel::Sedentary);
        let bmr = basal_metabolic_rate(&base);
        for (activity, factor) in [
            (ActivityLevel::Sedentary, 1.2),
            (ActivityLevel::Light, 1.375),
            (ActivityLevel::Moderate, 1.55),
            (ActivityLevel::Active, 1.725),
            (ActivityLevel::VeryActive, 1.9),
        ] {
            let m = BodyMetrics { activity, ..base };
            assert_eq!(daily_target(&m), (bmr * factor).round() as u32);
        }
    }

    #[test]
    fn test_incomplete_profile_rejected() {
        let mut profile = Profile::new("test", "hash");
        profile.sex = Some(Sex::Male);
        profile.age = Some(25);
        profile.weight_kg = Some(70.0);
        profile.height_cm = Some(175.0);
        // activity still missing

        let err = profile.recompute_tdee().unwrap_err();
        assert!(matches!(err, Error::IncompleteProfile));
        assert_eq!(profile.tdee, None);
    }

    #[test]
    fn test_recompute_caches_target() {
        let mut profile = Profile::new("test", "hash");
        profile.sex = Some(Sex::Male);
        profile.age = Some(25);
        profile.weight_kg = Some(70.0);
        profile.height_cm = Some(175.0);
        profile.activity = Some(ActivityLevel::Moderate);

        assert_eq!(profile.recompute_tdee().unwrap(), 2594);
        assert_eq!(profile.tdee, Some(2594));

        // Changing an input attribute and recomputing refreshes the cache
        profile.activity = Some(ActivityLevel::Sedentary);
        let updated = profile.recompute_tdee().unwrap();
        assert_ne!(updated, 2594);
        assert_eq!(profile.tdee, Some(updated));
    }

    #[test]
    fn test_out_of_range_attribute_rejected() {
        let m = metrics(Sex::Male, 12, 70.0, 175.0, ActivityLevel::Moderate);
        assert!(matches!(
            validate_metrics(&m),
            Err(Error::InvalidAttribute(_))
        ));

        let m = metrics(Sex::Female, 30, 20.0, 165.0, ActivityLevel::Light);
        assert!(validate_metrics(&m).is_err());

        let m = metrics(Sex::Female, 30, 60.0, 300.0, ActivityLevel::Light);
        assert!(validate_metrics(&m).is_err());
    }
}
