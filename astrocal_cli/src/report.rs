//! Read-only report projections: the printable daily report and the
//! history CSV export. Nothing here mutates state.

use astrocal_core::{DayIntake, DaySummary, Profile, Result};
use std::path::Path;

/// Render the daily report as plain text.
///
/// Same fields as the original printable report: date, user, goal,
/// consumed, difference, then one line per logged food.
pub fn render_daily_report(profile: &Profile, day: &DayIntake) -> String {
    let goal = profile.tdee.unwrap_or(0);
    let difference = i64::from(day.total_calories) - i64::from(goal);

    let mut out = String::new();
    out.push_str("Reporte Diario de Calorías\n");
    out.push_str("==========================\n");
    out.push_str(&format!("Fecha: {}\n", day.date.format("%Y-%m-%d")));
    out.push_str(&format!("Usuario: {}\n", profile.name));
    out.push_str(&format!("Meta diaria: {} kcal\n", goal));
    out.push_str(&format!("Consumido: {} kcal\n", day.total_calories));
    out.push_str(&format!("Diferencia: {:+} kcal\n", difference));
    out.push_str("\nAlimentos consumidos:\n");

    if day.items.is_empty() {
        out.push_str("  (ninguno)\n");
    }
    for (i, item) in day.items.iter().enumerate() {
        let item_total = item.calories * item.quantity;
        out.push_str(&format!(
            "  {}. {} (x{}) - {} - {} kcal\n",
            i + 1,
            item.food_name,
            item.quantity,
            item.serving,
            item_total
        ));
    }
    out
}

/// Write history summaries to a CSV file, one row per day.
///
/// Returns the number of rows written.
pub fn write_history_csv(path: &Path, summaries: &[DaySummary]) -> Result<usize> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    for summary in summaries {
        writer
            .serialize(summary)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    }
    writer.flush()?;

    tracing::debug!("Wrote {} history rows to {:?}", summaries.len(), path);
    Ok(summaries.len())
}
