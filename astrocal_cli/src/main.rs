use astrocal_core::*;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;

mod report;

#[derive(Parser)]
#[command(name = "astrocal")]
#[command(about = "Contador de calorías personal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in by name, registering a new profile if the name is unknown
    Login {
        name: String,

        /// Password (prompted on stdin when omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// End the current session
    Logout,

    /// Set body attributes and recompute the daily target
    Profile {
        /// male | female
        #[arg(long)]
        sex: Option<String>,

        /// Age in years (15-100)
        #[arg(long)]
        age: Option<u32>,

        /// Weight in kg (30-300)
        #[arg(long)]
        weight_kg: Option<f64>,

        /// Height in cm (100-250)
        #[arg(long)]
        height_cm: Option<f64>,

        /// sedentary | light | moderate | active | very_active
        #[arg(long)]
        activity: Option<String>,
    },

    /// Search the food catalog
    Foods {
        /// Substring to match in the food name
        #[arg(long)]
        search: Option<String>,

        /// Food category (frutas, verduras, cereales, leguminosas,
        /// origen_animal, lacteos, grasas, azucares)
        #[arg(long)]
        category: Option<String>,

        /// Minimum kcal per serving (0 = no bound)
        #[arg(long)]
        min_kcal: Option<u32>,

        /// Maximum kcal per serving (0 = no bound)
        #[arg(long)]
        max_kcal: Option<u32>,
    },

    /// Log one serving of a catalog food for today
    Add { food_id: String },

    /// Add one serving to an already-logged food
    Inc { food_id: String },

    /// Remove one serving of an already-logged food
    Dec { food_id: String },

    /// Clear today's intake
    Reset,

    /// Show today's intake against the daily target
    Status,

    /// Show recent day summaries
    History {
        /// Also write the summaries to a CSV file
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// Print the daily report
    Report,
}

fn main() -> Result<()> {
    astrocal_core::logging::init();

    let cli = Cli::parse();

    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    let store = ProfileStore::open(&data_dir)?;

    match cli.command {
        Commands::Login { name, password } => cmd_login(&store, &name, password),
        Commands::Logout => cmd_logout(&store),
        Commands::Profile {
            sex,
            age,
            weight_kg,
            height_cm,
            activity,
        } => cmd_profile(&store, sex, age, weight_kg, height_cm, activity),
        Commands::Foods {
            search,
            category,
            min_kcal,
            max_kcal,
        } => cmd_foods(search, category, min_kcal, max_kcal),
        Commands::Add { food_id } => cmd_add(&store, &food_id),
        Commands::Inc { food_id } => cmd_mutate(&store, &food_id, Mutation::Increase),
        Commands::Dec { food_id } => cmd_mutate(&store, &food_id, Mutation::Decrease),
        Commands::Reset => cmd_reset(&store),
        Commands::Status => cmd_status(&store),
        Commands::History { export } => cmd_history(&store, &config, export),
        Commands::Report => cmd_report(&store),
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// The profile behind the active session
fn require_profile(store: &ProfileStore) -> Result<Profile> {
    let session = store
        .load_session()?
        .ok_or_else(|| Error::Auth("no active session; run `astrocal login <name>`".into()))?;
    store
        .get_profile(session.profile_id)?
        .ok_or_else(|| Error::Auth("session references a deleted profile; log in again".into()))
}

/// Write-through after a ledger mutation.
///
/// A failed write is surfaced as a warning, not a crash: the in-memory
/// state already shown to the user stays the source of truth for this run.
fn persist_day(store: &ProfileStore, profile_id: uuid::Uuid, day: &DayIntake) {
    if let Err(e) = store.put_day_intake(profile_id, day) {
        tracing::warn!("Write-through failed for {}: {}", day.date, e);
        eprintln!(
            "⚠ No se pudo guardar el cambio ({}). Puede perderse al salir.",
            e
        );
    }
}

fn cmd_login(store: &ProfileStore, name: &str, password: Option<String>) -> Result<()> {
    let password = match password {
        Some(pw) => pw,
        None => prompt_password()?,
    };

    let outcome = login_or_register(store, name, &password)?;
    let profile = outcome.profile();
    store.save_session(&Session::new(profile.id))?;

    match &outcome {
        LoginOutcome::LoggedIn(p) => println!("¡Bienvenido de nuevo, {}!", p.name),
        LoginOutcome::Registered(p) => println!("¡Cuenta creada! Bienvenido, {}", p.name),
    }

    if profile.tdee.is_none() {
        println!("Completa tu perfil para obtener tu meta diaria:");
        println!("  astrocal profile --sex ... --age ... --weight-kg ... --height-cm ... --activity ...");
    }
    Ok(())
}

fn cmd_logout(store: &ProfileStore) -> Result<()> {
    store.clear_session()?;
    println!("Sesión cerrada.");
    Ok(())
}

fn cmd_profile(
    store: &ProfileStore,
    sex: Option<String>,
    age: Option<u32>,
    weight_kg: Option<f64>,
    height_cm: Option<f64>,
    activity: Option<String>,
) -> Result<()> {
    let mut profile = require_profile(store)?;

    if let Some(sex) = sex {
        profile.sex = Some(parse_sex(&sex)?);
    }
    if let Some(age) = age {
        profile.age = Some(age);
    }
    if let Some(weight_kg) = weight_kg {
        profile.weight_kg = Some(weight_kg);
    }
    if let Some(height_cm) = height_cm {
        profile.height_cm = Some(height_cm);
    }
    if let Some(activity) = activity {
        profile.activity = Some(parse_activity(&activity)?);
    }

    match profile.recompute_tdee() {
        Ok(target) => {
            println!("¡Perfil actualizado! Meta diaria: {} kcal", target);
        }
        Err(Error::IncompleteProfile) => {
            println!("Perfil guardado, pero aún incompleto: faltan atributos para calcular la meta.");
        }
        // Out-of-range attributes reject the whole update
        Err(e) => return Err(e),
    }

    store.put_profile(&profile)?;
    Ok(())
}

fn cmd_foods(
    search: Option<String>,
    category: Option<String>,
    min_kcal: Option<u32>,
    max_kcal: Option<u32>,
) -> Result<()> {
    let category = category.as_deref().map(parse_category).transpose()?;
    let filter = FoodFilter {
        search,
        category,
        min_calories: min_kcal,
        max_calories: max_kcal,
    };

    let catalog = get_default_catalog();
    let matches = catalog.filter(&filter);

    if matches.is_empty() {
        println!("No se encontraron alimentos. Intenta con otra búsqueda o filtro.");
        return Ok(());
    }

    for food in matches {
        println!(
            "{:<18} {:<28} {:<14} {:>4} kcal  ({})",
            food.id,
            food.name,
            food.category.label(),
            food.calories,
            food.serving
        );
    }
    Ok(())
}

fn cmd_add(store: &ProfileStore, food_id: &str) -> Result<()> {
    let profile = require_profile(store)?;
    let catalog = get_default_catalog();

    let food = match catalog.lookup(food_id) {
        Some(food) => food,
        None => {
            println!("⚠ '{}' no existe en el catálogo. Usa `astrocal foods`.", food_id);
            return Ok(());
        }
    };

    let mut day = store.get_day_intake(profile.id, today())?;
    let existed = day.items.iter().any(|i| i.food_id == food.id);
    day.add_serving(food);
    persist_day(store, profile.id, &day);

    if existed {
        println!("{} (+1 porción)", food.name);
    } else {
        println!("{} agregado ({} kcal)", food.name, food.calories);
    }
    print_goal_line(&profile, &day);
    Ok(())
}

enum Mutation {
    Increase,
    Decrease,
}

fn cmd_mutate(store: &ProfileStore, food_id: &str, mutation: Mutation) -> Result<()> {
    let profile = require_profile(store)?;
    let mut day = store.get_day_intake(profile.id, today())?;

    let food_name = day
        .items
        .iter()
        .find(|i| i.food_id == food_id)
        .map(|i| i.food_name.clone());

    let result = match mutation {
        Mutation::Increase => day.increase(food_id),
        Mutation::Decrease => day.decrease(food_id),
    };

    match result {
        Ok(()) => {
            persist_day(store, profile.id, &day);
            match day.items.iter().find(|i| i.food_id == food_id) {
                Some(item) => println!("{}: x{}", item.food_name, item.quantity),
                None => println!(
                    "{} eliminado",
                    food_name.unwrap_or_else(|| food_id.to_string())
                ),
            }
            print_goal_line(&profile, &day);
        }
        // Missing item is a notice, not a failure
        Err(Error::NotFound(msg)) => println!("⚠ {}", msg),
        Err(e) => return Err(e),
    }
    Ok(())
}

fn cmd_reset(store: &ProfileStore) -> Result<()> {
    let profile = require_profile(store)?;
    let mut day = store.get_day_intake(profile.id, today())?;
    day.reset();
    persist_day(store, profile.id, &day);
    println!("Día reiniciado");
    Ok(())
}

fn cmd_status(store: &ProfileStore) -> Result<()> {
    let profile = require_profile(store)?;
    let goal = match profile.tdee {
        Some(goal) => goal,
        None => {
            eprintln!("Completa tu perfil primero: astrocal profile --sex ... --age ...");
            return Err(Error::IncompleteProfile);
        }
    };

    let day = store.get_day_intake(profile.id, today())?;

    println!("Hola, {} ({})", profile.name, day.date.format("%Y-%m-%d"));
    println!("Consumido: {} / {} kcal", day.total_calories, goal);

    match goal_comparison(day.total_calories, goal) {
        GoalStatus::Under { remaining } => {
            println!("Vas excelente. Te faltan {} kcal para tu meta.", remaining)
        }
        GoalStatus::Exact => println!(
            "¡Felicidades! Has alcanzado tu meta exacta de {} kcal.",
            goal
        ),
        GoalStatus::Over { excess } => {
            println!("Te pasaste por {} kcal. Mañana será mejor.", excess)
        }
    }

    if !day.items.is_empty() {
        println!("\nAlimentos de hoy:");
        for item in &day.items {
            println!(
                "  {} (x{}) - {} - {} kcal",
                item.food_name,
                item.quantity,
                item.serving,
                item.calories * item.quantity
            );
        }
    }
    Ok(())
}

fn cmd_history(store: &ProfileStore, config: &Config, export: Option<PathBuf>) -> Result<()> {
    let profile = require_profile(store)?;
    let goal = profile.tdee.unwrap_or(0);

    let days = store.get_history(profile.id, config.history.window_days)?;
    let summaries = summarize(&days, goal);

    if summaries.is_empty() {
        println!("Sin historial todavía.");
        return Ok(());
    }

    println!("Historial (últimos {} días)", config.history.window_days);
    println!("{:<12} {:>8} {:>8} {:>8} {:>10}", "fecha", "kcal", "meta", "dif", "porciones");
    // Most recent first for the list view
    for s in summaries.iter().rev() {
        println!(
            "{:<12} {:>8} {:>8} {:>+8} {:>10}",
            s.date.format("%Y-%m-%d"),
            s.total_calories,
            s.goal,
            s.difference,
            s.total_servings
        );
    }

    if let Some(path) = export {
        let written = report::write_history_csv(&path, &summaries)?;
        println!("\n✓ {} días exportados a {}", written, path.display());
    }
    Ok(())
}

fn cmd_report(store: &ProfileStore) -> Result<()> {
    let profile = require_profile(store)?;
    let day = store.get_day_intake(profile.id, today())?;
    print!("{}", report::render_daily_report(&profile, &day));
    Ok(())
}

fn print_goal_line(profile: &Profile, day: &DayIntake) {
    if let Some(goal) = profile.tdee {
        println!("Total: {} / {} kcal", day.total_calories, goal);
        if goal_comparison(day.total_calories, goal) == GoalStatus::Exact {
            println!("¡Felicidades! ¡Alcanzaste tu meta exacta!");
        }
    }
}

fn parse_sex(s: &str) -> Result<Sex> {
    match s.to_lowercase().as_str() {
        "male" | "m" => Ok(Sex::Male),
        "female" | "f" => Ok(Sex::Female),
        other => Err(Error::InvalidAttribute(format!(
            "unknown sex '{}' (expected male or female)",
            other
        ))),
    }
}

fn parse_activity(s: &str) -> Result<ActivityLevel> {
    match s.to_lowercase().as_str() {
        "sedentary" => Ok(ActivityLevel::Sedentary),
        "light" => Ok(ActivityLevel::Light),
        "moderate" => Ok(ActivityLevel::Moderate),
        "active" => Ok(ActivityLevel::Active),
        "very_active" | "very-active" => Ok(ActivityLevel::VeryActive),
        other => Err(Error::InvalidAttribute(format!(
            "unknown activity '{}' (expected sedentary, light, moderate, active or very_active)",
            other
        ))),
    }
}

fn parse_category(s: &str) -> Result<FoodCategory> {
    match s.to_lowercase().as_str() {
        "frutas" => Ok(FoodCategory::Frutas),
        "verduras" => Ok(FoodCategory::Verduras),
        "cereales" => Ok(FoodCategory::Cereales),
        "leguminosas" => Ok(FoodCategory::Leguminosas),
        "origen_animal" | "animal" => Ok(FoodCategory::OrigenAnimal),
        "lacteos" => Ok(FoodCategory::Lacteos),
        "grasas" => Ok(FoodCategory::Grasas),
        "azucares" => Ok(FoodCategory::Azucares),
        other => Err(Error::InvalidAttribute(format!(
            "unknown category '{}'",
            other
        ))),
    }
}

fn prompt_password() -> Result<String> {
    print!("Contraseña: ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim_end_matches(['\r', '\n']).to_string())
}
