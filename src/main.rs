use anyhow::Result;
use clap::{Parser, Subcommand};
use imkitchen_menu::{DietaryRestriction, MenuConfig, MenuState};
use imkitchen_store::{Readable, Unsubscriber};

/// imkitchen-menu - Meal selection and dietary filter state
#[derive(Parser)]
#[command(name = "imkitchen-menu")]
#[command(about = "Inspect the meal selection and dietary filter state", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply selections to a fresh state and print the result as JSON
    Show {
        /// Meal to select (e.g. Breakfast, Lunch, Dinner)
        #[arg(long)]
        meal: Option<String>,

        /// Day to select, YYYY-MM-DD
        #[arg(long)]
        day: Option<String>,

        #[arg(long)]
        vegan: bool,

        #[arg(long)]
        vegetarian: bool,

        #[arg(long)]
        gluten_free: bool,

        #[arg(long)]
        halal: bool,
    },
    /// Print the configured initial state as JSON
    Defaults,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = MenuConfig::load(cli.config.clone())?;
    config.validate()?;

    imkitchen_menu::observability::init_logging(&config.logging.level, &config.logging.format)?;

    match cli.command {
        Commands::Show {
            meal,
            day,
            vegan,
            vegetarian,
            gluten_free,
            halal,
        } => {
            let restrictions = [
                (DietaryRestriction::Vegan, vegan),
                (DietaryRestriction::Vegetarian, vegetarian),
                (DietaryRestriction::GlutenFree, gluten_free),
                (DietaryRestriction::Halal, halal),
            ]
            .into_iter()
            .filter_map(|(restriction, enabled)| enabled.then_some(restriction))
            .collect();
            show_command(config, meal, day, restrictions)
        }
        Commands::Defaults => defaults_command(config),
    }
}

#[tracing::instrument(skip(config))]
fn show_command(
    config: MenuConfig,
    meal: Option<String>,
    day: Option<String>,
    restrictions: Vec<DietaryRestriction>,
) -> Result<()> {
    let state = MenuState::from_defaults(&config.defaults);
    let subscriptions = log_changes(&state);

    if let Some(meal) = meal {
        state.selected_meal.set(meal);
    }
    if let Some(day) = day {
        state.selected_day_option.set(day);
    }
    for restriction in restrictions {
        state.toggle_filter(restriction);
    }

    match state.selected_date() {
        Ok(Some(date)) => tracing::info!(%date, "Showing menu for day"),
        Ok(None) => tracing::info!("No day selected"),
        Err(e) => tracing::warn!(error = %e, "Selected day is not a calendar date"),
    }

    for subscription in subscriptions {
        subscription.unsubscribe();
    }

    println!("{}", state.snapshot().to_json()?);
    Ok(())
}

fn defaults_command(config: MenuConfig) -> Result<()> {
    let state = MenuState::from_defaults(&config.defaults);
    println!("{}", state.snapshot().to_json()?);
    Ok(())
}

/// Subscribe a logger to every menu cell
fn log_changes(state: &MenuState) -> Vec<Unsubscriber> {
    vec![
        state
            .selected_meal
            .subscribe(|meal| tracing::info!(selected_meal = %meal, "Meal selection")),
        state
            .selected_day_option
            .subscribe(|day| tracing::info!(selected_day_option = %day, "Day selection")),
        state
            .active_restrictions
            .subscribe(|active| tracing::info!(?active, "Dietary filters")),
    ]
}
