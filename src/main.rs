use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tripsmith::activities::suggest_activities;
use tripsmith::config::{DefaultsConfig, LoggingConfig, PlannerConfig};
use tripsmith::meals::{MealPlan, suggest_meals};
use tripsmith::models::{
    LKR_PER_USD, LegOutcome, RouteReport, TravelStyle, TripPlan, TripRequest,
};
use tripsmith::phrasebook::phrasebook;
use tripsmith::{ConversationMemory, TripDocument, TripPlanner, TripSmithError};

/// TripSmith - AI travel planner for Sri Lanka
#[derive(Parser)]
#[command(
    name = "tripsmith",
    about = "AI-assisted Sri Lanka travel itinerary planning CLI",
    version
)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a single itinerary from the given trip parameters
    Plan {
        /// City the trip starts in
        #[arg(long)]
        start_city: Option<String>,

        /// City the trip ends in
        #[arg(long)]
        end_city: Option<String>,

        /// Trip length in days (1-14)
        #[arg(long)]
        days: Option<u32>,

        /// Budget in USD, converted once at 1 USD = 300 LKR
        #[arg(long)]
        budget_usd: Option<u64>,

        /// Comma-separated interests, e.g. "Culture, Beach"
        #[arg(long)]
        interests: Option<String>,

        /// Travel style: budget, mid-range, or luxury
        #[arg(long)]
        style: Option<String>,

        /// Extra details for the generator, e.g. "vegetarian food"
        #[arg(long, default_value = "")]
        notes: String,

        /// Write the itinerary, meals, and phrasebook bundle to this file
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// Refine itineraries across multiple turns with conversation memory
    Interactive,

    /// Print the Sinhala/Tamil phrasebook
    Phrasebook,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = PlannerConfig::load_from_path(cli.config.clone())?;
    init_logging(&config.logging, cli.verbose);

    match cli.command {
        Command::Plan {
            start_city,
            end_city,
            days,
            budget_usd,
            interests,
            style,
            notes,
            save,
        } => {
            let defaults = &config.defaults;
            let style = style.unwrap_or_else(|| defaults.style.clone());
            let request = TripRequest {
                start_city: start_city.unwrap_or_else(|| defaults.start_city.clone()),
                end_city: end_city.unwrap_or_else(|| defaults.end_city.clone()),
                duration_days: days.unwrap_or(defaults.duration_days),
                budget_lkr: budget_usd.unwrap_or(defaults.budget_usd) * LKR_PER_USD,
                interests: interests.unwrap_or_else(|| defaults.interests.clone()),
                style: parse_style(&style)?,
                notes,
            };
            run_plan(&config, request, save).await
        }
        Command::Interactive => run_interactive(&config).await,
        Command::Phrasebook => {
            print_phrasebook();
            Ok(())
        }
    }
}

fn init_logging(config: &LoggingConfig, verbose: bool) {
    let level = if verbose {
        "debug"
    } else {
        config.level.as_str()
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);
    if config.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn parse_style(style: &str) -> Result<TravelStyle> {
    style
        .parse()
        .map_err(|message: String| TripSmithError::validation(message).into())
}

/// Surface collaborator wiring failures with the user-facing message;
/// the detailed cause goes to the log.
fn build_planner(config: &PlannerConfig) -> Result<TripPlanner> {
    TripPlanner::from_config(config).map_err(|e| {
        tracing::error!(error = %e, "failed to initialize collaborators");
        anyhow::anyhow!("{}", e.user_message())
    })
}

async fn run_plan(
    config: &PlannerConfig,
    request: TripRequest,
    save: Option<PathBuf>,
) -> Result<()> {
    let planner = build_planner(config)?;
    let mut memory = ConversationMemory::new();

    println!("Generating itinerary...");
    let plan = planner.generate(&mut memory, &request).await;
    let meal_plan = suggest_meals(request.duration_days);
    print_plan(&plan);
    print_meals(&meal_plan);
    print_activities(&request.interests);

    if let Some(path) = save {
        let document = TripDocument::new(plan.plan.clone(), meal_plan, phrasebook());
        document.write_to(&path)?;
        println!("\nSaved trip document to {}", path.display());
    }
    Ok(())
}

async fn run_interactive(config: &PlannerConfig) -> Result<()> {
    let planner = build_planner(config)?;
    let mut memory = ConversationMemory::new();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    println!("TripSmith interactive planner. Press Enter to accept defaults.");
    let mut request = gather_request(&mut lines, &config.defaults)?;

    loop {
        println!("\nGenerating itinerary...");
        let plan = planner.generate(&mut memory, &request).await;
        print_plan(&plan);

        print!("\nrefine> (notes to regenerate, 'reset' to clear memory, 'quit' to exit) ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else { break };
        match line?.trim() {
            "quit" | "exit" => break,
            "reset" => {
                memory.clear();
                println!("Conversation memory cleared.");
            }
            "" => {}
            notes => request.notes = notes.to_string(),
        }
    }
    Ok(())
}

fn gather_request(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    defaults: &DefaultsConfig,
) -> Result<TripRequest> {
    let start_city = prompt_line(lines, "Start city", &defaults.start_city)?;
    let end_city = prompt_line(lines, "End city", &defaults.end_city)?;
    let days = prompt_line(lines, "Days (1-14)", &defaults.duration_days.to_string())?
        .parse::<u32>()
        .with_context(|| "Days must be a whole number")?;
    let budget_usd = prompt_line(lines, "Budget (USD)", &defaults.budget_usd.to_string())?
        .parse::<u64>()
        .with_context(|| "Budget must be a whole number")?;
    let interests = prompt_line(lines, "Interests", &defaults.interests)?;
    let style = parse_style(&prompt_line(lines, "Travel style", &defaults.style)?)?;
    let notes = prompt_line(lines, "Details (e.g. vegetarian food)", "")?;

    Ok(TripRequest {
        start_city,
        end_city,
        duration_days: days,
        budget_lkr: budget_usd * LKR_PER_USD,
        interests,
        style,
        notes,
    })
}

fn prompt_line(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    label: &str,
    default: &str,
) -> Result<String> {
    if default.is_empty() {
        print!("{label}: ");
    } else {
        print!("{label} [{default}]: ");
    }
    io::stdout().flush()?;
    let answer = match lines.next() {
        Some(line) => line?,
        None => String::new(),
    };
    let answer = answer.trim();
    Ok(if answer.is_empty() {
        default.to_string()
    } else {
        answer.to_string()
    })
}

fn print_plan(plan: &TripPlan) {
    println!("\n{}", plan.plan);

    match &plan.routes {
        RouteReport::Failed { error } => println!("\n{error}"),
        RouteReport::Legs { routes } if !routes.is_empty() => {
            println!("\nRoute summary:");
            for leg in routes {
                match &leg.outcome {
                    LegOutcome::Driving {
                        distance_km,
                        duration_min,
                    } => println!(
                        "  {} to {}: {distance_km:.1} km, ~{duration_min} min",
                        leg.from, leg.to
                    ),
                    LegOutcome::Failed { error } => {
                        println!("  {} to {}: {error}", leg.from, leg.to);
                    }
                }
            }
        }
        RouteReport::Legs { .. } => {}
    }
}

fn print_meals(meal_plan: &MealPlan) {
    println!("\nMeal ideas:");
    for day in &meal_plan.daily_plan {
        println!(
            "  Day {}: {} ({}), {} ({}), {} ({})",
            day.day,
            day.breakfast.name,
            day.breakfast.price,
            day.lunch.name,
            day.lunch.price,
            day.dinner.name,
            day.dinner.price
        );
    }
}

fn print_activities(interests: &str) {
    println!("\nSuggested activities:");
    for category in suggest_activities(interests) {
        println!("  {}:", category.category);
        for activity in category.activities {
            println!(
                "    {} ({}): {}",
                activity.name, activity.location, activity.cost
            );
        }
    }
}

fn print_phrasebook() {
    let book = phrasebook();
    println!("Greetings:");
    for phrase in &book.greetings {
        println!(
            "  {}: Sinhala: {}, Tamil: {}",
            phrase.english, phrase.sinhala, phrase.tamil
        );
    }
    println!("Essentials:");
    for phrase in &book.essentials {
        println!(
            "  {}: Sinhala: {}, Tamil: {}",
            phrase.english, phrase.sinhala, phrase.tamil
        );
    }
}
