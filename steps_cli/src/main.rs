//! # Steps CLI
//!
//! Terminal front end for the Steps walking calculators and blog.
//!
//! Acts like the site's form layer: raw values are clamped with
//! [`steps_core::form`] before the calculators see them, and results are
//! printed either as a short summary or as JSON (`--json`) for scripting.
//!
//! ```text
//! steps bmi --weight-kg 70 --height-cm 175
//! steps calories --steps 10000 --json
//! steps eval request.json
//! steps blog --page 2
//! ```

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use steps_core::blog::BlogStore;
use steps_core::calculations::{
    bmi, calorie, step_distance, step_goal, weight_loss, ActivityLevel, CalculatorRequest, Gender,
    HealthGoal, StepGoalInput, WalkingSpeed, WeightLossInput,
};
use steps_core::form;
use steps_core::format::{
    format_bmi, format_calories, format_distance, format_number, format_time, format_weight,
    format_weight_with_unit,
};
use steps_core::units::{km_to_miles, round_half_up, DistanceUnit, UnitSystem};
use steps_core::{CalcError, Settings};

#[derive(Parser, Debug)]
#[command(
    name = "steps",
    version,
    about = "Walking calculators and blog listing for the Steps site"
)]
struct Cli {
    /// Settings file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Body Mass Index and healthy weight range
    Bmi {
        #[arg(long)]
        weight_kg: f64,
        #[arg(long)]
        height_cm: f64,
    },
    /// Convert steps to distance or distance to steps
    Distance {
        #[arg(long, conflicts_with = "distance_km")]
        steps: Option<f64>,
        #[arg(long)]
        distance_km: Option<f64>,
        #[arg(long, value_enum)]
        gender: GenderArg,
        #[arg(long)]
        age: u32,
        #[arg(long)]
        height_cm: f64,
    },
    /// Calories burned walking
    Calories {
        /// Defaults to the configured default weight
        #[arg(long)]
        weight_kg: Option<f64>,
        #[arg(long)]
        steps: Option<f64>,
        #[arg(long)]
        distance_km: Option<f64>,
        #[arg(long)]
        duration_min: Option<f64>,
        #[arg(long, value_enum, default_value_t = SpeedArg::Normal)]
        speed: SpeedArg,
    },
    /// Personalized daily step goal
    Goal {
        #[arg(long)]
        age: u32,
        #[arg(long, value_enum, default_value_t = GenderArg::Female)]
        gender: GenderArg,
        #[arg(long, value_enum)]
        activity: ActivityArg,
        #[arg(long, value_enum)]
        goal: GoalArg,
        #[arg(long)]
        current_steps: Option<u32>,
    },
    /// Walking plan for a target weight
    WeightLoss {
        #[arg(long)]
        current_kg: f64,
        #[arg(long)]
        target_kg: f64,
        #[arg(long, default_value_t = 90)]
        days: u32,
        #[arg(long, default_value_t = 5)]
        days_per_week: u32,
    },
    /// Evaluate a JSON calculator request from a file, or `-` for stdin
    Eval { input: String },
    /// List blog posts or show one
    Blog {
        #[arg(long, default_value_t = 1, allow_hyphen_values = true)]
        page: i64,
        #[arg(long)]
        slug: Option<String>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum GenderArg {
    Male,
    Female,
}

impl From<GenderArg> for Gender {
    fn from(arg: GenderArg) -> Self {
        match arg {
            GenderArg::Male => Gender::Male,
            GenderArg::Female => Gender::Female,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum SpeedArg {
    Slow,
    Normal,
    Brisk,
    Fast,
}

impl From<SpeedArg> for WalkingSpeed {
    fn from(arg: SpeedArg) -> Self {
        match arg {
            SpeedArg::Slow => WalkingSpeed::Slow,
            SpeedArg::Normal => WalkingSpeed::Normal,
            SpeedArg::Brisk => WalkingSpeed::Brisk,
            SpeedArg::Fast => WalkingSpeed::Fast,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ActivityArg {
    Sedentary,
    LightlyActive,
    Active,
    VeryActive,
}

impl From<ActivityArg> for ActivityLevel {
    fn from(arg: ActivityArg) -> Self {
        match arg {
            ActivityArg::Sedentary => ActivityLevel::Sedentary,
            ActivityArg::LightlyActive => ActivityLevel::LightlyActive,
            ActivityArg::Active => ActivityLevel::Active,
            ActivityArg::VeryActive => ActivityLevel::VeryActive,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum GoalArg {
    Maintain,
    LoseWeight,
    ImproveFitness,
    TrainEvent,
}

impl From<GoalArg> for HealthGoal {
    fn from(arg: GoalArg) -> Self {
        match arg {
            GoalArg::Maintain => HealthGoal::Maintain,
            GoalArg::LoseWeight => HealthGoal::LoseWeight,
            GoalArg::ImproveFitness => HealthGoal::ImproveFitness,
            GoalArg::TrainEvent => HealthGoal::TrainEvent,
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn load_settings(path: Option<&PathBuf>) -> Result<Settings> {
    match path {
        Some(path) => {
            let settings = Settings::load(path)
                .with_context(|| format!("loading settings from {}", path.display()))?;
            tracing::debug!(path = %path.display(), "settings loaded");
            Ok(settings)
        }
        None => Ok(Settings::default()),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("serializing result")?;
    println!("{}", json);
    Ok(())
}

/// Distance in the display unit, e.g. `"4.7 mi"`
fn show_distance(km: f64, units: UnitSystem) -> String {
    match units {
        UnitSystem::Metric => format!("{} km", format_distance(km, DistanceUnit::Km)),
        UnitSystem::Imperial => {
            format!("{} mi", format_distance(km_to_miles(km), DistanceUnit::Miles))
        }
    }
}

fn banner(title: &str) {
    println!("═══════════════════════════════════════");
    println!("  {}", title);
    println!("═══════════════════════════════════════");
}

fn run_bmi(weight_kg: f64, height_cm: f64, settings: &Settings, json: bool) -> Result<()> {
    let weight_kg = form::clamp_weight_kg(weight_kg);
    let height_cm = form::clamp_height_cm(height_cm);
    let result = bmi::calculate_bmi_result(weight_kg, height_cm);
    if json {
        return print_json(&result);
    }

    let unit = settings.unit_system.weight_unit();
    banner("BMI");
    println!("  BMI:            {} ({})", format_bmi(result.bmi), result.category_label);
    println!(
        "  Healthy range:  {} - {}",
        format_weight_with_unit(result.healthy_weight_range.min, unit),
        format_weight_with_unit(result.healthy_weight_range.max, unit)
    );
    let to_range = result.weight_to_healthy_range;
    if to_range > 0.0 {
        println!("  To lose:        {}", format_weight_with_unit(to_range, unit));
    } else if to_range < 0.0 {
        println!("  To gain:        {}", format_weight_with_unit(-to_range, unit));
    }
    println!("  Daily steps:    {}", format_number(result.recommended_steps as f64));
    println!("  Scale position: {}%", round_half_up(bmi::bmi_scale_position(result.bmi)));
    Ok(())
}

fn run_distance(
    steps: Option<f64>,
    distance_km: Option<f64>,
    gender: GenderArg,
    age: u32,
    height_cm: f64,
    settings: &Settings,
    json: bool,
) -> Result<()> {
    let profile = form::sanitize_profile(gender.into(), age, height_cm);
    let result = match (steps, distance_km) {
        (Some(steps), _) => {
            step_distance::calculate_from_steps(form::clamp_non_negative(steps), &profile)
        }
        (None, Some(km)) => {
            step_distance::calculate_from_distance(form::clamp_non_negative(km), &profile)
        }
        (None, None) => return Err(CalcError::missing_field("steps").into()),
    };
    if json {
        return print_json(&result);
    }

    banner("STEPS ⇄ DISTANCE");
    println!("  Steps:       {}", format_number(result.steps));
    println!("  Distance:    {}", show_distance(result.distance_km, settings.unit_system));
    println!("  Step length: {} cm", format_weight(result.step_length_cm));
    println!("  Calories:    {} kcal", format_calories(result.calories_burned));
    println!("  Time:        {}", format_time(result.walking_time_minutes));
    Ok(())
}

fn run_calories(
    input: calorie::CalorieCalculationInput,
    settings: &Settings,
    json: bool,
) -> Result<()> {
    let result = calorie::calculate(&input)?;
    if json {
        return print_json(&result);
    }

    banner("CALORIES BURNED");
    println!("  Calories: {} kcal", format_calories(result.calories_burned));
    println!("  Fat:      {} g", format_number(result.fat_burned_grams));
    println!("  Steps:    {}", format_number(result.steps));
    println!("  Distance: {}", show_distance(result.distance_km, settings.unit_system));
    println!("  Time:     {}", format_time(result.duration_minutes));
    let raw_calories = input.unrounded_calories().unwrap_or(result.calories_burned);
    let foods = calorie::food_equivalents(raw_calories);
    if !foods.is_empty() {
        println!();
        println!("  That's about:");
        for food in foods {
            println!("    {} × {}", food.amount, food.food);
        }
    }
    Ok(())
}

fn run_goal(input: StepGoalInput, settings: &Settings, json: bool) -> Result<()> {
    let input = form::sanitize_step_goal(input);
    let result = step_goal::calculate(&input)?;
    if json {
        return print_json(&result);
    }

    banner("DAILY STEP GOAL");
    println!("  Daily:    {}", format_number(result.daily_goal as f64));
    println!("  Weekly:   {}", format_number(result.weekly_goal as f64));
    println!("  Distance: {}", show_distance(result.distance_per_day_km, settings.unit_system));
    println!("  Calories: {} kcal", format_calories(result.calories_per_day));
    println!();
    println!("  Ramp-up:");
    for milestone in &result.milestones {
        println!("    Week {}: {}", milestone.week, format_number(milestone.steps as f64));
    }
    println!();
    println!("  Tips:");
    for tip in &result.tips {
        println!("    - {}", tip);
    }
    Ok(())
}

fn run_weight_loss(input: WeightLossInput, settings: &Settings, json: bool) -> Result<()> {
    let input = form::sanitize_weight_loss(input);
    let result = weight_loss::calculate(&input)?;
    if json {
        return print_json(&result);
    }

    let unit = settings.unit_system.weight_unit();
    banner("WEIGHT LOSS WALKING PLAN");
    println!("  To lose:       {}", format_weight_with_unit(result.total_weight_to_lose, unit));
    println!("  Daily deficit: {} kcal", format_calories(result.daily_calorie_deficit));
    println!(
        "  Each walk:     {} / {} steps / {}",
        show_distance(result.walking_daily_km, settings.unit_system),
        format_number(result.walking_daily_steps),
        format_time(result.walking_daily_minutes)
    );
    println!(
        "  Weekly:        {} / {} steps",
        show_distance(result.weekly_km, settings.unit_system),
        format_number(result.weekly_steps)
    );
    println!();
    for milestone in &result.milestones {
        let expected = format_weight_with_unit(milestone.expected_weight, unit);
        println!("    Week {:>3}: {}", milestone.week, expected);
    }
    println!();
    match &result.safety_warning {
        Some(warning) => println!("  [WARNING] {}", warning),
        None => println!("  [OK] This pace is within safe limits"),
    }
    Ok(())
}

fn run_eval(input: &str) -> Result<()> {
    let text = if input == "-" {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text).context("reading request from stdin")?;
        text
    } else {
        fs::read_to_string(input).with_context(|| format!("reading request from {}", input))?
    };

    let request: CalculatorRequest = serde_json::from_str(&text).map_err(CalcError::from)?;
    let response = request.evaluate()?;
    print_json(&response)
}

fn run_blog(page: i64, slug: Option<String>, settings: &Settings, json: bool) -> Result<()> {
    let store = BlogStore::from_settings(settings);

    if let Some(slug) = slug {
        let post = store.try_post_by_slug(&slug)?;
        if json {
            return print_json(&post);
        }
        println!("{}", post.title);
        println!("{} · {}", post.date, post.author.name);
        println!();
        println!("{}", post.content);
        return Ok(());
    }

    let listing = store.paginated_posts(page);
    if json {
        return print_json(&listing);
    }
    if listing.posts.is_empty() {
        println!("No posts in {}", store.dir().display());
        return Ok(());
    }
    for post in &listing.posts {
        println!("{}  {}", post.date, post.title);
        println!("            /blog/{}", post.slug);
    }
    println!();
    println!("Page {} of {}", listing.current_page, listing.total_pages);
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let settings = load_settings(cli.config.as_ref())?;
    let json = cli.json;

    match cli.command {
        Command::Bmi { weight_kg, height_cm } => run_bmi(weight_kg, height_cm, &settings, json),
        Command::Distance { steps, distance_km, gender, age, height_cm } => {
            run_distance(steps, distance_km, gender, age, height_cm, &settings, json)
        }
        Command::Calories { weight_kg, steps, distance_km, duration_min, speed } => {
            let input = calorie::CalorieCalculationInput {
                weight_kg: form::clamp_weight_kg(weight_kg.unwrap_or(settings.default_weight_kg)),
                duration_minutes: duration_min.map(form::clamp_non_negative),
                distance_km: distance_km.map(form::clamp_non_negative),
                speed: Some(speed.into()),
                steps: steps.map(form::clamp_non_negative),
                step_length_cm: None,
            };
            run_calories(input, &settings, json)
        }
        Command::Goal { age, gender, activity, goal, current_steps } => {
            let input = StepGoalInput {
                age,
                gender: gender.into(),
                activity_level: activity.into(),
                health_goal: goal.into(),
                current_steps,
            };
            run_goal(input, &settings, json)
        }
        Command::WeightLoss { current_kg, target_kg, days, days_per_week } => {
            let input = WeightLossInput {
                current_weight_kg: current_kg,
                target_weight_kg: target_kg,
                timeframe_days: days,
                days_per_week,
            };
            run_weight_loss(input, &settings, json)
        }
        Command::Eval { input } => run_eval(&input),
        Command::Blog { page, slug } => run_blog(page, slug, &settings, json),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            if let Some(calc_error) = e.downcast_ref::<CalcError>() {
                if let Ok(json) = serde_json::to_string_pretty(calc_error) {
                    eprintln!();
                    eprintln!("Error JSON:");
                    eprintln!("{}", json);
                }
            }
            ExitCode::FAILURE
        }
    }
}
