//! Command-line front end over the dashboard commands

use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};

use crate::commands::plans::{create_plan, delete_plan, get_plans, get_upcoming_plans, update_plan};
use crate::commands::upload::{preview_csv_file, upload_workouts};
use crate::commands::{get_recent_workouts, search_workouts, CommandError, WorkoutFilter};
use crate::config::AppConfig;
use crate::db::AppState;
use crate::format::{
  format_day, format_distance, format_duration, format_optional,
  DURATION_PLACEHOLDER, EMPTY_CELL,
};
use crate::garmin::IngestReport;
use crate::models::{NewWorkout, NewWorkoutPlan, Workout, WorkoutPlan, WorkoutPlanUpdate};

#[derive(Parser)]
#[command(version, about = "Athlete/trainer workout dashboard", long_about = None)]
pub struct Cli {
  /// Enable debug logging
  #[arg(short, long, global = true)]
  pub verbose: bool,

  #[command(subcommand)]
  pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
  /// Parse a Garmin Connect CSV export and upload the accepted workouts
  Import {
    /// CSV file exported from Garmin Connect
    file: PathBuf,

    /// Show the preview without writing to the database
    #[arg(long)]
    dry_run: bool,

    /// Print the parse report as JSON
    #[arg(long)]
    json: bool,
  },

  /// Recent workouts, newest first
  Workouts {
    #[arg(long)]
    limit: Option<i64>,

    #[arg(long)]
    json: bool,
  },

  /// Filter workouts by activity type and distance
  Search {
    /// Substring of the activity type, case-insensitive
    #[arg(long, value_name = "TYPE")]
    activity_type: Option<String>,

    /// Minimum distance in km
    #[arg(long, value_name = "KM")]
    min_distance: Option<f64>,

    /// Maximum distance in km
    #[arg(long, value_name = "KM")]
    max_distance: Option<f64>,

    #[arg(long, default_value_t = 10)]
    limit: i64,

    #[arg(long)]
    json: bool,
  },

  /// List training plans
  Plans {
    /// Only plans scheduled today or later
    #[arg(long)]
    upcoming: bool,

    #[arg(long)]
    json: bool,
  },

  /// Create a training plan
  PlanAdd(PlanAddArgs),

  /// Change fields of an existing plan
  PlanUpdate {
    id: i64,

    #[command(flatten)]
    fields: PlanUpdateArgs,
  },

  /// Delete a training plan
  PlanDelete { id: i64 },
}

#[derive(Args)]
pub struct PlanAddArgs {
  #[arg(long)]
  pub title: String,

  /// Scheduled date (YYYY-MM-DD)
  #[arg(long)]
  pub date: NaiveDate,

  #[arg(long)]
  pub description: Option<String>,

  #[arg(long, default_value = "Running")]
  pub workout_type: String,

  #[arg(long, value_name = "KM")]
  pub distance: Option<f64>,

  #[arg(long)]
  pub pace: Option<String>,

  #[arg(long)]
  pub hr_zone: Option<String>,

  #[arg(long)]
  pub notes: Option<String>,
}

impl From<&PlanAddArgs> for NewWorkoutPlan {
  fn from(args: &PlanAddArgs) -> Self {
    NewWorkoutPlan {
      title: args.title.clone(),
      description: args.description.clone(),
      scheduled_date: args.date,
      workout_type: Some(args.workout_type.clone()),
      target_distance_km: args.distance,
      target_pace: args.pace.clone(),
      target_hr_zone: args.hr_zone.clone(),
      notes: args.notes.clone(),
    }
  }
}

#[derive(Args)]
pub struct PlanUpdateArgs {
  #[arg(long)]
  pub title: Option<String>,

  #[arg(long)]
  pub date: Option<NaiveDate>,

  #[arg(long)]
  pub description: Option<String>,

  #[arg(long)]
  pub workout_type: Option<String>,

  #[arg(long, value_name = "KM")]
  pub distance: Option<f64>,

  #[arg(long)]
  pub pace: Option<String>,

  #[arg(long)]
  pub hr_zone: Option<String>,

  #[arg(long)]
  pub notes: Option<String>,
}

impl From<&PlanUpdateArgs> for WorkoutPlanUpdate {
  fn from(args: &PlanUpdateArgs) -> Self {
    WorkoutPlanUpdate {
      title: args.title.clone(),
      description: args.description.clone(),
      scheduled_date: args.date,
      workout_type: args.workout_type.clone(),
      target_distance_km: args.distance,
      target_pace: args.pace.clone(),
      target_hr_zone: args.hr_zone.clone(),
      notes: args.notes.clone(),
    }
  }
}

/// ---------------------------------------------------------------------------
/// Dispatch
/// ---------------------------------------------------------------------------

/// Commands that need no database. Returns `None` when the command must go
/// through `run_command` instead.
pub fn run_offline(cli: &Cli, config: &AppConfig) -> Option<Result<(), CommandError>> {
  match &cli.command {
    Commands::Import {
      file,
      dry_run: true,
      json,
    } => Some(preview_csv_file(file).map(|report| {
      print_report(&report, config.preview_rows, *json);
    })),
    _ => None,
  }
}

pub async fn run_command(cli: &Cli, state: &AppState) -> Result<(), CommandError> {
  match &cli.command {
    Commands::Import { file, dry_run, json } => {
      let report = preview_csv_file(file)?;
      print_report(&report, state.config.preview_rows, *json);
      if *dry_run {
        return Ok(());
      }
      if report.workouts.is_empty() {
        println!("No workouts to upload");
        return Ok(());
      }
      let result = upload_workouts(state, &report.workouts).await?;
      println!("Successfully uploaded {} workouts!", result.inserted);
    }

    Commands::Workouts { limit, json } => {
      let workouts = get_recent_workouts(state, *limit).await?;
      print_workouts(&workouts, *json, "No workouts yet. Import a Garmin CSV to get started.");
    }

    Commands::Search {
      activity_type,
      min_distance,
      max_distance,
      limit,
      json,
    } => {
      let filter = WorkoutFilter {
        activity_type: activity_type.clone(),
        min_distance_km: *min_distance,
        max_distance_km: *max_distance,
        limit: Some(*limit),
      };
      let workouts = search_workouts(state, &filter).await?;
      print_workouts(&workouts, *json, "No workouts match the filter.");
    }

    Commands::Plans { upcoming, json } => {
      let plans = if *upcoming {
        get_upcoming_plans(state, Local::now().date_naive()).await?
      } else {
        get_plans(state).await?
      };
      if *json {
        println!("{}", serde_json::to_string_pretty(&plans).unwrap_or_default());
      } else if plans.is_empty() {
        println!("No plans scheduled.");
      } else {
        print!("{}", render_plans(&plans));
      }
    }

    Commands::PlanAdd(args) => {
      let plan = create_plan(state, args.into()).await?;
      println!("Created plan {}: {} on {}", plan.id, plan.title, format_day(plan.scheduled_date));
    }

    Commands::PlanUpdate { id, fields } => {
      let plan = update_plan(state, *id, fields.into()).await?;
      println!("Updated plan {}: {} on {}", plan.id, plan.title, format_day(plan.scheduled_date));
    }

    Commands::PlanDelete { id } => {
      delete_plan(state, *id).await?;
      println!("Deleted plan {}", id);
    }
  }

  Ok(())
}

/// ---------------------------------------------------------------------------
/// Rendering
/// ---------------------------------------------------------------------------

fn print_report(report: &IngestReport, preview_rows: usize, json: bool) {
  if json {
    println!("{}", serde_json::to_string_pretty(report).unwrap_or_default());
  } else {
    print!("{}", render_preview(report, preview_rows));
  }
}

fn print_workouts(workouts: &[Workout], json: bool, empty_message: &str) {
  if json {
    println!("{}", serde_json::to_string_pretty(workouts).unwrap_or_default());
  } else if workouts.is_empty() {
    println!("{}", empty_message);
  } else {
    print!("{}", render_workouts(workouts));
  }
}

const WORKOUT_HEADER: &str = "Date          Type                  Distance   Duration  Pace      Avg HR    Avg Power";

fn workout_line(
  date: NaiveDate,
  activity_type: &str,
  distance_km: Option<f64>,
  duration_seconds: Option<i64>,
  pace: Option<&str>,
  avg_hr: Option<i64>,
  avg_power: Option<i64>,
) -> String {
  format!(
    "{:<13} {:<20} {:>10} {:>10}  {:<9} {:>8}  {:>8}\n",
    format_day(date),
    activity_type,
    format_distance(distance_km),
    format_duration(duration_seconds, DURATION_PLACEHOLDER),
    pace.unwrap_or(EMPTY_CELL),
    format_optional(avg_hr, "bpm"),
    format_optional(avg_power, "W"),
  )
}

pub fn render_workouts(workouts: &[Workout]) -> String {
  let mut out = format!("{}\n", WORKOUT_HEADER);
  for w in workouts {
    out.push_str(&workout_line(
      w.date,
      &w.activity_type,
      w.distance_km,
      w.duration_seconds,
      w.avg_pace_per_km.as_deref(),
      w.avg_heart_rate,
      w.avg_power,
    ));
  }
  out
}

fn preview_line(w: &NewWorkout) -> String {
  workout_line(
    w.date,
    &w.activity_type,
    w.distance_km,
    w.duration_seconds,
    w.avg_pace_per_km.as_deref(),
    w.avg_heart_rate,
    w.avg_power,
  )
}

/// Parse summary, rejected rows and at most `max_rows` accepted records
pub fn render_preview(report: &IngestReport, max_rows: usize) -> String {
  let mut out = format!(
    "Parsed {} workouts from CSV ({} rows, {} skipped)\n",
    report.accepted_count(),
    report.total_rows,
    report.rejected_count()
  );

  for rejected in &report.rejected {
    out.push_str(&format!("  skipped line {}: {}\n", rejected.line, rejected.reason));
  }

  if report.workouts.is_empty() {
    return out;
  }

  out.push('\n');
  out.push_str(WORKOUT_HEADER);
  out.push('\n');
  for w in report.workouts.iter().take(max_rows) {
    out.push_str(&preview_line(w));
  }
  if report.workouts.len() > max_rows {
    out.push_str(&format!("... and {} more\n", report.workouts.len() - max_rows));
  }
  out
}

pub fn render_plans(plans: &[WorkoutPlan]) -> String {
  let mut out = String::new();
  for plan in plans {
    out.push_str(&format!(
      "[{}] {} - {}\n",
      plan.id,
      format_day(plan.scheduled_date),
      plan.title
    ));
    if let Some(description) = &plan.description {
      out.push_str(&format!("    {}\n", description));
    }

    let mut details = Vec::new();
    if let Some(t) = &plan.workout_type {
      details.push(format!("Type: {}", t));
    }
    if let Some(d) = plan.target_distance_km {
      details.push(format!("Distance: {} km", d));
    }
    if let Some(p) = &plan.target_pace {
      details.push(format!("Target Pace: {}", p));
    }
    if let Some(z) = &plan.target_hr_zone {
      details.push(format!("HR Zone: {}", z));
    }
    if !details.is_empty() {
      out.push_str(&format!("    {}\n", details.join("  ")));
    }
    if let Some(notes) = &plan.notes {
      out.push_str(&format!("    Notes: {}\n", notes));
    }
  }
  out
}
