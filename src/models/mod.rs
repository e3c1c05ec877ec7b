pub mod plan;
pub mod workout;

pub use plan::{NewWorkoutPlan, WorkoutPlan, WorkoutPlanUpdate};
pub use workout::{NewWorkout, Workout};

/// Activity type recorded when an export row has none
pub const UNKNOWN_ACTIVITY: &str = "Unknown";
