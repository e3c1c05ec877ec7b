use chrono::NaiveDate;
use training_dashboard_lib::format::{format_duration, DURATION_PLACEHOLDER};
use training_dashboard_lib::garmin::fields::{parse_distance, parse_duration, parse_integer};
use training_dashboard_lib::garmin::{ingest, parse_garmin_csv, RejectReason};
use training_dashboard_lib::models::NewWorkout;

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn single_run_export() {
  let workouts = parse_garmin_csv(
    "Activity Type,Date,Time,Distance,Avg HR\nRunning,2024-03-01,00:45:30,10.5km,155\n",
  );

  assert_eq!(
    workouts,
    vec![NewWorkout {
      activity_type: "Running".to_string(),
      duration_seconds: Some(2730),
      distance_km: Some(10.5),
      avg_heart_rate: Some(155),
      ..NewWorkout::on_date(ymd(2024, 3, 1))
    }]
  );
}

#[test]
fn row_without_date_is_dropped() {
  let text = "Activity Type,Date,Time,Distance,Avg HR,Max HR,Calories\n\
              Running,,00:45:30,10.5km,155,170,600\n";
  assert!(parse_garmin_csv(text).is_empty());

  let report = ingest(text);
  assert_eq!(report.total_rows, 1);
  assert_eq!(report.rejected[0].reason, RejectReason::MissingDate);
}

#[test]
fn header_spellings_are_interchangeable() {
  let row = "Cycling,2024-04-02,1:15:00,42.2,141,168,215,480,88,520,900\n";
  let garmin = format!(
    "Activity Type,Date,Time,Distance,Avg HR,Max HR,Avg Power,Max Power,Avg Cadence,Elev Gain,Calories\n{}",
    row
  );
  let snake = format!(
    "activity_type,date,duration,distance,avg_hr,max_hr,avg_power,max_power,avg_cadence,elevation gain,CALORIES\n{}",
    row
  );
  let quoted = format!(
    "\"type\",\"Start Time\",\"Elapsed Time\",\"Distance\",\"Avg Heart Rate\",\"Max Heart Rate\",\"Power\",\"max_power\",\"Cadence\",\"Total Ascent\",\"Calories\"\n{}",
    row
  );

  let expected = parse_garmin_csv(&garmin);
  assert_eq!(expected.len(), 1);
  assert_eq!(expected[0].avg_power, Some(215));
  assert_eq!(expected[0].elevation_gain, Some(520));
  assert_eq!(parse_garmin_csv(&snake), expected);
  assert_eq!(parse_garmin_csv(&quoted), expected);
}

#[test]
fn ingestion_is_repeatable() {
  let text = "Activity Type,Date,Time,Distance\n\
              Running,2024-03-01,45:00,10 km\n\
              Swimming,bad date,30:00,1.5 km\n\
              Cycling,2024-03-03,1:30:00,45 km\n";
  let first = ingest(text);
  let second = ingest(text);
  assert_eq!(first, second);
  assert_eq!(first.workouts.len(), 2);
  // Input order is preserved
  assert_eq!(first.workouts[0].activity_type, "Running");
  assert_eq!(first.workouts[1].activity_type, "Cycling");
}

#[test]
fn malformed_optional_fields_do_not_reject_the_row() {
  let workouts = parse_garmin_csv(
    "Activity Type,Date,Time,Distance,Avg HR,Calories\n\
     Hiking,2024-06-10,about an hour,far,n/a,--\n",
  );
  assert_eq!(workouts.len(), 1);
  let hike = &workouts[0];
  assert_eq!(hike.activity_type, "Hiking");
  assert_eq!(hike.duration_seconds, None);
  assert_eq!(hike.distance_km, None);
  assert_eq!(hike.avg_heart_rate, None);
  assert_eq!(hike.calories, None);
}

#[test]
fn duration_parse_matches_arithmetic() {
  for h in [0i64, 1, 2, 10] {
    for m in [0i64, 5, 59] {
      for s in [0i64, 1, 30, 59] {
        let hms = format!("{}:{:02}:{:02}", h, m, s);
        assert_eq!(parse_duration(&hms), Some(h * 3600 + m * 60 + s), "{}", hms);
      }
    }
  }
  for m in [0i64, 7, 45, 120] {
    for s in [0i64, 9, 59] {
      let ms = format!("{}:{:02}", m, s);
      assert_eq!(parse_duration(&ms), Some(m * 60 + s), "{}", ms);
    }
  }
}

#[test]
fn duration_format_is_canonical() {
  for raw in ["00:45:30", "1:00:00", "59:59", "0:00:42", "125:00"] {
    let seconds = parse_duration(raw);
    let rendered = format_duration(seconds, DURATION_PLACEHOLDER);
    assert_eq!(parse_duration(&rendered), seconds, "{} -> {}", raw, rendered);
  }
}

#[test]
fn unit_suffixes_are_ignored() {
  for (raw, km) in [("10.5 km", 10.5), ("3.1mi", 3.1), ("42.195 km ", 42.195)] {
    assert_eq!(parse_distance(raw), Some(km));
  }
  for (raw, value) in [("165bpm", 165), ("165 bpm", 165), ("250 W", 250), ("88 spm", 88)] {
    assert_eq!(parse_integer(raw), Some(value));
  }
  assert_eq!(parse_distance("no digits"), None);
  assert_eq!(parse_integer("bpm"), None);
}
