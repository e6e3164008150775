//! Workout and exercise logging.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::domain::foundation::{
    bounded_text, optional_text, Timestamp, UserId, ValidationError, WorkoutId,
};

const MAX_TITLE_LEN: usize = 100;
const MAX_NOTES_LEN: usize = 2000;
const MAX_EXERCISES: usize = 50;
const MAX_DURATION_MINUTES: i32 = 600;
const FUTURE_SKEW_MINUTES: i64 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub name: String,
    pub sets: i32,
    pub reps: i32,
    pub weight_kg: Option<f64>,
    pub duration_seconds: Option<i32>,
}

impl Exercise {
    pub fn new(
        name: &str,
        sets: i32,
        reps: i32,
        weight_kg: Option<f64>,
        duration_seconds: Option<i32>,
    ) -> Result<Self, ValidationError> {
        let name = bounded_text("exercises.name", name, 1, 100)?;
        int_range("exercises.sets", sets, 1, 100)?;
        int_range("exercises.reps", reps, 0, 1000)?;
        if let Some(w) = weight_kg {
            if !w.is_finite() || !(0.0..=1000.0).contains(&w) {
                return Err(ValidationError::invalid_format(
                    "exercises.weight_kg",
                    "must be between 0 and 1000",
                ));
            }
        }
        if let Some(d) = duration_seconds {
            int_range("exercises.duration_seconds", d, 0, 86_400)?;
        }
        Ok(Self {
            name,
            sets,
            reps,
            weight_kg,
            duration_seconds,
        })
    }

    /// sets × reps × weight; bodyweight and timed exercises contribute zero.
    pub fn volume_kg(&self) -> f64 {
        self.sets as f64 * self.reps as f64 * self.weight_kg.unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Workout {
    pub id: WorkoutId,
    pub user_id: UserId,
    pub title: String,
    pub performed_at: Timestamp,
    pub duration_minutes: i32,
    pub notes: Option<String>,
    pub exercises: Vec<Exercise>,
    pub created_at: Timestamp,
}

impl Workout {
    pub fn log(
        user_id: UserId,
        title: &str,
        performed_at: Option<Timestamp>,
        duration_minutes: i32,
        notes: Option<&str>,
        exercises: Vec<Exercise>,
        now: Timestamp,
    ) -> Result<Self, ValidationError> {
        let title = bounded_text("title", title, 1, MAX_TITLE_LEN)?;
        int_range("duration_minutes", duration_minutes, 1, MAX_DURATION_MINUTES)?;
        if exercises.is_empty() || exercises.len() > MAX_EXERCISES {
            return Err(ValidationError::out_of_range(
                "exercises",
                1,
                MAX_EXERCISES as i64,
                exercises.len() as i64,
            ));
        }
        let performed_at = performed_at.unwrap_or(now);
        if performed_at.is_after(&now.add_minutes(FUTURE_SKEW_MINUTES)) {
            return Err(ValidationError::invalid_format(
                "performed_at",
                "cannot be in the future",
            ));
        }

        Ok(Self {
            id: WorkoutId::new(),
            user_id,
            title,
            performed_at,
            duration_minutes,
            notes: optional_text("notes", notes, MAX_NOTES_LEN)?,
            exercises,
            created_at: now,
        })
    }

    pub fn volume_kg(&self) -> f64 {
        self.exercises.iter().map(Exercise::volume_kg).sum()
    }
}

/// Aggregate numbers over a user's whole workout history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkoutStats {
    pub total_workouts: usize,
    pub total_minutes: i64,
    pub total_volume_kg: f64,
    pub workouts_last_7_days: usize,
    pub current_streak_days: u32,
}

impl WorkoutStats {
    pub fn compute(workouts: &[Workout], now: Timestamp) -> Self {
        let week_ago = now.add_days(-7);
        let days: BTreeSet<NaiveDate> = workouts.iter().map(|w| w.performed_at.date()).collect();

        Self {
            total_workouts: workouts.len(),
            total_minutes: workouts.iter().map(|w| w.duration_minutes as i64).sum(),
            total_volume_kg: (workouts.iter().map(Workout::volume_kg).sum::<f64>() * 10.0).round()
                / 10.0,
            workouts_last_7_days: workouts
                .iter()
                .filter(|w| w.performed_at.is_after(&week_ago))
                .count(),
            current_streak_days: streak(&days, now.date()),
        }
    }
}

/// Consecutive workout days ending today, or yesterday if today has none yet.
fn streak(days: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
    let mut cursor = if days.contains(&today) {
        today
    } else {
        today - Duration::days(1)
    };
    let mut count = 0;
    while days.contains(&cursor) {
        count += 1;
        cursor -= Duration::days(1);
    }
    count
}

fn int_range(field: &str, value: i32, min: i32, max: i32) -> Result<(), ValidationError> {
    if value < min || value > max {
        return Err(ValidationError::out_of_range(field, min as i64, max as i64, value as i64));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn at(rfc3339: &str) -> Timestamp {
        Timestamp::from_datetime(DateTime::parse_from_rfc3339(rfc3339).unwrap().with_timezone(&Utc))
    }

    fn squat() -> Exercise {
        Exercise::new("Back squat", 5, 5, Some(100.0), None).unwrap()
    }

    fn workout_at(ts: Timestamp, now: Timestamp) -> Workout {
        Workout::log(UserId::new(), "Legs", Some(ts), 45, None, vec![squat()], now).unwrap()
    }

    #[test]
    fn exercise_rejects_zero_sets() {
        assert!(Exercise::new("Plank", 0, 1, None, Some(60)).is_err());
    }

    #[test]
    fn exercise_rejects_blank_name() {
        assert!(Exercise::new(" ", 3, 10, None, None).is_err());
    }

    #[test]
    fn workout_requires_exercises() {
        let now = Timestamp::now();
        assert!(Workout::log(UserId::new(), "Rest", None, 10, None, vec![], now).is_err());
    }

    #[test]
    fn workout_rejects_excessive_duration() {
        let now = Timestamp::now();
        assert!(Workout::log(UserId::new(), "Ultra", None, 601, None, vec![squat()], now).is_err());
    }

    #[test]
    fn workout_allows_small_clock_skew() {
        let now = Timestamp::now();
        assert!(Workout::log(UserId::new(), "A", Some(now.add_minutes(4)), 10, None, vec![squat()], now).is_ok());
        assert!(Workout::log(UserId::new(), "A", Some(now.add_minutes(6)), 10, None, vec![squat()], now).is_err());
    }

    #[test]
    fn volume_sums_weighted_sets() {
        let now = Timestamp::now();
        let plank = Exercise::new("Plank", 3, 1, None, Some(60)).unwrap();
        let w = Workout::log(UserId::new(), "Mix", None, 30, None, vec![squat(), plank], now).unwrap();
        assert_eq!(w.volume_kg(), 2500.0);
    }

    #[test]
    fn stats_count_streak_ending_yesterday() {
        let now = at("2024-05-10T08:00:00Z");
        let workouts = vec![
            workout_at(at("2024-05-09T18:00:00Z"), now),
            workout_at(at("2024-05-08T18:00:00Z"), now),
            workout_at(at("2024-05-07T07:00:00Z"), now),
            workout_at(at("2024-05-01T07:00:00Z"), now),
        ];
        let stats = WorkoutStats::compute(&workouts, now);

        assert_eq!(stats.total_workouts, 4);
        assert_eq!(stats.total_minutes, 180);
        assert_eq!(stats.workouts_last_7_days, 3);
        assert_eq!(stats.current_streak_days, 3);
        assert_eq!(stats.total_volume_kg, 10_000.0);
    }

    #[test]
    fn streak_breaks_on_gap() {
        let now = at("2024-05-10T08:00:00Z");
        let workouts = vec![workout_at(at("2024-05-08T18:00:00Z"), now)];
        assert_eq!(WorkoutStats::compute(&workouts, now).current_streak_days, 0);
    }
}
