use liftplan_domain as domain;
use liftplan_domain::{Day, Planner, Property, WorkoutPlan};
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Serializable state of a planner.
///
/// Registrations are not stored. They are derived again by scheduling the stored plans.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Snapshot {
    #[serde(default)]
    pub muscle_groups: Vec<MuscleGroup>,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
    #[serde(default)]
    pub workouts: Vec<Workout>,
    #[serde(default)]
    pub schedule: Vec<ScheduleSlot>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MuscleGroup {
    pub name: String,
    pub muscles: Vec<String>,
}

impl From<&domain::MuscleGroup> for MuscleGroup {
    fn from(value: &domain::MuscleGroup) -> Self {
        Self {
            name: value.name().to_string(),
            muscles: value
                .muscles()
                .iter()
                .map(|m| m.id().name().to_string())
                .collect(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Exercise {
    pub name: String,
    pub kind: ExerciseKind,
    pub equipment: Option<String>,
    pub muscle_group: Option<String>,
}

impl From<&domain::Exercise> for Exercise {
    fn from(value: &domain::Exercise) -> Self {
        Self {
            name: value.name().to_string(),
            kind: ExerciseKind::from(*value.kind()),
            equipment: value.equipment().map(|e| e.kind().name().to_string()),
            muscle_group: value.muscle_group().map(|g| g.name().to_string()),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ExerciseKind {
    Strength {
        sets: u32,
        reps: u32,
        seconds_per_rep: f64,
        rest_time_minutes: f64,
    },
    Endurance { duration_minutes: f64 },
    Interval {
        time_on_seconds: f64,
        time_off_seconds: f64,
        repetitions: u32,
    },
}

impl From<domain::ExerciseKind> for ExerciseKind {
    fn from(value: domain::ExerciseKind) -> Self {
        match value {
            domain::ExerciseKind::Strength {
                sets,
                reps,
                seconds_per_rep,
                rest_time_minutes,
            } => ExerciseKind::Strength {
                sets,
                reps,
                seconds_per_rep,
                rest_time_minutes,
            },
            domain::ExerciseKind::Endurance { duration_minutes } => {
                ExerciseKind::Endurance { duration_minutes }
            }
            domain::ExerciseKind::Interval {
                time_on_seconds,
                time_off_seconds,
                repetitions,
            } => ExerciseKind::Interval {
                time_on_seconds,
                time_off_seconds,
                repetitions,
            },
        }
    }
}

impl From<ExerciseKind> for domain::ExerciseKind {
    fn from(value: ExerciseKind) -> Self {
        match value {
            ExerciseKind::Strength {
                sets,
                reps,
                seconds_per_rep,
                rest_time_minutes,
            } => domain::ExerciseKind::strength(
                saturating_i32(sets),
                saturating_i32(reps),
                seconds_per_rep,
                rest_time_minutes,
            ),
            ExerciseKind::Endurance { duration_minutes } => {
                domain::ExerciseKind::endurance(duration_minutes)
            }
            ExerciseKind::Interval {
                time_on_seconds,
                time_off_seconds,
                repetitions,
            } => domain::ExerciseKind::interval(
                time_on_seconds,
                time_off_seconds,
                saturating_i32(repetitions),
            ),
        }
    }
}

fn saturating_i32(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Workout {
    pub name: String,
    pub exercises: Vec<String>,
}

impl From<&domain::Workout> for Workout {
    fn from(value: &domain::Workout) -> Self {
        Self {
            name: value.name().to_string(),
            exercises: value
                .exercises()
                .iter()
                .map(|e| e.name().to_string())
                .collect(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ScheduleSlot {
    pub day: String,
    pub plan: Plan,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum Plan {
    Workout(String),
    RestDay(String),
}

impl From<(Day, &WorkoutPlan)> for ScheduleSlot {
    fn from((day, plan): (Day, &WorkoutPlan)) -> Self {
        Self {
            day: day.to_string(),
            plan: match plan {
                WorkoutPlan::Workout(workout) => Plan::Workout(workout.name().to_string()),
                WorkoutPlan::RestDay(rest_day) => Plan::RestDay(rest_day.name().to_string()),
            },
        }
    }
}

impl From<&Planner> for Snapshot {
    fn from(value: &Planner) -> Self {
        Self {
            muscle_groups: value
                .registry()
                .custom_muscle_groups()
                .map(|g| MuscleGroup::from(&**g))
                .collect(),
            exercises: value
                .exercises()
                .map(|e| Exercise::from(&**e))
                .collect(),
            workouts: value.workouts().map(Workout::from).collect(),
            schedule: value.schedule().iter().map(ScheduleSlot::from).collect(),
        }
    }
}

impl TryFrom<Snapshot> for Planner {
    type Error = SnapshotError;

    fn try_from(value: Snapshot) -> Result<Self, Self::Error> {
        let mut planner = Planner::new();

        for group in value.muscle_groups {
            let muscles = group
                .muscles
                .iter()
                .map(|m| domain::MuscleID::try_from(m.as_str()))
                .collect::<Result<Vec<_>, _>>()?;
            planner.add_muscle_group(&group.name, &muscles)?;
        }

        for exercise in value.exercises {
            let equipment = exercise
                .equipment
                .as_deref()
                .map(domain::EquipmentKind::try_from)
                .transpose()?;
            planner.create_exercise(
                &exercise.name,
                exercise.kind.into(),
                equipment,
                exercise.muscle_group.as_deref(),
            )?;
        }

        for workout in value.workouts {
            let exercises = workout
                .exercises
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>();
            planner.create_workout(&workout.name, &exercises)?;
        }

        for slot in value.schedule {
            let day = slot
                .day
                .parse::<Day>()
                .map_err(|_| SnapshotError::UnknownDay(slot.day.clone()))?;
            match slot.plan {
                Plan::Workout(name) => planner.schedule_workout(day.index(), &name)?,
                Plan::RestDay(name) => planner.schedule_rest_day(day.index(), &name)?,
            }
            debug!("restored plan of {day}");
        }

        info!(
            "restored {} exercises and {} workouts",
            planner.exercises().count(),
            planner.workouts().count()
        );

        Ok(planner)
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum SnapshotError {
    #[error(transparent)]
    Planner(#[from] domain::PlannerError),
    #[error(transparent)]
    UnknownEquipment(#[from] domain::EquipmentKindError),
    #[error(transparent)]
    UnknownMuscle(#[from] domain::MuscleIDError),
    #[error("Unknown day {0:?}")]
    UnknownDay(String),
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::tests::data;

    use super::*;

    #[test]
    fn test_snapshot_from_planner() {
        assert_eq!(Snapshot::from(&data::planner()), *data::SNAPSHOT);
    }

    #[test]
    fn test_planner_from_snapshot() {
        let planner = Planner::try_from(data::SNAPSHOT.clone()).unwrap();

        assert_eq!(
            planner
                .registry()
                .custom_muscle_groups()
                .map(|g| g.name().to_string())
                .collect::<Vec<_>>(),
            vec!["Pull"]
        );
        assert_eq!(planner.exercises().count(), 4);
        assert_eq!(
            planner
                .workout("Upper")
                .unwrap()
                .exercises()
                .iter()
                .map(|e| e.name())
                .collect::<Vec<_>>(),
            vec!["Bench Press", "Row"]
        );
        assert_eq!(planner.schedule().plan(Day::Monday).name().as_str(), "Upper");
        assert_eq!(
            planner.schedule().plan(Day::Saturday).name().as_str(),
            "Recovery"
        );
    }

    #[test]
    fn test_snapshot_json_format() {
        let json = serde_json::to_value(&*data::SNAPSHOT).unwrap();
        assert_eq!(
            json["exercises"][0],
            serde_json::json!({
                "name": "Bench Press",
                "kind": {
                    "type": "strength",
                    "sets": 4,
                    "reps": 12,
                    "seconds_per_rep": 2.5,
                    "rest_time_minutes": 2.0
                },
                "equipment": "Barbell",
                "muscle_group": "Chest"
            })
        );
        assert_eq!(
            json["schedule"][0],
            serde_json::json!({"day": "Monday", "plan": {"kind": "workout", "name": "Upper"}})
        );
    }

    #[test]
    fn test_snapshot_missing_sections() {
        let snapshot: Snapshot = serde_json::from_str("{}").unwrap();
        assert_eq!(snapshot, Snapshot::default());
        let planner = Planner::try_from(snapshot).unwrap();
        assert_eq!(planner.exercises().count(), 0);
    }

    #[rstest]
    #[case::unknown_day(
        |s: &mut Snapshot| s.schedule[0].day = "Someday".to_string(),
        SnapshotError::UnknownDay("Someday".to_string())
    )]
    #[case::unknown_equipment(
        |s: &mut Snapshot| s.exercises[0].equipment = Some("Rope".to_string()),
        SnapshotError::UnknownEquipment(domain::EquipmentKindError::Unknown("Rope".to_string()))
    )]
    #[case::unknown_muscle(
        |s: &mut Snapshot| s.muscle_groups[0].muscles.push("Wings".to_string()),
        SnapshotError::UnknownMuscle(domain::MuscleIDError::Unknown("Wings".to_string()))
    )]
    #[case::unknown_exercise(
        |s: &mut Snapshot| s.workouts[0].exercises.push("Squat".to_string()),
        SnapshotError::Planner(domain::PlannerError::ExerciseNotFound("Squat".to_string()))
    )]
    #[case::unknown_workout(
        |s: &mut Snapshot| s.schedule[0].plan = Plan::Workout("Lower".to_string()),
        SnapshotError::Planner(domain::PlannerError::WorkoutNotFound("Lower".to_string()))
    )]
    fn test_planner_from_invalid_snapshot(
        #[case] modify: fn(&mut Snapshot),
        #[case] expected: SnapshotError,
    ) {
        let mut snapshot = data::SNAPSHOT.clone();
        modify(&mut snapshot);
        assert_eq!(Planner::try_from(snapshot).unwrap_err(), expected);
    }
}
