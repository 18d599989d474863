use std::{collections::BTreeMap, fmt, rc::Rc};

use log::debug;

use crate::{Associator, Equipment, Metric, Metrics, MuscleGroup};

/// Kind-specific parameters of an exercise.
///
/// The constructors clamp every parameter so that duration arithmetic stays finite and
/// non-negative. Durations are given in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
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

impl ExerciseKind {
    #[must_use]
    pub fn strength(sets: i32, reps: i32, seconds_per_rep: f64, rest_time_minutes: f64) -> Self {
        let bound = f64::MAX.cbrt();
        ExerciseKind::Strength {
            sets: at_least_one(sets),
            reps: at_least_one(reps),
            seconds_per_rep: clamp(seconds_per_rep, 0.0, bound),
            rest_time_minutes: clamp(rest_time_minutes, 0.0, bound),
        }
    }

    #[must_use]
    pub fn endurance(duration_minutes: f64) -> Self {
        ExerciseKind::Endurance {
            duration_minutes: clamp(duration_minutes, f64::MIN_POSITIVE, f64::MAX / 120.0),
        }
    }

    #[must_use]
    pub fn interval(time_on_seconds: f64, time_off_seconds: f64, repetitions: i32) -> Self {
        let repetitions = repetitions.clamp(0, i32::MAX / 2).unsigned_abs();
        let bound = f64::MAX / (2.0 * f64::from(repetitions.max(1)));
        ExerciseKind::Interval {
            time_on_seconds: clamp(time_on_seconds, f64::MIN_POSITIVE, bound),
            time_off_seconds: clamp(time_off_seconds, 0.0, bound),
            repetitions,
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            ExerciseKind::Strength { .. } => "Strength",
            ExerciseKind::Endurance { .. } => "Endurance",
            ExerciseKind::Interval { .. } => "Interval",
        }
    }

    #[must_use]
    pub fn duration(&self) -> f64 {
        let duration = match *self {
            ExerciseKind::Strength {
                sets,
                reps,
                seconds_per_rep,
                ..
            } => f64::from(sets) * f64::from(reps) * seconds_per_rep + self.rest_time(),
            ExerciseKind::Endurance { duration_minutes } => duration_minutes * 60.0,
            ExerciseKind::Interval {
                time_on_seconds,
                time_off_seconds,
                repetitions,
            } => (time_on_seconds + time_off_seconds) * f64::from(repetitions),
        };
        finite(duration)
    }

    /// Total rest between sets or intervals in seconds.
    #[must_use]
    pub fn rest_time(&self) -> f64 {
        match *self {
            ExerciseKind::Strength {
                sets,
                rest_time_minutes,
                ..
            } => finite(f64::from(sets) * rest_time_minutes * 60.0),
            ExerciseKind::Endurance { .. } => 0.0,
            ExerciseKind::Interval {
                time_off_seconds,
                repetitions,
                ..
            } => finite(time_off_seconds * f64::from(repetitions)),
        }
    }

    /// Raw parameters as entered, after clamping.
    #[must_use]
    pub fn info(&self) -> BTreeMap<&'static str, f64> {
        match *self {
            ExerciseKind::Strength {
                sets,
                reps,
                seconds_per_rep,
                rest_time_minutes,
            } => BTreeMap::from([
                ("sets", f64::from(sets)),
                ("reps", f64::from(reps)),
                ("secondsPerRep", seconds_per_rep),
                ("restTime", rest_time_minutes),
            ]),
            ExerciseKind::Endurance { duration_minutes } => {
                BTreeMap::from([("duration", duration_minutes)])
            }
            ExerciseKind::Interval {
                time_on_seconds,
                time_off_seconds,
                repetitions,
            } => BTreeMap::from([
                ("timeOn", time_on_seconds),
                ("timeOff", time_off_seconds),
                ("repetitions", f64::from(repetitions)),
            ]),
        }
    }

    #[must_use]
    pub fn metrics(&self) -> Metrics {
        let duration = self.duration();
        match *self {
            ExerciseKind::Strength { sets, reps, .. } => Metrics::new()
                .with(Metric::TotalSets, f64::from(sets))
                .with(Metric::TotalReps, f64::from(reps) * f64::from(sets))
                .with(Metric::TotalStrengthDuration, duration)
                .with(Metric::TotalRestTimeBetween, self.rest_time())
                .with(Metric::TotalDuration, duration),
            ExerciseKind::Endurance { .. } => Metrics::new()
                .with(Metric::TotalEnduranceDuration, duration)
                .with(Metric::TotalDuration, duration),
            ExerciseKind::Interval { .. } => Metrics::new()
                .with(Metric::TotalIntervalDuration, duration)
                .with(Metric::TotalRestTimeBetween, self.rest_time())
                .with(Metric::TotalDuration, duration),
        }
    }
}

fn at_least_one(value: i32) -> u32 {
    value.max(1).unsigned_abs()
}

fn clamp(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        return min;
    }
    value.clamp(min, max)
}

fn finite(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, f64::MAX)
    }
}

/// Immutable exercise referencing shared equipment and muscle group handles.
#[derive(Debug, Clone)]
pub struct Exercise {
    name: String,
    kind: ExerciseKind,
    equipment: Option<Rc<Equipment>>,
    muscle_group: Option<Rc<MuscleGroup>>,
}

impl Exercise {
    #[must_use]
    pub fn new(
        name: &str,
        kind: ExerciseKind,
        equipment: Option<Rc<Equipment>>,
        muscle_group: Option<Rc<MuscleGroup>>,
    ) -> Self {
        Self {
            name: name.trim().to_string(),
            kind,
            equipment,
            muscle_group,
        }
    }

    #[must_use]
    pub fn strength(
        name: &str,
        sets: i32,
        reps: i32,
        seconds_per_rep: f64,
        rest_time_minutes: f64,
        equipment: Option<Rc<Equipment>>,
        muscle_group: Option<Rc<MuscleGroup>>,
    ) -> Self {
        Self::new(
            name,
            ExerciseKind::strength(sets, reps, seconds_per_rep, rest_time_minutes),
            equipment,
            muscle_group,
        )
    }

    #[must_use]
    pub fn endurance(
        name: &str,
        duration_minutes: f64,
        equipment: Option<Rc<Equipment>>,
        muscle_group: Option<Rc<MuscleGroup>>,
    ) -> Self {
        Self::new(
            name,
            ExerciseKind::endurance(duration_minutes),
            equipment,
            muscle_group,
        )
    }

    #[must_use]
    pub fn interval(
        name: &str,
        time_on_seconds: f64,
        time_off_seconds: f64,
        repetitions: i32,
        equipment: Option<Rc<Equipment>>,
        muscle_group: Option<Rc<MuscleGroup>>,
    ) -> Self {
        Self::new(
            name,
            ExerciseKind::interval(time_on_seconds, time_off_seconds, repetitions),
            equipment,
            muscle_group,
        )
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn kind(&self) -> &ExerciseKind {
        &self.kind
    }

    #[must_use]
    pub fn equipment(&self) -> Option<&Rc<Equipment>> {
        self.equipment.as_ref()
    }

    #[must_use]
    pub fn muscle_group(&self) -> Option<&Rc<MuscleGroup>> {
        self.muscle_group.as_ref()
    }

    #[must_use]
    pub fn duration(&self) -> f64 {
        self.kind.duration()
    }

    #[must_use]
    pub fn info(&self) -> BTreeMap<&'static str, f64> {
        self.kind.info()
    }

    #[must_use]
    pub fn metrics(&self) -> Metrics {
        self.kind.metrics()
    }

    /// Attribute the metrics of this exercise to `context`.
    ///
    /// Missing equipment or muscle group is skipped. Rejected registrations do not abort the
    /// remaining ones.
    pub fn activate_metrics(&self, context: &str) {
        let metrics = self.metrics();
        if let Some(equipment) = &self.equipment {
            equipment.register_exercise(&self.name, context, &metrics);
        }
        if let Some(muscle_group) = &self.muscle_group {
            muscle_group.register_muscles_for_metrics(&self.name, context, &metrics);
        }
        debug!("activated {:?} for {context:?}", self.name);
    }

    pub fn deactivate_metrics(&self, context: &str) {
        if let Some(equipment) = &self.equipment {
            equipment.unregister_exercise(&self.name, context);
        }
        if let Some(muscle_group) = &self.muscle_group {
            muscle_group.unregister_muscles_from_metrics(&self.name, context);
        }
        debug!("deactivated {:?} for {context:?}", self.name);
    }
}

impl fmt::Display for Exercise {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.kind.name())
    }
}
