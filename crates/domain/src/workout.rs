use std::rc::Rc;

use crate::{Exercise, Metrics, Name, NameError};

#[derive(Debug, Clone)]
pub struct Workout {
    name: Name,
    exercises: Vec<Rc<Exercise>>,
}

impl Workout {
    pub fn new(name: &str, exercises: Vec<Rc<Exercise>>) -> Result<Self, PlanError> {
        Ok(Self {
            name: Name::new(name)?,
            exercises,
        })
    }

    #[must_use]
    pub fn name(&self) -> &Name {
        &self.name
    }

    #[must_use]
    pub fn exercises(&self) -> &[Rc<Exercise>] {
        &self.exercises
    }

    pub fn add_exercise(&mut self, exercise: Rc<Exercise>) {
        self.exercises.push(exercise);
    }

    pub fn remove_exercise(&mut self, index: usize) -> Option<Rc<Exercise>> {
        if index < self.exercises.len() {
            Some(self.exercises.remove(index))
        } else {
            None
        }
    }

    #[must_use]
    pub fn contains_exercise(&self, name: &str) -> bool {
        self.exercises.iter().any(|e| e.name() == name)
    }

    #[must_use]
    pub fn duration(&self) -> f64 {
        self.exercises
            .iter()
            .map(|e| e.duration())
            .sum::<f64>()
            .min(f64::MAX)
    }

    /// Metrics of all exercises, independent of any registration.
    #[must_use]
    pub fn summary(&self) -> Metrics {
        let metrics = self
            .exercises
            .iter()
            .map(|e| e.metrics())
            .collect::<Vec<_>>();
        Metrics::sum(&metrics)
    }

    pub fn activate_metrics(&self, context: &str) {
        for exercise in &self.exercises {
            exercise.activate_metrics(context);
        }
    }

    pub fn deactivate_metrics(&self, context: &str) {
        for exercise in &self.exercises {
            exercise.deactivate_metrics(context);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestDay {
    name: Name,
}

impl RestDay {
    pub fn new(name: &str) -> Result<Self, PlanError> {
        Ok(Self {
            name: Name::new(name)?,
        })
    }

    #[must_use]
    pub fn name(&self) -> &Name {
        &self.name
    }
}

impl Default for RestDay {
    fn default() -> Self {
        Self {
            name: Name(String::from("Rest Day")),
        }
    }
}

/// Plan that occupies one day of the schedule.
#[derive(Debug, Clone)]
pub enum WorkoutPlan {
    Workout(Workout),
    RestDay(RestDay),
}

impl WorkoutPlan {
    #[must_use]
    pub fn name(&self) -> &Name {
        match self {
            WorkoutPlan::Workout(workout) => workout.name(),
            WorkoutPlan::RestDay(rest_day) => rest_day.name(),
        }
    }

    #[must_use]
    pub fn is_rest_day(&self) -> bool {
        matches!(self, WorkoutPlan::RestDay(_))
    }

    #[must_use]
    pub fn exercises(&self) -> &[Rc<Exercise>] {
        match self {
            WorkoutPlan::Workout(workout) => workout.exercises(),
            WorkoutPlan::RestDay(_) => &[],
        }
    }

    #[must_use]
    pub fn duration(&self) -> f64 {
        match self {
            WorkoutPlan::Workout(workout) => workout.duration(),
            WorkoutPlan::RestDay(_) => 0.0,
        }
    }

    #[must_use]
    pub fn summary(&self) -> Metrics {
        match self {
            WorkoutPlan::Workout(workout) => workout.summary(),
            WorkoutPlan::RestDay(_) => Metrics::zero(),
        }
    }

    pub fn activate_metrics(&self, context: &str) {
        if let WorkoutPlan::Workout(workout) = self {
            workout.activate_metrics(context);
        }
    }

    pub fn deactivate_metrics(&self, context: &str) {
        if let WorkoutPlan::Workout(workout) = self {
            workout.deactivate_metrics(context);
        }
    }
}

impl Default for WorkoutPlan {
    fn default() -> Self {
        WorkoutPlan::RestDay(RestDay::default())
    }
}

impl From<Workout> for WorkoutPlan {
    fn from(value: Workout) -> Self {
        WorkoutPlan::Workout(value)
    }
}

impl From<RestDay> for WorkoutPlan {
    fn from(value: RestDay) -> Self {
        WorkoutPlan::RestDay(value)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    #[error("Invalid plan name: {0}")]
    InvalidName(#[from] NameError),
}
