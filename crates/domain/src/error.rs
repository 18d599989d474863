use crate::{NameError, PlanError, RegistryError, ScheduleError};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PlannerError {
    #[error("conflict: {0:?} already exists")]
    Conflict(String),
    #[error("exercise {0:?} not found")]
    ExerciseNotFound(String),
    #[error("workout {0:?} not found")]
    WorkoutNotFound(String),
    #[error("muscle group {0:?} not found")]
    MuscleGroupNotFound(String),
    #[error("exercise {exercise:?} is used by workout {workout:?}")]
    ExerciseInUse { exercise: String, workout: String },
    #[error("workout {workout:?} has no exercise at position {index}")]
    InvalidPosition { workout: String, index: usize },
    #[error(transparent)]
    InvalidName(#[from] NameError),
    #[error(transparent)]
    Plan(#[from] PlanError),
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
}
