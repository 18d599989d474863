use std::{collections::BTreeMap, rc::Rc};

use log::{debug, info};
use strum::IntoEnumIterator;

use crate::{
    Associator, Day, EquipmentKind, Exercise, ExerciseKind, Metrics, MuscleGroup, MuscleID, Name,
    PlannerError, Registry, RestDay, WeeklySchedule, Workout, WorkoutPlan,
};

/// Exercise catalog, workout catalog and weekly schedule on top of one registry.
///
/// Scheduled days hold copies of catalog workouts. Every change of a catalog workout is
/// propagated to the days it is scheduled on.
#[derive(Debug, Default)]
pub struct Planner {
    registry: Registry,
    exercises: BTreeMap<Name, Rc<Exercise>>,
    workouts: BTreeMap<Name, Workout>,
    schedule: WeeklySchedule,
}

impl Planner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    #[must_use]
    pub fn schedule(&self) -> &WeeklySchedule {
        &self.schedule
    }

    pub fn add_muscle_group(
        &mut self,
        name: &str,
        muscles: &[MuscleID],
    ) -> Result<Rc<MuscleGroup>, PlannerError> {
        Ok(self.registry.add_muscle_group(name, muscles)?)
    }

    pub fn exercises(&self) -> impl Iterator<Item = &Rc<Exercise>> {
        self.exercises.values()
    }

    #[must_use]
    pub fn exercise(&self, name: &str) -> Option<&Rc<Exercise>> {
        self.exercises.get(name.trim())
    }

    pub fn create_exercise(
        &mut self,
        name: &str,
        kind: ExerciseKind,
        equipment: Option<EquipmentKind>,
        muscle_group: Option<&str>,
    ) -> Result<Rc<Exercise>, PlannerError> {
        let name = Name::new(name)?;
        if self.exercises.contains_key(&name) {
            return Err(PlannerError::Conflict(name.to_string()));
        }
        let muscle_group = muscle_group
            .map(|group| {
                self.registry
                    .muscle_group(group)
                    .ok_or_else(|| PlannerError::MuscleGroupNotFound(group.to_string()))
            })
            .transpose()?;
        let exercise = Rc::new(Exercise::new(
            name.as_str(),
            kind,
            equipment.map(|kind| self.registry.equipment(kind)),
            muscle_group,
        ));
        self.exercises.insert(name, exercise.clone());
        debug!("created exercise {exercise}");
        Ok(exercise)
    }

    pub fn delete_exercise(&mut self, name: &str) -> Result<Rc<Exercise>, PlannerError> {
        let name = name.trim();
        if !self.exercises.contains_key(name) {
            return Err(PlannerError::ExerciseNotFound(name.to_string()));
        }
        if let Some(workout) = self.workouts.values().find(|w| w.contains_exercise(name)) {
            return Err(PlannerError::ExerciseInUse {
                exercise: name.to_string(),
                workout: workout.name().to_string(),
            });
        }
        self.exercises
            .remove(name)
            .ok_or_else(|| PlannerError::ExerciseNotFound(name.to_string()))
    }

    pub fn workouts(&self) -> impl Iterator<Item = &Workout> {
        self.workouts.values()
    }

    #[must_use]
    pub fn workout(&self, name: &str) -> Option<&Workout> {
        self.workouts.get(name.trim())
    }

    pub fn create_workout(
        &mut self,
        name: &str,
        exercises: &[&str],
    ) -> Result<&Workout, PlannerError> {
        let exercises = exercises
            .iter()
            .map(|e| {
                self.exercise(e)
                    .cloned()
                    .ok_or_else(|| PlannerError::ExerciseNotFound((*e).to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let workout = Workout::new(name, exercises)?;
        let name = workout.name().clone();
        if self.workouts.contains_key(&name) {
            return Err(PlannerError::Conflict(name.to_string()));
        }
        debug!("created workout {name}");
        Ok(self.workouts.entry(name).or_insert(workout))
    }

    pub fn add_exercise_to_workout(
        &mut self,
        workout: &str,
        exercise: &str,
    ) -> Result<(), PlannerError> {
        let exercise = self
            .exercise(exercise)
            .cloned()
            .ok_or_else(|| PlannerError::ExerciseNotFound(exercise.to_string()))?;
        self.workout_mut(workout)?.add_exercise(exercise);
        self.resync_workout(workout);
        Ok(())
    }

    pub fn remove_exercise_from_workout(
        &mut self,
        workout: &str,
        index: usize,
    ) -> Result<Rc<Exercise>, PlannerError> {
        let removed = self
            .workout_mut(workout)?
            .remove_exercise(index)
            .ok_or_else(|| PlannerError::InvalidPosition {
                workout: workout.trim().to_string(),
                index,
            })?;
        self.resync_workout(workout);
        Ok(removed)
    }

    /// Delete a workout and replace it by a rest day wherever it is scheduled.
    pub fn delete_workout(&mut self, name: &str) -> Result<Workout, PlannerError> {
        let workout = self
            .workouts
            .remove(name.trim())
            .ok_or_else(|| PlannerError::WorkoutNotFound(name.to_string()))?;
        for day in self.days_with_workout(workout.name().as_str()) {
            self.schedule.clear_day(day);
        }
        Ok(workout)
    }

    pub fn schedule_workout(&mut self, day: usize, workout: &str) -> Result<(), PlannerError> {
        let day = Day::try_from(day)?;
        let workout = self
            .workout(workout)
            .cloned()
            .ok_or_else(|| PlannerError::WorkoutNotFound(workout.to_string()))?;
        info!("scheduling {} on {day}", workout.name());
        self.schedule.set_plan(day, workout);
        Ok(())
    }

    pub fn schedule_rest_day(&mut self, day: usize, name: &str) -> Result<(), PlannerError> {
        let rest_day = RestDay::new(name)?;
        self.schedule.set_schedule_for_day(day, rest_day)?;
        Ok(())
    }

    pub fn clear_day(&mut self, day: usize) -> Result<(), PlannerError> {
        self.schedule.clear_schedule_for_day(day)?;
        Ok(())
    }

    pub fn clear_week(&mut self) {
        self.schedule.clear();
    }

    /// Drop all registrations and derive them again from the schedule.
    pub fn rebuild_metrics(&self) {
        self.registry.clear_metrics();
        self.schedule.reactivate();
    }

    /// Metrics per equipment kind for the whole week or for a single day.
    #[must_use]
    pub fn equipment_metrics(&self, day: Option<Day>) -> BTreeMap<EquipmentKind, Metrics> {
        self.registry
            .all_equipment()
            .map(|e| (e.kind(), metrics_of(&**e, day)))
            .collect()
    }

    #[must_use]
    pub fn muscle_metrics(&self, day: Option<Day>) -> BTreeMap<MuscleID, Metrics> {
        self.registry
            .muscles()
            .map(|m| (m.id(), metrics_of(&**m, day)))
            .collect()
    }

    #[must_use]
    pub fn muscle_group_metrics(&self, day: Option<Day>) -> BTreeMap<Name, Metrics> {
        self.registry
            .muscle_groups()
            .map(|g| (g.name().clone(), metrics_of(&**g, day)))
            .collect()
    }

    /// Days of the week with the name of their plan.
    pub fn week(&self) -> impl Iterator<Item = (Day, &Name)> {
        Day::iter().map(|day| (day, self.schedule.plan(day).name()))
    }

    fn workout_mut(&mut self, name: &str) -> Result<&mut Workout, PlannerError> {
        self.workouts
            .get_mut(name.trim())
            .ok_or_else(|| PlannerError::WorkoutNotFound(name.to_string()))
    }

    fn days_with_workout(&self, name: &str) -> Vec<Day> {
        self.schedule
            .iter()
            .filter(|(_, plan)| {
                matches!(plan, WorkoutPlan::Workout(w) if w.name().as_str() == name)
            })
            .map(|(day, _)| day)
            .collect()
    }

    fn resync_workout(&mut self, name: &str) {
        let Some(workout) = self.workout(name).cloned() else {
            return;
        };
        for day in self.days_with_workout(workout.name().as_str()) {
            self.schedule.set_plan(day, workout.clone());
        }
    }
}

fn metrics_of(associator: &dyn Associator, day: Option<Day>) -> Metrics {
    match day {
        Some(day) => associator.aggregated_exercise_metrics_for_context(day.name()),
        None => associator.aggregated_exercise_metrics(),
    }
}
