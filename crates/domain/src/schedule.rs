use log::debug;
use strum::IntoEnumIterator;

use crate::{Metrics, RestDay, WorkoutPlan};

/// Day of the week.
///
/// The index (Monday = 0) and the English name are a stable contract: the name is the context
/// under which the metrics of the day's plan are registered.
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    PartialEq,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
    strum::IntoStaticStr,
)]
pub enum Day {
    Monday = 0,
    Tuesday = 1,
    Wednesday = 2,
    Thursday = 3,
    Friday = 4,
    Saturday = 5,
    Sunday = 6,
}

impl Day {
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        self.into()
    }
}

impl TryFrom<usize> for Day {
    type Error = ScheduleError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Day::iter()
            .nth(value)
            .ok_or(ScheduleError::InvalidDay(value))
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Day must be in the range 0 to 6 ({0} > 6)")]
    InvalidDay(usize),
}

/// Seven slots, each holding exactly one plan.
///
/// The metrics registered under a day's name always correspond to the plan in that slot.
#[derive(Debug, Default)]
pub struct WeeklySchedule {
    plans: [WorkoutPlan; 7],
}

impl WeeklySchedule {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the plan of `day` and return the previous one.
    ///
    /// The previous plan is deactivated before the new plan is activated.
    pub fn set_plan(&mut self, day: Day, plan: impl Into<WorkoutPlan>) -> WorkoutPlan {
        let plan = plan.into();
        let context = day.name();
        self.plans[day.index()].deactivate_metrics(context);
        let previous = std::mem::replace(&mut self.plans[day.index()], plan);
        self.plans[day.index()].activate_metrics(context);
        debug!(
            "scheduled {} on {context} (replacing {})",
            self.plans[day.index()].name(),
            previous.name()
        );
        previous
    }

    pub fn clear_day(&mut self, day: Day) -> WorkoutPlan {
        self.set_plan(day, RestDay::default())
    }

    #[must_use]
    pub fn plan(&self, day: Day) -> &WorkoutPlan {
        &self.plans[day.index()]
    }

    pub fn set_schedule_for_day(
        &mut self,
        day: usize,
        plan: impl Into<WorkoutPlan>,
    ) -> Result<WorkoutPlan, ScheduleError> {
        Ok(self.set_plan(Day::try_from(day)?, plan))
    }

    pub fn clear_schedule_for_day(&mut self, day: usize) -> Result<WorkoutPlan, ScheduleError> {
        Ok(self.clear_day(Day::try_from(day)?))
    }

    pub fn schedule_for_day(&self, day: usize) -> Result<&WorkoutPlan, ScheduleError> {
        Ok(self.plan(Day::try_from(day)?))
    }

    pub fn clear(&mut self) {
        for day in Day::iter() {
            self.clear_day(day);
        }
    }

    /// Activate the metrics of every scheduled plan again.
    ///
    /// Only meaningful after the registries of all touched associators have been cleared.
    pub fn reactivate(&self) {
        for (day, plan) in self.iter() {
            plan.activate_metrics(day.name());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Day, &WorkoutPlan)> {
        Day::iter().zip(self.plans.iter())
    }

    #[must_use]
    pub fn week_metrics(&self) -> Metrics {
        let summaries = self.plans.iter().map(WorkoutPlan::summary).collect::<Vec<_>>();
        Metrics::sum(&summaries)
    }

    #[must_use]
    pub fn week_summary(&self) -> String {
        self.iter()
            .map(|(day, plan)| format!("{day}: {}\n", plan.name()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use assert_approx_eq::assert_approx_eq;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::{
        Associator, Equipment, EquipmentKind, Exercise, Metric, Muscle, MuscleGroup, MuscleID,
        Name, Workout,
    };

    use super::*;

    struct Fixture {
        barbell: Rc<Equipment>,
        treadmill: Rc<Equipment>,
        legs: Rc<MuscleGroup>,
        quads: Rc<Muscle>,
        squat: Rc<Exercise>,
        run: Rc<Exercise>,
    }

    fn fixture() -> Fixture {
        let barbell = Rc::new(Equipment::new(EquipmentKind::Barbell));
        let treadmill = Rc::new(Equipment::new(EquipmentKind::Treadmill));
        let quads = Rc::new(Muscle::new(MuscleID::Quads));
        let legs = Rc::new(MuscleGroup::new(
            Name::new("Legs").unwrap(),
            [quads.clone(), Rc::new(Muscle::new(MuscleID::Hamstrings))],
        ));
        let squat = Rc::new(Exercise::strength(
            "Squat",
            5,
            5,
            3.0,
            3.0,
            Some(barbell.clone()),
            Some(legs.clone()),
        ));
        let run = Rc::new(Exercise::endurance(
            "Run",
            30.0,
            Some(treadmill.clone()),
            Some(legs.clone()),
        ));
        Fixture {
            barbell,
            treadmill,
            legs,
            quads,
            squat,
            run,
        }
    }

    #[rstest]
    #[case(0, Day::Monday, "Monday")]
    #[case(3, Day::Thursday, "Thursday")]
    #[case(6, Day::Sunday, "Sunday")]
    fn test_day_try_from(#[case] index: usize, #[case] day: Day, #[case] name: &str) {
        assert_eq!(Day::try_from(index), Ok(day));
        assert_eq!(day.index(), index);
        assert_eq!(day.name(), name);
        assert_eq!(day.to_string(), name);
        assert_eq!(name.parse::<Day>(), Ok(day));
    }

    #[test]
    fn test_day_try_from_invalid() {
        assert_eq!(Day::try_from(7_usize), Err(ScheduleError::InvalidDay(7)));
    }

    #[test]
    fn test_new_schedule_is_rest_days() {
        let schedule = WeeklySchedule::new();
        for day in 0..7 {
            assert!(schedule.schedule_for_day(day).unwrap().is_rest_day());
        }
        assert_eq!(schedule.week_metrics(), Metrics::zero());
    }

    #[rstest]
    #[case(7)]
    #[case(usize::MAX)]
    fn test_invalid_day(#[case] day: usize) {
        let mut schedule = WeeklySchedule::new();
        assert_eq!(
            schedule
                .set_schedule_for_day(day, RestDay::default())
                .unwrap_err(),
            ScheduleError::InvalidDay(day)
        );
        assert_eq!(
            schedule.clear_schedule_for_day(day).unwrap_err(),
            ScheduleError::InvalidDay(day)
        );
        assert_eq!(
            schedule.schedule_for_day(day).unwrap_err(),
            ScheduleError::InvalidDay(day)
        );
    }

    #[test]
    fn test_set_schedule_for_day_activates_metrics() {
        let f = fixture();
        let mut schedule = WeeklySchedule::new();
        let workout = Workout::new("Legs", vec![f.squat.clone()]).unwrap();

        schedule.set_schedule_for_day(0, workout).unwrap();

        assert_eq!(schedule.schedule_for_day(0).unwrap().name().as_str(), "Legs");
        assert!(f.barbell.contains_exercise("Squat", "Monday"));
        assert!(f.legs.contains_exercise("Squat", "Monday"));
        assert!(f.quads.contains_exercise("Squat", "Monday"));
    }

    #[test]
    fn test_set_schedule_for_day_exclusivity() {
        let f = fixture();
        let mut schedule = WeeklySchedule::new();
        let a = Workout::new("A", vec![f.squat.clone()]).unwrap();
        let b = Workout::new("B", vec![f.run.clone()]).unwrap();

        schedule.set_schedule_for_day(2, a).unwrap();
        let previous = schedule.set_schedule_for_day(2, b.clone()).unwrap();

        assert_eq!(previous.name().as_str(), "A");
        assert_eq!(f.barbell.num_associated_exercises(), 0);
        assert!(!f.legs.contains_exercise("Squat", "Wednesday"));
        assert!(!f.quads.contains_exercise("Squat", "Wednesday"));
        assert!(f.treadmill.contains_exercise("Run", "Wednesday"));
        assert_eq!(
            f.legs.aggregated_exercise_metrics_for_context("Wednesday"),
            b.summary()
        );
        assert_eq!(f.quads.aggregated_exercise_metrics(), b.summary());
    }

    #[test]
    fn test_same_workout_on_multiple_days() {
        let f = fixture();
        let mut schedule = WeeklySchedule::new();
        let workout = Workout::new("Legs", vec![f.squat.clone()]).unwrap();

        schedule.set_plan(Day::Monday, workout.clone());
        schedule.set_plan(Day::Thursday, workout.clone());

        assert_eq!(f.barbell.num_associated_exercises(), 2);
        assert_approx_eq!(
            f.barbell.aggregated_exercise_metrics().get(Metric::TotalSets),
            10.0
        );

        schedule.clear_day(Day::Monday);

        assert!(!f.barbell.contains_exercise("Squat", "Monday"));
        assert!(f.barbell.contains_exercise("Squat", "Thursday"));
        assert_eq!(f.barbell.aggregated_exercise_metrics(), workout.summary());
    }

    #[test]
    fn test_clear_schedule_for_day() {
        let f = fixture();
        let mut schedule = WeeklySchedule::new();
        schedule
            .set_schedule_for_day(6, Workout::new("Cardio", vec![f.run.clone()]).unwrap())
            .unwrap();

        let previous = schedule.clear_schedule_for_day(6).unwrap();

        assert_eq!(previous.name().as_str(), "Cardio");
        assert!(schedule.schedule_for_day(6).unwrap().is_rest_day());
        assert_eq!(f.treadmill.num_associated_exercises(), 0);
        assert_eq!(f.legs.num_associated_exercises(), 0);
        assert_eq!(f.quads.num_associated_exercises(), 0);
    }

    #[test]
    fn test_clear() {
        let f = fixture();
        let mut schedule = WeeklySchedule::new();
        let workout = Workout::new("Full", vec![f.squat.clone(), f.run.clone()]).unwrap();
        for day in Day::iter() {
            schedule.set_plan(day, workout.clone());
        }
        assert_eq!(f.legs.num_associated_exercises(), 14);

        schedule.clear();

        assert_eq!(f.legs.num_associated_exercises(), 0);
        assert!(schedule.iter().all(|(_, plan)| plan.is_rest_day()));
    }

    #[test]
    fn test_reactivate() {
        let f = fixture();
        let mut schedule = WeeklySchedule::new();
        schedule.set_plan(
            Day::Friday,
            Workout::new("Legs", vec![f.squat.clone()]).unwrap(),
        );
        let before = f.quads.aggregated_exercise_metrics();
        for associator in [&*f.barbell as &dyn Associator, &*f.legs, &*f.quads] {
            associator.clear_exercises();
        }

        schedule.reactivate();

        assert_eq!(f.quads.aggregated_exercise_metrics(), before);
        assert!(f.barbell.contains_exercise("Squat", "Friday"));
    }

    #[test]
    fn test_week_metrics() {
        let f = fixture();
        let mut schedule = WeeklySchedule::new();
        schedule.set_plan(Day::Monday, Workout::new("A", vec![f.squat.clone()]).unwrap());
        schedule.set_plan(Day::Tuesday, Workout::new("B", vec![f.run.clone()]).unwrap());
        let metrics = schedule.week_metrics();
        assert_approx_eq!(
            metrics.get(Metric::TotalDuration),
            f.squat.duration() + f.run.duration()
        );
        assert_eq!(metrics, f.legs.group_metrics());
    }

    #[test]
    fn test_week_summary() {
        let f = fixture();
        let mut schedule = WeeklySchedule::new();
        schedule.set_plan(Day::Tuesday, Workout::new("Legs", vec![f.squat.clone()]).unwrap());
        schedule.set_plan(Day::Saturday, RestDay::new("Recovery").unwrap());
        assert_eq!(
            schedule.week_summary(),
            "Monday: Rest Day\n\
             Tuesday: Legs\n\
             Wednesday: Rest Day\n\
             Thursday: Rest Day\n\
             Friday: Rest Day\n\
             Saturday: Recovery\n\
             Sunday: Rest Day\n"
        );
    }
}
