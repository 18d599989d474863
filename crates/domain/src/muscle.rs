use std::{cell::RefCell, rc::Rc};

use log::debug;
use strum::IntoEnumIterator;

use crate::{Associations, Associator, Metrics, Name};

/// Anatomical muscles, ordered from head to feet.
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
    strum::IntoStaticStr,
)]
pub enum MuscleID {
    Neck,
    Pecs,
    Traps,
    Lats,
    #[strum(serialize = "Front Delts")]
    FrontDelts,
    #[strum(serialize = "Side Delts")]
    SideDelts,
    #[strum(serialize = "Rear Delts")]
    RearDelts,
    Biceps,
    Triceps,
    Forearms,
    Abs,
    #[strum(serialize = "Erector Spinae")]
    ErectorSpinae,
    Glutes,
    Abductors,
    Quads,
    Hamstrings,
    Adductors,
    Calves,
}

impl MuscleID {
    #[must_use]
    pub fn name(self) -> &'static str {
        self.into()
    }
}

impl TryFrom<&str> for MuscleID {
    type Error = MuscleIDError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::iter()
            .find(|m| m.name().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| MuscleIDError::Unknown(value.to_string()))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum MuscleIDError {
    #[error("Unknown muscle {0:?}")]
    Unknown(String),
}

/// Shared handle of one anatomical muscle.
#[derive(Debug)]
pub struct Muscle {
    id: MuscleID,
    associations: RefCell<Associations>,
}

impl Muscle {
    #[must_use]
    pub fn new(id: MuscleID) -> Self {
        Self {
            id,
            associations: RefCell::new(Associations::new()),
        }
    }

    #[must_use]
    pub fn id(&self) -> MuscleID {
        self.id
    }
}

impl Associator for Muscle {
    fn associations(&self) -> &RefCell<Associations> {
        &self.associations
    }

    fn label(&self) -> &str {
        self.id.name()
    }
}

/// Named set of muscles.
///
/// The group keeps its own registrations next to the ones of its members. Group metrics are
/// never derived from member metrics.
#[derive(Debug)]
pub struct MuscleGroup {
    name: Name,
    muscles: Vec<Rc<Muscle>>,
    associations: RefCell<Associations>,
}

impl MuscleGroup {
    pub fn new(name: Name, muscles: impl IntoIterator<Item = Rc<Muscle>>) -> Self {
        let mut members: Vec<Rc<Muscle>> = Vec::new();
        for muscle in muscles {
            if !members.iter().any(|m| Rc::ptr_eq(m, &muscle)) {
                members.push(muscle);
            }
        }
        Self {
            name,
            muscles: members,
            associations: RefCell::new(Associations::new()),
        }
    }

    #[must_use]
    pub fn name(&self) -> &Name {
        &self.name
    }

    #[must_use]
    pub fn muscles(&self) -> &[Rc<Muscle>] {
        &self.muscles
    }

    #[must_use]
    pub fn contains_muscle(&self, id: MuscleID) -> bool {
        self.muscles.iter().any(|m| m.id() == id)
    }

    /// Register the record on the group and on every member muscle.
    ///
    /// Only the group-level result is returned. Member registrations are attempted even if the
    /// group already holds the record.
    pub fn register_muscles_for_metrics(
        &self,
        exercise: &str,
        context: &str,
        metrics: &Metrics,
    ) -> bool {
        if self.muscles.is_empty() {
            debug!("{}: no muscles to register {exercise:?} for", self.name);
            return false;
        }
        let registered = self.register_exercise(exercise, context, metrics);
        for muscle in &self.muscles {
            muscle.register_exercise(exercise, context, metrics);
        }
        registered
    }

    pub fn unregister_muscles_from_metrics(&self, exercise: &str, context: &str) -> bool {
        if self.muscles.is_empty() {
            return false;
        }
        let unregistered = self.unregister_exercise(exercise, context);
        for muscle in &self.muscles {
            muscle.unregister_exercise(exercise, context);
        }
        unregistered
    }

    #[must_use]
    pub fn group_metrics(&self) -> Metrics {
        self.aggregated_exercise_metrics()
    }
}

impl PartialEq for MuscleGroup {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
    }
}

impl Associator for MuscleGroup {
    fn associations(&self) -> &RefCell<Associations> {
        &self.associations
    }

    fn label(&self) -> &str {
        self.name.as_str()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use assert_approx_eq::assert_approx_eq;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::Metric;

    use super::*;

    fn arms() -> (MuscleGroup, Rc<Muscle>, Rc<Muscle>) {
        let biceps = Rc::new(Muscle::new(MuscleID::Biceps));
        let triceps = Rc::new(Muscle::new(MuscleID::Triceps));
        let group = MuscleGroup::new(
            Name::new("Arms").unwrap(),
            [biceps.clone(), triceps.clone()],
        );
        (group, biceps, triceps)
    }

    fn metrics() -> Metrics {
        Metrics::new()
            .with(Metric::TotalSets, 3.0)
            .with(Metric::TotalReps, 30.0)
    }

    #[test]
    fn test_muscle_id_name() {
        let names = MuscleID::iter().map(|m| m.name()).collect::<HashSet<_>>();
        assert_eq!(names.len(), MuscleID::iter().len());
        assert_eq!(MuscleID::iter().len(), 18);
        assert_eq!(MuscleID::FrontDelts.name(), "Front Delts");
        assert_eq!(MuscleID::ErectorSpinae.to_string(), "Erector Spinae");
    }

    #[rstest]
    #[case("Biceps", Ok(MuscleID::Biceps))]
    #[case("erector spinae", Ok(MuscleID::ErectorSpinae))]
    #[case("Wings", Err(MuscleIDError::Unknown("Wings".to_string())))]
    fn test_muscle_id_try_from(
        #[case] value: &str,
        #[case] expected: Result<MuscleID, MuscleIDError>,
    ) {
        assert_eq!(MuscleID::try_from(value), expected);
    }

    #[test]
    fn test_muscle_group_deduplicates_members() {
        let biceps = Rc::new(Muscle::new(MuscleID::Biceps));
        let group = MuscleGroup::new(Name::new("Arms").unwrap(), [biceps.clone(), biceps]);
        assert_eq!(group.muscles().len(), 1);
        assert!(group.contains_muscle(MuscleID::Biceps));
        assert!(!group.contains_muscle(MuscleID::Triceps));
    }

    #[test]
    fn test_register_muscles_for_metrics() {
        let (group, biceps, triceps) = arms();
        assert!(group.register_muscles_for_metrics("Curl", "Monday", &metrics()));
        assert!(group.contains_exercise("Curl", "Monday"));
        assert!(biceps.contains_exercise("Curl", "Monday"));
        assert!(triceps.contains_exercise("Curl", "Monday"));
        assert_approx_eq!(group.group_metrics().get(Metric::TotalReps), 30.0);
        assert_approx_eq!(
            biceps.aggregated_exercise_metrics().get(Metric::TotalReps),
            30.0
        );
    }

    #[test]
    fn test_register_muscles_for_metrics_duplicate() {
        let (group, biceps, _) = arms();
        assert!(group.register_muscles_for_metrics("Curl", "Monday", &metrics()));
        assert!(!group.register_muscles_for_metrics("Curl", "Monday", &metrics()));
        assert_eq!(group.num_associated_exercises(), 1);
        assert_eq!(biceps.num_associated_exercises(), 1);
    }

    #[test]
    fn test_register_muscles_for_metrics_member_duplicate_ignored() {
        let (group, biceps, triceps) = arms();
        assert!(biceps.register_exercise("Curl", "Monday", &metrics()));
        assert!(group.register_muscles_for_metrics("Curl", "Monday", &metrics()));
        assert_eq!(biceps.num_associated_exercises(), 1);
        assert!(triceps.contains_exercise("Curl", "Monday"));
    }

    #[test]
    fn test_register_muscles_for_metrics_no_muscles() {
        let group = MuscleGroup::new(Name::new("Empty").unwrap(), []);
        assert!(!group.register_muscles_for_metrics("Curl", "Monday", &metrics()));
        assert_eq!(group.num_associated_exercises(), 0);
        assert!(!group.unregister_muscles_from_metrics("Curl", "Monday"));
    }

    #[rstest]
    #[case("", "Monday")]
    #[case("Curl", "")]
    fn test_register_muscles_for_metrics_absent_key(
        #[case] exercise: &str,
        #[case] context: &str,
    ) {
        let (group, biceps, triceps) = arms();
        assert!(!group.register_muscles_for_metrics(exercise, context, &metrics()));
        assert_eq!(group.num_associated_exercises(), 0);
        assert_eq!(biceps.num_associated_exercises(), 0);
        assert_eq!(triceps.num_associated_exercises(), 0);
    }

    #[test]
    fn test_unregister_muscles_from_metrics() {
        let (group, biceps, triceps) = arms();
        assert!(group.register_muscles_for_metrics("Curl", "Monday", &metrics()));
        assert!(group.register_muscles_for_metrics("Curl", "Friday", &metrics()));
        assert!(group.unregister_muscles_from_metrics("Curl", "Monday"));
        for muscle in [&biceps, &triceps] {
            assert!(!muscle.contains_exercise("Curl", "Monday"));
            assert!(muscle.contains_exercise("Curl", "Friday"));
        }
        assert!(!group.unregister_muscles_from_metrics("Curl", "Monday"));
    }

    #[test]
    fn test_shared_muscle_in_two_groups() {
        let biceps = Rc::new(Muscle::new(MuscleID::Biceps));
        let arms = MuscleGroup::new(Name::new("Arms").unwrap(), [biceps.clone()]);
        let pull = MuscleGroup::new(Name::new("Pull").unwrap(), [biceps.clone()]);
        assert!(arms.register_muscles_for_metrics("Curl", "Monday", &metrics()));
        assert!(pull.register_muscles_for_metrics("Row", "Monday", &metrics()));
        assert_eq!(biceps.num_associated_exercises(), 2);
        assert_eq!(arms.num_associated_exercises(), 1);
        assert_eq!(pull.num_associated_exercises(), 1);
    }
}
