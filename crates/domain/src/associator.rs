use std::{cell::RefCell, collections::BTreeMap};

use log::debug;

use crate::Metrics;

/// Composite identity of a registration.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExerciseKey {
    pub exercise: String,
    pub context: String,
}

impl ExerciseKey {
    fn new(exercise: &str, context: &str) -> Option<Self> {
        if is_absent(exercise) || is_absent(context) {
            return None;
        }
        Some(Self {
            exercise: exercise.to_string(),
            context: context.to_string(),
        })
    }
}

/// Registry of exercise metrics keyed by exercise name and context.
///
/// Registration is not an upsert: a key that is already present is rejected. Aggregates are
/// always recomputed from the stored records.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Associations {
    records: BTreeMap<ExerciseKey, Metrics>,
}

impl Associations {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, exercise: &str, context: &str, metrics: &Metrics) -> bool {
        let Some(key) = ExerciseKey::new(exercise, context) else {
            return false;
        };
        if self.records.contains_key(&key) {
            return false;
        }
        self.records.insert(key, metrics.clone());
        true
    }

    pub fn unregister(&mut self, exercise: &str, context: &str) -> bool {
        ExerciseKey::new(exercise, context)
            .and_then(|key| self.records.remove(&key))
            .is_some()
    }

    #[must_use]
    pub fn contains(&self, exercise: &str, context: &str) -> bool {
        ExerciseKey::new(exercise, context).is_some_and(|key| self.records.contains_key(&key))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn aggregate(&self) -> Metrics {
        Metrics::sum(self.records.values())
    }

    #[must_use]
    pub fn aggregate_context(&self, context: &str) -> Metrics {
        Metrics::sum(
            self.records
                .iter()
                .filter(|(key, _)| key.context == context)
                .map(|(_, metrics)| metrics),
        )
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ExerciseKey, &Metrics)> {
        self.records.iter()
    }
}

fn is_absent(value: &str) -> bool {
    value.trim().is_empty()
}

/// Capability of entities that track which exercises touch them.
///
/// Implementors only provide access to their own [`Associations`]; every operation works on that
/// private store. Invalid or duplicate requests are rejected by returning `false`.
pub trait Associator {
    fn associations(&self) -> &RefCell<Associations>;

    fn label(&self) -> &str;

    fn register_exercise(&self, exercise: &str, context: &str, metrics: &Metrics) -> bool {
        let registered = self
            .associations()
            .borrow_mut()
            .register(exercise, context, metrics);
        if !registered {
            debug!(
                "{}: rejected registration of {exercise:?} for {context:?}",
                self.label()
            );
        }
        registered
    }

    fn unregister_exercise(&self, exercise: &str, context: &str) -> bool {
        let unregistered = self
            .associations()
            .borrow_mut()
            .unregister(exercise, context);
        if !unregistered {
            debug!(
                "{}: nothing to unregister for {exercise:?} in {context:?}",
                self.label()
            );
        }
        unregistered
    }

    fn contains_exercise(&self, exercise: &str, context: &str) -> bool {
        self.associations().borrow().contains(exercise, context)
    }

    fn num_associated_exercises(&self) -> usize {
        self.associations().borrow().len()
    }

    fn aggregated_exercise_metrics(&self) -> Metrics {
        self.associations().borrow().aggregate()
    }

    fn aggregated_exercise_metrics_for_context(&self, context: &str) -> Metrics {
        self.associations().borrow().aggregate_context(context)
    }

    fn clear_exercises(&self) {
        self.associations().borrow_mut().clear();
    }
}
