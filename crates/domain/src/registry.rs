use std::{collections::BTreeMap, rc::Rc};

use strum::IntoEnumIterator;

use crate::{
    Associator, Equipment, EquipmentKind, Muscle, MuscleGroup, MuscleID, Name, Property,
};

const DEFAULT_MUSCLE_GROUPS: [(&str, &[MuscleID]); 6] = [
    ("Chest", &[MuscleID::Pecs]),
    (
        "Back",
        &[MuscleID::Traps, MuscleID::Lats, MuscleID::ErectorSpinae],
    ),
    (
        "Shoulders",
        &[MuscleID::FrontDelts, MuscleID::SideDelts, MuscleID::RearDelts],
    ),
    (
        "Arms",
        &[MuscleID::Biceps, MuscleID::Triceps, MuscleID::Forearms],
    ),
    ("Core", &[MuscleID::Abs, MuscleID::ErectorSpinae]),
    (
        "Legs",
        &[
            MuscleID::Glutes,
            MuscleID::Abductors,
            MuscleID::Quads,
            MuscleID::Hamstrings,
            MuscleID::Adductors,
            MuscleID::Calves,
        ],
    ),
];

const FULL_BODY: &str = "Full Body";

/// Long-lived handles of all equipment, muscles and muscle groups.
///
/// Every exercise using a given equipment kind or muscle refers to the same handle, so all of
/// them share one set of registrations.
#[derive(Debug)]
pub struct Registry {
    equipment: BTreeMap<EquipmentKind, Rc<Equipment>>,
    muscles: BTreeMap<MuscleID, Rc<Muscle>>,
    muscle_groups: BTreeMap<Name, Rc<MuscleGroup>>,
    custom_muscle_groups: Vec<Name>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        let equipment = EquipmentKind::iter()
            .map(|kind| (*kind, Rc::new(Equipment::new(*kind))))
            .collect();
        let muscles: BTreeMap<MuscleID, Rc<Muscle>> = MuscleID::iter()
            .map(|id| (id, Rc::new(Muscle::new(id))))
            .collect();
        let mut muscle_groups = BTreeMap::new();
        for (name, ids) in DEFAULT_MUSCLE_GROUPS {
            let name = Name(name.to_string());
            let group = MuscleGroup::new(
                name.clone(),
                ids.iter().filter_map(|id| muscles.get(id).cloned()),
            );
            muscle_groups.insert(name, Rc::new(group));
        }
        let full_body = Name(FULL_BODY.to_string());
        muscle_groups.insert(
            full_body.clone(),
            Rc::new(MuscleGroup::new(full_body, muscles.values().cloned())),
        );
        Self {
            equipment,
            muscles,
            muscle_groups,
            custom_muscle_groups: Vec::new(),
        }
    }

    #[must_use]
    pub fn equipment(&self, kind: EquipmentKind) -> Rc<Equipment> {
        Rc::clone(&self.equipment[&kind])
    }

    #[must_use]
    pub fn muscle(&self, id: MuscleID) -> Rc<Muscle> {
        Rc::clone(&self.muscles[&id])
    }

    #[must_use]
    pub fn muscle_group(&self, name: &str) -> Option<Rc<MuscleGroup>> {
        self.muscle_groups.get(name.trim()).cloned()
    }

    pub fn all_equipment(&self) -> impl Iterator<Item = &Rc<Equipment>> {
        self.equipment.values()
    }

    pub fn muscles(&self) -> impl Iterator<Item = &Rc<Muscle>> {
        self.muscles.values()
    }

    pub fn muscle_groups(&self) -> impl Iterator<Item = &Rc<MuscleGroup>> {
        self.muscle_groups.values()
    }

    /// Muscle groups added by the user, in the order they were added.
    pub fn custom_muscle_groups(&self) -> impl Iterator<Item = &Rc<MuscleGroup>> {
        self.custom_muscle_groups
            .iter()
            .filter_map(|name| self.muscle_groups.get(name))
    }

    pub fn add_muscle_group(
        &mut self,
        name: &str,
        muscles: &[MuscleID],
    ) -> Result<Rc<MuscleGroup>, RegistryError> {
        let name = Name::new(name)?;
        if self.muscle_groups.contains_key(&name) {
            return Err(RegistryError::Conflict(name.to_string()));
        }
        if muscles.is_empty() {
            return Err(RegistryError::EmptyMuscleGroup(name.to_string()));
        }
        let group = Rc::new(MuscleGroup::new(
            name.clone(),
            muscles.iter().map(|id| self.muscle(*id)),
        ));
        self.muscle_groups.insert(name.clone(), group.clone());
        self.custom_muscle_groups.push(name);
        Ok(group)
    }

    /// All entities carrying registrations.
    pub fn associators(&self) -> impl Iterator<Item = &dyn Associator> {
        self.equipment
            .values()
            .map(|e| &**e as &dyn Associator)
            .chain(self.muscles.values().map(|m| &**m as &dyn Associator))
            .chain(self.muscle_groups.values().map(|g| &**g as &dyn Associator))
    }

    pub fn clear_metrics(&self) {
        for associator in self.associators() {
            associator.clear_exercises();
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Muscle group {0:?} already exists")]
    Conflict(String),
    #[error("Muscle group {0:?} must contain at least one muscle")]
    EmptyMuscleGroup(String),
    #[error(transparent)]
    InvalidName(#[from] crate::NameError),
}
