use std::{cell::RefCell, fmt, slice::Iter};

use crate::{Associations, Associator, Property};

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum EquipmentKind {
    Barbell,
    Dumbbell,
    Cable,
    Machine,
    Treadmill,
    Bodyweight,
}

impl Property for EquipmentKind {
    fn iter() -> Iter<'static, EquipmentKind> {
        static EQUIPMENT: [EquipmentKind; 6] = [
            EquipmentKind::Barbell,
            EquipmentKind::Dumbbell,
            EquipmentKind::Cable,
            EquipmentKind::Machine,
            EquipmentKind::Treadmill,
            EquipmentKind::Bodyweight,
        ];
        EQUIPMENT.iter()
    }

    fn name(self) -> &'static str {
        match self {
            EquipmentKind::Barbell => "Barbell",
            EquipmentKind::Dumbbell => "Dumbbell",
            EquipmentKind::Cable => "Cable",
            EquipmentKind::Machine => "Machine",
            EquipmentKind::Treadmill => "Treadmill",
            EquipmentKind::Bodyweight => "Bodyweight",
        }
    }
}

impl TryFrom<&str> for EquipmentKind {
    type Error = EquipmentKindError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(value.trim()))
            .copied()
            .ok_or_else(|| EquipmentKindError::Unknown(value.to_string()))
    }
}

impl fmt::Display for EquipmentKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum EquipmentKindError {
    #[error("Unknown equipment {0:?}")]
    Unknown(String),
}

/// Shared handle of one equipment kind.
///
/// Equality is identity: two instances of the same kind are different equipment.
#[derive(Debug)]
pub struct Equipment {
    kind: EquipmentKind,
    associations: RefCell<Associations>,
}

impl Equipment {
    #[must_use]
    pub fn new(kind: EquipmentKind) -> Self {
        Self {
            kind,
            associations: RefCell::new(Associations::new()),
        }
    }

    #[must_use]
    pub fn kind(&self) -> EquipmentKind {
        self.kind
    }
}

impl PartialEq for Equipment {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
    }
}

impl Eq for Equipment {}

impl Associator for Equipment {
    fn associations(&self) -> &RefCell<Associations> {
        &self.associations
    }

    fn label(&self) -> &str {
        self.kind.name()
    }
}
