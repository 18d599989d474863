#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

use std::slice::Iter;

mod associator;
mod equipment;
mod error;
mod exercise;
mod metrics;
mod muscle;
mod name;
mod planner;
mod registry;
mod schedule;
mod workout;

pub use associator::*;
pub use equipment::*;
pub use error::*;
pub use exercise::*;
pub use metrics::*;
pub use muscle::*;
pub use name::*;
pub use planner::*;
pub use registry::*;
pub use schedule::*;
pub use workout::*;

/// Closed set of values with a static display name.
pub trait Property: Clone + Copy + Sized {
    fn iter() -> Iter<'static, Self>;
    fn name(self) -> &'static str;
}
