//! The three synchronized indexes and the planner that picks between them.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`permutation`] | SPO/POS/OSP rotations and their comparators |
//! | [`tri_index`] | Three sorted maps kept in lockstep |
//! | [`planner`] | Pattern shape to index and key range |

pub mod permutation;
pub mod planner;
pub mod tri_index;

pub use permutation::IndexOrder;
pub use planner::{RangePlan, select_index};
pub use tri_index::{Matches, TriIndex};
