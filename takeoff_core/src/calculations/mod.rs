//! # Quantity Calculations
//!
//! Turns room geometry into material quantities. The pieces:
//!
//! - [`config`] - Calculator settings and the kitchen/bath policy defaults
//! - [`takeoff`] - Per-room and per-project quantity takeoff
//! - [`aggregate`] - Project-wide totals per material
//!
//! All results are JSON-serializable. Rooms without usable geometry never
//! fail a project; they are reported in [`ProjectTakeoff::skipped_rooms`].

pub mod aggregate;
pub mod config;
pub mod takeoff;

// Re-export commonly used types
pub use aggregate::totals;
pub use config::CalculatorConfig;
pub use takeoff::{MaterialCalculator, ProjectTakeoff, RoomTakeoff};
