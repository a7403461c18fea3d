//! Separation analysis of turn-based resolutions for a pair of conflicting aircraft.
//!
//! Data flows from [`kinematics`] through [`separation`] and [`sampler`] into [`classify`],
//! with [`scenario`] driving the maneuver archetypes and [`rank`] ordering their outcomes.

pub mod classify;
pub mod config;
mod error;
pub use error::Error;
pub mod kinematics;
pub mod rank;
pub mod sampler;
pub mod scenario;
pub mod separation;
