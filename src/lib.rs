//! Prereq Engine - prerequisite trees for character features
//!
//! A prerequisite tree decides whether a character may take an advantage,
//! skill, spell or piece of equipment, and explains the failure when not.

pub mod character;
pub mod core;
pub mod criteria;
pub mod loader;
pub mod nameable;
pub mod prereq;
