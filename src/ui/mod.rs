//! UI components for the CI/CD training dashboard.
//!
//! This module contains the widgets the dashboard window is built from.

pub mod cards;
pub mod easter_egg;
