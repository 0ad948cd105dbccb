//! CLI infrastructure for the roshambo engine
//!
//! This module provides the command-line interface for playing against the
//! engine, simulating matches against scripted players, and inspecting saved
//! engines.

pub mod commands;
pub mod output;
