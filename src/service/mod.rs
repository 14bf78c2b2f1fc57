//! Service layer for the team balancing engine
//!
//! This module contains the facade that coordinates statistics, rating and
//! balancing for callers such as the command line front end.

pub mod app;

pub use app::TeamService;
