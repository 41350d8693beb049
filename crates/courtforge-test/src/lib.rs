//! Shared test fixtures for CourtForge crates.
//!
//! This crate only builds domain data and configurations; it does NOT
//! depend on `courtforge-solver` so the solver can use it as a
//! dev-dependency.
//!
//! - [`event`] - Ready-made events (singles, round robin, doubles)
//! - [`tournament`] - Event sets sharing players and localizations
//! - [`config`] - Deterministic solver configurations
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! courtforge-test = { workspace = true }
//! ```
//!
//! ```ignore
//! use courtforge_test::event::{eight_player_singles, round_robin};
//! use courtforge_test::config::lower_bound_config;
//! ```

pub mod config;
pub mod event;
pub mod tournament;

pub use config::{lower_bound_config, seeded_config};
pub use event::{doubles_with_teams, eight_player_singles, round_robin, singles};
pub use tournament::{shared_courts, shared_player};
