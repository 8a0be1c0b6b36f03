//! Hangar Havoc Game Engine
//!
//! Platform-agnostic core game logic for the Hangar Havoc maintenance
//! mini-game. This crate provides all game rules without UI or
//! platform-specific dependencies: a presentation layer forwards discrete
//! player intents and drives the tick clock, then reads a snapshot back
//! for display.

pub mod bolt;
pub mod config;
pub mod constants;
pub mod disruption;
pub mod ending;
pub mod hazard;
pub mod numbers;
pub mod rng;
pub mod seed;
pub mod session;
pub mod snapshot;

// Re-export commonly used types
pub use bolt::Bolt;
pub use config::{ConfigError, ShiftConfig};
pub use disruption::Disruptions;
pub use ending::{Ending, ShiftSummary, select_ending};
pub use hazard::{HazardCatalog, HazardContext, HazardDef, HazardKind, catalog, roll_hazard};
pub use rng::{CountingRng, RngBundle};
pub use seed::{decode_to_seed, encode_friendly, generate_code_from_entropy};
pub use session::{BoltSet, Intent, Session, ShiftPhase, TickInput};
pub use snapshot::{BoltView, ShiftSnapshot};
