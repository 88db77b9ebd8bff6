//! NightGuard Core - Night Survival Simulation Engine
//!
//! Simulates one security guard's nights in the office: three hidden actors
//! creep toward the office on a stochastic timer while the player spends a
//! finite battery on lights, doors and the camera monitor.
//!
//! # Architecture
//!
//! The actors and doors live in a `hecs` ECS world:
//! - **Entities**: the three actors and the two office doors
//! - **Components**: `Actor` + `Station`, `Door` + `DoorAnimation`
//! - **Systems**: the AI roll and the door animation step
//!
//! [`GameStateMachine`](engine::GameStateMachine) owns the world together
//! with the player-facing [`GameState`](state::GameState), the night clock
//! and the RNG, and runs every system once per frame in a fixed order.
//! The pure rules (drain rate, difficulty curve, clock math) come from
//! `nightguard-logic`.
//!
//! # Example
//!
//! ```rust,no_run
//! use nightguard_core::prelude::*;
//!
//! let mut sim = GameStateMachine::new(SimConfig::default());
//! let mut now_ms = 0;
//!
//! loop {
//!     for event in sim.tick(now_ms) {
//!         println!("{:?}", event);
//!     }
//!     let frame = sim.snapshot();
//!     if frame.game_over {
//!         break;
//!     }
//!     now_ms += 16; // ~60 FPS
//! }
//! ```

pub mod components;
pub mod config;
pub mod engine;
pub mod events;
pub mod snapshot;
pub mod state;
pub mod systems;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::config::{AiCadence, ConfigError, SimConfig};
    pub use crate::engine::GameStateMachine;
    pub use crate::events::{GameEvent, JumpscareCause, JumpscareEvent};
    pub use crate::snapshot::RenderSnapshot;
    pub use crate::state::{GameState, ViewMode};
    pub use nightguard_logic::actors::ActorKind;
    pub use nightguard_logic::doors::DoorSide;
}
