//! Absorbing tools and the transfer engine that resolves their swings.

pub mod engine;
pub mod systems;
pub mod types;


pub use engine::{mop, CooldownGate, Feedback, MopHooks, MopTarget, TileReactions};
pub use systems::AbsorbentPlugin;
pub use types::{AbsorbentDisplay, AbsorbentTool, MopAction, MopLog, MopOutcome, Refusal};
