//! Arena Duel - real-time 2-fighter duel simulation engine
//!
//! The crate owns the fighter simulation: per-tick physics and movement,
//! combat resolution with combo/energy bookkeeping, the opponent AI, and
//! the match state machine with its frame loop. Rendering, menus and raw
//! input capture are external collaborators:
//!
//! - input capture writes held keys into [`input::KeyboardState`],
//! - the match loop publishes a [`game::MatchSnapshot`] every frame,
//! - the UI drives the match through [`game::MatchHandle`] intents.

pub mod config;
pub mod game;
pub mod input;
pub mod util;
