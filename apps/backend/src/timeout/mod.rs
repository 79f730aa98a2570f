//! Turn timeout watchdog.
//!
//! A [`TurnTimeoutController`] watches the caller's latest view of a game
//! and, once per turn episode, invokes an async timeout-submission callback
//! when the local player's time budget runs out.

mod controller;

pub use controller::{
    timeout_callback, TimeoutCallback, TimeoutPhase, TurnInputs, TurnTimeoutController, TurnToken,
};
