//! Routing after each role turn.
//!
//! A message containing the termination marker ends the run; anything else
//! hands the turn to the speaking role's fixed successor.

use crate::domain::models::{Message, RoleName, Route};

/// Exact, case-sensitive phrase that ends a run.
pub const TERMINATION_MARKER: &str = "FINAL ANSWER";

/// Whether `content` carries the termination marker.
///
/// Any occurrence counts, including quoted or negated ones ("no FINAL ANSWER
/// yet" terminates). All termination checks go through here.
pub fn contains_termination_marker(content: &str) -> bool {
    content.contains(TERMINATION_MARKER)
}

/// Decide what follows `role`'s `message`.
pub fn route(role: RoleName, message: &Message) -> Route {
    if contains_termination_marker(message.content()) {
        Route::Terminate
    } else {
        Route::Next(role.successor())
    }
}
