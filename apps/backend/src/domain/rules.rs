//! Rule plumbing shared by every variant.

use crate::domain::state::Seat;
use crate::errors::domain::{DomainError, ValidationKind};

/// Result of applying one accepted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Seat that becomes `current_player_index`.
    pub next_seat: Seat,
    /// Terminal condition met; the machine flips to `Finished`.
    pub finished: bool,
    /// A phase boundary was crossed; a new turn episode opens even when
    /// `next_seat` is unchanged.
    pub new_phase: bool,
}

impl Transition {
    pub const fn continue_with(next_seat: Seat) -> Self {
        Self {
            next_seat,
            finished: false,
            new_phase: false,
        }
    }

    /// Continue at `next_seat` in a freshly opened phase.
    pub const fn open_phase(next_seat: Seat) -> Self {
        Self {
            next_seat,
            finished: false,
            new_phase: true,
        }
    }

    pub const fn finish(at_seat: Seat) -> Self {
        Self {
            next_seat: at_seat,
            finished: true,
            new_phase: false,
        }
    }
}

/// Fail with `kind` unless `cond` holds.
#[inline]
pub fn ensure(
    cond: bool,
    kind: ValidationKind,
    detail: impl FnOnce() -> String,
) -> Result<(), DomainError> {
    if cond {
        Ok(())
    } else {
        Err(DomainError::validation(kind, detail()))
    }
}

/// Rejection for a tag the variant does not understand.
pub fn unknown_move(variant: &str, tag: &str) -> DomainError {
    DomainError::validation(
        ValidationKind::UnknownMoveType,
        format!("{variant} does not accept '{tag}' moves"),
    )
}
