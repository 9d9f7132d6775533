//! The mutable puzzle session.

use std::sync::Arc;

use log::trace;

use crate::{def::PuzzleDef, resolve::MoveError, transformation::Transformation};

/// A live session over a shared puzzle definition: one current state,
/// advanced by applying named moves.
///
/// Mutation goes through [`KPuzzle::apply_move`], which takes `&mut self`,
/// so a session is serialized by construction. Share the definition across
/// threads, not the session.
#[derive(Clone, Debug)]
pub struct KPuzzle {
    def: Arc<PuzzleDef>,
    start: Transformation,
    current: Transformation,
}

impl KPuzzle {
    /// Create a session positioned at the definition's start state.
    #[must_use]
    pub fn new(def: Arc<PuzzleDef>) -> Self {
        let start = def.start_state().clone();
        let current = start.clone();
        KPuzzle {
            def,
            start,
            current,
        }
    }

    /// Get the definition this session runs on
    #[must_use]
    pub fn definition(&self) -> &Arc<PuzzleDef> {
        &self.def
    }

    /// Get the current state
    #[must_use]
    pub fn state(&self) -> &Transformation {
        &self.current
    }

    /// Apply the named move `amount` times, negative amounts for the
    /// inverse.
    ///
    /// An amount of zero still validates the move name and leaves the
    /// state alone. A failed call never changes the state.
    ///
    /// # Errors
    ///
    /// [`MoveError::UnknownMove`] if no move has this name, plus the
    /// errors of [`PuzzleDef::resolve_move`] for derived moves.
    pub fn apply_move(&mut self, name: &str, amount: i64) -> Result<(), MoveError> {
        let resolved = self.def.resolve_move(name)?;
        let repeated = self.def.multiply(&resolved, amount)?;
        self.current = self.def.combine(&self.current, &repeated)?;
        trace!("applied move {name} with amount {amount}");
        Ok(())
    }

    /// Put the session back at the state it was constructed with.
    pub fn reset(&mut self) {
        self.current = self.start.clone();
    }
}
