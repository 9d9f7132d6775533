//! Resolution of named moves into concrete transformations.
//!
//! Base moves come straight out of the definition. Derived moves are
//! evaluated recursively from their expressions, with a "currently
//! resolving" marker to catch definition cycles, and the result is cached
//! inside the definition so every later resolution shares it.

use std::sync::Arc;

use internment::ArcIntern;
use log::debug;
use thiserror::Error;

use crate::{
    alg::{Alg, AlgNode},
    def::{DerivedMove, MoveKind, PuzzleDef},
    transformation::{ShapeMismatch, Transformation},
};

/// Errors from resolving or applying a named move.
#[derive(Error, Debug)]
pub enum MoveError {
    #[error("No move named {0}")]
    UnknownMove(ArcIntern<str>),
    #[error("Derived move {0} is defined in terms of itself")]
    CyclicDefinition(ArcIntern<str>),
    #[error(transparent)]
    ShapeMismatch(#[from] ShapeMismatch),
}

impl PuzzleDef {
    /// Resolve a named move to its transformation.
    ///
    /// A derived move is evaluated from its expression the first time and
    /// cached for the lifetime of the definition, so repeated calls hand
    /// back the same shared value.
    ///
    /// # Errors
    ///
    /// [`MoveError::UnknownMove`] if no move has this name, and
    /// [`MoveError::CyclicDefinition`] if expanding a derived move reaches
    /// that move again.
    pub fn resolve_move(&self, name: &str) -> Result<Arc<Transformation>, MoveError> {
        self.resolve_move_inner(ArcIntern::from(name), &mut Vec::new())
    }

    fn resolve_move_inner(
        &self,
        name: ArcIntern<str>,
        resolving: &mut Vec<ArcIntern<str>>,
    ) -> Result<Arc<Transformation>, MoveError> {
        let Some(kind) = self.move_kind(&name) else {
            return Err(MoveError::UnknownMove(name));
        };
        match kind {
            MoveKind::Base(transformation) => Ok(Arc::clone(transformation)),
            MoveKind::Derived(derived) => self.resolve_derived(name, derived, resolving),
        }
    }

    fn resolve_derived(
        &self,
        name: ArcIntern<str>,
        derived: &DerivedMove,
        resolving: &mut Vec<ArcIntern<str>>,
    ) -> Result<Arc<Transformation>, MoveError> {
        if let Some(resolved) = derived.resolved.get() {
            return Ok(Arc::clone(resolved));
        }
        if resolving.contains(&name) {
            return Err(MoveError::CyclicDefinition(name));
        }

        debug!("expanding derived move {name}");
        resolving.push(ArcIntern::clone(&name));
        let transformation = self.eval_alg(derived.alg(), resolving)?;
        resolving.pop();

        // A racing resolver may have stored an equal value first; either
        // way every caller gets the stored one.
        let resolved = derived.resolved.get_or_init(|| Arc::new(transformation));
        Ok(Arc::clone(resolved))
    }

    fn eval_alg(
        &self,
        alg: &Alg,
        resolving: &mut Vec<ArcIntern<str>>,
    ) -> Result<Transformation, MoveError> {
        let mut result = self.identity_transformation();
        for node in alg.nodes() {
            let node_transformation = self.eval_node(node, resolving)?;
            result = self.combine(&result, &node_transformation)?;
        }
        Ok(result)
    }

    fn eval_node(
        &self,
        node: &AlgNode,
        resolving: &mut Vec<ArcIntern<str>>,
    ) -> Result<Transformation, MoveError> {
        match node {
            AlgNode::Move { name, amount } => {
                let resolved = self.resolve_move_inner(ArcIntern::clone(name), resolving)?;
                Ok(self.multiply(&resolved, i64::from(*amount))?)
            }
            AlgNode::Conjugate {
                setup,
                inner,
                amount,
            } => {
                let setup = self.eval_alg(setup, resolving)?;
                let inner = self.eval_alg(inner, resolving)?;
                let conjugated =
                    self.combine(&self.invert(&setup)?, &self.combine(&inner, &setup)?)?;
                Ok(self.multiply(&conjugated, i64::from(*amount))?)
            }
            AlgNode::Commutator {
                first,
                second,
                amount,
            } => {
                let first = self.eval_alg(first, resolving)?;
                let second = self.eval_alg(second, resolving)?;
                let inverses = self.combine(&self.invert(&first)?, &self.invert(&second)?)?;
                let forwards = self.combine(&first, &second)?;
                Ok(self.multiply(&self.combine(&inverses, &forwards)?, i64::from(*amount))?)
            }
        }
    }
}
