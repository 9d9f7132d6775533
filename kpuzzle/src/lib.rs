#![warn(clippy::pedantic)]
#![allow(clippy::similar_names, clippy::too_many_lines)]

//! A state engine for combinatorial twisting puzzles: orbit-structured
//! definitions with base and derived moves, a transformation algebra over
//! them, and a mutable session type for applying moves to a state.

pub mod alg;
pub mod def;
pub mod puzzle;
pub mod resolve;
pub mod transformation;

pub use alg::{Alg, AlgNode, AlgParseError};
pub use def::{
    CUBE_2X2X2, CUBE_3X3X3, DefinitionError, DerivedMove, DerivedMoveData, MoveData, MoveKind,
    OrbitDef, OrbitTransformationData, PuzzleDef, PuzzleDefFields,
};
pub use puzzle::KPuzzle;
pub use resolve::MoveError;
pub use transformation::{OrbitTransformation, ShapeMismatch, Transformation};
