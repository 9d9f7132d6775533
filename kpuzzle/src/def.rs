//! Puzzle definitions: orbit tables, start states, and move namespaces.
//!
//! Raw data arrives as [`PuzzleDefFields`] and converts into a validated
//! [`PuzzleDef`] via `TryFrom`, which rejects malformed permutations,
//! out-of-range orientations, unknown orbits, duplicate names, and
//! derived-move expressions that do not parse. Bundled cube definitions
//! live at the bottom of the module as `LazyLock` statics.

use std::{
    collections::HashMap,
    num::{NonZeroU8, NonZeroU16},
    sync::{Arc, LazyLock, OnceLock},
};

use internment::ArcIntern;
use thiserror::Error;

use crate::{
    alg::{Alg, AlgParseError},
    transformation::{OrbitTransformation, Transformation, identity_orbit},
};

/// One independent group of pieces, tracked with its own permutation and
/// orientation array.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrbitDef {
    pub name: ArcIntern<str>,
    pub piece_count: NonZeroU16,
    pub orientation_count: NonZeroU8,
}

/// One orbit's rows of a raw move or start state.
///
/// For a start state the permutation lists which piece sits in each slot;
/// for a move it lists the source slot each destination slot pulls from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrbitTransformationData {
    pub orbit: ArcIntern<str>,
    pub permutation: Vec<u16>,
    pub orientation: Vec<u8>,
}

/// A base move, given directly as per-orbit rows. Orbits the move does not
/// touch may be omitted; validation fills them with the identity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveData {
    pub name: ArcIntern<str>,
    pub transformation: Vec<OrbitTransformationData>,
}

/// A move defined by an expression over other moves, such as `[x: y]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DerivedMoveData {
    pub name: ArcIntern<str>,
    pub expression: String,
}

/// Unvalidated puzzle data, shaped the way definition files ship it: base
/// moves and derived moves in separate collections, start state optional.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PuzzleDefFields {
    pub name: String,
    pub orbits: Vec<OrbitDef>,
    pub start_state: Option<Vec<OrbitTransformationData>>,
    pub moves: Vec<MoveData>,
    pub derived_moves: Vec<DerivedMoveData>,
}

/// How a named move is defined.
#[derive(Clone, Debug)]
pub enum MoveKind {
    /// The transformation is spelled out in the definition.
    Base(Arc<Transformation>),
    /// The transformation is computed from an expression over other moves.
    Derived(DerivedMove),
}

/// A derived move: its parsed expression plus the transformation it
/// resolved to, filled in on first resolution.
#[derive(Clone, Debug)]
pub struct DerivedMove {
    pub(crate) alg: Alg,
    pub(crate) resolved: OnceLock<Arc<Transformation>>,
}

impl DerivedMove {
    /// Get the parsed expression
    #[must_use]
    pub fn alg(&self) -> &Alg {
        &self.alg
    }
}

/// A validated puzzle definition.
///
/// Read-only for its whole lifetime; share it behind `Arc` to run sessions
/// and resolve moves from any number of threads.
#[derive(Clone, Debug)]
pub struct PuzzleDef {
    name: String,
    orbits: Box<[OrbitDef]>,
    start_state: Transformation,
    moves: HashMap<ArcIntern<str>, MoveKind>,
    move_names: Box<[ArcIntern<str>]>,
}

#[derive(Error, Debug)]
pub enum DefinitionError {
    #[error("Duplicate orbit name: {0}")]
    DuplicateOrbit(ArcIntern<str>),
    #[error("Duplicate move name: {0}")]
    DuplicateMove(ArcIntern<str>),
    #[error("Unknown orbit: {0}")]
    UnknownOrbit(ArcIntern<str>),
    #[error("Orbit {0} appears more than once in the same transformation")]
    RepeatedOrbit(ArcIntern<str>),
    #[error("The start state must cover orbit {0}")]
    MissingStartStateOrbit(ArcIntern<str>),
    #[error("Invalid piece count, expected {expected} pieces but got {actual}")]
    InvalidPieceCount { expected: u16, actual: usize },
    #[error("Invalid orientation delta, expected a value between 0 and {expected} but got {actual}")]
    InvalidOrientationDelta { expected: u8, actual: u8 },
    #[error("Permutation out of range, expected a value between 0 and {expected} but got {actual}")]
    PermutationOutOfRange { expected: u16, actual: u16 },
    #[error("Not a permutation: {0:?}")]
    NotAPermutation(Vec<u16>),
    #[error("Invalid expression for derived move {name}: {source}")]
    InvalidExpression {
        name: ArcIntern<str>,
        #[source]
        source: AlgParseError,
    },
}

fn validate_row(
    orbit_def: &OrbitDef,
    row: OrbitTransformationData,
) -> Result<OrbitTransformation, DefinitionError> {
    let piece_count = orbit_def.piece_count.get();
    if row.permutation.len() != usize::from(piece_count) {
        return Err(DefinitionError::InvalidPieceCount {
            expected: piece_count,
            actual: row.permutation.len(),
        });
    }
    if row.orientation.len() != usize::from(piece_count) {
        return Err(DefinitionError::InvalidPieceCount {
            expected: piece_count,
            actual: row.orientation.len(),
        });
    }

    let max_delta = orbit_def.orientation_count.get() - 1;
    for &delta in &row.orientation {
        if delta > max_delta {
            return Err(DefinitionError::InvalidOrientationDelta {
                expected: max_delta,
                actual: delta,
            });
        }
    }

    let mut covered_perms = vec![false; usize::from(piece_count)];
    for &entry in &row.permutation {
        if entry >= piece_count {
            return Err(DefinitionError::PermutationOutOfRange {
                expected: piece_count - 1,
                actual: entry,
            });
        }
        covered_perms[usize::from(entry)] = true;
    }
    if covered_perms.contains(&false) {
        return Err(DefinitionError::NotAPermutation(row.permutation));
    }

    Ok(OrbitTransformation::new(
        row.permutation.into_boxed_slice(),
        row.orientation.into_boxed_slice(),
    ))
}

/// Lay a name-keyed row set out densely in definition orbit order, leaving
/// `None` where an orbit went unmentioned.
fn dense_rows(
    orbits: &[OrbitDef],
    orbit_index: &HashMap<ArcIntern<str>, usize>,
    rows: Vec<OrbitTransformationData>,
) -> Result<Vec<Option<OrbitTransformation>>, DefinitionError> {
    let mut dense = vec![None; orbits.len()];
    for row in rows {
        let Some(&index) = orbit_index.get(&row.orbit) else {
            return Err(DefinitionError::UnknownOrbit(row.orbit));
        };
        if dense[index].is_some() {
            return Err(DefinitionError::RepeatedOrbit(row.orbit));
        }
        dense[index] = Some(validate_row(&orbits[index], row)?);
    }
    Ok(dense)
}

impl TryFrom<PuzzleDefFields> for PuzzleDef {
    type Error = DefinitionError;

    fn try_from(fields: PuzzleDefFields) -> Result<Self, Self::Error> {
        let orbits: Box<[OrbitDef]> = fields.orbits.into_boxed_slice();

        let mut orbit_index = HashMap::new();
        for (index, orbit_def) in orbits.iter().enumerate() {
            if orbit_index
                .insert(ArcIntern::clone(&orbit_def.name), index)
                .is_some()
            {
                return Err(DefinitionError::DuplicateOrbit(ArcIntern::clone(
                    &orbit_def.name,
                )));
            }
        }

        let start_state = match fields.start_state {
            Some(rows) => {
                let dense = dense_rows(&orbits, &orbit_index, rows)?;
                let mut covered = Vec::with_capacity(orbits.len());
                for (orbit_def, slot) in orbits.iter().zip(dense) {
                    let Some(orbit) = slot else {
                        return Err(DefinitionError::MissingStartStateOrbit(ArcIntern::clone(
                            &orbit_def.name,
                        )));
                    };
                    covered.push(orbit);
                }
                Transformation::new(covered.into_boxed_slice())
            }
            None => Transformation::new(orbits.iter().map(identity_orbit).collect()),
        };

        let mut moves = HashMap::new();
        let mut move_names = Vec::with_capacity(fields.moves.len() + fields.derived_moves.len());

        for move_data in fields.moves {
            let dense = dense_rows(&orbits, &orbit_index, move_data.transformation)?;
            let filled = orbits
                .iter()
                .zip(dense)
                .map(|(orbit_def, slot)| slot.unwrap_or_else(|| identity_orbit(orbit_def)))
                .collect();
            let kind = MoveKind::Base(Arc::new(Transformation::new(filled)));
            if moves
                .insert(ArcIntern::clone(&move_data.name), kind)
                .is_some()
            {
                return Err(DefinitionError::DuplicateMove(move_data.name));
            }
            move_names.push(move_data.name);
        }

        for derived in fields.derived_moves {
            let alg = derived
                .expression
                .parse::<Alg>()
                .map_err(|source| DefinitionError::InvalidExpression {
                    name: ArcIntern::clone(&derived.name),
                    source,
                })?;
            let kind = MoveKind::Derived(DerivedMove {
                alg,
                resolved: OnceLock::new(),
            });
            if moves.insert(ArcIntern::clone(&derived.name), kind).is_some() {
                return Err(DefinitionError::DuplicateMove(derived.name));
            }
            move_names.push(derived.name);
        }

        Ok(PuzzleDef {
            name: fields.name,
            orbits,
            start_state,
            moves,
            move_names: move_names.into_boxed_slice(),
        })
    }
}

impl PuzzleDef {
    /// Get the name of the puzzle
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the orbit table, in definition order
    #[must_use]
    pub fn orbits(&self) -> &[OrbitDef] {
        &self.orbits
    }

    /// Get an orbit's definition by name
    pub fn orbit_def(&self, name: &str) -> Option<&OrbitDef> {
        self.orbits
            .iter()
            .find(|orbit_def| &*orbit_def.name == name)
    }

    /// Get the state a session starts from
    #[must_use]
    pub fn start_state(&self) -> &Transformation {
        &self.start_state
    }

    /// Get how the named move is defined, if it exists
    pub fn move_kind(&self, name: &str) -> Option<&MoveKind> {
        self.moves.get(&ArcIntern::from(name))
    }

    /// Get every move name, base moves first, in declaration order
    #[must_use]
    pub fn move_names(&self) -> &[ArcIntern<str>] {
        &self.move_names
    }
}

/// The 2x2x2 cube: one corner orbit, base moves `U`, `x`, and `y`, every
/// other face and rotation derived from those three.
pub static CUBE_2X2X2: LazyLock<PuzzleDef> = LazyLock::new(|| {
    let corner_move = |name: &str, permutation: Vec<u16>, orientation: Vec<u8>| MoveData {
        name: ArcIntern::from(name),
        transformation: vec![OrbitTransformationData {
            orbit: ArcIntern::from("CORNERS"),
            permutation,
            orientation,
        }],
    };

    PuzzleDefFields {
        name: "2x2x2".to_owned(),
        orbits: vec![OrbitDef {
            name: ArcIntern::from("CORNERS"),
            piece_count: 8.try_into().unwrap(),
            orientation_count: 3.try_into().unwrap(),
        }],
        start_state: Some(vec![OrbitTransformationData {
            orbit: ArcIntern::from("CORNERS"),
            permutation: vec![0, 1, 2, 3, 4, 5, 6, 7],
            orientation: vec![0; 8],
        }]),
        moves: vec![
            corner_move("U", vec![1, 2, 3, 0, 4, 5, 6, 7], vec![0; 8]),
            corner_move("x", vec![4, 0, 3, 5, 7, 6, 2, 1], vec![2, 1, 2, 1, 1, 2, 1, 2]),
            corner_move("y", vec![1, 2, 3, 0, 7, 4, 5, 6], vec![0; 8]),
        ],
        derived_moves: [
            ("z", "[x: y]"),
            ("L", "[z: U]"),
            ("F", "[x: U]"),
            ("R", "[z': U]"),
            ("B", "[x': U]"),
            ("D", "[x2: U]"),
            ("Uv", "y"),
            ("Lv", "x'"),
            ("Fv", "z"),
            ("Rv", "x"),
            ("Bv", "z'"),
            ("Dv", "y'"),
        ]
        .into_iter()
        .map(|(name, expression)| DerivedMoveData {
            name: ArcIntern::from(name),
            expression: expression.to_owned(),
        })
        .collect(),
    }
    .try_into()
    .unwrap()
});

/// The 3x3x3 cube: edge and corner orbits, the six base face moves, no
/// start state (identity) and no derived moves.
pub static CUBE_3X3X3: LazyLock<PuzzleDef> = LazyLock::new(|| {
    let cube_move = |name: &str,
                     edge_permutation: Vec<u16>,
                     edge_orientation: Vec<u8>,
                     corner_permutation: Vec<u16>,
                     corner_orientation: Vec<u8>| MoveData {
        name: ArcIntern::from(name),
        transformation: vec![
            OrbitTransformationData {
                orbit: ArcIntern::from("EDGES"),
                permutation: edge_permutation,
                orientation: edge_orientation,
            },
            OrbitTransformationData {
                orbit: ArcIntern::from("CORNERS"),
                permutation: corner_permutation,
                orientation: corner_orientation,
            },
        ],
    };

    PuzzleDefFields {
        name: "3x3x3".to_owned(),
        orbits: vec![
            OrbitDef {
                name: ArcIntern::from("EDGES"),
                piece_count: 12.try_into().unwrap(),
                orientation_count: 2.try_into().unwrap(),
            },
            OrbitDef {
                name: ArcIntern::from("CORNERS"),
                piece_count: 8.try_into().unwrap(),
                orientation_count: 3.try_into().unwrap(),
            },
        ],
        start_state: None,
        moves: vec![
            cube_move(
                "F",
                vec![9, 0, 2, 3, 1, 5, 6, 7, 8, 4, 10, 11],
                vec![1, 1, 0, 0, 1, 0, 0, 0, 0, 1, 0, 0],
                vec![6, 0, 2, 1, 4, 5, 3, 7],
                vec![2, 1, 0, 2, 0, 0, 1, 0],
            ),
            cube_move(
                "B",
                vec![0, 1, 5, 3, 4, 6, 10, 7, 8, 9, 2, 11],
                vec![0, 0, 1, 0, 0, 1, 1, 0, 0, 0, 1, 0],
                vec![0, 1, 4, 3, 7, 2, 6, 5],
                vec![0, 0, 1, 0, 2, 2, 0, 1],
            ),
            cube_move(
                "D",
                vec![0, 8, 2, 1, 4, 3, 6, 7, 5, 9, 10, 11],
                vec![0; 12],
                vec![0, 3, 2, 7, 1, 5, 6, 4],
                vec![0; 8],
            ),
            cube_move(
                "U",
                vec![0, 1, 2, 3, 4, 5, 6, 10, 8, 7, 11, 9],
                vec![0; 12],
                vec![2, 1, 5, 3, 4, 6, 0, 7],
                vec![0; 8],
            ),
            cube_move(
                "L",
                vec![0, 1, 2, 3, 11, 5, 8, 7, 4, 9, 10, 6],
                vec![0; 12],
                vec![0, 1, 2, 6, 4, 7, 5, 3],
                vec![0, 0, 0, 1, 0, 1, 2, 2],
            ),
            cube_move(
                "R",
                vec![3, 1, 7, 2, 4, 5, 6, 0, 8, 9, 10, 11],
                vec![0; 12],
                vec![1, 4, 0, 3, 2, 5, 6, 7],
                vec![1, 2, 2, 0, 1, 0, 0, 0],
            ),
        ],
        derived_moves: vec![],
    }
    .try_into()
    .unwrap()
});

#[cfg(test)]
mod tests {
    use super::*;

    fn two_orbit_fields() -> PuzzleDefFields {
        PuzzleDefFields {
            name: "toy".to_owned(),
            orbits: vec![
                OrbitDef {
                    name: ArcIntern::from("RING"),
                    piece_count: 4.try_into().unwrap(),
                    orientation_count: 2.try_into().unwrap(),
                },
                OrbitDef {
                    name: ArcIntern::from("CAPS"),
                    piece_count: 2.try_into().unwrap(),
                    orientation_count: 1.try_into().unwrap(),
                },
            ],
            start_state: None,
            moves: vec![],
            derived_moves: vec![],
        }
    }

    fn row(orbit: &str, permutation: Vec<u16>, orientation: Vec<u8>) -> OrbitTransformationData {
        OrbitTransformationData {
            orbit: ArcIntern::from(orbit),
            permutation,
            orientation,
        }
    }

    #[test]
    fn test_bundled_2x2() {
        let def = &*CUBE_2X2X2;
        assert_eq!(def.name(), "2x2x2");
        assert_eq!(def.orbits().len(), 1);

        let corners = def.orbit_def("CORNERS").unwrap();
        assert_eq!(corners.piece_count.get(), 8);
        assert_eq!(corners.orientation_count.get(), 3);
        assert!(def.orbit_def("EDGES").is_none());

        assert_eq!(def.move_names().len(), 15);
        assert!(matches!(def.move_kind("U"), Some(MoveKind::Base(_))));
        assert!(matches!(def.move_kind("z"), Some(MoveKind::Derived(_))));
        assert!(def.move_kind("M").is_none());
        assert_eq!(*def.start_state(), def.identity_transformation());
    }

    #[test]
    fn test_bundled_3x3() {
        let def = &*CUBE_3X3X3;
        assert_eq!(def.name(), "3x3x3");
        assert_eq!(def.orbit_def("EDGES").unwrap().piece_count.get(), 12);
        assert_eq!(def.orbit_def("EDGES").unwrap().orientation_count.get(), 2);
        assert_eq!(def.orbit_def("CORNERS").unwrap().piece_count.get(), 8);

        let names: Vec<&str> = def.move_names().iter().map(|name| &**name).collect();
        assert_eq!(names, ["F", "B", "D", "U", "L", "R"]);
        assert_eq!(*def.start_state(), def.identity_transformation());
    }

    #[test]
    fn test_derived_expressions_survive_parsing() {
        let def = &*CUBE_2X2X2;
        let Some(MoveKind::Derived(derived)) = def.move_kind("z") else {
            panic!("z should be derived");
        };
        assert_eq!(derived.alg().to_string(), "[x: y]");
    }

    #[test]
    fn test_start_state_defaults_to_identity() {
        let def: PuzzleDef = two_orbit_fields().try_into().unwrap();
        assert_eq!(*def.start_state(), def.identity_transformation());
    }

    #[test]
    fn test_explicit_start_state() {
        let mut fields = two_orbit_fields();
        fields.start_state = Some(vec![
            row("RING", vec![3, 2, 1, 0], vec![1, 0, 1, 0]),
            row("CAPS", vec![1, 0], vec![0, 0]),
        ]);
        let def: PuzzleDef = fields.try_into().unwrap();

        let ring = &def.start_state().orbits()[0];
        assert_eq!(ring.permutation(), [3, 2, 1, 0]);
        assert_eq!(ring.orientation(), [1, 0, 1, 0]);
    }

    #[test]
    fn test_start_state_must_cover_every_orbit() {
        let mut fields = two_orbit_fields();
        fields.start_state = Some(vec![row("RING", vec![0, 1, 2, 3], vec![0; 4])]);

        assert!(matches!(
            PuzzleDef::try_from(fields),
            Err(DefinitionError::MissingStartStateOrbit(name)) if &*name == "CAPS"
        ));
    }

    #[test]
    fn test_omitted_move_orbit_fills_with_identity() {
        let mut fields = two_orbit_fields();
        fields.moves = vec![MoveData {
            name: ArcIntern::from("swap"),
            transformation: vec![row("CAPS", vec![1, 0], vec![0, 0])],
        }];
        let def: PuzzleDef = fields.try_into().unwrap();

        let Some(MoveKind::Base(transformation)) = def.move_kind("swap") else {
            panic!("swap should be a base move");
        };
        assert_eq!(transformation.orbits()[0].permutation(), [0, 1, 2, 3]);
        assert_eq!(transformation.orbits()[1].permutation(), [1, 0]);
    }

    #[test]
    fn test_duplicate_orbit_name() {
        let mut fields = two_orbit_fields();
        fields.orbits.push(fields.orbits[0].clone());

        assert!(matches!(
            PuzzleDef::try_from(fields),
            Err(DefinitionError::DuplicateOrbit(name)) if &*name == "RING"
        ));
    }

    #[test]
    fn test_duplicate_move_name() {
        let mut fields = two_orbit_fields();
        fields.moves = vec![
            MoveData {
                name: ArcIntern::from("t"),
                transformation: vec![row("CAPS", vec![1, 0], vec![0, 0])],
            },
            MoveData {
                name: ArcIntern::from("t"),
                transformation: vec![row("CAPS", vec![0, 1], vec![0, 0])],
            },
        ];

        assert!(matches!(
            PuzzleDef::try_from(fields),
            Err(DefinitionError::DuplicateMove(_))
        ));
    }

    #[test]
    fn test_duplicate_across_base_and_derived() {
        let mut fields = two_orbit_fields();
        fields.moves = vec![MoveData {
            name: ArcIntern::from("t"),
            transformation: vec![row("CAPS", vec![1, 0], vec![0, 0])],
        }];
        fields.derived_moves = vec![DerivedMoveData {
            name: ArcIntern::from("t"),
            expression: "t".to_owned(),
        }];

        assert!(matches!(
            PuzzleDef::try_from(fields),
            Err(DefinitionError::DuplicateMove(_))
        ));
    }

    #[test]
    fn test_unknown_orbit() {
        let mut fields = two_orbit_fields();
        fields.moves = vec![MoveData {
            name: ArcIntern::from("t"),
            transformation: vec![row("NOPE", vec![0, 1], vec![0, 0])],
        }];

        assert!(matches!(
            PuzzleDef::try_from(fields),
            Err(DefinitionError::UnknownOrbit(name)) if &*name == "NOPE"
        ));
    }

    #[test]
    fn test_repeated_orbit_row() {
        let mut fields = two_orbit_fields();
        fields.moves = vec![MoveData {
            name: ArcIntern::from("t"),
            transformation: vec![
                row("CAPS", vec![1, 0], vec![0, 0]),
                row("CAPS", vec![0, 1], vec![0, 0]),
            ],
        }];

        assert!(matches!(
            PuzzleDef::try_from(fields),
            Err(DefinitionError::RepeatedOrbit(_))
        ));
    }

    #[test]
    fn test_wrong_permutation_length() {
        let mut fields = two_orbit_fields();
        fields.moves = vec![MoveData {
            name: ArcIntern::from("t"),
            transformation: vec![row("RING", vec![0, 1, 2], vec![0; 4])],
        }];

        assert!(matches!(
            PuzzleDef::try_from(fields),
            Err(DefinitionError::InvalidPieceCount {
                expected: 4,
                actual: 3
            })
        ));
    }

    #[test]
    fn test_wrong_orientation_length() {
        let mut fields = two_orbit_fields();
        fields.moves = vec![MoveData {
            name: ArcIntern::from("t"),
            transformation: vec![row("RING", vec![0, 1, 2, 3], vec![0; 5])],
        }];

        assert!(matches!(
            PuzzleDef::try_from(fields),
            Err(DefinitionError::InvalidPieceCount {
                expected: 4,
                actual: 5
            })
        ));
    }

    #[test]
    fn test_orientation_delta_out_of_range() {
        let mut fields = two_orbit_fields();
        fields.moves = vec![MoveData {
            name: ArcIntern::from("t"),
            transformation: vec![row("RING", vec![0, 1, 2, 3], vec![0, 2, 0, 0])],
        }];

        assert!(matches!(
            PuzzleDef::try_from(fields),
            Err(DefinitionError::InvalidOrientationDelta {
                expected: 1,
                actual: 2
            })
        ));
    }

    #[test]
    fn test_permutation_entry_out_of_range() {
        let mut fields = two_orbit_fields();
        fields.moves = vec![MoveData {
            name: ArcIntern::from("t"),
            transformation: vec![row("RING", vec![0, 1, 2, 4], vec![0; 4])],
        }];

        assert!(matches!(
            PuzzleDef::try_from(fields),
            Err(DefinitionError::PermutationOutOfRange {
                expected: 3,
                actual: 4
            })
        ));
    }

    #[test]
    fn test_not_a_permutation() {
        let mut fields = two_orbit_fields();
        fields.moves = vec![MoveData {
            name: ArcIntern::from("t"),
            transformation: vec![row("RING", vec![0, 0, 2, 3], vec![0; 4])],
        }];

        assert!(matches!(
            PuzzleDef::try_from(fields),
            Err(DefinitionError::NotAPermutation(entries)) if entries == [0, 0, 2, 3]
        ));
    }

    #[test]
    fn test_invalid_derived_expression() {
        let mut fields = two_orbit_fields();
        fields.derived_moves = vec![DerivedMoveData {
            name: ArcIntern::from("bad"),
            expression: "[R".to_owned(),
        }];

        assert!(matches!(
            PuzzleDef::try_from(fields),
            Err(DefinitionError::InvalidExpression { name, .. }) if &*name == "bad"
        ));
    }
}
