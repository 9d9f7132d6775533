//! The derived-move expression language.
//!
//! An expression is a whitespace separated sequence of nodes, each node one
//! of:
//!
//! - a move reference: a name made of ASCII letters and underscores,
//! - a conjugate `[A: B]` where `A` and `B` are expressions,
//! - a commutator `[A, B]` where `A` and `B` are expressions,
//!
//! optionally followed by a repetition amount in digits and/or a prime. The
//! prime negates the amount, so `R2'` repeats the inverse of `R` twice.
//! Brackets nest and take suffixes like any other node (`[x: y]2`). An empty
//! expression is the identity. Anything else, including parentheses, signed
//! amounts like `-2`, and digits inside referenced names, is a parse error:
//! the amount suffix always owns trailing digits, and lookup of a move whose
//! defined name contains digits never goes through this grammar.

use std::{fmt, str::FromStr};

use internment::ArcIntern;
use itertools::Itertools;
use pest::{
    Parser,
    error::{Error as PestError, ErrorVariant},
    iterators::Pair,
};
use pest_derive::Parser;
use thiserror::Error;

#[derive(Parser)]
#[grammar = "./alg.pest"]
struct AlgParser;

/// A parsed derived-move expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alg {
    nodes: Vec<AlgNode>,
}

/// One node of an [`Alg`], with its signed repetition amount already folded
/// in (`R2'` carries an amount of −2).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AlgNode {
    /// A reference to another move by name.
    Move { name: ArcIntern<str>, amount: i32 },
    /// A conjugate `[setup: inner]`.
    Conjugate { setup: Alg, inner: Alg, amount: i32 },
    /// A commutator `[first, second]`.
    Commutator { first: Alg, second: Alg, amount: i32 },
}

/// The expression did not match the grammar.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct AlgParseError {
    message: String,
}

impl From<PestError<Rule>> for AlgParseError {
    fn from(error: PestError<Rule>) -> Self {
        AlgParseError {
            message: error.to_string(),
        }
    }
}

impl Alg {
    /// Get the nodes of the expression in application order
    #[must_use]
    pub fn nodes(&self) -> &[AlgNode] {
        &self.nodes
    }
}

impl FromStr for Alg {
    type Err = AlgParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let expression = AlgParser::parse(Rule::expression, s)
            .map_err(AlgParseError::from)?
            .next()
            .unwrap();
        let sequence = expression.into_inner().next().unwrap();
        build_sequence(sequence)
    }
}

fn build_sequence(pair: Pair<'_, Rule>) -> Result<Alg, AlgParseError> {
    let nodes = pair
        .into_inner()
        .map(build_node)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Alg { nodes })
}

fn build_node(pair: Pair<'_, Rule>) -> Result<AlgNode, AlgParseError> {
    let rule = pair.as_rule();
    let mut inner = pair.into_inner();
    let head = inner.next().unwrap();

    match rule {
        Rule::move_ref => Ok(AlgNode::Move {
            name: ArcIntern::from(head.as_str()),
            amount: suffix_amount(inner)?,
        }),
        Rule::conjugate => {
            let amount = suffix_amount(inner)?;
            let mut parts = head.into_inner();
            let setup = build_sequence(parts.next().unwrap())?;
            let inner = build_sequence(parts.next().unwrap())?;
            Ok(AlgNode::Conjugate {
                setup,
                inner,
                amount,
            })
        }
        Rule::commutator => {
            let amount = suffix_amount(inner)?;
            let mut parts = head.into_inner();
            let first = build_sequence(parts.next().unwrap())?;
            let second = build_sequence(parts.next().unwrap())?;
            Ok(AlgNode::Commutator {
                first,
                second,
                amount,
            })
        }
        rule => unreachable!("{rule:?}"),
    }
}

/// Fold the optional `amount` and `prime` pairs that trail a node into one
/// signed amount.
fn suffix_amount<'a>(
    pairs: impl Iterator<Item = Pair<'a, Rule>>,
) -> Result<i32, AlgParseError> {
    let mut amount = 1_i32;
    let mut inverted = false;

    for pair in pairs {
        match pair.as_rule() {
            Rule::amount => {
                amount = pair.as_str().parse().map_err(|_| {
                    let error: PestError<Rule> = PestError::new_from_span(
                        ErrorVariant::CustomError {
                            message: "repetition amount is too large".to_owned(),
                        },
                        pair.as_span(),
                    );
                    AlgParseError::from(error)
                })?;
            }
            Rule::prime => inverted = true,
            rule => unreachable!("{rule:?}"),
        }
    }

    Ok(if inverted { -amount } else { amount })
}

fn write_suffix(f: &mut fmt::Formatter<'_>, amount: i32) -> fmt::Result {
    match amount {
        1 => Ok(()),
        -1 => write!(f, "'"),
        n if n < 0 => write!(f, "{}'", n.unsigned_abs()),
        n => write!(f, "{n}"),
    }
}

impl fmt::Display for Alg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.nodes.iter().format(" "))
    }
}

impl fmt::Display for AlgNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlgNode::Move { name, amount } => {
                write!(f, "{name}")?;
                write_suffix(f, *amount)
            }
            AlgNode::Conjugate {
                setup,
                inner,
                amount,
            } => {
                write!(f, "[{setup}: {inner}]")?;
                write_suffix(f, *amount)
            }
            AlgNode::Commutator {
                first,
                second,
                amount,
            } => {
                write!(f, "[{first}, {second}]")?;
                write_suffix(f, *amount)
            }
        }
    }
}
