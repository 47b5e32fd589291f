//! Type classification: decides how two values must be compared
//!
//! Classification looks through forwarding wrappers first. The decision order
//! is fixed and the first match wins:
//!
//! 1. absent
//! 2. pair-like (tuples, map entries)
//! 3. directly comparable, unless the value is a sequence
//! 4. sequence-like
//! 5. structural record
//!
//! A value that exposes no structure at all is judged by native equality.

use std::cmp::Ordering;

use crate::inspect::{Inspect, Node, Record, Sequence, View};

/// How a value is compared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    Absent,
    DirectlyComparable,
    PairLike,
    SequenceLike,
    StructuralRecord,
}

/// A node with its forwarding wrappers looked through
#[derive(Clone, Copy)]
pub enum Resolved<'a> {
    Absent,
    Value {
        value: &'a dyn Inspect,
        view: View<'a>,
    },
    Entry {
        key: &'a dyn Inspect,
        value: &'a dyn Inspect,
    },
}

impl<'a> Resolved<'a> {
    pub fn classification(&self) -> Classification {
        match self {
            Resolved::Absent => Classification::Absent,
            Resolved::Entry { .. } => Classification::PairLike,
            Resolved::Value { value, view } => match view {
                View::Pair(..) => Classification::PairLike,
                View::Sequence(_) => Classification::SequenceLike,
                _ if value.is_directly_comparable() => Classification::DirectlyComparable,
                View::Record(_) => Classification::StructuralRecord,
                // Forward and Absent never survive resolution
                _ => Classification::DirectlyComparable,
            },
        }
    }

    /// The resolved value, if this is not a map entry or absent
    pub fn value(&self) -> Option<&'a dyn Inspect> {
        match self {
            Resolved::Value { value, .. } => Some(*value),
            _ => None,
        }
    }

    /// Key and value of a pair-shaped node
    pub fn pair(&self) -> Option<(&'a dyn Inspect, &'a dyn Inspect)> {
        match *self {
            Resolved::Entry { key, value } => Some((key, value)),
            Resolved::Value {
                view: View::Pair(key, value),
                ..
            } => Some((key, value)),
            _ => None,
        }
    }

    pub fn sequence(&self) -> Option<&'a dyn Sequence> {
        match *self {
            Resolved::Value {
                view: View::Sequence(seq),
                ..
            } => Some(seq),
            _ => None,
        }
    }

    pub fn record(&self) -> Option<&'a dyn Record> {
        match *self {
            Resolved::Value {
                view: View::Record(record),
                ..
            } => Some(record),
            _ => None,
        }
    }

    /// Short type name used in diagnostics
    pub fn type_name(&self) -> String {
        match self {
            Resolved::Absent => "None".to_string(),
            Resolved::Value { value, .. } => value.type_info().short_name(),
            Resolved::Entry { key, value } => Node::Entry(*key, *value).type_name(),
        }
    }
}

/// Look through forwarding wrappers until a value with its own shape is found
pub fn resolve(node: Node<'_>) -> Resolved<'_> {
    let mut value = match node {
        Node::Entry(key, value) => return Resolved::Entry { key, value },
        Node::Value(value) => value,
    };

    loop {
        match value.view() {
            View::Absent => return Resolved::Absent,
            View::Forward(inner) => value = inner,
            view => return Resolved::Value { value, view },
        }
    }
}

pub fn classify(node: Node<'_>) -> Classification {
    resolve(node).classification()
}

/// True for `None`, an unset cell, or a wrapper around one
pub fn is_absent(value: &dyn Inspect) -> bool {
    matches!(resolve(value.into()), Resolved::Absent)
}

pub fn is_pair(value: &dyn Inspect) -> bool {
    classify(value.into()) == Classification::PairLike
}

pub fn is_sequence(value: &dyn Inspect) -> bool {
    classify(value.into()) == Classification::SequenceLike
}

pub fn can_directly_compare(value: &dyn Inspect) -> bool {
    classify(value.into()) == Classification::DirectlyComparable
}

/// Native equality, falling back to an ordering that reports equal
pub fn values_equal(a: &dyn Inspect, b: &dyn Inspect) -> bool {
    a.eq_dyn(b) || a.cmp_dyn(b) == Some(Ordering::Equal)
}

/// Whether two resolved nodes may be compared at all
///
/// Compatible when the types are identical, when one lists the other among
/// its supertypes, or when both are sequences with the same element type. Map
/// entries are compatible with each other and with pair values.
pub fn types_compatible(a: &Resolved<'_>, b: &Resolved<'_>) -> bool {
    match (a, b) {
        (Resolved::Entry { .. }, Resolved::Entry { .. }) => true,
        (Resolved::Entry { .. }, other) | (other, Resolved::Entry { .. }) => {
            matches!(
                other,
                Resolved::Value {
                    view: View::Pair(..),
                    ..
                }
            )
        }
        (
            Resolved::Value {
                value: lhs,
                view: lhs_view,
            },
            Resolved::Value {
                value: rhs,
                view: rhs_view,
            },
        ) => {
            let (lhs_type, rhs_type) = (lhs.type_info(), rhs.type_info());
            if lhs_type.id() == rhs_type.id()
                || lhs.supertypes().contains(&rhs_type)
                || rhs.supertypes().contains(&lhs_type)
            {
                return true;
            }
            match (lhs_view, rhs_view) {
                (View::Sequence(l), View::Sequence(r)) => {
                    l.element_type().id() == r.element_type().id()
                }
                _ => false,
            }
        }
        _ => false,
    }
}
