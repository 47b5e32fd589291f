//! Deep-equality engine
//!
//! ## Decision procedure
//!
//! For each pair of nodes, after looking through forwarding wrappers:
//!
//! 1. Both absent is equal; exactly one absent is not.
//! 2. Identical references, or values whose native equality holds, are equal.
//! 3. Type-incompatible operands are not equal and are not descended into.
//! 4. A composite seen before in this call is treated as equal so far.
//! 5. Otherwise the classification of the left operand picks the branch:
//!    pairs compare key then value, directly comparable values use native
//!    equality, sequences compare counts then items by index, records
//!    compare their filtered fields by name.
//!
//! The result is the conjunction of every sub-result. Records and sequences
//! are always walked to the end so every mismatch is reported.
//!
//! ## Fault containment
//!
//! Unreadable fields and failing iterators turn that sub-node into a
//! mismatch. User `Inspect` code runs behind `catch_unwind` at the boundaries
//! where the walk calls into it (the pre-descent checks, field reads, item
//! reads), never around the recursion itself, so each graph level costs only
//! a couple of small frames. A panic there is reported as a catastrophic
//! fault for that node. Callers only ever see a boolean.
//!
//! ## Logging Ownership
//!
//! [`EqualityEngine::equal`] owns the `start`/`end` operation events and the
//! `compare` span. Mismatches go to the injected [`DiagnosticSink`].

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use objcmp_core_types::{schema, ComparisonId};

use crate::classify::{resolve, types_compatible, values_equal, Classification, Resolved};
use crate::cycle::{CycleGuard, Identity};
use crate::diagnostics::{Diagnostic, DiagnosticSink, TracingSink};
use crate::errors::{AccessError, FaultKind, Result};
use crate::fields::{field_index, FieldEnumerator};
use crate::inspect::{Inspect, Items, Node, Record};
use crate::options::ComparisonOptions;
use crate::{log_op_end, log_op_start};

/// Compares object graphs under a fixed set of options
///
/// Each call to [`equal`](Self::equal) owns its visited set and field cache;
/// nothing carries over between calls except the sink.
///
/// ```
/// use objcmp_core::{ComparisonOptions, Diagnostic, EqualityEngine};
///
/// let mut engine = EqualityEngine::new(ComparisonOptions::default())
///     .with_sink(Vec::<Diagnostic>::new());
///
/// assert!(!engine.equal(&vec![1, 2, 3], &vec![1, 2]));
/// assert_eq!(engine.sink().len(), 1);
/// ```
#[derive(Debug)]
pub struct EqualityEngine<S = TracingSink> {
    options: ComparisonOptions,
    sink: S,
}

impl EqualityEngine<TracingSink> {
    pub fn new(options: ComparisonOptions) -> Self {
        Self {
            options,
            sink: TracingSink,
        }
    }
}

impl Default for EqualityEngine<TracingSink> {
    fn default() -> Self {
        Self::new(ComparisonOptions::default())
    }
}

impl<S> EqualityEngine<S> {
    /// Replace the diagnostic sink
    pub fn with_sink<T: DiagnosticSink>(self, sink: T) -> EqualityEngine<T> {
        EqualityEngine {
            options: self.options,
            sink,
        }
    }

    pub fn options(&self) -> &ComparisonOptions {
        &self.options
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}

impl<S: DiagnosticSink> EqualityEngine<S> {
    /// Deep-compare two values
    ///
    /// Never panics; any fault inside the walk counts as a mismatch.
    pub fn equal(&mut self, a: &dyn Inspect, b: &dyn Inspect) -> bool {
        let comparison_id = ComparisonId::new();
        let span = tracing::debug_span!("compare", comparison_id = %comparison_id);
        let _entered = span.enter();

        let start = Instant::now();
        log_op_start!(
            schema::OP_COMPARE,
            lhs_type = %a.type_info().short_name(),
            rhs_type = %b.type_info().short_name()
        );

        let mut walk = Walk {
            fields: FieldEnumerator::new(&self.options),
            guard: CycleGuard::new(),
            sink: &mut self.sink,
        };
        // Backstop for faults outside the guarded boundaries, such as a
        // panicking sink
        let equal = match guarded(|| walk.compare(a.into(), b.into(), Site::ROOT)) {
            Ok(equal) => equal,
            Err(message) => {
                let (lhs, rhs) = (Node::from(a).type_name(), Node::from(b).type_name());
                walk.fault(lhs, rhs, Site::ROOT, message);
                false
            }
        };
        tracing::debug!(
            composites = walk.guard.len(),
            record_layouts = walk.fields.cached_tables(),
            "walk finished"
        );

        log_op_end!(
            schema::OP_COMPARE,
            duration_ms = start.elapsed().as_millis() as u64,
            equal = equal
        );
        equal
    }
}

/// Where a node sits relative to its parent
#[derive(Debug, Clone, Copy)]
struct Site {
    field: Option<&'static str>,
    index: Option<usize>,
}

impl Site {
    const ROOT: Site = Site {
        field: None,
        index: None,
    };

    fn field(name: &'static str) -> Self {
        Site {
            field: Some(name),
            index: None,
        }
    }

    fn item(self, index: usize) -> Self {
        Site {
            index: Some(index),
            ..self
        }
    }
}

/// State of one top-level comparison
struct Walk<'o, 's> {
    fields: FieldEnumerator<'o>,
    guard: CycleGuard,
    sink: &'s mut dyn DiagnosticSink,
}

/// What the checks made before descending settled about two nodes
enum Plan<'a, 'b> {
    Equal,
    Differ(Diagnostic),
    Descend {
        lhs: Resolved<'a>,
        rhs: Resolved<'b>,
        classification: Classification,
        identity: Option<Identity>,
    },
}

/// Absence, the native fast path, type compatibility and, for directly
/// comparable values, the verdict itself
///
/// Runs user `Inspect` code; callers wrap it with [`guarded`]. Nothing here
/// recurses, so the recursive frames stay small.
fn plan<'a, 'b>(a: Node<'a>, b: Node<'b>) -> Plan<'a, 'b> {
    let lhs = resolve(a);
    let rhs = resolve(b);
    let differ = |kind: FaultKind, message: &str| {
        Plan::Differ(
            Diagnostic::new(kind, lhs.type_name(), rhs.type_name()).with_message(message),
        )
    };

    match (&lhs, &rhs) {
        (Resolved::Absent, Resolved::Absent) => return Plan::Equal,
        (Resolved::Absent, _) | (_, Resolved::Absent) => {
            return differ(FaultKind::StructuralMismatch, "only one side has a value")
        }
        _ => {}
    }

    if let (Some(x), Some(y)) = (lhs.value(), rhs.value()) {
        if Identity::of(x) == Identity::of(y) || x.eq_dyn(y) {
            return Plan::Equal;
        }
    }

    if !types_compatible(&lhs, &rhs) {
        return differ(FaultKind::TypeIncompatible, "");
    }

    match lhs.classification() {
        Classification::Absent => Plan::Equal,
        Classification::DirectlyComparable => match (lhs.value(), rhs.value()) {
            (Some(x), Some(y)) if values_equal(x, y) => Plan::Equal,
            _ => differ(FaultKind::StructuralMismatch, "values differ"),
        },
        classification => {
            let identity = match classification {
                Classification::SequenceLike | Classification::StructuralRecord => {
                    lhs.value().map(Identity::of)
                }
                _ => None,
            };
            Plan::Descend {
                lhs,
                rhs,
                classification,
                identity,
            }
        }
    }
}

impl Walk<'_, '_> {
    fn compare(&mut self, a: Node<'_>, b: Node<'_>, at: Site) -> bool {
        let (lhs, rhs, classification) = match guarded(|| plan(a, b)) {
            Ok(Plan::Equal) => return true,
            Ok(Plan::Differ(diagnostic)) => {
                self.report(diagnostic, at);
                return false;
            }
            Ok(Plan::Descend {
                lhs,
                rhs,
                classification,
                identity,
            }) => {
                if let Some(identity) = identity {
                    if !self.guard.enter(identity) {
                        return true;
                    }
                }
                (lhs, rhs, classification)
            }
            Err(message) => {
                self.fault(a.type_name(), b.type_name(), at, message);
                return false;
            }
        };

        match classification {
            Classification::PairLike => self.compare_pairs(&lhs, &rhs, at),
            Classification::SequenceLike => self.compare_sequences(&lhs, &rhs, at),
            Classification::StructuralRecord => self.compare_records(&lhs, &rhs, at),
            // Settled by `plan`
            Classification::Absent | Classification::DirectlyComparable => true,
        }
    }

    fn compare_pairs(&mut self, lhs: &Resolved<'_>, rhs: &Resolved<'_>, at: Site) -> bool {
        let (Some((ka, va)), Some((kb, vb))) = (lhs.pair(), rhs.pair()) else {
            self.mismatch(lhs, rhs, at, "only one side is a pair");
            return false;
        };

        let keys = self.compare(ka.into(), kb.into(), at);
        let values = self.compare(va.into(), vb.into(), at);
        keys && values
    }

    fn compare_sequences(&mut self, lhs: &Resolved<'_>, rhs: &Resolved<'_>, at: Site) -> bool {
        let (Some(sa), Some(sb)) = (lhs.sequence(), rhs.sequence()) else {
            self.mismatch(lhs, rhs, at, "only one side is a collection");
            return false;
        };

        let (count, other) = match guarded(|| (sa.len(), sb.len())) {
            Ok(counts) => counts,
            Err(message) => {
                self.fault(lhs.type_name(), rhs.type_name(), at, message);
                return false;
            }
        };
        if count != other {
            let message = format!("collection counts differ ({count} vs {other})");
            self.mismatch(lhs, rhs, at, &message);
            return false;
        }

        let (mut left, mut right) = match guarded(|| (sa.items(), sb.items())) {
            Ok(items) => items,
            Err(message) => {
                self.fault(lhs.type_name(), rhs.type_name(), at, message);
                return false;
            }
        };
        let mut equal = true;

        for index in 0..count {
            let item_at = at.item(index);
            match (next_item(&mut left, index), next_item(&mut right, index)) {
                (Ok(x), Ok(y)) => equal &= self.compare(x, y, item_at),
                (Err(err), _) | (_, Err(err)) => {
                    self.unreadable(lhs, rhs, item_at, &err);
                    equal = false;
                }
            }
        }

        equal
    }

    fn compare_records(&mut self, lhs: &Resolved<'_>, rhs: &Resolved<'_>, at: Site) -> bool {
        let (Some(ra), Some(rb)) = (lhs.record(), rhs.record()) else {
            self.mismatch(lhs, rhs, at, "only one side is a record");
            return false;
        };

        let fields = &mut self.fields;
        let layout = guarded(|| {
            let same_layout = match (lhs.value(), rhs.value()) {
                (Some(x), Some(y)) => x.type_info().id() == y.type_info().id(),
                _ => false,
            };
            (fields.fields(ra), same_layout)
        });
        let (slots, same_layout) = match layout {
            Ok(layout) => layout,
            Err(message) => {
                self.fault(lhs.type_name(), rhs.type_name(), at, message);
                return false;
            }
        };

        let mut equal = true;
        for slot in slots.iter() {
            let name = slot.descriptor.name();
            let field_at = Site::field(name);

            match read_fields(ra, rb, rhs, slot.index, name, same_layout) {
                Ok((x, y)) => equal &= self.compare(x.into(), y.into(), field_at),
                Err(err) => {
                    self.unreadable(lhs, rhs, field_at, &err);
                    equal = false;
                }
            }
        }

        equal
    }

    fn mismatch(&mut self, lhs: &Resolved<'_>, rhs: &Resolved<'_>, at: Site, message: &str) {
        let diagnostic = Diagnostic::new(
            FaultKind::StructuralMismatch,
            lhs.type_name(),
            rhs.type_name(),
        )
        .with_message(message);
        self.report(diagnostic, at);
    }

    fn unreadable(&mut self, lhs: &Resolved<'_>, rhs: &Resolved<'_>, at: Site, err: &AccessError) {
        let diagnostic =
            Diagnostic::new(FaultKind::UnreadableField, lhs.type_name(), rhs.type_name())
                .with_message(err.to_string());
        self.report(diagnostic, at);
    }

    fn fault(&mut self, lhs_type: String, rhs_type: String, at: Site, message: String) {
        let diagnostic =
            Diagnostic::new(FaultKind::CatastrophicFault, lhs_type, rhs_type).with_message(message);
        self.report(diagnostic, at);
    }

    fn report(&mut self, mut diagnostic: Diagnostic, at: Site) {
        if let Some(field) = at.field {
            diagnostic = diagnostic.with_field(field);
        }
        if let Some(index) = at.index {
            diagnostic = diagnostic.with_index(index);
        }
        self.sink.report(diagnostic);
    }
}

/// Run user `Inspect` code, turning a panic into its message
fn guarded<T>(f: impl FnOnce() -> T) -> std::result::Result<T, String> {
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(|payload| panic_message(payload.as_ref()))
}

/// Read the field called `name` from both records
///
/// The left record is read at `index`; the right one too when both share a
/// layout, otherwise it is looked up by name.
fn read_fields<'x, 'y>(
    ra: &'x dyn Record,
    rb: &'y dyn Record,
    rhs: &Resolved<'_>,
    index: usize,
    name: &str,
    same_layout: bool,
) -> Result<(&'x dyn Inspect, &'y dyn Inspect)> {
    let x = read_slot(ra, index, name)?;
    let rb_index = if same_layout {
        index
    } else {
        guarded(|| field_index(rb, name))
            .map_err(|message| AccessError::unreadable(name, message))?
            .ok_or_else(|| AccessError::NoSuchField {
                name: name.to_string(),
                type_name: rhs.type_name(),
            })?
    };
    let y = read_slot(rb, rb_index, name)?;
    Ok((x, y))
}

/// Read a record field, turning a panicking accessor into an access error
fn read_slot<'a>(record: &'a dyn Record, index: usize, name: &str) -> Result<&'a dyn Inspect> {
    guarded(|| record.field(index))
        .unwrap_or_else(|message| Err(AccessError::unreadable(name, message)))
}

/// Pull the next sequence item, turning a panic or an early end into an
/// access error
fn next_item<'a>(items: &mut Items<'a>, index: usize) -> Result<Node<'a>> {
    match guarded(|| items.next()) {
        Ok(Some(item)) => item,
        Ok(None) => Err(AccessError::unreadable(
            format!("item {index}"),
            "iteration ended early",
        )),
        Err(message) => Err(AccessError::unreadable(format!("item {index}"), message)),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "panic with a non-string payload".to_string()
    }
}

/// Deep-compare two values with default options
///
/// Mismatches are reported as `tracing` events.
pub fn equal(a: &dyn Inspect, b: &dyn Inspect) -> bool {
    EqualityEngine::default().equal(a, b)
}

/// Deep-compare two values with the given options
pub fn equal_with(a: &dyn Inspect, b: &dyn Inspect, options: &ComparisonOptions) -> bool {
    EqualityEngine::new(options.clone()).equal(a, b)
}

/// Method-call form of [`equal`] and [`equal_with`]
pub trait InspectExt: Inspect {
    fn deep_eq(&self, other: &dyn Inspect) -> bool;

    fn deep_eq_with(&self, other: &dyn Inspect, options: &ComparisonOptions) -> bool;
}

impl<T: Inspect> InspectExt for T {
    fn deep_eq(&self, other: &dyn Inspect) -> bool {
        equal(self, other)
    }

    fn deep_eq_with(&self, other: &dyn Inspect, options: &ComparisonOptions) -> bool {
        equal_with(self, other, options)
    }
}
