//! objcmp core - deep structural equality over object graphs
//!
//! Compares two arbitrary in-memory values field by field:
//! - Forwarding wrappers (`Option`, `Box`, `Rc`, `Arc`, cells) are looked through
//! - Sequences compare by count, then item by item in iteration order
//! - Tuples and map entries compare key, then value
//! - Records compare their fields by name, honoring exclusion markers and
//!   caller options
//! - Reference cycles terminate through a per-call visited set
//!
//! Values take part by implementing [`Inspect`]; records are usually
//! registered with [`inspect_record!`].
//!
//! ```
//! use objcmp_core::{equal, equal_with, inspect_record, ComparisonOptions};
//!
//! struct Order {
//!     id: u64,
//!     lines: Vec<(String, u32)>,
//!     updated_at: String,
//! }
//!
//! inspect_record! {
//!     Order { id, lines, updated_at }
//! }
//!
//! let a = Order { id: 1, lines: vec![("apple".into(), 2)], updated_at: "mon".into() };
//! let b = Order { id: 1, lines: vec![("apple".into(), 2)], updated_at: "tue".into() };
//!
//! assert!(!equal(&a, &b));
//! let options = ComparisonOptions::new().ignoring(["updated_at"]);
//! assert!(equal_with(&a, &b, &options));
//! ```

pub mod classify;
pub mod cycle;
pub mod diagnostics;
pub mod engine;
pub mod errors;
pub mod fields;
pub mod inspect;
pub mod logging_facility;
pub mod options;

pub use objcmp_core_types::schema;

pub use classify::{
    can_directly_compare, classify, is_absent, is_pair, is_sequence, types_compatible,
    values_equal, Classification,
};
pub use diagnostics::{Diagnostic, DiagnosticSink, TracingSink};
pub use engine::{equal, equal_with, EqualityEngine, InspectExt};
pub use errors::{AccessError, FaultKind, Result};
pub use fields::{read_field, FieldDescriptor};
pub use inspect::{Inspect, Node, Record, Sequence, TypeInfo, View};
pub use options::ComparisonOptions;
