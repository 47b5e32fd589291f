//! Capability layer the engine walks instead of runtime reflection
//!
//! Every type that takes part in a comparison implements [`Inspect`]. The
//! trait exposes how the value is shaped ([`View`]), whether its own
//! equality/ordering can be trusted, and its runtime type. Records expose
//! their fields through [`Record`], containers their items through
//! [`Sequence`].
//!
//! Implementations for std and chrono types live in `std_impls`; user records
//! are registered with [`inspect_record!`](crate::inspect_record).

use std::any::{Any, TypeId};
use std::cmp::Ordering;

use crate::errors::Result;
use crate::fields::FieldDescriptor;

pub mod macros;
mod std_impls;

/// Object-safe access to `Any` for every sized `'static` type
pub trait AsAny {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Runtime type key of an inspected value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeInfo {
    id: TypeId,
    name: &'static str,
}

impl TypeInfo {
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified type name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Type name with module paths stripped, e.g. `Vec<Person>`
    pub fn short_name(&self) -> String {
        let mut out = String::with_capacity(self.name.len());
        let mut segment_start = 0;
        let mut chars = self.name.chars().peekable();

        while let Some(c) = chars.next() {
            if c == ':' && chars.peek() == Some(&':') {
                chars.next();
                out.truncate(segment_start);
                continue;
            }
            out.push(c);
            if !(c.is_alphanumeric() || c == '_') {
                segment_start = out.len();
            }
        }

        out
    }
}

/// Structural shape a value exposes to the engine
#[derive(Clone, Copy)]
pub enum View<'a> {
    /// Missing value (`None`, an unset cell)
    Absent,
    /// Transparent wrapper around another value (`Some`, `Box`, `Rc`, ...)
    Forward(&'a dyn Inspect),
    /// Fixed two-slot key/value association
    Pair(&'a dyn Inspect, &'a dyn Inspect),
    /// Ordered, countable container
    Sequence(&'a dyn Sequence),
    /// Composite compared through named fields
    Record(&'a dyn Record),
    /// No structure to descend into; only native equality can judge it
    Opaque,
}

/// A position in the object graph
///
/// Most positions hold a value. Map-like sequences yield `Entry` positions
/// whose key and value are borrowed separately from the container.
#[derive(Clone, Copy)]
pub enum Node<'a> {
    Value(&'a dyn Inspect),
    Entry(&'a dyn Inspect, &'a dyn Inspect),
}

impl<'a> Node<'a> {
    /// Short type name used in diagnostics
    pub fn type_name(&self) -> String {
        match self {
            Node::Value(value) => value.type_info().short_name(),
            Node::Entry(key, value) => format!(
                "Entry<{}, {}>",
                key.type_info().short_name(),
                value.type_info().short_name()
            ),
        }
    }
}

impl<'a> From<&'a dyn Inspect> for Node<'a> {
    fn from(value: &'a dyn Inspect) -> Self {
        Node::Value(value)
    }
}

/// Capability trait implemented by every comparable type
pub trait Inspect: AsAny + 'static {
    /// How this value is shaped
    fn view(&self) -> View<'_>;

    fn type_info(&self) -> TypeInfo {
        TypeInfo::of::<Self>()
    }

    /// True when the type's own equality/ordering is trusted without
    /// structural decomposition
    fn is_directly_comparable(&self) -> bool {
        false
    }

    /// Native equality against a value of any type
    ///
    /// Returns `false` when the other value is of a different concrete type
    /// or when the type has no meaningful value equality.
    fn eq_dyn(&self, _other: &dyn Inspect) -> bool {
        false
    }

    /// Native ordering against a value of any type, if the type has one
    fn cmp_dyn(&self, _other: &dyn Inspect) -> Option<Ordering> {
        None
    }

    /// Types this value may stand in for when checking type compatibility
    fn supertypes(&self) -> Vec<TypeInfo> {
        Vec::new()
    }
}

/// Boxed iterator over the items of a [`Sequence`]
pub type Items<'a> = Box<dyn Iterator<Item = Result<Node<'a>>> + 'a>;

/// Ordered, countable container
pub trait Sequence {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Static type of the items
    fn element_type(&self) -> TypeInfo;

    /// Items in iteration order; an item that cannot be produced is an `Err`
    fn items(&self) -> Items<'_>;
}

/// Composite compared field by field
pub trait Record {
    /// Field table in declaration order
    fn fields(&self) -> &'static [FieldDescriptor];

    /// Read the field at `index` of the table returned by [`Record::fields`]
    ///
    /// # Errors
    ///
    /// Returns an [`AccessError`](crate::errors::AccessError) when the field
    /// cannot be read at invocation time.
    fn field(&self, index: usize) -> Result<&dyn Inspect>;
}

/// `PartialEq` lifted to `&dyn Inspect`; false for values of another type
pub fn native_eq<T: PartialEq + 'static>(this: &T, other: &dyn Inspect) -> bool {
    other
        .as_any()
        .downcast_ref::<T>()
        .is_some_and(|other| this == other)
}

/// `PartialOrd` lifted to `&dyn Inspect`; `None` for values of another type
pub fn native_cmp<T: PartialOrd + 'static>(this: &T, other: &dyn Inspect) -> Option<Ordering> {
    other
        .as_any()
        .downcast_ref::<T>()
        .and_then(|other| this.partial_cmp(other))
}
