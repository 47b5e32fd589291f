//! Field descriptors and the filtered, ordered field enumeration

use std::collections::HashMap;
use std::rc::Rc;

use crate::classify::{resolve, Resolved};
use crate::errors::{AccessError, Result};
use crate::inspect::{Inspect, Record, View};
use crate::options::ComparisonOptions;

/// Metadata for one field of a record
///
/// Built in `const` context, usually by
/// [`inspect_record!`](crate::inspect_record).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldDescriptor {
    name: &'static str,
    readable: bool,
    always_exclude: bool,
    deprecated: bool,
}

impl FieldDescriptor {
    /// A public, comparable field
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            readable: true,
            always_exclude: false,
            deprecated: false,
        }
    }

    /// Mark the field as always excluded from comparison
    pub const fn skip(self) -> Self {
        Self {
            always_exclude: true,
            ..self
        }
    }

    /// Mark the field as deprecated
    pub const fn deprecated(self) -> Self {
        Self {
            deprecated: true,
            ..self
        }
    }

    /// Mark the field as not publicly readable
    pub const fn hidden(self) -> Self {
        Self {
            readable: false,
            ..self
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_readable(&self) -> bool {
        self.readable
    }

    pub fn is_always_excluded(&self) -> bool {
        self.always_exclude
    }

    pub fn is_deprecated(&self) -> bool {
        self.deprecated
    }
}

/// A field selected for comparison together with its position in the
/// record's field table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSlot {
    pub index: usize,
    pub descriptor: FieldDescriptor,
}

/// Produces the ordered, filtered fields to compare for a record
///
/// Filtered tables are cached per field table for the lifetime of the
/// enumerator, which the engine scopes to one top-level comparison.
#[derive(Debug)]
pub struct FieldEnumerator<'o> {
    options: &'o ComparisonOptions,
    cache: HashMap<(usize, usize), Rc<[FieldSlot]>>,
}

impl<'o> FieldEnumerator<'o> {
    pub fn new(options: &'o ComparisonOptions) -> Self {
        Self {
            options,
            cache: HashMap::new(),
        }
    }

    /// Check a single descriptor against the filters, applied in order:
    /// readable, not always-excluded, not ignored by name, and not deprecated
    /// unless deprecated fields are included.
    pub fn admits(descriptor: &FieldDescriptor, options: &ComparisonOptions) -> bool {
        descriptor.is_readable()
            && !descriptor.is_always_excluded()
            && !options.ignores(descriptor.name())
            && (options.include_deprecated || !descriptor.is_deprecated())
    }

    /// Fields of `record` to compare, in declaration order
    pub fn fields(&mut self, record: &dyn Record) -> Rc<[FieldSlot]> {
        let table = record.fields();
        let key = (table.as_ptr() as usize, table.len());
        let options = self.options;

        self.cache
            .entry(key)
            .or_insert_with(|| {
                table
                    .iter()
                    .enumerate()
                    .filter(|(_, descriptor)| Self::admits(descriptor, options))
                    .map(|(index, descriptor)| FieldSlot {
                        index,
                        descriptor: *descriptor,
                    })
                    .collect()
            })
            .clone()
    }

    /// Number of distinct field tables filtered so far
    pub fn cached_tables(&self) -> usize {
        self.cache.len()
    }
}

/// Position of the field called `name` in a record's field table
pub fn field_index(record: &dyn Record, name: &str) -> Option<usize> {
    record.fields().iter().position(|d| d.name() == name)
}

/// Read a field of a record by name
///
/// Forwarding wrappers (`Some`, `Box`, `Rc`, ...) around the record are
/// looked through.
///
/// # Errors
///
/// Returns `NoSuchField` if the value is not a record or has no such field,
/// or whatever the record's accessor reports for that field.
pub fn read_field<'a>(value: &'a dyn Inspect, name: &str) -> Result<&'a dyn Inspect> {
    let no_such_field = || AccessError::NoSuchField {
        name: name.to_string(),
        type_name: value.type_info().short_name(),
    };

    match resolve(value.into()) {
        Resolved::Value {
            view: View::Record(record),
            ..
        } => {
            let index = field_index(record, name).ok_or_else(no_such_field)?;
            record.field(index)
        }
        _ => Err(no_such_field()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &[FieldDescriptor] = &[
        FieldDescriptor::new("id"),
        FieldDescriptor::new("secret").hidden(),
        FieldDescriptor::new("stamp").skip(),
        FieldDescriptor::new("name"),
        FieldDescriptor::new("old").deprecated(),
    ];

    struct Row;

    impl Record for Row {
        fn fields(&self) -> &'static [FieldDescriptor] {
            TABLE
        }

        fn field(&self, index: usize) -> Result<&dyn Inspect> {
            Err(AccessError::FieldIndexOutOfRange {
                index,
                len: TABLE.len(),
            })
        }
    }

    fn names(slots: &[FieldSlot]) -> Vec<&'static str> {
        slots.iter().map(|s| s.descriptor.name()).collect()
    }

    #[test]
    fn test_default_filters() {
        let options = ComparisonOptions::new();
        let mut enumerator = FieldEnumerator::new(&options);
        let slots = enumerator.fields(&Row);
        assert_eq!(names(&slots), vec!["id", "name"]);
        assert_eq!(slots[1].index, 3);
    }

    #[test]
    fn test_include_deprecated() {
        let options = ComparisonOptions::new().with_deprecated(true);
        let mut enumerator = FieldEnumerator::new(&options);
        assert_eq!(names(&enumerator.fields(&Row)), vec!["id", "name", "old"]);
    }

    #[test]
    fn test_ignore_list() {
        let options = ComparisonOptions::new().ignoring(["name"]);
        let mut enumerator = FieldEnumerator::new(&options);
        assert_eq!(names(&enumerator.fields(&Row)), vec!["id"]);
    }

    #[test]
    fn test_ignore_list_cannot_resurrect_excluded_fields() {
        let options = ComparisonOptions::new().with_deprecated(true);
        assert!(!FieldEnumerator::admits(&TABLE[1], &options));
        assert!(!FieldEnumerator::admits(&TABLE[2], &options));
    }

    #[test]
    fn test_tables_are_cached() {
        let options = ComparisonOptions::new();
        let mut enumerator = FieldEnumerator::new(&options);
        let first = enumerator.fields(&Row);
        let second = enumerator.fields(&Row);
        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(enumerator.cached_tables(), 1);
    }

    #[test]
    fn test_field_index() {
        assert_eq!(field_index(&Row, "name"), Some(3));
        assert_eq!(field_index(&Row, "missing"), None);
    }
}
