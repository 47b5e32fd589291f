//! Declarative registration of record types
//!
//! [`inspect_record!`](crate::inspect_record) implements
//! [`Inspect`](crate::inspect::Inspect) and [`Record`](crate::inspect::Record)
//! for a struct, building its field table in declaration order.
//!
//! Field markers:
//! - `#[skip]` - always excluded from comparison
//! - `#[deprecated]` - excluded unless deprecated fields are included
//! - `#[hidden]` - not publicly readable, never compared
//!
//! Record markers:
//! - `#[eq]` - the record's `PartialEq` is the native fast path
//! - `#[ord]` - the record is directly comparable through `PartialEq` and
//!   `PartialOrd` (implies `eq`)

/// Register a struct as a comparable record
///
/// # Example
///
/// ```
/// use objcmp_core::{equal, inspect_record};
///
/// struct Account {
///     id: u64,
///     owner: String,
///     opened_at: String,
///     legacy_code: Option<String>,
/// }
///
/// inspect_record! {
///     Account {
///         id,
///         owner,
///         #[skip] opened_at,
///         #[deprecated] legacy_code,
///     }
/// }
///
/// let a = Account { id: 1, owner: "x".into(), opened_at: "mon".into(), legacy_code: None };
/// let b = Account { id: 1, owner: "x".into(), opened_at: "tue".into(), legacy_code: Some("L".into()) };
/// assert!(equal(&a, &b));
/// ```
#[macro_export]
macro_rules! inspect_record {
    (
        $(#[$marker:ident])*
        $ty:ident {
            $( $(#[$flag:ident])* $field:ident ),* $(,)?
        }
    ) => {
        impl $crate::inspect::Inspect for $ty {
            fn view(&self) -> $crate::inspect::View<'_> {
                $crate::inspect::View::Record(self)
            }

            $( $crate::__inspect_marker!($marker); )*
        }

        impl $crate::inspect::Record for $ty {
            fn fields(&self) -> &'static [$crate::fields::FieldDescriptor] {
                const FIELDS: &[$crate::fields::FieldDescriptor] = &[
                    $( $crate::fields::FieldDescriptor::new(stringify!($field)) $( .$flag() )* ),*
                ];
                FIELDS
            }

            fn field(
                &self,
                index: usize,
            ) -> $crate::errors::Result<&dyn $crate::inspect::Inspect> {
                $crate::__inspect_field!(self, index, 0usize; $($field),*).ok_or_else(|| {
                    $crate::errors::AccessError::FieldIndexOutOfRange {
                        index,
                        len: <Self as $crate::inspect::Record>::fields(self).len(),
                    }
                })
            }
        }
    };
}

/// Field accessor arms: one index test per field, no table built per call
#[doc(hidden)]
#[macro_export]
macro_rules! __inspect_field {
    ($this:expr, $index:expr, $position:expr;) => {
        ::std::option::Option::None
    };
    ($this:expr, $index:expr, $position:expr; $first:ident $(, $rest:ident)*) => {
        if $index == $position {
            ::std::option::Option::Some(&$this.$first as &dyn $crate::inspect::Inspect)
        } else {
            $crate::__inspect_field!($this, $index, $position + 1; $($rest),*)
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __inspect_marker {
    (eq) => {
        fn eq_dyn(&self, other: &dyn $crate::inspect::Inspect) -> bool {
            $crate::inspect::native_eq(self, other)
        }
    };
    (ord) => {
        fn is_directly_comparable(&self) -> bool {
            true
        }

        fn eq_dyn(&self, other: &dyn $crate::inspect::Inspect) -> bool {
            $crate::inspect::native_eq(self, other)
        }

        fn cmp_dyn(
            &self,
            other: &dyn $crate::inspect::Inspect,
        ) -> ::std::option::Option<::std::cmp::Ordering> {
            $crate::inspect::native_cmp(self, other)
        }
    };
}
