use std::cell::OnceCell;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::rc::Rc;
use std::sync::{Arc, OnceLock};

use super::{native_cmp, native_eq, Inspect, Items, Node, Sequence, TypeInfo, View};
use crate::errors::Result;

/// Values whose own `PartialEq`/`PartialOrd` are trusted as-is
macro_rules! leaf {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Inspect for $ty {
                fn view(&self) -> View<'_> {
                    View::Opaque
                }

                fn is_directly_comparable(&self) -> bool {
                    true
                }

                fn eq_dyn(&self, other: &dyn Inspect) -> bool {
                    native_eq(self, other)
                }

                fn cmp_dyn(&self, other: &dyn Inspect) -> Option<Ordering> {
                    native_cmp(self, other)
                }
            }
        )*
    };
}

leaf!(
    (),
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
    String,
    &'static str,
    std::time::Duration,
    chrono::NaiveDate,
    chrono::NaiveTime,
    chrono::NaiveDateTime,
    chrono::DateTime<chrono::Utc>,
    chrono::DateTime<chrono::FixedOffset>,
    chrono::Duration,
);

fn value_item<T: Inspect>(item: &T) -> Result<Node<'_>> {
    Ok(Node::Value(item))
}

fn entry_item<'a, K: Inspect, V: Inspect>(key: &'a K, value: &'a V) -> Result<Node<'a>> {
    Ok(Node::Entry(key, value))
}

impl<T: Inspect> Inspect for Option<T> {
    fn view(&self) -> View<'_> {
        match self {
            Some(value) => View::Forward(value),
            None => View::Absent,
        }
    }
}

impl<T: Inspect> Inspect for Box<T> {
    fn view(&self) -> View<'_> {
        View::Forward(self.as_ref())
    }
}

impl<T: Inspect> Inspect for Rc<T> {
    fn view(&self) -> View<'_> {
        View::Forward(self.as_ref())
    }
}

impl<T: Inspect> Inspect for Arc<T> {
    fn view(&self) -> View<'_> {
        View::Forward(self.as_ref())
    }
}

/// Trait objects forward to whatever concrete value they hold, so
/// heterogeneous containers such as `Vec<Box<dyn Inspect>>` compare item by
/// item on the concrete types
impl Inspect for Box<dyn Inspect> {
    fn view(&self) -> View<'_> {
        View::Forward(&**self)
    }
}

impl Inspect for Rc<dyn Inspect> {
    fn view(&self) -> View<'_> {
        View::Forward(&**self)
    }
}

impl Inspect for Arc<dyn Inspect> {
    fn view(&self) -> View<'_> {
        View::Forward(&**self)
    }
}

impl<T: Inspect> Inspect for OnceCell<T> {
    fn view(&self) -> View<'_> {
        match self.get() {
            Some(value) => View::Forward(value),
            None => View::Absent,
        }
    }
}

impl<T: Inspect> Inspect for OnceLock<T> {
    fn view(&self) -> View<'_> {
        match self.get() {
            Some(value) => View::Forward(value),
            None => View::Absent,
        }
    }
}

impl<K: Inspect, V: Inspect> Inspect for (K, V) {
    fn view(&self) -> View<'_> {
        View::Pair(&self.0, &self.1)
    }
}

/// Containers iterated value by value
macro_rules! sequence {
    ($($container:ident),* $(,)?) => {
        $(
            impl<T: Inspect> Inspect for $container<T> {
                fn view(&self) -> View<'_> {
                    View::Sequence(self)
                }
            }

            impl<T: Inspect> Sequence for $container<T> {
                fn len(&self) -> usize {
                    $container::len(self)
                }

                fn element_type(&self) -> TypeInfo {
                    TypeInfo::of::<T>()
                }

                fn items(&self) -> Items<'_> {
                    Box::new(self.iter().map(value_item))
                }
            }
        )*
    };
}

sequence!(Vec, VecDeque, BTreeSet);

impl<T: Inspect, const N: usize> Inspect for [T; N] {
    fn view(&self) -> View<'_> {
        View::Sequence(self)
    }
}

impl<T: Inspect, const N: usize> Sequence for [T; N] {
    fn len(&self) -> usize {
        N
    }

    fn element_type(&self) -> TypeInfo {
        TypeInfo::of::<T>()
    }

    fn items(&self) -> Items<'_> {
        Box::new(self.iter().map(value_item))
    }
}

impl<K: Inspect, V: Inspect> Inspect for BTreeMap<K, V> {
    fn view(&self) -> View<'_> {
        View::Sequence(self)
    }
}

impl<K: Inspect, V: Inspect> Sequence for BTreeMap<K, V> {
    fn len(&self) -> usize {
        BTreeMap::len(self)
    }

    fn element_type(&self) -> TypeInfo {
        TypeInfo::of::<(K, V)>()
    }

    fn items(&self) -> Items<'_> {
        Box::new(self.iter().map(|(key, value)| entry_item(key, value)))
    }
}
