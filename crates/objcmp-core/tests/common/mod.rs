//! Sample object graphs shared by the integration tests

#![allow(dead_code)]

use std::cell::{Cell, OnceCell};
use std::rc::Rc;

use chrono::NaiveDate;
use objcmp_core::{inspect_record, AccessError, FieldDescriptor, Inspect, Record, View};

#[derive(Debug, Clone)]
pub struct Address {
    pub street: String,
    pub city: String,
}

inspect_record! {
    Address { street, city }
}

#[derive(Debug, Clone)]
pub struct Person {
    pub name: String,
    pub age: u32,
    pub email: Option<String>,
    pub tags: Vec<String>,
    pub address: Option<Box<Address>>,
    pub birthday: NaiveDate,
    pub last_seen: String,
    pub nickname: Option<String>,
    pub password_hash: String,
}

inspect_record! {
    Person {
        name,
        age,
        email,
        tags,
        address,
        birthday,
        #[skip] last_seen,
        #[deprecated] nickname,
        #[hidden] password_hash,
    }
}

/// A fully populated person; vary fields with struct update syntax
pub fn alice() -> Person {
    Person {
        name: "Alice".to_string(),
        age: 34,
        email: Some("alice@example.com".to_string()),
        tags: vec!["admin".to_string(), "ops".to_string()],
        address: Some(Box::new(Address {
            street: "1 Main St".to_string(),
            city: "Springfield".to_string(),
        })),
        birthday: NaiveDate::from_ymd_opt(1990, 4, 2).unwrap_or_default(),
        last_seen: "2024-01-01T10:00:00".to_string(),
        nickname: Some("Al".to_string()),
        password_hash: "hash-a".to_string(),
    }
}

/// Same shape as `Person` minus the excluded fields; stands in for it
#[derive(Debug, Clone)]
pub struct Contact {
    pub name: String,
    pub age: u32,
}

impl Inspect for Contact {
    fn view(&self) -> View<'_> {
        View::Record(self)
    }

    fn supertypes(&self) -> Vec<objcmp_core::TypeInfo> {
        vec![objcmp_core::TypeInfo::of::<Person>()]
    }
}

impl Record for Contact {
    fn fields(&self) -> &'static [FieldDescriptor] {
        const FIELDS: &[FieldDescriptor] =
            &[FieldDescriptor::new("name"), FieldDescriptor::new("age")];
        FIELDS
    }

    fn field(&self, index: usize) -> objcmp_core::Result<&dyn Inspect> {
        match index {
            0 => Ok(&self.name),
            1 => Ok(&self.age),
            _ => Err(AccessError::FieldIndexOutOfRange { index, len: 2 }),
        }
    }
}

/// Singly linked node whose successor is set after construction
pub struct Link {
    pub id: u32,
    pub next: OnceCell<Rc<Link>>,
}

inspect_record! {
    Link { id, next }
}

/// Build a ring of `len` links whose ids follow `id_of`
pub fn ring(len: u32, id_of: impl Fn(u32) -> u32) -> Rc<Link> {
    let links: Vec<Rc<Link>> = (0..len)
        .map(|i| {
            Rc::new(Link {
                id: id_of(i),
                next: OnceCell::new(),
            })
        })
        .collect();

    for (i, link) in links.iter().enumerate() {
        let next = links[(i + 1) % links.len()].clone();
        link.next.set(next).ok();
    }

    links[0].clone()
}

/// Record whose accessors fail on demand
pub struct Flaky {
    pub before: u32,
    pub broken: u32,
    pub exploding: u32,
    pub after: u32,
    pub break_reads: bool,
    pub panic_reads: bool,
}

impl Flaky {
    pub fn healthy(value: u32) -> Self {
        Self {
            before: value,
            broken: value,
            exploding: value,
            after: value,
            break_reads: false,
            panic_reads: false,
        }
    }
}

impl Inspect for Flaky {
    fn view(&self) -> View<'_> {
        View::Record(self)
    }
}

impl Record for Flaky {
    fn fields(&self) -> &'static [FieldDescriptor] {
        const FIELDS: &[FieldDescriptor] = &[
            FieldDescriptor::new("before"),
            FieldDescriptor::new("broken"),
            FieldDescriptor::new("exploding"),
            FieldDescriptor::new("after"),
        ];
        FIELDS
    }

    fn field(&self, index: usize) -> objcmp_core::Result<&dyn Inspect> {
        match index {
            0 => Ok(&self.before),
            1 if self.break_reads => Err(AccessError::unreadable("broken", "connection reset")),
            1 => Ok(&self.broken),
            2 if self.panic_reads => panic!("accessor blew up"),
            2 => Ok(&self.exploding),
            3 => Ok(&self.after),
            _ => Err(AccessError::FieldIndexOutOfRange { index, len: 4 }),
        }
    }
}

/// Sequence that reports more items than its iterator produces
pub struct ShortSequence {
    pub claimed: usize,
    pub items: Vec<u32>,
}

impl Inspect for ShortSequence {
    fn view(&self) -> View<'_> {
        View::Sequence(self)
    }
}

impl objcmp_core::Sequence for ShortSequence {
    fn len(&self) -> usize {
        self.claimed
    }

    fn element_type(&self) -> objcmp_core::TypeInfo {
        objcmp_core::TypeInfo::of::<u32>()
    }

    fn items(&self) -> objcmp_core::inspect::Items<'_> {
        Box::new(
            self.items
                .iter()
                .map(|item| Ok::<_, AccessError>(objcmp_core::Node::Value(item))),
        )
    }
}

/// Sequence that counts how often its items are requested
pub struct CountingSequence {
    pub items: Vec<u32>,
    pub reads: Cell<usize>,
}

impl CountingSequence {
    pub fn new(items: Vec<u32>) -> Self {
        Self {
            items,
            reads: Cell::new(0),
        }
    }
}

impl Inspect for CountingSequence {
    fn view(&self) -> View<'_> {
        View::Sequence(self)
    }
}

impl objcmp_core::Sequence for CountingSequence {
    fn len(&self) -> usize {
        self.items.len()
    }

    fn element_type(&self) -> objcmp_core::TypeInfo {
        objcmp_core::TypeInfo::of::<u32>()
    }

    fn items(&self) -> objcmp_core::inspect::Items<'_> {
        self.reads.set(self.reads.get() + 1);
        Box::new(
            self.items
                .iter()
                .map(|item| Ok::<_, AccessError>(objcmp_core::Node::Value(item))),
        )
    }
}

/// Record with a member that has no implementation behind it yet
pub struct Draft {
    pub title: String,
}

impl Inspect for Draft {
    fn view(&self) -> View<'_> {
        View::Record(self)
    }
}

impl Record for Draft {
    fn fields(&self) -> &'static [FieldDescriptor] {
        const FIELDS: &[FieldDescriptor] =
            &[FieldDescriptor::new("title"), FieldDescriptor::new("summary")];
        FIELDS
    }

    fn field(&self, index: usize) -> objcmp_core::Result<&dyn Inspect> {
        match index {
            0 => Ok(&self.title),
            1 => Err(AccessError::not_implemented("summary")),
            _ => Err(AccessError::FieldIndexOutOfRange { index, len: 2 }),
        }
    }
}

/// Leaf whose native equality panics
#[derive(Debug)]
pub struct Volatile(pub u32);

impl Inspect for Volatile {
    fn view(&self) -> View<'_> {
        View::Opaque
    }

    fn is_directly_comparable(&self) -> bool {
        true
    }

    fn eq_dyn(&self, _other: &dyn Inspect) -> bool {
        panic!("volatile value cannot be compared")
    }
}
