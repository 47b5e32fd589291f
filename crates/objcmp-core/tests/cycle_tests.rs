#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use std::cell::OnceCell;
use std::rc::Rc;

use common::{ring, Link};
use objcmp_core::{equal, inspect_record, Diagnostic, EqualityEngine};

#[test]
fn test_self_referencing_link() {
    let a = ring(1, |i| i);
    let b = ring(1, |i| i);
    assert!(equal(&a, &b));
}

#[test]
fn test_small_rings() {
    assert!(equal(&ring(3, |i| i), &ring(3, |i| i)));
    assert!(!equal(&ring(3, |i| i), &ring(3, |i| i * 10)));
}

#[test]
fn test_ring_compared_with_itself() {
    let a = ring(5, |i| i);
    assert!(equal(&a, &a.clone()));
}

#[test]
fn test_long_ring_terminates() {
    // Two small native frames per link
    let outcome = std::thread::Builder::new()
        .stack_size(4 * 1024 * 1024)
        .spawn(|| {
            let a = ring(1000, |i| i);
            let b = ring(1000, |i| i);
            let c = ring(1000, |i| if i == 999 { 0 } else { i });

            let mut engine = EqualityEngine::default().with_sink(Vec::<Diagnostic>::new());
            let same = engine.equal(&a, &b);
            let different = engine.equal(&a, &c);
            (same, different, engine.into_sink().len())
        })
        .unwrap()
        .join()
        .unwrap();

    assert_eq!(outcome, (true, false, 1));
}

#[test]
fn test_unterminated_chain() {
    let tail = Rc::new(Link {
        id: 2,
        next: OnceCell::new(),
    });
    let head = Link {
        id: 1,
        next: OnceCell::from(tail),
    };
    let other_tail = Rc::new(Link {
        id: 2,
        next: OnceCell::new(),
    });
    let other = Link {
        id: 1,
        next: OnceCell::from(other_tail),
    };
    assert!(equal(&head, &other));
}

struct Leaf {
    value: u32,
}

inspect_record! {
    Leaf { value }
}

struct Diamond {
    left: Rc<Leaf>,
    right: Rc<Leaf>,
}

inspect_record! {
    Diamond { left, right }
}

#[test]
fn test_diamond_second_path_is_not_reverified() {
    // Both paths of `a` lead to the same leaf. The leaf is entered through
    // `left` and then accepted as equal so far through `right`, even though
    // the right-hand side differs there.
    let shared = Rc::new(Leaf { value: 1 });
    let a = Diamond {
        left: shared.clone(),
        right: shared,
    };
    let b = Diamond {
        left: Rc::new(Leaf { value: 1 }),
        right: Rc::new(Leaf { value: 2 }),
    };
    assert!(equal(&a, &b));
}

#[test]
fn test_diamond_without_sharing_is_fully_compared() {
    let a = Diamond {
        left: Rc::new(Leaf { value: 1 }),
        right: Rc::new(Leaf { value: 1 }),
    };
    let b = Diamond {
        left: Rc::new(Leaf { value: 1 }),
        right: Rc::new(Leaf { value: 2 }),
    };
    assert!(!equal(&a, &b));
}
