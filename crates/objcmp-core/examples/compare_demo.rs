//! Comparison Demo
#![allow(clippy::unwrap_used, clippy::expect_used)]
//!
//! Walks through the main comparison features:
//! 1. Field-by-field record comparison with diagnostics
//! 2. Exclusion markers and caller options
//! 3. Cyclic graphs
//!
//! Run with `RUST_LOG=objcmp_core=debug` to see the structured events.

use std::cell::OnceCell;
use std::rc::Rc;

use objcmp_core::logging_facility::{init, Profile};
use objcmp_core::{inspect_record, ComparisonOptions, Diagnostic, EqualityEngine};

struct Invoice {
    number: String,
    lines: Vec<(String, u32)>,
    printed_at: String,
    legacy_ref: Option<String>,
}

inspect_record! {
    Invoice {
        number,
        lines,
        #[skip] printed_at,
        #[deprecated] legacy_ref,
    }
}

struct Station {
    name: String,
    next: OnceCell<Rc<Station>>,
}

inspect_record! {
    Station { name, next }
}

fn loop_line(names: &[&str]) -> Rc<Station> {
    let stations: Vec<Rc<Station>> = names
        .iter()
        .map(|name| {
            Rc::new(Station {
                name: name.to_string(),
                next: OnceCell::new(),
            })
        })
        .collect();
    for (i, station) in stations.iter().enumerate() {
        station
            .next
            .set(stations[(i + 1) % stations.len()].clone())
            .ok();
    }
    stations[0].clone()
}

fn main() {
    init(Profile::Development);
    println!("=== objcmp Comparison Demo ===\n");

    // ===== Part 1: Records =====
    println!("## Part 1: Records\n");

    let draft = Invoice {
        number: "INV-7".to_string(),
        lines: vec![("widget".to_string(), 3), ("gadget".to_string(), 1)],
        printed_at: "09:00".to_string(),
        legacy_ref: None,
    };
    let sent = Invoice {
        number: "INV-7".to_string(),
        lines: vec![("widget".to_string(), 4), ("gadget".to_string(), 1)],
        printed_at: "17:30".to_string(),
        legacy_ref: Some("OLD-1".to_string()),
    };

    let mut engine = EqualityEngine::default().with_sink(Vec::<Diagnostic>::new());
    println!("draft == sent: {}", engine.equal(&draft, &sent));
    for diagnostic in engine.sink() {
        println!("  {diagnostic}");
    }

    // ===== Part 2: Options =====
    println!("\n## Part 2: Options\n");

    let options: ComparisonOptions =
        serde_json::from_str(r#"{ "include_deprecated": true, "ignore_names": ["lines"] }"#)
            .unwrap();
    let mut engine = EqualityEngine::new(options).with_sink(Vec::<Diagnostic>::new());
    println!(
        "draft == sent (lines ignored, deprecated included): {}",
        engine.equal(&draft, &sent)
    );
    for diagnostic in engine.sink() {
        println!("  {diagnostic}");
    }

    // ===== Part 3: Cycles =====
    println!("\n## Part 3: Cycles\n");

    let circle = loop_line(&["Bank", "Holborn", "Euston"]);
    let same = loop_line(&["Bank", "Holborn", "Euston"]);
    let other = loop_line(&["Bank", "Holborn", "Angel"]);
    println!("circle == same: {}", objcmp_core::equal(&circle, &same));
    println!("circle == other: {}", objcmp_core::equal(&circle, &other));
}
