// Copyright 2026 the Layertree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Evaluates a service description end to end.
//!
//! Usage: `tree_report [service.json]`. Without an argument the built-in
//! topographic service from `layertree_harness` is used.
//!
//! Prints the pipeline trace through a
//! [`PrettyPrintSink`](layertree_debug::pretty::PrettyPrintSink), the
//! evaluated tree outline, the proxy routing table and the legends still to
//! render, then the JSON report. Exits with status 1 if the description is
//! rejected.

use std::fs::File;
use std::io::BufReader;
use std::process::ExitCode;

use layertree_core::config::TreeConfig;
use layertree_core::consumer::TreeConsumer;
use layertree_core::layer::LayerTree;
use layertree_core::pipeline::ServiceDescription;
use layertree_core::spec::LayerInput;
use layertree_core::trace::Tracer;

use layertree_debug::outline::Outline;
use layertree_debug::pretty::PrettyPrintSink;
use layertree_debug::report;

use layertree_harness::canned;

fn main() -> ExitCode {
    let description = match std::env::args().nth(1) {
        Some(path) => {
            let file = File::open(&path).expect("failed to open service description");
            serde_json::from_reader(BufReader::new(file))
                .expect("failed to parse service description")
        }
        None => ServiceDescription {
            config: TreeConfig::default(),
            top: Some(canned::service_top()),
            layers: LayerInput::Flat(canned::service_flat()),
        },
    };

    // -- evaluate ----------------------------------------------------------
    println!("== trace");
    let mut sink = PrettyPrintSink::new(Box::new(std::io::stdout()));
    let mut tracer = Tracer::new(&mut sink);
    let evaluation = match description.evaluate(&mut tracer) {
        Ok(evaluation) => evaluation,
        Err(err) => {
            eprintln!("structural error: {err}");
            return ExitCode::FAILURE;
        }
    };
    drop(tracer);

    // -- consumers ---------------------------------------------------------
    let mut outline = Outline::new().with_boxes(true);
    let mut extras = print_extras;
    let consumers: &mut [&mut dyn TreeConsumer] = &mut [&mut outline, &mut extras];
    if !evaluation.publish(consumers) {
        // Rejected trees are still worth looking at.
        outline.consume(&evaluation.tree);
    }
    println!("\n== outline");
    print!("{}", outline.text());

    // -- report ------------------------------------------------------------
    println!("\n== report");
    report::export(&evaluation, &mut std::io::stdout()).expect("failed to write report");
    println!();

    if evaluation.is_accepted() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn print_extras(tree: &LayerTree) {
    println!("\n== routing");
    for (group, leaves) in tree.group_to_data_leaf_names() {
        println!("{group} -> {}", leaves.join(", "));
    }

    println!("\n== legends to render");
    for missing in tree.legend_references_missing_asset() {
        let layer = tree.name(missing.layer).unwrap_or("(unnamed)");
        println!("{layer}/{}", missing.style.name);
    }
}
