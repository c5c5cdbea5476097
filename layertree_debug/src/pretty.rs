// Copyright 2026 the Layertree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use layertree_core::trace::{StageBeginEvent, StageEndEvent, TraceSink, TreeBuiltEvent};
use layertree_core::validate::Finding;

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
    findings: bool,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink")
            .field("findings", &self.findings)
            .finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(Box::new(std::io::stderr()))
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self {
            writer,
            findings: true,
        }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self {
            writer,
            findings: true,
        }
    }

    /// Sets whether individual findings are printed. Stage and tree lines
    /// are always printed.
    #[must_use]
    pub fn with_findings(mut self, on: bool) -> Self {
        self.findings = on;
        self
    }

    /// Consumes the sink and returns the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_stage_begin(&mut self, e: &StageBeginEvent) {
        let _ = writeln!(self.writer, "[stage:begin] {}", e.stage.as_str());
    }

    fn on_stage_end(&mut self, e: &StageEndEvent) {
        let _ = writeln!(
            self.writer,
            "[stage:end] {} items={}",
            e.stage.as_str(),
            e.items,
        );
    }

    fn on_tree_built(&mut self, e: &TreeBuiltEvent) {
        let _ = writeln!(
            self.writer,
            "[tree] layers={} groups={} data={} depth={} crs={}",
            e.layers, e.groups, e.data, e.max_depth, e.referenced_crs,
        );
    }

    fn on_finding(&mut self, f: &Finding) {
        if self.findings {
            let _ = writeln!(self.writer, "[finding] {f}");
        }
    }
}

#[cfg(test)]
mod tests {
    use layertree_core::config::TreeConfig;
    use layertree_core::pipeline::evaluate;
    use layertree_core::spec::{FlatLayerSpec, LayerAttributes, LayerInput};
    use layertree_core::trace::{Stage, Tracer};
    use layertree_core::validate::Rule;

    use super::*;

    fn output(sink: PrettyPrintSink<Vec<u8>>) -> String {
        String::from_utf8(sink.into_inner()).unwrap()
    }

    #[test]
    fn writes_one_line_per_event() {
        let mut sink = PrettyPrintSink::with_writer(Vec::new());
        sink.on_stage_begin(&StageBeginEvent {
            stage: Stage::Resolve,
        });
        sink.on_stage_end(&StageEndEvent {
            stage: Stage::Resolve,
            items: 4,
        });
        sink.on_tree_built(&TreeBuiltEvent {
            layers: 4,
            groups: 1,
            data: 2,
            max_depth: 2,
            referenced_crs: 1,
        });
        sink.on_finding(&Finding::new(Rule::NoVisibleLayer));
        assert_eq!(
            output(sink),
            "[stage:begin] resolve\n\
             [stage:end] resolve items=4\n\
             [tree] layers=4 groups=1 data=2 depth=2 crs=1\n\
             [finding] error[LT019]: at least one layer must be visible\n"
        );
    }

    #[test]
    fn findings_can_be_muted() {
        let mut sink = PrettyPrintSink::with_writer(Vec::new()).with_findings(false);
        sink.on_finding(&Finding::new(Rule::NoVisibleLayer));
        assert!(output(sink).is_empty());
    }

    #[test]
    fn traces_a_full_evaluation() {
        let input = LayerInput::Flat(vec![
            FlatLayerSpec::root(LayerAttributes::named("a")),
            FlatLayerSpec::child_of("a", LayerAttributes::named("b")),
        ]);
        let mut sink = PrettyPrintSink::with_writer(Vec::new());
        let mut tracer = Tracer::new(&mut sink);
        let eval = evaluate(input, &TreeConfig::default(), &mut tracer).unwrap();
        drop(tracer);
        let text = output(sink);
        let stage_lines = text.lines().filter(|l| l.starts_with("[stage:")).count();
        assert_eq!(stage_lines, 8);
        assert!(text.contains("[tree] layers=2 groups=0 data=1"));
        let finding_lines = text.lines().filter(|l| l.starts_with("[finding]")).count();
        assert_eq!(finding_lines, eval.report.len());
    }
}
