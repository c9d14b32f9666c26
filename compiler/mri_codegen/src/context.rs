//! Emission context and state.
//!
//! The `EmitContext` holds the output buffer, indentation, and the
//! per-emission dedup set. A fresh context is created for every unit of every
//! class; nothing carries over between classes.

use rustc_hash::FxHashSet;

/// Text output state for one generated unit.
#[derive(Default)]
pub struct EmitContext {
    /// Current indentation level.
    indent: usize,
    /// Generated code output.
    output: String,
    /// Keys already emitted in this unit.
    emitted: FxHashSet<String>,
}

impl EmitContext {
    pub fn new() -> Self {
        Self {
            indent: 0,
            output: String::with_capacity(4096),
            emitted: FxHashSet::default(),
        }
    }

    /// Increase indentation level.
    pub fn indent(&mut self) {
        self.indent += 1;
    }

    /// Decrease indentation level.
    pub fn dedent(&mut self) {
        debug_assert!(self.indent > 0, "dedent called with zero indent");
        self.indent = self.indent.saturating_sub(1);
    }

    /// Write indentation to output (two spaces per level).
    pub fn write_indent(&mut self) {
        for _ in 0..self.indent {
            self.output.push_str("  ");
        }
    }

    /// Write a line to output (with indentation and newline).
    pub fn writeln(&mut self, s: &str) {
        self.write_indent();
        self.output.push_str(s);
        self.output.push('\n');
    }

    /// Write a newline.
    pub fn newline(&mut self) {
        self.output.push('\n');
    }

    /// Take the generated output.
    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }

    /// Record `key` as emitted. Returns `false` if it already was.
    pub fn first_emission(&mut self, key: &str) -> bool {
        if self.emitted.contains(key) {
            return false;
        }
        self.emitted.insert(key.to_string())
    }
}
