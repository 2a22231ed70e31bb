//! Off-side rule state for one document
//!
//! The stack holds the widths of every open indentation level, bottom to top,
//! starting from the sentinel `0`. It is strictly increasing at all times.

/// What a line's indentation does relative to the open levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentChange {
    Same,
    Indent,
    /// Number of levels closed
    Dedent(usize),
}

/// A dedent landed between two open levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Misaligned {
    pub width: usize,
    /// The nearest open level below `width`
    pub nearest: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndentState {
    stack: Vec<usize>,
}

impl IndentState {
    pub fn new() -> Self {
        Self { stack: vec![0] }
    }

    pub fn current(&self) -> usize {
        self.stack.last().copied().unwrap_or(0)
    }

    /// Open levels above the sentinel
    pub fn depth(&self) -> usize {
        self.stack.len() - 1
    }

    pub fn levels(&self) -> &[usize] {
        &self.stack
    }

    /// Move to a line indented by `width` columns
    pub fn apply(&mut self, width: usize) -> Result<IndentChange, Misaligned> {
        let current = self.current();
        if width > current {
            self.stack.push(width);
            return Ok(IndentChange::Indent);
        }
        if width == current {
            return Ok(IndentChange::Same);
        }

        let mut closed = 0;
        while self.stack.len() > 1 && self.current() > width {
            self.stack.pop();
            closed += 1;
        }
        if self.current() != width {
            return Err(Misaligned {
                width,
                nearest: self.current(),
            });
        }
        Ok(IndentChange::Dedent(closed))
    }

    /// Close every open level; returns how many were closed
    pub fn close(&mut self) -> usize {
        let closed = self.depth();
        self.stack.truncate(1);
        closed
    }
}

impl Default for IndentState {
    fn default() -> Self {
        Self::new()
    }
}

/// Width of leading whitespace: spaces count 1, tabs count `tab_width`.
///
/// Returns the width and the byte length of the whitespace prefix.
pub fn measure(line: &str, tab_width: usize) -> (usize, usize) {
    let mut width = 0;
    let mut bytes = 0;
    for ch in line.chars() {
        match ch {
            ' ' => width += 1,
            '\t' => width += tab_width,
            _ => break,
        }
        bytes += 1;
    }
    (width, bytes)
}
