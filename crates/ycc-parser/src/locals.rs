// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Parse-time table of local variables and their frame offsets.

use tracing::trace;

/// Bytes reserved per variable in the stack frame.
pub const SLOT_SIZE: usize = 8;

/// A variable seen during parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalVar<'src> {
    pub name: &'src str,
    pub offset: usize,
}

/// Append-only name -> offset table for one program.
///
/// Offsets start at `SLOT_SIZE` and grow by `SLOT_SIZE` in declaration order.
/// Lookups scan from the newest entry.
#[derive(Debug, Default)]
pub struct LocalTable<'src> {
    vars: Vec<LocalVar<'src>>,
}

impl<'src> LocalTable<'src> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn find(&self, name: &str) -> Option<&LocalVar<'src>> {
        self.vars.iter().rev().find(|var| var.name == name)
    }

    /// Offset of `name`, allocating a new slot on first sight.
    pub fn resolve(&mut self, name: &'src str) -> usize {
        match self.find(name) {
            Some(var) => var.offset,
            None => self.declare(name),
        }
    }

    fn declare(&mut self, name: &'src str) -> usize {
        debug_assert!(!name.is_empty(), "local variable with empty name");
        let offset = self.frame_size() + SLOT_SIZE;
        trace!(name, offset, "new local variable");
        self.vars.push(LocalVar { name, offset });
        offset
    }

    /// Highest offset handed out so far; 0 when no variable exists.
    pub fn frame_size(&self) -> usize {
        self.vars.last().map_or(0, |var| var.offset)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_sight_allocates_in_order() {
        let mut table = LocalTable::new();
        assert!(table.is_empty());
        assert_eq!(table.frame_size(), 0);

        assert_eq!(table.resolve("a"), 8);
        assert_eq!(table.resolve("b"), 16);
        assert_eq!(table.resolve("a"), 8);
        assert_eq!(table.resolve("c"), 24);

        assert_eq!(table.len(), 3);
        assert_eq!(table.frame_size(), 24);
        assert_eq!(table.find("b").map(|v| v.name), Some("b"));
    }

    #[test]
    fn names_match_exactly() {
        let source = "abc ab";
        let mut table = LocalTable::new();
        let long = table.resolve(&source[0..3]);
        let short = table.resolve(&source[4..6]);
        assert_ne!(long, short);
        // `ab` is a prefix of `abc` in the same buffer but a different name
        assert_eq!(table.find(&source[0..2]).map(|v| v.offset), Some(short));
        assert!(table.find("a").is_none());
    }
}
