use crate::{Error, Result};

use tracing::debug;

/// Enforces strictly consecutive bar indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct BarSequence {
    next: usize,
}

impl BarSequence {
    pub(crate) fn starting_at(first_bar: usize) -> Self {
        Self { next: first_bar }
    }

    /// The index the next accepted bar must carry.
    #[inline]
    pub(crate) fn next(&self) -> usize {
        self.next
    }

    /// Accepts `bar_index` if it is the expected next index. A rejected
    /// index leaves the sequence where it was.
    ///
    /// `usize::MAX` has no successor and is never accepted.
    #[inline]
    pub(crate) fn accept(&mut self, bar_index: usize) -> Result<()> {
        let rejected = Error::OutOfSequence {
            expected: self.next,
            got: bar_index,
        };

        let successor = match bar_index.checked_add(1) {
            Some(successor) if bar_index == self.next => successor,
            _ => {
                debug!(expected = self.next, got = bar_index, "rejected out-of-sequence tick");
                return Err(rejected);
            }
        };

        self.next = successor;
        Ok(())
    }
}
