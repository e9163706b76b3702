/// Field values for a single run of `length` bits when no field may exceed `max`.
///
/// Yields `max` for every full chunk with a `0` escape between consecutive
/// fields, then the remainder if nonzero. The escape is a zero-length run of
/// the opposite bit, so the next field belongs to the same run again.
/// A run of length `0` yields nothing.
pub fn split(length: u64, max: u16) -> Split {
    debug_assert!(max > 0);
    Split {
        remaining: length,
        max,
        escape: false,
    }
}

#[derive(Clone, Debug)]
pub struct Split {
    remaining: u64,
    max: u16,
    escape: bool,
}

impl Iterator for Split {
    type Item = u16;

    fn next(&mut self) -> Option<u16> {
        if self.remaining == 0 {
            return None;
        }
        if self.escape {
            self.escape = false;
            return Some(0);
        }
        let field = self.remaining.min(self.max as u64);
        self.remaining -= field;
        self.escape = self.remaining != 0;
        Some(field as u16)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let max = self.max as u64;
        let chunks = (self.remaining + max - 1) / max;
        let len = if self.escape {
            2 * chunks
        } else if chunks == 0 {
            0
        } else {
            2 * chunks - 1
        };
        (len as usize, Some(len as usize))
    }
}

impl ExactSizeIterator for Split {}
