//! Exhaustive input combinations for the truth-table block.

/// Iterates over every assignment of `width` bits except all-zero, in
/// binary-increment order. Bit 0 of each assignment is the most significant
/// one, so the first input flips slowest.
///
/// ```
/// use veritb_synth::stimulus::Combinations;
/// let steps: Vec<Vec<u8>> = Combinations::new(2).collect();
/// assert_eq!(steps, vec![vec![0, 1], vec![1, 0], vec![1, 1]]);
/// ```
#[derive(Debug, Clone)]
pub struct Combinations {
    width: u32,
    next: u64,
    end: u64,
}

impl Combinations {
    /// Creates the iterator for `width` inputs. A width of 64 or more
    /// cannot be counted and yields nothing.
    pub fn new(width: u32) -> Self {
        Self {
            width,
            next: 1,
            end: 1u64.checked_shl(width).unwrap_or(0),
        }
    }
}

impl Iterator for Combinations {
    type Item = Vec<u8>;

    fn next(&mut self) -> Option<Vec<u8>> {
        if self.next >= self.end {
            return None;
        }
        let value = self.next;
        self.next += 1;
        Some(
            (0..self.width)
                .rev()
                .map(|bit| ((value >> bit) & 1) as u8)
                .collect(),
        )
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.end.saturating_sub(self.next)).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Combinations {}
