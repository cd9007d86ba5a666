use core::iter::FusedIterator;
use core::ops::RangeInclusive;

use crate::error::Error;
use crate::register::Register;

/// A closed interval `[start, end]` of register values.
///
/// Both bounds are inclusive and `end` may be [`Register::MAX`]; iteration
/// stops after yielding `end` instead of relying on the counter wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SearchRange<R> {
    start: R,
    end: R,
}

impl<R: Register> SearchRange<R> {
    /// Creates a new range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`] if `start > end`.
    pub fn new(start: R, end: R) -> Result<Self, Error> {
        if start > end {
            return Err(Error::InvalidRange {
                width: R::WIDTH,
                start: start.to_u32(),
                end: end.to_u32(),
            });
        }
        Ok(Self { start, end })
    }

    /// A range holding exactly one value.
    pub fn single(value: R) -> Self {
        Self {
            start: value,
            end: value,
        }
    }

    /// Every value representable at this width.
    pub fn full() -> Self {
        Self {
            start: R::ZERO,
            end: R::MAX,
        }
    }

    pub fn start(&self) -> R {
        self.start
    }

    pub fn end(&self) -> R {
        self.end
    }

    /// Number of values in the range. Never zero.
    pub fn size(&self) -> u32 {
        self.end.to_u32() - self.start.to_u32() + 1
    }

    pub fn contains(&self, value: R) -> bool {
        self.start <= value && value <= self.end
    }

    pub fn iter(&self) -> RangeIter<R> {
        RangeIter {
            next: Some(self.start),
            end: self.end,
        }
    }

    /// Splits the range into at most `parts` contiguous, ordered sub-ranges.
    pub fn split(&self, parts: u32) -> Vec<Self> {
        let len = self.size();
        let parts = parts.clamp(1, len);
        let chunk = len.div_ceil(parts);

        let mut ranges = Vec::with_capacity(parts as usize);
        let mut start = self.start.to_u32();
        let end = self.end.to_u32();
        while start <= end {
            let last = end.min(start + chunk - 1);
            ranges.push(Self {
                start: R::from_u32_truncated(start),
                end: R::from_u32_truncated(last),
            });
            start = last + 1;
        }
        ranges
    }
}

impl<R: Register> TryFrom<RangeInclusive<R>> for SearchRange<R> {
    type Error = Error;

    fn try_from(range: RangeInclusive<R>) -> Result<Self, Error> {
        let (start, end) = range.into_inner();
        Self::new(start, end)
    }
}

impl<R: Register> IntoIterator for SearchRange<R> {
    type Item = R;
    type IntoIter = RangeIter<R>;

    fn into_iter(self) -> RangeIter<R> {
        self.iter()
    }
}

impl<R: Register> IntoIterator for &SearchRange<R> {
    type Item = R;
    type IntoIter = RangeIter<R>;

    fn into_iter(self) -> RangeIter<R> {
        self.iter()
    }
}

/// Iterator over a [`SearchRange`].
#[derive(Debug, Clone)]
pub struct RangeIter<R> {
    next: Option<R>,
    end: R,
}

impl<R: Register> Iterator for RangeIter<R> {
    type Item = R;

    fn next(&mut self) -> Option<R> {
        let current = self.next?;
        self.next = if current == self.end {
            None
        } else {
            current.successor()
        };
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self
            .next
            .map_or(0, |next| (self.end.to_u32() - next.to_u32() + 1) as usize);
        (remaining, Some(remaining))
    }
}

impl<R: Register> ExactSizeIterator for RangeIter<R> {}
impl<R: Register> FusedIterator for RangeIter<R> {}
