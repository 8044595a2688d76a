//! # Bitset
//!
//! A fixed-length sequence of byte-sized cells. Cells conventionally hold
//! `0` or `1`, but callers may store any small value; the engine never
//! interprets them beyond equality and the mutation operator's flip.
//!
//! Reads past the end return `None` and writes past the end return `false`;
//! no accessor panics on a bad index.
//!
//! Sub-ranges are exposed through two explicit view types. [`BitsetView`]
//! borrows a window for reading, [`BitsetViewMut`] borrows it for writing and
//! every write lands in the parent's storage. Neither view owns memory.
//!
//! ## Example
//!
//! ```rust
//! use genbits::bitset::Bitset;
//!
//! let mut bits = Bitset::new(8);
//! assert!(bits.set(3, 1));
//! assert!(!bits.set(8, 1));
//! assert_eq!(bits.get(3), Some(1));
//! assert_eq!(bits.get(8), None);
//!
//! if let Some(mut window) = bits.view_mut(4, 4) {
//!     window.set_all(1);
//! }
//! assert_eq!(bits.as_bytes(), &[0, 0, 0, 1, 1, 1, 1, 1]);
//! ```

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An owned, fixed-length sequence of byte cells.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Bitset {
    bits: Vec<u8>,
}

impl Bitset {
    /// Allocates `size` zero-valued cells.
    pub fn new(size: usize) -> Self {
        Self {
            bits: vec![0; size],
        }
    }

    /// Wraps existing cell values without copying.
    pub fn from_bytes(bits: Vec<u8>) -> Self {
        Self { bits }
    }

    /// Number of cells. Fixed for the lifetime of the bitset.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Returns the cell at `index`, or `None` when out of range.
    pub fn get(&self, index: usize) -> Option<u8> {
        self.bits.get(index).copied()
    }

    /// Writes `value` at `index`. Returns `false` and leaves the bitset
    /// untouched when `index` is out of range.
    pub fn set(&mut self, index: usize, value: u8) -> bool {
        match self.bits.get_mut(index) {
            Some(cell) => {
                *cell = value;
                true
            }
            None => false,
        }
    }

    /// Fills every cell with `value`.
    pub fn set_all(&mut self, value: u8) {
        self.bits.fill(value);
    }

    /// Returns an independent bit-for-bit duplicate.
    pub fn copy(&self) -> Bitset {
        self.clone()
    }

    /// All cells, in order. This is also the key used for duplicate suppression.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bits
    }

    /// Swaps the cells at `index` between `self` and `other`.
    /// Returns `false` if either side is out of range.
    pub(crate) fn swap_with(&mut self, other: &mut Bitset, index: usize) -> bool {
        match (self.bits.get_mut(index), other.bits.get_mut(index)) {
            (Some(a), Some(b)) => {
                std::mem::swap(a, b);
                true
            }
            _ => false,
        }
    }

    /// Read-only window over `[start, start + len)`, or `None` when the
    /// window does not fit.
    pub fn view(&self, start: usize, len: usize) -> Option<BitsetView<'_>> {
        let end = start.checked_add(len)?;
        self.bits.get(start..end).map(|bits| BitsetView { bits })
    }

    /// Mutable window over `[start, start + len)`. Writes through the view
    /// are visible in this bitset.
    pub fn view_mut(&mut self, start: usize, len: usize) -> Option<BitsetViewMut<'_>> {
        let end = start.checked_add(len)?;
        self.bits.get_mut(start..end).map(|bits| BitsetViewMut { bits })
    }

    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.bits.iter().copied()
    }
}

impl From<Vec<u8>> for Bitset {
    fn from(bits: Vec<u8>) -> Self {
        Self::from_bytes(bits)
    }
}

impl fmt::Debug for Bitset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bitset(")?;
        for cell in &self.bits {
            match cell {
                0 | 1 => write!(f, "{}", cell)?,
                other => write!(f, "[{}]", other)?,
            }
        }
        write!(f, ")")
    }
}

/// A borrowed, read-only window into a [`Bitset`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BitsetView<'a> {
    bits: &'a [u8],
}

impl<'a> BitsetView<'a> {
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<u8> {
        self.bits.get(index).copied()
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.bits
    }

    /// Copies the window into a new, independent bitset.
    pub fn to_bitset(&self) -> Bitset {
        Bitset::from_bytes(self.bits.to_vec())
    }
}

/// A borrowed, writable window into a [`Bitset`]. Aliases the parent's cells.
#[derive(Debug, PartialEq, Eq)]
pub struct BitsetViewMut<'a> {
    bits: &'a mut [u8],
}

impl<'a> BitsetViewMut<'a> {
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<u8> {
        self.bits.get(index).copied()
    }

    pub fn set(&mut self, index: usize, value: u8) -> bool {
        match self.bits.get_mut(index) {
            Some(cell) => {
                *cell = value;
                true
            }
            None => false,
        }
    }

    pub fn set_all(&mut self, value: u8) {
        self.bits.fill(value);
    }

    /// Copies the window into a new, independent bitset.
    pub fn to_bitset(&self) -> Bitset {
        Bitset::from_bytes(self.bits.to_vec())
    }
}
