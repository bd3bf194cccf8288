//! Fixed-Size Circular Buffer for RSSI History
//!
//! ## Overview
//!
//! Each estimator keeps the most recent raw readings for statistics and the
//! stability part of its confidence score. The Kalman filter itself never
//! looks at this history; it only carries its own scalar state.
//!
//! The buffer has a capacity fixed at compile time through const generics and
//! overwrites the oldest reading when full (FIFO eviction):
//! - O(1) insertion
//! - O(1) access to the most recent reading
//! - O(n) iteration, oldest to newest
//! - Zero heap allocations
//!
//! ### Memory Layout
//!
//! ```text
//! CircularBuffer<5> after 7 pushes (r0..r6):
//! ┌────┬────┬────┬────┬────┐
//! │ r5 │ r6 │ r2 │ r3 │ r4 │
//! └────┴────┴────┴────┴────┘
//!             ↑
//!             └── write_pos = 2, oldest reading
//! ```
//!
//! ## Usage Example
//!
//! ```rust
//! use signalmap_core::buffer::CircularBuffer;
//! use signalmap_core::traits::RssiReading;
//!
//! let mut history: CircularBuffer<3> = CircularBuffer::new();
//! for (i, rssi) in [-60.0, -61.0, -62.0, -63.0].into_iter().enumerate() {
//!     history.push(RssiReading { rssi, timestamp: i as u64 * 100 });
//! }
//!
//! // The first reading was evicted
//! assert_eq!(history.len(), 3);
//! assert_eq!(history.iter().next().map(|r| r.rssi), Some(-61.0));
//! ```

use crate::traits::RssiReading;

/// Fixed-size circular buffer of RSSI readings
///
/// ## Internal Invariants
///
/// - `write_pos < N`
/// - `len <= N`
/// - Iteration yields readings in arrival order
///
/// ## Thread Safety
///
/// Not synchronized. Each estimator owns its buffer exclusively.
#[derive(Debug, Clone)]
pub struct CircularBuffer<const N: usize> {
    /// Storage, `None` until a slot is first written
    data: [Option<RssiReading>; N],

    /// Index where the next write will occur
    write_pos: usize,

    /// Current number of valid readings
    len: usize,
}

impl<const N: usize> CircularBuffer<N> {
    /// Creates a new empty circular buffer
    pub const fn new() -> Self {
        Self {
            data: [None; N],
            write_pos: 0,
            len: 0,
        }
    }

    /// Adds a reading, overwriting the oldest one when full
    pub fn push(&mut self, reading: RssiReading) {
        if N == 0 {
            return;
        }

        self.data[self.write_pos] = Some(reading);
        self.write_pos = (self.write_pos + 1) % N;

        if self.len < N {
            self.len += 1;
        }
    }

    /// Number of stored readings
    pub fn len(&self) -> usize {
        self.len
    }

    /// Maximum number of readings kept
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Whether no reading is held
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether the next push evicts the oldest reading
    pub fn is_full(&self) -> bool {
        self.len == N
    }

    /// Most recent reading
    pub fn last(&self) -> Option<&RssiReading> {
        if self.is_empty() {
            return None;
        }

        let idx = if self.write_pos == 0 { N - 1 } else { self.write_pos - 1 };
        self.data[idx].as_ref()
    }

    /// Iterate over readings from oldest to newest
    pub fn iter(&self) -> CircularBufferIter<'_, N> {
        CircularBufferIter {
            buffer: self,
            index: 0,
        }
    }

    /// Iterate over the raw RSSI values from oldest to newest
    pub fn rssi_values(&self) -> impl Iterator<Item = f32> + Clone + '_ {
        self.iter().map(|reading| reading.rssi)
    }

    /// Drop all readings
    pub fn clear(&mut self) {
        self.data = [None; N];
        self.write_pos = 0;
        self.len = 0;
    }

    /// Reading at logical `index` (0 = oldest)
    ///
    /// Once full, the oldest reading sits at `write_pos`:
    ///
    /// ```text
    /// Physical:  [D, E, A, B, C]  write_pos = 2
    /// Logical:   [A, B, C, D, E]
    /// logical[i] = physical[(write_pos + i) % N]
    /// ```
    fn get(&self, index: usize) -> Option<&RssiReading> {
        if index >= self.len {
            return None;
        }

        let actual_index = if self.len < N {
            index
        } else {
            (self.write_pos + index) % N
        };

        self.data[actual_index].as_ref()
    }
}

/// Iterator over circular buffer contents
#[derive(Clone)]
pub struct CircularBufferIter<'a, const N: usize> {
    buffer: &'a CircularBuffer<N>,
    index: usize,
}

impl<'a, const N: usize> Iterator for CircularBufferIter<'a, N> {
    type Item = &'a RssiReading;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.buffer.get(self.index)?;
        self.index += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.buffer.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl<'a, const N: usize> ExactSizeIterator for CircularBufferIter<'a, N> {}

impl<const N: usize> Default for CircularBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}
