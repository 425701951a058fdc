use std::cmp::Ordering;
use std::collections::BinaryHeap;

// Heap entry ordered by (due, seq); seq keeps equal deadlines FIFO.
struct Entry<T> {
    due_ms: f64,
    seq: u64,
    item: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.due_ms.to_bits() == other.due_ms.to_bits() && self.seq == other.seq
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// BinaryHeap is a max-heap, so the ordering is reversed.
impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.due_ms
            .total_cmp(&other.due_ms)
            .then(self.seq.cmp(&other.seq))
            .reverse()
    }
}

/// Delayed, fire-once callbacks keyed by an absolute millisecond clock.
///
/// Nothing runs by itself: the owner calls [`Timeline::pop_due`] from
/// its frame loop and dispatches what comes out, so timing is only as
/// precise as the frame rate.
pub struct Timeline<T> {
    heap: BinaryHeap<Entry<T>>,
    next_seq: u64,
}

impl<T> Default for Timeline<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Timeline<T> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    pub fn schedule_at(&mut self, due_ms: f64, item: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry { due_ms, seq, item });
    }

    pub fn schedule_after(&mut self, now_ms: f64, delay_ms: u32, item: T) {
        self.schedule_at(now_ms + delay_ms as f64, item);
    }

    /// Remove the earliest item due at or before `now_ms`.
    /// Returns `(due_ms, item)` so callers can reschedule relative to the
    /// nominal deadline rather than the late frame that noticed it.
    pub fn pop_due(&mut self, now_ms: f64) -> Option<(f64, T)> {
        if self.heap.peek()?.due_ms > now_ms {
            return None;
        }
        self.heap.pop().map(|e| (e.due_ms, e.item))
    }

    pub fn next_due(&self) -> Option<f64> {
        self.heap.peek().map(|e| e.due_ms)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Iterate pending items in no particular order.
    pub fn pending(&self) -> impl Iterator<Item = &T> {
        self.heap.iter().map(|e| &e.item)
    }
}
