//! A bounded FIFO of received frames, used to hand frames from an interrupt-time receiver to a
//! main-loop dispatcher without an allocator.
//!
//! Capacity is fixed at the type level via a const generic, the way `heapless` collections and
//! the teacher crate's own fixed-size arrays are sized. Internally the bookkeeping is guarded by
//! a single `critical_section::Mutex`, so [`RingQueue::push`] is safe to call from an interrupt
//! handler while [`RingQueue::pop`] runs in the main loop.

use core::cell::RefCell;
use critical_section::Mutex;
use defmt_or_log::warn;

use canfix_common::Frame;

/// The result of a successful or overflowing [`RingQueue::push`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    /// The frame was stored without displacing anything.
    Queued,
    /// The queue was full; the oldest frame was evicted to make room.
    Overflow,
}

struct Inner<const N: usize> {
    buf: [Frame; N],
    head: usize,
    tail: usize,
    count: usize,
}

impl<const N: usize> Inner<N> {
    const fn new() -> Self {
        Self {
            buf: [Frame::zeroed(); N],
            head: 0,
            tail: 0,
            count: 0,
        }
    }

    fn push(&mut self, frame: Frame) -> PushOutcome {
        self.buf[self.head] = frame;
        self.head = (self.head + 1) % N;
        if self.count == N {
            // Full: the slot we just overwrote was the oldest entry, so tail must follow head.
            self.tail = (self.tail + 1) % N;
            warn!("ring queue full at capacity {}; oldest frame dropped", N);
            PushOutcome::Overflow
        } else {
            self.count += 1;
            PushOutcome::Queued
        }
    }

    fn pop(&mut self) -> Option<Frame> {
        if self.count == 0 {
            return None;
        }
        let frame = self.buf[self.tail];
        self.tail = (self.tail + 1) % N;
        self.count -= 1;
        Some(frame)
    }

    fn len(&self) -> usize {
        self.count
    }
}

/// A bounded ring buffer of [`Frame`]s with overwrite-oldest-on-full semantics.
pub struct RingQueue<const N: usize> {
    inner: Mutex<RefCell<Inner<N>>>,
}

impl<const N: usize> Default for RingQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> RingQueue<N> {
    /// Create an empty queue. `N` must be at least 1.
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Inner::new())),
        }
    }

    /// Push a frame onto the queue.
    ///
    /// If the queue is full, the oldest frame is silently dropped to make room and
    /// [`PushOutcome::Overflow`] is returned so the caller can count drops.
    pub fn push(&self, frame: Frame) -> PushOutcome {
        critical_section::with(|cs| self.inner.borrow(cs).borrow_mut().push(frame))
    }

    /// Pop the oldest queued frame, if any.
    pub fn pop(&self) -> Option<Frame> {
        critical_section::with(|cs| self.inner.borrow(cs).borrow_mut().pop())
    }

    /// The number of frames currently queued.
    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().len())
    }

    /// True if no frames are queued.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The maximum number of frames this queue can hold.
    pub const fn capacity(&self) -> usize {
        N
    }
}
