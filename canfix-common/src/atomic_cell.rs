//! A small `Copy`-type cell that is safe to share between an interrupt context and the main loop.
//!
//! Built on `critical_section::Mutex` rather than `core::sync::atomic` so it works uniformly
//! across targets that lack native CAS (e.g. thumbv6m), at the cost of a short critical section
//! per access.

use core::cell::Cell;
use critical_section::Mutex;

pub struct AtomicCell<T: Copy> {
    inner: Mutex<Cell<T>>,
}

impl<T: Send + Copy> AtomicCell<T> {
    pub const fn new(value: T) -> Self {
        Self {
            inner: Mutex::new(Cell::new(value)),
        }
    }

    pub fn load(&self) -> T {
        critical_section::with(|cs| self.inner.borrow(cs).get())
    }

    pub fn store(&self, value: T) {
        critical_section::with(|cs| self.inner.borrow(cs).set(value));
    }

    /// Atomically replace the value and return the one that was there before.
    pub fn swap(&self, value: T) -> T {
        critical_section::with(|cs| self.inner.borrow(cs).replace(value))
    }
}

impl<T: Send + Copy + Default> AtomicCell<T> {
    /// Replace the stored value with its default, returning the previous one.
    pub fn take(&self) -> T {
        critical_section::with(|cs| self.inner.borrow(cs).take())
    }
}

impl<T: Default + Copy + Send> Default for AtomicCell<T> {
    fn default() -> Self {
        Self {
            inner: Mutex::new(Cell::new(T::default())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_and_load_round_trip() {
        let cell = AtomicCell::new(3u8);
        assert_eq!(cell.load(), 3);
        cell.store(7);
        assert_eq!(cell.load(), 7);
    }

    #[test]
    fn take_resets_to_default() {
        let cell: AtomicCell<Option<u8>> = AtomicCell::new(Some(5));
        assert_eq!(cell.take(), Some(5));
        assert_eq!(cell.load(), None);
    }

    #[test]
    fn swap_returns_previous_value() {
        let cell = AtomicCell::new(1u8);
        assert_eq!(cell.swap(2), 1);
        assert_eq!(cell.load(), 2);
    }
}
