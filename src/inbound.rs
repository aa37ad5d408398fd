//! Inbound byte queue shared with the bus collaborator.
//!
//! The bus side appends already-framed bytes from its own interrupt context,
//! the command pipeline drains them in FIFO order and the timeout guard may
//! flush them. Built on `critical-section` and `heapless::Deque`, so every
//! operation is interrupt safe.

use core::cell::RefCell;
use core::fmt;

use critical_section::Mutex;
use heapless::Deque;

use crate::color::Rgb;

/// Number of bytes in one command message (R, G, B).
pub const MESSAGE_LEN: usize = 3;

/// One command message: raw 8-bit intensities, positionally R, G, B.
pub type Message = Rgb;

/// Error returned when the bus collaborator pushes into a full queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrySendError(pub u8);

impl fmt::Display for TrySendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "inbound queue full, dropped byte {:#04x}", self.0)
    }
}

/// Contract the core consumes from the bus collaborator.
pub trait ByteQueue {
    /// Exact number of bytes currently buffered.
    fn buffered(&self) -> usize;

    /// Dequeue the oldest byte.
    ///
    /// Callers check [`ByteQueue::buffered`] first; `None` on an empty queue
    /// means that check was skipped.
    fn receive(&self) -> Option<u8>;

    /// Discard everything buffered, returning how many bytes were dropped.
    fn flush(&self) -> usize;

    /// Discard everything buffered, but only if exactly `observed` bytes are
    /// still buffered. Returns the number dropped, or `None` when the count
    /// changed and nothing was discarded.
    ///
    /// The check and the flush happen as one step.
    fn flush_if_buffered(&self, observed: usize) -> Option<usize>;

    /// Dequeue exactly one message, or nothing when fewer than
    /// [`MESSAGE_LEN`] bytes are buffered.
    ///
    /// Must be atomic with respect to [`ByteQueue::flush`]: a message is
    /// consumed as a unit or not at all.
    fn take_message(&self) -> Option<Message>;
}

/// A bounded, interrupt-safe byte queue.
pub struct InboundQueue<const SIZE: usize> {
    inner: Mutex<RefCell<Deque<u8, SIZE>>>,
}

impl<const SIZE: usize> InboundQueue<SIZE> {
    /// Create a new empty queue.
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Get a sender handle for the bus collaborator.
    pub const fn sender(&self) -> ByteSender<'_, SIZE> {
        ByteSender { queue: self }
    }

    /// Append one byte.
    ///
    /// Returns `Err(TrySendError(byte))` if the queue is full.
    pub fn try_send(&self, byte: u8) -> Result<(), TrySendError> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.push_back(byte).map_err(TrySendError)
        })
    }
}

impl<const SIZE: usize> Default for InboundQueue<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const SIZE: usize> ByteQueue for InboundQueue<SIZE> {
    fn buffered(&self) -> usize {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().len())
    }

    fn receive(&self) -> Option<u8> {
        critical_section::with(|cs| self.inner.borrow(cs).borrow_mut().pop_front())
    }

    fn flush(&self) -> usize {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            let dropped = queue.len();
            queue.clear();
            dropped
        })
    }

    fn flush_if_buffered(&self, observed: usize) -> Option<usize> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            if queue.len() != observed {
                return None;
            }
            queue.clear();
            Some(observed)
        })
    }

    fn take_message(&self) -> Option<Message> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            if queue.len() < MESSAGE_LEN {
                return None;
            }
            let r = queue.pop_front()?;
            let g = queue.pop_front()?;
            let b = queue.pop_front()?;
            Some(Rgb::new(r, g, b))
        })
    }
}

/// A sender handle for an [`InboundQueue`].
///
/// This is a lightweight reference that can be copied into the bus driver.
#[derive(Clone, Copy)]
pub struct ByteSender<'a, const SIZE: usize> {
    queue: &'a InboundQueue<SIZE>,
}

impl<const SIZE: usize> ByteSender<'_, SIZE> {
    /// Append one byte.
    pub fn try_send(&self, byte: u8) -> Result<(), TrySendError> {
        self.queue.try_send(byte)
    }

    /// Append a burst of bytes, stopping at the first one that does not fit.
    pub fn try_send_all(&self, bytes: &[u8]) -> Result<(), TrySendError> {
        bytes.iter().try_for_each(|&byte| self.queue.try_send(byte))
    }
}
