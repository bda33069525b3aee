//! The arrival window: the single authority on which pending requests a policy may see.

use core::num::NonZeroUsize;
use std::collections::VecDeque;

use log::trace;

use crate::disk::disk_request::Request;

/// How many queued requests a policy may consider at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowSize {
    Unbounded,
    Bounded(NonZeroUsize),
}

impl WindowSize {
    /// Decodes the harness convention: `-1` is unbounded, anything else must be at least 1.
    pub fn from_flag(flag: i64) -> Option<Self> {
        if flag == -1 {
            return Some(WindowSize::Unbounded);
        }
        let size = usize::try_from(flag).ok()?;
        NonZeroUsize::new(size).map(WindowSize::Bounded)
    }
}

/// When a bounded window takes in more of the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowMode {
    /// The next `window` requests become visible once the visible set has drained
    #[default]
    Batch,
    /// The next queued request slides in after every removal
    Sliding,
}

pub struct ArrivalWindow {
    size: WindowSize,
    mode: WindowMode,
    /// Requests the policy may choose from, in queue order
    visible: Vec<Request>,
    /// Admitted requests not yet visible, in queue order
    queued: VecDeque<Request>,
    next_seq: u64,
}

impl ArrivalWindow {
    pub fn new(size: WindowSize, mode: WindowMode) -> Self {
        Self {
            size,
            mode,
            visible: Vec::new(),
            queued: VecDeque::new(),
            next_seq: 0,
        }
    }

    /// Enqueues a request behind everything admitted so far.
    pub fn admit(&mut self, mut request: Request) {
        request.seq = self.next_seq;
        self.next_seq += 1;
        self.queued.push_back(request);
    }

    /// Moves queued requests into view, as the size and mode allow.
    pub fn refill(&mut self) {
        let room = match (self.size, self.mode) {
            (WindowSize::Unbounded, _) => self.queued.len(),
            (WindowSize::Bounded(size), WindowMode::Batch) => {
                if self.visible.is_empty() {
                    size.get()
                } else {
                    0
                }
            }
            (WindowSize::Bounded(size), WindowMode::Sliding) => {
                size.get().saturating_sub(self.visible.len())
            }
        };

        let count = room.min(self.queued.len());
        if count > 0 {
            trace!(
                "window refill: {} request(s) become visible, {} still queued",
                count,
                self.queued.len() - count
            );
            self.visible.extend(self.queued.drain(..count));
        }
    }

    /// Requests a policy may choose from, in queue order.
    pub fn visible(&self) -> &[Request] {
        &self.visible
    }

    /// Takes the request at `index` of [`Self::visible`] out of the window.
    pub fn remove(&mut self, index: usize) -> Request {
        self.visible.remove(index)
    }

    /// Number of admitted requests not yet serviced.
    pub fn pending(&self) -> usize {
        self.visible.len() + self.queued.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending() == 0
    }
}
