use serde::{Deserialize, Serialize};

use crate::structs::{SquiggleRead, Strand};

/// The sub-range of a strand's event trace that takes part in an
/// alignment, and the direction it is traversed in.
///
/// A stride of -1 walks the trace backwards, which is how complement
/// strand alignments run without copying or reversing the events.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct EventWindow {
    pub event_start: usize,
    pub event_stop: usize,
    pub stride: isize,
}

impl EventWindow {
    pub fn new(event_start: usize, event_stop: usize, stride: isize) -> Self {
        debug_assert!(stride == 1 || stride == -1);
        debug_assert!(if event_stop >= event_start {
            stride == 1
        } else {
            stride == -1
        });

        EventWindow {
            event_start,
            event_stop,
            stride,
        }
    }

    /// The window over `start..=stop` walked in the natural direction.
    pub fn forward(event_start: usize, event_stop: usize) -> Self {
        Self::new(event_start, event_stop, 1)
    }

    pub fn event_count(&self) -> usize {
        if self.event_stop > self.event_start {
            self.event_stop - self.event_start + 1
        } else {
            self.event_start - self.event_stop + 1
        }
    }

    /// The trace index of the `offset`-th event of the window.
    #[inline]
    pub fn event_at(&self, offset: usize) -> usize {
        debug_assert!(offset < self.event_count());
        (self.event_start as isize + offset as isize * self.stride) as usize
    }
}

/// Everything the HMM needs from one read/strand: the read itself, which
/// strand's events and pore model to use, and the event window.
pub struct HmmInput<'a> {
    pub read: &'a SquiggleRead,
    pub strand: Strand,
    pub window: EventWindow,
}

impl<'a> HmmInput<'a> {
    pub fn new(read: &'a SquiggleRead, strand: Strand, window: EventWindow) -> Self {
        HmmInput {
            read,
            strand,
            window,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_window() {
        let window = EventWindow::forward(10, 14);
        assert_eq!(window.event_count(), 5);
        assert_eq!(window.event_at(0), 10);
        assert_eq!(window.event_at(4), 14);
    }

    #[test]
    fn test_reverse_window() {
        let window = EventWindow::new(14, 10, -1);
        assert_eq!(window.event_count(), 5);
        assert_eq!(window.event_at(0), 14);
        assert_eq!(window.event_at(4), 10);
    }

    #[test]
    fn test_single_event_window() {
        let window = EventWindow::forward(3, 3);
        assert_eq!(window.event_count(), 1);
        assert_eq!(window.event_at(0), 3);
    }
}
