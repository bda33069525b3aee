use crate::disk::disk_request::Request;
use crate::disk::disk_state::DiskState;
use crate::disk::schedulers::scheduler::{travel, SchedulingPolicy, Selection};
use crate::disk::timing::TimingEngine;

/// A FIFO policy that contains no scheduling logic.
pub struct FifoScheduler;

impl FifoScheduler {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FifoScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl SchedulingPolicy for FifoScheduler {
    fn name(&self) -> &'static str {
        "FIFO"
    }

    fn select(
        &mut self,
        visible: &[Request],
        state: &DiskState,
        _timing: &TimingEngine,
    ) -> Option<Selection> {
        let first = visible.first()?;
        Some(Selection {
            index: 0,
            direction: travel(state, first),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disk::disk_state::Direction;
    use crate::disk::schedulers::test_support::{engine, state, visible};

    #[test]
    fn test_takes_head_of_queue() {
        let engine = engine();
        let requests = visible(&engine, &[90, 3, 40]);
        let mut fifo = FifoScheduler::new();

        let pick = fifo.select(&requests, &state(4, Direction::Up), &engine).unwrap();
        assert_eq!(pick.index, 0);
        assert_eq!(pick.direction, Direction::Up);

        assert_eq!(fifo.select(&[], &state(4, Direction::Up), &engine), None);
    }
}
