use crate::disk::disk_request::Request;
use crate::disk::disk_state::{Direction, DiskState};
use crate::disk::schedulers::scheduler::{cheapest, SchedulingPolicy, Selection};
use crate::disk::timing::TimingEngine;

/// How CLOOK orders several visible requests on its target track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieBreak {
    /// Earliest admitted first
    #[default]
    Queue,
    /// Least rotational wait first, then queue order
    Rotational,
}

/// Circular LOOK.
///
/// The arm sweeps in one direction for the whole run. It services the nearest visible track at
/// or beyond its position, and when nothing is left ahead it jumps back to the far end of the
/// visible requests and sweeps on.
pub struct ClookScheduler {
    tie_break: TieBreak,
}

impl ClookScheduler {
    pub fn new(tie_break: TieBreak) -> Self {
        Self { tie_break }
    }

    /// Track the sweep goes to next.
    fn target_track(visible: &[Request], state: &DiskState) -> Option<usize> {
        let tracks = visible.iter().map(|r| r.track);
        let arm = state.arm_track;
        match state.direction {
            Direction::Up => tracks
                .clone()
                .filter(|&t| t >= arm)
                .min()
                .or_else(|| tracks.min()),
            Direction::Down => tracks
                .clone()
                .filter(|&t| t <= arm)
                .max()
                .or_else(|| tracks.max()),
        }
    }
}

impl Default for ClookScheduler {
    fn default() -> Self {
        Self::new(TieBreak::default())
    }
}

impl SchedulingPolicy for ClookScheduler {
    fn name(&self) -> &'static str {
        "CLOOK"
    }

    fn select(
        &mut self,
        visible: &[Request],
        state: &DiskState,
        timing: &TimingEngine,
    ) -> Option<Selection> {
        let target = Self::target_track(visible, state)?;
        let on_target = visible
            .iter()
            .enumerate()
            .filter(|(_, r)| r.track == target);

        let index = match self.tie_break {
            TieBreak::Queue => on_target.map(|(i, _)| i).next(),
            TieBreak::Rotational => cheapest(on_target.map(|(i, r)| {
                #[allow(clippy::cast_precision_loss)]
                let rotate = timing.estimate(state, r).rotate as f64;
                (i, rotate)
            })),
        }?;

        // The wrap-around jump is a return stroke, not a change of sweep direction.
        Some(Selection {
            index,
            direction: state.direction,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disk::schedulers::test_support::{engine, state, visible};

    fn order(tie_break: TieBreak, arm: usize, direction: Direction, addresses: &[u64]) -> Vec<u64> {
        let engine = engine();
        let mut requests = visible(&engine, addresses);
        let mut clook = ClookScheduler::new(tie_break);
        let mut state = state(arm, direction);
        let mut order = Vec::new();

        while let Some(pick) = clook.select(&requests, &state, &engine) {
            let request = requests.remove(pick.index);
            assert_eq!(pick.direction, direction);
            state.arm_track = request.track;
            order.push(request.address);
        }
        order
    }

    #[test]
    fn test_sweeps_up_then_wraps() {
        // Tracks 7, 0, 2, 5, 4 with the arm on 5.
        assert_eq!(
            order(TieBreak::Queue, 5, Direction::Up, &[90, 1, 25, 61, 48]),
            vec![61, 90, 1, 25, 48]
        );
    }

    #[test]
    fn test_sweeps_down_then_wraps() {
        assert_eq!(
            order(TieBreak::Queue, 5, Direction::Down, &[90, 1, 25, 61, 48]),
            vec![61, 48, 25, 1, 90]
        );
    }

    #[test]
    fn test_same_track_in_queue_order() {
        // All on track 0: the head passes 225 degrees (block 8) before 45 (block 2), but queue
        // order decides.
        assert_eq!(
            order(TieBreak::Queue, 0, Direction::Up, &[2, 8]),
            vec![2, 8]
        );
    }

    #[test]
    fn test_same_track_by_rotation() {
        assert_eq!(
            order(TieBreak::Rotational, 0, Direction::Up, &[2, 8]),
            vec![8, 2]
        );
    }

    #[test]
    fn test_empty() {
        let engine = engine();
        let mut clook = ClookScheduler::default();
        assert_eq!(clook.select(&[], &state(0, Direction::Up), &engine), None);
    }
}
