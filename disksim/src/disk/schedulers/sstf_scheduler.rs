use crate::disk::disk_request::Request;
use crate::disk::disk_state::DiskState;
use crate::disk::schedulers::scheduler::{cheapest, travel, SchedulingPolicy, Selection};
use crate::disk::timing::TimingEngine;

/// Shortest seek first. Among requests on the nearest track, the one whose sector comes up
/// soonest wins.
pub struct SstfScheduler;

impl SstfScheduler {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SstfScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl SchedulingPolicy for SstfScheduler {
    fn name(&self) -> &'static str {
        "SSTF"
    }

    fn select(
        &mut self,
        visible: &[Request],
        state: &DiskState,
        timing: &TimingEngine,
    ) -> Option<Selection> {
        let nearest = visible
            .iter()
            .map(|r| r.track.abs_diff(state.arm_track))
            .min()?;

        let index = cheapest(
            visible
                .iter()
                .enumerate()
                .filter(|(_, r)| r.track.abs_diff(state.arm_track) == nearest)
                .map(|(i, r)| {
                    #[allow(clippy::cast_precision_loss)]
                    let rotate = timing.estimate(state, r).rotate as f64;
                    (i, rotate)
                }),
        )?;

        Some(Selection {
            index,
            direction: travel(state, &visible[index]),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disk::disk_state::Direction;
    use crate::disk::schedulers::test_support::{engine, state, visible};

    #[test]
    fn test_nearest_track_wins() {
        let engine = engine();
        // Tracks 7, 3, 6 with the arm on 5.
        let requests = visible(&engine, &[90, 40, 75]);
        let mut sstf = SstfScheduler::new();

        let pick = sstf.select(&requests, &state(5, Direction::Down), &engine).unwrap();
        assert_eq!(pick.index, 2);
        assert_eq!(pick.direction, Direction::Up);
    }

    #[test]
    fn test_rotation_breaks_track_ties() {
        let engine = engine();
        // Both on track 0. The head starts at 180 degrees, so sector 8 (225) comes before
        // sector 2 (45).
        let requests = visible(&engine, &[2, 8]);
        let mut sstf = SstfScheduler::new();

        let pick = sstf.select(&requests, &state(0, Direction::Up), &engine).unwrap();
        assert_eq!(pick.index, 1);
        assert_eq!(pick.direction, Direction::Up);
    }
}
