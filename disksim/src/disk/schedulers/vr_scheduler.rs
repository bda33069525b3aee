use crate::disk::disk_request::Request;
use crate::disk::disk_state::{Direction, DiskState};
use crate::disk::schedulers::scheduler::{cheapest, travel, SchedulingPolicy, Selection};
use crate::disk::timing::TimingEngine;

/// V(R): shortest seek distance, where turning the arm around costs an extra `r` times the
/// number of tracks.
///
/// `r = 0` is plain SSTF and `r = 1` behaves like SCAN.
pub struct VrScheduler {
    r: f64,
}

impl VrScheduler {
    pub fn new(r: f64) -> Self {
        Self { r }
    }

    fn cost(&self, request: &Request, state: &DiskState, num_tracks: usize) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let distance = request.track.abs_diff(state.arm_track) as f64;
        let reversal = Direction::of_move(state.arm_track, request.track)
            == Some(state.direction.reversed());
        if reversal {
            #[allow(clippy::cast_precision_loss)]
            let penalty = self.r * num_tracks as f64;
            distance + penalty
        } else {
            distance
        }
    }
}

impl SchedulingPolicy for VrScheduler {
    fn name(&self) -> &'static str {
        "VR"
    }

    fn select(
        &mut self,
        visible: &[Request],
        state: &DiskState,
        timing: &TimingEngine,
    ) -> Option<Selection> {
        let num_tracks = timing.zones().num_tracks();
        let index = cheapest(
            visible
                .iter()
                .enumerate()
                .map(|(i, r)| (i, self.cost(r, state, num_tracks))),
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
    use crate::disk::schedulers::test_support::{engine, state, visible};

    #[test]
    fn test_reversal_is_penalized() {
        let engine = engine();
        // Track 3 is one track behind, track 7 two ahead.
        let requests = visible(&engine, &[40, 90]);

        let mut sstf_like = VrScheduler::new(0.0);
        let pick = sstf_like
            .select(&requests, &state(4, Direction::Up), &engine)
            .unwrap();
        assert_eq!(pick.index, 0);
        assert_eq!(pick.direction, Direction::Down);

        // 1 + 0.3 * 10 tracks outweighs 3.
        let mut vr = VrScheduler::new(0.3);
        let pick = vr.select(&requests, &state(4, Direction::Up), &engine).unwrap();
        assert_eq!(pick.index, 1);
        assert_eq!(pick.direction, Direction::Up);
    }

    #[test]
    fn test_staying_keeps_direction() {
        let engine = engine();
        let requests = visible(&engine, &[50, 40]);
        let mut vr = VrScheduler::new(0.3);

        let pick = vr.select(&requests, &state(4, Direction::Down), &engine).unwrap();
        assert_eq!(pick.index, 0);
        assert_eq!(pick.direction, Direction::Down);
    }
}
