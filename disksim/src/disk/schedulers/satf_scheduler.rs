use crate::disk::disk_request::Request;
use crate::disk::disk_state::DiskState;
use crate::disk::schedulers::scheduler::{cheapest, travel, SchedulingPolicy, Selection};
use crate::disk::timing::TimingEngine;

/// Shortest access time first: the least seek plus rotation, whatever the track.
pub struct SatfScheduler;

impl SatfScheduler {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SatfScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl SchedulingPolicy for SatfScheduler {
    fn name(&self) -> &'static str {
        "SATF"
    }

    fn select(
        &mut self,
        visible: &[Request],
        state: &DiskState,
        timing: &TimingEngine,
    ) -> Option<Selection> {
        let index = cheapest(visible.iter().enumerate().map(|(i, r)| {
            let access = timing.estimate(state, r);
            #[allow(clippy::cast_precision_loss)]
            let cost = (access.seek + access.rotate) as f64;
            (i, cost)
        }))?;

        Some(Selection {
            index,
            direction: travel(state, &visible[index]),
        })
    }
}
