use crate::disk::disk_request::Request;
use crate::disk::disk_state::DiskState;
use crate::disk::schedulers::scheduler::{cheapest, travel, SchedulingPolicy, Selection};
use crate::disk::timing::TimingEngine;

/// Blends the two costs of an access: `r * seek + (1 - r) * rotate`, both in ticks.
///
/// `r = 1` only looks at seek time, `r = 0` only at rotational latency. Ties go to the earliest
/// admitted request.
pub struct WeightedScheduler {
    r: f64,
}

impl WeightedScheduler {
    pub fn new(r: f64) -> Self {
        Self { r }
    }
}

impl SchedulingPolicy for WeightedScheduler {
    fn name(&self) -> &'static str {
        "WEIGHTED"
    }

    fn select(
        &mut self,
        visible: &[Request],
        state: &DiskState,
        timing: &TimingEngine,
    ) -> Option<Selection> {
        let index = cheapest(visible.iter().enumerate().map(|(i, request)| {
            let access = timing.estimate(state, request);
            #[allow(clippy::cast_precision_loss)]
            let cost = self.r * access.seek as f64 + (1.0 - self.r) * access.rotate as f64;
            (i, cost)
        }))?;

        Some(Selection {
            index,
            direction: travel(state, &visible[index]),
        })
    }
}
