mod clook_scheduler;
mod fifo_scheduler;
mod satf_scheduler;
mod scheduler;
mod sstf_scheduler;
mod vr_scheduler;
mod weighted_scheduler;

#[cfg(test)]
mod test_support;

pub use clook_scheduler::{ClookScheduler, TieBreak};
pub use fifo_scheduler::FifoScheduler;
pub use satf_scheduler::SatfScheduler;
pub use scheduler::{PolicyKind, SchedulingPolicy, Selection};
pub use sstf_scheduler::SstfScheduler;
pub use vr_scheduler::VrScheduler;
pub use weighted_scheduler::WeightedScheduler;

/// Builds the policy for a run. `r` is only read by the policies that take it.
pub fn new_policy(
    kind: PolicyKind,
    r: f64,
    tie_break: TieBreak,
) -> Box<dyn SchedulingPolicy + Send> {
    match kind {
        PolicyKind::Fifo => Box::new(FifoScheduler::new()),
        PolicyKind::Sstf => Box::new(SstfScheduler::new()),
        PolicyKind::Satf => Box::new(SatfScheduler::new()),
        PolicyKind::Clook => Box::new(ClookScheduler::new(tie_break)),
        PolicyKind::Vr => Box::new(VrScheduler::new(r)),
        PolicyKind::Weighted => Box::new(WeightedScheduler::new(r)),
    }
}
