use core::fmt;
use core::str::FromStr;

use crate::disk::disk_error::DiskError;
use crate::disk::disk_request::Request;
use crate::disk::disk_state::{Direction, DiskState};
use crate::disk::timing::TimingEngine;

/// The request a policy picked, and the scan direction the disk has after servicing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// Index into the visible requests
    pub index: usize,
    pub direction: Direction,
}

/// A strategy choosing the next request to service.
pub trait SchedulingPolicy {
    /// Name of the policy, as accepted by [`PolicyKind::from_str`].
    fn name(&self) -> &'static str;

    /// Picks one of `visible`, which is in queue order.
    ///
    /// Returns `None` only if `visible` is empty. `timing` may be used to estimate accesses;
    /// it never changes `state`.
    fn select(
        &mut self,
        visible: &[Request],
        state: &DiskState,
        timing: &TimingEngine,
    ) -> Option<Selection>;
}

/// Selectable policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyKind {
    /// First come, first served
    Fifo,
    /// Shortest seek time first
    Sstf,
    /// Shortest access (seek + rotation) time first
    Satf,
    /// Circular look
    Clook,
    /// V(R): shortest seek with a penalty for reversing direction. The weight scales the
    /// penalty, not a seek/rotation blend; that is [`PolicyKind::Weighted`].
    Vr,
    /// Weighted blend of seek and rotational cost
    Weighted,
}

impl PolicyKind {
    /// Whether the policy is parameterized by the `r` weight.
    pub fn uses_r_value(self) -> bool {
        matches!(self, PolicyKind::Vr | PolicyKind::Weighted)
    }
}

impl FromStr for PolicyKind {
    type Err = DiskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "FIFO" => Ok(PolicyKind::Fifo),
            "SSTF" => Ok(PolicyKind::Sstf),
            "SATF" => Ok(PolicyKind::Satf),
            "CLOOK" | "C-LOOK" => Ok(PolicyKind::Clook),
            "VR" | "V(R)" => Ok(PolicyKind::Vr),
            "WEIGHTED" => Ok(PolicyKind::Weighted),
            _ => Err(DiskError::config(format!("unknown policy {:?}", s))),
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyKind::Fifo => write!(f, "FIFO"),
            PolicyKind::Sstf => write!(f, "SSTF"),
            PolicyKind::Satf => write!(f, "SATF"),
            PolicyKind::Clook => write!(f, "CLOOK"),
            PolicyKind::Vr => write!(f, "VR"),
            PolicyKind::Weighted => write!(f, "WEIGHTED"),
        }
    }
}

/// Index of the cheapest candidate; the earliest one in queue order wins a tie.
pub(crate) fn cheapest<I>(costs: I) -> Option<usize>
where
    I: IntoIterator<Item = (usize, f64)>,
{
    let mut best: Option<(usize, f64)> = None;
    for (index, cost) in costs {
        match best {
            Some((_, best_cost)) if cost >= best_cost => {}
            _ => best = Some((index, cost)),
        }
    }
    best.map(|(index, _)| index)
}

/// Direction after moving to `target`; unchanged when the arm stays put.
pub(crate) fn travel(state: &DiskState, target: &Request) -> Direction {
    Direction::of_move(state.arm_track, target.track).unwrap_or(state.direction)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_names() {
        assert_eq!("clook".parse::<PolicyKind>(), Ok(PolicyKind::Clook));
        assert_eq!("V(R)".parse::<PolicyKind>(), Ok(PolicyKind::Vr));
        assert_eq!(" SATF ".parse::<PolicyKind>(), Ok(PolicyKind::Satf));
        assert!("ELEVATOR".parse::<PolicyKind>().is_err());
        assert_eq!(PolicyKind::Vr.to_string(), "VR");
    }

    #[test]
    fn test_cheapest_prefers_queue_order() {
        assert_eq!(cheapest(vec![(0, 3.0), (1, 1.0), (2, 1.0)]), Some(1));
        assert_eq!(cheapest(Vec::new()), None);
    }

    #[test]
    fn test_vr_weight_scales_the_reversal_penalty() {
        use crate::disk::disk_state::Direction;
        use crate::disk::schedulers::test_support::{engine, state, visible};
        use crate::disk::schedulers::{new_policy, TieBreak};

        let engine = engine();
        // Track 3 is one track behind the arm, track 7 three ahead.
        let requests = visible(&engine, &[40, 90]);
        let at = state(4, Direction::Up);
        let pick = |kind| {
            new_policy(kind, 1.0, TieBreak::default())
                .select(&requests, &at, &engine)
                .map(|selection| selection.index)
        };

        assert_eq!(pick(PolicyKind::Vr), Some(1));
        assert_eq!(pick(PolicyKind::Weighted), Some(0));
        assert_eq!(pick(PolicyKind::Sstf), Some(0));
    }
}
