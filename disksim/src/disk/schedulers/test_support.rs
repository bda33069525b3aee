//! Shared fixtures for the policy tests.

use crate::disk::disk_request::Request;
use crate::disk::disk_state::{Direction, DiskState};
use crate::disk::timing::TimingEngine;
use crate::disk::zone_table::ZoneTable;

/// Ten tracks of twelve 30 degree sectors, unit speeds.
pub(super) fn engine() -> TimingEngine {
    let zones = ZoneTable::from_sector_degrees(&[30.0; 10]).unwrap();
    TimingEngine::new(zones, 1.0, 0.0, 40.0)
}

pub(super) fn state(arm_track: usize, direction: Direction) -> DiskState {
    DiskState::new(arm_track, direction, 180.0, 1.0)
}

/// Requests for `addresses`, in queue order.
pub(super) fn visible(engine: &TimingEngine, addresses: &[u64]) -> Vec<Request> {
    addresses
        .iter()
        .enumerate()
        .map(|(seq, &address)| {
            let mut request = Request::resolve(engine.zones(), address, 0).unwrap();
            request.seq = seq as u64;
            request
        })
        .collect()
}
