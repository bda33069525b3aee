use crate::disk::disk_error::DiskError;
use crate::disk::zone_table::{BlockAddress, Track, ZoneTable};

/// Simulated time, in ticks.
pub type Tick = u64;

/// A resolved block request waiting for service.
///
/// Two requests for the same address are distinct requests; `seq` tells them apart and orders
/// them by admission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Request {
    pub address: BlockAddress,
    pub track: Track,
    pub sector: u64,
    /// Tick at which the request entered the queue
    pub arrival: Tick,
    /// Admission order ("queue order")
    pub seq: u64,
}

impl Request {
    /// Resolves `address` into a request. Its queue position is assigned on admission.
    pub fn resolve(
        zones: &ZoneTable,
        address: BlockAddress,
        arrival: Tick,
    ) -> Result<Self, DiskError> {
        let (track, sector) = zones.resolve(address)?;
        Ok(Self {
            address,
            track,
            sector,
            arrival,
            seq: 0,
        })
    }
}

/// When a late request joins the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arrival {
    /// Once the clock reaches the given tick
    Tick(Tick),
    /// Once the given number of requests have been dispatched
    Dispatch(usize),
}

/// A request that is not known when the run starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LateRequest {
    pub address: BlockAddress,
    pub arrival: Arrival,
}

impl LateRequest {
    pub fn new(address: BlockAddress, arrival: Arrival) -> Self {
        Self { address, arrival }
    }

    /// Whether the request is due, given the clock and the dispatch count.
    pub fn is_due(&self, clock: Tick, dispatched: usize) -> bool {
        match self.arrival {
            Arrival::Tick(at) => clock >= at,
            Arrival::Dispatch(count) => dispatched >= count,
        }
    }
}
