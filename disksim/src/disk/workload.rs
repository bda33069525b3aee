//! The requests of one run, before any of them is resolved against the disk.

use log::trace;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::disk::config::HarnessArgs;
use crate::disk::descriptor::{
    parse_address_list, parse_late_list, AddressList, LateList, RandomDescriptor,
};
use crate::disk::disk_error::DiskError;
use crate::disk::disk_request::{Arrival, LateRequest};
use crate::disk::zone_table::BlockAddress;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Workload {
    /// Requests queued when the run starts, in queue order
    pub requests: Vec<BlockAddress>,
    /// Requests joining the queue during the run
    pub late: Vec<LateRequest>,
}

impl Workload {
    pub fn new(requests: Vec<BlockAddress>) -> Self {
        Self {
            requests,
            late: Vec::new(),
        }
    }

    pub fn with_late(mut self, late: Vec<LateRequest>) -> Self {
        self.late = late;
        self
    }

    /// Number of requests the run will service.
    pub fn len(&self) -> usize {
        self.requests.len() + self.late.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Builds the workload from the harness address lists, generating the ones given as `-1`.
    ///
    /// Generation draws from a generator seeded with `args.seed`, initial addresses first, so
    /// the same arguments always give the same workload.
    pub fn from_args(args: &HarnessArgs, capacity: u64) -> Result<Self, DiskError> {
        let mut rng = StdRng::seed_from_u64(args.seed);

        let requests = match parse_address_list(&args.addr)? {
            AddressList::Explicit(addresses) => addresses
                .into_iter()
                .map(|address| block_address(address, capacity))
                .collect::<Result<Vec<_>, _>>()?,
            AddressList::Generate => {
                let descriptor = RandomDescriptor::parse("address", &args.addr_desc)?;
                generate(&descriptor, capacity, &mut rng)?
            }
        };

        // A late address without a tick joins the queue once the request at its own position
        // has been dispatched.
        let late = match parse_late_list(&args.late_addr)? {
            LateList::Explicit(entries) => entries
                .into_iter()
                .enumerate()
                .map(|(i, entry)| {
                    let arrival = match entry.tick {
                        Some(tick) => Arrival::Tick(tick),
                        None => Arrival::Dispatch(i + 1),
                    };
                    Ok(LateRequest::new(block_address(entry.address, capacity)?, arrival))
                })
                .collect::<Result<Vec<_>, DiskError>>()?,
            LateList::Generate => {
                let descriptor = RandomDescriptor::parse("late address", &args.late_addr_desc)?;
                generate(&descriptor, capacity, &mut rng)?
                    .into_iter()
                    .enumerate()
                    .map(|(i, address)| LateRequest::new(address, Arrival::Dispatch(i + 1)))
                    .collect()
            }
        };

        Ok(Workload { requests, late })
    }
}

fn block_address(address: i64, capacity: u64) -> Result<BlockAddress, DiskError> {
    u64::try_from(address).map_err(|_| DiskError::InvalidAddress { address, capacity })
}

/// Draws `descriptor.count` addresses uniformly from `[min, max]`.
pub fn generate<R: Rng>(
    descriptor: &RandomDescriptor,
    capacity: u64,
    rng: &mut R,
) -> Result<Vec<BlockAddress>, DiskError> {
    if descriptor.count == 0 {
        return Ok(Vec::new());
    }
    let last = capacity
        .checked_sub(1)
        .ok_or_else(|| DiskError::config("the disk holds no blocks"))?;

    let max = if descriptor.max == -1 {
        last
    } else {
        block_address(descriptor.max, capacity)?
    };
    let min = block_address(descriptor.min, capacity)?;
    if max > last {
        return Err(DiskError::InvalidAddress {
            address: descriptor.max,
            capacity,
        });
    }
    if min > max {
        return Err(DiskError::Descriptor {
            field: "address",
            input: format!("{},{},{}", descriptor.count, descriptor.max, descriptor.min),
            reason: format!("min {min} is above max {max}"),
        });
    }

    let addresses: Vec<BlockAddress> = (0..descriptor.count)
        .map(|_| rng.gen_range(min..=max))
        .collect();
    trace!("generated {} address(es) in [{}, {}]", addresses.len(), min, max);
    Ok(addresses)
}
