use core::fmt;

use crate::disk::disk_request::Tick;
use crate::disk::timing::Access;
use crate::disk::zone_table::BlockAddress;

/// Timings of one serviced request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatRecord {
    pub address: BlockAddress,
    pub seek: Tick,
    pub rotate: Tick,
    pub transfer: Tick,
    /// `seek + rotate + transfer`, saturating at `Tick::MAX`
    pub total: Tick,
}

impl StatRecord {
    pub fn new(address: BlockAddress, access: Access) -> Self {
        Self {
            address,
            seek: access.seek,
            rotate: access.rotate,
            transfer: access.transfer,
            total: access.total(),
        }
    }

    /// `(address, seek, rotate, transfer, total)`
    pub fn as_tuple(&self) -> (u64, u64, u64, u64, u64) {
        (self.address, self.seek, self.rotate, self.transfer, self.total)
    }
}

impl fmt::Display for StatRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Block: {:3}  Seek:{:3}  Rotate:{:3}  Transfer:{:3}  Total:{:4}",
            self.address, self.seek, self.rotate, self.transfer, self.total
        )
    }
}

/// Summed timings over a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatTotals {
    pub seek: Tick,
    pub rotate: Tick,
    pub transfer: Tick,
    pub total: Tick,
}

/// Records of a run, in service order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stats {
    records: Vec<StatRecord>,
}

impl Stats {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&mut self, record: StatRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[StatRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Addresses in the order they were serviced.
    pub fn service_order(&self) -> Vec<BlockAddress> {
        self.records.iter().map(|r| r.address).collect()
    }

    pub fn totals(&self) -> StatTotals {
        self.records
            .iter()
            .fold(StatTotals::default(), |acc, r| StatTotals {
                seek: acc.seek.saturating_add(r.seek),
                rotate: acc.rotate.saturating_add(r.rotate),
                transfer: acc.transfer.saturating_add(r.transfer),
                total: acc.total.saturating_add(r.total),
            })
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for record in &self.records {
            writeln!(f, "{}", record)?;
        }
        let totals = self.totals();
        writeln!(
            f,
            "TOTALS      Seek:{:3}  Rotate:{:3}  Transfer:{:3}  Total:{:4}",
            totals.seek, totals.rotate, totals.transfer, totals.total
        )
    }
}
