//! A simulator for a zoned, constant angular velocity disk.
//!
//! A [`Disk`] services a queue of block requests under one scheduling policy and records how
//! long each request spent seeking, waiting for its sector to rotate under the head, and
//! transferring. Time is counted in whole ticks.
//!
//! ```
//! use disksim::{Disk, DiskConfig, Workload};
//!
//! let mut disk = Disk::new(DiskConfig::default(), Workload::new(vec![3, 34, 18])).unwrap();
//! disk.go();
//! assert_eq!(disk.block_stats()[0], (3, 0, 255, 30, 285));
//! ```

pub mod disk;

pub use disk::config::{Calibration, DiskConfig, HarnessArgs};
pub use disk::disk_error::DiskError;
pub use disk::disk_request::{Arrival, LateRequest, Request, Tick};
pub use disk::disk_state::{Direction, DiskState};
pub use disk::schedulers::{PolicyKind, SchedulingPolicy, Selection, TieBreak};
pub use disk::sim_core::Disk;
pub use disk::stats::{StatRecord, StatTotals, Stats};
pub use disk::timing::{Access, TimingEngine};
pub use disk::window::{ArrivalWindow, WindowMode, WindowSize};
pub use disk::workload::Workload;
pub use disk::zone_table::{BlockAddress, Track, ZoneTable};
