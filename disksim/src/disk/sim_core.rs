use log::{debug, info, trace, warn};

use crate::disk::config::{DiskConfig, HarnessArgs};
use crate::disk::disk_error::DiskError;
use crate::disk::disk_request::{Arrival, LateRequest, Request, Tick};
use crate::disk::disk_state::DiskState;
use crate::disk::schedulers::{new_policy, SchedulingPolicy};
use crate::disk::stats::Stats;
use crate::disk::timing::TimingEngine;
use crate::disk::window::ArrivalWindow;
use crate::disk::workload::Workload;

/// A late request, resolved up front so that a bad address fails construction.
struct PendingArrival {
    late: LateRequest,
    request: Request,
}

impl PendingArrival {
    /// The tick the request joins the queue at, given the clock when it is admitted.
    fn arrival_tick(&self, clock: Tick) -> Tick {
        match self.late.arrival {
            Arrival::Tick(tick) => tick,
            Arrival::Dispatch(_) => clock,
        }
    }
}

/// One simulated disk and its workload.
///
/// A `Disk` owns everything a run touches, so independent disks may run on separate threads.
pub struct Disk {
    config: DiskConfig,
    timing: TimingEngine,
    policy: Box<dyn SchedulingPolicy + Send>,
    state: DiskState,
    window: ArrivalWindow,
    /// Late requests not yet admitted, in list order
    late: Vec<PendingArrival>,
    stats: Stats,
    dispatched: usize,
    finished: bool,
}

impl Disk {
    /// Validates `config` and resolves every request of `workload`.
    pub fn new(config: DiskConfig, workload: Workload) -> Result<Self, DiskError> {
        let zones = config.zone_table()?;
        let timing = TimingEngine::new(
            zones,
            config.seek_speed,
            config.skew,
            config.calibration.track_spacing,
        );

        let mut window = ArrivalWindow::new(config.window, config.window_mode);
        for &address in &workload.requests {
            window.admit(Request::resolve(timing.zones(), address, 0)?);
        }

        let late = workload
            .late
            .iter()
            .map(|&late| {
                Ok(PendingArrival {
                    late,
                    request: Request::resolve(timing.zones(), late.address, 0)?,
                })
            })
            .collect::<Result<Vec<_>, DiskError>>()?;

        let state = DiskState::new(
            config.arm_track,
            config.initial_dir,
            config.calibration.initial_angle,
            config.rotate_speed,
        );
        let policy = new_policy(config.policy, config.r_value, config.tie_break);

        Ok(Self {
            config,
            timing,
            policy,
            state,
            window,
            late,
            stats: Stats::new(),
            dispatched: 0,
            finished: false,
        })
    }

    /// Builds a disk from the harness inputs.
    pub fn from_args(args: &HarnessArgs) -> Result<Self, DiskError> {
        let config = DiskConfig::from_args(args)?;
        let capacity = config.zone_table()?.capacity();
        let workload = Workload::from_args(args, capacity)?;
        Self::new(config, workload)
    }

    /// Services every request, initial and late. Calling it again after the run has finished
    /// does nothing.
    pub fn go(&mut self) {
        if self.finished {
            return;
        }
        info!(
            "disk run starting: {} request(s) queued, {} late, {}",
            self.window.pending(),
            self.late.len(),
            self.config
        );

        loop {
            self.admit_due();
            self.window.refill();

            if self.window.is_empty() {
                if self.late.is_empty() {
                    break;
                }
                self.idle_until_next_arrival();
                continue;
            }

            let visible = self.window.visible();
            let Some(selection) = self.policy.select(visible, &self.state, &self.timing) else {
                break;
            };
            let request = self.window.remove(selection.index);
            let record = self
                .timing
                .service(&mut self.state, &request, selection.direction);
            debug!(
                "{} dispatch {}: block {} (track {}, sector {}) seek {} rotate {} transfer {}, clock {}",
                self.policy.name(),
                self.dispatched,
                request.address,
                request.track,
                request.sector,
                record.seek,
                record.rotate,
                record.transfer,
                self.state.clock
            );

            self.stats.record(record);
            self.dispatched += 1;
        }

        self.finished = true;
        let totals = self.stats.totals();
        info!(
            "disk run finished: {} request(s) in {} ticks (seek {}, rotate {}, transfer {})",
            self.stats.len(),
            totals.total,
            totals.seek,
            totals.rotate,
            totals.transfer
        );
    }

    /// Moves every late request that is due into the queue, earliest arrival first. Requests
    /// arriving on the same tick keep their list order.
    fn admit_due(&mut self) {
        let clock = self.state.clock;
        let dispatched = self.dispatched;
        let (mut due, waiting): (Vec<_>, Vec<_>) = self
            .late
            .drain(..)
            .partition(|pending| pending.late.is_due(clock, dispatched));
        self.late = waiting;

        due.sort_by_key(|pending| pending.arrival_tick(clock));
        for pending in due {
            self.admit_late(pending);
        }
    }

    fn admit_late(&mut self, pending: PendingArrival) {
        let mut request = pending.request;
        request.arrival = pending.arrival_tick(self.state.clock);
        trace!(
            "late block {} admitted at tick {} ({:?})",
            request.address,
            self.state.clock,
            pending.late.arrival
        );
        self.window.admit(request);
    }

    /// Nothing is queued but late requests remain: let the disk sit until the earliest of them
    /// arrives.
    fn idle_until_next_arrival(&mut self) {
        // A count-triggered arrival can no longer be reached by dispatching, so it goes first.
        let next = self
            .late
            .iter()
            .position(|pending| matches!(pending.late.arrival, Arrival::Dispatch(_)))
            .or_else(|| {
                self.late
                    .iter()
                    .enumerate()
                    .min_by_key(|(_, pending)| match pending.late.arrival {
                        Arrival::Tick(tick) => tick,
                        Arrival::Dispatch(_) => 0,
                    })
                    .map(|(i, _)| i)
            });
        let Some(next) = next else {
            return;
        };

        let pending = self.late.remove(next);
        if let Arrival::Tick(tick) = pending.late.arrival {
            self.state.clock = self.state.clock.max(tick);
        }
        warn!(
            "disk idle: nothing queued, waiting until tick {} for late block {}",
            self.state.clock, pending.late.address
        );
        self.admit_late(pending);
    }

    pub fn config(&self) -> &DiskConfig {
        &self.config
    }

    pub fn state(&self) -> &DiskState {
        &self.state
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// `(address, seek, rotate, transfer, total)` per serviced request, in service order.
    pub fn block_stats(&self) -> Vec<(u64, u64, u64, u64, u64)> {
        self.stats.records().iter().map(|r| r.as_tuple()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disk::disk_state::Direction;
    use crate::disk::schedulers::PolicyKind;
    use crate::disk::window::WindowSize;

    fn run(config: DiskConfig, workload: Workload) -> Disk {
        let mut disk = Disk::new(config, workload).unwrap();
        disk.go();
        disk
    }

    #[test]
    fn test_default_clook_run() {
        let disk = run(
            DiskConfig::default(),
            Workload::new(vec![3, 34, 18, 17, 1, 30, 19]),
        );
        assert_eq!(disk.stats().service_order(), vec![3, 1, 18, 17, 19, 34, 30]);
        assert_eq!(disk.block_stats()[0], (3, 0, 255, 30, 285));
        assert_eq!(disk.state().clock, disk.stats().totals().total);
        assert_eq!(disk.state().arm_track, 2);
    }

    #[test]
    fn test_empty_workload() {
        let disk = run(DiskConfig::default(), Workload::default());
        assert!(disk.stats().is_empty());
        assert_eq!(disk.state().clock, 0);
    }

    #[test]
    fn test_go_twice_is_a_no_op() {
        let mut disk = Disk::new(DiskConfig::default(), Workload::new(vec![3, 1])).unwrap();
        disk.go();
        let first = disk.block_stats();
        disk.go();
        assert_eq!(disk.block_stats(), first);
    }

    #[test]
    fn test_invalid_address_fails_construction() {
        let err = Disk::new(DiskConfig::default(), Workload::new(vec![3, 36])).err();
        assert_eq!(
            err,
            Some(DiskError::InvalidAddress {
                address: 36,
                capacity: 36
            })
        );

        let late =
            Workload::new(vec![3]).with_late(vec![LateRequest::new(99, Arrival::Dispatch(1))]);
        assert!(Disk::new(DiskConfig::default(), late).is_err());
    }

    #[test]
    fn test_late_arrival_after_dispatch() {
        let config = DiskConfig {
            policy: PolicyKind::Fifo,
            ..DiskConfig::default()
        };
        let workload = Workload::new(vec![30, 18])
            .with_late(vec![LateRequest::new(1, Arrival::Dispatch(1))]);
        let disk = run(config, workload);

        // Block 1 joins the queue behind 18 once 30 has been dispatched.
        assert_eq!(disk.stats().service_order(), vec![30, 18, 1]);
    }

    #[test]
    fn test_idle_until_late_tick() {
        let config = DiskConfig {
            policy: PolicyKind::Fifo,
            ..DiskConfig::default()
        };
        let workload = Workload::new(vec![3])
            .with_late(vec![LateRequest::new(4, Arrival::Tick(1_000))]);
        let disk = run(config, workload);

        assert_eq!(disk.stats().service_order(), vec![3, 4]);
        // The head is at 180 + 1000 = 1180 = 100 degrees when block 4 (105..135) arrives.
        assert_eq!(disk.block_stats()[1], (4, 0, 5, 30, 35));
        assert_eq!(disk.state().clock, 1_035);
    }

    #[test]
    fn test_from_args() {
        let args = HarnessArgs {
            addr: String::from("30,18,13,17,1,16"),
            window: 3,
            ..HarnessArgs::default()
        };
        let mut disk = Disk::from_args(&args).unwrap();
        assert_eq!(
            disk.config().window,
            WindowSize::from_flag(3).unwrap()
        );
        assert_eq!(disk.config().initial_dir, Direction::Up);

        disk.go();
        assert_eq!(disk.stats().service_order(), vec![18, 13, 30, 1, 17, 16]);
    }

    #[test]
    fn test_independent_runs_on_threads() {
        fn assert_send<T: Send>() {}
        assert_send::<Disk>();

        let handles: Vec<_> = (0..4)
            .map(|seed| {
                std::thread::spawn(move || {
                    let args = HarnessArgs {
                        addr_desc: String::from("20,-1,0"),
                        seed,
                        ..HarnessArgs::default()
                    };
                    let mut disk = Disk::from_args(&args).unwrap();
                    disk.go();
                    disk.block_stats()
                })
            })
            .collect();

        for (seed, handle) in handles.into_iter().enumerate() {
            let stats = handle.join().unwrap();
            let args = HarnessArgs {
                addr_desc: String::from("20,-1,0"),
                seed: seed as u64,
                ..HarnessArgs::default()
            };
            let mut disk = Disk::from_args(&args).unwrap();
            disk.go();
            assert_eq!(stats, disk.block_stats());
        }
    }

    #[test]
    fn test_late_arrivals_join_in_tick_order() {
        let config = DiskConfig {
            policy: PolicyKind::Fifo,
            ..DiskConfig::default()
        };
        // Both are due once block 3 finishes at tick 285.
        let workload = Workload::new(vec![3]).with_late(vec![
            LateRequest::new(9, Arrival::Tick(250)),
            LateRequest::new(7, Arrival::Tick(100)),
        ]);
        let disk = run(config, workload);
        assert_eq!(disk.stats().service_order(), vec![3, 7, 9]);
    }

    #[test]
    fn test_late_requests_keep_their_arrival_tick() {
        let workload = Workload::new(Vec::new()).with_late(vec![
            LateRequest::new(9, Arrival::Tick(250)),
            LateRequest::new(5, Arrival::Dispatch(0)),
            LateRequest::new(7, Arrival::Tick(100)),
            LateRequest::new(8, Arrival::Tick(100)),
        ]);
        let mut disk = Disk::new(DiskConfig::default(), workload).unwrap();
        disk.state.clock = 300;
        disk.admit_due();
        disk.window.refill();

        let queued: Vec<(u64, Tick)> = disk
            .window
            .visible()
            .iter()
            .map(|r| (r.address, r.arrival))
            .collect();
        assert_eq!(queued, vec![(7, 100), (8, 100), (9, 250), (5, 300)]);
    }

    #[test]
    fn test_crawling_arm_finishes() {
        let config = DiskConfig {
            policy: PolicyKind::Fifo,
            seek_speed: 1e-18,
            ..DiskConfig::default()
        };
        let disk = run(config, Workload::new(vec![3, 20]));

        assert_eq!(disk.block_stats()[0], (3, 0, 255, 30, 285));
        assert_eq!(disk.block_stats()[1].1, Tick::MAX);
        assert_eq!(disk.state().clock, Tick::MAX);
        assert_eq!(disk.stats().totals().total, Tick::MAX);
    }
}
