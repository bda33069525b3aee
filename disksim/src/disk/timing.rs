//! Physical timing model.
//!
//! Time advances in whole ticks. During one tick the platter turns `rotate_speed` degrees and
//! the arm travels `seek_speed` distance units, tracks being `track_spacing` units apart. A
//! sector boundary counts as reached on the tick whose sweep `[phase, phase + rotate_speed)`
//! covers it.
//!
//! Clock arithmetic saturates at `Tick::MAX`, which very slow arms or platters can reach.

use crate::disk::disk_request::{Request, Tick};
use crate::disk::disk_state::{Direction, DiskState};
use crate::disk::stats::StatRecord;
use crate::disk::zone_table::{Track, ZoneTable, DEGREES_PER_REVOLUTION};

/// Slack for floating point comparisons on angles and distances.
const EPSILON: f64 = 1e-9;

/// The three phases of one access, in ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Access {
    pub seek: Tick,
    pub rotate: Tick,
    pub transfer: Tick,
}

impl Access {
    pub fn total(&self) -> Tick {
        self.seek
            .saturating_add(self.rotate)
            .saturating_add(self.transfer)
    }
}

pub struct TimingEngine {
    zones: ZoneTable,
    seek_speed: f64,
    skew: f64,
    track_spacing: f64,
}

impl TimingEngine {
    pub fn new(zones: ZoneTable, seek_speed: f64, skew: f64, track_spacing: f64) -> Self {
        Self {
            zones,
            seek_speed,
            skew,
            track_spacing,
        }
    }

    pub fn zones(&self) -> &ZoneTable {
        &self.zones
    }

    /// Ticks to move the arm between two tracks, head settle (`skew`) included.
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn seek_ticks(&self, from: Track, to: Track) -> Tick {
        if from == to {
            return 0;
        }
        let distance = from.abs_diff(to) as f64 * self.track_spacing;
        let ticks = distance / self.seek_speed + self.skew;
        (ticks - EPSILON).ceil().max(0.0) as Tick
    }

    /// Times the access to `request` from `state` without moving anything.
    pub fn estimate(&self, state: &DiskState, request: &Request) -> Access {
        let (start, width) = self.zones.sector_span(request.track, request.sector);
        let end = (start + width).rem_euclid(DEGREES_PER_REVOLUTION);

        let seek = self.seek_ticks(state.arm_track, request.track);
        let rotate_from = state.clock.saturating_add(seek);
        let rotate = ticks_until(state, rotate_from, start);
        // The transfer lasts at least one tick, even when the sector end falls in the same
        // sweep as its start.
        let transfer_from = rotate_from.saturating_add(rotate).saturating_add(1);
        let transfer = ticks_until(state, transfer_from, end).saturating_add(1);

        Access {
            seek,
            rotate,
            transfer,
        }
    }

    /// Services `request`: moves the arm, advances the clock and reports the timings.
    pub fn service(
        &self,
        state: &mut DiskState,
        request: &Request,
        direction: Direction,
    ) -> StatRecord {
        let access = self.estimate(state, request);

        state.arm_track = request.track;
        state.clock = state.clock.saturating_add(access.total());
        state.direction = direction;

        StatRecord::new(request.address, access)
    }
}

/// Ticks from `from` until the first sweep covering `boundary`.
///
/// Sweep `k` starts `k * speed` degrees past the phase at `from`, so the wait is the number of
/// whole sweeps that fit in the gap to the boundary.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn ticks_until(state: &DiskState, from: Tick, boundary: f64) -> Tick {
    let speed = state.rotate_speed();
    let mut ahead = (boundary - state.phase_at(from)).rem_euclid(DEGREES_PER_REVOLUTION);
    if DEGREES_PER_REVOLUTION - ahead < EPSILON {
        ahead = 0.0;
    }
    if ahead < speed {
        return 0;
    }
    // Float to integer casts saturate, so an unreachable boundary waits `Tick::MAX`.
    (ahead / speed + EPSILON).floor() as Tick
}
