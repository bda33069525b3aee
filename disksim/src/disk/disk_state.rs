use core::fmt;

use crate::disk::disk_request::Tick;
use crate::disk::zone_table::{Track, DEGREES_PER_REVOLUTION};

/// Direction of arm travel across tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards higher track numbers
    Up,
    /// Towards lower track numbers
    Down,
}

impl Direction {
    /// Decodes the harness convention: `1` scans up, `0` or `-1` scans down.
    pub fn from_flag(flag: i64) -> Option<Self> {
        match flag {
            1 => Some(Direction::Up),
            0 | -1 => Some(Direction::Down),
            _ => None,
        }
    }

    /// Direction of travel from `from` to `to`, if the arm moves at all.
    pub fn of_move(from: Track, to: Track) -> Option<Self> {
        match to.cmp(&from) {
            core::cmp::Ordering::Greater => Some(Direction::Up),
            core::cmp::Ordering::Less => Some(Direction::Down),
            core::cmp::Ordering::Equal => None,
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}

/// Mechanical state of the disk between two requests.
///
/// The rotational position is not stored: the platter turns at a constant rate, so the phase is
/// a function of the clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiskState {
    pub arm_track: Track,
    pub clock: Tick,
    pub direction: Direction,
    /// Head angle at tick 0
    initial_angle: f64,
    /// Degrees turned per tick
    rotate_speed: f64,
}

impl DiskState {
    pub fn new(
        arm_track: Track,
        direction: Direction,
        initial_angle: f64,
        rotate_speed: f64,
    ) -> Self {
        Self {
            arm_track,
            clock: 0,
            direction,
            initial_angle,
            rotate_speed,
        }
    }

    /// Angle under the head at `tick`, in `[0, 360)`.
    pub fn phase_at(&self, tick: Tick) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let turned = self.rotate_speed * tick as f64;
        (self.initial_angle + turned).rem_euclid(DEGREES_PER_REVOLUTION)
    }

    /// Angle under the head now.
    pub fn rotational_phase(&self) -> f64 {
        self.phase_at(self.clock)
    }

    pub fn rotate_speed(&self) -> f64 {
        self.rotate_speed
    }
}
