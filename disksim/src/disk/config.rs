use core::fmt::{Display, Formatter};

use crate::disk::descriptor::parse_zoning;
use crate::disk::disk_error::DiskError;
use crate::disk::disk_state::Direction;
use crate::disk::schedulers::{PolicyKind, TieBreak};
use crate::disk::window::{WindowMode, WindowSize};
use crate::disk::zone_table::{Track, ZoneTable};

/// Unit constants of the physical model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calibration {
    /// Distance units between two adjacent tracks
    pub track_spacing: f64,
    /// Head angle at tick 0, in degrees
    pub initial_angle: f64,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            track_spacing: 40.0,
            initial_angle: 180.0,
        }
    }
}

/// Everything that stays fixed over one run.
#[derive(Debug, Clone, PartialEq)]
pub struct DiskConfig {
    pub policy: PolicyKind,
    /// Distance units the arm travels per tick
    pub seek_speed: f64,
    /// Degrees the platter turns per tick
    pub rotate_speed: f64,
    /// Extra ticks added to every seek that changes track
    pub skew: f64,
    pub window: WindowSize,
    pub window_mode: WindowMode,
    pub tie_break: TieBreak,
    /// Weight of the V(R) and WEIGHTED policies, in `[0, 1]`
    pub r_value: f64,
    /// Sector width in degrees, per track
    pub zoning: Vec<f64>,
    pub num_tracks: usize,
    pub arm_track: Track,
    pub initial_dir: Direction,
    /// Seed for generated workloads
    pub seed: u64,
    pub calibration: Calibration,
}

impl Default for DiskConfig {
    fn default() -> Self {
        Self {
            policy: PolicyKind::Clook,
            seek_speed: 1.0,
            rotate_speed: 1.0,
            skew: 0.0,
            window: WindowSize::Unbounded,
            window_mode: WindowMode::default(),
            tie_break: TieBreak::default(),
            r_value: 0.0,
            zoning: vec![30.0; 3],
            num_tracks: 3,
            arm_track: 0,
            initial_dir: Direction::Up,
            seed: 0,
            calibration: Calibration::default(),
        }
    }
}

fn positive(name: &str, value: f64) -> Result<(), DiskError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(DiskError::config(format!("{name} must be positive, got {value}")))
    }
}

impl DiskConfig {
    /// Checks the configuration for consistency.
    pub fn validate(&self) -> Result<(), DiskError> {
        if self.num_tracks == 0 {
            return Err(DiskError::config("the disk needs at least one track"));
        }
        if self.zoning.len() != self.num_tracks {
            return Err(DiskError::config(format!(
                "zoning describes {} track(s) but the disk has {}",
                self.zoning.len(),
                self.num_tracks
            )));
        }
        if self.arm_track >= self.num_tracks {
            return Err(DiskError::config(format!(
                "arm track {} is not on a disk of {} track(s)",
                self.arm_track, self.num_tracks
            )));
        }

        positive("seek speed", self.seek_speed)?;
        positive("rotate speed", self.rotate_speed)?;
        positive("track spacing", self.calibration.track_spacing)?;
        if !self.skew.is_finite() || self.skew < 0.0 {
            return Err(DiskError::config(format!(
                "skew must not be negative, got {}",
                self.skew
            )));
        }
        if !self.calibration.initial_angle.is_finite() {
            return Err(DiskError::config("initial head angle must be finite"));
        }
        if self.policy.uses_r_value() && !(0.0..=1.0).contains(&self.r_value) {
            return Err(DiskError::config(format!(
                "{} needs an r value in [0, 1], got {}",
                self.policy, self.r_value
            )));
        }

        ZoneTable::from_sector_degrees(&self.zoning).map(|_| ())
    }

    /// The validated sector layout.
    pub fn zone_table(&self) -> Result<ZoneTable, DiskError> {
        self.validate()?;
        ZoneTable::from_sector_degrees(&self.zoning)
    }

    /// Decodes the harness inputs, leaving the settings it has no say over at their defaults.
    pub fn from_args(args: &HarnessArgs) -> Result<Self, DiskError> {
        let num_tracks = usize::try_from(args.num_tracks)
            .ok()
            .filter(|&n| n > 0)
            .ok_or_else(|| {
                DiskError::config(format!("track count must be positive, got {}", args.num_tracks))
            })?;
        let arm_track = usize::try_from(args.arm_track).map_err(|_| {
            DiskError::config(format!("arm track must not be negative, got {}", args.arm_track))
        })?;
        let window = WindowSize::from_flag(args.window).ok_or_else(|| {
            DiskError::config(format!(
                "window must be at least 1, or -1 for unbounded, got {}",
                args.window
            ))
        })?;
        let initial_dir = Direction::from_flag(args.initial_dir).ok_or_else(|| {
            DiskError::config(format!(
                "initial direction must be 1, 0 or -1, got {}",
                args.initial_dir
            ))
        })?;

        let config = DiskConfig {
            policy: args.policy.parse()?,
            seek_speed: args.seek_speed,
            rotate_speed: args.rotate_speed,
            skew: args.skew,
            window,
            r_value: args.r_value,
            zoning: parse_zoning(&args.zoning)?,
            num_tracks,
            arm_track,
            initial_dir,
            seed: args.seed,
            ..DiskConfig::default()
        };
        config.validate()?;
        Ok(config)
    }
}

impl Display for DiskConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        let window = match self.window {
            WindowSize::Unbounded => String::from("unbounded"),
            WindowSize::Bounded(n) => n.to_string(),
        };
        write!(
            f,
            "policy={} tracks={} arm={} dir={} seek={} rotate={} skew={} window={} r={}",
            self.policy,
            self.num_tracks,
            self.arm_track,
            self.initial_dir,
            self.seek_speed,
            self.rotate_speed,
            self.skew,
            window,
            self.r_value
        )
    }
}

/// The construction inputs of the grading harness, in its own encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct HarnessArgs {
    /// Comma-separated addresses, or `-1` to generate them from `addr_desc`
    pub addr: String,
    /// `num,max,min`
    pub addr_desc: String,
    /// Comma-separated `addr` or `addr@tick` entries, or `-1` to generate them
    pub late_addr: String,
    /// `num,max,min`
    pub late_addr_desc: String,
    pub policy: String,
    pub seek_speed: f64,
    pub rotate_speed: f64,
    pub skew: f64,
    /// `-1` for unbounded
    pub window: i64,
    /// Comma-separated sector widths in degrees, one per track
    pub zoning: String,
    pub arm_track: i64,
    pub num_tracks: i64,
    /// `1` scans up, `0` or `-1` scans down
    pub initial_dir: i64,
    pub r_value: f64,
    pub seed: u64,
}

impl Default for HarnessArgs {
    fn default() -> Self {
        Self {
            addr: String::from("-1"),
            addr_desc: String::from("5,-1,0"),
            late_addr: String::from("-1"),
            late_addr_desc: String::from("0,-1,0"),
            policy: String::from("CLOOK"),
            seek_speed: 1.0,
            rotate_speed: 1.0,
            skew: 0.0,
            window: -1,
            zoning: String::from("30,30,30"),
            arm_track: 0,
            num_tracks: 3,
            initial_dir: 1,
            r_value: 0.0,
            seed: 0,
        }
    }
}
