//! Per-track sector layout of a zoned disk.

use crate::disk::disk_error::DiskError;

/// Degrees in one platter revolution.
pub const DEGREES_PER_REVOLUTION: f64 = 360.0;

/// Index of a track, counted from the outermost track `0`.
pub type Track = usize;

/// Linear block address.
pub type BlockAddress = u64;

/// The sector layout of every track.
///
/// Each track is divided into sectors of equal angular width; different tracks may use
/// different widths (zoned recording). Blocks are numbered track-major starting at zero, so
/// track `t` holds the addresses `prefix[t]..prefix[t + 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneTable {
    /// Angular width of one sector, per track
    sector_degrees: Vec<f64>,
    /// Number of sectors, per track
    sectors_per_track: Vec<u64>,
    /// `prefix[t]` is the first address on track `t`; the last entry is the capacity
    prefix: Vec<BlockAddress>,
}

impl ZoneTable {
    /// Builds the table from the angular width of each track's sectors.
    ///
    /// A width must be positive and divide the revolution evenly.
    pub fn from_sector_degrees(widths: &[f64]) -> Result<Self, DiskError> {
        if widths.is_empty() {
            return Err(DiskError::config("zoning must describe at least one track"));
        }

        let mut sectors_per_track = Vec::with_capacity(widths.len());
        let mut prefix = Vec::with_capacity(widths.len() + 1);
        prefix.push(0);

        for (track, &width) in widths.iter().enumerate() {
            if !width.is_finite() || width <= 0.0 || width > DEGREES_PER_REVOLUTION {
                return Err(DiskError::config(format!(
                    "track {track}: sector width {width} is not in (0, 360]"
                )));
            }
            let count = DEGREES_PER_REVOLUTION / width;
            if (count - count.round()).abs() > 1e-9 {
                return Err(DiskError::config(format!(
                    "track {track}: sector width {width} does not divide a revolution"
                )));
            }
            #[allow(clippy::cast_possible_truncation)]
            let count = count.round() as u64;

            sectors_per_track.push(count);
            prefix.push(prefix[track] + count);
        }

        Ok(ZoneTable {
            sector_degrees: widths.to_vec(),
            sectors_per_track,
            prefix,
        })
    }

    /// Builds a table where every track holds `sectors` sectors.
    pub fn uniform(tracks: usize, sectors: u64) -> Result<Self, DiskError> {
        if sectors == 0 {
            return Err(DiskError::config("a track needs at least one sector"));
        }
        #[allow(clippy::cast_precision_loss)]
        let width = DEGREES_PER_REVOLUTION / sectors as f64;
        Self::from_sector_degrees(&vec![width; tracks])
    }

    pub fn num_tracks(&self) -> usize {
        self.sectors_per_track.len()
    }

    /// Total number of blocks on the disk.
    pub fn capacity(&self) -> u64 {
        self.prefix[self.num_tracks()]
    }

    pub fn sectors_per_track(&self, track: Track) -> u64 {
        self.sectors_per_track[track]
    }

    pub fn sector_degrees(&self, track: Track) -> f64 {
        self.sector_degrees[track]
    }

    /// First block address of `track`.
    pub fn first_block(&self, track: Track) -> BlockAddress {
        self.prefix[track]
    }

    /// Maps a block address to its `(track, sector)` location.
    ///
    /// Resolution is pure: resolving the same address twice gives the same answer.
    pub fn resolve(&self, address: BlockAddress) -> Result<(Track, u64), DiskError> {
        if address >= self.capacity() {
            return Err(DiskError::InvalidAddress {
                address: i64::try_from(address).unwrap_or(i64::MAX),
                capacity: self.capacity(),
            });
        }

        // Largest track whose first block is at or below the address.
        let track = self.prefix.partition_point(|&first| first <= address) - 1;
        Ok((track, address - self.prefix[track]))
    }

    /// Angular extent of a sector as `(start, width)` in degrees.
    ///
    /// Sector `k` is centred at `k * width`, so sector 0 straddles angle 0.
    pub fn sector_span(&self, track: Track, sector: u64) -> (f64, f64) {
        let width = self.sector_degrees[track];
        #[allow(clippy::cast_precision_loss)]
        let centre = sector as f64 * width;
        let start = (centre - width / 2.0).rem_euclid(DEGREES_PER_REVOLUTION);
        (start, width)
    }
}
