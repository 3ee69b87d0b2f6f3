pub mod analysis;
pub mod projection;
pub mod schedule;
pub mod summary;

/// Length of every depreciation schedule and projection table.
pub const PROJECTION_YEARS: usize = 6;
