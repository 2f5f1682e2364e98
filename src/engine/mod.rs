//! DDMRP calculation engine: demand, sourcing, lead times, zones, totals, score.

pub mod explosion;
pub mod lead_time;
pub mod score;
pub mod sourcing;
pub mod totals;
pub mod zones;

pub use score::score;
pub use totals::{evaluate, NodeStats, Totals};
pub use zones::{BufferStatus, BufferZones};
