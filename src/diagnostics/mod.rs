//! Run reports: what was processed, how the tiles fared and where the time
//! went. Everything here serializes to camelCase JSON.

pub mod report;
pub mod timing;

pub use report::{InputDescriptor, LatticeDescriptor, MosaicReport, TileDiagnostic, TileStats};
pub use timing::{elapsed_ms, StageTiming, TimingBreakdown};
