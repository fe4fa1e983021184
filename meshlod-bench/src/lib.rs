//! Shared benchmark support for meshlod crates
//!
//! Provides criterion measurements that count heap allocations and
//! procedural fixture meshes, so benchmarks do not depend on asset files.

pub mod fixtures;
pub mod mem;

use criterion::measurement::Measurement;

/// A criterion measurement with a display name for benchmark groups
pub trait MeshlodMeasurement: Measurement {
    const NAME: &'static str;
}

impl MeshlodMeasurement for criterion::measurement::WallTime {
    const NAME: &'static str = "time";
}
