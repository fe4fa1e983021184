//! Heap measurements for criterion
//!
//! Benchmarks that use these must install [`INSTRUMENTED_SYSTEM`] as their
//! global allocator, otherwise every sample reads zero.

use stats_alloc::StatsAlloc;

pub type InstrumentedSystem = StatsAlloc<std::alloc::System>;
pub use stats_alloc::INSTRUMENTED_SYSTEM;

mod allocation_size;
mod allocations;
pub use allocation_size::{AllocationSize, RetainedSize};
pub use allocations::Allocations;
