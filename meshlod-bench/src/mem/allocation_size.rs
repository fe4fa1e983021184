use criterion::measurement::{Measurement, ValueFormatter};
use criterion::Throughput;
use stats_alloc::INSTRUMENTED_SYSTEM;

use crate::MeshlodMeasurement;

/// Bytes requested from the allocator per iteration, freed or not
pub struct AllocationSize;

/// Bytes still held when an iteration finishes.
///
/// Only meaningful with `Bencher::iter_with_large_drop`, which keeps the
/// routine's outputs alive until the measurement ends. Under `Bencher::iter`
/// each output is dropped inside the loop and this reads close to zero.
pub struct RetainedSize;

impl MeshlodMeasurement for AllocationSize {
    const NAME: &'static str = "allocated bytes";
}

impl MeshlodMeasurement for RetainedSize {
    const NAME: &'static str = "retained bytes";
}

impl Measurement for AllocationSize {
    type Intermediate = usize;
    type Value = usize;

    fn start(&self) -> Self::Intermediate {
        INSTRUMENTED_SYSTEM.stats().bytes_allocated
    }

    fn end(&self, start: Self::Intermediate) -> Self::Value {
        INSTRUMENTED_SYSTEM
            .stats()
            .bytes_allocated
            .saturating_sub(start)
    }

    fn add(&self, &v1: &Self::Value, &v2: &Self::Value) -> Self::Value {
        v1 + v2
    }

    fn zero(&self) -> Self::Value {
        0
    }

    fn to_f64(&self, &value: &Self::Value) -> f64 {
        value as f64
    }

    fn formatter(&self) -> &dyn ValueFormatter {
        &ByteFormatter
    }
}

impl Measurement for RetainedSize {
    type Intermediate = isize;
    type Value = usize;

    fn start(&self) -> Self::Intermediate {
        live_bytes()
    }

    fn end(&self, start: Self::Intermediate) -> Self::Value {
        (live_bytes() - start).max(0) as usize
    }

    fn add(&self, &v1: &Self::Value, &v2: &Self::Value) -> Self::Value {
        v1 + v2
    }

    fn zero(&self) -> Self::Value {
        0
    }

    fn to_f64(&self, &value: &Self::Value) -> f64 {
        value as f64
    }

    fn formatter(&self) -> &dyn ValueFormatter {
        &ByteFormatter
    }
}

fn live_bytes() -> isize {
    let stats = INSTRUMENTED_SYSTEM.stats();
    stats.bytes_allocated as isize - stats.bytes_deallocated as isize + stats.bytes_reallocated
}

const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];

/// Largest binary unit that keeps `typical` at or above 1
fn byte_unit(typical: f64) -> (f64, &'static str) {
    let mut factor = 1.0;
    let mut unit = 0;
    while unit + 1 < UNITS.len() && typical * factor >= 1024.0 {
        factor /= 1024.0;
        unit += 1;
    }
    (factor, UNITS[unit])
}

struct ByteFormatter;

impl ValueFormatter for ByteFormatter {
    fn scale_values(&self, typical_value: f64, values: &mut [f64]) -> &'static str {
        let (factor, unit) = byte_unit(typical_value);
        for value in values {
            *value *= factor;
        }
        unit
    }

    fn scale_throughputs(&self, _: f64, throughput: &Throughput, values: &mut [f64]) -> &'static str {
        match *throughput {
            Throughput::Elements(elements) => {
                for value in values {
                    *value /= elements as f64;
                }
                "B/vertex"
            }
            _ => "B",
        }
    }

    fn scale_for_machines(&self, _: &mut [f64]) -> &'static str {
        "B"
    }
}
