use criterion::measurement::{Measurement, ValueFormatter};
use criterion::Throughput;
use stats_alloc::INSTRUMENTED_SYSTEM;

use crate::MeshlodMeasurement;

/// Number of heap requests per iteration.
///
/// Reallocations count as requests: a growing scratch buffer shows up here
/// even when its final allocation count stays flat.
pub struct Allocations;

fn heap_requests() -> usize {
    let stats = INSTRUMENTED_SYSTEM.stats();
    stats.allocations + stats.reallocations
}

impl MeshlodMeasurement for Allocations {
    const NAME: &'static str = "heap requests";
}

impl Measurement for Allocations {
    type Intermediate = usize;
    type Value = usize;

    fn start(&self) -> Self::Intermediate {
        heap_requests()
    }

    fn end(&self, start: Self::Intermediate) -> Self::Value {
        heap_requests().saturating_sub(start)
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
        &RequestFormatter
    }
}

struct RequestFormatter;

impl ValueFormatter for RequestFormatter {
    fn scale_values(&self, _: f64, _: &mut [f64]) -> &'static str {
        "requests"
    }

    fn scale_throughputs(&self, _: f64, throughput: &Throughput, values: &mut [f64]) -> &'static str {
        match *throughput {
            Throughput::Elements(elements) => {
                for value in values {
                    *value /= elements as f64;
                }
                "requests/vertex"
            }
            _ => "requests",
        }
    }

    fn scale_for_machines(&self, _: &mut [f64]) -> &'static str {
        "requests"
    }
}
