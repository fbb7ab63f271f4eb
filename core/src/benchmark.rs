//! Industry benchmarks used to pre-fill uplift and retention.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessVertical {
    Restaurant,
    Cafe,
    Retail,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BenchmarkRange {
    pub min: f64,
    pub avg: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Benchmark {
    pub vertical:                    BusinessVertical,
    pub description:                 &'static str,
    pub returning_customer_uplift:   BenchmarkRange,
    pub customer_retention_rate:     BenchmarkRange,
}

const fn range(min: f64, avg: f64, max: f64) -> BenchmarkRange {
    BenchmarkRange { min, avg, max }
}

static BENCHMARKS: [Benchmark; 3] = [
    Benchmark {
        vertical:                  BusinessVertical::Restaurant,
        description:               "Restaurant Industry",
        returning_customer_uplift: range(10.0, 15.0, 25.0),
        customer_retention_rate:   range(60.0, 70.0, 80.0),
    },
    Benchmark {
        vertical:                  BusinessVertical::Cafe,
        description:               "Café/Coffee Shop",
        returning_customer_uplift: range(15.0, 20.0, 30.0),
        customer_retention_rate:   range(65.0, 75.0, 85.0),
    },
    Benchmark {
        vertical:                  BusinessVertical::Retail,
        description:               "Retail/Store",
        returning_customer_uplift: range(12.0, 18.0, 28.0),
        customer_retention_rate:   range(55.0, 65.0, 75.0),
    },
];

impl BusinessVertical {
    pub const ALL: [BusinessVertical; 3] = [Self::Restaurant, Self::Cafe, Self::Retail];

    pub fn benchmark(&self) -> &'static Benchmark {
        match self {
            Self::Restaurant => &BENCHMARKS[0],
            Self::Cafe       => &BENCHMARKS[1],
            Self::Retail     => &BENCHMARKS[2],
        }
    }
}

impl fmt::Display for BusinessVertical {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.benchmark().description)
    }
}

/// All benchmarks, in display order.
pub fn all() -> &'static [Benchmark] {
    &BENCHMARKS
}
