//! 仿真时间类型
//!
//! 定义仿真时间及其全序比较。

use super::error::InvalidTimeError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// 仿真时间（逻辑时钟上的一个点，无单位）。
///
/// 内部是 `f64`，构造时拒绝 NaN，因此可以实现 `Ord`。`±inf` 是合法的。
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct SimTime(f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);

    pub fn new(t: f64) -> Result<SimTime, InvalidTimeError> {
        if t.is_nan() {
            return Err(InvalidTimeError { value: t });
        }
        // -0.0 归一化为 0.0，保证 Eq 与 Ord 一致
        Ok(SimTime(t + 0.0))
    }

    pub fn as_f64(self) -> f64 {
        self.0
    }
}

impl Ord for SimTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl PartialOrd for SimTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SimTime {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SimTime {}

impl TryFrom<f64> for SimTime {
    type Error = InvalidTimeError;

    fn try_from(t: f64) -> Result<Self, Self::Error> {
        SimTime::new(t)
    }
}

impl From<u32> for SimTime {
    fn from(t: u32) -> Self {
        SimTime(f64::from(t))
    }
}

impl From<SimTime> for f64 {
    fn from(t: SimTime) -> Self {
        t.0
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={}", self.0)
    }
}
