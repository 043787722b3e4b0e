//! 场景文件
//!
//! 用 JSON 描述一组初始事件和一串调度操作，驱动 `EventScheduler` 运行并产出报告。

mod error;
mod runner;
mod spec;

pub use error::ScenarioError;
pub use runner::{RunOptions, ScenarioReport, ScenarioRun, run_scenario};
pub use spec::{EventSpec, OpSpec, SCHEMA_VERSION, ScenarioMeta, ScenarioSpec};
