use super::error::ScenarioError;
use crate::sim::SimTime;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioSpec {
    pub schema_version: u32,
    #[serde(default)]
    pub meta: Option<ScenarioMeta>,
    #[serde(default)]
    pub events: Vec<EventSpec>,
    /// 为空时直接运行到结束（或 `RunOptions::until`）
    #[serde(default)]
    pub ops: Vec<OpSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioMeta {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// 一个初始事件，按文件顺序入队。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventSpec {
    pub time: SimTime,
    /// 缺省时使用 `e{index}`
    #[serde(default)]
    pub label: Option<String>,
    /// `false` 表示入队前先 `deactivate()`
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum OpSpec {
    DeactivateNext,
    Step,
    Run,
    RunUntil { until: SimTime },
    Activate { label: String },
    Deactivate { label: String },
}

impl ScenarioSpec {
    pub fn from_json(raw: &str) -> Result<ScenarioSpec, ScenarioError> {
        let spec: ScenarioSpec = serde_json::from_str(raw)?;
        if spec.schema_version != SCHEMA_VERSION {
            return Err(ScenarioError::UnsupportedSchema(spec.schema_version));
        }
        Ok(spec)
    }

    pub fn from_path(path: &Path) -> Result<ScenarioSpec, ScenarioError> {
        let raw = fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }
}
