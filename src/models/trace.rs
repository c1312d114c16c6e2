use serde::{Deserialize, Serialize};
use tracing::Level;

use super::ClientId;

/// 查找流程中的步骤
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupStep {
    Retry,
    Email,
    TaxId,
    Name,
    PointOfSale,
    Ledger,
}

/// 单个步骤的结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepOutcome {
    Matched {
        #[serde(skip_serializing_if = "Option::is_none")]
        client_id: Option<ClientId>,
        #[serde(skip_serializing_if = "Option::is_none")]
        rule: Option<String>,
    },
    NotFound,
    Failed { reason: String },
    Info,
}

/// 结构化追踪记录，`message` 为给人看的说明
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceEntry {
    pub step: LookupStep,
    #[serde(flatten)]
    pub outcome: StepOutcome,
    pub message: String,
}

impl TraceEntry {
    pub fn info(step: LookupStep, message: impl Into<String>) -> Self {
        Self {
            step,
            outcome: StepOutcome::Info,
            message: message.into(),
        }
    }

    pub fn matched(
        step: LookupStep,
        client_id: Option<ClientId>,
        rule: Option<&str>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            step,
            outcome: StepOutcome::Matched {
                client_id,
                rule: rule.map(str::to_string),
            },
            message: message.into(),
        }
    }

    pub fn not_found(step: LookupStep, message: impl Into<String>) -> Self {
        Self {
            step,
            outcome: StepOutcome::NotFound,
            message: message.into(),
        }
    }

    pub fn failed(step: LookupStep, label: &str, reason: impl ToString) -> Self {
        let reason = reason.to_string();
        Self {
            step,
            message: format!("{} error: {}", label, reason),
            outcome: StepOutcome::Failed { reason },
        }
    }

    /// 日志级别: 消息里可能带有客户邮箱与姓名，只在 debug 级别完整输出
    pub fn log_level(&self) -> Level {
        match self.outcome {
            StepOutcome::Failed { .. } => Level::WARN,
            StepOutcome::Matched { .. } => Level::INFO,
            StepOutcome::NotFound | StepOutcome::Info => Level::DEBUG,
        }
    }
}

/// 追踪日志，按步骤顺序累积
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trace {
    entries: Vec<TraceEntry>,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: TraceEntry) {
        let level = entry.log_level();
        if level == Level::WARN {
            tracing::warn!(step = ?entry.step, "{}", entry.message);
        } else {
            if let StepOutcome::Matched { client_id, .. } = &entry.outcome {
                tracing::info!(step = ?entry.step, client_id = ?client_id, "Existing client matched");
            }
            tracing::debug!(step = ?entry.step, "{}", entry.message);
        }
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }

    /// 渲染为 debug 字符串列表
    pub fn messages(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.message.clone()).collect()
    }

    pub fn into_entries(self) -> Vec<TraceEntry> {
        self.entries
    }
}
