// ==========================================
// 3D 打印成本计算器 - 历史记录领域模型
// ==========================================

use crate::domain::calculation::{CalculationInput, CostBreakdown};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 历史记录默认容量
pub const DEFAULT_HISTORY_CAPACITY: usize = 20;

// ==========================================
// HistoryRecord - 历史记录
// ==========================================
// 一次计算的输入与结果快照
// 存储顺序: 最新在前
// 序列化: timestamp 为 RFC 3339
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub input: CalculationInput,
    pub breakdown: CostBreakdown,
    pub timestamp: DateTime<Utc>,
}

impl HistoryRecord {
    pub fn new(input: CalculationInput, breakdown: CostBreakdown, timestamp: DateTime<Utc>) -> Self {
        Self {
            input,
            breakdown,
            timestamp,
        }
    }
}
