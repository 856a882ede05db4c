// ==========================================
// 3D 打印成本计算器 - 历史记录仓储
// ==========================================
// 存储: 单个键值槽,内容为 HistoryRecord 的 JSON 数组
// 顺序: 最新在前,超出容量时丢弃最旧记录
// 红线: list() 读取失败/内容损坏视为空历史;写操作遇读取失败直接报错,不覆盖已有数据
// ==========================================

use crate::domain::calculation::{CalculationInput, CostBreakdown};
use crate::domain::history::{HistoryRecord, DEFAULT_HISTORY_CAPACITY};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::slot_store::SlotStore;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::instrument;

/// 历史记录默认槽键
pub const DEFAULT_HISTORY_SLOT_KEY: &str = "print3d_history";

// ==========================================
// HistoryStore Trait - 历史记录仓储接口
// ==========================================
pub trait HistoryStore: Send + Sync {
    /// 全部历史记录（最新在前）
    fn list(&self) -> Vec<HistoryRecord>;

    /// 以当前时间保存一条记录
    fn save(&self, input: CalculationInput, breakdown: CostBreakdown) -> RepositoryResult<HistoryRecord> {
        self.save_at(input, breakdown, Utc::now())
    }

    /// 以指定时间保存一条记录
    fn save_at(
        &self,
        input: CalculationInput,
        breakdown: CostBreakdown,
        timestamp: DateTime<Utc>,
    ) -> RepositoryResult<HistoryRecord>;

    /// 按位置删除（0 = 最新）
    ///
    /// # 返回
    /// - Ok(true): 已删除
    /// - Ok(false): 越界,未删除
    fn delete_at(&self, index: usize) -> RepositoryResult<bool>;

    /// 删除整个历史槽
    fn clear(&self) -> RepositoryResult<()>;
}

// ==========================================
// SlotHistoryRepository - 基于键值槽的实现
// ==========================================
pub struct SlotHistoryRepository {
    slot: Arc<dyn SlotStore>,
    slot_key: String,
    capacity: usize,
}

impl SlotHistoryRepository {
    /// 使用默认槽键与容量创建
    pub fn new(slot: Arc<dyn SlotStore>) -> Self {
        Self::with_options(slot, DEFAULT_HISTORY_SLOT_KEY, DEFAULT_HISTORY_CAPACITY)
    }

    /// 指定槽键与容量（容量至少为 1）
    pub fn with_options(slot: Arc<dyn SlotStore>, slot_key: &str, capacity: usize) -> Self {
        Self {
            slot,
            slot_key: slot_key.to_string(),
            capacity: capacity.max(1),
        }
    }

    pub fn slot_key(&self) -> &str {
        &self.slot_key
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// 读取当前记录（供写操作使用）
    ///
    /// 内容缺失/损坏视为空历史；读取本身失败则返回错误，避免用空列表覆盖已有数据
    fn load(&self) -> RepositoryResult<Vec<HistoryRecord>> {
        let Some(raw) = self.slot.read(&self.slot_key)? else {
            return Ok(Vec::new());
        };
        Ok(self.decode(&raw))
    }

    fn decode(&self, raw: &str) -> Vec<HistoryRecord> {
        if raw.trim().is_empty() {
            return Vec::new();
        }

        match serde_json::from_str::<Vec<HistoryRecord>>(raw) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(slot_key = %self.slot_key, error = %e, "历史记录格式损坏，按空历史处理");
                Vec::new()
            }
        }
    }

    fn persist(&self, records: &[HistoryRecord]) -> RepositoryResult<()> {
        let raw = serde_json::to_string(records)?;
        self.slot.write(&self.slot_key, &raw)
    }
}

impl HistoryStore for SlotHistoryRepository {
    fn list(&self) -> Vec<HistoryRecord> {
        match self.load() {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(slot_key = %self.slot_key, error = %e, "历史记录读取失败，按空历史处理");
                Vec::new()
            }
        }
    }

    #[instrument(skip(self, input, breakdown), fields(slot_key = %self.slot_key))]
    fn save_at(
        &self,
        input: CalculationInput,
        breakdown: CostBreakdown,
        timestamp: DateTime<Utc>,
    ) -> RepositoryResult<HistoryRecord> {
        // 非有限值会被序列化为 null，整个槽将无法再解析
        if !breakdown.is_finite() {
            tracing::warn!(final_price = breakdown.final_price, "成本明细含非有限值，拒绝保存");
            return Err(RepositoryError::SerializationError(
                "cost breakdown contains non-finite values".to_string(),
            ));
        }

        let record = HistoryRecord::new(input, breakdown, timestamp);

        let mut records = self.load()?;
        records.insert(0, record.clone());
        if records.len() > self.capacity {
            tracing::debug!(evicted = records.len() - self.capacity, "超出容量，丢弃最旧记录");
            records.truncate(self.capacity);
        }

        self.persist(&records)?;
        tracing::info!(count = records.len(), "历史记录已保存");
        Ok(record)
    }

    #[instrument(skip(self), fields(slot_key = %self.slot_key))]
    fn delete_at(&self, index: usize) -> RepositoryResult<bool> {
        let mut records = self.load()?;
        let removed = index < records.len();
        if removed {
            records.remove(index);
        } else {
            tracing::debug!(len = records.len(), "删除位置越界，忽略");
        }

        self.persist(&records)?;
        Ok(removed)
    }

    #[instrument(skip(self), fields(slot_key = %self.slot_key))]
    fn clear(&self) -> RepositoryResult<()> {
        self.slot.remove(&self.slot_key)?;
        tracing::info!("历史记录已清空");
        Ok(())
    }
}
