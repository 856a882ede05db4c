// ==========================================
// 3D 打印成本计算器 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod calculation;
pub mod history;
pub mod types;

// 重导出核心类型
pub use calculation::{CalculationInput, CostBreakdown, PrintSummary, RawCalculationForm};
pub use history::{HistoryRecord, DEFAULT_HISTORY_CAPACITY};
pub use types::{FilamentPreset, FilamentType};
