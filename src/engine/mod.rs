// ==========================================
// 3D 打印成本计算器 - 引擎层
// ==========================================
// 职责: 成本计算、耗材预设、展示辅助
// 红线: 引擎不访问存储
// ==========================================

pub mod cost_engine;
pub mod format;
pub mod preset;

pub use cost_engine::CostEngine;
pub use format::{format_duration, round_currency};
pub use preset::{PresetCatalog, DEFAULT_PRINTER_POWER_W};
