// ==========================================
// 3D 打印成本计算器 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 成本计算 + 历史记录 (本地单用户)
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "en");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 成本计算
pub mod engine;

// 数据仓储层 - 键值槽与历史记录
pub mod repository;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 业务接口
pub mod api;

// 应用层 - 组装
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

pub use domain::{
    CalculationInput, CostBreakdown, FilamentPreset, FilamentType, HistoryRecord, PrintSummary,
    RawCalculationForm,
};

pub use engine::{CostEngine, PresetCatalog};

pub use repository::{
    HistoryStore, MemorySlotStore, SlotHistoryRepository, SlotStore, SqliteSlotStore,
};

pub use api::{ApiError, ApiResult, Calculation, CalculatorApi, Confirmation};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "3D Print Cost Calculator";
