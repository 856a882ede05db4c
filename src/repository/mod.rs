// ==========================================
// 3D 打印成本计算器 - 数据仓储层
// ==========================================
// 职责: 键值槽存储、历史记录的读写
// 红线: Repository 不做业务逻辑,只做数据映射
// ==========================================

pub mod error;
pub mod history_repo;
pub mod slot_store;

pub use error::{RepositoryError, RepositoryResult};
pub use history_repo::{HistoryStore, SlotHistoryRepository, DEFAULT_HISTORY_SLOT_KEY};
pub use slot_store::{MemorySlotStore, SlotStore, SqliteSlotStore};
