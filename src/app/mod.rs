// ==========================================
// 3D 打印成本计算器 - 应用层
// ==========================================
// 职责: 组装各层实例,供展示层持有
// ==========================================

pub mod state;

// 重导出
pub use state::{get_default_db_path, AppState, DB_PATH_ENV};
