// ==========================================
// 3D 打印成本计算器 - 应用状态
// ==========================================
// 职责: 组装数据库连接、配置、仓储与 API 实例
// ==========================================

use std::sync::{Arc, Mutex};

use crate::api::CalculatorApi;
use crate::config::{CalculatorSettings, ConfigManager};
use crate::repository::{MemorySlotStore, SlotHistoryRepository, SlotStore, SqliteSlotStore};

/// 数据库路径环境变量
pub const DB_PATH_ENV: &str = "PRINT_COST_DB_PATH";

/// 应用状态
///
/// 每个客户端实例一份,由展示层持有
pub struct AppState {
    /// 数据库路径（内存会话为 None）
    pub db_path: Option<String>,

    /// 生效配置
    pub settings: CalculatorSettings,

    /// 配置管理器（内存会话为 None）
    pub config_manager: Option<Arc<ConfigManager>>,

    /// 历史记录仓储
    pub history_repo: Arc<SlotHistoryRepository>,

    /// 计算器API
    pub calculator_api: CalculatorApi,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    ///
    /// # 说明
    /// 该方法会：
    /// 1. 打开数据库并建表
    /// 2. 读取配置（失败时使用默认配置）
    /// 3. 初始化仓储与 API
    pub fn new(db_path: String) -> Result<Self, String> {
        tracing::info!("初始化AppState，数据库路径: {}", db_path);

        let conn = crate::db::open_sqlite_connection(&db_path)
            .map_err(|e| format!("无法打开数据库: {}", e))?;
        crate::db::ensure_schema(&conn).map_err(|e| format!("无法初始化数据库结构: {}", e))?;
        let conn = Arc::new(Mutex::new(conn));

        let config_manager = Arc::new(
            ConfigManager::from_connection(conn.clone())
                .map_err(|e| format!("无法创建ConfigManager: {}", e))?,
        );

        let settings = config_manager.load_settings().unwrap_or_else(|e| {
            tracing::warn!("配置读取失败，使用默认配置: {}", e);
            CalculatorSettings::default()
        });

        let slot: Arc<dyn SlotStore> = Arc::new(SqliteSlotStore::new(conn));
        let mut state = Self::assemble(slot, settings);
        state.db_path = Some(db_path);
        state.config_manager = Some(config_manager);

        tracing::info!(
            capacity = state.settings.history_capacity,
            slot_key = %state.settings.history_slot_key,
            "AppState初始化成功"
        );
        Ok(state)
    }

    /// 内存会话（不跨进程持久化）
    pub fn in_memory(settings: CalculatorSettings) -> Self {
        let slot: Arc<dyn SlotStore> = Arc::new(MemorySlotStore::new());
        Self::assemble(slot, settings)
    }

    fn assemble(slot: Arc<dyn SlotStore>, settings: CalculatorSettings) -> Self {
        if !crate::i18n::set_locale(&settings.default_locale) {
            tracing::warn!(locale = %settings.default_locale, "默认语言无效，沿用当前语言");
        }

        let history_repo = Arc::new(SlotHistoryRepository::with_options(
            slot,
            &settings.history_slot_key,
            settings.history_capacity,
        ));
        let calculator_api = CalculatorApi::new(history_repo.clone(), settings.presets.clone());

        Self {
            db_path: None,
            settings,
            config_manager: None,
            history_repo,
            calculator_api,
        }
    }
}

// ==========================================
// 默认数据库路径
// ==========================================

/// 获取默认数据库路径
///
/// # 返回
/// - 环境变量 PRINT_COST_DB_PATH（非空时优先）
/// - 开发环境: 用户数据目录/print-cost-calc-dev/print_cost_calc.db
/// - 生产环境: 用户数据目录/print-cost-calc/print_cost_calc.db
/// - 无用户数据目录: ./print_cost_calc.db
pub fn get_default_db_path() -> String {
    use std::path::PathBuf;

    if let Ok(path) = std::env::var(DB_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./print_cost_calc.db");

    if let Some(data_dir) = dirs::data_dir() {
        #[cfg(debug_assertions)]
        {
            path = data_dir.join("print-cost-calc-dev");
        }

        #[cfg(not(debug_assertions))]
        {
            path = data_dir.join("print-cost-calc");
        }

        // 确保目录存在
        std::fs::create_dir_all(&path).ok();
        path = path.join("print_cost_calc.db");
    }

    path.to_string_lossy().to_string()
}
