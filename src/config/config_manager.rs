// ==========================================
// 3D 打印成本计算器 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写
// 存储: config_kv 表 (key-value + scope)
// 说明: 配置缺失或格式错误时一律回退默认值
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::history::DEFAULT_HISTORY_CAPACITY;
use crate::domain::types::FilamentPreset;
use crate::engine::preset::{PresetCatalog, DEFAULT_PRINTER_POWER_W};
use crate::repository::history_repo::DEFAULT_HISTORY_SLOT_KEY;
use rusqlite::{params, Connection};
use std::collections::HashMap;
use std::error::Error;
use std::sync::{Arc, Mutex};

/// 全局作用域
const GLOBAL_SCOPE: &str = "global";

/// 默认语言
pub const DEFAULT_LOCALE: &str = "en";

// ==========================================
// CalculatorSettings - 配置快照
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct CalculatorSettings {
    pub history_capacity: usize,
    pub history_slot_key: String,
    pub default_locale: String,
    pub presets: PresetCatalog,
}

impl Default for CalculatorSettings {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            history_slot_key: DEFAULT_HISTORY_SLOT_KEY.to_string(),
            default_locale: DEFAULT_LOCALE.to_string(),
            presets: PresetCatalog::builtin(),
        }
    }
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> Result<Self, Box<dyn Error>> {
        let conn = open_sqlite_connection(db_path)?;
        crate::db::ensure_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：会对传入连接再次应用统一 PRAGMA（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Result<Self, Box<dyn Error>> {
        {
            let conn_guard = conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
            crate::db::configure_sqlite_connection(&conn_guard)?;
        }

        Ok(Self { conn })
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    fn get_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = ?1 AND key = ?2",
            params![GLOBAL_SCOPE, key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(Box::new(e)),
        }
    }

    /// 写入 global scope 的配置值（UPSERT）
    pub fn set_global_config_value(&self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        if key.trim().is_empty() {
            return Err("配置键不能为空".into());
        }

        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value, updated_at) VALUES (?1, ?2, ?3, datetime('now'))
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?3, updated_at = datetime('now')",
            params![GLOBAL_SCOPE, key, value],
        )?;

        tracing::info!(config_key = key, "配置已更新");
        Ok(())
    }

    /// 从 config_kv 表读取配置值，带默认值
    fn get_config_or_default(&self, key: &str, default: &str) -> Result<String, Box<dyn Error>> {
        Ok(self.get_config_value(key)?.unwrap_or_else(|| default.to_string()))
    }

    // ===== 历史记录配置 =====

    /// 历史记录容量（默认 20，非正整数时回退默认）
    pub fn get_history_capacity(&self) -> Result<usize, Box<dyn Error>> {
        let value = self.get_config_or_default(
            config_keys::HISTORY_CAPACITY,
            &DEFAULT_HISTORY_CAPACITY.to_string(),
        )?;
        Ok(value
            .trim()
            .parse::<usize>()
            .ok()
            .filter(|&c| c > 0)
            .unwrap_or(DEFAULT_HISTORY_CAPACITY))
    }

    /// 历史记录槽键
    pub fn get_history_slot_key(&self) -> Result<String, Box<dyn Error>> {
        let value = self.get_config_or_default(config_keys::HISTORY_SLOT_KEY, DEFAULT_HISTORY_SLOT_KEY)?;
        let trimmed = value.trim();
        if trimmed.is_empty() {
            Ok(DEFAULT_HISTORY_SLOT_KEY.to_string())
        } else {
            Ok(trimmed.to_string())
        }
    }

    // ===== 界面配置 =====

    /// 默认语言
    pub fn get_default_locale(&self) -> Result<String, Box<dyn Error>> {
        let value = self.get_config_or_default(config_keys::DEFAULT_LOCALE, DEFAULT_LOCALE)?;
        Ok(value.trim().to_string())
    }

    /// 表单默认打印机功率 (W)
    pub fn get_default_printer_power_w(&self) -> Result<f64, Box<dyn Error>> {
        let value = self.get_config_or_default(
            config_keys::DEFAULT_PRINTER_POWER_W,
            &DEFAULT_PRINTER_POWER_W.to_string(),
        )?;
        Ok(value
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite() && *p >= 0.0)
            .unwrap_or(DEFAULT_PRINTER_POWER_W))
    }

    // ===== 耗材预设 =====

    /// 耗材预设表
    ///
    /// # 说明
    /// 配置格式为 JSON: {"PLA": {"cost_per_kg": 80, "power_w": 200}}
    /// 配置不存在或格式错误时使用内置预设
    pub fn get_filament_presets(&self) -> Result<PresetCatalog, Box<dyn Error>> {
        let default_power = self.get_default_printer_power_w()?;
        let catalog = PresetCatalog::builtin().with_default_power(default_power);

        let value = self.get_config_or_default(config_keys::FILAMENT_PRESETS, "{}")?;
        let overrides: HashMap<String, FilamentPreset> = serde_json::from_str(&value)
            .unwrap_or_else(|_| {
                tracing::warn!(
                    config_key = config_keys::FILAMENT_PRESETS,
                    raw_value = %value,
                    "耗材预设配置格式错误，使用内置预设"
                );
                HashMap::new()
            });

        Ok(catalog.with_overrides(overrides))
    }

    /// 读取全部计算器配置
    pub fn load_settings(&self) -> Result<CalculatorSettings, Box<dyn Error>> {
        Ok(CalculatorSettings {
            history_capacity: self.get_history_capacity()?,
            history_slot_key: self.get_history_slot_key()?,
            default_locale: self.get_default_locale()?,
            presets: self.get_filament_presets()?,
        })
    }
}

// ==========================================
// 配置键
// ==========================================
pub mod config_keys {
    // 历史记录
    pub const HISTORY_CAPACITY: &str = "history_capacity";
    pub const HISTORY_SLOT_KEY: &str = "history_slot_key";

    // 界面
    pub const DEFAULT_LOCALE: &str = "default_locale";
    pub const DEFAULT_PRINTER_POWER_W: &str = "default_printer_power_w";

    // 耗材预设 (JSON)
    pub const FILAMENT_PRESETS: &str = "filament_presets";
}
