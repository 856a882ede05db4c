// ==========================================
// 3D 打印成本计算器 - 键值槽存储
// ==========================================
// 职责: 按 key 读/写/删除一段序列化文本
// 存储: kv_slot 表 (SQLite) 或进程内 HashMap
// 红线: 只做数据映射,不解析内容
// ==========================================

use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

// ==========================================
// SlotStore Trait - 键值槽接口
// ==========================================
pub trait SlotStore: Send + Sync {
    /// 读取槽内容（不存在返回 None）
    fn read(&self, key: &str) -> RepositoryResult<Option<String>>;

    /// 覆盖写入槽内容
    fn write(&self, key: &str, value: &str) -> RepositoryResult<()>;

    /// 删除整个槽（不存在时为空操作）
    fn remove(&self, key: &str) -> RepositoryResult<()>;
}

// ==========================================
// SqliteSlotStore - SQLite 实现
// ==========================================
pub struct SqliteSlotStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteSlotStore {
    /// 创建新的键值槽仓储
    ///
    /// 说明: kv_slot 表由 db::ensure_schema 创建
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }
}

impl SlotStore for SqliteSlotStore {
    fn read(&self, key: &str) -> RepositoryResult<Option<String>> {
        let conn = self.get_conn()?;
        let value = conn
            .query_row(
                "SELECT value FROM kv_slot WHERE slot_key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write(&self, key: &str, value: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO kv_slot (slot_key, value, updated_at)
            VALUES (?1, ?2, datetime('now'))
            ON CONFLICT(slot_key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
            params![key, value],
        )
        .map_err(|e| RepositoryError::WriteFailed {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    fn remove(&self, key: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute("DELETE FROM kv_slot WHERE slot_key = ?1", params![key])
            .map_err(|e| RepositoryError::WriteFailed {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        Ok(())
    }
}

// ==========================================
// MemorySlotStore - 进程内实现
// ==========================================
// 用于临时会话与测试,不跨进程持久化
#[derive(Default)]
pub struct MemorySlotStore {
    slots: Mutex<HashMap<String, String>>,
}

impl MemorySlotStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn get_slots(&self) -> RepositoryResult<MutexGuard<'_, HashMap<String, String>>> {
        self.slots
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }
}

impl SlotStore for MemorySlotStore {
    fn read(&self, key: &str) -> RepositoryResult<Option<String>> {
        Ok(self.get_slots()?.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> RepositoryResult<()> {
        self.get_slots()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> RepositoryResult<()> {
        self.get_slots()?.remove(key);
        Ok(())
    }
}
