// ==========================================
// 3D 打印成本计算器 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，转换Repository错误为用户可读的错误消息
// 分类:
// - 阻断类: 输入校验失败、无可保存结果（计算/保存不继续）
// - 非阻断类: 持久化失败（已计算结果保留，仅提示）
// ==========================================

use crate::i18n::{t, t_with_args};
use crate::repository::error::RepositoryError;
use thiserror::Error;

// ==========================================
// ValidationError - 输入校验错误
// ==========================================
// Display 为固定英文文案,localized() 为当前语言文案
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing filament weight")]
    MissingFilamentWeight,

    #[error("missing filament cost")]
    MissingFilamentCost,

    #[error("missing print duration")]
    MissingPrintDuration,
}

impl ValidationError {
    /// i18n 键
    pub fn message_key(&self) -> &'static str {
        match self {
            ValidationError::MissingFilamentWeight => "validation.missing_filament_weight",
            ValidationError::MissingFilamentCost => "validation.missing_filament_cost",
            ValidationError::MissingPrintDuration => "validation.missing_print_duration",
        }
    }

    /// 面向用户的本地化文案
    pub fn localized(&self) -> String {
        t(self.message_key())
    }
}

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 业务规则错误
    // ==========================================
    #[error("数据验证失败: {0}")]
    Validation(#[from] ValidationError),

    #[error("没有可保存的计算结果")]
    NothingToSave,

    // ==========================================
    // 数据访问错误
    // ==========================================
    /// 持久化失败（非阻断：计算结果仍可展示）
    #[error("历史记录保存失败: {0}")]
    PersistenceWrite(String),

    #[error("数据库错误: {0}")]
    DatabaseError(String),

    #[error("数据库连接失败: {0}")]
    DatabaseConnectionError(String),
}

impl ApiError {
    /// 是否阻断当前操作（需用户修正后重试）
    pub fn is_blocking(&self) -> bool {
        matches!(self, ApiError::Validation(_) | ApiError::NothingToSave)
    }

    /// 面向用户的本地化文案
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Validation(v) => v.localized(),
            ApiError::NothingToSave => t("calculator.nothing_to_save"),
            ApiError::PersistenceWrite(reason) => {
                t_with_args("calculator.persistence_warning", &[("reason", reason)])
            }
            other => other.to_string(),
        }
    }
}

// ==========================================
// 从 RepositoryError 转换
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::WriteFailed { key, message } => {
                ApiError::PersistenceWrite(format!("{} ({})", message, key))
            }
            RepositoryError::SerializationError(msg) => ApiError::PersistenceWrite(msg),
            RepositoryError::LockError(msg) => {
                ApiError::DatabaseConnectionError(format!("数据库锁获取失败: {}", msg))
            }
            RepositoryError::DatabaseQueryError(msg) => ApiError::DatabaseError(msg),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
