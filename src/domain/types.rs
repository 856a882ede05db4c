// ==========================================
// 3D 打印成本计算器 - 领域类型定义
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 耗材类型 (Filament Type)
// ==========================================
// 序列化格式: 标签字符串 (与历史记录 JSON 一致)
// 未识别的标签保留原文,不视为错误

/// 耗材类型
///
/// 应通过 [`FilamentType::parse`] 构造。直接构造的 `Other` 若携带已知标签
/// （如 `Other("pla")`），序列化后重新读取会归一为对应的已知类型（`Pla`），
/// 不保持原变体。
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FilamentType {
    #[default]
    Pla,
    Abs,
    Petg,
    Tpu,
    Wood,
    Metal,
    Other(String),
}

impl FilamentType {
    /// 已知耗材类型（预设表顺序）
    pub const KNOWN: [FilamentType; 6] = [
        FilamentType::Pla,
        FilamentType::Abs,
        FilamentType::Petg,
        FilamentType::Tpu,
        FilamentType::Wood,
        FilamentType::Metal,
    ];

    /// 解析标签（大小写不敏感，两端空白忽略）
    pub fn parse(label: &str) -> Self {
        let trimmed = label.trim();
        match trimmed.to_uppercase().as_str() {
            "PLA" => FilamentType::Pla,
            "ABS" => FilamentType::Abs,
            "PETG" => FilamentType::Petg,
            "TPU" => FilamentType::Tpu,
            "WOOD" => FilamentType::Wood,
            "METAL" => FilamentType::Metal,
            _ => FilamentType::Other(trimmed.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            FilamentType::Pla => "PLA",
            FilamentType::Abs => "ABS",
            FilamentType::Petg => "PETG",
            FilamentType::Tpu => "TPU",
            FilamentType::Wood => "Wood",
            FilamentType::Metal => "Metal",
            FilamentType::Other(label) => label,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, FilamentType::Other(_))
    }
}

impl fmt::Display for FilamentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<String> for FilamentType {
    fn from(label: String) -> Self {
        FilamentType::parse(&label)
    }
}

impl From<&str> for FilamentType {
    fn from(label: &str) -> Self {
        FilamentType::parse(label)
    }
}

impl From<FilamentType> for String {
    fn from(filament: FilamentType) -> Self {
        filament.as_str().to_string()
    }
}

// ==========================================
// 耗材预设 (Filament Preset)
// ==========================================
// 用途: 选择耗材类型时预填成本与功率
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilamentPreset {
    pub cost_per_kg: f64, // 每公斤价格
    pub power_w: f64,     // 典型打印功率 (W)
}
