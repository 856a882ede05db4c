// ==========================================
// 3D 打印成本计算器 - 耗材预设
// ==========================================
// 职责: 耗材类型 → 建议单价/功率, 预填原始表单
// 规则: 只填充用户尚未填写的字段
// - 单价: 为空或为 0 时填充
// - 功率: 为空或等于默认功率时填充
// ==========================================

use crate::domain::calculation::RawCalculationForm;
use crate::domain::types::{FilamentPreset, FilamentType};
use std::collections::HashMap;

/// 表单默认打印机功率 (W)
pub const DEFAULT_PRINTER_POWER_W: f64 = 250.0;

// ==========================================
// PresetCatalog - 耗材预设表
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct PresetCatalog {
    presets: HashMap<FilamentType, FilamentPreset>,
    default_power_w: f64,
}

impl Default for PresetCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PresetCatalog {
    /// 内置预设
    pub fn builtin() -> Self {
        let presets = [
            (FilamentType::Pla, 85.0, 200.0),
            (FilamentType::Abs, 90.0, 250.0),
            (FilamentType::Petg, 95.0, 240.0),
            (FilamentType::Tpu, 120.0, 220.0),
            (FilamentType::Wood, 110.0, 230.0),
            (FilamentType::Metal, 150.0, 260.0),
        ]
        .into_iter()
        .map(|(t, cost_per_kg, power_w)| (t, FilamentPreset { cost_per_kg, power_w }))
        .collect();

        Self {
            presets,
            default_power_w: DEFAULT_PRINTER_POWER_W,
        }
    }

    /// 在内置预设基础上覆写
    ///
    /// 键为耗材标签（大小写不敏感），值非有限或为负的条目被忽略
    pub fn with_overrides(mut self, overrides: HashMap<String, FilamentPreset>) -> Self {
        for (label, preset) in overrides {
            let valid = preset.cost_per_kg.is_finite()
                && preset.cost_per_kg >= 0.0
                && preset.power_w.is_finite()
                && preset.power_w >= 0.0;
            if !valid {
                tracing::warn!(label = %label, "耗材预设数值无效，忽略");
                continue;
            }
            self.presets.insert(FilamentType::parse(&label), preset);
        }
        self
    }

    /// 设置表单默认功率（用于判断功率字段是否"未修改"）
    pub fn with_default_power(mut self, default_power_w: f64) -> Self {
        self.default_power_w = default_power_w;
        self
    }

    pub fn default_power_w(&self) -> f64 {
        self.default_power_w
    }

    pub fn get(&self, filament_type: &FilamentType) -> Option<FilamentPreset> {
        self.presets.get(filament_type).copied()
    }

    /// 选择耗材类型并预填表单
    ///
    /// # 返回
    /// - true: 找到预设（可能未修改任何数值字段）
    /// - false: 无此类型预设，仅更新类型标签
    pub fn apply(&self, form: &mut RawCalculationForm, filament_type: &FilamentType) -> bool {
        form.filament_type = filament_type.to_string();

        let Some(preset) = self.get(filament_type) else {
            return false;
        };

        if field_is_blank_or(&form.filament_cost, 0.0) {
            form.filament_cost = preset.cost_per_kg.to_string();
        }
        if field_is_blank_or(&form.printer_power, self.default_power_w) {
            form.printer_power = preset.power_w.to_string();
        }

        tracing::debug!(filament = %filament_type, "已应用耗材预设");
        true
    }
}

fn field_is_blank_or(raw: &str, untouched: f64) -> bool {
    let trimmed = raw.trim();
    trimmed.is_empty() || trimmed.parse::<f64>().map(|v| v == untouched).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_presets() {
        let catalog = PresetCatalog::builtin();
        let pla = catalog.get(&FilamentType::Pla).unwrap();
        assert_eq!(pla.cost_per_kg, 85.0);
        assert_eq!(pla.power_w, 200.0);

        let metal = catalog.get(&FilamentType::Metal).unwrap();
        assert_eq!(metal.cost_per_kg, 150.0);
        assert_eq!(metal.power_w, 260.0);

        assert!(catalog.get(&FilamentType::Other("Nylon".into())).is_none());
    }

    #[test]
    fn test_every_known_type_has_builtin_preset() {
        let catalog = PresetCatalog::builtin();
        for filament in FilamentType::KNOWN.iter() {
            assert!(catalog.get(filament).is_some(), "缺少预设: {}", filament);
        }
    }

    #[test]
    fn test_apply_fills_blank_fields() {
        let catalog = PresetCatalog::builtin();
        let mut form = RawCalculationForm::default();

        assert!(catalog.apply(&mut form, &FilamentType::Petg));
        assert_eq!(form.filament_type, "PETG");
        assert_eq!(form.filament_cost, "95");
        assert_eq!(form.printer_power, "240");
    }

    #[test]
    fn test_apply_replaces_zero_cost_and_default_power() {
        let catalog = PresetCatalog::builtin();
        let mut form = RawCalculationForm {
            filament_cost: "0".into(),
            printer_power: "250".into(),
            ..Default::default()
        };

        catalog.apply(&mut form, &FilamentType::Tpu);
        assert_eq!(form.filament_cost, "120");
        assert_eq!(form.printer_power, "220");
    }

    #[test]
    fn test_apply_keeps_user_values() {
        let catalog = PresetCatalog::builtin();
        let mut form = RawCalculationForm {
            filament_cost: "99.90".into(),
            printer_power: "180".into(),
            ..Default::default()
        };

        catalog.apply(&mut form, &FilamentType::Abs);
        assert_eq!(form.filament_cost, "99.90");
        assert_eq!(form.printer_power, "180");
    }

    #[test]
    fn test_unknown_type_only_sets_label() {
        let catalog = PresetCatalog::builtin();
        let mut form = RawCalculationForm::default();

        assert!(!catalog.apply(&mut form, &FilamentType::parse("Nylon")));
        assert_eq!(form.filament_type, "Nylon");
        assert!(form.filament_cost.is_empty());
    }

    #[test]
    fn test_overrides() {
        let mut overrides = HashMap::new();
        overrides.insert(
            "pla".to_string(),
            FilamentPreset {
                cost_per_kg: 70.0,
                power_w: 190.0,
            },
        );
        overrides.insert(
            "Nylon".to_string(),
            FilamentPreset {
                cost_per_kg: 180.0,
                power_w: 270.0,
            },
        );
        overrides.insert(
            "ABS".to_string(),
            FilamentPreset {
                cost_per_kg: f64::NAN,
                power_w: 100.0,
            },
        );

        let catalog = PresetCatalog::builtin().with_overrides(overrides);
        assert_eq!(catalog.get(&FilamentType::Pla).unwrap().cost_per_kg, 70.0);
        assert_eq!(
            catalog.get(&FilamentType::parse("nylon")).map(|p| p.power_w),
            None,
            "标签大小写保留原文，Other 类型按原文匹配"
        );
        assert_eq!(
            catalog.get(&FilamentType::parse("Nylon")).unwrap().power_w,
            270.0
        );
        assert_eq!(catalog.get(&FilamentType::Abs).unwrap().cost_per_kg, 90.0);
    }
}
