// ==========================================
// 3D 打印成本计算器 - 计算器 API
// ==========================================
// 职责: 解析 → 校验 → 计算 → 持有当前结果 → 保存/查询/删除/清空历史
// 状态: 当前计算结果由 CalculatorApi 显式持有,无全局单例
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::api::form_parser::{normalize_input, parse_form};
use crate::api::validator::validate_input;
use crate::domain::calculation::{CalculationInput, CostBreakdown, PrintSummary, RawCalculationForm};
use crate::domain::history::HistoryRecord;
use crate::domain::types::FilamentType;
use crate::engine::{CostEngine, PresetCatalog};
use crate::i18n::t;
use crate::repository::history_repo::HistoryStore;

// ==========================================
// Calculation - 一次计算结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Calculation {
    pub input: CalculationInput,
    pub breakdown: CostBreakdown,
    pub computed_at: DateTime<Utc>,
}

// ==========================================
// Confirmation - 破坏性操作确认
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

// ==========================================
// CalculatorApi - 计算器 API
// ==========================================

/// 计算器API
///
/// 职责：
/// 1. 表单解析与校验
/// 2. 成本计算并持有当前结果
/// 3. 历史记录保存、查询、删除、清空
pub struct CalculatorApi {
    engine: CostEngine,
    presets: PresetCatalog,
    history: Arc<dyn HistoryStore>,
    current: Option<Calculation>,
}

impl CalculatorApi {
    /// 创建新的CalculatorApi实例
    pub fn new(history: Arc<dyn HistoryStore>, presets: PresetCatalog) -> Self {
        Self {
            engine: CostEngine::new(),
            presets,
            history,
            current: None,
        }
    }

    // ==========================================
    // 计算
    // ==========================================

    /// 解析、校验并计算（不改变当前结果）
    pub fn evaluate(&self, form: &RawCalculationForm) -> ApiResult<Calculation> {
        self.evaluate_input(parse_form(form))
    }

    /// 校验并计算已解析输入（不改变当前结果）
    pub fn evaluate_input(&self, input: CalculationInput) -> ApiResult<Calculation> {
        let input = normalize_input(input);
        if let Err(e) = validate_input(&input) {
            tracing::info!(reason = %e, "输入校验未通过");
            return Err(ApiError::Validation(e));
        }

        let breakdown = self.engine.compute(&input);
        if !breakdown.is_finite() {
            // 照常返回；保存时由仓储拒绝
            tracing::warn!(final_price = breakdown.final_price, "计算结果溢出为非有限值");
        }
        Ok(Calculation {
            input,
            breakdown,
            computed_at: Utc::now(),
        })
    }

    /// 计算并设为当前结果
    ///
    /// # 返回
    /// - Ok(Calculation): 新的当前结果
    /// - Err(ApiError::Validation): 校验失败，当前结果保持不变
    pub fn calculate(&mut self, form: &RawCalculationForm) -> ApiResult<Calculation> {
        let calculation = self.evaluate(form)?;
        self.current = Some(calculation.clone());
        Ok(calculation)
    }

    /// 以已解析输入计算并设为当前结果
    pub fn calculate_input(&mut self, input: CalculationInput) -> ApiResult<Calculation> {
        let calculation = self.evaluate_input(input)?;
        self.current = Some(calculation.clone());
        Ok(calculation)
    }

    /// 当前结果
    pub fn current(&self) -> Option<&Calculation> {
        self.current.as_ref()
    }

    /// 打印摘要（含每克/每小时成本）
    pub fn summary(&self, calculation: &Calculation) -> PrintSummary {
        self.engine.summarize(&calculation.input, &calculation.breakdown)
    }

    /// 选择耗材类型并预填表单
    pub fn apply_preset(&self, form: &mut RawCalculationForm, filament_type: &FilamentType) -> bool {
        self.presets.apply(form, filament_type)
    }

    // ==========================================
    // 历史记录
    // ==========================================

    /// 保存指定计算结果
    pub fn save(&self, calculation: &Calculation) -> ApiResult<HistoryRecord> {
        self.history
            .save(calculation.input.clone(), calculation.breakdown)
            .map_err(|e| {
                tracing::warn!(error = %e, "历史记录保存失败，计算结果保留");
                ApiError::from(e)
            })
    }

    /// 保存当前结果
    ///
    /// # 返回
    /// - Err(ApiError::NothingToSave): 尚无计算结果
    /// - Err(ApiError::PersistenceWrite): 写入失败（当前结果不丢失）
    pub fn save_current(&self) -> ApiResult<HistoryRecord> {
        let calculation = self.current.as_ref().ok_or(ApiError::NothingToSave)?;
        self.save(calculation)
    }

    /// 历史记录列表（最新在前）
    pub fn list_history(&self) -> Vec<HistoryRecord> {
        self.history.list()
    }

    /// 按位置删除历史记录（越界忽略）
    pub fn delete_history_item(&self, index: usize) -> ApiResult<bool> {
        Ok(self.history.delete_at(index)?)
    }

    /// 保存成功提示
    pub fn saved_message(&self) -> String {
        t("calculator.saved")
    }

    /// 清空历史前的确认提示
    pub fn clear_history_prompt(&self) -> String {
        t("history.clear_confirm")
    }

    /// 清空历史记录
    ///
    /// # 返回
    /// - Ok(true): 已清空
    /// - Ok(false): 未确认，未做任何修改
    pub fn clear_history(&self, confirmation: Confirmation) -> ApiResult<bool> {
        match confirmation {
            Confirmation::Confirmed => {
                self.history.clear()?;
                Ok(true)
            }
            Confirmation::Declined => {
                tracing::debug!("清空历史记录未确认，忽略");
                Ok(false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::error::ValidationError;
    use crate::engine::round_currency;
    use crate::repository::{
        MemorySlotStore, RepositoryError, RepositoryResult, SlotHistoryRepository, SlotStore,
    };

    /// 写入总是失败的槽（模拟存储不可用）
    struct FailingSlotStore;

    impl SlotStore for FailingSlotStore {
        fn read(&self, _key: &str) -> RepositoryResult<Option<String>> {
            Ok(None)
        }

        fn write(&self, key: &str, _value: &str) -> RepositoryResult<()> {
            Err(RepositoryError::WriteFailed {
                key: key.to_string(),
                message: "quota exceeded".to_string(),
            })
        }

        fn remove(&self, _key: &str) -> RepositoryResult<()> {
            Ok(())
        }
    }

    fn setup() -> CalculatorApi {
        let slot = Arc::new(MemorySlotStore::new());
        let history = Arc::new(SlotHistoryRepository::new(slot));
        CalculatorApi::new(history, PresetCatalog::builtin())
    }

    fn scenario_form() -> RawCalculationForm {
        RawCalculationForm {
            filament_weight: "20".into(),
            filament_cost: "85".into(),
            filament_type: "PLA".into(),
            print_hours: "2".into(),
            print_minutes: "30".into(),
            printer_power: "200".into(),
            energy_cost: "0.75".into(),
            labor_cost: "0".into(),
            maintenance_cost: "0".into(),
            profit_margin: "20".into(),
        }
    }

    #[test]
    fn test_calculate_sets_current() {
        let mut api = setup();
        assert!(api.current().is_none());

        let calc = api.calculate(&scenario_form()).unwrap();
        assert_eq!(round_currency(calc.breakdown.final_price), 2.49);
        assert_eq!(api.current(), Some(&calc));
    }

    #[test]
    fn test_validation_failure_keeps_previous_current() {
        let mut api = setup();
        let first = api.calculate(&scenario_form()).unwrap();

        let mut bad = scenario_form();
        bad.filament_weight = "0".into();
        let err = api.calculate(&bad).unwrap_err();
        assert!(matches!(
            err,
            ApiError::Validation(ValidationError::MissingFilamentWeight)
        ));
        assert_eq!(api.current(), Some(&first));
        assert!(api.list_history().is_empty());
    }

    #[test]
    fn test_save_current_without_calculation() {
        let api = setup();
        assert!(matches!(api.save_current(), Err(ApiError::NothingToSave)));
    }

    #[test]
    fn test_save_current_then_list() {
        let mut api = setup();
        let calc = api.calculate(&scenario_form()).unwrap();
        let record = api.save_current().unwrap();

        assert_eq!(record.input, calc.input);
        assert_eq!(api.list_history(), vec![record]);
    }

    #[test]
    fn test_persistence_failure_keeps_current() {
        let slot = Arc::new(FailingSlotStore);
        let history = Arc::new(SlotHistoryRepository::new(slot));
        let mut api = CalculatorApi::new(history, PresetCatalog::builtin());

        let calc = api.calculate(&scenario_form()).unwrap();
        let err = api.save_current().unwrap_err();
        assert!(matches!(err, ApiError::PersistenceWrite(_)));
        assert!(!err.is_blocking());
        assert_eq!(api.current(), Some(&calc));
        assert!(api.list_history().is_empty());
    }

    #[test]
    fn test_overflowing_result_is_not_saved() {
        let mut api = setup();
        for weight in 1..=5 {
            let mut form = scenario_form();
            form.filament_weight = weight.to_string();
            api.calculate(&form).unwrap();
            api.save_current().unwrap();
        }

        let mut form = scenario_form();
        form.filament_weight = "1e300".into();
        form.filament_cost = "1e300".into();
        let calc = api.calculate(&form).unwrap();
        assert!(!calc.breakdown.is_finite());

        let err = api.save_current().unwrap_err();
        assert!(matches!(err, ApiError::PersistenceWrite(_)));
        assert!(!err.is_blocking());
        assert_eq!(api.current(), Some(&calc));
        assert_eq!(api.list_history().len(), 5);
    }

    #[test]
    fn test_clear_requires_confirmation() {
        let mut api = setup();
        api.calculate(&scenario_form()).unwrap();
        api.save_current().unwrap();

        assert!(!api.clear_history(Confirmation::Declined).unwrap());
        assert_eq!(api.list_history().len(), 1);

        assert!(api.clear_history(Confirmation::Confirmed).unwrap());
        assert!(api.list_history().is_empty());
    }

    #[test]
    fn test_prompt_messages() {
        let _guard = crate::i18n::LOCALE_TEST_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        crate::i18n::set_locale("en");
        let api = setup();
        assert_eq!(api.saved_message(), "Saved!");
        assert_eq!(
            api.clear_history_prompt(),
            "Are you sure you want to clear the entire history?"
        );
    }

    #[test]
    fn test_calculate_input_normalizes_optional_fields() {
        let mut api = setup();
        let mut input = crate::api::form_parser::parse_form(&scenario_form());
        input.labor_cost_per_hour = -3.0;

        let calc = api.calculate_input(input).unwrap();
        assert_eq!(calc.input.labor_cost_per_hour, 0.0);
        assert_eq!(calc.breakdown.labor_cost, 0.0);
    }

    #[test]
    fn test_apply_preset_then_calculate() {
        let api = setup();
        let mut form = RawCalculationForm {
            filament_weight: "100".into(),
            print_hours: "1".into(),
            ..Default::default()
        };

        assert!(api.apply_preset(&mut form, &FilamentType::Abs));
        let calc = api.evaluate(&form).unwrap();
        assert_eq!(calc.input.filament_cost_per_kg, 90.0);
        assert_eq!(calc.input.printer_power_w, 250.0);
        assert!((calc.breakdown.material_cost - 9.0).abs() < 1e-9);
    }
}
