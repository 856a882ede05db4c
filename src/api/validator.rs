// ==========================================
// 3D 打印成本计算器 - 输入校验器
// ==========================================
// 职责: 计算前的必填项校验（按顺序,首个失败即返回）
// 1) 耗材用量 > 0
// 2) 耗材单价 > 0
// 3) 打印时长 > 0（小时与分钟不同时为 0）
// 说明: 其余数值字段缺省为 0,不做校验
// ==========================================

use crate::api::error::ValidationError;
use crate::domain::calculation::CalculationInput;

/// 校验计算输入
pub fn validate_input(input: &CalculationInput) -> Result<(), ValidationError> {
    if !is_positive(input.filament_weight_g) {
        return Err(ValidationError::MissingFilamentWeight);
    }
    if !is_positive(input.filament_cost_per_kg) {
        return Err(ValidationError::MissingFilamentCost);
    }
    if input.print_hours == 0 && input.print_minutes == 0 {
        return Err(ValidationError::MissingPrintDuration);
    }
    Ok(())
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
