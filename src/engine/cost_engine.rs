// ==========================================
// 3D 打印成本计算器 - 成本计算引擎
// ==========================================
// 职责: CalculationInput → CostBreakdown (纯函数)
// 输入: 已通过校验的 CalculationInput
// 输出: CostBreakdown (不舍入)
// 红线: 引擎不做校验,不失败,不持有状态
// ==========================================

use crate::domain::calculation::{CalculationInput, CostBreakdown, PrintSummary};
use crate::engine::format::format_duration;
use tracing::instrument;

// ==========================================
// CostEngine - 成本计算引擎
// ==========================================
#[derive(Debug, Default, Clone, Copy)]
pub struct CostEngine;

impl CostEngine {
    /// 创建新的成本计算引擎
    pub fn new() -> Self {
        Self
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 计算成本明细
    ///
    /// 步骤:
    /// 1) 时长 = 小时 + 分钟/60
    /// 2) 材料 = (克/1000) × 每公斤价格
    /// 3) 电费 = (W/1000) × 时长 × 电价
    /// 4) 人工 = 时长 × 人工费率
    /// 5) 维护 = 时长 × 维护费率
    /// 6) 小计 = 2) + 3) + 4) + 5)
    /// 7) 利润 = 小计 × 利润率/100
    /// 8) 售价 = 小计 + 利润
    #[instrument(skip(self, input), fields(filament = %input.filament_type))]
    pub fn compute(&self, input: &CalculationInput) -> CostBreakdown {
        let print_time_hours = input.duration_hours();

        let material_cost = (input.filament_weight_g / 1000.0) * input.filament_cost_per_kg;
        let energy_cost =
            (input.printer_power_w / 1000.0) * print_time_hours * input.energy_cost_per_kwh;
        let labor_cost = print_time_hours * input.labor_cost_per_hour;
        let maintenance_cost = print_time_hours * input.maintenance_cost_per_hour;

        let subtotal = material_cost + energy_cost + labor_cost + maintenance_cost;
        let profit_amount = subtotal * (input.profit_margin_pct / 100.0);
        let final_price = subtotal + profit_amount;

        tracing::debug!(subtotal, final_price, "成本计算完成");

        CostBreakdown {
            material_cost,
            energy_cost,
            labor_cost,
            maintenance_cost,
            subtotal,
            profit_amount,
            final_price,
            print_time_hours,
        }
    }

    // ==========================================
    // 派生指标 (仅展示用)
    // ==========================================

    /// 每克成本 = 售价 / 耗材克数
    ///
    /// 克数非正或结果非有限值时返回 None
    pub fn cost_per_gram(&self, input: &CalculationInput, breakdown: &CostBreakdown) -> Option<f64> {
        safe_ratio(breakdown.final_price, input.filament_weight_g)
    }

    /// 每小时成本 = 售价 / 打印时长
    ///
    /// 时长非正或结果非有限值时返回 None
    pub fn cost_per_hour(&self, breakdown: &CostBreakdown) -> Option<f64> {
        safe_ratio(breakdown.final_price, breakdown.print_time_hours)
    }

    /// 生成打印摘要
    pub fn summarize(&self, input: &CalculationInput, breakdown: &CostBreakdown) -> PrintSummary {
        PrintSummary {
            filament_type: input.filament_type.clone(),
            filament_weight_g: input.filament_weight_g,
            print_hours: input.print_hours,
            print_minutes: input.print_minutes,
            duration_label: format_duration(input.print_hours, input.print_minutes),
            cost_per_gram: self.cost_per_gram(input, breakdown),
            cost_per_hour: self.cost_per_hour(breakdown),
            printer_power_w: input.printer_power_w,
            profit_margin_pct: input.profit_margin_pct,
        }
    }
}

fn safe_ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator.is_nan() || denominator <= 0.0 {
        return None;
    }
    let value = numerator / denominator;
    value.is_finite().then_some(value)
}
