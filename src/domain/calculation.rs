// ==========================================
// 3D 打印成本计算器 - 计算领域模型
// ==========================================
// 职责: 输入记录、成本明细、打印摘要
// 红线: 不含计算逻辑,不含数据访问逻辑
// ==========================================

use crate::domain::types::FilamentType;
use serde::{Deserialize, Serialize};

// ==========================================
// CalculationInput - 计算输入
// ==========================================
// 不变量 (由校验器在计算前保证):
// - filament_weight_g > 0
// - filament_cost_per_kg > 0
// - print_hours + print_minutes > 0
// - 所有数值字段非负
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationInput {
    // ===== 耗材 =====
    pub filament_weight_g: f64,    // 耗材用量 (克)
    pub filament_cost_per_kg: f64, // 耗材单价 (货币/公斤)
    pub filament_type: FilamentType,

    // ===== 打印时长 =====
    pub print_hours: u32,
    pub print_minutes: u32,

    // ===== 费率 (缺省为 0) =====
    pub printer_power_w: f64,           // 打印机功率 (W)
    pub energy_cost_per_kwh: f64,       // 电价 (货币/kWh)
    pub labor_cost_per_hour: f64,       // 人工费率 (货币/小时)
    pub maintenance_cost_per_hour: f64, // 维护/折旧费率 (货币/小时)
    pub profit_margin_pct: f64,         // 利润率 (%)
}

impl CalculationInput {
    /// 打印时长（十进制小时）
    pub fn duration_hours(&self) -> f64 {
        self.print_hours as f64 + self.print_minutes as f64 / 60.0
    }
}

// ==========================================
// CostBreakdown - 成本明细
// ==========================================
// 由 CalculationInput 唯一决定,计算后不可变
// 货币值不做舍入,舍入仅在展示时进行
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub material_cost: f64,
    pub energy_cost: f64,
    pub labor_cost: f64,
    pub maintenance_cost: f64,
    pub subtotal: f64,      // 四项成本之和（不含利润）
    pub profit_amount: f64, // subtotal × margin / 100
    pub final_price: f64,   // subtotal + profit_amount
    pub print_time_hours: f64,
}

impl CostBreakdown {
    /// 全部字段为有限值（极端输入可能溢出为 inf）
    pub fn is_finite(&self) -> bool {
        [
            self.material_cost,
            self.energy_cost,
            self.labor_cost,
            self.maintenance_cost,
            self.subtotal,
            self.profit_amount,
            self.final_price,
            self.print_time_hours,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

// ==========================================
// PrintSummary - 打印摘要
// ==========================================
// 仅用于展示,按需派生,不持久化
// 派生指标在除数为 0 时为 None（未定义）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrintSummary {
    pub filament_type: FilamentType,
    pub filament_weight_g: f64,
    pub print_hours: u32,
    pub print_minutes: u32,
    pub duration_label: String,
    pub cost_per_gram: Option<f64>,
    pub cost_per_hour: Option<f64>,
    pub printer_power_w: f64,
    pub profit_margin_pct: f64,
}

// ==========================================
// RawCalculationForm - 原始表单记录
// ==========================================
// 外部表单收集方提交的原始文本字段
// 由 api::form_parser 解析为 CalculationInput
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCalculationForm {
    pub filament_weight: String,
    pub filament_cost: String,
    pub filament_type: String,
    pub print_hours: String,
    pub print_minutes: String,
    pub printer_power: String,
    pub energy_cost: String,
    pub labor_cost: String,
    pub maintenance_cost: String,
    pub profit_margin: String,
}
