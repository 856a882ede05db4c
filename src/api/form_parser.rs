// ==========================================
// 3D 打印成本计算器 - 表单解析
// ==========================================
// 职责: RawCalculationForm (文本) → CalculationInput (数值)
// 规则:
// - 小数字段: 取前导数字部分 ("12abc" → 12); 空/无法解析/非有限 → 0
// - 时长字段: 取前导整数部分 ("2.7" → 2); 空/无法解析 → 0
// - 负数一律钳制为 0
// 说明: 解析不报错,必填项由校验器判定
// ==========================================

use crate::domain::calculation::{CalculationInput, RawCalculationForm};
use crate::domain::types::FilamentType;

/// 解析原始表单
pub fn parse_form(form: &RawCalculationForm) -> CalculationInput {
    CalculationInput {
        filament_weight_g: parse_decimal(&form.filament_weight),
        filament_cost_per_kg: parse_decimal(&form.filament_cost),
        filament_type: FilamentType::parse(&form.filament_type),
        print_hours: parse_whole(&form.print_hours),
        print_minutes: parse_whole(&form.print_minutes),
        printer_power_w: parse_decimal(&form.printer_power),
        energy_cost_per_kwh: parse_decimal(&form.energy_cost),
        labor_cost_per_hour: parse_decimal(&form.labor_cost),
        maintenance_cost_per_hour: parse_decimal(&form.maintenance_cost),
        profit_margin_pct: parse_decimal(&form.profit_margin),
    }
}

/// 规范化已解析输入（非有限/负数字段钳制为 0）
pub fn normalize_input(mut input: CalculationInput) -> CalculationInput {
    for value in [
        &mut input.filament_weight_g,
        &mut input.filament_cost_per_kg,
        &mut input.printer_power_w,
        &mut input.energy_cost_per_kwh,
        &mut input.labor_cost_per_hour,
        &mut input.maintenance_cost_per_hour,
        &mut input.profit_margin_pct,
    ] {
        *value = non_negative(*value);
    }
    input
}

/// 小数字段解析
pub fn parse_decimal(raw: &str) -> f64 {
    let prefix = leading_decimal(raw.trim_start());
    let value = prefix.parse::<f64>().unwrap_or(0.0);
    non_negative(value)
}

/// 整数字段解析（小时/分钟）
pub fn parse_whole(raw: &str) -> u32 {
    let s = raw.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 || negative {
        return 0;
    }

    // 仅剩溢出一种失败,按上限处理
    rest[..digits_len].parse::<u32>().unwrap_or(u32::MAX)
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// 截取前导合法小数: [+-]digits[.digits][(e|E)[+-]digits]
fn leading_decimal(s: &str) -> &str {
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut has_digits = end > int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if frac_end > frac_start || has_digits {
            has_digits = has_digits || frac_end > frac_start;
            end = frac_end;
        }
    }

    if !has_digits {
        return "";
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    &s[..end]
}
