// ==========================================
// 3D 打印成本计算器 - 展示辅助
// ==========================================
// 职责: 时长标签、货币舍入（与地区无关）
// 说明: 货币符号/千分位等地区格式由展示层负责
// ==========================================

use crate::i18n::t_with_args;

/// 时长标签
///
/// - 0 小时: "{m} min"
/// - 0 分钟: "{h} h"
/// - 其他:  "{h}h {m}min"
pub fn format_duration(hours: u32, minutes: u32) -> String {
    let h = hours.to_string();
    let m = minutes.to_string();
    if hours == 0 {
        t_with_args("duration.minutes_only", &[("minutes", &m)])
    } else if minutes == 0 {
        t_with_args("duration.hours_only", &[("hours", &h)])
    } else {
        t_with_args("duration.hours_minutes", &[("hours", &h), ("minutes", &m)])
    }
}

/// 货币舍入: 保留 2 位小数（远离零方向取整）
#[inline]
pub fn round_currency(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{set_locale, LOCALE_TEST_LOCK};

    #[test]
    fn test_format_duration_variants() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        set_locale("en");

        assert_eq!(format_duration(0, 45), "45 min");
        assert_eq!(format_duration(3, 0), "3 h");
        assert_eq!(format_duration(2, 30), "2h 30min");
    }

    #[test]
    fn test_format_duration_follows_locale() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        set_locale("pt-BR");
        assert_eq!(format_duration(0, 10), "10 minutos");
        assert_eq!(format_duration(2, 0), "2 horas");
        set_locale("en");
    }

    #[test]
    fn test_round_currency() {
        assert_eq!(round_currency(2.4899999999999998), 2.49);
        assert_eq!(round_currency(0.375), 0.38);
        assert_eq!(round_currency(1.0), 1.0);
        assert_eq!(round_currency(0.0), 0.0);
    }
}
