// ==========================================
// 3D 打印成本计算器 - 诊断入口
// ==========================================
// 职责: 初始化日志与 AppState,输出已保存历史记录概要
// 说明: 交互界面由展示层提供,此入口仅用于诊断
// ==========================================

use anyhow::anyhow;
use print_cost_calc::app::{get_default_db_path, AppState};
use print_cost_calc::engine::round_currency;
use print_cost_calc::{logging, APP_NAME, VERSION};

fn main() -> anyhow::Result<()> {
    // 初始化日志系统（格式由 PRINT_COST_LOG_FORMAT 决定）
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{}", APP_NAME);
    tracing::info!("系统版本: {}", VERSION);
    tracing::info!("==================================================");

    // 获取数据库路径
    let db_path = get_default_db_path();
    tracing::info!("使用数据库: {}", db_path);

    let state = AppState::new(db_path).map_err(|e| anyhow!(e))?;

    let history = state.calculator_api.list_history();
    if history.is_empty() {
        tracing::info!("{}", print_cost_calc::i18n::t("history.empty"));
        return Ok(());
    }

    tracing::info!(
        count = history.len(),
        capacity = state.settings.history_capacity,
        "已保存历史记录"
    );
    for (index, record) in history.iter().enumerate() {
        let summary = state.calculator_api.summary(&print_cost_calc::Calculation {
            input: record.input.clone(),
            breakdown: record.breakdown,
            computed_at: record.timestamp,
        });
        tracing::info!(
            index,
            timestamp = %record.timestamp.to_rfc3339(),
            filament = %summary.filament_type,
            duration = %summary.duration_label,
            final_price = round_currency(record.breakdown.final_price),
            "历史记录"
        );
    }

    Ok(())
}
