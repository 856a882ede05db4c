// ==========================================
// 3D 打印成本计算器 - 日志
// ==========================================
// RUST_LOG 控制级别（默认 info）
// PRINT_COST_LOG_FORMAT 控制输出格式: text（默认）/ json
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// 日志格式环境变量
pub const LOG_FORMAT_ENV: &str = "PRINT_COST_LOG_FORMAT";

/// 输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    /// 解析格式名（大小写不敏感，未知值按 text 处理）
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Text
        }
    }

    /// 从 PRINT_COST_LOG_FORMAT 读取
    pub fn from_env() -> Self {
        std::env::var(LOG_FORMAT_ENV)
            .map(|v| Self::parse(&v))
            .unwrap_or_default()
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// 按环境变量初始化日志
///
/// ```no_run
/// print_cost_calc::logging::init();
/// ```
pub fn init() {
    init_with(LogFormat::from_env());
}

/// 以指定格式初始化日志（进程内只能调用一次）
pub fn init_with(format: LogFormat) {
    match format {
        LogFormat::Text => fmt()
            .with_env_filter(env_filter())
            .with_target(true)
            .with_line_number(true)
            .init(),
        LogFormat::Json => fmt().json().with_env_filter(env_filter()).with_target(true).init(),
    }
}

/// 测试用日志: debug 级别，输出交给测试框架捕获；重复调用无副作用
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("print_cost_calc=debug"))
        .with_test_writer()
        .try_init();
}
