// ==========================================
// 3D 打印成本计算器 - API 层
// ==========================================
// 职责: 提供业务 API 接口,供展示层调用
// ==========================================

pub mod calculator_api;
pub mod error;
pub mod form_parser;
pub mod validator;

// 重导出核心类型
pub use calculator_api::{Calculation, CalculatorApi, Confirmation};
pub use error::{ApiError, ApiResult, ValidationError};
pub use form_parser::{normalize_input, parse_form};
pub use validator::validate_input;
