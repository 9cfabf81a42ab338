//! 应用配置模块
//!
//! 唯一的外部配置值是 API base URL：既是订单端点的前缀，
//! 也是商品图片资源的前缀。编译期通过环境变量覆盖。

/// 默认 API base（本地开发后端）
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8088/api/v1";

/// 应用配置
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// API base URL（尾部斜杠已去除）
    pub api_base_url: String,
}

impl AppConfig {
    /// 读取编译期配置（`SHOPFRONT_API_URL`），缺省用本地后端
    pub fn from_env() -> Self {
        Self {
            api_base_url: option_env!("SHOPFRONT_API_URL")
                .unwrap_or(DEFAULT_API_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
        }
    }
}
