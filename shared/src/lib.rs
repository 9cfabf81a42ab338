//! Shopfront 共享模型
//!
//! 前端与测试共用的领域模型与常量：
//! - `order`: 订单 DTO、原始传输结构与规范化逻辑

pub mod order;

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// LocalStorage 中令牌的存储键
pub const TOKEN_STORAGE_KEY: &str = "access-token";

/// LocalStorage 中最近订单 ID 的存储键（十进制字符串）
pub const LATEST_ORDER_KEY: &str = "latestOrderId";

/// 商品缩略图的资源路径段（拼接在 API base 之后）
pub const IMAGES_PATH: &str = "products/images";

/// 认证请求头名称
pub const HEADER_AUTHORIZATION: &str = "Authorization";
