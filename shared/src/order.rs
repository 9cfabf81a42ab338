//! 订单模型模块
//!
//! 定义订单的三类结构：
//! - 下单请求 DTO（`OrderDTO` / `CartItemDTO`）
//! - 原始传输结构（`RawOrderDetail` 等，日期为 `[年, 月, 日]` 数组）
//! - 规范化结构（`OrderDetail`，日期为真正的 `NaiveDate`，缩略图为绝对 URL）
//!
//! 规范化由 `assemble_order_detail` 完成，传输结构不应泄漏到展示层。

use crate::IMAGES_PATH;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

// =========================================================
// 下单请求 (Placement DTO)
// =========================================================

/// 购物车条目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItemDTO {
    pub product_id: i64,
    pub quantity: i32,
}

/// 下单请求体
///
/// 字段名与后端的 JSON 命名保持一致（snake_case）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDTO {
    pub user_id: i64,
    pub fullname: String,
    pub email: String,
    pub phone_number: String,
    pub address: String,
    #[serde(default)]
    pub note: String,
    pub total_money: f64,
    pub shipping_method: String,
    pub shipping_address: String,
    pub payment_method: String,
    pub cart_items: Vec<CartItemDTO>,
}

/// 下单成功的响应
///
/// 后端返回完整的订单实体，这里只消费确定存在的字段，
/// 其余字段宽松处理，避免对响应形状做多余假设。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderResult {
    pub id: i64,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub total_money: Option<f64>,
}

// =========================================================
// 原始传输结构 (Raw payload)
// =========================================================

/// 商品快照（传输形态，`thumbnail` 为裸文件名）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawProductSnapshot {
    pub id: i64,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub thumbnail: String,
}

/// 订单行条目（传输形态）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawOrderLineItem {
    pub id: i64,
    pub product: RawProductSnapshot,
    pub price: f64,
    pub number_of_products: i32,
    pub total_money: f64,
}

/// 订单详情（传输形态）
///
/// `order_date` / `shipping_date` 是 `[年, 月(1 起), 日]` 的数值数组。
/// 字段缺失不在反序列化时失败，而是交给 `assemble_order_detail`
/// 统一报告为形状错误。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawOrderDetail {
    pub id: i64,
    pub user_id: i64,
    pub fullname: String,
    pub phone_number: String,
    pub email: String,
    pub address: String,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub order_date: Option<Vec<i32>>,
    #[serde(default)]
    pub shipping_date: Option<Vec<i32>>,
    pub status: String,
    pub total_money: f64,
    pub shipping_method: String,
    pub shipping_address: String,
    pub payment_method: String,
    #[serde(default)]
    pub order_details: Vec<RawOrderLineItem>,
}

/// 按关键字分页查询的响应
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderListResponse {
    pub orders: Vec<RawOrderDetail>,
    #[serde(rename = "totalPages")]
    pub total_pages: i32,
}

// =========================================================
// 规范化结构 (Normalized)
// =========================================================

/// 商品快照（规范化后，`thumbnail` 为绝对 URL）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub thumbnail: String,
}

/// 订单行条目（规范化后）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLineItem {
    pub product: ProductSnapshot,
    pub price: f64,
    pub number_of_products: i32,
    pub total_money: f64,
}

/// 订单详情（规范化后，可直接交给展示层）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDetail {
    pub id: i64,
    pub user_id: i64,
    pub fullname: String,
    pub phone_number: String,
    pub email: String,
    pub address: String,
    pub note: String,
    pub order_date: NaiveDate,
    pub shipping_date: NaiveDate,
    pub status: String,
    pub total_money: f64,
    pub shipping_method: String,
    pub shipping_address: String,
    pub payment_method: String,
    pub order_details: Vec<OrderLineItem>,
}

// =========================================================
// 规范化错误
// =========================================================

/// 订单详情规范化失败
///
/// 日期形状错误是致命的：绝不回退到"当前时间"或任意默认值，
/// 让缺陷在调用处可见。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssembleError {
    /// 日期字段缺失
    MissingDate { field: &'static str },
    /// 日期字段不是合法的 `[年, 月, 日]` 数组
    InvalidDate { field: &'static str, parts: Vec<i32> },
}

impl fmt::Display for AssembleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssembleError::MissingDate { field } => {
                write!(f, "日期字段缺失: {}", field)
            }
            AssembleError::InvalidDate { field, parts } => {
                write!(f, "日期字段非法: {} = {:?}（应为 [年, 月, 日]）", field, parts)
            }
        }
    }
}

impl std::error::Error for AssembleError {}

// =========================================================
// 规范化逻辑 (Assembler)
// =========================================================

/// 由 `[年, 月(1 起), 日]` 构造日期
///
/// chrono 的月份同为 1 起，三个分量必须逐一对应，不引入任何时区偏移。
fn date_from_parts(
    field: &'static str,
    parts: Option<&Vec<i32>>,
) -> Result<NaiveDate, AssembleError> {
    let parts = parts.ok_or(AssembleError::MissingDate { field })?;
    let invalid = || AssembleError::InvalidDate {
        field,
        parts: parts.clone(),
    };

    let &[year, month, day] = parts.as_slice() else {
        return Err(invalid());
    };

    let month = u32::try_from(month).map_err(|_| invalid())?;
    let day = u32::try_from(day).map_err(|_| invalid())?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}

/// 将裸文件名改写为绝对资源 URL：`{base}/products/images/{filename}`
pub fn image_url(base: &str, filename: &str) -> String {
    format!("{}/{}/{}", base.trim_end_matches('/'), IMAGES_PATH, filename)
}

/// 规范化订单详情
///
/// - 两个日期数组重建为 `NaiveDate`（形状错误即失败）
/// - 每个行条目的缩略图改写为绝对 URL
pub fn assemble_order_detail(
    raw: RawOrderDetail,
    image_base: &str,
) -> Result<OrderDetail, AssembleError> {
    let order_date = date_from_parts("order_date", raw.order_date.as_ref())?;
    let shipping_date = date_from_parts("shipping_date", raw.shipping_date.as_ref())?;

    let order_details = raw
        .order_details
        .into_iter()
        .map(|item| OrderLineItem {
            product: ProductSnapshot {
                id: item.product.id,
                name: item.product.name,
                price: item.product.price,
                thumbnail: image_url(image_base, &item.product.thumbnail),
            },
            price: item.price,
            number_of_products: item.number_of_products,
            total_money: item.total_money,
        })
        .collect();

    Ok(OrderDetail {
        id: raw.id,
        user_id: raw.user_id,
        fullname: raw.fullname,
        phone_number: raw.phone_number,
        email: raw.email,
        address: raw.address,
        note: raw.note,
        order_date,
        shipping_date,
        status: raw.status,
        total_money: raw.total_money,
        shipping_method: raw.shipping_method,
        shipping_address: raw.shipping_address,
        payment_method: raw.payment_method,
        order_details,
    })
}

// =========================================================
// 测试模块
// =========================================================

#[cfg(test)]
mod tests;
