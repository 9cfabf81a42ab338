//! 订单接口客户端
//!
//! 订单相关端点的薄封装。传输失败与非 2xx 状态映射为传输错误，
//! 响应体解析失败映射为载荷错误；本层不做任何自动重试。

use gloo_net::http::{Request, RequestBuilder};
use shopfront_shared::HEADER_AUTHORIZATION;
use shopfront_shared::order::{OrderDTO, OrderListResponse, OrderResult, RawOrderDetail};

use crate::error::{ShopError, ShopResult};
use crate::orders::OrderRefStore;
use crate::session::TokenStore;
use crate::web::storage::{KeyValueStore, LocalStorage};

#[derive(Clone, Debug)]
pub struct OrderApi {
    base_url: String,
    tokens: TokenStore<LocalStorage>,
}

impl OrderApi {
    pub fn new(base_url: String, tokens: TokenStore<LocalStorage>) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self { base_url, tokens }
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    // 认证头：存在令牌时附带 Bearer 凭证，由服务端独立复验
    fn with_auth(&self, req: RequestBuilder) -> RequestBuilder {
        match self.tokens.get() {
            Some(token) => req.header(HEADER_AUTHORIZATION, &format!("Bearer {}", token)),
            None => req,
        }
    }

    /// 下单
    ///
    /// 成功响应的副作用：把新订单 ID 写入 `OrderRefStore`（内存 + 持久化）。
    /// 记录发生在这里而不是调用方，调用方不可能遗忘。
    pub async fn place_order<S: KeyValueStore>(
        &self,
        order: &OrderDTO,
        refs: &OrderRefStore<S>,
    ) -> ShopResult<OrderResult> {
        let url = self.url("/orders");
        let res = self
            .with_auth(Request::post(&url))
            .json(order)
            .map_err(|e| ShopError::from(e).in_op("orders.place"))?
            .send()
            .await
            .map_err(|e| ShopError::from(e).in_op("orders.place"))?;

        if !res.ok() {
            return Err(ShopError::transport(format!("下单失败: {}", res.status()))
                .in_op("orders.place"));
        }

        let result: OrderResult = res
            .json()
            .await
            .map_err(|e| ShopError::payload(e.to_string()).in_op("orders.place"))?;

        refs.record_placed(result.id);
        Ok(result)
    }

    /// 按 ID 获取订单详情（原始传输形态，规范化交给调用方）
    pub async fn get_order_by_id(&self, order_id: i64) -> ShopResult<RawOrderDetail> {
        let url = self.url(&format!("/orders/{}", order_id));
        let res = self
            .with_auth(Request::get(&url))
            .send()
            .await
            .map_err(|e| ShopError::from(e).in_op_with("orders.fetch", order_id.to_string()))?;

        if !res.ok() {
            return Err(
                ShopError::transport(format!("获取订单失败: {}", res.status()))
                    .in_op_with("orders.fetch", order_id.to_string()),
            );
        }

        res.json()
            .await
            .map_err(|e| ShopError::payload(e.to_string()).in_op_with("orders.fetch", order_id.to_string()))
    }

    /// 按关键字分页查询订单
    pub async fn get_orders_by_keyword(
        &self,
        keyword: &str,
        page: u32,
        limit: u32,
    ) -> ShopResult<OrderListResponse> {
        let url = self.url("/orders/get-orders-by-keyword");
        let page = page.to_string();
        let limit = limit.to_string();
        let res = self
            .with_auth(Request::get(&url).query([
                ("keyword", keyword),
                ("page", page.as_str()),
                ("limit", limit.as_str()),
            ]))
            .send()
            .await
            .map_err(|e| ShopError::from(e).in_op("orders.search"))?;

        if !res.ok() {
            return Err(ShopError::transport(format!("查询订单失败: {}", res.status()))
                .in_op("orders.search"));
        }

        res.json()
            .await
            .map_err(|e| ShopError::payload(e.to_string()).in_op("orders.search"))
    }

    /// 更新订单
    pub async fn update_order(&self, order_id: i64, order: &OrderDTO) -> ShopResult<OrderResult> {
        let url = self.url(&format!("/orders/{}", order_id));
        let res = self
            .with_auth(Request::put(&url))
            .json(order)
            .map_err(|e| ShopError::from(e).in_op_with("orders.update", order_id.to_string()))?
            .send()
            .await
            .map_err(|e| ShopError::from(e).in_op_with("orders.update", order_id.to_string()))?;

        if !res.ok() {
            return Err(
                ShopError::transport(format!("更新订单失败: {}", res.status()))
                    .in_op_with("orders.update", order_id.to_string()),
            );
        }

        res.json()
            .await
            .map_err(|e| ShopError::payload(e.to_string()).in_op_with("orders.update", order_id.to_string()))
    }

    /// 删除订单（响应体为文本，只关心状态）
    pub async fn delete_order(&self, order_id: i64) -> ShopResult<()> {
        let url = self.url(&format!("/orders/{}", order_id));
        let res = self
            .with_auth(Request::delete(&url))
            .send()
            .await
            .map_err(|e| ShopError::from(e).in_op_with("orders.delete", order_id.to_string()))?;

        if !res.ok() {
            return Err(
                ShopError::transport(format!("删除订单失败: {}", res.status()))
                    .in_op_with("orders.delete", order_id.to_string()),
            );
        }

        Ok(())
    }

    /// 获取当前用户最近一次的订单详情
    pub async fn get_latest_order(&self) -> ShopResult<RawOrderDetail> {
        let url = self.url("/orders/latest");
        let res = self
            .with_auth(Request::get(&url))
            .send()
            .await
            .map_err(|e| ShopError::from(e).in_op("orders.latest"))?;

        if !res.ok() {
            return Err(
                ShopError::transport(format!("获取最近订单失败: {}", res.status()))
                    .in_op("orders.latest"),
            );
        }

        res.json()
            .await
            .map_err(|e| ShopError::payload(e.to_string()).in_op("orders.latest"))
    }
}
