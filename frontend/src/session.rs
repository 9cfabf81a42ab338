//! 会话模块
//!
//! 基于本地存储的令牌维护客户端会话视图：
//! - `TokenStore`: 令牌的纯存储，无解码、无网络
//! - `SessionService`: 解码令牌声明，推导过期状态与用户 ID
//!
//! 会话永远是按需重新计算的派生视图，除令牌本身外不缓存任何状态。
//! 声明解码不做签名校验：这里只用于 UI 门禁，服务端对每个认证请求
//! 独立复验令牌。

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde_json::{Map, Value};
use shopfront_shared::TOKEN_STORAGE_KEY;

use crate::error::{ShopError, ShopResult};
use crate::web::storage::KeyValueStore;

// =========================================================
// 时钟抽象
// =========================================================

/// 当前时间来源（秒级 Unix 时间戳）
///
/// 注入时钟使过期判断可以在测试中使用固定时间。
pub trait Clock {
    fn now_secs(&self) -> i64;
}

/// 系统时钟
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_secs(&self) -> i64 {
        #[cfg(target_arch = "wasm32")]
        {
            (js_sys::Date::now() / 1000.0) as i64
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs() as i64)
                .unwrap_or(0)
        }
    }
}

// =========================================================
// 令牌存储 (TokenStore)
// =========================================================

/// 令牌存储
///
/// 固定键 `access-token` 下的单个不透明字符串。
/// 登录（本仓库范围外）写入一次，登出或显式失效时删除，从不原地修改。
#[derive(Debug, Clone, Copy)]
pub struct TokenStore<S> {
    store: S,
}

impl<S: KeyValueStore> TokenStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// 读取令牌；键未设置时返回 `None`，无副作用
    pub fn get(&self) -> Option<String> {
        self.store.get(TOKEN_STORAGE_KEY)
    }

    /// 写入令牌，覆盖旧值
    pub fn set(&self, token: &str) {
        self.store.set(TOKEN_STORAGE_KEY, token);
    }

    /// 删除令牌；幂等，键本不存在也不报错
    pub fn clear(&self) {
        self.store.remove(TOKEN_STORAGE_KEY);
    }
}

// =========================================================
// 声明解码
// =========================================================

/// 解码令牌的声明集
///
/// 只解析令牌自含的结构（base64url 载荷段 + JSON），不访问网络、
/// 不需要签名密钥。解码失败是硬错误，调用方不得静默视为"有效"。
/// 解码结果按未受信映射处理，每个字段使用前单独校验。
fn decode_claims(token: &str) -> ShopResult<Map<String, Value>> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return Err(ShopError::decode("令牌段数非法，应为 header.payload.signature")
            .in_op("session.decode"));
    }

    let bytes = URL_SAFE_NO_PAD
        .decode(parts[1])
        .map_err(|e| {
            ShopError::decode(format!("载荷段 base64 解码失败: {}", e))
                .with_source(e)
                .in_op("session.decode")
        })?;

    let value: Value = serde_json::from_slice(&bytes).map_err(|e| {
        ShopError::decode(format!("载荷 JSON 解析失败: {}", e))
            .with_source(e)
            .in_op("session.decode")
    })?;

    match value {
        Value::Object(map) => Ok(map),
        _ => Err(ShopError::decode("令牌载荷不是 JSON 对象").in_op("session.decode")),
    }
}

/// 从未受信的声明集中读取 `userId`
///
/// 接受 JSON 数值或数值字符串两种形态；其余形态一律视为缺失（0），
/// 保持原有 parseInt 式的宽松语义。
fn claim_user_id(claims: &Map<String, Value>) -> i64 {
    match claims.get("userId") {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

/// 从未受信的声明集中读取 `exp`（秒级时间戳）
fn claim_exp(claims: &Map<String, Value>) -> Option<i64> {
    let exp = claims.get("exp")?;
    exp.as_i64().or_else(|| exp.as_f64().map(|f| f as i64))
}

// =========================================================
// 会话服务 (SessionService)
// =========================================================

/// 会话服务
///
/// 每次调用都从 `TokenStore` 重新读取并解码，不缓存任何派生状态。
#[derive(Debug, Clone, Copy)]
pub struct SessionService<S, C> {
    tokens: TokenStore<S>,
    clock: C,
}

impl<S: KeyValueStore, C: Clock> SessionService<S, C> {
    pub fn new(tokens: TokenStore<S>, clock: C) -> Self {
        Self { tokens, clock }
    }

    pub fn tokens(&self) -> &TokenStore<S> {
        &self.tokens
    }

    /// 令牌是否已过期
    ///
    /// 无令牌时返回 `Ok(false)`——报告"未过期"而不是"无效"。
    /// 这是刻意保留的历史行为：会话有效性必须由守卫的联合规则
    /// （`!is_expired() && user_id() > 0`）判定，任何调用方都不应
    /// 单凭本方法判断会话是否存在。
    ///
    /// 令牌存在但无法解码（或 `exp` 声明缺失/非数值）时返回错误。
    pub fn is_expired(&self) -> ShopResult<bool> {
        let Some(token) = self.tokens.get() else {
            return Ok(false);
        };

        let claims = decode_claims(&token)?;
        let exp = claim_exp(&claims).ok_or_else(|| {
            ShopError::decode("exp 声明缺失或非数值").in_op("session.is_expired")
        })?;

        Ok(exp <= self.clock.now_secs())
    }

    /// 当前用户 ID
    ///
    /// 无令牌或 `userId` 声明缺失时返回 `Ok(0)`；
    /// 令牌存在但无法解码时返回错误。
    pub fn user_id(&self) -> ShopResult<i64> {
        let Some(token) = self.tokens.get() else {
            return Ok(0);
        };

        let claims = decode_claims(&token)?;
        Ok(claim_user_id(&claims))
    }

    /// 登出：删除令牌
    ///
    /// 之后的会话检查自然回到"无会话"状态，无需额外标记。
    pub fn logout(&self) {
        self.tokens.clear();
    }
}

/// 浏览器环境下的会话服务
pub type BrowserSession = SessionService<crate::web::storage::LocalStorage, SystemClock>;

// =========================================================
// 测试模块
// =========================================================

#[cfg(test)]
pub mod tests;
