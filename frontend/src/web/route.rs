//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义应用的所有路由及其属性，以及受保护路由的守卫规则。

use std::fmt::Display;

use crate::session::{Clock, SessionService};
use crate::web::storage::KeyValueStore;

/// 应用路由枚举
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 首页 (默认路由)
    #[default]
    Home,
    /// 登录页面（守卫拒绝时的固定重定向目标）
    Login,
    /// 订单详情 (需要认证，携带数值订单 ID)
    OrderDetail(i64),
    /// 页面未找到
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    ///
    /// `/orders/{id}` 的 id 必须是数值，否则视为未找到。
    pub fn from_path(path: &str) -> Self {
        match path {
            "/" => Self::Home,
            "/login" => Self::Login,
            _ => match path.strip_prefix("/orders/") {
                Some(rest) => rest
                    .parse::<i64>()
                    .map(Self::OrderDetail)
                    .unwrap_or(Self::NotFound),
                None => Self::NotFound,
            },
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Login => "/login".to_string(),
            Self::OrderDetail(id) => format!("/orders/{}", id),
            Self::NotFound => "/404".to_string(),
        }
    }

    /// **核心守卫逻辑：定义该路由是否需要认证**
    pub fn requires_auth(&self) -> bool {
        matches!(self, Self::OrderDetail(_))
    }

    /// 获取认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

// =========================================================
// 守卫规则 (Guard)
// =========================================================

/// 一次导航尝试的守卫裁决
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardVerdict {
    /// 放行导航，无副作用
    Allow,
    /// 拒绝导航，重定向到登录路由
    Deny,
}

impl GuardVerdict {
    pub fn allowed(&self) -> bool {
        matches!(self, GuardVerdict::Allow)
    }
}

/// 评估当前会话能否通过守卫
///
/// 放行条件是联合的：`!is_expired() && user_id() > 0`。
/// 两个条件缺一不可——一个解码出 `userId = 0` 的令牌即使未过期
/// 也按未认证处理；反之 `is_expired()` 的"无令牌视为未过期"也由
/// `user_id() == 0` 兜住。任一检查返回解码错误同样拒绝。
pub fn evaluate_session<S, C>(session: &SessionService<S, C>) -> GuardVerdict
where
    S: KeyValueStore,
    C: Clock,
{
    match (session.is_expired(), session.user_id()) {
        (Ok(false), Ok(uid)) if uid > 0 => GuardVerdict::Allow,
        _ => GuardVerdict::Deny,
    }
}

// =========================================================
// 测试模块
// =========================================================
