//! Shopfront 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route`: 路由定义与守卫规则（领域模型）
//! - `web::router`: 路由服务（核心引擎）
//! - `session`: 令牌存储与会话推导
//! - `orders`: 最近订单引用
//! - `api`: 订单接口客户端
//! - `components`: UI 组件层

pub mod api;
pub mod config;
pub mod error;
pub mod orders;
pub mod session;

mod components {
    pub mod header;
    pub mod login;
    pub mod order_detail;
}

// 原生 Web API 封装模块
// 此模块提供对浏览器原生 API 的轻量级封装，
// 核心逻辑只依赖其中的抽象接口。
pub mod web {
    pub mod route;
    pub mod router;
    pub mod storage;
}

use std::sync::Arc;

use crate::api::OrderApi;
use crate::components::header::Header;
use crate::components::login::LoginPage;
use crate::components::order_detail::OrderDetailPage;
use crate::config::AppConfig;
use crate::orders::OrderRefStore;
use crate::session::{SessionService, SystemClock, TokenStore};
use crate::web::route::AppRoute;
use crate::web::router::{Router, RouterOutlet};
use crate::web::storage::LocalStorage;

use leptos::prelude::*;

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Home => view! {
            <div class="hero min-h-screen bg-base-200">
                <div class="hero-content text-center">
                    <h1 class="text-3xl font-bold">"Shopfront"</h1>
                </div>
            </div>
        }
        .into_any(),
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::OrderDetail(id) => view! { <OrderDetailPage order_id=id /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"页面未找到"</p>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 构建配置与核心服务（每个进程一次）
    let config = AppConfig::from_env();
    let tokens = TokenStore::new(LocalStorage);
    let session = SessionService::new(tokens, SystemClock);
    let order_refs = Arc::new(OrderRefStore::new(LocalStorage));
    let api = OrderApi::new(config.api_base_url.clone(), tokens);

    // 2. 注入 Context 供组件层使用
    provide_context(config);
    provide_context(session);
    provide_context(order_refs);
    provide_context(api);

    view! {
        // 3. 路由器组件：注入会话服务实现守卫
        <Router session=session>
            <Header />
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
