//! 顶部导航组件
//!
//! 提供"我的订单"与登出入口。"我的订单"从 `OrderRefStore`
//! 解析最近订单 ID；没有记录时向用户报告错误，绝不导航到哨兵 ID。

use std::sync::Arc;

use leptos::prelude::*;

use crate::error::ShopError;
use crate::orders::OrderRefStore;
use crate::session::BrowserSession;
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use crate::web::storage::LocalStorage;

#[component]
pub fn Header() -> impl IntoView {
    let router = use_router();
    let session = expect_context::<BrowserSession>();
    let order_refs = expect_context::<Arc<OrderRefStore<LocalStorage>>>();

    let (notice, set_notice) = signal(Option::<String>::None);

    let on_home = move |_| router.navigate("/");

    let on_my_order = {
        let order_refs = order_refs.clone();
        move |_| match order_refs.current() {
            Some(id) => {
                set_notice.set(None);
                router.navigate(&AppRoute::OrderDetail(id).to_path());
            }
            None => {
                let err = ShopError::state("没有已记录的订单").in_op("header.my_order");
                web_sys::console::error_1(&err.to_string().into());
                set_notice.set(Some("No order has been recorded yet.".to_string()));
            }
        }
    };

    let on_logout = {
        let order_refs = order_refs.clone();
        move |_| {
            session.logout();
            order_refs.reset();
            router.navigate("/login");
        }
    };

    view! {
        <header class="navbar bg-base-100 shadow">
            <div class="flex-1">
                <button class="btn btn-ghost text-xl" on:click=on_home>"Shopfront"</button>
            </div>
            <div class="flex-none gap-2">
                <button class="btn btn-ghost" on:click=on_my_order>"My Order"</button>
                <button class="btn btn-ghost" on:click=on_logout>"Logout"</button>
            </div>
            <Show when=move || notice.get().is_some()>
                <div role="alert" class="alert alert-warning text-sm py-2">
                    <span>{move || notice.get().unwrap_or_default()}</span>
                </div>
            </Show>
        </header>
    }
}
