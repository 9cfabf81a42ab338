//! 订单详情页面
//!
//! 按路由携带的订单 ID 拉取详情，规范化后展示，并把 ID
//! 记入最近订单引用。完成回调以视图存活标记做门禁：
//! 用户已经离开时，迟到的响应不写任何状态。

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos::prelude::*;
use leptos::task::spawn_local;
use shopfront_shared::order::{OrderDetail, assemble_order_detail};

use crate::api::OrderApi;
use crate::config::AppConfig;
use crate::error::ShopError;
use crate::orders::OrderRefStore;
use crate::web::storage::LocalStorage;

#[component]
pub fn OrderDetailPage(order_id: i64) -> impl IntoView {
    let api = expect_context::<OrderApi>();
    let config = expect_context::<AppConfig>();
    let order_refs = expect_context::<Arc<OrderRefStore<LocalStorage>>>();

    let (order, set_order) = signal(Option::<OrderDetail>::None);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    // 视图存活标记
    let alive = Arc::new(AtomicBool::new(true));
    on_cleanup({
        let alive = alive.clone();
        move || alive.store(false, Ordering::Relaxed)
    });

    spawn_local(async move {
        let result = api.get_order_by_id(order_id).await.and_then(|raw| {
            assemble_order_detail(raw, &config.api_base_url).map_err(ShopError::from)
        });

        if !alive.load(Ordering::Relaxed) {
            return;
        }

        match result {
            Ok(detail) => {
                // 查看订单同样刷新"最近订单"引用（仅内存）
                order_refs.record_fetched(detail.id);
                set_order.set(Some(detail));
            }
            Err(e) => {
                web_sys::console::error_1(&e.to_string().into());
                set_error_msg.set(Some(e.message().to_string()));
            }
        }
    });

    view! {
        <div class="p-6 max-w-3xl mx-auto">
            <Show when=move || error_msg.get().is_some()>
                <div role="alert" class="alert alert-error text-sm py-2">
                    <span>{move || error_msg.get().unwrap_or_default()}</span>
                </div>
            </Show>
            {move || order.get().map(|detail| view! {
                <div class="card bg-base-100 shadow">
                    <div class="card-body">
                        <h2 class="card-title">{format!("Order #{}", detail.id)}</h2>
                        <p>{detail.fullname.clone()} " · " {detail.phone_number.clone()}</p>
                        <p>{detail.shipping_address.clone()}</p>
                        <p>
                            "Ordered " {detail.order_date.format("%Y-%m-%d").to_string()}
                            ", ships " {detail.shipping_date.format("%Y-%m-%d").to_string()}
                        </p>
                        <p class="font-semibold">{format!("Total: {:.2}", detail.total_money)}</p>
                        <ul class="mt-2 space-y-2">
                            {detail.order_details.iter().map(|item| view! {
                                <li class="flex items-center gap-3">
                                    <img
                                        class="w-12 h-12 rounded"
                                        src=item.product.thumbnail.clone()
                                        alt=item.product.name.clone()
                                    />
                                    <span>{item.product.name.clone()}</span>
                                    <span class="text-base-content/70">
                                        {format!("x{}", item.number_of_products)}
                                    </span>
                                </li>
                            }).collect_view()}
                        </ul>
                    </div>
                </div>
            })}
        </div>
    }
}
