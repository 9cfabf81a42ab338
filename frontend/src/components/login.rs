//! 登录页面
//!
//! 令牌签发（登录流程）由账户服务完成，不在本仓库内；
//! 这里只是守卫拒绝导航时的固定落点。

use leptos::prelude::*;

#[component]
pub fn LoginPage() -> impl IntoView {
    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content text-center">
                <div class="max-w-md">
                    <h1 class="text-3xl font-bold">"Sign in required"</h1>
                    <p class="py-4 text-base-content/70">
                        "Your session is missing or has expired. Sign in through the account service to continue."
                    </p>
                </div>
            </div>
        </div>
    }
}
