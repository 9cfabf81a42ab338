//! 最近订单引用模块
//!
//! 跟踪当前浏览器上下文里最近一次下单/查看的订单 ID，
//! 内存字段与持久存储互为镜像，页面刷新后仍可恢复。
//!
//! 这是一个显式持有的状态对象：存储依赖通过构造注入，
//! 每个进程构造一次，构造即完成初始化读取，不存在环境全局变量。

use std::sync::Mutex;

use shopfront_shared::LATEST_ORDER_KEY;

use crate::web::storage::KeyValueStore;

/// 最近订单引用
///
/// 任何时刻至多一个值（不是历史记录），只覆盖、不合并。
#[derive(Debug)]
pub struct OrderRefStore<S> {
    store: S,
    latest: Mutex<Option<i64>>,
}

impl<S: KeyValueStore> OrderRefStore<S> {
    /// 构造并完成初始化读取
    ///
    /// 从持久存储恢复 `latestOrderId`；值缺失或无法解析为整数时
    /// 视为没有记录。构造在进程生命周期内只发生一次。
    pub fn new(store: S) -> Self {
        let latest = store
            .get(LATEST_ORDER_KEY)
            .and_then(|s| s.trim().parse::<i64>().ok());

        Self {
            store,
            latest: Mutex::new(latest),
        }
    }

    /// 下单成功后记录订单 ID
    ///
    /// 更新内存值并以十进制字符串持久化。此方法由下单响应的
    /// 成功路径直接调用（见 `OrderApi::place_order`），
    /// 不是一个调用方可能遗忘的独立步骤。
    pub fn record_placed(&self, id: i64) {
        *self.latest.lock().unwrap() = Some(id);
        self.store.set(LATEST_ORDER_KEY, &id.to_string());
    }

    /// 按 ID 查看订单后记录订单 ID
    ///
    /// 只覆盖内存值，不写持久存储：同进程内后续的
    /// "我的订单"导航会解析到刚查看的订单。
    pub fn record_fetched(&self, id: i64) {
        *self.latest.lock().unwrap() = Some(id);
    }

    /// 当前记录的订单 ID
    ///
    /// 没有记录时返回 `None`，调用方必须向用户报告错误，
    /// 绝不允许用 0 之类的哨兵 ID 发起导航。
    pub fn current(&self) -> Option<i64> {
        *self.latest.lock().unwrap()
    }

    /// 清除记录（登出/重置路径）
    pub fn reset(&self) {
        *self.latest.lock().unwrap() = None;
        self.store.remove(LATEST_ORDER_KEY);
    }
}

// =========================================================
// 测试模块
// =========================================================
