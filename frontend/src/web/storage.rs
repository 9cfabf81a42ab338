//! LocalStorage 封装模块
//!
//! 通过 `KeyValueStore` 抽象键值存储：核心逻辑只依赖注入的接口，
//! 浏览器实现集中在 `LocalStorage` 一处，测试使用内存实现。

/// 抽象键值存储接口（同步，读写即时完成）
pub trait KeyValueStore {
    /// 读取存储的字符串值；键不存在或发生错误时返回 `None`
    fn get(&self, key: &str) -> Option<String>;

    /// 写入键值对，覆盖旧值；返回操作是否成功
    fn set(&self, key: &str, value: &str) -> bool;

    /// 删除键值对；键本不存在也视为成功（幂等）
    fn remove(&self, key: &str) -> bool;
}

/// 浏览器 LocalStorage 实现
///
/// 封装 `web_sys::Storage`，同一浏览器上下文内跨页面刷新持久。
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) -> bool {
        Self::storage()
            .and_then(|s| s.set_item(key, value).ok())
            .is_some()
    }

    fn remove(&self, key: &str) -> bool {
        Self::storage()
            .and_then(|s| s.remove_item(key).ok())
            .is_some()
    }
}

// =========================================================
// 测试环境实现 (Mock)
// =========================================================

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    /// 内存键值存储
    ///
    /// 克隆共享同一张表，便于测试中多个持有方观察同一状态。
    #[derive(Debug, Clone, Default)]
    pub struct MemoryStore {
        map: Rc<RefCell<HashMap<String, String>>>,
    }

    impl MemoryStore {
        pub fn new() -> Self {
            Self::default()
        }
    }

    impl KeyValueStore for MemoryStore {
        fn get(&self, key: &str) -> Option<String> {
            self.map.borrow().get(key).cloned()
        }

        fn set(&self, key: &str, value: &str) -> bool {
            self.map
                .borrow_mut()
                .insert(key.to_string(), value.to_string());
            true
        }

        fn remove(&self, key: &str) -> bool {
            self.map.borrow_mut().remove(key);
            true
        }
    }

    // =========================================================
    // MemoryStore 单元测试
    // =========================================================

    #[test]
    fn test_memory_store_set_and_get() {
        let store = MemoryStore::new();

        store.set("key1", "value1");
        assert_eq!(store.get("key1"), Some("value1".to_string()));
    }

    #[test]
    fn test_memory_store_get_nonexistent() {
        let store = MemoryStore::new();
        assert_eq!(store.get("nonexistent"), None);
    }

    #[test]
    fn test_memory_store_overwrite() {
        let store = MemoryStore::new();

        store.set("key1", "value1");
        store.set("key1", "value2");
        assert_eq!(store.get("key1"), Some("value2".to_string()));
    }

    #[test]
    fn test_memory_store_remove_is_idempotent() {
        let store = MemoryStore::new();

        store.set("key1", "value1");
        assert!(store.remove("key1"));
        assert!(store.remove("key1"));
        assert_eq!(store.get("key1"), None);
    }

    #[test]
    fn test_memory_store_clones_share_state() {
        let store = MemoryStore::new();
        let alias = store.clone();

        store.set("key1", "value1");
        assert_eq!(alias.get("key1"), Some("value1".to_string()));
    }
}
