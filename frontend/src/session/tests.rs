use super::*;
use crate::web::storage::tests::MemoryStore;
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde_json::json;

// =========================================================
// 辅助函数
// =========================================================

/// 固定时钟
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_secs(&self) -> i64 {
        self.0
    }
}

/// 构造一个语法合法的测试令牌（签名段为占位符）
pub fn make_token(claims: serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string().as_bytes());
    format!("{}.{}.sig", header, payload)
}

pub fn session_with(
    store: MemoryStore,
    now: i64,
) -> SessionService<MemoryStore, FixedClock> {
    SessionService::new(TokenStore::new(store), FixedClock(now))
}

const NOW: i64 = 1_700_000_000;

// =========================================================
// TokenStore 测试
// =========================================================

#[test]
fn test_token_store_round_trip() {
    let tokens = TokenStore::new(MemoryStore::new());

    tokens.set("abc.def.ghi");
    assert_eq!(tokens.get(), Some("abc.def.ghi".to_string()));
}

#[test]
fn test_token_store_get_when_absent() {
    let tokens = TokenStore::new(MemoryStore::new());
    assert_eq!(tokens.get(), None);
}

#[test]
fn test_token_store_set_overwrites() {
    let tokens = TokenStore::new(MemoryStore::new());

    tokens.set("old");
    tokens.set("new");
    assert_eq!(tokens.get(), Some("new".to_string()));
}

#[test]
fn test_token_store_clear_is_idempotent() {
    let tokens = TokenStore::new(MemoryStore::new());

    tokens.set("abc.def.ghi");
    tokens.clear();
    assert_eq!(tokens.get(), None);

    // 连续两次 clear 不报错，状态保持缺失
    tokens.clear();
    assert_eq!(tokens.get(), None);
}

// =========================================================
// is_expired 测试
// =========================================================

#[test]
fn test_is_expired_without_token_reports_false() {
    // 保留的历史行为：无令牌报告"未过期"
    let session = session_with(MemoryStore::new(), NOW);
    assert!(!session.is_expired().unwrap());
}

#[test]
fn test_is_expired_with_live_token() {
    let store = MemoryStore::new();
    let session = session_with(store, NOW);

    session
        .tokens()
        .set(&make_token(json!({"userId": 5, "exp": NOW + 3600})));
    assert!(!session.is_expired().unwrap());
}

#[test]
fn test_is_expired_with_expired_token() {
    let store = MemoryStore::new();
    let session = session_with(store, NOW);

    session
        .tokens()
        .set(&make_token(json!({"userId": 5, "exp": NOW - 3600})));
    assert!(session.is_expired().unwrap());
}

#[test]
fn test_is_expired_with_malformed_token_errors() {
    let store = MemoryStore::new();
    let session = session_with(store, NOW);

    session.tokens().set("not-a-jwt");
    let err = session.is_expired().unwrap_err();
    assert_eq!(err.status, crate::error::ShopErrorStatus::Decode);
}

#[test]
fn test_is_expired_with_garbage_payload_errors() {
    let store = MemoryStore::new();
    let session = session_with(store, NOW);

    session.tokens().set("aaa.!!!.ccc");
    assert!(session.is_expired().is_err());
}

#[test]
fn test_is_expired_without_exp_claim_errors() {
    let store = MemoryStore::new();
    let session = session_with(store, NOW);

    session.tokens().set(&make_token(json!({"userId": 5})));
    assert!(session.is_expired().is_err());
}

// =========================================================
// user_id 测试
// =========================================================

#[test]
fn test_user_id_without_token_is_zero() {
    let session = session_with(MemoryStore::new(), NOW);
    assert_eq!(session.user_id().unwrap(), 0);
}

#[test]
fn test_user_id_reads_numeric_claim() {
    let store = MemoryStore::new();
    let session = session_with(store, NOW);

    session
        .tokens()
        .set(&make_token(json!({"userId": 5, "exp": NOW + 3600})));
    assert_eq!(session.user_id().unwrap(), 5);
}

#[test]
fn test_user_id_accepts_numeric_string_claim() {
    let store = MemoryStore::new();
    let session = session_with(store, NOW);

    session
        .tokens()
        .set(&make_token(json!({"userId": "17", "exp": NOW + 3600})));
    assert_eq!(session.user_id().unwrap(), 17);
}

#[test]
fn test_user_id_missing_claim_is_zero() {
    let store = MemoryStore::new();
    let session = session_with(store, NOW);

    session.tokens().set(&make_token(json!({"exp": NOW + 3600})));
    assert_eq!(session.user_id().unwrap(), 0);
}

#[test]
fn test_user_id_non_numeric_claim_is_zero() {
    let store = MemoryStore::new();
    let session = session_with(store, NOW);

    session
        .tokens()
        .set(&make_token(json!({"userId": "abc", "exp": NOW + 3600})));
    assert_eq!(session.user_id().unwrap(), 0);
}

#[test]
fn test_user_id_with_malformed_token_errors() {
    let store = MemoryStore::new();
    let session = session_with(store, NOW);

    session.tokens().set("x.y");
    assert!(session.user_id().is_err());
}

// =========================================================
// logout 测试
// =========================================================

#[test]
fn test_logout_clears_token() {
    let store = MemoryStore::new();
    let session = session_with(store, NOW);

    session
        .tokens()
        .set(&make_token(json!({"userId": 5, "exp": NOW + 3600})));
    session.logout();

    assert_eq!(session.tokens().get(), None);
    // 登出后回到无会话状态
    assert_eq!(session.user_id().unwrap(), 0);
    assert!(!session.is_expired().unwrap());
}
