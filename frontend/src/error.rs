//! 错误类型模块
//!
//! 客户端核心的统一错误类型。会话、解码、载荷、传输与状态五类
//! 错误各有明确语义，调用方必须显式处理，不允许空捕获吞掉。

use std::fmt;

use shopfront_shared::order::AssembleError;

// =========================================================
// 错误状态枚举
// =========================================================

/// 错误状态枚举
/// 对应规格化的五类失败模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShopErrorStatus {
    /// 会话错误：令牌缺失/过期，可通过重定向登录恢复
    Session,
    /// 解码错误：令牌语法非法，必须向上传播而不是静默视为有效
    Decode,
    /// 载荷形状错误：订单详情响应缺少预期结构，对该次转换是致命的
    Payload,
    /// 传输错误：网络/HTTP 失败，上报 UI，本层不做重试
    Transport,
    /// 状态错误：如没有已记录的最近订单却要求导航
    State,
}

impl ShopErrorStatus {
    pub fn error_code(&self) -> &'static str {
        match self {
            ShopErrorStatus::Session => "SESSION_INVALID",
            ShopErrorStatus::Decode => "TOKEN_DECODE_ERROR",
            ShopErrorStatus::Payload => "PAYLOAD_SHAPE_ERROR",
            ShopErrorStatus::Transport => "TRANSPORT_ERROR",
            ShopErrorStatus::State => "STATE_ERROR",
        }
    }
}

// =========================================================
// 错误上下文追踪
// =========================================================

/// 结构化的错误追踪片段
/// 记录错误发生时的操作和相关细节
#[derive(Debug, Clone)]
pub struct ErrorSpan {
    /// 操作名称，如 "session.decode", "orders.fetch"
    pub operation: String,
    /// 额外的细节信息，如 key 名称、订单 id 等
    pub detail: Option<String>,
}

impl ErrorSpan {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            detail: None,
        }
    }

    pub fn with_detail(operation: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            detail: Some(detail.into()),
        }
    }
}

// =========================================================
// 核心错误类型
// =========================================================

/// 客户端核心错误
///
/// - status: 错误类型/语义
/// - message: 错误消息
/// - source: 原始错误（可选，用于错误链）
/// - spans: 结构化的调用追踪栈
#[derive(Debug)]
pub struct ShopError {
    pub status: ShopErrorStatus,
    pub message: String,
    /// 原始错误源（供调试用）
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
    /// 结构化的操作追踪
    spans: Vec<ErrorSpan>,
}

impl ShopError {
    pub fn new(status: ShopErrorStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            source: None,
            spans: Vec::new(),
        }
    }

    // --- Convenience constructors ---

    pub fn session(message: impl Into<String>) -> Self {
        Self::new(ShopErrorStatus::Session, message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(ShopErrorStatus::Decode, message)
    }

    pub fn payload(message: impl Into<String>) -> Self {
        Self::new(ShopErrorStatus::Payload, message)
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ShopErrorStatus::Transport, message)
    }

    pub fn state(message: impl Into<String>) -> Self {
        Self::new(ShopErrorStatus::State, message)
    }

    // --- Context builders ---

    /// 添加操作追踪（无额外细节）
    pub fn in_op(mut self, operation: impl Into<String>) -> Self {
        self.spans.push(ErrorSpan::new(operation));
        self
    }

    /// 添加操作追踪（带额外细节）
    pub fn in_op_with(mut self, operation: impl Into<String>, detail: impl Into<String>) -> Self {
        self.spans.push(ErrorSpan::with_detail(operation, detail));
        self
    }

    /// 设置原始错误源
    pub fn with_source<E: std::error::Error + Send + Sync + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    // --- Accessors ---

    /// 获取机器可读的错误代码
    pub fn error_code(&self) -> &'static str {
        self.status.error_code()
    }

    /// 获取错误消息
    pub fn message(&self) -> &str {
        &self.message
    }

    /// 获取操作追踪栈
    pub fn spans(&self) -> &[ErrorSpan] {
        &self.spans
    }
}

// =========================================================
// Display & Error trait 实现
// =========================================================

impl fmt::Display for ShopError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.error_code(), self.message)?;

        if !self.spans.is_empty() {
            write!(f, " | trace: ")?;
            for (i, span) in self.spans.iter().enumerate() {
                if i > 0 {
                    write!(f, " -> ")?;
                }
                write!(f, "{}", span.operation)?;
                if let Some(detail) = &span.detail {
                    write!(f, "({})", detail)?;
                }
            }
        }
        Ok(())
    }
}

impl std::error::Error for ShopError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

pub type ShopResult<T> = std::result::Result<T, ShopError>;

// =========================================================
// 类型转换实现
// =========================================================

impl From<AssembleError> for ShopError {
    fn from(e: AssembleError) -> Self {
        ShopError::payload(e.to_string())
            .with_source(e)
            .in_op("order.assemble")
    }
}

impl From<gloo_net::Error> for ShopError {
    fn from(e: gloo_net::Error) -> Self {
        ShopError::transport(e.to_string())
    }
}
