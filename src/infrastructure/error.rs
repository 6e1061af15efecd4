use thiserror::Error;

/// 无法提取具体信息时的兜底文案
pub const FALLBACK_ERROR_MESSAGE: &str = "Failed to review code";

/// 审查流程错误类型
///
/// 所有错误在编排器边界被捕获并归约为单条用户可读消息，
/// 不会越过编排器继续向上抛出到会话状态之外。
#[derive(Error, Debug, Clone)]
pub enum ReviewError {
    /// 输入校验失败（空代码等），发生在任何网络调用之前
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// 已有一个审查请求在途，新提交在入口处被拒绝
    #[error("A review is already in progress")]
    InFlight,

    /// 服务端返回了带结构化 detail 的失败响应
    #[error("Service error ({status}): {detail}")]
    Service { status: u16, detail: String },

    /// 网络失败，或失败响应没有可解析的结构化消息体
    #[error("Transport error: {message}")]
    Transport { message: String },

    /// 无法提取任何消息时的兜底
    #[error("Failed to review code")]
    Unknown,
}

impl ReviewError {
    pub fn validation(message: impl Into<String>) -> Self {
        ReviewError::Validation { message: message.into() }
    }

    pub fn service(status: u16, detail: impl Into<String>) -> Self {
        ReviewError::Service { status, detail: detail.into() }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        ReviewError::Transport { message: message.into() }
    }

    /// 归约为面向用户的单条消息
    ///
    /// 解析顺序：服务端 detail → 传输层错误文本 → 固定兜底文案。
    pub fn user_message(&self) -> String {
        match self {
            ReviewError::Validation { message } => message.clone(),
            ReviewError::InFlight => "A review is already in progress".to_string(),
            ReviewError::Service { detail, .. } if !detail.trim().is_empty() => detail.clone(),
            ReviewError::Transport { message } if !message.trim().is_empty() => message.clone(),
            _ => FALLBACK_ERROR_MESSAGE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_detail_takes_priority() {
        let err = ReviewError::service(500, "LLM quota exceeded");
        assert_eq!(err.user_message(), "LLM quota exceeded");
    }

    #[test]
    fn test_transport_message_used_when_present() {
        let err = ReviewError::transport("connection refused");
        assert_eq!(err.user_message(), "connection refused");
    }

    #[test]
    fn test_fallback_literal_when_no_message() {
        assert_eq!(ReviewError::Unknown.user_message(), "Failed to review code");
        assert_eq!(
            ReviewError::service(500, "  ").user_message(),
            "Failed to review code"
        );
        assert_eq!(
            ReviewError::transport("").user_message(),
            "Failed to review code"
        );
    }
}
