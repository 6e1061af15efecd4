use crate::models::review::{DocStyle, Language, ReviewResult};

/// 会话状态：界面渲染的唯一数据来源
///
/// 由组合层（CLI 入口）持有，编排器通过 `&mut` 访问；
/// 展示层只读，不直接修改任何字段。
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    code: String,
    language: Language,
    doc_style: DocStyle,
    result: Option<ReviewResult>,
    loading: bool,
    error: Option<String>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn doc_style(&self) -> DocStyle {
        self.doc_style
    }

    pub fn result(&self) -> Option<&ReviewResult> {
        self.result.as_ref()
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    // 以下赋值操作不做任何校验，校验是编排器的职责

    pub fn set_code(&mut self, code: impl Into<String>) {
        self.code = code.into();
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn set_doc_style(&mut self, doc_style: DocStyle) {
        self.doc_style = doc_style;
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// 提交新结果，同时清除已有错误；loading 由调用方单独管理
    pub fn set_result(&mut self, result: ReviewResult) {
        self.result = Some(result);
        self.error = None;
    }

    /// 记录错误，同时强制结束加载状态
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.loading = false;
    }

    /// 重置结果与错误
    pub fn clear(&mut self) {
        self.result = None;
        self.error = None;
    }
}
