use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 支持的编程语言
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    Javascript,
    Typescript,
    Java,
    Cpp,
    Go,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::Javascript => "javascript",
            Language::Typescript => "typescript",
            Language::Java => "java",
            Language::Cpp => "cpp",
            Language::Go => "go",
        }
    }

    /// 从命令行字符串解析语言标签
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "python" => Some(Language::Python),
            "javascript" => Some(Language::Javascript),
            "typescript" => Some(Language::Typescript),
            "java" => Some(Language::Java),
            "cpp" => Some(Language::Cpp),
            "go" => Some(Language::Go),
            _ => None,
        }
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::Python
    }
}

/// 支持的文档风格
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocStyle {
    Google,
    Numpy,
    Sphinx,
    Javadoc,
    Jsdoc,
}

impl DocStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocStyle::Google => "google",
            DocStyle::Numpy => "numpy",
            DocStyle::Sphinx => "sphinx",
            DocStyle::Javadoc => "javadoc",
            DocStyle::Jsdoc => "jsdoc",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "google" => Some(DocStyle::Google),
            "numpy" => Some(DocStyle::Numpy),
            "sphinx" => Some(DocStyle::Sphinx),
            "javadoc" => Some(DocStyle::Javadoc),
            "jsdoc" => Some(DocStyle::Jsdoc),
            _ => None,
        }
    }
}

impl Default for DocStyle {
    fn default() -> Self {
        DocStyle::Google
    }
}

/// 问题严重程度（封闭集合，未识别的标签在反序列化阶段直接报错）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
    Security,
    Suggestion,
}

impl Severity {
    /// 固定的展示顺序
    pub const ALL: [Severity; 5] = [
        Severity::Error,
        Severity::Warning,
        Severity::Info,
        Severity::Security,
        Severity::Suggestion,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
            Severity::Security => "security",
            Severity::Suggestion => "suggestion",
        }
    }
}

/// 风险等级
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

/// 审查请求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRequest {
    pub code: String,
    pub language: Language,
    pub doc_style: DocStyle,
    pub context: Option<String>,
    pub check_security: bool,
    pub generate_docs: bool,
}

impl ReviewRequest {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            language: Language::default(),
            doc_style: DocStyle::default(),
            context: None,
            check_security: true,
            generate_docs: true,
        }
    }
}

/// 单个问题
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    #[serde(default)]
    pub line: Option<u32>,
    pub severity: Severity,
    #[serde(default)]
    pub category: Option<String>,
    pub message: String,
    #[serde(default)]
    pub suggestion: Option<String>,
    #[serde(default)]
    pub code_snippet: Option<String>,
}

/// 函数文档
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionDoc {
    pub name: String,
    #[serde(default)]
    pub signature: String,
    #[serde(default)]
    pub docstring: String,
    #[serde(default)]
    pub start_line: Option<u32>,
}

/// 类文档
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassDoc {
    pub name: String,
    #[serde(default)]
    pub docstring: String,
    #[serde(default)]
    pub methods: Vec<FunctionDoc>,
    #[serde(default)]
    pub start_line: Option<u32>,
}

/// 缺陷预测结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefectPrediction {
    pub risk_level: RiskLevel,
    pub risk_score: f64,
    pub confidence: f64,
}

/// 检索增强的来源信息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RagContext {
    #[serde(default)]
    pub sources_used: u32,
    #[serde(default)]
    pub context_preview: Option<String>,
}

/// 完整的审查结果，字段与服务端响应一一对应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewResult {
    pub summary: String,
    pub overall_score: f64,
    #[serde(default)]
    pub issues: Vec<Issue>,
    #[serde(default)]
    pub issues_count: HashMap<Severity, u32>,
    #[serde(default)]
    pub documentation: Option<String>,
    #[serde(default)]
    pub functions_documented: Vec<FunctionDoc>,
    #[serde(default)]
    pub classes_documented: Vec<ClassDoc>,
    #[serde(default)]
    pub defect_prediction: Option<DefectPrediction>,
    #[serde(default)]
    pub rag_context: Option<RagContext>,
    pub language_detected: String,
    pub processing_time: f64,
    #[serde(with = "flexible_timestamp", default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
}

impl ReviewResult {
    /// 所有严重程度的问题总数
    pub fn total_issues(&self) -> u32 {
        self.issues_count.values().sum()
    }
}

/// 服务端健康检查响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub version: Option<String>,
    pub llm_status: String,
    #[serde(default)]
    pub vector_db_status: Option<String>,
}

impl HealthResponse {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }

    pub fn llm_connected(&self) -> bool {
        self.llm_status == "connected"
    }
}

/// 服务端错误响应体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub detail: String,
}

/// 服务端的时间戳可能不带时区（naive ISO 8601），统一按 UTC 解释
mod flexible_timestamp {
    use super::*;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        if let Ok(parsed) = DateTime::parse_from_rfc3339(&raw) {
            return Ok(parsed.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| naive.and_utc())
            .map_err(serde::de::Error::custom)
    }
}
