use chrono::Local;
use std::fmt::Write as _;

use crate::models::review::{ReviewResult, Severity};

/// 没有任何问题时的显式空状态文案
pub const NO_ISSUES_MESSAGE: &str = "No issues found";

/// 未请求生成文档时的空状态文案
pub const DOCS_NOT_REQUESTED_MESSAGE: &str = "Documentation generation was not requested";

/// 请求了文档但服务端没有生成任何内容时的空状态文案
pub const DOCS_EMPTY_MESSAGE: &str = "No documentation was generated";

/// docstring 预览的最大字符数
const DOCSTRING_PREVIEW_CHARS: usize = 200;

/// 检索上下文预览的最大字符数
const CONTEXT_PREVIEW_CHARS: usize = 120;

/// 结果视图的标签页；标签页选择是纯本地 UI 状态，
/// 与数据获取无关，新结果提交后默认回到问题视图
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReviewTab {
    #[default]
    Issues,
    Documentation,
    Metrics,
}

impl ReviewTab {
    pub const ALL: [ReviewTab; 3] = [ReviewTab::Issues, ReviewTab::Documentation, ReviewTab::Metrics];

    pub fn title(&self) -> &'static str {
        match self {
            ReviewTab::Issues => "Issues",
            ReviewTab::Documentation => "Documentation",
            ReviewTab::Metrics => "Metrics",
        }
    }
}

/// 按严重程度汇总问题数量，数量为零的级别不渲染
pub fn format_issue_summary(result: &ReviewResult) -> String {
    let mut parts = Vec::new();
    for severity in Severity::ALL {
        if let Some(&count) = result.issues_count.get(&severity) {
            if count > 0 {
                parts.push(format!("{}: {}", severity.label(), count));
            }
        }
    }

    if parts.is_empty() {
        NO_ISSUES_MESSAGE.to_string()
    } else {
        parts.join(", ")
    }
}

/// 问题视图：保持服务端给出的顺序，补充信息仅在存在时展开
pub fn format_issues(result: &ReviewResult) -> String {
    if result.issues.is_empty() {
        return NO_ISSUES_MESSAGE.to_string();
    }

    let mut output = String::new();
    for (index, issue) in result.issues.iter().enumerate() {
        let location = match issue.line {
            Some(line) => format!(" (line {})", line),
            None => String::new(),
        };
        let _ = writeln!(
            output,
            "{}. [{}]{} {}",
            index + 1,
            issue.severity.label(),
            location,
            issue.message
        );

        if let Some(suggestion) = &issue.suggestion {
            let _ = writeln!(output, "   Suggestion: {}", suggestion);
        }
        if let Some(snippet) = &issue.code_snippet {
            for line in snippet.lines() {
                let _ = writeln!(output, "   | {}", line);
            }
        }
    }

    output.trim_end().to_string()
}

/// 文档视图
///
/// 两种空状态必须可区分：未请求生成文档，与请求了但没有生成结果。
pub fn format_documentation(result: &ReviewResult, docs_requested: bool) -> String {
    if !docs_requested {
        return DOCS_NOT_REQUESTED_MESSAGE.to_string();
    }

    let has_raw_docs = result
        .documentation
        .as_deref()
        .map(|text| !text.trim().is_empty())
        .unwrap_or(false);

    if !has_raw_docs
        && result.functions_documented.is_empty()
        && result.classes_documented.is_empty()
    {
        return DOCS_EMPTY_MESSAGE.to_string();
    }

    let mut output = String::new();

    if let Some(documentation) = &result.documentation {
        if !documentation.trim().is_empty() {
            let _ = writeln!(output, "{}", documentation.trim_end());
        }
    }

    if !result.functions_documented.is_empty() {
        let _ = writeln!(output, "\nFunctions:");
        for func in &result.functions_documented {
            let _ = writeln!(output, "  {} {}", func.name, func.signature);
            if !func.docstring.is_empty() {
                let _ = writeln!(
                    output,
                    "    {}",
                    truncate_chars(&func.docstring, DOCSTRING_PREVIEW_CHARS)
                );
            }
        }
    }

    if !result.classes_documented.is_empty() {
        let _ = writeln!(output, "\nClasses:");
        for class in &result.classes_documented {
            let _ = writeln!(output, "  {}", class.name);
            if !class.docstring.is_empty() {
                let _ = writeln!(
                    output,
                    "    {}",
                    truncate_chars(&class.docstring, DOCSTRING_PREVIEW_CHARS)
                );
            }
            for method in &class.methods {
                let _ = writeln!(output, "    - {} {}", method.name, method.signature);
            }
        }
    }

    output.trim().to_string()
}

/// 指标视图
pub fn format_metrics(result: &ReviewResult) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "Language: {}", result.language_detected);
    let _ = writeln!(output, "Processing time: {:.2}s", result.processing_time);
    let _ = writeln!(
        output,
        "Reviewed at: {}",
        result
            .timestamp
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
    );

    if let Some(prediction) = &result.defect_prediction {
        let _ = writeln!(
            output,
            "Defect risk: {} (score {:.2}, confidence {:.2})",
            prediction.risk_level.as_str(),
            prediction.risk_score,
            prediction.confidence
        );
    }

    if let Some(rag) = &result.rag_context {
        let _ = writeln!(output, "Knowledge sources used: {}", rag.sources_used);
        if let Some(preview) = &rag.context_preview {
            if !preview.trim().is_empty() {
                let _ = writeln!(
                    output,
                    "Context: {}",
                    truncate_chars(preview, CONTEXT_PREVIEW_CHARS)
                );
            }
        }
    }

    output.trim_end().to_string()
}

// 按字符截断，只有实际截断时才追加省略号
fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{}...", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::review::{FunctionDoc, Issue};
    use chrono::Utc;
    use std::collections::HashMap;

    fn empty_result() -> ReviewResult {
        ReviewResult {
            summary: "ok".to_string(),
            overall_score: 88.0,
            issues: Vec::new(),
            issues_count: HashMap::new(),
            documentation: None,
            functions_documented: Vec::new(),
            classes_documented: Vec::new(),
            defect_prediction: None,
            rag_context: None,
            language_detected: "python".to_string(),
            processing_time: 1.234,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_issue_summary_skips_zero_counts() {
        let mut result = empty_result();
        result.issues_count.insert(Severity::Error, 2);
        result.issues_count.insert(Severity::Warning, 1);
        result.issues_count.insert(Severity::Security, 0);

        let summary = format_issue_summary(&result);
        assert!(summary.contains("error: 2"));
        assert!(summary.contains("warning: 1"));
        assert!(!summary.contains("security"));
    }

    #[test]
    fn test_no_issues_renders_explicit_empty_state() {
        let result = empty_result();
        assert_eq!(format_issues(&result), NO_ISSUES_MESSAGE);
        assert_eq!(format_issue_summary(&result), NO_ISSUES_MESSAGE);
    }

    #[test]
    fn test_issues_keep_server_order_and_optional_details() {
        let mut result = empty_result();
        result.issues = vec![
            Issue {
                line: Some(3),
                severity: Severity::Warning,
                category: None,
                message: "second reported first".to_string(),
                suggestion: Some("do the thing".to_string()),
                code_snippet: None,
            },
            Issue {
                line: None,
                severity: Severity::Error,
                category: None,
                message: "first reported second".to_string(),
                suggestion: None,
                code_snippet: Some("let x = 1;".to_string()),
            },
        ];

        let rendered = format_issues(&result);
        let first_pos = rendered.find("second reported first").unwrap();
        let second_pos = rendered.find("first reported second").unwrap();
        assert!(first_pos < second_pos);
        assert!(rendered.contains("Suggestion: do the thing"));
        assert!(rendered.contains("| let x = 1;"));
    }

    #[test]
    fn test_documentation_empty_states_are_distinct() {
        let result = empty_result();
        assert_eq!(
            format_documentation(&result, false),
            DOCS_NOT_REQUESTED_MESSAGE
        );
        assert_eq!(format_documentation(&result, true), DOCS_EMPTY_MESSAGE);
    }

    #[test]
    fn test_empty_documentation_text_still_renders_empty_state() {
        let mut result = empty_result();
        result.documentation = Some("   ".to_string());
        assert_eq!(format_documentation(&result, true), DOCS_EMPTY_MESSAGE);
    }

    #[test]
    fn test_docstring_preview_capped_with_ellipsis() {
        let mut result = empty_result();
        result.functions_documented = vec![FunctionDoc {
            name: "long_one".to_string(),
            signature: "()".to_string(),
            docstring: "d".repeat(300),
            start_line: None,
        }];

        let rendered = format_documentation(&result, true);
        assert!(rendered.contains(&format!("{}...", "d".repeat(200))));
    }

    #[test]
    fn test_short_docstring_has_no_ellipsis() {
        let mut result = empty_result();
        result.functions_documented = vec![FunctionDoc {
            name: "short".to_string(),
            signature: "()".to_string(),
            docstring: "does a thing".to_string(),
            start_line: None,
        }];

        let rendered = format_documentation(&result, true);
        assert!(rendered.contains("does a thing"));
        assert!(!rendered.contains("does a thing..."));
    }

    #[test]
    fn test_metrics_formats_processing_time_two_decimals() {
        let result = empty_result();
        let rendered = format_metrics(&result);
        assert!(rendered.contains("Processing time: 1.23s"));
        assert!(rendered.contains("Language: python"));
    }

    #[test]
    fn test_default_tab_is_issues() {
        assert_eq!(ReviewTab::default(), ReviewTab::Issues);
    }
}
