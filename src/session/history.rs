use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::models::review::ReviewResult;

/// 历史记录上限，超出后按 FIFO 淘汰最旧的条目
pub const HISTORY_CAPACITY: usize = 20;

/// 摘要缺失时的固定占位文案
const EMPTY_SUMMARY_PREVIEW: &str = "Review completed";

/// 摘要预览的最大字符数
const PREVIEW_MAX_CHARS: usize = 100;

/// 历史记录条目：审查结果的不可变投影，不持有完整结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// 会话内唯一、单调递增的标识（毫秒时间戳派生）
    pub id: i64,
    /// 记录时刻
    pub timestamp: DateTime<Utc>,
    /// 审查的语言
    pub language: String,
    /// 总评分
    pub score: f64,
    /// 所有严重程度的问题总数
    pub issues_count: u32,
    /// 摘要预览（最多 100 个字符）
    pub preview: String,
}

/// 会话内的审查历史，仅存在内存中，最新的条目在最前
#[derive(Debug, Clone, Default)]
pub struct HistoryLog {
    entries: VecDeque<HistoryEntry>,
    last_id: i64,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从审查结果派生一条历史记录并插入队首，超出容量时淘汰最旧条目
    pub fn record(&mut self, result: &ReviewResult) {
        let entry = HistoryEntry {
            id: self.next_id(),
            timestamp: Utc::now(),
            language: result.language_detected.clone(),
            score: result.overall_score,
            issues_count: result.total_issues(),
            preview: summary_preview(&result.summary),
        };

        self.entries.push_front(entry);
        self.entries.truncate(HISTORY_CAPACITY);
    }

    /// 无条件清空历史
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// 按最新在前的顺序遍历
    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // 同一毫秒内的连续记录仍保持严格递增
    fn next_id(&mut self) -> i64 {
        let now = Utc::now().timestamp_millis();
        let id = if now > self.last_id { now } else { self.last_id + 1 };
        self.last_id = id;
        id
    }
}

fn summary_preview(summary: &str) -> String {
    if summary.trim().is_empty() {
        EMPTY_SUMMARY_PREVIEW.to_string()
    } else {
        summary.chars().take(PREVIEW_MAX_CHARS).collect()
    }
}
