use crate::infrastructure::error::ReviewError;
use crate::models::review::ReviewRequest;
use crate::review::service::AnalysisClient;
use crate::session::history::HistoryLog;
use crate::session::state::SessionState;

/// 一次交互会话的全部可变状态，由组合层构造并持有
///
/// 编排器与展示层都通过引用访问，不存在进程级的全局单例。
#[derive(Debug, Clone, Default)]
pub struct ReviewSession {
    pub state: SessionState,
    pub history: HistoryLog,
}

impl ReviewSession {
    pub fn new() -> Self {
        Self::default()
    }
}

/// 审查请求的生命周期编排器
///
/// 单线程协作式调度：除网络调用外的所有状态变更都不可抢占，
/// 因此会话状态无需加锁。
pub struct ReviewOrchestrator {
    client: AnalysisClient,
    /// 单调递增的请求序号，用于丢弃过期响应
    seq: u64,
}

impl ReviewOrchestrator {
    pub fn new(client: AnalysisClient) -> Self {
        Self { client, seq: 0 }
    }

    /// 提交一次审查
    ///
    /// 成功时返回 `Ok(Some(score))`；响应因过期被静默丢弃时返回 `Ok(None)`；
    /// 失败时错误消息已写入会话状态，同时返回 `Err` 供调用方提示。
    /// 无论成败，返回前 loading 一定恢复为 false。
    pub async fn submit_review(
        &mut self,
        session: &mut ReviewSession,
        request: &ReviewRequest,
    ) -> Result<Option<f64>, ReviewError> {
        // 在途请求守卫：拒绝并发提交，不产生任何副作用
        if session.state.loading() {
            return Err(ReviewError::InFlight);
        }

        // 校验发生在任何网络调用之前
        if request.code.trim().is_empty() {
            return Err(ReviewError::validation("Code cannot be empty"));
        }

        session.state.set_loading(true);
        self.seq += 1;
        let issued = self.seq;

        let outcome = self.client.review(request).await;

        self.commit_outcome(session, issued, outcome)
    }

    /// 把单次调用的结果提交到会话状态
    ///
    /// 过期检查：只提交最近一次发出的请求的响应，
    /// 过期响应（无论成败）静默丢弃，仅恢复 loading。
    fn commit_outcome(
        &self,
        session: &mut ReviewSession,
        issued: u64,
        outcome: Result<crate::models::review::ReviewResult, ReviewError>,
    ) -> Result<Option<f64>, ReviewError> {
        if !self.is_current(issued) {
            session.state.set_loading(false);
            tracing::debug!(issued, latest = self.seq, "丢弃过期的审查响应");
            return Ok(None);
        }

        match outcome {
            Ok(result) => {
                let score = result.overall_score;
                session.history.record(&result);
                session.state.set_result(result);
                session.state.set_loading(false);
                tracing::info!(score, "审查完成");
                Ok(Some(score))
            }
            Err(err) => {
                // set_error 同时强制 loading=false
                session.state.set_error(err.user_message());
                tracing::warn!(error = %err, "审查失败");
                Err(err)
            }
        }
    }

    fn is_current(&self, issued: u64) -> bool {
        issued == self.seq
    }
}

/// 分数到定性等级的映射，各档下界包含
pub fn score_tier(score: f64) -> &'static str {
    if score >= 80.0 {
        "excellent"
    } else if score >= 60.0 {
        "good"
    } else if score >= 40.0 {
        "mediocre"
    } else {
        "poor"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::review::ReviewResult;
    use chrono::Utc;
    use std::collections::HashMap;

    fn test_orchestrator() -> ReviewOrchestrator {
        let config = Config {
            api_base_url: "http://localhost:8000".to_string(),
            request_timeout_secs: 5,
            connect_timeout_secs: 2,
            debug: false,
        };
        let client = AnalysisClient::new(&config).expect("client should build");
        ReviewOrchestrator::new(client)
    }

    fn result_with_score(score: f64) -> ReviewResult {
        ReviewResult {
            summary: "summary".to_string(),
            overall_score: score,
            issues: Vec::new(),
            issues_count: HashMap::new(),
            documentation: None,
            functions_documented: Vec::new(),
            classes_documented: Vec::new(),
            defect_prediction: None,
            rag_context: None,
            language_detected: "python".to_string(),
            processing_time: 0.1,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_stale_success_discarded_silently() {
        let mut orchestrator = test_orchestrator();
        let mut session = ReviewSession::new();

        // 模拟：序号 1 的请求还在等响应时，又发出了序号 2 的请求
        session.state.set_loading(true);
        orchestrator.seq = 2;

        let outcome =
            orchestrator.commit_outcome(&mut session, 1, Ok(result_with_score(30.0)));

        // 过期响应静默丢弃：不提交、不报错，仅恢复 loading
        assert_eq!(outcome.unwrap(), None);
        assert!(!session.state.loading());
        assert!(session.state.result().is_none());
        assert!(session.state.error().is_none());
        assert!(session.history.is_empty());
    }

    #[test]
    fn test_stale_response_never_overwrites_newer_result() {
        let mut orchestrator = test_orchestrator();
        let mut session = ReviewSession::new();

        // 序号 2 的新结果先完成并提交
        orchestrator.seq = 2;
        orchestrator
            .commit_outcome(&mut session, 2, Ok(result_with_score(90.0)))
            .expect("current response should commit");

        // 序号 1 的慢响应随后到达，必须被丢弃
        session.state.set_loading(true);
        let outcome =
            orchestrator.commit_outcome(&mut session, 1, Ok(result_with_score(10.0)));

        assert_eq!(outcome.unwrap(), None);
        let kept = session.state.result().expect("newer result kept");
        assert_eq!(kept.overall_score, 90.0);
        assert_eq!(session.history.len(), 1);
        assert!(!session.state.loading());
    }

    #[test]
    fn test_stale_failure_commits_no_error() {
        let mut orchestrator = test_orchestrator();
        let mut session = ReviewSession::new();

        session.state.set_loading(true);
        orchestrator.seq = 3;

        let outcome = orchestrator.commit_outcome(
            &mut session,
            2,
            Err(ReviewError::transport("connection reset")),
        );

        assert_eq!(outcome.unwrap(), None);
        assert!(session.state.error().is_none());
        assert!(!session.state.loading());
    }

    #[test]
    fn test_current_response_commits() {
        let mut orchestrator = test_orchestrator();
        let mut session = ReviewSession::new();

        session.state.set_loading(true);
        orchestrator.seq = 1;

        let outcome =
            orchestrator.commit_outcome(&mut session, 1, Ok(result_with_score(75.0)));

        assert_eq!(outcome.unwrap(), Some(75.0));
        assert!(session.state.result().is_some());
        assert_eq!(session.history.len(), 1);
        assert!(!session.state.loading());
    }

    #[test]
    fn test_is_current_tracks_latest_issued_seq() {
        let mut orchestrator = test_orchestrator();
        orchestrator.seq = 5;

        assert!(orchestrator.is_current(5));
        assert!(!orchestrator.is_current(4));
        assert!(!orchestrator.is_current(6));
    }

    #[test]
    fn test_score_tier_samples() {
        assert_eq!(score_tier(85.0), "excellent");
        assert_eq!(score_tier(65.0), "good");
        assert_eq!(score_tier(45.0), "mediocre");
        assert_eq!(score_tier(20.0), "poor");
    }

    #[test]
    fn test_score_tier_lower_bounds_inclusive() {
        assert_eq!(score_tier(80.0), "excellent");
        assert_eq!(score_tier(60.0), "good");
        assert_eq!(score_tier(40.0), "mediocre");
        assert_eq!(score_tier(39.9), "poor");
        assert_eq!(score_tier(0.0), "poor");
        assert_eq!(score_tier(100.0), "excellent");
    }
}
