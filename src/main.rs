use ai_review::cli::args::Args;
use ai_review::config::Config;
use ai_review::infrastructure::logging::{setup_logging, LoggingConfig};
use ai_review::models::review::{DocStyle, Language, ReviewRequest};
use ai_review::report::{self, ReviewTab};
use ai_review::review::orchestrator::{score_tier, ReviewOrchestrator, ReviewSession};
use ai_review::review::service::AnalysisClient;
use anyhow::{anyhow, Context};
use clap::Parser;
use std::io::Read;
use tracing::Level;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = Config::new();
    config.update_from_args(&args);
    config.validate()?;

    setup_logging(LoggingConfig {
        level: if config.debug { Level::DEBUG } else { Level::INFO },
        ..Default::default()
    })?;

    let client = AnalysisClient::new(&config)?;

    // 会话启动时触发一次连通性探测，与审查流程完全解耦，
    // 只负责状态指示与一次性的配置告警
    let probe = AnalysisClient::new(&config)?;
    tokio::spawn(async move {
        match probe.health().await {
            Ok(health) => {
                tracing::info!(status = %health.status, "审查服务已连接");
                if !health.llm_connected() {
                    tracing::warn!(llm_status = %health.llm_status, "LLM 未连接，审查功能可能受限");
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "无法连接审查服务");
            }
        }
    });

    let code = read_source(&args)?;
    let language = Language::parse(&args.language)
        .ok_or_else(|| anyhow!("Unsupported language: {}", args.language))?;
    let doc_style = DocStyle::parse(&args.doc_style)
        .ok_or_else(|| anyhow!("Unsupported doc style: {}", args.doc_style))?;

    let mut request = ReviewRequest::new(code);
    request.language = language;
    request.doc_style = doc_style;
    request.context = args.context.clone();
    request.check_security = !args.no_security;
    request.generate_docs = !args.no_docs;

    // 会话状态由组合层持有，编排器与展示层通过引用访问
    let mut session = ReviewSession::new();
    session.state.set_code(request.code.clone());
    session.state.set_language(language);
    session.state.set_doc_style(doc_style);

    let mut orchestrator = ReviewOrchestrator::new(client);
    match orchestrator.submit_review(&mut session, &request).await {
        Ok(Some(score)) => {
            print_result(&session, &request, &args, score)?;
            Ok(())
        }
        Ok(None) => {
            // 响应已过期被丢弃，单次 CLI 调用中不会出现
            Ok(())
        }
        Err(err) => {
            // 校验与在途守卫类错误不写入会话状态，消息直接取自错误本身
            let message = match session.state.error() {
                Some(msg) => msg.to_string(),
                None => err.user_message(),
            };
            Err(anyhow!(message))
        }
    }
}

fn read_source(args: &Args) -> anyhow::Result<String> {
    match &args.file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path)),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read code from stdin")?;
            Ok(buffer)
        }
    }
}

fn print_result(
    session: &ReviewSession,
    request: &ReviewRequest,
    args: &Args,
    score: f64,
) -> anyhow::Result<()> {
    let result = session
        .state
        .result()
        .ok_or_else(|| anyhow!("Review finished without a result"))?;

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }

    println!("📊 Score: {:.0}/100 ({})", score, score_tier(score));
    println!("📝 {}", result.summary);

    for tab in ReviewTab::ALL {
        println!();
        println!("== {} ==", tab.title());
        match tab {
            ReviewTab::Issues => {
                println!("{}", report::format_issue_summary(result));
                println!("{}", report::format_issues(result));
            }
            ReviewTab::Documentation => {
                println!("{}", report::format_documentation(result, request.generate_docs));
            }
            ReviewTab::Metrics => {
                println!("{}", report::format_metrics(result));
            }
        }
    }

    if !session.history.is_empty() {
        println!();
        println!("== History ==");
        for entry in session.history.entries() {
            println!(
                "  [{}] {} score {:.0}, {} issues - {}",
                entry.timestamp.format("%H:%M:%S"),
                entry.language,
                entry.score,
                entry.issues_count,
                entry.preview
            );
        }
    }

    Ok(())
}
