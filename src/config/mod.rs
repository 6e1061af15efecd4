use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    /// 审查服务的基础地址
    pub api_base_url: String,
    /// 单次请求的超时时间（秒）
    pub request_timeout_secs: u64,
    /// 建立连接的超时时间（秒）
    pub connect_timeout_secs: u64,
    pub debug: bool,
}

impl Config {
    pub fn new() -> Self {
        // 默认配置
        let mut config = Config {
            api_base_url: "http://localhost:8000".to_string(),
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
            debug: false,
        };

        // 加载配置文件
        #[cfg(not(test))]
        config.load_from_env_file();
        // 加载环境变量（覆盖配置文件）
        config.load_from_env();

        config
    }

    pub fn load_from_env_file(&mut self) {
        // 尝试从用户主目录加载
        if let Ok(home) = env::var("HOME") {
            let user_env_path = PathBuf::from(format!("{}/.ai-review/.env", home));
            if user_env_path.exists() {
                dotenvy::from_path(user_env_path).ok();
            }
        }

        // 尝试从当前目录加载
        dotenvy::dotenv().ok();
    }

    pub fn load_from_env(&mut self) {
        if let Ok(url) = env::var("AI_REVIEW_API_URL") {
            self.api_base_url = url;
        }
        if let Ok(timeout) = env::var("AI_REVIEW_TIMEOUT_SECS") {
            if let Ok(secs) = timeout.parse() {
                self.request_timeout_secs = secs;
            }
        }
        if let Ok(timeout) = env::var("AI_REVIEW_CONNECT_TIMEOUT_SECS") {
            if let Ok(secs) = timeout.parse() {
                self.connect_timeout_secs = secs;
            }
        }
        if let Ok(debug) = env::var("AI_REVIEW_DEBUG") {
            self.debug = debug == "1" || debug.eq_ignore_ascii_case("true");
        }
    }

    pub fn update_from_args(&mut self, args: &crate::cli::args::Args) {
        // 命令行参数优先级最高
        if let Some(url) = &args.api_url {
            self.api_base_url = url.clone();
        }
        if args.debug {
            self.debug = true;
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let parsed = url::Url::parse(&self.api_base_url)
            .map_err(|e| anyhow::anyhow!("Invalid API base URL '{}': {}", self.api_base_url, e))?;

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            anyhow::bail!(
                "API base URL must use http or https, got '{}'",
                parsed.scheme()
            );
        }
        if self.request_timeout_secs == 0 {
            anyhow::bail!("Request timeout must be greater than zero");
        }
        if self.connect_timeout_secs == 0 {
            anyhow::bail!("Connect timeout must be greater than zero");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config {
            api_base_url: "http://localhost:8000".to_string(),
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
            debug: false,
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_non_http_url() {
        let config = Config {
            api_base_url: "ftp://example.com".to_string(),
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
            debug: false,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let config = Config {
            api_base_url: "http://localhost:8000".to_string(),
            request_timeout_secs: 0,
            connect_timeout_secs: 10,
            debug: false,
        };
        assert!(config.validate().is_err());
    }
}
