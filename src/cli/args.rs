use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "ai-review",
    version,
    about = "Submit code to the AI review service and view the results"
)]
pub struct Args {
    /// 待审查的源代码文件（缺省时从标准输入读取）
    pub file: Option<String>,

    /// 编程语言 (python, javascript, typescript, java, cpp, go)
    #[arg(short, long, default_value = "python")]
    pub language: String,

    /// 文档风格 (google, numpy, sphinx, javadoc, jsdoc)
    #[arg(long, default_value = "google")]
    pub doc_style: String,

    /// 附加的上下文说明
    #[arg(long)]
    pub context: Option<String>,

    /// 跳过安全分析
    #[arg(long, default_value_t = false)]
    pub no_security: bool,

    /// 不生成文档
    #[arg(long, default_value_t = false)]
    pub no_docs: bool,

    /// 审查服务地址（覆盖配置文件与环境变量）
    #[arg(long)]
    pub api_url: Option<String>,

    /// 输出格式 (text 或 json)
    #[arg(long, default_value = "text")]
    pub format: String,

    /// 调试模式
    #[arg(long, default_value_t = false)]
    pub debug: bool,
}
