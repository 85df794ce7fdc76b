//! Command-line chat client for portfolio questions
//!
//! # Usage
//!
//! ```bash
//! # Talk to a local analysis service
//! trade-chat --endpoint http://localhost:8011/process_data
//!
//! # Try it without a backend
//! trade-chat --demo
//!
//! # Ask a single question and exit
//! trade-chat --portfolio ACC-1 --query "How did my portfolio do this year?"
//! ```

mod output;
mod repl;

use clap::Parser;
use repl::Repl;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use trade_chat_core::{
    AnalysisService, ChartStyle, ChatConfig, ChatSession, DemoAnalysisService,
    HttpAnalysisClient, PortfolioStore, RenderOptions, Renderer,
};
use trade_chat_utils::LogFormat;

#[derive(Parser, Debug)]
#[command(name = "trade-chat")]
#[command(version, about = "Chat with your portfolio analysis service", long_about = None)]
struct Args {
    /// Analysis service URL
    #[arg(long, env = "TRADE_CHAT_ENDPOINT")]
    endpoint: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// File holding the stored portfolio ID
    #[arg(long, env = "TRADE_CHAT_STORAGE")]
    storage: Option<PathBuf>,

    /// Keep the portfolio ID in memory only
    #[arg(long)]
    ephemeral: bool,

    /// Portfolio ID to use (and store)
    #[arg(short, long)]
    portfolio: Option<String>,

    /// Use the built-in demo service instead of the network
    #[arg(long)]
    demo: bool,

    /// How to draw charts: plot or table
    #[arg(long)]
    chart_style: Option<ChartStyle>,

    /// Ask one question, print the reply and exit
    #[arg(short, long)]
    query: Option<String>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Debug logging (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,

    /// Log as JSON lines on stderr
    #[arg(long)]
    log_json: bool,
}

impl Args {
    fn config(&self) -> anyhow::Result<ChatConfig> {
        let mut builder = ChatConfig::builder();

        if let Some(endpoint) = &self.endpoint {
            builder = builder.endpoint(endpoint);
        }
        if let Some(secs) = self.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(path) = &self.storage {
            builder = builder.storage_path(path);
        }
        if self.demo {
            builder = builder.demo(true);
        }
        if let Some(style) = self.chart_style {
            builder = builder.chart_style(style);
        }

        Ok(builder.with_env()?.build()?)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    trade_chat_utils::load_dotenv();

    let args = Args::parse();

    let directives = if args.verbose {
        "warn,trade_chat_core=debug,trade_chat_cli=debug"
    } else {
        trade_chat_utils::logging::DEFAULT_DIRECTIVES
    };
    let format = if args.log_json {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    };
    trade_chat_utils::init_tracing_with(directives, format);

    let config = args.config()?;
    info!(endpoint = %config.endpoint, demo = config.demo, "Starting trade-chat");

    let portfolio = if args.ephemeral {
        PortfolioStore::ephemeral()
    } else {
        PortfolioStore::at_path(&config.storage_path)
    };

    if config.demo {
        let service = DemoAnalysisService::new(config.demo_delay);
        run(ChatSession::new(service, portfolio), &args, &config).await
    } else {
        let service = HttpAnalysisClient::new(&config)?;
        run(ChatSession::new(service, portfolio), &args, &config).await
    }
}

async fn run<S: AnalysisService>(
    mut session: ChatSession<S>,
    args: &Args,
    config: &ChatConfig,
) -> anyhow::Result<()> {
    let color = output::color_enabled(args.no_color);

    ensure_portfolio(
        &mut session,
        args.portfolio.as_deref(),
        std::io::stdin().is_terminal(),
    )?;

    let renderer = Renderer::new(RenderOptions {
        width: output::terminal_width(),
        chart_style: config.chart_style,
        color,
    });

    let portfolio = session.portfolio_id()?.map(|id| id.to_string());
    let service = session.service().describe();
    let mut repl = Repl::new(session, renderer, color);

    if let Some(query) = &args.query {
        let (_, text) = repl.handle(query).await;
        println!("{text}");
        return Ok(());
    }

    println!("{}", output::banner(&service, portfolio.as_deref(), color));
    repl.run().await
}

/// Store `--portfolio` if given, then make sure some portfolio ID is known.
///
/// Chat stays unavailable until one is: interactive sessions are prompted,
/// anything else is an error.
fn ensure_portfolio<S: AnalysisService>(
    session: &mut ChatSession<S>,
    arg: Option<&str>,
    interactive: bool,
) -> anyhow::Result<()> {
    if let Some(raw) = arg {
        session.set_portfolio_id(raw)?;
    }

    if session.portfolio_id()?.is_none() {
        if !interactive {
            anyhow::bail!("no portfolio ID stored; pass --portfolio <id>");
        }
        let id = repl::prompt_portfolio_id()?;
        session.set_portfolio_id(id.as_str())?;
    }

    Ok(())
}
