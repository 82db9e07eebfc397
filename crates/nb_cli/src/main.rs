use clap::Parser;
use std::sync::Arc;
use tracing::info;

use nb_core::{Error, FeedSource, Mailer, PipelineConfig, Result};
use nb_feeds::RssFeedSource;
use nb_judge::create_judge;
use nb_mail::{ConsoleMailer, ResendMailer};
use nb_pipeline::Pipeline;
use nb_web::AppState;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[arg(long, default_value = "gemini", help = "Judge to use for relevance scoring. Available judges: gemini (default), dummy")]
    judge: String,
    /// Print the digest to stdout instead of mailing it.
    #[arg(long)]
    no_mail: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Run the pipeline once and exit.
    Run,
    /// Serve the HTTP trigger endpoints.
    Serve {
        #[arg(long, default_value_t = 8080)]
        port: u16,
    },
    /// List the configured feeds.
    Feeds,
}

fn build_pipeline(config: &PipelineConfig, judge_name: &str, no_mail: bool) -> Result<Pipeline> {
    let sources: Vec<Box<dyn FeedSource>> = config
        .feeds
        .iter()
        .map(|feed| Box::new(RssFeedSource::from_config(feed)) as Box<dyn FeedSource>)
        .collect();
    info!(
        "📰 Feeds configured: {}",
        config
            .feeds
            .iter()
            .map(|f| f.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );

    let judge = create_judge(judge_name, config.judge_api_key.clone())?;
    info!("🧠 Judge initialized (using {})", judge.name());

    let mailer: Arc<dyn Mailer> = if no_mail {
        Arc::new(ConsoleMailer::new())
    } else {
        let api_key = config.mail_api_key.clone().ok_or_else(|| {
            Error::Config("RESEND_API_KEY must be set (or pass --no-mail)".to_string())
        })?;
        Arc::new(ResendMailer::new(api_key))
    };

    Ok(Pipeline::new(config.clone(), sources, judge, mailer))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let config = PipelineConfig::from_env()?;

    match cli.command {
        Commands::Run => {
            let pipeline = build_pipeline(&config, &cli.judge, cli.no_mail)?;
            let summary = pipeline.run().await?;
            info!(
                "📊 Fetched {}, filtered {}, analyzed {}, selected {}",
                summary.fetched, summary.filtered, summary.analyzed, summary.selected
            );
        }
        Commands::Serve { port } => {
            let trigger_token = config.trigger_token.clone().ok_or_else(|| {
                Error::Config("NEWSBRIEF_TRIGGER_TOKEN must be set to serve".to_string())
            })?;
            let pipeline = build_pipeline(&config, &cli.judge, cli.no_mail)?
                .with_seen_store(Arc::new(nb_core::MemorySeenStore::new()));
            nb_web::serve(
                AppState {
                    pipeline,
                    trigger_token,
                },
                port,
            )
            .await?;
        }
        Commands::Feeds => {
            for feed in &config.feeds {
                println!("{}: {}", feed.name, feed.url);
            }
        }
    }

    Ok(())
}
