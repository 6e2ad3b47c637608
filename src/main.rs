use anyhow::Result;
use clap::Parser;
use reddit_activity::{
    init_tracing_once, resolve_credentials, ActivityPipeline, CredentialFlags, Normalizer, PipelineOptions,
    RedditClient, TerminalChart, DEFAULT_CSV_PATH, DEFAULT_TOP_N,
};
use std::path::PathBuf;

/// Track Reddit upvoted posts/comments.
#[derive(Debug, Parser)]
#[command(name = "reddit-activity", version, about)]
struct Cli {
    /// Reddit API client_id
    #[arg(long)]
    client_id: Option<String>,
    /// Reddit API client_secret
    #[arg(long)]
    client_secret: Option<String>,
    /// Reddit username
    #[arg(long)]
    username: Option<String>,
    /// Reddit password
    #[arg(long)]
    password: Option<String>,

    /// Destination CSV; replaced on every run
    #[arg(long, default_value = DEFAULT_CSV_PATH)]
    csv_path: PathBuf,
    /// Number of authors in the top-authors chart
    #[arg(long, default_value_t = DEFAULT_TOP_N)]
    top_n: usize,
    /// Skip the charts after saving
    #[arg(long)]
    no_charts: bool,
    /// Hide collection spinners
    #[arg(long)]
    no_progress: bool,
}

fn main() -> Result<()> {
    init_tracing_once();
    let normalizer = Normalizer::local();

    let cli = Cli::parse();
    let creds = resolve_credentials(CredentialFlags {
        client_id: cli.client_id,
        client_secret: cli.client_secret,
        username: cli.username,
        password: cli.password,
    })?;

    let opts = PipelineOptions::default()
        .with_csv_path(&cli.csv_path)
        .with_top_n(cli.top_n)
        .with_charts(!cli.no_charts)
        .with_progress(!cli.no_progress);

    let mut client = RedditClient::login(&creds, &opts.activity_user_agent, &opts.upvote_user_agent)?;
    let mut chart = TerminalChart::new(std::io::stdout().lock());

    let summary = ActivityPipeline::from_options(opts)
        .normalizer(normalizer)
        .run(&mut client, &mut chart)?;

    println!(
        "Saved {} items ({} activity, {} upvoted) to {}",
        summary.rows_written,
        summary.activity_rows,
        summary.upvoted_rows,
        summary.csv_path.display()
    );
    Ok(())
}
