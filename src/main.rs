use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use vlr_stats::{append_json, Dataset, PageCache, Result, VlrClient, VlrError, BASE_URL};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Site root to scrape
    #[arg(long, env = "VLR_BASE_URL", default_value = BASE_URL)]
    base_url: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// User agent sent with every request
    #[arg(long, default_value = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")]
    user_agent: String,

    /// Log level or filter directive (error, warn, info, debug, trace)
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scrape matches into the dataset, skipping matches it already holds
    Scrape(ScrapeArgs),
    /// Print a player's most recent match ids
    PlayerMatches {
        player_id: u32,
        #[arg(long, default_value_t = 50)]
        count: usize,
    },
    /// Print a team's most recent match ids
    TeamMatches {
        team_id: u32,
        #[arg(long, default_value_t = 50)]
        count: usize,
    },
    /// Print a player's profile info as JSON
    PlayerInfo {
        player_id: u32,
        /// Also append the JSON to `<NAME>.json`
        #[arg(long, value_name = "NAME")]
        json: Option<PathBuf>,
    },
    /// Print a match's header details as JSON
    MatchInfo {
        match_id: u32,
        /// Also append the JSON to `<NAME>.json`
        #[arg(long, value_name = "NAME")]
        json: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct ScrapeArgs {
    /// Match ids to scrape, comma separated
    #[arg(long, value_delimiter = ',')]
    ids: Vec<u32>,

    /// Also scrape the most recent matches of these players
    #[arg(long, value_delimiter = ',')]
    player: Vec<u32>,

    /// Also scrape the most recent matches of these teams
    #[arg(long, value_delimiter = ',')]
    team: Vec<u32>,

    /// How many recent matches to take per player or team
    #[arg(long, default_value_t = 50)]
    count: usize,

    /// Dataset file rows are appended to
    #[arg(long, default_value = "players.csv")]
    dataset: PathBuf,

    /// File holding downloaded match pages between runs
    #[arg(long, default_value = "pages.csv")]
    pages: PathBuf,

    /// Neither read nor write the page file
    #[arg(long)]
    skip_cache: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(cli.timeout_secs))
        .user_agent(cli.user_agent.as_str())
        .build()
        .map_err(|e| VlrError::Http {
            url: cli.base_url.clone(),
            source: e,
        })?;
    let client = VlrClient::with_client(http).with_base_url(cli.base_url.as_str());

    match cli.command {
        Command::Scrape(args) => scrape(&client, args).await?,
        Command::PlayerMatches { player_id, count } => {
            for id in client.get_player_match_ids(player_id, count).await? {
                println!("{id}");
            }
        }
        Command::TeamMatches { team_id, count } => {
            for id in client.get_team_match_ids(team_id, count).await? {
                println!("{id}");
            }
        }
        Command::PlayerInfo { player_id, json } => {
            let player = client.get_player_info(player_id).await?;
            println!("{}", serde_json::to_string_pretty(&player)?);
            if let Some(name) = json {
                let path = append_json(name, &player)?;
                info!(path = %path.display(), "appended player info");
            }
        }
        Command::MatchInfo { match_id, json } => {
            let record = client.get_match_record(match_id).await?;
            println!("{}", serde_json::to_string_pretty(&record)?);
            if let Some(name) = json {
                let path = append_json(name, &record)?;
                info!(path = %path.display(), "appended match info");
            }
        }
    }
    Ok(())
}

async fn scrape(client: &VlrClient, args: ScrapeArgs) -> Result<()> {
    let mut ids = args.ids;
    for player_id in args.player {
        ids.extend(client.get_player_match_ids(player_id, args.count).await?);
    }
    for team_id in args.team {
        ids.extend(client.get_team_match_ids(team_id, args.count).await?);
    }
    if ids.is_empty() {
        info!("no match ids given, nothing to do");
        return Ok(());
    }

    let dataset = Dataset::load(&args.dataset)?;
    let mut cache = if args.skip_cache {
        PageCache::new()
    } else {
        PageCache::load(&args.pages)?
    };

    let result = client.merge_matches(&ids, Some(&dataset), &mut cache).await;
    if !args.skip_cache {
        cache.save(&args.pages)?;
    }
    let outcome = result?;

    Dataset::append_to(&args.dataset, &outcome.rows)?;
    info!(
        matches = outcome.processed.len(),
        rows = outcome.rows.len(),
        dataset = %args.dataset.display(),
        "dataset updated"
    );
    Ok(())
}
