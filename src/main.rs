use anyhow::{anyhow, Context as _};
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};

use pickset::app::pick_use_case::PickSession;
use pickset::app::ports::CatalogProvider;
use pickset::config::{AppProfile, Config, Preset};
use pickset::infra::{FileCatalog, HttpApi};
use pickset::logging;
use pickset::screen::{self, Command};
use pickset::storage::{HistoryStore, SessionStore, User};
use pickset::{Movie, Player, Selectable};

#[derive(Parser)]
#[command(name = "pickset")]
#[command(about = "Rank movies or players into exclusive categories and submit the picks")]
#[command(version)]
struct Cli {
    /// Config file (defaults to pickset.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// App preset: flick-pick or start-bench-cut
    #[arg(long, global = true)]
    preset: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch and print the catalog
    Catalog {
        /// Read items from a local JSON file instead of the API
        #[arg(long)]
        catalog_file: Option<PathBuf>,
    },
    /// Pick categories for items and submit them
    Pick {
        /// Read items from a local JSON file instead of the API
        #[arg(long)]
        catalog_file: Option<PathBuf>,
        /// Toggle ITEM=CATEGORY (repeatable); skips interactive mode
        #[arg(long = "select", value_name = "ITEM=CATEGORY")]
        select: Vec<String>,
        /// Print the payload instead of submitting
        #[arg(long)]
        dry_run: bool,
    },
    /// Manage the stored token and user
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },
    /// Show recent submissions
    History {
        /// Number of entries to show
        #[arg(long, default_value_t = 10)]
        limit: usize,
        /// Include every preset, not just the active one
        #[arg(long)]
        all: bool,
    },
}

#[derive(Subcommand)]
enum SessionAction {
    /// Print the current session
    Show,
    /// Store a bearer token (and optionally the user it belongs to)
    SetToken {
        token: String,
        #[arg(long, requires_all = ["email", "name"])]
        user_id: Option<String>,
        #[arg(long, requires = "user_id")]
        email: Option<String>,
        #[arg(long, requires = "user_id")]
        name: Option<String>,
    },
    /// Forget the token and user
    Clear,
}

struct Context {
    config: Config,
    profile: AppProfile,
}

impl Context {
    /// API client carrying the session token, falling back to the configured one
    fn api(&self) -> anyhow::Result<HttpApi> {
        let session = SessionStore::open(&self.config.storage.session_file)?;
        let token = session
            .token()
            .map(str::to_string)
            .or_else(|| self.config.api.token.clone());
        Ok(HttpApi::from_config(&self.config, &self.profile)?.with_token(token))
    }

    fn provider<T>(&self, catalog_file: Option<PathBuf>) -> anyhow::Result<Box<dyn CatalogProvider<T>>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        Ok(match catalog_file {
            Some(path) => Box::new(FileCatalog::new(path)),
            None => Box::new(self.api()?),
        })
    }
}

async fn list_catalog<T>(ctx: &Context, catalog_file: Option<PathBuf>) -> anyhow::Result<()>
where
    T: Selectable + DeserializeOwned + 'static,
{
    let provider = ctx.provider::<T>(catalog_file)?;
    let mut session = PickSession::<T>::new(ctx.profile.preset.name(), ctx.profile.categories.clone());
    let loaded = session.load(provider.as_ref()).await;
    println!("{}", screen::render_session(&session));
    loaded.context("catalog fetch failed")?;
    Ok(())
}

async fn run_pick<T>(ctx: &Context, catalog_file: Option<PathBuf>, select: Vec<String>, dry_run: bool) -> anyhow::Result<()>
where
    T: Selectable + DeserializeOwned + 'static,
{
    let provider = ctx.provider::<T>(catalog_file)?;
    let api = ctx.api()?;
    let mut history = HistoryStore::open(&ctx.config.storage.history_file)?;
    let mut session = PickSession::<T>::new(ctx.profile.preset.name(), ctx.profile.categories.clone());

    if let Err(e) = session.load(provider.as_ref()).await {
        println!("{}", screen::render_session(&session));
        return Err(e).context("catalog fetch failed");
    }

    if select.is_empty() {
        return interactive(&mut session, provider.as_ref(), &api, &mut history).await;
    }

    for pick in &select {
        let (item, category) = pick
            .rsplit_once('=')
            .ok_or_else(|| anyhow!("expected ITEM=CATEGORY, got '{}'", pick))?;
        let outcome = session.toggle_by_key(item.trim(), category.trim())?;
        if let Some(tracker) = session.tracker() {
            println!("{}", screen::describe_outcome(tracker, outcome, item.trim(), category.trim()));
        }
    }

    let tracker = session.tracker().ok_or_else(|| anyhow!("catalog not loaded"))?;
    println!("{}", screen::render_status(tracker));
    if dry_run {
        println!("{}", tracker.to_submission_payload().to_json()?);
        return Ok(());
    }

    let receipt = session.submit(&api).await?;
    info!("Submission {} accepted", receipt.id);
    println!("Submitted! Thanks for your picks.");
    history.record(receipt)?;
    Ok(())
}

async fn interactive<T>(
    session: &mut PickSession<T>,
    provider: &dyn CatalogProvider<T>,
    api: &HttpApi,
    history: &mut HistoryStore,
) -> anyhow::Result<()>
where
    T: Selectable,
{
    println!("{}", screen::render_session(session));
    println!("Type 'help' for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let Some(command) = screen::parse_command(&line) else {
            if !line.trim().is_empty() {
                println!("Unrecognized input, type 'help'");
            }
            continue;
        };
        debug!(?command, "command");

        match command {
            Command::Toggle { item, category } => match session.toggle_by_key(&item, &category) {
                Ok(outcome) => {
                    if let Some(tracker) = session.tracker() {
                        println!("{}", screen::describe_outcome(tracker, outcome, &item, &category));
                    }
                }
                Err(e) => println!("{}", e),
            },
            Command::Show { item } => match session.tracker() {
                Some(tracker) => match tracker.catalog().resolve_item(&item) {
                    Ok(id) => println!("{}", screen::render_details(tracker, id)),
                    Err(e) => println!("{}", e),
                },
                None => println!("{}", screen::render_session(session)),
            },
            Command::List => println!("{}", screen::render_session(session)),
            Command::Status => match session.tracker() {
                Some(tracker) => println!("{}", screen::render_status(tracker)),
                None => println!("{}", screen::render_session(session)),
            },
            Command::Payload => {
                if let Some(tracker) = session.tracker() {
                    println!("{}", tracker.to_submission_payload().to_json()?);
                }
            }
            Command::Submit => match session.submit(api).await {
                Ok(receipt) => {
                    history.record(receipt)?;
                    println!("Submitted! Thanks for your picks.");
                }
                Err(e) => println!("Submission failed: {}", e),
            },
            Command::Refresh => {
                if let Err(e) = session.refresh(provider).await {
                    warn!("Refresh failed: {}", e);
                }
                println!("{}", screen::render_session(session));
            }
            Command::Help => println!("{}", screen::HELP),
            Command::Quit => break,
        }
    }
    Ok(())
}

fn run_session(config: &Config, action: SessionAction) -> anyhow::Result<()> {
    let mut store = SessionStore::open(&config.storage.session_file)?;
    match action {
        SessionAction::Show => {
            match store.token() {
                Some(token) => println!("Token: {}…", token.chars().take(6).collect::<String>()),
                None => println!("Not signed in"),
            }
            if let Some(user) = store.user() {
                println!("User:  {} <{}> ({})", user.name, user.email, user.id);
            }
        }
        SessionAction::SetToken {
            token,
            user_id,
            email,
            name,
        } => {
            store.set_token(token)?;
            if let (Some(id), Some(email), Some(name)) = (user_id, email, name) {
                store.set_user(Some(User { id, email, name }))?;
            }
            println!("Session saved to {}", store.path().display());
        }
        SessionAction::Clear => {
            store.clear()?;
            println!("Session cleared");
        }
    }
    Ok(())
}

fn show_history(ctx: &Context, limit: usize, all: bool) -> anyhow::Result<()> {
    let history = HistoryStore::open(&ctx.config.storage.history_file)?;
    let preset = (!all).then(|| ctx.profile.preset.name());
    let entries = history.recent(limit, preset);
    if entries.is_empty() {
        println!("No submissions yet");
        return Ok(());
    }
    for entry in entries {
        println!("{}  {}", entry.submitted_at.format("%Y-%m-%d %H:%M"), entry.preset);
        for selection in &entry.selections {
            println!("    {:<40} {}", selection.item, selection.category.to_uppercase());
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => {
            let mut config = Config::load_from(path)?;
            config.apply_env_overrides();
            config
        }
        None => Config::load()?,
    };
    if let Some(preset) = &cli.preset {
        config.app.preset = preset.clone();
    }

    let _guard = logging::init_logging(&config.storage.log_dir);
    let profile = config.app_profile()?;
    debug!(preset = profile.preset.name(), base_url = %config.api.base_url, "starting");
    let ctx = Context { config, profile };

    match cli.command {
        Commands::Catalog { catalog_file } => match ctx.profile.preset {
            Preset::FlickPick => list_catalog::<Movie>(&ctx, catalog_file).await?,
            Preset::StartBenchCut => list_catalog::<Player>(&ctx, catalog_file).await?,
        },
        Commands::Pick {
            catalog_file,
            select,
            dry_run,
        } => match ctx.profile.preset {
            Preset::FlickPick => run_pick::<Movie>(&ctx, catalog_file, select, dry_run).await?,
            Preset::StartBenchCut => run_pick::<Player>(&ctx, catalog_file, select, dry_run).await?,
        },
        Commands::Session { action } => run_session(&ctx.config, action)?,
        Commands::History { limit, all } => show_history(&ctx, limit, all)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_token_user_fields_need_user_id() {
        let partial = Cli::try_parse_from(["pickset", "session", "set-token", "abc", "--email", "a@b.c", "--name", "Ann"]);
        assert!(partial.is_err());

        let full = Cli::try_parse_from([
            "pickset", "session", "set-token", "abc", "--user-id", "u1", "--email", "a@b.c", "--name", "Ann",
        ]);
        assert!(full.is_ok());
        assert!(Cli::try_parse_from(["pickset", "session", "set-token", "abc"]).is_ok());
    }
}
