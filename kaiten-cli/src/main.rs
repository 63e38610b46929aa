//! `kaiten`: query the Kaiten API from the command line.
//!
//! Every subcommand prints its result as pretty JSON on stdout. Failures
//! print one line to stderr and exit with status 1.
//!
//! Connection settings are resolved per field, first match wins:
//!
//! 1. `--url` / `--token`
//! 2. `KAITEN_URL` / `KAITEN_TOKEN`
//! 3. the JSON config file (`--config`, default
//!    `~/.config/kaiten-mcp/config.json`)

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use futures::TryStreamExt;
use kaiten::pagination::DEFAULT_PAGE_SIZE;
use kaiten::resources::{
    CardFilter, CustomPropertyQuery, LaneCondition, SelectValueQuery, UserQuery,
};
use kaiten::{Client, Config, PartialConfig};
use serde::Serialize;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "kaiten", version, about = "Query the Kaiten API")]
struct Cli {
    /// API base URL, e.g. https://team.kaiten.ru/api/latest [env: KAITEN_URL]
    #[arg(long, global = true)]
    url: Option<String>,

    /// API token [env: KAITEN_TOKEN]
    #[arg(long, global = true)]
    token: Option<String>,

    /// JSON file with "url" and "token" keys
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log requests and retries to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    /// List all spaces
    ListSpaces,

    /// List the boards of a space
    ListBoards {
        #[arg(long)]
        space_id: i64,
    },

    /// Show a board
    GetBoard {
        #[arg(long)]
        id: i64,
    },

    /// List the columns of a board
    GetBoardColumns {
        #[arg(long)]
        board_id: i64,
    },

    /// List the lanes of a board
    GetBoardLanes {
        #[arg(long)]
        board_id: i64,

        /// Only lanes that are live, archived or deleted
        #[arg(long)]
        condition: Option<LaneCondition>,
    },

    /// List the cards on a board
    ListCards {
        #[arg(long)]
        board_id: i64,

        #[command(flatten)]
        paging: Paging,
    },

    /// Show a card
    GetCard {
        #[arg(long)]
        id: i64,
    },

    /// List the members of a card
    GetCardMembers {
        #[arg(long)]
        card_id: i64,
    },

    /// List the boards, columns and lanes a card has been in
    GetCardHistory {
        #[arg(long)]
        card_id: i64,
    },

    /// List the children of a card
    ListCardChildren {
        #[arg(long)]
        card_id: i64,
    },

    /// List the external links on a card
    ListExternalLinks {
        #[arg(long)]
        card_id: i64,
    },

    /// List card types
    ListCardTypes {
        #[command(flatten)]
        paging: Paging,
    },

    /// List sprints
    ListSprints {
        /// Only running sprints
        #[arg(long)]
        active: bool,

        #[command(flatten)]
        paging: Paging,
    },

    /// List company users
    ListUsers {
        /// Match on name, login or email
        #[arg(long)]
        query: Option<String>,

        /// Include deactivated users
        #[arg(long)]
        include_inactive: bool,

        #[command(flatten)]
        paging: Paging,
    },

    /// Show the user the token belongs to
    CurrentUser,

    /// List custom property definitions
    ListCustomProperties {
        /// Match on name
        #[arg(long)]
        query: Option<String>,

        #[command(flatten)]
        paging: Paging,
    },

    /// Show a custom property definition
    GetCustomProperty {
        #[arg(long)]
        id: i64,
    },

    /// List the options of a select custom property
    ListCustomPropertySelectValues {
        #[arg(long)]
        property_id: i64,

        /// Match on the option text
        #[arg(long)]
        query: Option<String>,

        /// Field to sort by
        #[arg(long)]
        order_by: Option<String>,

        #[command(flatten)]
        paging: Paging,
    },

    /// Show one option of a select custom property
    GetCustomPropertySelectValue {
        #[arg(long)]
        property_id: i64,

        #[arg(long)]
        id: i64,
    },
}

#[derive(clap::Args, Debug, Clone, Copy, PartialEq, Eq)]
struct Paging {
    /// Skip this many items
    #[arg(long, default_value_t = 0)]
    offset: u32,

    /// Page size
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    limit: u32,

    /// Fetch every page, `limit` items at a time
    #[arg(long)]
    all: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        },
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        },
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "kaiten=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<String> {
    let config = resolve_config(&cli, PartialConfig::from_env())?;
    let client = Client::from_config(config)?;
    let value = execute(&client, cli.command).await?;
    Ok(serde_json::to_string_pretty(&value)?)
}

fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config").join("kaiten-mcp").join("config.json"))
}

/// Layers flags over `env` over the config file.
fn resolve_config(cli: &Cli, env: PartialConfig) -> anyhow::Result<Config> {
    let path = cli.config.clone().or_else(default_config_path);
    let file = match &path {
        Some(path) => PartialConfig::from_file(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => PartialConfig::default(),
    };
    tracing::debug!(config_file = ?path, "resolving configuration");

    let config = PartialConfig::new(cli.url.clone(), cli.token.clone())
        .or(env)
        .or(file)
        .into_config()?;
    Ok(config)
}

async fn execute(client: &Client, command: Command) -> Result<Value, kaiten::Error> {
    match command {
        Command::ListSpaces => json(client.spaces().list().await?),
        Command::ListBoards { space_id } => json(client.boards().list(space_id).await?),
        Command::GetBoard { id } => json(client.boards().get(id).await?),
        Command::GetBoardColumns { board_id } => json(client.columns().list(board_id).await?),
        Command::GetBoardLanes { board_id, condition } => {
            json(client.lanes().list(board_id, condition).await?)
        },
        Command::ListCards { board_id, paging } => {
            let cards = client.cards();
            let filter = CardFilter::board(board_id);
            if paging.all {
                json(cards.all(filter, paging.limit).try_collect::<Vec<_>>().await?)
            } else {
                json(cards.list(&filter, paging.offset, paging.limit).await?.items)
            }
        },
        Command::GetCard { id } => json(client.cards().get(id).await?),
        Command::GetCardMembers { card_id } => json(client.card_members().list(card_id).await?),
        Command::GetCardHistory { card_id } => json(client.cards().location_history(card_id).await?),
        Command::ListCardChildren { card_id } => json(client.card_children().list(card_id).await?),
        Command::ListExternalLinks { card_id } => json(client.external_links().list(card_id).await?),
        Command::ListCardTypes { paging } => {
            let card_types = client.card_types();
            if paging.all {
                json(card_types.all(paging.limit).try_collect::<Vec<_>>().await?)
            } else {
                json(card_types.list(paging.offset, paging.limit).await?.items)
            }
        },
        Command::ListSprints { active, paging } => {
            let sprints = client.sprints();
            let active = active.then_some(true);
            if paging.all {
                json(sprints.all(active, paging.limit).try_collect::<Vec<_>>().await?)
            } else {
                json(sprints.list(active, paging.offset, paging.limit).await?.items)
            }
        },
        Command::ListUsers { query, include_inactive, paging } => {
            let users = client.users();
            let query = UserQuery { query, include_inactive };
            if paging.all {
                json(users.all(query, paging.limit).try_collect::<Vec<_>>().await?)
            } else {
                json(users.list(&query, paging.offset, paging.limit).await?.items)
            }
        },
        Command::CurrentUser => json(client.users().current().await?),
        Command::ListCustomProperties { query, paging } => {
            let properties = client.custom_properties();
            let query = CustomPropertyQuery { query };
            if paging.all {
                json(properties.all(query, paging.limit).try_collect::<Vec<_>>().await?)
            } else {
                json(properties.list(&query, paging.offset, paging.limit).await?.items)
            }
        },
        Command::GetCustomProperty { id } => json(client.custom_properties().get(id).await?),
        Command::ListCustomPropertySelectValues { property_id, query, order_by, paging } => {
            let properties = client.custom_properties();
            let query = SelectValueQuery { query, order_by };
            if paging.all {
                let values = properties.all_select_values(property_id, query, paging.limit);
                json(values.try_collect::<Vec<_>>().await?)
            } else {
                let page = properties
                    .list_select_values(property_id, &query, paging.offset, paging.limit)
                    .await?;
                json(page.items)
            }
        },
        Command::GetCustomPropertySelectValue { property_id, id } => {
            json(client.custom_properties().get_select_value(property_id, id).await?)
        },
    }
}

fn json(value: impl Serialize) -> Result<Value, kaiten::Error> {
    serde_json::to_value(value).map_err(kaiten::Error::from)
}
