// Allow panic/unwrap/expect in tests (denied globally via Cargo.toml lints)
#![cfg_attr(
    test,
    allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic_in_result_fn,
        clippy::unwrap_in_result,
        clippy::arithmetic_side_effects,
        clippy::indexing_slicing
    )
)]

use aja_daemon::db::Database;
use aja_daemon::logging::{init_logging, parse_rotation, LogConfig, LOG_FILENAME};
use aja_daemon::ordering::OrderingPolicy;
use aja_daemon::user::{
    compact_orders, create_user, deactivate_user, get_user, list_users, move_user,
    reactivate_user, update_user, CreateUserOptions, ListUsersFilter, UpdateUserOptions,
};
use aja_daemon::user_config::{load_user_config, UserConfig};
use aja_daemon::utils::{default_database_path, format_display_path};
use clap::{Args as ClapArgs, Parser, Subcommand};
use color_eyre::eyre::Result;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Aja - roster of users kept in a dense, unique display order
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// SQLite database file (default: [database].path in ~/.aja/config.toml, then ~/.aja/aja.db)
    #[arg(long, env = "AJA_DB_PATH", global = true)]
    db: Option<PathBuf>,

    /// Enable JSON log format (for production/log aggregation)
    #[arg(long, env = "AJA_LOG_JSON", default_value = "false", global = true)]
    log_json: bool,

    /// Log rotation period: daily, hourly, or never
    #[arg(long, env = "AJA_LOG_ROTATION", default_value = "daily", global = true)]
    log_rotation: String,

    /// Custom log directory (default: ~/.aja/logs)
    #[arg(long, env = "AJA_LOG_DIR", global = true)]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Manage roster users
    #[command(subcommand)]
    User(UserCommand),
}

#[derive(Subcommand, Debug)]
enum UserCommand {
    /// Create a user at the earliest free position
    Create(CreateArgs),
    /// Show one user
    Get { id: i64 },
    /// List users in display order
    List {
        /// Only active users
        #[arg(long)]
        active: bool,
        /// Only inactive users
        #[arg(long, conflicts_with = "active")]
        inactive: bool,
    },
    /// Patch fields and optionally move a user
    Update(UpdateArgs),
    /// Move a user to a new position, shifting the users in between
    Move {
        id: i64,
        #[arg(allow_negative_numbers = true)]
        target: i64,
    },
    /// Mark a user inactive
    Deactivate { id: i64 },
    /// Mark an inactive user active again
    Reactivate { id: i64 },
    /// Renumber positions to 1..=n, closing gaps
    Compact,
}

#[derive(ClapArgs, Debug)]
struct CreateArgs {
    #[arg(long)]
    username: String,
    #[arg(long)]
    email: String,
    /// Comma-separated list of skills
    #[arg(long, value_delimiter = ',')]
    skills: Vec<String>,
    #[arg(long)]
    show_on_site: bool,
    /// Defaults to "X"
    #[arg(long)]
    initials: Option<String>,
    #[arg(long)]
    positions: Option<String>,
    #[arg(long)]
    img: Option<String>,
}

impl From<CreateArgs> for CreateUserOptions {
    fn from(args: CreateArgs) -> Self {
        Self {
            username: args.username,
            email: args.email,
            skills: args.skills,
            show_on_site: args.show_on_site,
            initials: args.initials,
            positions: args.positions,
            img: args.img,
        }
    }
}

#[derive(ClapArgs, Debug)]
struct UpdateArgs {
    id: i64,
    #[arg(long)]
    username: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    active: Option<bool>,
    /// Comma-separated list of skills (replaces the current list)
    #[arg(long, value_delimiter = ',')]
    skills: Option<Vec<String>>,
    #[arg(long)]
    show_on_site: Option<bool>,
    #[arg(long)]
    initials: Option<String>,
    /// Empty string clears the value
    #[arg(long)]
    positions: Option<String>,
    /// Empty string clears the value
    #[arg(long)]
    img: Option<String>,
    /// Move the user to this position in the same transaction
    #[arg(long, allow_negative_numbers = true)]
    display_order: Option<i64>,
}

impl From<UpdateArgs> for UpdateUserOptions {
    fn from(args: UpdateArgs) -> Self {
        Self {
            username: args.username,
            email: args.email,
            active: args.active,
            skills: args.skills,
            show_on_site: args.show_on_site,
            initials: args.initials,
            positions: args.positions,
            img: args.img,
            display_order: args.display_order,
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run_user_command(
    db: &Database,
    policy: OrderingPolicy,
    command: UserCommand,
) -> Result<()> {
    match command {
        UserCommand::Create(args) => print_json(&create_user(db, policy, args.into()).await?),
        UserCommand::Get { id } => print_json(&get_user(db, id).await?),
        UserCommand::List { active, inactive } => {
            let active = match (active, inactive) {
                (true, _) => Some(true),
                (false, true) => Some(false),
                (false, false) => None,
            };
            print_json(&list_users(db, ListUsersFilter { active }).await?)
        }
        UserCommand::Update(args) => {
            let id = args.id;
            print_json(&update_user(db, policy, id, args.into()).await?)
        }
        UserCommand::Move { id, target } => print_json(&move_user(db, policy, id, target).await?),
        UserCommand::Deactivate { id } => print_json(&deactivate_user(db, policy, id).await?),
        UserCommand::Reactivate { id } => print_json(&reactivate_user(db, policy, id).await?),
        UserCommand::Compact => {
            let changed = compact_orders(db, policy).await?;
            print_json(&serde_json::json!({ "changed": changed }))
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Install color-eyre error hooks for colored error output
    color_eyre::install()?;

    // Parse CLI arguments first (before logging, so we can use log config)
    let args = Args::parse();

    let defaults = LogConfig::default();
    let log_dir = args.log_dir.map_or(defaults.log_dir, PathBuf::from);
    let log_file = log_dir.join(LOG_FILENAME);
    let log_config = LogConfig {
        log_dir,
        json_format: args.log_json,
        rotation: parse_rotation(&args.log_rotation),
        log_level: defaults.log_level,
    };

    if let Err(e) = init_logging(&log_config) {
        eprintln!();
        eprintln!("Error: Failed to initialize logging: {e}");
        eprintln!();
        eprintln!("Logs: {}", log_file.display());
        eprintln!();
        return Err(e);
    }

    // Load user-level config (~/.aja/config.toml); file is optional.
    let user_cfg = load_user_config().unwrap_or_else(|e| {
        warn!("Failed to load user config, using defaults: {e}");
        UserConfig::default()
    });

    let db_path = args
        .db
        .or(user_cfg.database.path.clone())
        .unwrap_or_else(default_database_path);
    debug!(
        "Using database {}",
        format_display_path(&db_path.to_string_lossy())
    );
    let db = Database::open(db_path, user_cfg.database.busy_timeout()).await?;

    match args.command {
        Command::User(command) => run_user_command(&db, user_cfg.ordering, command).await,
    }
}
