//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use resena_core::api::{ApiClient, MovieId, Score};
use resena_core::config::Config;
use resena_core::logging::{self, LogTarget, WorkerGuard};

mod commands;

#[derive(Parser)]
#[command(name = "resena")]
#[command(version)]
#[command(about = "Terminal client for the Reseña movie-review service")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Service base URL, including the /api prefix
    #[arg(long, global = true, value_name = "URL")]
    base_url: Option<String>,

    /// Log to stderr (commands other than the interactive client)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Log in and print the access token
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long, env = "RESENA_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account
    Register {
        #[arg(short, long)]
        username: String,
        #[arg(short, long, env = "RESENA_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(short, long)]
        email: String,
    },
    /// List or add movies
    Movies {
        #[command(subcommand)]
        command: MovieCommands,
    },
    /// List or add reviews of a movie
    Reviews {
        #[command(subcommand)]
        command: ReviewCommands,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Bearer token for write commands.
#[derive(clap::Args, Debug, Clone)]
struct TokenArgs {
    /// Access token printed by `resena login`
    #[arg(long, env = "RESENA_TOKEN", hide_env_values = true)]
    token: String,
}

#[derive(clap::Subcommand)]
enum MovieCommands {
    /// List all movies
    List,
    /// Add a movie
    Add {
        #[arg(long)]
        title: String,
        /// Release year (integer)
        #[arg(long)]
        year: String,
        /// Metascore (integer)
        #[arg(long)]
        metascore: String,
        #[command(flatten)]
        auth: TokenArgs,
    },
}

#[derive(clap::Subcommand)]
enum ReviewCommands {
    /// List the reviews of a movie
    List {
        #[arg(value_name = "MOVIE_ID")]
        movie_id: i64,
    },
    /// Review a movie
    Add {
        #[arg(value_name = "MOVIE_ID")]
        movie_id: i64,
        #[arg(long)]
        comment: String,
        /// Score from 1 to 10
        #[arg(long, default_value_t = Score::DEFAULT, value_parser = clap::value_parser!(u8).range(1..=10))]
        score: u8,
        #[command(flatten)]
        auth: TokenArgs,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
    /// Set `api.base_url`, keeping the rest of the file intact
    SetBaseUrl {
        #[arg(value_name = "URL")]
        url: String,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let Cli {
        command,
        base_url,
        verbose,
    } = cli;

    match command {
        // Config commands must work even when the file doesn't parse.
        Some(Commands::Config { command }) => config_command(command),
        // default to the interactive client
        None => {
            let (client, _log_guard) = connect(base_url.as_deref(), Some(LogTarget::File))?;
            commands::tui::run(client).await
        }
        Some(command) => {
            let target = verbose.then_some(LogTarget::Stderr);
            let (client, _log_guard) = connect(base_url.as_deref(), target)?;
            service_command(&client, command).await
        }
    }
}

/// Loads config, installs logging and builds the API client.
///
/// The returned guard flushes file logs on drop.
fn connect(
    base_url: Option<&str>,
    log_target: Option<LogTarget>,
) -> Result<(ApiClient, Option<WorkerGuard>)> {
    let config = Config::load().context("load config")?;
    let guard = match log_target {
        Some(target) => logging::init(&config.log, target).context("init logging")?,
        None => None,
    };
    let base_url = config.resolve_base_url(base_url)?;
    let client = ApiClient::new(&base_url, config.api.timeout()).context("create API client")?;
    Ok((client, guard))
}

fn config_command(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Path => {
            commands::config::path();
            Ok(())
        }
        ConfigCommands::Init => commands::config::init(),
        ConfigCommands::SetBaseUrl { url } => commands::config::set_base_url(&url),
    }
}

async fn service_command(client: &ApiClient, command: Commands) -> Result<()> {
    match command {
        Commands::Login { username, password } => {
            commands::auth::login(client, &username, &password).await
        }
        Commands::Register {
            username,
            password,
            email,
        } => commands::auth::register(client, &username, &password, &email).await,

        Commands::Movies { command } => match command {
            MovieCommands::List => commands::movies::list(client).await,
            MovieCommands::Add {
                title,
                year,
                metascore,
                auth,
            } => commands::movies::add(client, &auth.token, &title, &year, &metascore).await,
        },

        Commands::Reviews { command } => match command {
            ReviewCommands::List { movie_id } => {
                commands::reviews::list(client, MovieId(movie_id)).await
            }
            ReviewCommands::Add {
                movie_id,
                comment,
                score,
                auth,
            } => {
                commands::reviews::add(
                    client,
                    &auth.token,
                    MovieId(movie_id),
                    &comment,
                    Score::new(score),
                )
                .await
            }
        },

        Commands::Config { command } => config_command(command),
    }
}
