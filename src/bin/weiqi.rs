//! Weiqi service CLI: drives the session and game stores end to end, with
//! the session persisted to a local file across invocations.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use weiqi_client::config::ClientConfig;
use weiqi_client::net::games;
use weiqi_client::net::transport::{ApiError, Transport};
use weiqi_client::net::types::{Board, Game, Point};
use weiqi_client::state::auth::AuthStore;
use weiqi_client::state::game::GameStore;
use weiqi_client::storage::{FileStorage, SessionStorage};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("not logged in; run `weiqi login` first")]
    NotLoggedIn,
}

#[derive(Parser, Debug)]
#[command(name = "weiqi", about = "Weiqi session and game CLI")]
struct Cli {
    #[arg(long, env = "WEIQI_BASE_URL", default_value = "http://localhost:8080")]
    base_url: String,

    #[arg(long, env = "WEIQI_SESSION_FILE", default_value = ".weiqi-session.json")]
    session_file: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an account (does not log in).
    Register {
        username: String,
        email: String,
        password: String,
    },
    /// Log in and persist the session.
    Login { username: String, password: String },
    /// Clear the persisted session.
    Logout,
    /// Show the authenticated user.
    Whoami,
    Game(GameCommand),
}

#[derive(Args, Debug)]
struct GameCommand {
    #[command(subcommand)]
    command: GameSubcommand,
}

#[derive(Subcommand, Debug)]
enum GameSubcommand {
    /// Create a new game and print its id.
    Create {
        /// Play against the automated opponent.
        #[arg(long)]
        ai: bool,
    },
    /// Fetch and render one game.
    Show { game_id: String },
    /// Join an open game as the second player.
    Join { game_id: String },
    /// Play a stone at (x, y).
    Move { game_id: String, x: u32, y: u32 },
    /// Pass the turn.
    Pass { game_id: String },
    /// Ask the automated opponent to play.
    AiMove { game_id: String },
    /// List games: yours by default, open seats with --waiting.
    List {
        #[arg(long)]
        waiting: bool,
    },
    /// Poll a game and re-render whenever it changes.
    Watch {
        game_id: String,
        #[arg(long, default_value_t = 2)]
        interval_secs: u64,
    },
}

struct App {
    auth: AuthStore,
    game: GameStore,
    transport: Arc<Transport>,
}

fn build_app(base_url: &str, session_file: &Path) -> Result<App, CliError> {
    let storage: Arc<dyn SessionStorage> = Arc::new(FileStorage::open(session_file));
    let config = ClientConfig::new(base_url);

    let transport = Arc::new(
        Transport::new(&config, Arc::clone(&storage))?.with_session_expired(Box::new(|| {
            eprintln!("session expired; run `weiqi login` again");
        })),
    );

    let auth = AuthStore::new(Arc::clone(&transport), Arc::clone(&storage));
    auth.init_user();
    let game = GameStore::new(Arc::clone(&transport));

    Ok(App { auth, game, transport })
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "weiqi_client=warn".into()),
        )
        .init();

    let cli = Cli::parse();
    let app = build_app(&cli.base_url, &cli.session_file)?;

    match cli.command {
        Command::Register { username, email, password } => {
            app.auth.register(&username, &email, &password).await?;
            println!("registered {username}; log in with `weiqi login`");
        }
        Command::Login { username, password } => {
            app.auth.login(&username, &password).await?;
            match app.auth.user() {
                Some(user) => println!("logged in as {}", user.username),
                None => println!("logged in"),
            }
        }
        Command::Logout => {
            app.auth.logout();
            println!("logged out");
        }
        Command::Whoami => {
            app.auth.fetch_user().await;
            match app.auth.user() {
                Some(user) => println!("{} <{}> ({})", user.username, user.email, user.id),
                None => return Err(CliError::NotLoggedIn),
            }
        }
        Command::Game(game) => run_game(&app, game.command).await?,
    }

    Ok(())
}

async fn run_game(app: &App, command: GameSubcommand) -> Result<(), CliError> {
    match command {
        GameSubcommand::Create { ai } => {
            let game_id = app.game.create_game(ai).await?;
            println!("{game_id}");
        }
        GameSubcommand::Show { game_id } => {
            app.game.fetch_game(&game_id).await?;
            if let Some(game) = app.game.current_game() {
                print_game(&game);
            }
        }
        GameSubcommand::Join { game_id } => {
            app.game.join_game(&game_id).await?;
            println!("joined {game_id}");
        }
        GameSubcommand::Move { game_id, x, y } => {
            app.game.play_move(&game_id, Point { x, y }).await?;
            if let Some(game) = app.game.current_game() {
                print_game(&game);
            }
        }
        GameSubcommand::Pass { game_id } => {
            app.game.pass_turn(&game_id).await?;
            if let Some(game) = app.game.current_game() {
                print_game(&game);
            }
        }
        GameSubcommand::AiMove { game_id } => {
            app.game.ai_move(&game_id).await?;
            if let Some(game) = app.game.current_game() {
                print_game(&game);
            }
        }
        GameSubcommand::List { waiting } => {
            let list = if waiting {
                games::waiting_games(&app.transport).await?
            } else {
                games::my_games(&app.transport).await?
            };
            if list.is_empty() {
                println!("no games");
            }
            for game in list {
                println!(
                    "{}  {:?}  black={}  white={}",
                    game.id,
                    game.status,
                    game.player_black_id.as_deref().unwrap_or("-"),
                    game.player_white_id.as_deref().unwrap_or("-"),
                );
            }
        }
        GameSubcommand::Watch { game_id, interval_secs } => {
            watch_game(app, &game_id, interval_secs).await?;
        }
    }
    Ok(())
}

/// Interactive fetch once, then passive polling: background refreshes never
/// surface transient errors, matching the web client's auto-refresh.
async fn watch_game(app: &App, game_id: &str, interval_secs: u64) -> Result<(), CliError> {
    app.game.fetch_game(game_id).await?;
    let mut last_seen = i64::MIN;

    let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs.max(1)));
    loop {
        ticker.tick().await;
        app.game.silent_fetch_game(game_id).await;

        let Some(game) = app.game.current_game() else {
            continue;
        };
        if game.last_move_time != last_seen {
            last_seen = game.last_move_time;
            print_game(&game);
        }
        if game.game_over {
            println!("game over");
            return Ok(());
        }
    }
}

fn print_game(game: &Game) {
    println!(
        "game {}  [{:?}]  to move: {:?}  captures B/W: {}/{}  clocks B/W: {}s/{}s",
        game.id,
        game.status,
        game.next_player,
        game.captures_by_b,
        game.captures_by_w,
        game.black_time_left,
        game.white_time_left,
    );
    for row in &game.board.grid {
        let line: String = row
            .iter()
            .map(|cell| match *cell {
                Board::BLACK => 'X',
                Board::WHITE => 'O',
                _ => '.',
            })
            .collect();
        println!("{line}");
    }
}
