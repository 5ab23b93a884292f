use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use quadline::agent::ai::{AIType, SearchConfig, DEFAULT_DEPTH};
use quadline::agent::{Difficulty, Player, RemotePlayer};
use quadline::config::{GameConfig, GameMode, PlayerConfig};
use quadline::game::Game;
use quadline::game_repr::{BoardSize, Side};
use quadline::orchestrator::{play, Orchestrator};
use quadline::populate::populate_from;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Default game-server port
const DEFAULT_PORT: u16 = 12345;

#[derive(Parser, Debug)]
#[command(author, version, about = "Four-piece line game engine", long_about = None)]
struct Args {
    /// Play on the 7x6 board instead of 5x4
    #[arg(short, long, global = true)]
    large: bool,

    /// Search depth in plies
    #[arg(short, long, global = true, default_value_t = DEFAULT_DEPTH)]
    depth: u8,

    /// Transposition table file, loaded before and saved after a game
    #[arg(short, long, global = true)]
    table: Option<PathBuf>,

    /// Seed for the engine's tie-breaking
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play at the console (default)
    Play {
        /// Let the engine play both sides
        #[arg(short, long)]
        auto: bool,

        /// Engine plays Black; the human takes White
        #[arg(short, long)]
        black: bool,

        /// Use random playouts instead of negamax
        #[arg(long)]
        playout: bool,

        /// Declare a draw after this many plies
        #[arg(long)]
        max_turns: Option<u32>,
    },
    /// Play through a game server
    Server {
        /// Game id to register for
        game_id: String,

        #[arg(short = 'H', long, default_value = "localhost")]
        host: String,

        #[arg(short = 'P', long, default_value_t = DEFAULT_PORT)]
        port: u16,

        /// Engine plays Black
        #[arg(short, long)]
        black: bool,
    },
    /// Search every key listed in FILE into FILE_statemap
    Populate { file: PathBuf },
}

fn main() {
    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    )
    .format_timestamp(None)
    .init();

    if let Err(e) = run(args) {
        log::error!("Fatal error: {e:#}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let size = if args.large { BoardSize::LARGE } else { BoardSize::SMALL };
    let difficulty = Difficulty::Depth(args.depth);
    log::info!("board {}x{}, depth {}", size.width, size.height, args.depth);

    let command = args.command.unwrap_or(Command::Play {
        auto: false,
        black: false,
        playout: false,
        max_turns: None,
    });

    match command {
        Command::Play { auto, black, playout, max_turns } => {
            let engine_side = if black { Side::Black } else { Side::White };
            let config = if auto {
                GameConfig::aivai(difficulty, difficulty)
            } else {
                GameConfig::pvai(engine_side, difficulty)
            };
            let config = config
                .with_ai(if playout { AIType::Playout } else { AIType::Negamax })
                .with_size(size)
                .with_table(args.table)
                .with_seed(args.seed);
            play_local(&config, max_turns)
        }
        Command::Server { game_id, host, port, black } => {
            let local_side = if black { Side::Black } else { Side::White };
            let config = GameConfig::server(local_side, difficulty)
                .with_size(size)
                .with_table(args.table)
                .with_seed(args.seed);
            play_server(&config, &game_id, &host, port)
        }
        Command::Populate { file } => populate(&file, size, args.depth, args.seed),
    }
}

fn load_table(game: &mut Game, path: Option<&Path>) -> Result<()> {
    if let Some(path) = path.filter(|p| p.exists()) {
        game.table_mut()
            .load(path)
            .with_context(|| format!("loading table {}", path.display()))?;
    }
    Ok(())
}

fn save_table(game: &Game, path: Option<&Path>) -> Result<()> {
    if let Some(path) = path {
        game.table()
            .save(path)
            .with_context(|| format!("saving table {}", path.display()))?;
    }
    Ok(())
}

fn local_player(config: &GameConfig, side: Side) -> Result<Box<dyn Player>> {
    config
        .player(side)
        .create_local_player(side)
        .with_context(|| format!("{} needs a game server", side))
}

fn play_local(config: &GameConfig, max_turns: Option<u32>) -> Result<()> {
    let mut game = config.new_game();
    load_table(&mut game, config.table_path.as_deref())?;

    if config.mode == GameMode::PvAI {
        if let Some(side) = config.human_side() {
            println!("You play {}. Enter moves like 11E.", side);
        }
    }
    println!("{}", game.state());

    let white = local_player(config, Side::White)?;
    let black = local_player(config, Side::Black)?;
    let mut orchestrator = Orchestrator::new(game, white, black);
    if let Some(max) = max_turns {
        orchestrator = orchestrator.with_max_turns(max);
    }

    let result = orchestrator.run();
    let game = orchestrator.into_game();
    println!("{}", game.state());
    println!("{} after {} turns", result, game.num_turns());

    save_table(&game, config.table_path.as_deref())
}

fn play_server(config: &GameConfig, game_id: &str, host: &str, port: u16) -> Result<()> {
    let local_side = Side::ALL
        .into_iter()
        .find(|&side| config.player(side) != PlayerConfig::Remote)
        .context("server game without a local player")?;

    let remote = RemotePlayer::connect(host, port, game_id, local_side)?;

    let mut game = config.new_game();
    load_table(&mut game, config.table_path.as_deref())?;

    let local = local_player(config, local_side)?;
    let remote: Box<dyn Player> = Box::new(remote);
    let (white, black) = match local_side {
        Side::White => (local, remote),
        Side::Black => (remote, local),
    };

    let (result, game) = play(game, white, black);
    println!("{} after {} turns", result, game.num_turns());

    save_table(&game, config.table_path.as_deref())
}

fn statemap_path(file: &Path) -> PathBuf {
    let mut name = file.as_os_str().to_owned();
    name.push("_statemap");
    PathBuf::from(name)
}

fn populate(file: &Path, size: BoardSize, depth: u8, seed: Option<u64>) -> Result<()> {
    let statemap = statemap_path(file);
    let mut game = Game::new(size, SearchConfig::with_depth(depth));
    if let Some(seed) = seed {
        game.search_mut().seed(seed);
    }
    load_table(&mut game, Some(&statemap))?;

    let input = File::open(file).with_context(|| format!("opening state file {}", file.display()))?;
    let report = populate_from(game.search_mut(), size, BufReader::new(input))
        .with_context(|| format!("reading state file {}", file.display()))?;
    println!(
        "searched {} states, skipped {}, {} undecided",
        report.searched, report.skipped, report.undecided
    );

    save_table(&game, Some(&statemap))
}
