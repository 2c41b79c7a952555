mod game;
mod selfplay;
mod ui;

use std::time::Instant;

use clap::{Parser, Subcommand};
use draughts_core::board::Board;
use draughts_core::color::Color;
use draughts_core::game_state::GameMode;
use draughts_core::level::Level;
use draughts_core::perft::perft;
use draughts_core::types::Depth;
use num_format::{Locale, ToFormattedString};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug, Clone)]
struct BoardParams {
    /// Number of rows and columns of the board
    #[arg(long, default_value = "8")]
    size: usize,

    /// Rows filled with pieces on each side at the start
    #[arg(long, default_value = "3")]
    rows: usize,
}

#[derive(Parser, Debug)]
struct Cli {
    #[command(subcommand)]
    command: Option<SubCommands>,

    #[command(flatten)]
    board_params: BoardParams,

    /// 1: AI vs AI, 2: player (White) vs AI, 3: player vs player
    #[arg(short, long, default_value = "2")]
    mode: GameMode,

    /// easy, medium, hard, or the search depth of one of them
    #[arg(short, long, default_value = "medium")]
    level: Level,
}

#[derive(Debug, Subcommand)]
enum SubCommands {
    /// Let the computer play against itself and report the average move time
    Selfplay {
        #[arg(long, default_value = "1")]
        games: usize,

        #[arg(short, long, default_value = "hard")]
        level: Level,

        #[command(flatten)]
        board_params: BoardParams,
    },
    /// Count the leaf nodes of the move tree from the starting position
    Perft {
        #[arg(short, long, default_value = "6")]
        depth: Depth,

        #[command(flatten)]
        board_params: BoardParams,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();
    match args.command {
        Some(SubCommands::Selfplay {
            games,
            level,
            board_params,
        }) => {
            let board = new_board(&board_params);
            selfplay::run(&board, level, games);
        }
        Some(SubCommands::Perft {
            depth,
            board_params,
        }) => {
            let mut board = new_board(&board_params);
            run_perft(&mut board, depth);
        }
        None => {
            let board = new_board(&args.board_params);
            ui::ui_loop(board, args.mode, args.level).unwrap_or_else(|err| {
                eprintln!("Failed to run UI: {err:#}");
                std::process::exit(1);
            });
        }
    }
}

fn new_board(params: &BoardParams) -> Board {
    Board::new(params.size, params.rows).unwrap_or_else(|err| {
        eprintln!("{err}");
        std::process::exit(1);
    })
}

fn run_perft(board: &mut Board, max_depth: Depth) {
    for depth in 1..=max_depth {
        let start = Instant::now();
        let nodes = perft(board, Color::White, depth);
        let elapsed = start.elapsed();
        let nps = if elapsed.as_secs_f64() > 0.0 {
            (nodes as f64 / elapsed.as_secs_f64()).round() as u64
        } else {
            0
        };
        println!(
            "depth {depth:>2}: {:>14} nodes {:>9.3}s {:>14} nps",
            nodes.to_formatted_string(&Locale::en),
            elapsed.as_secs_f64(),
            nps.to_formatted_string(&Locale::en)
        );
    }
}
