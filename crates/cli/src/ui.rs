//! Interactive line-based interface.
//!
//! Cells are entered in board notation (`c3`), one per prompt, or a whole
//! move at once (`c3-d4`). The computer moves on its own whenever the mode
//! gives it the side to move.

use std::path::Path;
use std::time::Instant;

use draughts_core::{
    board::Board,
    game_state::{GameMode, TurnEvent},
    level::Level,
    move_list::Move,
    position::Position,
    search::Search,
};
use rustyline::{DefaultEditor, error::ReadlineError};

use crate::game::GameState;

/// Main UI loop.
///
/// # Arguments
/// * `board` - Starting position, reused by the `new` command
/// * `mode` - Which sides the computer plays
/// * `level` - Initial search level
pub fn ui_loop(board: Board, mode: GameMode, level: Level) -> anyhow::Result<()> {
    let mut rl = DefaultEditor::new()?;
    let mut game = GameState::new(board.clone(), mode, level);
    let mut search = Search::new();

    loop {
        game.print();
        println!();

        if game.is_ai_turn() {
            play_computer(&mut game, &mut search);
            continue;
        }

        let readline = rl.readline("> ");
        match readline {
            Ok(line) => {
                let _ = rl.add_history_entry(&line);
                let mut parts = line.split_whitespace();
                let Some(cmd) = parts.next() else {
                    continue;
                };
                println!();

                match cmd {
                    "new" | "n" => {
                        game = GameState::new(board.clone(), game.mode(), game.level());
                        search.init();
                    }
                    "undo" | "u" => {
                        if !game.undo() {
                            println!("Cannot undo.");
                        }
                    }
                    "level" | "l" => match parts.next().map(str::parse::<Level>) {
                        Some(Ok(level)) => {
                            game.set_level(level);
                            println!("Level changed to: {level}");
                        }
                        Some(Err(err)) => println!("{err}"),
                        None => {
                            println!("Current level: {}", game.level());
                            for level in Level::ALL {
                                println!("{level}: depth {}", level.depth());
                            }
                        }
                    },
                    "mode" | "m" => match parts.next().map(str::parse::<GameMode>) {
                        Some(Ok(mode)) => {
                            game.set_mode(mode);
                            println!("Mode changed to: {mode}");
                        }
                        Some(Err(err)) => println!("{err}"),
                        None => {
                            println!("Current mode: {}", game.mode());
                            for mode in GameMode::ALL {
                                println!("{}: {mode}", mode.code());
                            }
                        }
                    },
                    "go" | "g" => {
                        if game.is_game_over() {
                            println!("The game is over.");
                        } else {
                            play_computer(&mut game, &mut search);
                        }
                    }
                    "moves" => {
                        let moves = game.legal_moves();
                        println!("{} to move: {}", game.side_to_move(), format_moves(&moves));
                    }
                    "save" => match parts.next() {
                        Some(file) => match game.save(Path::new(file)) {
                            Ok(()) => println!("Game saved to {file}"),
                            Err(err) => eprintln!("Error: {err:#}"),
                        },
                        None => println!("Usage: save <file>"),
                    },
                    "load" => match parts.next() {
                        Some(file) => match GameState::load(Path::new(file)) {
                            Ok(loaded) => {
                                game = loaded;
                                search.init();
                            }
                            Err(err) => eprintln!("Error: {err:#}"),
                        },
                        None => println!("Usage: load <file>"),
                    },
                    "help" | "h" => print_help(),
                    "quit" | "q" => break,
                    _ => play_human(&mut game, cmd),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                println!("Error: {err:?}");
                break;
            }
        }
    }

    Ok(())
}

fn play_computer(game: &mut GameState, search: &mut Search) {
    let side = game.side_to_move();
    let start = Instant::now();
    match game.play_ai_turn(search) {
        Some(moves) => println!(
            "Computer ({side}) plays {} in {:.2}s\n",
            format_moves(&moves),
            start.elapsed().as_secs_f64()
        ),
        None => println!("Computer ({side}) has no move.\n"),
    }
}

/// Handles a cell (`c3`) or a whole move (`c3-d4`) typed by the player.
fn play_human(game: &mut GameState, input: &str) {
    let cells: Result<Vec<Position>, _> = input.split('-').map(str::parse::<Position>).collect();
    let mut cells = match cells {
        Ok(cells) if !cells.is_empty() && cells.len() <= 2 => cells,
        _ => {
            println!("Unknown command: {input}\n");
            return;
        }
    };
    // The source of a full move may already be the active piece.
    if cells.len() == 2 && game.selected() == Some(cells[0]) {
        cells.remove(0);
    }

    for pos in cells {
        match game.select(pos) {
            Ok(TurnEvent::Discarded) => {
                println!("{pos} holds no piece that can move now.");
                return;
            }
            Ok(TurnEvent::SourceSelected(_)) => {}
            Ok(TurnEvent::SelectionCleared) => {
                println!("Illegal move to {pos}; choose a piece again.");
                return;
            }
            Ok(TurnEvent::ChainKept(from)) => {
                println!("Illegal move to {pos}; the piece on {from} must keep capturing.");
                return;
            }
            Ok(TurnEvent::Moved { mv, continues }) => {
                if continues {
                    println!("{mv}, capture again with the piece on {}.", mv.to);
                }
            }
            Err(err) => {
                println!("{err}");
                return;
            }
        }
    }
}

fn format_moves(moves: &[Move]) -> String {
    moves
        .iter()
        .map(Move::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn print_help() {
    println!("c3         select a cell (piece, then destination)");
    println!("c3-d4      play a move");
    println!("go         let the computer play this turn");
    println!("moves      list the legal moves");
    println!("undo       take back the last move");
    println!("level [l]  show or set the level (easy, medium, hard)");
    println!("mode [m]   show or set the mode (1, 2, 3)");
    println!("new        start a new game");
    println!("save f     save the game to file f");
    println!("load f     load a game from file f");
    println!("quit       leave");
}
