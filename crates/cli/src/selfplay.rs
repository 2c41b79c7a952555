//! Computer self-play for timing the search.

use std::time::{Duration, Instant};

use colored::Colorize;
use draughts_core::board::Board;
use draughts_core::color::Color;
use draughts_core::game_state::{GameMode, GameState, Outcome};
use draughts_core::level::Level;
use draughts_core::search::Search;
use num_format::{Locale, ToFormattedString};
use tracing::info;

/// Games still running after this many computer moves are abandoned; two
/// lone kings can chase each other forever. Each jump of a chain counts.
const MAX_AI_MOVES: u64 = 400;

/// Totals over all games of a self-play run.
#[derive(Default)]
struct SelfplayStats {
    games: usize,
    white_wins: usize,
    black_wins: usize,
    draws: usize,
    unfinished: usize,
    ai_moves: u64,
    total_time: Duration,
}

impl SelfplayStats {
    fn record(&mut self, outcome: Option<Outcome>, ai_moves: u64, elapsed: Duration) {
        self.games += 1;
        self.ai_moves += ai_moves;
        self.total_time += elapsed;
        match outcome {
            Some(Outcome::Winner(Color::White)) => self.white_wins += 1,
            Some(Outcome::Winner(Color::Black)) => self.black_wins += 1,
            Some(Outcome::Draw) => self.draws += 1,
            None => self.unfinished += 1,
        }
    }

    fn average_move_time(&self) -> Duration {
        if self.ai_moves == 0 {
            return Duration::ZERO;
        }
        self.total_time.div_f64(self.ai_moves as f64)
    }

    fn print(&self) {
        let stats = [
            ("Games", self.games.to_formatted_string(&Locale::en)),
            ("White wins", self.white_wins.to_formatted_string(&Locale::en)),
            ("Black wins", self.black_wins.to_formatted_string(&Locale::en)),
            ("Draws", self.draws.to_formatted_string(&Locale::en)),
            ("Unfinished", self.unfinished.to_formatted_string(&Locale::en)),
            ("AI moves", self.ai_moves.to_formatted_string(&Locale::en)),
            ("Total time", format!("{:.3}s", self.total_time.as_secs_f64())),
            (
                "Avg move time",
                format!("{:.4}s", self.average_move_time().as_secs_f64()),
            ),
        ];

        println!();
        for (label, value) in stats {
            println!("{:<14} {}", format!("{label}:").bold(), value);
        }
    }
}

/// Plays `games` computer-vs-computer games from `board` and prints the
/// results with the average time per computer move.
pub fn run(board: &Board, level: Level, games: usize) {
    let mut search = Search::new();
    let mut stats = SelfplayStats::default();

    for game_no in 1..=games {
        let mut game = GameState::from_board(board.clone(), Color::White, GameMode::AiVsAi, level);
        search.init();

        let start = Instant::now();
        while game.ai_moves() < MAX_AI_MOVES && game.play_ai_turn(&mut search).is_some() {}
        let elapsed = start.elapsed();

        let outcome = game.outcome();
        info!(game = game_no, moves = game.ai_moves(), "self-play game finished");
        println!(
            "game {game_no:>3}: {:<18} {:>4} moves {:>8.3}s",
            outcome.map_or_else(|| "unfinished".to_string(), |o| o.to_string()),
            game.ai_moves(),
            elapsed.as_secs_f64()
        );
        stats.record(outcome, game.ai_moves(), elapsed);
    }

    stats.print();
}
