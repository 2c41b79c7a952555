//! Game state management for the draughts CLI.
//!
//! This module provides the `GameState` struct which wraps the core
//! game state and adds terminal display and save files.

use std::fs;
use std::path::Path;

use anyhow::Context;
use colored::{ColoredString, Colorize};
use draughts_core::{
    board::{Board, Destinations},
    color::Color,
    game_state::{self, GameMode, PlayerKind, TurnEvent},
    level::Level,
    move_list::Move,
    piece::Piece,
    position::Position,
    search::Search,
};

/// A draughts game with CLI-specific features.
///
/// This is a thin wrapper around the core `GameState` that adds colored
/// terminal display and JSON save files.
pub struct GameState {
    core: game_state::GameState,
}

impl GameState {
    /// Starts a game on `board` with White to move.
    pub fn new(board: Board, mode: GameMode, level: Level) -> Self {
        Self {
            core: game_state::GameState::from_board(board, Color::White, mode, level),
        }
    }

    /// Loads a game saved with [`GameState::save`].
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let core = serde_json::from_str(&json)
            .with_context(|| format!("{} is not a saved game", path.display()))?;
        Ok(Self { core })
    }

    /// Writes the whole game, including history and any selection in
    /// progress, to `path` as JSON.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(&self.core)?;
        fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
    }

    pub fn side_to_move(&self) -> Color {
        self.core.side_to_move()
    }

    pub fn mode(&self) -> GameMode {
        self.core.mode()
    }

    pub fn set_mode(&mut self, mode: GameMode) {
        self.core.set_mode(mode);
    }

    pub fn level(&self) -> Level {
        self.core.level()
    }

    pub fn set_level(&mut self, level: Level) {
        self.core.set_level(level);
    }

    pub fn selected(&self) -> Option<Position> {
        self.core.selected()
    }

    /// Checks whether the computer should move now.
    pub fn is_ai_turn(&self) -> bool {
        !self.core.is_game_over() && self.core.current_player() == PlayerKind::Ai
    }

    pub fn is_game_over(&self) -> bool {
        self.core.is_game_over()
    }

    /// Lists the moves the side to move may make right now.
    pub fn legal_moves(&self) -> Vec<Move> {
        self.core.legal_moves().iter().copied().collect()
    }

    /// Feeds a selected cell into the current human turn.
    pub fn select(&mut self, pos: Position) -> draughts_core::Result<TurnEvent> {
        self.core.select(pos)
    }

    /// Plays the computer's whole turn, capture chain included.
    pub fn play_ai_turn(&mut self, search: &mut Search) -> Option<Vec<Move>> {
        self.core.play_ai_turn(search)
    }

    /// Undoes the last move.
    ///
    /// When a human plays against the computer, the computer's reply is taken
    /// back as well so the human is to move again.
    ///
    /// # Returns
    /// `true` if at least one move was undone
    pub fn undo(&mut self) -> bool {
        if !self.core.undo() {
            return false;
        }
        while self.core.mode() == GameMode::PlayerVsAi
            && self.core.current_player() == PlayerKind::Ai
        {
            if !self.core.undo() {
                break;
            }
        }
        true
    }

    /// Cells the selected piece may move to, highlighted when printing.
    fn targets(&self) -> Destinations {
        let board = self.core.board();
        match self.core.selected() {
            Some(from) if board.can_capture(from) => board.legal_capture_destinations(from),
            Some(from) => board.legal_destinations(from),
            None => Destinations::new(),
        }
    }

    /// Prints a colored representation of the board to the terminal.
    pub fn print(&self) {
        let board = self.core.board();
        let size = board.size();
        let selected = self.core.selected();
        let last_move = self.core.last_move();
        let targets = self.targets();

        let header: String = (0..size)
            .map(|col| format!(" {} ", (b'a' + col as u8) as char))
            .collect::<Vec<_>>()
            .join(" ");
        println!("     {header}");
        println!("    ┌{}┐", vec!["───"; size].join("┬"));

        for row in 0..size {
            print!(" {:>2} │", row + 1);
            for col in 0..size {
                let pos = Position::new(row, col);
                let is_last = last_move.is_some_and(|mv| mv.to == pos || mv.from == pos);
                let symbol = match board.get(pos) {
                    Some(piece) if Some(pos) == selected => piece_symbol(piece).on_blue(),
                    Some(piece) if is_last => piece_symbol(piece).on_bright_black(),
                    Some(piece) => piece_symbol(piece),
                    None if targets.contains(&pos) => " · ".bright_cyan(),
                    None if is_last => "   ".on_bright_black(),
                    None => "   ".normal(),
                };
                print!("{symbol}│");
            }
            self.print_side_info(row);

            if row + 1 < size {
                println!("    ├{}┤", vec!["───"; size].join("┼"));
            }
        }
        println!("    └{}┘", vec!["───"; size].join("┴"));

        match self.core.outcome() {
            Some(outcome) => println!("    {}", outcome.to_string().bright_red()),
            None if self.core.in_capture_chain() => {
                println!("    {}", "Keep capturing with the same piece.".bright_cyan())
            }
            None => {}
        }
    }

    fn print_side_info(&self, row: usize) {
        let board = self.core.board();
        match row {
            0 => {
                let turn = match self.core.side_to_move() {
                    Color::White => "White's turn (w)".bright_yellow(),
                    Color::Black => "Black's turn (b)".bright_green(),
                };
                println!("   {turn}");
            }
            1 => println!(
                "   White: {}",
                format!("{:2}", board.count(Color::White)).bright_yellow()
            ),
            2 => println!(
                "   Black: {}",
                format!("{:2}", board.count(Color::Black)).bright_green()
            ),
            3 => println!("   Mode: {}, level: {}", self.core.mode(), self.core.level()),
            _ => println!(),
        }
    }
}

fn piece_symbol(piece: Piece) -> ColoredString {
    let text = format!(" {} ", piece.to_char());
    match piece.color {
        Color::White => text.bright_yellow(),
        Color::Black => text.bright_green(),
    }
}
