//! Game state management for draughts.
//!
//! This module provides the `GameState` struct which maintains the current
//! position and drives a turn: a human picks a piece and then a target, the
//! computer runs a search, capture chains keep the same piece on the move,
//! and the game ends when the side to move has no legal move.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::board::Board;
use crate::color::Color;
use crate::error::{Error, Result};
use crate::level::Level;
use crate::move_list::{Move, MoveList, any_capture_available};
use crate::position::Position;
use crate::search::{Continuation, Search};

/// Who chooses the moves of one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerKind {
    Human,
    Ai,
}

impl FromStr for PlayerKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<PlayerKind> {
        match s.trim().to_ascii_lowercase().as_str() {
            "human" | "player" => Ok(PlayerKind::Human),
            "ai" | "computer" => Ok(PlayerKind::Ai),
            _ => Err(Error::UnknownPlayer(s.to_string())),
        }
    }
}

/// Which sides are played by humans and which by the computer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameMode {
    /// The computer plays both sides.
    #[default]
    AiVsAi,
    /// A human plays White against the computer.
    PlayerVsAi,
    /// Humans play both sides.
    PlayerVsPlayer,
}

impl GameMode {
    pub const ALL: [GameMode; 3] = [
        GameMode::AiVsAi,
        GameMode::PlayerVsAi,
        GameMode::PlayerVsPlayer,
    ];

    /// Looks up a mode by its menu number (1, 2 or 3).
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownGameMode`] for any other number.
    pub fn from_code(code: u8) -> Result<GameMode> {
        match code {
            1 => Ok(GameMode::AiVsAi),
            2 => Ok(GameMode::PlayerVsAi),
            3 => Ok(GameMode::PlayerVsPlayer),
            _ => Err(Error::UnknownGameMode(code.to_string())),
        }
    }

    /// Menu number of the mode.
    pub fn code(self) -> u8 {
        match self {
            GameMode::AiVsAi => 1,
            GameMode::PlayerVsAi => 2,
            GameMode::PlayerVsPlayer => 3,
        }
    }

    /// Returns who plays `color` in this mode.
    pub fn player(self, color: Color) -> PlayerKind {
        match (self, color) {
            (GameMode::AiVsAi, _) => PlayerKind::Ai,
            (GameMode::PlayerVsAi, Color::White) => PlayerKind::Human,
            (GameMode::PlayerVsAi, Color::Black) => PlayerKind::Ai,
            (GameMode::PlayerVsPlayer, _) => PlayerKind::Human,
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameMode::AiVsAi => write!(f, "AI vs AI"),
            GameMode::PlayerVsAi => write!(f, "player vs AI"),
            GameMode::PlayerVsPlayer => write!(f, "player vs player"),
        }
    }
}

impl FromStr for GameMode {
    type Err = Error;

    /// Accepts the menu number or a name such as `player-vs-ai`.
    fn from_str(s: &str) -> Result<GameMode> {
        let normalized = s.trim().to_ascii_lowercase().replace([' ', '_'], "-");
        match normalized.as_str() {
            "ai-vs-ai" => Ok(GameMode::AiVsAi),
            "player-vs-ai" => Ok(GameMode::PlayerVsAi),
            "player-vs-player" => Ok(GameMode::PlayerVsPlayer),
            other => other
                .parse::<u8>()
                .map_err(|_| Error::UnknownGameMode(s.to_string()))
                .and_then(GameMode::from_code),
        }
    }
}

/// What the turn state machine expects next from a human player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    /// Waiting for the piece to move.
    ChoosingSource,
    /// A piece is selected; waiting for its destination.
    ChoosingTarget,
}

/// Result of feeding one cell selection to [`GameState::select`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnEvent {
    /// The cell does not hold a piece that may move now; nothing changed.
    Discarded,
    /// The piece on this cell is now the active piece.
    SourceSelected(Position),
    /// The target was illegal and the active piece was released.
    SelectionCleared,
    /// The target was illegal but the capture chain keeps this piece active.
    ChainKept(Position),
    /// The move was played. With `continues` the same piece must capture
    /// again; otherwise the turn passed to the other side.
    Moved { mv: Move, continues: bool },
}

/// Final result of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Winner(Color),
    Draw,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Winner(Color::White) => write!(f, "White side wins!"),
            Outcome::Winner(Color::Black) => write!(f, "Black side wins!"),
            Outcome::Draw => write!(f, "Draw!"),
        }
    }
}

/// Represents the state of a draughts game.
///
/// Besides the position this keeps the selection state of the human turn,
/// the game configuration and a move history for undo. Every field is
/// serializable so a game in progress survives a save and load unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// The current board position.
    board: Board,
    /// Which player's turn it is to move.
    side_to_move: Color,
    /// Progress of the current human turn.
    phase: TurnPhase,
    /// The active piece, also the cell a renderer highlights.
    selected: Option<Position>,
    /// Cleared once a capture chain has started; the active piece is locked.
    can_change_piece: bool,
    mode: GameMode,
    level: Level,
    /// Number of moves played by the computer; every jump of a chain counts.
    ai_moves: u64,
    /// Move history: (move, board_before_move, side_to_move_before,
    /// chain_piece_before).
    history: Vec<(Move, Board, Color, Option<Position>)>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(GameMode::default(), Level::default())
    }
}

impl GameState {
    /// Creates a new game on the standard board.
    ///
    /// White moves first.
    pub fn new(mode: GameMode, level: Level) -> Self {
        Self::from_board(Board::default(), Color::White, mode, level)
    }

    /// Creates a new game state from an existing board position.
    ///
    /// # Arguments
    ///
    /// * `board` - The board position to start from
    /// * `side_to_move` - Which player moves next
    /// * `mode` - Which sides the computer plays
    /// * `level` - Search depth of the computer
    pub fn from_board(board: Board, side_to_move: Color, mode: GameMode, level: Level) -> Self {
        Self {
            board,
            side_to_move,
            phase: TurnPhase::ChoosingSource,
            selected: None,
            can_change_piece: true,
            mode,
            level,
            ai_moves: 0,
            history: Vec::new(),
        }
    }

    /// Returns a reference to the current board position.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns which player's turn it is to move.
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Returns what the human turn expects next.
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// Returns the active piece, if one is selected.
    pub fn selected(&self) -> Option<Position> {
        self.selected
    }

    /// Returns `true` while a capture chain is in progress.
    pub fn in_capture_chain(&self) -> bool {
        !self.can_change_piece
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: GameMode) {
        self.mode = mode;
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn set_level(&mut self, level: Level) {
        self.level = level;
    }

    /// Number of moves the computer has played, counting each jump of a
    /// capture chain separately.
    pub fn ai_moves(&self) -> u64 {
        self.ai_moves
    }

    /// Returns who chooses the next move.
    pub fn current_player(&self) -> PlayerKind {
        self.mode.player(self.side_to_move)
    }

    /// Returns a reference to the move history.
    ///
    /// # Returns
    ///
    /// A slice of tuples containing (move, board_before_move,
    /// side_to_move_before, chain_piece_before). The last field is the piece
    /// locked in a capture chain when the move was made.
    pub fn move_history(&self) -> &[(Move, Board, Color, Option<Position>)] {
        &self.history
    }

    /// Returns the last move played.
    pub fn last_move(&self) -> Option<Move> {
        self.history.last().map(|(mv, ..)| *mv)
    }

    /// Lists the moves available to the side to move.
    ///
    /// In the middle of a capture chain only the active piece's captures are
    /// listed.
    pub fn legal_moves(&self) -> MoveList {
        match (self.can_change_piece, self.selected) {
            (false, Some(from)) => MoveList::continuation(&self.board, from),
            _ => MoveList::new(&self.board, self.side_to_move),
        }
    }

    /// Feeds one cell selection from a human player into the turn.
    ///
    /// While choosing a source, the cell is accepted only if it holds a piece
    /// of the side to move that may move under the mandatory capture rule.
    /// While choosing a target, a legal destination plays the move; an illegal
    /// one releases the piece unless a capture chain is in progress.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if `pos` is off the board.
    pub fn select(&mut self, pos: Position) -> Result<TurnEvent> {
        let pos = self.board.check(pos)?;
        let event = match self.phase {
            TurnPhase::ChoosingSource => self.choose_source(pos),
            TurnPhase::ChoosingTarget => self.choose_target(pos),
        };
        Ok(event)
    }

    fn choose_source(&mut self, pos: Position) -> TurnEvent {
        let movable = self.board.get(pos).is_some_and(|piece| {
            piece.color == self.side_to_move
                && (!any_capture_available(&self.board, self.side_to_move)
                    || self.board.can_capture(pos))
        });

        if movable {
            self.selected = Some(pos);
            self.phase = TurnPhase::ChoosingTarget;
            TurnEvent::SourceSelected(pos)
        } else {
            self.clear_selection();
            TurnEvent::Discarded
        }
    }

    fn choose_target(&mut self, target: Position) -> TurnEvent {
        let Some(from) = self.selected else {
            self.clear_selection();
            return TurnEvent::Discarded;
        };

        let is_capture = self.board.can_capture(from);
        let valid = if is_capture {
            self.board.is_legal_capture(from, target)
        } else {
            self.board.is_legal_move(from, target)
        };

        if !valid {
            if self.can_change_piece {
                self.selected = None;
                self.phase = TurnPhase::ChoosingSource;
                return TurnEvent::SelectionCleared;
            }
            return TurnEvent::ChainKept(from);
        }

        let mv = Move::new(from, target);
        let chain_piece = (!self.can_change_piece).then_some(from);
        self.play(mv, chain_piece);

        let continues = is_capture && self.board.can_capture(target);
        if continues {
            self.lock_chain_piece(target);
        } else {
            self.change_side();
        }
        TurnEvent::Moved { mv, continues }
    }

    /// Plays a full computer turn for the side to move.
    ///
    /// The search picks a move; if it was a capture and the same piece can
    /// capture again, the chain is continued with further searches restricted
    /// to that piece before the turn passes to the other side.
    ///
    /// # Returns
    ///
    /// The moves played, in order, or `None` if the side to move has no
    /// legal move.
    pub fn play_ai_turn(&mut self, search: &mut Search) -> Option<Vec<Move>> {
        let mut continuation = match (self.can_change_piece, self.selected) {
            (false, Some(from)) => Continuation::From(from),
            _ => Continuation::Free,
        };

        let mut played = Vec::new();
        loop {
            let result = search.run_from(
                &mut self.board,
                self.side_to_move,
                self.level.depth(),
                continuation,
            );
            let Some(mv) = result.best_move else {
                break;
            };

            let is_capture = self.board.captures_exactly_one(mv.from, mv.to);
            let chain_piece = match continuation {
                Continuation::From(from) => Some(from),
                Continuation::Free => None,
            };
            self.play(mv, chain_piece);
            played.push(mv);

            if is_capture && self.board.can_capture(mv.to) {
                continuation = Continuation::From(mv.to);
            } else {
                self.change_side();
                break;
            }
        }

        if played.is_empty() {
            info!(side = %self.side_to_move, "no legal move for the computer");
            return None;
        }

        self.ai_moves += played.len() as u64;
        Some(played)
    }

    /// Applies a validated move and records it in the history.
    ///
    /// `chain_piece` is the piece locked in a capture chain before the move,
    /// so that undo can lock it again.
    fn play(&mut self, mv: Move, chain_piece: Option<Position>) {
        debug!(side = %self.side_to_move, mv = %mv, "move played");
        let entry = (mv, self.board.clone(), self.side_to_move, chain_piece);
        self.history.push(entry);
        self.board.apply_move(mv);
    }

    fn clear_selection(&mut self) {
        self.selected = None;
        self.can_change_piece = true;
        self.phase = TurnPhase::ChoosingSource;
    }

    fn lock_chain_piece(&mut self, pos: Position) {
        self.selected = Some(pos);
        self.can_change_piece = false;
        self.phase = TurnPhase::ChoosingTarget;
    }

    /// Passes the turn and reports the end of the game once, when it happens.
    fn change_side(&mut self) {
        self.side_to_move = self.side_to_move.opposite();
        self.clear_selection();
        if let Some(outcome) = self.outcome() {
            info!(%outcome, "game over");
        }
    }

    /// Checks if the game has ended.
    ///
    /// The game ends when the side to move has no legal move.
    pub fn is_game_over(&self) -> bool {
        MoveList::new(&self.board, self.side_to_move).is_empty()
    }

    /// Returns the result of a finished game.
    ///
    /// A side wins only when the other side has no pieces left. If both sides
    /// still have pieces and the side to move is simply stuck, the game is a
    /// draw.
    ///
    /// # Returns
    ///
    /// `None` while the game is still running.
    pub fn outcome(&self) -> Option<Outcome> {
        if !self.is_game_over() {
            return None;
        }

        let white = self.board.count(Color::White) > 0;
        let black = self.board.count(Color::Black) > 0;
        let outcome = match (white, black) {
            (true, true) => Outcome::Draw,
            (true, false) => Outcome::Winner(Color::White),
            (false, _) => Outcome::Winner(Color::Black),
        };
        Some(outcome)
    }

    /// Undoes the last move if possible.
    ///
    /// This restores the board and side to move to what they were before the
    /// last move. Undoing a later jump of a capture chain locks the chain
    /// piece again; otherwise any selection is dropped.
    ///
    /// # Returns
    ///
    /// `true` if a move was successfully undone, `false` if there are no moves to undo
    pub fn undo(&mut self) -> bool {
        match self.history.pop() {
            Some((_, prev_board, prev_side, chain_piece)) => {
                self.board = prev_board;
                self.side_to_move = prev_side;
                match chain_piece {
                    Some(pos) => self.lock_chain_piece(pos),
                    None => self.clear_selection(),
                }
                true
            }
            None => false,
        }
    }
}
