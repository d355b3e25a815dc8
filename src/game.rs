//! 对局控制
//!
//! 在棋盘之上维护回合归属、走法历史和终局状态

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::error::ChessError;
use crate::moves::{Move, MoveGenerator};
use crate::piece::{Color, Position};

/// 对局状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// 对局进行中
    InProgress,
    /// 当前走子方被将死
    Checkmate { winner: Color },
    /// 当前走子方无子可动（逼和）
    Stalemate,
}

/// 对局
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    /// 棋盘
    board: Board,
    /// 当前走子方
    current_turn: Color,
    /// 走法历史
    move_history: Vec<Move>,
}

impl Game {
    /// 创建新对局（白方先手）
    pub fn new() -> Self {
        Self {
            board: Board::initial(),
            current_turn: Color::White,
            move_history: Vec::new(),
        }
    }

    /// 当前棋盘
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// 当前走子方
    pub fn current_turn(&self) -> Color {
        self.current_turn
    }

    /// 走法历史
    pub fn history(&self) -> &[Move] {
        &self.move_history
    }

    /// 判定对局状态（针对当前走子方）
    pub fn status(&self) -> GameStatus {
        if MoveGenerator::is_checkmate(&self.board, self.current_turn) {
            GameStatus::Checkmate {
                winner: self.current_turn.opponent(),
            }
        } else if MoveGenerator::is_stalemate(&self.board, self.current_turn) {
            GameStatus::Stalemate
        } else {
            GameStatus::InProgress
        }
    }

    /// 执行走棋
    ///
    /// 验证回合归属后交给 [`Board::try_move`] 做规则验证，
    /// 成功时记录走法并切换走子方。
    pub fn try_move(&mut self, from: Position, to: Position) -> Result<Move, ChessError> {
        if self.status() != GameStatus::InProgress {
            return Err(ChessError::GameOver);
        }

        if let Some(piece) = self.board.get(from) {
            if piece.color != self.current_turn {
                return Err(ChessError::NotYourTurn);
            }
        }
        // 起点为空或越界由棋盘返回对应错误

        let mv = self.board.try_move(from, to)?;

        tracing::debug!("{:?} 走棋: {}", self.current_turn, mv);
        self.move_history.push(mv);
        self.current_turn = self.current_turn.opponent();

        match self.status() {
            GameStatus::Checkmate { winner } => tracing::info!("将死，{:?} 获胜", winner),
            GameStatus::Stalemate => tracing::info!("逼和，对局结束"),
            GameStatus::InProgress => {}
        }

        Ok(mv)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
