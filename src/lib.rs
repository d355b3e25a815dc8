//! 国际象棋规则引擎
//!
//! 包含:
//! - 棋子、棋盘、位置等核心数据结构
//! - 走法生成和规则验证（伪合法/合法走法、将军、将死、逼和判定）
//! - 带验证的走棋入口（非法走法返回错误，棋盘保持原状）
//! - 对局控制（回合归属、走法历史、终局状态）

mod board;
mod constants;
mod error;
mod game;
mod moves;
mod piece;

pub use board::Board;
pub use constants::*;
pub use error::ChessError;
pub use game::{Game, GameStatus};
pub use moves::{Move, MoveGenerator};
pub use piece::{Color, Piece, PieceKind, Position};
