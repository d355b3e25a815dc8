//! 错误类型定义

use thiserror::Error;

/// 国际象棋规则错误
///
/// 所有错误都是可恢复的：走法被拒绝时棋盘保持调用前的状态。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    /// 位置超出棋盘
    #[error("Position out of bounds: ({row}, {col})")]
    OutOfBounds { row: u8, col: u8 },

    /// 起点没有棋子
    #[error("No piece at start position ({row}, {col})")]
    NoPieceAtStart { row: u8, col: u8 },

    /// 目标位置不在该棋子的走法范围内
    #[error("Illegal destination: from ({from_row}, {from_col}) to ({to_row}, {to_col})")]
    IllegalDestination {
        from_row: u8,
        from_col: u8,
        to_row: u8,
        to_col: u8,
    },

    /// 走法会导致己方王被将军
    #[error("Move would leave own king in check")]
    MoveIntoCheck,

    /// 不是该方的回合
    #[error("Not your turn")]
    NotYourTurn,

    /// 对局已结束
    #[error("Game is already over")]
    GameOver,
}
