//! 规则常量定义

/// 棋盘边长（行数 = 列数）
pub const BOARD_SIZE: usize = 8;

/// 白方底线行
pub const WHITE_BACK_ROW: u8 = 0;

/// 白方兵的初始行
pub const WHITE_PAWN_ROW: u8 = 1;

/// 黑方兵的初始行
pub const BLACK_PAWN_ROW: u8 = 6;

/// 黑方底线行
pub const BLACK_BACK_ROW: u8 = 7;
