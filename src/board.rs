//! 棋盘状态

use serde::{Deserialize, Serialize};

use crate::constants::{BLACK_BACK_ROW, BLACK_PAWN_ROW, BOARD_SIZE, WHITE_BACK_ROW, WHITE_PAWN_ROW};
use crate::error::ChessError;
use crate::moves::{Move, MoveGenerator};
use crate::piece::{Color, Piece, PieceKind, Position};

/// 棋盘
///
/// 棋子是值类型，`clone()` 即完成深拷贝：副本与原棋盘不共享任何可变状态，
/// 走法模拟全部在副本上进行。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// 8x8 棋盘，索引为 row * 8 + col，使用 Vec 以支持 serde
    squares: Vec<Option<Piece>>,
}

impl Board {
    /// 创建空棋盘
    pub fn empty() -> Self {
        Self {
            squares: vec![None; BOARD_SIZE * BOARD_SIZE],
        }
    }

    /// 创建初始棋盘
    pub fn initial() -> Self {
        let mut board = Self::empty();

        // 底线：车马象后王象马车
        let back_rank = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (col, kind) in back_rank.into_iter().enumerate() {
            let col = col as u8;
            board.set(
                Position::new_unchecked(WHITE_BACK_ROW, col),
                Some(Piece::new(kind, Color::White)),
            );
            board.set(
                Position::new_unchecked(BLACK_BACK_ROW, col),
                Some(Piece::new(kind, Color::Black)),
            );
        }

        for col in 0..BOARD_SIZE as u8 {
            board.set(
                Position::new_unchecked(WHITE_PAWN_ROW, col),
                Some(Piece::new(PieceKind::Pawn, Color::White)),
            );
            board.set(
                Position::new_unchecked(BLACK_PAWN_ROW, col),
                Some(Piece::new(PieceKind::Pawn, Color::Black)),
            );
        }

        board
    }

    /// 获取指定位置的棋子
    pub fn get(&self, pos: Position) -> Option<Piece> {
        if pos.is_valid() {
            self.squares[pos.to_index()]
        } else {
            None
        }
    }

    /// 设置指定位置的棋子
    pub fn set(&mut self, pos: Position, piece: Option<Piece>) {
        if pos.is_valid() {
            self.squares[pos.to_index()] = piece;
        }
    }

    /// 移动棋子（不检查规则），返回被吃的棋子
    ///
    /// 吃子、落子、清空起点是一个不可分割的整体，
    /// 只有 [`Board::try_move`] 和走法模拟会调用它。
    pub fn move_piece(&mut self, from: Position, to: Position) -> Option<Piece> {
        let piece = self.get(from);
        let captured = self.get(to);
        self.set(from, None);
        self.set(to, piece);
        captured
    }

    /// 移除指定位置的棋子
    pub fn remove(&mut self, pos: Position) -> Option<Piece> {
        let piece = self.get(pos);
        self.set(pos, None);
        piece
    }

    /// 查找指定阵营的王
    ///
    /// 合法对局中王不可能被吃掉，返回 `None` 说明棋盘本身构造有误。
    pub fn find_king(&self, color: Color) -> Option<Position> {
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let pos = Position::new_unchecked(row as u8, col as u8);
                if let Some(piece) = self.get(pos) {
                    if piece.kind == PieceKind::King && piece.color == color {
                        return Some(pos);
                    }
                }
            }
        }
        None
    }

    /// 获取指定阵营的所有棋子（按行优先顺序）
    pub fn pieces(&self, color: Color) -> Vec<(Position, Piece)> {
        let mut result = Vec::new();
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let pos = Position::new_unchecked(row as u8, col as u8);
                if let Some(piece) = self.get(pos) {
                    if piece.color == color {
                        result.push((pos, piece));
                    }
                }
            }
        }
        result
    }

    /// 获取所有棋子
    pub fn all_pieces(&self) -> Vec<(Position, Piece)> {
        let mut result = Vec::new();
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let pos = Position::new_unchecked(row as u8, col as u8);
                if let Some(piece) = self.get(pos) {
                    result.push((pos, piece));
                }
            }
        }
        result
    }

    /// 验证并执行走法，唯一对外的棋盘变更入口
    ///
    /// 验证顺序：边界 → 起点有子 → 目标在伪合法走法内 → 副本模拟确认
    /// 不会让己方王被将军。任何一步被拒绝时棋盘保持原样。
    pub fn try_move(&mut self, from: Position, to: Position) -> Result<Move, ChessError> {
        if !from.is_valid() {
            return Err(ChessError::OutOfBounds {
                row: from.row,
                col: from.col,
            });
        }
        if !to.is_valid() {
            return Err(ChessError::OutOfBounds {
                row: to.row,
                col: to.col,
            });
        }

        let piece = self.get(from).ok_or(ChessError::NoPieceAtStart {
            row: from.row,
            col: from.col,
        })?;

        let mv = MoveGenerator::piece_moves(self, from)
            .into_iter()
            .find(|m| m.to == to)
            .ok_or(ChessError::IllegalDestination {
                from_row: from.row,
                from_col: from.col,
                to_row: to.row,
                to_col: to.col,
            })?;

        // 在副本上模拟，确认走完后己方王不被将军
        let mut test_board = self.clone();
        test_board.move_piece(from, to);
        if MoveGenerator::is_in_check(&test_board, piece.color) {
            return Err(ChessError::MoveIntoCheck);
        }

        // 唯一真正变更棋盘的位置
        self.move_piece(from, to);
        Ok(mv)
    }

    /// 检查指定阵营是否被将军
    pub fn is_in_check(&self, color: Color) -> bool {
        MoveGenerator::is_in_check(self, color)
    }

    /// 检查指定阵营是否被将死
    pub fn is_checkmate(&self, color: Color) -> bool {
        MoveGenerator::is_checkmate(self, color)
    }

    /// 检查指定阵营是否无子可动（逼和）
    pub fn is_stalemate(&self, color: Color) -> bool {
        MoveGenerator::is_stalemate(self, color)
    }

    /// 检查对局是否结束（任意一方被将死）
    ///
    /// 棋盘不记录走子方，逼和需要回合信息，由 [`crate::Game::status`] 判定。
    pub fn is_game_over(&self) -> bool {
        self.is_checkmate(Color::White) || self.is_checkmate(Color::Black)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_board() {
        let board = Board::initial();

        // 检查白王
        let king = board.get(Position::new_unchecked(0, 4));
        assert_eq!(king, Some(Piece::new(PieceKind::King, Color::White)));

        // 检查黑王
        let king = board.get(Position::new_unchecked(7, 4));
        assert_eq!(king, Some(Piece::new(PieceKind::King, Color::Black)));

        // 检查白后
        let queen = board.get(Position::new_unchecked(0, 3));
        assert_eq!(queen, Some(Piece::new(PieceKind::Queen, Color::White)));

        // 检查黑兵
        let pawn = board.get(Position::new_unchecked(6, 0));
        assert_eq!(pawn, Some(Piece::new(PieceKind::Pawn, Color::Black)));

        // 中间为空
        assert!(board.get(Position::new_unchecked(3, 3)).is_none());

        // 每方 16 子
        assert_eq!(board.pieces(Color::White).len(), 16);
        assert_eq!(board.pieces(Color::Black).len(), 16);
        assert_eq!(board.all_pieces().len(), 32);
    }

    #[test]
    fn test_move_piece() {
        let mut board = Board::initial();

        let from = Position::new_unchecked(1, 4);
        let to = Position::new_unchecked(3, 4);

        let captured = board.move_piece(from, to);
        assert!(captured.is_none());

        assert!(board.get(from).is_none());
        assert_eq!(
            board.get(to),
            Some(Piece::new(PieceKind::Pawn, Color::White))
        );
    }

    #[test]
    fn test_remove() {
        let mut board = Board::initial();

        let pos = Position::new_unchecked(0, 0);
        let removed = board.remove(pos);

        assert_eq!(removed, Some(Piece::new(PieceKind::Rook, Color::White)));
        assert!(board.get(pos).is_none());
    }

    #[test]
    fn test_find_king() {
        let board = Board::initial();

        assert_eq!(
            board.find_king(Color::White),
            Some(Position::new_unchecked(0, 4))
        );
        assert_eq!(
            board.find_king(Color::Black),
            Some(Position::new_unchecked(7, 4))
        );

        // 空棋盘没有王
        assert_eq!(Board::empty().find_king(Color::White), None);
    }

    #[test]
    fn test_clone_isolation() {
        // 副本上的任何变更都不能影响原棋盘
        let board = Board::initial();
        let mut copy = board.clone();

        copy.move_piece(Position::new_unchecked(1, 4), Position::new_unchecked(3, 4));
        copy.remove(Position::new_unchecked(0, 0));

        assert_eq!(board, Board::initial());
        assert_ne!(board, copy);
    }

    #[test]
    fn test_try_move_out_of_bounds() {
        let mut board = Board::initial();
        let before = board.clone();

        let result = board.try_move(
            Position::new_unchecked(8, 0),
            Position::new_unchecked(0, 0),
        );
        assert_eq!(result, Err(ChessError::OutOfBounds { row: 8, col: 0 }));

        let result = board.try_move(
            Position::new_unchecked(0, 0),
            Position::new_unchecked(0, 9),
        );
        assert_eq!(result, Err(ChessError::OutOfBounds { row: 0, col: 9 }));

        assert_eq!(board, before);
    }

    #[test]
    fn test_try_move_no_piece_at_start() {
        let mut board = Board::initial();
        let before = board.clone();

        let result = board.try_move(
            Position::new_unchecked(3, 3),
            Position::new_unchecked(4, 3),
        );
        assert_eq!(result, Err(ChessError::NoPieceAtStart { row: 3, col: 3 }));
        assert_eq!(board, before);
    }

    #[test]
    fn test_try_move_illegal_destination() {
        // 车不能斜走
        let mut board = Board::empty();
        board.set(
            Position::new_unchecked(0, 0),
            Some(Piece::new(PieceKind::Rook, Color::White)),
        );
        let before = board.clone();

        let result = board.try_move(
            Position::new_unchecked(0, 0),
            Position::new_unchecked(1, 1),
        );
        assert_eq!(
            result,
            Err(ChessError::IllegalDestination {
                from_row: 0,
                from_col: 0,
                to_row: 1,
                to_col: 1,
            })
        );
        assert_eq!(board, before);
    }

    #[test]
    fn test_try_move_into_check() {
        // 黑车控制第 1 列，白王不能走进去
        let mut board = Board::empty();
        board.set(
            Position::new_unchecked(0, 0),
            Some(Piece::new(PieceKind::King, Color::White)),
        );
        board.set(
            Position::new_unchecked(7, 1),
            Some(Piece::new(PieceKind::Rook, Color::Black)),
        );
        board.set(
            Position::new_unchecked(7, 7),
            Some(Piece::new(PieceKind::King, Color::Black)),
        );
        let before = board.clone();

        let result = board.try_move(
            Position::new_unchecked(0, 0),
            Position::new_unchecked(0, 1),
        );
        assert_eq!(result, Err(ChessError::MoveIntoCheck));
        assert_eq!(board, before);
    }

    #[test]
    fn test_try_move_commits() {
        let mut board = Board::initial();

        let mv = board
            .try_move(Position::new_unchecked(1, 4), Position::new_unchecked(3, 4))
            .unwrap();

        assert_eq!(mv.from, Position::new_unchecked(1, 4));
        assert_eq!(mv.to, Position::new_unchecked(3, 4));
        assert!(mv.captured.is_none());

        assert!(board.get(Position::new_unchecked(1, 4)).is_none());
        assert_eq!(
            board.get(Position::new_unchecked(3, 4)),
            Some(Piece::new(PieceKind::Pawn, Color::White))
        );
    }

    #[test]
    fn test_try_move_capture() {
        let mut board = Board::empty();
        board.set(
            Position::new_unchecked(0, 0),
            Some(Piece::new(PieceKind::Rook, Color::White)),
        );
        board.set(
            Position::new_unchecked(0, 5),
            Some(Piece::new(PieceKind::Pawn, Color::Black)),
        );

        let mv = board
            .try_move(Position::new_unchecked(0, 0), Position::new_unchecked(0, 5))
            .unwrap();

        assert_eq!(
            mv.captured,
            Some(Piece::new(PieceKind::Pawn, Color::Black))
        );
        assert_eq!(
            board.get(Position::new_unchecked(0, 5)),
            Some(Piece::new(PieceKind::Rook, Color::White))
        );
        // 被吃的兵已从棋盘上消失
        assert_eq!(board.pieces(Color::Black).len(), 0);
    }

    #[test]
    fn test_is_game_over() {
        assert!(!Board::initial().is_game_over());

        // 角落杀：黑车将军底线，黑后封锁第 1 行
        let mut board = Board::empty();
        board.set(
            Position::new_unchecked(0, 0),
            Some(Piece::new(PieceKind::King, Color::White)),
        );
        board.set(
            Position::new_unchecked(0, 7),
            Some(Piece::new(PieceKind::Rook, Color::Black)),
        );
        board.set(
            Position::new_unchecked(1, 7),
            Some(Piece::new(PieceKind::Queen, Color::Black)),
        );
        board.set(
            Position::new_unchecked(7, 7),
            Some(Piece::new(PieceKind::King, Color::Black)),
        );

        assert!(board.is_game_over());
    }
}
