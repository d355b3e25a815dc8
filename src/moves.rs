//! 走法生成和验证

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::piece::{Color, Piece, PieceKind, Position};

/// 车的 4 个直线方向
const ROOK_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// 象的 4 个斜线方向
const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// 后和王的 8 个方向
const ALL_DIRECTIONS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// 马的 8 个日字偏移
const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

/// 走法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// 起始位置
    pub from: Position,
    /// 目标位置
    pub to: Position,
    /// 被吃的棋子（如果有）
    pub captured: Option<Piece>,
}

impl Move {
    /// 创建新走法
    pub fn new(from: Position, to: Position) -> Self {
        Self {
            from,
            to,
            captured: None,
        }
    }

    /// 创建带吃子的走法
    pub fn with_capture(from: Position, to: Position, captured: Piece) -> Self {
        Self {
            from,
            to,
            captured: Some(captured),
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// 走法生成器
pub struct MoveGenerator;

impl MoveGenerator {
    /// 生成指定阵营的所有伪合法走法（不考虑将军）
    pub fn generate_pseudo_legal(board: &Board, color: Color) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);

        for (pos, piece) in board.pieces(color) {
            Self::generate_piece_moves(board, pos, piece, &mut moves);
        }

        moves
    }

    /// 生成指定阵营的所有合法走法（过滤掉会导致己方被将军的走法）
    pub fn generate_legal(board: &Board, color: Color) -> Vec<Move> {
        Self::generate_pseudo_legal(board, color)
            .into_iter()
            .filter(|mv| Self::is_move_safe(board, mv, color))
            .collect()
    }

    /// 生成指定位置棋子的伪合法走法；空位置返回空集
    pub fn piece_moves(board: &Board, pos: Position) -> Vec<Move> {
        let mut moves = Vec::new();
        if let Some(piece) = board.get(pos) {
            Self::generate_piece_moves(board, pos, piece, &mut moves);
        }
        moves
    }

    /// 生成指定位置棋子的合法走法；空位置返回空集
    pub fn legal_piece_moves(board: &Board, pos: Position) -> Vec<Move> {
        let piece = match board.get(pos) {
            Some(piece) => piece,
            None => return Vec::new(),
        };

        Self::piece_moves(board, pos)
            .into_iter()
            .filter(|mv| Self::is_move_safe(board, mv, piece.color))
            .collect()
    }

    /// 在棋盘副本上模拟走法，检查走完后己方王是否安全
    fn is_move_safe(board: &Board, mv: &Move, color: Color) -> bool {
        let mut test_board = board.clone();
        test_board.move_piece(mv.from, mv.to);
        !Self::is_in_check(&test_board, color)
    }

    /// 生成指定棋子的所有伪合法走法
    fn generate_piece_moves(board: &Board, pos: Position, piece: Piece, moves: &mut Vec<Move>) {
        match piece.kind {
            PieceKind::King => {
                Self::generate_step_moves(board, pos, piece.color, &ALL_DIRECTIONS, moves)
            }
            PieceKind::Queen => {
                Self::generate_sliding_moves(board, pos, piece.color, &ALL_DIRECTIONS, moves)
            }
            PieceKind::Rook => {
                Self::generate_sliding_moves(board, pos, piece.color, &ROOK_DIRECTIONS, moves)
            }
            PieceKind::Bishop => {
                Self::generate_sliding_moves(board, pos, piece.color, &BISHOP_DIRECTIONS, moves)
            }
            PieceKind::Knight => {
                Self::generate_step_moves(board, pos, piece.color, &KNIGHT_OFFSETS, moves)
            }
            PieceKind::Pawn => Self::generate_pawn_moves(board, pos, piece.color, moves),
        }
    }

    /// 滑行类棋子（车、象、后）：沿方向逐格延伸，遇敌止于吃子，遇己止于身前
    fn generate_sliding_moves(
        board: &Board,
        pos: Position,
        color: Color,
        directions: &[(i8, i8)],
        moves: &mut Vec<Move>,
    ) {
        for &(dr, dc) in directions {
            let mut current = pos;
            while let Some(to) = current.offset(dr, dc) {
                if let Some(target) = board.get(to) {
                    // 遇到棋子
                    if target.color != color {
                        // 可以吃
                        moves.push(Move::with_capture(pos, to, target));
                    }
                    break;
                } else {
                    // 空位，可以走
                    moves.push(Move::new(pos, to));
                }
                current = to;
            }
        }
    }

    /// 步进类棋子（马、王）：固定偏移各走一次
    fn generate_step_moves(
        board: &Board,
        pos: Position,
        color: Color,
        offsets: &[(i8, i8)],
        moves: &mut Vec<Move>,
    ) {
        for &(dr, dc) in offsets {
            if let Some(to) = pos.offset(dr, dc) {
                Self::try_add_move(board, pos, to, color, moves);
            }
        }
    }

    /// 生成兵的走法
    ///
    /// 直进不吃子，斜进只吃子；是否还在初始行决定能否进两格。
    fn generate_pawn_moves(board: &Board, pos: Position, color: Color, moves: &mut Vec<Move>) {
        let forward = color.forward();

        // 直进一格，目标必须为空
        if let Some(to) = pos.offset(forward, 0) {
            if board.get(to).is_none() {
                moves.push(Move::new(pos, to));

                // 初始行可进两格，途经格和目标格都必须为空
                if pos.row == color.pawn_row() {
                    if let Some(two) = to.offset(forward, 0) {
                        if board.get(two).is_none() {
                            moves.push(Move::new(pos, two));
                        }
                    }
                }
            }
        }

        // 斜进只在目标有敌子时成立
        for dc in [-1i8, 1i8] {
            if let Some(to) = pos.offset(forward, dc) {
                if let Some(target) = board.get(to) {
                    if target.color != color {
                        moves.push(Move::with_capture(pos, to, target));
                    }
                }
            }
        }
    }

    /// 尝试添加走法（检查目标位置是否可以移动）
    fn try_add_move(board: &Board, from: Position, to: Position, color: Color, moves: &mut Vec<Move>) {
        if let Some(target) = board.get(to) {
            // 目标位置有棋子
            if target.color != color {
                // 可以吃
                moves.push(Move::with_capture(from, to, target));
            }
        } else {
            // 空位
            moves.push(Move::new(from, to));
        }
    }

    /// 检查指定阵营是否被将军
    ///
    /// 以对方棋子的伪合法走法判定攻击。这里不能改用合法走法，
    /// 否则会与 [`MoveGenerator::generate_legal`] 互相递归。
    pub fn is_in_check(board: &Board, color: Color) -> bool {
        let king_pos = match board.find_king(color) {
            Some(pos) => pos,
            None => return false, // 没有王，视为不被将军
        };

        for (pos, _) in board.pieces(color.opponent()) {
            if Self::piece_moves(board, pos).iter().any(|mv| mv.to == king_pos) {
                return true;
            }
        }

        false
    }

    /// 检查是否被将死
    pub fn is_checkmate(board: &Board, color: Color) -> bool {
        Self::is_in_check(board, color) && Self::generate_legal(board, color).is_empty()
    }

    /// 检查是否无子可动（逼和）
    pub fn is_stalemate(board: &Board, color: Color) -> bool {
        !Self::is_in_check(board, color) && Self::generate_legal(board, color).is_empty()
    }
}
