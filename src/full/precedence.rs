//! Operator precedence table
//!
//! Levels run from 1 (loosest) to 24 (tightest). Every binary operator has
//! its own level, so operators that share a row in a C grammar still nest:
//! `a == b != c` groups as `a == (b != c)` and `a - b + c` as
//! `a - (b + c)`, because `!=` and `+` sit one level tighter than `==`
//! and `-`. Binary operators are left-associative only among themselves.
//!
//! | level | operators |
//! |---|---|
//! | 1 | `=` and compound assignment (right) |
//! | 2 | `?:` (right) |
//! | 3 | `\|\|` |
//! | 4 | `&&` |
//! | 5 | `\|` |
//! | 6 | `^` |
//! | 7 | `&` |
//! | 8 | `==` |
//! | 9 | `!=` |
//! | 10 | `>=` |
//! | 11 | `<=` |
//! | 12 | `>` |
//! | 13 | `<` |
//! | 14 | `>>` |
//! | 15 | `<<` |
//! | 16 | `-` |
//! | 17 | `+` |
//! | 18 | `%` |
//! | 19 | `/` |
//! | 20 | `*` |
//! | 21 | prefix `- + ! ~ -- ++` and casts |
//! | 22 | call |
//! | 23 | index |
//! | 24 | postfix `++ --` |

use crate::ast::{AssignOp, BinaryOp, PostfixOp, UnaryOp};
use crate::cursor::TokenCursor;
use crate::full::lexer::FullKind;

pub type Level = u8;

pub const ASSIGNMENT: Level = 1;
pub const TERNARY: Level = 2;
pub const UNARY: Level = 21;
pub const INVOKE: Level = 22;
pub const INDEX: Level = 23;
pub const POSTFIX: Level = 24;

/// An operator that can follow a complete left operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Infix {
    Assign(AssignOp),
    Ternary,
    Binary(BinaryOp),
}

impl Infix {
    pub fn level(self) -> Level {
        match self {
            Infix::Assign(_) => ASSIGNMENT,
            Infix::Ternary => TERNARY,
            Infix::Binary(op) => binary_level(op),
        }
    }
}

pub fn binary_level(op: BinaryOp) -> Level {
    match op {
        BinaryOp::Or => 3,
        BinaryOp::And => 4,
        BinaryOp::BitOr => 5,
        BinaryOp::BitXor => 6,
        BinaryOp::BitAnd => 7,
        BinaryOp::Eq => 8,
        BinaryOp::Ne => 9,
        BinaryOp::Ge => 10,
        BinaryOp::Le => 11,
        BinaryOp::Gt => 12,
        BinaryOp::Lt => 13,
        BinaryOp::Shr => 14,
        BinaryOp::Shl => 15,
        BinaryOp::Sub => 16,
        BinaryOp::Add => 17,
        BinaryOp::Mod => 18,
        BinaryOp::Div => 19,
        BinaryOp::Mul => 20,
    }
}

/// The infix operator at the cursor and how many tokens it spans.
///
/// `<<` and `>>` are recognised only when the two halves touch; `a < < b`
/// is left for the caller to reject.
pub fn peek_infix(cursor: &TokenCursor<'_, FullKind>) -> Option<(Infix, usize)> {
    let kind = cursor.peek_kind();
    let shift = cursor.peek_ahead(1).kind == kind && cursor.next_is_adjacent();

    let infix = match kind {
        FullKind::Lt if shift => return Some((Infix::Binary(BinaryOp::Shl), 2)),
        FullKind::Gt if shift => return Some((Infix::Binary(BinaryOp::Shr), 2)),
        FullKind::Question => Infix::Ternary,
        FullKind::PipePipe => Infix::Binary(BinaryOp::Or),
        FullKind::AmpAmp => Infix::Binary(BinaryOp::And),
        FullKind::Pipe => Infix::Binary(BinaryOp::BitOr),
        FullKind::Caret => Infix::Binary(BinaryOp::BitXor),
        FullKind::Amp => Infix::Binary(BinaryOp::BitAnd),
        FullKind::EqEq => Infix::Binary(BinaryOp::Eq),
        FullKind::NotEq => Infix::Binary(BinaryOp::Ne),
        FullKind::Ge => Infix::Binary(BinaryOp::Ge),
        FullKind::Le => Infix::Binary(BinaryOp::Le),
        FullKind::Gt => Infix::Binary(BinaryOp::Gt),
        FullKind::Lt => Infix::Binary(BinaryOp::Lt),
        FullKind::Minus => Infix::Binary(BinaryOp::Sub),
        FullKind::Plus => Infix::Binary(BinaryOp::Add),
        FullKind::Percent => Infix::Binary(BinaryOp::Mod),
        FullKind::Slash => Infix::Binary(BinaryOp::Div),
        FullKind::Star => Infix::Binary(BinaryOp::Mul),
        other => Infix::Assign(assign_op(other)?),
    };
    Some((infix, 1))
}

pub fn assign_op(kind: FullKind) -> Option<AssignOp> {
    let op = match kind {
        FullKind::Assign => AssignOp::Assign,
        FullKind::PlusAssign => AssignOp::AddAssign,
        FullKind::MinusAssign => AssignOp::SubAssign,
        FullKind::StarAssign => AssignOp::MulAssign,
        FullKind::SlashAssign => AssignOp::DivAssign,
        FullKind::AmpAssign => AssignOp::AndAssign,
        FullKind::PipeAssign => AssignOp::OrAssign,
        FullKind::CaretAssign => AssignOp::XorAssign,
        FullKind::PercentAssign => AssignOp::ModAssign,
        FullKind::ShlAssign => AssignOp::ShlAssign,
        FullKind::ShrAssign => AssignOp::ShrAssign,
        _ => return None,
    };
    Some(op)
}

pub fn prefix_op(kind: FullKind) -> Option<UnaryOp> {
    let op = match kind {
        FullKind::Minus => UnaryOp::Neg,
        FullKind::Plus => UnaryOp::Plus,
        FullKind::Bang => UnaryOp::Not,
        FullKind::Tilde => UnaryOp::BitNot,
        FullKind::MinusMinus => UnaryOp::PreDec,
        FullKind::PlusPlus => UnaryOp::PreInc,
        _ => return None,
    };
    Some(op)
}

pub fn postfix_op(kind: FullKind) -> Option<PostfixOp> {
    match kind {
        FullKind::PlusPlus => Some(PostfixOp::Inc),
        FullKind::MinusMinus => Some(PostfixOp::Dec),
        _ => None,
    }
}
