//! AST node types for ICFP programs.
//!
//! Programs arrive in prefix notation and are built into an [`Expr`] tree
//! once, then only read. Children are boxed; the evaluator borrows
//! sub-trees instead of cloning them.

use num_bigint::BigInt;
use std::fmt;

// ══════════════════════════════════════════════════════════════════════════════
// Variables & Literals
// ══════════════════════════════════════════════════════════════════════════════

/// A variable name, decoded from a base-94 body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VarId(pub u64);

impl fmt::Display for VarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl From<u64> for VarId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A literal value carried directly by a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    Bool(bool),
    Int(BigInt),
    Str(String),
}

// ══════════════════════════════════════════════════════════════════════════════
// Operators
// ══════════════════════════════════════════════════════════════════════════════

/// Unary operators (`U` tokens).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// `-` integer negation
    Negate,
    /// `!` boolean not
    Not,
    /// `#` string to int
    StrToInt,
    /// `$` int to string
    IntToStr,
}

impl UnaryOp {
    pub const ALL: [UnaryOp; 4] = [Self::Negate, Self::Not, Self::StrToInt, Self::IntToStr];

    /// The wire symbol following the `U` indicator.
    pub fn symbol(self) -> char {
        match self {
            Self::Negate => '-',
            Self::Not => '!',
            Self::StrToInt => '#',
            Self::IntToStr => '$',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == symbol)
    }

    /// Human-readable operator name for diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Self::Negate => "negate",
            Self::Not => "not",
            Self::StrToInt => "string-to-int",
            Self::IntToStr => "int-to-string",
        }
    }

    /// The operand kind this operator requires.
    pub fn expected_operand(self) -> &'static str {
        match self {
            Self::Negate | Self::IntToStr => "integer operand",
            Self::Not => "boolean operand",
            Self::StrToInt => "string operand",
        }
    }
}

/// Binary operators (`B` tokens).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/` truncating toward zero
    Div,
    /// `%` remainder with the sign of the dividend
    Mod,
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `=`
    Eq,
    /// `|`
    Or,
    /// `&`
    And,
    /// `.` string concatenation
    Concat,
    /// `T` take first n characters
    Take,
    /// `D` drop first n characters
    Drop,
    /// `$` function application
    Apply,
}

impl BinaryOp {
    pub const ALL: [BinaryOp; 14] = [
        Self::Add,
        Self::Sub,
        Self::Mul,
        Self::Div,
        Self::Mod,
        Self::Lt,
        Self::Gt,
        Self::Eq,
        Self::Or,
        Self::And,
        Self::Concat,
        Self::Take,
        Self::Drop,
        Self::Apply,
    ];

    /// The wire symbol following the `B` indicator.
    pub fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mul => '*',
            Self::Div => '/',
            Self::Mod => '%',
            Self::Lt => '<',
            Self::Gt => '>',
            Self::Eq => '=',
            Self::Or => '|',
            Self::And => '&',
            Self::Concat => '.',
            Self::Take => 'T',
            Self::Drop => 'D',
            Self::Apply => '$',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == symbol)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Mul => "mul",
            Self::Div => "div",
            Self::Mod => "mod",
            Self::Lt => "lt",
            Self::Gt => "gt",
            Self::Eq => "eq",
            Self::Or => "or",
            Self::And => "and",
            Self::Concat => "concat",
            Self::Take => "take",
            Self::Drop => "drop",
            Self::Apply => "apply",
        }
    }

    /// The operand kinds this operator requires.
    pub fn expected_operands(self) -> &'static str {
        match self {
            Self::Add | Self::Sub | Self::Mul | Self::Div | Self::Mod | Self::Lt | Self::Gt => {
                "integer operands"
            }
            Self::Eq => "matching scalar operands",
            Self::Or | Self::And => "boolean operands",
            Self::Concat => "string operands",
            Self::Take | Self::Drop => "integer and string operands",
            Self::Apply => "a lambda on the left",
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Expressions
// ══════════════════════════════════════════════════════════════════════════════

/// An expression node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Literal(Literal),
    Variable(VarId),
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Lambda {
        param: VarId,
        body: Box<Expr>,
    },
    If {
        condition: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
    },
}

impl Expr {
    pub fn bool(b: bool) -> Self {
        Self::Literal(Literal::Bool(b))
    }

    pub fn int(n: impl Into<BigInt>) -> Self {
        Self::Literal(Literal::Int(n.into()))
    }

    pub fn str(s: impl Into<String>) -> Self {
        Self::Literal(Literal::Str(s.into()))
    }

    pub fn var(id: u64) -> Self {
        Self::Variable(VarId(id))
    }

    pub fn unary(op: UnaryOp, operand: Expr) -> Self {
        Self::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Self::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// `B$ function argument`
    pub fn apply(function: Expr, argument: Expr) -> Self {
        Self::binary(BinaryOp::Apply, function, argument)
    }

    pub fn lambda(param: u64, body: Expr) -> Self {
        Self::Lambda {
            param: VarId(param),
            body: Box::new(body),
        }
    }

    pub fn if_then_else(condition: Expr, then_branch: Expr, else_branch: Expr) -> Self {
        Self::If {
            condition: Box::new(condition),
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
        }
    }

    /// Number of nodes in the tree (equals the number of tokens it came from).
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut pending = vec![self];
        while let Some(expr) = pending.pop() {
            count += 1;
            match expr {
                Expr::Literal(_) | Expr::Variable(_) => {}
                Expr::Unary { operand, .. } => pending.push(operand),
                Expr::Binary { left, right, .. } => {
                    pending.push(left);
                    pending.push(right);
                }
                Expr::Lambda { body, .. } => pending.push(body),
                Expr::If {
                    condition,
                    then_branch,
                    else_branch,
                } => {
                    pending.push(condition);
                    pending.push(then_branch);
                    pending.push(else_branch);
                }
            }
        }
        count
    }
}
