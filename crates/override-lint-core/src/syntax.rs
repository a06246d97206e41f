//! Language-neutral syntax model consumed by rules.
//!
//! Front ends (see `override-lint-py`) lower their concrete syntax trees into
//! these closed node types. Rules match on them exhaustively; node shapes a
//! front end does not model explicitly end up in [`Expr::Other`] or
//! [`Stmt::Simple`].

/// A source position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column (0-indexed byte offset within line).
    pub column: usize,
    /// Byte offset from the start of the file.
    pub offset: usize,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }
}

/// Root of a parsed source unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Module {
    /// Top-level statements in source order.
    pub body: Vec<Stmt>,
}

/// A statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    /// `class Name(bases): ...`
    ClassDef(ClassDef),
    /// `def name(...)` or `async def name(...)`
    FunctionDef(FunctionDef),
    /// `if`, `for`, `while`, `try`, `with`, `match` and friends.
    Compound(Compound),
    /// Any statement without a nested body (assignments, expressions, ...).
    Simple(Position),
}

impl Stmt {
    /// Returns the position where this statement starts.
    #[must_use]
    pub fn position(&self) -> Position {
        match self {
            Self::ClassDef(class) => class.position,
            Self::FunctionDef(function) => function.position,
            Self::Compound(compound) => compound.position,
            Self::Simple(position) => *position,
        }
    }
}

/// A class declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDef {
    /// Class name.
    pub name: String,
    /// Positional base references, in source order. Keyword arguments such as
    /// `metaclass=...` are not included.
    pub bases: Vec<Expr>,
    /// Decorators, in source order.
    pub decorators: Vec<Expr>,
    /// Body members, in source order.
    pub body: Vec<Stmt>,
    /// Position of the `class` keyword.
    pub position: Position,
}

/// A function or method declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDef {
    /// Function name.
    pub name: String,
    /// Whether this is an `async def`.
    pub is_async: bool,
    /// Decorators, in source order.
    pub decorators: Vec<Expr>,
    /// Function body.
    pub body: Vec<Stmt>,
    /// Position of the definition token (`def`, or `async` for async functions).
    pub position: Position,
    /// Position of the name identifier.
    pub name_position: Position,
}

/// A compound statement other than a class or function definition.
///
/// Clauses (`elif`, `else`, `except`, `finally`, `case`) are flattened into
/// `body` in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compound {
    /// Node kind as reported by the front end (e.g. `if_statement`).
    pub kind: String,
    /// Nested statements from every clause.
    pub body: Vec<Stmt>,
    /// Position of the statement.
    pub position: Position,
}

/// An expression, as far as rules care about them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// A bare identifier: `Protocol`.
    Name(Name),
    /// Dotted access: `typing.Protocol`.
    Attribute(Attribute),
    /// Subscription: `Generic[T]`.
    Subscript(Subscript),
    /// Call: `functools.lru_cache(maxsize=None)`.
    Call(Call),
    /// Any other expression shape.
    Other(Position),
}

impl Expr {
    /// Returns the position where this expression starts.
    #[must_use]
    pub fn position(&self) -> Position {
        match self {
            Self::Name(name) => name.position,
            Self::Attribute(attr) => attr.position,
            Self::Subscript(subscript) => subscript.position,
            Self::Call(call) => call.position,
            Self::Other(position) => *position,
        }
    }
}

/// A bare identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name {
    /// The identifier.
    pub id: String,
    /// Position of the identifier.
    pub position: Position,
}

/// A dotted attribute access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// The expression left of the final dot.
    pub value: Box<Expr>,
    /// The final attribute segment.
    pub attr: String,
    /// Position of the whole expression.
    pub position: Position,
}

/// A subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscript {
    /// The subscripted expression.
    pub value: Box<Expr>,
    /// Position of the whole expression.
    pub position: Position,
}

/// A call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    /// The called expression.
    pub func: Box<Expr>,
    /// Position of the whole expression.
    pub position: Position,
}
