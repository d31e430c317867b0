// AST (Abstract Syntax Tree) definitions for the Chest language

/// Source location of a token or AST node, for diagnostics only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceSpan {
    pub line: usize,
    pub column: usize,
    pub end_line: usize,
    pub end_column: usize,
}

impl SourceSpan {
    pub fn new(line: usize, column: usize, end_line: usize, end_column: usize) -> Self {
        Self {
            line,
            column,
            end_line,
            end_column,
        }
    }

    /// Span covering this span through the end of `other`.
    pub fn to(self, other: SourceSpan) -> SourceSpan {
        SourceSpan::new(self.line, self.column, other.end_line, other.end_column)
    }
}

/// The three primitive types of the Chest language.
///
/// Used only for operator selection during inference; storage is always
/// dynamic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChestType {
    Number,
    Text,
    Bool,
}

/// Optional type annotation. Advisory only; never enforced.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeRef {
    pub name: String,
}

/// A parameter in an employee declaration. Parameters are parsed but there
/// is no call syntax to bind them, so they carry no runtime meaning yet.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub type_hint: Option<TypeRef>,
}

/// Binary operators of the expression grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Lt,
    Gt,
    Le,
    Ge,
    Eq,
    Ne,
}

impl BinOp {
    /// The operator's source spelling, used in error messages.
    pub fn symbol(&self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Lt => "<",
            BinOp::Gt => ">",
            BinOp::Le => "<=",
            BinOp::Ge => ">=",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
        }
    }
}

/// A node in the AST.
///
/// One enum covers declarations, statements, and expressions; the parser's
/// grammar decides which variants may appear where, and the code generator
/// rejects a variant found in the wrong position.
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    /// Top-level namespace-like grouping of offices.
    Building {
        name: String,
        members: Vec<AstNode>,
        span: SourceSpan,
    },

    /// Class-like grouping of employees, static by convention.
    Office {
        name: String,
        members: Vec<AstNode>,
        span: SourceSpan,
    },

    /// Method-like unit holding a statement body.
    Employee {
        name: String,
        parameters: Vec<Parameter>,
        body: Vec<AstNode>,
        span: SourceSpan,
    },

    /// `chest name` with an optional initializer.
    VarDecl {
        name: String,
        init: Option<Box<AstNode>>,
        span: SourceSpan,
    },

    /// `show expr`: write the value's textual form plus a newline.
    Show {
        expr: Box<AstNode>,
        span: SourceSpan,
    },

    /// `decide cond` with a then-block and optional else-block.
    Decide {
        cond: Box<AstNode>,
        then_block: Vec<AstNode>,
        else_block: Option<Vec<AstNode>>,
        span: SourceSpan,
    },

    /// `attach module`: parsed as a marker, no runtime effect.
    Attach {
        module: String,
        span: SourceSpan,
    },

    NumberLiteral(f64, SourceSpan),
    TextLiteral(String, SourceSpan),
    BoolLiteral(bool, SourceSpan),

    /// A variable reference.
    Ident(String, SourceSpan),

    Binary {
        op: BinOp,
        left: Box<AstNode>,
        right: Box<AstNode>,
        span: SourceSpan,
    },

    /// `ask` with an optional literal prompt string.
    Ask {
        prompt: Option<String>,
        span: SourceSpan,
    },
}

impl AstNode {
    /// The node's source span.
    pub fn span(&self) -> &SourceSpan {
        match self {
            AstNode::Building { span, .. } => span,
            AstNode::Office { span, .. } => span,
            AstNode::Employee { span, .. } => span,
            AstNode::VarDecl { span, .. } => span,
            AstNode::Show { span, .. } => span,
            AstNode::Decide { span, .. } => span,
            AstNode::Attach { span, .. } => span,
            AstNode::NumberLiteral(_, span) => span,
            AstNode::TextLiteral(_, span) => span,
            AstNode::BoolLiteral(_, span) => span,
            AstNode::Ident(_, span) => span,
            AstNode::Binary { span, .. } => span,
            AstNode::Ask { span, .. } => span,
        }
    }

    /// Human-readable name of the node kind, for code-generation errors.
    pub fn kind_name(&self) -> &'static str {
        match self {
            AstNode::Building { .. } => "building declaration",
            AstNode::Office { .. } => "office declaration",
            AstNode::Employee { .. } => "employee declaration",
            AstNode::VarDecl { .. } => "variable declaration",
            AstNode::Show { .. } => "show statement",
            AstNode::Decide { .. } => "decide statement",
            AstNode::Attach { .. } => "attach statement",
            AstNode::NumberLiteral(..) => "number literal",
            AstNode::TextLiteral(..) => "text literal",
            AstNode::BoolLiteral(..) => "bool literal",
            AstNode::Ident(..) => "identifier",
            AstNode::Binary { .. } => "binary expression",
            AstNode::Ask { .. } => "ask expression",
        }
    }
}

/// Root of a parsed program.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub buildings: Vec<AstNode>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }
}
