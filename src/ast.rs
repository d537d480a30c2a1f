use std::fmt;

/// A binary arithmetic operator.
///
/// The variants are ordered loosely by binding strength; use
/// [`BinaryOperator::precedence`] for the actual comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `^`
    Pow,
}

/// Binding strength of negation. Sits between the multiplicative operators and
/// exponentiation, so `-n^2` is `-(n^2)` while `-n*2` is `(-n)*2`.
pub const NEGATION_PRECEDENCE: u8 = 3;

impl BinaryOperator {
    /// Returns the binding strength of the operator.
    ///
    /// Higher values bind more tightly:
    /// - `+` and `-`: 1
    /// - `*` and `/`: 2
    /// - `^`: 4
    ///
    /// # Example
    /// ```
    /// use seriesview::ast::BinaryOperator;
    ///
    /// assert!(BinaryOperator::Pow.precedence() > BinaryOperator::Mul.precedence());
    /// assert_eq!(BinaryOperator::Add.precedence(), BinaryOperator::Sub.precedence());
    /// ```
    #[must_use]
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Add | Self::Sub => 1,
            Self::Mul | Self::Div => 2,
            Self::Pow => 4,
        }
    }

    /// Maps an operator character to its operator.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Add),
            '-' => Some(Self::Sub),
            '*' => Some(Self::Mul),
            '/' => Some(Self::Div),
            '^' => Some(Self::Pow),
            _ => None,
        }
    }

    /// The source symbol of the operator.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mul => '*',
            Self::Div => '/',
            Self::Pow => '^',
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A unary operator. Negation is the only one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    /// Arithmetic negation, `-x`.
    Negate,
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Negate => write!(f, "-"),
        }
    }
}

/// A builtin function that can be applied to a single operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Function {
    /// Square root.
    Sqrt,
    /// Sine, in radians.
    Sin,
    /// Cosine, in radians.
    Cos,
    /// Tangent, in radians.
    Tan,
    /// Natural logarithm.
    Ln,
    /// Base 10 logarithm.
    Log,
}

impl Function {
    /// All builtin functions, in the order they are documented.
    pub const ALL: [Self; 6] = [Self::Sqrt, Self::Sin, Self::Cos, Self::Tan, Self::Ln, Self::Log];

    /// Looks up a function by its source name.
    ///
    /// # Example
    /// ```
    /// use seriesview::ast::Function;
    ///
    /// assert_eq!(Function::from_name("ln"), Some(Function::Ln));
    /// assert_eq!(Function::from_name("exp"), None);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    /// The source name of the function.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sqrt => "sqrt",
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Ln => "ln",
            Self::Log => "log",
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A node of a finished expression tree.
///
/// Every variant that has operands owns all of them; a tree handed out by the
/// parser is never partially built. Operator and function nodes keep the byte
/// offset of their token in the normalized source so evaluation errors can
/// point at it.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A numeric literal such as `2` or `0.5`.
    Number {
        /// The literal value.
        value: f64,
    },
    /// A reference to the iterator variable.
    Variable {
        /// Name of the variable.
        name: String,
    },
    /// A unary operation.
    Unary {
        /// The operator to apply.
        op:      UnaryOperator,
        /// The operand.
        operand: Box<Self>,
        /// Byte offset of the operator in the source.
        offset:  usize,
    },
    /// A binary operation.
    Binary {
        /// Left operand.
        left:   Box<Self>,
        /// The operator.
        op:     BinaryOperator,
        /// Right operand.
        right:  Box<Self>,
        /// Byte offset of the operator in the source.
        offset: usize,
    },
    /// Application of a builtin function, e.g. `sin(n)`.
    Call {
        /// The function being applied.
        function: Function,
        /// The single argument.
        argument: Box<Self>,
        /// Byte offset of the function name in the source.
        offset:   usize,
    },
}

impl Expr {
    /// Number of nodes in the tree rooted at `self`.
    #[must_use]
    pub fn node_count(&self) -> usize {
        match self {
            Self::Number { .. } | Self::Variable { .. } => 1,
            Self::Unary { operand, .. } => 1 + operand.node_count(),
            Self::Binary { left, right, .. } => 1 + left.node_count() + right.node_count(),
            Self::Call { argument, .. } => 1 + argument.node_count(),
        }
    }
}

/// Renders the tree fully parenthesized, which makes the parsed precedence
/// visible: `1+2*3` displays as `(1 + (2 * 3))`.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number { value } => write!(f, "{value}"),
            Self::Variable { name } => f.write_str(name),
            Self::Unary { op, operand, .. } => write!(f, "({op}{operand})"),
            Self::Binary { left, op, right, .. } => write!(f, "({left} {op} {right})"),
            Self::Call { function, argument, .. } => write!(f, "{function}({argument})"),
        }
    }
}

/// A parsed expression in one iterator variable.
///
/// The tree is immutable once built and can be evaluated any number of times
/// with different iterator values.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionTree {
    root:     Expr,
    iterator: String,
    source:   String,
}

impl ExpressionTree {
    /// Wraps a finished root node.
    #[must_use]
    pub fn new(root: Expr, iterator: impl Into<String>, source: impl Into<String>) -> Self {
        Self { root,
               iterator: iterator.into(),
               source: source.into() }
    }

    /// The root node of the tree.
    #[must_use]
    pub const fn root(&self) -> &Expr {
        &self.root
    }

    /// The iterator name the tree was parsed with.
    #[must_use]
    pub fn iterator(&self) -> &str {
        &self.iterator
    }

    /// The normalized source text the tree was built from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }
}

impl fmt::Display for ExpressionTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.root.fmt(f)
    }
}
