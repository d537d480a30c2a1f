use crate::{
    ast::{BinaryOperator, Expr, Function, NEGATION_PRECEDENCE, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::core::{MAX_NESTING_DEPTH, ParseResult},
    },
};

/// Index of a node in the construction arena.
type NodeId = usize;

/// What a construction node currently holds.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Kind {
    /// An operand slot that has not been filled yet.
    Hole,
    Number(f64),
    Variable,
    /// Negation; the operand lives in `right`, `left` stays empty.
    Negate,
    Binary(BinaryOperator),
    /// Function application; the argument lives in `right`.
    Call(Function),
    /// A parenthesized group; the contents live in `left`.
    Group { closed: bool },
}

#[derive(Debug, Clone)]
struct Node {
    kind:   Kind,
    left:   Option<NodeId>,
    right:  Option<NodeId>,
    /// Structural parent. Only used to move the cursor while building.
    parent: Option<NodeId>,
    offset: usize,
}

/// Builds an expression tree by moving a cursor over an arena of nodes.
///
/// The cursor always sits on the rightmost open path of the tree: either on
/// an empty operand slot that the next operand will fill, or on the operand
/// that was completed last. Binary operators re-parent the subtree under the
/// cursor instead of recursing, which is how precedence is resolved:
///
/// - an operator climbs from the completed operand past every ancestor that
///   binds at least as tightly, then takes the reached subtree as its left
///   operand;
/// - if the climb stops right away under a looser operator, the new operator
///   ends up inside that operator's right operand and binds tighter.
///
/// Equal precedence climbs, so chains are left-associative. This includes
/// `^`: `2^3^2` is `(2^3)^2`.
pub(crate) struct TreeBuilder<'t> {
    nodes:    Vec<Node>,
    cursor:   NodeId,
    depth:    usize,
    iterator: &'t str,
}

impl<'t> TreeBuilder<'t> {
    pub(crate) fn new(iterator: &'t str) -> Self {
        Self { nodes: vec![Node { kind:   Kind::Hole,
                                  left:   None,
                                  right:  None,
                                  parent: None,
                                  offset: 0, }],
               cursor: 0,
               depth: 0,
               iterator }
    }

    /// Consumes a token sequence and returns the finished tree.
    pub(crate) fn build(mut self, tokens: &[(Token, usize)]) -> ParseResult<Expr> {
        for (token, offset) in tokens {
            self.feed(*token, *offset)?;
        }
        self.finish()
    }

    fn push(&mut self, kind: Kind, parent: Option<NodeId>, offset: usize) -> NodeId {
        self.nodes.push(Node { kind,
                               left: None,
                               right: None,
                               parent,
                               offset });
        self.nodes.len() - 1
    }

    fn at_hole(&self) -> bool {
        self.nodes[self.cursor].kind == Kind::Hole
    }

    fn feed(&mut self, token: Token, offset: usize) -> ParseResult<()> {
        log::trace!("builder at node {} (depth {}): {token}", self.cursor, self.depth);

        match token {
            Token::Number(value) => self.fill(Kind::Number(value), token, offset),
            Token::Variable => self.fill(Kind::Variable, token, offset),
            Token::Function(function) => {
                self.expect_hole(token, offset)?;
                self.descend(Kind::Call(function), offset, false);
                Ok(())
            },
            Token::LeftParen => {
                self.expect_hole(token, offset)?;
                self.descend(Kind::Group { closed: false }, offset, true);
                self.depth += 1;
                Ok(())
            },
            Token::RightParen => self.close_group(offset),
            Token::Operator(op) => {
                if !self.at_hole() {
                    self.insert_binary(op, offset);
                    return Ok(());
                }
                if op == BinaryOperator::Sub {
                    self.descend(Kind::Negate, offset, false);
                    return Ok(());
                }
                Err(ParseError::UnexpectedToken { token: format!("{token}, expected an operand"),
                                                  offset })
            },
        }
    }

    fn expect_hole(&self, token: Token, offset: usize) -> ParseResult<()> {
        if self.at_hole() {
            return Ok(());
        }
        Err(ParseError::UnexpectedToken { token: format!("{token}, expected an operator"),
                                          offset })
    }

    /// Places a leaf in the empty slot under the cursor.
    fn fill(&mut self, kind: Kind, token: Token, offset: usize) -> ParseResult<()> {
        self.expect_hole(token, offset)?;
        let node = &mut self.nodes[self.cursor];
        node.kind = kind;
        node.offset = offset;
        Ok(())
    }

    /// Turns the empty slot under the cursor into a node with a single child
    /// slot and moves the cursor into that slot.
    fn descend(&mut self, kind: Kind, offset: usize, child_on_left: bool) {
        let parent = self.cursor;
        let child = self.push(Kind::Hole, Some(parent), offset);

        let node = &mut self.nodes[parent];
        node.kind = kind;
        node.offset = offset;
        if child_on_left {
            node.left = Some(child);
        } else {
            node.right = Some(child);
        }

        self.cursor = child;
    }

    /// Whether `node` holds an operator that keeps its operand when an
    /// operator of the given precedence arrives.
    fn binds_at_least(&self, node: NodeId, precedence: u8) -> bool {
        match self.nodes[node].kind {
            Kind::Binary(op) => op.precedence() >= precedence,
            Kind::Negate => NEGATION_PRECEDENCE >= precedence,
            Kind::Call(_) => true,
            Kind::Group { .. } | Kind::Hole | Kind::Number(_) | Kind::Variable => false,
        }
    }

    /// Inserts a binary operator above the completed operand under the cursor.
    fn insert_binary(&mut self, op: BinaryOperator, offset: usize) {
        let precedence = op.precedence();

        let mut target = self.cursor;
        while let Some(parent) = self.nodes[target].parent {
            if !self.binds_at_least(parent, precedence) {
                break;
            }
            target = parent;
        }

        let grandparent = self.nodes[target].parent;
        let node = self.push(Kind::Binary(op), grandparent, offset);
        if let Some(g) = grandparent {
            let slot = &mut self.nodes[g];
            if slot.left == Some(target) {
                slot.left = Some(node);
            } else {
                slot.right = Some(node);
            }
        }

        self.nodes[target].parent = Some(node);
        self.nodes[node].left = Some(target);

        let hole = self.push(Kind::Hole, Some(node), offset);
        self.nodes[node].right = Some(hole);
        self.cursor = hole;
    }

    /// Ascends from the cursor to the innermost open group and closes it.
    fn close_group(&mut self, offset: usize) -> ParseResult<()> {
        if self.depth == 0 {
            return Err(ParseError::MismatchedParentheses { details: format!("closing symbol at offset {offset} has no matching opening symbol") });
        }
        if self.at_hole() {
            return Err(ParseError::IncompleteExpression { details: format!("missing operand before the closing symbol at offset {offset}") });
        }

        let mut node = self.cursor;
        loop {
            if self.nodes[node].kind == (Kind::Group { closed: false }) {
                break;
            }
            node = self.nodes[node].parent.ok_or_else(|| ParseError::MismatchedParentheses {
                details: format!("closing symbol at offset {offset} has no matching opening symbol"),
            })?;
        }

        self.nodes[node].kind = Kind::Group { closed: true };
        self.cursor = node;
        self.depth -= 1;
        Ok(())
    }

    fn finish(self) -> ParseResult<Expr> {
        if self.depth != 0 {
            return Err(ParseError::MismatchedParentheses { details: format!("{} opening symbol(s) never closed",
                                                                            self.depth) });
        }
        if self.at_hole() {
            let details = if self.nodes.len() == 1 {
                "the expression is empty".to_string()
            } else {
                format!("missing operand after offset {}", self.nodes[self.cursor].offset)
            };
            return Err(ParseError::IncompleteExpression { details });
        }

        let mut root = self.cursor;
        while let Some(parent) = self.nodes[root].parent {
            root = parent;
        }

        self.check_height(root)?;
        let expr = self.lower(root)?;
        log::debug!("built tree with {} nodes from {} arena slots",
                    expr.node_count(),
                    self.nodes.len());
        Ok(expr)
    }

    /// Walks the arena without recursing and fails on the first node deeper
    /// than [`MAX_NESTING_DEPTH`].
    fn check_height(&self, root: NodeId) -> ParseResult<()> {
        let mut stack = vec![(root, 1)];

        while let Some((id, depth)) = stack.pop() {
            let node = &self.nodes[id];
            if depth > MAX_NESTING_DEPTH {
                return Err(ParseError::NestingTooDeep { limit:  MAX_NESTING_DEPTH,
                                                        offset: node.offset, });
            }
            stack.extend([node.left, node.right].into_iter().flatten().map(|child| (child, depth + 1)));
        }
        Ok(())
    }

    fn child(&self, id: Option<NodeId>, offset: usize) -> ParseResult<Expr> {
        let id = id.ok_or_else(|| ParseError::IncompleteExpression { details: format!("missing operand near offset {offset}") })?;
        self.lower(id)
    }

    /// Converts the arena rooted at `id` into an owned tree, dropping group
    /// markers and parent links.
    fn lower(&self, id: NodeId) -> ParseResult<Expr> {
        let node = &self.nodes[id];
        let offset = node.offset;

        match node.kind {
            Kind::Hole => Err(ParseError::IncompleteExpression { details: format!("missing operand near offset {offset}") }),
            Kind::Number(value) => Ok(Expr::Number { value }),
            Kind::Variable => Ok(Expr::Variable { name: self.iterator.to_string() }),
            Kind::Negate => Ok(Expr::Unary { op: UnaryOperator::Negate,
                                             operand: Box::new(self.child(node.right, offset)?),
                                             offset }),
            Kind::Binary(op) => Ok(Expr::Binary { left: Box::new(self.child(node.left, offset)?),
                                                  op,
                                                  right: Box::new(self.child(node.right, offset)?),
                                                  offset }),
            Kind::Call(function) => Ok(Expr::Call { function,
                                                    argument: Box::new(self.child(node.right, offset)?),
                                                    offset }),
            Kind::Group { .. } => self.child(node.left, offset),
        }
    }
}
