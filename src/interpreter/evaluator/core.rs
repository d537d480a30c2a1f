use crate::{
    ast::{Expr, ExpressionTree},
    error::EvaluationError,
    util::num::i64_to_f64_checked,
};

/// Result type used by the evaluator and the series accumulator.
pub type EvalResult<T> = Result<T, EvaluationError>;

/// Binds the iterator to one value for the duration of an evaluation.
///
/// A context is cheap to create; the series accumulator makes one per index.
/// The tree is only ever borrowed immutably, so one tree can be evaluated
/// from many contexts.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    iterator: &'a str,
    index:    i64,
    value:    f64,
}

impl<'a> Context<'a> {
    /// Creates a context binding `iterator` to `index`.
    ///
    /// # Errors
    /// `IndexTooLarge` if `index` cannot be represented exactly as an `f64`.
    pub fn new(iterator: &'a str, index: i64) -> EvalResult<Self> {
        let value = i64_to_f64_checked(index, EvaluationError::IndexTooLarge { index })?;
        Ok(Self { iterator,
                  index,
                  value })
    }

    /// The iterator value bound by this context.
    #[must_use]
    pub const fn index(&self) -> i64 {
        self.index
    }

    /// Evaluates an expression bottom-up.
    ///
    /// Leaves yield the literal or the bound iterator value; every other node
    /// evaluates its operands first and then applies its operator or function.
    ///
    /// # Errors
    /// The first division by zero, domain violation or overflow encountered,
    /// or `UnknownVariable` for a variable other than the bound iterator.
    ///
    /// # Example
    /// ```
    /// use seriesview::{interpreter::evaluator::core::Context, parse_expression};
    ///
    /// let tree = parse_expression("n", "n^2").unwrap();
    /// assert_eq!(Context::new("n", 3).unwrap().eval(tree.root()).unwrap(), 9.0);
    /// assert_eq!(Context::new("n", 0).unwrap().eval(tree.root()).unwrap(), 0.0);
    /// ```
    pub fn eval(&self, expr: &Expr) -> EvalResult<f64> {
        match expr {
            Expr::Number { value } => Ok(*value),
            Expr::Variable { name } => self.eval_variable(name),
            Expr::Unary { op, operand, .. } => Ok(Self::eval_unary(*op, self.eval(operand)?)),
            Expr::Binary { left,
                           op,
                           right,
                           offset, } => {
                let l = self.eval(left)?;
                let r = self.eval(right)?;
                self.eval_binary(*op, l, r, *offset)
            },
            Expr::Call { function,
                         argument,
                         offset, } => self.eval_function(*function, self.eval(argument)?, *offset),
        }
    }

    fn eval_variable(&self, name: &str) -> EvalResult<f64> {
        if name == self.iterator {
            return Ok(self.value);
        }
        Err(EvaluationError::UnknownVariable { name:     name.to_string(),
                                               iterator: self.iterator.to_string(),
                                               index:    self.index, })
    }
}

/// Evaluates a tree at a single iterator value.
///
/// # Errors
/// See [`Context::new`] and [`Context::eval`].
pub fn evaluate(tree: &ExpressionTree, iterator: &str, index: i64) -> EvalResult<f64> {
    Context::new(iterator, index)?.eval(tree.root())
}
