use crate::{ast::UnaryOperator, interpreter::evaluator::core::Context};

impl Context<'_> {
    /// Applies a unary operator to an evaluated operand.
    ///
    /// Negation cannot fail on a finite input, so this returns the value
    /// directly.
    ///
    /// ```
    /// use seriesview::{ast::UnaryOperator, interpreter::evaluator::core::Context};
    ///
    /// assert_eq!(Context::eval_unary(UnaryOperator::Negate, 2.5), -2.5);
    /// ```
    #[must_use]
    pub fn eval_unary(op: UnaryOperator, value: f64) -> f64 {
        match op {
            UnaryOperator::Negate => -value,
        }
    }
}
