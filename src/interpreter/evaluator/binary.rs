use crate::{
    ast::BinaryOperator,
    error::EvaluationError,
    interpreter::evaluator::core::{Context, EvalResult},
    util::num::is_integral,
};

impl Context<'_> {
    /// Applies a binary operator to two evaluated operands.
    ///
    /// `+`, `-` and `*` apply directly. `/` rejects a zero divisor. `^` is
    /// real exponentiation: a negative base needs an integral exponent, and
    /// zero cannot be raised to a negative power. Any non-finite result is
    /// reported as an overflow.
    ///
    /// # Parameters
    /// - `op`: The operator.
    /// - `left`, `right`: The evaluated operands.
    /// - `offset`: Byte offset of the operator, for error reporting.
    ///
    /// # Example
    /// ```
    /// use seriesview::{
    ///     ast::BinaryOperator,
    ///     error::EvaluationError,
    ///     interpreter::evaluator::core::Context,
    /// };
    ///
    /// let context = Context::new("n", 4).unwrap();
    /// assert_eq!(context.eval_binary(BinaryOperator::Pow, 2.0, 10.0, 1).unwrap(), 1024.0);
    ///
    /// let err = context.eval_binary(BinaryOperator::Div, 1.0, 0.0, 1).unwrap_err();
    /// assert!(matches!(err, EvaluationError::DivisionByZero { index: 4, .. }));
    /// ```
    pub fn eval_binary(&self,
                       op: BinaryOperator,
                       left: f64,
                       right: f64,
                       offset: usize)
                       -> EvalResult<f64> {
        let result = match op {
            BinaryOperator::Add => left + right,
            BinaryOperator::Sub => left - right,
            BinaryOperator::Mul => left * right,
            BinaryOperator::Div => {
                if right == 0.0 {
                    return Err(self.division_by_zero(op, offset));
                }
                left / right
            },
            BinaryOperator::Pow => self.eval_pow(left, right, offset)?,
        };

        if !result.is_finite() {
            return Err(EvaluationError::Overflow { index: self.index(),
                                                   operation: op.to_string(),
                                                   offset });
        }
        Ok(result)
    }

    fn eval_pow(&self, base: f64, exponent: f64, offset: usize) -> EvalResult<f64> {
        if base < 0.0 && !is_integral(exponent) {
            return Err(EvaluationError::Domain { index: self.index(),
                                                 operation: format!("{base} ^ {exponent}"),
                                                 argument: base,
                                                 offset });
        }
        if base == 0.0 && exponent < 0.0 {
            return Err(self.division_by_zero(BinaryOperator::Pow, offset));
        }
        Ok(base.powf(exponent))
    }

    fn division_by_zero(&self, op: BinaryOperator, offset: usize) -> EvaluationError {
        EvaluationError::DivisionByZero { index: self.index(),
                                          operator: op.symbol(),
                                          offset }
    }
}
