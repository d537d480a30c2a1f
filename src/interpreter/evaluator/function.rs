use crate::{
    ast::Function,
    error::EvaluationError,
    interpreter::evaluator::core::{Context, EvalResult},
};

type Domain = fn(f64) -> bool;
type Apply = fn(f64) -> f64;

/// Domain test and implementation of each builtin.
///
/// The match is exhaustive, so a new [`Function`] variant cannot be parsed
/// without also being evaluated.
fn definition(function: Function) -> (Domain, Apply) {
    match function {
        Function::Sqrt => (|x: f64| x >= 0.0, f64::sqrt),
        Function::Sin => (|_: f64| true, f64::sin),
        Function::Cos => (|_: f64| true, f64::cos),
        Function::Tan => (|_: f64| true, f64::tan),
        Function::Ln => (|x: f64| x > 0.0, f64::ln),
        Function::Log => (|x: f64| x > 0.0, f64::log10),
    }
}

impl Context<'_> {
    /// Applies a builtin function to an evaluated argument.
    ///
    /// `sqrt` needs a non-negative argument, `ln` and `log` (base 10) a
    /// positive one; the trigonometric functions accept any finite value.
    ///
    /// # Errors
    /// `Domain` for an argument outside the function's domain, `Overflow` for
    /// a non-finite result.
    ///
    /// # Example
    /// ```
    /// use seriesview::{ast::Function, interpreter::evaluator::core::Context};
    ///
    /// let context = Context::new("n", 0).unwrap();
    /// assert_eq!(context.eval_function(Function::Sqrt, 9.0, 0).unwrap(), 3.0);
    /// assert_eq!(context.eval_function(Function::Log, 1000.0, 0).unwrap(), 3.0);
    /// assert!(context.eval_function(Function::Ln, 0.0, 0).is_err());
    /// ```
    pub fn eval_function(&self, function: Function, argument: f64, offset: usize) -> EvalResult<f64> {
        let (in_domain, apply) = definition(function);

        if !in_domain(argument) {
            return Err(EvaluationError::Domain { index: self.index(),
                                                 operation: function.to_string(),
                                                 argument,
                                                 offset });
        }

        let result = apply(argument);
        if !result.is_finite() {
            return Err(EvaluationError::Overflow { index: self.index(),
                                                   operation: function.to_string(),
                                                   offset });
        }
        Ok(result)
    }
}
