use std::fmt;

use crate::interpreter::series::{EndIndex, Series};

/// A finished series together with the request that produced it, ready to be
/// shown to a user.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// The iterator name.
    pub iterator:   String,
    /// First index.
    pub start:      i64,
    /// Last index or the convergence sentinel.
    pub end:        EndIndex,
    /// The normalized expression.
    pub expression: String,
    /// The accumulated partial sums.
    pub series:     Series,
}

impl Report {
    /// A one-line title in summation notation.
    ///
    /// ```
    /// use seriesview::{interpreter::series::EndIndex, report::Report, seriesview};
    ///
    /// let series = seriesview("n", 0, 3, "n^2").unwrap();
    /// let report = Report { iterator: "n".into(),
    ///                       start: 0,
    ///                       end: EndIndex::Finite(3),
    ///                       expression: "n^2".into(),
    ///                       series };
    /// assert_eq!(report.title(), "Series Visualization of sum_{n=0}^{3} n^2");
    /// ```
    #[must_use]
    pub fn title(&self) -> String {
        format!("Series Visualization of sum_{{{}={}}}^{{{}}} {}",
                self.iterator, self.start, self.end, self.expression)
    }
}

/// Prints the title followed by an index / partial sum table.
impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title())?;

        let width = self.series
                        .indices()
                        .iter()
                        .map(|i| i.to_string().len())
                        .chain(std::iter::once(self.iterator.len()))
                        .max()
                        .unwrap_or(1);

        writeln!(f, "{:>width$}  partial sum", self.iterator)?;
        for (index, sum) in self.series.iter() {
            writeln!(f, "{index:>width$}  {sum}")?;
        }

        if self.end == EndIndex::Converge
           && let Some((last, sum)) = self.series.last()
        {
            writeln!(f,
                     "converged to {sum} after {} terms (last index {last})",
                     self.series.len())?;
        }
        Ok(())
    }
}
