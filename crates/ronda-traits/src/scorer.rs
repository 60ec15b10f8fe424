//! Scorer trait for the independent analysis stages.
//!
//! The forensic scorer, the pattern detector and the news scorer all share
//! the same shape: an immutable configuration captured at construction, a
//! borrowed input, and a best-effort report as output. None of them performs
//! I/O or holds mutable state, so they can run in any order or in parallel.

/// An analysis stage that turns an input into a report.
///
/// Implementations should be thread-safe (`Send + Sync`) and deterministic:
/// scoring the same input twice must produce equal reports.
///
/// `score` is infallible by contract. Missing or degenerate inputs are
/// expressed inside the report as unavailable sub-results rather than as an
/// error for the whole stage.
///
/// # Example
///
/// ```
/// use ronda_traits::Scorer;
///
/// struct HeadlineCounter;
///
/// impl Scorer for HeadlineCounter {
///     type Input<'a> = [String];
///     type Report = usize;
///
///     fn name(&self) -> &str {
///         "headline_counter"
///     }
///
///     fn score(&self, input: &[String]) -> usize {
///         input.len()
///     }
/// }
///
/// let headlines = vec!["a".to_string(), "b".to_string()];
/// assert_eq!(HeadlineCounter.score(&headlines), 2);
/// ```
pub trait Scorer: Send + Sync {
    /// The borrowed input this stage consumes.
    ///
    /// The lifetime lets inputs that bundle several borrowed slices be
    /// expressed as small view structs.
    type Input<'a>: ?Sized;

    /// The report this stage produces.
    type Report;

    /// Returns the name of this stage, used in logs and reports.
    fn name(&self) -> &str;

    /// Score the input.
    fn score(&self, input: &Self::Input<'_>) -> Self::Report;
}
