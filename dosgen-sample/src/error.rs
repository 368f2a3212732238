use miette::Diagnostic;
use rust_decimal::Decimal;

#[derive(thiserror::Error, Debug, Diagnostic)]
/// Errors raised while building a sample or placing dots on it
pub enum PlacementError {
    #[error("sample dimensions must be positive; got {width} x {height} nm")]
    #[diagnostic(code(dosgen_sample::sample))]
    Sample { width: Decimal, height: Decimal },
    #[error("invalid size distribution: {0}")]
    #[diagnostic(code(dosgen_sample::distribution))]
    Distribution(String),
    #[error("no free position found after {attempts} attempts, {placed} dots were placed")]
    #[diagnostic(
        code(dosgen_sample::crowded),
        help("reduce the number of dots or enlarge the sample")
    )]
    Crowded { placed: usize, attempts: usize },
    #[error("{0} cannot be represented as a decimal")]
    NonFinite(f64),
}
