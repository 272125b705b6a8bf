use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Average days per year, including leap years.
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Conversion factor: millions -> trillions.
///
/// Record net worth is carried in millions of dollars (the unit of the
/// source list); dashboard figures are expressed in trillions.
pub const MILLIONS_PER_TRILLION: Decimal = dec!(1_000_000);

/// Conversion factor: millions -> billions.
pub const MILLIONS_PER_BILLION: Decimal = dec!(1_000);

/// Net worth threshold (in millions) for the billionaire cohort.
pub const BILLIONAIRE_THRESHOLD_MILLIONS: Decimal = dec!(1_000);

/// Decimal precision for aggregate calculations.
pub const DECIMAL_PRECISION: u32 = 6;

/// Number of sample points on a rendered trend line.
pub const TREND_LINE_POINTS: usize = 100;
