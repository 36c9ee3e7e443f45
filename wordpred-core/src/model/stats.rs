use rust_decimal::{Decimal, MathematicalOps};

/// Dispersion of `values` around `total / count`, normalized by the mean.
///
/// Computes `Σ(value - mean)² / mean`. Dividing by the mean rather than the
/// number of values is part of the model's saved statistics and must stay.
/// Returns 0 when there is nothing to measure.
pub(super) fn dispersion<I>(values: I, total: u64, count: usize) -> Decimal
where
	I: IntoIterator<Item = u64>,
{
	if total == 0 || count == 0 {
		return Decimal::ZERO;
	}
	let mean = Decimal::from(total) / Decimal::from(count);
	let squared_deviations: Decimal = values
		.into_iter()
		.map(|value| {
			let deviation = Decimal::from(value) - mean;
			deviation * deviation
		})
		.sum();
	squared_deviations / mean
}

/// Square root of a non-negative dispersion, 0 otherwise.
pub(super) fn deviation(variance: Decimal) -> Decimal {
	variance.sqrt().unwrap_or(Decimal::ZERO)
}

/// `numerator / denominator`, 0 when the denominator is 0.
pub(super) fn ratio(numerator: u64, denominator: u64) -> Decimal {
	if denominator == 0 {
		return Decimal::ZERO;
	}
	Decimal::from(numerator) / Decimal::from(denominator)
}

/// Returns `true` if `fractions` sum to 1 within `tolerance`.
pub(super) fn sums_to_one<I>(fractions: I, tolerance: Decimal) -> (bool, Decimal)
where
	I: IntoIterator<Item = Decimal>,
{
	let sum: Decimal = fractions.into_iter().sum();
	((sum - Decimal::ONE).abs() <= tolerance, sum)
}

/// Formats `value` rounded to exactly `decimals` places.
pub(super) fn fixed(value: Decimal, decimals: u32) -> String {
	let mut rounded = value.round_dp(decimals);
	rounded.rescale(decimals);
	rounded.to_string()
}
