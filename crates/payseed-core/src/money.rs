use serde::Serializer;

/// Semi-monthly pay periods per year; gross pay is salary over this.
pub const PAY_PERIODS_PER_YEAR: f64 = 24.0;
/// Share of gross pay withheld as deductions.
pub const DEDUCTION_RATE: f64 = 0.2;

/// Largest magnitude below which every whole `f64` is an exact integer.
const MAX_EXACT_WHOLE: f64 = 9_007_199_254_740_992.0;

/// Round to two decimal places (cents).
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Serialize whole amounts as JSON integers (`500`, not `500.0`).
///
/// Salaries and order amounts are whole by construction and are written as
/// integers; fractional amounts keep their float form.
pub fn serialize_whole<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if value.fract() == 0.0 && value.abs() < MAX_EXACT_WHOLE {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(serde::Serialize)]
    struct Amount(#[serde(serialize_with = "serialize_whole")] f64);

    #[test]
    fn rounds_to_cents() {
        assert_eq!(round_cents(80_000.0 / 24.0), 3333.33);
        assert_eq!(round_cents(3333.33 * 0.2), 666.67);
        assert_eq!(round_cents(3333.33 - 666.67), 2666.66);
    }

    #[test]
    fn whole_amounts_serialize_as_integers() {
        let json = |value| serde_json::to_string(&Amount(value)).expect("serialize amount");
        assert_eq!(json(80_000.0), "80000");
        assert_eq!(json(500.0), "500");
        assert_eq!(json(2666.66), "2666.66");
        assert_eq!(json(-0.5), "-0.5");
    }
}
