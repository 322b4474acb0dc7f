/// A macro to measure the evaluation time of an expression. Wraps an
/// expression, logs how long it took, and evaluates to the value of the
/// expression.
#[macro_export]
macro_rules! timed {
    ($label:expr, $ex:expr) => {
        $crate::timed!($label, log::Level::Debug, $ex)
    };
    ($label:expr, $log_level:expr, $ex:expr) => {{
        let now = std::time::Instant::now();
        let value = $ex;
        let elapsed = now.elapsed();
        log::log!($log_level, "{} took {} ms", $label, elapsed.as_millis());
        value
    }};
}

/// Fractional part of a value, always in `[0, 1)`, even for negative input.
/// This is NOT the same as [f64::fract], which keeps the sign.
pub fn frac(value: f64) -> f64 {
    value - value.floor()
}

/// Round to the nearest integer, with halves going **up** (towards positive
/// infinity). [f64::round] rounds halves away from zero, which would pick a
/// different column for negative screen positions.
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}
