/// Asserts that two `f64` values lie within `$tolerance` of each other. An optional format
/// string and arguments are appended to the panic message.
#[macro_export]
macro_rules! assert_almost_eq {
    ($left:expr, $right:expr, $tolerance:expr $(,)?) => {
        $crate::assert_almost_eq!($left, $right, $tolerance, "values differ")
    };
    ($left:expr, $right:expr, $tolerance:expr, $($message:tt)+) => {{
        let (left, right, tolerance): (f64, f64, f64) = ($left, $right, $tolerance);
        if !$crate::numeric::almost_eq(left, right, tolerance) {
            panic!(
                "{}: |{} - {}| exceeds {:e}",
                format_args!($($message)+),
                left,
                right,
                tolerance
            );
        }
    }};
}
