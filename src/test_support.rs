use rust_decimal::Decimal;

#[track_caller]
pub fn assert_close(actual: Decimal, expected: Decimal, tol: Decimal) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tol,
        "expected {expected} +/- {tol}, got {actual} (diff {diff})"
    );
}
