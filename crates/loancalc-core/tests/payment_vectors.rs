//! Payment formula vector tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use loancalc_core::payment::calculate;

use vector_loader::load;

#[test]
fn payment_vectors() {
    let files = [
        "payment_thirty_year.json",
        "payment_zero_rate.json",
        "payment_zero_principal.json",
        "payment_one_year.json",
        "payment_tiny_rate.json",
        "payment_zero_years.json",
        "payment_negative_rate.json",
        "payment_negative_amount.json",
    ];

    for f in files {
        let v = load(f);
        let res = calculate(v.input.amount, v.input.rate, v.input.years);

        if let Some(err) = v.expect_error {
            let e = res.expect_err("expected error");
            assert_eq!(e.client_code().as_str(), err.code, "vector={}", v.description);
            continue;
        }

        let payment = res.expect("expected payment");
        let ex = v.expect.expect("missing expect block");
        let want = ex["payment"].as_f64().unwrap();

        assert!(
            (payment - want).abs() < 0.005,
            "vector={} got={} want={}",
            v.description,
            payment,
            want
        );
    }
}

#[test]
fn payment_never_exceeds_principal_for_multi_year_terms() {
    for rate in [0.0, 0.5, 3.25, 7.0, 19.99] {
        let p = calculate(50_000.0, rate, 5).unwrap();
        assert!(p > 0.0 && p < 50_000.0, "rate={rate} payment={p}");
    }
}

#[test]
fn crate_root_reexports_error_types() {
    use loancalc_core::{LoanCalcError, Result};

    let res: Result<f64> = calculate(1_000.0, -1.0, 10);
    assert!(matches!(res, Err(LoanCalcError::InvalidInput(_))));
}
