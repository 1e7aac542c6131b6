// Differential validation of the analytic dividend-European engine: every
// analytic Greek must agree with its central finite-difference estimate across
// the reference parameter grid, and degenerate (near-zero NPV) cells must be
// skipped rather than compared.

use chrono::NaiveDate;
use divgreeks::core::{GreekKind, OptionType, PricingEngine};
use divgreeks::engines::analytic::AnalyticDividendEuropeanEngine;
use divgreeks::instruments::DividendVanillaOption;
use divgreeks::market::{DividendSchedule, Market};
use divgreeks::rates::{add_months, add_years};
use divgreeks::validation::grid::{GridConfig, GridRunner};
use divgreeks::validation::{relative_error, FiniteDifferenceValidator};

fn valuation() -> NaiveDate {
    NaiveDate::from_ymd_opt(2004, 5, 17).unwrap()
}

/// The concrete reference scenario: S=100, K=100, q=0.10, r=0.05, v=0.20,
/// one year to maturity, 5.0 paid at +3 months and +9 months.
fn reference_setup(option_type: OptionType) -> (DividendVanillaOption, Market) {
    let maturity = add_years(valuation(), 1);
    let dividends = DividendSchedule::semiannual(valuation(), maturity, 5.0).unwrap();
    assert_eq!(dividends.len(), 2);
    assert_eq!(dividends.events()[0].ex_date, add_months(valuation(), 3));
    assert_eq!(dividends.events()[1].ex_date, add_months(valuation(), 9));

    let option = DividendVanillaOption {
        option_type,
        strike: 100.0,
        maturity,
        exercise: divgreeks::core::ExerciseStyle::European,
        dividends,
    };
    let market = Market::builder()
        .valuation_date(valuation())
        .spot(100.0)
        .rate(0.05)
        .dividend_yield(0.10)
        .flat_vol(0.20)
        .build()
        .unwrap();
    (option, market)
}

#[test]
fn full_default_grid_has_no_violations() {
    let report = GridRunner::new(GridConfig::default()).run(valuation());

    for violation in &report.violations {
        eprintln!("{violation}");
    }
    assert!(report.is_clean(), "{report}");
    assert!(report.evaluated > 0);
    // The low-vol deep out-of-the-money cells must have been skipped.
    assert!(report.skipped > 0);
    assert_eq!(
        report.evaluated + report.skipped,
        2 * 5 * 2 * 3 * 3 * 3,
        "every grid combination is either evaluated or skipped"
    );
}

#[test]
fn reference_call_matches_finite_differences() {
    let (option, market) = reference_setup(OptionType::Call);
    let engine = AnalyticDividendEuropeanEngine::new();

    let result = engine.price(&option, &market).unwrap();
    assert!(result.price > market.spot * 1.0e-5);

    // Default relative bumps reproduce the reference absolute steps:
    // dS = 0.01, dr = 5e-6, dv = 2e-5, one-day shift for theta.
    let expected = FiniteDifferenceValidator::new()
        .expected_greeks(&engine, &option, &market)
        .unwrap();
    let calculated = result.greeks.unwrap();

    for kind in GreekKind::ALL {
        let error = relative_error(kind.pick(&expected), kind.pick(&calculated), market.spot);
        assert!(
            error <= 1.0e-5,
            "{kind}: expected {}, calculated {}, error {error:e}",
            kind.pick(&expected),
            kind.pick(&calculated)
        );
    }
}

#[test]
fn reference_put_matches_finite_differences_and_bounds_delta() {
    let (option, market) = reference_setup(OptionType::Put);
    let engine = AnalyticDividendEuropeanEngine::new();

    let result = engine.price(&option, &market).unwrap();
    let calculated = result.greeks.unwrap();
    assert!(
        (-1.0..=0.0).contains(&calculated.delta),
        "put delta {} outside [-1, 0]",
        calculated.delta
    );

    let expected = FiniteDifferenceValidator::new()
        .expected_greeks(&engine, &option, &market)
        .unwrap();
    for kind in GreekKind::ALL {
        let error = relative_error(kind.pick(&expected), kind.pick(&calculated), market.spot);
        assert!(error <= 1.0e-5, "{kind}: error {error:e}");
    }
}

#[test]
fn deep_out_of_the_money_low_vol_is_skipped_not_failed() {
    let config = GridConfig {
        option_types: vec![OptionType::Call],
        strikes: vec![150.0],
        maturities_years: vec![1],
        underlyings: vec![100.0],
        dividend_yields: vec![0.10],
        rates: vec![0.01],
        vols: vec![0.05],
        ..GridConfig::default()
    };

    let report = GridRunner::new(config).run(valuation());
    assert_eq!(report.skipped, 1);
    assert_eq!(report.evaluated, 0);
    assert!(report.violations.is_empty());
    assert!(report.errors.is_empty());
}

#[test]
fn contract_is_reused_across_market_snapshots() {
    // One contract per (type, strike, maturity); every spot/yield/rate/vol
    // combination prices the same contract under a fresh snapshot.
    let maturity = add_years(valuation(), 2);
    let dividends = DividendSchedule::semiannual(valuation(), maturity, 5.0).unwrap();
    let option = DividendVanillaOption::european_call(100.0, maturity, dividends);
    let engine = AnalyticDividendEuropeanEngine::new();

    let mut last_price = None;
    for &rate in &[0.01, 0.05, 0.15] {
        for &vol in &[0.05, 0.20, 0.70] {
            let market = Market::builder()
                .valuation_date(valuation())
                .spot(100.0)
                .rate(rate)
                .dividend_yield(0.0)
                .flat_vol(vol)
                .build()
                .unwrap();
            let price = engine.price(&option, &market).unwrap().price;
            assert!(price.is_finite() && price >= 0.0);
            last_price = Some(price);
        }
    }
    assert!(last_price.is_some());
}
