//! Integration tests for the pair processor
//!
//! Covers pair counts, collisions, numeric results, blocking completion and
//! result-set determinism across worker configurations.

use bigdecimal::BigDecimal;
use fx_crossrates::prelude::*;
use std::collections::BTreeSet;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

fn usd(target: &str, value: &str) -> Rate {
    Rate::parse("USD", target, value).unwrap()
}

fn dec(s: &str) -> BigDecimal {
    BigDecimal::from_str(s).unwrap()
}

fn triples(rates: &RateCollection) -> BTreeSet<(String, String, String)> {
    rates
        .all_exchange_rates()
        .iter()
        .map(|r| {
            (
                r.base_currency().to_string(),
                r.target_currency().to_string(),
                r.rate().to_string(),
            )
        })
        .collect()
}

fn seeded_rates(count: usize, seed: u64) -> RateCollection {
    RateGenerator::new(GeneratorConfig {
        count,
        seed: Some(seed),
        ..GeneratorConfig::default()
    })
    .unwrap()
    .fetch_rates()
    .unwrap()
}

#[test]
fn test_distinct_targets_give_n_squared_pairs() {
    let base = seeded_rates(40, 9);
    let pairs = PairProcessor::default().calculate_pairs(&base).unwrap();
    assert_eq!(pairs.len(), 40 * 40);
}

#[test]
fn test_shared_target_collapses_pairs() {
    // Two inputs quote the same target from different bases
    let base = RateCollection::from_rates(vec![
        usd("EUR", "0.9"),
        Rate::parse("GBP", "EUR", "1.15").unwrap(),
        usd("JPY", "150"),
    ]);
    assert_eq!(base.len(), 3);

    let pairs = PairProcessor::default().calculate_pairs(&base).unwrap();
    // distinct targets {EUR, JPY} -> 2 x 2 keys
    assert!(pairs.len() < 9);
    assert_eq!(pairs.len(), 4);

    let eur_jpy = pairs.get_exchange_rate_by_code("EUR", "JPY").unwrap().unwrap();
    let candidates = [dec("0.0060000000"), dec("0.0076666667")];
    assert!(candidates.contains(eur_jpy.rate()));
}

#[test]
fn test_self_pairs_are_one() {
    let base = seeded_rates(25, 4);
    let pairs = PairProcessor::default().calculate_pairs(&base).unwrap();

    for rate in base.all_exchange_rates() {
        let code = rate.target_currency();
        let own = pairs.get_exchange_rate(code, code).unwrap();
        assert_eq!(own.rate(), &dec("1"));
        assert_eq!(own.rate().to_string(), "1.0000000000");
    }
}

#[test]
fn test_numeric_correctness() {
    let base = RateCollection::from_rates(vec![usd("XXA", "2.0000000000"), usd("YYB", "4.0000000000")]);
    let pairs = PairProcessor::default().calculate_pairs(&base).unwrap();

    let x_y = pairs.get_exchange_rate_by_code("XXA", "YYB").unwrap().unwrap();
    let y_x = pairs.get_exchange_rate_by_code("YYB", "XXA").unwrap().unwrap();
    assert_eq!(x_y.rate().to_string(), "0.5000000000");
    assert_eq!(y_x.rate().to_string(), "2.0000000000");
}

#[test]
fn test_derived_keys_use_targets() {
    let base = RateCollection::from_rates(vec![usd("EUR", "0.92"), usd("GBP", "0.79")]);
    let pairs = PairProcessor::default().calculate_pairs(&base).unwrap();

    assert!(pairs.get_exchange_rate_by_code("USD", "EUR").unwrap().is_none());
    let eur_gbp = pairs.get_exchange_rate_by_code("EUR", "GBP").unwrap().unwrap();
    assert_eq!(eur_gbp.rate(), &dec("1.1645569620"));
}

#[test]
fn test_result_set_is_deterministic() {
    let base = seeded_rates(30, 21);

    let first = PairProcessor::default().calculate_pairs(&base).unwrap();
    let second = PairProcessor::default().calculate_pairs(&base).unwrap();
    assert_eq!(triples(&first), triples(&second));
}

#[test]
fn test_single_worker_matches_global_pool() {
    let base = seeded_rates(30, 5);

    let sequential = PairProcessor::new(ProcessorConfig {
        threads: Some(1),
        ..ProcessorConfig::default()
    })
    .unwrap();

    let parallel = PairProcessor::default().calculate_pairs(&base).unwrap();
    let serial = sequential.calculate_pairs(&base).unwrap();
    assert_eq!(triples(&parallel), triples(&serial));
}

#[test]
fn test_output_grows_monotonically_until_return() {
    let rates = seeded_rates(120, 13).all_exchange_rates();
    let expected = rates.len() * rates.len();
    let output = RateCollection::new();
    let done = AtomicBool::new(false);
    let processor = PairProcessor::new(ProcessorConfig {
        threads: Some(2),
        ..ProcessorConfig::default()
    })
    .unwrap();

    thread::scope(|scope| {
        let observer = scope.spawn(|| {
            let mut last = 0;
            while !done.load(Ordering::Acquire) {
                let size = output.len();
                assert!(size >= last, "size went backwards: {} -> {}", last, size);
                assert!(size <= expected);
                last = size;
            }
            last
        });

        processor
            .calculate_pairs_into(&rates, &output, &CancellationToken::new())
            .unwrap();
        // every unit has inserted by the time the call returns
        assert_eq!(output.len(), expected);
        done.store(true, Ordering::Release);

        let observed = observer.join().unwrap();
        assert!(observed <= expected);
    });
}

#[test]
fn test_cancellation_returns_no_collection() {
    let base = seeded_rates(10, 2);
    let token = CancellationToken::new();
    token.cancel();

    let err = PairProcessor::default()
        .calculate_pairs_with_cancel(&base, &token)
        .unwrap_err();
    assert!(matches!(err, FxError::Cancelled(_)));
}

#[test]
fn test_timestamps_are_stamped_at_computation() {
    let base = RateCollection::from_rates(vec![
        Rate::with_timestamp(CurrencyCode::USD, CurrencyCode::new("EUR").unwrap(), dec("0.9"), 0).unwrap(),
    ]);
    let pairs = PairProcessor::default().calculate_pairs(&base).unwrap();

    let eur = pairs.get_exchange_rate_by_code("EUR", "EUR").unwrap().unwrap();
    assert!(eur.timestamp() > 0);
}

#[test]
fn test_deadline_leaves_caller_token_usable() {
    let base = RateCollection::from_rates(vec![usd("EUR", "0.9")]);
    let caller = CancellationToken::new();

    let expired = PairProcessor::new(ProcessorConfig {
        deadline: Some(std::time::Duration::ZERO),
        ..ProcessorConfig::default()
    })
    .unwrap();
    let err = expired.calculate_pairs_with_cancel(&base, &caller).unwrap_err();
    assert!(err.is_cancelled());
    assert!(!caller.is_cancelled());

    // the same token still drives a later run to completion
    let pairs = PairProcessor::default()
        .calculate_pairs_with_cancel(&base, &caller)
        .unwrap();
    assert_eq!(pairs.len(), 1);
}

#[test]
fn test_failing_unit_fails_whole_call() {
    // AAA/BBB = 1e-10 / 1e5 rounds to zero at scale 10, which no Rate may hold
    let base = RateCollection::from_rates(vec![usd("AAA", "0.0000000001"), usd("BBB", "100000")]);

    let result = PairProcessor::default().calculate_pairs(&base);
    match result {
        Err(FxError::TaskFailed { base, target, source }) => {
            assert_eq!(base, "AAA");
            assert_eq!(target, "BBB");
            assert!(matches!(*source, FxError::Validation(_)));
        }
        other => panic!("expected TaskFailed, got {:?}", other.map(|pairs| pairs.len())),
    }
}

#[test]
fn test_failing_unit_on_single_worker() {
    let base = RateCollection::from_rates(vec![usd("AAA", "0.0000000001"), usd("BBB", "100000")]);
    let sequential = PairProcessor::new(ProcessorConfig {
        threads: Some(1),
        ..ProcessorConfig::default()
    })
    .unwrap();

    let err = sequential.calculate_pairs(&base).unwrap_err();
    assert!(matches!(err, FxError::TaskFailed { .. }));
    assert!(!err.is_cancelled());
    assert!(err.to_string().contains("AAA/BBB"));
}
