use crate::net::rtt::{MIN_RTT_MS, PROBES_PER_HOP, sample, sample_default, sample_probes};
use rand::SeedableRng;
use rand::rngs::StdRng;

const EPS: f64 = 1e-9;

fn is_one_decimal(v: f64) -> bool {
    ((v * 10.0).round() - v * 10.0).abs() < 1e-6
}

#[test]
fn samples_stay_within_twenty_percent_of_baseline() {
    let mut rng = StdRng::seed_from_u64(42);
    for baseline in [1.0_f64, 5.0, 12.0, 25.0, 45.0, 100.0] {
        let lo = (0.8 * baseline).max(MIN_RTT_MS);
        let hi = 1.2 * baseline;
        for _ in 0..2000 {
            let v = sample(baseline, &mut rng);
            assert!(v >= lo - EPS && v <= hi + EPS, "baseline={baseline} v={v}");
            assert!(is_one_decimal(v), "not rounded to one decimal: {v}");
        }
    }
}

#[test]
fn fractional_baseline_rounds_at_most_half_a_step_outside() {
    let mut rng = StdRng::seed_from_u64(17);
    for baseline in [0.56_f64, 0.33, 2.75, 7.21] {
        let lo = (0.8 * baseline).max(MIN_RTT_MS) - 0.05;
        let hi = 1.2 * baseline + 0.05;
        for _ in 0..2000 {
            let v = sample(baseline, &mut rng);
            assert!(v >= lo - EPS && v <= hi + EPS, "baseline={baseline} v={v}");
            assert!(v >= MIN_RTT_MS);
            assert!(is_one_decimal(v), "not rounded to one decimal: {v}");
        }
    }
}

#[test]
fn destination_baseline_samples_within_bounds() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..500 {
        let probes = sample_probes(45.0, &mut rng);
        assert_eq!(probes.len(), PROBES_PER_HOP);
        for v in probes {
            assert!((36.0 - EPS..=54.0 + EPS).contains(&v), "v={v}");
        }
    }
}

#[test]
fn tiny_or_zero_baseline_is_floored() {
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..100 {
        assert_eq!(sample(0.01, &mut rng), MIN_RTT_MS);
        assert_eq!(sample(0.0, &mut rng), MIN_RTT_MS);
    }
}

#[test]
fn same_seed_gives_same_samples() {
    let mut a = StdRng::seed_from_u64(99);
    let mut b = StdRng::seed_from_u64(99);
    let xs: Vec<f64> = (0..20).map(|_| sample(25.0, &mut a)).collect();
    let ys: Vec<f64> = (0..20).map(|_| sample(25.0, &mut b)).collect();
    assert_eq!(xs, ys);
}

#[test]
fn jitter_actually_varies() {
    let mut rng = StdRng::seed_from_u64(3);
    let xs: Vec<f64> = (0..50).map(|_| sample(45.0, &mut rng)).collect();
    assert!(xs.iter().any(|v| (v - xs[0]).abs() > EPS));
}

#[test]
fn default_sampler_uses_same_bounds() {
    for _ in 0..200 {
        let v = sample_default(12.0);
        assert!((9.6 - EPS..=14.4 + EPS).contains(&v), "v={v}");
    }
}
