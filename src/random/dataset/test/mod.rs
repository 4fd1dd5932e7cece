use super::*;
use crate::math::inner_product::{inner_product_reference, sum_naive};
use crate::random::xoroshiro::Xoroshiro128PlusPlus;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn rng(seed: u64) -> Xoroshiro128PlusPlus {
    Xoroshiro128PlusPlus::seed_from_u64(seed)
}

fn exact_sum_of(values: &[f64]) -> f64 {
    let ones = vec![1.0; values.len()];
    inner_product_reference(values, &ones).unwrap()
}

fn sorted_bits(values: &[f64]) -> Vec<u64> {
    let mut bits: Vec<u64> = values.iter().map(|x| x.to_bits()).collect();
    bits.sort_unstable();
    bits
}

#[test]
fn test_lengths_match_request() {
    let mut r = rng(1);
    for profile in ConditioningProfile::ALL {
        let values = generate(profile, 1000, 10, &mut r).unwrap();
        assert_eq!(values.len(), 1000, "{profile}");
    }
    assert!(generate(ConditioningProfile::Random, 0, 10, &mut r)
        .unwrap()
        .is_empty());
}

#[test]
fn test_exponents_stay_in_band() {
    let mut r = rng(2);
    let spread = 40;
    let values = generate(ConditioningProfile::Random, 5000, spread, &mut r).unwrap();

    let lo = 2f64.powi(-(spread as i32 / 2));
    let hi = 2f64.powi(spread as i32 - spread as i32 / 2);
    for &x in &values {
        assert!(x.is_normal(), "{x:e}");
        assert!(x.abs() >= lo && x.abs() < hi, "{x:e} outside [{lo:e}, {hi:e})");
    }
}

#[test]
fn test_zero_spread_gives_unit_binade() {
    let mut r = rng(3);
    let values = generate(ConditioningProfile::Random, 500, 0, &mut r).unwrap();
    assert!(values.iter().all(|x| (1.0..2.0).contains(&x.abs())));
}

#[test]
fn test_spread_too_wide_is_rejected() {
    let mut r = rng(4);
    let err = generate(ConditioningProfile::Random, 10, MAX_EXPONENT_SPREAD + 1, &mut r);
    assert!(matches!(err, Err(Error::InvalidExponentSpread(_))));
    assert!(generate(ConditioningProfile::Random, 10, MAX_EXPONENT_SPREAD, &mut r).is_ok());
}

#[test]
fn test_well_conditioned_terms_share_one_sign() {
    let mut r = rng(5);
    let values = generate(ConditioningProfile::WellConditioned, 2000, 30, &mut r).unwrap();
    assert!(values.iter().all(|&x| x < 0.0));
}

#[test]
fn test_random_profile_mixes_signs() {
    let mut r = rng(6);
    let values = generate(ConditioningProfile::Random, 2000, 30, &mut r).unwrap();
    let negatives = values.iter().filter(|&&x| x < 0.0).count();
    assert!(negatives > 800 && negatives < 1200, "{negatives} negatives");
}

#[test]
fn test_exact_sum_zero_pairs_cancel() {
    let mut r = rng(7);
    let values = generate(ConditioningProfile::ExactSumZero, 4000, 100, &mut r).unwrap();

    assert_eq!(exact_sum_of(&values), 0.0);

    let negated: Vec<f64> = values.iter().map(|x| -x).collect();
    assert_eq!(sorted_bits(&values), sorted_bits(&negated));
    assert_eq!(
        ConditioningProfile::ExactSumZero.known_inner_product(values.len()),
        Some(0.0)
    );
    assert_eq!(ConditioningProfile::ExactSumZero.known_inner_product(3), None);
}

#[test]
fn test_anderson_is_centred() {
    let mut r = rng(8);
    let values =
        generate(ConditioningProfile::AndersonIllConditioned, 5000, 10, &mut r).unwrap();

    let magnitude: f64 = values.iter().map(|x| x.abs()).sum();
    let exact = exact_sum_of(&values);
    assert!(
        exact.abs() < 1e-10 * magnitude,
        "sum {exact:e} vs magnitude {magnitude:e}"
    );
}

#[test]
fn test_raw_sampler_patterns() {
    let mut r = rng(9);
    let mut sampler = RawSampler::new(&mut r, 20, SignPattern::MirroredPairs).unwrap();
    for _ in 0..100 {
        let first = sampler.sample();
        let second = sampler.sample();
        assert!(first < 0.0);
        assert_eq!(first, -second);
    }

    let mut sampler = RawSampler::new(&mut r, 20, SignPattern::Negative).unwrap();
    let mut out = [0.0; 64];
    sampler.fill(&mut out);
    assert!(out.iter().all(|&x| x < 0.0));
}

#[test]
fn test_field_masks_partition_the_word() {
    assert_eq!(SIGN_MASK | EXPONENT_MASK | MANTISSA_MASK, u64::MAX);
    assert_eq!(SIGN_MASK & EXPONENT_MASK, 0);
    assert_eq!(EXPONENT_MASK & MANTISSA_MASK, 0);
    assert_eq!(f64::from_bits(EXPONENT_BIAS << 52), 1.0);
}

#[test]
fn test_scramble_keeps_the_multiset() {
    let mut r = rng(10);
    let original: Vec<f64> = (0..257u32).map(f64::from).collect();
    let mut values = original.clone();
    scramble(&mut values, &mut r);

    assert_ne!(values, original);
    assert_eq!(sorted_bits(&values), sorted_bits(&original));

    let mut single = vec![42.0];
    scramble(&mut single, &mut r);
    assert_eq!(single, vec![42.0]);
}

#[test]
fn test_duplicate_appends_scaled_copy() {
    let mut values = vec![1.0, -2.0, 3.5];
    duplicate(&mut values, 2.0);
    assert_eq!(values, vec![1.0, -2.0, 3.5, 2.0, -4.0, 7.0]);

    let mut values = vec![0.25, 8.0];
    duplicate_negated(&mut values);
    assert_eq!(values, vec![0.25, 8.0, -0.25, -8.0]);
    assert_eq!(sum_naive(&values), 0.0);
}

#[test]
fn test_uniform_respects_magnitude() {
    let mut r = ChaCha8Rng::seed_from_u64(11);
    let values = generate_uniform(1000, 2f64.powi(30), &mut r).unwrap();
    assert!(values.iter().all(|x| x.abs() <= 2f64.powi(30)));

    assert!(matches!(
        generate_uniform(10, f64::MAX, &mut r),
        Err(Error::InvalidMagnitude(_))
    ));
    assert!(matches!(
        generate_uniform(10, f64::NAN, &mut r),
        Err(Error::InvalidMagnitude(_))
    ));
}

#[test]
fn test_mirrored_pair_has_zero_inner_product() {
    let mut r = ChaCha8Rng::seed_from_u64(12);
    let pair = generate_pair(ConditioningProfile::MersenneMirrored, 2000, 50, &mut r).unwrap();

    assert_eq!(pair.v.len(), 2000);
    assert_eq!(pair.w.len(), 2000);
    assert_eq!(pair.v[..1000], pair.v[1000..]);
    assert_eq!(inner_product_reference(&pair.v, &pair.w).unwrap(), 0.0);

    let odd = generate_pair(ConditioningProfile::MersenneMirrored, 11, 5, &mut r).unwrap();
    assert_eq!(odd.len(), 10);
}

#[test]
fn test_mirrored_single_vector_sums_to_zero() {
    let mut r = ChaCha8Rng::seed_from_u64(13);
    let values = generate(ConditioningProfile::MersenneMirrored, 600, 20, &mut r).unwrap();
    assert_eq!(values.len(), 600);
    assert_eq!(exact_sum_of(&values), 0.0);
}

#[test]
fn test_bit_profiles_pair_with_ones() {
    let mut r = rng(14);
    let pair = generate_pair(ConditioningProfile::Random, 300, 10, &mut r).unwrap();
    assert_eq!(pair.len(), 300);
    assert!(pair.w.iter().all(|&x| x == 1.0));
}

#[test]
fn test_seeded_generator_is_reproducible() {
    for profile in ConditioningProfile::ALL {
        let a = DataGenerator::seeded(99).pair(profile, 500, 30).unwrap();
        let b = DataGenerator::seeded(99).pair(profile, 500, 30).unwrap();
        let c = DataGenerator::seeded(100).pair(profile, 500, 30).unwrap();
        assert_eq!(a, b, "{profile}");
        assert_ne!(a, c, "{profile}");
    }
}

#[test]
fn test_profile_names_round_trip() {
    for profile in ConditioningProfile::ALL {
        let parsed: ConditioningProfile = profile.to_string().parse().unwrap();
        assert_eq!(parsed, profile);
    }
    assert_eq!(
        " Anderson ".parse::<ConditioningProfile>().unwrap(),
        ConditioningProfile::AndersonIllConditioned
    );
    assert!(matches!(
        "gaussian".parse::<ConditioningProfile>(),
        Err(Error::UnknownProfile(_))
    ));
}
