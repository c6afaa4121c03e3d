//! Cross-component tests for the per-band coder
//!
//! Everything here exercises encoder and decoder together over shared
//! bitstreams: pulse-search/synthesis symmetry, predictor parity, and the
//! end-to-end band flow (predict, quantize, reconstruct).

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::bitstream::{BitReader, BitWriter};
use crate::math::{coef_from_f32, coef_to_f32, Coef, COEF_ZERO};
use crate::prediction::{predict, reconstruct, spectral_fold};
use crate::quantizer::codeword::{decode_pulses, encode_pulses};
use crate::quantizer::{pulse_search, pulse_synthesis};

#[cfg(not(feature = "fixed-point"))]
const ENERGY_TOL: f32 = 1e-4;
#[cfg(feature = "fixed-point")]
const ENERGY_TOL: f32 = 2e-2;

fn energy_f32(x: &[Coef]) -> f32 {
    x.iter().map(|&v| coef_to_f32(v).powi(2)).sum()
}

/// Random direction with the requested L2 norm
fn random_vector(rng: &mut StdRng, n: usize, norm: f32) -> Vec<Coef> {
    let raw: Vec<f32> = (0..n).map(|_| rng.gen_range(-1.0f32..1.0)).collect();
    let e: f32 = raw.iter().map(|v| v * v).sum::<f32>().sqrt().max(1e-9);
    raw.iter().map(|&v| coef_from_f32(v * norm / e)).collect()
}

#[test]
fn test_encoder_decoder_symmetry_sweep() {
    let mut rng = StdRng::seed_from_u64(0x5eed_cafe);
    for n in 1..=20usize {
        for k in [1u32, 2, 3, 5, 8, 13, 21, 34, 47, 64] {
            let p = random_vector(&mut rng, n, 0.7);
            let mut x_enc = random_vector(&mut rng, n, 1.0);

            let mut w = BitWriter::new();
            let iy_enc = pulse_search(&mut x_enc, &p, k, &mut w).unwrap();
            let total: u32 = iy_enc.iter().map(|v| v.unsigned_abs()).sum();
            assert_eq!(total, k, "pulse count n={} k={}", n, k);
            let bytes = w.finish();

            let mut x_dec = vec![COEF_ZERO; n];
            let mut r = BitReader::new(&bytes);
            let iy_dec = pulse_synthesis(&mut x_dec, &p, k, &mut r).unwrap();

            assert_eq!(iy_dec, iy_enc, "pulse vectors n={} k={}", n, k);
            assert_eq!(x_dec, x_enc, "reconstruction n={} k={}", n, k);
            assert!(
                (energy_f32(&x_enc) - 1.0).abs() < ENERGY_TOL,
                "energy n={} k={} e={}",
                n,
                k,
                energy_f32(&x_enc)
            );
        }
    }
}

#[test]
fn test_predictor_parity_sweep() {
    let mut rng = StdRng::seed_from_u64(0xbead_5eed);
    for n in [1usize, 2, 4, 7, 12, 20] {
        for k in [0u32, 1, 4, 11, 30] {
            let n0 = n + 3 + rng.gen_range(0..60usize);
            let y = random_vector(&mut rng, n0, 0.9);
            let mut x_enc = random_vector(&mut rng, n, 1.0);

            let mut p_enc = vec![COEF_ZERO; n];
            let mut w = BitWriter::new();
            let lag_enc = predict(&mut x_enc, &y, &mut p_enc, 1, k, &mut w).unwrap();
            let bytes = w.finish();

            let mut x_dec = vec![COEF_ZERO; n];
            let mut p_dec = vec![COEF_ZERO; n];
            let mut r = BitReader::new(&bytes);
            let lag_dec = reconstruct(&mut x_dec, &y, &mut p_dec, 1, k, &mut r).unwrap();

            assert_eq!(lag_dec, lag_enc, "lag n={} k={} n0={}", n, k, n0);
            assert_eq!(p_dec, p_enc, "prediction n={} k={} n0={}", n, k, n0);
            if k == 0 {
                assert_eq!(x_dec, x_enc, "k=0 substitution n={} n0={}", n, n0);
            }
        }
    }
}

#[test]
fn test_full_band_flow() {
    // Predict from history, quantize the residual, then reconstruct the
    // band from the bitstream alone; both sides must agree exactly.
    let mut rng = StdRng::seed_from_u64(77);
    for &(n, k) in &[(4usize, 2u32), (8, 6), (16, 20), (20, 64)] {
        let n0 = n + 24;
        let y = random_vector(&mut rng, n0, 0.9);
        let mut x_enc = random_vector(&mut rng, n, 1.0);

        let mut p_enc = vec![COEF_ZERO; n];
        let mut w = BitWriter::new();
        predict(&mut x_enc, &y, &mut p_enc, 1, k, &mut w).unwrap();
        let iy_enc = pulse_search(&mut x_enc, &p_enc, k, &mut w).unwrap();
        let bytes = w.finish();

        let mut x_dec = vec![COEF_ZERO; n];
        let mut p_dec = vec![COEF_ZERO; n];
        let mut r = BitReader::new(&bytes);
        reconstruct(&mut x_dec, &y, &mut p_dec, 1, k, &mut r).unwrap();
        let iy_dec = pulse_synthesis(&mut x_dec, &p_dec, k, &mut r).unwrap();

        assert_eq!(p_dec, p_enc);
        assert_eq!(iy_dec, iy_enc);
        assert_eq!(x_dec, x_enc);
        assert!((energy_f32(&x_dec) - 1.0).abs() < ENERGY_TOL);
    }
}

#[test]
fn test_fold_feeds_quantizer() {
    // The folded prediction is unit-norm, which the quantizer accepts as a
    // legal (boundary) prediction energy.
    let mut rng = StdRng::seed_from_u64(4242);
    let y = random_vector(&mut rng, 32, 0.8);
    let mut x = vec![COEF_ZERO; 8];
    let mut p = vec![COEF_ZERO; 8];
    spectral_fold(&mut x, &y, &mut p, 1, 6, 64).unwrap();

    let mut target = random_vector(&mut rng, 8, 1.0);
    let mut w = BitWriter::new();
    let iy = pulse_search(&mut target, &p, 5, &mut w).unwrap();
    assert_eq!(iy.iter().map(|v| v.unsigned_abs()).sum::<u32>(), 5);
    assert!((energy_f32(&target) - 1.0).abs() < 4.0 * ENERGY_TOL);
}

proptest! {
    #[test]
    fn prop_codeword_round_trip(raw in prop::collection::vec(-5i32..=5, 1..12)) {
        // The budget is whatever the generated vector carries.
        let k: u32 = raw.iter().map(|v| v.unsigned_abs()).sum();
        prop_assume!(k >= 1);
        let iy = raw;
        let mut w = BitWriter::new();
        encode_pulses(&iy, k, &mut w);
        let bytes = w.finish();
        let mut r = BitReader::new(&bytes);
        let decoded = decode_pulses(iy.len(), k, &mut r).unwrap();
        prop_assert_eq!(decoded, iy);
    }

    #[test]
    fn prop_search_is_pure(
        seed in 0u64..1u64 << 32,
        n in 1usize..=16,
        k in 1u32..=32,
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let p = random_vector(&mut rng, n, 0.6);
        let x0 = random_vector(&mut rng, n, 1.0);

        let mut x1 = x0.clone();
        let mut w1 = BitWriter::new();
        let iy1 = pulse_search(&mut x1, &p, k, &mut w1).unwrap();

        let mut x2 = x0.clone();
        let mut w2 = BitWriter::new();
        let iy2 = pulse_search(&mut x2, &p, k, &mut w2).unwrap();

        prop_assert_eq!(iy1, iy2);
        prop_assert_eq!(x1, x2);
        prop_assert_eq!(w1.finish(), w2.finish());
    }

    #[test]
    fn prop_synthesis_matches_search(
        seed in 0u64..1u64 << 32,
        n in 1usize..=20,
        k in 1u32..=64,
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let p = random_vector(&mut rng, n, 0.5);
        let mut x_enc = random_vector(&mut rng, n, 1.0);

        let mut w = BitWriter::new();
        let iy_enc = pulse_search(&mut x_enc, &p, k, &mut w).unwrap();
        let bytes = w.finish();

        let mut x_dec = vec![COEF_ZERO; n];
        let mut r = BitReader::new(&bytes);
        let iy_dec = pulse_synthesis(&mut x_dec, &p, k, &mut r).unwrap();

        prop_assert_eq!(iy_dec, iy_enc);
        prop_assert_eq!(x_dec, x_enc);
    }
}
