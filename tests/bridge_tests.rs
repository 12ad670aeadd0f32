use cayley_dickson::{
    batch_conjugate, batch_multiply, batch_norm_sq, octonion, quaternion, sedenion,
    AlgebraElement, AlgebraError, HypercomplexLinear,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Hamilton product written out component by component.
fn hamilton(a: &[f64], b: &[f64]) -> [f64; 4] {
    let (ar, ai, aj, ak) = (a[0], a[1], a[2], a[3]);
    let (br, bi, bj, bk) = (b[0], b[1], b[2], b[3]);
    [
        ar * br - ai * bi - aj * bj - ak * bk,
        ar * bi + ai * br + aj * bk - ak * bj,
        ar * bj - ai * bk + aj * br + ak * bi,
        ar * bk + ai * bj - aj * bi + ak * br,
    ]
}

fn sample(len: usize, seed: u64) -> Vec<f64> {
    (0..len).map(|i| ((i as f64 + 1.0) * 0.731 + seed as f64).sin()).collect()
}

#[test]
fn test_batch_multiply_matches_elementwise() {
    for desc in [quaternion(), octonion(), sedenion()] {
        let dim = desc.dim();
        let a = sample(5 * dim, 1);
        let b = sample(5 * dim, 2);
        let batch = batch_multiply(&desc, &a, &b).unwrap();
        for n in 0..5 {
            let x = AlgebraElement::from_slice(&desc, &a[n * dim..(n + 1) * dim]).unwrap();
            let y = AlgebraElement::from_slice(&desc, &b[n * dim..(n + 1) * dim]).unwrap();
            assert_eq!(&batch[n * dim..(n + 1) * dim], x.multiply(&y).unwrap().coeffs());
        }
    }
}

#[test]
fn test_batch_multiply_is_hamilton() {
    let q = quaternion();
    let a = sample(12, 3);
    let b = sample(12, 4);
    let batch = batch_multiply(&q, &a, &b).unwrap();
    for n in 0..3 {
        let expected = hamilton(&a[4 * n..4 * n + 4], &b[4 * n..4 * n + 4]);
        for (x, y) in batch[4 * n..4 * n + 4].iter().zip(expected) {
            assert!((x - y).abs() < 1e-12);
        }
    }
}

#[test]
fn test_batch_conjugate_and_norms() {
    let o = octonion();
    let a = sample(16, 5);
    let conj = batch_conjugate(&o, &a).unwrap();
    assert_eq!(conj[0], a[0]);
    assert_eq!(conj[8], a[8]);
    assert_eq!(conj[3], -a[3]);
    assert_eq!(conj[15], -a[15]);

    let norms = batch_norm_sq(&o, &a).unwrap();
    assert_eq!(norms.len(), 2);
    let first: f64 = a[..8].iter().map(|c| c * c).sum();
    assert!((norms[0] - first).abs() < 1e-12);
    assert!(batch_norm_sq(&o, &[]).unwrap().is_empty());
}

#[test]
fn test_linear_layer_is_sum_of_hamilton_products() {
    let q = quaternion();
    let (in_f, out_f) = (2, 3);
    let weight = sample(out_f * in_f * 4, 6);
    let bias = sample(out_f * 4, 7);
    let layer = HypercomplexLinear::from_parts(&q, in_f, out_f, weight.clone(), bias.clone()).unwrap();

    let batch = 2;
    let input = sample(batch * in_f * 4, 8);
    let output = layer.forward(&input).unwrap();
    assert_eq!(output.len(), batch * out_f * 4);

    for b in 0..batch {
        for o in 0..out_f {
            let mut expected = [0.0; 4];
            expected.copy_from_slice(&bias[o * 4..o * 4 + 4]);
            for i in 0..in_f {
                let x = &input[(b * in_f + i) * 4..(b * in_f + i + 1) * 4];
                let w = &weight[(o * in_f + i) * 4..(o * in_f + i + 1) * 4];
                for (e, v) in expected.iter_mut().zip(hamilton(x, w)) {
                    *e += v;
                }
            }
            let got = &output[(b * out_f + o) * 4..(b * out_f + o + 1) * 4];
            for (g, e) in got.iter().zip(expected) {
                assert!((g - e).abs() < 1e-12, "batch {} out {}: {} vs {}", b, o, g, e);
            }
        }
    }
}

#[test]
fn test_linear_layer_initialisation() {
    let mut rng = StdRng::seed_from_u64(17);
    let layer = HypercomplexLinear::new(&quaternion(), 4, 2, &mut rng);
    assert_eq!(layer.weight().len(), 32);
    assert!(layer.weight().iter().all(|w| w.abs() < 0.1));
    assert!(layer.weight().iter().any(|&w| w != 0.0));
    assert!(layer.bias().iter().all(|&b| b == 0.0));

    let output = layer.forward(&sample(16, 9)).unwrap();
    assert_eq!(output.len(), 8);
}

#[test]
fn test_linear_layer_shape_errors() {
    let q = quaternion();
    let layer = HypercomplexLinear::from_parts(&q, 2, 1, vec![0.0; 8], vec![0.0; 4]).unwrap();
    assert_eq!(
        layer.forward(&[0.0; 12]).unwrap_err(),
        AlgebraError::DimensionMismatch { expected: 8, actual: 12 }
    );
    assert!(layer.forward(&[]).unwrap().is_empty());
}
