use std::f64::consts::FRAC_PI_2;

use cayley_dickson::{
    bracketing_spread, build_algebra_from_signs, octonion, quaternion, rotate_vector,
    rotor_from_axis_angle, sandwich, sedenion, split_octonion, AlgebraElement, AlgebraError,
    BracketTree, HypercomplexLinear,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), AlgebraError> {
    // RUST_LOG=debug shows descriptor and table derivation
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut rng = StdRng::seed_from_u64(0xCD);

    println!("=== THE TOWER ===");
    for signs in [vec![], vec![-1], vec![1], vec![-1, -1], vec![-1, -1, -1], vec![-1, -1, 1], vec![-1; 4]] {
        let desc = build_algebra_from_signs(&signs)?;
        let (pos, neg) = desc.signature_counts();
        println!(
            "{:<28} dim {:>2}  signature ({}, {})  commutative: {:<5} associative: {:<5} division: {}",
            desc.to_string(),
            desc.dim(),
            pos,
            neg,
            desc.is_commutative(),
            desc.is_associative(),
            desc.is_division()
        );
    }

    println!("\n=== QUATERNION ROTATION ===");
    let q = quaternion();
    let rotor = rotor_from_axis_angle(&q, &[0.0, 0.0, 1.0], FRAC_PI_2)?;
    println!("Rotor: {}", rotor);
    let rotated = rotate_vector(&rotor, &[1.0, 0.0, 0.0])?;
    println!("e1 -> {:.6?}", rotated);

    println!("\n=== OCTONION UNITS ===");
    let o = octonion();
    let a = AlgebraElement::random_unit(&o, &mut rng)?;
    let b = AlgebraElement::random_unit(&o, &mut rng)?;
    let ab = a.multiply(&b)?;
    println!("N(a) = {:.12}, N(b) = {:.12}, N(ab) = {:.12}", a.norm_sq(), b.norm_sq(), ab.norm_sq());
    let basis: Vec<AlgebraElement> = [1, 2, 4]
        .iter()
        .map(|&i| AlgebraElement::basis(&o, i))
        .collect::<Result<_, _>>()?;
    let assoc = AlgebraElement::associator(&basis[0], &basis[1], &basis[2])?;
    println!("[e1, e2, e4] = {}", assoc);
    for tree in BracketTree::all_bracketings(3) {
        println!("  {} = {}", tree, tree.try_evaluate(&basis)?);
    }
    println!("Bracketing spread: {}", bracketing_spread(&basis)?);

    println!("\n=== ZERO DIVISORS ===");
    let so = split_octonion();
    let x = AlgebraElement::from_slice(&so, &[1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0])?;
    let y = AlgebraElement::from_slice(&so, &[1.0, 0.0, 0.0, 0.0, -1.0, 0.0, 0.0, 0.0])?;
    println!("({}) * ({}) = {}", x, y, x.multiply(&y)?);
    match x.inverse() {
        Ok(inv) => println!("Inverse: {}", inv),
        Err(e) => println!("[EXPECTED] {}", e),
    }

    let s = sedenion();
    let mut u = AlgebraElement::basis(&s, 3)?.try_add(&AlgebraElement::basis(&s, 10)?)?;
    let v = AlgebraElement::basis(&s, 6)?.try_sub(&AlgebraElement::basis(&s, 15)?)?;
    println!("({}) * ({}) = {}", u, v, u.multiply(&v)?);
    println!("N(u) = {}, annihilates: {}", u.norm_sq(), u.annihilates(&v)?);

    u = u.normalize()?;
    let outcome = sandwich(&u, &v)?;
    println!(
        "Sandwich: N before {} after {} (guaranteed: {})",
        outcome.norm_before, outcome.norm_after, outcome.guaranteed
    );

    println!("\n=== HYPERCOMPLEX LINEAR LAYER ===");
    let layer = HypercomplexLinear::new(&q, 4, 2, &mut rng);
    let input: Vec<f64> = (0..16).map(|i| (i as f64 * 0.37).sin()).collect();
    let output = layer.forward(&input)?;
    println!("Input shape: [1, 4, 4]  Output shape: [1, 2, 4]");
    println!("Parameters: {} (dense real layer: {})", layer.parameter_count(), 16 * 8 + 8);
    println!("Output: {:.6?}", output);

    Ok(())
}
