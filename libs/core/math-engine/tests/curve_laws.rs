//! [libs/core/math-engine/tests/curve_laws.rs]
//! Group-law sanity checks for the Jacobian curve arithmetic.

use vanity_core_math::prelude::*;

#[test]
fn identity_and_doubling_agree_with_the_group_law() {
    let generator = JacobianPoint::generator();
    let infinity = JacobianPoint::infinity();

    let identity_sum = add_mixed(&infinity, &generator.x, &generator.y);
    let (ix, iy) = identity_sum.to_affine_bytes().unwrap();
    let (gx, gy) = generator.to_affine_bytes().unwrap();
    assert_eq!(ix, gx);
    assert_eq!(iy, gy);

    let doubled = double(&generator);
    let added_to_itself = add_mixed(&generator, &generator.x, &generator.y);
    assert_eq!(doubled.to_affine_bytes().unwrap(), added_to_itself.to_affine_bytes().unwrap());
}

#[test]
fn chained_additions_track_the_expected_scalar() {
    // 1*G, 2*G, 3*G via repeated add_mixed should match the library's
    // own scalar multiplication for the same small scalars.
    let generator = JacobianPoint::generator();
    let mut running = generator;
    for multiple in 2u8..=5 {
        running = add_mixed(&running, &generator.x, &generator.y);
        let mut scalar_bytes = [0u8; 32];
        scalar_bytes[31] = multiple;
        let expected = JacobianPoint::from_private(&SafePrivateKey::from_bytes(&scalar_bytes).unwrap());
        assert_eq!(running.to_affine_bytes().unwrap(), expected.to_affine_bytes().unwrap());
    }
}
