//! [libs/core/math-engine/src/curve.rs]
//!
//! secp256k1 group law specialized for the batched search engine: a
//! Jacobian-plus-affine mixed addition (the right operand is always the
//! fixed generator offset) and a standalone Jacobian doubling used only
//! by tests that check the group law. Neither handles the general
//! Jacobian+Jacobian case; the engine never needs it.

use crate::field::FieldElement;
use crate::point::JacobianPoint;

/// `P + Q` where `P` is Jacobian and `Q = (qx, qy)` is affine. Does not
/// handle `P == Q` or `P == -Q` beyond detecting and routing to doubling
/// or infinity; within a `STEP`-long chain of consecutive multiples of
/// `G` starting from a random scalar, those collisions do not occur.
pub fn add_mixed(point: &JacobianPoint, qx: &FieldElement, qy: &FieldElement) -> JacobianPoint {
    if point.is_infinity {
        return JacobianPoint { x: *qx, y: *qy, z: FieldElement::from_u64(1), is_infinity: false };
    }

    let z1_squared = point.z.square_modular();
    let z1_cubed = z1_squared.multiply_modular(&point.z);

    let u2 = qx.multiply_modular(&z1_squared);
    let s2 = qy.multiply_modular(&z1_cubed);

    let h = u2.subtract_modular(&point.x);
    let r = s2.subtract_modular(&point.y);

    if h.is_zero() {
        if r.is_zero() {
            return double(point);
        }
        return JacobianPoint::infinity();
    }

    let h_squared = h.square_modular();
    let h_cubed = h_squared.multiply_modular(&h);
    let x1_h_squared = point.x.multiply_modular(&h_squared);

    let x3 = r
        .square_modular()
        .subtract_modular(&h_cubed)
        .subtract_modular(&x1_h_squared)
        .subtract_modular(&x1_h_squared);

    let y3 = r
        .multiply_modular(&x1_h_squared.subtract_modular(&x3))
        .subtract_modular(&point.y.multiply_modular(&h_cubed));

    let z3 = point.z.multiply_modular(&h);

    JacobianPoint { x: x3, y: y3, z: z3, is_infinity: false }
}

/// Jacobian doubling for a curve with `a = 0` (secp256k1).
pub fn double(point: &JacobianPoint) -> JacobianPoint {
    if point.is_infinity || point.y.is_zero() {
        return JacobianPoint::infinity();
    }

    let a = point.x.square_modular();
    let b = point.y.square_modular();
    let c = b.square_modular();

    let x1_plus_b_squared = point.x.add_modular(&b).square_modular();
    let d_half = x1_plus_b_squared.subtract_modular(&a).subtract_modular(&c);
    let d = d_half.add_modular(&d_half);

    let e = a.add_modular(&a).add_modular(&a);
    let f = e.square_modular();

    let x3 = f.subtract_modular(&d).subtract_modular(&d);
    let y3 = e
        .multiply_modular(&d.subtract_modular(&x3))
        .subtract_modular(&c.multiply_by_u64(8));
    let z3 = point.y.multiply_modular(&point.z).add_modular(&point.y.multiply_modular(&point.z));

    JacobianPoint { x: x3, y: y3, z: z3, is_infinity: false }
}
