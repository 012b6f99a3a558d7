//! [libs/core/math-engine/tests/field_integrity.rs]
//! Modular arithmetic invariants for `FieldElement`.

use vanity_core_math::prelude::FieldElement;

#[test]
fn multiplicative_identity_holds() {
    let value = FieldElement::from_u64(123456789);
    let one = FieldElement::from_u64(1);
    assert_eq!(value.multiply_modular(&one), value);
}

#[test]
fn subtraction_wraps_below_zero_using_the_prime() {
    let small = FieldElement::from_u64(1);
    let large = FieldElement::from_u64(2);
    let wrapped = small.subtract_modular(&large);
    // wrapped + large should give back small, mod p.
    assert_eq!(wrapped.add_modular(&large), small);
}

#[test]
fn batch_invert_handles_a_single_element() {
    let elements = [FieldElement::from_u64(7)];
    let mut results = [FieldElement::default()];
    let mut scratch = [FieldElement::default()];
    FieldElement::batch_invert_into(&elements, &mut results, &mut scratch).unwrap();
    assert_eq!(results[0], elements[0].invert().unwrap());
}

#[test]
fn batch_invert_rejects_a_zero_element() {
    let elements = [FieldElement::from_u64(1), FieldElement::from_u64(0)];
    let mut results = [FieldElement::default(); 2];
    let mut scratch = [FieldElement::default(); 2];
    assert!(FieldElement::batch_invert_into(&elements, &mut results, &mut scratch).is_err());
}
