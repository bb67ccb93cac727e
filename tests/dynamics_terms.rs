// tests/dynamics_terms.rs
//
// Conformance cases for the dynamics terms, run against the built-in
// calculator. Run with: cargo test --test dynamics_terms

mod common;

use common::calculator;
use magtest::suite;

#[test]
fn damping_scalar() {
    let (_dir, calc) = calculator();
    suite::damping::test_scalar(&calc);
}

#[test]
fn damping_dict() {
    let (_dir, calc) = calculator();
    suite::damping::test_dict(&calc);
}

#[test]
fn damping_field() {
    let (_dir, calc) = calculator();
    suite::damping::test_field(&calc);
}

#[test]
fn dynamics_scalar_scalar() {
    let (_dir, calc) = calculator();
    suite::dynamics::test_scalar_scalar(&calc);
}

#[test]
fn dynamics_scalar_dict() {
    let (_dir, calc) = calculator();
    suite::dynamics::test_scalar_dict(&calc);
}

#[test]
fn dynamics_field_field() {
    let (_dir, calc) = calculator();
    suite::dynamics::test_field_field(&calc);
}

#[test]
fn zhangli_scalar_scalar() {
    let (_dir, calc) = calculator();
    suite::zhangli::test_scalar_scalar(&calc);
}

#[test]
fn zhangli_time_scalar_scalar() {
    let (_dir, calc) = calculator();
    suite::zhangli::test_time_scalar_scalar(&calc);
}

#[test]
fn zhangli_dict_scalar() {
    let (_dir, calc) = calculator();
    suite::zhangli::test_dict_scalar(&calc);
}

#[test]
fn zhangli_field_scalar() {
    let (_dir, calc) = calculator();
    suite::zhangli::test_field_scalar(&calc);
}

#[test]
fn zhangli_vector_scalar() {
    let (_dir, calc) = calculator();
    suite::zhangli::test_vector_scalar(&calc);
}

#[test]
fn slonczewski_single_values() {
    let (_dir, calc) = calculator();
    suite::slonczewski::test_single_values(&calc);
}

#[test]
fn slonczewski_single_values_finite_temperature() {
    let (_dir, calc) = calculator();
    suite::slonczewski::test_single_values_finite_temperature(&calc);
}

#[test]
fn slonczewski_dict_values() {
    let (_dir, calc) = calculator();
    suite::slonczewski::test_dict_values(&calc);
}

#[test]
fn slonczewski_field_values() {
    let (_dir, calc) = calculator();
    suite::slonczewski::test_field_values(&calc);
}
