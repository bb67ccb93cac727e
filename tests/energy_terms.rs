// tests/energy_terms.rs
//
// Conformance cases for the energy terms, run against the built-in
// calculator. Run with: cargo test --test energy_terms

mod common;

use common::calculator;
use magtest::suite;

#[test]
fn exchange_scalar() {
    let (_dir, calc) = calculator();
    suite::exchange::test_scalar(&calc);
}

#[test]
fn exchange_dict() {
    let (_dir, calc) = calculator();
    suite::exchange::test_dict(&calc);
}

#[test]
fn exchange_field() {
    let (_dir, calc) = calculator();
    suite::exchange::test_field(&calc);
}

#[test]
fn zeeman_vector() {
    let (_dir, calc) = calculator();
    suite::zeeman::test_vector(&calc);
}

#[test]
fn zeeman_time_vector() {
    let (_dir, calc) = calculator();
    suite::zeeman::test_time_vector(&calc);
}

#[test]
fn zeeman_dict() {
    let (_dir, calc) = calculator();
    suite::zeeman::test_dict(&calc);
}

#[test]
fn zeeman_time_dict() {
    let (_dir, calc) = calculator();
    suite::zeeman::test_time_dict(&calc);
}

#[test]
fn zeeman_field() {
    let (_dir, calc) = calculator();
    suite::zeeman::test_field(&calc);
}

#[test]
fn zeeman_time_field() {
    let (_dir, calc) = calculator();
    suite::zeeman::test_time_field(&calc);
}

#[test]
fn dmi_scalar() {
    let (_dir, calc) = calculator();
    suite::dmi::test_scalar(&calc);
}

#[test]
fn dmi_dict() {
    let (_dir, calc) = calculator();
    suite::dmi::test_dict(&calc);
}

#[test]
fn dmi_crystalclass() {
    let (_dir, calc) = calculator();
    suite::dmi::test_crystalclass(&calc);
}

#[test]
fn uniaxialanisotropy_scalar_vector() {
    let (_dir, calc) = calculator();
    suite::anisotropy::test_scalar_vector(&calc);
}

#[test]
fn uniaxialanisotropy_field_vector() {
    let (_dir, calc) = calculator();
    suite::anisotropy::test_field_vector(&calc);
}

#[test]
fn uniaxialanisotropy_scalar_field() {
    let (_dir, calc) = calculator();
    suite::anisotropy::test_scalar_field(&calc);
}

#[test]
fn uniaxialanisotropy_field_field() {
    let (_dir, calc) = calculator();
    suite::anisotropy::test_field_field(&calc);
}

#[test]
fn uniaxialanisotropy_dict_vector() {
    let (_dir, calc) = calculator();
    suite::anisotropy::test_dict_vector(&calc);
}

#[test]
fn uniaxialanisotropy_higher_order() {
    let (_dir, calc) = calculator();
    suite::anisotropy::test_higher_order_scalar_vector(&calc);
}

#[test]
fn cubicanisotropy_scalar_vector() {
    let (_dir, calc) = calculator();
    suite::anisotropy::test_cubic_scalar_vector(&calc);
}

#[test]
fn demag_plain() {
    let (_dir, calc) = calculator();
    suite::demag::test_demag(&calc);
}

#[test]
fn demag_asymptotic_radius() {
    let (_dir, calc) = calculator();
    suite::demag::test_demag_asymptotic_radius(&calc);
}

#[test]
fn demag_pbc() {
    let (_dir, calc) = calculator();
    suite::demag::test_demag_pbc(&calc);
}

#[test]
fn energy_exchange_zeeman() {
    let (_dir, calc) = calculator();
    suite::energy::test_exchange_zeeman(&calc);
}

#[test]
fn energy_exchange_uniaxialanisotropy() {
    let (_dir, calc) = calculator();
    suite::energy::test_exchange_uniaxialanisotropy(&calc);
}

#[test]
fn energy_exchange_cubicanisotropy() {
    let (_dir, calc) = calculator();
    suite::energy::test_exchange_cubicanisotropy(&calc);
}

#[test]
fn energy_exchange_dmi_zeeman() {
    let (_dir, calc) = calculator();
    suite::energy::test_exchange_dmi_zeeman(&calc);
}

#[test]
fn energy_exchange_dmi_zeeman_uniaxialanisotropy_demag() {
    let (_dir, calc) = calculator();
    suite::energy::test_exchange_dmi_zeeman_uniaxialanisotropy_demag(&calc);
}

#[test]
fn energy_zeeman_zeeman() {
    let (_dir, calc) = calculator();
    suite::energy::test_zeeman_zeeman(&calc);
}

#[test]
fn rkky_scalar() {
    let (_dir, calc) = calculator();
    suite::rkky::test_scalar(&calc);
}

#[test]
fn mesh_single_nopbc() {
    let (_dir, calc) = calculator();
    suite::mesh::test_single_nopbc(&calc);
}

#[test]
fn mesh_multi_nopbc() {
    let (_dir, calc) = calculator();
    suite::mesh::test_multi_nopbc(&calc);
}

#[test]
fn mesh_single_pbc() {
    let (_dir, calc) = calculator();
    suite::mesh::test_single_pbc(&calc);
}

#[test]
fn mesh_multi_pbc() {
    let (_dir, calc) = calculator();
    suite::mesh::test_multi_pbc(&calc);
}

#[test]
fn mesh_fixed_subregions() {
    let (_dir, calc) = calculator();
    suite::mesh::test_fixed_subregions(&calc);
}
