// tests/artifacts.rs
//
// Conformance cases for drive artifacts, derived quantities and job
// scheduling, run against the built-in calculator.
// Run with: cargo test --test artifacts

mod common;

use common::calculator;
use magtest::suite;

#[test]
fn info_file() {
    let (_dir, calc) = calculator();
    suite::artifacts::test_info_file(&calc);
}

#[test]
fn output_format() {
    let (_dir, calc) = calculator();
    suite::artifacts::test_format(&calc);
}

#[test]
fn output_step() {
    let (_dir, calc) = calculator();
    suite::artifacts::test_outputstep(&calc);
}

#[test]
fn save_delete() {
    let (_dir, calc) = calculator();
    suite::artifacts::test_save_delete(&calc);
}

#[test]
fn multiple_drives() {
    let (_dir, calc) = calculator();
    suite::artifacts::test_multiple_drives(&calc);
}

#[test]
fn dirname_override() {
    let (_dir, calc) = calculator();
    suite::artifacts::test_dirname(&calc);
}

#[test]
fn compute_energy() {
    let (_dir, calc) = calculator();
    suite::compute::test_energy(&calc);
}

#[test]
fn compute_energy_density() {
    let (_dir, calc) = calculator();
    suite::compute::test_energy_density(&calc);
}

#[test]
fn compute_effective_field() {
    let (_dir, calc) = calculator();
    suite::compute::test_effective_field(&calc);
}

#[test]
fn compute_invalid_target() {
    let (_dir, calc) = calculator();
    suite::compute::test_invalid_target(&calc);
}

#[test]
fn compute_dmi() {
    let (_dir, calc) = calculator();
    suite::compute::test_dmi(&calc);
}

#[test]
fn compute_slonczewski() {
    let (_dir, calc) = calculator();
    suite::compute::test_slonczewski(&calc);
}

#[test]
fn compute_zhang_li() {
    let (_dir, calc) = calculator();
    suite::compute::test_zhang_li(&calc);
}

#[test]
fn schedule_writes_job_script() {
    let (_dir, calc) = calculator();
    let scratch = tempfile::TempDir::new().expect("scratch dir created");
    suite::schedule::test_schedule(&calc, scratch.path());
}
