// tests/drivers.rs
//
// Conformance cases for the drivers, run against the built-in
// calculator. Run with: cargo test --test drivers

mod common;

use common::calculator;
use magtest::suite;

#[test]
fn timedriver_noevolver_nodriver() {
    let (_dir, calc) = calculator();
    suite::timedriver::test_noevolver_nodriver(&calc);
}

#[test]
fn timedriver_rungekutta_evolver() {
    let (_dir, calc) = calculator();
    suite::timedriver::test_rungekutta_evolver(&calc);
}

#[test]
fn timedriver_euler_evolver() {
    let (_dir, calc) = calculator();
    suite::timedriver::test_euler_evolver(&calc);
}

#[test]
fn timedriver_theta_evolver() {
    let (_dir, calc) = calculator();
    suite::timedriver::test_theta_evolver(&calc);
}

#[test]
fn timedriver_therm_heun_evolver() {
    let (_dir, calc) = calculator();
    suite::timedriver::test_therm_heun_evolver(&calc);
}

#[test]
fn timedriver_noevolver_finite_temperature() {
    let (_dir, calc) = calculator();
    suite::timedriver::test_noevolver_finite_temperature(&calc);
}

#[test]
fn timedriver_noevolver_driver() {
    let (_dir, calc) = calculator();
    suite::timedriver::test_noevolver_driver(&calc);
}

#[test]
fn timedriver_noprecession() {
    let (_dir, calc) = calculator();
    suite::timedriver::test_noprecession(&calc);
}

#[test]
fn timedriver_nodamping() {
    let (_dir, calc) = calculator();
    suite::timedriver::test_nodamping(&calc);
}

#[test]
fn timedriver_output_files() {
    let (_dir, calc) = calculator();
    suite::timedriver::test_output_files(&calc);
}

#[test]
fn timedriver_drive_exception() {
    let (_dir, calc) = calculator();
    suite::timedriver::test_drive_exception(&calc);
}

#[test]
fn timedriver_wrong_evolver() {
    let (_dir, calc) = calculator();
    suite::timedriver::test_wrong_evolver(&calc);
}

#[test]
fn timedriver_check_for_energy_and_dynamics() {
    let (_dir, calc) = calculator();
    suite::timedriver::test_check_for_energy_and_dynamics(&calc);
}

#[test]
fn mindriver_noevolver_nodriver() {
    let (_dir, calc) = calculator();
    suite::mindriver::test_noevolver_nodriver(&calc);
}

#[test]
fn mindriver_evolver_nodriver() {
    let (_dir, calc) = calculator();
    suite::mindriver::test_evolver_nodriver(&calc);
}

#[test]
fn mindriver_noevolver_driver() {
    let (_dir, calc) = calculator();
    suite::mindriver::test_noevolver_driver(&calc);
}

#[test]
fn mindriver_evolver_driver() {
    let (_dir, calc) = calculator();
    suite::mindriver::test_evolver_driver(&calc);
}

#[test]
fn mindriver_output_files() {
    let (_dir, calc) = calculator();
    suite::mindriver::test_output_files(&calc);
}

#[test]
fn mindriver_wrong_evolver() {
    let (_dir, calc) = calculator();
    suite::mindriver::test_wrong_evolver(&calc);
}

#[test]
fn mindriver_check_for_energy() {
    let (_dir, calc) = calculator();
    suite::mindriver::test_check_for_energy(&calc);
}

#[test]
fn relaxdriver_drive() {
    let (_dir, calc) = calculator();
    suite::relaxdriver::test_relaxdriver(&calc);
}

#[test]
fn relaxdriver_check_for_energy() {
    let (_dir, calc) = calculator();
    suite::relaxdriver::test_relax_check_for_energy(&calc);
}

#[test]
fn hysteresis_simple_loop() {
    let (_dir, calc) = calculator();
    suite::hysteresis::test_simple_hysteresis_loop(&calc);
}

#[test]
fn hysteresis_stepped_loop() {
    let (_dir, calc) = calculator();
    suite::hysteresis::test_stepped_hysteresis_loop(&calc);
}

#[test]
fn hysteresis_check_for_energy() {
    let (_dir, calc) = calculator();
    suite::hysteresis::test_hysteresis_check_for_energy(&calc);
}

#[test]
fn threads_passthrough() {
    let (_dir, calc) = calculator();
    suite::threads::test_threads(&calc);
}
