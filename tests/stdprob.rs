// tests/stdprob.rs
//
// Standard-problem validation. Expensive and integrator-sensitive, so
// ignored by default.
// Run with: cargo test --test stdprob -- --ignored

mod common;

use common::calculator;
use magtest::suite;

#[test]
#[ignore]
fn stdprob5() {
    let (_dir, calc) = calculator();
    suite::stdprob::test_stdprob5(&calc);
}
