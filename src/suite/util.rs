// src/suite/util.rs
//
// Assertion helpers shared by the conformance cases.

use crate::calculator::Calculator;
use crate::driver::{MinDriver, MinRun, RelaxDriver, RelaxRun};
use crate::dynamics::{Damping, DynamicsTerm};
use crate::system::System;
use crate::vec3;

/// Magnetisation at a point; panics with a useful message outside the
/// mesh.
pub fn m_at(system: &System, p: [f64; 3]) -> [f64; 3] {
    system
        .m()
        .value_at(p)
        .unwrap_or_else(|| panic!("sample point {p:?} lies outside the mesh"))
}

/// Assert |value - expected| < tol (euclidean, absolute).
pub fn assert_close(value: [f64; 3], expected: [f64; 3], tol: f64) {
    let d = vec3::norm(vec3::sub(value, expected));
    assert!(
        d < tol,
        "expected {value:?} within {tol:e} of {expected:?}, distance {d:e}"
    );
}

/// Assert |value x reference| < tol, i.e. the two vectors are parallel.
pub fn assert_parallel(value: [f64; 3], reference: [f64; 3], tol: f64) {
    let c = vec3::norm(vec3::cross(value, reference));
    assert!(
        c < tol,
        "expected {value:?} parallel to {reference:?} within {tol:e}, cross norm {c:e}"
    );
}

/// Relative scalar comparison.
pub fn assert_rel_eq(a: f64, b: f64, rel: f64) {
    assert!(
        approx::relative_eq!(a, b, max_relative = rel),
        "expected {a:e} ~ {b:e} (rel {rel:e})"
    );
}

/// Minimise the system's energy the way most term cases do: through the
/// relax driver when the calculator has one (adding damping, which the
/// relaxation mode requires), through the min driver otherwise.
pub fn settle(calc: &impl Calculator, system: &mut System) {
    if calc.supports_relax() {
        if system.dynamics.damping().is_none() {
            system.dynamics += DynamicsTerm::Damping(Damping::new(0.5));
        }
        calc.drive_relax(system, &RelaxDriver, &RelaxRun::default())
            .expect("relax drive failed");
    } else {
        calc.drive_min(system, &MinDriver::new(), &MinRun::default())
            .expect("min drive failed");
    }
}

/// Plain energy minimisation with default settings.
pub fn minimize(calc: &impl Calculator, system: &mut System) {
    calc.drive_min(system, &MinDriver::new(), &MinRun::default())
        .expect("min drive failed");
}
