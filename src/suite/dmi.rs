// src/suite/dmi.rs
//
// DMI cases. Minimised chiral states wind into helices whose average
// magnetisation vanishes. Relax-capable calculators must refuse DMI
// without exchange, and calculators advertise which crystal classes they
// support.

use crate::calculator::{Calculator, DriveError};
use crate::driver::{MinDriver, MinRun, RelaxDriver, RelaxRun};
use crate::dynamics::{Damping, DynamicsTerm};
use crate::energy::{CrystalClass, Dmi, EnergyTerm, Exchange};
use crate::field::VectorField;
use crate::mesh::Mesh;
use crate::param::Param;
use crate::region::Region;
use crate::system::System;
use crate::vec3;

use super::util::m_at;

const MS: f64 = 1e6;

fn line_mesh_x() -> Mesh {
    let region = Region::new([-100e-9, 0.0, 0.0], [100e-9, 1e-9, 1e-9]);
    Mesh::with_cell(region, [1e-9; 3]).expect("static mesh is valid")
}

fn line_mesh_z() -> Mesh {
    let region = Region::new([0.0, 0.0, -100e-9], [1e-9, 1e-9, 100e-9]);
    Mesh::with_cell(region, [1e-9; 3]).expect("static mesh is valid")
}

/// Drive the way the original backends do: relax when available (which
/// first rejects DMI-only configurations), minimisation otherwise.
fn settle_dmi(calc: &impl Calculator, system: &mut System) {
    if calc.supports_relax() {
        system.dynamics = DynamicsTerm::Damping(Damping::new(0.5)).into();
        let refused = calc.drive_relax(system, &RelaxDriver, &RelaxRun::default());
        assert!(
            matches!(refused, Err(DriveError::Failed(_))),
            "relaxation without exchange must be refused for DMI systems"
        );
        system.energy += EnergyTerm::Exchange(Exchange::new(1e-21));
        calc.drive_relax(system, &RelaxDriver, &RelaxRun::default())
            .expect("relax drive failed");
    } else {
        calc.drive_min(system, &MinDriver::new(), &MinRun::default())
            .expect("min drive failed");
    }
}

pub fn test_scalar(calc: &impl Calculator) {
    let mut system = System::new("dmi_scalar");
    system.energy = EnergyTerm::Dmi(Dmi::new(1e-3, CrystalClass::CnvZ)).into();
    system.m = Some(VectorField::random(line_mesh_x(), 30).set_norm(MS));

    settle_dmi(calc, &mut system);

    // whole periods fit the line, so the helix averages out
    let avg = vec3::norm(system.m().mean());
    assert!(avg < 1.0, "helical state should average to zero, got {avg}");

    calc.delete(&system).expect("delete failed");
}

pub fn test_dict(calc: &impl Calculator) {
    let d = Param::regions([("r1", 0.0), ("r2", 1e-3), ("default", 2e-3)]);
    let mesh = line_mesh_x().subregions([
        ("r1", Region::new([-100e-9, 0.0, 0.0], [0.0, 1e-9, 1e-9])),
        ("r2", Region::new([0.0, 0.0, 0.0], [100e-9, 1e-9, 1e-9])),
    ]);

    let mut system = System::new("dmi_dict");
    system.energy = EnergyTerm::Dmi(Dmi::new(d, CrystalClass::CnvZ)).into();
    system.m = Some(VectorField::random(mesh, 31).set_norm(MS));

    settle_dmi(calc, &mut system);

    // D = 0 region: still random
    assert!(vec3::norm(system.m().region_mean("r1")) > 1.0);
    // D != 0 region: helix, vanishing average
    assert!(vec3::norm(system.m().region_mean("r2")) < 1.0);

    calc.delete(&system).expect("delete failed");
}

pub fn test_crystalclass(calc: &impl Calculator) {
    let mut driven = false;
    let mut last = None;

    for (name, seed) in [
        ("Cnv_x", 40u64),
        ("Cnv_y", 41),
        ("Cnv_z", 42),
        ("T", 43),
        ("O", 44),
        ("D2d_x", 45),
        ("D2d_y", 46),
        ("D2d_z", 47),
        // legacy aliases
        ("Cnv", 48),
        ("D2d", 49),
    ] {
        let crystal_class = CrystalClass::parse(name).expect("known crystal class");
        let mesh = if name.ends_with('x') || name.ends_with('y') {
            line_mesh_z()
        } else {
            line_mesh_x()
        };

        let mut system = System::new("dmi_crystalclass");
        system.energy = EnergyTerm::Dmi(Dmi::new(1e-3, crystal_class))
            + EnergyTerm::Exchange(Exchange::new(1e-21));
        system.m = Some(VectorField::random(mesh.clone(), seed).set_norm(MS));

        let result = calc.drive_min(&mut system, &MinDriver::new(), &MinRun::default());
        if calc.supports_crystal_class(crystal_class) {
            result.expect("min drive failed");
            driven = true;
            let avg = vec3::norm(system.m().mean());
            assert!(avg < 1.0, "{name}: helical average should vanish, got {avg}");
            // the helix winds but keeps |m| = Ms everywhere
            let sample = m_at(&system, mesh.cell_center(0, 0, 0));
            assert!((vec3::norm(sample) - MS).abs() < 1.0);
        } else {
            assert!(
                matches!(result, Err(DriveError::InvalidValue(_))),
                "{name}: unsupported crystal class must be rejected"
            );
        }
        last = Some(system);
    }

    if driven {
        let system = last.expect("at least one class was tried");
        calc.delete(&system).expect("delete failed");
    }
}
