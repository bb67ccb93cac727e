// src/suite/schedule.rs
//
// Job-scheduling case. There is no queueing system on a test machine, so
// a shell stands in for the submission command: it receives job.sh just
// like a real `sbatch`/`qsub` would, which exercises the script creation
// and the submission call.

use std::path::Path;

use crate::calculator::Calculator;
use crate::driver::{TimeDriver, TimeRun};
use crate::system::macrospin;

pub fn test_schedule(calc: &impl Calculator, scratch: &Path) {
    let system = macrospin();

    let job = calc
        .schedule(
            &system,
            "sh",
            "scheduling resources",
            scratch,
            &TimeDriver::new(),
            &TimeRun::new(0.2e-9, 50),
        )
        .expect("schedule failed");

    assert!(job.ends_with("job.sh"));
    assert!(job.is_file());
    assert!(job.starts_with(scratch));

    // the input script referenced by the job script exists next to it
    let dir = job.parent().expect("job script has a directory");
    assert!(dir
        .join(format!("{}.{}", system.name, calc.script_extension()))
        .is_file());
}
