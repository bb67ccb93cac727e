// tests/common/mod.rs
//
// Shared fixture: a fresh built-in calculator rooted in a temporary
// working directory. The TempDir must stay alive for the duration of the
// test, so both are returned.

use magtest::backend::LlgCalculator;
use tempfile::TempDir;

pub fn calculator() -> (TempDir, LlgCalculator) {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = TempDir::new().expect("temporary workdir created");
    let calc = LlgCalculator::new(dir.path());
    (dir, calc)
}
