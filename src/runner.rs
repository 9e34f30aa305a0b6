//! Drawing single values from strategies outside of a `proptest!` block.
use crate::error::Error;
use proptest::strategy::{Strategy, ValueTree};
use proptest::test_runner::{Config, RngAlgorithm, TestRng, TestRunner};
use tracing::trace;

/// A runner whose random stream depends on `seed` only. Nothing is persisted.
pub fn seeded_runner(seed: u64) -> TestRunner {
    let mut bytes = [0u8; 32];
    bytes[..8].copy_from_slice(&seed.to_le_bytes());
    let config = Config {
        failure_persistence: None,
        ..Config::default()
    };
    TestRunner::new_with_rng(config, TestRng::from_seed(RngAlgorithm::ChaCha, &bytes))
}

/// The same seed always yields the same value.
pub fn sample<S: Strategy>(strategy: &S, seed: u64) -> Result<S::Value, Error> {
    trace!(seed, "drawing sample");
    let mut runner = seeded_runner(seed);
    let tree = strategy
        .new_tree(&mut runner)
        .map_err(|reason| Error::Sampling(reason.to_string()))?;
    Ok(tree.current())
}
