//! Seeded data generator.

use crate::generators::generate_value;
use fuzz_core::{ColumnDescriptor, Dialect, Field, GeneratedValue};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::warn;

/// Produces random column values from a seeded RNG.
///
/// One generator per worker; generators are not shared across tasks.
pub struct DataGenerator {
    /// Seed the RNG was created from
    seed: u64,
    rng: StdRng,
    /// Columns skipped because their type classified as Unknown
    skipped: u64,
}

impl DataGenerator {
    /// Create a new data generator with the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
            skipped: 0,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of columns [`generate_column`](Self::generate_column) skipped so far.
    pub fn skipped_columns(&self) -> u64 {
        self.skipped
    }

    /// Generate a value for an already classified field.
    pub fn generate(&mut self, field: &Field) -> Option<GeneratedValue> {
        generate_value(field, &mut self.rng)
    }

    /// Classify `column` for `dialect` and generate a value for it.
    ///
    /// Returns `None` when the type is not recognised; the column is then left
    /// out of the INSERT and counted in [`skipped_columns`](Self::skipped_columns).
    pub fn generate_column(
        &mut self,
        dialect: Dialect,
        table: &str,
        column: &ColumnDescriptor,
    ) -> Option<GeneratedValue> {
        let field = dialect.classify(column);
        let value = self.generate(&field);
        if value.is_none() {
            self.skipped += 1;
            warn!(
                "Skipping column {}.{}: unsupported {} type '{}'",
                table, column.name, dialect, column.raw_type
            );
        }
        value
    }
}
