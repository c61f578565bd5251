//! Per-generation telemetry.
//!
//! [`History`] is an append-only log filled by the runner, one
//! [`GenerationRecord`] per evaluated generation. It is meant for
//! plotting and animation collaborators outside this crate.

/// Statistics of one evaluated generation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationRecord<G, P> {
    /// Zero-based generation index.
    pub generation: usize,
    /// Raw genotype of the generation's best individual.
    pub best_genotype: G,
    /// Decoded best individual.
    pub best_phenotype: P,
    /// Fitness of the generation's best individual.
    pub best_fitness: f64,
    /// Mean fitness over the whole population.
    pub mean_fitness: f64,
    /// Every decoded individual with its fitness, when population
    /// recording is enabled.
    pub population: Option<Vec<(P, f64)>>,
}

/// Append-only log of generation records.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct History<G, P> {
    records: Vec<GenerationRecord<G, P>>,
}

impl<G, P> Default for History<G, P> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<G, P> History<G, P> {
    /// Appends one generation.
    pub fn push(&mut self, record: GenerationRecord<G, P>) {
        self.records.push(record);
    }

    /// Number of recorded generations.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records, oldest first.
    pub fn records(&self) -> &[GenerationRecord<G, P>] {
        &self.records
    }

    /// The most recent record.
    pub fn last(&self) -> Option<&GenerationRecord<G, P>> {
        self.records.last()
    }

    /// Iterates over records, oldest first.
    pub fn iter(&self) -> std::slice::Iter<'_, GenerationRecord<G, P>> {
        self.records.iter()
    }

    /// Best fitness of each generation.
    pub fn best_fitness(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.best_fitness).collect()
    }

    /// Mean fitness of each generation.
    pub fn mean_fitness(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.mean_fitness).collect()
    }

    /// Running minimum of the per-generation best fitness.
    ///
    /// Never increases, whether or not elitism is enabled.
    pub fn best_ever_fitness(&self) -> Vec<f64> {
        self.records
            .iter()
            .scan(f64::INFINITY, |best, r| {
                *best = best.min(r.best_fitness);
                Some(*best)
            })
            .collect()
    }
}

impl<'a, G, P> IntoIterator for &'a History<G, P> {
    type Item = &'a GenerationRecord<G, P>;
    type IntoIter = std::slice::Iter<'a, GenerationRecord<G, P>>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
