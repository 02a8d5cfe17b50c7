//! Subsampled Markov-blanket search with inclusion-frequency thresholding.
//!
//! Each of `numSubsamples` tasks:
//! - draws `floor(percentSubsampleSize × rows)` rows without replacement
//! - builds a score on the subsample
//! - runs the blanket search for the target
//! - reports which candidates ended up adjacent to the target
//!
//! Tasks run on a fixed-size rayon pool and return their own hit lists; the
//! counts are merged only after every task has finished, so no task shares
//! mutable state with another. Results depend on `(seed, i)` per task and not
//! on scheduling order.

use std::collections::HashMap;

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::data::{DataSet, subsample, subsample_rng};
use crate::domain::{Node, StabilityConfig};
use crate::error::AppError;
use crate::score::{ScoreBuilder, SemBicScoreBuilder};
use crate::search::{ForwardBackwardMb, MarkovBlanketSearch};
use crate::stability::result::{InclusionFrequency, StabilityResult, apply_threshold, build_star_graph};

const MIN_SUBSAMPLE_ROWS: usize = 2;

#[derive(Debug, Clone)]
pub struct StabilitySelection<B, M> {
    builder: B,
    search: M,
}

impl StabilitySelection<SemBicScoreBuilder, ForwardBackwardMb> {
    /// SEM BIC score with the forward-backward blanket search.
    pub fn sem_bic() -> Self {
        Self::new(SemBicScoreBuilder, ForwardBackwardMb::new())
    }
}

impl<B: ScoreBuilder, M: MarkovBlanketSearch> StabilitySelection<B, M> {
    pub fn new(builder: B, search: M) -> Self {
        Self { builder, search }
    }

    pub fn search(&self, data: &DataSet, config: &StabilityConfig) -> Result<StabilityResult, AppError> {
        config.validate()?;

        let target = data.variable(&config.target_name).cloned().ok_or_else(|| {
            AppError::config(format!(
                "targetName '{}' is not one of the {} dataset variables.",
                config.target_name,
                data.num_columns()
            ))
        })?;

        let candidates: Vec<Node> = data
            .variables()
            .iter()
            .filter(|v| **v != target)
            .cloned()
            .collect();
        let candidate_index: HashMap<&Node, usize> =
            candidates.iter().enumerate().map(|(i, v)| (v, i)).collect();

        // Covariance scores need two rows; anything smaller would fail in every task.
        let subsample_size = config.subsample_size(data.num_rows());
        if subsample_size < MIN_SUBSAMPLE_ROWS {
            return Err(AppError::config(format!(
                "percentSubsampleSize {} yields {} rows per subsample from {} rows; at least {} are needed.",
                config.percent_subsample_size,
                subsample_size,
                data.num_rows(),
                MIN_SUBSAMPLE_ROWS
            )));
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.parallelism)
            .build()
            .map_err(|e| AppError::compute(format!("Failed to build worker pool: {e}")))?;

        let n = config.num_subsamples;
        debug!(
            target_name = %target,
            candidates = candidates.len(),
            subsample_size,
            num_subsamples = n,
            parallelism = config.parallelism,
            "starting stability selection"
        );

        let outcomes: Vec<Result<Vec<usize>, AppError>> = pool.install(|| {
            (0..n)
                .into_par_iter()
                .map(|i| {
                    let outcome =
                        self.run_subsample(i, data, subsample_size, &target, &candidate_index, config);
                    match &outcome {
                        Ok(_) if config.verbose => info!("Bootstrap #{} of {}", i + 1, n),
                        Ok(_) => {}
                        Err(e) => debug!(subsample = i + 1, error = %e, "subsample failed"),
                    }
                    outcome
                })
                .collect()
        });

        // Join barrier passed: merge the per-task hit lists.
        let mut counts = vec![0usize; candidates.len()];
        let mut failures: Vec<AppError> = Vec::new();
        for outcome in outcomes {
            match outcome {
                Ok(hits) => {
                    for idx in hits {
                        counts[idx] += 1;
                    }
                }
                Err(e) => failures.push(e),
            }
        }

        let failed = failures.len();
        let completed = n - failed;
        if completed == 0 {
            let first = &failures[0];
            return Err(AppError::new(
                first.exit_code(),
                format!("All {n} subsamples failed; first error: {first}"),
            ));
        }
        if failed > 0 {
            warn!(
                failed,
                completed,
                first_error = %failures[0],
                "some subsamples failed; frequencies use completed subsamples only"
            );
        }

        let mut frequencies: Vec<InclusionFrequency> = candidates
            .into_iter()
            .zip(counts)
            .map(|(node, count)| InclusionFrequency {
                node,
                count,
                frequency: count as f64 / completed as f64,
                selected: false,
            })
            .collect();
        // Stable: ties keep dataset column order.
        frequencies.sort_by(|a, b| b.count.cmp(&a.count));

        let frequencies = apply_threshold(frequencies, config.pi_threshold)?;
        let graph = build_star_graph(&target, &frequencies)?;

        Ok(StabilityResult {
            target,
            graph,
            frequencies,
            pi_threshold: config.pi_threshold,
            subsample_size,
            requested_subsamples: n,
            completed_subsamples: completed,
            failed_subsamples: failed,
        })
    }

    /// Candidate indices adjacent to the target in subsample `i`.
    fn run_subsample(
        &self,
        i: usize,
        data: &DataSet,
        subsample_size: usize,
        target: &Node,
        candidate_index: &HashMap<&Node, usize>,
        config: &StabilityConfig,
    ) -> Result<Vec<usize>, AppError> {
        let mut rng = subsample_rng(config.seed, i);
        let sample = subsample(data, subsample_size, &mut rng)?;
        let score = self.builder.build(&sample, config.penalty_discount)?;
        let graph = self.search.search(&score, target)?;
        Ok(candidate_hits(&graph.adjacent_nodes(target), target, candidate_index))
    }
}

/// Map reported neighbours to candidate indices. The target and any node
/// outside the dataset are never counted.
fn candidate_hits(adjacent: &[Node], target: &Node, candidate_index: &HashMap<&Node, usize>) -> Vec<usize> {
    adjacent
        .iter()
        .filter(|node| *node != target)
        .filter_map(|node| candidate_index.get(node).copied())
        .collect()
}
