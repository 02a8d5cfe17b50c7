//! Shared "search pipeline" used by the CLI subcommands.
//!
//! load CSV -> stability selection -> result
//!
//! Presentation (printing, exports) stays in `app`.

use std::path::Path;

use crate::data::DataSet;
use crate::domain::StabilityConfig;
use crate::error::AppError;
use crate::io::load_dataset;
use crate::score::SemBicScoreBuilder;
use crate::search::ForwardBackwardMb;
use crate::stability::{StabilitySelection, StabilityResult};

/// All computed outputs of a single `cstar search` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub data: DataSet,
    pub result: StabilityResult,
}

/// Load the dataset and run stability selection with SEM BIC and the
/// forward-backward search.
pub fn run_search(
    data_path: &Path,
    delimiter: u8,
    config: &StabilityConfig,
    max_blanket_size: Option<usize>,
) -> Result<RunOutput, AppError> {
    // Reject bad parameters before paying for the load.
    config.validate()?;
    let selection = default_selection(max_blanket_size)?;
    let data = load_dataset(data_path, delimiter)?;
    let result = selection.search(&data, config)?;
    Ok(RunOutput { data, result })
}

fn default_selection(
    max_blanket_size: Option<usize>,
) -> Result<StabilitySelection<SemBicScoreBuilder, ForwardBackwardMb>, AppError> {
    match max_blanket_size {
        Some(0) => Err(AppError::config("maxBlanketSize must be >= 1.")),
        Some(max) => Ok(StabilitySelection::new(
            SemBicScoreBuilder,
            ForwardBackwardMb::with_max_blanket_size(max),
        )),
        None => Ok(StabilitySelection::sem_bic()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{SimulationConfig, simulate_linear_sem};
    use crate::io::write_dataset;

    #[test]
    fn pipeline_runs_from_csv() {
        let sim = simulate_linear_sem(&SimulationConfig {
            num_variables: 4,
            num_rows: 200,
            seed: 5,
            ..SimulationConfig::default()
        })
        .unwrap();
        let path = std::env::temp_dir().join(format!("cstar_pipeline_{}.csv", std::process::id()));
        write_dataset(&path, &sim.dataset).unwrap();

        let config = StabilityConfig {
            num_subsamples: 5,
            parallelism: 2,
            ..StabilityConfig::new("X2")
        };
        let out = run_search(&path, b',', &config, None);
        let capped = run_search(&path, b',', &config, Some(1));
        let _ = std::fs::remove_file(&path);

        let out = out.unwrap();
        assert_eq!(out.data.num_columns(), 4);
        assert_eq!(out.result.frequencies.len(), 3);
        assert_eq!(out.result.completed_subsamples, 5);

        // One member per subsample at most, so counts sum to <= numSubsamples.
        let capped = capped.unwrap();
        let total: usize = capped.result.frequencies.iter().map(|f| f.count).sum();
        assert!(total <= 5, "total={total}");
    }

    #[test]
    fn zero_blanket_cap_is_rejected() {
        let err = run_search(Path::new("/no/such/file.csv"), b',', &StabilityConfig::new("X1"), Some(0))
            .unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.message().contains("maxBlanketSize"));
    }

    #[test]
    fn invalid_config_fails_before_reading_data() {
        let config = StabilityConfig {
            num_subsamples: 0,
            ..StabilityConfig::new("X1")
        };
        let err = run_search(Path::new("/no/such/file.csv"), b',', &config, None).unwrap_err();
        assert!(err.message().contains("numSubsamples"));
    }
}
