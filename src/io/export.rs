//! Read/write result JSON files.
//!
//! A result file is the portable record of one run:
//! - the parameters it ran with
//! - the full inclusion-frequency table
//! - the selected star graph (with per-edge probabilities)

use std::fs::File;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::StabilityConfig;
use crate::error::AppError;
use crate::stability::StabilityResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultFile {
    pub tool: String,
    pub generated: DateTime<Utc>,
    pub config: StabilityConfig,
    pub result: StabilityResult,
}

/// Write a result JSON file.
pub fn write_result_json(
    path: &Path,
    result: &StabilityResult,
    config: &StabilityConfig,
) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::config(format!("Failed to create result JSON '{}': {e}", path.display()))
    })?;

    let out = ResultFile {
        tool: "cstar".to_string(),
        generated: Utc::now(),
        config: config.clone(),
        result: result.clone(),
    };

    serde_json::to_writer_pretty(file, &out)
        .map_err(|e| AppError::config(format!("Failed to write result JSON: {e}")))?;

    Ok(())
}

/// Read a result JSON file.
pub fn read_result_json(path: &Path) -> Result<ResultFile, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::config(format!("Failed to open result JSON '{}': {e}", path.display()))
    })?;
    let result: ResultFile = serde_json::from_reader(file)
        .map_err(|e| AppError::config(format!("Invalid result JSON: {e}")))?;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Node;
    use crate::graph::{EdgeListGraph, EdgeType};
    use crate::stability::InclusionFrequency;

    #[test]
    fn result_file_survives_disk() {
        let target = Node::new("y");
        let a = Node::new("a");
        let mut graph = EdgeListGraph::new([a.clone(), target.clone()]);
        graph.add_directed_edge(&a, &target).unwrap();
        let result = StabilityResult {
            target: target.clone(),
            graph,
            frequencies: vec![InclusionFrequency {
                node: a.clone(),
                count: 7,
                frequency: 0.7,
                selected: true,
            }],
            pi_threshold: 0.6,
            subsample_size: 25,
            requested_subsamples: 10,
            completed_subsamples: 10,
            failed_subsamples: 0,
        };
        let config = StabilityConfig::new("y");

        let path = std::env::temp_dir().join(format!("cstar_result_{}.json", std::process::id()));
        write_result_json(&path, &result, &config).unwrap();
        let loaded = read_result_json(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded.tool, "cstar");
        assert_eq!(loaded.config, config);
        assert_eq!(loaded.result, result);
        assert!(loaded.result.graph.edge(&a, &target).unwrap().probability_of(EdgeType::Nil).is_none());
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let err = read_result_json(Path::new("/definitely/not/here.json")).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
