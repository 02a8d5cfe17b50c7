//! Synthetic linear-Gaussian SEM data with a known graph.
//!
//! Variables `X1..Xn` are generated in causal order. Each pair `i < j` gets an
//! edge `Xi -> Xj` with probability `edge_probability`, and
//!
//! `Xj = Σ_{i ∈ pa(j)} b_ij · Xi + e_j,  e_j ~ N(0, 1)`
//!
//! with `|b_ij|` uniform in `[coef_min, coef_max]` and a random sign.

use nalgebra::DMatrix;
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::data::dataset::DataSet;
use crate::domain::Node;
use crate::error::AppError;
use crate::graph::EdgeListGraph;

#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub num_variables: usize,
    pub num_rows: usize,
    pub edge_probability: f64,
    pub coef_min: f64,
    pub coef_max: f64,
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_variables: 10,
            num_rows: 500,
            edge_probability: 0.3,
            coef_min: 0.5,
            coef_max: 1.5,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SimulatedData {
    pub dataset: DataSet,
    pub true_graph: EdgeListGraph,
}

pub fn simulate_linear_sem(config: &SimulationConfig) -> Result<SimulatedData, AppError> {
    if config.num_variables < 2 {
        return Err(AppError::config("Simulation needs at least 2 variables."));
    }
    if config.num_rows < 2 {
        return Err(AppError::config("Simulation needs at least 2 rows."));
    }
    if !(config.edge_probability.is_finite() && (0.0..=1.0).contains(&config.edge_probability)) {
        return Err(AppError::config("Edge probability must be in [0, 1]."));
    }
    if !(config.coef_min.is_finite()
        && config.coef_max.is_finite()
        && config.coef_min > 0.0
        && config.coef_max >= config.coef_min)
    {
        return Err(AppError::config("Invalid coefficient range for simulation."));
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let noise = Normal::new(0.0, 1.0)
        .map_err(|e| AppError::compute(format!("Noise distribution error: {e}")))?;

    let p = config.num_variables;
    let nodes: Vec<Node> = (1..=p).map(|i| Node::new(format!("X{i}"))).collect();
    let mut graph = EdgeListGraph::new(nodes.clone());

    // coefficients[(i, j)] != 0 iff Xi -> Xj.
    let mut coefficients = DMatrix::<f64>::zeros(p, p);
    for j in 0..p {
        for i in 0..j {
            if rng.gen_bool(config.edge_probability) {
                let magnitude = rng.gen_range(config.coef_min..=config.coef_max);
                let sign = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
                coefficients[(i, j)] = sign * magnitude;
                graph.add_directed_edge(&nodes[i], &nodes[j])?;
            }
        }
    }

    let mut data = DMatrix::<f64>::zeros(config.num_rows, p);
    for r in 0..config.num_rows {
        for j in 0..p {
            let mut value = noise.sample(&mut rng);
            for i in 0..j {
                let b = coefficients[(i, j)];
                if b != 0.0 {
                    value += b * data[(r, i)];
                }
            }
            data[(r, j)] = value;
        }
    }

    Ok(SimulatedData {
        dataset: DataSet::new(nodes, data)?,
        true_graph: graph,
    })
}
