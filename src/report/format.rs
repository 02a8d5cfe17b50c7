//! Plain-text reports for the terminal.
//!
//! Formatting stays here so the aggregator stays free of presentation and
//! output changes are localized.

use crate::domain::StabilityConfig;
use crate::graph::EdgeListGraph;
use crate::stability::StabilityResult;

/// Run header: parameters, subsample bookkeeping and the selected blanket.
pub fn format_run_summary(result: &StabilityResult, config: &StabilityConfig) -> String {
    let mut out = String::new();

    out.push_str("=== cstar - stability selection (Markov blanket) ===\n");
    out.push_str(&format!("Target: {}\n", result.target));
    out.push_str(&format!(
        "Subsamples: {} requested | {} completed | {} failed | {} rows each\n",
        result.requested_subsamples,
        result.completed_subsamples,
        result.failed_subsamples,
        result.subsample_size,
    ));
    out.push_str(&format!(
        "Parameters: percentSubsampleSize={} piThreshold={} penaltyDiscount={} seed={}\n",
        config.percent_subsample_size, result.pi_threshold, config.penalty_discount, config.seed,
    ));

    let selected: Vec<&str> = result.selected().iter().map(|n| n.name()).collect();
    out.push_str(&format!("\nSelected ({}): ", selected.len()));
    if selected.is_empty() {
        out.push_str("(none)");
    } else {
        out.push_str(&selected.join(", "));
    }
    out.push_str("\n\n");

    out.push_str(&result.graph.to_string());
    out
}

/// Inclusion-frequency table, top `top_n` rows (all rows if `top_n == 0`).
pub fn format_frequency_table(result: &StabilityResult, top_n: usize) -> String {
    let mut out = String::new();
    out.push_str(format!("{:<24} {:>8} {:>10} {:<8}", "variable", "count", "frequency", "selected").trim_end());
    out.push('\n');
    out.push_str(format!("{:-<24} {:-<8} {:-<10} {:-<8}", "", "", "", "").trim_end());
    out.push('\n');

    let take = if top_n == 0 { result.frequencies.len() } else { top_n };
    for f in result.frequencies.iter().take(take) {
        out.push_str(
            format!(
                "{:<24} {:>8} {:>10.3} {:<8}",
                truncate(f.node.name(), 24),
                f.count,
                f.frequency,
                if f.selected { "*" } else { "" },
            )
            .trim_end(),
        );
        out.push('\n');
    }
    out
}

/// Markov blanket of every node in a known graph (for simulated data).
pub fn format_true_blankets(graph: &EdgeListGraph) -> String {
    let mut out = String::from("True Markov blankets:\n");
    for node in graph.nodes() {
        let members: Vec<String> = graph
            .markov_blanket(node)
            .iter()
            .map(|n| n.name().to_string())
            .collect();
        out.push_str(&format!("  {:<8} {{{}}}\n", node.name(), members.join(", ")));
    }
    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Node;
    use crate::stability::InclusionFrequency;

    fn result() -> StabilityResult {
        let target = Node::new("y");
        let a = Node::new("a");
        let mut graph = EdgeListGraph::new([a.clone(), target.clone()]);
        graph.add_directed_edge(&a, &target).unwrap();
        StabilityResult {
            target,
            graph,
            frequencies: vec![
                InclusionFrequency { node: a, count: 8, frequency: 0.8, selected: true },
                InclusionFrequency { node: Node::new("b"), count: 1, frequency: 0.1, selected: false },
            ],
            pi_threshold: 0.5,
            subsample_size: 50,
            requested_subsamples: 10,
            completed_subsamples: 10,
            failed_subsamples: 0,
        }
    }

    #[test]
    fn summary_mentions_selection_and_edges() {
        let text = format_run_summary(&result(), &StabilityConfig::new("y"));
        assert!(text.contains("Target: y"));
        assert!(text.contains("Selected (1): a"));
        assert!(text.contains("a --> y"));
    }

    #[test]
    fn frequency_table_marks_selected_rows() {
        let text = format_frequency_table(&result(), 0);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[2].starts_with("a"));
        assert!(lines[2].ends_with('*'));
        assert!(!lines[3].ends_with('*'));

        assert_eq!(format_frequency_table(&result(), 1).lines().count(), 3);
    }

    #[test]
    fn truncate_long_names() {
        assert_eq!(truncate("abcdef", 4), "abc.");
        assert_eq!(truncate("abc", 4), "abc");
    }
}
