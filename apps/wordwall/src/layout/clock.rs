//! Clock vocabulary: sentences that let a wall tell the time in words.
//!
//! The sentences are merged through the regular [`GraphBuilder`], so words shared with
//! the user corpus merge by key and cycle avoidance still applies.

use crate::layout::graph::{GraphBuilder, NodeId, WordGraph};

const HOURS: [&str; 12] = [
    "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten", "eleven",
    "twelve",
];
const TEENS: [&str; 10] = [
    "ten",
    "eleven",
    "twelve",
    "thirteen",
    "fourteen",
    "fifteen",
    "sixteen",
    "seventeen",
    "eighteen",
    "nineteen",
];
const DECADES: [&str; 4] = ["twenty", "thirty", "forty", "fifty"];

/// Every time phrase, hour by hour: "it is five on the clock", "it is five oh seven",
/// "it is five fifteen", "it is five forty two", then the quarter and half phrases.
pub fn clock_sentences() -> Vec<String> {
    let digits = &HOURS[..9];
    let mut out = Vec::new();

    for hour in HOURS {
        out.push(format!("it is {hour} on the clock"));
        for digit in digits {
            out.push(format!("it is {hour} oh {digit}"));
        }
        for teen in TEENS {
            out.push(format!("it is {hour} {teen}"));
        }
        for decade in DECADES {
            out.push(format!("it is {hour} {decade}"));
            for digit in digits {
                out.push(format!("it is {hour} {decade} {digit}"));
            }
        }
    }
    for hour in HOURS {
        out.push(format!("it is quarter past {hour}"));
        out.push(format!("it is half past {hour}"));
        out.push(format!("it is quarter till {hour}"));
    }

    out
}

/// Adds the clock sentences to `graph` and returns the clock's root.
pub fn merge_clock(graph: WordGraph) -> (WordGraph, Option<NodeId>) {
    let mut builder = GraphBuilder::extend(graph);
    let mut root = None;
    for sentence in clock_sentences() {
        let tokens: Vec<&str> = sentence.split_whitespace().collect();
        let path = builder.add_sentence(&tokens);
        root = root.or(path.first().copied());
    }
    (builder.finish(), root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::flatten::{flatten, PassOrder};
    use crate::layout::graph::build_graph;

    #[test]
    fn test_sentence_count_and_samples() {
        let sentences = clock_sentences();
        // per hour: 1 + 9 + 10 + 4 * 10, then 3 phrases per hour
        assert_eq!(sentences.len(), 12 * 60 + 12 * 3);
        assert!(sentences.contains(&"it is five oh seven".to_string()));
        assert!(sentences.contains(&"it is ten fifteen".to_string()));
        assert!(sentences.contains(&"it is three forty two".to_string()));
        assert!(sentences.contains(&"it is half past one".to_string()));
        assert!(sentences.contains(&"it is quarter till six".to_string()));
        assert!(sentences.contains(&"it is twelve on the clock".to_string()));
    }

    #[test]
    fn test_clock_merges_into_existing_graph() {
        let graph = build_graph([["it", "is", "late"]], false);
        let before = graph.len();
        let (graph, root) = merge_clock(graph);

        assert!(graph.len() > before);
        // "it" already exists and is already a root
        assert_eq!(root, graph.lookup("it"));
        assert_eq!(graph.roots().len(), 1);
        assert!(graph.is_acyclic());
    }

    #[test]
    fn test_clock_only_graph_flattens() {
        let (graph, root) = merge_clock(WordGraph::new(false));
        assert!(root.is_some());
        assert!(graph.is_acyclic());
        let order = flatten(&graph, PassOrder::Insertion).unwrap();
        assert_eq!(order.len(), graph.len());
    }
}
