//! End-to-end traces of the search algorithms

use algotrace_core::fixtures::SEARCH_SAMPLE;
use algotrace_core::{
    binary_search, kth_order_statistic, trace_sequence, BalanceVerifier, MemorySink, Operation, TraceConfig,
    TraceSummary,
};
use serde_json::Value;

fn compact() -> TraceConfig {
    TraceConfig {
        pretty: false,
        ..TraceConfig::default()
    }
}

fn search(data: Vec<i32>, key: i32) -> (isize, Value) {
    let sink = MemorySink::new();
    let (_, index) = trace_sequence(sink.clone(), &compact(), data, |v| {
        binary_search(&v.begin(), &v.end(), &key).index()
    })
    .unwrap();
    (index, sink.values().unwrap().remove(0))
}

fn last_comment(root: &Value) -> String {
    root["logs"]
        .as_array()
        .unwrap()
        .iter()
        .rev()
        .find(|node| node["type"] == "comment")
        .and_then(|node| node["message"].as_str())
        .unwrap_or_default()
        .to_string()
}

#[test]
fn binary_search_finds_every_key() {
    for (expected, key) in SEARCH_SAMPLE.iter().enumerate() {
        let (index, root) = search(SEARCH_SAMPLE.to_vec(), *key);
        assert_eq!(index, expected as isize, "key {key}");
        assert!(BalanceVerifier::verify(&root).is_valid);
        assert!(!last_comment(&root).contains("was not found"));
    }
}

#[test]
fn binary_search_reports_missing_keys() {
    for key in [-100, 1, 100, 1000] {
        let (index, root) = search(SEARCH_SAMPLE.to_vec(), key);
        assert_eq!(index, SEARCH_SAMPLE.len() as isize, "key {key}");
        assert!(last_comment(&root).contains("was not found"), "key {key}");

        let returned = root["logs"].as_array().unwrap().last().unwrap();
        assert_eq!(returned["name"], "Return");
        assert_eq!(returned["data"]["name"], "end");
    }
}

#[test]
fn binary_search_narrows_with_ranges_and_jumps() {
    let (_, root) = search(SEARCH_SAMPLE.to_vec(), 212);
    let summary = TraceSummary::from_value(&root);
    let ranges = summary.operation_count(Operation::SetRange);
    assert!(ranges >= 2);
    assert!(ranges <= 5, "{ranges} iterations for 9 elements");
    assert!(summary.operation_count(Operation::OffSet) >= ranges - 1);
}

#[test]
fn kth_order_statistic_matches_sorted_rank() {
    let input = vec![31, -7, 0, 12, 12, 5, -20, 8, 3];
    let mut sorted = input.clone();
    sorted.sort();
    for k in 0..input.len() {
        let sink = MemorySink::new();
        let (data, index) = trace_sequence(sink.clone(), &compact(), input.clone(), |v| {
            kth_order_statistic(&v.begin(), &v.end(), k).index()
        })
        .unwrap();
        assert_eq!(index, k as isize);
        assert_eq!(data[k], sorted[k], "rank {k}");
        assert!(data[..k].iter().all(|x| *x <= sorted[k]));
        assert!(data[k + 1..].iter().all(|x| *x >= sorted[k]));

        let root = sink.values().unwrap().remove(0);
        assert!(BalanceVerifier::verify(&root).is_valid);
    }
}

#[test]
fn kth_order_statistic_out_of_range() {
    let sink = MemorySink::new();
    let (data, index) = trace_sequence(sink.clone(), &compact(), vec![2, 1], |v| {
        kth_order_statistic(&v.begin(), &v.end(), 5).index()
    })
    .unwrap();
    assert_eq!(index, 2);
    assert_eq!(data, vec![2, 1]);

    let summary = TraceSummary::from_value(&sink.values().unwrap()[0]);
    assert_eq!(summary.errors, 1);
    assert_eq!(summary.returns, 1);
}
