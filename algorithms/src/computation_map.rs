/// Mapping of modules in algorithms/src to the kind of computation
/// they perform and the cost of their main operation
pub const ALGORITHMS_COMPUTATION_MAP: &[(&str, &str, &str)] = &[
    // Searching
    ("searching/binary_search.rs", "Search", "O(log n)"),
    // Data structures
    (
        "data_structures/segment_tree.rs",
        "Range-sum query / point update",
        "O(log n)",
    ),
    (
        "data_structures/union_find.rs",
        "Disjoint-set union",
        "O(α(n)) amortised",
    ),
    (
        "data_structures/kd_tree.rs",
        "Spatial nearest-neighbour search",
        "O(log n) average",
    ),
    (
        "data_structures/linked_list.rs",
        "Data structure operations",
        "O(1)",
    ),
    // Graph
    (
        "graph/cycle_detection.rs",
        "Cycle detection",
        "O(n) time, O(1) space",
    ),
    ("graph/bridges.rs", "Graph connectivity", "O(V + E)"),
    // String algorithms
    (
        "string_algorithms/trie.rs",
        "Prefix lookup",
        "O(|word|)",
    ),
];
