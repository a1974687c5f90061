//! Walks through every structure in the crate once.
//!
//! Run with:
//!   cargo run --example tour

use algorithms::computation_map::ALGORITHMS_COMPUTATION_MAP;
use algorithms::data_structures::kd_tree::{KdPoint, KdTree};
use algorithms::data_structures::linked_list::LinkedList;
use algorithms::data_structures::segment_tree::SegmentTree;
use algorithms::data_structures::union_find::UnionFind;
use algorithms::graph::bridges::find_bridges;
use algorithms::graph::cycle_detection::detect_cycle;
use algorithms::searching::binary_search::binary_search;
use algorithms::string_algorithms::trie::Trie;

fn main() -> anyhow::Result<()> {
    println!("=== Algorithms Computation Map ===");
    for (path, comp_type, cost) in ALGORITHMS_COMPUTATION_MAP.iter() {
        println!("{:<40} | {:<34} | {}", path, comp_type, cost);
    }

    println!("\n=== Sanity Check Examples ===");

    // ── Segment tree ─────────────────────────────────────────────────────
    {
        let mut tree = SegmentTree::build(&[1, 3, 5])?;
        println!("range_sum(0, 2) = {}", tree.range_sum(0, 2)?);
        tree.update(1, 2)?;
        println!("after update(1, 2): range_sum(0, 2) = {}", tree.range_sum(0, 2)?);
        if let Err(e) = tree.range_sum(2, 5) {
            println!("range_sum(2, 5) rejected: {e}");
        }
    }

    // ── Union-find ───────────────────────────────────────────────────────
    {
        let mut uf = UnionFind::new(["ada", "bob", "cy", "dee"]);
        uf.union(&"ada", &"bob")?;
        uf.union(&"cy", &"dee")?;
        println!(
            "ada~bob: {}, ada~cy: {}, sets: {}",
            uf.is_connected(&"ada", &"bob")?,
            uf.is_connected(&"ada", &"cy")?,
            uf.set_count()
        );
    }

    // ── Trie ─────────────────────────────────────────────────────────────
    {
        let mut trie = Trie::new();
        trie.extend(["tea", "ten", "inn"]);
        println!(
            "trie: find(\"ten\") = {}, is_prefix(\"te\") = {}, nodes = {}",
            trie.find("ten"),
            trie.is_prefix("te"),
            trie.size()
        );
    }

    // ── Binary search ────────────────────────────────────────────────────
    {
        let nums = [1, 2, 3, 4, 99, 99, 99];
        println!("binary_search(99) = {:?}", binary_search(&nums, &99));
        println!("binary_search(7)  = {:?}", binary_search(&nums, &7));
    }

    // ── Cycle detection ──────────────────────────────────────────────────
    {
        let mut list: LinkedList<char> = "abcdef".chars().collect();
        let mut ids = Vec::new();
        let mut cur = list.head();
        while let Some(id) = cur {
            ids.push(id);
            cur = list.next(id);
        }
        list.set_next(ids[5], Some(ids[2]));
        match detect_cycle(&list, list.head()) {
            Some(entry) => println!("cycle enters at {:?}", list.value(entry)),
            None => println!("no cycle"),
        }
    }

    // ── k-d tree ─────────────────────────────────────────────────────────
    {
        let tree = KdTree::build(
            vec![
                KdPoint::new("a", [2.0, 3.0]),
                KdPoint::new("b", [5.0, 4.0]),
                KdPoint::new("c", [9.0, 6.0]),
                KdPoint::new("d", [4.0, 7.0]),
            ],
            2,
        )?;
        let near = tree.nearest_to_named("b", 2)?;
        let near: Vec<&str> = near.iter().map(|p| p.name.as_str()).collect();
        println!("two nearest to b: {near:?}");
    }

    // ── Bridges ──────────────────────────────────────────────────────────
    {
        let edges = [(0, 1), (1, 2), (2, 0), (2, 3)];
        println!("bridges: {:?}", find_bridges(&edges));
    }

    Ok(())
}
