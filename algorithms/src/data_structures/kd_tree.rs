//! k-d tree over named points in `dims`-dimensional Euclidean space.
//!
//! Variables:
//!   nodes[i]     : KdNode          — arena; node i owns the i-th input point
//!   axis(node)   = depth mod dims  — coordinate the node splits on
//!   by_name      : HashMap<String, usize>
//!
//! Equations:
//!   build:         sort on axis, median becomes the node, recurse on halves
//!                  O(N log² N)
//!   dist(p, q)     = sqrt(Σ (p_a - q_a)²)
//!   plane(node, q) = q[axis] - node[axis]
//!   nearest(q, k): visit near side, then far side iff fewer than k found
//!                  or |plane| < worst distance kept
//!   radius(q, r):  visit far side iff |plane| <= r

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{AlgorithmError, Result};

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KdPoint {
    pub name: String,
    pub coords: Vec<f64>,
}

impl KdPoint {
    pub fn new(name: impl Into<String>, coords: impl Into<Vec<f64>>) -> Self {
        Self {
            name: name.into(),
            coords: coords.into(),
        }
    }

    pub fn distance_to(&self, target: &[f64]) -> f64 {
        self.coords
            .iter()
            .zip(target)
            .map(|(a, b)| (a - b) * (a - b))
            .sum::<f64>()
            .sqrt()
    }
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
struct KdNode {
    point: KdPoint,
    axis: usize,
    left: Option<usize>,
    right: Option<usize>,
}

/// Max-heap entry: the farthest candidate sits on top.
#[derive(Clone, Copy)]
struct Candidate {
    dist: f64,
    node: usize,
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.dist
            .total_cmp(&other.dist)
            .then(self.node.cmp(&other.node))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "KdTreeParts"))]
pub struct KdTree {
    nodes: Vec<KdNode>,
    root: Option<usize>,
    dims: usize,
    // Rebuilt from the points on load.
    #[cfg_attr(feature = "serde", serde(skip_serializing))]
    by_name: HashMap<String, usize>,
}

impl KdTree {
    /// Build a balanced tree. Every point must have exactly `dims` finite
    /// coordinates and a name no other point uses.
    pub fn build(points: Vec<KdPoint>, dims: usize) -> Result<Self> {
        let by_name = index_points(points.iter(), dims)?;
        let mut nodes: Vec<KdNode> = points
            .into_iter()
            .map(|point| KdNode { point, axis: 0, left: None, right: None })
            .collect();
        let mut order: Vec<usize> = (0..nodes.len()).collect();
        let root = split(&mut nodes, &mut order, 0, dims);
        tracing::debug!(points = nodes.len(), dims, "k-d tree built");
        Ok(Self { nodes, root, dims, by_name })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn dims(&self) -> usize {
        self.dims
    }

    pub fn get(&self, name: &str) -> Option<&KdPoint> {
        self.by_name.get(name).map(|&i| &self.nodes[i].point)
    }

    pub fn iter(&self) -> impl Iterator<Item = &KdPoint> {
        self.nodes.iter().map(|n| &n.point)
    }

    /// Up to `k` points closest to `target`, nearest first. Points sitting
    /// exactly on `target` are not their own neighbours and are skipped.
    pub fn nearest(&self, target: &[f64], k: usize) -> Result<Vec<&KdPoint>> {
        self.check_target(target)?;
        if k == 0 {
            return Ok(Vec::new());
        }
        let mut heap = BinaryHeap::with_capacity(k.min(self.len()) + 1);
        self.nearest_walk(self.root, target, k, &mut heap);
        Ok(heap
            .into_sorted_vec()
            .into_iter()
            .map(|c| &self.nodes[c.node].point)
            .collect())
    }

    /// Every point within `radius` of `target` (inclusive), nearest first.
    pub fn within_radius(&self, target: &[f64], radius: f64) -> Result<Vec<&KdPoint>> {
        self.check_target(target)?;
        if radius.is_nan() || radius < 0.0 {
            return Err(AlgorithmError::invalid_input(format!("radius {radius} is not a distance")));
        }
        let mut found = Vec::new();
        self.radius_walk(self.root, target, radius, &mut found);
        found.sort();
        Ok(found.into_iter().map(|c| &self.nodes[c.node].point).collect())
    }

    pub fn nearest_to_named(&self, name: &str, k: usize) -> Result<Vec<&KdPoint>> {
        let centre = self.named(name)?;
        self.nearest(&centre.coords, k)
    }

    pub fn within_radius_of_named(&self, name: &str, radius: f64) -> Result<Vec<&KdPoint>> {
        let centre = self.named(name)?;
        self.within_radius(&centre.coords, radius)
    }

    fn named(&self, name: &str) -> Result<&KdPoint> {
        self.get(name).ok_or_else(|| {
            tracing::debug!(name, "k-d tree lookup of unknown point");
            AlgorithmError::NotFound(name.to_string())
        })
    }

    fn check_target(&self, target: &[f64]) -> Result<()> {
        if target.len() != self.dims {
            return Err(AlgorithmError::invalid_input(format!(
                "query has {} coordinates, tree has {}",
                target.len(),
                self.dims
            )));
        }
        Ok(())
    }

    fn plane_offset(&self, i: usize, target: &[f64]) -> f64 {
        let node = &self.nodes[i];
        target[node.axis] - node.point.coords[node.axis]
    }

    fn sides(&self, i: usize, offset: f64) -> (Option<usize>, Option<usize>) {
        let node = &self.nodes[i];
        if offset < 0.0 {
            (node.left, node.right)
        } else {
            (node.right, node.left)
        }
    }

    fn nearest_walk(
        &self,
        at: Option<usize>,
        target: &[f64],
        k: usize,
        heap: &mut BinaryHeap<Candidate>,
    ) {
        let Some(i) = at else { return };
        let dist = self.nodes[i].point.distance_to(target);
        if dist > 0.0 {
            if heap.len() < k {
                heap.push(Candidate { dist, node: i });
            } else if heap.peek().is_some_and(|worst| dist < worst.dist) {
                heap.pop();
                heap.push(Candidate { dist, node: i });
            }
        }

        let offset = self.plane_offset(i, target);
        let (near, far) = self.sides(i, offset);
        self.nearest_walk(near, target, k, heap);
        if heap.len() < k || heap.peek().is_some_and(|worst| offset.abs() < worst.dist) {
            self.nearest_walk(far, target, k, heap);
        }
    }

    fn radius_walk(
        &self,
        at: Option<usize>,
        target: &[f64],
        radius: f64,
        found: &mut Vec<Candidate>,
    ) {
        let Some(i) = at else { return };
        let dist = self.nodes[i].point.distance_to(target);
        if dist <= radius {
            found.push(Candidate { dist, node: i });
        }

        let offset = self.plane_offset(i, target);
        let (near, far) = self.sides(i, offset);
        self.radius_walk(near, target, radius, found);
        if offset.abs() <= radius {
            self.radius_walk(far, target, radius, found);
        }
    }
}

/// Check every point against `dims` and map names to their positions.
fn index_points<'a>(
    points: impl Iterator<Item = &'a KdPoint>,
    dims: usize,
) -> Result<HashMap<String, usize>> {
    if dims == 0 {
        return Err(AlgorithmError::invalid_input("k-d tree needs at least one dimension"));
    }
    let mut by_name = HashMap::new();
    for (i, p) in points.enumerate() {
        if p.coords.len() != dims {
            return Err(AlgorithmError::invalid_input(format!(
                "point `{}` has {} coordinates, expected {dims}",
                p.name,
                p.coords.len()
            )));
        }
        if p.coords.iter().any(|c| !c.is_finite()) {
            return Err(AlgorithmError::invalid_input(format!(
                "point `{}` has a non-finite coordinate",
                p.name
            )));
        }
        if by_name.insert(p.name.clone(), i).is_some() {
            return Err(AlgorithmError::invalid_input(format!(
                "duplicate point name `{}`",
                p.name
            )));
        }
    }
    Ok(by_name)
}

/// Serialized form of [`KdTree`], validated before it answers queries.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct KdTreeParts {
    nodes: Vec<KdNode>,
    root: Option<usize>,
    dims: usize,
}

#[cfg(feature = "serde")]
impl TryFrom<KdTreeParts> for KdTree {
    type Error = AlgorithmError;

    fn try_from(parts: KdTreeParts) -> Result<Self> {
        let KdTreeParts { nodes, root, dims } = parts;
        let by_name = index_points(nodes.iter().map(|node| &node.point), dims)?;
        if root.is_none() != nodes.is_empty() {
            return Err(AlgorithmError::invalid_input(format!(
                "root {root:?} does not fit {} nodes",
                nodes.len()
            )));
        }

        // Walk from the root carrying the box each subtree must stay inside;
        // every node is reached exactly once.
        let mut seen = vec![false; nodes.len()];
        let mut stack: Vec<(usize, Vec<(f64, f64)>)> = root
            .map(|r| (r, vec![(f64::NEG_INFINITY, f64::INFINITY); dims]))
            .into_iter()
            .collect();
        while let Some((i, bounds)) = stack.pop() {
            if i >= nodes.len() || std::mem::replace(&mut seen[i], true) {
                return Err(AlgorithmError::invalid_input(format!(
                    "node link {i} is out of range or shared"
                )));
            }
            let node = &nodes[i];
            if node.axis >= dims {
                return Err(AlgorithmError::invalid_input(format!(
                    "node {i} splits on axis {} of {dims}",
                    node.axis
                )));
            }
            let outside = node
                .point
                .coords
                .iter()
                .zip(&bounds)
                .any(|(c, &(lo, hi))| *c < lo || *c > hi);
            if outside {
                return Err(AlgorithmError::invalid_input(format!(
                    "point `{}` is on the wrong side of a splitting plane",
                    node.point.name
                )));
            }
            let at = node.point.coords[node.axis];
            if let Some(left) = node.left {
                let mut below = bounds.clone();
                below[node.axis].1 = at;
                stack.push((left, below));
            }
            if let Some(right) = node.right {
                let mut above = bounds;
                above[node.axis].0 = at;
                stack.push((right, above));
            }
        }
        if let Some(i) = seen.iter().position(|reached| !reached) {
            return Err(AlgorithmError::invalid_input(format!(
                "node {i} is not reachable from the root"
            )));
        }
        Ok(Self { nodes, root, dims, by_name })
    }
}

fn split(nodes: &mut [KdNode], order: &mut [usize], depth: usize, dims: usize) -> Option<usize> {
    let axis = depth % dims;
    order.sort_by(|&a, &b| {
        nodes[a].point.coords[axis].total_cmp(&nodes[b].point.coords[axis])
    });
    let (lower, rest) = order.split_at_mut(order.len() / 2);
    let (median, upper) = rest.split_first_mut()?;
    let here = *median;
    let left = split(nodes, lower, depth + 1, dims);
    let right = split(nodes, upper, depth + 1, dims);
    let node = &mut nodes[here];
    node.axis = axis;
    node.left = left;
    node.right = right;
    Some(here)
}
