use petgraph::graphmap::DiGraphMap;
use petgraph::Direction;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::hash::Hash;

/// Order the nodes of each layer to reduce edge crossings
///
/// Each iteration runs a barycenter sweep down the layers then back up,
/// keeping the best ordering seen so far. The result is then refined by
/// swapping adjacent nodes while it removes crossings.
///
/// Only edges between adjacent layers are counted, edges spanning several
/// layers don't take part in the ordering.
pub(crate) fn minimize_crossings<N>(
    graph: &DiGraphMap<N, ()>,
    layers: Vec<Vec<N>>,
    max_iterations: usize,
) -> (Vec<Vec<N>>, usize)
where
    N: Copy + Ord + Hash,
{
    let mut best_crossings = count_crossings(graph, &layers);
    let mut best = layers.clone();
    let mut layers = layers;

    for _ in 0..max_iterations {
        if best_crossings == 0 {
            break;
        }

        for index in 1..layers.len() {
            let (fixed, free) = layers.split_at_mut(index);
            sort_by_barycenter(graph, &fixed[index - 1], &mut free[0], Direction::Incoming);
        }
        for index in (0..layers.len().saturating_sub(1)).rev() {
            let (free, fixed) = layers.split_at_mut(index + 1);
            sort_by_barycenter(graph, &fixed[0], &mut free[index], Direction::Outgoing);
        }

        let crossings = count_crossings(graph, &layers);
        if crossings < best_crossings {
            best_crossings = crossings;
            best = layers.clone();
        } else {
            break;
        }
    }

    let mut layers = best;
    for _ in 0..max_iterations {
        if best_crossings == 0 {
            break;
        }

        let mut improved = false;
        for layer_index in 0..layers.len() {
            for i in 0..layers[layer_index].len().saturating_sub(1) {
                // A swap only changes crossings with the neighbouring layers
                let before = crossings_around(graph, &layers, layer_index);
                layers[layer_index].swap(i, i + 1);
                let after = crossings_around(graph, &layers, layer_index);

                if after < before {
                    best_crossings -= before - after;
                    improved = true;
                } else {
                    layers[layer_index].swap(i, i + 1);
                }
            }
        }

        if !improved {
            break;
        }
    }

    (layers, best_crossings)
}

/// Sort a layer by the mean index of its neighbours in the fixed layer
///
/// Nodes without neighbours there keep their current index as key. The
/// sort is stable so ties keep their previous relative order.
fn sort_by_barycenter<N>(
    graph: &DiGraphMap<N, ()>,
    fixed: &[N],
    free: &mut [N],
    towards: Direction,
) where
    N: Copy + Ord + Hash,
{
    let fixed_index: HashMap<N, usize> = fixed.iter().enumerate().map(|(i, &n)| (n, i)).collect();

    let mut keyed: Vec<(f32, N)> = free
        .iter()
        .enumerate()
        .map(|(current, &node)| {
            let (sum, count) = graph
                .neighbors_directed(node, towards)
                .filter_map(|neighbor| fixed_index.get(&neighbor))
                .fold((0usize, 0usize), |(sum, count), &i| (sum + i, count + 1));

            let key = if count > 0 {
                sum as f32 / count as f32
            } else {
                current as f32
            };
            (key, node)
        })
        .collect();

    keyed.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

    for (slot, (_, node)) in free.iter_mut().zip(keyed) {
        *slot = node;
    }
}

/// Count the number of edge crossings between adjacent layers
pub(crate) fn count_crossings<N>(graph: &DiGraphMap<N, ()>, layers: &[Vec<N>]) -> usize
where
    N: Copy + Ord + Hash,
{
    layers
        .windows(2)
        .map(|pair| count_pair_crossings(graph, &pair[0], &pair[1]))
        .sum()
}

/// Crossings between the layer and the layers right above and below it
fn crossings_around<N>(graph: &DiGraphMap<N, ()>, layers: &[Vec<N>], index: usize) -> usize
where
    N: Copy + Ord + Hash,
{
    let start = index.saturating_sub(1);
    let end = (index + 2).min(layers.len());
    count_crossings(graph, &layers[start..end])
}

/// Count the crossings of the edges going from `upper` to `lower`
fn count_pair_crossings<N>(graph: &DiGraphMap<N, ()>, upper: &[N], lower: &[N]) -> usize
where
    N: Copy + Ord + Hash,
{
    let lower_index: HashMap<N, usize> = lower.iter().enumerate().map(|(i, &n)| (n, i)).collect();

    // (upper index, lower index) of every edge between the two layers,
    // sorted by upper index
    let segments: Vec<(usize, usize)> = upper
        .iter()
        .enumerate()
        .flat_map(|(upper, &node)| {
            graph
                .neighbors_directed(node, Direction::Outgoing)
                .filter_map(|succ| lower_index.get(&succ).map(|&lower| (upper, lower)))
                .collect::<Vec<_>>()
        })
        .collect();

    let mut crossings = 0;
    for (i, &(upper1, lower1)) in segments.iter().enumerate() {
        for &(upper2, lower2) in &segments[i + 1..] {
            if upper1 < upper2 && lower1 > lower2 {
                crossings += 1;
            }
        }
    }

    crossings
}
