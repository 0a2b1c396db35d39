use super::LayeredLayout;
use crate::{NodeSizes, Point, Vec2};
use petgraph::graphmap::DiGraphMap;
use petgraph::Direction;
use std::collections::HashMap;
use std::hash::Hash;

/// Node coordinates are computed along two axes before being mapped on x/y:
/// the rank axis, along which layers follow each other, and the order axis,
/// along which the nodes of a layer are placed.
struct Extents<'a, S> {
    sizes: &'a S,
    horizontal: bool,
}

impl<S> Extents<'_, S> {
    /// Size of the node with `x` along the order axis and `y` along the rank axis
    fn get<N>(&self, node: N) -> Vec2
    where
        S: NodeSizes<N>,
    {
        let size = self.sizes.size(node);
        if self.horizontal {
            size.transpose()
        } else {
            size
        }
    }
}

/// Assign node centers based on the layer structure and sizes
pub(crate) fn assign_coordinates<N, S>(
    layers: &[Vec<N>],
    graph: &DiGraphMap<N, ()>,
    sizes: &S,
    options: &LayeredLayout,
) -> HashMap<N, Point>
where
    N: Copy + Ord + Hash,
    S: NodeSizes<N>,
{
    let extents = Extents {
        sizes,
        horizontal: options.direction.is_horizontal(),
    };

    let (ranks, rank_length) = assign_rank_coordinates(layers, &extents, options.rank_sep);
    let starts = assign_order_coordinates(
        layers,
        graph,
        &extents,
        options.node_sep,
        options.max_position_iterations,
    );

    starts
        .into_iter()
        .map(|(node, start)| {
            let order = start + extents.get(node).x / 2.0;
            let mut rank = ranks[&node];
            if options.direction.is_reversed() {
                rank = rank_length - rank;
            }

            let center = if options.direction.is_horizontal() {
                Point::new(rank, order)
            } else {
                Point::new(order, rank)
            };
            (node, center)
        })
        .collect()
}

/// Center of each node along the rank axis, and the total length of that axis
///
/// Every layer is as thick as its thickest node, nodes are centered in it.
fn assign_rank_coordinates<N, S>(
    layers: &[Vec<N>],
    extents: &Extents<'_, S>,
    rank_sep: f32,
) -> (HashMap<N, f32>, f32)
where
    N: Copy + Ord + Hash,
    S: NodeSizes<N>,
{
    let mut ranks = HashMap::new();
    let mut start = 0.0;

    for (layer_index, layer) in layers.iter().enumerate() {
        if layer_index > 0 {
            start += rank_sep;
        }

        let thickness = layer
            .iter()
            .map(|&node| extents.get(node).y)
            .fold(0.0, f32::max);

        for &node in layer {
            ranks.insert(node, start + thickness / 2.0);
        }
        start += thickness;
    }

    (ranks, start)
}

/// Leading edge of each node along the order axis
///
/// Layers start packed, then alternate sweeps move every node towards the
/// barycenter of its neighbours in the layers above (down sweep) or below
/// (up sweep), without changing the order within the layer and keeping at
/// least `node_sep` between siblings.
fn assign_order_coordinates<N, S>(
    layers: &[Vec<N>],
    graph: &DiGraphMap<N, ()>,
    extents: &Extents<'_, S>,
    node_sep: f32,
    max_iterations: usize,
) -> HashMap<N, f32>
where
    N: Copy + Ord + Hash,
    S: NodeSizes<N>,
{
    let mut starts = HashMap::new();

    // Minimum offset of each node from the first one of its layer
    let offsets: Vec<Vec<f32>> = layers
        .iter()
        .map(|layer| {
            let mut offset = 0.0;
            layer
                .iter()
                .map(|&node| {
                    let current = offset;
                    offset += extents.get(node).x + node_sep;
                    current
                })
                .collect()
        })
        .collect();

    for (layer, offsets) in layers.iter().zip(&offsets) {
        for (&node, &offset) in layer.iter().zip(offsets) {
            starts.insert(node, offset);
        }
    }

    for _ in 0..max_iterations {
        let mut changed = false;

        for layer_index in 1..layers.len() {
            changed |= align_layer(
                &layers[layer_index],
                &offsets[layer_index],
                graph,
                extents,
                &mut starts,
                Direction::Incoming,
            );
        }
        for layer_index in (0..layers.len().saturating_sub(1)).rev() {
            changed |= align_layer(
                &layers[layer_index],
                &offsets[layer_index],
                graph,
                extents,
                &mut starts,
                Direction::Outgoing,
            );
        }

        if !changed {
            break;
        }
    }

    normalize(&mut starts);
    starts
}

/// Move the nodes of a layer towards their neighbours, returns whether any
/// node moved noticeably
fn align_layer<N, S>(
    layer: &[N],
    offsets: &[f32],
    graph: &DiGraphMap<N, ()>,
    extents: &Extents<'_, S>,
    starts: &mut HashMap<N, f32>,
    towards: Direction,
) -> bool
where
    N: Copy + Ord + Hash,
    S: NodeSizes<N>,
{
    let current: &HashMap<N, f32> = starts;
    let desired: Vec<f32> = layer
        .iter()
        .map(|&node| {
            let half = extents.get(node).x / 2.0;
            match barycenter(node, graph, extents, current, towards) {
                Some(center) => center - half,
                None => current[&node],
            }
        })
        .collect();

    let mut changed = false;
    for (&node, start) in layer.iter().zip(pack(&desired, offsets)) {
        let Some(current) = starts.get_mut(&node) else {
            continue;
        };

        if (start - *current).abs() > 0.1 {
            changed = true;
        }
        *current = start;
    }

    changed
}

/// Mean center of the neighbours of the node in the given direction
fn barycenter<N, S>(
    node: N,
    graph: &DiGraphMap<N, ()>,
    extents: &Extents<'_, S>,
    starts: &HashMap<N, f32>,
    towards: Direction,
) -> Option<f32>
where
    N: Copy + Ord + Hash,
    S: NodeSizes<N>,
{
    let mut sum = 0.0;
    let mut count = 0;

    for neighbor in graph.neighbors_directed(node, towards) {
        if let Some(start) = starts.get(&neighbor) {
            sum += start + extents.get(neighbor).x / 2.0;
            count += 1;
        }
    }

    (count > 0).then(|| sum / count as f32)
}

/// Closest positions to `desired` (least squares) that keep every node at
/// least its offset after the first one
///
/// Subtracting the offsets turns the constraint into "non-decreasing", which
/// is solved by pooling adjacent violators: overlapping nodes are merged into
/// blocks placed at the mean of their wishes.
fn pack(desired: &[f32], offsets: &[f32]) -> Vec<f32> {
    // (sum, count) of the shifted wishes in each block
    let mut blocks: Vec<(f32, usize)> = Vec::with_capacity(desired.len());

    for (wish, offset) in desired.iter().zip(offsets) {
        blocks.push((wish - offset, 1));

        while let [.., (sum1, count1), (sum2, count2)] = blocks[..] {
            if sum1 / count1 as f32 <= sum2 / count2 as f32 {
                break;
            }
            blocks.truncate(blocks.len() - 2);
            blocks.push((sum1 + sum2, count1 + count2));
        }
    }

    blocks
        .into_iter()
        .flat_map(|(sum, count)| std::iter::repeat(sum / count as f32).take(count))
        .zip(offsets)
        .map(|(base, offset)| base + offset)
        .collect()
}

/// Shift positions so that the smallest one is 0
fn normalize<N>(starts: &mut HashMap<N, f32>)
where
    N: Copy + Ord + Hash,
{
    let min = starts.values().copied().reduce(f32::min).unwrap_or(0.0);

    for start in starts.values_mut() {
        *start -= min;
    }
}
