use super::layers::Layers;
use super::{Point, Spacing};

/// Consecutive sweeps moving nodes less than this count as converged.
const SETTLED: f64 = 0.5;

/// Assign top-to-bottom coordinates (node centers) to every node of `layers`.
///
/// Ranks stack along y. Within a rank, nodes are pulled toward the mean of
/// their neighbors in both adjacent ranks while keeping their order and the
/// minimum separation.
pub(crate) fn assign_coordinates(
	layers: &Layers,
	spacing: &Spacing,
	max_iterations: usize,
) -> Vec<Point> {
	let xs = cross_axis(layers, spacing, max_iterations);
	let ys = rank_axis(layers, spacing.rank_sep);
	xs.into_iter()
		.zip(ys)
		.map(|(x, y)| Point::new(x, y))
		.collect()
}

fn rank_axis(layers: &Layers, rank_sep: f64) -> Vec<f64> {
	let mut ys = vec![0.0; layers.nodes.len()];
	let mut top = 0.0;
	for rank in &layers.ranks {
		let height = rank
			.iter()
			.map(|&node| layers.nodes[node].size.height)
			.fold(0.0, f64::max);
		for &node in rank {
			ys[node] = top + height / 2.0;
		}
		top += height + rank_sep;
	}
	ys
}

fn cross_axis(layers: &Layers, spacing: &Spacing, max_iterations: usize) -> Vec<f64> {
	let mut xs = vec![0.0; layers.nodes.len()];

	// Start from each rank packed tightly and centered on x = 0.
	for rank in &layers.ranks {
		let desired = vec![0.0; rank.len()];
		let placed = pack(&desired, &separations(layers, rank, spacing));
		for (&node, x) in rank.iter().zip(placed) {
			xs[node] = x;
		}
	}

	let depth = layers.ranks.len();
	let mut settled = 0;
	for iteration in 0..max_iterations {
		let sweep: Vec<usize> = if iteration % 2 == 0 {
			(0..depth).collect()
		} else {
			(0..depth).rev().collect()
		};

		let mut shift: f64 = 0.0;
		for r in sweep {
			let rank = &layers.ranks[r];
			let desired: Vec<f64> = rank
				.iter()
				.map(|&node| {
					let neighbors = layers.upper[node].iter().chain(&layers.lower[node]);
					let (sum, count) = neighbors.fold((0.0, 0usize), |(sum, count), &n| {
						(sum + xs[n], count + 1)
					});
					if count == 0 {
						xs[node]
					} else {
						sum / count as f64
					}
				})
				.collect();

			let placed = pack(&desired, &separations(layers, rank, spacing));
			for (&node, x) in rank.iter().zip(placed) {
				shift = shift.max((xs[node] - x).abs());
				xs[node] = x;
			}
		}

		if shift < SETTLED {
			settled += 1;
			if settled >= 2 {
				break;
			}
		} else {
			settled = 0;
		}
	}
	xs
}

fn separations(layers: &Layers, rank: &[usize], spacing: &Spacing) -> Vec<f64> {
	rank.windows(2)
		.map(|pair| layers.separation(pair[0], pair[1], spacing.node_sep, spacing.edge_sep))
		.collect()
}

/// Place a row of nodes as close as possible to `desired` (least squares)
/// without reordering them and keeping `separations[i]` between node `i` and
/// `i + 1`.
///
/// Shifting each node by its cumulative separation turns this into isotonic
/// regression, solved with pool-adjacent-violators.
pub(crate) fn pack(desired: &[f64], separations: &[f64]) -> Vec<f64> {
	let mut offsets = Vec::with_capacity(desired.len());
	let mut acc = 0.0;
	for i in 0..desired.len() {
		if i > 0 {
			acc += separations[i - 1];
		}
		offsets.push(acc);
	}

	// (sum, count) per pooled block
	let mut blocks: Vec<(f64, usize)> = Vec::new();
	for (d, o) in desired.iter().zip(&offsets) {
		blocks.push((d - o, 1));
		while blocks.len() > 1 {
			let (s2, c2) = blocks[blocks.len() - 1];
			let (s1, c1) = blocks[blocks.len() - 2];
			if s1 / c1 as f64 <= s2 / c2 as f64 {
				break;
			}
			blocks.pop();
			let last = blocks.len() - 1;
			blocks[last] = (s1 + s2, c1 + c2);
		}
	}

	blocks
		.iter()
		.flat_map(|&(sum, count)| std::iter::repeat_n(sum / count as f64, count))
		.zip(offsets)
		.map(|(y, o)| y + o)
		.collect()
}
