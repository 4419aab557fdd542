use super::layers::Layers;

/// Sweeps without improvement before giving up.
const PATIENCE: usize = 4;

#[derive(Clone, Copy)]
enum Side {
	Upper,
	Lower,
}

/// Reorder nodes within ranks using the barycenter heuristic.
///
/// Sweeps alternate downward (ordering each rank by its upper neighbors) and
/// upward (by its lower neighbors). The best ordering seen is kept, so the
/// result never has more crossings than the initial one.
pub(crate) fn minimize_crossings(layers: &mut Layers, max_sweeps: usize) -> usize {
	let mut best = layers.ranks.clone();
	let mut best_crossings = count_crossings(layers);
	let mut stale = 0;
	let depth = layers.ranks.len();

	for sweep in 0..max_sweeps {
		if best_crossings == 0 {
			break;
		}

		if sweep % 2 == 0 {
			for rank in 1..depth {
				reorder(layers, rank, Side::Upper);
			}
		} else {
			for rank in (0..depth.saturating_sub(1)).rev() {
				reorder(layers, rank, Side::Lower);
			}
		}

		let crossings = count_crossings(layers);
		if crossings < best_crossings {
			best = layers.ranks.clone();
			best_crossings = crossings;
			stale = 0;
		} else {
			stale += 1;
			if stale >= PATIENCE {
				break;
			}
		}
	}

	layers.ranks = best;
	best_crossings
}

fn reorder(layers: &mut Layers, rank: usize, side: Side) {
	let fixed = match side {
		Side::Upper => &layers.ranks[rank - 1],
		Side::Lower => &layers.ranks[rank + 1],
	};
	let mut slot = vec![0usize; layers.nodes.len()];
	for (i, &node) in fixed.iter().enumerate() {
		slot[node] = i;
	}

	let current = &layers.ranks[rank];
	let barycenters: Vec<Option<f64>> = current
		.iter()
		.map(|&node| {
			let neighbors = match side {
				Side::Upper => &layers.upper[node],
				Side::Lower => &layers.lower[node],
			};
			if neighbors.is_empty() {
				return None;
			}
			let sum: usize = neighbors.iter().map(|&n| slot[n]).sum();
			Some(sum as f64 / neighbors.len() as f64)
		})
		.collect();

	// Nodes without neighbors on the fixed side keep their slot.
	let mut sortable: Vec<(f64, usize, usize)> = current
		.iter()
		.zip(&barycenters)
		.enumerate()
		.filter_map(|(i, (&node, bary))| bary.map(|b| (b, i, node)))
		.collect();
	sortable.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
	let mut sorted = sortable.into_iter().map(|(_, _, node)| node);

	let reordered: Vec<usize> = current
		.iter()
		.zip(&barycenters)
		.map(|(&node, bary)| match bary {
			Some(_) => sorted.next().unwrap_or(node),
			None => node,
		})
		.collect();
	layers.ranks[rank] = reordered;
}

/// Count pairwise edge crossings between all adjacent ranks.
pub(crate) fn count_crossings(layers: &Layers) -> usize {
	let mut slot = vec![0usize; layers.nodes.len()];
	for rank in &layers.ranks {
		for (i, &node) in rank.iter().enumerate() {
			slot[node] = i;
		}
	}

	let mut crossings = 0;
	for rank in &layers.ranks {
		let segments: Vec<(usize, usize)> = rank
			.iter()
			.flat_map(|&node| layers.lower[node].iter().map(move |&n| (node, n)))
			.map(|(above, below)| (slot[above], slot[below]))
			.collect();

		for (i, a) in segments.iter().enumerate() {
			for b in &segments[i + 1..] {
				if (a.0 < b.0 && a.1 > b.1) || (a.0 > b.0 && a.1 < b.1) {
					crossings += 1;
				}
			}
		}
	}
	crossings
}
