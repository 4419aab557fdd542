use super::Size;

#[derive(Clone, Copy, Debug)]
pub(crate) struct LayerNode {
	pub size: Size,
	pub dummy: bool,
}

/// Ranked graph where every edge connects adjacent ranks.
///
/// Indices `0..real_count` are the input nodes; the rest are dummies created
/// for edges spanning more than one rank.
#[derive(Clone, Debug)]
pub(crate) struct Layers {
	pub nodes: Vec<LayerNode>,
	pub real_count: usize,
	/// Node indices per rank, in drawing order
	pub ranks: Vec<Vec<usize>>,
	/// Neighbors one rank above
	pub upper: Vec<Vec<usize>>,
	/// Neighbors one rank below
	pub lower: Vec<Vec<usize>>,
}

impl Layers {
	pub fn build(sizes: &[Size], rank_of: &[usize], edges: &[(usize, usize)]) -> Self {
		let mut nodes: Vec<LayerNode> = sizes
			.iter()
			.map(|&size| LayerNode { size, dummy: false })
			.collect();
		let mut rank_of = rank_of.to_vec();
		let mut upper = vec![Vec::new(); nodes.len()];
		let mut lower = vec![Vec::new(); nodes.len()];

		for &(source, target) in edges {
			let mut prev = source;
			for rank in rank_of[source] + 1..rank_of[target] {
				let dummy = nodes.len();
				nodes.push(LayerNode {
					size: Size::ZERO,
					dummy: true,
				});
				rank_of.push(rank);
				upper.push(Vec::new());
				lower.push(Vec::new());
				link(&mut upper, &mut lower, prev, dummy);
				prev = dummy;
			}
			link(&mut upper, &mut lower, prev, target);
		}

		let depth = rank_of.iter().max().map_or(0, |max| max + 1);
		let mut ranks = vec![Vec::new(); depth];
		for (node, &rank) in rank_of.iter().enumerate() {
			ranks[rank].push(node);
		}

		Self {
			nodes,
			real_count: sizes.len(),
			ranks,
			upper,
			lower,
		}
	}

	pub fn separation(&self, a: usize, b: usize, node_sep: f64, edge_sep: f64) -> f64 {
		let gap = |idx: usize| {
			if self.nodes[idx].dummy {
				edge_sep
			} else {
				node_sep
			}
		};
		(self.nodes[a].size.width + self.nodes[b].size.width) / 2.0 + (gap(a) + gap(b)) / 2.0
	}
}

fn link(upper: &mut [Vec<usize>], lower: &mut [Vec<usize>], above: usize, below: usize) {
	if !lower[above].contains(&below) {
		lower[above].push(below);
		upper[below].push(above);
	}
}
