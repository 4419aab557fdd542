use super::types::Direction;

/// Largest corner rounding of a step edge.
pub const CORNER_RADIUS: f64 = 5.0;

/// Orthogonal route from a source handle to a target handle.
///
/// The path leaves the source along the flow direction, turns halfway
/// between the two handles and enters the target along the flow direction.
/// Aligned handles produce a straight segment.
pub fn step_path(source: (f64, f64), target: (f64, f64), direction: Direction) -> Vec<(f64, f64)> {
	let ((sx, sy), (tx, ty)) = (source, target);
	match direction {
		Direction::TopToBottom => {
			if (sx - tx).abs() < f64::EPSILON {
				return vec![source, target];
			}
			let mid = (sy + ty) / 2.0;
			vec![source, (sx, mid), (tx, mid), target]
		}
		Direction::LeftToRight => {
			if (sy - ty).abs() < f64::EPSILON {
				return vec![source, target];
			}
			let mid = (sx + tx) / 2.0;
			vec![source, (mid, sy), (mid, ty), target]
		}
	}
}

/// Radius for rounding the corner at `at`, limited so the arc fits in half of
/// each adjoining segment.
pub fn corner_radius(from: (f64, f64), at: (f64, f64), to: (f64, f64), max: f64) -> f64 {
	let incoming = (at.0 - from.0).hypot(at.1 - from.1);
	let outgoing = (to.0 - at.0).hypot(to.1 - at.1);
	max.min(incoming / 2.0).min(outgoing / 2.0)
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn aligned_handles_are_straight() {
		let path = step_path((10.0, 0.0), (10.0, 50.0), Direction::TopToBottom);
		assert_eq!(path, vec![(10.0, 0.0), (10.0, 50.0)]);
	}

	#[test]
	fn vertical_step_turns_halfway() {
		let path = step_path((0.0, 0.0), (100.0, 60.0), Direction::TopToBottom);
		assert_eq!(path, vec![(0.0, 0.0), (0.0, 30.0), (100.0, 30.0), (100.0, 60.0)]);
	}

	#[test]
	fn horizontal_step_turns_halfway() {
		let path = step_path((0.0, 0.0), (80.0, -40.0), Direction::LeftToRight);
		assert_eq!(path, vec![(0.0, 0.0), (40.0, 0.0), (40.0, -40.0), (80.0, -40.0)]);
	}

	#[test]
	fn short_segments_shrink_the_corner() {
		assert_eq!(corner_radius((0.0, 0.0), (0.0, 4.0), (20.0, 4.0), CORNER_RADIUS), 2.0);
		assert_eq!(corner_radius((0.0, 0.0), (0.0, 40.0), (20.0, 40.0), CORNER_RADIUS), 5.0);
	}
}
