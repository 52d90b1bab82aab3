//! Spatial de-duplication of detections.
//!
//! Several variants of one template usually fire on the same physical
//! object a few pixels apart. The deduplicator collapses such clusters so
//! one object counts once. The default strategy is a greedy first-come
//! scan: order-dependent and quadratic, kept for compatibility with the
//! reference behavior. [`GridDedup`] accepts in the same greedy order but
//! looks up neighbors through a spatial hash, so it returns the identical
//! detection set at lower cost on dense inputs.

use std::collections::HashMap;

use crate::collect::Detection;

/// Strategy for collapsing spatially close detections into single matches.
///
/// Implementations must guarantee, for any input: output is a subsequence
/// of the input, no two outputs lie within the radius of each other, and
/// applying the strategy to its own output returns it unchanged.
pub trait DedupStrategy {
    fn deduplicate(&self, detections: &[Detection]) -> Vec<Detection>;
}

/// Greedy first-come clustering over the raw detection list.
///
/// Detections are visited in input order; one is kept iff no previously
/// kept detection lies within `radius` (inclusive). The outcome depends on
/// the input order, which the sweep keeps deterministic.
#[derive(Clone, Copy, Debug)]
pub struct GreedyDedup {
    pub radius: f32,
}

impl DedupStrategy for GreedyDedup {
    fn deduplicate(&self, detections: &[Detection]) -> Vec<Detection> {
        let mut kept: Vec<Detection> = Vec::new();
        for d in detections {
            let duplicate = kept.iter().any(|k| k.distance_to(d) <= self.radius);
            if !duplicate {
                kept.push(*d);
            }
        }
        kept
    }
}

/// Greedy clustering backed by a uniform grid of cell size `radius`.
///
/// Visits detections in the same first-come order as [`GreedyDedup`] but
/// only compares against kept detections in the 3x3 cell neighborhood, so
/// the result is identical while large inputs dedup in near-linear time.
#[derive(Clone, Copy, Debug)]
pub struct GridDedup {
    pub radius: f32,
}

impl GridDedup {
    #[inline]
    fn cell_of(&self, d: &Detection) -> (i32, i32) {
        (
            (d.x as f32 / self.radius).floor() as i32,
            (d.y as f32 / self.radius).floor() as i32,
        )
    }
}

impl DedupStrategy for GridDedup {
    fn deduplicate(&self, detections: &[Detection]) -> Vec<Detection> {
        let mut kept: Vec<Detection> = Vec::new();
        let mut bins: HashMap<(i32, i32), Vec<Detection>> = HashMap::new();

        for d in detections {
            let (cx, cy) = self.cell_of(d);
            let mut duplicate = false;
            'scan: for nx in cx - 1..=cx + 1 {
                for ny in cy - 1..=cy + 1 {
                    if let Some(bin) = bins.get(&(nx, ny)) {
                        if bin.iter().any(|k| k.distance_to(d) <= self.radius) {
                            duplicate = true;
                            break 'scan;
                        }
                    }
                }
            }
            if !duplicate {
                kept.push(*d);
                bins.entry((cx, cy)).or_default().push(*d);
            }
        }
        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(x: u32, y: u32) -> Detection {
        Detection { x, y }
    }

    fn cluster_input() -> Vec<Detection> {
        vec![
            d(50, 50),
            d(54, 52), // within 10 px of the first
            d(58, 55), // within 10 px of the first, chains past it
            d(120, 40),
            d(50, 50), // exact repeat
            d(124, 47),
            d(300, 200),
        ]
    }

    #[test]
    fn first_detection_of_a_cluster_wins() {
        let out = GreedyDedup { radius: 10.0 }.deduplicate(&cluster_input());
        assert_eq!(out, vec![d(50, 50), d(120, 40), d(300, 200)]);
    }

    #[test]
    fn deduplication_is_idempotent() {
        let dedup = GreedyDedup { radius: 10.0 };
        let once = dedup.deduplicate(&cluster_input());
        let twice = dedup.deduplicate(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn output_is_no_larger_and_pairwise_separated() {
        let input = cluster_input();
        let out = GreedyDedup { radius: 10.0 }.deduplicate(&input);
        assert!(out.len() <= input.len());
        for (i, a) in out.iter().enumerate() {
            for b in &out[i + 1..] {
                assert!(
                    a.distance_to(b) > 10.0,
                    "{a:?} and {b:?} closer than the radius"
                );
            }
        }
    }

    #[test]
    fn outcome_depends_on_input_order() {
        // greedy chains: accepting the middle point first absorbs both ends
        let forward = vec![d(0, 0), d(8, 0), d(16, 0)];
        let reordered = vec![d(8, 0), d(0, 0), d(16, 0)];
        let dedup = GreedyDedup { radius: 10.0 };
        assert_eq!(dedup.deduplicate(&forward), vec![d(0, 0), d(16, 0)]);
        assert_eq!(dedup.deduplicate(&reordered), vec![d(8, 0)]);
    }

    #[test]
    fn boundary_distance_counts_as_duplicate() {
        let out = GreedyDedup { radius: 10.0 }.deduplicate(&[d(0, 0), d(10, 0), d(11, 0)]);
        // 10 px away is absorbed, 11 px away survives
        assert_eq!(out, vec![d(0, 0), d(11, 0)]);
    }

    #[test]
    fn grid_dedup_matches_greedy_on_a_dense_field() {
        let mut input = Vec::new();
        for i in 0u32..400 {
            input.push(d((i * 37) % 331, (i * 59) % 257));
        }
        let greedy = GreedyDedup { radius: 10.0 }.deduplicate(&input);
        let grid = GridDedup { radius: 10.0 }.deduplicate(&input);
        assert_eq!(greedy, grid);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(GreedyDedup { radius: 10.0 }.deduplicate(&[]).is_empty());
        assert!(GridDedup { radius: 10.0 }.deduplicate(&[]).is_empty());
    }
}
