use crate::builder::SnapshotBuilder;
use crate::element::Element;
use crate::snapshot::{OctreeSnapshot, OutOfBoundsPolicy};
use crate::traverse::{insert, remove, search};

use lattice_octree_core::{Extent3i, Point3i};

use std::sync::Arc;

/// A persistent octree over point [`Element`]s.
///
/// Every mutating operation returns a brand-new `PointOctree` and never disturbs the receiver,
/// so old values stay valid and fully queryable. `Clone` is cheap: trees share their immutable
/// [`OctreeSnapshot`]s behind an `Arc`, and a mutation copies the pools once while building the
/// next snapshot.
///
/// All operations are synchronous and run to completion, bounded by `max_depth` and the pool
/// sizes. Serializing the writes that advance one lineage of trees is caller discipline, not a
/// requirement of the structure.
#[derive(Clone, Debug)]
pub struct PointOctree {
    snapshot: Arc<OctreeSnapshot>,
}

impl PointOctree {
    /// An empty tree spanning `[ZERO, bounds_size)` with the default
    /// [`Funnel`](OutOfBoundsPolicy::Funnel) policy.
    ///
    /// With `max_depth == 0` the root is a single leaf that never splits and grows without
    /// bound.
    ///
    /// # Panics
    ///
    /// If any component of `bounds_size` is not positive.
    pub fn new(bounds_size: Point3i, max_depth: u8) -> Self {
        Self::with_policy(bounds_size, max_depth, OutOfBoundsPolicy::default())
    }

    /// An empty tree with an explicit [`OutOfBoundsPolicy`]. The policy is fixed for the whole
    /// lineage of trees derived from this one.
    pub fn with_policy(bounds_size: Point3i, max_depth: u8, policy: OutOfBoundsPolicy) -> Self {
        Self::from_snapshot(OctreeSnapshot::new(bounds_size, max_depth, policy))
    }

    /// Wraps an existing snapshot, e.g. one that was deserialized.
    pub fn from_snapshot(snapshot: OctreeSnapshot) -> Self {
        Self {
            snapshot: Arc::new(snapshot),
        }
    }

    /// Returns a new tree that also contains `element`.
    ///
    /// Out-of-bounds positions are funneled, clamped, or rejected according to the tree's
    /// policy; nothing else is ever an error.
    pub fn add(&self, element: Element) -> Self {
        let element = match self.snapshot.policy() {
            OutOfBoundsPolicy::Funnel => element,
            OutOfBoundsPolicy::Clamp => Element::new(
                element.id,
                element
                    .position
                    .join(&Point3i::ZERO)
                    .meet(&(self.snapshot.bounds_size() - Point3i::ONES)),
            ),
            OutOfBoundsPolicy::Reject => {
                if !self.snapshot.root_extent().contains(element.position) {
                    return self.clone();
                }
                element
            }
        };

        let mut builder = SnapshotBuilder::from_snapshot(&self.snapshot);
        insert::insert(&mut builder, element);

        Self::from_snapshot(builder.finalize())
    }

    /// Returns a new tree without the lowest-indexed element whose id is `id`, or an identical
    /// tree when the id is unknown (a no-op, not an error).
    pub fn remove(&self, id: u64) -> Self {
        let mut builder = SnapshotBuilder::from_snapshot(&self.snapshot);
        if remove::remove(&mut builder, id) {
            Self::from_snapshot(builder.finalize())
        } else {
            self.clone()
        }
    }

    /// Moves the element with id `id` to `position`, as removal followed by insertion. A no-op
    /// when the id is unknown.
    pub fn update_position(&self, id: u64, position: Point3i) -> Self {
        let removed = self.remove(id);
        if removed.num_elements() == self.num_elements() {
            // Nothing was removed, so nothing gets re-added.
            return self.clone();
        }

        removed.add(Element::new(id, position))
    }

    /// Every element whose position lies in the box `[min, max]`, both corners inclusive.
    pub fn query(&self, min: Point3i, max: Point3i) -> Vec<Element> {
        self.query_extent(&Extent3i::from_min_and_max(min, max))
    }

    /// Every element whose position lies in `query`.
    pub fn query_extent(&self, query: &Extent3i) -> Vec<Element> {
        search::search(&self.snapshot, query)
    }

    /// The snapshot backing this tree value.
    #[inline]
    pub fn snapshot(&self) -> &OctreeSnapshot {
        &self.snapshot
    }

    /// Every stored element, in pool order.
    #[inline]
    pub fn elements(&self) -> &[Element] {
        self.snapshot.elements()
    }

    #[inline]
    pub fn num_elements(&self) -> usize {
        self.snapshot.num_elements()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.snapshot.is_empty()
    }

    #[inline]
    pub fn bounds_size(&self) -> Point3i {
        self.snapshot.bounds_size()
    }

    #[inline]
    pub fn max_depth(&self) -> u8 {
        self.snapshot.max_depth()
    }

    #[inline]
    pub fn policy(&self) -> OutOfBoundsPolicy {
        self.snapshot.policy()
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rand::prelude::*;

    const BOUNDS: Point3i = Point3i([5000, 5000, 5000]);
    const MAX_DEPTH: u8 = 8;

    fn tree() -> PointOctree {
        PointOctree::new(BOUNDS, MAX_DEPTH)
    }

    fn ids(elements: &[Element]) -> Vec<u64> {
        let mut ids: Vec<_> = elements.iter().map(|e| e.id).collect();
        ids.sort_unstable();

        ids
    }

    /// A box that reaches every leaf volume and every stored position, funneled or not.
    fn everything(tree: &PointOctree) -> Vec<Element> {
        tree.query(Point3i::fill(-100_000), Point3i::fill(100_000))
    }

    #[test]
    fn add_then_point_query_round_trips() {
        let t = tree().add(Element::new(1, Point3i::fill(10)));

        assert_eq!(t.num_elements(), 1);
        assert_eq!(ids(&t.query(Point3i::fill(10), Point3i::fill(10))), vec![1]);
    }

    #[test]
    fn add_query_remove_query_scenario() {
        let t = tree().add(Element::new(1, Point3i::fill(10)));
        assert_eq!(ids(&t.query(Point3i::ZERO, Point3i::fill(20))), vec![1]);

        let t = t.remove(1);
        assert!(t.query(Point3i::ZERO, Point3i::fill(20)).is_empty());
        assert!(t.is_empty());
    }

    #[test]
    fn removal_keeps_every_other_element_exactly_once() {
        let mut t = tree();
        for i in 0..20 {
            t = t.add(Element::new(i, Point3i::fill(10 * i as i32)));
        }

        let t = t.remove(7);

        let expected: Vec<u64> = (0..20).filter(|&i| i != 7).collect();
        assert_eq!(ids(&everything(&t)), expected);
    }

    #[test]
    fn removing_an_unknown_id_is_a_no_op() {
        let t = tree().add(Element::new(1, Point3i::fill(10)));
        let t2 = t.remove(42);

        assert_eq!(t2.num_elements(), 1);
        assert_eq!(ids(&everything(&t2)), vec![1]);
    }

    #[test]
    fn update_moves_between_disjoint_boxes() {
        let t = tree().add(Element::new(1, Point3i::fill(10)));
        let t = t.update_position(1, Point3i::fill(50));

        assert_eq!(t.num_elements(), 1);
        assert!(t.query(Point3i::ZERO, Point3i::fill(20)).is_empty());
        assert_eq!(
            ids(&t.query(Point3i::fill(40), Point3i::fill(60))),
            vec![1]
        );
    }

    #[test]
    fn update_of_an_unknown_id_is_a_no_op() {
        let t = tree().add(Element::new(1, Point3i::fill(10)));
        let t2 = t.update_position(9, Point3i::fill(50));

        assert_eq!(t2.num_elements(), 1);
        assert_eq!(t2.elements()[0].position, Point3i::fill(10));
    }

    #[test]
    fn ten_identical_positions_are_all_retained() {
        // More than MAX_ELEMENTS_PER_NODE at one position cannot be separated by subdividing;
        // the leaf at the depth cap grows past the capacity cap instead.
        let mut t = tree();
        for i in 0..10 {
            t = t.add(Element::new(i, Point3i::fill(10)));
        }

        assert_eq!(ids(&everything(&t)), (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn disjoint_region_query_is_empty() {
        let t = tree().add(Element::new(1, Point3i::fill(100)));

        assert!(t
            .query(Point3i::fill(-50), Point3i::fill(-1))
            .is_empty());
    }

    #[test]
    fn point_query_round_trips_at_the_far_corner_of_odd_bounds() {
        // Splitting a 5000-sized axis floor-halves through two odd levels (625 and 39), each of
        // which routes one more point to the upper child than its geometric box spans. Nine
        // elements at the far corner cascade splits through both, so this fails if pruning uses
        // node boxes instead of routing regions.
        let corner = BOUNDS - Point3i::ONES;
        let mut t = tree();
        for i in 0..9 {
            t = t.add(Element::new(i, corner));
        }

        assert_eq!(ids(&t.query(corner, corner)), (0..9).collect::<Vec<_>>());
    }

    #[test]
    fn point_query_round_trips_after_a_cascade_in_small_odd_bounds() {
        let corner = Point3i::fill(20);
        let mut t = PointOctree::new(Point3i::fill(21), 3);
        for i in 0..9 {
            t = t.add(Element::new(i, corner));
        }

        assert_eq!(ids(&t.query(corner, corner)), (0..9).collect::<Vec<_>>());
    }

    #[test]
    fn octant_separation_half_space_query() {
        // One element per octant around the origin; only the +X +Z pair lies in the queried
        // half-space.
        let mut t = tree();
        let offsets = [
            (1, Point3i([10, 10, 10])),
            (2, Point3i([-10, 10, 10])),
            (3, Point3i([10, -10, 10])),
            (4, Point3i([-10, -10, 10])),
            (5, Point3i([10, 10, -10])),
            (6, Point3i([-10, 10, -10])),
            (7, Point3i([10, -10, -10])),
            (8, Point3i([-10, -10, -10])),
        ];
        for &(id, p) in offsets.iter() {
            t = t.add(Element::new(id, p));
        }

        let found = t.query(Point3i([1, -5000, 1]), Point3i::fill(5000));
        assert_eq!(ids(&found), vec![1, 3]);
    }

    #[test]
    fn old_snapshots_survive_later_mutation() {
        let t1 = tree().add(Element::new(1, Point3i::fill(10)));
        let t2 = t1.add(Element::new(2, Point3i::fill(20)));
        let t3 = t2.remove(1);

        assert_eq!(ids(&everything(&t1)), vec![1]);
        assert_eq!(ids(&everything(&t2)), vec![1, 2]);
        assert_eq!(ids(&everything(&t3)), vec![2]);
    }

    #[test]
    fn funnel_keeps_out_of_bounds_elements_countable() {
        let t = tree()
            .add(Element::new(1, Point3i::fill(-2300)))
            .add(Element::new(2, Point3i::fill(123_456)));

        let found = everything(&t);
        assert_eq!(ids(&found), vec![1, 2]);
        // Positions are stored untouched, and a point query at the true position finds the
        // funneled element.
        assert!(found.iter().any(|e| e.position == Point3i::fill(-2300)));
        assert_eq!(
            ids(&t.query(Point3i::fill(-2300), Point3i::fill(-2300))),
            vec![1]
        );
        assert_eq!(
            ids(&t.query(Point3i::fill(123_456), Point3i::fill(123_456))),
            vec![2]
        );
    }

    #[test]
    fn clamp_stores_the_clamped_position() {
        let t = PointOctree::with_policy(BOUNDS, MAX_DEPTH, OutOfBoundsPolicy::Clamp)
            .add(Element::new(1, Point3i([-5, 10, 99_999])));

        assert_eq!(t.elements()[0].position, Point3i([0, 10, 4999]));
        assert_eq!(
            ids(&t.query(Point3i([0, 10, 4999]), Point3i([0, 10, 4999]))),
            vec![1]
        );
    }

    #[test]
    fn reject_ignores_out_of_bounds_elements() {
        let t = PointOctree::with_policy(BOUNDS, MAX_DEPTH, OutOfBoundsPolicy::Reject)
            .add(Element::new(1, Point3i::fill(-1)))
            .add(Element::new(2, Point3i::fill(10)));

        assert_eq!(ids(&everything(&t)), vec![2]);
    }

    #[test]
    fn max_depth_zero_keeps_a_single_unbounded_root_leaf() {
        let mut t = PointOctree::new(Point3i::fill(64), 0);
        for i in 0..50 {
            t = t.add(Element::new(i, Point3i::fill(i as i32)));
        }

        assert_eq!(t.snapshot().nodes().len(), 1);
        assert_eq!(everything(&t).len(), 50);
    }

    #[test]
    fn fuzz_full_volume_count_matches_a_brute_force_model() {
        let mut rng = StdRng::seed_from_u64(12345);
        let bounds = Point3i::fill(5000);
        let mut t = PointOctree::new(bounds, 10);
        let mut model: Vec<Element> = Vec::new();

        let random_position = |rng: &mut StdRng| {
            Point3i([
                rng.gen_range(-2048..2048),
                rng.gen_range(-2048..2048),
                rng.gen_range(-2048..2048),
            ])
        };

        let mut next_id = 0;
        for _ in 0..600 {
            match rng.gen_range(0..4) {
                // Bias towards insertion so the tree actually grows and splits.
                0 | 1 => {
                    let e = Element::new(next_id, random_position(&mut rng));
                    next_id += 1;
                    t = t.add(e);
                    model.push(e);
                }
                2 => {
                    if next_id > 0 {
                        let id = rng.gen_range(0..next_id);
                        t = t.remove(id);
                        if let Some(i) = model.iter().position(|e| e.id == id) {
                            model.remove(i);
                        }
                    }
                }
                _ => {
                    if next_id > 0 {
                        let id = rng.gen_range(0..next_id);
                        let p = random_position(&mut rng);
                        t = t.update_position(id, p);
                        if let Some(i) = model.iter().position(|e| e.id == id) {
                            model.remove(i);
                            model.push(Element::new(id, p));
                        }
                    }
                }
            }

            assert_eq!(t.num_elements(), model.len());
        }

        let sort_key = |e: &Element| (e.id, e.position.0);
        let mut found = everything(&t);
        found.sort_unstable_by_key(sort_key);
        let mut expected = model.clone();
        expected.sort_unstable_by_key(sort_key);

        assert_eq!(found, expected);
    }

    #[test]
    fn fuzz_random_boxes_match_a_brute_force_filter() {
        // Non-power-of-two bounds so floor-halving error accumulates along deep paths, and
        // positions past the bounds on both sides so funneled elements are exercised too.
        let mut rng = StdRng::seed_from_u64(9876);
        let bounds = Point3i::fill(5000);
        let mut t = PointOctree::new(bounds, 10);
        let mut model: Vec<Element> = Vec::new();

        for id in 0..500 {
            let p = Point3i([
                rng.gen_range(-500..5500),
                rng.gen_range(-500..5500),
                rng.gen_range(-500..5500),
            ]);
            let e = Element::new(id, p);
            t = t.add(e);
            model.push(e);
        }

        for _ in 0..50 {
            let center = Point3i([
                rng.gen_range(-500..5500),
                rng.gen_range(-500..5500),
                rng.gen_range(-500..5500),
            ]);
            let half = Point3i::fill(rng.gen_range(1..600));
            let (min, max) = (center - half, center + half);

            let found = t.query(min, max);
            let expected = model
                .iter()
                .filter(|e| min <= e.position && e.position <= max)
                .count();

            assert_eq!(found.len(), expected);
        }
    }
}
