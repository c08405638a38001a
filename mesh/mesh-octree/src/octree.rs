//! Octree construction and point classification.

#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

use crate::config::OctreeConfig;
use crate::error::{OctreeError, OctreeResult};
use crate::primitive::{Primitive, RayCrossing};
use crate::volume::VolumeType;
use hashbrown::HashSet;
use mesh_types::{Aabb, IndexedMesh, MeshBounds, MeshTopology, Point3, Triangle, Vector3};
use rand::SeedableRng;
use rand::rngs::StdRng;
use smallvec::SmallVec;
use tracing::{debug, warn};

/// Primitive indices held by a leaf.
type Items = SmallVec<[u32; 8]>;

/// Probe directions, tried in order until one gives a clean crossing count.
/// Each has length 7 and no zero component, so no probe runs along a
/// coordinate axis or inside a coordinate plane.
const PROBE_DIRECTIONS: [[f64; 3]; 6] = [
    [2.0, 3.0, 6.0],
    [-6.0, -2.0, 3.0],
    [3.0, -6.0, -2.0],
    [-2.0, 6.0, -3.0],
    [6.0, -3.0, 2.0],
    [-3.0, -2.0, -6.0],
];

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Leaf {
        bounds: Aabb,
        items: Items,
        /// Classification of the leaf centre; only meaningful when empty.
        volume: VolumeType,
    },
    Internal {
        bounds: Aabb,
        children: [u32; 8],
    },
}

impl Node {
    const fn bounds(&self) -> &Aabb {
        match self {
            Self::Leaf { bounds, .. } | Self::Internal { bounds, .. } => bounds,
        }
    }

    fn item_count(&self) -> usize {
        match self {
            Self::Leaf { items, .. } => items.len(),
            Self::Internal { .. } => 0,
        }
    }
}

/// Octree over a set of primitives answering inside/outside queries.
///
/// The tree owns its primitives and is immutable once built, so it can be
/// shared across threads when `P` is `Sync`.
///
/// # Example
///
/// ```
/// use mesh_octree::{Octree, OctreeConfig, VolumeType};
/// use mesh_types::{unit_cube, Point3};
///
/// let tree = Octree::from_mesh(&unit_cube(), &OctreeConfig::default()).unwrap();
///
/// assert_eq!(tree.classify(&Point3::new(0.5, 0.5, 0.5)), VolumeType::Inside);
/// assert_eq!(tree.classify(&Point3::new(5.0, 0.5, 0.5)), VolumeType::Outside);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Octree<P> {
    primitives: Vec<P>,
    nodes: Vec<Node>,
    bounds: Aabb,
    tolerance: f64,
    depth: usize,
    entry_count: usize,
}

impl Octree<Triangle> {
    /// Build an octree over the triangles of a mesh, bounded by the mesh's
    /// own extents.
    ///
    /// Faces referencing missing vertices are skipped.
    ///
    /// # Errors
    ///
    /// See [`Octree::build`].
    pub fn from_mesh(mesh: &IndexedMesh, config: &OctreeConfig) -> OctreeResult<Self> {
        Self::build(mesh.triangles().collect(), mesh.bounds(), config)
    }
}

impl<P: Primitive> Octree<P> {
    /// Build an octree over `primitives` inside `bounds`.
    ///
    /// The bounding volume is enlarged by a seeded random jitter before
    /// subdivision so split planes avoid passing exactly through vertices.
    /// Leaves are then refined one depth level at a time; refinement stops
    /// at `max_depth`, when no leaf holds more than `leaf_capacity`
    /// primitives, or before a level that would register more than
    /// `duplicity * primitives.len()` entries in total.
    ///
    /// # Errors
    ///
    /// - [`OctreeError::InvalidConfig`] if `config` fails validation.
    /// - [`OctreeError::EmptyPrimitiveSet`] if `primitives` is empty.
    /// - [`OctreeError::PrimitiveOutsideBounds`] if `bounds` does not
    ///   contain a primitive.
    pub fn build(primitives: Vec<P>, bounds: Aabb, config: &OctreeConfig) -> OctreeResult<Self> {
        config.validate()?;

        if primitives.is_empty() {
            return Err(OctreeError::EmptyPrimitiveSet);
        }
        if let Some(index) = primitives
            .iter()
            .position(|p| !bounds.contains_aabb(&p.bounds()))
        {
            return Err(OctreeError::PrimitiveOutsideBounds { index });
        }

        let mut rng = StdRng::seed_from_u64(config.seed);
        let root_bounds = bounds.jittered(&mut rng, config.perturbation);
        let count = primitives.len();

        let mut tree = Self {
            primitives,
            nodes: vec![Node::Leaf {
                bounds: root_bounds,
                items: (0..count as u32).collect(),
                volume: VolumeType::Mixed,
            }],
            bounds: root_bounds,
            tolerance: config.tolerance * root_bounds.diagonal(),
            depth: 0,
            entry_count: count,
        };

        tree.refine(config);
        tree.cache_empty_leaves();

        debug!(
            primitives = count,
            nodes = tree.node_count(),
            leaves = tree.leaf_count(),
            entries = tree.entry_count,
            depth = tree.depth,
            "Octree built"
        );

        Ok(tree)
    }

    /// Breadth-first refinement under the duplicity budget.
    fn refine(&mut self, config: &OctreeConfig) {
        let budget = (config.duplicity * self.primitives.len() as f64).floor() as usize;
        let mut frontier: Vec<u32> = vec![0];

        while self.depth < config.max_depth {
            let splits: Vec<(u32, [Items; 8])> = frontier
                .iter()
                .filter_map(|&id| match &self.nodes[id as usize] {
                    Node::Leaf { bounds, items, .. } if items.len() > config.leaf_capacity => {
                        Some((id, self.split_items(bounds, items)))
                    }
                    _ => None,
                })
                .collect();

            if splits.is_empty() {
                break;
            }

            let removed: usize = splits
                .iter()
                .map(|(id, _)| self.nodes[*id as usize].item_count())
                .sum();
            let added: usize = splits
                .iter()
                .map(|(_, children)| children.iter().map(SmallVec::len).sum::<usize>())
                .sum();
            let entries = self.entry_count - removed + added;

            if entries > budget {
                warn!(
                    depth = self.depth,
                    entries,
                    budget,
                    oversized_leaves = splits.len(),
                    "Octree refinement stopped by duplicity budget"
                );
                break;
            }

            frontier.clear();
            for (id, children) in splits {
                let parent_bounds = *self.nodes[id as usize].bounds();
                let mut child_ids = [0_u32; 8];
                for (octant, items) in children.into_iter().enumerate() {
                    let child_id = self.nodes.len() as u32;
                    child_ids[octant] = child_id;
                    frontier.push(child_id);
                    self.nodes.push(Node::Leaf {
                        bounds: parent_bounds.octant(octant),
                        items,
                        volume: VolumeType::Mixed,
                    });
                }
                self.nodes[id as usize] = Node::Internal {
                    bounds: parent_bounds,
                    children: child_ids,
                };
            }

            self.entry_count = entries;
            self.depth += 1;
        }
    }

    /// Distribute a leaf's primitives over its eight octants.
    fn split_items(&self, bounds: &Aabb, items: &Items) -> [Items; 8] {
        std::array::from_fn(|octant| {
            let child = bounds.octant(octant);
            items
                .iter()
                .copied()
                .filter(|&item| self.primitives[item as usize].overlaps(&child))
                .collect()
        })
    }

    /// Classify the centre of every empty leaf.
    fn cache_empty_leaves(&mut self) {
        let empty: Vec<(usize, Point3<f64>)> = self
            .nodes
            .iter()
            .enumerate()
            .filter_map(|(id, node)| match node {
                Node::Leaf { bounds, items, .. } if items.is_empty() => Some((id, bounds.center())),
                _ => None,
            })
            .collect();

        for (id, center) in empty {
            let classified = self.probe(&center);
            if let Node::Leaf { volume, .. } = &mut self.nodes[id] {
                *volume = classified;
            }
        }
    }

    /// Classify a point against the indexed surface.
    ///
    /// Points outside the jittered root box are [`VolumeType::Outside`].
    /// Points within the tolerance of a primitive are [`VolumeType::Mixed`].
    /// Everything else is decided by the signed crossing count of a probe
    /// ray: nonzero is [`VolumeType::Inside`], zero is
    /// [`VolumeType::Outside`]. Probes that graze an edge or vertex are
    /// discarded; if every probe is discarded the result is `Mixed`.
    #[must_use]
    pub fn classify(&self, point: &Point3<f64>) -> VolumeType {
        if !self.bounds.contains(point) {
            return VolumeType::Outside;
        }

        if let Node::Leaf {
            bounds,
            items,
            volume,
        } = self.leaf_at(point)
        {
            if items.is_empty()
                && volume.is_decided()
                && bounds.contains_aabb(&Aabb::around(point, self.tolerance))
            {
                return *volume;
            }
        }

        if self.is_on_surface(point) {
            return VolumeType::Mixed;
        }

        self.probe(point)
    }

    /// Whether some primitive lies within the tolerance of `point`.
    fn is_on_surface(&self, point: &Point3<f64>) -> bool {
        let limit = self.tolerance * self.tolerance;
        self.candidates_near(point, self.tolerance)
            .into_iter()
            .any(|item| self.primitives[item as usize].distance_squared(point) <= limit)
    }

    fn probe(&self, point: &Point3<f64>) -> VolumeType {
        for [x, y, z] in PROBE_DIRECTIONS {
            let direction = Vector3::new(x, y, z) / 7.0;
            if let Some(winding) = self.winding_number(point, &direction) {
                return if winding == 0 {
                    VolumeType::Outside
                } else {
                    VolumeType::Inside
                };
            }
        }
        VolumeType::Mixed
    }

    /// Signed crossing count along a ray, `None` if any crossing grazes.
    fn winding_number(&self, origin: &Point3<f64>, direction: &Vector3<f64>) -> Option<i64> {
        let inv_direction = direction.map(|d| 1.0 / d);
        let mut seen: HashSet<u32> = HashSet::new();
        let mut stack: Vec<u32> = vec![0];
        let mut winding = 0_i64;

        while let Some(id) = stack.pop() {
            let node = &self.nodes[id as usize];
            if !ray_enters(origin, &inv_direction, &node.bounds().expanded(self.tolerance)) {
                continue;
            }
            match node {
                Node::Leaf { items, .. } => {
                    for &item in items {
                        if !seen.insert(item) {
                            continue;
                        }
                        match self.primitives[item as usize].ray_crossing(
                            origin,
                            direction,
                            self.tolerance,
                        ) {
                            RayCrossing::Miss => {}
                            RayCrossing::Crossing { exiting: true } => winding += 1,
                            RayCrossing::Crossing { exiting: false } => winding -= 1,
                            RayCrossing::Grazing => return None,
                        }
                    }
                }
                Node::Internal { children, .. } => stack.extend_from_slice(children),
            }
        }

        Some(winding)
    }

    fn leaf_at(&self, point: &Point3<f64>) -> &Node {
        let mut node = &self.nodes[0];
        while let Node::Internal { bounds, children } = node {
            node = &self.nodes[children[bounds.octant_of(point)] as usize];
        }
        node
    }

    /// Indices of primitives registered in leaves that overlap `query`,
    /// ascending and without duplicates.
    #[must_use]
    pub fn candidates_in(&self, query: &Aabb) -> Vec<u32> {
        let mut found: HashSet<u32> = HashSet::new();
        let mut stack: Vec<u32> = vec![0];

        while let Some(id) = stack.pop() {
            let node = &self.nodes[id as usize];
            if !node.bounds().intersects(query) {
                continue;
            }
            match node {
                Node::Leaf { items, .. } => found.extend(items.iter().copied()),
                Node::Internal { children, .. } => stack.extend_from_slice(children),
            }
        }

        let mut candidates: Vec<u32> = found.into_iter().collect();
        candidates.sort_unstable();
        candidates
    }

    /// Indices of primitives that may lie within `radius` of `point`.
    #[must_use]
    pub fn candidates_near(&self, point: &Point3<f64>, radius: f64) -> Vec<u32> {
        self.candidates_in(&Aabb::around(point, radius))
    }
}

impl<P> Octree<P> {
    /// Jittered root bounding box.
    #[inline]
    #[must_use]
    pub const fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    /// Absolute on-surface tolerance.
    #[inline]
    #[must_use]
    pub const fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// The indexed primitives, in input order.
    #[inline]
    #[must_use]
    pub fn primitives(&self) -> &[P] {
        &self.primitives
    }

    /// Number of indexed primitives.
    #[inline]
    #[must_use]
    pub fn primitive_count(&self) -> usize {
        self.primitives.len()
    }

    /// Number of nodes, internal and leaf.
    #[inline]
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of leaves.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| matches!(node, Node::Leaf { .. }))
            .count()
    }

    /// Total primitive registrations across all leaves.
    #[inline]
    #[must_use]
    pub const fn entry_count(&self) -> usize {
        self.entry_count
    }

    /// Depth of the deepest leaf; zero for a single root leaf.
    #[inline]
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }
}

/// Slab test for the half-line `origin + t * direction`, `t >= 0`.
fn ray_enters(origin: &Point3<f64>, inv_direction: &Vector3<f64>, aabb: &Aabb) -> bool {
    let mut t_min = 0.0_f64;
    let mut t_max = f64::INFINITY;
    for axis in 0..3 {
        let t1 = (aabb.min[axis] - origin[axis]) * inv_direction[axis];
        let t2 = (aabb.max[axis] - origin[axis]) * inv_direction[axis];
        t_min = t_min.max(t1.min(t2));
        t_max = t_max.min(t1.max(t2));
    }
    t_min <= t_max
}
