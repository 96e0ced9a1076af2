//! Containment hierarchy
//!
//! Infers which rings of a batch lie inside which, stores the relation as a
//! forest (arena plus parent indices) and converts it into
//! polygons-with-holes.
//!
//! Only one level of nesting becomes holes. Nodes at even depth are roots of
//! their own polygon and nodes at odd depth are holes of their direct parent,
//! so an island inside a hole is filled as a separate polygon.

use crate::clip::{self, Location};
use crate::contour::Ring;
use laserfill_core::{AciColor, GeometryError, Point2, Result};
use tracing::{debug, warn};

/// Index of a ring in the containment forest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

#[derive(Debug, Clone)]
pub struct ContainmentNode {
    pub ring: Ring,
    /// Smallest ring that strictly contains this one.
    pub parent: Option<NodeId>,
    pub depth: usize,
}

/// Arena of rings with parent links.
#[derive(Debug, Clone, Default)]
pub struct ContainmentForest {
    nodes: Vec<ContainmentNode>,
}

impl ContainmentForest {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> &ContainmentNode {
        &self.nodes[id.0]
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn depth(&self, id: NodeId) -> usize {
        self.nodes[id.0].depth
    }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(move |(_, node)| node.parent == Some(id))
            .map(|(i, _)| NodeId(i))
    }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId)
    }
}

/// A hole ring with a back-reference to the node whose polygon it cuts.
#[derive(Debug, Clone, PartialEq)]
pub struct Hole {
    pub node: NodeId,
    pub parent: NodeId,
    pub ring: Ring,
}

/// One outer ring plus the holes strictly inside it.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonWithHoles {
    pub node: NodeId,
    pub outer: Ring,
    pub holes: Vec<Hole>,
}

impl PolygonWithHoles {
    /// A polygon without holes, not attached to any forest.
    pub fn simple(outer: Ring) -> Self {
        Self {
            node: NodeId(0),
            outer,
            holes: Vec::new(),
        }
    }

    pub fn color(&self) -> AciColor {
        self.outer.color()
    }

    /// Outer area minus the hole areas.
    pub fn net_area(&self) -> f64 {
        self.outer.area() - self.holes.iter().map(|h| h.ring.area()).sum::<f64>()
    }

    /// Outer ring first, then each hole.
    pub fn rings(&self) -> Vec<&[Point2]> {
        std::iter::once(self.outer.points())
            .chain(self.holes.iter().map(|h| h.ring.points()))
            .collect()
    }

    pub fn hole_rings(&self) -> Vec<&[Point2]> {
        self.holes.iter().map(|h| h.ring.points()).collect()
    }

    /// Inside or on the outer ring and not strictly inside any hole.
    pub fn covers(&self, p: &Point2, tolerance: f64) -> bool {
        clip::locate(p, self.outer.points(), tolerance) != Location::Outside
            && self
                .holes
                .iter()
                .all(|h| clip::locate(p, h.ring.points(), tolerance) != Location::Inside)
    }
}

/// Result of hierarchy inference for one batch.
#[derive(Debug, Clone)]
pub struct Hierarchy {
    pub forest: ContainmentForest,
    pub polygons: Vec<PolygonWithHoles>,
    /// Nodes two or more levels deep.
    pub deep_nesting: Vec<NodeId>,
}

impl Hierarchy {
    /// Color of a node, used by holes to inherit from their parent.
    pub fn color_of(&self, id: NodeId) -> AciColor {
        self.forest.node(id).ring.color()
    }
}

/// Builds polygons-with-holes from the rings of one batch.
#[derive(Debug, Clone)]
pub struct HierarchyResolver {
    tolerance: f64,
}

impl HierarchyResolver {
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// Strict containment: every vertex of `inner` lies inside `outer` and
    /// off its boundary, and `inner` is smaller.
    pub fn contains(&self, outer: &Ring, inner: &Ring) -> bool {
        inner.area() < outer.area()
            && !inner.points().is_empty()
            && inner
                .points()
                .iter()
                .all(|p| clip::locate(p, outer.points(), self.tolerance) == Location::Inside)
    }

    pub fn resolve(&self, rings: Vec<Ring>) -> Result<Hierarchy> {
        let n = rings.len();

        let mut parents: Vec<Option<NodeId>> = vec![None; n];
        for (i, inner) in rings.iter().enumerate() {
            parents[i] = rings
                .iter()
                .enumerate()
                .filter(|(j, outer)| *j != i && self.contains(outer, inner))
                .min_by(|(_, a), (_, b)| a.area().total_cmp(&b.area()))
                .map(|(j, _)| NodeId(j));
        }

        let mut depths = vec![0usize; n];
        for (i, depth) in depths.iter_mut().enumerate() {
            let mut steps = 0;
            let mut cursor = parents[i];
            while let Some(parent) = cursor {
                steps += 1;
                if steps > n {
                    return Err(GeometryError::HierarchyInconsistency { node: i });
                }
                cursor = parents[parent.0];
            }
            *depth = steps;
        }

        let forest = ContainmentForest {
            nodes: rings
                .into_iter()
                .zip(parents)
                .zip(depths)
                .map(|((ring, parent), depth)| ContainmentNode {
                    ring,
                    parent,
                    depth,
                })
                .collect(),
        };

        let mut polygons = Vec::new();
        let mut deep_nesting = Vec::new();
        for id in forest.ids() {
            let depth = forest.depth(id);
            if depth >= 2 {
                deep_nesting.push(id);
            }
            if depth % 2 != 0 {
                continue;
            }
            let holes = forest
                .children(id)
                .map(|child| Hole {
                    node: child,
                    parent: id,
                    ring: forest.node(child).ring.clone(),
                })
                .collect();
            polygons.push(PolygonWithHoles {
                node: id,
                outer: forest.node(id).ring.clone(),
                holes,
            });
        }

        if !deep_nesting.is_empty() {
            warn!(
                nodes = ?deep_nesting,
                "contours nested two or more levels deep are filled as independent polygons"
            );
        }
        debug!(rings = forest.len(), polygons = polygons.len(), "resolved hierarchy");

        Ok(Hierarchy {
            forest,
            polygons,
            deep_nesting,
        })
    }
}
