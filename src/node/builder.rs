//! Building the UV node graph.
//!
//! Candidate loops are collected according to a [`NodeMode`], merged into
//! nodes by [`NodeKey`](super::NodeKey), linked by the mode's adjacency
//! rule and finally split into connected components.

use std::collections::{BTreeSet, HashMap};

use log::{debug, trace};

use super::{UvNode, UvNodeGroup};
use crate::mesh::{FaceId, LoopId, MeshIndex, UvLayerId, UvMesh};
use crate::scene::{MeshSelectMode, ObjectId, ToolSettings, UvSelectMode};
use crate::sync::{is_uv_edge_selected, is_uv_selected};

/// Granularity and adjacency rule of a node graph build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeMode {
    /// Loops of selected faces; neighbours follow the face loop ring.
    #[default]
    Face,
    /// Loops on selected edges between selected faces; neighbours only
    /// across UV-edge-selected edges.
    Edge,
    /// Loops of selected vertices; neighbours follow the face loop ring.
    Vert,
}

impl NodeMode {
    /// Loops this mode turns into nodes.
    pub fn candidate_loops<I: MeshIndex>(
        self,
        mesh: &UvMesh<I>,
        layer: UvLayerId,
        options: &NodeOptions,
        faces: Option<&BTreeSet<FaceId<I>>>,
    ) -> Vec<LoopId<I>> {
        let in_scope = |f: FaceId<I>| faces.map_or(true, |set| set.contains(&f));
        let uv_selected =
            |l: LoopId<I>| !options.selected_only || is_uv_selected(mesh, layer, l, options.sync);
        let face_selected = |f: FaceId<I>| !options.selected_only || mesh.face(f).select;

        match self {
            NodeMode::Face => mesh
                .face_ids()
                .filter(|&f| in_scope(f) && face_selected(f))
                .flat_map(|f| mesh.face_loops(f))
                .filter(|&l| uv_selected(l))
                .collect(),

            NodeMode::Vert => mesh
                .vertex_ids()
                .filter(|&v| !options.selected_only || mesh.vertex(v).select)
                .flat_map(|v| mesh.vertex_loops(v).iter().copied())
                .filter(|&l| in_scope(mesh.loop_face(l)) && uv_selected(l))
                .collect(),

            NodeMode::Edge => {
                let mut seen = vec![false; mesh.num_loops()];
                let mut loops = Vec::new();
                for e in mesh.edge_ids() {
                    if options.selected_only && !mesh.edge(e).select {
                        continue;
                    }
                    if !mesh.edge_faces(e).all(face_selected) {
                        continue;
                    }
                    for &l in mesh.edge_loops(e) {
                        if !in_scope(mesh.loop_face(l)) {
                            continue;
                        }
                        for corner in [l, mesh.loop_next(l)] {
                            if !seen[corner.index()] && uv_selected(corner) {
                                seen[corner.index()] = true;
                                loops.push(corner);
                            }
                        }
                    }
                }
                loops
            }
        }
    }

    /// Whether this mode links `l` to the loop after it.
    fn links_next<I: MeshIndex>(
        self,
        mesh: &UvMesh<I>,
        layer: UvLayerId,
        options: &NodeOptions,
        l: LoopId<I>,
    ) -> bool {
        match self {
            NodeMode::Face | NodeMode::Vert => true,
            NodeMode::Edge => {
                !options.selected_only
                    || mesh
                        .edge_loops(mesh.loop_edge(l))
                        .iter()
                        .any(|&r| is_uv_edge_selected(mesh, layer, r, options.sync))
            }
        }
    }
}

/// Options for building node groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeOptions {
    /// Candidate and adjacency rule.
    pub mode: NodeMode,

    /// Read selection through the 3D flags.
    pub sync: bool,

    /// Only selected elements become nodes. When false every loop in scope
    /// is a candidate and every face edge links its endpoints.
    pub selected_only: bool,
}

impl Default for NodeOptions {
    fn default() -> Self {
        Self {
            mode: NodeMode::Face,
            sync: false,
            selected_only: true,
        }
    }
}

impl NodeOptions {
    /// Options matching the editor settings. Under sync the mode follows
    /// the 3D select mode, otherwise the UV select mode; island select
    /// builds face nodes.
    pub fn from_settings(settings: &ToolSettings) -> Self {
        let sync = settings.use_uv_select_sync;
        let mode = if sync {
            match settings.mesh_select_mode {
                MeshSelectMode::Vertex => NodeMode::Vert,
                MeshSelectMode::Edge => NodeMode::Edge,
                MeshSelectMode::Face => NodeMode::Face,
            }
        } else {
            match settings.uv_select_mode {
                UvSelectMode::Vertex => NodeMode::Vert,
                UvSelectMode::Edge => NodeMode::Edge,
                UvSelectMode::Face | UvSelectMode::Island => NodeMode::Face,
            }
        };
        Self {
            mode,
            sync,
            ..Self::default()
        }
    }

    /// Set the mode.
    pub fn with_mode(mut self, mode: NodeMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the sync flag.
    pub fn with_sync(mut self, sync: bool) -> Self {
        self.sync = sync;
        self
    }

    /// Take every loop in scope regardless of selection.
    pub fn all_loops(mut self) -> Self {
        self.selected_only = false;
        self
    }
}

/// Build the flat node list of one mesh, with neighbours as indices into
/// the returned vector.
///
/// Nodes appear in the order their first loop was met.
pub fn build_nodes<I: MeshIndex>(
    mesh: &UvMesh<I>,
    layer: UvLayerId,
    options: &NodeOptions,
    faces: Option<&BTreeSet<FaceId<I>>>,
) -> Vec<UvNode<I>> {
    let loops = options.mode.candidate_loops(mesh, layer, options, faces);
    trace!("{} candidate loops", loops.len());

    let mut nodes: Vec<UvNode<I>> = Vec::new();
    let mut by_key = HashMap::new();
    let mut node_of: Vec<Option<usize>> = vec![None; mesh.num_loops()];

    for &l in &loops {
        let node = UvNode::new(mesh.uv(layer, l), mesh.loop_vert(l));
        let index = *by_key.entry(node.key()).or_insert_with(|| {
            nodes.push(node);
            nodes.len() - 1
        });
        nodes[index].loops.push(l);
        node_of[l.index()] = Some(index);
    }

    for &l in &loops {
        let Some(a) = node_of[l.index()] else { continue };

        let next = mesh.loop_next(l);
        if let Some(b) = node_of[next.index()] {
            if a != b && options.mode.links_next(mesh, layer, options, l) {
                nodes[a].connect(b);
                nodes[b].connect(a);
            }
        }

        if options.mode != NodeMode::Edge {
            let prev = mesh.loop_prev(l);
            if let Some(b) = node_of[prev.index()] {
                if a != b {
                    nodes[a].connect(b);
                    nodes[b].connect(a);
                }
            }
        }
    }

    nodes
}

/// Split a node list into connected components.
///
/// Every node lands in exactly one group. Neighbour indices are rewritten
/// to be local to their group. Groups are numbered from `first_id`.
pub fn group_nodes<I: MeshIndex>(
    nodes: Vec<UvNode<I>>,
    object: ObjectId,
    layer: UvLayerId,
    first_id: usize,
) -> Vec<UvNodeGroup<I>> {
    let mut component: Vec<Option<usize>> = vec![None; nodes.len()];
    let mut members: Vec<Vec<usize>> = Vec::new();
    let mut stack = Vec::new();

    for seed in 0..nodes.len() {
        if component[seed].is_some() {
            continue;
        }
        let c = members.len();
        component[seed] = Some(c);
        stack.push(seed);
        let mut list = Vec::new();

        while let Some(n) = stack.pop() {
            list.push(n);
            for &m in &nodes[n].neighbors {
                if component[m].is_none() {
                    component[m] = Some(c);
                    stack.push(m);
                }
            }
        }
        list.sort_unstable();
        members.push(list);
    }

    // Global index -> position within its group
    let mut local = vec![0usize; nodes.len()];
    for list in &members {
        for (i, &n) in list.iter().enumerate() {
            local[n] = i;
        }
    }

    let mut slots: Vec<Option<UvNode<I>>> = nodes.into_iter().map(Some).collect();
    members
        .iter()
        .enumerate()
        .map(|(c, list)| {
            let group_nodes: Vec<UvNode<I>> = list
                .iter()
                .filter_map(|&n| slots[n].take())
                .map(|mut node| {
                    for m in node.neighbors.iter_mut() {
                        *m = local[*m];
                    }
                    node
                })
                .collect();
            UvNodeGroup::new(first_id + c, object, layer, group_nodes)
        })
        .collect()
}

/// Build the node groups of one mesh.
pub fn build_node_groups<I: MeshIndex>(
    mesh: &UvMesh<I>,
    layer: UvLayerId,
    object: ObjectId,
    options: &NodeOptions,
    faces: Option<&BTreeSet<FaceId<I>>>,
    first_id: usize,
) -> Vec<UvNodeGroup<I>> {
    let nodes = build_nodes(mesh, layer, options, faces);
    let node_count = nodes.len();
    let groups = group_nodes(nodes, object, layer, first_id);
    debug!(
        "{:?}: {} nodes in {} groups ({:?} mode)",
        object,
        node_count,
        groups.len(),
        options.mode
    );
    groups
}
