//! Island discovery.
//!
//! Islands are found by flood filling a target face set across edges that
//! are not seams. The host's seam derivation is used to turn every UV
//! discontinuity into a seam first, so the fill stops at UV borders as well
//! as at user seams. That pass overwrites seams and selection; both are
//! captured up front and written back before returning, on every path.
//!
//! # Example
//!
//! ```
//! use uvkit::prelude::*;
//! use nalgebra::{Point2, Point3};
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//! ];
//! let faces = vec![[0, 1, 2], [0, 2, 3]];
//! let uvs = vec![
//!     [Point2::new(0.0, 0.0), Point2::new(1.0, 0.0), Point2::new(1.0, 1.0)],
//!     [Point2::new(0.0, 0.0), Point2::new(1.0, 1.0), Point2::new(0.0, 1.0)],
//! ];
//! let mut scene: Scene = Scene::new();
//! let id = scene.add_object("quad", build_with_uvs(&vertices, &faces, &uvs).unwrap());
//! let layer = scene.uv_layer(id).unwrap();
//!
//! let mut host = NativeHost::new();
//! let options = IslandOptions::default().with_find_all(true).with_sync(true);
//! let mesh = scene.mesh_mut(id).unwrap();
//! let islands = find_islands(mesh, layer, id, &mut host, &options, 0).unwrap();
//! assert_eq!(islands.len(), 1);
//! assert_eq!(islands[0].num_faces(), 2);
//! ```

use std::collections::BTreeSet;

use log::{debug, trace};

use super::Island;
use crate::error::Result;
use crate::host::EditorHost;
use crate::mesh::{EdgeId, FaceId, MeshIndex, UvLayerId, UvMesh};
use crate::scene::{ObjectId, ToolSettings};
use crate::selection::{select_all_uv, EditStateSnapshot};
use crate::sync::sync_uv_from_mesh;

/// Options controlling which faces island discovery considers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IslandOptions {
    /// Grow the UV selection to whole islands before collecting faces.
    pub extend: bool,
    /// Consider every candidate face regardless of UV selection.
    pub find_all: bool,
    /// Selection sync is on: UV selection mirrors the 3D selection.
    pub sync: bool,
    /// Under sync, also accept faces with only some vertices selected, and
    /// drop islands that end up with no selected UV at all.
    pub sync_any: bool,
}

impl IslandOptions {
    /// Options with `sync` taken from the editor settings.
    pub fn from_settings(settings: &ToolSettings) -> Self {
        Self {
            sync: settings.use_uv_select_sync,
            ..Self::default()
        }
    }

    /// Set the extend flag.
    pub fn with_extend(mut self, extend: bool) -> Self {
        self.extend = extend;
        self
    }

    /// Set the find-all flag.
    pub fn with_find_all(mut self, find_all: bool) -> Self {
        self.find_all = find_all;
        self
    }

    /// Set the sync flag.
    pub fn with_sync(mut self, sync: bool) -> Self {
        self.sync = sync;
        self
    }

    /// Set the sync-any flag.
    pub fn with_sync_any(mut self, sync_any: bool) -> Self {
        self.sync_any = sync_any;
        self
    }
}

/// One connected component found by [`flood_fill_islands`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaceComponent<I: MeshIndex = u32> {
    /// Member faces.
    pub faces: BTreeSet<FaceId<I>>,
    /// Edges where the fill stopped.
    pub boundary_edges: BTreeSet<EdgeId<I>>,
}

/// Partition `target` into components connected across non-seam edges.
///
/// An edge stops the fill if it is a seam, has no face on the other side,
/// or borders a face outside `target`. Every target face ends up in exactly
/// one component; component order follows the lowest unvisited face.
pub fn flood_fill_islands<I: MeshIndex>(
    mesh: &UvMesh<I>,
    target: &BTreeSet<FaceId<I>>,
) -> Vec<FaceComponent<I>> {
    let mut visited = vec![false; mesh.num_faces()];
    let mut components = Vec::new();
    let mut stack = Vec::new();

    for &seed in target {
        if visited[seed.index()] {
            continue;
        }
        visited[seed.index()] = true;
        stack.push(seed);

        let mut component = FaceComponent {
            faces: BTreeSet::new(),
            boundary_edges: BTreeSet::new(),
        };
        while let Some(f) = stack.pop() {
            component.faces.insert(f);

            for e in mesh.face_edges(f) {
                if mesh.edge(e).seam {
                    component.boundary_edges.insert(e);
                    continue;
                }

                let mut crossed = false;
                for g in mesh.edge_faces(e).filter(|&g| g != f) {
                    crossed = true;
                    if !target.contains(&g) {
                        component.boundary_edges.insert(e);
                    } else if !visited[g.index()] {
                        visited[g.index()] = true;
                        stack.push(g);
                    }
                }
                if !crossed {
                    component.boundary_edges.insert(e);
                }
            }
        }
        components.push(component);
    }

    components
}

/// Faces the current options make eligible for island membership.
///
/// Expects UV flags to already mirror the 3D selection when syncing.
fn target_faces<I, H>(
    mesh: &mut UvMesh<I>,
    layer: UvLayerId,
    host: &mut H,
    options: &IslandOptions,
) -> Result<BTreeSet<FaceId<I>>>
where
    I: MeshIndex,
    H: EditorHost<I> + ?Sized,
{
    let face_selected = |mesh: &UvMesh<I>, f: FaceId<I>| mesh.face(f).select;
    let any_uv = |mesh: &UvMesh<I>, f: FaceId<I>| {
        mesh.face_loops(f).any(|l| mesh.luv(layer, l).select)
    };
    let all_uv = |mesh: &UvMesh<I>, f: FaceId<I>| {
        mesh.face_loops(f).all(|l| mesh.luv(layer, l).select)
    };

    if !options.find_all && options.extend && !options.sync {
        host.select_linked_uv(mesh, layer)?;
    }

    let mesh = &*mesh;
    let target = mesh.face_ids().filter(|&f| {
        match (options.find_all, options.extend, options.sync) {
            (true, _, true) => true,
            (true, _, false) => face_selected(mesh, f),
            (false, true, true) if options.sync_any => any_uv(mesh, f),
            (false, true, true) => face_selected(mesh, f),
            (false, true, false) => face_selected(mesh, f) && all_uv(mesh, f),
            (false, false, true) if options.sync_any => any_uv(mesh, f),
            (false, false, true) => face_selected(mesh, f) && any_uv(mesh, f),
            (false, false, false) => face_selected(mesh, f) && all_uv(mesh, f),
        }
    });

    Ok(target.collect())
}

/// The destructive part of discovery. Runs between snapshot and restore.
fn mark_and_fill<I, H>(
    mesh: &mut UvMesh<I>,
    layer: UvLayerId,
    host: &mut H,
    options: &IslandOptions,
) -> Result<Vec<FaceComponent<I>>>
where
    I: MeshIndex,
    H: EditorHost<I> + ?Sized,
{
    if options.sync {
        sync_uv_from_mesh(mesh, layer);
    }

    let target = target_faces(mesh, layer, host, options)?;
    trace!("{} target faces", target.len());
    if target.is_empty() {
        return Ok(Vec::new());
    }

    select_all_uv(mesh, layer, target.iter().copied());
    host.mark_seams_from_uv_islands(mesh, layer)?;

    Ok(flood_fill_islands(mesh, &target))
}

/// Find the islands of one object's mesh.
///
/// Seams and both selections are left exactly as they were, whether or not
/// a host primitive fails. Islands are numbered from `first_id`.
///
/// With `sync_any`, an island is kept if at least one of its loops is
/// effectively UV-selected once the original selection is back.
pub fn find_islands<I, H>(
    mesh: &mut UvMesh<I>,
    layer: UvLayerId,
    object: ObjectId,
    host: &mut H,
    options: &IslandOptions,
    first_id: usize,
) -> Result<Vec<Island<I>>>
where
    I: MeshIndex,
    H: EditorHost<I> + ?Sized,
{
    let snapshot = EditStateSnapshot::capture(mesh, layer);
    let filled = mark_and_fill(mesh, layer, host, options);
    snapshot.restore(mesh);
    let components = filled?;

    let mut islands: Vec<Island<I>> = components
        .into_iter()
        .enumerate()
        .map(|(i, c)| Island::new(first_id + i, object, layer, c.faces, c.boundary_edges, mesh))
        .collect();

    if options.sync_any {
        let before = islands.len();
        islands.retain(|island| island.selected_uv_count(mesh, options.sync) > 0);
        if islands.len() != before {
            trace!("dropped {} islands without selected uvs", before - islands.len());
        }
    }

    debug!("found {} islands on {:?}", islands.len(), object);
    Ok(islands)
}
