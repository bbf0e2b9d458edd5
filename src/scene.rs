//! Objects in edit mode and the tool settings that govern them.
//!
//! Islands and node groups never hold a mesh reference. They remember the
//! [`ObjectId`] and [`UvLayerId`] they came from and take the [`Scene`] as an
//! argument whenever they need to read or write UVs, so several entities can
//! address the same mesh without aliasing it.

use nalgebra::{Matrix4, Point3};

use crate::error::{Result, UvError};
use crate::mesh::{MeshIndex, UvLayerId, UvMesh};

/// Stable handle of an object registered in a [`Scene`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ObjectId(pub(crate) usize);

impl ObjectId {
    /// Registration order of the object.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// 3D selection granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MeshSelectMode {
    /// Vertex select.
    #[default]
    Vertex,
    /// Edge select.
    Edge,
    /// Face select.
    Face,
}

/// UV editor selection granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UvSelectMode {
    /// UV vertex select.
    #[default]
    Vertex,
    /// UV edge select.
    Edge,
    /// UV face select.
    Face,
    /// Whole-island select.
    Island,
}

/// Editor-wide settings the UV tools consult.
#[derive(Debug, Clone, Copy, Default)]
pub struct ToolSettings {
    /// When set, UV selection mirrors the 3D selection.
    pub use_uv_select_sync: bool,

    /// 3D selection mode.
    pub mesh_select_mode: MeshSelectMode,

    /// UV selection mode (ignored while syncing).
    pub uv_select_mode: UvSelectMode,
}

impl ToolSettings {
    /// Set the selection-sync flag.
    pub fn with_sync(mut self, sync: bool) -> Self {
        self.use_uv_select_sync = sync;
        self
    }

    /// Set the 3D selection mode.
    pub fn with_mesh_select_mode(mut self, mode: MeshSelectMode) -> Self {
        self.mesh_select_mode = mode;
        self
    }

    /// Set the UV selection mode.
    pub fn with_uv_select_mode(mut self, mode: UvSelectMode) -> Self {
        self.uv_select_mode = mode;
        self
    }
}

/// An object in edit mode.
#[derive(Debug, Clone)]
pub struct EditObject<I: MeshIndex = u32> {
    /// Object name.
    pub name: String,

    /// The edited mesh.
    pub mesh: UvMesh<I>,

    /// Object-to-world transform.
    pub matrix_world: Matrix4<f64>,
}

impl<I: MeshIndex> EditObject<I> {
    /// Transform an object-space point to world space.
    pub fn to_world(&self, p: &Point3<f64>) -> Point3<f64> {
        self.matrix_world.transform_point(p)
    }
}

/// The set of objects an operator may run on.
#[derive(Debug, Clone, Default)]
pub struct Scene<I: MeshIndex = u32> {
    objects: Vec<EditObject<I>>,

    /// Tool settings in effect.
    pub settings: ToolSettings,
}

impl<I: MeshIndex> Scene<I> {
    /// Create an empty scene with default settings.
    pub fn new() -> Self {
        Self::with_settings(ToolSettings::default())
    }

    /// Create an empty scene with the given settings.
    pub fn with_settings(settings: ToolSettings) -> Self {
        Self {
            objects: Vec::new(),
            settings,
        }
    }

    /// Register an object with an identity transform.
    pub fn add_object(&mut self, name: &str, mesh: UvMesh<I>) -> ObjectId {
        self.add_object_with_matrix(name, mesh, Matrix4::identity())
    }

    /// Register an object with a world transform.
    pub fn add_object_with_matrix(
        &mut self,
        name: &str,
        mesh: UvMesh<I>,
        matrix_world: Matrix4<f64>,
    ) -> ObjectId {
        let id = ObjectId(self.objects.len());
        self.objects.push(EditObject {
            name: name.to_string(),
            mesh,
            matrix_world,
        });
        id
    }

    /// Number of objects.
    #[inline]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// All object ids in registration order.
    pub fn object_ids(&self) -> impl Iterator<Item = ObjectId> + '_ {
        (0..self.objects.len()).map(ObjectId)
    }

    /// Get an object.
    pub fn object(&self, id: ObjectId) -> Result<&EditObject<I>> {
        self.objects.get(id.0).ok_or(UvError::UnknownObject(id))
    }

    /// Get a mutable object.
    pub fn object_mut(&mut self, id: ObjectId) -> Result<&mut EditObject<I>> {
        self.objects.get_mut(id.0).ok_or(UvError::UnknownObject(id))
    }

    /// Get an object's mesh.
    pub fn mesh(&self, id: ObjectId) -> Result<&UvMesh<I>> {
        self.object(id).map(|o| &o.mesh)
    }

    /// Get an object's mesh mutably.
    pub fn mesh_mut(&mut self, id: ObjectId) -> Result<&mut UvMesh<I>> {
        self.object_mut(id).map(|o| &mut o.mesh)
    }

    /// The active UV layer of an object.
    pub fn uv_layer(&self, id: ObjectId) -> Result<UvLayerId> {
        self.mesh(id)?
            .active_uv_layer()
            .ok_or(UvError::MissingUvLayer { object: id })
    }

    /// Whether selection sync is on.
    #[inline]
    pub fn sync(&self) -> bool {
        self.settings.use_uv_select_sync
    }
}
