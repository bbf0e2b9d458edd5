//! Index types for mesh elements.
//!
//! Vertices, face loops, edges and faces are addressed through type-safe
//! wrappers so a loop index can never be passed where a face is expected.
//! The wrappers are generic over the underlying integer ([`MeshIndex`]);
//! `u32` is the default and covers every realistic editing mesh.

use std::fmt::{self, Debug};
use std::hash::Hash;

/// Integer types usable as mesh indices.
pub trait MeshIndex:
    Copy + Clone + Eq + PartialEq + Ord + PartialOrd + Hash + Debug + Send + Sync + 'static
{
    /// Sentinel value for a missing element.
    const INVALID: Self;

    /// Convert from usize.
    ///
    /// # Panics
    /// Debug builds panic if the value does not fit.
    fn from_usize(v: usize) -> Self;

    /// Convert to usize.
    fn to_usize(self) -> usize;

    /// Check if this is a valid (non-sentinel) index.
    fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}

macro_rules! impl_mesh_index {
    ($($int:ty),*) => {
        $(
            impl MeshIndex for $int {
                const INVALID: Self = <$int>::MAX;

                #[inline]
                fn from_usize(v: usize) -> Self {
                    debug_assert!(
                        v < <$int>::MAX as usize,
                        "index {} too large for {}",
                        v,
                        stringify!($int)
                    );
                    v as $int
                }

                #[inline]
                fn to_usize(self) -> usize {
                    self as usize
                }
            }
        )*
    };
}

impl_mesh_index!(u16, u32, u64);

/// A mesh vertex.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct VertexId<I: MeshIndex = u32>(I);

/// A face corner: one vertex as seen from one face. UVs are stored per loop.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct LoopId<I: MeshIndex = u32>(I);

/// An undirected mesh edge.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct EdgeId<I: MeshIndex = u32>(I);

/// A polygon face.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct FaceId<I: MeshIndex = u32>(I);

macro_rules! impl_index_type {
    ($name:ident, $display:literal) => {
        impl<I: MeshIndex> $name<I> {
            /// Create a new index from a raw value.
            #[inline]
            pub fn new(index: usize) -> Self {
                Self(I::from_usize(index))
            }

            /// Create an invalid/null index.
            #[inline]
            pub fn invalid() -> Self {
                Self(I::INVALID)
            }

            /// Get the raw index value.
            #[inline]
            pub fn index(self) -> usize {
                self.0.to_usize()
            }

            /// Check if this is a valid (non-null) index.
            #[inline]
            pub fn is_valid(self) -> bool {
                self.0.is_valid()
            }
        }

        impl<I: MeshIndex> Debug for $name<I> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_valid() {
                    write!(f, "{}({})", $display, self.index())
                } else {
                    write!(f, "{}(INVALID)", $display)
                }
            }
        }

        impl<I: MeshIndex> Default for $name<I> {
            fn default() -> Self {
                Self::invalid()
            }
        }

        impl<I: MeshIndex> From<usize> for $name<I> {
            fn from(v: usize) -> Self {
                Self::new(v)
            }
        }
    };
}

impl_index_type!(VertexId, "V");
impl_index_type!(LoopId, "L");
impl_index_type!(EdgeId, "E");
impl_index_type!(FaceId, "F");

/// Position of a UV layer within a mesh's layer list.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct UvLayerId(pub(crate) usize);

impl UvLayerId {
    /// Get the layer's position.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loop_id() {
        let l: LoopId = LoopId::new(7);
        assert_eq!(l.index(), 7);
        assert!(l.is_valid());
        assert!(!LoopId::<u32>::invalid().is_valid());
    }

    #[test]
    fn test_small_indices() {
        let f: FaceId<u16> = FaceId::new(1000);
        assert_eq!(f.index(), 1000);
        assert!(!FaceId::<u16>::default().is_valid());
    }

    #[test]
    fn test_ordering_follows_raw_value() {
        let a: VertexId = VertexId::new(3);
        let b: VertexId = VertexId::new(10);
        assert!(a < b);
    }

    #[test]
    fn test_debug_format() {
        let e: EdgeId = EdgeId::new(42);
        assert_eq!(format!("{:?}", e), "E(42)");
        assert_eq!(format!("{:?}", LoopId::<u32>::invalid()), "L(INVALID)");
    }
}
