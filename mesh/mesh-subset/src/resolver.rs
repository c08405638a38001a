//! Lookup of reference surfaces by name.

use mesh_types::IndexedMesh;
use std::collections::HashMap as StdHashMap;
use std::hash::BuildHasher;

/// Supplies reference surfaces by name.
///
/// Reading surface files is left to the caller; implement this trait over
/// whatever store holds them.
///
/// # Example
///
/// ```
/// use mesh_subset::SurfaceResolver;
/// use mesh_types::{unit_cube, IndexedMesh};
/// use std::collections::HashMap;
///
/// let mut surfaces: HashMap<String, IndexedMesh> = HashMap::new();
/// surfaces.insert("box".to_string(), unit_cube());
///
/// assert!(surfaces.resolve("box").is_some());
/// assert!(surfaces.resolve("ball").is_none());
/// ```
pub trait SurfaceResolver {
    /// The surface registered under `name`, if any.
    fn resolve(&self, name: &str) -> Option<IndexedMesh>;
}

impl<S: BuildHasher> SurfaceResolver for StdHashMap<String, IndexedMesh, S> {
    fn resolve(&self, name: &str) -> Option<IndexedMesh> {
        self.get(name).cloned()
    }
}

impl<S: BuildHasher> SurfaceResolver for hashbrown::HashMap<String, IndexedMesh, S> {
    fn resolve(&self, name: &str) -> Option<IndexedMesh> {
        self.get(name).cloned()
    }
}

impl<R: SurfaceResolver + ?Sized> SurfaceResolver for &R {
    fn resolve(&self, name: &str) -> Option<IndexedMesh> {
        (**self).resolve(name)
    }
}

/// A resolver that knows no surfaces.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSurfaces;

impl SurfaceResolver for NoSurfaces {
    fn resolve(&self, _name: &str) -> Option<IndexedMesh> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesh_types::unit_tetrahedron;

    #[test]
    fn hashbrown_map_resolves() {
        let mut surfaces: hashbrown::HashMap<String, IndexedMesh> = hashbrown::HashMap::new();
        surfaces.insert("tet".to_string(), unit_tetrahedron());
        assert_eq!(surfaces.resolve("tet"), Some(unit_tetrahedron()));
        assert_eq!(surfaces.resolve("other"), None);
    }

    #[test]
    fn no_surfaces_resolves_nothing() {
        assert!(NoSurfaces.resolve("anything").is_none());
        assert!((&NoSurfaces).resolve("anything").is_none());
    }
}
