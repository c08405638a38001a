//! Property-based tests for face selection and compaction.
//!
//! These tests use proptest to generate random surfaces, parameters and
//! masks, and verify the selection and compaction invariants.
//!
//! Run with: cargo test -p mesh-subset -- proptest

use std::collections::HashMap;

use mesh_octree::OctreeConfig;
use mesh_subset::{
    NoSurfaces, ReferenceSurface, SelectionMask, SubsetConfig, SubsetParams, Surface, compact,
    faces_at_edges, faces_at_points, faces_in_zone, faces_on_side, faces_with_neighbours,
    reference_octree, select_faces,
};
use mesh_types::{IndexedMesh, Point3, Vector3, Vertex, unit_cube, uv_sphere};
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

fn arb_vertex() -> impl Strategy<Value = Vertex> {
    prop::array::uniform3(-10.0..10.0f64).prop_map(|[x, y, z]| Vertex::from_coords(x, y, z))
}

/// A mesh with valid face indices. Points may be unused.
fn arb_mesh() -> impl Strategy<Value = IndexedMesh> {
    prop::collection::vec(arb_vertex(), 3..20).prop_flat_map(|vertices| {
        let n = vertices.len() as u32;
        let faces = prop::collection::vec(prop::array::uniform3(0..n), 1..30);
        faces.prop_map(move |faces| IndexedMesh::from_parts(vertices.clone(), faces))
    })
}

fn arb_zone() -> impl Strategy<Value = Option<(Point3<f64>, Point3<f64>)>> {
    prop::option::of((
        prop::array::uniform3(-10.0..10.0f64).prop_map(Point3::from),
        prop::array::uniform3(-10.0..10.0f64).prop_map(Point3::from),
    ))
}

/// A mesh with in-range selection parameters.
fn arb_case() -> impl Strategy<Value = (IndexedMesh, SubsetParams)> {
    arb_mesh().prop_flat_map(|mesh| {
        let points = mesh.vertices.len() as i64;
        let faces = mesh.faces.len() as i64;
        let edges = Surface::new(mesh.clone()).unwrap().edge_count() as i64;

        let params = (
            prop::collection::vec(0..points, 0..4),
            prop::collection::vec(0..edges, 0..4),
            prop::collection::vec(0..faces, 0..4),
            any::<bool>(),
            arb_zone(),
        )
            .prop_map(|(points, edges, faces, add, zone)| {
                let params = SubsetParams::default()
                    .with_local_points(points)
                    .with_edges(edges)
                    .with_faces(faces)
                    .with_add_face_neighbours(add);
                match zone {
                    Some((min, max)) => params.with_zone(min, max),
                    None => params,
                }
            });

        (Just(mesh), params)
    })
}

fn arb_masked_mesh() -> impl Strategy<Value = (IndexedMesh, SelectionMask)> {
    arb_mesh().prop_flat_map(|mesh| {
        let flags = prop::collection::vec(any::<bool>(), mesh.faces.len());
        (Just(mesh), flags.prop_map(SelectionMask::from))
    })
}

fn select(surface: &Surface, params: &SubsetParams) -> SelectionMask {
    select_faces(surface, params, &NoSurfaces, &SubsetConfig::default())
        .unwrap()
        .mask
}

/// Cube from (-5,-5,-5) to (5,5,5), inside the range of generated vertices.
fn reference_cube() -> IndexedMesh {
    let mut cube = unit_cube();
    cube.scale(10.0);
    cube.translate(Vector3::new(-5.0, -5.0, -5.0));
    cube
}

fn select_with_cube(surface: &Surface, params: &SubsetParams) -> SelectionMask {
    let mut surfaces = HashMap::new();
    surfaces.insert("cube".to_string(), reference_cube());
    select_faces(surface, params, &surfaces, &SubsetConfig::default())
        .unwrap()
        .mask
}

// =============================================================================
// Selection properties
// =============================================================================

proptest! {
    #[test]
    fn proptest_selection_is_idempotent((mesh, params) in arb_case()) {
        let surface = Surface::new(mesh).unwrap();
        let once = select(&surface, &params);

        let mut doubled = params.clone();
        doubled.local_points.extend(params.local_points.iter().copied());
        doubled.edges.extend(params.edges.iter().copied());
        doubled.faces.extend(params.faces.iter().copied());

        prop_assert_eq!(select(&surface, &params), once.clone());
        prop_assert_eq!(select(&surface, &doubled), once);
    }

    #[test]
    fn proptest_label_order_is_irrelevant((mesh, params) in arb_case()) {
        let surface = Surface::new(mesh).unwrap();

        let mut reversed = params.clone();
        reversed.local_points.reverse();
        reversed.edges.reverse();
        reversed.faces.reverse();

        prop_assert_eq!(select(&surface, &params), select(&surface, &reversed));
    }

    #[test]
    fn proptest_selection_is_union_of_criteria((mesh, params) in arb_case()) {
        let surface = Surface::new(mesh).unwrap();
        let empty = SelectionMask::new(surface.face_count());

        let mut expected = SelectionMask::new(surface.face_count());
        expected.mark_all(faces_at_points(&surface, &params.local_points).unwrap());
        expected.mark_all(faces_at_edges(&surface, &params.edges).unwrap());
        expected.mark_all(faces_in_zone(&surface, &params.zone).unwrap());
        expected.mark_all(
            faces_with_neighbours(&surface, &params.faces, params.add_face_neighbours, &empty)
                .unwrap()
                .faces,
        );

        prop_assert_eq!(select(&surface, &params), expected);
    }

    #[test]
    fn proptest_reference_side_joins_the_union(
        (mesh, params) in arb_case(),
        outside in any::<bool>(),
    ) {
        let surface = Surface::new(mesh).unwrap();
        let empty = SelectionMask::new(surface.face_count());
        let reference = if outside {
            ReferenceSurface::outside("cube")
        } else {
            ReferenceSurface::inside("cube")
        };
        let params = params.with_surface(reference);

        let tree = reference_octree(&reference_cube(), &OctreeConfig::default()).unwrap();
        let mut expected = SelectionMask::new(surface.face_count());
        expected.mark_all(faces_at_points(&surface, &params.local_points).unwrap());
        expected.mark_all(faces_at_edges(&surface, &params.edges).unwrap());
        expected.mark_all(faces_in_zone(&surface, &params.zone).unwrap());
        expected.mark_all(faces_on_side(&surface, &tree, outside, &empty, false));
        expected.mark_all(
            faces_with_neighbours(&surface, &params.faces, params.add_face_neighbours, &empty)
                .unwrap()
                .faces,
        );

        let mut reversed = params.clone();
        reversed.local_points.reverse();
        reversed.edges.reverse();
        reversed.faces.reverse();

        prop_assert_eq!(select_with_cube(&surface, &params), expected.clone());
        prop_assert_eq!(select_with_cube(&surface, &reversed), expected);
    }

    #[test]
    fn proptest_inversion_complements((mesh, params) in arb_case()) {
        let surface = Surface::new(mesh).unwrap();
        let plain = select(&surface, &params);
        let inverted = select(&surface, &params.clone().with_invert_selection(true));

        prop_assert_eq!(plain.count() + inverted.count(), surface.face_count());
        for face in 0..surface.face_count() {
            prop_assert_ne!(plain.is_marked(face), inverted.is_marked(face));
        }

        let mut twice = inverted;
        twice.invert();
        prop_assert_eq!(twice, plain);
    }

    #[test]
    fn proptest_report_matches_mask((mesh, params) in arb_case()) {
        let surface = Surface::new(mesh).unwrap();
        let selection =
            select_faces(&surface, &params, &NoSurfaces, &SubsetConfig::default()).unwrap();
        prop_assert_eq!(selection.report.selected, selection.mask.count());
        prop_assert_eq!(selection.report.points_listed, params.local_points.len());
        prop_assert!(selection.report.neighbours_added <= surface.face_count());
        if !params.add_face_neighbours {
            prop_assert_eq!(selection.report.neighbours_added, 0);
        }
    }
}

// =============================================================================
// Compaction properties
// =============================================================================

proptest! {
    #[test]
    fn proptest_compaction_preserves_faces((mesh, mask) in arb_masked_mesh()) {
        let subset = compact(&mesh, &mask).unwrap();

        prop_assert_eq!(subset.face_map.len(), mask.count());
        prop_assert_eq!(subset.mesh.faces.len(), mask.count());
        prop_assert_eq!(subset.mesh.vertices.len(), subset.point_map.len());

        for (new_face, &old_face) in subset.mesh.faces.iter().zip(&subset.face_map) {
            prop_assert!(mask.is_marked(old_face));
            for (k, &index) in new_face.iter().enumerate() {
                let original = subset.point_map[index as usize];
                prop_assert_eq!(original, mesh.faces[old_face][k] as usize);
                prop_assert_eq!(&subset.mesh.vertices[index as usize], &mesh.vertices[original]);
            }
        }
    }

    #[test]
    fn proptest_compaction_keeps_only_used_points((mesh, mask) in arb_masked_mesh()) {
        let subset = compact(&mesh, &mask).unwrap();

        prop_assert!(subset.point_map.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(subset.face_map.windows(2).all(|w| w[0] < w[1]));

        let mut used = vec![false; subset.point_map.len()];
        for face in &subset.mesh.faces {
            for &index in face {
                used[index as usize] = true;
            }
        }
        prop_assert!(used.into_iter().all(|u| u));
    }

    #[test]
    fn proptest_full_selection_round_trips(segments in 3_u32..12, rings in 2_u32..8) {
        let mesh = uv_sphere(1.0, segments, rings);
        let mut mask = SelectionMask::new(mesh.faces.len());
        mask.mark_all(0..mesh.faces.len());

        let subset = compact(&mesh, &mask).unwrap();
        prop_assert_eq!(&subset.mesh, &mesh);
        prop_assert_eq!(subset.point_map, (0..mesh.vertices.len()).collect::<Vec<_>>());
    }
}
