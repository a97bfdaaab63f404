use arena_geom::{Aabb, Vec3};
use proptest::prelude::*;

fn approx_abs_rel(a: f64, b: f64, atol: f64, rtol: f64) -> bool {
    let diff = (a - b).abs();
    let scale = a.abs().max(b.abs());
    diff <= atol + rtol * scale
}

fn bounded_f64() -> impl Strategy<Value = f64> {
    -1.0e6f64..1.0e6
}
fn arb_vec3() -> impl Strategy<Value = Vec3> {
    (bounded_f64(), bounded_f64(), bounded_f64()).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}
fn arb_ordered_aabb() -> impl Strategy<Value = Aabb> {
    (arb_vec3(), arb_vec3()).prop_map(|(a, b)| {
        Aabb::new(
            Vec3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            Vec3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        )
    })
}

proptest! {
    // Translating a box keeps its extents
    #[test]
    fn aabb_translation_keeps_extents(a in arb_ordered_aabb(), t in arb_vec3()) {
        let b = Aabb::new(a.min + t, a.max + t);
        prop_assert!(approx_abs_rel(b.width(), a.width(), 1e-6, 1e-9));
        prop_assert!(approx_abs_rel(b.height(), a.height(), 1e-6, 1e-9));
        prop_assert!(approx_abs_rel(b.depth(), a.depth(), 1e-6, 1e-9));
    }

    // A degenerate box at any corner is contained by the box
    #[test]
    fn aabb_contains_its_corners(a in arb_ordered_aabb()) {
        for c in a.corners() {
            prop_assert!(a.contains_box(&Aabb::new(c, c)));
        }
    }

    // A box scaled toward its middle by k in [0, 1) is contained by the unscaled one
    #[test]
    fn aabb_scaled_inward_is_contained(a in arb_ordered_aabb(), k in 0.0f64..1.0) {
        let mid = (a.min + a.max) / 2.0;
        let inner = Aabb::new(mid + (a.min - mid) * k, mid + (a.max - mid) * k);
        prop_assert!(a.contains_box(&inner));
    }

    // Rotation about Y keeps length and height
    #[test]
    fn vec3_rotation_preserves_length(v in arb_vec3(), r in -10.0f64..10.0) {
        let w = v.rotated_y(r);
        prop_assert!(approx_abs_rel(w.length(), v.length(), 1e-6, 1e-9));
        prop_assert_eq!(w.y, v.y);
    }
}
