use arena_geom::{Aabb, Vec3};

fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() <= eps
}

fn vec3_approx_eq(a: Vec3, b: Vec3, eps: f64) -> bool {
    approx_eq(a.x, b.x, eps) && approx_eq(a.y, b.y, eps) && approx_eq(a.z, b.z, eps)
}

#[test]
fn vec3_constants() {
    assert!(vec3_approx_eq(Vec3::ZERO, Vec3::new(0.0, 0.0, 0.0), 1e-12));
    assert!(vec3_approx_eq(Vec3::UNIT_Y, Vec3::new(0.0, 1.0, 0.0), 1e-12));
    assert!(vec3_approx_eq(Vec3::ONE, Vec3::new(1.0, 1.0, 1.0), 1e-12));
}

#[test]
fn vec3_add_sub_neg() {
    let a = Vec3::new(1.0, 2.0, 3.0);
    let b = Vec3::new(-4.0, 5.0, -6.0);
    let c = a + b;
    assert!(vec3_approx_eq(c, Vec3::new(-3.0, 7.0, -3.0), 1e-12));
    assert!(vec3_approx_eq(c - a, b, 1e-12));
    assert!(vec3_approx_eq(-a, Vec3::new(-1.0, -2.0, -3.0), 1e-12));
    assert!(vec3_approx_eq(a * 2.0 / 4.0, Vec3::new(0.5, 1.0, 1.5), 1e-12));
}

#[test]
fn vec3_cross_basis() {
    assert!(vec3_approx_eq(Vec3::UNIT_X.cross(Vec3::UNIT_Y), Vec3::UNIT_Z, 1e-12));
    assert!(vec3_approx_eq(Vec3::UNIT_Y.cross(Vec3::UNIT_Z), Vec3::UNIT_X, 1e-12));
    assert!(vec3_approx_eq(Vec3::UNIT_Z.cross(Vec3::UNIT_X), Vec3::UNIT_Y, 1e-12));
}

#[test]
fn vec3_normalized_zero_is_noop() {
    let n = Vec3::new(3.0, 4.0, 0.0).normalized();
    assert!(vec3_approx_eq(n, Vec3::new(0.6, 0.8, 0.0), 1e-12));
    assert!(vec3_approx_eq(Vec3::ZERO.normalized(), Vec3::ZERO, 1e-12));
}

#[test]
fn vec3_rotated_y_quarter_turn() {
    let r = Vec3::UNIT_X.rotated_y(std::f64::consts::FRAC_PI_2);
    assert!(vec3_approx_eq(r, Vec3::new(0.0, 0.0, -1.0), 1e-12));
    let back = r.rotated_y(-std::f64::consts::FRAC_PI_2);
    assert!(vec3_approx_eq(back, Vec3::UNIT_X, 1e-12));
}

#[test]
fn aabb_extents_and_corners() {
    let aabb = Aabb::new(Vec3::new(-1.0, 0.0, 1.0), Vec3::new(2.0, 3.0, 5.0));
    assert!(approx_eq(aabb.width(), 3.0, 1e-12));
    assert!(approx_eq(aabb.height(), 3.0, 1e-12));
    assert!(approx_eq(aabb.depth(), 4.0, 1e-12));

    let corners = aabb.corners();
    assert_eq!(corners[0], aabb.min);
    assert_eq!(corners[7], aabb.max);
    // Bit 0 picks max X, bit 1 max Y, bit 2 max Z.
    for (i, c) in corners.iter().enumerate() {
        assert_eq!(c.x, if i & 1 != 0 { aabb.max.x } else { aabb.min.x });
        assert_eq!(c.y, if i & 2 != 0 { aabb.max.y } else { aabb.min.y });
        assert_eq!(c.z, if i & 4 != 0 { aabb.max.z } else { aabb.min.z });
    }
}

#[test]
fn aabb_contains_box() {
    let outer = Aabb::new(Vec3::ZERO, Vec3::new(4.0, 4.0, 4.0));
    let inner = Aabb::new(Vec3::ONE, Vec3::new(2.0, 4.0, 2.0));
    let poking = Aabb::new(Vec3::ONE, Vec3::new(5.0, 2.0, 2.0));
    assert!(outer.contains_box(&inner));
    assert!(outer.contains_box(&outer));
    assert!(!outer.contains_box(&poking));
    assert!(!inner.contains_box(&outer));
}
