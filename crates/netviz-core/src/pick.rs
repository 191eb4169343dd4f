//! Pointer picking against the registry's pick shapes, and tooltip text.

use crate::camera::OrbitCamera;
use crate::constants::{LINE_PICK_THRESHOLD, POINT_PICK_THRESHOLD};
use crate::dataset::Dataset;
use crate::registry::{PickShape, Primitive, PrimitiveRegistry, PrimitiveTag};
use glam::{Vec2, Vec3};

const PARALLEL_EPSILON: f32 = 1e-8;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit length, or zero for a degenerate ray that hits nothing.
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Nearest non-negative hit distance. A ray starting inside the sphere hits
/// the far side.
#[inline]
pub fn ray_sphere(ray: &Ray, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray.origin - center;
    let b = oc.dot(ray.direction);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let root = disc.sqrt();
    [-b - root, -b + root].into_iter().find(|t| *t >= 0.0)
}

/// Open cylinder (no caps) from `start` to `end`.
pub fn ray_cylinder(ray: &Ray, start: Vec3, end: Vec3, radius: f32) -> Option<f32> {
    let axis = end - start;
    let len = axis.length();
    if len <= f32::EPSILON {
        return None;
    }
    let axis = axis / len;
    let o = ray.origin - start;
    let d_perp = ray.direction - axis * ray.direction.dot(axis);
    let o_perp = o - axis * o.dot(axis);
    let a = d_perp.length_squared();
    if a < PARALLEL_EPSILON {
        return None;
    }
    let b = 2.0 * d_perp.dot(o_perp);
    let c = o_perp.length_squared() - radius * radius;
    let disc = b * b - 4.0 * a * c;
    if disc < 0.0 {
        return None;
    }
    let root = disc.sqrt();
    [(-b - root) / (2.0 * a), (-b + root) / (2.0 * a)]
        .into_iter()
        .filter(|t| *t >= 0.0)
        .find(|t| {
            let h = (o + ray.direction * *t).dot(axis);
            (0.0..=len).contains(&h)
        })
}

/// Quad centred on `center` spanned by the camera's `right` and `up` axes.
pub fn ray_billboard(
    ray: &Ray,
    center: Vec3,
    half_size: Vec2,
    right: Vec3,
    up: Vec3,
) -> Option<f32> {
    let normal = right.cross(up);
    let denom = ray.direction.dot(normal);
    if denom.abs() < PARALLEL_EPSILON {
        return None;
    }
    let t = (center - ray.origin).dot(normal) / denom;
    if t < 0.0 {
        return None;
    }
    let local = ray.at(t) - center;
    (local.dot(right).abs() <= half_size.x && local.dot(up).abs() <= half_size.y).then_some(t)
}

/// Distance along the ray to its closest approach to segment `a`–`b`, if
/// that approach is within `threshold`.
pub fn ray_segment(ray: &Ray, a: Vec3, b: Vec3, threshold: f32) -> Option<f32> {
    let v = b - a;
    let w = ray.origin - a;
    let uv = ray.direction.dot(v);
    let vv = v.dot(v);
    let uw = ray.direction.dot(w);
    let vw = v.dot(w);
    let denom = vv - uv * uv;
    let mut s = if vv <= f32::EPSILON {
        0.0
    } else if denom.abs() < PARALLEL_EPSILON {
        (vw / vv).clamp(0.0, 1.0)
    } else {
        ((vw - uv * uw) / denom).clamp(0.0, 1.0)
    };
    let mut t = uv * s - uw;
    if t < 0.0 {
        t = 0.0;
        if vv > f32::EPSILON {
            s = (vw / vv).clamp(0.0, 1.0);
        }
    }
    let gap = ray.at(t) - (a + v * s);
    (gap.length() <= threshold).then_some(t)
}

pub fn ray_point(ray: &Ray, point: Vec3, threshold: f32) -> Option<f32> {
    let t = (point - ray.origin).dot(ray.direction);
    if t < 0.0 {
        return None;
    }
    (ray.at(t).distance(point) <= threshold).then_some(t)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Picked {
    pub tag: PrimitiveTag,
    pub distance: f32,
}

#[derive(Clone, Copy, Debug)]
pub struct PickController {
    pub line_threshold: f32,
    pub point_threshold: f32,
}

impl Default for PickController {
    fn default() -> Self {
        Self {
            line_threshold: LINE_PICK_THRESHOLD,
            point_threshold: POINT_PICK_THRESHOLD,
        }
    }
}

impl PickController {
    pub fn intersect(&self, ray: &Ray, camera: &OrbitCamera, prim: &Primitive) -> Option<f32> {
        match &prim.shape {
            PickShape::Sphere { center, radius } => ray_sphere(ray, *center, *radius),
            PickShape::Cylinder { start, end, radius } => ray_cylinder(ray, *start, *end, *radius),
            PickShape::Billboard { center, half_size } => {
                let (right, up) = camera.right_up();
                ray_billboard(ray, *center, *half_size, right, up)
            }
            PickShape::Segments(segments) => segments
                .iter()
                .filter_map(|[a, b]| ray_segment(ray, *a, *b, self.line_threshold))
                .min_by(f32::total_cmp),
            PickShape::Points(points) => points
                .iter()
                .filter_map(|p| ray_point(ray, *p, self.point_threshold))
                .min_by(f32::total_cmp),
        }
    }

    /// Every visible primitive the ray touches, nearest first.
    pub fn hits(
        &self,
        ray: &Ray,
        camera: &OrbitCamera,
        registry: &PrimitiveRegistry,
    ) -> Vec<Picked> {
        let mut hits: Vec<Picked> = registry
            .iter()
            .filter(|p| p.visible)
            .filter_map(|p| {
                self.intersect(ray, camera, p).map(|distance| Picked {
                    tag: p.tag,
                    distance,
                })
            })
            .collect();
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }

    /// Nearest hit that stands for a location, community or connection.
    pub fn pick(
        &self,
        ray: &Ray,
        camera: &OrbitCamera,
        registry: &PrimitiveRegistry,
    ) -> Option<Picked> {
        self.hits(ray, camera, registry)
            .into_iter()
            .find(|h| h.tag.is_interactive())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tooltip {
    pub title: String,
    pub lines: Vec<String>,
}

/// Tooltip text for a picked entity. `None` when the tag does not resolve to
/// an entity of `dataset`.
pub fn describe(picked: &Picked, dataset: &Dataset) -> Option<Tooltip> {
    match picked.tag {
        PrimitiveTag::Representative(i) => {
            let c = dataset.communities.get(i)?;
            let mut lines = vec![
                format!("Locations: {}", c.size),
                format!("Total Reach: {}", format_count(c.reach)),
            ];
            if let Some(v) = c.retweets.filter(|v| *v != 0.0) {
                lines.push(format!("Retweets: {}", format_count(v)));
            }
            if let Some(v) = c.likes.filter(|v| *v != 0.0) {
                lines.push(format!("Likes: {}", format_count(v)));
            }
            Some(Tooltip {
                title: format!("Community {}", c.id),
                lines,
            })
        }
        PrimitiveTag::Location(i) => {
            let l = dataset.locations.get(i)?;
            Some(Tooltip {
                title: format!("Location {}", l.id),
                lines: vec![
                    format!("Community: {}", l.community),
                    format!("Reach: {}", format_count(l.reach)),
                ],
            })
        }
        PrimitiveTag::Connection(link) => {
            let sum = u64::from(link.from_size) + u64::from(link.to_size);
            Some(Tooltip {
                title: "Connection".to_string(),
                lines: vec![
                    format!("C{} ↔ C{}", link.from, link.to),
                    format!(
                        "Members: {} + {} = {}",
                        format_count(f64::from(link.from_size)),
                        format_count(f64::from(link.to_size)),
                        format_count(sum as f64)
                    ),
                ],
            })
        }
        PrimitiveTag::Background | PrimitiveTag::RawEdges => None,
    }
}

/// `1234567.5` as `1,234,567.5`; at most three fractional digits.
pub fn format_count(value: f64) -> String {
    if !value.is_finite() || value.abs() >= u64::MAX as f64 {
        return value.to_string();
    }
    let rounded = (value.abs() * 1000.0).round() / 1000.0;
    let whole = rounded.trunc() as u64;
    let frac = ((rounded - rounded.trunc()) * 1000.0).round() as u64;

    let digits = whole.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 5);
    if value < 0.0 && (whole > 0 || frac > 0) {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if frac > 0 {
        let f = format!("{frac:03}");
        out.push('.');
        out.push_str(f.trim_end_matches('0'));
    }
    out
}
