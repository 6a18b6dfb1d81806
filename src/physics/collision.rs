//! Pairwise collision testing and the scene sweep
//!
//! Shapes test against each other through [`test_collision`]; a shape that
//! does not know how to test against its counterpart answers
//! [`CollisionTest::CannotHandle`] and the sweep retries the pair reversed.

use glam::Vec2;
use std::f32::consts::PI;

use crate::scene::{NodeId, SceneTree};
use crate::transform::Transform;

use super::{Collider, ColliderShape};

/// One side of a collision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Translation that separates this collider from the other
    pub offset: Vec2,
    /// Direction from this collider toward the other, in radians
    pub angle: f32,
}

/// Outcome of testing one collider pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CollisionTest {
    /// The shapes overlap; contacts for the first and second collider
    Hit(Contact, Contact),
    /// The shapes do not overlap
    Miss,
    /// The first shape cannot test against the second; retry reversed
    CannotHandle,
}

/// A collision reported by [`sweep`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionHit {
    /// First node of the pair
    pub a: NodeId,
    /// Second node of the pair
    pub b: NodeId,
    /// Contact for the first node
    pub contact_a: Contact,
    /// Contact for the second node
    pub contact_b: Contact,
}

/// Test two colliders placed at world transforms.
///
/// Circles only know how to test against circles; boxes handle both boxes
/// and circles. A circle-versus-box query therefore answers
/// [`CollisionTest::CannotHandle`].
#[must_use]
pub fn test_collision(
    a: &Collider,
    world_a: &Transform,
    b: &Collider,
    world_b: &Transform,
) -> CollisionTest {
    match (a.shape, b.shape) {
        (ColliderShape::Circle { .. }, ColliderShape::Circle { .. }) => {
            circle_circle(a, world_a, b, world_b)
        }
        (ColliderShape::Aabb { .. }, ColliderShape::Aabb { .. }) => {
            aabb_aabb(a, world_a, b, world_b)
        }
        (ColliderShape::Aabb { .. }, ColliderShape::Circle { .. }) => {
            aabb_circle(a, world_a, b, world_b)
        }
        (ColliderShape::Circle { .. }, ColliderShape::Aabb { .. }) => CollisionTest::CannotHandle,
    }
}

fn circle_circle(
    a: &Collider,
    world_a: &Transform,
    b: &Collider,
    world_b: &Transform,
) -> CollisionTest {
    let ra = a.shape.scaled_radius(world_a);
    let rb = b.shape.scaled_radius(world_b);
    let delta = world_b.position - world_a.position;
    let reach = ra + rb;
    if delta.length_squared() >= reach * reach {
        return CollisionTest::Miss;
    }
    let d = delta.length();
    let angle = delta.y.atan2(delta.x);
    let dir = if d > f32::EPSILON {
        delta / d
    } else {
        Vec2::X
    };
    let pen = reach - d;
    CollisionTest::Hit(
        Contact {
            offset: -dir * pen,
            angle,
        },
        Contact {
            offset: dir * pen,
            angle: angle + PI,
        },
    )
}

fn aabb_aabb(
    a: &Collider,
    world_a: &Transform,
    b: &Collider,
    world_b: &Transform,
) -> CollisionTest {
    let half_a = a.shape.scaled_extents(world_a) * 0.5;
    let half_b = b.shape.scaled_extents(world_b) * 0.5;
    let delta = world_b.position - world_a.position;
    let overlap = Vec2::new(
        half_a.x + half_b.x - delta.x.abs(),
        half_a.y + half_b.y - delta.y.abs(),
    );
    if overlap.x <= 0.0 || overlap.y <= 0.0 {
        return CollisionTest::Miss;
    }
    // Separate along the axis of least penetration
    let (offset, angle) = if overlap.x < overlap.y {
        let sign = if delta.x >= 0.0 { 1.0 } else { -1.0 };
        (
            Vec2::new(-overlap.x * sign, 0.0),
            if delta.x >= 0.0 { 0.0 } else { PI },
        )
    } else {
        let sign = if delta.y >= 0.0 { 1.0 } else { -1.0 };
        (
            Vec2::new(0.0, -overlap.y * sign),
            if delta.y >= 0.0 { PI * 0.5 } else { PI * 1.5 },
        )
    };
    CollisionTest::Hit(
        Contact { offset, angle },
        Contact {
            offset: -offset,
            angle: angle + PI,
        },
    )
}

fn aabb_circle(
    a: &Collider,
    world_a: &Transform,
    b: &Collider,
    world_b: &Transform,
) -> CollisionTest {
    let half = a.shape.scaled_extents(world_a) * 0.5;
    let r = b.shape.scaled_radius(world_b);
    let delta = world_b.position - world_a.position;
    let clamped = delta.clamp(-half, half);
    let gap = delta - clamped;
    let gap_len_sq = gap.length_squared();
    if gap_len_sq >= r * r {
        return CollisionTest::Miss;
    }
    if gap_len_sq > f32::EPSILON {
        // Circle center outside the box: push along the surface normal
        let d = gap_len_sq.sqrt();
        let dir = gap / d;
        let pen = r - d;
        let angle = dir.y.atan2(dir.x);
        return CollisionTest::Hit(
            Contact {
                offset: -dir * pen,
                angle,
            },
            Contact {
                offset: dir * pen,
                angle: angle + PI,
            },
        );
    }
    // Circle center inside the box: treat it as a small box
    let circle_box = Collider::aabb(r * 2.0, r * 2.0);
    let unscaled = Transform::from_position(world_b.position);
    aabb_aabb(a, world_a, &circle_box, &unscaled)
}

struct SweepEntry {
    id: NodeId,
    collider: Collider,
    world: Transform,
    has_rigidbody: bool,
}

/// Test every active collider pair in the scene, resolve overlaps, and
/// report the hits.
///
/// Pairs where one node is an ancestor of the other are skipped, as are
/// inactive nodes and nodes pending removal. Overlapping non-trigger pairs
/// are separated by moving whichever sides carry a rigidbody, splitting
/// the correction when both do; a body pushed against a static collider
/// also loses its velocity along the contact normal.
pub fn sweep(scene: &mut SceneTree) -> Vec<CollisionHit> {
    let entries: Vec<SweepEntry> = scene
        .descendants(scene.root())
        .into_iter()
        .filter(|id| scene.is_active(*id))
        .filter_map(|id| {
            let node = scene.node(id)?;
            Some(SweepEntry {
                id,
                collider: node.collider?,
                world: scene.world_transform(id),
                has_rigidbody: node.rigidbody.is_some(),
            })
        })
        .collect();

    let mut hits = Vec::new();
    for i in 0..entries.len() {
        for j in (i + 1)..entries.len() {
            let (a, b) = (&entries[i], &entries[j]);
            if scene.has_ancestor(a.id, b.id) || scene.has_ancestor(b.id, a.id) {
                continue;
            }
            let hit = match test_collision(&a.collider, &a.world, &b.collider, &b.world) {
                CollisionTest::Hit(ca, cb) => CollisionHit {
                    a: a.id,
                    b: b.id,
                    contact_a: ca,
                    contact_b: cb,
                },
                CollisionTest::Miss => continue,
                CollisionTest::CannotHandle => {
                    match test_collision(&b.collider, &b.world, &a.collider, &a.world) {
                        CollisionTest::Hit(cb, ca) => CollisionHit {
                            a: a.id,
                            b: b.id,
                            contact_a: ca,
                            contact_b: cb,
                        },
                        _ => continue,
                    }
                }
            };
            resolve(scene, &hit, a, b);
            hits.push(hit);
        }
    }
    hits
}

fn resolve(scene: &mut SceneTree, hit: &CollisionHit, a: &SweepEntry, b: &SweepEntry) {
    if a.collider.trigger || b.collider.trigger {
        return;
    }
    let both = a.has_rigidbody && b.has_rigidbody;
    let share = if both { 0.5 } else { 1.0 };
    if a.has_rigidbody {
        separate(scene, hit.a, hit.contact_a, share, !both);
    }
    if b.has_rigidbody {
        separate(scene, hit.b, hit.contact_b, share, !both);
    }
}

// Local positions add down the tree, so a world-space correction applies
// directly to the local transform.
fn separate(scene: &mut SceneTree, id: NodeId, contact: Contact, share: f32, damp: bool) {
    let Some(node) = scene.node_mut(id) else {
        return;
    };
    if let Some(transform) = node.transform.as_mut() {
        transform.translate(contact.offset * share);
    }
    if damp && let Some(rb) = node.rigidbody.as_mut() {
        let normal = Vec2::new(contact.angle.cos(), contact.angle.sin());
        let v = rb.velocity();
        let along = v.dot(normal);
        if along > 0.0 {
            rb.set_velocity(v - normal * along);
        }
    }
}
