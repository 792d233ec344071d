//! Rigid-body world for circular bodies
//!
//! The world owns positions and velocities of everything registered with it.
//! Each body carries a collision kind `K`; bodies of the same kind never
//! collide with each other. Contacts between kinds that have a registered
//! handler are reported by `step`; sensor handlers report overlaps without
//! pushing the bodies apart.

use glam::Vec2;

use super::collision::circle_circle_collision;

/// Smallest mass a body can have; anything lower is raised to this
pub const MIN_MASS: f32 = 1e-6;

/// Stable identifier for a body in a `PhysicsWorld`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle(u32);

/// Parameters for a new body
#[derive(Debug, Clone)]
pub struct BodyDesc<K> {
    pub position: Vec2,
    pub radius: f32,
    pub mass: f32,
    pub kind: K,
}

#[derive(Debug, Clone)]
struct Body<K> {
    handle: BodyHandle,
    position: Vec2,
    velocity: Vec2,
    radius: f32,
    mass: f32,
    kind: K,
}

/// How overlapping bodies of a handled kind pair react
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactResponse {
    /// Impulse and positional correction, then report
    Solid,
    /// Report only; bodies pass through each other
    Sensor,
}

#[derive(Debug, Clone, Copy)]
struct Handler<K> {
    first: K,
    second: K,
    response: ContactResponse,
}

/// A contact between two bodies of a registered kind pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact<K> {
    /// Body of the handler's first kind
    pub first: BodyHandle,
    /// Body of the handler's second kind
    pub second: BodyHandle,
    pub first_kind: K,
    pub second_kind: K,
    /// Point on the surface of whichever body was tested first
    pub point: Vec2,
}

#[derive(Debug, Clone)]
pub struct PhysicsWorld<K> {
    gravity: Vec2,
    /// Sorted by handle so iteration order is insertion order
    bodies: Vec<Body<K>>,
    handlers: Vec<Handler<K>>,
    next_handle: u32,
}

impl<K: Copy + PartialEq> PhysicsWorld<K> {
    pub fn new(gravity: Vec2) -> Self {
        Self {
            gravity,
            bodies: Vec::new(),
            handlers: Vec::new(),
            next_handle: 1,
        }
    }

    pub fn add_body(&mut self, desc: BodyDesc<K>) -> BodyHandle {
        let handle = BodyHandle(self.next_handle);
        self.next_handle += 1;
        self.bodies.push(Body {
            handle,
            position: desc.position,
            velocity: Vec2::ZERO,
            radius: desc.radius.max(0.0),
            mass: desc.mass.max(MIN_MASS),
            kind: desc.kind,
        });
        handle
    }

    /// Remove a body; returns false if it was already gone
    pub fn remove_body(&mut self, handle: BodyHandle) -> bool {
        match self.index_of(handle) {
            Some(i) => {
                self.bodies.remove(i);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, handle: BodyHandle) -> bool {
        self.index_of(handle).is_some()
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn set_velocity(&mut self, handle: BodyHandle, velocity: Vec2) {
        if let Some(body) = self.body_mut(handle) {
            body.velocity = velocity;
        }
    }

    pub fn velocity(&self, handle: BodyHandle) -> Option<Vec2> {
        self.body(handle).map(|b| b.velocity)
    }

    pub fn set_position(&mut self, handle: BodyHandle, position: Vec2) {
        if let Some(body) = self.body_mut(handle) {
            body.position = position;
        }
    }

    pub fn position(&self, handle: BodyHandle) -> Option<Vec2> {
        self.body(handle).map(|b| b.position)
    }

    /// Report contacts between `first` and `second` kinds from now on.
    /// Registering the same pair again replaces its response.
    pub fn add_collision_handler(&mut self, first: K, second: K, response: ContactResponse) {
        self.handlers
            .retain(|h| !(h.first == first && h.second == second));
        self.handlers.push(Handler {
            first,
            second,
            response,
        });
    }

    /// Advance the world by `dt` seconds
    pub fn step(&mut self, dt: f32) -> Vec<Contact<K>> {
        if dt <= 0.0 {
            return Vec::new();
        }

        let gravity = self.gravity;
        for body in &mut self.bodies {
            body.velocity += gravity * dt;
            body.position += body.velocity * dt;
        }

        let mut contacts = Vec::new();
        for i in 0..self.bodies.len() {
            for j in (i + 1)..self.bodies.len() {
                if self.bodies[i].kind == self.bodies[j].kind {
                    continue;
                }
                let (left, right) = self.bodies.split_at_mut(j);
                let (a, b) = (&mut left[i], &mut right[0]);

                let result = circle_circle_collision(a.position, a.radius, b.position, b.radius);
                if !result.hit {
                    continue;
                }
                let handled = contact_for(&self.handlers, a, b, result.point);
                let solid = handled.is_none_or(|(_, response)| response == ContactResponse::Solid);
                if solid {
                    resolve(a, b, result.normal, result.penetration);
                }
                if let Some((contact, _)) = handled {
                    contacts.push(contact);
                }
            }
        }
        contacts
    }

    fn index_of(&self, handle: BodyHandle) -> Option<usize> {
        self.bodies.binary_search_by_key(&handle, |b| b.handle).ok()
    }

    fn body(&self, handle: BodyHandle) -> Option<&Body<K>> {
        self.index_of(handle).map(|i| &self.bodies[i])
    }

    fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut Body<K>> {
        self.index_of(handle).map(move |i| &mut self.bodies[i])
    }
}

/// Contact for a registered kind pair, oriented the way the handler was registered
fn contact_for<K: Copy + PartialEq>(
    handlers: &[Handler<K>],
    a: &Body<K>,
    b: &Body<K>,
    point: Vec2,
) -> Option<(Contact<K>, ContactResponse)> {
    handlers.iter().find_map(|h| {
        let (first, second) = (h.first, h.second);
        if a.kind == first && b.kind == second {
            Some((
                Contact {
                    first: a.handle,
                    second: b.handle,
                    first_kind: first,
                    second_kind: second,
                    point,
                },
                h.response,
            ))
        } else if b.kind == first && a.kind == second {
            Some((
                Contact {
                    first: b.handle,
                    second: a.handle,
                    first_kind: first,
                    second_kind: second,
                    point,
                },
                h.response,
            ))
        } else {
            None
        }
    })
}

/// Inelastic impulse along the normal plus positional correction, both
/// split by inverse mass
fn resolve<K>(a: &mut Body<K>, b: &mut Body<K>, normal: Vec2, penetration: f32) {
    let inv_a = 1.0 / a.mass;
    let inv_b = 1.0 / b.mass;
    let inv_sum = inv_a + inv_b;

    let approach = (b.velocity - a.velocity).dot(normal);
    if approach < 0.0 {
        let impulse = -approach / inv_sum;
        a.velocity -= normal * impulse * inv_a;
        b.velocity += normal * impulse * inv_b;
    }

    let correction = normal * (penetration / inv_sum);
    a.position -= correction * inv_a;
    b.position += correction * inv_b;
}
