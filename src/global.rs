//! Process-wide default generator.
//!
//! The default [`Random`] is created lazily with an implicit seed on first
//! use. Every function here locks it for the duration of one call, so
//! calls from different threads are serialized. Code that needs several
//! draws to be contiguous should use [`with_global`].
//!
//! The lock is not reentrant: calling any function of this module from
//! inside a [`with_global`] closure panics instead of deadlocking. Use the
//! `&mut Random` handed to the closure instead.
//!
//! Generators from [`create`] (or [`Random::new`]) never share state with
//! the default one: reseeding either side leaves the other untouched.

use std::cell::Cell;
use std::sync::{Mutex, PoisonError};

use glam::{DQuat, DVec2, DVec3};
use once_cell::sync::Lazy;

use crate::error::Result;
use crate::noise::FbmConfig;
use crate::random::Random;
use crate::seed::Seed;

static GLOBAL: Lazy<Mutex<Random>> = Lazy::new(|| Mutex::new(Random::from_entropy()));

thread_local! {
    /// Set while this thread holds the default generator's lock.
    static HELD: Cell<bool> = const { Cell::new(false) };
}

/// Clears [`HELD`] when the closure returns or unwinds.
struct HeldFlag;

impl HeldFlag {
    fn acquire() -> Self {
        HELD.with(|held| held.set(true));
        HeldFlag
    }
}

impl Drop for HeldFlag {
    fn drop(&mut self) {
        HELD.with(|held| held.set(false));
    }
}

/// Runs `f` with exclusive access to the default generator.
///
/// # Panics
///
/// Panics if called again on the same thread from inside `f` (directly or
/// through any other function of this module), since the lock is already
/// held by the outer call.
pub fn with_global<T>(f: impl FnOnce(&mut Random) -> T) -> T {
    if HELD.with(Cell::get) {
        panic!("default generator used re-entrantly; use the `&mut Random` passed to the closure");
    }
    // A panic inside `f` cannot leave the generator half-updated.
    let mut guard = GLOBAL.lock().unwrap_or_else(PoisonError::into_inner);
    let _held = HeldFlag::acquire();
    f(&mut *guard)
}

/// Reseeds the default generator.
pub fn reseed(seed: impl Into<Seed>) -> Result<()> {
    with_global(|r| r.reseed(seed))
}

/// The seed last applied to the default generator.
pub fn seed() -> Seed {
    with_global(|r| r.seed().clone())
}

/// Creates an independent local generator. See [`Random::create`].
pub fn create(seed: Option<Seed>) -> Result<Random> {
    with_global(|r| r.create(seed))
}

/// See [`Random::float`].
pub fn float() -> f64 {
    with_global(Random::float)
}

/// See [`Random::float_to`].
pub fn float_to(max: f64) -> f64 {
    with_global(|r| r.float_to(max))
}

/// See [`Random::float_range`].
pub fn float_range(min: f64, max: f64) -> f64 {
    with_global(|r| r.float_range(min, max))
}

/// See [`Random::int`].
pub fn int() -> i64 {
    with_global(Random::int)
}

/// See [`Random::int_to`].
pub fn int_to(max: i64) -> i64 {
    with_global(|r| r.int_to(max))
}

/// See [`Random::int_range`].
pub fn int_range(min: i64, max: i64) -> i64 {
    with_global(|r| r.int_range(min, max))
}

/// See [`Random::vec2`].
pub fn vec2(radius: f64) -> DVec2 {
    with_global(|r| r.vec2(radius))
}

/// See [`Random::vec3`].
pub fn vec3(radius: f64) -> DVec3 {
    with_global(|r| r.vec3(radius))
}

/// See [`Random::vec2_in_unit_disk`].
pub fn vec2_in_unit_disk() -> DVec2 {
    with_global(Random::vec2_in_unit_disk)
}

/// See [`Random::vec3_in_unit_ball`].
pub fn vec3_in_unit_ball() -> DVec3 {
    with_global(Random::vec3_in_unit_ball)
}

/// See [`Random::vec2_in_rect`].
pub fn vec2_in_rect(rect: [DVec2; 2]) -> DVec2 {
    with_global(|r| r.vec2_in_rect(rect))
}

/// See [`Random::vec3_in_aabb`].
pub fn vec3_in_aabb(aabb: [DVec3; 2]) -> DVec3 {
    with_global(|r| r.vec3_in_aabb(aabb))
}

/// See [`Random::quat`].
pub fn quat() -> DQuat {
    with_global(Random::quat)
}

/// See [`Random::chance`].
pub fn chance(probability: f64) -> bool {
    with_global(|r| r.chance(probability))
}

/// See [`Random::coin`].
pub fn coin() -> bool {
    with_global(Random::coin)
}

/// Picks a random element and returns a clone of it.
pub fn element<T: Clone>(list: &[T]) -> Result<T> {
    with_global(|r| r.element(list).cloned())
}

/// See [`Random::noise2`].
pub fn noise2(x: f64, y: f64) -> f64 {
    with_global(|r| r.noise2(x, y))
}

/// See [`Random::noise3`].
pub fn noise3(x: f64, y: f64, z: f64) -> f64 {
    with_global(|r| r.noise3(x, y, z))
}

/// See [`Random::noise4`].
pub fn noise4(x: f64, y: f64, z: f64, w: f64) -> f64 {
    with_global(|r| r.noise4(x, y, z, w))
}

/// See [`Random::fbm`].
pub fn fbm(config: &FbmConfig, coords: &[f64]) -> Result<f64> {
    with_global(|r| r.fbm(config, coords))
}

/// See [`Random::fbm_with`].
///
/// `noise` runs while the default generator is locked, so it must not call
/// back into this module. To sample the default generator's own noise from
/// `noise`, call [`Random::fbm_with`] inside [`with_global`] instead.
pub fn fbm_with<F>(config: &FbmConfig, coords: &[f64], noise: F) -> f64
where
    F: Fn(&[f64]) -> f64,
{
    with_global(|r| r.fbm_with(config, coords, noise))
}
