//! Animatable registries
//!
//! An `Animatable` owns every motion property of one object (a paint, a
//! geometry) together with the clock they are read against. Properties are
//! registered once under a unique name and then accessed through a typed
//! `PropertyKey`.

use rustc_hash::FxHashMap;
use std::any::Any;
use std::marker::PhantomData;

use crate::error::{MotionError, Result};
use crate::motion::{Animation, MotionClock, MotionProperty};
use crate::values::Interpolate;

/// Typed handle to a registered motion property
pub struct PropertyKey<T> {
    name: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> PropertyKey<T> {
    /// Refer to a property by name; lookups fail if it was never registered
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _marker: PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<T> Clone for PropertyKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for PropertyKey<T> {}

impl<T> std::fmt::Debug for PropertyKey<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("PropertyKey").field(&self.name).finish()
    }
}

/// Type-erased view of a motion property
trait AnyMotion: Send {
    fn set_animation(&mut self, animation: Option<Animation>);
    fn has_animation(&self) -> bool;
    fn complete(&mut self);
    fn is_completed(&self) -> bool;
    fn box_clone(&self) -> Box<dyn AnyMotion>;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T> AnyMotion for MotionProperty<T>
where
    T: Interpolate + Send + 'static,
{
    fn set_animation(&mut self, animation: Option<Animation>) {
        MotionProperty::set_animation(self, animation);
    }

    fn has_animation(&self) -> bool {
        self.animation().is_some()
    }

    fn complete(&mut self) {
        MotionProperty::complete(self);
    }

    fn is_completed(&self) -> bool {
        MotionProperty::is_completed(self)
    }

    fn box_clone(&self) -> Box<dyn AnyMotion> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Registry of named motion properties sharing one clock
pub struct Animatable {
    properties: FxHashMap<&'static str, Box<dyn AnyMotion>>,
    clock: MotionClock,
    remove_on_completed: bool,
}

impl Animatable {
    pub fn new() -> Self {
        Self {
            properties: FxHashMap::default(),
            clock: MotionClock::default(),
            remove_on_completed: false,
        }
    }

    /// Register a property holding `initial`
    ///
    /// Names are unique per registry; registering the same name twice is
    /// rejected with `MotionError::DuplicateProperty`.
    pub fn register<T>(&mut self, name: &'static str, initial: T) -> Result<PropertyKey<T>>
    where
        T: Interpolate + Send + 'static,
    {
        if self.properties.contains_key(name) {
            return Err(MotionError::DuplicateProperty(name));
        }
        self.properties
            .insert(name, Box::new(MotionProperty::new(name, initial)));
        Ok(PropertyKey::new(name))
    }

    /// Builder form of `register`
    ///
    /// A duplicate name is still rejected: the existing property is kept and
    /// the rejection is logged.
    pub fn with_property<T>(mut self, name: &'static str, initial: T) -> Self
    where
        T: Interpolate + Send + 'static,
    {
        if let Err(err) = self.register(name, initial) {
            tracing::warn!("Animatable::with_property: {}", err);
        }
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    pub fn property_count(&self) -> usize {
        self.properties.len()
    }

    /// Interpolated value of a property at the current frame time
    pub fn get<T>(&mut self, key: PropertyKey<T>) -> Result<T>
    where
        T: Interpolate + Send + 'static,
    {
        let Self {
            properties, clock, ..
        } = self;
        let property = downcast_mut::<T>(properties, key.name)?;
        Ok(property.get_movement(clock))
    }

    /// Start moving a property towards `value`
    pub fn set<T>(&mut self, key: PropertyKey<T>, value: T) -> Result<()>
    where
        T: Interpolate + Send + 'static,
    {
        let Self {
            properties, clock, ..
        } = self;
        let property = downcast_mut::<T>(properties, key.name)?;
        property.set_movement(value, clock);
        Ok(())
    }

    /// Target value of a property, without advancing it
    pub fn target<T>(&self, key: PropertyKey<T>) -> Result<T>
    where
        T: Interpolate + Send + 'static,
    {
        let property = self
            .properties
            .get(key.name)
            .ok_or(MotionError::UnregisteredProperty(key.name))?;
        property
            .as_any()
            .downcast_ref::<MotionProperty<T>>()
            .map(|p| p.target().clone())
            .ok_or(MotionError::TypeMismatch {
                name: key.name,
                expected: std::any::type_name::<T>(),
            })
    }

    /// Set the transition timing of the named properties (all when `None`)
    pub fn set_transition(&mut self, animation: Option<Animation>, names: Option<&[&str]>) {
        for property in self.select(names) {
            property.set_animation(animation);
        }
    }

    /// Give `animation` to every property that has no transition yet
    pub fn set_default_transition(&mut self, animation: Animation) {
        for property in self.properties.values_mut() {
            if !property.has_animation() {
                property.set_animation(Some(animation));
            }
        }
    }

    /// Remove the transition of the named properties (all when `None`)
    pub fn remove_transition(&mut self, names: Option<&[&str]>) {
        self.set_transition(None, names);
    }

    /// Jump the named properties (all when `None`) to their targets
    pub fn complete_transition(&mut self, names: Option<&[&str]>) {
        for property in self.select(names) {
            property.complete();
        }
    }

    /// True when no property is mid-transition
    pub fn is_completed(&self) -> bool {
        self.properties.values().all(|p| p.is_completed())
    }

    // =========================================================================
    // Clock & validity
    // =========================================================================

    pub fn current_time(&self) -> u64 {
        self.clock.current_time
    }

    pub fn set_current_time(&mut self, time: u64) {
        self.clock.current_time = time;
    }

    /// False when something changed since the canvas last marked this valid
    pub fn is_valid(&self) -> bool {
        self.clock.is_valid
    }

    pub fn set_valid(&mut self, valid: bool) {
        self.clock.is_valid = valid;
    }

    /// Request a redraw
    pub fn invalidate(&mut self) {
        self.clock.is_valid = false;
    }

    pub fn remove_on_completed(&self) -> bool {
        self.remove_on_completed
    }

    pub fn set_remove_on_completed(&mut self, remove: bool) {
        self.remove_on_completed = remove;
    }

    fn select<'a>(
        &'a mut self,
        names: Option<&'a [&'a str]>,
    ) -> impl Iterator<Item = &'a mut Box<dyn AnyMotion>> + 'a {
        self.properties
            .iter_mut()
            .filter(move |(name, _)| names.map_or(true, |names| names.contains(*name)))
            .map(|(_, property)| property)
    }
}

fn downcast_mut<'a, T>(
    properties: &'a mut FxHashMap<&'static str, Box<dyn AnyMotion>>,
    name: &'static str,
) -> Result<&'a mut MotionProperty<T>>
where
    T: Interpolate + Send + 'static,
{
    properties
        .get_mut(name)
        .ok_or(MotionError::UnregisteredProperty(name))?
        .as_any_mut()
        .downcast_mut::<MotionProperty<T>>()
        .ok_or(MotionError::TypeMismatch {
            name,
            expected: std::any::type_name::<T>(),
        })
}

impl Default for Animatable {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Animatable {
    fn clone(&self) -> Self {
        Self {
            properties: self
                .properties
                .iter()
                .map(|(name, property)| (*name, property.box_clone()))
                .collect(),
            clock: self.clock,
            remove_on_completed: self.remove_on_completed,
        }
    }
}

impl std::fmt::Debug for Animatable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<_> = self.properties.keys().collect();
        names.sort();
        f.debug_struct("Animatable")
            .field("properties", &names)
            .field("clock", &self.clock)
            .field("remove_on_completed", &self.remove_on_completed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::Easing;
    use std::time::Duration;
    use vellum_core::Color;

    fn linear(ms: u64) -> Option<Animation> {
        Some(Animation::new(Easing::Linear, Duration::from_millis(ms)))
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut animatable = Animatable::new();
        animatable.register("x", 0.0_f32).unwrap();
        assert_eq!(
            animatable.register("x", 1.0_f32).unwrap_err(),
            MotionError::DuplicateProperty("x")
        );
        assert_eq!(animatable.property_count(), 1);
    }

    #[test]
    fn test_builder_keeps_first_registration() {
        let mut animatable = Animatable::new()
            .with_property("x", 1.0_f32)
            .with_property("x", 2.0_f32);
        assert_eq!(animatable.property_count(), 1);
        assert_eq!(animatable.get(PropertyKey::<f32>::new("x")).unwrap(), 1.0);
    }

    #[test]
    fn test_unregistered_getter_fails() {
        let mut animatable = Animatable::new();
        let key = PropertyKey::<f32>::new("missing");
        assert_eq!(
            animatable.get(key).unwrap_err(),
            MotionError::UnregisteredProperty("missing")
        );
        assert!(animatable.set(key, 1.0).is_err());
    }

    #[test]
    fn test_type_mismatch() {
        let mut animatable = Animatable::new();
        animatable.register("x", 0.0_f32).unwrap();
        let wrong = PropertyKey::<Color>::new("x");
        assert!(matches!(
            animatable.get(wrong),
            Err(MotionError::TypeMismatch { name: "x", .. })
        ));
    }

    #[test]
    fn test_set_invalidates() {
        let mut animatable = Animatable::new();
        let x = animatable.register("x", 0.0_f32).unwrap();
        animatable.set_valid(true);

        animatable.set(x, 3.0).unwrap();
        assert!(!animatable.is_valid());
        assert_eq!(animatable.target(x).unwrap(), 3.0);
    }

    #[test]
    fn test_selective_transitions() {
        let mut animatable = Animatable::new();
        let x = animatable.register("x", 0.0_f32).unwrap();
        let y = animatable.register("y", 0.0_f32).unwrap();
        animatable.set_transition(linear(100), Some(&["x"]));

        animatable.set(x, 10.0).unwrap();
        animatable.set(y, 10.0).unwrap();
        animatable.get(x).unwrap();
        animatable.set_current_time(50);

        assert_eq!(animatable.get(x).unwrap(), 5.0);
        assert_eq!(animatable.get(y).unwrap(), 10.0);
        assert!(!animatable.is_completed());

        animatable.complete_transition(None);
        assert!(animatable.is_completed());
        assert_eq!(animatable.get(x).unwrap(), 10.0);
    }

    #[test]
    fn test_default_transition_keeps_explicit_ones() {
        let mut animatable = Animatable::new();
        let x = animatable.register("x", 0.0_f32).unwrap();
        let y = animatable.register("y", 0.0_f32).unwrap();
        animatable.set_transition(linear(1000), Some(&["x"]));
        animatable.set_default_transition(Animation::new(Easing::Linear, Duration::from_millis(100)));

        animatable.set(x, 10.0).unwrap();
        animatable.set(y, 10.0).unwrap();
        animatable.get(x).unwrap();
        animatable.get(y).unwrap();
        animatable.set_current_time(50);

        assert_eq!(animatable.get(x).unwrap(), 0.5);
        assert_eq!(animatable.get(y).unwrap(), 5.0);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut original = Animatable::new();
        let x = original.register("x", 1.0_f32).unwrap();

        let mut copy = original.clone();
        copy.set(x, 2.0).unwrap();

        assert_eq!(original.get(x).unwrap(), 1.0);
        assert_eq!(copy.get(x).unwrap(), 2.0);
    }
}
