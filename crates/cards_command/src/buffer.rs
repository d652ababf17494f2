//! The particle buffer.

use std::ops::Index;
use std::slice;

use cards_foundation::Result;

use crate::particle::Particle;

/// Default number of slots added each time a full buffer grows.
pub const DEFAULT_GROW_INCREMENT: usize = 64;

/// An append-only, reusable sequence of particles.
///
/// Capacity grows by a fixed increment rather than doubling. Clearing with
/// [`free_all`](Self::free_all) keeps the backing storage, so one buffer can
/// serve every lex call on a connection.
#[derive(Debug)]
pub struct ParticleBuffer<'n> {
    particles: Vec<Particle<'n>>,
    increment: usize,
}

impl<'n> ParticleBuffer<'n> {
    /// Creates an empty buffer with the default growth increment.
    #[must_use]
    pub fn new() -> Self {
        Self::with_increment(DEFAULT_GROW_INCREMENT)
    }

    /// Creates an empty buffer that grows by `increment` slots at a time.
    ///
    /// # Panics
    ///
    /// Panics if `increment` is zero.
    #[must_use]
    pub fn with_increment(increment: usize) -> Self {
        assert!(increment > 0, "particle buffer increment must be positive");
        Self {
            particles: Vec::new(),
            increment,
        }
    }

    /// Appends a particle, growing by the increment when full.
    ///
    /// # Errors
    ///
    /// Returns an allocation error if the buffer could not grow. The buffer
    /// and every particle already in it are left unchanged.
    pub fn add(&mut self, particle: Particle<'n>) -> Result<()> {
        if self.particles.len() == self.particles.capacity() {
            self.grow(self.increment)?;
        }
        self.particles.push(particle);
        Ok(())
    }

    /// Adds exactly `amount` slots of capacity.
    ///
    /// # Errors
    ///
    /// Returns an allocation error if the memory could not be reserved.
    pub fn grow(&mut self, amount: usize) -> Result<()> {
        let spare = self.particles.capacity() - self.particles.len();
        self.particles.try_reserve_exact(spare.saturating_add(amount))?;
        Ok(())
    }

    /// Ensures capacity for at least `minimum` particles.
    ///
    /// # Errors
    ///
    /// Returns an allocation error if the memory could not be reserved.
    pub fn at_least(&mut self, minimum: usize) -> Result<()> {
        let capacity = self.particles.capacity();
        if minimum > capacity {
            self.grow(minimum - capacity)?;
        }
        Ok(())
    }

    /// Drops every particle but keeps the capacity.
    pub fn free_all(&mut self) {
        self.particles.clear();
    }

    /// Returns the particles in the order they were added.
    #[must_use]
    pub fn particles(&self) -> &[Particle<'n>] {
        &self.particles
    }

    /// Iterates over the particles.
    pub fn iter(&self) -> slice::Iter<'_, Particle<'n>> {
        self.particles.iter()
    }

    /// Returns the particle at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Particle<'n>> {
        self.particles.get(index)
    }

    /// Returns the number of particles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Returns true if the buffer holds no particles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Returns the number of particles the buffer can hold without growing.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.particles.capacity()
    }

    /// Returns the growth increment.
    #[must_use]
    pub fn increment(&self) -> usize {
        self.increment
    }
}

impl Default for ParticleBuffer<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'n> Index<usize> for ParticleBuffer<'n> {
    type Output = Particle<'n>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.particles[index]
    }
}

impl<'a, 'n> IntoIterator for &'a ParticleBuffer<'n> {
    type Item = &'a Particle<'n>;
    type IntoIter = slice::Iter<'a, Particle<'n>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
