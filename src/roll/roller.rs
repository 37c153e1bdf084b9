use crate::common::{NonEmpty, NonZeroUInt, UInt};
use rand::{
    distributions::{Distribution, Uniform},
    Rng,
};

/// A source of die outcomes. Every [`Rng`] is a roller.
pub trait Roller {
    /// Rolls a single die, returning a value in `1..=faces`.
    fn roll(&mut self, faces: NonZeroUInt) -> UInt;

    /// Rolls `count` dice of the same size, in order.
    fn roll_group(&mut self, count: NonZeroUInt, faces: NonZeroUInt) -> NonEmpty<UInt> {
        let mut values = NonEmpty::new(self.roll(faces));
        values.extend((1..count.get()).map(|_| self.roll(faces)));
        values
    }
}

impl<R: Rng> Roller for R {
    fn roll(&mut self, faces: NonZeroUInt) -> UInt {
        self.gen_range(1..=faces.get())
    }

    fn roll_group(&mut self, count: NonZeroUInt, faces: NonZeroUInt) -> NonEmpty<UInt> {
        let die = Uniform::new_inclusive(1, faces.get());
        let mut values = NonEmpty::new(die.sample(self));
        values.extend(die.sample_iter(self).take(count.get() as usize - 1));
        values
    }
}

/// Counts upwards from a starting value, wrapping each value into the die's
/// range. `StepRoller::new(5, 1)` on a d6 gives 5, 6, 1, 2, ...
#[cfg(test)]
pub(crate) struct StepRoller {
    next: UInt,
    step: UInt,
}

#[cfg(test)]
impl StepRoller {
    pub fn new(start: NonZeroUInt, step: UInt) -> Self {
        Self {
            next: start.get(),
            step,
        }
    }
}

#[cfg(test)]
impl Roller for StepRoller {
    fn roll(&mut self, faces: NonZeroUInt) -> UInt {
        let ret = (self.next - 1) % faces.get() + 1;
        self.next += self.step;
        ret
    }
}
