/// Fixed-size moving average over a circular buffer.
///
/// The running sum is maintained incrementally: writing a slot subtracts the
/// value it held and adds the new one. The write position is supplied by the
/// caller so that several windows can advance in lockstep.
#[derive(Debug, Clone)]
pub struct MovingAverage<const N: usize> {
    slots: [f32; N],
    sum: f32,
}

impl<const N: usize> MovingAverage<N> {
    pub const fn new() -> Self {
        Self { slots: [0.0; N], sum: 0.0 }
    }

    /// Overwrite `slot` (taken modulo `N`) and return the new average.
    pub fn replace(&mut self, slot: usize, value: f32) -> f32 {
        let slot = slot % N;
        self.sum -= self.slots[slot];
        self.slots[slot] = value;
        self.sum += value;
        self.average()
    }

    /// Average over all `N` slots, including ones never written.
    pub fn average(&self) -> f32 {
        self.sum / N as f32
    }

    pub fn sum(&self) -> f32 {
        self.sum
    }

    pub fn slots(&self) -> &[f32; N] {
        &self.slots
    }
}

impl<const N: usize> Default for MovingAverage<N> {
    fn default() -> Self {
        Self::new()
    }
}
