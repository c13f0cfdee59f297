use embassy_nrf::gpio::{Level, Output};
use orientation::Indicators;

pub struct LedIndicators {
    level: Output<'static>,
    heading: Output<'static>,
    active_low: bool,
}

impl LedIndicators {
    /// Both LEDs are switched off here.
    pub fn new(
        level: Output<'static>,
        heading: Output<'static>,
        active_low: bool,
    ) -> Self {
        let mut leds = Self { level, heading, active_low };
        leds.set_level(false);
        leds.set_on_heading(false);
        leds
    }

    fn level_for(&self, on: bool) -> Level {
        Level::from(on != self.active_low)
    }
}

impl Indicators for LedIndicators {
    fn set_level(&mut self, on: bool) {
        let level = self.level_for(on);
        self.level.set_level(level);
    }

    fn set_on_heading(&mut self, on: bool) {
        let level = self.level_for(on);
        self.heading.set_level(level);
    }
}
