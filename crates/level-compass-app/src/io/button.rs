use embassy_nrf::gpio::Input;
use orientation::RawButton;

/// The user button, wired to ground with the internal pull-up enabled.
pub struct UserButton {
    input: Input<'static>,
}

impl UserButton {
    pub fn new(input: Input<'static>) -> Self {
        Self { input }
    }
}

impl RawButton for UserButton {
    fn is_pressed(&mut self) -> bool {
        self.input.is_low()
    }
}
