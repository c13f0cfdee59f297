//! Board peripherals behind the `orientation` capability traits.

mod button;
mod indicators;
mod screen;
mod sensor;

pub use button::UserButton;
pub use indicators::LedIndicators;
pub use screen::OledPresenter;
pub use sensor::{ImuError, ImuSensor};
