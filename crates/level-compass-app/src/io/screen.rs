use display_interface::DisplayError;
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::{MonoTextStyle, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use level_compass_bsp::Display;
use orientation::{DisplayPresenter, Frame};

/// Renders [`Frame`]s on the SSD1306 in a 6x10 font. Highlighted lines are
/// drawn inverted.
pub struct OledPresenter {
    display: Display,
    normal: MonoTextStyle<'static, BinaryColor>,
    inverted: MonoTextStyle<'static, BinaryColor>,
}

impl OledPresenter {
    pub fn new(display: Display) -> Self {
        Self {
            display,
            normal: MonoTextStyleBuilder::new()
                .font(&FONT_6X10)
                .text_color(BinaryColor::On)
                .background_color(BinaryColor::Off)
                .build(),
            inverted: MonoTextStyleBuilder::new()
                .font(&FONT_6X10)
                .text_color(BinaryColor::Off)
                .background_color(BinaryColor::On)
                .build(),
        }
    }
}

impl DisplayPresenter for OledPresenter {
    type Error = DisplayError;

    async fn present(&mut self, frame: &Frame) -> Result<(), Self::Error> {
        self.display.clear_buffer();
        for line in &frame.lines {
            let style = if line.highlighted {
                self.inverted
            } else {
                self.normal
            };
            let origin = Point::new(
                i32::from(line.position.x),
                i32::from(line.position.y),
            );
            Text::with_baseline(&line.text, origin, style, Baseline::Top)
                .draw(&mut self.display)?;
        }
        self.display.flush()
    }
}
