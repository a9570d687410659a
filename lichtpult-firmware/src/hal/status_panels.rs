// OLED Statusanzeigen (2x SSD1306, 128x64, je ein eigener I²C Bus)
//
// Links: Auswahl der Strips + RGBW Werte
// Rechts: Helligkeitsbalken
//
// Eine fehlende Anzeige wird beim Start gemeldet und danach übersprungen.

use defmt::warn;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::{FONT_6X10, FONT_10X20};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};
use esp_hal::Blocking;
use esp_hal::i2c::master::I2c;
use lichtpult_core::{Channel, DisplayError, Overview, StatusDisplay, StatusView};
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::{I2CDisplayInterface, Ssd1306};

use crate::config::BRIGHTNESS_BAR_HEIGHT;

type Panel<'d> = Ssd1306<
    I2CInterface<I2c<'d, Blocking>>,
    DisplaySize128x64,
    BufferedGraphicsMode<DisplaySize128x64>,
>;

const TEXT: MonoTextStyle<'static, BinaryColor> = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
const BIG_TEXT: MonoTextStyle<'static, BinaryColor> =
    MonoTextStyle::new(&FONT_10X20, BinaryColor::On);

// Layout linke Anzeige
const SELECTION_X: i32 = 30;
const SELECTION_STEP: i32 = 18;
const UNDERLINE_Y: i32 = 10;
const CHANNEL_Y: [i32; 4] = [20, 30, 40, 50];

// Layout rechte Anzeige
const BAR_X: i32 = 100;
const BAR_Y: i32 = 10;
const BAR_WIDTH: u32 = 10;

/// Beide Anzeigen zusammen als eine `StatusDisplay`
pub struct OledStatusPanels<'d> {
    left: Option<Panel<'d>>,
    right: Option<Panel<'d>>,
}

impl<'d> OledStatusPanels<'d> {
    /// Initialisiert beide Anzeigen (Adresse 0x3C)
    ///
    /// Schlägt die Initialisierung fehl, bleibt die Anzeige deaktiviert.
    pub fn new(left_bus: I2c<'d, Blocking>, right_bus: I2c<'d, Blocking>) -> Self {
        Self {
            left: init_panel(left_bus, "Left"),
            right: init_panel(right_bus, "Right"),
        }
    }

    fn draw_overview(&mut self, overview: &Overview) -> Result<(), DisplayError> {
        if let Some(panel) = self.left.as_mut() {
            draw_selection(panel, overview).map_err(|_| DisplayError::RenderFailed)?;
            panel.flush().map_err(|_| DisplayError::RenderFailed)?;
        }
        if let Some(panel) = self.right.as_mut() {
            draw_brightness(panel, overview).map_err(|_| DisplayError::RenderFailed)?;
            panel.flush().map_err(|_| DisplayError::RenderFailed)?;
        }
        Ok(())
    }

    fn draw_mode(&mut self, number: u8) -> Result<(), DisplayError> {
        let text = StatusView::mode_text(number);
        for panel in [self.left.as_mut(), self.right.as_mut()].into_iter().flatten() {
            panel.clear_buffer();
            Text::with_baseline(&text, Point::new(24, 22), BIG_TEXT, Baseline::Top)
                .draw(panel)
                .map_err(|_| DisplayError::RenderFailed)?;
            panel.flush().map_err(|_| DisplayError::RenderFailed)?;
        }
        Ok(())
    }
}

fn init_panel<'d>(bus: I2c<'d, Blocking>, side: &str) -> Option<Panel<'d>> {
    let interface = I2CDisplayInterface::new(bus);
    let mut panel = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
        .into_buffered_graphics_mode();

    if panel.init().is_err() {
        warn!("{} OLED missing", side);
        return None;
    }
    panel.clear_buffer();
    if panel.flush().is_err() {
        warn!("{} OLED missing", side);
        return None;
    }
    Some(panel)
}

fn draw_selection<D>(target: &mut D, overview: &Overview) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    target.clear(BinaryColor::Off)?;
    Text::with_baseline("LED:", Point::zero(), TEXT, Baseline::Top).draw(target)?;

    let underline = PrimitiveStyle::with_stroke(BinaryColor::On, 1);
    for output in 0..usize::from(overview.outputs) {
        let x = SELECTION_X + output as i32 * SELECTION_STEP;
        let digit = [b'1' + output as u8];
        let label = core::str::from_utf8(&digit).unwrap_or("?");
        Text::with_baseline(label, Point::new(x, 0), TEXT, Baseline::Top).draw(target)?;

        if overview.selection.contains(output) {
            Line::new(Point::new(x, UNDERLINE_Y), Point::new(x + 6, UNDERLINE_Y))
                .into_styled(underline)
                .draw(target)?;
        }
    }

    for (channel, y) in Channel::COLOR.into_iter().zip(CHANNEL_Y) {
        let line = overview.channel_line(channel);
        Text::with_baseline(&line, Point::new(0, y), TEXT, Baseline::Top).draw(target)?;
    }
    Ok(())
}

fn draw_brightness<D>(target: &mut D, overview: &Overview) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    target.clear(BinaryColor::Off)?;
    Text::with_baseline("Brightness", Point::zero(), TEXT, Baseline::Top).draw(target)?;

    Rectangle::new(Point::new(BAR_X, BAR_Y), Size::new(BAR_WIDTH, BRIGHTNESS_BAR_HEIGHT))
        .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
        .draw(target)?;

    // Balken wächst von unten nach oben
    let fill = overview.bar_fill(BRIGHTNESS_BAR_HEIGHT);
    let empty = (BRIGHTNESS_BAR_HEIGHT - fill) as i32;
    Rectangle::new(Point::new(BAR_X, BAR_Y + empty), Size::new(BAR_WIDTH, fill))
        .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
        .draw(target)?;

    let percent = overview.brightness_line();
    let text_y = BAR_Y + BRIGHTNESS_BAR_HEIGHT as i32 - 4;
    Text::with_baseline(&percent, Point::new(BAR_X - 26, text_y), TEXT, Baseline::Top)
        .draw(target)?;
    Ok(())
}

impl StatusDisplay for OledStatusPanels<'_> {
    fn render(&mut self, view: &StatusView) -> Result<(), DisplayError> {
        if self.left.is_none() && self.right.is_none() {
            return Err(DisplayError::NotPresent);
        }
        match view {
            StatusView::Overview(overview) => self.draw_overview(overview),
            StatusView::Mode(number) => self.draw_mode(*number),
        }
    }
}
