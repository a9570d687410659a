// LED-Strip Ausgang über das RMT Peripheral
//
// Vier SK6812 RGBW Strips, je ein RMT-Kanal. Die Pixel werden in einem
// Frame-Puffer gesammelt und erst mit flush() gesendet.

use esp_hal::Blocking;
use esp_hal::gpio::AnyPin;
use esp_hal::rmt::{PulseCode, Rmt};
use esp_hal::time::Rate;
use esp_hal_smartled::SmartLedsAdapter;
use lichtpult_core::{ColorVector, LedError, LightOutput, MAX_OUTPUTS};
use smart_leds_trait::{RGBW, SmartLedsWrite, White};

use crate::config::{LED_COUNT, STRIP_BUFFER_SIZE};

/// RMT-Puffer aller vier Strips (muss 'static sein, siehe `ConstStaticCell` in main)
pub type StripBuffers = [[PulseCode; STRIP_BUFFER_SIZE]; MAX_OUTPUTS];

/// Leere Puffer, zur Compile-Zeit erzeugt (landen nicht auf dem Stack)
pub const fn empty_strip_buffers() -> StripBuffers {
    [[PulseCode::end_marker(); STRIP_BUFFER_SIZE]; MAX_OUTPUTS]
}

fn to_rgbw(color: ColorVector) -> RGBW<u8> {
    RGBW {
        r: color.rgb.r,
        g: color.rgb.g,
        b: color.rgb.b,
        a: White(color.white),
    }
}

/// Real Hardware LED-Ausgang
///
/// Nutzt ESP32 RMT Kanäle 0-3 um die Strips anzusteuern.
pub struct RmtLedStrips<'a> {
    adapters: [SmartLedsAdapter<'a, STRIP_BUFFER_SIZE>; MAX_OUTPUTS],
    frames: [[RGBW<u8>; LED_COUNT]; MAX_OUTPUTS],
}

impl<'a> RmtLedStrips<'a> {
    /// Erstellt die vier Strip-Ausgänge
    ///
    /// # Parameter
    /// - `rmt_peripheral`: RMT Peripheral
    /// - `rmt_clock_mhz`: RMT Clock Frequenz in MHz (z.B. 80)
    /// - `pins`: Datenleitungen der Strips 1-4
    /// - `buffers`: Puls-Puffer (einer pro Strip)
    pub fn new(
        rmt_peripheral: esp_hal::peripherals::RMT<'a>,
        rmt_clock_mhz: u32,
        pins: [AnyPin<'a>; MAX_OUTPUTS],
        buffers: &'a mut StripBuffers,
    ) -> Self {
        // RMT initialisieren
        let rmt: Rmt<'a, Blocking> = Rmt::new(rmt_peripheral, Rate::from_mhz(rmt_clock_mhz))
            .expect("Failed to initialize RMT");

        let [pin1, pin2, pin3, pin4] = pins;
        let [buf1, buf2, buf3, buf4] = buffers;

        // Ein SmartLED Adapter pro Strip
        let adapters = [
            SmartLedsAdapter::new(rmt.channel0, pin1, buf1),
            SmartLedsAdapter::new(rmt.channel1, pin2, buf2),
            SmartLedsAdapter::new(rmt.channel2, pin3, buf3),
            SmartLedsAdapter::new(rmt.channel3, pin4, buf4),
        ];

        Self {
            adapters,
            frames: [[to_rgbw(ColorVector::BLACK); LED_COUNT]; MAX_OUTPUTS],
        }
    }
}

impl LightOutput for RmtLedStrips<'_> {
    fn set_pixel(&mut self, output: usize, index: usize, color: ColorVector) {
        if let Some(pixel) = self.frames.get_mut(output).and_then(|frame| frame.get_mut(index)) {
            *pixel = to_rgbw(color);
        }
    }

    fn flush(&mut self, output: usize) -> Result<(), LedError> {
        let (Some(adapter), Some(frame)) = (self.adapters.get_mut(output), self.frames.get(output)) else {
            return Err(LedError::WriteFailed);
        };
        adapter
            .write(frame.iter().copied())
            .map_err(|_| LedError::WriteFailed)
    }
}
