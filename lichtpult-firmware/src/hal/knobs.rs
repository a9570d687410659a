// Potentiometer über die ADC Peripherals
//
// Rot, Grün, Blau und Weiß hängen an ADC1, die Helligkeit an ADC2.
// ADC2 ist frei nutzbar, weil die Firmware kein WiFi startet.

use esp_hal::Blocking;
use esp_hal::analog::adc::{Adc, AdcConfig, AdcPin, Attenuation};
use esp_hal::peripherals::{ADC1, ADC2, GPIO27, GPIO32, GPIO33, GPIO34, GPIO35};
use lichtpult_core::{AnalogInput, Channel};

/// Pins der fünf Potis (Reihenfolge wie `config::POT_GPIO_PINS`)
pub struct KnobPins<'d> {
    pub red: GPIO32<'d>,
    pub green: GPIO35<'d>,
    pub blue: GPIO34<'d>,
    pub white: GPIO33<'d>,
    pub brightness: GPIO27<'d>,
}

/// Real Hardware Poti-Eingang
///
/// 12 Bit One-Shot Messungen mit 11 dB Dämpfung (voller 0-3.3 V Bereich).
pub struct AdcKnobs<'d> {
    adc1: Adc<'d, ADC1<'d>, Blocking>,
    adc2: Adc<'d, ADC2<'d>, Blocking>,
    red: AdcPin<GPIO32<'d>, ADC1<'d>>,
    green: AdcPin<GPIO35<'d>, ADC1<'d>>,
    blue: AdcPin<GPIO34<'d>, ADC1<'d>>,
    white: AdcPin<GPIO33<'d>, ADC1<'d>>,
    brightness: AdcPin<GPIO27<'d>, ADC2<'d>>,
}

impl<'d> AdcKnobs<'d> {
    pub fn new(adc1: ADC1<'d>, adc2: ADC2<'d>, pins: KnobPins<'d>) -> Self {
        let mut adc1_config = AdcConfig::new();
        let red = adc1_config.enable_pin(pins.red, Attenuation::_11dB);
        let green = adc1_config.enable_pin(pins.green, Attenuation::_11dB);
        let blue = adc1_config.enable_pin(pins.blue, Attenuation::_11dB);
        let white = adc1_config.enable_pin(pins.white, Attenuation::_11dB);

        let mut adc2_config = AdcConfig::new();
        let brightness = adc2_config.enable_pin(pins.brightness, Attenuation::_11dB);

        Self {
            adc1: Adc::new(adc1, adc1_config),
            adc2: Adc::new(adc2, adc2_config),
            red,
            green,
            blue,
            white,
            brightness,
        }
    }
}

// read_oneshot liefert WouldBlock bis die Wandlung fertig ist
macro_rules! read_blocking {
    ($adc:expr, $pin:expr) => {
        loop {
            if let Ok(value) = $adc.read_oneshot($pin) {
                break value;
            }
        }
    };
}

impl AnalogInput for AdcKnobs<'_> {
    fn read(&mut self, channel: Channel) -> u16 {
        let raw: u16 = match channel {
            Channel::Red => read_blocking!(self.adc1, &mut self.red),
            Channel::Green => read_blocking!(self.adc1, &mut self.green),
            Channel::Blue => read_blocking!(self.adc1, &mut self.blue),
            Channel::White => read_blocking!(self.adc1, &mut self.white),
            Channel::Brightness => read_blocking!(self.adc2, &mut self.brightness),
        };
        raw.min(lichtpult_core::logic::ADC_MAX)
    }
}
