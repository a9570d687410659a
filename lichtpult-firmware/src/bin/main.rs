// Keine Standard-Bibliothek verwenden (Embedded System)
#![no_std]
// Kein normaler main() Einstiegspunkt (wird von esp_rtos bereitgestellt)
#![no_main]
// Verbiete mem::forget - gefährlich bei ESP HAL Types mit DMA-Buffern
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]
// Verbiete große Stack-Frames (Stack ist auf Embedded Systemen begrenzt)
#![deny(clippy::large_stack_frames)]

// Embassy Async Runtime
use embassy_executor::Spawner;
use embassy_time::{Duration, Timer};

// ESP32 HAL
use esp_hal::clock::CpuClock;
use esp_hal::gpio::{Input, InputConfig, Pin, Pull};
use esp_hal::i2c::master::{Config as I2cConfig, I2c};
use esp_hal::time::Rate;
use esp_hal::timer::timg::TimerGroup;

// Backtrace bei Panic und println!() Support
use {esp_backtrace as _, esp_println as _};

// Projekt-Module und Konfiguration
use lichtpult::Hardware;
use lichtpult::config::{CONSOLE_CONFIG, OLED_I2C_KHZ, RMT_CLOCK_MHZ};
use lichtpult::hal::{
    AdcKnobs, KnobPins, OledStatusPanels, RmtLedStrips, StripBuffers, SystemTimer,
    empty_strip_buffers,
};
use lichtpult::tasks::console_task;

// ESP-IDF App Descriptor - erforderlich für den Bootloader!
// Ohne diesen schlägt das Flashen mit "ESP-IDF App Descriptor missing" fehl
esp_bootloader_esp_idf::esp_app_desc!();

/// Main Entry Point
///
/// Initialisiert Hardware, startet Embassy Runtime und spawnt die Steuerschleife.
/// Danach schläft main() - alle Arbeit läuft im Task.
#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    // ESP32 Konfiguration: CPU auf maximale Taktfrequenz (240 MHz)
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    // Embassy Runtime initialisieren (Timer)
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    // Potis: ADC1 (R, G, B, W) und ADC2 (Helligkeit)
    let knobs = AdcKnobs::new(
        peripherals.ADC1,
        peripherals.ADC2,
        KnobPins {
            red: peripherals.GPIO32,
            green: peripherals.GPIO35,
            blue: peripherals.GPIO34,
            white: peripherals.GPIO33,
            brightness: peripherals.GPIO27,
        },
    );

    // Taster: active-high mit internem Pulldown
    let button_cfg = InputConfig::default().with_pull(Pull::Down);
    let buttons = [
        Input::new(peripherals.GPIO23, button_cfg),
        Input::new(peripherals.GPIO22, button_cfg),
        Input::new(peripherals.GPIO21, button_cfg),
        Input::new(peripherals.GPIO19, button_cfg),
    ];

    // RMT-Puffer müssen 'static sein (6 KB pro Strip)
    static STRIP_BUFFERS: static_cell::ConstStaticCell<StripBuffers> =
        static_cell::ConstStaticCell::new(empty_strip_buffers());
    let strip_buffers = STRIP_BUFFERS.take();
    let light = RmtLedStrips::new(
        peripherals.RMT,
        RMT_CLOCK_MHZ,
        [
            peripherals.GPIO18.degrade(),
            peripherals.GPIO4.degrade(),
            peripherals.GPIO17.degrade(),
            peripherals.GPIO13.degrade(),
        ],
        strip_buffers,
    );

    // Zwei OLEDs an zwei I²C Bussen (beide mit Adresse 0x3C)
    let i2c_config = I2cConfig::default().with_frequency(Rate::from_khz(OLED_I2C_KHZ));
    let left_bus = I2c::new(peripherals.I2C0, i2c_config)
        .expect("i2c0 init")
        .with_sda(peripherals.GPIO25)
        .with_scl(peripherals.GPIO26);
    let right_bus = I2c::new(peripherals.I2C1, i2c_config)
        .expect("i2c1 init")
        .with_sda(peripherals.GPIO14)
        .with_scl(peripherals.GPIO16);
    let display = OledStatusPanels::new(left_bus, right_bus);

    let hw = Hardware {
        knobs,
        buttons,
        light,
        display,
        timer: SystemTimer::new(),
    };

    // Spawn Console Task (Steuerschleife)
    spawner.spawn(console_task(CONSOLE_CONFIG, hw)).unwrap();

    // Main-Loop: schläft (alle Arbeit läuft im Task)
    loop {
        Timer::after(Duration::from_secs(3600)).await;
    }
}
