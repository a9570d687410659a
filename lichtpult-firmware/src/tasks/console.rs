// Console Task - Steuerschleife: Potis → Strips + Statusanzeige
use defmt::info;
use embassy_time::{Duration, Timer};
use embedded_hal::delay::DelayNs;
use esp_hal::gpio::Input;
use lichtpult_core::{
    AnalogInput, ButtonInput, Console, ConsoleConfig, Hardware, LightOutput, MonotonicClock,
    StatusDisplay,
};

use crate::hal::{AdcKnobs, OledStatusPanels, RmtLedStrips, SystemTimer};

/// Konkrete Hardware des Pults
pub type FirmwareHardware = Hardware<
    AdcKnobs<'static>,
    [Input<'static>; 4],
    RmtLedStrips<'static>,
    OledStatusPanels<'static>,
    SystemTimer,
>;

/// Console Logic - Testbare Schleife ohne konkrete Hardware
///
/// Löscht beim Start alle Strips und ruft dann endlos `Console::tick` auf.
/// Zwischen zwei Ticks gibt der Task die CPU für `tick_ms` ab.
///
/// # Trait-basierte Abstraktion
/// Die generischen Parameter erlauben echte Treiber (ADC, RMT, SSD1306)
/// ebenso wie Mocks.
pub async fn console_logic<A, B, L, S, T>(config: ConsoleConfig, mut hw: Hardware<A, B, L, S, T>) -> !
where
    A: AnalogInput,
    B: ButtonInput,
    L: LightOutput,
    S: StatusDisplay,
    T: MonotonicClock + DelayNs,
{
    let mut console = Console::new(config);
    let config = *console.config();
    let pause = Duration::from_millis(u64::from(config.tick_ms));

    info!(
        "Console started: {} output(s), {} button(s), policy {}",
        config.outputs, config.buttons, config.policy
    );
    console.start(&mut hw);

    loop {
        let report = console.tick(&mut hw);
        if report.committed {
            info!("Color committed: {}", console.knobs().color());
        }

        // Async Delay: gibt CPU an andere Tasks zurück
        Timer::after(pause).await;
    }
}

/// Console Task - Embassy Task für die Steuerschleife
///
/// Die Hardware wird in `main` aufgebaut und hier nur hereingereicht.
#[embassy_executor::task]
pub async fn console_task(config: ConsoleConfig, hw: FirmwareHardware) {
    console_logic(config, hw).await
}
