//! Steuerschleife des Pults
//!
//! `Console` besitzt den gesamten veränderlichen Zustand (Glättung,
//! Entprellung, Auswahl, übernommene Farbe, Modus-Deadline). Die Hardware
//! wird bei jedem Tick per Referenz hereingereicht - keine globalen Statics.
//!
//! # Ablauf eines Ticks
//! 1. Alle Potis konditionieren (aktuelle Farbe)
//! 2. Taster lesen: Auswahl umschalten und sofort schreiben, oder
//!    Modus-Quittierung abspielen (blockierend)
//! 3. Change Detector: bei Änderung alle ausgewählten Ausgänge schreiben
//! 4. Statusanzeige bei Bedarf neu zeichnen
//!
//! Die Pause zwischen zwei Ticks macht der Aufrufer (Firmware-Task).

use embedded_hal::delay::DelayNs;

use crate::buttons::ButtonBank;
use crate::change::ChangeDetector;
use crate::conditioner::SignalConditioner;
use crate::config::ConsoleConfig;
use crate::router::{OutputRouter, Pulse};
use crate::status::StatusScheduler;
use crate::traits::{
    AnalogInput, ButtonInput, DisplayError, LightOutput, MonotonicClock, StatusDisplay,
};
use crate::types::{
    ButtonAction, ButtonPolicy, ColorVector, KnobReadings, OutputSelection, Overview,
};

/// Alle Peripherie-Kollaborateure eines Pults
///
/// `timer` liefert sowohl die monotone Uhr als auch die blockierende
/// Pause für die Quittierung.
pub struct Hardware<A, B, L, S, T> {
    pub knobs: A,
    pub buttons: B,
    pub light: L,
    pub display: S,
    pub timer: T,
}

/// Was ein Tick getan hat (für Logging und Tests)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Neue Farbe übernommen (Change Detector)
    pub committed: bool,
    /// Anzahl geschriebener Ausgänge in diesem Tick
    pub outputs_written: usize,
    /// Akzeptierte steigende Flanken
    pub button_actions: usize,
    /// Statusanzeige neu gezeichnet
    pub status_rendered: bool,
}

pub struct Console {
    config: ConsoleConfig,
    conditioner: SignalConditioner,
    buttons: ButtonBank,
    change: ChangeDetector,
    router: OutputRouter,
    status: StatusScheduler,
    selection: OutputSelection,
    knobs: KnobReadings,
}

impl Console {
    pub fn new(config: ConsoleConfig) -> Self {
        let config = config.validated();
        let outputs = usize::from(config.outputs);
        // Ein-Strip-Deployments schreiben immer auf ihren Strip
        let selection = match config.policy {
            ButtonPolicy::Toggle => OutputSelection::empty(),
            ButtonPolicy::Momentary => OutputSelection::all(outputs),
        };

        Self {
            config,
            conditioner: SignalConditioner::new(config.smoothing),
            buttons: ButtonBank::new(usize::from(config.buttons), config.debounce_ms, config.policy),
            change: ChangeDetector::new(config.hysteresis),
            router: OutputRouter::new(outputs, usize::from(config.pixels_per_output)),
            status: StatusScheduler::new(config.status_refresh_ms, config.mode_dwell_ms),
            selection,
            knobs: KnobReadings::default(),
        }
    }

    pub const fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    pub const fn selection(&self) -> OutputSelection {
        self.selection
    }

    /// Zuletzt konditionierte Poti-Werte
    pub const fn knobs(&self) -> KnobReadings {
        self.knobs
    }

    /// Zuletzt auf die Strips übernommener Stand
    pub fn committed(&self) -> Option<&KnobReadings> {
        self.change.committed()
    }

    pub fn active_mode(&self) -> Option<u8> {
        self.status.active_mode()
    }

    pub fn overview(&self) -> Overview {
        Overview {
            outputs: self.config.outputs,
            selection: self.selection,
            knobs: self.knobs,
        }
    }

    /// Startzustand: alle Strips aus
    pub fn start<A, B, L, S, T>(&mut self, hw: &mut Hardware<A, B, L, S, T>)
    where
        L: LightOutput,
    {
        self.router.clear_all(&mut hw.light);
    }

    /// Ein Durchlauf der Steuerschleife
    pub fn tick<A, B, L, S, T>(&mut self, hw: &mut Hardware<A, B, L, S, T>) -> TickReport
    where
        A: AnalogInput,
        B: ButtonInput,
        L: LightOutput,
        S: StatusDisplay,
        T: MonotonicClock + DelayNs,
    {
        let mut report = TickReport::default();
        let now = hw.timer.now_ms();

        self.knobs = self.conditioner.condition_all(&mut hw.knobs);
        let color = self.knobs.color();

        for action in self.buttons.poll_actions(&mut hw.buttons, now) {
            report.button_actions += 1;
            match action {
                ButtonAction::ToggleOutput(output) => {
                    report.outputs_written += self.toggle_output(hw, output, color);
                }
                ButtonAction::TriggerMode(number) => {
                    self.trigger_mode(hw, number, color);
                }
            }
        }

        if self.change.evaluate(self.knobs) {
            report.committed = true;
            report.outputs_written += self.router.actuate(&mut hw.light, color, self.selection);
            self.status.invalidate();
        }

        report.status_rendered = self.refresh_status(hw);
        report
    }

    fn toggle_output<A, B, L, S, T>(
        &mut self,
        hw: &mut Hardware<A, B, L, S, T>,
        output: usize,
        color: ColorVector,
    ) -> usize
    where
        L: LightOutput,
    {
        if output >= usize::from(self.config.outputs) {
            return 0;
        }
        let Some(selected) = self.selection.toggle(output) else {
            return 0;
        };
        self.status.invalidate();

        #[cfg(feature = "defmt")]
        defmt::info!(
            "Output {} {}",
            output + 1,
            if selected { "SELECTED" } else { "DESELECTED" }
        );

        // Abgewählte Strips behalten ihre letzte Farbe
        if !selected {
            return 0;
        }
        // Die ganze Auswahl bekommt die aktuelle Farbe, nicht nur der neue Strip
        self.router.actuate(&mut hw.light, color, self.selection)
    }

    fn trigger_mode<A, B, L, S, T>(&mut self, hw: &mut Hardware<A, B, L, S, T>, number: u8, color: ColorVector)
    where
        L: LightOutput,
        S: StatusDisplay,
        T: MonotonicClock + DelayNs,
    {
        let pulse = Pulse {
            count: number,
            color: ColorVector::uniform(self.config.flash_level),
            on_ms: self.config.flash_on_ms,
            off_ms: self.config.flash_off_ms,
        };

        #[cfg(feature = "defmt")]
        defmt::info!(
            "Mode {} triggered, blocking {} ms per output",
            number,
            pulse.duration_ms()
        );

        // Modus-Anzeige zuerst, damit sie während der Blinkfolge steht
        self.status.show_mode(number, hw.timer.now_ms());
        self.refresh_status(hw);

        for output in self.selection.iter().filter(|&output| output < usize::from(self.config.outputs)) {
            if let Err(_e) = self
                .router
                .acknowledge(&mut hw.light, &mut hw.timer, output, pulse, color)
            {
                #[cfg(feature = "defmt")]
                defmt::warn!("Acknowledge pulse on output {} failed: {}", output + 1, _e);
            }
        }
    }

    fn refresh_status<A, B, L, S, T>(&mut self, hw: &mut Hardware<A, B, L, S, T>) -> bool
    where
        S: StatusDisplay,
        T: MonotonicClock,
    {
        let overview = self.overview();
        let Some(view) = self.status.next_view(hw.timer.now_ms(), overview) else {
            return false;
        };
        match hw.display.render(&view) {
            // Fehlende Anzeige wurde schon beim Start gemeldet
            Ok(()) | Err(DisplayError::NotPresent) => {}
            Err(_e) => {
                // Anzeige ist entkoppelt: die Strips laufen weiter
                #[cfg(feature = "defmt")]
                defmt::warn!("Status render failed: {}", _e);
            }
        }
        true
    }
}
