//! Integration Tests für die Steuerschleife
//!
//! Ende-zu-Ende Szenarien: Potis → Auswahl → Strips → Statusanzeige

mod common;

use common::{mock_hardware, run, step};
use lichtpult_core::{
    ColorVector, Console, ConsoleConfig, KnobReadings, MonotonicClock, OutputSelection, Overview, StatusView,
};

/// R=0, G=4095, B=2048, W=0 und Helligkeit voll aufgedreht (invertiert: Rohwert 0)
const SCENARIO_RAW: [u16; 5] = [0, 4095, 2048, 0, 0];
const SCENARIO_COLOR: ColorVector = ColorVector::new(255, 0, 128, 255);

fn overview_of(view: Option<&StatusView>) -> Overview {
    match view {
        Some(StatusView::Overview(overview)) => *overview,
        other => panic!("expected overview, got {:?}", other),
    }
}

// ============================================================================
// Tests: erster Tick
// ============================================================================

#[test]
fn test_first_tick_commits_without_selection() {
    let config = ConsoleConfig::multi_select();
    let mut console = Console::new(config);
    let mut hw = mock_hardware(&config, SCENARIO_RAW);

    let report = step(&mut console, &mut hw);

    assert!(report.committed);
    assert_eq!(report.outputs_written, 0);
    assert!(hw.light.flushes.is_empty());
    assert_eq!(console.committed(), Some(&KnobReadings::new(255, 0, 128, 255, 255)));
    assert_eq!(console.knobs().color(), SCENARIO_COLOR);

    assert!(report.status_rendered);
    let overview = overview_of(hw.display.last());
    assert!(overview.selection.is_empty());
    assert_eq!(overview.brightness_percent(), 100);
}

#[test]
fn test_brightness_knob_at_raw_max_is_dark() {
    let config = ConsoleConfig::multi_select();
    let mut console = Console::new(config);
    let mut hw = mock_hardware(&config, [0, 4095, 2048, 0, 4095]);

    step(&mut console, &mut hw);

    assert_eq!(console.committed().map(|knobs| knobs.brightness), Some(0));
    assert_eq!(console.knobs().color(), ColorVector::BLACK);
}

#[test]
fn test_start_clears_all_outputs() {
    let config = ConsoleConfig::multi_select();
    let mut console = Console::new(config);
    let mut hw = mock_hardware(&config, SCENARIO_RAW);

    console.start(&mut hw);

    assert_eq!(hw.light.flushes.len(), 4);
    for output in 0..4 {
        assert_eq!(hw.light.shown(output), Some(ColorVector::BLACK));
    }
}

// ============================================================================
// Tests: Mehrfach-Auswahl (Toggle)
// ============================================================================

#[test]
fn test_button_selects_output_and_writes_immediately() {
    let config = ConsoleConfig::multi_select();
    let mut console = Console::new(config);
    let mut hw = mock_hardware(&config, SCENARIO_RAW);
    step(&mut console, &mut hw);

    hw.buttons.press(0);
    let report = step(&mut console, &mut hw);

    assert_eq!(report.button_actions, 1);
    assert_eq!(report.outputs_written, 1);
    assert!(!report.committed);
    assert!(console.selection().contains(0));
    assert_eq!(hw.light.flushes, vec![(0, SCENARIO_COLOR)]);
    for output in 1..4 {
        assert!(hw.light.flushes_for(output).is_empty());
    }

    let overview = overview_of(hw.display.last());
    assert!(overview.selection.contains(0));
    assert_eq!(overview.selection.len(), 1);
}

#[test]
fn test_held_button_toggles_once() {
    let config = ConsoleConfig::multi_select();
    let mut console = Console::new(config);
    let mut hw = mock_hardware(&config, SCENARIO_RAW);
    step(&mut console, &mut hw);

    hw.buttons.press(1);
    let reports = run(&mut console, &mut hw, 500);

    let actions: usize = reports.iter().map(|report| report.button_actions).sum();
    assert_eq!(actions, 1);
    assert!(console.selection().contains(1));
    assert_eq!(hw.light.flushes_for(1).len(), 1);
}

#[test]
fn test_deselect_keeps_last_color() {
    let config = ConsoleConfig::multi_select();
    let mut console = Console::new(config);
    let mut hw = mock_hardware(&config, SCENARIO_RAW);
    step(&mut console, &mut hw);

    hw.buttons.press(2);
    run(&mut console, &mut hw, 50);
    hw.buttons.release(2);
    run(&mut console, &mut hw, 50);
    hw.buttons.press(2);
    run(&mut console, &mut hw, 50);

    assert!(console.selection().is_empty());
    assert_eq!(hw.light.flushes, vec![(2, SCENARIO_COLOR)]);
}

#[test]
fn test_knob_change_reaches_selected_outputs_only() {
    let config = ConsoleConfig::multi_select();
    let mut console = Console::new(config);
    let mut hw = mock_hardware(&config, SCENARIO_RAW);
    step(&mut console, &mut hw);

    hw.buttons.press(0);
    hw.buttons.press(2);
    step(&mut console, &mut hw);
    hw.buttons.release(0);
    hw.buttons.release(2);
    run(&mut console, &mut hw, 50);
    // Auswahl von 2 schreibt die ganze Auswahl {1, 3} neu
    let writes_after_select = hw.light.flushes.len();
    assert_eq!(writes_after_select, 3);

    // Rot ganz zu: Rohwert 4095 → 0
    hw.knobs.set(lichtpult_core::Channel::Red, 4095);
    let reports = run(&mut console, &mut hw, 100);

    assert!(reports.iter().any(|report| report.committed));
    assert!(hw.light.flushes.len() > writes_after_select);
    assert!(hw.light.flushes_for(1).is_empty());
    assert!(hw.light.flushes_for(3).is_empty());

    let committed = *console.committed().unwrap();
    assert!(committed.red <= 1);
    assert_eq!(hw.light.shown(0), Some(committed.color()));
    assert_eq!(hw.light.shown(2), Some(committed.color()));
}

#[test]
fn test_select_rewrites_whole_selection_with_current_color() {
    let config = ConsoleConfig::multi_select();
    let mut console = Console::new(config);
    let mut hw = mock_hardware(&config, SCENARIO_RAW);
    step(&mut console, &mut hw);

    hw.buttons.press(0);
    step(&mut console, &mut hw);
    hw.buttons.release(0);
    run(&mut console, &mut hw, 50);
    assert_eq!(hw.light.shown(0), Some(SCENARIO_COLOR));

    // Blau um eine Stufe (128 → 127): unter der Hysterese, nichts wird geschrieben
    hw.knobs.set(lichtpult_core::Channel::Blue, 2070);
    let reports = run(&mut console, &mut hw, 20);
    assert!(reports.iter().all(|report| !report.committed));
    assert_eq!(console.knobs().blue, 127);
    assert_eq!(hw.light.shown(0), Some(SCENARIO_COLOR));

    hw.buttons.press(1);
    let report = step(&mut console, &mut hw);

    let current = console.knobs().color();
    assert_eq!(current, ColorVector::new(255, 0, 127, 255));
    assert_eq!(report.outputs_written, 2);
    assert_eq!(hw.light.shown(0), Some(current));
    assert_eq!(hw.light.shown(1), Some(current));
}

#[test]
fn test_steady_knobs_do_not_rewrite() {
    let config = ConsoleConfig::multi_select();
    let mut console = Console::new(config);
    let mut hw = mock_hardware(&config, SCENARIO_RAW);
    step(&mut console, &mut hw);
    hw.buttons.press(3);
    step(&mut console, &mut hw);

    let reports = run(&mut console, &mut hw, 300);

    assert!(reports.iter().all(|report| !report.committed));
    assert_eq!(hw.light.flushes_for(3).len(), 1);
}

#[test]
fn test_buttons_beyond_output_count_are_ignored() {
    let config = ConsoleConfig::multi_select().with_outputs(2);
    let mut console = Console::new(config);
    let mut hw = mock_hardware(&config, SCENARIO_RAW);
    step(&mut console, &mut hw);

    hw.buttons.press(3);
    step(&mut console, &mut hw);

    assert!(console.selection().is_empty());
    assert!(hw.light.flushes.is_empty());
}

// ============================================================================
// Tests: Fehlerverhalten
// ============================================================================

#[test]
fn test_display_failure_does_not_stop_outputs() {
    let config = ConsoleConfig::multi_select();
    let mut console = Console::new(config);
    let mut hw = mock_hardware(&config, SCENARIO_RAW);
    hw.display.fail = true;
    step(&mut console, &mut hw);

    hw.buttons.press(0);
    let report = step(&mut console, &mut hw);

    assert_eq!(report.outputs_written, 1);
    assert_eq!(hw.light.shown(0), Some(SCENARIO_COLOR));
    assert!(hw.display.views.is_empty());
}

#[test]
fn test_failed_write_is_not_retried() {
    let config = ConsoleConfig::multi_select();
    let mut console = Console::new(config);
    let mut hw = mock_hardware(&config, SCENARIO_RAW);
    step(&mut console, &mut hw);

    hw.light.fail_next_flush = true;
    hw.buttons.press(0);
    let report = step(&mut console, &mut hw);
    run(&mut console, &mut hw, 20);

    assert_eq!(report.outputs_written, 0);
    assert!(console.selection().contains(0));
    assert!(hw.light.flushes.is_empty());
}

// ============================================================================
// Tests: Statusanzeige
// ============================================================================

#[test]
fn test_status_refreshes_periodically() {
    let config = ConsoleConfig::multi_select().with_status_refresh_ms(100);
    let mut console = Console::new(config);
    let mut hw = mock_hardware(&config, SCENARIO_RAW);

    // 1000 ms ohne jede Eingabe
    run(&mut console, &mut hw, 500);

    assert!(hw.display.views.len() >= 10);
    assert!(hw.display.views.len() <= 11);
}

// ============================================================================
// Tests: Einzel-Auslöser (Momentary)
// ============================================================================

#[test]
fn test_single_trigger_writes_color_on_first_tick() {
    let config = ConsoleConfig::single_trigger();
    let mut console = Console::new(config);
    let mut hw = mock_hardware(&config, SCENARIO_RAW);

    let report = step(&mut console, &mut hw);

    assert_eq!(console.selection(), OutputSelection::all(1));
    assert_eq!(report.outputs_written, 1);
    assert_eq!(hw.light.flushes, vec![(0, SCENARIO_COLOR)]);
}

#[test]
fn test_mode_button_plays_pulses_and_shows_mode() {
    let config = ConsoleConfig::single_trigger();
    let mut console = Console::new(config);
    let mut hw = mock_hardware(&config, SCENARIO_RAW);
    step(&mut console, &mut hw);
    hw.light.flushes.clear();

    hw.buttons.press(1);
    let trigger_at = hw.timer.now_ms();
    let report = step(&mut console, &mut hw);

    assert_eq!(report.button_actions, 1);
    assert_eq!(console.active_mode(), Some(2));
    assert_eq!(hw.display.last(), Some(&StatusView::Mode(2)));
    assert_eq!(StatusView::mode_text(2).as_str(), "MODE 2");

    let flash = ColorVector::uniform(config.flash_level);
    assert_eq!(
        hw.light.flushes_for(0),
        vec![flash, ColorVector::BLACK, flash, ColorVector::BLACK, SCENARIO_COLOR]
    );
    assert_eq!(hw.timer.delays_ms, vec![150, 150, 150, 150]);

    // Blockierende Pause: die Uhr ist während der Blinkfolge weitergelaufen
    assert!(hw.timer.now_ms() >= trigger_at + 600);

    hw.buttons.release(1);
    let deadline = trigger_at + u64::from(config.mode_dwell_ms);
    while hw.timer.now_ms() < deadline {
        step(&mut console, &mut hw);
    }
    assert_eq!(console.active_mode(), Some(2));
    assert_eq!(hw.display.last(), Some(&StatusView::Mode(2)));

    assert_eq!(hw.timer.now_ms(), deadline);
    let report = step(&mut console, &mut hw);
    assert!(report.status_rendered);
    assert_eq!(console.active_mode(), None);
    let overview = overview_of(hw.display.last());
    assert_eq!(overview.knobs, KnobReadings::new(255, 0, 128, 255, 255));
}

#[test]
fn test_loop_resumes_after_pulses() {
    let config = ConsoleConfig::single_trigger();
    let mut console = Console::new(config);
    let mut hw = mock_hardware(&config, SCENARIO_RAW);
    step(&mut console, &mut hw);

    hw.buttons.press(0);
    step(&mut console, &mut hw);
    hw.buttons.release(0);
    hw.light.flushes.clear();

    hw.knobs.set(lichtpult_core::Channel::Green, 0);
    let reports = run(&mut console, &mut hw, 30);

    assert!(reports.iter().any(|report| report.committed));
    let committed = *console.committed().unwrap();
    assert!(committed.green >= 245);
    assert_eq!(hw.light.shown(0), Some(committed.color()));
}
