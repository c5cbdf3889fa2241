use std::time::Instant;

use crate::{
    chip8::ChipSet,
    devices::{DisplayCommands, KeyboardCommands},
    timer::Ticker,
    Config, ProcessError,
};

/// Will run the chipset until the display asks to be closed or a fatal error occurs.
///
/// Every cycle executes a single instruction, the timers are ticked at their own
/// rate and each timer tick refreshes the display. A cycle that finished early sleeps
/// out the rest of its duration, late cycles are not caught up.
pub fn run<D, K>(
    chip: &mut ChipSet,
    display: &mut D,
    keyboard: &K,
    config: &Config,
) -> Result<(), ProcessError>
where
    D: DisplayCommands + ?Sized,
    K: KeyboardCommands + ?Sized,
{
    let cycle = config.cycle_duration();
    let mut ticker = Ticker::new(config.timer_interval(), Instant::now());

    log::info!(
        "running '{}' at {} Hz with timers at {} Hz",
        chip.get_name(),
        config.cpu_hertz,
        config.timer_hertz
    );

    while !display.close_requested() {
        let start = Instant::now();

        if let Err(err) = chip.step(keyboard) {
            log::error!(
                "stopped '{}' at {:#06X}: {}",
                chip.get_name(),
                chip.get_program_counter(),
                err
            );
            return Err(err);
        }

        if ticker.due(Instant::now()) {
            if chip.tick_timers() {
                display.beep();
            }
            display.refresh(chip.get_display());
        }

        let elapsed = start.elapsed();
        if elapsed < cycle {
            std::thread::sleep(cycle - elapsed);
        }
    }

    log::info!("closed '{}'", chip.get_name());
    Ok(())
}
