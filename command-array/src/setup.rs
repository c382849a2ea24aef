use std::io::{BufRead, Write};

use finch::FinchDriver;

use crate::console::Console;

const ALERT_START_HZ: i32 = 17000;
const ALERT_END_HZ: i32 = 100;
const ALERT_STEP_HZ: usize = 100;
const ALERT_NOTE_MS: i32 = 10;

pub fn opening_screen<R: BufRead, W: Write>(console: &mut Console<R, W>) -> anyhow::Result<()> {
    console.line("")?;
    console.line("\tProgram Your Finch")?;
    console.continue_prompt()
}

/// Keeps asking the user to plug in the robot until `connect` succeeds.
pub fn initialize_finch<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    finch: &mut impl FinchDriver,
) -> anyhow::Result<()> {
    console.header("Initialize the Finch")?;
    console.line("Please plug your Finch Robot into the computer.")?;
    console.continue_prompt()?;

    log::info!("Connecting to Finch");
    let mut attempt = 1;
    while let Err(e) = finch.connect() {
        log::warn!("Connection attempt {attempt} failed: {e:#}");
        console.line("Please confirm the Finch Robot is connected")?;
        console.continue_prompt()?;
        attempt += 1;
    }
    log::info!("Finch connected after {attempt} attempt(s)");

    connected_alert(finch)?;
    console.line("Your Finch Robot is now connected")?;
    console.continue_prompt()
}

/// Green LED and a falling tone sweep.
pub fn connected_alert(finch: &mut impl FinchDriver) -> anyhow::Result<()> {
    finch.set_led(0, 255, 0)?;
    for frequency in (ALERT_END_HZ + 1..=ALERT_START_HZ).rev().step_by(ALERT_STEP_HZ) {
        finch.note_on(frequency)?;
        finch.wait(ALERT_NOTE_MS)?;
    }
    finch.note_off()?;

    Ok(())
}

pub fn closing_screen<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    finch: &mut impl FinchDriver,
) -> anyhow::Result<()> {
    console.line("")?;
    console.line("\t\tThank You!")?;

    log::info!("Disconnecting Finch");
    finch.disconnect()?;

    console.continue_prompt()
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use finch::SimulatedFinch;

    use super::*;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn alert_sweeps_down_and_stops() {
        let mut finch = SimulatedFinch::new();
        finch.connect().unwrap();
        connected_alert(&mut finch).unwrap();

        assert_eq!(finch.led, (0, 255, 0));
        assert_eq!(finch.note, None);
        // 17000, 16900, ..., 200
        assert_eq!(finch.waited_ms, 169 * 10);
    }

    #[test]
    fn retries_until_connected() {
        let mut finch = SimulatedFinch::with_failed_connects(2);
        let mut console = console("\n\n\n\n");
        initialize_finch(&mut console, &mut finch).unwrap();

        assert!(finch.connected);
        let out = String::from_utf8(console.out).unwrap();
        assert_eq!(out.matches("Please confirm the Finch Robot is connected").count(), 2);
        assert!(out.contains("Your Finch Robot is now connected"));
    }

    #[test]
    fn gives_up_when_input_closes() {
        let mut finch = SimulatedFinch::with_failed_connects(u32::MAX);
        let mut console = console("\n\n");
        assert!(initialize_finch(&mut console, &mut finch).is_err());
        assert!(!finch.connected);
    }

    #[test]
    fn closing_disconnects() {
        let mut finch = SimulatedFinch::new();
        finch.connect().unwrap();
        let mut console = console("\n");
        closing_screen(&mut console, &mut finch).unwrap();
        assert!(!finch.connected);
    }
}
