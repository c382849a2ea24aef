use std::io;

use clap::Parser;
use console::Console;
use finch::{FinchConn, FinchDriver, SimulatedFinch};
use menu::Session;

mod console;
mod menu;
mod setup;

#[derive(Parser)]
#[clap(version = "1.0", about = "Program a Finch robot with a list of commands")]
struct Opts {
    /// Address of the bridge that owns the Finch USB connection
    #[clap(long, default_value = "127.0.0.1:2019")]
    bridge: String,
    /// Run against a simulated Finch instead of the bridge
    #[clap(long)]
    simulate: bool,
    /// Store unknown command names as DONE instead of asking again
    #[clap(long)]
    lenient: bool,
}

fn main() -> anyhow::Result<()> {
    setup_logging();
    let opts = Opts::parse();

    let mut console = Console::new(io::stdin().lock(), io::stdout());
    let session = Session::new(opts.lenient);

    if opts.simulate {
        log::info!("Using simulated Finch");
        run(&mut console, &mut SimulatedFinch::new(), session)
    } else {
        log::info!("Using Finch bridge at {}", opts.bridge);
        run(&mut console, &mut FinchConn::new(&opts.bridge), session)
    }
}

fn run<R: io::BufRead, W: io::Write>(
    console: &mut Console<R, W>,
    finch: &mut impl FinchDriver,
    mut session: Session,
) -> anyhow::Result<()> {
    setup::opening_screen(console)?;
    setup::initialize_finch(console, finch)?;

    match menu::main_menu(console, finch, &mut session) {
        Ok(()) => setup::closing_screen(console, finch),
        Err(e) => {
            if let Err(disconnect_err) = finch.disconnect() {
                log::warn!("Failed to disconnect Finch: {disconnect_err:#}");
            }
            Err(e)
        }
    }
}

// Logs share stdout with the menu, keep per-call detail out of it
fn setup_logging() {
    simple_log::quick!("info");
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn full_session_against_simulator() {
        let script = "\n\n\n1\n2\n300\n90\n10\n2\nmove_backward\nled_on\n\n4\n\n\nE\n\n";
        let mut console = Console::new(Cursor::new(script.as_bytes().to_vec()), Vec::new());
        let mut finch = SimulatedFinch::new();
        run(&mut console, &mut finch, Session::new(false)).unwrap();

        // Disconnecting resets the simulated robot
        assert!(!finch.connected);
        assert_eq!(finch.motors, (0, 0));

        let out = String::from_utf8(console.out).unwrap();
        assert!(out.contains("Program Your Finch"));
        assert!(out.contains("MOVE_BACKWARD... "));
        assert!(out.contains("Thank You!"));
    }

    #[test]
    fn failed_session_still_disconnects() {
        let mut console = Console::new(Cursor::new(b"\n\n\n1\n".to_vec()), Vec::new());
        let mut finch = SimulatedFinch::new();
        assert!(run(&mut console, &mut finch, Session::new(false)).is_err());
        assert!(!finch.connected);
    }
}
