use std::{io::Write, net::{SocketAddr, TcpStream, ToSocketAddrs}, thread::sleep, time::Duration};

use anyhow::{anyhow, bail, Context};

pub mod simulated;

pub use simulated::SimulatedFinch;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(3);

/// Calls understood by a Finch robot.
///
/// Values are passed through as given, range checking is left to the robot.
pub trait FinchDriver {
    fn connect(&mut self) -> anyhow::Result<()>;

    fn disconnect(&mut self) -> anyhow::Result<()>;

    fn set_motors(&mut self, left: i32, right: i32) -> anyhow::Result<()>;

    fn set_led(&mut self, red: i32, green: i32, blue: i32) -> anyhow::Result<()>;

    fn note_on(&mut self, frequency: i32) -> anyhow::Result<()>;

    fn note_off(&mut self) -> anyhow::Result<()>;

    /// Blocks for `ms` milliseconds. Negative durations return immediately.
    fn wait(&mut self, ms: i32) -> anyhow::Result<()> {
        sleep(Duration::from_millis(ms.max(0) as u64));

        Ok(())
    }
}

/// Connection to a Finch through the bridge process that owns its USB link.
///
/// Every call is written as one text line, e.g. `SetMotors(155, -155)`.
pub struct FinchConn {
    bridge_addr: String,
    stream: Option<TcpStream>,
}

impl FinchConn {
    pub fn new(bridge_addr: &str) -> FinchConn {
        FinchConn {
            bridge_addr: bridge_addr.to_string(),
            stream: None,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.stream.is_some()
    }

    fn resolve(&self) -> anyhow::Result<SocketAddr> {
        self.bridge_addr
            .to_socket_addrs()
            .with_context(|| format!("Invalid bridge address {}", self.bridge_addr))?
            .next()
            .ok_or(anyhow!("Bridge address {} did not resolve", self.bridge_addr))
    }

    fn send_line(&mut self, line: &str) -> anyhow::Result<()> {
        let Some(stream) = self.stream.as_mut() else {
            bail!("Finch is not connected, cannot send {line}");
        };
        log::debug!("-> {line}");
        write!(stream, "{line}\n")
            .with_context(|| format!("Failed to send {line} to the Finch bridge"))?;

        Ok(())
    }
}

impl FinchDriver for FinchConn {
    fn connect(&mut self) -> anyhow::Result<()> {
        if self.is_connected() {
            return Ok(());
        }
        let addr = self.resolve()?;
        let stream = TcpStream::connect_timeout(&addr, CONNECT_TIMEOUT)
            .with_context(|| format!("Could not reach the Finch bridge at {addr}"))?;
        stream.set_nodelay(true)?;
        self.stream = Some(stream);

        Ok(())
    }

    fn disconnect(&mut self) -> anyhow::Result<()> {
        if !self.is_connected() {
            return Ok(());
        }
        let res = self.send_line("Disconnect()");
        self.stream = None;

        res
    }

    fn set_motors(&mut self, left: i32, right: i32) -> anyhow::Result<()> {
        self.send_line(&format!("SetMotors({left}, {right})"))
    }

    fn set_led(&mut self, red: i32, green: i32, blue: i32) -> anyhow::Result<()> {
        self.send_line(&format!("SetLED({red}, {green}, {blue})"))
    }

    fn note_on(&mut self, frequency: i32) -> anyhow::Result<()> {
        self.send_line(&format!("NoteOn({frequency})"))
    }

    fn note_off(&mut self) -> anyhow::Result<()> {
        self.send_line("NoteOff()")
    }
}
