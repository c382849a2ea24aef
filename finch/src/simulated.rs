use anyhow::bail;

use crate::FinchDriver;

/// In-memory Finch used when no robot is plugged in.
///
/// `wait` does not sleep, the requested time is added to `waited_ms` instead.
#[derive(Debug, Clone, Default)]
pub struct SimulatedFinch {
    pub connected: bool,
    pub motors: (i32, i32),
    pub led: (i32, i32, i32),
    pub note: Option<i32>,
    pub waited_ms: i64,
    failed_connects_left: u32,
}

impl SimulatedFinch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails the first `attempts` calls to `connect`, like a robot that is not plugged in yet.
    pub fn with_failed_connects(attempts: u32) -> Self {
        Self {
            failed_connects_left: attempts,
            ..Self::default()
        }
    }

    fn ensure_connected(&self, call: &str) -> anyhow::Result<()> {
        if !self.connected {
            bail!("Simulated Finch is not connected, cannot {call}");
        }

        Ok(())
    }
}

impl FinchDriver for SimulatedFinch {
    fn connect(&mut self) -> anyhow::Result<()> {
        if self.failed_connects_left > 0 {
            self.failed_connects_left -= 1;
            bail!("Simulated Finch not found");
        }
        log::debug!("Simulated Finch connected");
        self.connected = true;

        Ok(())
    }

    fn disconnect(&mut self) -> anyhow::Result<()> {
        log::debug!("Simulated Finch disconnected");
        self.connected = false;
        self.motors = (0, 0);
        self.led = (0, 0, 0);
        self.note = None;

        Ok(())
    }

    fn set_motors(&mut self, left: i32, right: i32) -> anyhow::Result<()> {
        self.ensure_connected("set motors")?;
        log::debug!("Motors {left}, {right}");
        self.motors = (left, right);

        Ok(())
    }

    fn set_led(&mut self, red: i32, green: i32, blue: i32) -> anyhow::Result<()> {
        self.ensure_connected("set LED")?;
        log::debug!("LED {red}, {green}, {blue}");
        self.led = (red, green, blue);

        Ok(())
    }

    fn note_on(&mut self, frequency: i32) -> anyhow::Result<()> {
        self.ensure_connected("play note")?;
        self.note = Some(frequency);

        Ok(())
    }

    fn note_off(&mut self) -> anyhow::Result<()> {
        self.ensure_connected("stop note")?;
        self.note = None;

        Ok(())
    }

    fn wait(&mut self, ms: i32) -> anyhow::Result<()> {
        self.ensure_connected("wait")?;
        log::debug!("Wait {ms} ms");
        self.waited_ms += ms.max(0) as i64;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_robot_state() {
        let mut finch = SimulatedFinch::new();
        finch.connect().unwrap();
        finch.set_motors(155, -155).unwrap();
        finch.set_led(200, 200, 200).unwrap();
        finch.note_on(440).unwrap();
        finch.wait(500).unwrap();
        finch.wait(-20).unwrap();

        assert_eq!(finch.motors, (155, -155));
        assert_eq!(finch.led, (200, 200, 200));
        assert_eq!(finch.note, Some(440));
        assert_eq!(finch.waited_ms, 500);

        finch.note_off().unwrap();
        assert_eq!(finch.note, None);
    }

    #[test]
    fn rejects_calls_while_disconnected() {
        let mut finch = SimulatedFinch::new();
        assert!(finch.set_motors(1, 1).is_err());
        assert!(finch.wait(10).is_err());

        finch.connect().unwrap();
        finch.set_motors(1, 1).unwrap();
        finch.disconnect().unwrap();
        assert!(finch.set_led(1, 1, 1).is_err());
        assert_eq!(finch.motors, (0, 0));
    }

    #[test]
    fn fails_configured_connect_attempts() {
        let mut finch = SimulatedFinch::with_failed_connects(2);
        assert!(finch.connect().is_err());
        assert!(finch.connect().is_err());
        finch.connect().unwrap();
        assert!(finch.connected);
    }
}
