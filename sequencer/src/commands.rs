use std::{fmt, str::FromStr};

use finch::FinchDriver;

use crate::parameters::ExecutionParams;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Command {
    // Does nothing, also what unparsed entries become in lenient mode
    #[default]
    Done,
    MoveForward,
    MoveBackward,
    StopMotors,
    // Wait for the configured delay
    Delay,
    // Spin in place clockwise
    TurnRight,
    // Spin in place counter-clockwise
    TurnLeft,
    LedOn,
    LedOff,
}

impl Command {
    pub const ALL: [Command; 9] = [
        Command::Done,
        Command::MoveForward,
        Command::MoveBackward,
        Command::StopMotors,
        Command::Delay,
        Command::TurnRight,
        Command::TurnLeft,
        Command::LedOn,
        Command::LedOff,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Command::Done => "DONE",
            Command::MoveForward => "MOVE_FORWARD",
            Command::MoveBackward => "MOVE_BACKWARD",
            Command::StopMotors => "STOP_MOTORS",
            Command::Delay => "DELAY",
            Command::TurnRight => "TURN_RIGHT",
            Command::TurnLeft => "TURN_LEFT",
            Command::LedOn => "LED_ON",
            Command::LedOff => "LED_OFF",
        }
    }

    /// Parses like [`FromStr`] but turns unrecognised input into [`Command::Done`].
    pub fn parse_lenient(input: &str) -> Command {
        input.parse().unwrap_or_default()
    }

    /// The single driver call this command maps to, `None` for [`Command::Done`].
    pub fn driver_call(&self, params: &ExecutionParams) -> Option<DriverCall> {
        let speed = params.motor_speed;
        let reverse = speed.wrapping_neg();
        let brightness = params.led_brightness;

        match self {
            Command::Done => None,
            Command::MoveForward => Some(DriverCall::SetMotors(speed, speed)),
            Command::MoveBackward => Some(DriverCall::SetMotors(reverse, reverse)),
            Command::StopMotors => Some(DriverCall::SetMotors(0, 0)),
            Command::Delay => Some(DriverCall::Wait(params.delay_ms)),
            Command::TurnRight => Some(DriverCall::SetMotors(speed, reverse)),
            Command::TurnLeft => Some(DriverCall::SetMotors(reverse, speed)),
            Command::LedOn => Some(DriverCall::SetLed(brightness, brightness, brightness)),
            Command::LedOff => Some(DriverCall::SetLed(0, 0, 0)),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Command {
    type Err = UnknownCommand;

    /// Case-insensitive, with or without underscores (`move_forward`, `MOVEFORWARD`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Command::ALL
            .into_iter()
            .find(|cmd| {
                cmd.name().eq_ignore_ascii_case(wanted)
                    || cmd.name().replace('_', "").eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| UnknownCommand(wanted.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCommand(pub String);

impl fmt::Display for UnknownCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown command \"{}\"", self.0)
    }
}

impl std::error::Error for UnknownCommand {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverCall {
    SetMotors(i32, i32),
    SetLed(i32, i32, i32),
    Wait(i32),
}

impl DriverCall {
    pub fn apply(self, driver: &mut impl FinchDriver) -> anyhow::Result<()> {
        match self {
            DriverCall::SetMotors(left, right) => driver.set_motors(left, right),
            DriverCall::SetLed(red, green, blue) => driver.set_led(red, green, blue),
            DriverCall::Wait(ms) => driver.wait(ms),
        }
    }
}
