use std::io::{BufRead, Write};

use finch::FinchDriver;
use sequencer::{commands::Command, execute_with, parameters::ExecutionParams};

use crate::console::Console;

/// Everything the user has entered so far.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub params: ExecutionParams,
    pub commands: Option<Vec<Command>>,
    // Unknown command names become DONE instead of being asked again
    pub lenient: bool,
}

impl Session {
    pub fn new(lenient: bool) -> Session {
        Session {
            lenient,
            ..Session::default()
        }
    }
}

enum MenuChoice {
    Parameters,
    Commands,
    Display,
    Execute,
    Exit,
}

impl MenuChoice {
    fn parse(input: &str) -> Option<MenuChoice> {
        match input.trim() {
            "1" => Some(MenuChoice::Parameters),
            "2" => Some(MenuChoice::Commands),
            "3" => Some(MenuChoice::Display),
            "4" => Some(MenuChoice::Execute),
            "e" | "E" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

pub fn main_menu<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    finch: &mut impl FinchDriver,
    session: &mut Session,
) -> anyhow::Result<()> {
    loop {
        console.header("Main Menu")?;
        console.line("\t1) Enter Command Parameters")?;
        console.line("\t2) Enter Finch Robot Commands")?;
        console.line("\t3) Display Commands")?;
        console.line("\t4) Execute Commands")?;
        console.line("\tE) Exit")?;
        console.line("")?;
        let answer = console.prompt("Enter Choice:")?;

        match MenuChoice::parse(&answer) {
            Some(MenuChoice::Parameters) => session.params = enter_parameters(console)?,
            Some(MenuChoice::Commands) => {
                let count = session.params.command_count;
                session.commands = Some(enter_commands(console, count, session.lenient)?);
            }
            Some(MenuChoice::Display) => display_commands(console, session.commands.as_deref())?,
            Some(MenuChoice::Execute) => execute_commands(console, finch, session)?,
            Some(MenuChoice::Exit) => return Ok(()),
            None => log::debug!("Ignoring menu choice {answer:?}"),
        }
    }
}

fn enter_parameters<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
) -> anyhow::Result<ExecutionParams> {
    console.header("Number of Commands")?;
    let command_count = console.prompt_number("Enter the number of commands:")?;

    console.header("Length of Delay")?;
    let delay_ms = console.prompt_number("Enter Length of Delay (milliseconds):")?;

    console.header("Motor Speed")?;
    let motor_speed = console.prompt_number("Enter Motor Speed (1-255):")?;

    console.header("LED Brightness")?;
    let led_brightness = console.prompt_number("Enter LED Brightness:")?;

    let params = ExecutionParams {
        motor_speed,
        led_brightness,
        delay_ms,
        command_count,
    };
    log::debug!("Parameters set to {params:?}");

    Ok(params)
}

fn enter_commands<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    count: usize,
    lenient: bool,
) -> anyhow::Result<Vec<Command>> {
    console.header("Enter Finch Commands")?;
    let names = Command::ALL.iter().map(Command::name).collect::<Vec<_>>();
    console.line(names.join(", "))?;

    // The count is user input, grow as commands arrive
    let mut commands = Vec::new();
    for i in 1..=count {
        let command = loop {
            let answer = console.prompt(&format!("Command number {i}:"))?;
            if lenient {
                break Command::parse_lenient(&answer);
            }
            match answer.parse::<Command>() {
                Ok(cmd) => break cmd,
                Err(e) => console.line(format!("{e}, try again."))?,
            }
        };
        commands.push(command);
    }

    console.line("")?;
    console.line(format!("The commands you entered are: {}", join_commands(&commands)))?;
    console.continue_prompt()?;

    Ok(commands)
}

fn display_commands<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    commands: Option<&[Command]>,
) -> anyhow::Result<()> {
    let Some(commands) = commands else {
        return no_commands(console);
    };

    console.header("Display Commands")?;
    console.line(format!("The commands you entered are: {}", join_commands(commands)))?;
    console.continue_prompt()
}

fn execute_commands<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    finch: &mut impl FinchDriver,
    session: &Session,
) -> anyhow::Result<()> {
    let Some(commands) = session.commands.as_deref() else {
        return no_commands(console);
    };

    console.header("Execute Commands")?;
    console.line(format!("The commands you entered are: {}", join_commands(commands)))?;
    console.prompt("Press Enter to execute.")?;

    console.header("Execute Commands")?;
    console.line("Executing...")?;
    let calls = execute_with(commands, &session.params, finch, |_, cmd| {
        console.line(format!("{cmd}... "))
    })?;
    log::debug!("Executed {} commands with {calls} driver calls", commands.len());

    console.continue_prompt()
}

fn no_commands<R: BufRead, W: Write>(console: &mut Console<R, W>) -> anyhow::Result<()> {
    console.line("No Commands Entered!")?;
    console.continue_prompt()
}

fn join_commands(commands: &[Command]) -> String {
    commands.iter().map(Command::name).collect::<Vec<_>>().join(" - ")
}
