use anyhow::Context;
use commands::Command;
use finch::FinchDriver;
use parameters::ExecutionParams;

pub mod commands;
pub mod parameters;

/// Runs `commands` in order, one driver call per command except [`Command::Done`].
///
/// Stops at the first driver error. Returns how many driver calls were made.
pub fn execute(
    commands: &[Command],
    params: &ExecutionParams,
    driver: &mut impl FinchDriver,
) -> anyhow::Result<usize> {
    execute_with(commands, params, driver, |_, _| Ok(()))
}

/// Same as [`execute`], calling `on_command` with the position and command before it runs.
pub fn execute_with(
    commands: &[Command],
    params: &ExecutionParams,
    driver: &mut impl FinchDriver,
    mut on_command: impl FnMut(usize, Command) -> anyhow::Result<()>,
) -> anyhow::Result<usize> {
    let mut calls = 0;
    for (i, cmd) in commands.iter().copied().enumerate() {
        log::debug!("Executing command {} of {}: {cmd}", i + 1, commands.len());
        on_command(i, cmd)?;

        let Some(call) = cmd.driver_call(params) else {
            continue;
        };
        log::debug!("Driver call {call:?}");
        call.apply(driver)
            .with_context(|| format!("Command {} ({cmd}) failed", i + 1))?;
        calls += 1;
    }

    Ok(calls)
}
