/// Values the commands are executed with.
///
/// Nothing here is range checked: a speed of 300 or a negative delay reaches the driver as is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionParams {
    // Expected 1-255
    pub motor_speed: i32,
    pub led_brightness: i32,
    pub delay_ms: i32,
    pub command_count: usize,
}

impl ExecutionParams {
    pub fn new() -> ExecutionParams {
        ExecutionParams {
            motor_speed: 155,
            led_brightness: 155,
            delay_ms: 100,
            command_count: 6,
        }
    }
}

impl Default for ExecutionParams {
    fn default() -> Self {
        Self::new()
    }
}
