mod countdown;
mod driver;

#[allow(unused_imports)]
pub use countdown::{format_remaining, Countdown, Severity, TimerEvent, TimerState};
#[allow(unused_imports)]
pub use driver::{TimerDriver, TimerHandle, TICK_PERIOD};
