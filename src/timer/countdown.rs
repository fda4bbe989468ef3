use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Stopped,
    Running,
    Paused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    /// Remaining time crossed 1/4 (warning) or 1/8 (error) of the duration.
    Warning {
        severity: Severity,
        remaining_text: String,
    },
    TimeUp,
}

/// Exam countdown as a plain state machine.
///
/// Nothing in here reads a clock after construction; time advances only
/// through [`Countdown::tick`], which whoever owns the schedule calls once
/// per second.
#[derive(Debug, Clone)]
pub struct Countdown {
    initial: u64,
    remaining: u64,
    state: TimerState,
    visible: bool,
    quarter_warned: bool,
    eighth_warned: bool,
    time_up_fired: bool,
}

impl Countdown {
    pub fn new(initial_secs: u64, enabled: bool) -> Self {
        Self {
            initial: initial_secs,
            remaining: initial_secs,
            state: if enabled {
                TimerState::Running
            } else {
                TimerState::Stopped
            },
            visible: true,
            quarter_warned: false,
            eighth_warned: false,
            time_up_fired: false,
        }
    }

    /// Countdown for a session that started at `start_time`, so a reload
    /// continues where the attempt actually is instead of restarting.
    pub fn resume_from(
        initial_secs: u64,
        enabled: bool,
        start_time: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Self {
        let elapsed = (now - start_time).num_seconds().max(0) as u64;
        let mut countdown = Self::new(initial_secs, enabled);
        countdown.remaining = initial_secs.saturating_sub(elapsed);
        countdown
    }

    pub fn initial(&self) -> u64 {
        self.initial
    }

    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_time_up(&self) -> bool {
        self.time_up_fired
    }

    /// Running <-> Paused. A stopped timer stays stopped.
    pub fn toggle_pause(&mut self) {
        self.state = match self.state {
            TimerState::Running => TimerState::Paused,
            TimerState::Paused => TimerState::Running,
            TimerState::Stopped => TimerState::Stopped,
        };
    }

    /// Hides or shows the clock. Does not touch the countdown.
    pub fn toggle_visibility(&mut self) {
        self.visible = !self.visible;
    }

    /// Advance one second.
    pub fn tick(&mut self) -> Vec<TimerEvent> {
        if self.state != TimerState::Running {
            return Vec::new();
        }

        let mut events = Vec::new();
        let reached_zero = self.remaining <= 1;
        self.remaining = self.remaining.saturating_sub(1);

        events.extend(self.check_thresholds());

        if reached_zero && !self.time_up_fired {
            self.time_up_fired = true;
            events.push(TimerEvent::TimeUp);
        }

        events
    }

    /// Emit each threshold warning the first time remaining time is at or
    /// below it.
    pub fn check_thresholds(&mut self) -> Vec<TimerEvent> {
        if self.state == TimerState::Stopped {
            return Vec::new();
        }

        let mut events = Vec::new();

        if !self.quarter_warned && self.remaining * 4 <= self.initial {
            self.quarter_warned = true;
            events.push(TimerEvent::Warning {
                severity: Severity::Warning,
                remaining_text: format_remaining(self.remaining),
            });
        }

        if !self.eighth_warned && self.remaining * 8 <= self.initial {
            self.eighth_warned = true;
            events.push(TimerEvent::Warning {
                severity: Severity::Error,
                remaining_text: format_remaining(self.remaining),
            });
        }

        events
    }

    /// `HH:MM:SS`, or a placeholder while hidden.
    pub fn display(&self) -> String {
        if !self.visible {
            return "--:--:--".to_string();
        }
        let h = self.remaining / 3600;
        let m = (self.remaining % 3600) / 60;
        let s = self.remaining % 60;
        format!("{:02}:{:02}:{:02}", h, m, s)
    }
}

/// Human remaining time with leading zero units dropped: `1h 0m 5s`,
/// `4m 10s`, `9s`.
pub fn format_remaining(secs: u64) -> String {
    let h = secs / 3600;
    let m = (secs % 3600) / 60;
    let s = secs % 60;

    if h > 0 {
        format!("{}h {}m {}s", h, m, s)
    } else if m > 0 {
        format!("{}m {}s", m, s)
    } else {
        format!("{}s", s)
    }
}
