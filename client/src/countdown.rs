/// Seconds before a new reset code can be requested.
pub const RESEND_CODE_SECONDS: u32 = 120;

/// One-second ticking countdown. Driven by an external interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    seconds: u32,
    remaining: u32,
    active: bool,
}

impl Countdown {
    pub fn new(seconds: u32, started: bool) -> Self {
        Countdown {
            seconds,
            remaining: seconds,
            active: started,
        }
    }

    pub fn start(&mut self) {
        self.active = true;
    }

    pub fn restart(&mut self) {
        self.remaining = self.seconds;
        self.active = true;
    }

    pub fn tick(&mut self) {
        if !self.active {
            return;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.active = false;
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_finished(&self) -> bool {
        self.remaining == 0
    }

    pub fn label(&self) -> String {
        crate::counting::format_countdown(i64::from(self.remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stays_put_until_started() {
        let mut countdown = Countdown::new(3, false);
        countdown.tick();
        assert_eq!(countdown.remaining(), 3);
        countdown.start();
        countdown.tick();
        assert_eq!(countdown.remaining(), 2);
    }

    #[test]
    fn stops_at_zero_and_restarts() {
        let mut countdown = Countdown::new(2, true);
        countdown.tick();
        countdown.tick();
        countdown.tick();
        assert!(countdown.is_finished());
        assert!(!countdown.is_active());

        countdown.restart();
        assert_eq!(countdown.label(), "0:02");
        assert!(countdown.is_active());
    }
}
