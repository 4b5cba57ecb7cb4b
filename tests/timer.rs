mod tests {
    use ring_indicator_effects::timer::Pace;
    use ring_indicator_effects::{Duration, Instant, PacedTimer, TickTimer};

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    fn due(sleep_ms: u64) -> Pace {
        Pace {
            due: true,
            sleep: Duration::from_millis(sleep_ms),
        }
    }

    fn wait(sleep_ms: u64) -> Pace {
        Pace {
            due: false,
            sleep: Duration::from_millis(sleep_ms),
        }
    }

    #[test]
    fn test_disarmed_timer_is_never_due() {
        let mut timer = PacedTimer::new();
        assert!(!timer.is_armed());
        assert_eq!(timer.poll(at(0)), wait(0));
        assert_eq!(timer.poll(at(1_000)), wait(0));
    }

    #[test]
    fn test_paces_at_period() {
        let mut timer = PacedTimer::new();
        timer.arm(Duration::from_millis(40));
        assert_eq!(timer.period(), Some(Duration::from_millis(40)));

        assert_eq!(timer.poll(at(100)), due(40));
        assert_eq!(timer.poll(at(120)), wait(20));
        assert_eq!(timer.poll(at(140)), due(40));
        // Slightly late: the cadence is kept
        assert_eq!(timer.poll(at(190)), due(30));
        assert_eq!(timer.poll(at(220)), due(40));
    }

    #[test]
    fn test_skips_backlog_after_stall() {
        let mut timer = PacedTimer::new();
        timer.arm(Duration::from_millis(40));

        assert_eq!(timer.poll(at(0)), due(40));
        assert_eq!(timer.poll(at(500)), due(40));
        assert_eq!(timer.poll(at(520)), wait(20));
    }

    #[test]
    fn test_rearm_restarts_cadence() {
        let mut timer = PacedTimer::new();
        timer.arm(Duration::from_millis(40));
        assert_eq!(timer.poll(at(0)), due(40));

        timer.disarm();
        assert_eq!(timer.poll(at(10)), wait(0));

        timer.arm(Duration::from_millis(100));
        assert_eq!(timer.poll(at(15)), due(100));
        assert_eq!(timer.poll(at(60)), wait(55));
    }
}
