mod tests {
    use tricolor_dimmer::{
        CYCLE_TICKS, Channel, DutyBuffer, DutyCycleGenerator, OutputDriver, PinLevels, Polarity,
        UpdateSignal,
    };

    /// Counts how many written frames had each pin high.
    #[derive(Default)]
    struct HighCounter {
        high: [u32; 3],
        writes: u32,
    }

    impl HighCounter {
        fn clear(&mut self) {
            *self = Self::default();
        }
    }

    impl OutputDriver for HighCounter {
        fn write(&mut self, pins: PinLevels) {
            self.writes += 1;
            for channel in Channel::ALL {
                if pins.is_high(channel) {
                    self.high[channel.index()] += 1;
                }
            }
        }
    }

    fn run_cycle<O: OutputDriver>(generator: &mut DutyCycleGenerator<'_, O>) {
        for _ in 0..CYCLE_TICKS {
            generator.tick();
        }
    }

    #[test]
    fn test_duty_fidelity_for_every_compare_value() {
        for compare in 0..=255u8 {
            let duty = DutyBuffer::new([compare, 0, 255]);
            let update = UpdateSignal::new();
            let mut generator =
                DutyCycleGenerator::new(HighCounter::default(), Polarity::CommonCathode, &duty, &update);

            run_cycle(&mut generator);
            generator.driver_mut().clear();
            run_cycle(&mut generator);

            let counter = generator.driver();
            assert_eq!(counter.writes, 256);
            assert_eq!(counter.high[Channel::Red.index()], u32::from(compare));
            assert_eq!(counter.high[Channel::Green.index()], 0);
            assert_eq!(counter.high[Channel::Blue.index()], 255);
        }
    }

    #[test]
    fn test_common_anode_inverts_pins() {
        let duty = DutyBuffer::new([64, 128, 0]);
        let update = UpdateSignal::new();
        let mut generator =
            DutyCycleGenerator::new(HighCounter::default(), Polarity::CommonAnode, &duty, &update);

        run_cycle(&mut generator);
        generator.driver_mut().clear();
        run_cycle(&mut generator);

        assert_eq!(generator.driver().high, [256 - 64, 256 - 128, 256]);
    }

    #[test]
    fn test_first_tick_is_a_boundary() {
        let duty = DutyBuffer::new([10, 20, 30]);
        let update = UpdateSignal::new();
        let mut generator =
            DutyCycleGenerator::new(HighCounter::default(), Polarity::CommonCathode, &duty, &update);

        let written = generator.tick();
        assert_eq!(written.bits(), 0b111);
        assert_eq!(generator.position(), 0);
        assert!(update.is_raised());
        assert!(Channel::ALL.iter().all(|&channel| generator.levels().is_on(channel)));
    }

    #[test]
    fn test_zero_compare_is_off_at_boundary() {
        let duty = DutyBuffer::new([0, 1, 0]);
        let update = UpdateSignal::new();
        let mut generator =
            DutyCycleGenerator::new(HighCounter::default(), Polarity::CommonCathode, &duty, &update);

        generator.tick();
        assert!(!generator.levels().is_on(Channel::Red));
        assert!(generator.levels().is_on(Channel::Green));
        assert!(!generator.levels().is_on(Channel::Blue));
    }

    #[test]
    fn test_published_duty_waits_for_boundary() {
        let duty = DutyBuffer::new([10, 10, 10]);
        let update = UpdateSignal::new();
        let mut generator =
            DutyCycleGenerator::new(HighCounter::default(), Polarity::CommonCathode, &duty, &update);

        generator.tick();
        duty.publish([200, 100, 50]);
        for _ in 1..CYCLE_TICKS {
            generator.tick();
            assert_eq!(generator.compare(), [10, 10, 10]);
        }

        generator.tick();
        assert_eq!(generator.position(), 0);
        assert_eq!(generator.compare(), [200, 100, 50]);
        assert!(!duty.has_pending());
    }

    #[test]
    fn test_signal_raised_once_per_cycle() {
        let duty = DutyBuffer::new([0; 3]);
        let update = UpdateSignal::new();
        let mut generator =
            DutyCycleGenerator::new(HighCounter::default(), Polarity::CommonCathode, &duty, &update);

        let mut raised = 0;
        for _ in 0..4 * CYCLE_TICKS {
            generator.tick();
            if update.take() {
                raised += 1;
            }
        }
        assert_eq!(raised, 4);
        assert_eq!(update.overruns(), 0);
    }

    #[test]
    fn test_unconsumed_signal_counts_overrun() {
        let duty = DutyBuffer::new([0; 3]);
        let update = UpdateSignal::new();
        let mut generator =
            DutyCycleGenerator::new(HighCounter::default(), Polarity::CommonCathode, &duty, &update);

        for _ in 0..3 * CYCLE_TICKS {
            generator.tick();
        }
        assert!(update.is_raised());
        assert_eq!(update.overruns(), 2);
    }

    #[test]
    fn test_swap_without_publish_keeps_active() {
        let duty = DutyBuffer::new([1, 2, 3]);
        duty.publish([4, 5, 6]);
        assert_eq!(duty.swap(), [4, 5, 6]);
        assert_eq!(duty.swap(), [4, 5, 6]);
        assert_eq!(duty.active(), [4, 5, 6]);

        duty.publish([7, 8, 9]);
        duty.publish([10, 11, 12]);
        assert_eq!(duty.active(), [4, 5, 6]);
        assert_eq!(duty.swap(), [10, 11, 12]);
    }
}
