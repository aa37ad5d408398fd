mod tests {
    use proptest::prelude::*;
    use tricolor_dimmer::dither::QUANTUM;
    use tricolor_dimmer::{Channel, DitherQuantizer, MAX_INTENSITY};

    fn assert_error_bounded(quantizer: &DitherQuantizer) {
        for error in quantizer.errors() {
            assert!((-16..16).contains(&error), "error {error} out of bounds");
        }
    }

    #[test]
    fn test_first_step_rounds_up() {
        let mut quantizer = DitherQuantizer::new();
        assert_eq!(quantizer.step_channel(Channel::Red, 100), 7);
        assert_eq!(quantizer.error(Channel::Red), -12);
        assert_eq!(quantizer.step_channel(Channel::Red, 100), 6);
        assert_eq!(quantizer.error(Channel::Red), -8);
    }

    #[test]
    fn test_zero_target_goes_dark_after_one_cycle() {
        let mut quantizer = DitherQuantizer::new();
        assert_eq!(quantizer.step([0; 3]), [1; 3]);
        for _ in 0..64 {
            assert_eq!(quantizer.step([0; 3]), [0; 3]);
        }
    }

    #[test]
    fn test_full_target_settles_at_255() {
        let mut quantizer = DitherQuantizer::new();
        // A duty of 256 is not representable and wraps to one dark cycle.
        assert_eq!(quantizer.step_channel(Channel::Green, MAX_INTENSITY), 0);
        assert_eq!(quantizer.error(Channel::Green), -16);
        for _ in 0..64 {
            assert_eq!(quantizer.step_channel(Channel::Green, MAX_INTENSITY), 255);
            assert_eq!(quantizer.error(Channel::Green), -16);
        }
    }

    #[test]
    fn test_exact_multiples_hold_steady() {
        let mut quantizer = DitherQuantizer::new();
        quantizer.step_channel(Channel::Blue, 1600);
        for _ in 0..32 {
            assert_eq!(quantizer.step_channel(Channel::Blue, 1600), 100);
        }
    }

    #[test]
    fn test_time_average_tracks_every_target() {
        const CYCLES: i64 = 256;
        for target in 0..MAX_INTENSITY {
            let mut quantizer = DitherQuantizer::new();
            let mut sum = 0i64;
            for _ in 0..CYCLES {
                sum += i64::from(quantizer.step_channel(Channel::Red, target));
                assert_error_bounded(&quantizer);
            }
            let residual = CYCLES * i64::from(target) - sum * i64::from(QUANTUM);
            assert!(
                (-16..16).contains(&residual),
                "target {target}: residual {residual}"
            );
        }
    }

    #[test]
    fn test_full_target_average_within_one_step() {
        const CYCLES: i64 = 1024;
        let mut quantizer = DitherQuantizer::new();
        let sum: i64 = (0..CYCLES)
            .map(|_| i64::from(quantizer.step_channel(Channel::Red, MAX_INTENSITY)))
            .sum();
        let average = sum * i64::from(QUANTUM) / CYCLES;
        assert!((i64::from(MAX_INTENSITY) - average).abs() <= i64::from(QUANTUM));
    }

    #[test]
    fn test_channels_are_independent() {
        let mut mixed = DitherQuantizer::new();
        let mut red_only = DitherQuantizer::new();
        for _ in 0..100 {
            let duties = mixed.step([1234, 0, 4000]);
            let red = red_only.step_channel(Channel::Red, 1234);
            assert_eq!(duties[Channel::Red.index()], red);
        }
    }

    #[test]
    fn test_out_of_range_target_is_dimmer_than_ceiling() {
        let average = |target: u16| {
            let mut quantizer = DitherQuantizer::new();
            (0..256)
                .map(|_| u32::from(quantizer.step_channel(Channel::Red, target)))
                .sum::<u32>()
        };
        assert!(average(4088) < average(MAX_INTENSITY));
    }

    proptest! {
        #[test]
        fn error_stays_bounded_for_changing_targets(
            targets in proptest::collection::vec(
                (0..=MAX_INTENSITY, 0..=MAX_INTENSITY, 0..=MAX_INTENSITY),
                1..300,
            )
        ) {
            let mut quantizer = DitherQuantizer::new();
            for (r, g, b) in targets {
                quantizer.step([r, g, b]);
                for error in quantizer.errors() {
                    prop_assert!((-16..16).contains(&error));
                }
            }
        }
    }
}
