mod common;

mod tests {
    use ring_indicator_effects::color::{Hsb, OFF, Rgb};
    use ring_indicator_effects::effect::{Effect, RunningLightEffect};
    use ring_indicator_effects::{LedStrip, PixelBuffer, RingTopology};

    use super::common::{Journal, LED_COUNT, RecordingOutput, is_all_off, lit, strip};

    const DIM_RED: Rgb = Rgb { r: 51, g: 0, b: 0 };

    fn minutes(strip: &PixelBuffer<RecordingOutput, LED_COUNT>, topology: &RingTopology) -> Vec<Rgb> {
        topology
            .minute_indices()
            .iter()
            .map(|&index| strip.pixel(usize::from(index)))
            .collect()
    }

    #[test]
    fn test_activate_lights_first_minute() {
        let journal = Journal::default();
        let mut strip = strip(&journal);
        let topology = RingTopology::reference();
        strip.fill(Rgb { r: 9, g: 9, b: 9 });

        let mut effect = RunningLightEffect::new(0.0, 0.2);
        effect.activate(&topology, &mut strip);

        assert_eq!(lit(strip.frame()), vec![13]);
        assert_eq!(strip.pixel(13), DIM_RED);
        assert_eq!(strip.pixel(13), Hsb::new(0.0, 1.0, 0.2).to_rgb());
        assert_eq!(strip.output().flushes(), 1);
        assert!(!strip.is_dirty());
    }

    #[test]
    fn test_tick_moves_light_to_last_position() {
        let journal = Journal::default();
        let mut strip = strip(&journal);
        let topology = RingTopology::reference();

        let mut effect = RunningLightEffect::new(0.0, 0.2);
        effect.activate(&topology, &mut strip);
        effect.tick(&topology, &mut strip);

        let ring = minutes(&strip, &topology);
        assert_eq!(ring[11], DIM_RED);
        assert_eq!(ring[0], OFF);
        assert_eq!(lit(strip.frame()), vec![24]);

        effect.tick(&topology, &mut strip);
        assert_eq!(lit(strip.frame()), vec![23]);
    }

    #[test]
    fn test_full_cycle_returns_to_start() {
        let journal = Journal::default();
        let mut strip = strip(&journal);
        let topology = RingTopology::reference();

        let mut effect = RunningLightEffect::new(200.0, 0.7);
        effect.activate(&topology, &mut strip);
        let after_activate = *strip.frame();

        for tick in 1..=12 {
            effect.tick(&topology, &mut strip);
            if tick < 12 {
                assert_ne!(*strip.frame(), after_activate, "tick {}", tick);
            }
        }
        assert_eq!(*strip.frame(), after_activate);
    }

    #[test]
    fn test_tick_reads_pre_tick_colors() {
        let journal = Journal::default();
        let mut strip = strip(&journal);
        let topology = RingTopology::new(5, &[0, 1, 2, 3], &[], 4).unwrap();

        let colors = [
            Rgb { r: 1, g: 0, b: 0 },
            Rgb { r: 2, g: 0, b: 0 },
            Rgb { r: 3, g: 0, b: 0 },
            Rgb { r: 4, g: 0, b: 0 },
        ];
        for (index, &color) in colors.iter().enumerate() {
            strip.set_pixel(index, color);
        }

        let mut effect = RunningLightEffect::new(0.0, 1.0);
        effect.tick(&topology, &mut strip);

        assert_eq!(
            &strip.frame()[..4],
            &[colors[1], colors[2], colors[3], colors[0]]
        );
    }

    #[test]
    fn test_one_flush_per_tick() {
        let journal = Journal::default();
        let mut strip = strip(&journal);
        let topology = RingTopology::reference();

        let mut effect = RunningLightEffect::new(0.0, 0.2);
        effect.activate(&topology, &mut strip);
        for _ in 0..5 {
            effect.tick(&topology, &mut strip);
        }

        assert_eq!(strip.output().flushes(), 6);
    }

    #[test]
    fn test_single_position_ring_is_still() {
        let journal = Journal::default();
        let mut strip = strip(&journal);
        let topology = RingTopology::new(3, &[2], &[1], 0).unwrap();

        let mut effect = RunningLightEffect::new(120.0, 1.0);
        effect.activate(&topology, &mut strip);
        let after_activate = *strip.frame();
        assert_eq!(lit(&after_activate), vec![2]);

        for _ in 0..7 {
            effect.tick(&topology, &mut strip);
            assert_eq!(*strip.frame(), after_activate);
        }
        assert_eq!(strip.output().flushes(), 8);
    }

    #[test]
    fn test_teardown_switches_everything_off() {
        let journal = Journal::default();
        let mut strip = strip(&journal);
        let topology = RingTopology::reference();
        strip.fill(Rgb { r: 1, g: 2, b: 3 });

        let mut effect = RunningLightEffect::new(0.0, 0.2);
        effect.activate(&topology, &mut strip);
        effect.tick(&topology, &mut strip);
        effect.teardown(&topology, &mut strip);

        assert!(is_all_off(strip.frame()));
        assert!(!strip.is_dirty());
    }
}
