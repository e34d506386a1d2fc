#[allow(unused_imports)]
use super::*;

fn unshaped(tone_hz: f64, i: usize, sample_rate: u32) -> i16 {
    let t = i as f64 * (1.0 / sample_rate as f64);
    ((TAU * tone_hz * t).sin() * FULL_SCALE) as i16
}

#[test]
fn test_plain_tone_sample_count() {
    let mut arena = SampleArena::new();
    for &(duration_ms, rate) in &[(1000u32, 200u32), (250, 1000), (50, 44100), (1, 999), (0, 44100), (1999, 7)] {
        let wave = generate_sine_tone(&mut arena, 440.0, duration_ms, rate);
        let expected = (duration_ms as u64 * rate as u64 / 1000) as u32;
        assert_eq!(wave.count, expected, "duration {}ms at {} Hz", duration_ms, rate);
        assert_eq!(arena.samples(&wave).len(), expected as usize);
        assert_eq!(wave.channels, 1);
        assert_eq!(wave.sample_rate, rate);
    }
}

#[test]
fn test_plain_tone_truncates_fractional_samples() {
    let mut arena = SampleArena::new();
    // 1ms at 1500 Hz is 1.5 samples
    let wave = generate_sine_tone(&mut arena, 440.0, 1, 1500);
    assert_eq!(wave.count, 1);
}

#[test]
fn test_plain_tone_matches_sine() {
    let mut arena = SampleArena::new();
    let wave = generate_sine_tone(&mut arena, 440.0, 100, 44100);
    let samples = arena.samples(&wave);
    for (i, &s) in samples.iter().enumerate().take(500) {
        assert_eq!(s, unshaped(440.0, i, 44100));
    }
}

#[test]
fn test_default_sample_rate() {
    let mut arena = SampleArena::new();
    let wave = generate_sine_tone(&mut arena, 10.0, 1000, DEFAULT_SAMPLE_RATE);
    assert_eq!(wave.count, 200);
    assert_eq!(ToneParams::new(440.0, 1.0, 0.0, 0.0).sample_rate, 200);
}

#[test]
fn test_samples_stay_in_symmetric_range() {
    let mut arena = SampleArena::new();
    let plain = generate_sine_tone(&mut arena, 1000.0, 500, 4000);
    let shaped = generate_sine_tone_with_ad(&mut arena, 1234.5, 0.5, 0.1, 0.2, 48000);
    for wave in [&plain, &shaped] {
        assert!(
            arena.samples(wave).iter().all(|&s| (-32767..=32767).contains(&s)),
            "sample out of range"
        );
    }
}

#[test]
fn test_short_sine_scenario() {
    let mut arena = SampleArena::new();
    let wave = generate_sine_tone_with_ad(&mut arena, 440.0, 0.25, 0.1, 0.11, 1000);
    assert_eq!(wave.count, 250);
    assert_eq!(wave.channels, 1);
    assert_eq!(wave.sample_rate, 1000);

    let samples = arena.samples(&wave);
    // Attack factor is 0 at t = 0
    assert_eq!(samples[0], 0);
    // t = 0.125s lies in the sustain window (0.1 .. 0.14)
    assert_eq!(samples[125], unshaped(440.0, 125, 1000));
}

#[test]
fn test_sustain_region_is_unshaped() {
    let mut arena = SampleArena::new();
    let rate = 8000;
    let wave = generate_sine_tone_with_ad(&mut arena, 440.0, 1.0, 0.25, 0.25, rate);
    let samples = arena.samples(&wave);
    for i in 2100..5900 {
        assert_eq!(samples[i], unshaped(440.0, i, rate), "index {}", i);
    }
}

#[test]
fn test_attack_ramp_non_decreasing() {
    let rate = 1000;
    let (duration, attack, decay) = (1.0, 0.3, 0.2);
    let mut previous = -1.0;
    for i in 0..300 {
        let t = i as f64 / rate as f64;
        let factor = EnvelopePolicy::AttackFirst.factor(t, duration, attack, decay);
        assert!(factor >= previous, "attack factor dropped at t={}", t);
        assert!((0.0..1.0).contains(&factor));
        previous = factor;
    }
    assert_eq!(EnvelopePolicy::AttackFirst.factor(0.0, duration, attack, decay), 0.0);
}

#[test]
fn test_attack_samples_bounded_by_unshaped() {
    let mut arena = SampleArena::new();
    let rate = 8000;
    let wave = generate_sine_tone_with_ad(&mut arena, 440.0, 1.0, 0.5, 0.1, rate);
    let samples = arena.samples(&wave);
    for i in 0..4000 {
        let reference = unshaped(440.0, i, rate);
        assert!(samples[i].unsigned_abs() <= reference.unsigned_abs(), "index {}", i);
    }
}

#[test]
fn test_decay_ramp_decreasing() {
    let rate = 1000;
    let (duration, attack, decay) = (1.0, 0.1, 0.4);
    let mut previous = 2.0;
    for i in 601..1000 {
        let t = i as f64 / rate as f64;
        let factor = EnvelopePolicy::AttackFirst.factor(t, duration, attack, decay);
        assert!(factor < previous, "decay factor not decreasing at t={}", t);
        assert!(factor > 0.0 && factor < 1.0);
        previous = factor;
    }
    let near_end = EnvelopePolicy::AttackFirst.factor(0.999, duration, attack, decay);
    assert!(near_end < 0.01);
}

#[test]
fn test_attack_wins_when_windows_overlap() {
    // attack 0.2 + decay 0.2 > duration 0.3: t = 0.15 is in both windows
    let factor = EnvelopePolicy::AttackFirst.factor(0.15, 0.3, 0.2, 0.2);
    assert!((factor - 0.75).abs() < 1e-12);
}

#[test]
fn test_continuous_envelope_takes_minimum() {
    let factor = EnvelopePolicy::Continuous.factor(0.15, 0.3, 0.2, 0.2);
    // attack 0.75, decay (0.3 - 0.15) / 0.2 = 0.75
    assert!((factor - 0.75).abs() < 1e-12);

    let factor = EnvelopePolicy::Continuous.factor(0.19, 0.3, 0.2, 0.2);
    // attack 0.95, decay 0.55
    assert!((factor - 0.55).abs() < 1e-9);

    assert_eq!(EnvelopePolicy::Continuous.factor(0.5, 1.0, 0.0, 0.0), 1.0);
    assert_eq!(EnvelopePolicy::Continuous.factor(0.5, 1.0, 0.1, 0.1), 1.0);
}

#[test]
fn test_zero_length_ramps_are_unshaped() {
    let mut arena = SampleArena::new();
    let shaped = generate_sine_tone_with_ad(&mut arena, 440.0, 0.5, 0.0, 0.0, 8000);
    let plain = generate_sine_tone(&mut arena, 440.0, 500, 8000);
    assert_eq!(arena.samples(&shaped), arena.samples(&plain));
}

#[test]
fn test_padding_adds_silence() {
    let mut arena = SampleArena::new();
    let params = ToneParams::new(440.0, 0.25, 0.1, 0.11)
        .with_sample_rate(1000)
        .with_padding(0.1, 0.05);
    let wave = generate_tone(&mut arena, &params);
    assert_eq!(wave.count, 100 + 250 + 50);

    let samples = arena.samples(&wave);
    assert!(samples[..100].iter().all(|&s| s == 0));
    assert!(samples[350..].iter().all(|&s| s == 0));
    assert_eq!(samples[100 + 125], unshaped(440.0, 125, 1000));
}

#[test]
fn test_generate_tone_uses_envelope_policy() {
    let mut arena = SampleArena::new();
    let base = ToneParams::new(50.0, 0.3, 0.2, 0.2).with_sample_rate(1000);
    let first = generate_tone(&mut arena, &base);
    let continuous = generate_tone(&mut arena, &base.with_envelope(EnvelopePolicy::Continuous));
    // Only the overlapping region (0.1 .. 0.2) differs
    assert_eq!(arena.samples(&first)[..100], arena.samples(&continuous)[..100]);
    assert_ne!(arena.samples(&first)[100..200], arena.samples(&continuous)[100..200]);
}

#[test]
fn test_ad_sample_count_not_short_by_one() {
    let mut arena = SampleArena::new();
    for &(duration_s, expected) in &[(0.7f32, 700u32), (0.9, 900), (2.3, 2300), (0.25, 250)] {
        let wave = generate_sine_tone_with_ad(&mut arena, 440.0, duration_s, 0.0, 0.0, 1000);
        assert_eq!(wave.count, expected, "duration {}s", duration_s);
    }
}

#[test]
fn test_padding_count_not_short_by_one() {
    let mut arena = SampleArena::new();
    let params = ToneParams::new(440.0, 0.9, 0.0, 0.0)
        .with_sample_rate(1000)
        .with_padding(0.7, 2.3);
    let wave = generate_tone(&mut arena, &params);
    assert_eq!(wave.count, 700 + 900 + 2300);
}

#[test]
fn test_ramps_sample_windows() {
    let ramps = Ramps::new(1.0, 0.3, 0.2, 1000);
    assert_eq!(ramps.count, 1000);
    assert_eq!(ramps.attack_count, 300);
    assert_eq!(ramps.decay_count, 200);
}

#[test]
fn test_logarithmic_attack_rises() {
    let ramps = Ramps::new(1.0, 0.3, 0.2, 1000);
    let policy = EnvelopePolicy::Logarithmic;
    let mut previous = 0.0;
    for i in 0..300 {
        let gain = policy.gain(i, i as f64 / 1000.0, &ramps);
        assert!(gain >= previous, "attack gain dropped at sample {}", i);
        assert!((0.0..=1.0).contains(&gain));
        previous = gain;
    }
    assert!((policy.gain(0, 0.0, &ramps) - 0.01).abs() < 1e-9);
    assert!((policy.gain(299, 0.299, &ramps) - 1.0).abs() < 1e-9);
}

#[test]
fn test_logarithmic_decay_falls() {
    let ramps = Ramps::new(1.0, 0.3, 0.2, 1000);
    let policy = EnvelopePolicy::Logarithmic;
    let mut previous = 1.0;
    for i in 800..1000 {
        let gain = policy.gain(i, i as f64 / 1000.0, &ramps);
        assert!(gain <= previous, "decay gain rose at sample {}", i);
        assert!((0.0..=1.0).contains(&gain));
        previous = gain;
    }
    assert!((policy.gain(800, 0.8, &ramps) - 1.0).abs() < 1e-9);
    assert!((policy.gain(999, 0.999, &ramps) - 0.01).abs() < 1e-9);
    // Sustain between the windows
    assert_eq!(policy.gain(500, 0.5, &ramps), 1.0);
}

#[test]
fn test_logarithmic_single_sample_ramp_is_full_scale() {
    let ramps = Ramps::new(1.0, 0.001, 0.001, 1000);
    assert_eq!(ramps.attack_count, 1);
    assert!((EnvelopePolicy::Logarithmic.gain(0, 0.0, &ramps) - 1.0).abs() < 1e-9);
}

#[test]
fn test_logarithmic_continuous_form_matches_endpoints() {
    let policy = EnvelopePolicy::Logarithmic;
    assert!((policy.factor(0.0, 1.0, 0.3, 0.2) - 0.01).abs() < 1e-9);
    assert_eq!(policy.factor(0.5, 1.0, 0.3, 0.2), 1.0);
    assert!((policy.factor(0.8, 1.0, 0.3, 0.2) - 1.0).abs() < 1e-9);
}

#[test]
fn test_logarithmic_tone_bounded_by_unshaped() {
    let mut arena = SampleArena::new();
    let rate = 8000;
    let params = ToneParams::new(440.0, 1.0, 0.3, 0.3)
        .with_sample_rate(rate)
        .with_envelope(EnvelopePolicy::Logarithmic);
    let wave = generate_tone(&mut arena, &params);
    let samples = arena.samples(&wave);
    assert_eq!(samples.len(), 8000);
    for (i, &s) in samples.iter().enumerate() {
        assert!(s.unsigned_abs() <= unshaped(440.0, i, rate).unsigned_abs(), "index {}", i);
    }
    // Sustain is untouched
    assert_eq!(samples[4000], unshaped(440.0, 4000, rate));
}
