//! Integration tests for the vocal analysis engine

use encore_dsp::{
    analyze_frame, AudioFrame, CollectSink, Engine, EngineCommand, EngineConfig, EngineMode,
    GuideMode, Scale, TickStatus, Weights,
};
use std::path::PathBuf;

/// Synthesize a pure tone split into analysis frames
fn tone_frames(
    frequency: f32,
    sample_rate: u32,
    frame_len: usize,
    count: usize,
    amplitude: f32,
) -> Vec<AudioFrame> {
    let mut frames = Vec::with_capacity(count);
    for frame_index in 0..count {
        let offset = frame_index * frame_len;
        let samples: Vec<f32> = (0..frame_len)
            .map(|i| {
                let t = (offset + i) as f32 / sample_rate as f32;
                amplitude * (2.0 * std::f32::consts::PI * frequency * t).sin()
            })
            .collect();
        frames.push(AudioFrame::new(samples, sample_rate).expect("valid frame"));
    }
    frames
}

/// Load a WAV file and return (samples, sample_rate)
fn load_wav(path: &str) -> Result<(Vec<f32>, u32), Box<dyn std::error::Error>> {
    let mut reader = hound::WavReader::open(path)?;
    let spec = reader.spec();

    let samples: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader.samples::<f32>().collect::<Result<Vec<_>, _>>()?,
        hound::SampleFormat::Int => {
            let max_value = (1 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|s| s as f32 / max_value))
                .collect::<Result<Vec<_>, _>>()?
        }
    };

    let mono_samples = if spec.channels == 2 {
        samples
            .chunks(2)
            .map(|chunk| (chunk[0] + chunk[1]) / 2.0)
            .collect()
    } else {
        samples
    };

    Ok((mono_samples, spec.sample_rate))
}

/// Write a mono 16-bit sine fixture and return its path
fn write_tone_fixture(filename: &str, frequency: f32, sample_rate: u32, seconds: f32) -> PathBuf {
    let path = std::env::temp_dir().join(filename);
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(&path, spec).expect("create fixture");
    let total = (sample_rate as f32 * seconds) as usize;
    for i in 0..total {
        let t = i as f32 / sample_rate as f32;
        let sample = 0.5 * (2.0 * std::f32::consts::PI * frequency * t).sin();
        writer
            .write_sample((sample * i16::MAX as f32) as i16)
            .expect("write sample");
    }
    writer.finalize().expect("finalize fixture");
    path
}

#[test]
fn test_full_pipeline_on_synthesized_tone() {
    // 441 Hz lands exactly on lag 100 at 44.1 kHz
    let frames = tone_frames(441.0, 44100, 2048, 8, 0.5);
    let mut engine = Engine::new(EngineConfig::default()).expect("valid config");
    let mut source = frames.into_iter();
    let mut sink = CollectSink::new();

    engine.start();
    let best = engine.run(&mut source, &mut sink);

    assert_eq!(sink.outputs.len(), 8);
    for output in &sink.outputs {
        assert_eq!(output.level, 1.0, "amplitude 0.5 saturates the level");
        assert!(
            output.pitch_quality > 0.9,
            "441 Hz sits near the A semitone center, got {:.3}",
            output.pitch_quality
        );
        assert_eq!(output.key_quality, 1.0, "A is in C major");
        assert!(output.duck_strength > 0.9);
        // Share mode ducks hard on a strong in-key performance
        assert!(output.target_volume < 0.55 && output.target_volume >= 0.5);
    }
    // Session scores are non-decreasing and the run finalized a best score
    let sessions: Vec<f32> = sink.outputs.iter().map(|o| o.session_score).collect();
    assert!(sessions.windows(2).all(|w| w[1] >= w[0]));
    assert!(best > 0.0);
    assert_eq!(sink.last_best_score, Some(best));
}

#[test]
fn test_off_scale_tone_gets_soft_key_penalty() {
    // C#4 (~277 Hz) is not in C major
    let frames = tone_frames(277.18, 44100, 4096, 4, 0.5);
    let config = EngineConfig::default();
    for frame in &frames {
        let analysis = analyze_frame(frame, &config);
        assert!(analysis.pitch_quality > 0.8);
        assert_eq!(analysis.key_quality, 0.4);
    }
}

#[test]
fn test_scale_change_applies_at_tick_boundary() {
    let frames = tone_frames(277.18, 44100, 4096, 2, 0.5);
    let mut engine = Engine::new(EngineConfig::default()).expect("valid config");
    let mut source = frames.into_iter();
    let mut sink = CollectSink::new();

    engine.start();
    engine.tick(&mut source, &mut sink);
    assert_eq!(sink.outputs[0].key_quality, 0.4);

    // Db major contains C#
    let db_major = Scale::major(1);
    engine.queue_command(EngineCommand::SetScale(db_major));
    engine.tick(&mut source, &mut sink);
    assert_eq!(sink.outputs[1].key_quality, 1.0);
}

#[test]
fn test_mode_switch_changes_guide_volume_mid_run() {
    let frames = tone_frames(441.0, 44100, 2048, 3, 0.5);
    let mut engine = Engine::new(EngineConfig::default()).expect("valid config");
    let mut source = frames.into_iter();
    let mut sink = CollectSink::new();

    engine.start();
    engine.tick(&mut source, &mut sink);
    engine.queue_command(EngineCommand::SetMode(GuideMode::Assist));
    engine.tick(&mut source, &mut sink);
    engine.queue_command(EngineCommand::SetMode(GuideMode::Ghost));
    engine.tick(&mut source, &mut sink);

    assert!(sink.volumes[0] < 1.0, "share mode ducks a strong performance");
    assert_eq!(sink.volumes[1], 0.5, "assist holds a constant volume");
    assert_eq!(sink.volumes[2], 0.0, "ghost silences the guide");
}

#[test]
fn test_best_score_across_two_runs() {
    let mut engine = Engine::new(EngineConfig::default()).expect("valid config");
    let mut sink = CollectSink::new();

    // Strong first run
    let mut source = tone_frames(441.0, 44100, 2048, 10, 0.5).into_iter();
    engine.start();
    let first_best = engine.run(&mut source, &mut sink);
    assert!(first_best > 0.0);

    // Weak second run must not lower the best
    let mut source = tone_frames(441.0, 44100, 2048, 2, 0.5).into_iter();
    engine.start();
    let second_best = engine.run(&mut source, &mut sink);
    assert_eq!(second_best, first_best);
}

#[test]
fn test_resume_continues_session_score() {
    let mut engine = Engine::new(EngineConfig::default()).expect("valid config");
    let mut sink = CollectSink::new();

    let mut source = tone_frames(441.0, 44100, 2048, 3, 0.5).into_iter();
    engine.start();
    engine.tick(&mut source, &mut sink);
    engine.stop();
    let session_at_pause = engine.scores().session_score();
    assert!(session_at_pause > 0.0);

    // Stopped engine ignores frames
    assert_eq!(engine.tick(&mut source, &mut sink), TickStatus::Inactive);

    engine.resume();
    engine.tick(&mut source, &mut sink);
    assert!(engine.scores().session_score() > session_at_pause);
}

#[test]
fn test_manual_weights_soften_ducking() {
    let frames = tone_frames(441.0, 44100, 2048, 2, 0.5);
    let config = EngineConfig::default();
    let analysis = analyze_frame(&frames[0], &config);

    let full = encore_dsp::duck_strength(&analysis, &Weights::unity());
    let softened = encore_dsp::duck_strength(&analysis, &Weights::from_percent(0, 0, 100));
    assert!(softened < full);
    assert!(softened >= 0.25 * full, "factors bottom out at 0.5 each");

    // Auto mode gives full sensitivity regardless of queued weights
    let mut engine = Engine::new(config).expect("valid config");
    engine.queue_command(EngineCommand::SetWeights(Weights::from_percent(0, 0, 100)));
    engine.queue_command(EngineCommand::SetEngineMode(EngineMode::Auto));
    let mut source = frames.into_iter();
    let mut sink = CollectSink::new();
    engine.start();
    engine.tick(&mut source, &mut sink);
    assert!((sink.outputs[0].duck_strength - full).abs() < 1e-6);
}

#[test]
fn test_wav_fixture_round_trip() {
    let path = write_tone_fixture("encore_dsp_tone_441.wav", 441.0, 44100, 0.5);
    let (samples, sample_rate) = load_wav(path.to_str().unwrap()).expect("load fixture");
    assert_eq!(sample_rate, 44100);

    let config = EngineConfig::default();
    let mut analyzed = 0;
    for chunk in samples.chunks(2048) {
        if chunk.len() < 2048 {
            break;
        }
        let frame = AudioFrame::new(chunk.to_vec(), sample_rate).expect("valid frame");
        let analysis = analyze_frame(&frame, &config);
        assert!(analysis.level > 0.9);
        assert!(analysis.pitch_quality > 0.8);
        assert_eq!(analysis.key_quality, 1.0);
        analyzed += 1;
    }
    assert!(analyzed >= 10);
}

#[test]
fn test_tick_output_serializes_for_display() {
    let frames = tone_frames(441.0, 44100, 2048, 1, 0.5);
    let mut engine = Engine::new(EngineConfig::default()).expect("valid config");
    let mut source = frames.into_iter();
    let mut sink = CollectSink::new();

    engine.start();
    engine.tick(&mut source, &mut sink);

    let json = serde_json::to_string(&sink.outputs[0]).expect("serialize");
    assert!(json.contains("\"duck_strength\""));
    assert!(json.contains("\"target_volume\""));

    let back: encore_dsp::TickOutput = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, sink.outputs[0]);
}

#[test]
fn test_byte_frames_match_float_frames_on_silence() {
    let frame = AudioFrame::from_byte_samples(&[128u8; 2048], 44100).expect("valid frame");
    let analysis = analyze_frame(&frame, &EngineConfig::default());
    assert_eq!(analysis.level, 0.0);
    assert_eq!(analysis.pitch_quality, 0.0);
    assert_eq!(analysis.key_quality, 0.0);
}
