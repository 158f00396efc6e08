//! End-to-end checks over real files: effect generation, codec round trips
//! and track assembly.

use jingle_core::dsp::wav;
use jingle_core::{Effect, MixRequest, RenderConfig, SampleBuffer, assemble, generate_all};
use tempfile::tempdir;

fn seeded() -> RenderConfig {
    RenderConfig {
        seed: Some(2024),
        ..RenderConfig::default()
    }
}

#[test]
fn file_round_trip_stays_within_quantization() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ramp.wav");

    let data: Vec<f64> = (0..2000).map(|i| (i as f64 / 1000.0) - 1.0).collect();
    let original = SampleBuffer::new(data, 22050);
    wav::write(&path, &original).unwrap();

    let back = wav::try_read(&path).unwrap();
    assert_eq!(back.sample_rate(), 22050);
    assert_eq!(back.len(), original.len());
    for (i, (a, b)) in original.samples().iter().zip(back.samples()).enumerate() {
        assert!((a - b).abs() <= 2.0 / 32767.0, "sample {i}: {a} vs {b}");
    }
}

#[test]
fn generates_all_five_effects() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("public").join("audio");

    let written = generate_all(&out, &seeded(), &Effect::ALL).unwrap();
    assert_eq!(written.len(), 5);

    for (effect, expected_len) in [
        (Effect::Intro, 176400),
        (Effect::Outro, 176400),
        (Effect::Success, 44100),
        (Effect::Error, 26460),
        (Effect::Swoosh, 44100),
    ] {
        let path = out.join(effect.file_name());
        assert!(path.exists(), "{} missing", path.display());
        let b = wav::try_read(&path).unwrap();
        assert_eq!(b.len(), expected_len, "{effect}");
        assert_eq!(b.sample_rate(), 44100);
        // normalized to 0.9 before 16-bit quantization
        assert!(b.peak() > 0.89 && b.peak() <= 0.9, "{effect} peak {}", b.peak());
    }
}

#[test]
fn seed_reproduces_the_swoosh_file() {
    let a = tempdir().unwrap();
    let b = tempdir().unwrap();
    generate_all(a.path(), &seeded(), &[Effect::Swoosh]).unwrap();
    generate_all(b.path(), &seeded(), &[Effect::Swoosh]).unwrap();

    let fa = std::fs::read(a.path().join("swoosh.wav")).unwrap();
    let fb = std::fs::read(b.path().join("swoosh.wav")).unwrap();
    assert_eq!(fa, fb);
}

#[test]
fn assembles_generated_segments() {
    let dir = tempdir().unwrap();
    let config = seeded();
    generate_all(dir.path(), &config, &[Effect::Intro, Effect::Outro]).unwrap();

    // two seconds of speech-like tone recorded at a different rate
    let speech_path = dir.path().join("speech.wav");
    let speech = SampleBuffer::new(
        (0..32000)
            .map(|i| 0.3 * (i as f64 * 0.05).sin())
            .collect(),
        16000,
    );
    wav::write(&speech_path, &speech).unwrap();

    let request = MixRequest {
        intro: dir.path().join("intro.wav"),
        speech: speech_path,
        outro: dir.path().join("outro.wav"),
        output: dir.path().join("episode.wav"),
    };
    let report = assemble(&request, &config).unwrap();
    assert!(report.missing.is_empty());
    assert_eq!(report.samples, 485100);
    assert!((report.duration() - 11.0).abs() < 1e-9);

    let track = wav::try_read(&request.output).unwrap();
    assert_eq!(track.len(), 485100);
    assert!(track.peak() > 0.94 && track.peak() <= 0.95, "peak {}", track.peak());
}

#[test]
fn missing_inputs_degrade_to_silence() {
    let dir = tempdir().unwrap();
    let intro = dir.path().join("intro.wav");
    wav::write(&intro, &SampleBuffer::new(vec![0.5; 44100], 44100)).unwrap();

    let garbage = dir.path().join("speech.wav");
    std::fs::write(&garbage, b"not a wav file").unwrap();

    let request = MixRequest {
        intro,
        speech: garbage.clone(),
        outro: dir.path().join("nowhere.wav"),
        output: dir.path().join("out.wav"),
    };
    let report = assemble(&request, &RenderConfig::default()).unwrap();
    assert_eq!(report.missing.len(), 2);
    assert!(report.missing.contains(&garbage));

    // 1 s intro plus two 0.5 s gaps
    let track = wav::try_read(&request.output).unwrap();
    assert_eq!(track.len(), 88200);
}

#[test]
fn read_outcome_marks_missing_files() {
    let dir = tempdir().unwrap();
    let outcome = wav::read(&dir.path().join("absent.wav"), 44100);
    assert!(outcome.is_missing());
    assert_eq!(outcome.sample_rate(), 44100);
    assert!(outcome.into_buffer().is_empty());
}

#[test]
fn config_file_drives_assembly() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("render.json");
    std::fs::write(&config_path, r#"{ "sample_rate": 8000, "gap_seconds": 0.25 }"#).unwrap();
    let config = RenderConfig::load(&config_path).unwrap();

    let seg = dir.path().join("seg.wav");
    wav::write(&seg, &SampleBuffer::new(vec![0.1; 16000], 16000)).unwrap();

    let request = MixRequest {
        intro: seg.clone(),
        speech: seg.clone(),
        outro: seg,
        output: dir.path().join("out.wav"),
    };
    let report = assemble(&request, &config).unwrap();
    // three 1 s segments and two 0.25 s gaps at 8 kHz
    assert_eq!(report.samples, 28000);
    assert_eq!(report.sample_rate, 8000);
}

#[test]
fn zero_rate_header_degrades_instead_of_panicking() {
    let dir = tempdir().unwrap();
    let speech = dir.path().join("speech.wav");
    let mut bytes = wav::encode_wav(&SampleBuffer::new(vec![0.25; 800], 8000)).unwrap();
    // sample rate and byte rate of the fmt chunk
    bytes[24..32].fill(0);
    std::fs::write(&speech, bytes).unwrap();

    let outcome = wav::read(&speech, 44100);
    assert!(outcome.is_missing());

    let intro = dir.path().join("intro.wav");
    wav::write(&intro, &SampleBuffer::new(vec![0.5; 44100], 44100)).unwrap();
    let request = MixRequest {
        intro: intro.clone(),
        speech: speech.clone(),
        outro: intro,
        output: dir.path().join("out.wav"),
    };
    let report = assemble(&request, &RenderConfig::default()).unwrap();
    assert_eq!(report.missing, vec![speech]);
    // two 1 s segments and two 0.5 s gaps
    assert_eq!(report.samples, 132300);
}
