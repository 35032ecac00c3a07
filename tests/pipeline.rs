//! End-to-end runs through the public API.

use std::io::Write;
use vad_segment::classifier::{self, EnergyClassifier, ScriptedClassifier};
use vad_segment::decoder;
use vad_segment::processor::SegmentExtractor;
use vad_segment::{ErrorKind, Pipeline, PipelineConfig, Signal};

/// Silence with bursts of a 0.5 amplitude square wave over the given sample ranges
fn bursts(len: usize, voiced: &[(usize, usize)]) -> Vec<f32> {
    (0..len)
        .map(|i| {
            if voiced.iter().any(|&(a, b)| i >= a && i < b) {
                if i % 2 == 0 { 0.5 } else { -0.5 }
            } else {
                0.0
            }
        })
        .collect()
}

#[test]
fn energy_classifier_finds_burst() {
    // Frames at 0, 120, ..., 1560; burst covers frames starting 480..=720
    let samples = bursts(1800, &[(480, 960)]);
    let mut pipeline = Pipeline::new(PipelineConfig::default(), EnergyClassifier::default()).unwrap();

    let output = pipeline.run_samples(&samples).unwrap();
    let segments: Vec<_> = output.segments.segments().collect();

    assert_eq!(segments.len(), 1);
    // Frame at 360 already overlaps the burst by 120 samples
    assert_eq!(segments[0].start, 360);
    assert_eq!(segments[0].end, 960);
}

#[test]
fn voice_to_the_end_closes_at_last_sample() {
    let samples = bursts(1200, &[(600, 1200)]);
    let mut pipeline = Pipeline::new(PipelineConfig::default(), EnergyClassifier::default()).unwrap();

    let output = pipeline.run_samples(&samples).unwrap();
    assert_eq!(output.segments.as_flat().last(), Some(&1199));
}

#[test]
fn decimated_input_uses_target_domain_indices() {
    // 16 kHz input, 8 kHz target: indices refer to the decimated signal
    let config = PipelineConfig::default().with_rates(16000, 8000);
    let samples = bursts(2400, &[(0, 2400)]);
    let signal = Signal::new(samples, 16000).unwrap();

    let output = Pipeline::new(config, EnergyClassifier::default())
        .unwrap()
        .run(&signal)
        .unwrap();

    assert_eq!(output.resampled.len(), 1200);
    assert_eq!(output.segments.as_flat(), &[0, 1199]);
    assert_eq!(output.stats.input_samples, 2400);
    assert_eq!(output.stats.resampled_samples, 1200);
}

#[test]
fn classifier_failure_yields_no_segments() {
    let classifier = ScriptedClassifier::new(vec![true; 8]).failing_at(3, 17);
    let mut pipeline = Pipeline::new(PipelineConfig::default(), classifier).unwrap();

    let err = pipeline.run_samples(&[0.0; 1200]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Classifier);
    assert_eq!(err.classifier_status(), Some(17));
}

#[test]
fn status_code_classifier_adapter() {
    // A classifier that speaks in (status, decision) pairs
    let mut calls = 0;
    let adapter = classifier::from_fn(move |_frame| {
        calls += 1;
        let status = if calls == 2 { 5 } else { classifier::STATUS_NORMAL };
        classifier::decision_from_status(status, true)
    });
    let mut pipeline = Pipeline::new(PipelineConfig::default(), adapter).unwrap();

    let err = pipeline.run_samples(&[0.0; 600]).unwrap_err();
    assert_eq!(err.classifier_status(), Some(5));
}

#[test]
fn frame_longer_than_signal_is_rejected() {
    let mut pipeline = Pipeline::new(
        PipelineConfig::default().with_frame(480, 240),
        ScriptedClassifier::new(vec![true]),
    )
    .unwrap();

    let err = pipeline.run_samples(&[0.0; 479]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedConfiguration);
    assert_eq!(pipeline.classifier().calls(), 0);
}

#[test]
fn segment_lists_are_well_formed() {
    // Deterministic pseudo-random decision sequences
    let mut state: u32 = 0x2545_f491;
    let extractor = SegmentExtractor::new();

    for n in 1..64 {
        let decisions: Vec<bool> = (0..n)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 17;
                state ^= state << 5;
                state & 1 == 1
            })
            .collect();
        let starts: Vec<usize> = (0..n).map(|i| i * 120).collect();
        let signal_len = (n - 1) * 120 + 240;

        let list = extractor.extract_parts(&decisions, &starts, signal_len).unwrap();
        let flat = list.as_flat();

        assert_eq!(flat.len() % 2, 0);
        assert!(flat.len() <= 2 * n);
        assert!(flat.windows(2).all(|w| w[0] <= w[1]));
        assert!(flat.iter().all(|&b| b < signal_len));

        // One segment per maximal voiced run
        let runs = decisions
            .iter()
            .enumerate()
            .filter(|&(i, &d)| d && (i == 0 || !decisions[i - 1]))
            .count();
        assert_eq!(list.len(), runs);
    }
}

#[test]
fn text_file_round_trip() {
    let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
    for sample in bursts(600, &[(240, 600)]) {
        writeln!(file, "{}", sample).unwrap();
    }

    let signal = decoder::from_file(file.path(), 8000)
        .unwrap()
        .read_signal()
        .unwrap();
    assert_eq!(signal.len(), 600);

    let output = Pipeline::new(PipelineConfig::default(), EnergyClassifier::default())
        .unwrap()
        .run(&signal)
        .unwrap();
    assert_eq!(output.segments.as_flat(), &[120, 599]);
}
