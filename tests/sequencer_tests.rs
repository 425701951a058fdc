mod common;

use common::show::phrase::Script;
use common::show::sequencer::{KeyDown, Sequencer, SequencerState};
use common::{script, AudioCall, FakeAudio, FakeSurface, VisualCall};

fn type_keys(seq: &mut Sequencer, keys: &str, audio: &mut FakeAudio, visual: &mut FakeSurface) {
    for key in keys.chars() {
        seq.on_key_down(key, audio, visual);
        seq.on_key_up(key, audio);
    }
}

#[test]
fn two_note_phrase_plays_then_completes() {
    let mut seq = Sequencer::new(script("AB", &["C4", "D4"]));
    let mut audio = FakeAudio::default();
    let mut visual = FakeSurface::new(2);

    assert_eq!(
        seq.on_key_down('a', &mut audio, &mut visual),
        KeyDown::Advanced { step: 0 }
    );
    assert_eq!(seq.cursor(), 1);
    assert_eq!(
        seq.on_key_down('b', &mut audio, &mut visual),
        KeyDown::Completed {
            step: 1,
            first: true
        }
    );
    assert_eq!(audio.notes(), vec!["C4", "D4"]);
    assert!(seq.state().completed);
    assert!(seq.state().finale_fired);
    assert_eq!(
        visual.calls,
        vec![
            VisualCall::Highlight(0),
            VisualCall::Cue(1),
            VisualCall::Highlight(1),
        ]
    );
}

#[test]
fn matched_prefix_plays_the_melody_prefix() {
    let full = Script::nothing_quite_like_you().unwrap();
    let phrase: String = (0..full.phrase.len())
        .map(|i| full.phrase.get(i).unwrap())
        .collect();
    let melody: Vec<String> = (0..full.melody.len())
        .map(|i| full.melody.get(i).unwrap().name().to_string())
        .collect();

    for k in 0..phrase.len() {
        let mut seq = Sequencer::new(full.clone());
        let mut audio = FakeAudio::default();
        let mut visual = FakeSurface::new(phrase.len());
        type_keys(&mut seq, &phrase[..k].to_lowercase(), &mut audio, &mut visual);
        assert_eq!(seq.cursor(), k);
        assert_eq!(audio.notes(), melody[..k].to_vec());
        assert!(!seq.state().completed);
    }
}

#[test]
fn wrong_keys_keep_progress() {
    let mut seq = Sequencer::new(script("NEON", &["A4", "B4", "C5", "D5"]));
    let mut audio = FakeAudio::default();
    let mut visual = FakeSurface::new(4);
    type_keys(&mut seq, "ne", &mut audio, &mut visual);
    let before = seq.state().clone();
    let calls = audio.calls.len();

    for key in ['x', 'n', 'E', '1', ' ', 'é'] {
        assert_eq!(seq.on_key_down(key, &mut audio, &mut visual), KeyDown::Ignored);
    }
    assert_eq!(seq.state(), &before);
    assert_eq!(audio.calls.len(), calls);

    type_keys(&mut seq, "on", &mut audio, &mut visual);
    assert!(seq.state().completed);
}

#[test]
fn completion_is_idempotent() {
    let mut seq = Sequencer::new(script("AB", &["C4", "D4"]));
    let mut audio = FakeAudio::default();
    let mut visual = FakeSurface::new(2);
    type_keys(&mut seq, "ab", &mut audio, &mut visual);
    let notes = audio.notes().len();

    for key in "abab".chars() {
        assert_eq!(seq.on_key_down(key, &mut audio, &mut visual), KeyDown::Ignored);
    }
    assert_eq!(audio.notes().len(), notes);
    assert_eq!(seq.cursor(), 2);
}

#[test]
fn finale_fires_once_per_session() {
    let mut seq = Sequencer::new(script("AB", &["C4", "D4"]));
    let mut audio = FakeAudio::default();
    let mut visual = FakeSurface::new(2);
    type_keys(&mut seq, "ab", &mut audio, &mut visual);
    seq.reset(&mut audio, &mut visual);
    assert!(seq.state().finale_fired);

    seq.on_key_down('a', &mut audio, &mut visual);
    assert_eq!(
        seq.on_key_down('b', &mut audio, &mut visual),
        KeyDown::Completed {
            step: 1,
            first: false
        }
    );
}

#[test]
fn reset_is_idempotent_from_any_state() {
    let mut audio = FakeAudio::default();
    let mut visual = FakeSurface::new(3);
    for typed in ["", "a", "ab", "abc"] {
        let mut seq = Sequencer::new(script("ABC", &["C4", "D4", "E4"]));
        for key in typed.chars() {
            seq.on_key_down(key, &mut audio, &mut visual);
        }
        seq.reset(&mut audio, &mut visual);
        let once = seq.state().clone();
        seq.reset(&mut audio, &mut visual);
        assert_eq!(seq.state(), &once);
        assert_eq!(
            once,
            SequencerState {
                cursor: 0,
                active_note: None,
                completed: false,
                finale_fired: typed == "abc",
            }
        );
    }
}

#[test]
fn reset_releases_a_held_note_and_cues_first_step() {
    let mut seq = Sequencer::new(script("ABC", &["C4", "D4", "E4"]));
    let mut audio = FakeAudio::default();
    let mut visual = FakeSurface::new(3);
    seq.on_key_down('a', &mut audio, &mut visual);
    visual.calls.clear();

    seq.reset(&mut audio, &mut visual);
    assert_eq!(audio.count(&AudioCall::Release), 1);
    assert_eq!(visual.calls, vec![VisualCall::ResetSteps, VisualCall::Cue(0)]);

    seq.reset(&mut audio, &mut visual);
    assert_eq!(audio.count(&AudioCall::Release), 1);
}

#[test]
fn key_up_releases_only_the_last_matched_key() {
    let mut seq = Sequencer::new(script("ABC", &["C4", "D4", "E4"]));
    let mut audio = FakeAudio::default();
    let mut visual = FakeSurface::new(3);

    seq.on_key_up('a', &mut audio);
    assert!(audio.calls.is_empty());

    seq.on_key_down('a', &mut audio, &mut visual);
    seq.on_key_up('z', &mut audio);
    assert_eq!(seq.state().active_note, Some(0));

    seq.on_key_up('A', &mut audio);
    assert_eq!(seq.state().active_note, None);
    seq.on_key_up('a', &mut audio);
    assert_eq!(audio.count(&AudioCall::Release), 1);
}
