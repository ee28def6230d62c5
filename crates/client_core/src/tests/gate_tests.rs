use shared::domain::{ArtifactKind, ArtifactLink};

use super::*;
use crate::test_support::{Journal, RecordingOutput};

fn populated_output() -> RecordingOutput {
    let mut output = RecordingOutput::new(Journal::default());
    output.results_visible = true;
    output.summary = "{\n  \"old\": true\n}".into();
    output.video = Some("/reports/old/processed.mp4".into());
    output.links.push(ArtifactLink {
        kind: ArtifactKind::Histogram,
        href: "/reports/old/vel_hist.png".into(),
    });
    output
}

#[test]
fn lock_disables_submit_and_clears_previous_result() {
    let mut output = populated_output();
    UiGate::new(&mut output).lock();

    assert!(!output.submit_enabled);
    assert!(output.progress_visible);
    assert!(!output.results_visible);
    assert!(output.summary.is_empty());
    assert!(output.video.is_none());
    assert!(output.links.is_empty());
}

#[test]
fn unlock_restores_submit_without_touching_results() {
    let mut output = populated_output();
    {
        let mut gate = UiGate::new(&mut output);
        gate.lock();
        gate.unlock();
    }
    assert!(output.submit_enabled);
    assert!(!output.progress_visible);
    assert!(!output.results_visible);

    output.results_visible = true;
    UiGate::new(&mut output).unlock();
    assert!(output.results_visible);
}
