use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;

use super::controller::Player;
use super::engine::{EngineError, PlaybackEngine};

#[derive(Debug, Default)]
struct FakeState {
    opened: Option<PathBuf>,
    running: bool,
    position: Duration,
    total: Duration,
    releases: u32,
    fail_open: bool,
}

/// Scripted engine: tests drive the position by hand.
#[derive(Clone, Default)]
struct FakeEngine(Rc<RefCell<FakeState>>);

impl FakeEngine {
    fn with_total(total: Duration) -> Self {
        let e = Self::default();
        e.0.borrow_mut().total = total;
        e
    }

    fn advance(&self, by: Duration) {
        self.0.borrow_mut().position += by;
    }

    fn fail_next_open(&self) {
        self.0.borrow_mut().fail_open = true;
    }
}

impl PlaybackEngine for FakeEngine {
    fn open(&mut self, path: &Path) -> Result<(), EngineError> {
        let mut s = self.0.borrow_mut();
        if s.fail_open {
            s.fail_open = false;
            return Err(EngineError::Open {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
            });
        }
        s.opened = Some(path.to_path_buf());
        s.position = Duration::ZERO;
        Ok(())
    }

    fn start(&mut self) {
        self.0.borrow_mut().running = true;
    }

    fn pause(&mut self) {
        self.0.borrow_mut().running = false;
    }

    fn resume(&mut self) {
        self.0.borrow_mut().running = true;
    }

    fn position(&self) -> Duration {
        self.0.borrow().position
    }

    fn duration(&self) -> Duration {
        self.0.borrow().total
    }

    fn release(&mut self) {
        let mut s = self.0.borrow_mut();
        s.opened = None;
        s.running = false;
        s.releases += 1;
    }
}

fn secs(n: u64) -> Duration {
    Duration::from_secs(n)
}

#[test]
fn play_starts_session_at_zero() {
    let engine = FakeEngine::with_total(secs(10));
    let mut player = Player::new(engine.clone());

    player.play(Path::new("a.mp3"), 3).unwrap();

    let s = player.session();
    assert_eq!(s.index, Some(3));
    assert!(s.playing);
    assert_eq!(s.elapsed, Duration::ZERO);
    assert_eq!(s.total, secs(10));
    assert_eq!(s.progress, 0.0);
    assert!(engine.0.borrow().running);
}

#[test]
fn poll_updates_progress_within_bounds() {
    let engine = FakeEngine::with_total(secs(10));
    let mut player = Player::new(engine.clone());
    player.play(Path::new("a.mp3"), 0).unwrap();

    engine.advance(secs(4));
    player.poll();

    let s = player.session();
    assert_eq!(s.elapsed, secs(4));
    assert!((s.progress - 0.4).abs() < 1e-6);
    assert!(s.playing);
}

#[test]
fn reaching_total_transitions_to_idle_with_progress_one() {
    let engine = FakeEngine::with_total(secs(2));
    let mut player = Player::new(engine.clone());
    player.play(Path::new("a.mp3"), 1).unwrap();

    // Overshoot past the total: progress must clamp to exactly 1.0.
    engine.advance(secs(3));
    player.poll();

    let s = player.session();
    assert!(s.is_idle());
    assert!(!s.playing);
    assert_eq!(s.progress, 1.0);
    assert!(engine.0.borrow().opened.is_none());
}

#[test]
fn poll_is_gated_on_playing_flag() {
    let engine = FakeEngine::with_total(secs(10));
    let mut player = Player::new(engine.clone());
    player.play(Path::new("a.mp3"), 0).unwrap();

    player.pause();
    engine.advance(secs(9));
    player.poll();

    // Paused: the tick must not touch elapsed or progress.
    let s = player.session();
    assert_eq!(s.elapsed, Duration::ZERO);
    assert_eq!(s.progress, 0.0);
}

#[test]
fn pause_resume_round_trip() {
    let engine = FakeEngine::with_total(secs(10));
    let mut player = Player::new(engine.clone());
    player.play(Path::new("a.mp3"), 0).unwrap();

    player.pause();
    assert!(!player.is_playing());
    assert!(!engine.0.borrow().running);

    player.resume();
    assert!(player.is_playing());
    assert!(engine.0.borrow().running);

    // Resuming while already playing is a no-op.
    player.resume();
    assert!(player.is_playing());
}

#[test]
fn resume_from_idle_is_a_noop() {
    let engine = FakeEngine::default();
    let mut player = Player::new(engine.clone());

    player.resume();
    assert!(!player.is_playing());
    assert!(player.session().is_idle());
}

#[test]
fn stop_marks_completion_and_is_idempotent() {
    let engine = FakeEngine::with_total(secs(10));
    let mut player = Player::new(engine.clone());
    player.play(Path::new("a.mp3"), 2).unwrap();

    player.stop();
    player.stop();

    let s = player.session();
    assert!(s.is_idle());
    assert!(!s.playing);
    assert_eq!(s.progress, 1.0);
}

#[test]
fn play_replaces_the_active_session() {
    let engine = FakeEngine::with_total(secs(10));
    let mut player = Player::new(engine.clone());

    player.play(Path::new("a.mp3"), 0).unwrap();
    engine.advance(secs(5));
    player.poll();

    player.play(Path::new("b.wav"), 1).unwrap();

    let s = player.session();
    assert_eq!(s.index, Some(1));
    assert_eq!(s.elapsed, Duration::ZERO);
    assert_eq!(s.progress, 0.0);
    assert_eq!(engine.0.borrow().opened.as_deref(), Some(Path::new("b.wav")));
    // The first session's sink was released when the second play started.
    assert!(engine.0.borrow().releases >= 1);
}

#[test]
fn failed_open_resets_the_session_to_idle() {
    let engine = FakeEngine::with_total(secs(10));
    let mut player = Player::new(engine.clone());
    player.play(Path::new("a.mp3"), 0).unwrap();
    engine.advance(secs(3));
    player.poll();

    engine.fail_next_open();
    assert!(player.play(Path::new("gone.wav"), 1).is_err());

    // The old engine was released before the open; the session must not
    // keep claiming the previous clip is playing.
    let s = player.session();
    assert!(s.is_idle());
    assert!(!s.playing);
    assert_eq!(s.elapsed, Duration::ZERO);
    assert_eq!(s.progress, 0.0);
}

#[test]
fn zero_total_disables_end_detection_but_not_playback() {
    let engine = FakeEngine::with_total(Duration::ZERO);
    let mut player = Player::new(engine.clone());
    player.play(Path::new("broken.mp3"), 0).unwrap();

    engine.advance(secs(120));
    player.poll();

    let s = player.session();
    assert!(s.playing);
    assert_eq!(s.progress, 0.0);
}

#[test]
fn retarget_follows_reordered_clip() {
    let engine = FakeEngine::with_total(secs(10));
    let mut player = Player::new(engine);
    player.play(Path::new("a.mp3"), 0).unwrap();

    player.retarget(4);
    assert_eq!(player.playing_index(), Some(4));

    player.stop();
    player.retarget(2);
    assert_eq!(player.playing_index(), None);
}
