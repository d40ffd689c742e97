//! Tutorial tip board: periodically fetches a driving tip off the simulation thread.
//!
//! The source is a black box that may be slow or fail. Fetches run on a
//! background thread and are polled without blocking; any failure shows the
//! fallback tip instead.

use rand::prelude::*;
use serde::Deserialize;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use thiserror::Error;

/// Lesson subjects a tip is requested for.
pub const TOPICS: [&str; 6] = [
    "safe braking techniques",
    "steering precision",
    "using turn signals properly",
    "maintaining speed limits",
    "parallel parking theory",
    "lane discipline",
];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DrivingTip {
    pub title: String,
    pub instruction: String,
}

impl DrivingTip {
    /// Shown whenever a fetch fails.
    pub fn fallback() -> Self {
        Self {
            title: "Driving Instructor".to_string(),
            instruction: "Keep your eyes on the road and maintain a steady speed.".to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum TipError {
    #[error("no tip available for topic {0:?}")]
    UnknownTopic(String),
    #[error("tip service unavailable: {0}")]
    Unavailable(String),
    #[error("malformed tip table: {0}")]
    Malformed(#[from] ron::error::SpannedError),
}

/// Anything that can answer a tip request. Called from a worker thread.
pub trait TipSource: Send + Sync {
    fn fetch(&self, topic: &str) -> Result<DrivingTip, TipError>;
}

#[derive(Debug, Deserialize)]
struct CannedEntry {
    topic: String,
    tip: DrivingTip,
}

const CANNED_TIPS: &str = r#"[
    (topic: "safe braking techniques", tip: (
        title: "Brake Before the Bend",
        instruction: "Do your braking in a straight line, then ease off as you turn in.",
    )),
    (topic: "steering precision", tip: (
        title: "Smooth Hands",
        instruction: "Small, early steering inputs keep the car settled at speed.",
    )),
    (topic: "using turn signals properly", tip: (
        title: "Signal Early",
        instruction: "Indicate a few seconds before changing lanes so traffic can react.",
    )),
    (topic: "maintaining speed limits", tip: (
        title: "Watch Your Speed",
        instruction: "Check the speedometer often; boost is for open road, not city blocks.",
    )),
    (topic: "parallel parking theory", tip: (
        title: "Reference Points",
        instruction: "Line up your mirror with the car ahead before reversing into the gap.",
    )),
    (topic: "lane discipline", tip: (
        title: "Keep Your Lane",
        instruction: "Stay centred in your lane and only move over to overtake.",
    )),
]"#;

/// Offline tip table shipped with the binary.
#[derive(Debug, Clone)]
pub struct CannedTips {
    tips: Vec<(String, DrivingTip)>,
}

impl CannedTips {
    pub fn builtin() -> Result<Self, TipError> {
        Self::from_ron(CANNED_TIPS)
    }

    /// Parse a RON list of `(topic, tip: (title, instruction))` entries.
    pub fn from_ron(data: &str) -> Result<Self, TipError> {
        let entries: Vec<CannedEntry> = ron::from_str(data)?;
        Ok(Self {
            tips: entries.into_iter().map(|e| (e.topic, e.tip)).collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.tips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tips.is_empty()
    }
}

impl TipSource for CannedTips {
    fn fetch(&self, topic: &str) -> Result<DrivingTip, TipError> {
        self.tips
            .iter()
            .find(|(t, _)| t == topic)
            .map(|(_, tip)| tip.clone())
            .ok_or_else(|| TipError::UnknownTopic(topic.to_string()))
    }
}

/// Shortest refresh interval honoured, in seconds.
pub const MIN_TIP_INTERVAL: f32 = 1.0;

/// Scheduler for the tip panel. Drive it with [`TipBoard::tick`] once per frame.
pub struct TipBoard {
    source: Arc<dyn TipSource>,
    interval: f32,
    /// Seconds until the next scheduled refresh; `None` before the first tick.
    until_refresh: Option<f32>,
    current: Option<DrivingTip>,
    pending: Option<Receiver<DrivingTip>>,
    rng: StdRng,
}

impl TipBoard {
    pub fn new(source: Arc<dyn TipSource>, interval_secs: f32, seed: u64) -> Self {
        Self {
            source,
            interval: interval_secs.max(MIN_TIP_INTERVAL),
            until_refresh: None,
            current: None,
            pending: None,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Collect a finished fetch, then start a new one if the interval is up
    /// and nothing is in flight. The first tick always requests a tip.
    pub fn tick(&mut self, dt: f32) {
        self.poll();
        let due = match self.until_refresh.as_mut() {
            None => true,
            Some(remaining) => {
                *remaining -= dt;
                *remaining <= 0.0
            }
        };
        if due {
            self.until_refresh = Some(self.interval);
            if self.is_loading() {
                log::debug!("Previous tip still loading; skipping refresh");
            } else {
                self.refresh();
            }
        }
    }

    /// Request a tip on a random topic now. A fetch still in flight is abandoned.
    pub fn refresh(&mut self) {
        let topic = TOPICS.choose(&mut self.rng).copied().unwrap_or(TOPICS[0]);
        let (tx, rx) = mpsc::channel();
        let source = Arc::clone(&self.source);
        let spawned = thread::Builder::new()
            .name("tip-fetch".to_string())
            .spawn(move || {
                let tip = source.fetch(topic).unwrap_or_else(|e| {
                    log::warn!("Tip fetch for {:?} failed: {}", topic, e);
                    DrivingTip::fallback()
                });
                // The board may have been dropped or moved on; nothing to do then.
                let _ = tx.send(tip);
            });
        match spawned {
            Ok(_) => {
                log::debug!("Fetching tip about {:?}", topic);
                self.pending = Some(rx);
            }
            Err(e) => {
                log::warn!("Could not start tip fetch: {}", e);
                self.pending = None;
                self.current = Some(DrivingTip::fallback());
            }
        }
    }

    /// Non-blocking check for a finished fetch. Returns true when the tip changed.
    pub fn poll(&mut self) -> bool {
        let Some(rx) = self.pending.as_ref() else {
            return false;
        };
        let tip = match rx.try_recv() {
            Ok(tip) => tip,
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Disconnected) => DrivingTip::fallback(),
        };
        self.accept(tip);
        true
    }

    /// Block until the pending fetch finishes or `timeout` passes.
    pub fn wait(&mut self, timeout: Duration) -> bool {
        let Some(rx) = self.pending.as_ref() else {
            return false;
        };
        let tip = match rx.recv_timeout(timeout) {
            Ok(tip) => tip,
            Err(RecvTimeoutError::Timeout) => return false,
            Err(RecvTimeoutError::Disconnected) => DrivingTip::fallback(),
        };
        self.accept(tip);
        true
    }

    fn accept(&mut self, tip: DrivingTip) {
        log::info!("Tip: {}: {}", tip.title, tip.instruction);
        self.current = Some(tip);
        self.pending = None;
    }

    pub fn current(&self) -> Option<&DrivingTip> {
        self.current.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct Offline;

    impl TipSource for Offline {
        fn fetch(&self, _topic: &str) -> Result<DrivingTip, TipError> {
            Err(TipError::Unavailable("no network".to_string()))
        }
    }

    struct Counting(AtomicUsize);

    impl TipSource for Counting {
        fn fetch(&self, topic: &str) -> Result<DrivingTip, TipError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(DrivingTip {
                title: "Counted".to_string(),
                instruction: topic.to_string(),
            })
        }
    }

    struct Panicking;

    impl TipSource for Panicking {
        fn fetch(&self, _topic: &str) -> Result<DrivingTip, TipError> {
            panic!("source blew up");
        }
    }

    /// Blocks every fetch until the test opens the gate.
    struct Gated {
        started: AtomicUsize,
        gate: Mutex<Receiver<()>>,
    }

    impl TipSource for Gated {
        fn fetch(&self, topic: &str) -> Result<DrivingTip, TipError> {
            self.started.fetch_add(1, Ordering::SeqCst);
            let _ = self.gate.lock().unwrap().recv();
            Ok(DrivingTip {
                title: "Gated".to_string(),
                instruction: topic.to_string(),
            })
        }
    }

    const WAIT: Duration = Duration::from_secs(5);

    #[test]
    fn builtin_table_covers_every_topic() {
        let canned = CannedTips::builtin().unwrap();
        assert_eq!(canned.len(), TOPICS.len());
        for topic in TOPICS {
            assert!(canned.fetch(topic).is_ok(), "{}", topic);
        }
        assert!(matches!(
            canned.fetch("drifting"),
            Err(TipError::UnknownTopic(_))
        ));
    }

    #[test]
    fn bad_table_is_reported() {
        assert!(matches!(
            CannedTips::from_ron("[(topic: 3)]"),
            Err(TipError::Malformed(_))
        ));
    }

    #[test]
    fn failing_source_shows_fallback() {
        let mut board = TipBoard::new(Arc::new(Offline), 60.0, 1);
        assert!(board.current().is_none());
        board.tick(0.016);
        assert!(board.is_loading());
        assert!(board.wait(WAIT));
        assert_eq!(board.current(), Some(&DrivingTip::fallback()));
        assert!(!board.is_loading());
    }

    #[test]
    fn crashed_fetch_falls_back() {
        let mut board = TipBoard::new(Arc::new(Panicking), 60.0, 1);
        board.refresh();
        assert!(board.wait(WAIT));
        assert_eq!(board.current(), Some(&DrivingTip::fallback()));
    }

    #[test]
    fn refreshes_on_first_tick_then_each_interval() {
        let source = Arc::new(Counting(AtomicUsize::new(0)));
        let mut board = TipBoard::new(source.clone(), 60.0, 7);
        board.tick(1.0 / 60.0);
        board.wait(WAIT);
        assert_eq!(source.0.load(Ordering::SeqCst), 1);
        let tip = board.current().unwrap();
        assert!(TOPICS.contains(&tip.instruction.as_str()));

        // 59 seconds later: still the same tip.
        for _ in 0..59 {
            board.tick(1.0);
        }
        assert!(!board.is_loading());
        assert_eq!(source.0.load(Ordering::SeqCst), 1);

        board.tick(1.0);
        assert!(board.wait(WAIT));
        assert_eq!(source.0.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn slow_fetch_is_not_restarted() {
        let (open, gate) = mpsc::channel();
        let source = Arc::new(Gated {
            started: AtomicUsize::new(0),
            gate: Mutex::new(gate),
        });
        // A zero interval is raised to the minimum.
        let mut board = TipBoard::new(source.clone(), 0.0, 3);
        for _ in 0..10 {
            board.tick(2.0);
            assert!(board.is_loading());
        }

        open.send(()).unwrap();
        assert!(board.wait(WAIT));
        assert_eq!(board.current().unwrap().title, "Gated");
        assert_eq!(source.started.load(Ordering::SeqCst), 1);

        board.tick(MIN_TIP_INTERVAL / 2.0);
        assert!(!board.is_loading());
    }

    #[test]
    fn poll_never_blocks_without_a_fetch() {
        let mut board = TipBoard::new(Arc::new(Offline), 60.0, 1);
        assert!(!board.poll());
        assert!(!board.wait(Duration::from_millis(1)));
    }
}
