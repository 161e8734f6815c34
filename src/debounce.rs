//! Debounce gate for the search input.
//!
//! Quiesces raw keystrokes into a stable search term: each keystroke cancels
//! the armed timer and starts a fresh one, so at most one timer exists and
//! only the value that survives the full quiescence window is emitted.
//! Canceled timers fire no side effects.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Single-slot debounce timer.
///
/// Emitted (settled) values arrive on the receiver returned by [`new`];
/// the owner wires that receiver to whatever the settled query should drive.
///
/// [`new`]: DebounceGate::new
pub struct DebounceGate {
    window: Duration,
    timer: Option<JoinHandle<()>>,
    tx: mpsc::UnboundedSender<String>,
}

impl DebounceGate {
    pub fn new(window: Duration) -> (Self, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                window,
                timer: None,
                tx,
            },
            rx,
        )
    }

    /// Accept a keystroke. Cancels the pending timer, if any, and arms a
    /// new one for the full window.
    pub fn input(&mut self, raw: impl Into<String>) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
        let tx = self.tx.clone();
        let raw = raw.into();
        // Deadline is fixed at the keystroke, not when the task is first
        // polled, so the window cannot stretch under scheduling delay.
        let deadline = tokio::time::Instant::now() + self.window;
        self.timer = Some(tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            // Receiver dropped means the controller is gone; nothing to do.
            let _ = tx.send(raw);
        }));
    }
}

impl Drop for DebounceGate {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::advance;

    #[tokio::test(start_paused = true)]
    async fn emits_after_quiescence_window() {
        let (mut gate, mut rx) = DebounceGate::new(Duration::from_millis(300));
        gate.input("maria");
        advance(Duration::from_millis(301)).await;
        assert_eq!(rx.recv().await.unwrap(), "maria");
    }

    #[tokio::test(start_paused = true)]
    async fn burst_of_keystrokes_emits_only_the_last() {
        let (mut gate, mut rx) = DebounceGate::new(Duration::from_millis(300));
        for prefix in ["m", "ma", "mar", "mari", "maria"] {
            gate.input(prefix);
            advance(Duration::from_millis(100)).await;
        }
        advance(Duration::from_millis(300)).await;
        assert_eq!(rx.recv().await.unwrap(), "maria");
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn nothing_emitted_before_the_window_elapses() {
        let (mut gate, mut rx) = DebounceGate::new(Duration::from_millis(300));
        gate.input("m");
        advance(Duration::from_millis(299)).await;
        assert!(rx.try_recv().is_err());
        advance(Duration::from_millis(2)).await;
        assert_eq!(rx.recv().await.unwrap(), "m");
    }

    #[tokio::test(start_paused = true)]
    async fn canceled_timer_fires_no_side_effects() {
        let (mut gate, mut rx) = DebounceGate::new(Duration::from_millis(300));
        gate.input("stale");
        advance(Duration::from_millis(200)).await;
        gate.input("fresh");
        advance(Duration::from_millis(301)).await;
        assert_eq!(rx.recv().await.unwrap(), "fresh");
        assert!(rx.try_recv().is_err());
    }
}
