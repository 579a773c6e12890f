//! Background tick source.
//!
//! A [`Ticker`] sends its generation number over a channel once per
//! interval until cancelled. Hosts start one for every
//! `Effect::StartTicking` and cancel it on the matching
//! `Effect::StopTicking`, feeding the received generations back into
//! `CookingGuide::tick` on their own event loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// A cancellable, repeating once-per-interval tick schedule.
#[derive(Debug)]
pub struct Ticker {
    generation: u64,
    cancelled: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    /// Spawns the tick thread. `map` turns a generation into the host's
    /// event type.
    pub fn start<T, F>(generation: u64, interval: Duration, sender: Sender<T>, map: F) -> Self
    where
        T: Send + 'static,
        F: Fn(u64) -> T + Send + 'static,
    {
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);

        let handle = thread::spawn(move || {
            let mut next = Instant::now() + interval;
            loop {
                let now = Instant::now();
                if now < next {
                    thread::park_timeout(next - now);
                }
                if flag.load(Ordering::Acquire) {
                    break;
                }
                // park_timeout may wake early
                if Instant::now() < next {
                    continue;
                }
                next += interval;
                if sender.send(map(generation)).is_err() {
                    break;
                }
            }
        });

        log::trace!("Started ticker for generation {generation}");
        Ticker {
            generation,
            cancelled,
            handle: Some(handle),
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Stops the schedule and waits for the thread to exit. No tick is sent
    /// after this returns.
    pub fn cancel(&mut self) {
        self.cancelled.store(true, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            handle.thread().unpark();
            let _ = handle.join();
            log::trace!("Cancelled ticker for generation {}", self.generation);
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn test_ticks_carry_generation() {
        let (tx, rx) = mpsc::channel();
        let _ticker = Ticker::start(7, Duration::from_millis(5), tx, |g| g);

        let first = rx.recv_timeout(Duration::from_secs(2)).unwrap();
        let second = rx.recv_timeout(Duration::from_secs(2)).unwrap();
        assert_eq!((first, second), (7, 7));
    }

    #[test]
    fn test_no_ticks_after_cancel() {
        let (tx, rx) = mpsc::channel();
        let mut ticker = Ticker::start(1, Duration::from_millis(5), tx, |g| g);
        rx.recv_timeout(Duration::from_secs(2)).unwrap();

        ticker.cancel();
        while rx.try_recv().is_ok() {}
        thread::sleep(Duration::from_millis(30));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_cancel_is_prompt_for_long_intervals() {
        let (tx, _rx) = mpsc::channel::<u64>();
        let mut ticker = Ticker::start(1, Duration::from_secs(3600), tx, |g| g);
        let started = std::time::Instant::now();
        ticker.cancel();
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_drop_cancels() {
        let (tx, rx) = mpsc::channel();
        {
            let _ticker = Ticker::start(3, Duration::from_millis(5), tx, |g| g * 10);
            assert_eq!(rx.recv_timeout(Duration::from_secs(2)).unwrap(), 30);
        }
        while rx.try_recv().is_ok() {}
        // The sender was dropped with the thread, so the channel is closed.
        assert!(matches!(
            rx.recv_timeout(Duration::from_millis(30)),
            Err(mpsc::RecvTimeoutError::Disconnected)
        ));
    }
}
