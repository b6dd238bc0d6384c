//! Cancellable one-second ticker feeding the service loop

use std::time::Duration as StdDuration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use super::service::ServiceEvent;

/// Repeating timer that posts `ServiceEvent::Tick` into the service channel.
///
/// Every start and cancel bumps the generation, so ticks already queued by
/// a cancelled timer can be recognised and discarded.
pub struct Ticker {
    period: StdDuration,
    generation: u64,
    task: Option<JoinHandle<()>>,
}

impl Ticker {
    pub fn new(period: StdDuration) -> Self {
        Self {
            period,
            generation: 0,
            task: None,
        }
    }

    /// Start ticking, replacing any running timer. The first tick fires one
    /// period from now.
    pub fn start(&mut self, events: mpsc::Sender<ServiceEvent>) {
        self.cancel();
        self.generation += 1;

        let generation = self.generation;
        let period = self.period;
        self.task = Some(tokio::spawn(async move {
            let mut ticks = interval_at(Instant::now() + period, period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticks.tick().await;
                if events.send(ServiceEvent::Tick(generation)).await.is_err() {
                    break;
                }
            }
        }));
    }

    /// Stop ticking. Ticks still in flight become stale.
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            self.generation += 1;
        }
    }

    pub fn is_active(&self) -> bool {
        self.task.is_some()
    }

    /// Whether a tick with this generation came from the running timer
    pub fn is_current(&self, generation: u64) -> bool {
        self.task.is_some() && generation == self.generation
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

    fn drain(rx: &mut mpsc::Receiver<ServiceEvent>) -> Vec<u64> {
        let mut generations = Vec::new();
        while let Ok(ServiceEvent::Tick(g)) = rx.try_recv() {
            generations.push(g);
        }
        generations
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_once_per_period() {
        let (tx, mut rx) = mpsc::channel(32);
        let mut ticker = Ticker::new(StdDuration::from_secs(1));
        ticker.start(tx);

        tokio::time::sleep(StdDuration::from_millis(3500)).await;

        let ticks = drain(&mut rx);
        assert_eq!(ticks.len(), 3);
        assert!(ticks.iter().all(|g| ticker.is_current(*g)));
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_stops_ticks_and_marks_stale() {
        let (tx, mut rx) = mpsc::channel(32);
        let mut ticker = Ticker::new(StdDuration::from_secs(1));
        ticker.start(tx);

        tokio::time::sleep(StdDuration::from_millis(1500)).await;
        ticker.cancel();
        assert!(!ticker.is_active());

        tokio::time::sleep(StdDuration::from_secs(5)).await;

        let ticks = drain(&mut rx);
        assert_eq!(ticks.len(), 1);
        assert!(!ticker.is_current(ticks[0]));
    }

    #[tokio::test(start_paused = true)]
    async fn restart_uses_new_generation() {
        let (tx, mut rx) = mpsc::channel(32);
        let mut ticker = Ticker::new(StdDuration::from_secs(1));

        ticker.start(tx.clone());
        tokio::time::sleep(StdDuration::from_millis(1500)).await;
        let old = drain(&mut rx);

        ticker.start(tx);
        tokio::time::sleep(StdDuration::from_millis(1500)).await;
        let new = drain(&mut rx);

        assert_eq!(old.len(), 1);
        assert_eq!(new.len(), 1);
        assert!(!ticker.is_current(old[0]));
        assert!(ticker.is_current(new[0]));
    }
}
