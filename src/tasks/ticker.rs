//! Ticker background task

use std::{sync::Arc, time::Duration};
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::state::{AppState, Command};

/// Background task that dispatches `Tick` once per period while the timer is armed.
///
/// At most one interval exists at a time. It is created when the timer becomes
/// armed and dropped as soon as it is not, so pausing or reaching zero releases it.
pub async fn ticker_task(state: Arc<AppState>) {
    info!("Starting ticker task ({:?} period)", state.tick_interval);

    let mut timer_rx = state.subscribe();
    let mut ticker: Option<Interval> = None;

    loop {
        let armed = timer_rx.borrow_and_update().ticker_armed();

        match (armed, ticker.is_some()) {
            (true, false) => {
                debug!("Timer armed, starting ticker");
                ticker = Some(arm(state.tick_interval));
            }
            (false, true) => {
                debug!("Timer disarmed, releasing ticker");
                ticker = None;
            }
            _ => {}
        }

        let result = match ticker.as_mut() {
            Some(interval) => tokio::select! {
                _ = interval.tick() => {
                    if let Err(e) = state.dispatch(Command::Tick) {
                        error!("Failed to dispatch tick: {}", e);
                    }
                    Ok(())
                }
                changed = timer_rx.changed() => changed,
            },
            None => timer_rx.changed().await,
        };

        if result.is_err() {
            info!("Timer channel closed, stopping ticker task");
            break;
        }
    }
}

/// First tick fires one full period after arming
fn arm(period: Duration) -> Interval {
    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    fn spawn_ticker() -> (Arc<AppState>, tokio::task::JoinHandle<()>) {
        let state = Arc::new(AppState::new(0, "127.0.0.1".to_string(), Duration::from_secs(1)));
        let handle = tokio::spawn(ticker_task(Arc::clone(&state)));
        (state, handle)
    }

    #[tokio::test(start_paused = true)]
    async fn test_counts_down_once_per_second() {
        let (state, handle) = spawn_ticker();
        state.dispatch(Command::SetTime { hours: 0, minutes: 0, seconds: 10 }).unwrap();
        state.dispatch(Command::Start).unwrap();

        sleep(Duration::from_millis(3500)).await;
        assert_eq!(state.snapshot().unwrap().total_seconds, 7);

        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_stops_ticking_at_zero_but_stays_running() {
        let (state, handle) = spawn_ticker();
        state.dispatch(Command::SetTime { hours: 0, minutes: 0, seconds: 5 }).unwrap();
        state.dispatch(Command::Start).unwrap();

        sleep(Duration::from_secs(10)).await;
        let timer = state.snapshot().unwrap();
        assert_eq!(timer.total_seconds, 0);
        assert!(timer.running);
        assert_eq!(timer.display(), "00:00:00");

        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_ticks_while_stopped() {
        let (state, handle) = spawn_ticker();
        state.dispatch(Command::SetTime { hours: 0, minutes: 1, seconds: 0 }).unwrap();

        sleep(Duration::from_secs(5)).await;
        assert_eq!(state.snapshot().unwrap().total_seconds, 60);

        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_and_resume() {
        let (state, handle) = spawn_ticker();
        state.dispatch(Command::SetTime { hours: 0, minutes: 0, seconds: 30 }).unwrap();
        state.dispatch(Command::Start).unwrap();

        sleep(Duration::from_millis(2500)).await;
        state.dispatch(Command::Stop).unwrap();
        assert_eq!(state.snapshot().unwrap().total_seconds, 28);

        sleep(Duration::from_secs(5)).await;
        assert_eq!(state.snapshot().unwrap().total_seconds, 28);

        state.dispatch(Command::Start).unwrap();
        sleep(Duration::from_millis(3500)).await;
        assert_eq!(state.snapshot().unwrap().total_seconds, 25);

        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_increment_at_zero_rearms_ticker() {
        let (state, handle) = spawn_ticker();
        state.dispatch(Command::SetTime { hours: 0, minutes: 0, seconds: 2 }).unwrap();
        state.dispatch(Command::Start).unwrap();

        sleep(Duration::from_secs(3)).await;
        let timer = state.snapshot().unwrap();
        assert_eq!(timer.total_seconds, 0);
        assert!(timer.running);

        state.dispatch(Command::Increment).unwrap();
        state.dispatch(Command::Increment).unwrap();
        sleep(Duration::from_millis(500)).await;
        assert_eq!(state.snapshot().unwrap().total_seconds, 2);

        sleep(Duration::from_secs(3)).await;
        let timer = state.snapshot().unwrap();
        assert_eq!(timer.total_seconds, 0);
        assert!(timer.running);

        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_commands_while_running_do_not_double_tick() {
        let (state, handle) = spawn_ticker();
        state.dispatch(Command::SetTime { hours: 0, minutes: 0, seconds: 20 }).unwrap();
        state.dispatch(Command::Start).unwrap();

        sleep(Duration::from_millis(1500)).await;
        state.dispatch(Command::Increment).unwrap();
        state.dispatch(Command::Start).unwrap();

        sleep(Duration::from_secs(2)).await;
        // 20 - 1 + 1 - 2
        assert_eq!(state.snapshot().unwrap().total_seconds, 18);

        handle.abort();
    }
}
