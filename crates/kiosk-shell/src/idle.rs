//! Idle inhibition.
//!
//! Keeps the desktop from sleeping or locking while the session is active.
//! `start()` walks a fixed-priority chain of platform session services (the
//! legacy screen-saver service first, then the desktop session manager); the
//! first one that responds wins and its cookie is retained for release. When
//! no service responds the inhibitor falls back to a periodic keep-alive
//! timer. The default keep-alive action only logs; a real anti-idle action
//! is a pluggable extension point, and the logging default is an
//! acknowledged gap.

use std::sync::Arc;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info, warn};

/// Token returned by a platform inhibition service, passed back on release.
pub type InhibitCookie = u32;

/// Failure of a single platform inhibition backend. Never fatal: the chain
/// moves on to the next backend and ultimately the timer.
#[derive(Debug, Error)]
pub enum InhibitError {
    #[error("inhibition service `{service}` unavailable: {reason}")]
    Unavailable { service: String, reason: String },
}

/// A platform session service that can inhibit idle.
pub trait InhibitService: Send {
    /// Service identifier for logs.
    fn name(&self) -> &str;

    /// Request inhibition; returns the cookie to release it with.
    ///
    /// # Errors
    ///
    /// [`InhibitError::Unavailable`] when the service is absent or refuses.
    fn inhibit(&mut self, app_name: &str, reason: &str) -> Result<InhibitCookie, InhibitError>;

    /// Release a previously granted inhibition.
    ///
    /// # Errors
    ///
    /// [`InhibitError::Unavailable`] when the service cannot be reached.
    fn uninhibit(&mut self, cookie: InhibitCookie) -> Result<(), InhibitError>;
}

/// The periodic action the fallback timer performs.
pub trait KeepAlive: Send + Sync {
    fn ping(&self);
}

/// Default keep-alive: logs and nothing else. Exists as the documented
/// extension point for a future real keep-alive mechanism.
#[derive(Debug, Default)]
pub struct LoggingKeepAlive;

impl KeepAlive for LoggingKeepAlive {
    fn ping(&self) {
        debug!("keep-alive ping to prevent idle");
    }
}

/// Fixed period of the fallback timer.
const KEEP_ALIVE_PERIOD: Duration = Duration::from_secs(30);

struct TimerHandle {
    stop_tx: mpsc::Sender<()>,
    join: Option<JoinHandle<()>>,
}

enum ActiveMechanism {
    Service {
        index: usize,
        cookie: InhibitCookie,
    },
    Timer(TimerHandle),
}

/// `Idle` ⇄ `Inhibiting` state machine over the backend chain.
///
/// `start()` is idempotent while inhibiting; `stop()` is idempotent while
/// idle and safe to call during teardown even if `start()` never ran.
pub struct IdleInhibitor {
    services: Vec<Box<dyn InhibitService>>,
    keep_alive: Arc<dyn KeepAlive>,
    period: Duration,
    active: Option<ActiveMechanism>,
}

impl IdleInhibitor {
    /// Create an inhibitor over the given service chain, tried in order.
    #[must_use]
    pub fn new(services: Vec<Box<dyn InhibitService>>) -> Self {
        Self::with_keep_alive(services, Arc::new(LoggingKeepAlive))
    }

    /// Create an inhibitor with a custom fallback keep-alive action.
    #[must_use]
    pub fn with_keep_alive(
        services: Vec<Box<dyn InhibitService>>,
        keep_alive: Arc<dyn KeepAlive>,
    ) -> Self {
        Self {
            services,
            keep_alive,
            period: KEEP_ALIVE_PERIOD,
            active: None,
        }
    }

    /// Override the timer period. Test hook.
    #[cfg(test)]
    fn with_period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    /// Whether some mechanism is currently active.
    #[must_use]
    pub fn is_inhibiting(&self) -> bool {
        self.active.is_some()
    }

    /// Name of the active mechanism, for logs and diagnostics.
    #[must_use]
    pub fn active_mechanism(&self) -> Option<&str> {
        match self.active.as_ref()? {
            ActiveMechanism::Service { index, .. } => Some(self.services[*index].name()),
            ActiveMechanism::Timer(_) => Some("keep-alive-timer"),
        }
    }

    /// Begin inhibiting. No-op while already inhibiting.
    pub fn start(&mut self, app_name: &str, reason: &str) {
        if self.active.is_some() {
            return;
        }

        debug!("starting idle inhibition");
        for index in 0..self.services.len() {
            match self.services[index].inhibit(app_name, reason) {
                Ok(cookie) => {
                    info!(
                        service = self.services[index].name(),
                        cookie, "idle inhibition active"
                    );
                    self.active = Some(ActiveMechanism::Service { index, cookie });
                    return;
                }
                Err(err) => {
                    debug!(service = self.services[index].name(), %err, "inhibition backend failed");
                }
            }
        }

        self.active = Some(ActiveMechanism::Timer(self.spawn_timer()));
        info!("idle inhibition active via keep-alive timer");
    }

    /// Release whichever mechanism is active. No-op while idle.
    pub fn stop(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };

        debug!("stopping idle inhibition");
        match active {
            ActiveMechanism::Service { index, cookie } => {
                if let Err(err) = self.services[index].uninhibit(cookie) {
                    warn!(service = self.services[index].name(), %err, "uninhibit failed");
                }
            }
            ActiveMechanism::Timer(mut timer) => {
                // A send error just means the thread already exited.
                let _ = timer.stop_tx.send(());
                if let Some(join) = timer.join.take() {
                    let _ = join.join();
                }
            }
        }
    }

    fn spawn_timer(&self) -> TimerHandle {
        let (stop_tx, stop_rx) = mpsc::channel();
        let keep_alive = Arc::clone(&self.keep_alive);
        let period = self.period;
        let join = thread::spawn(move || {
            keep_alive.ping();
            loop {
                match stop_rx.recv_timeout(period) {
                    Err(RecvTimeoutError::Timeout) => keep_alive.ping(),
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
        });
        TimerHandle {
            stop_tx,
            join: Some(join),
        }
    }
}

impl Drop for IdleInhibitor {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    /// Backend with a scripted availability and a call log.
    struct FakeService {
        name: &'static str,
        available: bool,
        cookie: InhibitCookie,
        calls: Arc<Mutex<Vec<String>>>,
    }

    impl FakeService {
        fn new(
            name: &'static str,
            available: bool,
            cookie: InhibitCookie,
            calls: &Arc<Mutex<Vec<String>>>,
        ) -> Box<Self> {
            Box::new(Self {
                name,
                available,
                cookie,
                calls: Arc::clone(calls),
            })
        }

        fn log(&self, entry: String) {
            self.calls.lock().unwrap().push(entry);
        }
    }

    impl InhibitService for FakeService {
        fn name(&self) -> &str {
            self.name
        }

        fn inhibit(&mut self, _app_name: &str, _reason: &str) -> Result<InhibitCookie, InhibitError> {
            self.log(format!("{}.inhibit", self.name));
            if self.available {
                Ok(self.cookie)
            } else {
                Err(InhibitError::Unavailable {
                    service: self.name.to_owned(),
                    reason: "not running".into(),
                })
            }
        }

        fn uninhibit(&mut self, cookie: InhibitCookie) -> Result<(), InhibitError> {
            self.log(format!("{}.uninhibit({cookie})", self.name));
            Ok(())
        }
    }

    #[test]
    fn test_first_available_service_wins() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut inhibitor = IdleInhibitor::new(vec![
            FakeService::new("screensaver", true, 11, &calls),
            FakeService::new("session-manager", true, 22, &calls),
        ]);

        inhibitor.start("kiosk", "exam in progress");

        assert!(inhibitor.is_inhibiting());
        assert_eq!(inhibitor.active_mechanism(), Some("screensaver"));
        assert_eq!(calls.lock().unwrap().as_slice(), ["screensaver.inhibit"]);
    }

    #[test]
    fn test_chain_falls_through_to_second_service() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut inhibitor = IdleInhibitor::new(vec![
            FakeService::new("screensaver", false, 0, &calls),
            FakeService::new("session-manager", true, 22, &calls),
        ]);

        inhibitor.start("kiosk", "exam in progress");
        assert_eq!(inhibitor.active_mechanism(), Some("session-manager"));

        inhibitor.stop();
        assert!(!inhibitor.is_inhibiting());
        // Release goes to the backend that granted the cookie.
        assert_eq!(
            calls.lock().unwrap().as_slice(),
            [
                "screensaver.inhibit",
                "session-manager.inhibit",
                "session-manager.uninhibit(22)"
            ]
        );
    }

    #[test]
    fn test_fallback_timer_when_no_service_responds() {
        struct CountingKeepAlive(AtomicUsize);
        impl KeepAlive for CountingKeepAlive {
            fn ping(&self) {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }

        let calls = Arc::new(Mutex::new(Vec::new()));
        let keep_alive = Arc::new(CountingKeepAlive(AtomicUsize::new(0)));
        let mut inhibitor = IdleInhibitor::with_keep_alive(
            vec![FakeService::new("screensaver", false, 0, &calls)],
            Arc::clone(&keep_alive) as Arc<dyn KeepAlive>,
        )
        .with_period(Duration::from_millis(5));

        inhibitor.start("kiosk", "exam in progress");
        assert_eq!(inhibitor.active_mechanism(), Some("keep-alive-timer"));

        std::thread::sleep(Duration::from_millis(30));
        inhibitor.stop();

        // One immediate ping plus at least one periodic tick.
        assert!(keep_alive.0.load(Ordering::SeqCst) >= 2);
        assert!(!inhibitor.is_inhibiting());
    }

    #[test]
    fn test_start_is_idempotent_while_inhibiting() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut inhibitor =
            IdleInhibitor::new(vec![FakeService::new("screensaver", true, 7, &calls)]);

        inhibitor.start("kiosk", "exam");
        inhibitor.start("kiosk", "exam");

        assert_eq!(calls.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_stop_before_start_is_safe() {
        let mut inhibitor = IdleInhibitor::new(vec![]);
        inhibitor.stop();
        assert!(!inhibitor.is_inhibiting());
    }

    #[test]
    fn test_stop_is_idempotent() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut inhibitor =
            IdleInhibitor::new(vec![FakeService::new("screensaver", true, 7, &calls)]);

        inhibitor.start("kiosk", "exam");
        inhibitor.stop();
        inhibitor.stop();

        assert_eq!(
            calls.lock().unwrap().as_slice(),
            ["screensaver.inhibit", "screensaver.uninhibit(7)"]
        );
    }

    #[test]
    fn test_restart_after_stop() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut inhibitor =
            IdleInhibitor::new(vec![FakeService::new("screensaver", true, 7, &calls)]);

        inhibitor.start("kiosk", "exam");
        inhibitor.stop();
        inhibitor.start("kiosk", "exam");

        assert!(inhibitor.is_inhibiting());
        assert_eq!(calls.lock().unwrap().len(), 3);
    }
}
