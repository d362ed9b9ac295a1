//! Method-call logging
//!
//! `MethodLogger` wraps a call with leveled diagnostics without touching
//! its outcome:
//! - a call flagged `debug` runs unlogged unless DEBUG is enabled;
//! - with TRACE enabled, the serialized arguments are logged before the
//!   call (`name <= [..]`) and the serialized result after it (`name => ..`);
//! - the elapsed wall-clock time is logged as `name [<N>ms]` at DEBUG for
//!   `debug` calls and INFO otherwise.
//!
//! Level checks go through an injected [`LevelGate`] at call time. Values
//! that cannot be serialized are replaced by [`UNSERIALIZABLE`]. Errors are
//! returned as-is and produce neither a result trace nor a timing line.
//!
//! Every event and level check uses the single target [`TARGET`], whatever
//! service the call belongs to: `RUST_LOG=hostocars_api::loggable=trace`
//! turns argument tracing on for all services at once. Tracing targets are
//! fixed at compile time, so a per-service filter such as
//! `hostocars_api::app::car_service=trace` does not reach these events.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::Level;

use crate::config::Config;

/// Target of every interceptor event
pub const TARGET: &str = "hostocars_api::loggable";

/// Placeholder logged for values that cannot be written as JSON
pub const UNSERIALIZABLE: &str = "Unable to write as JSON";

/// Marks a call for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Loggable {
    pub name: &'static str,
    /// Only log when DEBUG is enabled, and time at DEBUG instead of INFO
    pub debug: bool,
}

impl Loggable {
    pub const fn info(name: &'static str) -> Self {
        Self { name, debug: false }
    }

    pub const fn debug(name: &'static str) -> Self {
        Self { name, debug: true }
    }
}

/// Answers whether a level is enabled, checked on every call
pub trait LevelGate: Send + Sync {
    fn enabled(&self, level: Level) -> bool;
}

/// Asks the active tracing subscriber (and its filter) about [`TARGET`]
#[derive(Debug, Default, Clone, Copy)]
pub struct SubscriberLevels;

impl LevelGate for SubscriberLevels {
    fn enabled(&self, level: Level) -> bool {
        match level {
            Level::TRACE => tracing::enabled!(target: TARGET, Level::TRACE),
            Level::DEBUG => tracing::enabled!(target: TARGET, Level::DEBUG),
            Level::INFO => tracing::enabled!(target: TARGET, Level::INFO),
            Level::WARN => tracing::enabled!(target: TARGET, Level::WARN),
            _ => tracing::enabled!(target: TARGET, Level::ERROR),
        }
    }
}

/// The interceptor applied around service operations
#[derive(Clone)]
pub struct MethodLogger {
    levels: Option<Arc<dyn LevelGate>>,
}

impl MethodLogger {
    pub fn new(levels: Arc<dyn LevelGate>) -> Self {
        Self {
            levels: Some(levels),
        }
    }

    /// A logger that never logs; every call is a plain pass-through
    pub fn disabled() -> Self {
        Self { levels: None }
    }

    /// Method logging is only active once a profile is selected
    pub fn from_config(config: &Config) -> Self {
        match &config.profile {
            Some(profile) => {
                tracing::debug!("Method logging enabled for profile {}", profile);
                Self::new(Arc::new(SubscriberLevels))
            }
            None => Self::disabled(),
        }
    }

    /// Run a fallible call under `method`
    pub async fn try_call<A, F, Fut, T, E>(
        &self,
        method: Loggable,
        args: &A,
        call: F,
    ) -> Result<T, E>
    where
        A: Serialize + ?Sized,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        T: Serialize,
    {
        let Some(trace) = self.enter(method, args) else {
            return call().await;
        };

        let started = Instant::now();
        let value = call().await?;
        let elapsed = started.elapsed().as_millis();

        if trace {
            tracing::trace!(target: TARGET, "{} => {}", method.name, to_json(&value));
        }
        if method.debug {
            tracing::debug!(target: TARGET, "{} [{}ms]", method.name, elapsed);
        } else {
            tracing::info!(target: TARGET, "{} [{}ms]", method.name, elapsed);
        }

        Ok(value)
    }

    /// `None` when the call must run unlogged, otherwise whether TRACE is on
    fn enter<A: Serialize + ?Sized>(&self, method: Loggable, args: &A) -> Option<bool> {
        let levels = self.levels.as_ref()?;
        if method.debug && !levels.enabled(Level::DEBUG) {
            return None;
        }

        let trace = levels.enabled(Level::TRACE);
        if trace {
            tracing::trace!(target: TARGET, "{} <= {}", method.name, to_json(args));
        }
        Some(trace)
    }
}

/// Serialize for diagnostics, never failing
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| UNSERIALIZABLE.to_string())
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use serde::Serializer;
    use tracing::level_filters::LevelFilter;
    use tracing_test::traced_test;

    use super::*;
    use crate::test_utils::StaticLevels;

    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("not representable"))
        }
    }

    fn logger(max: LevelFilter) -> MethodLogger {
        MethodLogger::new(Arc::new(StaticLevels(max)))
    }

    #[test]
    fn static_levels_threshold() {
        let levels = StaticLevels(LevelFilter::DEBUG);
        assert!(levels.enabled(Level::INFO));
        assert!(levels.enabled(Level::DEBUG));
        assert!(!levels.enabled(Level::TRACE));
        assert!(!StaticLevels(LevelFilter::OFF).enabled(Level::ERROR));
    }

    #[test]
    fn to_json_falls_back_to_placeholder() {
        assert_eq!(to_json(&(1, "x")), r#"[1,"x"]"#);
        assert_eq!(to_json(&Unserializable), UNSERIALIZABLE);
    }

    #[traced_test]
    #[tokio::test]
    async fn debug_call_runs_unlogged_when_debug_is_off() {
        let calls = AtomicUsize::new(0);

        let result = logger(LevelFilter::INFO)
            .try_call(Loggable::debug("lookup"), &(1, "x"), || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, Infallible>("y".to_string())
            })
            .await;

        assert_eq!(result.unwrap(), "y");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(!logs_contain("lookup"));
    }

    #[traced_test]
    #[tokio::test]
    async fn trace_logs_arguments_result_and_timing() {
        let result = logger(LevelFilter::TRACE)
            .try_call(Loggable::debug("lookup"), &(1, "x"), || async {
                Ok::<_, Infallible>("y")
            })
            .await;

        assert_eq!(result.unwrap(), "y");
        assert!(logs_contain(r#"lookup <= [1,"x"]"#));
        assert!(logs_contain(r#"lookup => "y""#));
        logs_assert(|lines: &[&str]| {
            let timings: Vec<&&str> = lines
                .iter()
                .filter(|line| line.contains("lookup [") && line.contains("ms]"))
                .collect();
            match timings.as_slice() {
                [line] if line.contains("DEBUG") => Ok(()),
                other => Err(format!("expected one DEBUG timing line, got {:?}", other)),
            }
        });
    }

    #[traced_test]
    #[tokio::test]
    async fn events_use_the_interceptor_target() {
        logger(LevelFilter::TRACE)
            .try_call(Loggable::info("tagged"), &1, || async {
                Ok::<_, Infallible>(2)
            })
            .await
            .unwrap();

        assert!(logs_contain("hostocars_api::loggable: tagged <= 1"));
        assert!(logs_contain("hostocars_api::loggable: tagged => 2"));
        assert!(logs_contain("hostocars_api::loggable: tagged ["));
    }

    #[traced_test]
    #[test]
    fn subscriber_levels_follow_the_active_filter() {
        assert!(SubscriberLevels.enabled(Level::TRACE));
        assert!(SubscriberLevels.enabled(Level::INFO));
    }

    #[traced_test]
    #[tokio::test]
    async fn unserializable_arguments_use_placeholder() {
        let result = logger(LevelFilter::TRACE)
            .try_call(Loggable::info("store"), &Unserializable, || async {
                Ok::<_, Infallible>(42)
            })
            .await;

        assert_eq!(result.unwrap(), 42);
        assert!(logs_contain("store <= Unable to write as JSON"));
        assert!(logs_contain("store => 42"));
    }

    #[traced_test]
    #[tokio::test]
    async fn unserializable_result_uses_placeholder() {
        let result = logger(LevelFilter::TRACE)
            .try_call(Loggable::info("render"), &(), || async {
                Ok::<_, Infallible>(Unserializable)
            })
            .await;

        assert!(result.is_ok());
        assert!(logs_contain("render => Unable to write as JSON"));
    }

    #[traced_test]
    #[tokio::test]
    async fn info_call_times_at_info_without_trace() {
        logger(LevelFilter::INFO)
            .try_call(Loggable::info("persist"), &7, || async {
                Ok::<_, Infallible>(())
            })
            .await
            .unwrap();

        assert!(!logs_contain("persist <="));
        assert!(!logs_contain("persist =>"));
        logs_assert(|lines: &[&str]| {
            match lines
                .iter()
                .filter(|line| line.contains("persist [") && line.contains("INFO"))
                .count()
            {
                1 => Ok(()),
                n => Err(format!("expected one INFO timing line, got {}", n)),
            }
        });
    }

    #[traced_test]
    #[tokio::test]
    async fn errors_propagate_untouched() {
        let result: Result<u8, String> = logger(LevelFilter::TRACE)
            .try_call(Loggable::info("explode"), &(), || async {
                Err("boom".to_string())
            })
            .await;

        assert_eq!(result.unwrap_err(), "boom");
        assert!(logs_contain("explode <= null"));
        assert!(!logs_contain("explode =>"));
        assert!(!logs_contain("explode ["));
    }

    #[traced_test]
    #[tokio::test]
    async fn disabled_logger_is_a_pass_through() {
        let result = MethodLogger::disabled()
            .try_call(Loggable::info("quiet"), &1, || async { Ok::<_, Infallible>(2) })
            .await;

        assert_eq!(result.unwrap(), 2);
        assert!(!logs_contain("quiet"));
    }
}
