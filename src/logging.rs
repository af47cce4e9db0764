use std::{any::Any, backtrace::Backtrace};

use tracing_subscriber::{EnvFilter, fmt};

use crate::config::LoggingConfig;

/// Installs the global subscriber and the panic hook. `RUST_LOG`, when set,
/// replaces the configured directives.
pub fn init_tracing(cfg: &LoggingConfig) {
    let subscriber = fmt()
        .with_env_filter(env_filter(&cfg.rust_log))
        .with_target(false)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        tracing::warn!("tracing subscriber already installed");
    }
    std::panic::set_hook(Box::new(|info| {
        let message = panic_message(info.payload());
        let backtrace = Backtrace::capture();
        match info.location() {
            Some(location) => tracing::error!(
                panic = %message,
                location = %location,
                backtrace = %backtrace,
                "panic"
            ),
            None => tracing::error!(panic = %message, backtrace = %backtrace, "panic"),
        }
    }));
}

fn env_filter(configured: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(configured))
        .unwrap_or_else(|_| EnvFilter::new(crate::config::defaults::DEFAULT_RUST_LOG))
}

pub fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "unknown panic"
    }
}

#[cfg(test)]
mod tests {
    use std::any::Any;

    use super::panic_message;

    #[test]
    fn reads_both_panic_payload_kinds() {
        let borrowed: Box<dyn Any + Send> = Box::new("store exploded");
        let owned: Box<dyn Any + Send> = Box::new(format!("row {} missing", 7));
        let other: Box<dyn Any + Send> = Box::new(42_u8);

        assert_eq!(panic_message(borrowed.as_ref()), "store exploded");
        assert_eq!(panic_message(owned.as_ref()), "row 7 missing");
        assert_eq!(panic_message(other.as_ref()), "unknown panic");
    }
}
