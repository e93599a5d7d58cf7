use std::{fmt, sync::Arc};

use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Success,
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        };
        f.write_str(label)
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, severity: Severity);
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn notify(&self, message: &str, severity: Severity) {
        (**self).notify(message, severity);
    }
}

impl<N: Notifier + ?Sized> Notifier for Arc<N> {
    fn notify(&self, message: &str, severity: Severity) {
        (**self).notify(message, severity);
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Success | Severity::Info => info!(%severity, "{message}"),
            Severity::Warning => warn!(%severity, "{message}"),
            Severity::Error => error!(%severity, "{message}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Collect(Mutex<Vec<Severity>>);

    impl Notifier for Collect {
        fn notify(&self, _message: &str, severity: Severity) {
            self.0.lock().expect("collect").push(severity);
        }
    }

    #[test]
    fn severity_labels() {
        assert_eq!(Severity::Warning.to_string(), "warning");
        assert_eq!(Severity::Success.to_string(), "success");
    }

    #[test]
    fn shared_and_borrowed_notifiers_forward() {
        let sink = Arc::new(Collect::default());
        sink.notify("a", Severity::Info);
        (&*sink).notify("b", Severity::Error);
        TracingNotifier.notify("c", Severity::Warning);
        assert_eq!(
            *sink.0.lock().expect("collect"),
            vec![Severity::Info, Severity::Error]
        );
    }
}
