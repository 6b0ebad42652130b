use std::sync::Once;
use tracing::{debug, info};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::domain::Employee;

static TEST_SETUP: Once = Once::new();

pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        // global logging subscriber, used by all tracing log macros
        setup_test_logging();
        info!("Test Setup complete");
    });
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_test_writer()
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}

/// Small chart used across tests.
///
/// ```text
/// A (1)
/// ├── B (11)
/// │   └── C (111)
/// │       ├── D (1111)
/// │       └── E (1112)
/// │           └── F (11121)
/// └── G (14)
/// ```
pub fn scenario_chart() -> Employee {
    Employee::new(1, "A").with_subordinates(vec![
        Employee::new(11, "B").with_subordinates(vec![Employee::new(111, "C")
            .with_subordinates(vec![
                Employee::new(1111, "D"),
                Employee::new(1112, "E").with_subordinates(vec![Employee::new(11121, "F")]),
            ])]),
        Employee::new(14, "G"),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_test_setup() {
        init_test_setup();
        init_test_setup();
    }

    #[test]
    fn test_scenario_chart_shape() {
        let chart = scenario_chart();
        assert_eq!(chart.id, 1);
        assert_eq!(chart.subordinates.len(), 2);
        assert_eq!(chart.subordinates[0].subordinates[0].subordinates[1].id, 1112);
    }
}
