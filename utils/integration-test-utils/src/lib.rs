/********************************************************************************
 * Copyright (c) 2026 Contributors to the Eclipse Foundation
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

//! Shared fixtures for integration tests: an in-memory `mock` component, recording and
//! failing processors, and one-time logging setup.

mod mock_component;
mod processors;

pub use mock_component::{Journal, MockComponent, MockConsumer, MockEndpoint, MockProducer};
pub use processors::{FailingProcessor, RecordingProcessor};

use std::sync::Once;
use tracing_subscriber::EnvFilter;

static LOGGING: Once = Once::new();

/// Installs a test-writer subscriber once per process. `RUST_LOG` overrides the default
/// `warn` filter.
pub fn init_logging() {
    LOGGING.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}
