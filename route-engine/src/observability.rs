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

//! Stable event names and field formatters used in `tracing` output.
//!
//! Adapter crates reuse these so log-based assertions can match one vocabulary.

pub mod events {
    pub const COMPONENT_REGISTER: &str = "component_register";
    pub const COMPONENT_REPLACE: &str = "component_replace";

    pub const ENDPOINT_CACHE_HIT: &str = "endpoint_cache_hit";
    pub const ENDPOINT_CREATE: &str = "endpoint_create";
    pub const ENDPOINT_CREATE_FAILED: &str = "endpoint_create_failed";

    pub const ROUTES_LOAD: &str = "routes_load";
    pub const ROUTE_COMPILE: &str = "route_compile";
    pub const ROUTE_COMPILE_FAILED: &str = "route_compile_failed";
    pub const ROUTE_ADDED: &str = "route_added";
    pub const ROUTE_START: &str = "route_start";
    pub const ROUTE_START_FAILED: &str = "route_start_failed";
    pub const ROUTE_STOP: &str = "route_stop";
    pub const ROUTE_STOP_FAILED: &str = "route_stop_failed";

    pub const CONSUMER_LOOP_START: &str = "consumer_loop_start";
    pub const CONSUMER_LOOP_EXIT: &str = "consumer_loop_exit";
    pub const CONSUMER_LOOP_ABORTED: &str = "consumer_loop_aborted";

    pub const EXCHANGE_COMPLETED: &str = "exchange_completed";
    pub const EXCHANGE_FAILED: &str = "exchange_failed";
    pub const PIPELINE_SHORT_CIRCUIT: &str = "pipeline_short_circuit";
    pub const CHOICE_BRANCH_SELECTED: &str = "choice_branch_selected";
    pub const CHOICE_OTHERWISE: &str = "choice_otherwise";
    pub const CHOICE_NO_MATCH: &str = "choice_no_match";
    pub const EXCHANGE_LOG: &str = "exchange_log";

    pub const PRODUCER_START: &str = "producer_start";
    pub const PRODUCER_STOP: &str = "producer_stop";
    pub const PRODUCER_SEND_OK: &str = "producer_send_ok";
}

pub mod fields {
    use crate::exchange::Exchange;

    const BODY_PREVIEW_LIMIT: usize = 64;

    /// Short, single-line rendering of the In body for log fields.
    pub fn body_preview(exchange: &Exchange) -> String {
        let rendered = match exchange.r#in().body() {
            None => return "<empty>".to_string(),
            Some(value) => match value.as_str() {
                Some(text) => text.to_string(),
                None => value.to_string(),
            },
        };

        if rendered.chars().count() <= BODY_PREVIEW_LIMIT {
            return rendered;
        }
        let truncated: String = rendered.chars().take(BODY_PREVIEW_LIMIT).collect();
        format!("{truncated}...")
    }

    #[cfg(test)]
    mod tests {
        use super::body_preview;
        use crate::exchange::Exchange;

        #[test]
        fn body_preview_truncates_long_bodies() {
            let exchange = Exchange::with_body("x".repeat(100));
            let preview = body_preview(&exchange);

            assert_eq!(preview.len(), 67);
            assert!(preview.ends_with("..."));
        }

        #[test]
        fn body_preview_renders_empty_and_json_bodies() {
            assert_eq!(body_preview(&Exchange::new()), "<empty>");
            assert_eq!(body_preview(&Exchange::with_body(7)), "7");
        }
    }
}
