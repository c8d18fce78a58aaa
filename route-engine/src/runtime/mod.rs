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

//! Runtime integration layer.
//!
//! Holds the per-route execution context and the consumer-loop helper that adapter
//! crates use so spawning, cancellation and join behavior stay identical across
//! transports.

mod consumer_worker;
mod route_context;

pub use consumer_worker::{dispatch_exchange, ConsumerWorker};
pub use route_context::RouteContext;
