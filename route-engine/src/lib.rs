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

//! # route-engine
//!
//! `route-engine` is a small integration-routing engine. Routes read from one endpoint,
//! shape or branch each exchange and write to other endpoints. Transports plug in as
//! components keyed by URI scheme.
//!
//! Typical usage registers components on a [`RoutingContext`], adds routes through a
//! [`RouteLoader`] (or directly from [`RouteDefinition`]s) and drives the lifecycle with
//! [`RoutingContext::start`] / [`RoutingContext::stop`].
//!
//! ## Route contract
//!
//! Registration is all-or-nothing per batch: a definition whose endpoints cannot be
//! resolved leaves the context unchanged.
//!
//! ```
//! use route_engine::{RouteDefinition, RouteError, RoutingContext, StepDefinition};
//!
//! let mut context = RoutingContext::new("doc");
//! let err = context
//!     .add_route_definitions(vec![RouteDefinition::new(
//!         "orders",
//!         "queue:orders",
//!         vec![StepDefinition::Log("received".to_string())],
//!     )])
//!     .unwrap_err();
//!
//! assert!(matches!(err, RouteError::UnknownScheme { scheme, .. } if scheme == "queue"));
//! assert!(context.routes().is_empty());
//! ```
//!
//! ## Internal architecture map
//!
//! - Exchange model: messages, headers, properties and the terminal error slot
//! - Component contracts: `Component`, `Endpoint`, `Producer`, `Consumer`
//! - Control plane: scheme registry, URI parsing and the per-URI endpoint cache
//! - Definition: route IR, loaders and the recursive step compiler
//! - Processor: pipeline, choice and message-shaping nodes
//! - Runtime: route context and the cancellable consumer loop helper
//!
//! ## Observability model
//!
//! The workspace uses `tracing` for logs/events.
//! Library code emits events with stable names from [`observability::events`] and does
//! not initialize a global subscriber. Binaries and tests are responsible for one-time
//! `tracing_subscriber` initialization at process boundaries.

pub mod component;
pub use component::{Component, Consumer, Endpoint, Producer};

mod context;
pub use context::RoutingContext;

mod control_plane;
pub use control_plane::{parse_endpoint_uri, EndpointConfig, EndpointParams, PATH_PARAM};

pub mod definition;
pub use definition::{
    ChoiceDefinition, DefinitionsLoader, RouteBuilder, RouteDefinition, RouteLoader,
    RouteSource, StepDefinition, WhenDefinition,
};

mod error;
pub use error::{BoxError, RouteError};

pub mod exchange;
pub use exchange::{Exchange, Message};

#[doc(hidden)]
pub mod observability;

pub mod processor;
pub use processor::{predicate, Expression, PipelineProcessor, Predicate, Processor};

mod route;
pub use route::{Route, RouteStatus};

pub mod runtime;
pub use runtime::{dispatch_exchange, ConsumerWorker, RouteContext};
