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

//! # route-dsl
//!
//! Fluent sugar over the `route-engine` IR and two loaders that feed it: [`DslLoader`]
//! for programmatic [`RouteBuilder`]s and [`config::ConfigLoader`] for JSON5 route
//! documents.
//!
//! ```
//! use route_dsl::{from, StepSink};
//! use route_engine::{predicate, Expression, StepDefinition};
//!
//! let definition = from("file:in.txt")
//!     .route_id("orders")
//!     .set_header("source", Expression::constant("file"))
//!     .choice(|choice| {
//!         choice
//!             .when(predicate::body_contains("urgent"), |steps| steps.to("file:urgent.txt"))
//!             .otherwise(|steps| steps.to("file:normal.txt"))
//!     })
//!     .build();
//!
//! assert_eq!(definition.id(), "orders");
//! assert_eq!(definition.steps().len(), 2);
//! assert!(matches!(definition.steps()[1], StepDefinition::Choice(_)));
//! ```

pub mod config;
mod dsl;
mod loader;

pub use config::ConfigLoader;
pub use dsl::{from, ChoiceDsl, RouteCollection, RouteDsl, Steps, StepSink};
pub use loader::{routes_from_fn, DslLoader, FnRouteBuilder};
