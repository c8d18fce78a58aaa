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

//! Control-plane layer.
//!
//! Owns scheme-to-component registration, endpoint URI parsing and the endpoint cache
//! that guarantees one endpoint instance per distinct URI string.
//!
//! ```
//! use route_engine::{parse_endpoint_uri, RouteError};
//!
//! let config = parse_endpoint_uri("file:/tmp/out.txt?append=false").unwrap();
//! assert_eq!(config.scheme, "file");
//! assert_eq!(config.params.path(), Some("/tmp/out.txt"));
//! assert_eq!(config.params.get_bool("append").unwrap(), Some(false));
//!
//! assert!(matches!(
//!     parse_endpoint_uri("no-delimiter"),
//!     Err(RouteError::MalformedUri { .. })
//! ));
//! ```

pub(crate) mod component_registry;
pub(crate) mod endpoint_cache;
pub(crate) mod endpoint_uri;

pub use endpoint_uri::{parse_endpoint_uri, EndpointConfig, EndpointParams, PATH_PARAM};
