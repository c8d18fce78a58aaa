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

use crate::dsl::RouteCollection;
use route_engine::{RouteBuilder, RouteDefinition, RouteError, RouteLoader, RouteSource};
use tracing::debug;

const COMPONENT: &str = "dsl_loader";

/// Loads routes from a [`RouteBuilder`]: runs `configure`, then collects the definitions.
/// A builder that yields no routes is an error.
#[derive(Clone, Copy, Debug, Default)]
pub struct DslLoader;

impl RouteLoader for DslLoader {
    fn name(&self) -> &'static str {
        "DslLoader"
    }

    fn load(&self, source: RouteSource<'_>) -> Result<Vec<RouteDefinition>, RouteError> {
        let builder = match source {
            RouteSource::Builder(builder) => builder,
            other => return Err(self.unsupported(&other)),
        };

        builder.configure()?;
        let definitions = builder.route_definitions();
        if definitions.is_empty() {
            return Err(RouteError::LoadFailed(
                "route builder produced no route definitions".to_string(),
            ));
        }
        debug!(
            component = COMPONENT,
            definitions = definitions.len(),
            "route builder configured"
        );
        Ok(definitions)
    }
}

/// [`RouteBuilder`] backed by a closure that fills a [`RouteCollection`].
pub struct FnRouteBuilder<F> {
    configure: F,
    routes: RouteCollection,
}

pub fn routes_from_fn<F>(configure: F) -> FnRouteBuilder<F>
where
    F: FnMut(&mut RouteCollection) -> Result<(), RouteError>,
{
    FnRouteBuilder {
        configure,
        routes: RouteCollection::new(),
    }
}

impl<F> RouteBuilder for FnRouteBuilder<F>
where
    F: FnMut(&mut RouteCollection) -> Result<(), RouteError>,
{
    /// Rebuilds the collection from scratch, so a builder can be loaded more than once.
    fn configure(&mut self) -> Result<(), RouteError> {
        self.routes = RouteCollection::new();
        (self.configure)(&mut self.routes)
    }

    fn route_definitions(&self) -> Vec<RouteDefinition> {
        self.routes.definitions().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::{routes_from_fn, DslLoader};
    use crate::{from, StepSink};
    use route_engine::{RouteError, RouteLoader, RouteSource};

    #[test]
    fn builder_routes_are_loaded() {
        let mut builder = routes_from_fn(|routes| {
            routes.add(from("mock:a").to("mock:out"));
            routes.add(from("mock:b").to("mock:out"));
            Ok(())
        });

        let definitions = DslLoader.load(RouteSource::Builder(&mut builder)).unwrap();
        assert_eq!(definitions.len(), 2);
        assert_eq!(definitions[1].input_uri(), "mock:b");
    }

    #[test]
    fn reloading_a_builder_does_not_repeat_routes() {
        let mut builder = routes_from_fn(|routes| {
            routes.add(from("mock:a").route_id("a").to("mock:out"));
            Ok(())
        });

        let first = DslLoader.load(RouteSource::Builder(&mut builder)).unwrap();
        let second = DslLoader.load(RouteSource::Builder(&mut builder)).unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].id(), "a");
    }

    #[test]
    fn empty_builder_is_rejected() {
        let mut builder = routes_from_fn(|_routes| Ok(()));
        assert!(matches!(
            DslLoader.load(RouteSource::Builder(&mut builder)),
            Err(RouteError::LoadFailed(_))
        ));
    }

    #[test]
    fn configure_errors_propagate() {
        let mut builder = routes_from_fn(|_routes| Err(RouteError::processing("bad builder")));
        assert!(matches!(
            DslLoader.load(RouteSource::Builder(&mut builder)),
            Err(RouteError::Processing(_))
        ));
    }

    #[test]
    fn other_sources_are_unsupported() {
        assert!(matches!(
            DslLoader.load(RouteSource::Document("{}")),
            Err(RouteError::UnsupportedSource {
                loader: "DslLoader",
                source_kind: "document"
            })
        ));
    }
}
