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

//! Route-source loading contracts.

use crate::definition::RouteDefinition;
use crate::error::RouteError;
use std::path::Path;

/// Programmatic route source. `configure` runs once before the definitions are read.
pub trait RouteBuilder {
    fn configure(&mut self) -> Result<(), RouteError>;

    fn route_definitions(&self) -> Vec<RouteDefinition>;
}

pub enum RouteSource<'a> {
    Builder(&'a mut dyn RouteBuilder),
    Path(&'a Path),
    Document(&'a str),
    Definitions(Vec<RouteDefinition>),
}

impl RouteSource<'_> {
    pub fn kind(&self) -> &'static str {
        match self {
            RouteSource::Builder(_) => "builder",
            RouteSource::Path(_) => "path",
            RouteSource::Document(_) => "document",
            RouteSource::Definitions(_) => "definitions",
        }
    }
}

/// Converts an external source into route definitions. Loaders reject source kinds they
/// do not understand with [`RouteError::UnsupportedSource`].
pub trait RouteLoader: Send + Sync {
    fn name(&self) -> &'static str;

    fn load(&self, source: RouteSource<'_>) -> Result<Vec<RouteDefinition>, RouteError>;

    fn unsupported(&self, source: &RouteSource<'_>) -> RouteError {
        RouteError::UnsupportedSource {
            loader: self.name(),
            source_kind: source.kind(),
        }
    }
}

/// Passes pre-built definitions through unchanged.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefinitionsLoader;

impl RouteLoader for DefinitionsLoader {
    fn name(&self) -> &'static str {
        "DefinitionsLoader"
    }

    fn load(&self, source: RouteSource<'_>) -> Result<Vec<RouteDefinition>, RouteError> {
        match source {
            RouteSource::Definitions(definitions) => Ok(definitions),
            other => Err(self.unsupported(&other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DefinitionsLoader, RouteLoader, RouteSource};
    use crate::definition::RouteDefinition;
    use crate::error::RouteError;

    #[test]
    fn definitions_pass_through() {
        let loaded = DefinitionsLoader
            .load(RouteSource::Definitions(vec![RouteDefinition::new(
                "a",
                "mock:in",
                Vec::new(),
            )]))
            .unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id(), "a");
    }

    #[test]
    fn documents_are_rejected() {
        let err = DefinitionsLoader
            .load(RouteSource::Document("{}"))
            .expect_err("document source");
        assert!(matches!(
            err,
            RouteError::UnsupportedSource {
                loader: "DefinitionsLoader",
                source_kind: "document"
            }
        ));
    }
}
