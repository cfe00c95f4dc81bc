use crate::diagnostics::Diagnostics;

/// The result of a [`compose()`](crate::compose()) invocation.
pub struct CompositionResult {
    pub(crate) supergraph: Option<ComposedSupergraph>,
    pub(crate) diagnostics: Diagnostics,
}

impl CompositionResult {
    /// Simplify the result data to a yes-no answer: did composition succeed?
    ///
    /// `Ok()` contains the [ComposedSupergraph].
    /// `Err()` contains all [Diagnostics].
    pub fn into_result(self) -> Result<ComposedSupergraph, Diagnostics> {
        match self.supergraph {
            Some(supergraph) => Ok(supergraph),
            None => Err(self.diagnostics),
        }
    }

    /// Composition warnings and errors.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }
}

/// A successfully composed supergraph.
#[derive(Debug)]
pub struct ComposedSupergraph {
    pub(crate) supergraph_sdl: String,
    pub(crate) api_sdl: String,
}

impl ComposedSupergraph {
    /// The full supergraph SDL, with the `join__*` machinery routers consume.
    pub fn supergraph_sdl(&self) -> &str {
        &self.supergraph_sdl
    }

    /// The client-facing schema: the supergraph without federation machinery and without
    /// `@inaccessible` elements.
    pub fn api_sdl(&self) -> &str {
        &self.api_sdl
    }
}
