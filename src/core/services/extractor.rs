//! Decorator extractor - finds marker-decorated functions
//!
//! A decorator is relevant when it is a call to a bare marker name, e.g.
//! `@task(TaskSpec(name="x", ...))`. The keyword arguments of its first
//! positional argument become the descriptor configuration.

use serde::Serialize;

use super::evaluator::evaluate;
use crate::core::models::{
    MalformedDecorator, Mapping, MarkerSet, ParameterInfo, TaskDescriptor,
};
use crate::parser::{Expr, FunctionDef, ParamKind, SourceModule};

/// Descriptors found in one module, plus the decorators that were absorbed
/// as malformed
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Extraction {
    /// Descriptors in document order
    pub descriptors: Vec<TaskDescriptor>,
    /// Marker decorators without the expected shape
    pub malformed: Vec<MalformedDecorator>,
}

impl Extraction {
    /// Number of descriptors
    #[must_use]
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Check if nothing was found
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

/// Extract a descriptor for every marker decorator in the module
///
/// `async def` functions are skipped. A function with several marker
/// decorators yields one descriptor per decorator.
#[must_use]
pub fn extract_descriptors(module: &SourceModule, markers: &MarkerSet) -> Extraction {
    let mut extraction = Extraction::default();

    for func in module.functions.iter().filter(|f| !f.is_async) {
        for decorator in &func.decorators {
            let Some(marker) = decorator.callee_name() else {
                continue;
            };
            let Some(kind) = markers.kind_of(marker) else {
                continue;
            };

            let config = match spec_config(decorator) {
                Ok(config) => config,
                Err(reason) => {
                    extraction.malformed.push(MalformedDecorator {
                        function: func.name.clone(),
                        marker: marker.to_string(),
                        line: func.span.line,
                        reason: reason.to_string(),
                    });
                    Mapping::new()
                },
            };

            extraction.descriptors.push(TaskDescriptor {
                name: func.name.clone(),
                kind,
                config,
                inputs: inputs(func),
                output: func.returns.as_ref().map(evaluate),
                line: func.span.line,
            });
        }
    }

    extraction
}

/// Keyword arguments of the decorator's first positional argument
fn spec_config(decorator: &Expr) -> Result<Mapping, &'static str> {
    let Expr::Call { args, .. } = decorator else {
        return Err("decorator is not a call");
    };
    let Some(first) = args.first() else {
        return Err("decorator has no positional argument");
    };
    let Expr::Call { keywords, .. } = first else {
        return Err("first argument is not a call expression");
    };

    let config: Mapping = keywords
        .iter()
        .filter_map(|kw| kw.name.as_ref().map(|name| (name.clone(), evaluate(&kw.value))))
        .collect();

    if config.is_empty() {
        return Err("spec call has no keyword arguments");
    }
    Ok(config)
}

fn inputs(func: &FunctionDef) -> Vec<ParameterInfo> {
    func.params
        .iter()
        .filter(|p| p.kind == ParamKind::Standard)
        .map(|p| ParameterInfo {
            name: p.name.clone(),
            annotation: p.annotation.as_ref().map(evaluate),
        })
        .collect()
}
