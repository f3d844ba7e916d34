//! Entries of the export table.

use std::fmt;

use serde::Serialize;
use zomekit_core::{Schema, Value};

use crate::context::Ctx;
use crate::handler::CallError;

/// A named, typed parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Param {
    /// Parameter name, for the manifest.
    pub name: String,
    /// Expected layout of the argument bytes.
    pub schema: Schema,
}

impl Param {
    /// Create a parameter descriptor.
    pub fn new(name: impl Into<String>, schema: Schema) -> Self {
        Self {
            name: name.into(),
            schema,
        }
    }
}

/// The calling convention of an exported function.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionSchema {
    /// Stable external name.
    pub name: String,
    /// Parameters, in argument order.
    pub params: Vec<Param>,
    /// Layout of the result bytes.
    pub returns: Schema,
}

pub(crate) type RawHandler =
    dyn Fn(&mut Ctx<'_>, Vec<Value>) -> Result<Value, CallError> + Send + Sync;

pub(crate) fn erase<F>(handler: F) -> Box<RawHandler>
where
    F: Fn(&mut Ctx<'_>, Vec<Value>) -> Result<Value, CallError> + Send + Sync + 'static,
{
    Box::new(handler)
}

/// A registered function: its calling convention plus the implementation.
///
/// Never mutated after registration.
pub(crate) struct ExportedFunction {
    pub(crate) schema: FunctionSchema,
    pub(crate) handler: Box<RawHandler>,
}

impl ExportedFunction {
    /// The function's calling convention.
    pub(crate) fn schema(&self) -> &FunctionSchema {
        &self.schema
    }

    /// Stable external name.
    pub(crate) fn name(&self) -> &str {
        &self.schema.name
    }
}

impl fmt::Debug for ExportedFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExportedFunction")
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}
