//! Zome assembly and dispatch.
//!
//! A zome is built once through [`ZomeBuilder`] and is immutable from then
//! on: [`Zome::invoke`] only reads the export table.

use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use bytes::Bytes;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use zomekit_core::{Codec, Format, RecordType, Schema, Value};
use zomekit_serde::MultiCodec;

use crate::context::Ctx;
use crate::entry::{EntryTypeDef, Link, Sharing};
use crate::error::{AppError, ConfigError, InvocationError, RegistrationError};
use crate::export::{erase, ExportedFunction, FunctionSchema, Param};
use crate::handler::{CallError, Handler};
use crate::host::HostApi;

type GenesisHook = dyn Fn(&mut Ctx<'_>) -> Result<(), AppError> + Send + Sync;

/// Name passed to the context while the genesis hook runs.
pub const GENESIS: &str = "genesis";

/// What happens when an exported function fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorHandling {
    /// Every failure is returned to the host as an [`InvocationError`].
    #[default]
    ThrowErrors,
}

/// Configuration for a zome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZomeConfig {
    /// Zome name, as shown in the manifest.
    pub name: String,

    /// Free-form description.
    pub description: String,

    /// Wire format for arguments, results and entries.
    pub format: Format,

    /// How failures are reported.
    pub error_handling: ErrorHandling,
}

impl ZomeConfig {
    /// Default configuration with the given name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Load a configuration from a JSON file. Missing keys keep their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

impl Default for ZomeConfig {
    fn default() -> Self {
        Self {
            name: "zome".to_string(),
            description: String::new(),
            format: Format::CANONICAL,
            error_handling: ErrorHandling::default(),
        }
    }
}

/// Collects registrations for a zome.
///
/// # Example
///
/// ```rust
/// use zomekit_zome::{AppError, Ctx, MemoryHost, ZomeBuilder, ZomeConfig};
///
/// fn greet(ctx: &mut Ctx<'_>, name: String) -> Result<String, AppError> {
///     ctx.debug(&name);
///     Ok(format!("hello, {}", name))
/// }
///
/// let mut builder = ZomeBuilder::new(ZomeConfig::named("greeter"));
/// builder.export("greet", &["name"], greet).unwrap();
/// let zome = builder.build().unwrap();
///
/// let mut host = MemoryHost::new();
/// let arg = zomekit_core::encode(&"ann".to_string());
/// let out = zome.invoke(&mut host, "greet", &[arg]).unwrap();
/// assert_eq!(zomekit_core::decode::<String>(&out).unwrap(), "hello, ann");
/// assert_eq!(host.debug_log(), &["\"ann\"".to_string()]);
/// ```
pub struct ZomeBuilder {
    config: ZomeConfig,
    codecs: MultiCodec,
    functions: IndexMap<String, ExportedFunction>,
    entry_types: IndexMap<String, EntryTypeDef>,
    genesis: Option<Box<GenesisHook>>,
}

impl ZomeBuilder {
    /// Start an empty zome.
    pub fn new(config: ZomeConfig) -> Self {
        Self {
            config,
            codecs: MultiCodec::with_defaults(),
            functions: IndexMap::new(),
            entry_types: IndexMap::new(),
            genesis: None,
        }
    }

    /// Make another codec available for the configured format.
    pub fn codec(&mut self, codec: impl Codec + 'static) -> &mut Self {
        self.codecs.add(codec);
        self
    }

    /// Register a function that works on decoded values.
    ///
    /// The handler receives one value per parameter, each already checked
    /// against its schema, and must return a value of the return schema.
    pub fn register<F>(
        &mut self,
        name: impl Into<String>,
        params: Vec<Param>,
        returns: Schema,
        handler: F,
    ) -> Result<&mut Self, RegistrationError>
    where
        F: Fn(&mut Ctx<'_>, Vec<Value>) -> Result<Value, AppError> + Send + Sync + 'static,
    {
        let schema = FunctionSchema {
            name: name.into(),
            params,
            returns,
        };
        let handler = erase(move |ctx, args| handler(ctx, args).map_err(CallError::Application));
        self.insert(ExportedFunction { schema, handler })
    }

    /// Register a typed function.
    ///
    /// Parameter and return schemas are derived from the handler's
    /// signature; `params` names the parameters in order.
    pub fn export<Args, H>(
        &mut self,
        name: impl Into<String>,
        params: &[&str],
        handler: H,
    ) -> Result<&mut Self, RegistrationError>
    where
        H: Handler<Args>,
    {
        let name = name.into();
        let schemas = H::param_schemas();
        if schemas.len() != params.len() {
            return Err(RegistrationError::ParamNames {
                function: name,
                arity: schemas.len(),
                given: params.len(),
            });
        }

        let schema = FunctionSchema {
            name,
            params: params
                .iter()
                .zip(schemas)
                .map(|(name, schema)| Param::new(*name, schema))
                .collect(),
            returns: H::return_schema(),
        };
        let handler = erase(move |ctx, args| handler.call(ctx, args));
        self.insert(ExportedFunction { schema, handler })
    }

    /// Declare `T` as a committable entry type.
    pub fn entry_type<T: RecordType>(
        &mut self,
        description: impl Into<String>,
        sharing: Sharing,
    ) -> Result<&mut Self, RegistrationError> {
        let def = EntryTypeDef::of::<T>(description, sharing);
        if self.entry_types.contains_key(def.name) {
            return Err(RegistrationError::DuplicateEntryType(def.name.to_string()));
        }
        tracing::debug!(zome = %self.config.name, entry_type = def.name, "declared entry type");
        self.entry_types.insert(def.name.to_string(), def);
        Ok(self)
    }

    /// Allow entries of type `S` to link to entries of type `T` under `tag`.
    ///
    /// Both types must already be declared with [`ZomeBuilder::entry_type`].
    pub fn link<S: RecordType, T: RecordType>(
        &mut self,
        tag: impl Into<String>,
    ) -> Result<&mut Self, RegistrationError> {
        let source = S::record_schema().name;
        let target = T::record_schema().name;
        if !self.entry_types.contains_key(target) {
            return Err(RegistrationError::UnknownEntryType(target.to_string()));
        }
        let def = self
            .entry_types
            .get_mut(source)
            .ok_or_else(|| RegistrationError::UnknownEntryType(source.to_string()))?;

        let tag = tag.into();
        if def.has_link(target, &tag) {
            return Err(RegistrationError::DuplicateLink {
                entry_type: source.to_string(),
                target: target.to_string(),
                tag,
            });
        }
        tracing::debug!(zome = %self.config.name, from = source, to = target, tag = %tag, "declared link");
        def.links_to.push(Link::new(target, tag));
        Ok(self)
    }

    /// Set the hook run by [`Zome::genesis`]. A later call replaces it.
    pub fn genesis<F>(&mut self, hook: F) -> &mut Self
    where
        F: Fn(&mut Ctx<'_>) -> Result<(), AppError> + Send + Sync + 'static,
    {
        self.genesis = Some(Box::new(hook));
        self
    }

    /// Freeze the registrations.
    ///
    /// Fails if no codec handles the configured format.
    pub fn build(self) -> Result<Zome, RegistrationError> {
        let codec = self.codecs.into_codec(&self.config.format)?;
        tracing::debug!(
            zome = %self.config.name,
            functions = self.functions.len(),
            entry_types = self.entry_types.len(),
            format = %self.config.format,
            "zome built"
        );
        Ok(Zome {
            config: self.config,
            codec,
            functions: self.functions,
            entry_types: self.entry_types,
            genesis: self.genesis,
            genesis_done: AtomicBool::new(false),
        })
    }

    fn insert(&mut self, function: ExportedFunction) -> Result<&mut Self, RegistrationError> {
        let name = function.name().to_string();
        if self.functions.contains_key(&name) {
            return Err(RegistrationError::DuplicateName(name));
        }
        tracing::debug!(
            zome = %self.config.name,
            function = %name,
            params = function.schema.params.len(),
            "registered function"
        );
        self.functions.insert(name, function);
        Ok(self)
    }
}

/// A built zome: an immutable export table plus its codec.
pub struct Zome {
    config: ZomeConfig,
    codec: Box<dyn Codec>,
    functions: IndexMap<String, ExportedFunction>,
    entry_types: IndexMap<String, EntryTypeDef>,
    genesis: Option<Box<GenesisHook>>,
    genesis_done: AtomicBool,
}

impl Zome {
    /// The zome's name.
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// The wire format of arguments, results and entries.
    pub fn format(&self) -> Format {
        self.codec.format()
    }

    /// The codec arguments must be encoded with.
    pub fn codec(&self) -> &dyn Codec {
        self.codec.as_ref()
    }

    /// Look up a function's calling convention.
    pub fn function(&self, name: &str) -> Option<&FunctionSchema> {
        self.functions.get(name).map(ExportedFunction::schema)
    }

    /// All functions, in registration order.
    pub fn functions(&self) -> impl Iterator<Item = &FunctionSchema> + '_ {
        self.functions.values().map(ExportedFunction::schema)
    }

    /// All declared entry types, in declaration order.
    pub fn entry_types(&self) -> impl Iterator<Item = &EntryTypeDef> + '_ {
        self.entry_types.values()
    }

    /// Call an exported function with encoded arguments.
    ///
    /// Each argument is decoded against its declared schema, the
    /// implementation runs to completion, and its result comes back encoded
    /// with the zome's codec.
    pub fn invoke(
        &self,
        host: &mut dyn HostApi,
        name: &str,
        args: &[Bytes],
    ) -> Result<Bytes, InvocationError> {
        self.dispatch(host, name, args).inspect_err(|err| {
            tracing::warn!(zome = %self.config.name, function = name, error = %err, "invocation failed");
        })
    }

    /// Run the genesis hook, if any, once per zome.
    ///
    /// After a successful run later calls return `Ok(())` without running
    /// the hook again. A failed run leaves genesis pending.
    pub fn genesis(&self, host: &mut dyn HostApi) -> Result<(), InvocationError> {
        if self.genesis_done.load(Ordering::Acquire) {
            tracing::debug!(zome = %self.config.name, "genesis already ran");
            return Ok(());
        }
        if let Some(hook) = &self.genesis {
            tracing::debug!(zome = %self.config.name, "running genesis");
            let mut ctx = Ctx::new(host, self.codec.as_ref(), &self.entry_types, GENESIS);
            hook(&mut ctx).map_err(|err| {
                tracing::warn!(zome = %self.config.name, error = %err, "genesis failed");
                InvocationError::ApplicationError(err)
            })?;
        }
        self.genesis_done.store(true, Ordering::Release);
        Ok(())
    }

    /// Check whether genesis has completed.
    pub fn genesis_done(&self) -> bool {
        self.genesis_done.load(Ordering::Acquire)
    }

    /// The export table handed to the host at load time.
    pub fn manifest(&self) -> ZomeManifest {
        ZomeManifest {
            name: self.config.name.clone(),
            description: self.config.description.clone(),
            format: self.format(),
            error_handling: self.config.error_handling,
            functions: self.functions().cloned().collect(),
            entry_types: self.entry_types().cloned().collect(),
        }
    }

    fn dispatch(
        &self,
        host: &mut dyn HostApi,
        name: &str,
        args: &[Bytes],
    ) -> Result<Bytes, InvocationError> {
        let function = self
            .functions
            .get(name)
            .ok_or_else(|| InvocationError::NotFound(name.to_string()))?;
        let params = &function.schema.params;
        if args.len() != params.len() {
            return Err(InvocationError::ArgumentCount {
                function: name.to_string(),
                expected: params.len(),
                given: args.len(),
            });
        }

        tracing::debug!(zome = %self.config.name, function = name, args = args.len(), "invoking");

        let mut values = Vec::with_capacity(args.len());
        for (index, (bytes, param)) in args.iter().zip(params).enumerate() {
            tracing::trace!(function = name, index, param = %param.name, len = bytes.len(), "decoding argument");
            let value = self
                .codec
                .decode(bytes, &param.schema)
                .map_err(|source| InvocationError::BadArgument {
                    function: name.to_string(),
                    index,
                    source,
                })?;
            values.push(value);
        }

        let mut ctx = Ctx::new(host, self.codec.as_ref(), &self.entry_types, name);
        let result = (function.handler)(&mut ctx, values).map_err(|err| match err {
            CallError::Argument { index, source } => InvocationError::BadArgument {
                function: name.to_string(),
                index,
                source,
            },
            CallError::Application(err) => InvocationError::ApplicationError(err),
        })?;

        if !result.conforms_to(&function.schema.returns) {
            return Err(InvocationError::ApplicationError(AppError::msg(format!(
                "{} returned {} where {} was declared",
                name,
                result.kind(),
                function.schema.returns
            ))));
        }

        Ok(self.codec.encode(&result))
    }
}

/// The serializable export table of a zome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZomeManifest {
    /// Zome name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Wire format of arguments, results and entries.
    pub format: Format,
    /// How failures are reported.
    pub error_handling: ErrorHandling,
    /// Exported functions, in registration order.
    pub functions: Vec<FunctionSchema>,
    /// Declared entry types, in declaration order.
    pub entry_types: Vec<EntryTypeDef>,
}

impl ZomeManifest {
    /// Render as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
