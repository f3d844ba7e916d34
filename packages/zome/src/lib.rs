//! Zomekit Zome: Function Exporter
//!
//! This layer turns application functions into entry points a host runtime
//! can call with encoded arguments:
//! - `ZomeBuilder`: Registers functions, entry types and a genesis hook
//! - `Zome`: The frozen export table; `invoke` decodes, dispatches, encodes
//! - `Handler`: Typed functions with schemas derived from their signature
//! - `Ctx`: Typed access to the host for application code
//! - `HostApi`: The byte-level host facade, with `MemoryHost` for tests
//!
//! # Example
//!
//! ```rust
//! use zomekit_core::{decode, encode, record_type};
//! use zomekit_zome::{AppError, Ctx, MemoryHost, Sharing, ZomeBuilder, ZomeConfig};
//!
//! record_type! {
//!     #[derive(Debug, Clone, PartialEq)]
//!     pub struct Note {
//!         pub title: String,
//!     }
//! }
//!
//! fn create_note(ctx: &mut Ctx<'_>, title: String) -> Result<zomekit_zome::EntryHash, AppError> {
//!     Ok(ctx.commit_entry(&Note { title })?)
//! }
//!
//! let mut builder = ZomeBuilder::new(ZomeConfig::named("notes"));
//! builder.entry_type::<Note>("a note", Sharing::Public).unwrap();
//! builder.export("create_note", &["title"], create_note).unwrap();
//! let zome = builder.build().unwrap();
//!
//! let mut host = MemoryHost::new();
//! let out = zome
//!     .invoke(&mut host, "create_note", &[encode(&"groceries".to_string())])
//!     .unwrap();
//! let hash: String = decode(&out).unwrap();
//! assert_eq!(hash.len(), 64);
//! assert_eq!(host.entry_count(), 1);
//! ```

pub use bytes::Bytes;

mod context;
mod entry;
mod error;
mod export;
mod handler;
mod host;
mod memory;
mod zome;

pub use context::Ctx;
pub use entry::{EntryTypeDef, Link, Sharing};
pub use error::{AppError, ConfigError, InvocationError, RegistrationError};
pub use export::{FunctionSchema, Param};
pub use handler::{CallError, Handler};
pub use host::{EntryHash, HostApi, HostError};
pub use memory::MemoryHost;
pub use zome::{ErrorHandling, Zome, ZomeBuilder, ZomeConfig, ZomeManifest, GENESIS};
