//! Interface registry for the AFlow platform.
//!
//! Host applications declare their HTTP interfaces in an explicit route
//! table (either through [`RouteTableBuilder`] directly or link-time via
//! [`RouteRegistrator`] and `inventory::submit!`). The scanner turns table
//! entries into [`InterfaceDescriptor`]s by expanding each route's bound
//! model schema, and the [`ServiceRegistrar`] reports the result to the
//! central registry over signed HTTP calls, synchronously or on a
//! supervised background task with bounded retry.

pub mod error;
pub mod parser;
pub mod registrar;
pub mod route;
pub mod scanner;
pub mod table;

pub use error::RegistryError;
pub use parser::{parse, InterfaceDescriptor, ReturnInfo};
pub use registrar::{RegistrarOptions, RegistrationHandle, ServiceRegistrar};
pub use route::{ParamLocation, RegisteredRoute, RouteDescriptor, RouteRegistration};
pub use scanner::InterfaceScanner;
pub use table::{RouteRegistrator, RouteTable, RouteTableBuilder};

// Re-exported for host code registering routes.
pub use inventory;
