//! Explicit route table.
//!
//! Replaces filesystem/module walking: host code submits its routes at
//! startup, either by calling [`RouteTableBuilder::register_route`] or by
//! placing a [`RouteRegistrator`] in inventory:
//!
//! ```rust,ignore
//! fn register(b: &mut RouteTableBuilder) {
//!     b.register_route("erp.orders", RouteRegistration::post("/orders").model::<OrderReq>());
//! }
//! aflow_registry::inventory::submit! { RouteRegistrator(register) }
//! ```

use crate::error::RegistryError;
use crate::route::{RegisteredRoute, RouteRegistration};

/// The function type submitted via `inventory::submit!`.
pub struct RouteRegistrator(pub fn(&mut RouteTableBuilder));

inventory::collect!(RouteRegistrator);

/// Builder fed by registrators; uniqueness enforced at build time.
#[derive(Default)]
pub struct RouteTableBuilder {
    // Insertion-ordered: package order and per-package route order are
    // exactly the registration order.
    packages: Vec<(String, Vec<RegisteredRoute>)>,
    errors: Vec<String>,
}

impl RouteTableBuilder {
    /// Register one route under a package label.
    pub fn register_route(&mut self, package: &str, registration: RouteRegistration) {
        let entry = registration.build();

        let idx = match self.packages.iter().position(|(name, _)| name == package) {
            Some(idx) => idx,
            None => {
                self.packages.push((package.to_string(), Vec::new()));
                self.packages.len() - 1
            }
        };
        let routes = &mut self.packages[idx].1;

        let duplicate = routes.iter().any(|r| {
            r.route.method == entry.route.method && r.route.path == entry.route.path
        });
        if duplicate {
            self.errors.push(format!(
                "route '{} {}' is already registered in package '{}'",
                entry.route.method, entry.route.path, package
            ));
            return;
        }

        routes.push(entry);
    }

    /// Finalize the table; configuration errors collected during
    /// registration surface here.
    pub fn build(self) -> Result<RouteTable, RegistryError> {
        if !self.errors.is_empty() {
            return Err(RegistryError::InvalidTableConfiguration {
                errors: self.errors,
            });
        }
        tracing::info!(
            packages = ?self.packages.iter().map(|(name, routes)| (name.as_str(), routes.len())).collect::<Vec<_>>(),
            "route table built"
        );
        Ok(RouteTable {
            packages: self.packages,
        })
    }
}

/// The finalized, read-only route table.
pub struct RouteTable {
    packages: Vec<(String, Vec<RegisteredRoute>)>,
}

impl RouteTable {
    /// Discover via inventory, have registrators fill the builder, then build.
    pub fn discover_and_build() -> Result<Self, RegistryError> {
        let mut b = RouteTableBuilder::default();
        for r in inventory::iter::<RouteRegistrator> {
            r.0(&mut b);
        }
        b.build()
    }

    /// Routes registered under a package, in registration order.
    pub fn routes(&self, package: &str) -> Option<&[RegisteredRoute]> {
        self.packages
            .iter()
            .find(|(name, _)| name == package)
            .map(|(_, routes)| routes.as_slice())
    }

    /// Package labels in registration order.
    pub fn packages(&self) -> impl Iterator<Item = &str> {
        self.packages.iter().map(|(name, _)| name.as_str())
    }
}

impl std::fmt::Debug for RouteTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let packages: Vec<(&str, usize)> = self
            .packages
            .iter()
            .map(|(name, routes)| (name.as_str(), routes.len()))
            .collect();
        f.debug_struct("RouteTable").field("packages", &packages).finish()
    }
}
