//! Scans the route table and collects interface descriptors.

use tracing::{error, info, warn};

use crate::parser::{parse, InterfaceDescriptor};
use crate::table::RouteTable;

/// Walks one package of the route table per [`scan`](Self::scan) call.
///
/// Failures are isolated: a route that fails to parse is logged and
/// skipped, never aborting the scan or dropping already collected
/// descriptors. An unknown package yields an empty list.
pub struct InterfaceScanner<'a> {
    table: &'a RouteTable,
}

impl<'a> InterfaceScanner<'a> {
    pub fn new(table: &'a RouteTable) -> Self {
        Self { table }
    }

    /// Rebuilds descriptors from scratch on every call; nothing is cached
    /// across scans.
    #[tracing::instrument(skip(self))]
    pub fn scan(&self, package: &str) -> Vec<InterfaceDescriptor> {
        let Some(routes) = self.table.routes(package) else {
            warn!(package, "package not present in route table, skipping scan");
            return Vec::new();
        };

        let mut discovered = Vec::with_capacity(routes.len());
        for route in routes {
            match parse(route, package) {
                Ok(descriptor) => {
                    info!(
                        method = %descriptor.http_method,
                        path = %descriptor.path,
                        model = %descriptor.model_name,
                        "discovered interface"
                    );
                    discovered.push(descriptor);
                }
                Err(e) => {
                    error!(
                        route = %route.route.name,
                        error = %e,
                        "failed to parse route, skipping"
                    );
                }
            }
        }
        discovered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::RouteRegistration;
    use crate::table::RouteTableBuilder;
    use aflow_schema::{FieldSpec, ModelSchema, SchemaNode};

    struct Req;
    impl ModelSchema for Req {
        const NAME: &'static str = "Req";
        fn fields() -> Vec<FieldSpec> {
            vec![FieldSpec::new("id", SchemaNode::String)]
        }
    }

    fn table() -> RouteTable {
        let mut b = RouteTableBuilder::default();
        b.register_route("pkg", RouteRegistration::post("/ok").name("ok").model::<Req>());
        // No bound model: must be skipped without aborting the scan.
        b.register_route("pkg", RouteRegistration::post("/broken").name("broken"));
        b.register_route("pkg", RouteRegistration::get("/also-ok").name("also_ok").model::<Req>());
        b.build().unwrap()
    }

    #[test]
    fn bad_route_is_skipped_others_survive() {
        let table = table();
        let scanner = InterfaceScanner::new(&table);
        let discovered = scanner.scan("pkg");
        let names: Vec<&str> = discovered.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["ok", "also_ok"]);
    }

    #[test]
    fn unknown_package_yields_empty_list() {
        let table = table();
        let scanner = InterfaceScanner::new(&table);
        assert!(scanner.scan("does.not.exist").is_empty());
    }

    #[test]
    fn scanning_twice_is_idempotent() {
        let table = table();
        let scanner = InterfaceScanner::new(&table);
        let first = scanner.scan("pkg");
        let second = scanner.scan("pkg");
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.name, b.name);
            assert_eq!(a.path, b.path);
            assert_eq!(a.parameters.len(), b.parameters.len());
        }
    }
}
