//! Route declarations: the input contract the scanner consumes.

use http::Method;

use aflow_schema::{ModelSchema, RecordRef, SchemaNode};

/// Route metadata attached to an interface. Immutable once built.
#[derive(Debug, Clone)]
pub struct RouteDescriptor {
    pub method: Method,
    pub path: String,
    pub description: String,
    /// Interface name shown by the registry; defaults to a method/path slug.
    pub name: String,
}

/// Where the bound model's fields travel on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamLocation {
    Query,
    Body,
    /// Resolved at build time: query for GET, body otherwise.
    Auto,
}

impl ParamLocation {
    fn resolve(self, method: &Method) -> ParamLocation {
        match self {
            ParamLocation::Auto => {
                if *method == Method::GET {
                    ParamLocation::Query
                } else {
                    ParamLocation::Body
                }
            }
            other => other,
        }
    }
}

/// Builder for one route table entry.
///
/// ```rust,ignore
/// RouteRegistration::post("/sync/department")
///     .name("sync_department")
///     .description("Synchronize department data")
///     .model::<DeptSyncRequest>()
///     .returns::<SyncResult>()
/// ```
#[derive(Debug, Clone)]
pub struct RouteRegistration {
    method: Method,
    path: String,
    name: Option<String>,
    description: String,
    location: ParamLocation,
    model: Option<RecordRef>,
    returns: Option<SchemaNode>,
}

impl RouteRegistration {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            name: None,
            description: String::new(),
            location: ParamLocation::Auto,
            model: None,
            returns: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = text.into();
        self
    }

    pub fn location(mut self, location: ParamLocation) -> Self {
        self.location = location;
        self
    }

    /// Bind the parameter model. A route without a model parses to
    /// a missing-binding error at scan time.
    pub fn model<M: ModelSchema>(mut self) -> Self {
        self.model = Some(RecordRef::of::<M>());
        self
    }

    /// Declare a structured model as the return type.
    pub fn returns<M: ModelSchema>(mut self) -> Self {
        self.returns = Some(SchemaNode::record::<M>());
        self
    }

    /// Declare a list of a structured model as the return type.
    pub fn returns_list<M: ModelSchema>(mut self) -> Self {
        self.returns = Some(SchemaNode::list(SchemaNode::record::<M>()));
        self
    }

    /// Declare an arbitrary return schema.
    pub fn returns_node(mut self, node: SchemaNode) -> Self {
        self.returns = Some(node);
        self
    }

    pub(crate) fn build(self) -> RegisteredRoute {
        let name = self.name.unwrap_or_else(|| {
            format!(
                "{}:{}",
                self.method.as_str().to_lowercase(),
                self.path.replace(['/', '{', '}'], "_")
            )
        });
        let location = self.location.resolve(&self.method);
        RegisteredRoute {
            route: RouteDescriptor {
                method: self.method,
                path: self.path,
                description: self.description,
                name,
            },
            location,
            model: self.model,
            returns: self.returns,
        }
    }
}

/// A finalized table entry: descriptor plus resolved binding.
#[derive(Debug, Clone)]
pub struct RegisteredRoute {
    pub route: RouteDescriptor,
    /// Never `Auto` after build.
    pub location: ParamLocation,
    pub model: Option<RecordRef>,
    pub returns: Option<SchemaNode>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use aflow_schema::FieldSpec;

    struct Empty;
    impl ModelSchema for Empty {
        const NAME: &'static str = "Empty";
        fn fields() -> Vec<FieldSpec> {
            Vec::new()
        }
    }

    #[test]
    fn auto_location_resolves_by_method() {
        let get = RouteRegistration::get("/users").model::<Empty>().build();
        assert_eq!(get.location, ParamLocation::Query);

        let post = RouteRegistration::post("/users").model::<Empty>().build();
        assert_eq!(post.location, ParamLocation::Body);
    }

    #[test]
    fn explicit_location_is_kept() {
        let route = RouteRegistration::post("/users")
            .location(ParamLocation::Query)
            .build();
        assert_eq!(route.location, ParamLocation::Query);
    }

    #[test]
    fn default_name_is_a_method_path_slug() {
        let route = RouteRegistration::get("/api/v1/users/{id}").build();
        assert_eq!(route.route.name, "get:_api_v1_users__id_");
    }

    #[test]
    fn explicit_name_wins() {
        let route = RouteRegistration::post("/sync/department")
            .name("sync_department")
            .build();
        assert_eq!(route.route.name, "sync_department");
    }
}
