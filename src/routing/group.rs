//! Route groups and the registration API.
//!
//! # Responsibilities
//! - Own the group tree (prefixes, middleware, routes, children)
//! - Compute fully-qualified templates at registration time
//! - Freeze the tree into an immutable [`Router`]
//!
//! # Design Decisions
//! - Arena ownership: the builder owns every node, children are indices
//! - No parent links; each group records its root-to-self chain instead
//! - A group's prefix is concatenated once, when the group is created
//! - Registration is only possible before `build()` consumes the builder

use std::sync::Arc;

use axum::http::Method;

use crate::routing::error::RouterError;
use crate::routing::middleware::Middleware;
use crate::routing::pattern::PathPattern;
use crate::routing::route::{IntoHandler, RouteEntry};
use crate::routing::router::Router;

/// Index of a group inside its builder or router.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(usize);

impl GroupId {
    pub const ROOT: GroupId = GroupId(0);

    pub(crate) fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug)]
pub(crate) struct GroupNode {
    pub(crate) prefix: String,
    pub(crate) middleware: Vec<Middleware>,
    pub(crate) routes: Vec<RouteEntry>,
    pub(crate) children: Vec<GroupId>,
    /// Root-to-self chain, this group last.
    pub(crate) ancestry: Arc<[GroupId]>,
}

impl GroupNode {
    fn new(prefix: String, ancestry: Arc<[GroupId]>) -> Self {
        Self {
            prefix,
            middleware: Vec::new(),
            routes: Vec::new(),
            children: Vec::new(),
            ancestry,
        }
    }
}

/// Mutable route tree, built once before serving.
#[derive(Debug)]
pub struct RouterBuilder {
    groups: Vec<GroupNode>,
}

impl RouterBuilder {
    /// Create a builder holding only the root group (empty prefix).
    pub fn new() -> Self {
        let root = GroupNode::new(String::new(), Arc::from(vec![GroupId::ROOT]));
        Self { groups: vec![root] }
    }

    /// Handle on the root group.
    pub fn root(&mut self) -> Group<'_> {
        Group {
            builder: self,
            id: GroupId::ROOT,
        }
    }

    /// Reopen a handle on a previously created group.
    pub fn group(&mut self, id: GroupId) -> Option<Group<'_>> {
        if id.index() < self.groups.len() {
            Some(Group { builder: self, id })
        } else {
            None
        }
    }

    /// Number of groups, root included.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Freeze the tree.
    ///
    /// Each route's middleware chain is resolved here from its cached
    /// ancestry, so middleware added after a route still applies to it.
    pub fn build(self) -> Router {
        Router::from_groups(self.groups)
    }

    fn add_group(&mut self, parent: GroupId, prefix: &str) -> GroupId {
        let id = GroupId(self.groups.len());
        let parent_node = &self.groups[parent.index()];

        let full_prefix = format!("{}{}", parent_node.prefix, prefix);
        let ancestry: Arc<[GroupId]> = parent_node
            .ancestry
            .iter()
            .copied()
            .chain(std::iter::once(id))
            .collect();

        tracing::debug!(prefix = %full_prefix, depth = ancestry.len(), "Group created");

        self.groups.push(GroupNode::new(full_prefix, ancestry));
        self.groups[parent.index()].children.push(id);
        id
    }

    fn add_route(
        &mut self,
        group: GroupId,
        method: Method,
        pattern: &str,
        handler: impl IntoHandler,
    ) -> Result<(), RouterError> {
        let node = &mut self.groups[group.index()];
        let template = join_template(&node.prefix, pattern);

        let compiled = PathPattern::compile(&template).map_err(|source| RouterError::InvalidRoute {
            method: method.clone(),
            template: template.clone(),
            source,
        })?;

        tracing::debug!(method = %method, template = %template, "Route registered");

        let ancestry = Arc::clone(&node.ancestry);
        node.routes.push(RouteEntry::new(
            method,
            compiled,
            handler.into_handler(),
            ancestry,
        ));
        Ok(())
    }
}

impl Default for RouterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Join a group prefix and a local pattern with exactly one `/`.
fn join_template(prefix: &str, pattern: &str) -> String {
    format!(
        "{}/{}",
        prefix.trim_end_matches('/'),
        pattern.trim_start_matches('/')
    )
}

/// Registration handle on one group of a [`RouterBuilder`].
#[derive(Debug)]
pub struct Group<'a> {
    builder: &'a mut RouterBuilder,
    id: GroupId,
}

macro_rules! verb_shortcuts {
    ($($(#[$doc:meta])* $name:ident => $method:ident;)*) => {
        $(
            $(#[$doc])*
            #[track_caller]
            pub fn $name(&mut self, pattern: &str, handler: impl IntoHandler) -> &mut Self {
                self.route(Method::$method, pattern, handler)
            }
        )*
    };
}

impl<'a> Group<'a> {
    pub fn id(&self) -> GroupId {
        self.id
    }

    /// Full prefix, including every ancestor's.
    pub fn prefix(&self) -> &str {
        &self.builder.groups[self.id.index()].prefix
    }

    /// Create a child group whose prefix is this group's prefix followed by
    /// `prefix`.
    pub fn group(&mut self, prefix: &str) -> Group<'_> {
        let id = self.builder.add_group(self.id, prefix);
        Group {
            builder: &mut *self.builder,
            id,
        }
    }

    /// Like [`Group::group`], but keeps the handle on this group and returns
    /// only the child's id.
    pub fn add_group(&mut self, prefix: &str) -> GroupId {
        self.builder.add_group(self.id, prefix)
    }

    /// Append a middleware; it applies to this group and all descendants.
    pub fn layer(&mut self, middleware: Middleware) -> &mut Self {
        self.builder.groups[self.id.index()]
            .middleware
            .push(middleware);
        self
    }

    /// Append several middleware, outermost first.
    pub fn layers(&mut self, middleware: impl IntoIterator<Item = Middleware>) -> &mut Self {
        self.builder.groups[self.id.index()]
            .middleware
            .extend(middleware);
        self
    }

    /// Register a route, reporting malformed templates as an error.
    pub fn try_route(
        &mut self,
        method: Method,
        pattern: &str,
        handler: impl IntoHandler,
    ) -> Result<&mut Self, RouterError> {
        self.builder.add_route(self.id, method, pattern, handler)?;
        Ok(self)
    }

    /// Register a route.
    ///
    /// # Panics
    ///
    /// Panics if the template is malformed: an empty parameter name or a
    /// parameter name used twice.
    #[track_caller]
    pub fn route(&mut self, method: Method, pattern: &str, handler: impl IntoHandler) -> &mut Self {
        if let Err(err) = self.builder.add_route(self.id, method, pattern, handler) {
            panic!("{err}");
        }
        self
    }

    verb_shortcuts! {
        /// Register a `GET` route.
        get => GET;
        /// Register a `POST` route.
        post => POST;
        /// Register a `PUT` route.
        put => PUT;
        /// Register a `DELETE` route.
        delete => DELETE;
        /// Register a `PATCH` route.
        patch => PATCH;
        /// Register a `HEAD` route.
        head => HEAD;
        /// Register an `OPTIONS` route.
        options => OPTIONS;
    }
}
