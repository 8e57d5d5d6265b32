//! Context handed to every rule invocation.
//!
//! The context bundles the collaborators a rule may consult: the catalog, the
//! column factory, configuration, trigger lookup and the DML wrapper builders.
//! Everything is behind `Arc`, so cloning a context to hand it to another worker
//! thread is cheap, and all of it is read-only except the column factory, which
//! is thread safe.

use std::sync::Arc;

use crate::expression::AllocScope;
use crate::metadata::{ColumnFactory, MetadataAccessor};

mod builders;
pub use builders::*;
mod config;
pub use config::*;
mod triggers;
pub use triggers::*;

#[derive(Clone)]
pub struct OptimizerContext {
    md_accessor: Arc<dyn MetadataAccessor>,
    column_factory: Arc<ColumnFactory>,
    config: Arc<OptimizerConfig>,
    triggers: Arc<dyn TriggerLookup>,
    builders: Arc<dyn DmlBuilders>,
}

impl OptimizerContext {
    /// Context with default configuration, no triggers and the default builders.
    pub fn new(md_accessor: Arc<dyn MetadataAccessor>) -> Self {
        Self {
            md_accessor,
            column_factory: Arc::new(ColumnFactory::new()),
            config: Arc::new(OptimizerConfig::default()),
            triggers: Arc::new(NoTriggers),
            builders: Arc::new(DefaultDmlBuilders),
        }
    }

    pub fn with_column_factory(mut self, column_factory: Arc<ColumnFactory>) -> Self {
        self.column_factory = column_factory;
        self
    }

    pub fn with_config(mut self, config: OptimizerConfig) -> Self {
        self.config = Arc::new(config);
        self
    }

    pub fn with_triggers(mut self, triggers: Arc<dyn TriggerLookup>) -> Self {
        self.triggers = triggers;
        self
    }

    pub fn with_builders(mut self, builders: Arc<dyn DmlBuilders>) -> Self {
        self.builders = builders;
        self
    }

    pub fn md_accessor(&self) -> &dyn MetadataAccessor {
        &*self.md_accessor
    }

    pub fn column_factory(&self) -> &ColumnFactory {
        &self.column_factory
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    pub fn triggers(&self) -> &dyn TriggerLookup {
        &*self.triggers
    }

    pub fn builders(&self) -> &dyn DmlBuilders {
        &*self.builders
    }

    /// Fresh allocation scope for one rule invocation.
    pub fn alloc_scope(&self) -> AllocScope {
        AllocScope::new(self.config.xform_node_budget)
    }
}
