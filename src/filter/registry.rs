//! The filter registry.
//!
//! A registry is built for one dispatch: the host applies and skips filters
//! while setting up the controller, then calls [`FilterRegistry::run`] once
//! before invoking the action itself.

use indexmap::IndexMap;
use tracing::{debug, debug_span, trace};

use super::options::{prepare_options, Condition, FilterOptions, FilterRule, Names};
use crate::controller::{ActionResolver, Controller};
use crate::error::FilterError;

/// A registered filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterEntry {
    name: String,
    rule: FilterRule,
}

impl FilterEntry {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn condition(&self) -> &Condition {
        &self.rule.condition
    }

    /// Registered through `skip` rather than `apply`.
    pub fn is_skip(&self) -> bool {
        self.rule.skip
    }

    pub fn rule(&self) -> &FilterRule {
        &self.rule
    }

    pub fn fires_for(&self, action: &str) -> bool {
        self.rule.fires_for(action)
    }
}

/// Ordered filters for a single controller dispatch.
///
/// Entries run in the order their names were first registered. Re-applying or
/// skipping a name replaces its entry in place.
pub struct FilterRegistry<'a, C, R: ?Sized> {
    controller: &'a mut C,
    router: &'a R,
    entries: IndexMap<String, FilterEntry>,
}

impl<'a, C, R> FilterRegistry<'a, C, R>
where
    C: Controller,
    R: ActionResolver + ?Sized,
{
    pub fn new(controller: &'a mut C, router: &'a R) -> Self {
        Self {
            controller,
            router,
            entries: IndexMap::new(),
        }
    }

    /// Register one or more filters to run before every action the options
    /// allow.
    ///
    /// Fails with [`FilterError::UnknownFilter`] if the controller has no
    /// operation of that name. Nothing is registered when any name fails.
    pub fn apply(
        &mut self,
        filters: impl Into<Names>,
        options: FilterOptions,
    ) -> Result<(), FilterError> {
        let rule = prepare_options(&options, false)?;
        let filters = filters.into();

        if let Some(missing) = filters.iter().find(|name| !self.controller.responds_to(name)) {
            return Err(FilterError::unknown_filter(missing));
        }

        self.store(filters, rule);
        Ok(())
    }

    /// Override previously applied filters with an inverted rule.
    ///
    /// With no options the filters never run. Fails with
    /// [`FilterError::FilterNotApplied`] for a name that has no entry yet.
    pub fn skip(
        &mut self,
        filters: impl Into<Names>,
        options: FilterOptions,
    ) -> Result<(), FilterError> {
        let rule = prepare_options(&options, true)?;
        let filters = filters.into();

        if let Some(missing) = filters.iter().find(|name| !self.entries.contains_key(*name)) {
            return Err(FilterError::not_applied(missing));
        }

        self.store(filters, rule);
        Ok(())
    }

    fn store(&mut self, filters: Names, rule: FilterRule) {
        for name in filters.into_vec() {
            debug!(
                filter = %name,
                skip = rule.skip,
                condition = %rule.condition,
                "registered filter"
            );
            let entry = FilterEntry {
                name: name.clone(),
                rule: rule.clone(),
            };
            self.entries.insert(name, entry);
        }
    }

    /// Invoke every filter that fires for the current action, in order.
    ///
    /// The first failing filter stops the chain and its error is returned as is.
    pub fn run(&mut self) -> Result<(), C::Error> {
        if self.entries.is_empty() {
            return Ok(());
        }

        let router = self.router;
        let action = router.current_action();
        let _span = debug_span!("filters", action = %action).entered();

        for entry in self.entries.values() {
            let fires = entry.fires_for(action);
            trace!(
                filter = %entry.name,
                condition = %entry.rule.condition,
                skip = entry.rule.skip,
                fires
            );
            if !fires {
                continue;
            }

            debug!(filter = %entry.name, "running filter");
            self.controller.invoke(&entry.name)?;
        }

        Ok(())
    }

    /// Names `run` would invoke for the current action, without invoking them.
    pub fn plan(&self) -> Vec<&str> {
        let action = self.router.current_action();
        self.entries
            .values()
            .filter(|entry| entry.fires_for(action))
            .map(FilterEntry::name)
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<&FilterEntry> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Entries in execution order.
    pub fn entries(&self) -> impl Iterator<Item = &FilterEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry, for hosts that reuse a registry across dispatches.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn controller(&self) -> &C {
        &*self.controller
    }

    pub fn controller_mut(&mut self) -> &mut C {
        &mut *self.controller
    }
}
