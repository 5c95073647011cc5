//! Declarative filter configuration.
//!
//! A controller's filters can be described as data and replayed onto a
//! registry, which keeps per-controller filter setup out of code:
//!
//! ```yaml
//! filters:
//!   - apply:
//!       filters: [authenticate, load_user]
//!       options: { except: login }
//!   - skip:
//!       filters: authenticate
//!       options: { only: health }
//! ```
//!
//! Options are passed through untouched, so an unsupported key in the file
//! fails the same way it would in code.

use serde::Deserialize;

use crate::controller::{ActionResolver, Controller};
use crate::error::{ConfigError, FilterError};
use crate::filter::{FilterOptions, FilterRegistry, Names};

/// One `apply` or `skip` call.
///
/// Written as a map with a single `apply` or `skip` key, which reads the same
/// in JSON and YAML.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawDirective")]
pub enum FilterDirective {
    Apply { filters: Names, options: FilterOptions },
    Skip { filters: Names, options: FilterOptions },
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDirective {
    apply: Option<DirectiveBody>,
    skip: Option<DirectiveBody>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct DirectiveBody {
    filters: Names,
    #[serde(default)]
    options: FilterOptions,
}

impl TryFrom<RawDirective> for FilterDirective {
    type Error = String;

    fn try_from(raw: RawDirective) -> Result<Self, Self::Error> {
        match (raw.apply, raw.skip) {
            (Some(body), None) => Ok(FilterDirective::Apply {
                filters: body.filters,
                options: body.options,
            }),
            (None, Some(body)) => Ok(FilterDirective::Skip {
                filters: body.filters,
                options: body.options,
            }),
            _ => Err("filter directive needs exactly one of `apply` or `skip`".to_string()),
        }
    }
}

/// An ordered list of filter directives.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FilterConfig {
    #[serde(default)]
    pub filters: Vec<FilterDirective>,
}

impl FilterConfig {
    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(source)?)
    }

    /// Replay every directive onto `registry`, stopping at the first error.
    pub fn apply_to<C, R>(
        &self,
        registry: &mut FilterRegistry<'_, C, R>,
    ) -> Result<(), FilterError>
    where
        C: Controller,
        R: ActionResolver + ?Sized,
    {
        registry.configure(self.filters.iter().cloned())
    }
}

impl<'a, C, R> FilterRegistry<'a, C, R>
where
    C: Controller,
    R: ActionResolver + ?Sized,
{
    /// Run a sequence of directives through `apply` and `skip`, in order.
    pub fn configure(
        &mut self,
        directives: impl IntoIterator<Item = FilterDirective>,
    ) -> Result<(), FilterError> {
        for directive in directives {
            match directive {
                FilterDirective::Apply { filters, options } => self.apply(filters, options)?,
                FilterDirective::Skip { filters, options } => self.skip(filters, options)?,
            }
        }
        Ok(())
    }
}
