//! View behavior switches.

use std::fmt;
use std::str::FromStr;

use crate::registry::AppendPolicy;

/// Default capacity of the realtime event queue.
pub const DEFAULT_EVENT_BUFFER: usize = 64;

/// How inbound realtime pushes are matched against the open subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScopePolicy {
    /// Append every push, including ones still queued from a subscription
    /// that has since been replaced.
    #[default]
    Unfiltered,

    /// Drop pushes whose subscription is not the one currently open.
    ActiveOnly,
}

impl FromStr for ScopePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "unfiltered" => Ok(Self::Unfiltered),
            "active" | "active-only" => Ok(Self::ActiveOnly),
            other => Err(format!(
                "unknown scope policy '{}', expected unfiltered or active",
                other
            )),
        }
    }
}

impl fmt::Display for ScopePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unfiltered => write!(f, "unfiltered"),
            Self::ActiveOnly => write!(f, "active"),
        }
    }
}

/// Options for [`MapSearchView`](super::MapSearchView).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewOptions {
    pub append_policy: AppendPolicy,
    pub scope_policy: ScopePolicy,
    /// Capacity of the realtime event queue.
    pub event_buffer: usize,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            append_policy: AppendPolicy::default(),
            scope_policy: ScopePolicy::default(),
            event_buffer: DEFAULT_EVENT_BUFFER,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_policy_parse() {
        assert_eq!("unfiltered".parse::<ScopePolicy>(), Ok(ScopePolicy::Unfiltered));
        assert_eq!(" Active ".parse::<ScopePolicy>(), Ok(ScopePolicy::ActiveOnly));
        assert!("strict".parse::<ScopePolicy>().is_err());
    }

    #[test]
    fn test_scope_policy_display_parses_back() {
        for policy in [ScopePolicy::Unfiltered, ScopePolicy::ActiveOnly] {
            assert_eq!(policy.to_string().parse::<ScopePolicy>(), Ok(policy));
        }
    }

    #[test]
    fn test_default_options_are_literal() {
        let options = ViewOptions::default();
        assert_eq!(options.append_policy, AppendPolicy::Literal);
        assert_eq!(options.scope_policy, ScopePolicy::Unfiltered);
        assert_eq!(options.event_buffer, DEFAULT_EVENT_BUFFER);
    }
}
