//! Batch interface renaming over a whole configuration.

use netcfg_core::{transform_name, Config, InterfaceMapping, TransformOptions};
use tracing::debug;

/// Mappings and index options for one conversion. Build it (and fail on bad
/// directives) before any input is read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenamePlan {
    pub mappings: Vec<InterfaceMapping>,
    pub options: TransformOptions,
}

impl RenamePlan {
    /// Whether applying the plan can change any name.
    pub fn is_needed(&self) -> bool {
        !self.mappings.is_empty() || !self.options.is_noop()
    }

    /// Rewrite every interface name reference in `cfg` and return how many changed.
    ///
    /// Covers interface blocks, NAT inside/outside names, NAT policy outside
    /// names and OSPF no-passive names.
    pub fn apply(&self, cfg: &mut Config) -> usize {
        let mut changed = 0;
        let mut rename = |name: &mut String| {
            let renamed = transform_name(name, &self.mappings, &self.options);
            if renamed != *name {
                debug!(from = %name, to = %renamed, "renamed interface");
                *name = renamed;
                changed += 1;
            }
        };

        for iface in &mut cfg.interfaces {
            rename(&mut iface.name);
        }
        for pair in &mut cfg.nat {
            rename(&mut pair.inside);
            rename(&mut pair.outside);
        }
        for policy in &mut cfg.nat_rules {
            rename(&mut policy.outside);
        }
        for name in &mut cfg.ospf_no_passive_ifaces {
            rename(name);
        }
        changed
    }
}
