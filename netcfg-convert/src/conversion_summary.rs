use colored::Colorize;
use netcfg_core::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionSummary {
    pub vlans: usize,
    pub interfaces: usize,
    pub routes: usize,
    pub ospf: usize,
    pub acls: usize,
    pub acl_rules: usize,
    /// ACL rules carried verbatim because they could not be decomposed.
    pub raw_rules: usize,
    pub nat: usize,
    pub nat_rules: usize,
}

pub fn summarize(cfg: &Config) -> ConversionSummary {
    let rules = cfg.acls.iter().flat_map(|acl| acl.rules.iter());
    ConversionSummary {
        vlans: cfg.vlans.len(),
        interfaces: cfg.interfaces.len(),
        routes: cfg.routes.len(),
        ospf: cfg.ospf.len(),
        acls: cfg.acls.len(),
        acl_rules: rules.clone().count(),
        raw_rules: rules.filter(|rule| rule.raw.is_some()).count(),
        nat: cfg.nat.len(),
        nat_rules: cfg.nat_rules.len(),
    }
}

pub fn render(summary: ConversionSummary) -> String {
    format!(
        "convert_summary vlans={} interfaces={} routes={} ospf={} acls={} acl_rules={} raw_rules={} nat={} nat_rules={}",
        summary.vlans,
        summary.interfaces,
        summary.routes,
        summary.ospf,
        summary.acls,
        summary.acl_rules,
        summary.raw_rules,
        summary.nat,
        summary.nat_rules
    )
}

/// [`render`] for a terminal: green, or yellow when raw rules need review.
pub fn render_colored(summary: ConversionSummary) -> String {
    let line = render(summary);
    if summary.raw_rules > 0 {
        line.yellow().to_string()
    } else {
        line.green().to_string()
    }
}
