//! Cisco IOS-style configuration parser.

use netcfg_core::{
    AclAction, AclKind, AclRule, Config, Interface, Nat, NatPolicy, OspfNetwork, Route, Vlan,
};
use tracing::{debug, trace};

use super::tokens::{address_spec, leading_number, number_or_zero, optional_number, port_spec};
use super::{apply_if, LineOutcome, OpenBlock, ParseState};

/// Protocol keywords that mark an `access-list` line as extended.
const EXTENDED_PROTOCOLS: &[&str] = &["ip", "tcp", "udp", "icmp", "gre", "esp", "ahp", "ospf"];

/// Block openers of unmodeled kinds. Their child lines are ignored.
const FOREIGN_BLOCKS: &[&str] = &[
    "router ",
    "line ",
    "ip access-list ",
    "ip dhcp pool ",
    "route-map ",
    "class-map ",
    "policy-map ",
    "key chain ",
];

/// One classified Cisco configuration line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Vlan(u32),
    VlanName(String),
    Exit,
    Interface(String),
    Description(String),
    AccessVlan(Option<u32>),
    Dot1q(Option<u32>),
    IpAddress(String),
    NatInside,
    NatOutside,
    TrunkAllowed(String),
    RouterOspf(u32),
    ForeignBlock,
    RouterId(String),
    PassiveDefault,
    NoPassive(String),
    Network {
        network: String,
        wildcard: String,
        area: String,
    },
    SpanningTreeMode(String),
    SmtpServer,
    FtpServer,
    Route(Route),
    AccessList {
        id: u32,
        kind: AclKind,
        rule: AclRule,
    },
    NatPolicy(NatPolicy),
}

/// Classify one trimmed, non-empty line. Returns `None` for lines outside the
/// modeled subset.
pub fn classify(line: &str) -> Option<Statement> {
    let parts: Vec<&str> = line.split_whitespace().collect();

    if let Some(rest) = line.strip_prefix("vlan ") {
        // `vlan internal allocation policy ...` and friends are global settings.
        if parts.len() != 2 {
            return None;
        }
        return Some(Statement::Vlan(number_or_zero(Some(rest.trim()), "vlan id", line)));
    }
    if let Some(name) = line.strip_prefix("name ") {
        return Some(Statement::VlanName(name.trim().to_string()));
    }
    if line == "exit" {
        return Some(Statement::Exit);
    }
    if let Some(name) = line.strip_prefix("interface ") {
        return Some(Statement::Interface(name.trim().to_string()));
    }
    if let Some(text) = line.strip_prefix("description ") {
        return Some(Statement::Description(text.trim().to_string()));
    }
    if let Some(rest) = line.strip_prefix("switchport access vlan ") {
        return Some(Statement::AccessVlan(optional_number(
            Some(rest.trim()),
            "access vlan",
            line,
        )));
    }
    if line.to_ascii_lowercase().starts_with("encapsulation dot1q ") {
        return Some(Statement::Dot1q(optional_number(
            parts.get(2).copied(),
            "dot1q vlan",
            line,
        )));
    }
    if line.starts_with("ip address ") {
        // Secondary addresses are not modeled; keep the primary.
        if parts.len() < 4 || parts.get(4) == Some(&"secondary") {
            return None;
        }
        return Some(Statement::IpAddress(format!("{} {}", parts[2], parts[3])));
    }
    if line == "ip nat inside" {
        return Some(Statement::NatInside);
    }
    if line == "ip nat outside" {
        return Some(Statement::NatOutside);
    }
    if let Some(list) = line.strip_prefix("switchport trunk allowed vlan ") {
        return Some(Statement::TrunkAllowed(list.trim().to_string()));
    }
    if line.starts_with("router ospf ") {
        return Some(Statement::RouterOspf(number_or_zero(
            parts.get(2).copied(),
            "ospf process",
            line,
        )));
    }
    if FOREIGN_BLOCKS.iter().any(|prefix| line.starts_with(prefix)) {
        return Some(Statement::ForeignBlock);
    }
    if let Some(id) = line.strip_prefix("router-id ") {
        return Some(Statement::RouterId(id.trim().to_string()));
    }
    if line == "passive-interface default" {
        return Some(Statement::PassiveDefault);
    }
    if let Some(iface) = line.strip_prefix("no passive-interface ") {
        return Some(Statement::NoPassive(iface.trim().to_string()));
    }
    if line.starts_with("network ") {
        if parts.len() < 5 {
            return None;
        }
        return Some(Statement::Network {
            network: parts[1].to_string(),
            wildcard: parts[2].to_string(),
            area: parts[4].to_string(),
        });
    }
    if let Some(mode) = line.strip_prefix("spanning-tree mode ") {
        return Some(Statement::SpanningTreeMode(mode.trim().to_string()));
    }
    if line == "ip smtp server" {
        return Some(Statement::SmtpServer);
    }
    if line == "ip ftp server enable" {
        return Some(Statement::FtpServer);
    }
    if line.starts_with("ip route ") {
        if parts.len() < 5 {
            return None;
        }
        return Some(Statement::Route(Route {
            destination: parts[2].to_string(),
            mask: parts[3].to_string(),
            gateway: parts[4].to_string(),
        }));
    }
    if line.starts_with("access-list ") {
        return classify_access_list(&parts);
    }
    if line.starts_with("ip nat inside source list ") {
        return classify_nat_policy(&parts);
    }
    None
}

/// `access-list <id> <rule...>`. Numbered lists only; the rule itself never fails.
fn classify_access_list(parts: &[&str]) -> Option<Statement> {
    let id: u32 = parts.get(1)?.parse().ok()?;
    let kind = infer_acl_kind(id, parts);
    let tokens = &parts[2..];
    let rule = match kind {
        AclKind::Extended => parse_extended_rule(tokens),
        _ => parse_standard_rule(tokens),
    };
    Some(Statement::AccessList { id, kind, rule })
}

/// Extended when the ID sits in an extended window or a protocol keyword
/// follows the action.
fn infer_acl_kind(id: u32, parts: &[&str]) -> AclKind {
    if (100..=199).contains(&id) || (2000..=2699).contains(&id) {
        return AclKind::Extended;
    }
    if parts.len() >= 5 {
        let proto = parts[3].to_ascii_lowercase();
        if EXTENDED_PROTOCOLS.contains(&proto.as_str()) {
            return AclKind::Extended;
        }
    }
    AclKind::Standard
}

/// `<action> <address-spec>`.
fn parse_standard_rule(tokens: &[&str]) -> AclRule {
    let Some(action) = tokens.first().and_then(|t| AclAction::from_keyword(t)) else {
        return raw_rule(tokens);
    };
    match address_spec(&tokens[1..]) {
        Some(src) if 1 + src.used == tokens.len() => AclRule {
            action: Some(action),
            source: Some(src.addr),
            wildcard: src.wildcard,
            ..AclRule::default()
        },
        _ => raw_rule(tokens),
    }
}

/// `<action> <proto> <src> [src-port] <dst> [dst-port]`.
///
/// Port specs are only recognized for tcp and udp. Anything left over
/// (`log`, `established`...) makes the whole rule raw.
fn parse_extended_rule(tokens: &[&str]) -> AclRule {
    let (Some(action), Some(proto)) = (
        tokens.first().and_then(|t| AclAction::from_keyword(t)),
        tokens.get(1),
    ) else {
        return raw_rule(tokens);
    };
    let proto = proto.to_ascii_lowercase();
    let has_ports = proto == "tcp" || proto == "udp";
    let mut rule = AclRule {
        action: Some(action),
        ..AclRule::default()
    };
    let mut idx = 2;

    let Some(src) = address_spec(&tokens[idx..]) else {
        return raw_rule(tokens);
    };
    rule.source = Some(src.addr);
    rule.wildcard = src.wildcard;
    idx += src.used;

    if has_ports {
        if let Some((port, used)) = port_spec(&tokens[idx..]) {
            rule.src_port = Some(port);
            idx += used;
        }
    }

    let Some(dst) = address_spec(&tokens[idx..]) else {
        return raw_rule(tokens);
    };
    rule.destination = Some(dst.addr);
    rule.dst_wildcard = dst.wildcard;
    idx += dst.used;

    if has_ports {
        if let Some((port, used)) = port_spec(&tokens[idx..]) {
            rule.dst_port = Some(port);
            idx += used;
        }
    }

    if idx < tokens.len() {
        return raw_rule(tokens);
    }
    rule.protocol = Some(proto);
    rule
}

fn raw_rule(tokens: &[&str]) -> AclRule {
    let text = tokens.join(" ");
    debug!(rule = %text, "ACL rule kept verbatim");
    AclRule::raw(text)
}

/// `ip nat inside source list <acl> interface <name> [overload]`.
fn classify_nat_policy(parts: &[&str]) -> Option<Statement> {
    let acl_id = leading_number(parts.get(5)?)?;
    if parts.get(6) != Some(&"interface") {
        return None;
    }
    let outside = parts.get(7)?.to_string();
    let overload = parts[8..].contains(&"overload");
    Some(Statement::NatPolicy(NatPolicy {
        acl_id,
        outside,
        overload,
    }))
}

/// Incremental Cisco parser. Feed lines, then call [`CiscoParser::finish`].
#[derive(Debug)]
pub struct CiscoParser {
    state: ParseState,
    nat_inside: Vec<String>,
    nat_outside: Vec<String>,
}

impl Default for CiscoParser {
    fn default() -> Self {
        Self::new()
    }
}

impl CiscoParser {
    pub fn new() -> Self {
        Self {
            state: ParseState::new("cisco"),
            nat_inside: Vec::new(),
            nat_outside: Vec::new(),
        }
    }

    /// Consume one raw input line.
    pub fn feed_line(&mut self, raw: &str) -> LineOutcome {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('!') {
            return LineOutcome::Unrecognized;
        }
        let outcome = match classify(line) {
            Some(stmt) => self.apply(stmt),
            None => LineOutcome::Unrecognized,
        };
        if outcome == LineOutcome::Unrecognized {
            trace!(line, "unrecognized cisco line");
        }
        outcome
    }

    fn apply(&mut self, stmt: Statement) -> LineOutcome {
        let state = &mut self.state;
        match stmt {
            Statement::Vlan(id) => {
                state.open(OpenBlock::Vlan(Vlan { id, name: None }));
                LineOutcome::Matched
            }
            Statement::VlanName(name) => apply_if(state.vlan_mut(), |v| v.name = Some(name)),
            Statement::Exit => state.close_innermost(),
            Statement::Interface(name) => {
                state.open(OpenBlock::Interface(Interface::new(name)));
                LineOutcome::Matched
            }
            Statement::Description(text) => {
                apply_if(state.interface_mut(), |i| i.description = Some(text))
            }
            Statement::AccessVlan(vlan) | Statement::Dot1q(vlan) => {
                apply_if(state.interface_mut(), |i| i.vlan = vlan)
            }
            Statement::IpAddress(ip) => apply_if(state.interface_mut(), |i| i.ip = Some(ip)),
            Statement::TrunkAllowed(list) => {
                apply_if(state.interface_mut(), |i| i.trunk_vlans = Some(list))
            }
            Statement::NatInside => {
                let names = &mut self.nat_inside;
                apply_if(state.interface_mut(), |i| push_unique(names, &i.name))
            }
            Statement::NatOutside => {
                let names = &mut self.nat_outside;
                apply_if(state.interface_mut(), |i| push_unique(names, &i.name))
            }
            Statement::RouterOspf(process_id) => {
                state.open(OpenBlock::Ospf {
                    process_id,
                    area: None,
                });
                LineOutcome::Matched
            }
            Statement::ForeignBlock => {
                state.open(OpenBlock::Foreign);
                LineOutcome::Unrecognized
            }
            Statement::RouterId(id) => {
                if state.ospf_process().is_none() {
                    return LineOutcome::Unrecognized;
                }
                state.cfg.ospf_router_id = Some(id);
                LineOutcome::Matched
            }
            Statement::PassiveDefault => {
                if state.ospf_process().is_none() {
                    return LineOutcome::Unrecognized;
                }
                state.cfg.ospf_passive_default = true;
                LineOutcome::Matched
            }
            Statement::NoPassive(iface) => {
                if state.ospf_process().is_none() {
                    return LineOutcome::Unrecognized;
                }
                push_unique(&mut state.cfg.ospf_no_passive_ifaces, &iface);
                LineOutcome::Matched
            }
            Statement::Network {
                network,
                wildcard,
                area,
            } => {
                let Some(process_id) = state.ospf_process() else {
                    return LineOutcome::Unrecognized;
                };
                state.cfg.ospf.push(OspfNetwork {
                    process_id,
                    network,
                    wildcard,
                    area,
                });
                LineOutcome::Matched
            }
            Statement::SpanningTreeMode(mode) => {
                state.cfg.stp.mode = Some(mode);
                LineOutcome::Matched
            }
            Statement::SmtpServer => {
                state.cfg.service.smtp = true;
                LineOutcome::Matched
            }
            Statement::FtpServer => {
                state.cfg.service.ftp = true;
                LineOutcome::Matched
            }
            Statement::Route(route) => {
                state.cfg.routes.push(route);
                LineOutcome::Matched
            }
            Statement::AccessList { id, kind, rule } => {
                state.cfg.acl_entry(id, Some(kind)).rules.push(rule);
                LineOutcome::Matched
            }
            Statement::NatPolicy(policy) => {
                state.cfg.nat_rules.push(policy);
                LineOutcome::Matched
            }
        }
    }

    /// Flush open blocks and pair every NAT inside interface with every outside one.
    pub fn finish(self) -> Config {
        let mut cfg = self.state.finish();
        for inside in &self.nat_inside {
            for outside in &self.nat_outside {
                cfg.nat.push(Nat {
                    inside: inside.clone(),
                    outside: outside.clone(),
                });
            }
        }
        cfg
    }
}

/// Parse a complete Cisco configuration.
pub fn parse_cisco(text: &str) -> Config {
    let mut parser = CiscoParser::new();
    for line in text.lines() {
        parser.feed_line(line);
    }
    parser.finish()
}

fn push_unique(names: &mut Vec<String>, name: &str) {
    if !names.iter().any(|n| n == name) {
        names.push(name.to_string());
    }
}
