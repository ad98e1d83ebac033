//! Huawei VRP-style configuration parser.

use netcfg_core::{
    AclAction, AclKind, AclRule, Config, Interface, Nat, NatPolicy, OspfNetwork, Route, Vlan,
};
use tracing::{debug, trace};

use super::tokens::{
    address_spec, canonical_vlan_interface, leading_number, number_or_zero, optional_number,
    port_spec,
};
use super::{apply_if, LineOutcome, OpenBlock, ParseState};

/// Assignable 802.1Q VLAN IDs.
const VLAN_IDS: std::ops::RangeInclusive<u32> = 1..=4094;

const RULE_PROTOCOLS: &[&str] = &["ip", "tcp", "udp", "icmp", "gre"];

/// Block openers of unmodeled kinds. Their child lines are ignored.
const FOREIGN_BLOCKS: &[&str] = &[
    "bgp ",
    "isis ",
    "rip ",
    "user-interface ",
    "route-policy ",
    "ip pool ",
    "traffic classifier ",
    "traffic behavior ",
];

/// One classified Huawei configuration line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    VlanBatch(Vec<u32>),
    Vlan(u32),
    Description(String),
    Quit,
    Interface(String),
    PortDefaultVlan(Option<u32>),
    Dot1q(Option<u32>),
    IpAddress(String),
    PortLinkType,
    TrunkAllowPass(String),
    Ospf {
        process_id: u32,
        router_id: Option<String>,
    },
    ForeignBlock,
    RouterId(String),
    SilentAll,
    UndoSilent(String),
    Area(String),
    Network { network: String, wildcard: String },
    AddressGroup(Nat),
    /// ACL ID, and whether the interface address is used (Easy-IP, no address group).
    NatOutbound { acl_id: u32, easy_ip: bool },
    SmtpServer,
    FtpServer,
    StpMode(String),
    Route(Route),
    Acl(u32),
    Rule(AclRule),
}

/// Classify one trimmed, non-empty line. Returns `None` for lines outside the
/// modeled subset.
pub fn classify(line: &str) -> Option<Statement> {
    let parts: Vec<&str> = line.split_whitespace().collect();

    if let Some(list) = line.strip_prefix("vlan batch ") {
        return Some(Statement::VlanBatch(expand_vlan_batch(list)));
    }
    if line.starts_with("vlan ") {
        if parts.len() != 2 {
            return None;
        }
        return Some(Statement::Vlan(number_or_zero(parts.get(1).copied(), "vlan id", line)));
    }
    if let Some(text) = line.strip_prefix("description ") {
        return Some(Statement::Description(text.trim().to_string()));
    }
    if line == "quit" {
        return Some(Statement::Quit);
    }
    if let Some(name) = line.strip_prefix("interface ") {
        return Some(Statement::Interface(canonical_vlan_interface(name)));
    }
    if let Some(rest) = line.strip_prefix("port default vlan ") {
        return Some(Statement::PortDefaultVlan(optional_number(
            Some(rest.trim()),
            "default vlan",
            line,
        )));
    }
    if line.to_ascii_lowercase().starts_with("vlan-type dot1q ") {
        // `vlan-type dot1q 100` or `vlan-type dot1q vid 100`
        let token = match parts.get(2) {
            Some(word) if word.eq_ignore_ascii_case("vid") => parts.get(3),
            other => other,
        };
        return Some(Statement::Dot1q(optional_number(
            token.copied(),
            "dot1q vlan",
            line,
        )));
    }
    if line.starts_with("ip address ") {
        if parts.len() < 4 || parts.get(4) == Some(&"sub") {
            return None;
        }
        return Some(Statement::IpAddress(format!("{} {}", parts[2], parts[3])));
    }
    if line.starts_with("port link-type ") {
        return Some(Statement::PortLinkType);
    }
    if let Some(list) = line.strip_prefix("port trunk allow-pass vlan ") {
        return Some(Statement::TrunkAllowPass(list.trim().to_string()));
    }
    if line.starts_with("ospf ") {
        // `ospf cost 10` and friends inside interfaces are not process headers.
        let process_id: u32 = parts.get(1)?.parse().ok()?;
        let router_id = match parts.get(2) {
            Some(&"router-id") => parts.get(3).map(|id| (*id).to_string()),
            _ => None,
        };
        return Some(Statement::Ospf {
            process_id,
            router_id,
        });
    }
    if line == "aaa" || FOREIGN_BLOCKS.iter().any(|prefix| line.starts_with(prefix)) {
        return Some(Statement::ForeignBlock);
    }
    if let Some(id) = line.strip_prefix("router-id ") {
        return Some(Statement::RouterId(id.trim().to_string()));
    }
    if line == "silent-interface all" {
        return Some(Statement::SilentAll);
    }
    if let Some(iface) = line.strip_prefix("undo silent-interface ") {
        return Some(Statement::UndoSilent(canonical_vlan_interface(iface)));
    }
    if line.starts_with("area ") {
        return Some(Statement::Area(parts.get(1)?.to_string()));
    }
    if line.starts_with("network ") {
        if parts.len() < 3 {
            return None;
        }
        return Some(Statement::Network {
            network: parts[1].to_string(),
            wildcard: parts[2].to_string(),
        });
    }
    if line.starts_with("nat address-group ") {
        if parts.len() < 5 {
            return None;
        }
        return Some(Statement::AddressGroup(Nat {
            inside: parts[parts.len() - 2].to_string(),
            outside: parts[parts.len() - 1].to_string(),
        }));
    }
    if line.starts_with("nat outbound ") {
        let acl_id = parts.get(2).and_then(|t| leading_number(t))?;
        return Some(Statement::NatOutbound {
            acl_id,
            easy_ip: !parts.contains(&"address-group"),
        });
    }
    if line == "smtp server enable" {
        return Some(Statement::SmtpServer);
    }
    if line == "ftp server enable" {
        return Some(Statement::FtpServer);
    }
    if let Some(mode) = line.strip_prefix("stp mode ") {
        return Some(Statement::StpMode(mode.trim().to_string()));
    }
    if line.starts_with("ip route-static ") {
        if parts.len() < 5 {
            return None;
        }
        return Some(Statement::Route(Route {
            destination: parts[2].to_string(),
            mask: parts[3].to_string(),
            gateway: parts[4].to_string(),
        }));
    }
    if line.starts_with("acl ") {
        // `acl number 3000` or `acl 3000`
        let token = match parts.get(1) {
            Some(&"number") => parts.get(2),
            other => other,
        };
        return Some(Statement::Acl(token?.parse().ok()?));
    }
    if line.starts_with("rule ") {
        return parse_rule(&parts[1..]).map(Statement::Rule);
    }
    None
}

/// `10 20 30 to 40` as individual IDs. Unreadable tokens are skipped.
fn expand_vlan_batch(list: &str) -> Vec<u32> {
    let tokens: Vec<&str> = list.split_whitespace().collect();
    let mut ids = Vec::new();
    let mut idx = 0;
    while idx < tokens.len() {
        let Some(start) = leading_number(tokens[idx]) else {
            debug!(token = tokens[idx], "skipping unreadable vlan batch token");
            idx += 1;
            continue;
        };
        match (tokens.get(idx + 1), tokens.get(idx + 2)) {
            (Some(&"to"), Some(end)) => {
                match leading_number(end) {
                    Some(end) if end >= start => {
                        let low = start.max(*VLAN_IDS.start());
                        let high = end.min(*VLAN_IDS.end());
                        if low != start || high != end {
                            debug!(start, end, "clamping vlan batch range to 1-4094");
                        }
                        if low <= high {
                            ids.extend(low..=high);
                        }
                    }
                    _ => debug!(start, end = *end, "skipping unreadable vlan batch range"),
                }
                idx += 3;
            }
            _ => {
                if VLAN_IDS.contains(&start) {
                    ids.push(start);
                } else {
                    debug!(id = start, "skipping out-of-range vlan batch id");
                }
                idx += 1;
            }
        }
    }
    ids
}

/// `[seq] <permit|deny> [proto] {source S | destination D | source-port P | destination-port P}*`.
///
/// Returns `None` only when there is no action token at all.
fn parse_rule(tokens: &[&str]) -> Option<AclRule> {
    let sequence = tokens.first().and_then(|t| t.parse::<u32>().ok());
    let action_idx = usize::from(sequence.is_some());
    let body = tokens.get(action_idx..).filter(|body| !body.is_empty())?;

    let raw = || {
        let text = body.join(" ");
        debug!(rule = %text, "ACL rule kept verbatim");
        AclRule {
            sequence,
            ..AclRule::raw(text)
        }
    };

    let Some(action) = AclAction::from_keyword(body[0]) else {
        return Some(raw());
    };
    let mut rule = AclRule {
        action: Some(action),
        sequence,
        ..AclRule::default()
    };
    let mut idx = 1;
    if let Some(proto) = body.get(idx).map(|t| t.to_ascii_lowercase()) {
        if RULE_PROTOCOLS.contains(&proto.as_str()) {
            rule.protocol = Some(proto);
            idx += 1;
        }
    }

    while idx < body.len() {
        let rest = &body[idx + 1..];
        match body[idx].to_ascii_lowercase().as_str() {
            "source" => {
                let Some(src) = address_spec(rest) else {
                    return Some(raw());
                };
                rule.source = Some(src.addr);
                rule.wildcard = src.wildcard;
                idx += 1 + src.used;
            }
            "destination" => {
                let Some(dst) = address_spec(rest) else {
                    return Some(raw());
                };
                rule.destination = Some(dst.addr);
                rule.dst_wildcard = dst.wildcard;
                idx += 1 + dst.used;
            }
            "source-port" => {
                let Some((port, used)) = port_spec(rest) else {
                    return Some(raw());
                };
                rule.src_port = Some(port);
                idx += 1 + used;
            }
            "destination-port" => {
                let Some((port, used)) = port_spec(rest) else {
                    return Some(raw());
                };
                rule.dst_port = Some(port);
                idx += 1 + used;
            }
            _ => return Some(raw()),
        }
    }
    Some(rule)
}

fn infer_acl_kind(id: u32) -> AclKind {
    if (3000..=3999).contains(&id) {
        AclKind::Advanced
    } else {
        AclKind::Basic
    }
}

/// Incremental Huawei parser. Feed lines, then call [`HuaweiParser::finish`].
#[derive(Debug)]
pub struct HuaweiParser {
    state: ParseState,
}

impl Default for HuaweiParser {
    fn default() -> Self {
        Self::new()
    }
}

impl HuaweiParser {
    pub fn new() -> Self {
        Self {
            state: ParseState::new("huawei"),
        }
    }

    /// Consume one raw input line.
    pub fn feed_line(&mut self, raw: &str) -> LineOutcome {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            return LineOutcome::Unrecognized;
        }
        let outcome = match classify(line) {
            Some(stmt) => self.apply(stmt),
            None => LineOutcome::Unrecognized,
        };
        if outcome == LineOutcome::Unrecognized {
            trace!(line, "unrecognized huawei line");
        }
        outcome
    }

    fn apply(&mut self, stmt: Statement) -> LineOutcome {
        let state = &mut self.state;
        match stmt {
            Statement::VlanBatch(ids) => {
                for id in ids {
                    state.cfg.upsert_vlan(Vlan { id, name: None });
                }
                LineOutcome::Matched
            }
            Statement::Vlan(id) => {
                state.open(OpenBlock::Vlan(Vlan { id, name: None }));
                LineOutcome::Matched
            }
            Statement::Description(text) => match &mut state.open {
                OpenBlock::Vlan(vlan) => {
                    vlan.name = Some(text);
                    LineOutcome::Matched
                }
                OpenBlock::Interface(iface) => {
                    iface.description = Some(text);
                    LineOutcome::Matched
                }
                _ => LineOutcome::Unrecognized,
            },
            Statement::Quit => state.close_innermost(),
            Statement::Interface(name) => {
                state.open(OpenBlock::Interface(Interface::new(name)));
                LineOutcome::Matched
            }
            Statement::PortDefaultVlan(vlan) | Statement::Dot1q(vlan) => {
                apply_if(state.interface_mut(), |i| i.vlan = vlan)
            }
            Statement::IpAddress(ip) => apply_if(state.interface_mut(), |i| i.ip = Some(ip)),
            Statement::PortLinkType => apply_if(state.interface_mut(), |_| {}),
            Statement::TrunkAllowPass(list) => {
                apply_if(state.interface_mut(), |i| i.trunk_vlans = Some(list))
            }
            Statement::Ospf {
                process_id,
                router_id,
            } => {
                state.open(OpenBlock::Ospf {
                    process_id,
                    area: None,
                });
                if router_id.is_some() {
                    state.cfg.ospf_router_id = router_id;
                }
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
            Statement::SilentAll => {
                if state.ospf_process().is_none() {
                    return LineOutcome::Unrecognized;
                }
                state.cfg.ospf_passive_default = true;
                LineOutcome::Matched
            }
            Statement::UndoSilent(iface) => {
                if state.ospf_process().is_none() {
                    return LineOutcome::Unrecognized;
                }
                if !state.cfg.ospf_no_passive_ifaces.contains(&iface) {
                    state.cfg.ospf_no_passive_ifaces.push(iface);
                }
                LineOutcome::Matched
            }
            Statement::Area(id) => match &mut state.open {
                OpenBlock::Ospf { area, .. } => {
                    *area = Some(id);
                    LineOutcome::Matched
                }
                _ => LineOutcome::Unrecognized,
            },
            Statement::Network { network, wildcard } => {
                let OpenBlock::Ospf {
                    process_id,
                    area: Some(area),
                } = &state.open
                else {
                    return LineOutcome::Unrecognized;
                };
                let entry = OspfNetwork {
                    process_id: *process_id,
                    network,
                    wildcard,
                    area: area.clone(),
                };
                state.cfg.ospf.push(entry);
                LineOutcome::Matched
            }
            Statement::AddressGroup(pair) => {
                state.cfg.nat.push(pair);
                LineOutcome::Matched
            }
            Statement::NatOutbound { acl_id, easy_ip } => {
                let Some(outside) = state.interface_mut().map(|i| i.name.clone()) else {
                    return LineOutcome::Unrecognized;
                };
                state.cfg.nat_rules.push(NatPolicy {
                    acl_id,
                    outside,
                    overload: easy_ip,
                });
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
            Statement::StpMode(mode) => {
                state.cfg.stp.mode = Some(mode);
                LineOutcome::Matched
            }
            Statement::Route(route) => {
                state.cfg.routes.push(route);
                LineOutcome::Matched
            }
            Statement::Acl(id) => {
                state.open(OpenBlock::Acl(id));
                state.cfg.acl_entry(id, Some(infer_acl_kind(id)));
                LineOutcome::Matched
            }
            Statement::Rule(rule) => {
                let Some(id) = state.acl_id() else {
                    return LineOutcome::Unrecognized;
                };
                state.cfg.acl_entry(id, Some(infer_acl_kind(id))).rules.push(rule);
                LineOutcome::Matched
            }
        }
    }

    /// Flush whatever block is still open.
    pub fn finish(self) -> Config {
        self.state.finish()
    }
}

/// Parse a complete Huawei configuration.
pub fn parse_huawei(text: &str) -> Config {
    let mut parser = HuaweiParser::new();
    for line in text.lines() {
        parser.feed_line(line);
    }
    parser.finish()
}
