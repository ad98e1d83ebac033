use netcfg_core::{acl_id, Acl, AclAction, AclRule, Config, Interface};
use tracing::debug;

use super::{
    format_address, join_lines, ospf_processes, stp_mode_for_huawei, trunk_list_for_huawei,
    vlan_interface_id,
};

/// Render `cfg` as a Huawei VRP `system-view` session.
pub fn generate_huawei(cfg: &Config) -> String {
    let mut out = vec!["system-view".to_string()];

    if !cfg.vlans.is_empty() {
        let ids: Vec<String> = cfg.vlans.iter().map(|v| v.id.to_string()).collect();
        out.push(format!("vlan batch {}", ids.join(" ")));
        for vlan in &cfg.vlans {
            out.push(format!("vlan {}", vlan.id));
            if let Some(name) = &vlan.name {
                out.push(format!(" description {name}"));
            }
            out.push("quit".to_string());
        }
    }

    for process in ospf_processes(cfg) {
        match &cfg.ospf_router_id {
            Some(id) => out.push(format!("ospf {} router-id {id}", process.process_id)),
            None => out.push(format!("ospf {}", process.process_id)),
        }
        if cfg.ospf_passive_default {
            out.push(" silent-interface all".to_string());
            for iface in &cfg.ospf_no_passive_ifaces {
                out.push(format!(" undo silent-interface {}", huawei_interface_name(iface)));
            }
        }
        for (area, networks) in process.areas() {
            out.push(format!(" area {area}"));
            for net in networks {
                out.push(format!("  network {} {}", net.network, net.wildcard));
            }
            out.push(" quit".to_string());
        }
        out.push("quit".to_string());
    }

    if let Some(mode) = &cfg.stp.mode {
        out.push(format!("stp mode {}", stp_mode_for_huawei(mode)));
    }
    if cfg.service.smtp {
        out.push("smtp server enable".to_string());
    }
    if cfg.service.ftp {
        out.push("ftp server enable".to_string());
    }

    for iface in &cfg.interfaces {
        push_interface(&mut out, cfg, iface);
    }

    for route in &cfg.routes {
        out.push(format!(
            "ip route-static {} {} {}",
            route.destination, route.mask, route.gateway
        ));
    }

    let passthrough = cfg.device_type == "huawei";
    for acl in &cfg.acls {
        push_acl(&mut out, acl, passthrough);
    }

    if cfg.nat_rules.is_empty() {
        for (group, pair) in cfg.nat.iter().enumerate() {
            out.push(format!(
                "nat address-group {} {} {}",
                group + 1,
                pair.inside,
                pair.outside
            ));
        }
    } else {
        // Outbound NAT on interfaces that have no block of their own.
        for policy in cfg
            .nat_rules
            .iter()
            .filter(|p| !cfg.interfaces.iter().any(|i| i.name == p.outside))
        {
            out.push(format!("interface {}", huawei_interface_name(&policy.outside)));
            out.push(format!(" nat outbound {}", nat_acl_id(cfg, policy.acl_id)));
            out.push("quit".to_string());
        }
    }

    out.push("return".to_string());
    join_lines(out)
}

/// `VlanN` becomes `VlanifN`; everything else is kept.
fn huawei_interface_name(name: &str) -> String {
    match vlan_interface_id(name) {
        Some(id) => format!("Vlanif{id}"),
        None => name.to_string(),
    }
}

fn nat_acl_id(cfg: &Config, id: u32) -> u32 {
    let kind = cfg.acl_kind(id);
    if kind.is_none() {
        debug!(acl = id, "NAT policy references an unknown or untyped ACL");
    }
    acl_id::to_huawei(id, kind)
}

fn push_interface(out: &mut Vec<String>, cfg: &Config, iface: &Interface) {
    out.push(format!("interface {}", huawei_interface_name(&iface.name)));
    if let Some(desc) = &iface.description {
        out.push(format!(" description {desc}"));
    }
    if let Some(vlan) = iface.vlan {
        if iface.is_subinterface() {
            out.push(format!(" vlan-type dot1q {vlan}"));
        } else {
            out.push(" port link-type access".to_string());
            out.push(format!(" port default vlan {vlan}"));
        }
    }
    if let Some(list) = &iface.trunk_vlans {
        out.push(" port link-type trunk".to_string());
        out.push(format!(
            " port trunk allow-pass vlan {}",
            trunk_list_for_huawei(list)
        ));
    }
    if let Some(ip) = &iface.ip {
        out.push(format!(" ip address {ip}"));
    }
    for policy in cfg.nat_rules.iter().filter(|p| p.outside == iface.name) {
        out.push(format!(" nat outbound {}", nat_acl_id(cfg, policy.acl_id)));
    }
    out.push("quit".to_string());
}

fn push_acl(out: &mut Vec<String>, acl: &Acl, passthrough: bool) {
    let id = acl_id::to_huawei(acl.id, acl.kind);
    if id != acl.id {
        debug!(from = acl.id, to = id, "renumbered ACL for huawei");
    }
    out.push(format!("acl number {id}"));
    let mut numbers = RuleNumbers::new(acl);
    for rule in &acl.rules {
        match &rule.raw {
            Some(raw) if passthrough => {
                let seq = numbers.assign(rule.sequence);
                out.push(format!(" rule {seq} {raw}"));
            }
            Some(raw) => out.push(format!(" # unsupported ACL rule: {raw}")),
            None => {
                let seq = numbers.assign(rule.sequence);
                out.push(format!(" rule {seq} {}", rule_body(rule, acl)));
            }
        }
    }
    out.push("quit".to_string());
}

/// Rule numbers for one ACL. Explicit sequences are kept; the others count up
/// from 5 in steps of 5, past every number already emitted and never onto an
/// explicit one.
struct RuleNumbers {
    taken: Vec<u32>,
    next: u32,
}

impl RuleNumbers {
    const STEP: u32 = 5;

    fn new(acl: &Acl) -> Self {
        Self {
            taken: acl.rules.iter().filter_map(|r| r.sequence).collect(),
            next: Self::STEP,
        }
    }

    fn assign(&mut self, explicit: Option<u32>) -> u32 {
        let seq = match explicit {
            Some(seq) => seq,
            None => {
                while self.taken.contains(&self.next) {
                    self.next = self.next.saturating_add(Self::STEP);
                }
                self.taken.push(self.next);
                self.next
            }
        };
        self.next = self.next.max(seq.saturating_add(Self::STEP));
        seq
    }
}

/// Everything after the rule number. Address clauses are only written when set.
fn rule_body(rule: &AclRule, acl: &Acl) -> String {
    let mut words = vec![rule.action.unwrap_or(AclAction::Permit).to_string()];
    let extended = rule.is_extended_in(acl.kind);
    if extended {
        words.push(rule.protocol.clone().unwrap_or_else(|| "ip".to_string()));
    }
    if rule.source.is_some() {
        words.push(format!(
            "source {}",
            format_address(rule.source.as_deref(), rule.wildcard.as_deref())
        ));
    }
    if extended {
        if let Some(port) = &rule.src_port {
            words.push(format!("source-port {port}"));
        }
        if rule.destination.is_some() {
            words.push(format!(
                "destination {}",
                format_address(rule.destination.as_deref(), rule.dst_wildcard.as_deref())
            ));
        }
        if let Some(port) = &rule.dst_port {
            words.push(format!("destination-port {port}"));
        }
    }
    words.join(" ")
}

#[cfg(test)]
mod tests {
    use netcfg_core::{
        Acl, AclAction, AclKind, AclRule, Config, Interface, Nat, NatPolicy, OspfNetwork, Vlan,
    };
    use pretty_assertions::assert_eq;

    use super::generate_huawei;

    #[test]
    fn empty_config_is_a_bare_session() {
        assert_eq!(generate_huawei(&Config::new("cisco")), "system-view\nreturn\n");
    }

    #[test]
    fn vlans_batch_then_blocks() {
        let mut cfg = Config::new("cisco");
        cfg.vlans.push(Vlan {
            id: 10,
            name: Some("users".to_string()),
        });
        cfg.vlans.push(Vlan { id: 20, name: None });
        let text = generate_huawei(&cfg);
        assert!(text.starts_with(
            "system-view\nvlan batch 10 20\nvlan 10\n description users\nquit\nvlan 20\nquit\n"
        ));
    }

    #[test]
    fn ospf_groups_by_process_and_area() {
        let mut cfg = Config::new("cisco");
        cfg.ospf_router_id = Some("1.1.1.1".to_string());
        cfg.ospf_passive_default = true;
        cfg.ospf_no_passive_ifaces.push("Vlan10".to_string());
        for (net, area) in [("10.0.10.0", "0"), ("10.0.20.0", "1"), ("10.0.30.0", "0")] {
            cfg.ospf.push(OspfNetwork {
                process_id: 1,
                network: net.to_string(),
                wildcard: "0.0.0.255".to_string(),
                area: area.to_string(),
            });
        }
        let text = generate_huawei(&cfg);
        assert!(text.contains(
            "ospf 1 router-id 1.1.1.1\n silent-interface all\n undo silent-interface Vlanif10\n area 0\n  network 10.0.10.0 0.0.0.255\n  network 10.0.30.0 0.0.0.255\n quit\n area 1\n  network 10.0.20.0 0.0.0.255\n quit\nquit\n"
        ));
    }

    #[test]
    fn cisco_extended_acl_lands_in_advanced_range() {
        let mut cfg = Config::new("cisco");
        cfg.acls.push(Acl {
            id: 101,
            kind: Some(AclKind::Extended),
            rules: vec![AclRule {
                action: Some(AclAction::Permit),
                protocol: Some("tcp".to_string()),
                source: Some("10.0.0.0".to_string()),
                wildcard: Some("0.0.0.255".to_string()),
                src_port: Some("eq 80".to_string()),
                destination: Some("192.168.1.0".to_string()),
                dst_wildcard: Some("0.0.0.255".to_string()),
                ..AclRule::default()
            }],
        });
        let text = generate_huawei(&cfg);
        assert!(text.contains(
            "acl number 3001\n rule 5 permit tcp source 10.0.0.0 0.0.0.255 source-port eq 80 destination 192.168.1.0 0.0.0.255\nquit\n"
        ));
    }

    #[test]
    fn rule_numbers_prefer_own_sequence() {
        let mut cfg = Config::new("huawei");
        cfg.acls.push(Acl {
            id: 2000,
            kind: Some(AclKind::Basic),
            rules: vec![
                AclRule {
                    source: Some("any".to_string()),
                    ..AclRule::default()
                },
                AclRule {
                    action: Some(AclAction::Deny),
                    sequence: Some(100),
                    ..AclRule::default()
                },
                AclRule {
                    sequence: Some(7),
                    ..AclRule::raw("permit source any logging")
                },
                AclRule {
                    source: Some("10.0.0.1".to_string()),
                    wildcard: Some("0.0.0.0".to_string()),
                    ..AclRule::default()
                },
            ],
        });
        let text = generate_huawei(&cfg);
        assert!(text.contains(
            "acl number 2000\n rule 5 permit source any\n rule 100 deny\n rule 7 permit source any logging\n rule 105 permit source host 10.0.0.1\nquit\n"
        ));
    }

    #[test]
    fn generated_rule_numbers_skip_explicit_ones() {
        let mut cfg = Config::new("huawei");
        let unsequenced = |source: &str| AclRule {
            source: Some(source.to_string()),
            ..AclRule::default()
        };
        cfg.acls.push(Acl {
            id: 2000,
            kind: Some(AclKind::Basic),
            rules: vec![
                unsequenced("10.0.0.0"),
                AclRule {
                    action: Some(AclAction::Deny),
                    source: Some("any".to_string()),
                    sequence: Some(5),
                    ..AclRule::default()
                },
                unsequenced("10.0.1.0"),
            ],
        });
        let text = generate_huawei(&cfg);
        assert!(text.contains(
            "acl number 2000\n rule 10 permit source host 10.0.0.0\n rule 5 deny source any\n rule 15 permit source host 10.0.1.0\nquit\n"
        ));
    }

    #[test]
    fn comments_do_not_consume_rule_numbers() {
        let mut cfg = Config::new("cisco");
        cfg.acls.push(Acl {
            id: 10,
            kind: Some(AclKind::Standard),
            rules: vec![
                AclRule::raw("remark users"),
                AclRule {
                    source: Some("any".to_string()),
                    ..AclRule::default()
                },
            ],
        });
        let text = generate_huawei(&cfg);
        assert!(text.contains(
            "acl number 2010\n # unsupported ACL rule: remark users\n rule 5 permit source any\nquit\n"
        ));
    }

    #[test]
    fn foreign_raw_rules_become_comments() {
        let mut cfg = Config::new("cisco");
        cfg.acls.push(Acl {
            id: 10,
            kind: Some(AclKind::Standard),
            rules: vec![AclRule::raw("remark users")],
        });
        let text = generate_huawei(&cfg);
        assert!(text.contains("acl number 2010\n # unsupported ACL rule: remark users\nquit\n"));
    }

    #[test]
    fn interfaces_and_vlanif_names() {
        let mut cfg = Config::new("cisco");
        cfg.interfaces.push(Interface {
            ip: Some("10.0.10.1 255.255.255.0".to_string()),
            ..Interface::new("Vlan10")
        });
        cfg.interfaces.push(Interface {
            vlan: Some(10),
            ..Interface::new("FastEthernet0/1")
        });
        cfg.interfaces.push(Interface {
            trunk_vlans: Some("10,20-30".to_string()),
            ..Interface::new("FastEthernet0/2")
        });
        cfg.interfaces.push(Interface {
            vlan: Some(100),
            ..Interface::new("GigabitEthernet0/1.100")
        });
        let text = generate_huawei(&cfg);
        assert!(text.contains("interface Vlanif10\n ip address 10.0.10.1 255.255.255.0\nquit\n"));
        assert!(text.contains(
            "interface FastEthernet0/1\n port link-type access\n port default vlan 10\nquit\n"
        ));
        assert!(text.contains(" port link-type trunk\n port trunk allow-pass vlan 10 20 to 30\n"));
        assert!(text.contains("interface GigabitEthernet0/1.100\n vlan-type dot1q 100\nquit\n"));
    }

    #[test]
    fn nat_policies_go_inline_and_suppress_address_groups() {
        let mut cfg = Config::new("cisco");
        cfg.interfaces.push(Interface::new("GigabitEthernet0/0"));
        cfg.acls.push(Acl {
            id: 1,
            kind: Some(AclKind::Standard),
            rules: Vec::new(),
        });
        cfg.nat.push(Nat {
            inside: "Vlan10".to_string(),
            outside: "GigabitEthernet0/0".to_string(),
        });
        cfg.nat_rules.push(NatPolicy {
            acl_id: 1,
            outside: "GigabitEthernet0/0".to_string(),
            overload: true,
        });
        cfg.nat_rules.push(NatPolicy {
            acl_id: 1,
            outside: "Dialer0".to_string(),
            overload: true,
        });
        let text = generate_huawei(&cfg);
        assert!(text.contains("interface GigabitEthernet0/0\n nat outbound 2001\nquit\n"));
        assert!(text.ends_with("interface Dialer0\n nat outbound 2001\nquit\nreturn\n"));
        assert!(!text.contains("nat address-group"));
    }

    #[test]
    fn address_groups_without_policies() {
        let mut cfg = Config::new("huawei");
        cfg.nat.push(Nat {
            inside: "inside-pool".to_string(),
            outside: "outside-pool".to_string(),
        });
        assert!(generate_huawei(&cfg).contains("nat address-group 1 inside-pool outside-pool\n"));
    }
}
