use netcfg_core::{acl_id, Acl, AclAction, Config, Interface};
use tracing::debug;

use super::{
    format_address, join_lines, ospf_processes, stp_mode_for_cisco, trunk_list_for_cisco, unique,
};

/// Render `cfg` as a Cisco IOS configuration session.
pub fn generate_cisco(cfg: &Config) -> String {
    let nat_inside = unique(cfg.nat.iter().map(|n| n.inside.as_str()));
    let nat_outside = unique(cfg.nat.iter().map(|n| n.outside.as_str()));

    let mut out = vec!["enable".to_string(), "configure terminal".to_string()];

    for vlan in &cfg.vlans {
        out.push(format!("vlan {}", vlan.id));
        if let Some(name) = &vlan.name {
            out.push(format!(" name {name}"));
        }
        out.push(" exit".to_string());
    }

    for process in ospf_processes(cfg) {
        out.push(format!("router ospf {}", process.process_id));
        if let Some(id) = &cfg.ospf_router_id {
            out.push(format!(" router-id {id}"));
        }
        if cfg.ospf_passive_default {
            out.push(" passive-interface default".to_string());
            for iface in &cfg.ospf_no_passive_ifaces {
                out.push(format!(" no passive-interface {iface}"));
            }
        }
        for net in &process.networks {
            out.push(format!(
                " network {} {} area {}",
                net.network, net.wildcard, net.area
            ));
        }
        out.push(" exit".to_string());
    }

    if let Some(mode) = &cfg.stp.mode {
        out.push(format!("spanning-tree mode {}", stp_mode_for_cisco(mode)));
    }
    if cfg.service.smtp {
        out.push("ip smtp server".to_string());
    }
    if cfg.service.ftp {
        out.push("ip ftp server enable".to_string());
    }

    for iface in &cfg.interfaces {
        push_interface(&mut out, iface, &nat_inside, &nat_outside);
    }

    for route in &cfg.routes {
        out.push(format!(
            "ip route {} {} {}",
            route.destination, route.mask, route.gateway
        ));
    }

    let passthrough = cfg.device_type == "cisco";
    for acl in &cfg.acls {
        push_acl(&mut out, acl, passthrough);
    }

    for policy in &cfg.nat_rules {
        let id = acl_id::to_cisco(policy.acl_id, cfg.acl_kind(policy.acl_id));
        let mut line = format!("ip nat inside source list {id} interface {}", policy.outside);
        if policy.overload {
            line.push_str(" overload");
        }
        out.push(line);
    }
    // NAT roles for interfaces that have no block of their own.
    let known = |name: &str| cfg.interfaces.iter().any(|i| i.name == name);
    for (names, role) in [(&nat_inside, "inside"), (&nat_outside, "outside")] {
        for name in names.iter().filter(|n| !known(n)) {
            out.push(format!("interface {name}"));
            out.push(format!(" ip nat {role}"));
            out.push(" exit".to_string());
        }
    }

    out.push("end".to_string());
    join_lines(out)
}

fn push_interface(
    out: &mut Vec<String>,
    iface: &Interface,
    nat_inside: &[&str],
    nat_outside: &[&str],
) {
    out.push(format!("interface {}", iface.name));
    if let Some(desc) = &iface.description {
        out.push(format!(" description {desc}"));
    }
    if let Some(list) = &iface.trunk_vlans {
        out.push(" switchport mode trunk".to_string());
        out.push(format!(
            " switchport trunk allowed vlan {}",
            trunk_list_for_cisco(list)
        ));
    }
    if let Some(vlan) = iface.vlan {
        if iface.is_subinterface() {
            out.push(format!(" encapsulation dot1Q {vlan}"));
        } else {
            out.push(format!(" switchport access vlan {vlan}"));
        }
    }
    if let Some(ip) = &iface.ip {
        out.push(format!(" ip address {ip}"));
    }
    if nat_inside.contains(&iface.name.as_str()) {
        out.push(" ip nat inside".to_string());
    }
    if nat_outside.contains(&iface.name.as_str()) {
        out.push(" ip nat outside".to_string());
    }
    out.push(" exit".to_string());
}

fn push_acl(out: &mut Vec<String>, acl: &Acl, passthrough: bool) {
    let id = acl_id::to_cisco(acl.id, acl.kind);
    if id != acl.id {
        debug!(from = acl.id, to = id, "renumbered ACL for cisco");
    }
    for rule in &acl.rules {
        if let Some(raw) = &rule.raw {
            if passthrough {
                out.push(format!("access-list {id} {raw}"));
            } else {
                out.push(format!("! unsupported ACL rule: {raw}"));
            }
            continue;
        }
        let action = rule.action.unwrap_or(AclAction::Permit);
        let source = format_address(rule.source.as_deref(), rule.wildcard.as_deref());
        if !rule.is_extended_in(acl.kind) {
            out.push(format!("access-list {id} {action} {source}"));
            continue;
        }
        let proto = rule.protocol.as_deref().unwrap_or("ip");
        let mut line = format!("access-list {id} {action} {proto} {source}");
        if let Some(port) = &rule.src_port {
            line.push(' ');
            line.push_str(port);
        }
        line.push(' ');
        line.push_str(&format_address(
            rule.destination.as_deref(),
            rule.dst_wildcard.as_deref(),
        ));
        if let Some(port) = &rule.dst_port {
            line.push(' ');
            line.push_str(port);
        }
        out.push(line);
    }
}
