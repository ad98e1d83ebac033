use netcfg_core::{Acl, Config, Interface, NatPolicy, Vlan};

/// Render the parsed model as an indented outline, one section per heading.
pub fn render_outline(cfg: &Config) -> String {
    let mut out = vec![format!("device_type={}", cfg.device_type)];

    section(&mut out, "vlans", cfg.vlans.iter().map(vlan_line));
    section(&mut out, "interfaces", cfg.interfaces.iter().map(interface_line));
    section(
        &mut out,
        "ospf",
        cfg.ospf.iter().map(|o| {
            format!(
                "process={} area={} network={} {}",
                o.process_id, o.area, o.network, o.wildcard
            )
        }),
    );
    section(
        &mut out,
        "routes",
        cfg.routes
            .iter()
            .map(|r| format!("{} {} via {}", r.destination, r.mask, r.gateway)),
    );
    section(&mut out, "acls", cfg.acls.iter().map(acl_line));
    section(
        &mut out,
        "nat",
        cfg.nat.iter().map(|n| format!("{} -> {}", n.inside, n.outside)),
    );
    section(&mut out, "nat_rules", cfg.nat_rules.iter().map(nat_policy_line));

    if let Some(mode) = &cfg.stp.mode {
        out.push(format!("stp mode={mode}"));
    }
    if !cfg.service.is_empty() {
        out.push(format!(
            "service smtp={} ftp={}",
            cfg.service.smtp, cfg.service.ftp
        ));
    }

    let mut text = out.join("\n");
    text.push('\n');
    text
}

fn vlan_line(vlan: &Vlan) -> String {
    match &vlan.name {
        Some(name) => format!("{} {name}", vlan.id),
        None => vlan.id.to_string(),
    }
}

fn interface_line(iface: &Interface) -> String {
    let mut line = iface.name.clone();
    if let Some(vlan) = iface.vlan {
        line.push_str(&format!(" vlan={vlan}"));
    }
    if let Some(ip) = &iface.ip {
        line.push_str(&format!(" ip={}", ip.replace(' ', "/")));
    }
    if let Some(list) = &iface.trunk_vlans {
        line.push_str(&format!(" trunk=[{list}]"));
    }
    line
}

fn acl_line(acl: &Acl) -> String {
    let kind = acl.kind.map_or("untyped", |k| k.as_str());
    let raw = acl.rules.iter().filter(|r| r.raw.is_some()).count();
    format!("{} {kind} rules={} raw={raw}", acl.id, acl.rules.len())
}

fn nat_policy_line(policy: &NatPolicy) -> String {
    let overload = if policy.overload { " overload" } else { "" };
    format!("acl={} outside={}{overload}", policy.acl_id, policy.outside)
}

fn section(out: &mut Vec<String>, title: &str, items: impl ExactSizeIterator<Item = String>) {
    if items.len() == 0 {
        return;
    }
    out.push(format!("{title} ({})", items.len()));
    out.extend(items.map(|item| format!("  {item}")));
}
