//! Text generators for the Cisco and Huawei dialects.
//!
//! Both walk the model once in a fixed section order: VLANs, OSPF, spanning
//! tree, services, interfaces, routes, ACLs, NAT. Helpers shared by the two
//! live here.

pub mod cisco;
pub mod huawei;

use netcfg_core::{Config, OspfNetwork};

pub use cisco::generate_cisco;
pub use huawei::generate_huawei;

/// OSPF network statements of one process, in input order.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct OspfProcess<'a> {
    pub process_id: u32,
    pub networks: Vec<&'a OspfNetwork>,
}

impl<'a> OspfProcess<'a> {
    /// Networks grouped by area, areas in first-seen order.
    pub fn areas(&self) -> Vec<(&'a str, Vec<&'a OspfNetwork>)> {
        let mut areas: Vec<(&'a str, Vec<&'a OspfNetwork>)> = Vec::new();
        for &net in &self.networks {
            match areas.iter_mut().find(|(area, _)| *area == net.area) {
                Some((_, nets)) => nets.push(net),
                None => areas.push((net.area.as_str(), vec![net])),
            }
        }
        areas
    }
}

/// Group statements by process ID, processes in first-seen order.
pub(crate) fn group_by_process(networks: &[OspfNetwork]) -> Vec<OspfProcess<'_>> {
    let mut processes: Vec<OspfProcess<'_>> = Vec::new();
    for net in networks {
        match processes
            .iter_mut()
            .find(|p| p.process_id == net.process_id)
        {
            Some(process) => process.networks.push(net),
            None => processes.push(OspfProcess {
                process_id: net.process_id,
                networks: vec![net],
            }),
        }
    }
    processes
}

/// Process used for router-id and passive settings when no network statement
/// names one.
pub(crate) const DEFAULT_OSPF_PROCESS: u32 = 1;

/// OSPF processes to emit for `cfg`.
///
/// Router-id and passive settings belong to every process. When there are no
/// network statements but one of them is set, a bare default process carries
/// them.
pub(crate) fn ospf_processes(cfg: &Config) -> Vec<OspfProcess<'_>> {
    let processes = group_by_process(&cfg.ospf);
    let has_scalars = cfg.ospf_router_id.is_some()
        || cfg.ospf_passive_default
        || !cfg.ospf_no_passive_ifaces.is_empty();
    if processes.is_empty() && has_scalars {
        return vec![OspfProcess {
            process_id: DEFAULT_OSPF_PROCESS,
            networks: Vec::new(),
        }];
    }
    processes
}

/// Render an ACL address matcher: `any`, `host A` or `A W`.
pub(crate) fn format_address(addr: Option<&str>, wildcard: Option<&str>) -> String {
    match (addr, wildcard) {
        (None, _) => "any".to_string(),
        (Some(addr), _) if addr.is_empty() || addr.eq_ignore_ascii_case("any") => {
            "any".to_string()
        }
        (Some(addr), None) => format!("host {addr}"),
        (Some(addr), Some(wc)) if wc.is_empty() || wc == "0.0.0.0" => format!("host {addr}"),
        (Some(addr), Some(wc)) => format!("{addr} {wc}"),
    }
}

/// The numeric part of a `VlanN` interface name.
pub(crate) fn vlan_interface_id(name: &str) -> Option<&str> {
    let prefix = name.get(..4)?;
    if !prefix.eq_ignore_ascii_case("vlan") {
        return None;
    }
    let id = name[4..].trim_start();
    (!id.is_empty() && id.bytes().all(|b| b.is_ascii_digit())).then_some(id)
}

/// Read `10,20,30-40` or `10 20 30 to 40` into inclusive ranges.
fn parse_vlan_list(list: &str) -> Option<Vec<(u32, u32)>> {
    let normalized = list.replace(',', " ");
    let tokens: Vec<&str> = normalized.split_whitespace().collect();
    if tokens.is_empty() {
        return None;
    }
    let mut ranges = Vec::new();
    let mut idx = 0;
    while idx < tokens.len() {
        let token = tokens[idx];
        if let Some((low, high)) = token.split_once('-') {
            ranges.push((low.parse().ok()?, high.parse().ok()?));
            idx += 1;
        } else if tokens.get(idx + 1) == Some(&"to") {
            let high = tokens.get(idx + 2)?;
            ranges.push((token.parse().ok()?, high.parse().ok()?));
            idx += 3;
        } else {
            let id = token.parse().ok()?;
            ranges.push((id, id));
            idx += 1;
        }
    }
    Some(ranges)
}

/// Allowed-VLAN list in Cisco syntax. Unreadable lists are returned unchanged.
pub(crate) fn trunk_list_for_cisco(list: &str) -> String {
    match parse_vlan_list(list) {
        Some(ranges) => ranges
            .iter()
            .map(|&(low, high)| {
                if low == high {
                    low.to_string()
                } else {
                    format!("{low}-{high}")
                }
            })
            .collect::<Vec<_>>()
            .join(","),
        None => list.to_string(),
    }
}

/// Allowed-VLAN list in Huawei syntax. Unreadable lists are returned unchanged.
pub(crate) fn trunk_list_for_huawei(list: &str) -> String {
    match parse_vlan_list(list) {
        Some(ranges) => ranges
            .iter()
            .map(|&(low, high)| {
                if low == high {
                    low.to_string()
                } else {
                    format!("{low} to {high}")
                }
            })
            .collect::<Vec<_>>()
            .join(" "),
        None => list.to_string(),
    }
}

pub(crate) fn stp_mode_for_huawei(mode: &str) -> String {
    let mode = mode.trim().to_ascii_lowercase();
    match mode.as_str() {
        "pvst" | "rapid-pvst" => "rstp".to_string(),
        "mst" => "mstp".to_string(),
        _ => mode,
    }
}

pub(crate) fn stp_mode_for_cisco(mode: &str) -> String {
    let mode = mode.trim().to_ascii_lowercase();
    match mode.as_str() {
        "rstp" => "rapid-pvst".to_string(),
        "mstp" => "mst".to_string(),
        "stp" => "pvst".to_string(),
        _ => mode,
    }
}

/// Distinct names in first-seen order.
pub(crate) fn unique<'a>(names: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
    let mut out: Vec<&str> = Vec::new();
    for name in names {
        if !out.contains(&name) {
            out.push(name);
        }
    }
    out
}

fn join_lines(lines: Vec<String>) -> String {
    let mut text = lines.join("\n");
    text.push('\n');
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn net(process_id: u32, network: &str, area: &str) -> OspfNetwork {
        OspfNetwork {
            process_id,
            network: network.to_string(),
            wildcard: "0.0.0.255".to_string(),
            area: area.to_string(),
        }
    }

    #[test]
    fn settings_without_networks_get_a_default_process() {
        let mut cfg = Config::new("cisco");
        assert!(ospf_processes(&cfg).is_empty());

        cfg.ospf_router_id = Some("1.1.1.1".to_string());
        let processes = ospf_processes(&cfg);
        assert_eq!(processes.len(), 1);
        assert_eq!(processes[0].process_id, DEFAULT_OSPF_PROCESS);
        assert!(processes[0].networks.is_empty());

        cfg.ospf.push(net(7, "10.0.0.0", "0"));
        assert_eq!(ospf_processes(&cfg)[0].process_id, 7);
    }

    #[test]
    fn ospf_groups_keep_first_seen_order() {
        let nets = vec![
            net(2, "10.0.1.0", "1"),
            net(1, "10.0.2.0", "0"),
            net(2, "10.0.3.0", "0"),
            net(2, "10.0.4.0", "1"),
        ];
        let processes = group_by_process(&nets);
        let ids: Vec<u32> = processes.iter().map(|p| p.process_id).collect();
        assert_eq!(ids, vec![2, 1]);

        let areas = processes[0].areas();
        assert_eq!(areas.len(), 2);
        assert_eq!(areas[0].0, "1");
        assert_eq!(areas[0].1.len(), 2);
        assert_eq!(areas[0].1[1].network, "10.0.4.0");
        assert_eq!(areas[1].0, "0");
    }

    #[test]
    fn address_rendering() {
        assert_eq!(format_address(None, Some("0.0.0.255")), "any");
        assert_eq!(format_address(Some("ANY"), None), "any");
        assert_eq!(format_address(Some("10.0.0.1"), None), "host 10.0.0.1");
        assert_eq!(
            format_address(Some("10.0.0.1"), Some("0.0.0.0")),
            "host 10.0.0.1"
        );
        assert_eq!(
            format_address(Some("10.0.0.0"), Some("0.0.0.255")),
            "10.0.0.0 0.0.0.255"
        );
    }

    #[test]
    fn vlan_interface_ids() {
        assert_eq!(vlan_interface_id("Vlan10"), Some("10"));
        assert_eq!(vlan_interface_id("vlan 20"), Some("20"));
        assert_eq!(vlan_interface_id("Vlanif10"), None);
        assert_eq!(vlan_interface_id("Vlan"), None);
        assert_eq!(vlan_interface_id("GigabitEthernet0/1"), None);
    }

    #[test]
    fn trunk_lists_translate_both_ways() {
        assert_eq!(trunk_list_for_huawei("10,20,30-40"), "10 20 30 to 40");
        assert_eq!(trunk_list_for_cisco("10 20 30 to 40"), "10,20,30-40");
        assert_eq!(trunk_list_for_cisco("10,20"), "10,20");
        assert_eq!(trunk_list_for_huawei("all"), "all");
        assert_eq!(trunk_list_for_cisco("add 50"), "add 50");
    }

    #[test]
    fn stp_modes_map_between_dialects() {
        assert_eq!(stp_mode_for_huawei("rapid-pvst"), "rstp");
        assert_eq!(stp_mode_for_huawei("mst"), "mstp");
        assert_eq!(stp_mode_for_huawei("rstp"), "rstp");
        assert_eq!(stp_mode_for_cisco("rstp"), "rapid-pvst");
        assert_eq!(stp_mode_for_cisco("mstp"), "mst");
        assert_eq!(stp_mode_for_cisco("stp"), "pvst");
        assert_eq!(stp_mode_for_cisco("pvst"), "pvst");
    }
}
