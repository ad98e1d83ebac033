use super::*;

#[test]
fn fast_ethernet_remapped_with_keep_index() {
    let text = convert_text(
        "interface FastEthernet0/1\n",
        &[
            "--to",
            "cisco",
            "--if-map",
            "FastEthernet=GigabitEthernet",
            "--if-index",
            "keep",
        ],
    );
    assert!(text.contains("interface GigabitEthernet0/1\n"));
}

#[test]
fn extended_acl_becomes_advanced_rule() {
    let text = convert_text(
        "access-list 101 permit tcp 10.0.0.0 0.0.0.255 eq 80 192.168.1.0 0.0.0.255\n",
        &[],
    );
    assert!(text.contains(
        "acl number 3001\n rule 5 permit tcp source 10.0.0.0 0.0.0.255 source-port eq 80 destination 192.168.1.0 0.0.0.255\nquit\n"
    ));
}

#[test]
fn unterminated_interface_is_still_emitted() {
    let text = convert_text("interface Ethernet0/1\n description uplink", &["--to", "cisco"]);
    assert!(text.contains("interface Ethernet0/1\n description uplink\n exit\n"));
}

#[test]
fn subinterface_vlan_becomes_dot1q_tag() {
    let text = convert_text(
        "interface GigabitEthernet0/0/1.200\n vlan-type dot1q 200\nquit\n",
        &["--from", "huawei", "--to", "cisco"],
    );
    assert!(text.contains("interface GigabitEthernet0/0/1.200\n encapsulation dot1Q 200\n exit\n"));
    assert!(!text.contains("switchport access vlan"));
}

#[test]
fn huawei_comments_and_unknown_lines_are_skipped() {
    let text = convert_text(
        "# generated\nsysname core\nundo info-center enable\n#\nvlan 30\n description lab\nquit\n",
        &["--from", "huawei", "--to", "json"],
    );
    let value: serde_json::Value = serde_json::from_str(&text).expect("valid json");
    assert_eq!(value["vlans"].as_array().map(Vec::len), Some(1));
    assert_eq!(value["vlans"][0]["name"], "lab");
}

#[test]
fn garbled_numbers_do_not_stop_parsing() {
    let text = convert_text(
        "vlan x\n exit\ninterface FastEthernet0/1\n switchport access vlan ten\n exit\nip route 0.0.0.0 0.0.0.0 192.0.2.1\n",
        &["--to", "json"],
    );
    let value: serde_json::Value = serde_json::from_str(&text).expect("valid json");
    assert_eq!(value["vlans"][0]["id"], 0);
    assert!(value["interfaces"][0].get("vlan").is_none());
    assert_eq!(value["routes"][0]["gateway"], "192.0.2.1");
}
