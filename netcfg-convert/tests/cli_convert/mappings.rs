use super::*;

#[test]
fn if_map_renames_interface_types() {
    let text = convert_text(
        "interface FastEthernet0/1\n description desk\n exit\n",
        &["--to", "cisco", "--if-map", "FastEthernet=GigabitEthernet"],
    );
    assert!(text.contains("interface GigabitEthernet0/1\n"));
    assert!(!text.contains("FastEthernet"));
}

#[test]
fn if_map_is_matched_loosely() {
    let text = convert_text(
        "interface Fast-Ethernet 0/1\n exit\n",
        &["--to", "cisco", "--if-map", " fast ethernet = GigabitEthernet "],
    );
    assert!(text.contains("interface GigabitEthernet 0/1\n"));
}

#[test]
fn index_style_three_adds_leading_segment() {
    let text = convert_text(
        "interface GigabitEthernet0/1\n exit\n",
        &["--if-index", "3", "--if-index-prefix", "2"],
    );
    assert!(text.contains("interface GigabitEthernet2/0/1\n"));
}

#[test]
fn index_style_two_drops_leading_segment() {
    let text = convert_text(
        "interface GigabitEthernet0/0/1\nquit\n",
        &["--from", "huawei", "--to", "cisco", "--if-index", "2"],
    );
    assert!(text.contains("interface GigabitEthernet0/1\n"));
}

#[test]
fn rename_reaches_nat_and_ospf_references() {
    let text = convert_text(
        "interface Vlan10\n ip nat inside\n exit\ninterface FastEthernet0/0\n ip nat outside\n exit\nrouter ospf 1\n passive-interface default\n no passive-interface FastEthernet0/0\n network 10.0.0.0 0.0.0.255 area 0\n exit\nip nat inside source list 1 interface FastEthernet0/0 overload\n",
        &["--to", "cisco", "--if-map", "FastEthernet=GigabitEthernet"],
    );
    assert!(text.contains(" no passive-interface GigabitEthernet0/0\n"));
    assert!(text.contains("interface GigabitEthernet0/0\n ip nat outside\n exit\n"));
    assert!(text.contains("ip nat inside source list 1 interface GigabitEthernet0/0 overload\n"));
    assert!(!text.contains("FastEthernet"));
}

#[test]
fn vlan_interfaces_are_never_renamed() {
    let text = convert_text(
        "interface Vlan10\n exit\n",
        &["--to", "cisco", "--if-map", "Vlan=Bridge", "--if-index", "3"],
    );
    assert!(text.contains("interface Vlan10\n"));
}

#[test]
fn bad_if_map_fails_before_output() {
    let dir = tempdir().expect("tempdir");
    let output = dir.path().join("out.cfg");

    netcfg()
        .arg("convert")
        .arg(fixture("fixtures/cisco-branch.cfg"))
        .arg("--output")
        .arg(path_as_str(&output))
        .arg("--if-map")
        .arg("FastEthernet=GigabitEthernet,Serial")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid --if-map"))
        .stderr(predicate::str::contains("expected FromType=ToType"));
    assert!(!output.exists());
}

#[test]
fn empty_mapping_side_fails() {
    let dir = tempdir().expect("tempdir");
    let output = dir.path().join("out.cfg");

    netcfg()
        .arg("convert")
        .arg(fixture("fixtures/cisco-branch.cfg"))
        .arg("--output")
        .arg(path_as_str(&output))
        .arg("--if-map")
        .arg("FastEthernet=")
        .assert()
        .failure()
        .stderr(predicate::str::contains("both sides must be non-empty"));
    assert!(!output.exists());
}

#[test]
fn bad_index_style_is_rejected() {
    let dir = tempdir().expect("tempdir");
    let output = dir.path().join("out.cfg");

    netcfg()
        .arg("convert")
        .arg(fixture("fixtures/cisco-branch.cfg"))
        .arg("--output")
        .arg(path_as_str(&output))
        .arg("--if-index")
        .arg("4")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid interface index style"));
}

#[test]
fn profile_supplies_mappings_and_index_options() {
    let dir = tempdir().expect("tempdir");
    let profile = dir.path().join("branch.toml");
    fs::write(
        &profile,
        r#"
index_style = "3"
index_prefix = "4"

[[interface]]
from = "FastEthernet"
to = "GigabitEthernet"
"#,
    )
    .expect("write profile");

    let text = convert_text(
        "interface FastEthernet0/1\n exit\n",
        &["--to", "cisco", "--profile", path_as_str(&profile)],
    );
    assert!(text.contains("interface GigabitEthernet4/0/1\n"));
}

#[test]
fn profile_mappings_win_over_command_line_ties() {
    let dir = tempdir().expect("tempdir");
    let profile = dir.path().join("branch.toml");
    fs::write(
        &profile,
        "[[interface]]\nfrom = \"FastEthernet\"\nto = \"GigabitEthernet\"\n",
    )
    .expect("write profile");

    let text = convert_text(
        "interface FastEthernet0/1\n exit\ninterface Ethernet0/2\n exit\n",
        &[
            "--to",
            "cisco",
            "--profile",
            path_as_str(&profile),
            "--if-map",
            "FastEthernet=TenGigabitEthernet,Ethernet=GigabitEthernet",
        ],
    );
    assert!(text.contains("interface GigabitEthernet0/1\n"));
    assert!(text.contains("interface GigabitEthernet0/2\n"));
}

#[test]
fn explicit_index_flag_overrides_profile() {
    let dir = tempdir().expect("tempdir");
    let profile = dir.path().join("branch.toml");
    fs::write(&profile, "index_style = \"3\"\n").expect("write profile");

    let text = convert_text(
        "interface GigabitEthernet0/1\n exit\n",
        &[
            "--to",
            "cisco",
            "--profile",
            path_as_str(&profile),
            "--if-index",
            "keep",
        ],
    );
    assert!(text.contains("interface GigabitEthernet0/1\n"));
}

#[test]
fn invalid_profile_fails_before_output() {
    let dir = tempdir().expect("tempdir");
    let profile = dir.path().join("broken.toml");
    let output = dir.path().join("out.cfg");
    fs::write(&profile, "[[interface]]\nfrom = \"Serial\"\n").expect("write profile");

    netcfg()
        .arg("convert")
        .arg(fixture("fixtures/cisco-branch.cfg"))
        .arg("--output")
        .arg(path_as_str(&output))
        .arg("--profile")
        .arg(path_as_str(&profile))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse profile"));
    assert!(!output.exists());
}
