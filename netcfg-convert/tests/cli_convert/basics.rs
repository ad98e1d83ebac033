use super::*;

#[test]
fn convert_cisco_fixture_to_huawei() {
    let dir = tempdir().expect("tempdir");
    let output = dir.path().join("branch.vrp");

    netcfg()
        .arg("convert")
        .arg(fixture("fixtures/cisco-branch.cfg"))
        .arg("--output")
        .arg(path_as_str(&output))
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "convert_summary vlans=3 interfaces=6 routes=2 ospf=3 acls=2 acl_rules=7 raw_rules=2 nat=2 nat_rules=1",
        ));

    let text = fs::read_to_string(&output).expect("read output");
    assert!(text.starts_with("system-view\nvlan batch 10 20 99\n"));
    assert!(text.ends_with("return\n"));
    assert!(text.contains("stp mode rstp\n"));
    assert!(text.contains("interface Vlanif10\n"));
    assert!(text.contains(" undo silent-interface Vlanif10\n"));
    assert!(text.contains("acl number 2010\n"));
    assert!(text.contains("acl number 3001\n"));
    assert!(text.contains(" # unsupported ACL rule: deny ip any any log\n"));
    assert!(text.contains("interface GigabitEthernet0/0\n"));
    assert!(text.contains(" nat outbound 2010\n"));
}

#[test]
fn convert_huawei_fixture_to_cisco() {
    let dir = tempdir().expect("tempdir");
    let output = dir.path().join("branch.ios");

    netcfg()
        .arg("convert")
        .arg(fixture("fixtures/huawei-branch.cfg"))
        .arg("--output")
        .arg(path_as_str(&output))
        .arg("--from")
        .arg("huawei")
        .arg("--to")
        .arg("cisco")
        .assert()
        .success();

    let text = fs::read_to_string(&output).expect("read output");
    assert!(text.starts_with("enable\nconfigure terminal\n"));
    assert!(text.ends_with("end\n"));
    assert!(text.contains("spanning-tree mode rapid-pvst\n"));
    assert!(text.contains(" switchport trunk allowed vlan 10,20,30-32\n"));
    assert!(text.contains("interface Vlan20\n"));
    assert!(text.contains(
        "access-list 2000 permit tcp 10.1.0.0 0.0.255.255 192.168.1.0 0.0.0.255 eq 443\n"
    ));
    assert!(text.contains("access-list 0 deny any\n"));
    assert!(text.contains("ip nat inside source list 0 interface GigabitEthernet0/0/0 overload\n"));
}

#[test]
fn convert_to_json_writes_model() {
    let json = convert_text("vlan 10\n name users\n exit\n", &["--to", "json"]);
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(value["device_type"], "cisco");
    assert_eq!(value["vlans"][0]["id"], 10);
    assert_eq!(value["vlans"][0]["name"], "users");
    assert!(value.get("interfaces").is_none());
}

#[test]
fn convert_from_json_to_huawei() {
    let text = convert_text(
        r#"{"device_type":"cisco","interfaces":[{"name":"Vlan10","ip":"10.0.0.1 255.255.255.0"}]}"#,
        &["--from", "json"],
    );
    assert!(text.contains("interface Vlanif10\n ip address 10.0.0.1 255.255.255.0\nquit\n"));
}

#[test]
fn convert_rejects_unsupported_dialect() {
    let dir = tempdir().expect("tempdir");
    let output = dir.path().join("out.cfg");

    netcfg()
        .arg("convert")
        .arg(fixture("fixtures/cisco-branch.cfg"))
        .arg("--output")
        .arg(path_as_str(&output))
        .arg("--to")
        .arg("juniper")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported dialect 'juniper'"));
    assert!(!output.exists());
}

#[test]
fn convert_refuses_to_overwrite_input() {
    let dir = tempdir().expect("tempdir");
    let input = dir.path().join("router.cfg");
    fs::write(&input, "vlan 10\n").expect("write input");

    netcfg()
        .arg("convert")
        .arg(path_as_str(&input))
        .arg("--output")
        .arg(path_as_str(&input))
        .assert()
        .failure()
        .stderr(predicate::str::contains("refusing to overwrite"));
    assert_eq!(fs::read_to_string(&input).expect("read input"), "vlan 10\n");
}

#[test]
fn convert_reports_missing_input() {
    let dir = tempdir().expect("tempdir");
    let output = dir.path().join("out.cfg");

    netcfg()
        .arg("convert")
        .arg(path_as_str(&dir.path().join("absent.cfg")))
        .arg("--output")
        .arg(path_as_str(&output))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
    assert!(!output.exists());
}

#[test]
fn convert_rejects_bad_json_without_output() {
    let dir = tempdir().expect("tempdir");
    let input = dir.path().join("model.json");
    let output = dir.path().join("out.cfg");
    fs::write(&input, "{\"vlans\": [").expect("write input");

    netcfg()
        .arg("convert")
        .arg(path_as_str(&input))
        .arg("--output")
        .arg(path_as_str(&output))
        .arg("--from")
        .arg("json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse"));
    assert!(!output.exists());
}

#[test]
fn verbose_flag_logs_to_stderr_only() {
    let dir = tempdir().expect("tempdir");
    let output = dir.path().join("out.cfg");

    netcfg()
        .arg("-vv")
        .arg("convert")
        .arg(fixture("fixtures/cisco-branch.cfg"))
        .arg("--output")
        .arg(path_as_str(&output))
        .assert()
        .success()
        .stderr(predicate::str::contains("parsed configuration"))
        .stdout(predicate::str::contains("parsed configuration").not());
}
