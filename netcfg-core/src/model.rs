use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// Vendor-neutral representation of one device configuration.
///
/// Parsers populate it and generators read it. Entities reference each other
/// by value only (ACL IDs, interface names); lookups are linear scans over the
/// ordered collections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Dialect the configuration was parsed from (`cisco`, `huawei`).
    pub device_type: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub vlans: Vec<Vlan>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub interfaces: Vec<Interface>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub routes: Vec<Route>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ospf: Vec<OspfNetwork>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ospf_router_id: Option<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub ospf_passive_default: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ospf_no_passive_ifaces: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub nat: Vec<Nat>,
    #[serde(rename = "nat_rule", skip_serializing_if = "Vec::is_empty")]
    pub nat_rules: Vec<NatPolicy>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub acls: Vec<Acl>,
    #[serde(skip_serializing_if = "Service::is_empty")]
    pub service: Service,
    #[serde(skip_serializing_if = "Stp::is_empty")]
    pub stp: Stp,
}

impl Config {
    /// Create an empty configuration tagged with its source dialect.
    pub fn new(device_type: impl Into<String>) -> Self {
        Self {
            device_type: device_type.into(),
            ..Self::default()
        }
    }

    /// First ACL with the given ID.
    pub fn find_acl(&self, id: u32) -> Option<&Acl> {
        self.acls.iter().find(|acl| acl.id == id)
    }

    /// Type of the ACL with the given ID, `None` when the ACL is unknown or untyped.
    pub fn acl_kind(&self, id: u32) -> Option<AclKind> {
        self.find_acl(id).and_then(|acl| acl.kind)
    }

    /// Return the ACL with `id`, appending an empty one when missing.
    ///
    /// An existing ACL without a type adopts `kind`; a typed one keeps its type.
    pub fn acl_entry(&mut self, id: u32, kind: Option<AclKind>) -> &mut Acl {
        let idx = match self.acls.iter().position(|acl| acl.id == id) {
            Some(idx) => idx,
            None => {
                self.acls.push(Acl {
                    id,
                    kind: None,
                    rules: Vec::new(),
                });
                self.acls.len() - 1
            }
        };
        let acl = &mut self.acls[idx];
        if acl.kind.is_none() {
            acl.kind = kind;
        }
        acl
    }

    /// Append `vlan`, or merge it into an existing entry with the same ID.
    ///
    /// A name on the incoming VLAN replaces the stored one; an unnamed VLAN
    /// leaves the stored name alone.
    pub fn upsert_vlan(&mut self, vlan: Vlan) {
        match self.vlans.iter_mut().find(|v| v.id == vlan.id) {
            Some(existing) => {
                if vlan.name.is_some() {
                    existing.name = vlan.name;
                }
            }
            None => self.vlans.push(vlan),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vlan {
    pub id: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// One interface block. `name` is the vendor-native string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Interface {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Access VLAN, or the 802.1Q tag for subinterfaces.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vlan: Option<u32>,
    /// Address and mask joined by a single space.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    /// Allowed VLAN list exactly as written by the source dialect.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trunk_vlans: Option<String>,
}

impl Interface {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Dotted names (`GigabitEthernet0/1.100`) are subinterfaces.
    pub fn is_subinterface(&self) -> bool {
        self.name.contains('.')
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OspfNetwork {
    pub process_id: u32,
    pub network: String,
    pub wildcard: String,
    pub area: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Route {
    pub destination: String,
    pub mask: String,
    pub gateway: String,
}

/// An inside/outside interface pairing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Nat {
    pub inside: String,
    pub outside: String,
}

/// ACL-driven outbound NAT. `acl_id` is resolved against [`Config::acls`] by value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NatPolicy {
    pub acl_id: u32,
    pub outside: String,
    #[serde(skip_serializing_if = "is_false")]
    pub overload: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Acl {
    pub id: u32,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<AclKind>,
    /// Enforcement order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<AclRule>,
}

/// ACL type tag. Cisco uses standard/extended, Huawei basic/advanced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AclKind {
    Standard,
    Extended,
    Basic,
    Advanced,
}

impl AclKind {
    /// Extended (Cisco) and advanced (Huawei) ACLs match on protocol and destination.
    pub fn is_extended(self) -> bool {
        matches!(self, AclKind::Extended | AclKind::Advanced)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AclKind::Standard => "standard",
            AclKind::Extended => "extended",
            AclKind::Basic => "basic",
            AclKind::Advanced => "advanced",
        }
    }
}

impl Display for AclKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AclAction {
    #[default]
    Permit,
    Deny,
}

impl AclAction {
    /// Parse a rule action keyword, case-insensitively.
    pub fn from_keyword(word: &str) -> Option<Self> {
        if word.eq_ignore_ascii_case("permit") {
            Some(AclAction::Permit)
        } else if word.eq_ignore_ascii_case("deny") {
            Some(AclAction::Deny)
        } else {
            None
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AclAction::Permit => "permit",
            AclAction::Deny => "deny",
        }
    }
}

impl Display for AclAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One ACL entry.
///
/// When `raw` is set the rule could not be decomposed and the structured
/// fields are not meaningful; generators pass `raw` through instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AclRule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<AclAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wildcard: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src_port: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dst_wildcard: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dst_port: Option<String>,
    /// Huawei rule number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

impl AclRule {
    /// A rule that is carried verbatim.
    pub fn raw(text: impl Into<String>) -> Self {
        Self {
            raw: Some(text.into()),
            ..Self::default()
        }
    }

    /// Whether this rule renders in extended/advanced form inside an ACL of `kind`.
    pub fn is_extended_in(&self, kind: Option<AclKind>) -> bool {
        if kind.is_some_and(AclKind::is_extended) {
            return true;
        }
        self.protocol.is_some()
            || self.destination.is_some()
            || self.src_port.is_some()
            || self.dst_port.is_some()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Service {
    pub smtp: bool,
    pub ftp: bool,
}

impl Service {
    pub fn is_empty(&self) -> bool {
        !self.smtp && !self.ftp
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stp {
    /// `pvst`, `rapid-pvst`, `mst`, `stp`, `rstp`, `mstp`...
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
}

impl Stp {
    pub fn is_empty(&self) -> bool {
        self.mode.is_none()
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}
