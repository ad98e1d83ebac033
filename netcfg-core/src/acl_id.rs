//! ACL number translation between Cisco and Huawei numbering spaces.
//!
//! Cisco numbers standard ACLs 1-99/1300-1999 and extended ACLs
//! 100-199/2000-2699. Huawei numbers basic ACLs 2000-2999 and advanced ACLs
//! 3000-3999. The two directions below are not inverses of one formula and
//! their boundaries must stay exactly as written. IDs outside every
//! recognized window are returned unchanged.

use crate::model::AclKind;

/// Translate an ACL ID into Cisco numbering.
///
/// `advanced` 3000-3999 moves down by 1000; `basic`, `standard` or untyped
/// 2000-2999 moves down by 2000.
pub fn to_cisco(id: u32, kind: Option<AclKind>) -> u32 {
    match kind {
        Some(AclKind::Advanced) if (3000..=3999).contains(&id) => id - 1000,
        Some(AclKind::Basic | AclKind::Standard) | None if (2000..=2999).contains(&id) => id - 2000,
        _ => id,
    }
}

/// Translate an ACL ID into Huawei numbering.
///
/// `extended` 100-199 moves up by 2900 and 2000-2699 by 1000; `standard`,
/// `basic` or untyped 1-1999 moves up by 2000.
pub fn to_huawei(id: u32, kind: Option<AclKind>) -> u32 {
    match kind {
        Some(AclKind::Extended) if (100..=199).contains(&id) => id + 2900,
        Some(AclKind::Extended) if (2000..=2699).contains(&id) => id + 1000,
        Some(AclKind::Standard | AclKind::Basic) | None if (1..=1999).contains(&id) => id + 2000,
        _ => id,
    }
}
