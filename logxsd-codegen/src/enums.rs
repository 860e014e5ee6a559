//! Enumeration definition emission.

use crate::defs::EnumerationDef;
use crate::naming::schema_type_name;
use logxsd_registry::TypeInfo;

/// Emits the restricted string definition of an enumeration.
///
/// Values are the member names in declaration order; members are unique by
/// construction so no deduplication happens here.
#[must_use]
pub fn emit_enumeration(info: &TypeInfo, members: &[String]) -> EnumerationDef {
    EnumerationDef {
        name: schema_type_name(info).to_string(),
        values: members.to_vec(),
    }
}
