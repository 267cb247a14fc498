// Copyright (c) 2026 the sqlfront authors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Permission grant/revoke/show request records, and the permission
//! bit-mask the request factory maps grammar keywords onto (§4.6).

/// A bit-mask of grantable permissions. Stored as a plain `u16` rather than
/// via a `bitflags`-style crate, matching the rest of this crate's
/// hand-rolled lookup-table style (the teacher reaches for external crates
/// at I/O and protocol boundaries, not for small closed bit-sets).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PermissionMask(pub u16);

impl PermissionMask {
    pub const SELECT: PermissionMask = PermissionMask(1 << 0);
    pub const INSERT: PermissionMask = PermissionMask(1 << 1);
    pub const UPDATE: PermissionMask = PermissionMask(1 << 2);
    pub const DELETE: PermissionMask = PermissionMask(1 << 3);
    pub const DROP: PermissionMask = PermissionMask(1 << 4);
    pub const ALTER: PermissionMask = PermissionMask(1 << 5);
    pub const SHOW: PermissionMask = PermissionMask(1 << 6);
    pub const READ_ONLY: PermissionMask = PermissionMask(1 << 7);
    pub const READ_WRITE: PermissionMask = PermissionMask(1 << 8);

    pub const ALL: PermissionMask = PermissionMask(
        Self::SELECT.0
            | Self::INSERT.0
            | Self::UPDATE.0
            | Self::DELETE.0
            | Self::DROP.0
            | Self::ALTER.0
            | Self::SHOW.0
            | Self::READ_ONLY.0
            | Self::READ_WRITE.0,
    );

    pub fn empty() -> Self {
        PermissionMask(0)
    }

    pub fn contains(self, other: PermissionMask) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn union(self, other: PermissionMask) -> Self {
        PermissionMask(self.0 | other.0)
    }

    /// Maps a single grammar keyword (`SELECT`, `INSERT`, ..., `ALL`) to its
    /// mask, case-insensitively. Unknown keywords are the caller's concern
    /// (the request factory raises `InvalidAttribute` for those).
    pub fn from_keyword(keyword: &str) -> Option<PermissionMask> {
        Some(match keyword.to_ascii_uppercase().as_str() {
            "SELECT" => Self::SELECT,
            "INSERT" => Self::INSERT,
            "UPDATE" => Self::UPDATE,
            "DELETE" => Self::DELETE,
            "DROP" => Self::DROP,
            "ALTER" => Self::ALTER,
            "SHOW" => Self::SHOW,
            "READ_ONLY" => Self::READ_ONLY,
            "READ_WRITE" => Self::READ_WRITE,
            "ALL" => Self::ALL,
            _ => return None,
        })
    }
}

/// `database.table`, `database.*`, `*`, or `*.*`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionTarget {
    Table { database: String, table: String },
    AllTablesInDatabase { database: String },
    AllDatabases,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GrantPermissionsForTable {
    pub user: String,
    pub target: PermissionTarget,
    pub permissions: PermissionMask,
    pub with_grant_option: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RevokePermissionsForTable {
    pub user: String,
    pub target: PermissionTarget,
    pub permissions: PermissionMask,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShowPermissions {
    pub user: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_mask_contains_every_named_permission() {
        for kw in [
            "SELECT",
            "INSERT",
            "UPDATE",
            "DELETE",
            "DROP",
            "ALTER",
            "SHOW",
            "READ_ONLY",
            "READ_WRITE",
        ] {
            let perm = PermissionMask::from_keyword(kw).unwrap();
            assert!(PermissionMask::ALL.contains(perm));
        }
    }

    #[test]
    fn union_combines_masks() {
        let combined = PermissionMask::SELECT.union(PermissionMask::INSERT);
        assert!(combined.contains(PermissionMask::SELECT));
        assert!(combined.contains(PermissionMask::INSERT));
        assert!(!combined.contains(PermissionMask::DELETE));
    }

    #[test]
    fn unknown_keyword_is_none() {
        assert_eq!(PermissionMask::from_keyword("EXECUTE"), None);
    }
}
