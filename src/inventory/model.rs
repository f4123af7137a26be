//! Repository record types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Repository visibility as far as toggling is concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
}

impl Visibility {
    /// The complement: public becomes private and vice versa
    pub fn toggled(self) -> Self {
        match self {
            Visibility::Public => Visibility::Private,
            Visibility::Private => Visibility::Public,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
        }
    }

    /// Map a platform visibility value (`PUBLIC`, `PRIVATE`, `INTERNAL`)
    ///
    /// Anything that is not public is treated as private.
    pub fn from_platform(value: &str) -> Self {
        if value.eq_ignore_ascii_case("public") {
            Visibility::Public
        } else {
            Visibility::Private
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Visibility {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "public" => Ok(Visibility::Public),
            "private" => Ok(Visibility::Private),
            other => Err(format!("unknown visibility '{}'", other)),
        }
    }
}

/// One repository in the inventory, keyed by `full_name` (`owner/name`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryRecord {
    pub full_name: String,
    pub visibility: Visibility,
    pub archived: bool,
}

impl RepositoryRecord {
    pub fn new(full_name: impl Into<String>, visibility: Visibility, archived: bool) -> Self {
        Self {
            full_name: full_name.into(),
            visibility,
            archived,
        }
    }
}

impl From<repovis_gh::GhRepo> for RepositoryRecord {
    fn from(repo: repovis_gh::GhRepo) -> Self {
        Self {
            visibility: Visibility::from_platform(&repo.visibility),
            full_name: repo.name_with_owner,
            archived: repo.is_archived,
        }
    }
}

/// Live repository state plus descriptive metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryDetail {
    pub record: RepositoryRecord,
    pub description: Option<String>,
    pub url: Option<String>,
    pub default_branch: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl RepositoryDetail {
    pub fn from_record(record: RepositoryRecord) -> Self {
        Self {
            record,
            description: None,
            url: None,
            default_branch: None,
            updated_at: None,
        }
    }
}

impl From<repovis_gh::GhRepoDetail> for RepositoryDetail {
    fn from(detail: repovis_gh::GhRepoDetail) -> Self {
        Self {
            record: RepositoryRecord {
                full_name: detail.name_with_owner,
                visibility: Visibility::from_platform(&detail.visibility),
                archived: detail.is_archived,
            },
            description: detail.description.filter(|d| !d.trim().is_empty()),
            url: detail.url,
            default_branch: detail.default_branch_ref.map(|b| b.name),
            updated_at: detail.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visibility_toggle_is_involution() {
        for v in [Visibility::Public, Visibility::Private] {
            assert_ne!(v.toggled(), v);
            assert_eq!(v.toggled().toggled(), v);
        }
    }

    #[test]
    fn test_visibility_from_platform() {
        assert_eq!(Visibility::from_platform("PUBLIC"), Visibility::Public);
        assert_eq!(Visibility::from_platform("PRIVATE"), Visibility::Private);
        assert_eq!(Visibility::from_platform("INTERNAL"), Visibility::Private);
    }

    #[test]
    fn test_visibility_parse_is_exact() {
        assert_eq!("public".parse::<Visibility>(), Ok(Visibility::Public));
        assert_eq!("private".parse::<Visibility>(), Ok(Visibility::Private));
        assert!("PUBLIC".parse::<Visibility>().is_err());
        assert!("internal".parse::<Visibility>().is_err());
    }

    #[test]
    fn test_from_gh_detail_drops_blank_description() {
        let detail = repovis_gh::GhRepoDetail {
            name_with_owner: "a/b".to_string(),
            visibility: "PUBLIC".to_string(),
            is_archived: false,
            description: Some("  ".to_string()),
            url: Some("https://github.com/a/b".to_string()),
            default_branch_ref: Some(repovis_gh::BranchRef {
                name: "main".to_string(),
            }),
            updated_at: None,
        };

        let detail = RepositoryDetail::from(detail);
        assert_eq!(detail.record, RepositoryRecord::new("a/b", Visibility::Public, false));
        assert!(detail.description.is_none());
        assert_eq!(detail.default_branch.as_deref(), Some("main"));
    }
}
