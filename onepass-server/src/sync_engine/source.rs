//! Source Table Parsing
//!
//! Turns a raw `{header, rows}` table into typed import rows. A table whose
//! header resolves neither an id nor a name column is unusable and reported
//! as skipped rather than half-imported.

use shared::models::{MemberStatus, Role, SourceTable};

const ID_ALIASES: &[&str] = &["Member ID", "ID", "Reg No"];
const NAME_ALIASES: &[&str] = &["Full Name", "Name"];
const ROLE_ALIASES: &[&str] = &["Role"];
const STATUS_ALIASES: &[&str] = &["Status"];
const PHOTO_ALIASES: &[&str] = &["Photo URL", "Photo", "Image"];

/// One admitted row from a source table, identity fields only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRow {
    pub id: String,
    pub name: String,
    pub role: Role,
    pub status: MemberStatus,
    pub photo_url: String,
}

#[derive(Debug, Clone, Copy)]
struct Columns {
    id: usize,
    name: usize,
    role: Option<usize>,
    status: Option<usize>,
    photo: Option<usize>,
}

fn find_column(header: &[String], aliases: &[&str]) -> Option<usize> {
    header.iter().position(|h| {
        let h = h.trim();
        aliases.iter().any(|a| h.eq_ignore_ascii_case(a))
    })
}

fn resolve_columns(header: &[String]) -> Option<Columns> {
    Some(Columns {
        id: find_column(header, ID_ALIASES)?,
        name: find_column(header, NAME_ALIASES)?,
        role: find_column(header, ROLE_ALIASES),
        status: find_column(header, STATUS_ALIASES),
        photo: find_column(header, PHOTO_ALIASES),
    })
}

/// Role used when a row carries no recognizable role, by source name.
pub fn default_role_for_source(source_name: &str) -> Role {
    if source_name.contains("MGT") {
        Role::Staff
    } else if source_name.contains("MAM") {
        Role::Guest
    } else {
        Role::Member
    }
}

/// Parse one source table. `None` means the table is unusable (id or name
/// column missing) and should be counted as skipped.
pub fn parse_source(table: &SourceTable) -> Option<Vec<ImportRow>> {
    let cols = resolve_columns(&table.header)?;
    let fallback_role = default_role_for_source(&table.name);

    let cell = |row: &[String], idx: usize| -> String {
        row.get(idx).map(|c| c.trim().to_string()).unwrap_or_default()
    };

    let mut out = Vec::with_capacity(table.rows.len());
    for row in &table.rows {
        let id = cell(row, cols.id);
        if id.is_empty() {
            continue;
        }
        let role = cols
            .role
            .and_then(|i| Role::parse_lenient(&cell(row, i)))
            .unwrap_or(fallback_role);
        let status = cols
            .status
            .and_then(|i| MemberStatus::parse_lenient(&cell(row, i)))
            .unwrap_or(MemberStatus::Active);
        out.push(ImportRow {
            id,
            name: cell(row, cols.name),
            role,
            status,
            photo_url: cols.photo.map(|i| cell(row, i)).unwrap_or_default(),
        });
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(name: &str, header: &[&str], rows: &[&[&str]]) -> SourceTable {
        SourceTable {
            name: name.to_string(),
            header: header.iter().map(|s| s.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        }
    }

    #[test]
    fn test_alias_resolution_is_case_insensitive() {
        let t = table(
            "Import-NGG",
            &["reg no", "NAME", "photo"],
            &[&["VG001", "Ada", "http://x/a.png"]],
        );
        let rows = parse_source(&t).unwrap();
        assert_eq!(rows[0].id, "VG001");
        assert_eq!(rows[0].name, "Ada");
        assert_eq!(rows[0].photo_url, "http://x/a.png");
    }

    #[test]
    fn test_missing_id_column_skips_source() {
        let t = table("Import-NGG", &["Full Name"], &[&["Ada"]]);
        assert!(parse_source(&t).is_none());
    }

    #[test]
    fn test_blank_id_rows_dropped() {
        let t = table(
            "Import-NGV",
            &["Member ID", "Full Name"],
            &[&["  ", "Ghost"], &["VG002", "Bola"]],
        );
        let rows = parse_source(&t).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "VG002");
    }

    #[test]
    fn test_default_roles_by_source() {
        assert_eq!(default_role_for_source("Import-MGT"), Role::Staff);
        assert_eq!(default_role_for_source("Import-MAM"), Role::Guest);
        assert_eq!(default_role_for_source("Import-NGV"), Role::Member);
        assert_eq!(default_role_for_source("Import-NGG"), Role::Member);
        assert_eq!(default_role_for_source("Whatever"), Role::Member);
    }

    #[test]
    fn test_unknown_role_falls_back_to_source_default() {
        let t = table(
            "Import-MGT",
            &["Member ID", "Full Name", "Role", "Status"],
            &[&["VG003", "Chi", "Overlord", "frozen"]],
        );
        let rows = parse_source(&t).unwrap();
        assert_eq!(rows[0].role, Role::Staff);
        assert_eq!(rows[0].status, MemberStatus::Active);
    }

    #[test]
    fn test_explicit_role_and_status_win() {
        let t = table(
            "Import-NGG",
            &["ID", "Name", "Role", "Status"],
            &[&["VG004", "Dan", "admin", "Suspended"]],
        );
        let rows = parse_source(&t).unwrap();
        assert_eq!(rows[0].role, Role::Admin);
        assert_eq!(rows[0].status, MemberStatus::Suspended);
    }
}
