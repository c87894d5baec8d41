use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use crate::models::{Member, NewMember};

fn member_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Member> {
    Ok(Member {
        id: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        email: row.get(3)?,
        gender: row.get(4)?,
        state: row.get(5)?,
        member_no: row.get(6)?,
    })
}

/// Retrieve every member in storage order.
pub fn list_members(conn: &Connection) -> Result<Vec<Member>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, first_name, last_name, email, gender, state, member_no
             FROM members",
        )
        .context("failed to prepare member query")?;

    let members = stmt
        .query_map([], member_from_row)
        .context("failed to load members")?
        .collect::<Result<Vec<_>, _>>()
        .context("failed to collect members")?;

    Ok(members)
}

/// Look up a member by the unique member number. Doubles as the duplicate
/// check before registration and as the resolver for removal and lending.
pub fn find_member_by_number(conn: &Connection, member_no: &str) -> Result<Option<Member>> {
    conn.query_row(
        "SELECT id, first_name, last_name, email, gender, state, member_no
         FROM members WHERE member_no = ?1",
        params![member_no],
        member_from_row,
    )
    .optional()
    .context("failed to query member by number")
}

/// Insert a new member row, returning the hydrated struct.
pub fn insert_member(conn: &Connection, member: &NewMember) -> Result<Member> {
    conn.execute(
        "INSERT INTO members (first_name, last_name, email, gender, state, member_no)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            member.first_name,
            member.last_name,
            member.email,
            member.gender,
            member.state,
            member.member_no
        ],
    )
    .context("failed to insert member")?;

    let id = conn.last_insert_rowid();
    Ok(Member {
        id,
        first_name: member.first_name.clone(),
        last_name: member.last_name.clone(),
        email: member.email.clone(),
        gender: member.gender.clone(),
        state: member.state.clone(),
        member_no: member.member_no.clone(),
    })
}

/// Remove a member row by id. Cascades to `lend_books` like book deletion.
pub fn delete_member(conn: &Connection, id: i64) -> Result<bool> {
    let deleted = conn
        .execute("DELETE FROM members WHERE id = ?1", params![id])
        .context("failed to delete member")?;
    Ok(deleted > 0)
}
