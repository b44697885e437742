//! Read-only SQL statement validation
//!
//! A conservative allow-list, not a SQL parser. The keyword check compares an
//! uppercased copy of the trimmed query; the original casing is what the
//! caller executes. The semicolon check applies to the whole original string,
//! which blocks stacked-query injection even inside string literals.
//!
//! Known limitation: a legitimate query containing a semicolon inside a
//! quoted string literal is rejected. The tradeoff deliberately favors false
//! rejection over false acceptance; fixing it would require a real parser.

use super::Rejection;

/// Validates that a SQL query is read-only
///
/// Accepts iff the trimmed query starts with `SELECT` or `WITH`
/// (case-insensitive) and the original string contains no semicolon anywhere.
///
/// # Errors
///
/// Returns [`Rejection::QueryNotReadOnly`] for statements that do not start
/// with an allowed keyword, and [`Rejection::QueryContainsSemicolon`] for any
/// query containing `;`.
///
/// # Examples
///
/// ```
/// use toolgate::validate::sql_read_only;
///
/// assert!(sql_read_only("SELECT * FROM users").is_ok());
/// assert!(sql_read_only("SELECT 1; DROP TABLE users").is_err());
/// ```
pub fn sql_read_only(query: &str) -> Result<(), Rejection> {
    let normalized = query.trim().to_uppercase();
    if !(normalized.starts_with("SELECT") || normalized.starts_with("WITH")) {
        tracing::debug!("Rejected non-read-only query");
        return Err(Rejection::QueryNotReadOnly);
    }
    if query.contains(';') {
        tracing::debug!("Rejected query containing semicolon");
        return Err(Rejection::QueryContainsSemicolon);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_queries_accept() {
        for sql in [
            "SELECT * FROM users",
            "  select id from orders",
            "WITH cte AS (SELECT 1) SELECT * FROM cte",
            "with totals as (select 1) select * from totals",
        ] {
            assert!(sql_read_only(sql).is_ok(), "{:?} should accept", sql);
        }
    }

    #[test]
    fn test_write_queries_reject() {
        for sql in [
            "INSERT INTO users VALUES (1)",
            "UPDATE users SET name='x'",
            "DELETE FROM logs",
            "DROP TABLE users",
            "TRUNCATE orders",
        ] {
            assert_eq!(sql_read_only(sql).unwrap_err(), Rejection::QueryNotReadOnly);
        }
    }

    #[test]
    fn test_stacked_queries_reject() {
        for sql in [
            "SELECT 1; DROP TABLE users",
            "SELECT * FROM users; DELETE FROM logs",
            "SELECT ';'",
        ] {
            assert_eq!(
                sql_read_only(sql).unwrap_err(),
                Rejection::QueryContainsSemicolon
            );
        }
    }

    #[test]
    fn test_keyword_check_runs_before_semicolon_check() {
        // A write statement with a semicolon reports the keyword rejection
        assert_eq!(
            sql_read_only("DELETE FROM t; SELECT 1").unwrap_err(),
            Rejection::QueryNotReadOnly
        );
    }

    #[test]
    fn test_empty_query_rejects() {
        assert_eq!(sql_read_only("").unwrap_err(), Rejection::QueryNotReadOnly);
        assert_eq!(
            sql_read_only("   ").unwrap_err(),
            Rejection::QueryNotReadOnly
        );
    }

    #[test]
    fn test_idempotent() {
        assert_eq!(
            sql_read_only("SELECT * FROM t"),
            sql_read_only("SELECT * FROM t")
        );
        assert_eq!(sql_read_only("DROP TABLE t"), sql_read_only("DROP TABLE t"));
    }
}
