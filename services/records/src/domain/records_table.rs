//! recordsテーブル定義
//!
//! Lambda関数が発行する唯一のSQL文を保持する。
//! `IF NOT EXISTS`付きのため、何度実行してもテーブル構造は変わらない。

/// テーブル名
pub const RECORDS_TABLE_NAME: &str = "records";

/// recordsテーブル作成SQL
///
/// カラム:
/// - recordid: INT PRIMARY KEY
/// - title: VARCHAR(255) NOT NULL
/// - release_date: DATE
pub const CREATE_RECORDS_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS records (recordid INT PRIMARY KEY, title VARCHAR(255) NOT NULL, release_date DATE)";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_table_sql_is_idempotent() {
        assert!(CREATE_RECORDS_TABLE_SQL.starts_with("CREATE TABLE IF NOT EXISTS records "));
    }

    #[test]
    fn test_create_table_sql_columns() {
        assert!(CREATE_RECORDS_TABLE_SQL.contains("recordid INT PRIMARY KEY"));
        assert!(CREATE_RECORDS_TABLE_SQL.contains("title VARCHAR(255) NOT NULL"));
        assert!(CREATE_RECORDS_TABLE_SQL.contains("release_date DATE"));
    }

    #[test]
    fn test_table_name_matches_sql() {
        assert!(CREATE_RECORDS_TABLE_SQL.contains(&format!(" {} (", RECORDS_TABLE_NAME)));
    }
}
