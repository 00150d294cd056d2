//! PostgreSQL dialect implementation.

use super::Dialect;

#[derive(Debug, Default, Clone, Copy)]
pub struct PostgresDialect;

impl Dialect for PostgresDialect {
    fn quote_ident(&self, ident: &str) -> String {
        format!("\"{}\"", ident.replace('"', "\"\""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql_ast::SqlLiteral;

    #[test]
    fn quotes_and_escapes_identifiers() {
        assert_eq!(PostgresDialect.quote_ident("users"), "\"users\"");
        assert_eq!(PostgresDialect.quote_ident("we\"ird"), "\"we\"\"ird\"");
    }

    #[test]
    fn numbers_stay_bare() {
        let lit = SqlLiteral::Number("42".to_string());
        assert_eq!(PostgresDialect.render_literal(&lit), "42");
    }
}
