//! SQL dialect abstractions.
//!
//! A dialect only maps identifiers and literals to SQL fragments; clause layout
//! lives in [`crate::sql_ast::SqlRenderer`].

use crate::sql_ast::SqlLiteral;

pub trait Dialect {
    fn quote_ident(&self, ident: &str) -> String;
    fn qualify_table(&self, table: &str) -> String {
        self.quote_ident(table)
    }
    fn render_literal(&self, literal: &SqlLiteral) -> String {
        match literal {
            SqlLiteral::Number(n) => n.clone(),
            SqlLiteral::Text(s) => format!("'{}'", s.replace('\'', "''")),
        }
    }
}

mod generic;
pub use generic::GenericDialect;

mod postgres;
pub use postgres::PostgresDialect;
