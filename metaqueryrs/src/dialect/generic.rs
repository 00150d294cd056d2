//! Dialect emitting identifiers exactly as named in the catalog.

use super::Dialect;

#[derive(Debug, Default, Clone, Copy)]
pub struct GenericDialect;

impl Dialect for GenericDialect {
    fn quote_ident(&self, ident: &str) -> String {
        ident.to_string()
    }
}
