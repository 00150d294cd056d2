use crate::dialect::Dialect;

/// A literal typed by the user. Numbers render bare, everything else as a
/// quoted string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlLiteral {
    Number(String),
    Text(String),
}

impl SqlLiteral {
    /// Classify free-form input: anything that parses as a finite number is
    /// numeric (kept as typed, minus surrounding whitespace).
    pub fn from_input(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => SqlLiteral::Number(trimmed.to_string()),
            _ => SqlLiteral::Text(raw.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlExpr {
    Column {
        table: Option<String>,
        name: String,
    },
    Literal(SqlLiteral),
    BinaryOp {
        op: SqlBinaryOperator,
        left: Box<SqlExpr>,
        right: Box<SqlExpr>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlBinaryOperator {
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableRef {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectQuery {
    pub select: Vec<SqlExpr>,
    pub from: TableRef,
    pub filters: Vec<SqlExpr>,
}

pub struct SqlRenderer<'d> {
    dialect: &'d dyn Dialect,
}

impl<'d> SqlRenderer<'d> {
    pub fn new(dialect: &'d dyn Dialect) -> Self {
        Self { dialect }
    }

    /// Render one clause per line, terminated with `;`.
    pub fn render_select(&self, query: &SelectQuery) -> String {
        let select_items: Vec<String> = if query.select.is_empty() {
            vec!["*".to_string()]
        } else {
            query.select.iter().map(|e| self.render_expr(e)).collect()
        };

        let mut sql = format!(
            "SELECT {}\nFROM {}",
            select_items.join(", "),
            self.dialect.qualify_table(&query.from.name)
        );

        if !query.filters.is_empty() {
            let filters: Vec<String> = query.filters.iter().map(|f| self.render_expr(f)).collect();
            sql.push_str(&format!("\nWHERE {}", filters.join("\n  AND ")));
        }

        sql.push(';');
        sql
    }

    fn render_expr(&self, expr: &SqlExpr) -> String {
        match expr {
            SqlExpr::Column { table, name } => match table {
                Some(t) => format!(
                    "{}.{}",
                    self.dialect.quote_ident(t),
                    self.dialect.quote_ident(name)
                ),
                None => self.dialect.quote_ident(name),
            },
            SqlExpr::Literal(lit) => self.dialect.render_literal(lit),
            SqlExpr::BinaryOp { op, left, right } => {
                let op_sql = match op {
                    SqlBinaryOperator::Eq => "=",
                    SqlBinaryOperator::Neq => "!=",
                    SqlBinaryOperator::Gt => ">",
                    SqlBinaryOperator::Gte => ">=",
                    SqlBinaryOperator::Lt => "<",
                    SqlBinaryOperator::Lte => "<=",
                };
                format!(
                    "{} {} {}",
                    self.render_expr(left),
                    op_sql,
                    self.render_expr(right)
                )
            }
        }
    }
}
