use crate::models::{ComparisonOp, FilterCondition};
use crate::sql_ast::{SqlBinaryOperator, SqlExpr, SqlLiteral};

/// `None` while the condition has no column.
pub(crate) fn render_condition(condition: &FilterCondition) -> Option<SqlExpr> {
    let column = condition.column.as_ref()?;
    let op = match condition.operator {
        ComparisonOp::Eq => SqlBinaryOperator::Eq,
        ComparisonOp::Neq => SqlBinaryOperator::Neq,
        ComparisonOp::Gt => SqlBinaryOperator::Gt,
        ComparisonOp::Gte => SqlBinaryOperator::Gte,
        ComparisonOp::Lt => SqlBinaryOperator::Lt,
        ComparisonOp::Lte => SqlBinaryOperator::Lte,
    };
    Some(SqlExpr::BinaryOp {
        op,
        left: Box::new(SqlExpr::Column {
            table: None,
            name: column.column_name.clone(),
        }),
        right: Box::new(SqlExpr::Literal(SqlLiteral::from_input(&condition.value))),
    })
}
