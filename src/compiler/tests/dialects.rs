//! Dialect-specific rendering

use pretty_assertions::assert_eq;

use super::{compact, compile_in, NamedDialect};
use crate::ast::*;
use crate::dialect::{AnsiDialect, MysqlDialect, PostgresDialect};
use crate::error::{Error, Position};
use crate::writer::Layout;

fn by_id(id: i64) -> Query {
    Query {
        where_clause: Some(Where::new(
            Conditions::new()
                .push(Condition::eq("id", id))
                .or()
                .push(Condition::in_list("tag", vec!["a", "b"])),
        )),
        ..Query::from_table(Table::new("items"))
    }
}

#[test]
fn test_placeholder_modes() {
    assert_eq!(
        compact(AnsiDialect, by_id(1)).sql,
        "SELECT * FROM items WHERE id = ? OR tag IN (?, ?);"
    );
    assert_eq!(
        compact(PostgresDialect, by_id(1)).sql,
        "SELECT * FROM items WHERE id = $1 OR tag IN ($2, $3);"
    );
    assert_eq!(
        compact(NamedDialect, by_id(1)).sql,
        "SELECT * FROM items WHERE id = @p1 OR tag IN (@p2, @p3);"
    );
}

#[test]
fn test_args_identical_across_dialects() {
    let expected = vec![Value::Int(1), Value::from("a"), Value::from("b")];
    assert_eq!(compact(AnsiDialect, by_id(1)).args, expected);
    assert_eq!(compact(MysqlDialect, by_id(1)).args, expected);
    assert_eq!(compact(PostgresDialect, by_id(1)).args, expected);
    assert_eq!(compact(NamedDialect, by_id(1)).args, expected);
}

#[test]
fn test_limit_styles() {
    let paged = |offset, count| Query {
        offset,
        count,
        ..Query::from_table(Table::new("t"))
    };

    assert_eq!(compact(MysqlDialect, paged(10, 5)).sql, "SELECT * FROM t LIMIT 10,5;");
    assert_eq!(compact(AnsiDialect, paged(0, 5)).sql, "SELECT * FROM t LIMIT 0,5;");
    assert_eq!(
        compact(PostgresDialect, paged(10, 5)).sql,
        "SELECT * FROM t LIMIT 5 OFFSET 10;"
    );
    assert_eq!(compact(PostgresDialect, paged(0, 5)).sql, "SELECT * FROM t LIMIT 5;");
    assert_eq!(compact(PostgresDialect, paged(10, 0)).sql, "SELECT * FROM t OFFSET 10;");
}

#[test]
fn test_alias_quoting() {
    let query = Query {
        select: Some(Select::new().field(Field::new(Expression::column("n")).alias("order"))),
        ..Query::from_table(Table::new("t"))
    };
    assert_eq!(
        compact(MysqlDialect, query.clone()).sql,
        "SELECT n AS `order` FROM t;"
    );
    assert_eq!(
        compact(PostgresDialect, query).sql,
        "SELECT n AS \"order\" FROM t;"
    );
}

#[test]
fn test_dispatch_errors() {
    let err = compile_in(AnsiDialect, Layout::Pretty, Expression::Zero).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));

    let err = compile_in(AnsiDialect, Layout::Pretty, Table::new("t")).unwrap_err();
    assert!(matches!(
        err,
        Error::UnsupportedExpression {
            kind: NodeKind::Table,
            position: Position::TopLevel
        }
    ));

    let err = compile_in(PostgresDialect, Layout::Pretty, Expression::Output("x".into())).unwrap_err();
    assert!(matches!(
        err,
        Error::UnsupportedExpression {
            kind: NodeKind::Output,
            ..
        }
    ));
}
