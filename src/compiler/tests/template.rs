//! Template text compiler tests

use pretty_assertions::assert_eq;

use super::{compact, compile_in, NamedDialect};
use crate::ast::{Text, Value};
use crate::dialect::{AnsiDialect, MysqlDialect, PostgresDialect};
use crate::error::Error;
use crate::writer::Layout;

fn err(text: Text) -> Error {
    compile_in(AnsiDialect, Layout::Pretty, text).unwrap_err()
}

#[test]
fn test_single_placeholder_per_dialect() {
    let text = Text::new("select * from t where c > {p}").param("p", 1);

    let ansi = compact(AnsiDialect, text.clone());
    assert_eq!(ansi.sql, "select * from t where c > ?");
    assert_eq!(ansi.args, vec![Value::Int(1)]);

    let pg = compact(PostgresDialect, text.clone());
    assert_eq!(pg.sql, "select * from t where c > $1");
    assert_eq!(pg.args, vec![Value::Int(1)]);

    assert_eq!(compact(MysqlDialect, text).sql, "select * from t where c > ?");
}

#[test]
fn test_repeated_names_bind_in_scan_order() {
    let text = Text::new("a = {x} and b = {y} or c = {x}")
        .param("x", "one")
        .param("y", 2);

    let pg = compact(PostgresDialect, text.clone());
    assert_eq!(pg.sql, "a = $1 and b = $2 or c = $3");
    assert_eq!(
        pg.args,
        vec![Value::from("one"), Value::Int(2), Value::from("one")]
    );

    assert_eq!(compact(NamedDialect, text).sql, "a = @x and b = @y or c = @x");
}

#[test]
fn test_identifier_is_trimmed() {
    let text = Text::new("select {  id\t}").param("id", 9);
    let compiled = compact(AnsiDialect, text);
    assert_eq!(compiled.sql, "select ?");
    assert_eq!(compiled.args, vec![Value::Int(9)]);
}

#[test]
fn test_layout_does_not_touch_literal_text() {
    let text = Text::new("select *\n  from t\n where id = {id}").param("id", 1);
    assert_eq!(
        compile_in(AnsiDialect, Layout::Compact, text).unwrap().sql,
        "select *\n  from t\n where id = ?"
    );
}

#[test]
fn test_no_placeholders_passes_through() {
    let compiled = compact(AnsiDialect, Text::new("select '}' from dual"));
    assert_eq!(compiled.sql, "select '}' from dual");
    assert!(compiled.args.is_empty());
}

#[test]
fn test_unknown_parameter() {
    let e = err(Text::new("select * from t where c > {q}").param("p", 1));
    assert!(matches!(e, Error::UnknownParameter(name) if name == "q"));

    // an empty map still resolves nothing
    let e = err(Text::new("select {p}"));
    assert!(matches!(e, Error::UnknownParameter(name) if name == "p"));
}

#[test]
fn test_unterminated_brace() {
    let e = err(Text::new("select * from t where c > {p").param("p", 1));
    assert!(matches!(e, Error::MalformedTemplate { offset: 26, .. }));
}

#[test]
fn test_empty_braces() {
    assert!(matches!(err(Text::new("select {}")), Error::MalformedTemplate { .. }));
    assert!(matches!(err(Text::new("select { }")), Error::MalformedTemplate { .. }));
}

#[test]
fn test_empty_sql() {
    assert!(matches!(err(Text::new("")), Error::InvalidArgument(_)));
    assert!(matches!(err(Text::new("   ")), Error::InvalidArgument(_)));
}
