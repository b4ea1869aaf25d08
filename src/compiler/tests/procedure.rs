//! Procedure call compiler tests

use pretty_assertions::assert_eq;

use super::{compact, compile_in, pretty, NamedDialect};
use crate::ast::{Parameter, ParameterDirection, Procedure, Value};
use crate::dialect::{AnsiDialect, MysqlDialect, PostgresDialect};
use crate::error::Error;
use crate::writer::Layout;

fn get_total() -> Procedure {
    Procedure::new("get_total")
        .param(Parameter::input("id", 7))
        .param(Parameter::output("total"))
}

fn bump() -> Procedure {
    Procedure::new("bump")
        .param(Parameter::new("counter", ParameterDirection::InOut, 1))
        .param(Parameter::input("step", 2))
        .param(Parameter::new("result", ParameterDirection::Return, Value::Null))
}

#[test]
fn test_in_and_out() {
    let compiled = pretty(MysqlDialect, get_total());
    assert_eq!(compiled.sql, "CALL get_total(?, @total);\nSELECT @total;");
    assert_eq!(compiled.args, vec![Value::Int(7)]);

    assert_eq!(
        compact(AnsiDialect, get_total()).sql,
        "CALL get_total(?, @total); SELECT @total;"
    );
}

#[test]
fn test_inout_and_return() {
    let compiled = pretty(MysqlDialect, bump());
    assert_eq!(
        compiled.sql,
        "SET @counter = ?;\nSET @result = bump(@counter, ?);\nSELECT @counter, @result;"
    );
    assert_eq!(compiled.args, vec![Value::Int(1), Value::Int(2)]);
}

#[test]
fn test_inputs_only_has_no_trailing_select() {
    let procedure = Procedure::new("touch").param(Parameter::input("id", 3));
    let compiled = pretty(AnsiDialect, procedure);
    assert_eq!(compiled.sql, "CALL touch(?);");
    assert_eq!(compiled.args, vec![Value::Int(3)]);

    assert_eq!(pretty(AnsiDialect, Procedure::new("vacuum")).sql, "CALL vacuum();");
}

#[test]
fn test_named_placeholders_use_parameter_names() {
    assert_eq!(
        compact(NamedDialect, get_total()).sql,
        "CALL get_total(@id, @total); SELECT @total;"
    );
}

#[test]
fn test_native_call() {
    let compiled = compact(PostgresDialect, get_total());
    assert_eq!(compiled.sql, "CALL get_total($1, NULL);");
    assert_eq!(compiled.args, vec![Value::Int(7)]);

    let compiled = compact(PostgresDialect, bump());
    assert_eq!(compiled.sql, "SELECT * FROM bump($1, $2);");
    assert_eq!(compiled.args, vec![Value::Int(1), Value::Int(2)]);
}

#[test]
fn test_empty_name() {
    let err = compile_in(AnsiDialect, Layout::Pretty, Procedure::new(" ")).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
}
