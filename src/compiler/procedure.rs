//! Stored procedure calls.
//!
//! Backends without output-parameter binding get a small script: session
//! variables are seeded for `InOut` parameters, the call writes into
//! `@name` variables, and a trailing `SELECT` reads them back as a row.
//! Backends with native calls pass `NULL` in output positions instead.

use crate::ast::{Parameter, ParameterDirection, Procedure, Value};
use crate::compiler::{CompiledQuery, Placeholders};
use crate::dialect::{Dialect, ProcedureStyle};
use crate::error::{Error, Result};
use crate::writer::{Layout, StatementWriter};

/// Compile a procedure call in the dialect's [`ProcedureStyle`].
pub fn compile_procedure(
    dialect: &dyn Dialect,
    procedure: &Procedure,
    layout: Layout,
) -> Result<CompiledQuery> {
    if procedure.name.trim().is_empty() {
        return Err(Error::invalid("procedure name is empty"));
    }
    let mut returns = procedure.return_parameters();
    let ret = returns.next();
    if returns.next().is_some() {
        return Err(Error::invalid(format!(
            "procedure `{}` designates more than one return parameter",
            procedure.name
        )));
    }

    let mut call = ProcedureCall {
        dialect,
        procedure,
        w: StatementWriter::new(layout),
        args: Vec::new(),
        placeholders: Placeholders::new(dialect),
    };
    match dialect.procedure_style() {
        ProcedureStyle::SessionVariables => call.session_variables(ret)?,
        ProcedureStyle::NativeCall => call.native(ret.is_some())?,
    }

    Ok(CompiledQuery {
        sql: call.w.into_string(),
        args: call.args,
    })
}

struct ProcedureCall<'a> {
    dialect: &'a dyn Dialect,
    procedure: &'a Procedure,
    w: StatementWriter,
    args: Vec<Value>,
    placeholders: Placeholders,
}

impl ProcedureCall<'_> {
    fn session_variables(&mut self, ret: Option<&Parameter>) -> Result<()> {
        let procedure = self.procedure;
        let terminator = self.dialect.statement_terminator();

        for p in &procedure.parameters {
            if p.direction == ParameterDirection::InOut {
                let var = self.variable(p)?;
                self.w.print(&["SET ", var.as_str(), " = "]);
                self.bind(p);
                self.w.terminate(terminator);
                self.w.line_break();
            }
        }

        match ret {
            Some(ret) => {
                let var = self.variable(ret)?;
                self.w.print(&["SET ", var.as_str(), " = ", procedure.name.as_str()]);
            }
            None => self.w.print(&["CALL ", procedure.name.as_str()]),
        }
        self.w.open_parentheses();
        let mut first = true;
        for p in &procedure.parameters {
            if p.direction == ParameterDirection::Return {
                continue;
            }
            if !first {
                self.w.comma();
            }
            first = false;
            if p.direction.is_out() {
                let var = self.variable(p)?;
                self.w.write(&var);
            } else {
                self.bind(p);
            }
        }
        self.w.close_parentheses();
        self.w.terminate(terminator);

        let outputs = procedure
            .parameters
            .iter()
            .filter(|p| p.direction != ParameterDirection::In)
            .map(|p| self.variable(p))
            .collect::<Result<Vec<_>>>()?;
        if !outputs.is_empty() {
            self.w.line_break();
            self.w.write("SELECT");
            self.w.blank();
            self.w.write(&outputs.join(", "));
            self.w.terminate(terminator);
        }
        Ok(())
    }

    /// `CALL name(...)`, or `SELECT * FROM name(...)` for functions.
    fn native(&mut self, returns: bool) -> Result<()> {
        let procedure = self.procedure;
        if returns {
            self.w.print(&["SELECT * FROM ", procedure.name.as_str()]);
        } else {
            self.w.print(&["CALL ", procedure.name.as_str()]);
        }
        self.w.open_parentheses();
        let mut first = true;
        for p in &procedure.parameters {
            let skip = match p.direction {
                ParameterDirection::Return => true,
                ParameterDirection::Out => returns,
                _ => false,
            };
            if skip {
                continue;
            }
            if !first {
                self.w.comma();
            }
            first = false;
            if p.direction == ParameterDirection::Out {
                self.w.write("NULL");
            } else {
                self.bind(p);
            }
        }
        self.w.close_parentheses();
        self.w.terminate(self.dialect.statement_terminator());
        Ok(())
    }

    fn bind(&mut self, p: &Parameter) {
        let name = Some(p.name.as_str()).filter(|n| !n.is_empty());
        let placeholder = self.placeholders.next(name);
        self.w.write(&placeholder);
        self.args.push(p.value.clone());
    }

    /// Session variable holding an output parameter.
    fn variable(&self, p: &Parameter) -> Result<String> {
        let name = p.name.trim();
        if name.is_empty() {
            return Err(Error::invalid(format!(
                "{:?} parameter of procedure `{}` has no name",
                p.direction, self.procedure.name
            )));
        }
        Ok(format!("@{}", name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::AnsiDialect;

    #[test]
    fn test_unnamed_output_is_rejected() {
        let procedure = Procedure::new("sp").param(Parameter::output(""));
        let err = compile_procedure(&AnsiDialect, &procedure, Layout::Pretty).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_two_returns_rejected() {
        let procedure = Procedure::new("fn_total")
            .param(Parameter::new("a", ParameterDirection::Return, Value::Null))
            .param(Parameter::new("b", ParameterDirection::Return, Value::Null));
        assert!(compile_procedure(&AnsiDialect, &procedure, Layout::Pretty).is_err());
    }
}
