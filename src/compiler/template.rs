//! `{name}` template substitution.
//!
//! The scanner alternates between literal text, copied verbatim, and a
//! brace-delimited identifier which is replaced by a dialect placeholder.

use nom::{
    IResult,
    bytes::complete::{tag, take_until},
    sequence::delimited,
};

use crate::ast::Text;
use crate::compiler::{CompiledQuery, Placeholders};
use crate::dialect::Dialect;
use crate::error::{Error, Result};

/// Literal text up to the next `{`.
fn literal(input: &str) -> IResult<&str, &str> {
    take_until("{")(input)
}

/// `{ident}`, yielding the untrimmed identifier.
fn placeholder(input: &str) -> IResult<&str, &str> {
    delimited(tag("{"), take_until("}"), tag("}"))(input)
}

/// Compile templated SQL against its parameter map.
pub fn compile_text(dialect: &dyn Dialect, text: &Text) -> Result<CompiledQuery> {
    if text.sql.trim().is_empty() {
        return Err(Error::invalid("template SQL is empty"));
    }

    let source = text.sql.as_str();
    let mut sql = String::with_capacity(source.len());
    let mut args = Vec::new();
    let mut placeholders = Placeholders::new(dialect);
    let mut rest = source;

    loop {
        let Ok((tail, chunk)) = literal(rest) else {
            sql.push_str(rest);
            break;
        };
        sql.push_str(chunk);

        let offset = source.len() - tail.len();
        let (after, ident) = placeholder(tail)
            .map_err(|_| Error::malformed(offset, "placeholder is never closed"))?;

        let name = ident.trim();
        if name.is_empty() {
            return Err(Error::malformed(offset, "placeholder has no name"));
        }
        let parameter = text
            .find_parameter(name)
            .ok_or_else(|| Error::UnknownParameter(name.to_string()))?;

        sql.push_str(&placeholders.next(Some(name)));
        args.push(parameter.value.clone());
        rest = after;
    }

    Ok(CompiledQuery { sql, args })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::AnsiDialect;

    #[test]
    fn test_scanner_pieces() {
        assert_eq!(literal("a > {p}"), Ok(("{p}", "a > ")));
        assert_eq!(placeholder("{ p } tail"), Ok((" tail", " p ")));
        assert!(placeholder("{p").is_err());
        assert!(literal("no braces").is_err());
    }

    #[test]
    fn test_offset_points_at_open_brace() {
        let text = Text::new("select {a} from {t").param("a", 1);
        match compile_text(&AnsiDialect, &text) {
            Err(Error::MalformedTemplate { offset, .. }) => assert_eq!(offset, 16),
            other => panic!("expected MalformedTemplate, got {:?}", other),
        }
    }
}
