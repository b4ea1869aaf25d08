//! SELECT / INSERT / UPDATE / DELETE generation.
//!
//! A recursive visitor over [`Expression`]. Every visit returns a `Result`
//! so a node that cannot appear where it was found aborts the whole
//! compilation with a structured error, never with partial text.

use crate::ast::*;
use crate::compiler::{CompiledQuery, Placeholders};
use crate::dialect::{Dialect, LimitStyle};
use crate::error::{Error, Position, Result};
use crate::writer::{Layout, StatementWriter};

const NULL: &str = "NULL";
const ROW_NUM: &str = "__row_num";
const PAGED: &str = "__paged";
const DISTINCT_ROWS: &str = "__distinct";

/// Compiles one statement; consumed by [`StatementCompiler::compile`].
#[derive(Debug)]
pub struct StatementCompiler<'d> {
    dialect: &'d dyn Dialect,
    w: StatementWriter,
    args: Vec<Value>,
    placeholders: Placeholders,
}

impl<'d> StatementCompiler<'d> {
    pub fn new(dialect: &'d dyn Dialect, layout: Layout) -> Self {
        Self {
            dialect,
            w: StatementWriter::new(layout),
            args: Vec::new(),
            placeholders: Placeholders::new(dialect),
        }
    }

    pub fn compile(mut self, expr: &Expression) -> Result<CompiledQuery> {
        match expr {
            Expression::Query(query) => self.visit_query(query, true)?,
            Expression::Insert(insert) => self.visit_insert(insert)?,
            Expression::Update(update) => self.visit_update(update)?,
            Expression::Delete(delete) => self.visit_delete(delete)?,
            Expression::Zero => return Err(Error::invalid("compile expression is empty")),
            other => return Err(Error::unsupported(other.kind(), Position::TopLevel)),
        }

        Ok(CompiledQuery {
            sql: self.w.into_string(),
            args: self.args,
        })
    }

    fn visit(&mut self, expr: &Expression) -> Result<()> {
        match expr {
            Expression::Zero => {}
            Expression::Text(_)
            | Expression::Procedure(_)
            | Expression::Parameter(_)
            | Expression::Output(_)
            | Expression::Insert(_)
            | Expression::Update(_)
            | Expression::Delete(_) => {
                return Err(Error::unsupported(expr.kind(), Position::Nested));
            }
            Expression::Null => self.w.write(NULL),
            Expression::Sql(raw) => self.w.write(raw),
            Expression::Operator(op) => self.w.write(op.as_sql()),
            Expression::Query(query) => {
                self.w.open_parentheses();
                self.visit_query(query, false)?;
                self.w.close_parentheses();
            }
            Expression::Value(value) => self.write_value(value),
            Expression::Table(table) => self.visit_table(table)?,
            Expression::Column(column) => self.w.write(&column.0),
            Expression::Condition(condition) => self.visit_condition(condition)?,
            Expression::Conditions(conditions) => self.visit_conditions(conditions)?,
            Expression::Aggregate(aggregate) => self.visit_aggregate(aggregate)?,
            Expression::Select(select) => self.visit_select(Some(select))?,
            Expression::From(from) => self.visit_from(from)?,
            Expression::Join(join) => self.visit_join(join)?,
            Expression::Where(where_clause) => self.visit_where(where_clause)?,
            Expression::GroupBy(group_by) => self.visit_group_by(group_by)?,
            Expression::Having(having) => self.visit_having(having)?,
            Expression::OrderBy(order_by) => self.visit_order_by(order_by)?,
            Expression::Field(field) => self.visit_field(field)?,
        }
        Ok(())
    }

    fn write_value(&mut self, value: &Value) {
        if value.is_null() {
            self.w.write(NULL);
            return;
        }
        let placeholder = self.placeholders.next(None);
        self.w.write(&placeholder);
        self.args.push(value.clone());
    }

    fn visit_table(&mut self, table: &Table) -> Result<()> {
        let alias = table.alias.as_deref().filter(|a| !a.is_empty());
        match (table.name.is_empty(), alias) {
            (true, None) => return Err(Error::invalid("table has neither name nor alias")),
            (false, Some(alias)) => self.w.print(&[table.name.as_str(), " AS ", alias]),
            (false, None) => self.w.write(&table.name),
            (true, Some(alias)) => self.w.write(alias),
        }
        Ok(())
    }

    fn visit_aggregate(&mut self, aggregate: &Aggregate) -> Result<()> {
        self.w.write(&aggregate.func.to_string());
        self.w.open_parentheses();
        self.visit(&aggregate.expr)?;
        self.w.close_parentheses();
        Ok(())
    }

    fn visit_condition(&mut self, condition: &Condition) -> Result<()> {
        let op = condition.op;
        match (&condition.left, &condition.right) {
            (None, None) => self.w.write(op.as_sql()),
            (None, Some(right)) => {
                self.w.write(op.as_sql());
                self.w.blank();
                self.visit_parenthesized(right)?;
            }
            (Some(left), None) => {
                self.visit(left)?;
                self.w.blank();
                self.w.write(op.as_sql());
            }
            (Some(left), Some(right)) if op.is_membership() => {
                self.visit(left)?;
                self.w.blank();
                self.w.write(op.as_sql());
                self.w.blank();
                self.visit_in_list(right)?;
            }
            (Some(left), Some(right)) => {
                self.visit(left)?;
                self.w.blank();
                self.w.write(op.as_sql());
                self.w.blank();
                self.visit(right)?;
            }
        }
        Ok(())
    }

    /// `(expr)`; a subquery fills the parentheses without adding its own.
    fn visit_parenthesized(&mut self, expr: &Expression) -> Result<()> {
        self.w.open_parentheses();
        match expr {
            Expression::Query(query) => self.visit_query(query, false)?,
            other => self.visit(other)?,
        }
        self.w.close_parentheses();
        Ok(())
    }

    /// Right side of IN / NOT IN. A list value binds one placeholder per
    /// element; NULL renders an empty list.
    fn visit_in_list(&mut self, right: &Expression) -> Result<()> {
        match right {
            Expression::Value(Value::List(items)) => {
                self.w.open_parentheses();
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        self.w.comma();
                    }
                    self.write_value(item);
                }
                self.w.close_parentheses();
            }
            Expression::Value(Value::Null) => {
                self.w.open_parentheses();
                self.w.close_parentheses();
            }
            other => self.visit_parenthesized(other)?,
        }
        Ok(())
    }

    fn visit_condition_item(&mut self, item: &Expression) -> Result<()> {
        if item.is_open_parentheses() {
            self.w.open_parentheses();
        } else if item.is_close_parentheses() {
            self.w.close_parentheses();
        } else {
            self.visit(item)?;
        }
        Ok(())
    }

    /// One item per line. Depth only drives indentation.
    fn visit_conditions(&mut self, conditions: &Conditions) -> Result<()> {
        ensure_balanced(conditions)?;

        let mut depth: usize = 0;
        for (i, item) in conditions.items.iter().enumerate() {
            if i > 0 {
                self.w.line_break();
            }
            if item.is_close_parentheses() {
                depth = depth.saturating_sub(1);
            }
            self.w.indent(depth);
            self.visit_condition_item(item)?;
            if item.is_open_parentheses() {
                depth += 1;
            }
        }
        Ok(())
    }

    fn visit_join(&mut self, join: &Join) -> Result<()> {
        self.w.write(&join.kind.to_string());
        self.w.blank();
        self.visit_table(&join.table)?;

        if !join.conditions.is_empty() {
            ensure_balanced(&join.conditions)?;
            self.w.blank();
            self.w.write("ON");
            for item in &join.conditions.items {
                self.w.blank();
                self.visit_condition_item(item)?;
            }
        }
        Ok(())
    }

    fn visit_from(&mut self, from: &FromClause) -> Result<()> {
        if from.tables.is_empty() {
            return Err(Error::invalid("FROM clause has no tables"));
        }

        self.w.line_break();
        self.w.write("FROM");
        self.w.blank();
        for (i, table) in from.tables.iter().enumerate() {
            if i > 0 {
                self.w.comma();
            }
            self.visit_table(table)?;
        }

        for join in &from.joins {
            self.w.line_break();
            self.visit_join(join)?;
        }
        Ok(())
    }

    fn visit_where(&mut self, where_clause: &Where) -> Result<()> {
        if where_clause.is_empty() {
            return Ok(());
        }
        self.w.line_break();
        self.w.write("WHERE");
        self.w.line_break();
        self.visit_conditions(&where_clause.conditions)
    }

    fn visit_field(&mut self, field: &Field) -> Result<()> {
        self.visit(&field.expr)?;
        if let Some(alias) = field.alias.as_deref().filter(|a| !a.is_empty()) {
            self.w.blank();
            self.w.write("AS");
            self.w.blank();
            self.w.write(&self.dialect.quote(alias));
        }
        Ok(())
    }

    fn visit_select(&mut self, select: Option<&Select>) -> Result<()> {
        let fields = match select {
            Some(select) if !select.fields.is_empty() => &select.fields,
            _ => {
                self.w.write("*");
                return Ok(());
            }
        };

        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                self.w.comma();
            }
            self.visit_field(field)?;
        }
        Ok(())
    }

    fn visit_having(&mut self, having: &Having) -> Result<()> {
        if having.conditions.is_empty() {
            return Ok(());
        }
        self.w.line_break();
        self.w.write("HAVING");
        self.w.line_break();
        self.visit_conditions(&having.conditions)
    }

    fn visit_group_by(&mut self, group_by: &GroupBy) -> Result<()> {
        if group_by.is_empty() {
            return Ok(());
        }
        self.w.line_break();
        self.w.write("GROUP BY");
        self.w.blank();
        for (i, field) in group_by.fields.iter().enumerate() {
            if i > 0 {
                self.w.comma();
            }
            self.visit(field)?;
        }
        Ok(())
    }

    fn visit_order_by(&mut self, order_by: &OrderBy) -> Result<()> {
        if order_by.is_empty() {
            return Ok(());
        }
        self.w.line_break();
        self.w.write("ORDER BY");
        self.w.blank();
        self.write_order_fields(order_by)
    }

    fn write_order_fields(&mut self, order_by: &OrderBy) -> Result<()> {
        for (i, field) in order_by.fields.iter().enumerate() {
            if i > 0 {
                self.w.comma();
            }
            self.visit(&field.expr)?;
            self.w.blank();
            self.w.write(&field.direction.to_string());
        }
        Ok(())
    }

    fn visit_query(&mut self, query: &Query, top_level: bool) -> Result<()> {
        let limited = query.offset > 0 || query.count > 0;

        if limited && self.dialect.limit_style() == LimitStyle::RowNumber {
            self.visit_windowed_query(query, top_level)?;
        } else {
            self.visit_projection(query, false)?;
            if let Some(order_by) = &query.order_by {
                self.visit_order_by(order_by)?;
            }
            if limited {
                self.write_limit(query.offset, query.count);
            }
        }

        if top_level {
            self.w.terminate(self.dialect.statement_terminator());
        }
        Ok(())
    }

    /// Everything from SELECT up to HAVING.
    fn visit_projection(&mut self, query: &Query, numbered: bool) -> Result<()> {
        self.w.write("SELECT");
        if query.distinct {
            self.w.blank();
            self.w.write("DISTINCT");
        }
        self.w.blank();
        self.visit_select(query.select.as_ref())?;

        if numbered {
            self.write_row_number(query, false)?;
        }

        if let Some(from) = &query.from {
            self.visit_from(from)?;
        }
        if let Some(where_clause) = &query.where_clause {
            self.visit_where(where_clause)?;
        }
        if let Some(group_by) = query.group_by.as_ref().filter(|g| !g.is_empty()) {
            self.visit_group_by(group_by)?;
            if let Some(having) = &query.having {
                self.visit_having(having)?;
            }
        }
        Ok(())
    }

    /// `, ROW_NUMBER() OVER (ORDER BY ...) AS __row_num`. Over a derived
    /// table the order columns are written as the table's output names.
    fn write_row_number(&mut self, query: &Query, derived: bool) -> Result<()> {
        self.w.comma();
        self.w.write("ROW_NUMBER() OVER");
        self.w.blank();
        self.w.open_parentheses();
        self.w.write("ORDER BY");
        self.w.blank();
        match &query.order_by {
            Some(order_by) if !order_by.is_empty() && derived => {
                for (i, field) in order_by.fields.iter().enumerate() {
                    if i > 0 {
                        self.w.comma();
                    }
                    match &field.expr {
                        Expression::Column(column) => {
                            let name = self.output_name(query.select.as_ref(), &column.0);
                            self.w.write(&name);
                        }
                        other => self.visit(other)?,
                    }
                    self.w.blank();
                    self.w.write(&field.direction.to_string());
                }
            }
            Some(order_by) if !order_by.is_empty() => self.write_order_fields(order_by)?,
            _ => self.w.write("(SELECT NULL)"),
        }
        self.w.close_parentheses();
        self.w.print(&[" AS ", ROW_NUM]);
        Ok(())
    }

    /// Name under which `column` leaves a projection: the alias of the
    /// field selecting it, else its unqualified name.
    fn output_name(&self, select: Option<&Select>, column: &str) -> String {
        let aliased = select
            .into_iter()
            .flat_map(|s| s.fields.iter())
            .find(|f| matches!(&f.expr, Expression::Column(c) if c.0 == column))
            .and_then(|f| f.alias.as_deref())
            .filter(|a| !a.is_empty());
        match aliased {
            Some(alias) => self.dialect.quote(alias),
            None => unqualified(column).to_string(),
        }
    }

    /// Output column names of a projection; `None` when some field has no
    /// name to select it by, in which case the outer query selects `*`.
    fn output_columns(&self, select: Option<&Select>) -> Option<Vec<String>> {
        let fields = &select?.fields;
        if fields.is_empty() {
            return None;
        }
        fields
            .iter()
            .map(|field| {
                if let Some(alias) = field.alias.as_deref().filter(|a| !a.is_empty()) {
                    return Some(self.dialect.quote(alias));
                }
                match &field.expr {
                    Expression::Column(column) => {
                        let name = unqualified(&column.0);
                        (name != "*").then(|| name.to_string())
                    }
                    _ => None,
                }
            })
            .collect()
    }

    /// For dialects without LIMIT: number the rows in a derived table and
    /// filter on the number. DISTINCT is applied in a further derived table
    /// below the numbering, since numbered rows are never duplicates.
    fn visit_windowed_query(&mut self, query: &Query, top_level: bool) -> Result<()> {
        let upper = match query.count {
            0 => None,
            count => Some(query.offset.checked_add(count).ok_or_else(|| {
                Error::invalid(format!(
                    "row window {} + {} overflows",
                    query.offset, query.count
                ))
            })?),
        };

        self.w.write("SELECT");
        self.w.blank();
        match self.output_columns(query.select.as_ref()) {
            Some(columns) => self.w.write(&columns.join(", ")),
            None => self.w.write("*"),
        }
        self.w.blank();
        self.w.write("FROM");
        self.w.blank();
        self.w.open_parentheses();
        if query.distinct {
            self.w.print(&["SELECT ", DISTINCT_ROWS, ".*"]);
            self.write_row_number(query, true)?;
            self.w.line_break();
            self.w.write("FROM");
            self.w.blank();
            self.w.open_parentheses();
            self.visit_projection(query, false)?;
            self.w.close_parentheses();
            self.w.print(&[" AS ", DISTINCT_ROWS]);
        } else {
            self.visit_projection(query, true)?;
        }
        self.w.close_parentheses();
        self.w.print(&[" AS ", PAGED]);

        self.w.line_break();
        self.w.write(&format!("WHERE {} > {}", ROW_NUM, query.offset));
        if let Some(upper) = upper {
            self.w.write(&format!(" AND {} <= {}", ROW_NUM, upper));
        }
        // subqueries may not carry ORDER BY on these backends
        if top_level {
            self.w.line_break();
            self.w.print(&["ORDER BY ", ROW_NUM]);
        }
        Ok(())
    }

    fn write_limit(&mut self, offset: u64, count: u64) {
        self.w.line_break();
        match self.dialect.limit_style() {
            LimitStyle::OffsetComma => self.w.write(&format!("LIMIT {},{}", offset, count)),
            LimitStyle::LimitOffset | LimitStyle::RowNumber => {
                if count > 0 {
                    self.w.write(&format!("LIMIT {}", count));
                }
                if offset > 0 {
                    self.w.blank();
                    self.w.write(&format!("OFFSET {}", offset));
                }
            }
        }
    }

    /// `LIMIT count` of UPDATE and DELETE.
    fn write_row_limit(&mut self, kind: NodeKind, count: u64) -> Result<()> {
        if count == 0 {
            return Ok(());
        }
        if self.dialect.limit_style() == LimitStyle::RowNumber {
            return Err(Error::unsupported(kind, Position::TopLevel));
        }
        self.w.line_break();
        self.w.write(&format!("LIMIT {}", count));
        Ok(())
    }

    fn visit_insert(&mut self, insert: &Insert) -> Result<()> {
        let table = statement_table(&insert.table)?;
        if insert.sets.is_empty() {
            return Err(Error::invalid(format!("insert into `{}` has no values", table)));
        }

        self.w.print(&["INSERT INTO ", table]);
        self.w.blank();
        self.w.open_parentheses();
        for (i, set) in insert.sets.iter().enumerate() {
            if i > 0 {
                self.w.comma();
            }
            self.w.write(&set.column.0);
        }
        self.w.close_parentheses();

        self.w.line_break();
        self.w.write("VALUES");
        self.w.blank();
        self.w.open_parentheses();
        for (i, set) in insert.sets.iter().enumerate() {
            if i > 0 {
                self.w.comma();
            }
            self.visit(&set.value)?;
        }
        self.w.close_parentheses();

        self.w.terminate(self.dialect.statement_terminator());
        Ok(())
    }

    fn visit_update(&mut self, update: &Update) -> Result<()> {
        let table = statement_table(&update.table)?;
        if update.sets.is_empty() {
            return Err(Error::invalid(format!("update of `{}` sets no columns", table)));
        }

        self.w.print(&["UPDATE ", table]);
        self.w.line_break();
        self.w.write("SET");
        self.w.blank();
        for (i, set) in update.sets.iter().enumerate() {
            if i > 0 {
                self.w.comma();
            }
            self.w.print(&[set.column.0.as_str(), " = "]);
            self.visit(&set.value)?;
        }

        if let Some(where_clause) = &update.where_clause {
            self.visit_where(where_clause)?;
        }
        if let Some(order_by) = &update.order_by {
            self.visit_order_by(order_by)?;
        }
        self.write_row_limit(NodeKind::Update, update.count)?;

        self.w.terminate(self.dialect.statement_terminator());
        Ok(())
    }

    fn visit_delete(&mut self, delete: &Delete) -> Result<()> {
        let table = statement_table(&delete.table)?;

        self.w.print(&["DELETE FROM ", table]);
        if let Some(where_clause) = &delete.where_clause {
            self.visit_where(where_clause)?;
        }
        if let Some(order_by) = &delete.order_by {
            self.visit_order_by(order_by)?;
        }
        self.write_row_limit(NodeKind::Delete, delete.count)?;

        self.w.terminate(self.dialect.statement_terminator());
        Ok(())
    }
}

/// `t.c` -> `c`
fn unqualified(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}

/// DML statements address their table by name only.
fn statement_table(table: &Table) -> Result<&str> {
    if table.name.is_empty() {
        return Err(Error::invalid("statement table name is empty"));
    }
    Ok(&table.name)
}

fn ensure_balanced(conditions: &Conditions) -> Result<()> {
    if conditions.is_balanced() {
        Ok(())
    } else {
        Err(Error::invalid("unbalanced parentheses in condition sequence"))
    }
}
