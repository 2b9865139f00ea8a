use std::collections::HashMap;

use sea_orm::{
    sea_query::{Alias, Expr, ExprTrait, Func, Order, Query, SelectStatement},
    ConnectionTrait, DbErr, FromQueryResult, JsonValue, Value,
};

use crate::server::query::config::{Embed, EmbedKind, Operator, ResolvedFilter, ResolvedQuery};

const ID_COLUMN: &str = "id";

/// Executes a [`ResolvedQuery`] and returns its rows as JSON objects.
///
/// The base table is read with a single `SELECT`. Each embed is then resolved with one
/// `WHERE key IN (...)` query over the keys found in the base rows, and the related rows
/// are attached under the related table's name. Embeds accumulate: every descriptor adds
/// its own field to the rows.
pub struct QueryBuilder<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> QueryBuilder<'a, C> {
    /// Creates a new instance of [`QueryBuilder`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn execute(&self, query: &ResolvedQuery) -> Result<Vec<JsonValue>, DbErr> {
        let mut columns = query.columns.clone();
        let mut helper_columns = Vec::new();
        for embed in &query.embeds {
            let key = embed.base_key();
            if !columns.contains(&key) {
                columns.push(key);
                helper_columns.push(key);
            }
        }

        let mut select = Query::select();
        select.from(Alias::new(query.table.name()));
        for column in &columns {
            select.column(Alias::new(*column));
        }
        if let Some(filter) = &query.filter {
            apply_filter(&mut select, filter);
        }
        if let Some((column, ascending)) = query.order_by {
            let order = if ascending { Order::Asc } else { Order::Desc };
            select.order_by(Alias::new(column), order.clone());
            // Rows with equal sort values keep a stable order
            if column != ID_COLUMN {
                select.order_by(Alias::new(ID_COLUMN), order);
            }
        }
        if let Some(limit) = query.limit {
            select.limit(limit);
        }

        let mut rows = self.fetch(&select).await?;

        for embed in &query.embeds {
            rows = self.embed(rows, embed).await?;
        }

        if !helper_columns.is_empty() {
            for row in rows.iter_mut() {
                if let Some(object) = row.as_object_mut() {
                    for column in &helper_columns {
                        object.remove(*column);
                    }
                }
            }
        }

        Ok(rows)
    }

    async fn fetch(&self, select: &SelectStatement) -> Result<Vec<JsonValue>, DbErr> {
        let stmt = self.db.get_database_backend().build(select);

        JsonValue::find_by_statement(stmt).all(self.db).await
    }

    async fn embed(&self, rows: Vec<JsonValue>, embed: &Embed) -> Result<Vec<JsonValue>, DbErr> {
        let mut keys: Vec<JsonValue> = Vec::new();
        for row in &rows {
            if let Some(key) = row.get(embed.base_key()) {
                if !key.is_null() && !keys.contains(key) {
                    keys.push(key.clone());
                }
            }
        }

        let related_key = embed.related_key();
        let mut related_columns = embed.columns.clone();
        let strip_related_key = !related_columns.contains(&related_key);
        if strip_related_key {
            related_columns.push(related_key);
        }

        let mut grouped: HashMap<String, Vec<JsonValue>> = HashMap::new();
        if !keys.is_empty() {
            let mut select = Query::select();
            select.from(Alias::new(embed.table.name()));
            for column in &related_columns {
                select.column(Alias::new(*column));
            }
            select
                .and_where(Expr::col(Alias::new(related_key)).is_in(keys.iter().map(json_to_value)))
                .order_by(Alias::new("id"), Order::Asc);

            for mut related in self.fetch(&select).await? {
                let key = related
                    .get(related_key)
                    .map(|key| key.to_string())
                    .unwrap_or_default();
                if strip_related_key {
                    if let Some(object) = related.as_object_mut() {
                        object.remove(related_key);
                    }
                }
                grouped.entry(key).or_default().push(related);
            }
        }

        let field = embed.table.name();
        let mut embedded = Vec::with_capacity(rows.len());
        for mut row in rows {
            let matches = row
                .get(embed.base_key())
                .filter(|key| !key.is_null())
                .and_then(|key| grouped.get(&key.to_string()));

            let value = match embed.kind {
                EmbedKind::Many => JsonValue::Array(matches.cloned().unwrap_or_default()),
                EmbedKind::Left => matches
                    .and_then(|related| related.first().cloned())
                    .unwrap_or(JsonValue::Null),
                EmbedKind::Inner => match matches.and_then(|related| related.first().cloned()) {
                    Some(value) => value,
                    None => continue,
                },
            };

            if let Some(object) = row.as_object_mut() {
                object.insert(field.to_string(), value);
            }
            embedded.push(row);
        }

        Ok(embedded)
    }
}

fn apply_filter(select: &mut SelectStatement, filter: &ResolvedFilter) {
    let column = || Expr::col(Alias::new(filter.column));
    let pattern = || filter.value.as_str().unwrap_or_default().to_string();

    match filter.operator {
        Operator::Eq => select.and_where(column().eq(json_to_value(&filter.value))),
        Operator::Neq => select.and_where(column().ne(json_to_value(&filter.value))),
        Operator::Gt => select.and_where(column().gt(json_to_value(&filter.value))),
        Operator::Gte => select.and_where(column().gte(json_to_value(&filter.value))),
        Operator::Lt => select.and_where(column().lt(json_to_value(&filter.value))),
        Operator::Lte => select.and_where(column().lte(json_to_value(&filter.value))),
        Operator::Like => select.and_where(column().like(pattern())),
        Operator::Ilike => {
            select.and_where(Expr::expr(Func::lower(column())).like(pattern().to_lowercase()))
        }
        Operator::Is if JsonValue::is_null(&filter.value) => select.and_where(column().is_null()),
        Operator::Is => select.and_where(column().eq(json_to_value(&filter.value))),
        Operator::In => {
            let values: Vec<Value> = filter
                .value
                .as_array()
                .map(|values| values.iter().map(json_to_value).collect())
                .unwrap_or_default();

            select.and_where(column().is_in(values))
        }
    };
}

fn json_to_value(value: &JsonValue) -> Value {
    match value {
        JsonValue::Bool(value) => (*value).into(),
        JsonValue::Number(number) => match number.as_i64() {
            Some(value) => value.into(),
            None => number.as_f64().unwrap_or_default().into(),
        },
        JsonValue::String(value) => value.clone().into(),
        JsonValue::Null => Option::<String>::None.into(),
        other => other.to_string().into(),
    }
}
