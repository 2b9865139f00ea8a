use std::{fmt, str::FromStr};

use sea_orm::JsonValue;
use serde::{Deserialize, Serialize};

use crate::server::error::query::QueryError;

/// Tables reachable through the query layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Table {
    Users,
    Quizzes,
    Questions,
    QuestionPossibleAnswers,
    Submissions,
    UserAnswers,
}

impl Table {
    pub const ALL: [Table; 6] = [
        Table::Users,
        Table::Quizzes,
        Table::Questions,
        Table::QuestionPossibleAnswers,
        Table::Submissions,
        Table::UserAnswers,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Quizzes => "quizzes",
            Self::Questions => "questions",
            Self::QuestionPossibleAnswers => "question_possible_answers",
            Self::Submissions => "submissions",
            Self::UserAnswers => "user_answers",
        }
    }

    /// Columns that may be selected, filtered or ordered on.
    ///
    /// `users.password_hash` is not listed and cannot be read through this layer.
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            Self::Users => &[
                "id",
                "email",
                "username",
                "role",
                "quizzes_taken",
                "total_points",
                "average_score",
                "created_at",
                "updated_at",
            ],
            Self::Quizzes => &[
                "id",
                "title",
                "description",
                "category",
                "difficulty",
                "time_limit",
                "is_published",
                "created_by",
                "created_at",
                "updated_at",
            ],
            Self::Questions => &[
                "id",
                "quiz_id",
                "question_text",
                "question_type",
                "points",
                "position",
            ],
            Self::QuestionPossibleAnswers => &["id", "question_id", "answer_text", "is_correct"],
            Self::Submissions => &[
                "id",
                "user_id",
                "quiz_id",
                "score",
                "total_possible",
                "time_spent",
                "completed_at",
            ],
            Self::UserAnswers => &[
                "id",
                "submission_id",
                "question_id",
                "selected_answer_id",
                "is_correct",
            ],
        }
    }

    /// Returns the canonical `'static` spelling of `column` if the table has it.
    pub fn column(self, column: &str) -> Result<&'static str, QueryError> {
        self.columns()
            .iter()
            .copied()
            .find(|known| *known == column)
            .ok_or_else(|| QueryError::UnknownColumn {
                table: self.name().to_string(),
                column: column.to_string(),
            })
    }

    /// Parses a selection string: `*` or a comma separated list of columns.
    pub fn parse_select(self, select: &str) -> Result<Vec<&'static str>, QueryError> {
        let select = select.trim();
        if select == "*" {
            return Ok(self.columns().to_vec());
        }

        let mut columns = Vec::new();
        for column in select.split(',').map(str::trim) {
            if column.is_empty() {
                continue;
            }

            let column = self.column(column)?;
            if !columns.contains(&column) {
                columns.push(column);
            }
        }

        if columns.is_empty() {
            return Err(QueryError::EmptySelection(self.name().to_string()));
        }

        Ok(columns)
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Table {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Table::ALL
            .into_iter()
            .find(|table| table.name() == s)
            .ok_or_else(|| QueryError::UnknownTable(s.to_string()))
    }
}

/// Comparison applied by a [`Filter`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
    Like,
    /// Case-insensitive `LIKE`
    Ilike,
    /// `IS NULL` for a `null` value, equality for booleans
    Is,
    /// Membership in an array value
    In,
}

impl Operator {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Neq => "neq",
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::Like => "like",
            Self::Ilike => "ilike",
            Self::Is => "is",
            Self::In => "in",
        }
    }
}

/// A single `{column, operator, value}` predicate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Filter {
    pub column: String,
    pub operator: Operator,
    #[schema(value_type = Object)]
    pub value: JsonValue,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct OrderBy {
    pub column: String,
    #[serde(default = "default_ascending")]
    pub ascending: bool,
}

fn default_ascending() -> bool {
    true
}

/// A nested selection of a related table.
///
/// For `joins` and `relations`, `on` is the base table column referencing the related
/// table's `id`. For `relations_many`, `on` is the related table column referencing the
/// base table's `id`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Relation {
    pub table: String,
    pub on: String,
    /// Columns of the related table, `*` when absent
    pub select: Option<String>,
}

impl Relation {
    pub fn new(table: Table, on: &str) -> Self {
        Self {
            table: table.name().to_string(),
            on: on.to_string(),
            select: None,
        }
    }

    pub fn select(mut self, select: &str) -> Self {
        self.select = Some(select.to_string());
        self
    }

    fn key_fragment(&self) -> String {
        format!(
            "{}:{}:{}",
            self.table,
            self.on,
            self.select.as_deref().unwrap_or("*")
        )
    }
}

/// Declarative description of a read against one table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct QueryConfig {
    pub table: String,
    #[serde(default = "default_select")]
    pub select: String,
    pub order_by: Option<OrderBy>,
    pub filter: Option<Filter>,
    /// To-one embeds, base rows without a match are dropped
    #[serde(default)]
    pub joins: Vec<Relation>,
    /// To-one embeds, unmatched rows embed `null`
    #[serde(default)]
    pub relations: Vec<Relation>,
    /// To-many embeds, always an array
    #[serde(default)]
    pub relations_many: Vec<Relation>,
    pub limit: Option<u64>,
}

fn default_select() -> String {
    "*".to_string()
}

impl QueryConfig {
    pub fn new(table: Table) -> Self {
        Self {
            table: table.name().to_string(),
            select: default_select(),
            order_by: None,
            filter: None,
            joins: Vec::new(),
            relations: Vec::new(),
            relations_many: Vec::new(),
            limit: None,
        }
    }

    pub fn select(mut self, select: &str) -> Self {
        self.select = select.to_string();
        self
    }

    pub fn order_by(mut self, column: &str, ascending: bool) -> Self {
        self.order_by = Some(OrderBy {
            column: column.to_string(),
            ascending,
        });
        self
    }

    pub fn filter(mut self, column: &str, operator: Operator, value: impl Into<JsonValue>) -> Self {
        self.filter = Some(Filter {
            column: column.to_string(),
            operator,
            value: value.into(),
        });
        self
    }

    pub fn join(mut self, relation: Relation) -> Self {
        self.joins.push(relation);
        self
    }

    pub fn relation(mut self, relation: Relation) -> Self {
        self.relations.push(relation);
        self
    }

    pub fn relation_many(mut self, relation: Relation) -> Self {
        self.relations_many.push(relation);
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Builds the cache key by concatenating every serialized field.
    ///
    /// Two configurations produce the same key exactly when all of their fields match.
    pub fn cache_key(&self) -> String {
        let order = self
            .order_by
            .as_ref()
            .map(|order| {
                format!(
                    "{}.{}",
                    order.column,
                    if order.ascending { "asc" } else { "desc" }
                )
            })
            .unwrap_or_default();
        let filter = self
            .filter
            .as_ref()
            .map(|filter| {
                format!(
                    "{}.{}.{}",
                    filter.column,
                    filter.operator.as_str(),
                    filter.value
                )
            })
            .unwrap_or_default();
        let relations = |relations: &[Relation]| {
            relations
                .iter()
                .map(Relation::key_fragment)
                .collect::<Vec<_>>()
                .join(",")
        };

        format!(
            "{}|{}|{}|{}|{}|{}|{}|{}",
            self.table,
            self.select,
            order,
            filter,
            relations(&self.joins),
            relations(&self.relations),
            relations(&self.relations_many),
            self.limit.map(|limit| limit.to_string()).unwrap_or_default()
        )
    }

    /// Validates every table and column name against the known schema.
    pub fn resolve(&self) -> Result<ResolvedQuery, QueryError> {
        let table: Table = self.table.parse()?;
        let columns = table.parse_select(&self.select)?;

        let order_by = self
            .order_by
            .as_ref()
            .map(|order| Ok::<_, QueryError>((table.column(&order.column)?, order.ascending)))
            .transpose()?;

        let filter = self
            .filter
            .as_ref()
            .map(|filter| {
                validate_filter_value(filter.operator, &filter.value)?;

                Ok::<_, QueryError>(ResolvedFilter {
                    column: table.column(&filter.column)?,
                    operator: filter.operator,
                    value: filter.value.clone(),
                })
            })
            .transpose()?;

        let mut embeds = Vec::new();
        for (kind, relations) in [
            (EmbedKind::Inner, &self.joins),
            (EmbedKind::Left, &self.relations),
            (EmbedKind::Many, &self.relations_many),
        ] {
            for relation in relations {
                embeds.push(Embed::resolve(table, kind, relation)?);
            }
        }

        Ok(ResolvedQuery {
            table,
            columns,
            order_by,
            filter,
            embeds,
            limit: self.limit,
        })
    }
}

fn validate_filter_value(operator: Operator, value: &JsonValue) -> Result<(), QueryError> {
    let invalid = |reason: &str| QueryError::InvalidFilterValue {
        operator: operator.as_str().to_string(),
        reason: reason.to_string(),
    };

    match operator {
        Operator::In if !value.is_array() => Err(invalid("expected an array")),
        Operator::Is if !(value.is_null() || value.is_boolean()) => {
            Err(invalid("expected null or a boolean"))
        }
        Operator::Like | Operator::Ilike if !value.is_string() => {
            Err(invalid("expected a string pattern"))
        }
        Operator::Eq
        | Operator::Neq
        | Operator::Gt
        | Operator::Gte
        | Operator::Lt
        | Operator::Lte
            if value.is_array() || value.is_object() || value.is_null() =>
        {
            Err(invalid("expected a string, number or boolean"))
        }
        _ => Ok(()),
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedFilter {
    pub column: &'static str,
    pub operator: Operator,
    pub value: JsonValue,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmbedKind {
    Inner,
    Left,
    Many,
}

/// A validated relation descriptor.
#[derive(Clone, Debug, PartialEq)]
pub struct Embed {
    pub kind: EmbedKind,
    pub table: Table,
    pub on: &'static str,
    pub columns: Vec<&'static str>,
}

impl Embed {
    fn resolve(base: Table, kind: EmbedKind, relation: &Relation) -> Result<Self, QueryError> {
        let table: Table = relation.table.parse()?;
        let columns = table.parse_select(relation.select.as_deref().unwrap_or("*"))?;
        let on = match kind {
            EmbedKind::Inner | EmbedKind::Left => base.column(&relation.on)?,
            EmbedKind::Many => table.column(&relation.on)?,
        };

        Ok(Self {
            kind,
            table,
            on,
            columns,
        })
    }

    /// Column of the base rows whose value links to the related rows
    pub fn base_key(&self) -> &'static str {
        match self.kind {
            EmbedKind::Inner | EmbedKind::Left => self.on,
            EmbedKind::Many => "id",
        }
    }

    /// Column of the related rows matched against [`Embed::base_key`]
    pub fn related_key(&self) -> &'static str {
        match self.kind {
            EmbedKind::Inner | EmbedKind::Left => "id",
            EmbedKind::Many => self.on,
        }
    }
}

/// A [`QueryConfig`] whose names have all been checked against the schema.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedQuery {
    pub table: Table,
    pub columns: Vec<&'static str>,
    pub order_by: Option<(&'static str, bool)>,
    pub filter: Option<ResolvedFilter>,
    pub embeds: Vec<Embed>,
    pub limit: Option<u64>,
}

impl ResolvedQuery {
    /// Every table read by the query, base table first.
    pub fn tables(&self) -> Vec<Table> {
        let mut tables = vec![self.table];
        for embed in &self.embeds {
            if !tables.contains(&embed.table) {
                tables.push(embed.table);
            }
        }
        tables
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    /// Expect identical configurations to collapse to the same key
    #[test]
    fn identical_configs_share_cache_key() {
        let first = QueryConfig::new(Table::Quizzes)
            .select("id, title")
            .order_by("created_at", false);
        let second = QueryConfig::new(Table::Quizzes)
            .select("id, title")
            .order_by("created_at", false);

        assert_eq!(first.cache_key(), second.cache_key());
    }

    /// Expect any differing field to produce a different key
    #[test]
    fn differing_configs_have_distinct_keys() {
        let base = QueryConfig::new(Table::Submissions).order_by("completed_at", false);
        let variants = [
            base.clone().select("id"),
            base.clone().order_by("completed_at", true),
            base.clone().filter("user_id", Operator::Eq, 1),
            base.clone().filter("user_id", Operator::Eq, 2),
            base.clone().relation(Relation::new(Table::Quizzes, "quiz_id")),
            base.clone().join(Relation::new(Table::Quizzes, "quiz_id")),
            base.clone().limit(5),
        ];

        for variant in &variants {
            assert_ne!(base.cache_key(), variant.cache_key());
        }
    }

    /// Expect `*` to expand to the known columns, which exclude the password hash
    #[test]
    fn star_selection_hides_password_hash() {
        let columns = Table::Users.parse_select("*").unwrap();

        assert!(columns.contains(&"email"));
        assert!(!columns.contains(&"password_hash"));
    }

    /// Expect UnknownColumn when selecting the password hash explicitly
    #[test]
    fn rejects_password_hash_selection() {
        let result = QueryConfig::new(Table::Users)
            .select("id, password_hash")
            .resolve();

        assert!(matches!(result, Err(QueryError::UnknownColumn { .. })));
    }

    /// Expect UnknownTable for names outside the schema
    #[test]
    fn rejects_unknown_table() {
        let mut config = QueryConfig::new(Table::Quizzes);
        config.table = "pg_shadow".to_string();

        assert_eq!(
            config.resolve(),
            Err(QueryError::UnknownTable("pg_shadow".to_string()))
        );
    }

    /// Expect every relation descriptor to be kept rather than the last overriding the rest
    #[test]
    fn accumulates_relation_descriptors() {
        let resolved = QueryConfig::new(Table::Submissions)
            .relation(Relation::new(Table::Quizzes, "quiz_id").select("title"))
            .relation(Relation::new(Table::Users, "user_id").select("username"))
            .relation_many(Relation::new(Table::UserAnswers, "submission_id"))
            .resolve()
            .unwrap();

        assert_eq!(resolved.embeds.len(), 3);
        assert_eq!(
            resolved.tables(),
            vec![
                Table::Submissions,
                Table::Quizzes,
                Table::Users,
                Table::UserAnswers
            ]
        );
        assert_eq!(resolved.embeds[2].base_key(), "id");
        assert_eq!(resolved.embeds[2].related_key(), "submission_id");
    }

    /// Expect the relation key column to be validated on the correct side
    #[test]
    fn validates_relation_key_side() {
        // `quiz_id` lives on questions, not on quizzes
        let result = QueryConfig::new(Table::Quizzes)
            .relation(Relation::new(Table::Questions, "quiz_id"))
            .resolve();
        assert!(matches!(result, Err(QueryError::UnknownColumn { .. })));

        let result = QueryConfig::new(Table::Quizzes)
            .relation_many(Relation::new(Table::Questions, "quiz_id"))
            .resolve();
        assert!(result.is_ok());
    }

    /// Expect filter values to match their operator
    #[test]
    fn validates_filter_values() {
        let cases = [
            (Operator::In, json!(1), false),
            (Operator::In, json!([1, 2]), true),
            (Operator::Is, json!(null), true),
            (Operator::Is, json!("x"), false),
            (Operator::Ilike, json!("%rust%"), true),
            (Operator::Like, json!(3), false),
            (Operator::Eq, json!(null), false),
            (Operator::Gte, json!(5), true),
        ];

        for (operator, value, valid) in cases {
            let result = QueryConfig::new(Table::Quizzes)
                .filter("id", operator, value)
                .resolve();
            assert_eq!(result.is_ok(), valid, "operator {:?}", operator);
        }
    }
}
