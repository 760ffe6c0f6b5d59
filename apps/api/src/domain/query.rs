use serde_json::Value;

/// Table holding student rows
pub const STUDENTS_TABLE: &str = "students";

/// Table holding course rows
pub const COURSES_TABLE: &str = "courses";

/// The kind of statement a query performs, carrying the write payload if any
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Select,
    /// Insert the given rows
    Insert(Vec<Value>),
    /// Overwrite the given columns on every matching row
    Update(Value),
    Delete,
}

impl Operation {
    pub fn is_write(&self) -> bool {
        !matches!(self, Operation::Select)
    }
}

/// A row predicate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// Column equals the value (compared in its text form)
    Eq { column: String, value: String },
    /// List-valued column includes every one of the values
    Contains { column: String, values: Vec<String> },
}

impl Filter {
    pub fn column(&self) -> &str {
        match self {
            Filter::Eq { column, .. } | Filter::Contains { column, .. } => column,
        }
    }
}

/// A single statement against one table of the record store
///
/// Built fluently, mirroring the hosted store's query API:
///
/// ```
/// use records_api::domain::query::Query;
///
/// let query = Query::select("students")
///     .contains("courses", ["Math"])
///     .eq("cohort", "2023");
///
/// assert_eq!(query.filters.len(), 2);
/// assert!(!query.single);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub table: String,
    pub operation: Operation,
    /// Predicates, combined with logical AND
    pub filters: Vec<Filter>,
    /// Expect exactly one row; anything else is a store error
    pub single: bool,
    pub limit: Option<usize>,
    /// Ask the store to echo the affected rows of a write
    pub returning: bool,
}

impl Query {
    fn new(table: impl Into<String>, operation: Operation) -> Self {
        Self {
            table: table.into(),
            operation,
            filters: Vec::new(),
            single: false,
            limit: None,
            returning: false,
        }
    }

    pub fn select(table: impl Into<String>) -> Self {
        Self::new(table, Operation::Select)
    }

    pub fn insert(table: impl Into<String>, rows: Vec<Value>) -> Self {
        Self::new(table, Operation::Insert(rows))
    }

    pub fn update(table: impl Into<String>, changes: Value) -> Self {
        Self::new(table, Operation::Update(changes))
    }

    pub fn delete(table: impl Into<String>) -> Self {
        Self::new(table, Operation::Delete)
    }

    pub fn eq(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push(Filter::Eq {
            column: column.into(),
            value: value.into(),
        });
        self
    }

    pub fn contains<I, S>(mut self, column: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filters.push(Filter::Contains {
            column: column.into(),
            values: values.into_iter().map(Into::into).collect(),
        });
        self
    }

    pub fn single(mut self) -> Self {
        self.single = true;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn returning(mut self) -> Self {
        self.returning = true;
        self
    }
}
