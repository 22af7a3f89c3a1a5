use super::error::StorageError;

/// Row filter operators understood by the table endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Neq,
}

impl FilterOp {
    pub fn to_postgrest(&self) -> &'static str {
        match self {
            FilterOp::Eq => "eq",
            FilterOp::Neq => "neq",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn to_postgrest(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterWhereInfo {
    pub column: String,
    pub operator: FilterOp,
    pub data: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOrderInfo {
    pub column: String,
    pub sort: SortDirection,
}

/// Query against one backend table: `select`, `eq`/`neq` filters and ordering.
///
/// Renders to query-string pairs for a PostgREST-style endpoint
/// (`id=eq.42`, `order=created_at.desc`, `select=*`).
#[derive(Debug, Clone)]
pub struct TableQuery {
    table: String,
    select: Option<Vec<String>>,
    wheres: Vec<FilterWhereInfo>,
    order: Vec<FilterOrderInfo>,
}

impl TableQuery {
    pub fn new(table: impl Into<String>) -> Result<Self, StorageError> {
        let table = table.into();
        validate_identifier(&table)?;
        Ok(Self {
            table,
            select: None,
            wheres: Vec::new(),
            order: Vec::new(),
        })
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn select(mut self, columns: &[&str]) -> Result<Self, StorageError> {
        for column in columns {
            validate_identifier(column)?;
        }
        self.select = Some(columns.iter().map(|c| c.to_string()).collect());
        Ok(self)
    }

    pub fn eq(self, column: &str, value: impl Into<String>) -> Result<Self, StorageError> {
        self.filter(column, FilterOp::Eq, value.into())
    }

    pub fn neq(self, column: &str, value: impl Into<String>) -> Result<Self, StorageError> {
        self.filter(column, FilterOp::Neq, value.into())
    }

    pub fn order(mut self, column: &str, sort: SortDirection) -> Result<Self, StorageError> {
        validate_identifier(column)?;
        self.order.push(FilterOrderInfo {
            column: column.to_string(),
            sort,
        });
        Ok(self)
    }

    fn filter(mut self, column: &str, operator: FilterOp, data: String) -> Result<Self, StorageError> {
        validate_identifier(column)?;
        self.wheres.push(FilterWhereInfo {
            column: column.to_string(),
            operator,
            data,
        });
        Ok(self)
    }

    pub fn has_filters(&self) -> bool {
        !self.wheres.is_empty()
    }

    /// Query-string pairs in a stable order: select, filters, order
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();

        if let Some(columns) = &self.select {
            pairs.push(("select".to_string(), columns.join(",")));
        }

        for w in &self.wheres {
            pairs.push((
                w.column.clone(),
                format!("{}.{}", w.operator.to_postgrest(), w.data),
            ));
        }

        if !self.order.is_empty() {
            let parts: Vec<String> = self
                .order
                .iter()
                .map(|o| format!("{}.{}", o.column, o.sort.to_postgrest()))
                .collect();
            pairs.push(("order".to_string(), parts.join(",")));
        }

        pairs
    }
}

/// Lowercase snake_case identifiers only; `*` is accepted as the select-all column
fn validate_identifier(name: &str) -> Result<(), StorageError> {
    if name == "*" {
        return Ok(());
    }
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) if first == '_' || first.is_ascii_lowercase() => {
            chars.all(|c| c == '_' || c.is_ascii_lowercase() || c.is_ascii_digit())
        }
        _ => false,
    };
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidColumn(name.to_string()))
    }
}
